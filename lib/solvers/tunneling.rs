//! Transmission through a rectangular barrier `V(x) = V₀` for `0 <= x <= L`.
//!
//! In terms of the barrier's natural energy `ε = ħ²/(2 m L²)`:
//!
//! ```text
//! E < V₀:  T = [1 + V₀² sinh²(κL) / (4 E (V₀ - E))]⁻¹,  κL = √((V₀ - E)/ε)
//! E > V₀:  T = [1 + V₀² sin²(kL)  / (4 E (E - V₀))]⁻¹,  kL = √((E - V₀)/ε)
//! E = V₀:  T = [1 + E / (4ε)]⁻¹ = [1 + m E L² / (2ħ²)]⁻¹
//! ```
//!
//! The last form is used whenever `|E - V₀|` is within the configured relative
//! tolerance of `V₀`, where the first two become `0/0`.

use std::f64::consts::TAU;
use num_complex::Complex64 as C64;
use serde::Serialize;
use serde_json::json;
use crate::{
    config::{ BarrierConfig, EngineConfig },
    error::Violations,
    plot::{ grid, Panel, PlotDirective, Series, Style },
    result::{ TunnelingResult, WaveNumbers },
    schema::{ Example, ParameterSpec, SolveRequest },
    solvers::{ Solver, SolverId },
    units::Units,
};

/// Rectangular barrier solver.
#[derive(Copy, Clone, Debug)]
pub struct Tunneling {
    barrier: BarrierConfig,
    samples: usize,
}

impl Tunneling {
    pub fn new(config: &EngineConfig) -> Self {
        Self { barrier: config.barrier, samples: config.plot.samples }
    }
}

impl Default for Tunneling {
    fn default() -> Self { Self::new(&EngineConfig::default()) }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Params {
    pub barrier_height: f64,
    pub barrier_width: f64,
    pub particle_energy: f64,
    pub m: f64,
    pub hbar: f64,
}

impl TryFrom<&SolveRequest> for Params {
    type Error = Violations;

    fn try_from(req: &SolveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            barrier_height: req.float("barrier_height")?,
            barrier_width: req.float("barrier_width")?,
            particle_energy: req.float("particle_energy")?,
            m: req.float("m")?,
            hbar: req.float("hbar")?,
        })
    }
}

/// Position of the particle energy relative to the barrier top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// `E < V₀`
    Tunneling,
    /// `E > V₀`
    OverBarrier,
    /// `E ≈ V₀`
    Threshold,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Info {
    #[serde(flatten)]
    pub params: Params,
    pub regime: Regime,
    /// `V₀ / E`.
    pub barrier_parameter: f64,
    pub de_broglie_wavelength: f64,
    /// `1/κ`; tunneling regime only.
    pub penetration_depth: Option<f64>,
    /// Where a classical particle would turn back (the front face of the
    /// barrier); tunneling regime only.
    pub classical_turning_point: Option<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub system_info: Info,
    pub tunneling_results: TunnelingResult,
    pub wave_numbers: WaveNumbers,
}

// scattering amplitudes for a wave e^{ikx} incident from the left:
//   x < 0:       e^{ikx} + r e^{-ikx}
//   0 < x < L:   c e^{qx} + d e^{-qx}    (c + d x when q = 0)
//   x > L:       t e^{ikx}
#[derive(Copy, Clone, Debug)]
struct Amplitudes {
    k: f64,
    q: C64,
    width: f64,
    r: C64,
    c: C64,
    d: C64,
    t: C64,
}

// beyond this the barrier is treated as semi-infinite to avoid overflow
const OPAQUE_LIMIT: f64 = 300.0;

impl Amplitudes {
    fn new(k: f64, q: C64, width: f64, linear: bool) -> Self {
        let i = C64::i();
        let ikl = i * k * width;
        if linear {
            let t = 2.0 * (-ikl).exp() / (2.0 - ikl);
            let r = 1.0 - t * ikl.exp();
            let c = 1.0 + r;
            let d = i * k * (1.0 - r);
            return Self { k, q: C64::new(0.0, 0.0), width, r, c, d, t };
        }
        let ql = q * width;
        if ql.re > OPAQUE_LIMIT {
            let r = (i * k + q) / (i * k - q);
            let zero = C64::new(0.0, 0.0);
            return Self { k, q, width, r, c: zero, d: 1.0 + r, t: zero };
        }
        let beta = i * k / q;
        let t = 4.0 * beta * (-ikl).exp()
            / ((1.0 + beta).powi(2) * (-ql).exp() - (1.0 - beta).powi(2) * ql.exp());
        let c = t * ikl.exp() * (-ql).exp() * (1.0 + beta) / 2.0;
        let d = t * ikl.exp() * ql.exp() * (1.0 - beta) / 2.0;
        let r = c + d - 1.0;
        Self { k, q, width, r, c, d, t }
    }

    fn psi(&self, x: f64) -> C64 {
        let i = C64::i();
        if x < 0.0 {
            (i * self.k * x).exp() + self.r * (-i * self.k * x).exp()
        } else if x <= self.width {
            if self.q == C64::new(0.0, 0.0) {
                self.c + self.d * x
            } else {
                self.c * (self.q * x).exp() + self.d * (-self.q * x).exp()
            }
        } else {
            self.t * (i * self.k * x).exp()
        }
    }
}

impl Tunneling {
    fn regime(&self, params: &Params) -> Regime {
        let Params { barrier_height: V0, particle_energy: E, .. } = *params;
        if (E - V0).abs() <= self.barrier.degenerate_epsilon * V0 {
            Regime::Threshold
        } else if E < V0 {
            Regime::Tunneling
        } else {
            Regime::OverBarrier
        }
    }

    fn transmission(regime: Regime, V0: f64, E: f64, eps: f64) -> f64 {
        match regime {
            Regime::Threshold => (1.0 + E / (4.0 * eps)).recip(),
            Regime::Tunneling => {
                let kappa_l = ((V0 - E) / eps).sqrt();
                (1.0 + V0.powi(2) * kappa_l.sinh().powi(2) / (4.0 * E * (V0 - E))).recip()
            },
            Regime::OverBarrier => {
                let k_l = ((E - V0) / eps).sqrt();
                (1.0 + V0.powi(2) * k_l.sin().powi(2) / (4.0 * E * (E - V0))).recip()
            },
        }
    }

    fn amplitudes(&self, params: &Params) -> Amplitudes {
        let units = Units::new(params.hbar, params.m, params.barrier_width);
        let width = params.barrier_width;
        let k = units.nat_wavenumber(params.particle_energy) / width;
        let q2 = units.to_nat_energy::<f64, f64>(params.barrier_height - params.particle_energy);
        let q = C64::new(q2, 0.0).sqrt() / width;
        Amplitudes::new(k, q, width, self.regime(params) == Regime::Threshold)
    }
}

impl Solver for Tunneling {
    type Params = Params;
    type Output = Solution;

    fn id(&self) -> SolverId { SolverId::Tunneling }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::float("barrier_height", "Barrier Height (V₀)", 2.0)
                .range(0.1, 10.0)
                .unit("energy units")
                .describe("Height of potential barrier")
                .positive("barrier height must be positive"),
            ParameterSpec::float("barrier_width", "Barrier Width (L)", 1.0)
                .range(0.1, 5.0)
                .unit("length units")
                .describe("Width of potential barrier")
                .positive("barrier width must be positive"),
            ParameterSpec::float("particle_energy", "Particle Energy (E)", 1.0)
                .range(0.1, 5.0)
                .unit("energy units")
                .describe("Energy of incident particle")
                .positive("particle energy must be positive"),
            ParameterSpec::float("m", "Particle Mass (m)", 1.0)
                .range(0.1, 10.0)
                .unit("mass units")
                .describe("Mass of tunneling particle")
                .positive("particle mass must be positive"),
            ParameterSpec::float("hbar", "ℏ (Reduced Planck)", 1.0)
                .range(0.1, 10.0)
                .unit("action units")
                .describe("Reduced Planck constant")
                .positive("reduced Planck constant must be positive"),
        ]
    }

    fn examples(&self) -> Vec<Example> {
        let preset = |V0: f64, L: f64, E: f64| json!({
            "barrier_height": V0,
            "barrier_width": L,
            "particle_energy": E,
            "m": 1.0,
            "hbar": 1.0,
        });
        vec![
            Example::new(
                "tunneling",
                "Quantum Tunneling",
                "E < V₀, particle tunnels through barrier",
                preset(2.0, 1.0, 1.0),
            ),
            Example::new(
                "over_barrier",
                "Over-barrier",
                "E > V₀, particle goes over barrier",
                preset(1.0, 1.0, 2.0),
            ),
            Example::new(
                "thick_barrier",
                "Thick Barrier",
                "Wide barrier with strong attenuation",
                preset(2.0, 3.0, 1.0),
            ),
            Example::new(
                "high_barrier",
                "High Barrier",
                "Very high barrier",
                preset(5.0, 1.0, 1.0),
            ),
        ]
    }

    fn solve(&self, params: &Params) -> Solution {
        let Params {
            barrier_height: V0,
            barrier_width: L,
            particle_energy: E,
            m,
            hbar,
        } = *params;
        let units = Units::new(hbar, m, L);
        let regime = self.regime(params);

        let t = Self::transmission(regime, V0, E, units.e);
        let tunneling_results = TunnelingResult::from_transmission(t);

        let k_outside = units.nat_wavenumber(E) / L;
        let k_barrier = units.nat_wavenumber(V0 - E) / L;
        let k_inside = match regime {
            Regime::Tunneling => C64::new(0.0, k_barrier),
            Regime::OverBarrier => C64::new(k_barrier, 0.0),
            Regime::Threshold => C64::new(0.0, 0.0),
        };
        let wave_numbers = WaveNumbers {
            k_outside,
            k_inside,
            barrier_phase: k_inside * L,
        };

        let tunneling = regime == Regime::Tunneling;
        let system_info = Info {
            params: *params,
            regime,
            barrier_parameter: V0 / E,
            de_broglie_wavelength: TAU / k_outside,
            penetration_depth: tunneling.then(|| k_barrier.recip()),
            classical_turning_point: tunneling.then_some(0.0),
        };
        Solution { system_info, tunneling_results, wave_numbers }
    }

    fn describe_plot(&self, output: &Solution) -> PlotDirective {
        let params = output.system_info.params;
        let Params { barrier_height: V0, barrier_width: L, particle_energy: E, .. } = params;
        let x = grid(-2.0 * L, 3.0 * L, self.samples);

        let potential = Panel::new(
            format!("Quantum Tunneling: {:?} regime", output.system_info.regime),
            "Position",
            "Potential Energy",
        )
            .xrange(-2.0 * L, 3.0 * L)
            .yrange(-0.5, V0.max(E) + 0.5)
            .series(Series::sample(
                "Potential Barrier", Style::Filled, &x,
                |xk| if (0.0..=L).contains(&xk) { V0 } else { 0.0 },
            ))
            .hline(E, format!("Particle Energy E={E}"), Style::Dashed)
            .vline(0.0, "", Style::Dashed)
            .vline(L, "", Style::Dashed);

        let amps = self.amplitudes(&params);
        let res = output.tunneling_results;
        let wavefunction = Panel::new(
            format!(
                "T = {:.4} ({:.2}%), R = {:.4} ({:.2}%)",
                res.transmission_coefficient,
                res.transmission_probability,
                res.reflection_coefficient,
                res.reflection_probability,
            ),
            "Position",
            "Wavefunction",
        )
            .xrange(-2.0 * L, 3.0 * L)
            .series(Series::sample("Re(ψ)", Style::Line, &x, |xk| amps.psi(xk).re))
            .series(Series::sample("|ψ|²", Style::Line, &x, |xk| amps.psi(xk).norm_sqr()))
            .region("Barrier", 0.0, L);

        PlotDirective::new(format!("Rectangular Barrier: V₀={V0}, L={L}, E={E}"))
            .panel(potential)
            .panel(wavefunction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(V0: f64, L: f64, E: f64) -> Params {
        Params { barrier_height: V0, barrier_width: L, particle_energy: E, m: 1.0, hbar: 1.0 }
    }

    #[test]
    fn regimes() {
        let solver = Tunneling::default();
        assert_eq!(solver.solve(&params(2.0, 1.0, 1.0)).system_info.regime, Regime::Tunneling);
        assert_eq!(solver.solve(&params(1.0, 1.0, 2.0)).system_info.regime, Regime::OverBarrier);
        assert_eq!(solver.solve(&params(1.5, 1.0, 1.5)).system_info.regime, Regime::Threshold);
    }

    #[test]
    fn threshold_uses_limiting_formula() {
        let sol = Tunneling::default().solve(&params(2.0, 1.5, 2.0));
        // 1 / (1 + m E L² / (2ħ²))
        let expected = 100.0 / (1.0 + 2.0 * 1.5 * 1.5 / 2.0);
        assert!((sol.tunneling_results.transmission_probability - expected).abs() < 1e-9);
        assert_eq!(sol.wave_numbers.k_inside, C64::new(0.0, 0.0));
    }

    #[test]
    fn transmission_is_continuous_across_threshold() {
        let solver = Tunneling::default();
        let at = solver.solve(&params(2.0, 1.0, 2.0)).tunneling_results.transmission_probability;
        for E in [2.0 - 1e-6, 2.0 + 1e-6] {
            let near = solver.solve(&params(2.0, 1.0, E)).tunneling_results;
            assert!((near.transmission_probability - at).abs() < 1e-3);
            assert!(
                (near.transmission_probability + near.reflection_probability - 100.0).abs()
                < 1e-6
            );
        }
    }

    #[test]
    fn known_tunneling_value() {
        // E = 1, V₀ = 2, L = 1, m = ħ = 1: κL = √2
        let sol = Tunneling::default().solve(&params(2.0, 1.0, 1.0));
        let s = 2.0_f64.sqrt().sinh();
        let expected = 1.0 / (1.0 + 4.0 * s * s / 4.0);
        let t = sol.tunneling_results.transmission_coefficient.powi(2);
        assert!((t - expected).abs() < 1e-12);
        assert!((sol.wave_numbers.k_inside.im - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((sol.wave_numbers.barrier_phase.im - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(sol.system_info.classical_turning_point, Some(0.0));
        assert!((sol.system_info.penetration_depth.unwrap() - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn over_barrier_resonance_is_transparent() {
        // kL = π  =>  E - V₀ = π² ε with ε = 1/2
        let V0 = 1.0;
        let E = V0 + std::f64::consts::PI.powi(2) / 2.0;
        let sol = Tunneling::default().solve(&params(V0, 1.0, E));
        assert!((sol.tunneling_results.transmission_probability - 100.0).abs() < 1e-9);
        assert!(sol.system_info.penetration_depth.is_none());
    }

    #[test]
    fn matched_amplitudes_reproduce_transmission() {
        let solver = Tunneling::default();
        for p in [params(2.0, 1.0, 1.0), params(1.0, 1.0, 2.0), params(1.5, 0.7, 1.5),
                  params(5.0, 2.0, 0.5)]
        {
            let amps = solver.amplitudes(&p);
            let t = solver.solve(&p).tunneling_results.transmission_probability / 100.0;
            assert!((amps.t.norm_sqr() - t).abs() < 1e-9, "{p:?}");
            assert!((amps.t.norm_sqr() + amps.r.norm_sqr() - 1.0).abs() < 1e-9, "{p:?}");
            // continuity at both faces
            let L = p.barrier_width;
            assert!((amps.psi(-1e-12) - amps.psi(0.0)).norm() < 1e-6);
            assert!((amps.psi(L) - amps.psi(L + 1e-12)).norm() < 1e-6);
        }
    }

    #[test]
    fn opaque_barrier_reflects_everything() {
        let amps = Amplitudes::new(1.0, C64::new(400.0, 0.0), 1.0, false);
        assert_eq!(amps.t, C64::new(0.0, 0.0));
        assert!((amps.r.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn plot_has_potential_and_wavefunction() {
        let solver = Tunneling::default();
        let plot = solver.describe_plot(&solver.solve(&params(2.0, 1.0, 1.0)));
        assert_eq!(plot.panels.len(), 2);
        assert_eq!(plot.panels[1].regions.len(), 1);
        assert!(plot.panels[1].series.iter().all(|s| s.y.iter().all(|y| y.is_some())));
    }
}
