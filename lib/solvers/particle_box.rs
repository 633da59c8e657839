//! Particle in an infinite square well of length `L`.
//!
//! `E_n = n² π² ħ² / (2 m L²)` with wavefunctions `√(2/L) sin(nπx/L)`,
//! de Broglie wavelength `2L/n`, and `n - 1` interior nodes.

use std::f64::consts::PI;
use serde::Serialize;
use serde_json::json;
use crate::{
    config::EngineConfig,
    error::Violations,
    plot::{ grid, Panel, PlotDirective, Series, Style },
    result::EnergyLevel,
    schema::{ Example, ParameterSpec, SolveRequest },
    solvers::{ Solver, SolverId },
    units::Units,
};

/// Wavefunctions and densities are drawn for at most this many levels.
const DRAWN_LEVELS: usize = 4;

/// Particle-in-a-box solver.
#[derive(Copy, Clone, Debug)]
pub struct ParticleBox {
    samples: usize,
}

impl ParticleBox {
    pub fn new(config: &EngineConfig) -> Self { Self { samples: config.plot.samples } }
}

impl Default for ParticleBox {
    fn default() -> Self { Self::new(&EngineConfig::default()) }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Params {
    pub box_length: f64,
    pub m: f64,
    pub hbar: f64,
    pub max_n: u32,
    /// Overlay the uniform classical density in the plot.
    pub show_classical: bool,
}

impl TryFrom<&SolveRequest> for Params {
    type Error = Violations;

    fn try_from(req: &SolveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            box_length: req.float("box_length")?,
            m: req.float("m")?,
            hbar: req.float("hbar")?,
            max_n: req.int("max_n")?.max(0) as u32,
            show_classical: req.flag("show_classical")?,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Info {
    #[serde(flatten)]
    pub params: Params,
    /// `E₁ = π² ħ² / (2 m L²)`
    pub ground_state_energy: f64,
    /// `Δx Δp` in the ground state, `(L/√12)(πħ/L)`.
    pub uncertainty_product: f64,
    /// `ħ / 2`
    pub heisenberg_minimum: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub system_info: Info,
    pub energy_levels: Vec<EnergyLevel>,
}

fn wavefunction(n: u32, L: f64, x: f64) -> f64 {
    (2.0 / L).sqrt() * (f64::from(n) * PI * x / L).sin()
}

impl Solver for ParticleBox {
    type Params = Params;
    type Output = Solution;

    fn id(&self) -> SolverId { SolverId::ParticleBox }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::float("box_length", "Box Length (L)", 1.0)
                .range(0.1, 10.0)
                .unit("length units")
                .describe("Length of the infinite square well")
                .positive("box length must be positive"),
            ParameterSpec::float("m", "Particle Mass (m)", 1.0)
                .range(0.1, 10.0)
                .unit("mass units")
                .describe("Mass of confined particle")
                .positive("particle mass must be positive"),
            ParameterSpec::float("hbar", "ℏ (Reduced Planck)", 1.0)
                .range(0.1, 10.0)
                .unit("action units")
                .describe("Reduced Planck constant")
                .positive("reduced Planck constant must be positive"),
            ParameterSpec::int("max_n", "Maximum n", 5)
                .range(1.0, 15.0)
                .unit("quantum number")
                .describe("Maximum quantum number to calculate")
                .at_least_one("quantum number must be at least 1"),
            ParameterSpec::flag("show_classical", "Show Classical", true)
                .unit("comparison")
                .describe("Show classical probability distribution"),
        ]
    }

    fn examples(&self) -> Vec<Example> {
        let preset = |L: f64, m: f64, max_n: u32| json!({
            "box_length": L,
            "m": m,
            "hbar": 1.0,
            "max_n": max_n,
            "show_classical": true,
        });
        vec![
            Example::new(
                "standard", "Standard Box", "Basic particle in a box", preset(1.0, 1.0, 5)),
            Example::new(
                "narrow_box", "Narrow Box", "Small confinement, high energy",
                preset(0.5, 1.0, 5)),
            Example::new(
                "wide_box", "Wide Box", "Large confinement, low energy", preset(3.0, 1.0, 8)),
            Example::new(
                "heavy_particle", "Heavy Particle", "Massive particle, smaller quantum effects",
                preset(1.0, 10.0, 6)),
        ]
    }

    fn solve(&self, params: &Params) -> Solution {
        let Params { box_length: L, m, hbar, max_n, .. } = *params;
        let ground = PI.powi(2) * Units::new(hbar, m, L).e;
        let energy_levels: Vec<EnergyLevel> = (1..=max_n)
            .map(|n| {
                let ratio = f64::from(n * n);
                EnergyLevel::box_mode(n, ratio * ground, 2.0 * L / f64::from(n), ratio)
            })
            .collect();
        let system_info = Info {
            params: *params,
            ground_state_energy: ground,
            uncertainty_product: (L / 12.0_f64.sqrt()) * (PI * hbar / L),
            heisenberg_minimum: hbar / 2.0,
        };
        Solution { system_info, energy_levels }
    }

    fn describe_plot(&self, output: &Solution) -> PlotDirective {
        let Params { box_length: L, show_classical, .. } = output.system_info.params;
        let levels = &output.energy_levels;
        let e_max = levels.last().map(|lv| lv.energy).unwrap_or(0.0);
        let x = grid(0.0, L, self.samples);

        let mut diagram = Panel::new("Energy Levels", "Position", "Energy")
            .xrange(-0.1 * L, 1.3 * L)
            .yrange(0.0, 1.1 * e_max)
            .vline(0.0, "Infinite Walls", Style::Line)
            .vline(L, "", Style::Line);
        for level in levels.iter() {
            diagram = diagram.hline(
                level.energy, format!("n={}, E={:.3}", level.n, level.energy), Style::Line);
        }

        let mut wavefunctions = Panel::new("Wavefunctions", "Position", "Energy + ψ(x)")
            .xrange(-0.05 * L, 1.05 * L)
            .vline(0.0, "", Style::Line)
            .vline(L, "", Style::Line);
        let mut densities = Panel::new(
            "Quantum vs Classical Probability Distributions", "Position", "Probability Density")
            .xrange(-0.05 * L, 1.05 * L)
            .vline(0.0, "", Style::Line)
            .vline(L, "", Style::Line);
        for level in levels.iter().take(DRAWN_LEVELS) {
            let n = level.n;
            wavefunctions = wavefunctions
                .hline(level.energy, "", Style::Dashed)
                .series(Series::sample(
                    format!("ψ_{n}(x)"), Style::Line, &x,
                    |xk| level.energy + 0.15 * e_max * wavefunction(n, L, xk),
                ));
            densities = densities.series(Series::sample(
                format!("|ψ_{n}(x)|²"), Style::Line, &x,
                |xk| wavefunction(n, L, xk).powi(2),
            ));
        }
        if show_classical {
            densities = densities.series(Series::sample(
                "Classical (uniform)", Style::Dashed, &x, |_| L.recip()));
        }

        PlotDirective::new(format!("Particle in a Box: L={L}"))
            .panel(diagram)
            .panel(wavefunctions)
            .panel(densities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units;

    fn params(L: f64, m: f64, hbar: f64, max_n: u32) -> Params {
        Params { box_length: L, m, hbar, max_n, show_classical: true }
    }

    #[test]
    fn electron_in_nanometer_box() {
        let (L, m) = (1e-9, 9.11e-31);
        let sol = ParticleBox::default().solve(&params(L, m, units::hbar, 1));
        let expected = units::hbar.powi(2) * PI.powi(2) / (2.0 * m * L * L);
        assert!((sol.energy_levels[0].energy - expected).abs() < 1e-20);
        assert!(sol.energy_levels[0].energy > 5e-20);
    }

    #[test]
    fn level_properties() {
        let sol = ParticleBox::default().solve(&params(2.0, 1.0, 1.0, 5));
        assert_eq!(sol.energy_levels.len(), 5);
        for level in sol.energy_levels.iter() {
            let n = f64::from(level.n);
            assert!((level.energy - n * n * sol.system_info.ground_state_energy).abs() < 1e-12);
            assert_eq!(level.wavelength, Some(4.0 / n));
            assert_eq!(level.nodes, Some(level.n - 1));
            assert_eq!(level.energy_ratio, Some(n * n));
        }
    }

    #[test]
    fn ground_state_respects_uncertainty() {
        let info = ParticleBox::default().solve(&params(1.0, 1.0, 1.0, 1)).system_info;
        assert!(info.uncertainty_product > info.heisenberg_minimum);
        assert!((info.uncertainty_product - PI / 12.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn classical_overlay_is_optional() {
        let solver = ParticleBox::default();
        let with = solver.describe_plot(&solver.solve(&params(1.0, 1.0, 1.0, 6)));
        let without = solver.describe_plot(&solver.solve(
            &Params { show_classical: false, ..params(1.0, 1.0, 1.0, 6) }));
        assert_eq!(with.panels.len(), 3);
        assert_eq!(with.panels[2].series.len(), 5);
        assert_eq!(without.panels[2].series.len(), 4);
    }

    #[test]
    fn wavefunctions_vanish_at_walls() {
        for n in 1..5 {
            assert!(wavefunction(n, 2.0, 0.0).abs() < 1e-12);
            assert!(wavefunction(n, 2.0, 2.0).abs() < 1e-12);
        }
    }
}
