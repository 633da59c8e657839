//! Quantum harmonic oscillator `V(x) = m ω² x² / 2`.
//!
//! `E_n = ħω(n + 1/2)` for `n = 0, ..., max_n` (so `N = max_n + 1` levels),
//! with classical turning points `±√(2 E_n / (m ω²))` and `n` nodes.

use std::f64::consts::TAU;
use serde::Serialize;
use serde_json::json;
use crate::{
    config::EngineConfig,
    error::Violations,
    plot::{ grid, Panel, PlotDirective, Series, Style },
    result::{ EnergyLevel, TurningPoints },
    schema::{ Example, ParameterSpec, SolveRequest },
    solvers::{ Solver, SolverId },
    special::oscillator_wavefunction,
};

/// Number of densities drawn in the second plot panel.
const DENSITY_LEVELS: usize = 4;

/// Harmonic oscillator solver.
#[derive(Copy, Clone, Debug)]
pub struct Harmonic {
    samples: usize,
}

impl Harmonic {
    pub fn new(config: &EngineConfig) -> Self { Self { samples: config.plot.samples } }
}

impl Default for Harmonic {
    fn default() -> Self { Self::new(&EngineConfig::default()) }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Params {
    pub omega: f64,
    pub m: f64,
    pub hbar: f64,
    /// Highest level index; levels run `0..=max_n`.
    pub max_n: u32,
    /// Half-width of the plotted position window.
    pub x_range: f64,
}

impl TryFrom<&SolveRequest> for Params {
    type Error = Violations;

    fn try_from(req: &SolveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            omega: req.float("omega")?,
            m: req.float("m")?,
            hbar: req.float("hbar")?,
            max_n: req.int("max_n")?.max(0) as u32,
            x_range: req.float("x_range")?,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Info {
    #[serde(flatten)]
    pub params: Params,
    /// `√(ħ / mω)`
    pub characteristic_length: f64,
    /// `ħω / 2`
    pub zero_point_energy: f64,
    /// `ħω`
    pub energy_spacing: f64,
    /// `ω / 2π`
    pub classical_frequency: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub system_info: Info,
    pub energy_levels: Vec<EnergyLevel>,
}

impl Solver for Harmonic {
    type Params = Params;
    type Output = Solution;

    fn id(&self) -> SolverId { SolverId::Harmonic }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::float("omega", "Angular Frequency (ω)", 1.0)
                .range(0.1, 10.0)
                .unit("rad/s")
                .describe("Angular frequency of oscillator")
                .positive("angular frequency must be positive"),
            ParameterSpec::float("m", "Mass (m)", 1.0)
                .range(0.1, 10.0)
                .unit("mass units")
                .describe("Mass of oscillating particle")
                .positive("particle mass must be positive"),
            ParameterSpec::float("hbar", "ℏ (Reduced Planck)", 1.0)
                .range(0.1, 10.0)
                .unit("action units")
                .describe("Reduced Planck constant")
                .positive("reduced Planck constant must be positive"),
            ParameterSpec::int("max_n", "Maximum Level", 5)
                .range(1.0, 20.0)
                .unit("levels")
                .describe("Highest energy level to calculate (levels n = 0 ... max_n)")
                .at_least_one("maximum level must be positive"),
            ParameterSpec::float("x_range", "Position Range", 5.0)
                .range(1.0, 20.0)
                .unit("length units")
                .describe("Range for position plots (±x_range)")
                .positive("position range must be positive"),
        ]
    }

    fn examples(&self) -> Vec<Example> {
        vec![
            Example::new(
                "standard",
                "Standard Oscillator",
                "Basic harmonic oscillator",
                json!({ "omega": 1.0, "m": 1.0, "hbar": 1.0, "max_n": 5, "x_range": 5.0 }),
            ),
            Example::new(
                "high_frequency",
                "High Frequency",
                "Fast oscillator with large energy spacing",
                json!({ "omega": 3.0, "m": 1.0, "hbar": 1.0, "max_n": 5, "x_range": 3.0 }),
            ),
            Example::new(
                "heavy_particle",
                "Heavy Particle",
                "Heavy particle oscillator",
                json!({ "omega": 1.0, "m": 5.0, "hbar": 1.0, "max_n": 5, "x_range": 3.0 }),
            ),
            Example::new(
                "many_levels",
                "Many Energy Levels",
                "Show many energy levels",
                json!({ "omega": 1.0, "m": 1.0, "hbar": 1.0, "max_n": 10, "x_range": 6.0 }),
            ),
        ]
    }

    fn solve(&self, params: &Params) -> Solution {
        let Params { omega, m, hbar, max_n, .. } = *params;
        let quantum = hbar * omega;
        let energy_levels: Vec<EnergyLevel> = (0..=max_n)
            .map(|n| {
                let energy = quantum * (n as f64 + 0.5);
                let x_turn = (2.0 * energy / (m * omega.powi(2))).sqrt();
                EnergyLevel::oscillator(n, energy, TurningPoints::symmetric(x_turn))
            })
            .collect();
        let system_info = Info {
            params: *params,
            characteristic_length: (hbar / (m * omega)).sqrt(),
            zero_point_energy: quantum / 2.0,
            energy_spacing: quantum,
            classical_frequency: omega / TAU,
        };
        Solution { system_info, energy_levels }
    }

    fn describe_plot(&self, output: &Solution) -> PlotDirective {
        let info = &output.system_info;
        let Params { omega, m, max_n, x_range, .. } = info.params;
        let quantum = info.energy_spacing;
        let x0 = info.characteristic_length;
        let x = grid(-x_range, x_range, self.samples);
        let e_top = quantum * (max_n as f64 + 2.0);

        let mut spectrum = Panel::new(
            "Energy Levels & Wavefunctions", "Position x", "Energy")
            .xrange(-x_range, x_range)
            .yrange(0.0, e_top)
            .series(Series::sample_clipped(
                "Potential V(x)", Style::Line, &x, e_top,
                |xk| 0.5 * m * omega.powi(2) * xk.powi(2),
            ));
        for level in output.energy_levels.iter() {
            let n = level.n as usize;
            spectrum = spectrum
                .hline(level.energy, format!("n={n}"), Style::Dashed)
                .series(Series::sample(
                    format!("ψ_{n}(x)"), Style::Line, &x,
                    |xk| level.energy + 0.3 * quantum * oscillator_wavefunction(n, xk, x0),
                ));
        }

        let mut densities = Panel::new("Probability Densities", "Position x", "Probability Density")
            .xrange(-x_range, x_range);
        for level in output.energy_levels.iter().take(DENSITY_LEVELS) {
            let n = level.n as usize;
            densities = densities.series(Series::sample(
                format!("|ψ_{n}(x)|²"), Style::Line, &x,
                |xk| oscillator_wavefunction(n, xk, x0).powi(2),
            ));
        }

        PlotDirective::new(format!("Quantum Harmonic Oscillator: ω={omega}, m={m}"))
            .panel(spectrum)
            .panel(densities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(omega: f64, m: f64, max_n: u32) -> Params {
        Params { omega, m, hbar: 1.0, max_n, x_range: 5.0 }
    }

    #[test]
    fn evenly_spaced_levels_from_zero() {
        let sol = Harmonic::default().solve(&params(2.0, 1.0, 5));
        assert_eq!(sol.energy_levels.len(), 6);
        for (k, level) in sol.energy_levels.iter().enumerate() {
            assert_eq!(level.n, k as u32);
            assert!((level.energy - 2.0 * (k as f64 + 0.5)).abs() < 1e-12);
            assert_eq!(level.nodes, Some(k as u32));
            assert!(level.degeneracy.is_none());
        }
        assert_eq!(sol.system_info.zero_point_energy, 1.0);
        assert_eq!(sol.system_info.energy_spacing, 2.0);
    }

    #[test]
    fn turning_points_bound_classical_motion() {
        let (omega, m) = (1.5, 2.0);
        let sol = Harmonic::default().solve(&params(omega, m, 3));
        for level in sol.energy_levels.iter() {
            let TurningPoints(lo, hi) = level.turning_points.unwrap();
            assert_eq!(lo, -hi);
            // potential energy at the turning point equals the level energy
            assert!((0.5 * m * omega * omega * hi * hi - level.energy).abs() < 1e-12);
        }
    }

    #[test]
    fn ground_state_width_matches_characteristic_length() {
        let sol = Harmonic::default().solve(&params(1.0, 1.0, 0));
        let TurningPoints(_, hi) = sol.energy_levels[0].turning_points.unwrap();
        assert!((hi - sol.system_info.characteristic_length).abs() < 1e-12);
    }

    #[test]
    fn max_n_is_the_highest_level_index() {
        use crate::{ error::Reason, schema::defaults, validate::validate };
        let solver = Harmonic::default();
        let schema = solver.parameters();
        let raw = defaults(&schema);
        assert_eq!(raw["max_n"], json!(5));
        let req = validate(&schema, &raw).unwrap();
        let sol = solver.solve(&Params::try_from(&req).unwrap());
        let n: Vec<u32> = sol.energy_levels.iter().map(|l| l.n).collect();
        assert_eq!(n, [0, 1, 2, 3, 4, 5]);

        let mut renamed = raw.clone();
        renamed.remove("max_n");
        renamed.insert("levels".to_string(), json!(6));
        let err = validate(&schema, &renamed).unwrap_err();
        assert_eq!(err.get("max_n").unwrap().reason, Reason::Missing);
        assert_eq!(err.get("levels").unwrap().reason, Reason::Unexpected);
    }

    #[test]
    fn plot_draws_each_level_and_four_densities() {
        let solver = Harmonic::default();
        let plot = solver.describe_plot(&solver.solve(&params(1.0, 1.0, 5)));
        assert_eq!(plot.panels[0].series.len(), 1 + 6);
        assert_eq!(plot.panels[0].guides.len(), 6);
        assert_eq!(plot.panels[1].series.len(), 4);
    }
}
