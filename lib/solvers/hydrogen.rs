//! Hydrogen-like atoms: `E_n = -Ry Z² / n²` with `n²` orbital states per
//! level (doubled when counting spin).

use serde::Serialize;
use serde_json::json;
use crate::{
    config::EngineConfig,
    error::Violations,
    plot::{ grid, Panel, PlotDirective, Series, Style },
    result::{ EnergyLevel, Orbital },
    schema::{ Example, ParameterSpec, SolveRequest },
    solvers::{ Solver, SolverId },
    special::radial_wavefunction,
    units::RY_QUOTED,
};

/// Spectroscopic letters for `l = 0, 1, ...`; `j` is skipped by convention.
const ORBITAL_LETTERS: &[u8] = b"spdfghik";

/// Radial functions are plotted for `n = 1, ...` up to this value.
const RADIAL_LEVELS: u32 = 3;

/// Hydrogen-like atom solver.
#[derive(Copy, Clone, Debug)]
pub struct Hydrogen {
    samples: usize,
}

impl Hydrogen {
    pub fn new(config: &EngineConfig) -> Self { Self { samples: config.plot.samples } }
}

impl Default for Hydrogen {
    fn default() -> Self { Self::new(&EngineConfig::default()) }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Params {
    /// Highest principal quantum number.
    pub max_n: u32,
    /// Nuclear charge.
    pub Z: f64,
    /// Bohr radius.
    pub a0: f64,
    /// Rydberg energy.
    pub Ry: f64,
    /// Count spin states in the degeneracy.
    pub spin: bool,
}

impl TryFrom<&SolveRequest> for Params {
    type Error = Violations;

    fn try_from(req: &SolveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            max_n: req.int("max_n")?.max(0) as u32,
            Z: req.float("Z")?,
            a0: req.float("a0")?,
            Ry: req.float("Ry")?,
            spin: req.flag("spin")?,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Info {
    #[serde(flatten)]
    pub params: Params,
    /// `Ry Z²`
    pub ionization_energy: f64,
    /// `a₀ / Z`
    pub ground_state_radius: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub system_info: Info,
    pub energy_levels: Vec<EnergyLevel>,
}

/// Spectroscopic label such as `1s` or `4f`.
pub fn orbital_label(n: u32, l: u32) -> String {
    match ORBITAL_LETTERS.get(l as usize) {
        Some(letter) => format!("{n}{}", *letter as char),
        None => format!("{n}[l={l}]"),
    }
}

fn orbitals(n: u32) -> Vec<Orbital> {
    (0..n)
        .flat_map(|l| {
            let label = orbital_label(n, l);
            (-(l as i32)..=l as i32)
                .map(move |m| Orbital { n, l, m, label: label.clone() })
        })
        .collect()
}

impl Solver for Hydrogen {
    type Params = Params;
    type Output = Solution;

    fn id(&self) -> SolverId { SolverId::Hydrogen }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::int("max_n", "Maximum n", 4)
                .range(1.0, 8.0)
                .unit("principal quantum number")
                .describe("Maximum principal quantum number")
                .at_least_one("principal quantum number must be at least 1"),
            ParameterSpec::float("Z", "Nuclear Charge (Z)", 1.0)
                .range(1.0, 20.0)
                .unit("elementary charges")
                .describe("Nuclear charge (Z=1 for hydrogen)")
                .positive("nuclear charge must be positive"),
            ParameterSpec::float("a0", "Bohr Radius (a₀)", 1.0)
                .range(0.1, 10.0)
                .unit("length units")
                .describe("Bohr radius (atomic unit of length)")
                .positive("Bohr radius must be positive"),
            ParameterSpec::float("Ry", "Rydberg Energy", RY_QUOTED)
                .range(1.0, 100.0)
                .unit("eV")
                .describe("Rydberg energy (13.6 eV)")
                .positive("Rydberg energy must be positive"),
            ParameterSpec::flag("spin", "Include Spin", false)
                .unit("degeneracy")
                .describe("Count both spin states in each level's degeneracy"),
        ]
    }

    fn examples(&self) -> Vec<Example> {
        let preset = |max_n: u32, Z: f64| json!({
            "max_n": max_n,
            "Z": Z,
            "a0": 1.0,
            "Ry": RY_QUOTED,
            "spin": false,
        });
        vec![
            Example::new(
                "hydrogen",
                "Hydrogen Atom",
                "Standard hydrogen atom (Z=1)",
                preset(4, 1.0),
            ),
            Example::new(
                "helium_ion",
                "He⁺ Ion",
                "Helium ion (Z=2, hydrogen-like)",
                preset(3, 2.0),
            ),
            Example::new(
                "lithium_ion",
                "Li²⁺ Ion",
                "Lithium ion (Z=3, hydrogen-like)",
                preset(3, 3.0),
            ),
            Example::new(
                "high_n",
                "High Energy Levels",
                "Hydrogen with high n levels",
                preset(6, 1.0),
            ),
        ]
    }

    fn solve(&self, params: &Params) -> Solution {
        let Params { max_n, Z, a0, Ry, spin } = *params;
        let multiplicity: u32 = if spin { 2 } else { 1 };
        let energy_levels: Vec<EnergyLevel> = (1..=max_n)
            .map(|n| {
                let energy = -Ry * Z.powi(2) / f64::from(n).powi(2);
                EnergyLevel::hydrogen(n, energy, multiplicity * n * n, orbitals(n))
            })
            .collect();
        let system_info = Info {
            params: *params,
            ionization_energy: Ry * Z.powi(2),
            ground_state_radius: a0 / Z,
        };
        Solution { system_info, energy_levels }
    }

    fn describe_plot(&self, output: &Solution) -> PlotDirective {
        let Params { Z, a0, .. } = output.system_info.params;

        let mut diagram = Panel::new(
            format!("Energy Levels (Z={Z})"), "Degeneracy", "Energy (eV)")
            .hline(0.0, "Ionization", Style::Dashed);
        for level in output.energy_levels.iter() {
            let g = level.degeneracy.unwrap_or(1) as f64;
            diagram = diagram.series(Series::segment(
                format!("n={}", level.n), Style::Line, (0.0, level.energy), (g, level.energy)));
            let slots = level.orbitals.len();
            let spacing = g / slots as f64;
            for (j, orbital) in level.orbitals.iter().enumerate() {
                diagram = diagram.marker(
                    format!("{} (m={})", orbital.label, orbital.m),
                    spacing * (j as f64 + 0.5),
                    level.energy,
                );
            }
        }

        let r_max = 20.0 * a0 / Z;
        let r = grid(0.01 * a0 / Z, r_max, self.samples);
        let mut radial = Panel::new(
            "Radial Wavefunctions (s orbitals)", "Distance r", "Radial Wavefunction")
            .xrange(0.0, r_max);
        for level in output.energy_levels.iter().filter(|lv| lv.n <= RADIAL_LEVELS) {
            let n = level.n as usize;
            radial = radial.series(Series::sample(
                format!("R_{n}0(r)"), Style::Line, &r,
                |rk| radial_wavefunction(n, 0, Z, a0, rk),
            ));
        }

        PlotDirective::new(format!("Hydrogen-like Atom: Z={Z}"))
            .panel(diagram)
            .panel(radial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_n: u32, Z: f64, spin: bool) -> Params {
        Params { max_n, Z, a0: 1.0, Ry: RY_QUOTED, spin }
    }

    #[test]
    fn ground_state_energy() {
        let sol = Hydrogen::default().solve(&params(1, 1.0, false));
        assert_eq!(sol.energy_levels.len(), 1);
        assert!((sol.energy_levels[0].energy + 13.6).abs() < 1e-12);
        assert!((sol.system_info.ionization_energy - 13.6).abs() < 1e-12);
    }

    #[test]
    fn degeneracy_with_and_without_spin() {
        let plain = Hydrogen::default().solve(&params(3, 1.0, false));
        let spin = Hydrogen::default().solve(&params(3, 1.0, true));
        assert_eq!(plain.energy_levels[1].degeneracy, Some(4));
        assert_eq!(spin.energy_levels[1].degeneracy, Some(8));
        for level in plain.energy_levels.iter() {
            assert_eq!(level.orbitals.len() as u32, level.degeneracy.unwrap());
        }
    }

    #[test]
    fn energies_scale_with_charge() {
        let sol = Hydrogen::default().solve(&params(3, 2.0, false));
        let e: Vec<f64> = sol.energy_levels.iter().map(|l| l.energy).collect();
        assert!((e[0] + 54.4).abs() < 1e-9);
        assert!((e[1] + 13.6).abs() < 1e-9);
        assert!((sol.system_info.ground_state_radius - 0.5).abs() < 1e-12);
    }

    #[test]
    fn orbital_labels() {
        assert_eq!(orbital_label(1, 0), "1s");
        assert_eq!(orbital_label(3, 2), "3d");
        assert_eq!(orbital_label(8, 6), "8i");
        assert_eq!(orbital_label(8, 7), "8k");
        let orbs = orbitals(2);
        let labels: Vec<&str> = orbs.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["2s", "2p", "2p", "2p"]);
        assert_eq!(orbs.iter().map(|o| o.m).collect::<Vec<_>>(), [0, -1, 0, 1]);
    }

    #[test]
    fn plot_shows_s_orbitals_up_to_three() {
        let solver = Hydrogen::default();
        let plot = solver.describe_plot(&solver.solve(&params(5, 1.0, false)));
        assert_eq!(plot.panels[0].series.len(), 5);
        assert_eq!(plot.panels[0].markers.len(), 1 + 4 + 9 + 16 + 25);
        assert_eq!(plot.panels[1].series.len(), 3);
    }
}
