//! Bound states of the finite square well `V(x) = -V₀` for `|x| < a`.
//!
//! With `k = √(2m(E + V₀))/ħ` inside the well and `κ = √(-2mE)/ħ` outside,
//! the dimensionless variables `z = k a` and `q = κ a` satisfy `z² + q² = z₀²`
//! with `z₀ = √(2 m V₀) a / ħ`. Matching at the walls gives one quantization
//! condition per parity branch:
//!
//! ```text
//! even:  z tan z =  q      <=>  z sin z - q cos z = 0
//! odd:  -z cot z =  q      <=>  z cos z + q sin z = 0
//! ```
//!
//! Both residuals are divided by `z₀`, which makes them equal to `sin θ` and
//! `cos θ` respectively for `θ(z) = z - arccos(z/z₀)`. Since `θ` increases
//! monotonically from `-π/2` to `z₀`, the `k`-th state (`k = 0, 1, ...`) lies
//! in `[kπ/2, min((k+1)π/2, z₀)]`, with even states at even `k`.

use std::f64::consts::FRAC_PI_2;
use serde::Serialize;
use serde_json::json;
use tracing::{ debug, warn };
use crate::{
    config::{ EngineConfig, RootConfig },
    error::Violations,
    plot::{ grid, Panel, PlotDirective, Series, Style },
    result::{ BoundState, Parity },
    rootfind::newton_bisect,
    schema::{ Example, ParameterSpec, SolveRequest },
    solvers::{ Solver, SolverId },
    units::Units,
};

/// Plotted curves are clipped to `|y| <=` this value.
const CURVE_LIMIT: f64 = 20.0;

/// Finite square well solver.
#[derive(Copy, Clone, Debug)]
pub struct FiniteWell {
    roots: RootConfig,
    samples: usize,
}

impl FiniteWell {
    pub fn new(config: &EngineConfig) -> Self {
        Self { roots: config.roots, samples: config.plot.samples }
    }
}

impl Default for FiniteWell {
    fn default() -> Self { Self::new(&EngineConfig::default()) }
}

/// Inputs for the finite well.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Params {
    /// Half-width of the well.
    pub a: f64,
    /// Depth of the well.
    pub V0: f64,
    pub m: f64,
    pub hbar: f64,
    /// Decimal places kept in reported values.
    pub precision: u32,
}

impl TryFrom<&SolveRequest> for Params {
    type Error = Violations;

    fn try_from(req: &SolveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            a: req.float("a")?,
            V0: req.float("V0")?,
            m: req.float("m")?,
            hbar: req.float("hbar")?,
            precision: req.int("precision")?.clamp(0, 15) as u32,
        })
    }
}

/// Echo of the inputs plus characteristic quantities.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Info {
    #[serde(flatten)]
    pub params: Params,
    /// Well strength `z₀ = √(2 m V₀) a / ħ`.
    pub z0: f64,
    /// Range of `z` in which bound-state roots may lie.
    pub z_range: [f64; 2],
    /// Upper bound `⌈z₀ / (π/2)⌉` on the number of bound states.
    pub max_bound_states: usize,
    pub num_bound_states: usize,
    /// `π/2`; no states are reported below this well strength.
    pub threshold: f64,
    pub above_threshold: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub system_info: Info,
    pub bound_states: Vec<BoundState>,
}

/// Upper bound on the number of bound states for well strength `z0`.
pub fn max_bound_states(z0: f64) -> usize {
    if z0 > 0.0 { (z0 / FRAC_PI_2).ceil() as usize } else { 0 }
}

fn outside(z: f64, z0: f64) -> f64 { (z0 * z0 - z * z).max(0.0).sqrt() }

fn even_residual(z: f64, z0: f64) -> f64 {
    let q = outside(z, z0);
    (z * z.sin() - q * z.cos()) / z0
}

fn even_slope(z: f64, z0: f64) -> f64 {
    let q = outside(z, z0);
    (z.sin() + z * z.cos() + z / q * z.cos() + q * z.sin()) / z0
}

fn odd_residual(z: f64, z0: f64) -> f64 {
    let q = outside(z, z0);
    (z * z.cos() + q * z.sin()) / z0
}

fn odd_slope(z: f64, z0: f64) -> f64 {
    let q = outside(z, z0);
    (z.cos() - z * z.sin() - z / q * z.sin() + q * z.cos()) / z0
}

fn round_to(x: f64, digits: u32) -> f64 {
    let scale = 10.0_f64.powi(digits as i32);
    let rounded = (x * scale).round() / scale;
    if rounded.is_finite() { rounded } else { x }
}

impl FiniteWell {
    // one candidate per bracket; failures and marginal roots are dropped
    fn find_roots(&self, z0: f64) -> Vec<(Parity, f64)> {
        let RootConfig { epsilon, maxiters, edge_margin } = self.roots;
        let mut roots: Vec<(Parity, f64)> = (0..max_bound_states(z0))
            .filter_map(|k| {
                let lo = k as f64 * FRAC_PI_2;
                let hi = ((k + 1) as f64 * FRAC_PI_2).min(z0);
                let (parity, found) = if k % 2 == 0 {
                    let f = |z| even_residual(z, z0);
                    let df = |z| even_slope(z, z0);
                    (Parity::Even, newton_bisect(f, df, (lo, hi), epsilon, maxiters))
                } else {
                    let f = |z| odd_residual(z, z0);
                    let df = |z| odd_slope(z, z0);
                    (Parity::Odd, newton_bisect(f, df, (lo, hi), epsilon, maxiters))
                };
                match found {
                    Ok(root) if z0 - root.x >= edge_margin => Some((parity, root.x)),
                    Ok(root) => {
                        debug!(k, z = root.x, z0, "discarding marginal root near well edge");
                        None
                    },
                    Err(err) => {
                        warn!(k, lo, hi, %err, "dropping unconverged bound-state candidate");
                        None
                    },
                }
            })
            .collect();
        roots.sort_by(|l, r| l.1.total_cmp(&r.1));
        roots
    }
}

impl Solver for FiniteWell {
    type Params = Params;
    type Output = Solution;

    fn id(&self) -> SolverId { SolverId::FiniteWell }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::float("a", "Well Half-Width (a)", 1.0)
                .range(0.1, 10.0)
                .unit("length units")
                .describe("Half-width of the potential well")
                .positive("well width must be positive"),
            ParameterSpec::float("V0", "Well Depth (V₀)", 1.0)
                .range(0.1, 50.0)
                .unit("energy units")
                .describe("Depth of the potential well")
                .positive("well depth must be positive"),
            ParameterSpec::float("m", "Particle Mass (m)", 0.5)
                .range(0.1, 10.0)
                .unit("mass units")
                .describe("Mass of the quantum particle")
                .positive("particle mass must be positive"),
            ParameterSpec::float("hbar", "ℏ (Reduced Planck)", 1.0)
                .range(0.1, 10.0)
                .unit("action units")
                .describe("Reduced Planck constant")
                .positive("reduced Planck constant must be positive"),
            ParameterSpec::int("precision", "Decimal Precision", 7)
                .range(3.0, 15.0)
                .unit("digits")
                .describe("Number of decimal places in results"),
        ]
    }

    fn examples(&self) -> Vec<Example> {
        vec![
            Example::new(
                "standard",
                "Standard Problem",
                "Basic finite well with one bound state",
                json!({ "a": 1.0, "V0": 2.6, "m": 0.5, "hbar": 1.0, "precision": 7 }),
            ),
            Example::new(
                "deep_well",
                "Deep Well",
                "Deep well with multiple bound states",
                json!({ "a": 2.0, "V0": 10.0, "m": 0.5, "hbar": 1.0, "precision": 7 }),
            ),
            Example::new(
                "wide_well",
                "Wide Well",
                "Wide well with multiple bound states",
                json!({ "a": 5.0, "V0": 2.0, "m": 0.5, "hbar": 1.0, "precision": 7 }),
            ),
            Example::new(
                "shallow_well",
                "Shallow Well",
                "Very shallow well below the binding threshold",
                json!({ "a": 1.0, "V0": 0.2, "m": 0.5, "hbar": 1.0, "precision": 7 }),
            ),
        ]
    }

    fn solve(&self, params: &Params) -> Solution {
        let units = Units::new(params.hbar, params.m, params.a);
        let z0 = (params.V0 / units.e).sqrt();
        let above_threshold = z0 >= FRAC_PI_2;

        let roots = if above_threshold { self.find_roots(z0) } else { Vec::new() };
        let digits = params.precision;
        let bound_states: Vec<BoundState> = roots.into_iter()
            .enumerate()
            .map(|(i, (parity, z))| {
                let q = outside(z, z0);
                let energy: f64 = -units.from_nat_energy::<f64, f64>(q * q);
                BoundState {
                    n: i + 1,
                    parity,
                    z: round_to(z, digits),
                    energy: round_to(energy, digits),
                    binding_energy: round_to(params.V0 - energy.abs(), digits),
                    penetration_depth: (q > 0.0)
                        .then(|| round_to(units.from_nat_length::<f64, f64>(q.recip()), digits)),
                }
            })
            .collect();

        let system_info = Info {
            params: *params,
            z0: round_to(z0, digits),
            z_range: [0.0, round_to(z0, digits)],
            max_bound_states: max_bound_states(z0),
            num_bound_states: bound_states.len(),
            threshold: FRAC_PI_2,
            above_threshold,
        };
        Solution { system_info, bound_states }
    }

    fn describe_plot(&self, output: &Solution) -> PlotDirective {
        let Params { a, V0, m, hbar, .. } = output.system_info.params;
        let z0 = output.system_info.z0;
        let z = grid(0.0, z0, self.samples);

        let mut panel = Panel::new("Transcendental equations", "z", "Function value")
            .xrange(0.0, z0)
            .yrange(-CURVE_LIMIT, CURVE_LIMIT)
            .series(Series::sample_clipped(
                "tan z", Style::Line, &z, CURVE_LIMIT, f64::tan))
            .series(Series::sample_clipped(
                "-cot z", Style::Line, &z, CURVE_LIMIT, |z| -z.tan().recip()))
            .series(Series::sample_clipped(
                "√(z₀² - z²) / z", Style::Line, &z, CURVE_LIMIT, |z| outside(z, z0) / z))
            .hline(0.0, "", Style::Dashed);
        for state in output.bound_states.iter() {
            let y = outside(state.z, z0) / state.z;
            if y.is_finite() && y.abs() <= CURVE_LIMIT {
                panel = panel.marker(
                    format!("State {}: z={:.4}", state.n, state.z), state.z, y);
            }
        }

        PlotDirective::new(
            format!("Finite Square Well: a={a}, V₀={V0}, m={m}, ℏ={hbar}"))
            .panel(panel)
    }
}
