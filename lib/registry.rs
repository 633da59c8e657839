//! The solver catalog.
//!
//! A [`Registry`] is built once from an [`EngineConfig`] and never mutated
//! afterward; it can be shared freely between threads. All requests go through
//! it: schema and example lookup, validation, solving, and plot description.

use serde::Serialize;
use tracing::{ debug, info };
use crate::{
    config::EngineConfig,
    error::{ ConfigError, ConfigResult, Violations },
    plot::PlotDirective,
    result::Solution,
    schema::{ Example, ParameterSpec, RawParams, SolveRequest },
    solvers::{
        FiniteWell,
        Harmonic,
        Hydrogen,
        ParticleBox,
        Solver,
        SolverId,
        SolverInfo,
        Tunneling,
    },
    validate::validate,
};

/// Result of a solve call: either a solution (with an optional plot
/// directive) or the complete list of parameter violations.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Solved {
        #[serde(rename = "results")]
        solution: Solution,
        #[serde(skip_serializing_if = "Option::is_none")]
        plot: Option<PlotDirective>,
    },
    Rejected {
        violations: Violations,
    },
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved { solution, .. } => Some(solution),
            Self::Rejected { .. } => None,
        }
    }

    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Solved { .. } => None,
            Self::Rejected { violations } => Some(violations),
        }
    }

    /// Convert to a `Result`, so that callers may use `?` on rejections.
    pub fn into_result(self) -> Result<Solution, Violations> {
        match self {
            Self::Solved { solution, .. } => Ok(solution),
            Self::Rejected { violations } => Err(violations),
        }
    }
}

/// Immutable catalog of all solvers.
#[derive(Clone, Debug)]
pub struct Registry {
    config: EngineConfig,
    finite_well: FiniteWell,
    tunneling: Tunneling,
    harmonic: Harmonic,
    hydrogen: Hydrogen,
    particle_box: ParticleBox,
}

impl Default for Registry {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

// dispatch on a solver id to the concrete solver, binding it to `$s`
macro_rules! with_solver {
    ( $self:ident, $id:expr, |$s:ident| $body:expr ) => {
        match $id {
            SolverId::FiniteWell => { let $s = &$self.finite_well; $body },
            SolverId::Tunneling => { let $s = &$self.tunneling; $body },
            SolverId::Harmonic => { let $s = &$self.harmonic; $body },
            SolverId::Hydrogen => { let $s = &$self.hydrogen; $body },
            SolverId::ParticleBox => { let $s = &$self.particle_box; $body },
        }
    }
}

fn run<S: Solver>(solver: &S, request: &SolveRequest, plot: bool) -> Outcome {
    let params = match S::Params::try_from(request) {
        Ok(params) => params,
        Err(violations) => return Outcome::Rejected { violations },
    };
    let output = solver.solve(&params);
    let plot = plot.then(|| solver.describe_plot(&output));
    Outcome::Solved { solution: output.into(), plot }
}

impl Registry {
    /// Build the catalog with the given numerical settings.
    pub fn new(config: EngineConfig) -> Self {
        let registry = Self {
            config,
            finite_well: FiniteWell::new(&config),
            tunneling: Tunneling::new(&config),
            harmonic: Harmonic::new(&config),
            hydrogen: Hydrogen::new(&config),
            particle_box: ParticleBox::new(&config),
        };
        info!(
            solvers = SolverId::ALL.len(),
            epsilon = config.roots.epsilon,
            maxiters = config.roots.maxiters,
            samples = config.plot.samples,
            "solver registry ready",
        );
        registry
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    /// Catalog metadata for every solver, in catalog order.
    pub fn solvers(&self) -> Vec<SolverInfo> {
        SolverId::ALL.into_iter().map(SolverId::info).collect()
    }

    /// Resolve a solver identifier.
    pub fn resolve(&self, id: &str) -> ConfigResult<SolverId> { id.parse() }

    /// Ordered parameter declarations for a solver.
    pub fn parameters(&self, id: SolverId) -> Vec<ParameterSpec> {
        with_solver!(self, id, |s| s.parameters())
    }

    /// All named presets for a solver.
    pub fn examples(&self, id: SolverId) -> Vec<Example> {
        with_solver!(self, id, |s| s.examples())
    }

    /// Look up a single preset. The returned parameters are not validated.
    pub fn example(&self, id: SolverId, example: &str) -> ConfigResult<Example> {
        self.examples(id)
            .into_iter()
            .find(|ex| ex.id == example)
            .ok_or_else(|| ConfigError::UnknownExample {
                solver: id.to_string(),
                example: example.to_string(),
            })
    }

    /// Check a raw parameter map against a solver's schema.
    pub fn validate(&self, id: SolverId, raw: &RawParams)
        -> Result<SolveRequest, Violations>
    {
        validate(&self.parameters(id), raw)
    }

    /// Resolve, validate, and solve in one call; the solution is returned
    /// together with its plot directive.
    ///
    /// Only an unknown solver identifier is an error. Validation failures and
    /// empty solutions are both ordinary outcomes.
    pub fn solve(&self, id: &str, raw: &RawParams) -> ConfigResult<Outcome> {
        let id = self.resolve(id)?;
        Ok(self.solve_with(id, raw, true))
    }

    /// Validate and solve for a resolved solver, optionally describing the
    /// plot.
    pub fn solve_with(&self, id: SolverId, raw: &RawParams, plot: bool) -> Outcome {
        debug!(solver = %id, params = raw.len(), "solve requested");
        let outcome = match self.validate(id, raw) {
            Ok(request) => self.solve_request(id, &request, plot),
            Err(violations) => Outcome::Rejected { violations },
        };
        match &outcome {
            Outcome::Solved { solution, .. } => {
                debug!(solver = %id, results = solution.len(), "solve finished");
            },
            Outcome::Rejected { violations } => {
                debug!(solver = %id, violations = violations.len(), "request rejected");
            },
        }
        outcome
    }

    /// Solve an already validated request.
    pub fn solve_request(&self, id: SolverId, request: &SolveRequest, plot: bool) -> Outcome {
        with_solver!(self, id, |s| run(s, request, plot))
    }

    /// Describe the plot for a solution produced by any solver.
    pub fn describe_plot(&self, solution: &Solution) -> PlotDirective {
        match solution {
            Solution::FiniteWell(out) => self.finite_well.describe_plot(out),
            Solution::Tunneling(out) => self.tunneling.describe_plot(out),
            Solution::Harmonic(out) => self.harmonic.describe_plot(out),
            Solution::Hydrogen(out) => self.hydrogen.describe_plot(out),
            Solution::ParticleBox(out) => self.particle_box.describe_plot(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::defaults;

    #[test]
    fn every_example_solves() {
        let registry = Registry::default();
        for id in SolverId::ALL {
            let examples = registry.examples(id);
            assert_eq!(examples.len(), 4, "{id}");
            for example in examples {
                let outcome = registry.solve_with(id, &example.parameters, true);
                let solution = outcome.solution()
                    .unwrap_or_else(|| panic!("{id}/{}: {outcome:?}", example.id));
                assert_eq!(solution.solver(), id);
            }
        }
    }

    #[test]
    fn dispatch_reaches_the_matching_solver() {
        let registry = Registry::default();
        for id in SolverId::ALL {
            assert_eq!(with_solver!(registry, id, |s| s.id()), id);
        }
    }

    #[test]
    fn defaults_are_valid_for_every_solver() {
        let registry = Registry::default();
        for id in SolverId::ALL {
            let schema = registry.parameters(id);
            assert!(schema.iter().all(|spec| spec.is_well_formed()));
            assert!(registry.validate(id, &defaults(&schema)).is_ok(), "{id}");
        }
    }

    #[test]
    fn unknown_identifiers_are_config_errors() {
        let registry = Registry::default();
        assert!(matches!(
            registry.solve("infinite_well", &RawParams::new()),
            Err(ConfigError::UnknownSolver(_)),
        ));
        assert!(matches!(
            registry.example(SolverId::Harmonic, "anharmonic"),
            Err(ConfigError::UnknownExample { .. }),
        ));
    }

    #[test]
    fn plot_is_optional() {
        let registry = Registry::default();
        let raw = defaults(&registry.parameters(SolverId::Hydrogen));
        match registry.solve_with(SolverId::Hydrogen, &raw, false) {
            Outcome::Solved { plot, solution } => {
                assert!(plot.is_none());
                assert_eq!(registry.describe_plot(&solution).panels.len(), 2);
            },
            other => panic!("{other:?}"),
        }
    }
}
