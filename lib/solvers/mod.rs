//! The closed set of solvers and the contract they share.
//!
//! Each solver is a small, immutable value holding only read-only numerical
//! settings. It declares its parameters and examples statically, converts a
//! validated [`SolveRequest`] into its own typed parameter struct, and maps
//! those parameters deterministically to a result and a plot directive.

use std::{ fmt, str::FromStr };
use serde::Serialize;
use crate::{
    error::{ ConfigError, Violations },
    plot::PlotDirective,
    result::Solution,
    schema::{ Example, ParameterSpec, SolveRequest },
};

pub mod finite_well;
pub mod harmonic;
pub mod hydrogen;
pub mod particle_box;
pub mod tunneling;

pub use finite_well::FiniteWell;
pub use harmonic::Harmonic;
pub use hydrogen::Hydrogen;
pub use particle_box::ParticleBox;
pub use tunneling::Tunneling;

/// Common interface of all solvers.
pub trait Solver: Send + Sync {
    /// Typed parameters, extracted from a validated request.
    type Params: for<'a> TryFrom<&'a SolveRequest, Error = Violations>;

    /// Solver-specific result.
    type Output: Into<Solution>;

    fn id(&self) -> SolverId;

    /// Ordered parameter declarations.
    fn parameters(&self) -> Vec<ParameterSpec>;

    /// Named presets; each is a valid input for [`parameters`][Self::parameters].
    fn examples(&self) -> Vec<Example>;

    /// Compute the result. Deterministic and free of side effects apart from
    /// logging.
    fn solve(&self, params: &Self::Params) -> Self::Output;

    /// Describe how to plot a result. A pure function of the result.
    fn describe_plot(&self, output: &Self::Output) -> PlotDirective;
}

/// Identifier of a solver in the catalog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverId {
    FiniteWell,
    Harmonic,
    Hydrogen,
    Tunneling,
    ParticleBox,
}

impl SolverId {
    /// All identifiers, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::FiniteWell,
        Self::Harmonic,
        Self::Hydrogen,
        Self::Tunneling,
        Self::ParticleBox,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FiniteWell => "finite_well",
            Self::Harmonic => "harmonic",
            Self::Hydrogen => "hydrogen",
            Self::Tunneling => "tunneling",
            Self::ParticleBox => "particle_box",
        }
    }

    /// Display metadata for the catalog listing.
    pub fn info(self) -> SolverInfo {
        let (name, description, category, difficulty) = match self {
            Self::FiniteWell => (
                "Finite Square Well",
                "Bound states in a finite potential well",
                "Potential Wells",
                Difficulty::Intermediate,
            ),
            Self::Harmonic => (
                "Quantum Harmonic Oscillator",
                "Energy levels of harmonic oscillator",
                "Oscillators",
                Difficulty::Beginner,
            ),
            Self::Hydrogen => (
                "Hydrogen Atom",
                "Electronic states of hydrogen atom",
                "Atomic Physics",
                Difficulty::Advanced,
            ),
            Self::Tunneling => (
                "Quantum Tunneling",
                "Transmission through potential barriers",
                "Transport",
                Difficulty::Intermediate,
            ),
            Self::ParticleBox => (
                "Particle in a Box",
                "Infinite square well solutions",
                "Potential Wells",
                Difficulty::Beginner,
            ),
        };
        SolverInfo { id: self, name, description, category, difficulty }
    }
}

impl fmt::Display for SolverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownSolver(s.to_string()))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Catalog entry for a solver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SolverInfo {
    pub id: SolverId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_strings() {
        for id in SolverId::ALL {
            assert_eq!(id.as_str().parse::<SolverId>().unwrap(), id);
            assert_eq!(serde_json::to_value(id).unwrap(), id.as_str());
        }
        assert!(matches!(
            "square_well".parse::<SolverId>(),
            Err(ConfigError::UnknownSolver(s)) if s == "square_well",
        ));
    }
}
