//! Collection of all error types.
//!
//! All errors implement [`std::error::Error`] (mostly through
//! [`thiserror::Error`]), making them compatible with application code using
//! [`anyhow`][anyhow].
//!
//! Only [`ConfigError`] is fatal for a request. [`Violations`] is returned as
//! the rejected half of an [`Outcome`][crate::registry::Outcome], and
//! [`RootError`] never escapes the finite-well search: a candidate root that
//! fails is dropped and logged.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::fmt;
use serde::Serialize;
use thiserror::Error;

/// Returned when a solver or example identifier cannot be resolved, or when an
/// engine configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The solver identifier is not one of the five catalog names.
    #[error("unknown solver '{0}'")]
    UnknownSolver(String),

    /// The example identifier is not in the solver's catalog.
    #[error("unknown example '{example}' for solver '{solver}'")]
    UnknownExample { solver: String, example: String },

    /// The configuration file could not be read or parsed.
    #[error("failed to load configuration from {path}: {reason}")]
    Load { path: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a single field of a raw parameter map was rejected.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    /// A declared parameter is absent.
    Missing,
    /// The value has the wrong JSON type for the declared parameter kind.
    WrongType { expected: String, found: String },
    /// The value is below the declared minimum.
    BelowMinimum { min: f64, value: f64 },
    /// The value is above the declared maximum.
    AboveMaximum { max: f64, value: f64 },
    /// The value fails a solver-specific physical constraint.
    Physical { message: String },
    /// The name is not declared by the solver's schema.
    Unexpected,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::WrongType { expected, found }
                => write!(f, "expected {expected}, found {found}"),
            Self::BelowMinimum { min, value }
                => write!(f, "{value} is below the minimum {min}"),
            Self::AboveMaximum { max, value }
                => write!(f, "{value} is above the maximum {max}"),
            Self::Physical { message } => write!(f, "{message}"),
            Self::Unexpected => write!(f, "not a parameter of this solver"),
        }
    }
}

/// A single field-level validation failure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Violation {
    /// Name of the offending parameter.
    pub field: String,
    /// What went wrong.
    pub reason: Reason,
}

impl Violation {
    pub(crate) fn new(field: &str, reason: Reason) -> Self {
        Self { field: field.to_string(), reason }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Returned from [`validate`][crate::validate::validate] when at least one
/// field fails; holds one [`Violation`] per failing field, in schema order
/// followed by undeclared names.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Wrap a list of violations, returning `None` if the list is empty.
    pub(crate) fn from_vec(violations: Vec<Violation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self(violations))
    }

    /// Number of violations; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.0.len() }

    /// Borrow the violations in report order.
    pub fn as_slice(&self) -> &[Violation] { &self.0 }

    /// Look up the violation recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&Violation> {
        self.0.iter().find(|v| v.field == field)
    }

    pub fn into_inner(self) -> Vec<Violation> { self.0 }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid parameter(s)", self.0.len())?;
        for v in self.0.iter() {
            write!(f, "\n  {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations { }

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self { Self(vec![violation]) }
}

/// Returned from the bracketed root search in [`rootfind`][crate::rootfind].
#[derive(Debug, Error)]
pub enum RootError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// The residual has the same sign at both ends of the bracket.
    #[error("no sign change on [{0}, {1}]")]
    NoSignChange(f64, f64),

    /// The iteration cap was reached before the residual fell below epsilon.
    #[error("no convergence after {iters} iterations; last residual {residual:e}")]
    NoConvergence { iters: usize, residual: f64 },
}

impl RootError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }
}

pub type RootResult<T> = Result<T, RootError>;
