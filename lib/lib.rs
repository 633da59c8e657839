#![allow(non_snake_case)]

//! Bound states, spectra, and barrier transmission for a fixed catalog of
//! textbook quantum-mechanical potentials.
//!
//! Provides solvers for:
//! - Finite square well (bound states via safeguarded Newton root search on
//!   the even and odd quantization conditions)
//! - Rectangular barrier (transmission and reflection in the tunneling,
//!   over-barrier, and threshold regimes)
//! - Harmonic oscillator
//! - Hydrogen-like atom
//! - Particle in a box
//!
//! Every solver shares the same contract ([`solvers::Solver`]): a declared
//! parameter schema, named example presets, a deterministic `solve`, and a
//! declarative plot description. Callers normally go through a
//! [`Registry`][registry::Registry], which validates raw parameter maps,
//! collecting every violation instead of stopping at the first.
//!
//! ```
//! use qsolvers::{ registry::Registry, schema::RawParams };
//!
//! let registry = Registry::default();
//! let raw: RawParams = serde_json::from_str(
//!     r#"{ "max_n": 2, "Z": 1.0, "a0": 1.0, "Ry": 13.6, "spin": false }"#
//! ).unwrap();
//! let solution = registry.solve("hydrogen", &raw).unwrap()
//!     .into_result().unwrap();
//! let levels = solution.energy_levels().unwrap();
//! assert_eq!(levels[1].degeneracy, Some(4));
//! assert!((levels[0].energy + 13.6).abs() < 1e-12);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod plot;
pub mod registry;
pub mod result;
pub mod rootfind;
pub mod schema;
pub mod solvers;
pub mod special;
pub mod units;
pub mod validate;

pub(crate) const DEF_EPSILON: f64 = 1e-10;
pub(crate) const DEF_MAXITERS: usize = 100;
pub(crate) const DEF_EDGE_MARGIN: f64 = 1e-2;
