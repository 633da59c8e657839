//! Engine-wide numerical settings.
//!
//! An [`EngineConfig`] is built once (usually from defaults, optionally from a
//! TOML file) and handed to the [`Registry`][crate::registry::Registry], which
//! shares it read-only with every solver.
//!
//! ```toml
//! [roots]
//! epsilon = 1e-12
//! maxiters = 200
//!
//! [plot]
//! samples = 500
//! ```

use std::path::Path;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ ConfigError, ConfigResult },
    DEF_EDGE_MARGIN,
    DEF_EPSILON,
    DEF_MAXITERS,
};

/// Settings for the bracketed root search used by the finite well.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootConfig {
    /// Residual tolerance (default: `1e-10`).
    pub epsilon: f64,
    /// Iteration cap per candidate root (default: `100`).
    pub maxiters: usize,
    /// Roots closer than this to the well strength `z₀` are marginal and are
    /// not reported as bound states (default: `1e-2`).
    pub edge_margin: f64,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            epsilon: DEF_EPSILON,
            maxiters: DEF_MAXITERS,
            edge_margin: DEF_EDGE_MARGIN,
        }
    }
}

/// Settings for the barrier transmission solver.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarrierConfig {
    /// `|E - V₀| / V₀` below which the limiting transmission formula is used
    /// (default: `1e-9`).
    pub degenerate_epsilon: f64,
}

impl Default for BarrierConfig {
    fn default() -> Self { Self { degenerate_epsilon: 1e-9 } }
}

/// Settings for plot directives.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Number of sample points per curve (default: `1000`).
    pub samples: usize,
}

impl Default for PlotConfig {
    fn default() -> Self { Self { samples: 1000 } }
}

/// All engine settings. Every section and key is optional in TOML.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub roots: RootConfig,
    pub barrier: BarrierConfig,
    pub plot: PlotConfig,
}

impl EngineConfig {
    /// Parse settings from a TOML string.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::Load {
                path: "<string>".to_string(),
                reason: e.to_string(),
            })?;
        config.check("<string>")?;
        Ok(config)
    }

    /// Read and parse settings from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path_str = path.as_ref().display().to_string();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Load {
                path: path_str.clone(),
                reason: e.to_string(),
            })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::Load {
                path: path_str.clone(),
                reason: e.to_string(),
            })?;
        config.check(&path_str)?;
        Ok(config)
    }

    fn check(&self, path: &str) -> ConfigResult<()> {
        let bad = |reason: &str| ConfigError::Load {
            path: path.to_string(),
            reason: reason.to_string(),
        };
        if !(self.roots.epsilon > 0.0) {
            return Err(bad("roots.epsilon must be greater than 0"));
        }
        if self.roots.maxiters == 0 {
            return Err(bad("roots.maxiters must be greater than 0"));
        }
        if !(self.roots.edge_margin >= 0.0) {
            return Err(bad("roots.edge_margin must not be negative"));
        }
        if !(self.barrier.degenerate_epsilon > 0.0) {
            return Err(bad("barrier.degenerate_epsilon must be greater than 0"));
        }
        if self.plot.samples < 2 {
            return Err(bad("plot.samples must be at least 2"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.roots.maxiters, 100);
        assert_eq!(config.roots.epsilon, 1e-10);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_toml_str(
            "[roots]\nmaxiters = 250\n\n[plot]\nsamples = 64\n"
        ).unwrap();
        assert_eq!(config.roots.maxiters, 250);
        assert_eq!(config.roots.epsilon, DEF_EPSILON);
        assert_eq!(config.plot.samples, 64);
        assert_eq!(config.barrier, BarrierConfig::default());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(EngineConfig::from_toml_str("[roots]\ntolerance = 1.0\n").is_err());
        assert!(EngineConfig::from_toml_str("[roots]\nmaxiters = 0\n").is_err());
        assert!(EngineConfig::from_toml_str("[plot]\nsamples = 1\n").is_err());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = EngineConfig::from_toml_file("/nonexistent/qsolvers.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Load { .. }));
    }
}
