//! Structured results shared by all solvers.
//!
//! Every solve produces one [`Solution`], which serializes to a JSON object
//! holding `system_info` plus exactly one of `bound_states`, `energy_levels`,
//! or `tunneling_results` (the latter together with `wave_numbers`). All
//! records are plain data, created fresh for each solve and never mutated
//! afterward.

use num_complex::Complex64 as C64;
use serde::Serialize;
use crate::solvers::{
    finite_well,
    harmonic,
    hydrogen,
    particle_box,
    tunneling,
    SolverId,
};

/// Symmetry class of a bound state in a symmetric potential.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Even,
    Odd,
}

/// A bound state of the finite square well.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BoundState {
    /// Quantum index, starting at 1 and strictly increasing with energy.
    pub n: usize,
    pub parity: Parity,
    /// Dimensionless root `z = k a` of the quantization condition.
    pub z: f64,
    /// Energy relative to the potential outside the well (negative).
    pub energy: f64,
    /// `V₀ - |E|`, i.e. the kinetic energy measured from the well floor.
    pub binding_energy: f64,
    /// Decay length `1/κ` of the wavefunction outside the well; present only
    /// for states that are classically forbidden there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penetration_depth: Option<f64>,
}

/// Classical turning points `(-x, +x)` of an oscillator level.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TurningPoints(pub f64, pub f64);

impl TurningPoints {
    /// Symmetric pair `(-x, x)`.
    pub fn symmetric(x: f64) -> Self { Self(-x.abs(), x.abs()) }
}

/// One `(n, l, m)` orbital of a hydrogen-like level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Orbital {
    pub n: u32,
    pub l: u32,
    pub m: i32,
    /// Spectroscopic label, e.g. `3d`.
    pub label: String,
}

/// A discrete energy level.
///
/// Which optional fields are present depends on the solver that produced the
/// level; an absent field means "not applicable", never zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnergyLevel {
    pub n: u32,
    pub energy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degeneracy: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turning_points: Option<TurningPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u32>,
    /// `E_n / E_1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orbitals: Vec<Orbital>,
}

impl EnergyLevel {
    fn bare(n: u32, energy: f64) -> Self {
        Self {
            n,
            energy,
            degeneracy: None,
            turning_points: None,
            wavelength: None,
            nodes: None,
            energy_ratio: None,
            orbitals: Vec::new(),
        }
    }

    /// Harmonic oscillator level: turning points and `n` nodes.
    pub fn oscillator(n: u32, energy: f64, turning_points: TurningPoints) -> Self {
        Self {
            turning_points: Some(turning_points),
            nodes: Some(n),
            ..Self::bare(n, energy)
        }
    }

    /// Hydrogen-like level: degeneracy and the orbitals it contains.
    pub fn hydrogen(n: u32, energy: f64, degeneracy: u32, orbitals: Vec<Orbital>) -> Self {
        Self {
            degeneracy: Some(degeneracy),
            orbitals,
            ..Self::bare(n, energy)
        }
    }

    /// Infinite-well mode: wavelength, `n - 1` nodes, and the ratio to the
    /// ground-state energy.
    pub fn box_mode(n: u32, energy: f64, wavelength: f64, energy_ratio: f64) -> Self {
        Self {
            wavelength: Some(wavelength),
            nodes: Some(n.saturating_sub(1)),
            energy_ratio: Some(energy_ratio),
            ..Self::bare(n, energy)
        }
    }
}

/// Transmission and reflection through a barrier.
///
/// Probabilities are percentages and sum to 100; coefficients are the
/// corresponding amplitudes (square roots of the probabilities as fractions).
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TunnelingResult {
    pub transmission_probability: f64,
    pub reflection_probability: f64,
    pub transmission_coefficient: f64,
    pub reflection_coefficient: f64,
}

impl TunnelingResult {
    /// Build from a transmission probability `t` in `[0, 1]`. Reflection is
    /// always derived from transmission.
    pub fn from_transmission(t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let transmission_probability = 100.0 * t;
        let reflection_probability = 100.0 - transmission_probability;
        Self {
            transmission_probability,
            reflection_probability,
            transmission_coefficient: t.sqrt(),
            reflection_coefficient: (reflection_probability / 100.0).max(0.0).sqrt(),
        }
    }
}

/// Wavenumbers outside and inside a barrier. Below the barrier top the inside
/// quantities are purely imaginary.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct WaveNumbers {
    pub k_outside: f64,
    pub k_inside: C64,
    /// `k_inside * L`.
    pub barrier_phase: C64,
}

/// The output of any solver.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Solution {
    FiniteWell(finite_well::Solution),
    Tunneling(tunneling::Solution),
    Harmonic(harmonic::Solution),
    Hydrogen(hydrogen::Solution),
    ParticleBox(particle_box::Solution),
}

impl Solution {
    /// Identifier of the solver that produced this result.
    pub fn solver(&self) -> SolverId {
        match self {
            Self::FiniteWell(_) => SolverId::FiniteWell,
            Self::Tunneling(_) => SolverId::Tunneling,
            Self::Harmonic(_) => SolverId::Harmonic,
            Self::Hydrogen(_) => SolverId::Hydrogen,
            Self::ParticleBox(_) => SolverId::ParticleBox,
        }
    }

    pub fn bound_states(&self) -> Option<&[BoundState]> {
        match self {
            Self::FiniteWell(sol) => Some(&sol.bound_states),
            _ => None,
        }
    }

    pub fn energy_levels(&self) -> Option<&[EnergyLevel]> {
        match self {
            Self::Harmonic(sol) => Some(&sol.energy_levels),
            Self::Hydrogen(sol) => Some(&sol.energy_levels),
            Self::ParticleBox(sol) => Some(&sol.energy_levels),
            _ => None,
        }
    }

    pub fn tunneling_results(&self) -> Option<&TunnelingResult> {
        match self {
            Self::Tunneling(sol) => Some(&sol.tunneling_results),
            _ => None,
        }
    }

    pub fn wave_numbers(&self) -> Option<&WaveNumbers> {
        match self {
            Self::Tunneling(sol) => Some(&sol.wave_numbers),
            _ => None,
        }
    }

    /// Number of states, levels, or (for a barrier) `1`.
    pub fn len(&self) -> usize {
        self.bound_states().map(|s| s.len())
            .or_else(|| self.energy_levels().map(|l| l.len()))
            .unwrap_or(1)
    }

    /// `true` when a bound-state solve found nothing.
    pub fn is_empty(&self) -> bool {
        self.bound_states().is_some_and(|s| s.is_empty())
    }
}

macro_rules! impl_from_solution {
    ( $( $variant:ident => $module:ident ),* $(,)? ) => {
        $(
            impl From<$module::Solution> for Solution {
                fn from(sol: $module::Solution) -> Self { Self::$variant(sol) }
            }
        )*
    }
}

impl_from_solution!(
    FiniteWell => finite_well,
    Tunneling => tunneling,
    Harmonic => harmonic,
    Hydrogen => hydrogen,
    ParticleBox => particle_box,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflection_is_complement_of_transmission() {
        for t in [0.0, 1e-12, 0.3, 0.999_999, 1.0] {
            let res = TunnelingResult::from_transmission(t);
            assert!((res.transmission_probability + res.reflection_probability - 100.0).abs() < 1e-9);
            assert!(
                (res.transmission_coefficient.powi(2) + res.reflection_coefficient.powi(2) - 1.0)
                .abs() < 1e-9
            );
        }
    }

    #[test]
    fn level_constructors_only_fill_their_fields() {
        let osc = EnergyLevel::oscillator(2, 2.5, TurningPoints::symmetric(2.2));
        assert_eq!(osc.nodes, Some(2));
        assert!(osc.degeneracy.is_none() && osc.wavelength.is_none());

        let boxed = EnergyLevel::box_mode(1, 4.9, 2.0, 1.0);
        assert_eq!(boxed.nodes, Some(0));
        assert!(boxed.turning_points.is_none());

        let json = serde_json::to_value(&boxed).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("degeneracy"));
        assert!(!obj.contains_key("orbitals"));
        assert!(obj.contains_key("wavelength"));
    }

    #[test]
    fn turning_points_serialize_as_pair() {
        let json = serde_json::to_value(TurningPoints::symmetric(1.5)).unwrap();
        assert_eq!(json, serde_json::json!([-1.5, 1.5]));
    }
}
