#![allow(non_upper_case_globals)]

//! Physical constants and the natural energy/length/time scales associated
//! with a particle confined to a length.
//!
//! Solvers accept `hbar` as a parameter so that requests can be posed in
//! arbitrary ("textbook") units; the constants here are only needed when a
//! caller wants SI values. Concrete physical constants are taken from NIST.

use std::f64::consts::PI;

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / 2.0 / PI;
//                +/- 0 (exact)

/// speed of light in vacuum (m s^-1)
pub const c: f64 = 2.99792458e8;
//             +/- 0 (exact)

/// elementary charge (C)
pub const e: f64 = 1.602176634e-19;
//             +/- 0 (exact)

/// electron mass (kg)
pub const me: f64 = 9.1093837015e-31;
//              +/- 0.0000000028e-31

/// Rydberg constant for an infinite-mass nucleus (m^-1)
pub const Rinf: f64 = 10973731.568160;
//                       +/- 0.000021

/// Bohr radius (m)
pub const a0: f64 = 5.29177210903e-11;
//              +/- 0.00000000080e-11

/// Rydberg energy (eV) = Rinf\*h\*c/e
pub const Ry_eV: f64 = Rinf * h * c / e;

/// Rydberg energy rounded the way it is usually quoted (eV); the default for
/// the hydrogen solver.
pub const RY_QUOTED: f64 = 13.6;

/// A set of natural scaling factors for a particle of mass `m` confined to a
/// length `a`, for a given value of ħ.
///
/// The energy scale is ħ²/(2 m a²), so that a dimensionless wavenumber `z = k
/// a` has kinetic energy `z² e`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Units {
    /// Reduced Planck constant in the base unit system.
    pub hbar: f64,
    /// Particle mass.
    pub m: f64,
    /// Base length scale.
    pub a: f64,
    /// Associated energy scale.
    pub e: f64,
    /// Associated (angular) time scale.
    pub t: f64,
}

impl Units {
    /// Construct from ħ, a mass, and a length, all in the same base unit
    /// system.
    pub fn new(hbar_: f64, mass: f64, a: f64) -> Self {
        let e_unit = hbar_.powi(2) / 2.0 / mass / a.powi(2);
        let t_unit = hbar_ / e_unit;
        Self { hbar: hbar_, m: mass, a, e: e_unit, t: t_unit }
    }

    /// Construct from a mass and length scale given in meters/kilograms/seconds
    /// (MKS) units.
    pub fn from_mks(mass: f64, a: f64) -> Self { Self::new(hbar, mass, a) }

    /// Convert a quantity with dimensions of length in the base unit system to
    /// natural units.
    pub fn to_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a.recip()
    }

    /// Convert a dimensionless quantity to one with length units in the base
    /// unit system.
    pub fn from_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a
    }

    /// Convert a quantity with dimensions of energy in the base unit system to
    /// natural units.
    pub fn to_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e.recip()
    }

    /// Convert a dimensionless quantity to one with energy units in the base
    /// unit system.
    pub fn from_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e
    }

    /// Dimensionless wavenumber `k a` for a kinetic energy `ke` (in base
    /// units); negative kinetic energies give the decay constant `κ a` of the
    /// classically forbidden solution instead.
    pub fn nat_wavenumber(&self, ke: f64) -> f64 {
        self.to_nat_energy::<f64, f64>(ke.abs()).sqrt()
    }
}
