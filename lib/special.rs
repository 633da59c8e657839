//! Orthogonal polynomials and the closed-form eigenfunctions built from them.
//!
//! These are only needed to sample wavefunctions for plot directives; energies
//! are computed in closed form by the solvers themselves.

use std::f64::consts::PI;

/// Physicists' Hermite polynomial *H*<sub>*n*</sub>(*x*).
///
/// ```text
/// H₀(x) = 1, H₁(x) = 2x, H_{n+1}(x) = 2x H_n(x) - 2n H_{n-1}(x)
/// ```
pub fn hermite(n: usize, x: f64) -> f64 {
    let mut hprev: f64 = 1.0;
    if n == 0 { return hprev; }
    let mut h: f64 = 2.0 * x;
    for k in 1..n {
        let hnext = 2.0 * x * h - 2.0 * k as f64 * hprev;
        hprev = h;
        h = hnext;
    }
    h
}

/// Generalized (associated) Laguerre polynomial
/// *L*<sub>*k*</sub><sup>(*α*)</sup>(*x*).
///
/// ```text
/// L₀ = 1, L₁ = 1 + α - x,
/// (j + 1) L_{j+1} = (2j + 1 + α - x) L_j - (j + α) L_{j-1}
/// ```
pub fn laguerre(k: usize, alpha: f64, x: f64) -> f64 {
    let mut lprev: f64 = 1.0;
    if k == 0 { return lprev; }
    let mut l: f64 = 1.0 + alpha - x;
    for j in 1..k {
        let jf = j as f64;
        let lnext = ((2.0 * jf + 1.0 + alpha - x) * l - (jf + alpha) * lprev)
            / (jf + 1.0);
        lprev = l;
        l = lnext;
    }
    l
}

/// *n*! as a float.
pub fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

/// Normalized harmonic oscillator eigenfunction ψ<sub>*n*</sub>(*x*) for
/// characteristic length `x0` = √(ħ/*mω*).
pub fn oscillator_wavefunction(n: usize, x: f64, x0: f64) -> f64 {
    let xi = x / x0;
    let norm = (x0 * PI.sqrt() * 2.0_f64.powi(n as i32) * factorial(n))
        .sqrt()
        .recip();
    norm * hermite(n, xi) * (-xi * xi / 2.0).exp()
}

/// Hydrogen-like radial wavefunction *R*<sub>*nl*</sub>(*r*) for nuclear
/// charge `z` and Bohr radius `a0`, normalized so that ∫ *R*² *r*² d*r* = 1.
///
/// Requires `l < n`.
pub fn radial_wavefunction(n: usize, l: usize, z: f64, a0: f64, r: f64) -> f64 {
    let nf = n as f64;
    let rho = 2.0 * z * r / (nf * a0);
    let norm = (2.0 * z / (nf * a0)).powf(1.5)
        * (factorial(n - l - 1) / (2.0 * nf * factorial(n + l))).sqrt();
    norm
        * (-rho / 2.0).exp()
        * rho.powi(l as i32)
        * laguerre(n - l - 1, (2 * l + 1) as f64, rho)
}
