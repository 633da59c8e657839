//! Bracketed root search for smooth scalar functions.
//!
//! [`newton_bisect`] keeps a sign-changing bracket around the root at all
//! times. Each iteration takes a Newton step from the current estimate, and
//! falls back to the bracket midpoint whenever the step would leave the
//! bracket, stalls, or the derivative is unusable. The search is therefore
//! guaranteed to terminate within `maxiters` evaluations.

use crate::error::{ RootError, RootResult };

#[derive(Copy, Clone, Debug, PartialEq)]
struct Bounds<T>(T, T);

impl Bounds<f64> {
    fn midpoint(self) -> f64 { (self.0 + self.1) / 2.0 }

    fn diff(self) -> f64 { self.1 - self.0 }

    fn contains(self, x: f64) -> bool {
        let (lo, hi) = if self.0 < self.1 { (self.0, self.1) } else { (self.1, self.0) };
        lo < x && x < hi
    }
}

impl<T> Bounds<T> {
    fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Bounds<U> {
        (f(self.0), f(self.1)).into()
    }
}

impl<T: PartialOrd> Bounds<T> {
    fn from_ord(xx: (T, T)) -> Self {
        if xx.0 > xx.1 { Self(xx.1, xx.0) } else { Self(xx.0, xx.1) }
    }
}

impl<T> From<(T, T)> for Bounds<T> {
    fn from(xx: (T, T)) -> Self { Self(xx.0, xx.1) }
}

/// A converged root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Root {
    /// Location of the root.
    pub x: f64,
    /// `|f(x)|` at the returned location.
    pub residual: f64,
    /// Number of iterations taken.
    pub iters: usize,
}

/// Find a root of `f` inside `bounds` using Newton steps (with derivative `df`)
/// safeguarded by bisection.
///
/// Converges when `|f(x)| < epsilon`. Returns [`RootError::NoSignChange`] if
/// `f` has the same sign at both ends of the bracket and
/// [`RootError::NoConvergence`] if `maxiters` iterations pass without meeting
/// the tolerance.
pub fn newton_bisect<F, D>(
    f: F,
    df: D,
    bounds: (f64, f64),
    epsilon: f64,
    maxiters: usize,
) -> RootResult<Root>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    RootError::check_epsilon(epsilon)?;
    RootError::check_maxiters(maxiters)?;

    let xb = Bounds::from_ord(bounds);
    let fb = xb.map(&f);
    if fb.0.abs() < epsilon {
        return Ok(Root { x: xb.0, residual: fb.0.abs(), iters: 0 });
    }
    if fb.1.abs() < epsilon {
        return Ok(Root { x: xb.1, residual: fb.1.abs(), iters: 0 });
    }
    if fb.0 * fb.1 > 0.0 || fb.0.is_nan() || fb.1.is_nan() {
        return Err(RootError::NoSignChange(xb.0, xb.1));
    }

    // keep the bracket oriented as (f < 0, f > 0)
    let mut sb: Bounds<f64> = if fb.0 < 0.0 { xb } else { Bounds(xb.1, xb.0) };
    let mut x: f64 = sb.midpoint();
    let mut fx: f64 = f(x);
    for k in 1..=maxiters {
        if fx.abs() < epsilon {
            return Ok(Root { x, residual: fx.abs(), iters: k });
        }
        if fx < 0.0 { sb.0 = x; } else { sb.1 = x; }
        let dfx = df(x);
        let step = fx / dfx;
        let xnewton = x - step;
        x = if dfx != 0.0 && step.is_finite() && step != 0.0
            && sb.contains(xnewton)
        {
            xnewton
        } else {
            sb.midpoint()
        };
        fx = f(x);
        if sb.diff() == 0.0 { break; }
    }
    if fx.abs() < epsilon {
        return Ok(Root { x, residual: fx.abs(), iters: maxiters });
    }
    Err(RootError::NoConvergence { iters: maxiters, residual: fx.abs() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_sqrt_two() {
        let root = newton_bisect(
            |x| x * x - 2.0, |x| 2.0 * x, (0.0, 2.0), 1e-12, 100).unwrap();
        assert!((root.x - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!(root.iters < 10);
    }

    #[test]
    fn bracket_order_does_not_matter() {
        let a = newton_bisect(|x: f64| x.cos(), |x: f64| -x.sin(), (3.0, 1.0), 1e-12, 100)
            .unwrap();
        let b = newton_bisect(|x: f64| x.cos(), |x: f64| -x.sin(), (1.0, 3.0), 1e-12, 100)
            .unwrap();
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert!((a.x - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn falls_back_to_bisection_on_useless_derivative() {
        // derivative reported as infinite everywhere: pure bisection
        let root = newton_bisect(
            |x| x.powi(3) - 0.125, |_| f64::INFINITY, (0.0, 1.0), 1e-10, 100)
            .unwrap();
        assert!((root.x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_bracket_without_sign_change() {
        let err = newton_bisect(|x| x * x + 1.0, |x| 2.0 * x, (-1.0, 1.0), 1e-10, 100)
            .unwrap_err();
        assert!(matches!(err, RootError::NoSignChange(..)));
    }

    #[test]
    fn reports_non_convergence_at_iteration_cap() {
        // a jump discontinuity has no point with small residual
        let err = newton_bisect(
            |x| if x < 0.3 { -1.0 } else { 1.0 }, |_| 0.0, (0.0, 1.0), 1e-10, 20)
            .unwrap_err();
        assert!(matches!(err, RootError::NoConvergence { iters: 20, .. }));
    }

    #[test]
    fn rejects_bad_settings() {
        assert!(matches!(
            newton_bisect(|x| x, |_| 1.0, (-1.0, 1.0), 0.0, 10),
            Err(RootError::BadEpsilon(_)),
        ));
        assert!(matches!(
            newton_bisect(|x| x, |_| 1.0, (-1.0, 1.0), 1e-6, 0),
            Err(RootError::BadMaxiters(0)),
        ));
    }
}
