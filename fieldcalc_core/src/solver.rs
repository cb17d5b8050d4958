//! # Right-Triangle Partial Solver
//!
//! Infers the single missing quantity of a right triangle from the other
//! three. Quantities: leg `a` (base), leg `b` (height), hypotenuse `c`, and
//! angle `theta` in degrees, measured at the base (opposite `b`, adjacent to
//! `a`, so tan(theta) = b/a).
//!
//! Resolution is a fixed case table keyed on which quantity is missing; each
//! case tries, in order, every pair of present quantities with a closed-form
//! solution. There is no iteration anywhere.

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{deg_to_rad, rad_to_deg};

/// A fully determined right triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RightTriangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub theta_deg: f64,
}

const EPS: f64 = 1e-12;

fn bad(x: f64) -> bool {
    !x.is_finite() || x <= 0.0
}

/// Solve for the one missing quantity, then back-fill and validate.
///
/// Exactly one of the four arguments must be `None`; any other count is a
/// hard error. After the missing quantity is resolved, any still-unset
/// quantity is back-filled from the completed set, and the final triangle
/// must be all-finite with strictly positive side lengths.
///
/// ```rust
/// use fieldcalc_core::solver::solve_right_triangle;
///
/// assert!(solve_right_triangle(Some(100.0), Some(50.0), None, None).is_err());
/// let t = solve_right_triangle(Some(100.0), Some(50.0), Some(111.8034), None).unwrap();
/// assert!((t.theta_deg - 26.565).abs() < 1e-3);
/// ```
pub fn solve_right_triangle(
    a: Option<f64>,
    b: Option<f64>,
    c: Option<f64>,
    theta_deg: Option<f64>,
) -> CalcResult<RightTriangle> {
    let missing_count = [a, b, c, theta_deg].iter().filter(|q| q.is_none()).count();
    if missing_count != 1 {
        return Err(CalcError::geometry(
            "supply exactly three of a, b, c, θ (leave exactly one blank)",
        ));
    }

    let mut va = a.unwrap_or(f64::NAN);
    let mut vb = b.unwrap_or(f64::NAN);
    let mut vc = c.unwrap_or(f64::NAN);
    let mut theta = theta_deg.unwrap_or(f64::NAN);

    if a.is_none() {
        if b.is_some() && c.is_some() {
            if bad(vb) || bad(vc) || vc <= vb {
                return Err(CalcError::geometry("requires c > b with both positive"));
            }
            va = (vc * vc - vb * vb).sqrt();
        } else if c.is_some() && theta_deg.is_some() {
            if bad(vc) {
                return Err(CalcError::geometry("c must be positive"));
            }
            va = vc * deg_to_rad(theta).cos();
        } else {
            // b and theta given
            if bad(vb) {
                return Err(CalcError::geometry("b must be positive"));
            }
            va = vb / deg_to_rad(theta).tan();
        }
    } else if b.is_none() {
        if a.is_some() && c.is_some() {
            if bad(va) || bad(vc) || vc <= va {
                return Err(CalcError::geometry("requires c > a with both positive"));
            }
            vb = (vc * vc - va * va).sqrt();
        } else if c.is_some() && theta_deg.is_some() {
            if bad(vc) {
                return Err(CalcError::geometry("c must be positive"));
            }
            vb = vc * deg_to_rad(theta).sin();
        } else {
            // a and theta given
            if bad(va) {
                return Err(CalcError::geometry("a must be positive"));
            }
            vb = va * deg_to_rad(theta).tan();
        }
    } else if c.is_none() {
        if a.is_some() && b.is_some() {
            if bad(va) || bad(vb) {
                return Err(CalcError::geometry("a and b must be positive"));
            }
            vc = (va * va + vb * vb).sqrt();
        } else if a.is_some() && theta_deg.is_some() {
            if bad(va) {
                return Err(CalcError::geometry("a must be positive"));
            }
            let cos = deg_to_rad(theta).cos();
            if cos.abs() < EPS {
                return Err(CalcError::geometry("cos θ is too close to zero"));
            }
            vc = va / cos;
        } else {
            // b and theta given
            if bad(vb) {
                return Err(CalcError::geometry("b must be positive"));
            }
            let sin = deg_to_rad(theta).sin();
            if sin.abs() < EPS {
                return Err(CalcError::geometry("sin θ is too close to zero"));
            }
            vc = vb / sin;
        }
    } else {
        // theta missing
        if a.is_some() && b.is_some() {
            if bad(va) || bad(vb) {
                return Err(CalcError::geometry("a and b must be positive"));
            }
            theta = rad_to_deg(vb.atan2(va));
        } else if a.is_some() && c.is_some() {
            if bad(va) || bad(vc) || vc < va {
                return Err(CalcError::geometry("requires c >= a with both positive"));
            }
            theta = rad_to_deg((va / vc).acos());
        } else {
            // b and c given
            if bad(vb) || bad(vc) || vc < vb {
                return Err(CalcError::geometry("requires c >= b with both positive"));
            }
            theta = rad_to_deg((vb / vc).asin());
        }
    }

    // Back-fill anything still unset from the now-complete set
    if !vc.is_finite() && va.is_finite() && vb.is_finite() {
        vc = (va * va + vb * vb).sqrt();
    }
    if !va.is_finite() && vc.is_finite() && theta.is_finite() {
        va = vc * deg_to_rad(theta).cos();
    }
    if !vb.is_finite() && vc.is_finite() && theta.is_finite() {
        vb = vc * deg_to_rad(theta).sin();
    }

    if ![va, vb, vc, theta].iter().all(|q| q.is_finite()) {
        return Err(CalcError::geometry("solver produced a non-finite value"));
    }
    if va <= 0.0 || vb <= 0.0 || vc <= 0.0 {
        return Err(CalcError::geometry("side lengths must be positive"));
    }

    Ok(RightTriangle {
        a: va,
        b: vb,
        c: vc,
        theta_deg: theta,
    })
}
