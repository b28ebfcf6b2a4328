//! # Polynomials & Lagrange Interpolation
//!
//! A polynomial is a coefficient slice `[c₀, c₁, …]` with
//! `p(x) = Σ cᵢ xⁱ`, evaluated by Horner's rule in whatever field the
//! caller hands in. Interpolation reconstructs `p(x*)` directly from
//! points without materializing coefficients:
//!
//! ```text
//! p(x*) = Σᵢ yᵢ · Πⱼ≠ᵢ (x* − xⱼ) / (xᵢ − xⱼ)
//! ```
//!
//! The denominators are field inverses, so duplicate x-coordinates are
//! checked up front instead of discovered as a division-by-zero panic.
//! [`interpolate_at_zero`] additionally refuses points at x = 0: when the
//! value being reconstructed *is* p(0), a point already sitting at the
//! origin dictates the answer. That is the forced-secret attack, and it
//! is cheaper to reject here than to reason about downstream.

use thiserror::Error;

use super::Field;

/// Precondition violations for interpolation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolyError {
    /// Two points share an x-coordinate.
    #[error("duplicate x-coordinate among interpolation points")]
    DuplicateX,

    /// A point sits at x=0 while reconstructing p(0).
    #[error("interpolation point at x=0 would dictate the secret")]
    PointAtZero,
}

/// Evaluate `coeffs` at `x` by Horner's rule. An empty coefficient slice
/// is the zero polynomial.
pub fn eval<F: Field>(field: &F, coeffs: &[F::El], x: &F::El) -> F::El {
    let mut acc = field.zero();
    for c in coeffs.iter().rev() {
        acc = field.add(&field.mul(&acc, x), c);
    }
    acc
}

/// Interpolate the unique polynomial of degree < n through `points` and
/// evaluate it at `at`. Fails with [`PolyError::DuplicateX`] unless all
/// x-coordinates are distinct.
pub fn interpolate_at<F: Field>(
    field: &F,
    points: &[(F::El, F::El)],
    at: &F::El,
) -> Result<F::El, PolyError> {
    check_distinct_x::<F>(points)?;

    let mut acc = field.zero();
    for (i, (xi, yi)) in points.iter().enumerate() {
        let mut num = field.one();
        let mut den = field.one();
        for (j, (xj, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            num = field.mul(&num, &field.sub(at, xj));
            den = field.mul(&den, &field.sub(xi, xj));
        }
        let basis = field.div(&num, &den);
        acc = field.add(&acc, &field.mul(yi, &basis));
    }
    Ok(acc)
}

/// Interpolate and evaluate at the origin, the secret-recovery case.
/// Rejects points at x=0 with [`PolyError::PointAtZero`] before touching
/// any arithmetic.
pub fn interpolate_at_zero<F: Field>(
    field: &F,
    points: &[(F::El, F::El)],
) -> Result<F::El, PolyError> {
    let zero = field.zero();
    if points.iter().any(|(x, _)| *x == zero) {
        return Err(PolyError::PointAtZero);
    }
    interpolate_at(field, points, &zero)
}

fn check_distinct_x<F: Field>(points: &[(F::El, F::El)]) -> Result<(), PolyError> {
    for (i, (xi, _)) in points.iter().enumerate() {
        for (xj, _) in points.iter().skip(i + 1) {
            if *xi == *xj {
                return Err(PolyError::DuplicateX);
            }
        }
    }
    Ok(())
}
