//! # Finite Fields
//!
//! All the arithmetic the sharing and error-correction layers stand on:
//!
//! - **gf256** — GF(2⁸) under the AES reducing polynomial. The production
//!   field: every secret byte, share byte, and ECC byte lives here.
//! - **gfp** — prime fields `p = 2ⁿ − k` over big integers. Retained only
//!   so tests can validate the GF(256) path against an independent
//!   implementation; nothing in the production pipeline touches it.
//! - **poly** — polynomial evaluation and Lagrange interpolation, generic
//!   over either field through the [`Field`] trait.

pub mod gf256;
pub mod gfp;
pub mod poly;

/// The handful of operations interpolation actually needs, implemented by
/// both supported fields. Element types differ wildly (a `u8` versus a
/// heap-allocated big integer), so operations go through a field instance
/// rather than bare functions.
///
/// Division by zero is a programming error in every implementation and
/// panics; the layers above validate their inputs (distinct, nonzero
/// x-coordinates) before any arithmetic happens.
pub trait Field {
    type El: Clone + PartialEq;

    fn zero(&self) -> Self::El;
    fn one(&self) -> Self::El;
    fn add(&self, a: &Self::El, b: &Self::El) -> Self::El;
    fn sub(&self, a: &Self::El, b: &Self::El) -> Self::El;
    fn mul(&self, a: &Self::El, b: &Self::El) -> Self::El;
    fn div(&self, a: &Self::El, b: &Self::El) -> Self::El;
}
