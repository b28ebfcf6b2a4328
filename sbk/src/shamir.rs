//! # Shamir Secret Sharing over GF(256)
//!
//! Splits a secret byte string into `n` shares such that any `t` of them
//! reconstruct it and any `t − 1` reveal exactly nothing. For each byte
//! of the secret a fresh random polynomial of degree `t − 1` is drawn
//! with the secret byte as its constant term; share `x` is the vector of
//! evaluations at that x-coordinate.
//!
//! ## The x=0 rule
//!
//! The secret lives at `f(0)`, so no share may ever carry the coordinate
//! zero. A crafted "share" at x=0 handed to `join` would otherwise force
//! the interpolation to parrot back its own y-vector as the recovered
//! secret. This is the forced-secret attack. Split never emits x=0; join
//! rejects it outright.
//!
//! ## Validation twin
//!
//! [`split_gfp`]/[`join_gfp`] run the same scheme over a big-integer
//! prime field, treating the whole secret as one field element. They
//! exist so tests can confirm two unrelated implementations agree;
//! production code has no business calling them.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config;
use crate::field::gf256::Gf256;
use crate::field::gfp::{self, GfpError};
use crate::field::poly::{self, PolyError};

/// Errors from splitting or joining.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShamirError {
    /// Threshold below 2, above the share count, or zero shares requested.
    #[error("invalid scheme: threshold {threshold} of {num_shares} shares")]
    InvalidScheme { threshold: u8, num_shares: u8 },

    /// The secret to split is empty.
    #[error("cannot split an empty secret")]
    EmptySecret,

    /// Fewer distinct shares than the threshold requires.
    #[error("insufficient shares: need {needed}, got {got}")]
    InsufficientShares { needed: usize, got: usize },

    /// A share carries the coordinate x=0, the forced-secret attack.
    #[error("rejected share with x=0 (forced-secret attack)")]
    ForcedSecret,

    /// Two shares carry the same x-coordinate.
    #[error("duplicate share coordinate x={x}")]
    DuplicateX { x: u8 },

    /// Shares disagree about the secret length.
    #[error("share length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Validation-only GF(p) path failures.
    #[error(transparent)]
    Gfp(#[from] GfpError),
}

impl From<PolyError> for ShamirError {
    fn from(e: PolyError) -> Self {
        match e {
            PolyError::DuplicateX => ShamirError::DuplicateX { x: 0 },
            PolyError::PointAtZero => ShamirError::ForcedSecret,
        }
    }
}

/// One output of a split: the x-coordinate and one y-byte per secret byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShare {
    /// Evaluation coordinate, never zero.
    pub x: u8,
    /// `ys[i] = fᵢ(x)` for the polynomial guarding secret byte `i`.
    pub ys: Vec<u8>,
}

/// Split `secret` into `num_shares` shares with reconstruction threshold
/// `threshold`, drawing polynomial coefficients from `rng`.
///
/// The split is randomized: two calls with different RNG states produce
/// different share bytes that nevertheless interpolate to the same
/// secret.
pub fn split<R: RngCore + CryptoRng>(
    secret: &[u8],
    threshold: u8,
    num_shares: u8,
    rng: &mut R,
) -> Result<Vec<RawShare>, ShamirError> {
    if threshold < config::MIN_THRESHOLD || threshold > num_shares {
        return Err(ShamirError::InvalidScheme {
            threshold,
            num_shares,
        });
    }
    if secret.is_empty() {
        return Err(ShamirError::EmptySecret);
    }

    let mut shares: Vec<RawShare> = (1..=num_shares)
        .map(|x| RawShare {
            x,
            ys: Vec::with_capacity(secret.len()),
        })
        .collect();

    // One polynomial per secret byte. The coefficient buffer is reused
    // and wiped; it briefly holds secret material.
    let mut coeffs = Zeroizing::new(vec![0u8; threshold as usize]);
    for &secret_byte in secret {
        coeffs[0] = secret_byte;
        rng.fill_bytes(&mut coeffs[1..]);

        for share in shares.iter_mut() {
            share.ys.push(poly::eval(&Gf256, &coeffs, &share.x));
        }
    }

    Ok(shares)
}

/// Reconstruct the secret from at least `threshold` distinct shares.
///
/// The whole input set is validated (no x=0, no duplicates, consistent
/// lengths) and the first `threshold` shares are interpolated; extras
/// beyond the threshold are ignored.
pub fn join(shares: &[RawShare], threshold: u8) -> Result<Zeroizing<Vec<u8>>, ShamirError> {
    if shares.len() < threshold as usize {
        return Err(ShamirError::InsufficientShares {
            needed: threshold as usize,
            got: shares.len(),
        });
    }

    let expected = shares[0].ys.len();
    let mut seen = [false; 256];
    for share in shares {
        if share.x == 0 {
            return Err(ShamirError::ForcedSecret);
        }
        if seen[share.x as usize] {
            return Err(ShamirError::DuplicateX { x: share.x });
        }
        seen[share.x as usize] = true;
        if share.ys.len() != expected {
            return Err(ShamirError::LengthMismatch {
                expected,
                got: share.ys.len(),
            });
        }
    }

    let quorum = &shares[..threshold as usize];
    let mut secret = Zeroizing::new(Vec::with_capacity(expected));
    let mut points = Vec::with_capacity(quorum.len());
    for i in 0..expected {
        points.clear();
        points.extend(quorum.iter().map(|s| (s.x, s.ys[i])));
        secret.push(poly::interpolate_at_zero(&Gf256, &points)?);
    }

    Ok(secret)
}

// ---------------------------------------------------------------------------
// GF(p) validation twin
// ---------------------------------------------------------------------------

/// Split over a prime field, the whole secret as a single big integer.
/// Validation only; see the module docs.
pub fn split_gfp<R: RngCore + CryptoRng>(
    secret: &[u8],
    threshold: u8,
    num_shares: u8,
    rng: &mut R,
) -> Result<Vec<(BigUint, BigUint)>, ShamirError> {
    if threshold < config::MIN_THRESHOLD || threshold > num_shares {
        return Err(ShamirError::InvalidScheme {
            threshold,
            num_shares,
        });
    }
    if secret.is_empty() {
        return Err(ShamirError::EmptySecret);
    }

    let field = gfp::get_pow2prime(secret.len() as u32 * 8)?;
    let mut coeffs = vec![BigUint::from_bytes_be(secret)];
    for _ in 1..threshold {
        coeffs.push(random_element(&field, rng));
    }

    let shares = (1..=num_shares)
        .map(|x| {
            let x = BigUint::from(x);
            let y = poly::eval(&field, &coeffs, &x);
            (x, y)
        })
        .collect();
    Ok(shares)
}

/// Join over the matching prime field. Validation only.
pub fn join_gfp(
    points: &[(BigUint, BigUint)],
    threshold: u8,
    secret_len: usize,
) -> Result<Vec<u8>, ShamirError> {
    if points.len() < threshold as usize {
        return Err(ShamirError::InsufficientShares {
            needed: threshold as usize,
            got: points.len(),
        });
    }

    let field = gfp::get_pow2prime(secret_len as u32 * 8)?;
    let secret = poly::interpolate_at_zero(&field, &points[..threshold as usize])?;

    // Left-pad back to the original length; the integer encoding drops
    // leading zero bytes.
    let digits = secret.to_bytes_be();
    if digits.len() > secret_len {
        return Err(ShamirError::LengthMismatch {
            expected: secret_len,
            got: digits.len(),
        });
    }
    let mut out = vec![0u8; secret_len - digits.len()];
    out.extend_from_slice(&digits);
    Ok(out)
}

/// Uniform-enough field element for validation purposes: 16 surplus bytes
/// of CSPRNG output reduced mod p.
fn random_element<R: RngCore + CryptoRng>(field: &gfp::Gfp, rng: &mut R) -> BigUint {
    let byte_len = (field.order().bits() as usize + 7) / 8 + 16;
    let mut buf = vec![0u8; byte_len];
    rng.fill_bytes(&mut buf);
    field.element(BigUint::from_bytes_be(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::from_seed([0u8; 32])
    }

    #[test]
    fn three_of_five_round_trip() {
        let secret = b"ABCDEFGH";
        let shares = split(secret, 3, 5, &mut rng()).unwrap();
        assert_eq!(shares.len(), 5);
        for share in &shares {
            assert_ne!(share.x, 0);
            assert_eq!(share.ys.len(), secret.len());
        }

        // A non-contiguous quorum: shares x=1, x=3, x=4.
        let quorum = vec![shares[0].clone(), shares[2].clone(), shares[3].clone()];
        let joined = join(&quorum, 3).unwrap();
        assert_eq!(&joined[..], secret);
    }

    #[test]
    fn every_quorum_agrees() {
        let secret = vec![0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE];
        let shares = split(&secret, 3, 5, &mut rng()).unwrap();

        for a in 0..5 {
            for b in (a + 1)..5 {
                for c in (b + 1)..5 {
                    let quorum =
                        vec![shares[a].clone(), shares[b].clone(), shares[c].clone()];
                    let joined = join(&quorum, 3).unwrap();
                    assert_eq!(joined[..], secret[..], "quorum {:?}", (a, b, c));
                }
            }
        }
    }

    #[test]
    fn excess_shares_are_ignored() {
        let secret = b"excess";
        let shares = split(secret, 2, 5, &mut rng()).unwrap();
        let joined = join(&shares, 2).unwrap();
        assert_eq!(&joined[..], secret);
    }

    #[test]
    fn below_threshold_is_insufficient() {
        let secret = b"ABCDEFGH";
        let shares = split(secret, 3, 5, &mut rng()).unwrap();
        let two = vec![shares[1].clone(), shares[4].clone()];
        assert_eq!(
            join(&two, 3).unwrap_err(),
            ShamirError::InsufficientShares { needed: 3, got: 2 }
        );
    }

    #[test]
    fn forced_secret_is_rejected() {
        let secret = b"ABCDEFGH";
        let mut shares = split(secret, 3, 5, &mut rng()).unwrap();
        shares[1] = RawShare {
            x: 0,
            ys: vec![0x41; secret.len()],
        };
        assert_eq!(join(&shares[..3], 3).unwrap_err(), ShamirError::ForcedSecret);
    }

    #[test]
    fn duplicate_x_is_rejected() {
        let secret = b"ABCDEFGH";
        let shares = split(secret, 3, 5, &mut rng()).unwrap();
        let dupes = vec![shares[0].clone(), shares[0].clone(), shares[1].clone()];
        assert_eq!(
            join(&dupes, 3).unwrap_err(),
            ShamirError::DuplicateX { x: 1 }
        );
    }

    #[test]
    fn invalid_schemes_are_rejected() {
        let mut r = rng();
        assert!(matches!(
            split(b"s", 1, 5, &mut r),
            Err(ShamirError::InvalidScheme { .. })
        ));
        assert!(matches!(
            split(b"s", 6, 5, &mut r),
            Err(ShamirError::InvalidScheme { .. })
        ));
        assert!(matches!(split(b"", 3, 5, &mut r), Err(ShamirError::EmptySecret)));
    }

    #[test]
    fn splits_with_different_rng_states_differ_but_join_identically() {
        let secret = b"same secret";
        let a = split(secret, 3, 5, &mut ChaCha8Rng::from_seed([1u8; 32])).unwrap();
        let b = split(secret, 3, 5, &mut ChaCha8Rng::from_seed([2u8; 32])).unwrap();
        assert_ne!(a, b);
        assert_eq!(join(&a[..3], 3).unwrap()[..], join(&b[..3], 3).unwrap()[..]);
    }

    #[test]
    fn two_shares_of_three_reveal_nothing() {
        // Information-theoretic check, byte position 0: with two shares
        // fixed, every candidate y for a third coordinate must map to a
        // distinct secret byte: a bijection, i.e. a uniform posterior.
        let secret = [0x5A];
        let shares = split(&secret, 3, 5, &mut rng()).unwrap();
        let (s1, s2) = (shares[0].clone(), shares[1].clone());

        let mut candidates = [false; 256];
        for y in 0..=255u8 {
            let guess = RawShare { x: 7, ys: vec![y] };
            let joined = join(&[s1.clone(), s2.clone(), guess], 3).unwrap();
            candidates[joined[0] as usize] = true;
        }
        assert!(candidates.iter().all(|&hit| hit));
    }

    #[test]
    fn gf256_and_gfp_paths_agree() {
        let secret = b"cross-check me!!";
        let mut r = rng();

        let byte_shares = split(secret, 3, 5, &mut r).unwrap();
        let int_shares = split_gfp(secret, 3, 5, &mut r).unwrap();

        let from_bytes = join(&byte_shares[..3], 3).unwrap();
        let from_ints = join_gfp(&int_shares[..3], 3, secret.len()).unwrap();

        assert_eq!(&from_bytes[..], secret);
        assert_eq!(&from_ints[..], secret);
    }

    #[test]
    fn gfp_round_trips_with_leading_zero_bytes() {
        let secret = [0x00, 0x00, 0xAB, 0xCD];
        let shares = split_gfp(&secret, 2, 3, &mut rng()).unwrap();
        let joined = join_gfp(&shares[1..], 2, secret.len()).unwrap();
        assert_eq!(joined, secret);
    }
}
