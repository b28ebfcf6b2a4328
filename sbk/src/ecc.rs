//! # Reed–Solomon Error Correction over GF(256)
//!
//! Systematic encoding: the message bytes are read as points
//! `(i, m[i])` for `i < L`, the unique polynomial of degree < L through
//! them is fitted, and the redundancy bytes are its evaluations at
//! `L, L+1, …, 2L−1`. The block on paper is `m ‖ ecc`: the message is
//! right there in the clear, which is the whole point: a pristine backup
//! needs no decoding at all.
//!
//! Decoding works from a per-position view of what the user could still
//! read: `Some(byte)` for a legible position, `None` for an erasure. Any
//! L known positions determine the polynomial; extra known positions
//! confirm it. When confirmation fails, some "known" byte is wrong, and
//! the decoder searches over small sets of positions to disbelieve. A
//! candidate polynomial is only accepted when at least L+1 surviving
//! positions agree with it; with exactly L nothing distinguishes a
//! correct reading from a consistent fabrication.
//!
//! The search is combinatorial and explicitly bounded
//! ([`crate::config::ECC_MAX_ERRORS`]); this is a paper-backup code, not
//! a telecom one, and the block is at most a few dozen bytes.

use thiserror::Error;

use crate::config;
use crate::field::gf256::Gf256;
use crate::field::poly;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EccError {
    /// Message too long for distinct coordinates in GF(256).
    #[error("message of {len} bytes exceeds the ECC limit of {max}")]
    MessageTooLong { len: usize, max: usize },

    /// Nothing to protect.
    #[error("cannot ECC-encode an empty message")]
    EmptyMessage,

    /// A block must be message + equally long ECC.
    #[error("ECC block length {len} is not an even number of bytes")]
    OddBlockLength { len: usize },

    /// Too many positions lost or corrupted.
    #[error("ECC unrecoverable: {known} legible of {total} positions")]
    Unrecoverable { known: usize, total: usize },
}

/// Encode `msg` into a `2·len(msg)` block `msg ‖ ecc`.
pub fn encode(msg: &[u8]) -> Result<Vec<u8>, EccError> {
    let len = msg.len();
    if len == 0 {
        return Err(EccError::EmptyMessage);
    }
    if len > config::ECC_MAX_MSG_LEN {
        return Err(EccError::MessageTooLong {
            len,
            max: config::ECC_MAX_MSG_LEN,
        });
    }

    let points: Vec<(u8, u8)> = msg.iter().enumerate().map(|(i, &b)| (i as u8, b)).collect();

    let mut block = Vec::with_capacity(2 * len);
    block.extend_from_slice(msg);
    for j in len..2 * len {
        // Distinct x-coordinates by construction; interpolation cannot fail.
        let y = poly::interpolate_at(&Gf256, &points, &(j as u8))
            .expect("message positions are distinct");
        block.push(y);
    }
    Ok(block)
}

/// Decode a block given per-position legibility. Returns the message
/// (first half) or [`EccError::Unrecoverable`].
pub fn decode(cells: &[Option<u8>]) -> Result<Vec<u8>, EccError> {
    let total = cells.len();
    if total == 0 || total % 2 != 0 {
        return Err(EccError::OddBlockLength { len: total });
    }
    let msg_len = total / 2;
    if msg_len > config::ECC_MAX_MSG_LEN {
        return Err(EccError::MessageTooLong {
            len: msg_len,
            max: config::ECC_MAX_MSG_LEN,
        });
    }

    let known: Vec<(u8, u8)> = cells
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.map(|b| (i as u8, b)))
        .collect();
    let unrecoverable = EccError::Unrecoverable {
        known: known.len(),
        total,
    };
    if known.len() < msg_len {
        return Err(unrecoverable);
    }

    // Erasure-only fast path: trust every legible position.
    if let Some(msg) = try_candidate(&known, msg_len) {
        return Ok(msg);
    }

    // Some legible position lies. Disbelieve e positions at a time; a
    // candidate must still be confirmed by at least one position beyond
    // the L that define it, hence the −1.
    let max_errors = config::ECC_MAX_ERRORS.min(known.len().saturating_sub(msg_len + 1));
    for e in 1..=max_errors {
        let mut combo = Combinations::new(known.len(), e);
        while let Some(excluded) = combo.next() {
            let remaining: Vec<(u8, u8)> = known
                .iter()
                .enumerate()
                .filter(|(i, _)| !excluded.contains(i))
                .map(|(_, p)| *p)
                .collect();
            if let Some(msg) = try_candidate(&remaining, msg_len) {
                return Ok(msg);
            }
        }
    }

    Err(unrecoverable)
}

/// Fit a polynomial through the first `msg_len` of `points` and accept it
/// only if every remaining point lies on it. Returns the reconstructed
/// message on acceptance.
fn try_candidate(points: &[(u8, u8)], msg_len: usize) -> Option<Vec<u8>> {
    debug_assert!(points.len() >= msg_len);
    let base = &points[..msg_len];

    for probe in &points[msg_len..] {
        let y = poly::interpolate_at(&Gf256, base, &probe.0).ok()?;
        if y != probe.1 {
            return None;
        }
    }

    let mut msg = Vec::with_capacity(msg_len);
    for i in 0..msg_len as u8 {
        match base.iter().find(|(x, _)| *x == i) {
            Some((_, y)) => msg.push(*y),
            None => msg.push(poly::interpolate_at(&Gf256, base, &i).ok()?),
        }
    }
    Some(msg)
}

/// Plain odometer over k-subsets of `0..n`, ascending index order.
struct Combinations {
    n: usize,
    idx: Vec<usize>,
    started: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Combinations {
            n,
            idx: (0..k).collect(),
            started: false,
        }
    }

    fn next(&mut self) -> Option<&[usize]> {
        let k = self.idx.len();
        if k > self.n {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.idx);
        }
        // Advance the rightmost index that still has room.
        let mut i = k;
        loop {
            if i == 0 {
                return None;
            }
            i -= 1;
            if self.idx[i] + (k - i) < self.n {
                self.idx[i] += 1;
                for j in i + 1..k {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                return Some(&self.idx);
            }
        }
    }
}
