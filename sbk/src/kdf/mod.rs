//! # Key Derivation — Chained Argon2id
//!
//! The wallet seed comes out of Argon2id (version 0x13) with a fixed lane
//! count of 128, memory and time costs taken from [`crate::params`], and
//! the same input bytes used as both password and salt of every internal
//! call. There is no server and no password database here; the "salt" is
//! already a random secret on paper, so the usual separate-salt reasoning
//! does not apply.
//!
//! ## Why chained
//!
//! A single Argon2 call with a multi-minute time cost is a black hole:
//! no progress, no cancellation, just a frozen screen and a user
//! wondering whether to pull the battery. The digest instead runs up to
//! [`crate::config::KDF_MAX_STEPS`] Argon2 calls whose time costs sum to
//! `kdf_t`, feeding each output into the next. Same total work, but the
//! caller hears from us between steps.
//!
//! The published cryptanalysis for this chaining is weaker than for one
//! equivalent-cost call; it is a deliberate UX trade documented as such.
//!
//! ## Progress & cancellation
//!
//! The optional callback receives the completed fraction of total
//! iterations once per step and returns `true` to continue. A `false`
//! observed at a step boundary aborts with [`KdfError::Cancelled`]; the
//! Argon2 call already in flight always runs to completion first. The
//! digest bytes are a function of `(data, params, hash_len)` alone; the
//! callback can observe, never influence.

pub mod calibrate;
pub mod sys_info;

use argon2::{Algorithm, Argon2, Params as ArgonParams, Version};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config;
use crate::params::Parameters;
use crate::secret::SecretBytes;

/// Progress observer: takes the completed fraction in `[0, 1]`, returns
/// whether to keep going.
pub type ProgressFn<'a> = &'a mut dyn FnMut(f64) -> bool;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KdfError {
    /// The progress callback asked to stop at a step boundary.
    #[error("key derivation cancelled at a step boundary")]
    Cancelled,

    /// The Argon2 library refused (bad costs, failed allocation).
    #[error("argon2 failure: {0}")]
    Failure(String),

    /// Requested more output than the intermediate digest carries.
    #[error("hash length {requested} exceeds the {max}-byte intermediate digest")]
    BadHashLen { requested: usize, max: usize },
}

/// Derive `hash_len` bytes from `data` under the given parameters.
///
/// `data` must be at least 8 bytes (Argon2's minimum salt length — the
/// input doubles as the salt). The result is deterministic in
/// `(data, params, hash_len)`.
pub fn digest(
    data: &[u8],
    params: &Parameters,
    hash_len: usize,
    mut progress: Option<ProgressFn<'_>>,
) -> Result<SecretBytes, KdfError> {
    if hash_len == 0 || hash_len > config::KDF_INTERMEDIATE_LEN {
        return Err(KdfError::BadHashLen {
            requested: hash_len,
            max: config::KDF_INTERMEDIATE_LEN,
        });
    }

    let total_t = params.kdf_t.max(1);
    let steps = total_t.min(config::KDF_MAX_STEPS);
    let base = total_t / steps;
    let remainder = total_t % steps;

    let mut state = Zeroizing::new(data.to_vec());
    let mut done: u32 = 0;

    for step in 0..steps {
        let step_t = if step < remainder { base + 1 } else { base };
        let out = argon2id_pass(&state, params.kdf_m, step_t)?;
        state = out;
        done += step_t;

        if let Some(cb) = progress.as_mut() {
            let keep_going = cb(done as f64 / total_t as f64);
            if !keep_going && step + 1 < steps {
                return Err(KdfError::Cancelled);
            }
        }
    }

    Ok(SecretBytes::new(state[..hash_len].to_vec()))
}

/// One Argon2id invocation: full-width intermediate output, input bytes
/// as both password and salt.
fn argon2id_pass(
    input: &[u8],
    m_cost_kib: u32,
    t_cost: u32,
) -> Result<Zeroizing<Vec<u8>>, KdfError> {
    let argon_params = ArgonParams::new(
        m_cost_kib,
        t_cost,
        config::KDF_PARALLELISM,
        Some(config::KDF_INTERMEDIATE_LEN),
    )
    .map_err(|e| KdfError::Failure(e.to_string()))?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut out = Zeroizing::new(vec![0u8; config::KDF_INTERMEDIATE_LEN]);
    argon
        .hash_password_into(input, input, &mut out)
        .map_err(|e| KdfError::Failure(e.to_string()))?;
    Ok(out)
}
