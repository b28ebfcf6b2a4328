//! # Protocol Constants & Debug Overrides
//!
//! Every magic number in SBK lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! Most of these values are part of the wire format: a salt or share printed
//! on paper today must decode with the same constants years from now.
//! Changing any of them is a version bump, and version bumps mean people
//! re-printing backups they hoped to never touch again. Choose wisely.
//!
//! The `SBK_*` environment variables at the bottom are debug overrides for
//! development and testing. None of them affect the wire format; they only
//! change which values this process picks when creating a wallet.

use std::env;

// ---------------------------------------------------------------------------
// Format Version
// ---------------------------------------------------------------------------

/// Wire format version, stored in the top 4 bits of every header.
/// There is exactly one version so far. Treasure this simplicity.
pub const PARAMS_VERSION: u8 = 0;

/// Length in bytes of the parameter header on a salt.
pub const SALT_HEADER_LEN: usize = 2;

/// Length in bytes of the parameter header on a share: the salt header
/// plus one byte for the share index and threshold.
pub const SHARE_HEADER_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Secret Sizes
// ---------------------------------------------------------------------------

/// Default length of the random salt payload in bytes (104 bits).
/// Written down once and kept with the owner.
pub const DEFAULT_RAW_SALT_LEN: usize = 13;

/// Default length of the brainkey in bytes (48 bits). Small enough to
/// memorize as six words, large enough that the salt + KDF make offline
/// guessing expensive.
pub const DEFAULT_BRAINKEY_LEN: usize = 6;

/// Combined entropy floor for `raw_salt ‖ brainkey`, in bits. Creation
/// refuses to produce a wallet weaker than this.
pub const DEFAULT_MIN_ENTROPY_BITS: usize = 80;

// ---------------------------------------------------------------------------
// Secret Sharing
// ---------------------------------------------------------------------------

/// Smallest supported threshold. 1-of-n is just copies.
pub const MIN_THRESHOLD: u8 = 2;

/// Largest threshold encodable in the 3-bit header field (offset by 2).
pub const MAX_THRESHOLD: u8 = 9;

/// Largest share index encodable in the 5-bit header field (offset by 1).
/// This bounds the number of *printable* shares; the field arithmetic
/// itself supports indices up to 255.
pub const MAX_SHARE_INDEX: u8 = 31;

/// Default sharing scheme. Three shares recover, five exist. Tolerates
/// the loss of any two carriers without making a quorum easy to steal.
pub const DEFAULT_SCHEME: &str = "3of5";

// ---------------------------------------------------------------------------
// KDF (Argon2id)
// ---------------------------------------------------------------------------

/// Argon2 lane count. Hard-coded so that the same parameters produce the
/// same digest on a laptop and on a 128-core workstation.
pub const KDF_PARALLELISM: u32 = 128;

/// Output length in bytes of each intermediate Argon2 call in the chained
/// digest. The final result is truncated to the caller's `hash_len`.
pub const KDF_INTERMEDIATE_LEN: usize = 128;

/// Maximum number of chain steps. More steps means a smoother progress
/// bar, not more security; ten is plenty of smoothness.
pub const KDF_MAX_STEPS: u32 = 10;

/// Unit of the memory-cost codomain, in KiB. All encodable memory costs
/// are `round(o + s·1.5ⁿ) · 512` KiB; see [`crate::params`].
pub const KDF_M_UNIT: u32 = 512;

/// Log-scale base for the memory-cost codomain.
pub const KDF_M_BASE: f64 = 1.5;

/// Largest memory exponent accepted on the wire. Exponents above this
/// would overflow Argon2's 32-bit KiB cost; the 6-bit field can hold
/// them, the decoder rejects them.
pub const KDF_M_MAX_EXP: u8 = 37;

/// Unit of the time-cost codomain, in iterations.
pub const KDF_T_UNIT: u32 = 1;

/// Log-scale base for the time-cost codomain.
pub const KDF_T_BASE: f64 = 4.0;

/// Largest time exponent accepted on the wire (same reasoning as
/// [`KDF_M_MAX_EXP`]).
pub const KDF_T_MAX_EXP: u8 = 16;

// ---------------------------------------------------------------------------
// KDF Calibration
// ---------------------------------------------------------------------------

/// A probe measurement below this many seconds is considered noise and
/// triggers another probe with a higher test iteration count.
pub const CALIBRATION_SIGNIFICANCE_SECS: f64 = 2.0;

/// Safety margin applied to the projected iteration count, so that the
/// final KDF runs at least as long as the user asked for.
pub const CALIBRATION_MARGIN: f64 = 0.25;

/// Wall-clock budget for the whole calibration loop, in seconds. Probing
/// stops and projects from the best measurement so far once exceeded.
pub const CALIBRATION_MAX_TOTAL_SECS: f64 = 30.0;

/// Fraction of detected usable memory the calibrator assigns to Argon2
/// when no explicit memory budget is given. Overridable with
/// `SBK_KDF_M_PERCENT`.
pub const DEFAULT_KDF_M_PERCENT: u32 = 50;

/// Assumed total system memory in MiB when detection fails. Deliberately
/// conservative; a wrong guess here only makes the KDF cheaper, never
/// broken.
pub const FALLBACK_TOTAL_MB: u64 = 1024;

// ---------------------------------------------------------------------------
// Error Correction
// ---------------------------------------------------------------------------

/// Upper bound on the number of corrupted (not merely erased) symbols the
/// Reed–Solomon decoder will search for. The search is combinatorial in
/// this value; four keeps worst-case decoding interactive.
pub const ECC_MAX_ERRORS: usize = 4;

/// Longest message the Reed–Solomon code accepts. Message and ECC bytes
/// together must fit the 256 distinct x-coordinates of GF(256).
pub const ECC_MAX_MSG_LEN: usize = 128;

// ---------------------------------------------------------------------------
// Intcodes
// ---------------------------------------------------------------------------

/// Modulus of the positional index carried in each intcode. Thirteen
/// index values × two bytes per intcode = 26 bytes of unambiguous
/// positions per block.
pub const INTCODE_INDEX_MOD: u32 = 13;

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// Wallet name used when the caller does not provide one.
pub const DEFAULT_WALLET_NAME: &str = "disabled";

/// Directory under the XDG config root where SBK keeps its state.
pub const APP_DIR_NAME: &str = "sbk";

/// File name of the persisted system measurement cache.
pub const SYS_INFO_FILENAME: &str = "sys_info_measurements.json";

// ---------------------------------------------------------------------------
// Debug Environment Overrides
// ---------------------------------------------------------------------------
//
// These exist so tests and development builds can run with tiny secrets
// and fast KDF parameters. They are read at call time, never cached.

/// Parse a positive integer environment variable. Unset returns `None`;
/// set-but-garbage also returns `None` with a warning, because silently
/// honoring half an override is worse than ignoring it.
fn env_u64(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparsable env override");
            None
        }
    }
}

/// Salt payload length in bytes, honoring `SBK_DEBUG_RAW_SALT_LEN`.
pub fn raw_salt_len() -> usize {
    env_u64("SBK_DEBUG_RAW_SALT_LEN")
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_RAW_SALT_LEN)
}

/// Brainkey length in bytes, honoring `SBK_DEBUG_BRAINKEY_LEN`.
pub fn brainkey_len() -> usize {
    env_u64("SBK_DEBUG_BRAINKEY_LEN")
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_BRAINKEY_LEN)
}

/// Sharing threshold, honoring `SBK_THRESHOLD`.
pub fn threshold() -> u8 {
    env_u64("SBK_THRESHOLD").map(|v| v as u8).unwrap_or(3)
}

/// Total share count, honoring `SBK_NUM_SHARES`.
pub fn num_shares() -> u8 {
    env_u64("SBK_NUM_SHARES").map(|v| v as u8).unwrap_or(5)
}

/// Target KDF duration in seconds for calibration, honoring
/// `SBK_KDF_T_TARGET`.
pub fn kdf_t_target_secs() -> Option<u64> {
    env_u64("SBK_KDF_T_TARGET")
}

/// Percentage of usable memory handed to Argon2, honoring
/// `SBK_KDF_M_PERCENT`. Clamped to [1, 100].
pub fn kdf_m_percent() -> u32 {
    env_u64("SBK_KDF_M_PERCENT")
        .map(|v| (v as u32).clamp(1, 100))
        .unwrap_or(DEFAULT_KDF_M_PERCENT)
}

/// Entropy floor in bits for new wallets, honoring `SBK_MIN_ENTROPY`.
pub fn min_entropy_bits() -> usize {
    env_u64("SBK_MIN_ENTROPY")
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_MIN_ENTROPY_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        // The default secrets must clear the default entropy floor.
        let bits = (DEFAULT_RAW_SALT_LEN + DEFAULT_BRAINKEY_LEN) * 8;
        assert!(bits >= DEFAULT_MIN_ENTROPY_BITS);

        // The default block (header + payload) must fit the RS code.
        let share_data = SHARE_HEADER_LEN + DEFAULT_RAW_SALT_LEN + DEFAULT_BRAINKEY_LEN;
        assert!(share_data <= ECC_MAX_MSG_LEN);
    }

    #[test]
    fn threshold_fits_header_field() {
        // 3 bits, offset by MIN_THRESHOLD.
        assert!(MAX_THRESHOLD - MIN_THRESHOLD < 8);
        // 5 bits, offset by 1.
        assert!(MAX_SHARE_INDEX <= 32);
    }
}
