//! # Parameter Header Codec
//!
//! Every salt and share begins with a tiny self-describing header so that
//! recovery, years later and on different hardware, needs nothing but the
//! paper itself. Two layouts share a common prefix:
//!
//! ```text
//! salt   (2 bytes):  version:4 | kdf_m:6 | kdf_t:6
//! share  (3 bytes):  version:4 | kdf_m:6 | kdf_t:6 | sss_x−1:5 | sss_t−2:3
//! ```
//!
//! ## Log-scale quantization
//!
//! Six bits cannot hold a KiB count or an iteration count directly, and
//! nobody needs them to: KDF difficulty is meaningful on a log scale.
//! Each field stores an exponent `n`, decoded as
//!
//! ```text
//! v(n) = round(o + s·Bⁿ) · U      s = 1/(B−1),  o = 1−s
//! ```
//!
//! with `U = 512 KiB, B = 1.5` for memory and `U = 1 iteration, B = 4`
//! for time. The offset `o` makes `v(0) = U` exactly and spaces small
//! values usefully (time decodes as 1, 2, 6, 22, 86, …). Encoding inverts
//! the formula and rounds to the nearest exponent.
//!
//! Quantization means most raw values are *not* representable.
//! [`Parameters::new`] snaps its inputs onto the codomain, so a value that
//! went through construction always survives a write/read cycle
//! byte-identically; [`encode_params`] refuses off-codomain values with
//! [`ParamsError::RoundTrip`] rather than guess.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    /// Header must be exactly 2 or 3 bytes.
    #[error("parameter header of {len} bytes (expected 2 or 3)")]
    BadLength { len: usize },

    /// Format version this build does not understand.
    #[error("unsupported parameter version {version}")]
    UnsupportedVersion { version: u8 },

    /// A field does not fit its encoded range.
    #[error("parameter {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    /// Encoding would not decode back to the same parameters.
    #[error("parameters do not round-trip through their encoding")]
    RoundTrip,

    /// Shares presented together carry different headers.
    #[error("share headers disagree (mixed wallets or mistyped share?)")]
    Mismatch,
}

/// KDF difficulty and sharing layout of one wallet.
///
/// `kdf_m` is the Argon2 memory cost in KiB and `kdf_t` its total
/// iteration count — both always codomain values of the log-scale codec.
/// `sss_x` is the share index carried by a share header, or −1 on a salt,
/// which has no index. `sss_n` exists only in memory at creation time;
/// the wire format deliberately does not record how many shares exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    pub version: u8,
    pub kdf_m: u32,
    pub kdf_t: u32,
    pub sss_x: i32,
    pub sss_t: u8,
    pub sss_n: Option<u8>,
}

// ---------------------------------------------------------------------------
// Log-scale codec
// ---------------------------------------------------------------------------

fn log_decode(n: u8, unit: u32, base: f64) -> u32 {
    let s = 1.0 / (base - 1.0);
    let o = 1.0 - s;
    let v = (o + s * base.powi(n as i32)).round();
    (v as u32).saturating_mul(unit)
}

fn log_encode(v: u32, unit: u32, base: f64, max_exp: u8) -> u8 {
    let s = 1.0 / (base - 1.0);
    let o = 1.0 - s;
    let x = (v as f64 / unit as f64 - o) / s;
    if x < 1.0 {
        return 0;
    }
    let n = (x.ln() / base.ln()).round();
    (n as i64).clamp(0, max_exp as i64) as u8
}

fn normalize_m(kib: u32) -> u32 {
    log_decode(
        log_encode(kib, config::KDF_M_UNIT, config::KDF_M_BASE, config::KDF_M_MAX_EXP),
        config::KDF_M_UNIT,
        config::KDF_M_BASE,
    )
}

fn normalize_t(iters: u32) -> u32 {
    log_decode(
        log_encode(iters, config::KDF_T_UNIT, config::KDF_T_BASE, config::KDF_T_MAX_EXP),
        config::KDF_T_UNIT,
        config::KDF_T_BASE,
    )
}

fn encode_m(kib: u32) -> Result<u8, ParamsError> {
    let n = log_encode(kib, config::KDF_M_UNIT, config::KDF_M_BASE, config::KDF_M_MAX_EXP);
    if log_decode(n, config::KDF_M_UNIT, config::KDF_M_BASE) != kib {
        return Err(ParamsError::RoundTrip);
    }
    Ok(n)
}

fn encode_t(iters: u32) -> Result<u8, ParamsError> {
    let n = log_encode(iters, config::KDF_T_UNIT, config::KDF_T_BASE, config::KDF_T_MAX_EXP);
    if log_decode(n, config::KDF_T_UNIT, config::KDF_T_BASE) != iters {
        return Err(ParamsError::RoundTrip);
    }
    Ok(n)
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Parameters {
    /// Build parameters for a new wallet, snapping the KDF fields onto
    /// the encodable codomain. The memory cost additionally gets a floor
    /// of 1 MiB — Argon2 with 128 lanes cannot go lower.
    pub fn new(kdf_m_kib: u32, kdf_t: u32, sss_t: u8) -> Result<Self, ParamsError> {
        if sss_t < config::MIN_THRESHOLD || sss_t > config::MAX_THRESHOLD {
            return Err(ParamsError::OutOfRange {
                field: "sss_t",
                value: sss_t as i64,
            });
        }
        let kdf_m = normalize_m(kdf_m_kib.max(2 * config::KDF_M_UNIT));
        let kdf_t = normalize_t(kdf_t.max(1));
        Ok(Parameters {
            version: config::PARAMS_VERSION,
            kdf_m,
            kdf_t,
            sss_x: -1,
            sss_t,
            sss_n: None,
        })
    }

    /// The same parameters stamped with a share index.
    pub fn with_share_index(&self, sss_x: u8) -> Result<Self, ParamsError> {
        if sss_x == 0 || sss_x > config::MAX_SHARE_INDEX {
            return Err(ParamsError::OutOfRange {
                field: "sss_x",
                value: sss_x as i64,
            });
        }
        Ok(Parameters {
            sss_x: sss_x as i32,
            ..*self
        })
    }

    /// The salt-header view: same KDF difficulty, no share index.
    pub fn for_salt(&self) -> Self {
        Parameters {
            sss_x: -1,
            sss_n: None,
            ..*self
        }
    }

    /// Length in bytes of this header on the wire.
    pub fn header_len(&self) -> usize {
        if self.sss_x < 0 {
            config::SALT_HEADER_LEN
        } else {
            config::SHARE_HEADER_LEN
        }
    }

    /// Equality of everything the wire format records — `sss_n` is a
    /// creation-time bookkeeping field and does not participate.
    pub fn wire_eq(&self, other: &Parameters) -> bool {
        self.version == other.version
            && self.kdf_m == other.kdf_m
            && self.kdf_t == other.kdf_t
            && self.sss_x == other.sss_x
            && self.sss_t == other.sss_t
    }
}

// ---------------------------------------------------------------------------
// Wire codec
// ---------------------------------------------------------------------------

/// Encode to 2 bytes (salt, `sss_x = −1`) or 3 bytes (share).
///
/// Verifies the fixed point `decode(encode(p)) ≡ p` before returning —
/// parameters that would come back different are a bug worth stopping.
pub fn encode_params(params: &Parameters) -> Result<Vec<u8>, ParamsError> {
    if params.version != config::PARAMS_VERSION {
        return Err(ParamsError::UnsupportedVersion {
            version: params.version,
        });
    }

    let m_exp = encode_m(params.kdf_m)?;
    let t_exp = encode_t(params.kdf_t)?;

    let mut bytes = vec![
        (params.version << 4) | (m_exp >> 2),
        ((m_exp & 0x03) << 6) | t_exp,
    ];

    if params.sss_x >= 0 {
        let x = params.sss_x;
        if x == 0 || x > config::MAX_SHARE_INDEX as i32 {
            return Err(ParamsError::OutOfRange {
                field: "sss_x",
                value: x as i64,
            });
        }
        if params.sss_t < config::MIN_THRESHOLD || params.sss_t > config::MAX_THRESHOLD {
            return Err(ParamsError::OutOfRange {
                field: "sss_t",
                value: params.sss_t as i64,
            });
        }
        bytes.push((((x as u8) - 1) << 3) | (params.sss_t - config::MIN_THRESHOLD));
    }

    let reparsed = decode_params(&bytes)?;
    if !reparsed.wire_eq(&Parameters {
        sss_t: if params.sss_x >= 0 {
            params.sss_t
        } else {
            config::MIN_THRESHOLD
        },
        ..*params
    }) {
        return Err(ParamsError::RoundTrip);
    }
    Ok(bytes)
}

/// Decode a 2- or 3-byte header.
pub fn decode_params(bytes: &[u8]) -> Result<Parameters, ParamsError> {
    if bytes.len() != config::SALT_HEADER_LEN && bytes.len() != config::SHARE_HEADER_LEN {
        return Err(ParamsError::BadLength { len: bytes.len() });
    }

    let version = bytes[0] >> 4;
    if version != config::PARAMS_VERSION {
        return Err(ParamsError::UnsupportedVersion { version });
    }

    let m_exp = ((bytes[0] & 0x0F) << 2) | (bytes[1] >> 6);
    let t_exp = bytes[1] & 0x3F;
    if m_exp > config::KDF_M_MAX_EXP {
        return Err(ParamsError::OutOfRange {
            field: "kdf_m",
            value: m_exp as i64,
        });
    }
    if t_exp > config::KDF_T_MAX_EXP {
        return Err(ParamsError::OutOfRange {
            field: "kdf_t",
            value: t_exp as i64,
        });
    }

    let (sss_x, sss_t) = if bytes.len() == config::SHARE_HEADER_LEN {
        let x = (bytes[2] >> 3) + 1;
        if x > config::MAX_SHARE_INDEX {
            return Err(ParamsError::OutOfRange {
                field: "sss_x",
                value: x as i64,
            });
        }
        (x as i32, (bytes[2] & 0x07) + config::MIN_THRESHOLD)
    } else {
        (-1, config::MIN_THRESHOLD)
    };

    Ok(Parameters {
        version,
        kdf_m: log_decode(m_exp, config::KDF_M_UNIT, config::KDF_M_BASE),
        kdf_t: log_decode(t_exp, config::KDF_T_UNIT, config::KDF_T_BASE),
        sss_x,
        sss_t,
        sss_n: None,
    })
}
