//! # Error Taxonomy
//!
//! Every fallible operation in SBK surfaces one of the per-module error
//! enums below, unified here into [`SbkError`] for callers that drive the
//! whole pipeline. Front-ends map errors to process exit codes through
//! [`SbkError::exit_code`], the contract a wrapping CLI is expected to
//! honor.
//!
//! Two rules hold everywhere:
//!
//! 1. **No secrets in messages.** An error may mention lengths, indices,
//!    and positions. It must never mention key bytes, share bytes, or
//!    anything derived from them.
//! 2. **No silent recovery except ECC.** The Reed–Solomon decoder corrects
//!    what it can without telling anyone; every other failure propagates
//!    to the caller untouched. No retries, no fallbacks.

use thiserror::Error;

use crate::codec::intcode::IntcodeError;
use crate::codec::mnemonic::MnemonicError;
use crate::ecc::EccError;
use crate::field::gfp::GfpError;
use crate::field::poly::PolyError;
use crate::kdf::KdfError;
use crate::params::ParamsError;
use crate::shamir::ShamirError;
use crate::wallet::WalletError;

/// Union of every error the crate can produce.
#[derive(Debug, Error)]
pub enum SbkError {
    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Shamir(#[from] ShamirError),

    #[error(transparent)]
    Poly(#[from] PolyError),

    #[error(transparent)]
    Gfp(#[from] GfpError),

    #[error(transparent)]
    Ecc(#[from] EccError),

    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    #[error(transparent)]
    Intcode(#[from] IntcodeError),

    #[error(transparent)]
    Kdf(#[from] KdfError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl SbkError {
    /// Process exit code for a wrapping front-end. Zero is reserved for
    /// success; each failure class gets a stable nonzero code so scripts
    /// can tell "bad input" from "unrecoverable backup".
    pub fn exit_code(&self) -> i32 {
        match self {
            SbkError::Params(ParamsError::RoundTrip) => 9,
            SbkError::Params(ParamsError::Mismatch) => 10,
            SbkError::Params(_) => 2,
            SbkError::Shamir(ShamirError::InsufficientShares { .. }) => 6,
            SbkError::Shamir(ShamirError::ForcedSecret) => 7,
            SbkError::Shamir(ShamirError::DuplicateX { .. }) => 8,
            SbkError::Shamir(_) => 2,
            SbkError::Poly(PolyError::DuplicateX) => 8,
            SbkError::Poly(PolyError::PointAtZero) => 7,
            SbkError::Gfp(_) => 2,
            SbkError::Ecc(EccError::Unrecoverable { .. }) => 5,
            SbkError::Ecc(_) => 2,
            SbkError::Mnemonic(_) => 3,
            SbkError::Intcode(_) => 4,
            SbkError::Kdf(KdfError::Cancelled) => 11,
            SbkError::Kdf(_) => 12,
            SbkError::Wallet(_) => 2,
        }
    }
}
