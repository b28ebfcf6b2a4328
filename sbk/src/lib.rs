//! # SBK — Split Bitcoin Keys
//!
//! SBK derives a Bitcoin wallet seed from two small human-scale secrets,
//! a memorized *brainkey* and a written-down *salt*, and backs both up
//! as a redundant set of paper *shares* under Shamir threshold sharing.
//! Lose the paper in your desk: the shares in other places recover it.
//! Forget the words in your head: same answer. Lose both beyond the
//! threshold: the design working as intended, just not for you.
//!
//! The pipeline is deliberately boring cryptography composed carefully:
//!
//! - **field** — GF(256) under the AES polynomial; everything downstream
//!   is byte arithmetic in this field (plus a big-integer prime field
//!   kept solely to cross-check it).
//! - **shamir** — byte-wise threshold splitting with forced-secret
//!   rejection.
//! - **ecc** — a systematic Reed–Solomon code sized for paper: half the
//!   block may be lost and it still decodes.
//! - **params** — 2/3-byte self-describing headers with log-scale KDF
//!   costs, so recovery needs no config file.
//! - **kdf** — Argon2id, chained for progress reporting, with
//!   duration-targeted calibration.
//! - **codec** — mnemonic words and six-digit "intcodes", two redundant
//!   transcriptions of every block, fuzzy-matched on the way back in.
//! - **wallet** — the create / recover / load recipes gluing it together.
//!
//! ## Design stance
//!
//! 1. Paper is the storage medium of record. Every byte that matters is
//!    ECC-protected and renders in two independent notations.
//! 2. Secrets zeroize on drop and never reach `Debug`, logs, or errors.
//! 3. Everything on the wire round-trips exactly or refuses to encode.
//!    No "mostly the same parameters" — that way lie unrecoverable
//!    wallets.
//! 4. No networking, no wallet files, no persistence beyond one JSON
//!    cache of a memory measurement. Front-ends own everything else.

pub mod codec;
pub mod config;
pub mod ecc;
pub mod error;
pub mod field;
pub mod kdf;
pub mod params;
pub mod secret;
pub mod shamir;
pub mod wallet;

// The operations front-ends actually call, spared the module safari.
pub use codec::{bytes_to_intcodes, bytes_to_phrase, intcodes_to_bytes, phrase_to_bytes};
pub use codec::{FilledBlock, PartialBlock};
pub use error::SbkError;
pub use kdf::calibrate::{calibrate_params, kdf_params_for_duration};
pub use kdf::digest;
pub use params::{decode_params, encode_params, Parameters};
pub use secret::{BrainKey, MasterKey, RawSalt, SecretBytes, WalletSeed};
pub use shamir::{join, split, RawShare};
pub use wallet::{
    create, derive_wallet_seed, load_wallet, recover, recover_with, CreateOptions, CreatedWallet,
    EncodedBlock, RecoveredSecrets, Scheme, ShareInput,
};

/// Reed–Solomon encode: `message` → `message ‖ ecc`, twice the length.
pub use ecc::encode as ecc_encode;
/// Reed–Solomon decode from per-position knowledge.
pub use ecc::decode as ecc_decode;
