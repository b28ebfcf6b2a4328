//! # Human-Facing Codec
//!
//! Secrets leave this library as ink, and ink is a hostile channel:
//! handwriting decays, coffee happens, and nobody proofreads a backup
//! until the day it matters. Every block therefore travels in two
//! redundant representations of the same `message ‖ ecc` bytes:
//!
//! - **mnemonic** — one word per byte from a 256-word list built for
//!   fuzzy matching (see [`wordlist`]);
//! - **intcodes** — six-decimal-digit groups carrying two bytes each plus
//!   a positional checksum (see [`intcode`]).
//!
//! Either representation alone reconstructs the block; together with the
//! Reed–Solomon redundancy, half of everything can be lost and the
//! remainder still recovers byte-exactly ([`fill`]).

pub mod fill;
pub mod intcode;
pub mod mnemonic;
pub mod wordlist;

pub use fill::{FilledBlock, PartialBlock};
pub use intcode::{bytes_to_intcodes, intcodes_to_bytes};
pub use mnemonic::{bytes_to_phrase, phrase_to_bytes};
