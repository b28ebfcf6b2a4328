//! # Partial-Input Recovery
//!
//! A damaged backup rarely dies all at once: a few words are smudged, a
//! couple of intcodes went unreadable, the rest is fine. This module
//! collects whatever the user *can* still read (words and intcodes in
//! any mix) into a per-position view of the block, lets the
//! Reed–Solomon decoder infer the remainder, and re-renders both
//! representations so the user can cross-check the filled-in cells
//! against their paper before trusting them.
//!
//! A mismatch between a filled-in cell and the paper means some cell the
//! user *did* enter is wrong. That is the situation the cross-check
//! exists to catch.

use crate::codec::intcode::{self, IntcodeError};
use crate::codec::mnemonic::{self, MnemonicError};
use crate::ecc;
use crate::error::SbkError;

/// An in-progress transcription of one `2L`-byte block.
#[derive(Debug, Clone)]
pub struct PartialBlock {
    cells: Vec<Option<u8>>,
}

/// A block the decoder vouches for, in every representation the user
/// might want to cross-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledBlock {
    /// The full block, message and ECC halves.
    pub bytes: Vec<u8>,
    /// One word per block byte.
    pub phrase: String,
    /// One intcode per block byte pair.
    pub intcodes: Vec<String>,
}

impl PartialBlock {
    /// An empty transcription of a block of `block_len` bytes (message
    /// plus ECC, so always even).
    pub fn new(block_len: usize) -> Self {
        PartialBlock {
            cells: vec![None; block_len],
        }
    }

    /// Record a single byte read directly.
    pub fn set_byte(&mut self, offset: usize, byte: u8) {
        if let Some(cell) = self.cells.get_mut(offset) {
            *cell = Some(byte);
        }
    }

    /// Record the word at word position `offset` (one word per byte).
    pub fn set_word(&mut self, offset: usize, word: &str) -> Result<(), MnemonicError> {
        let byte = mnemonic::word_to_byte(word)?;
        self.set_byte(offset, byte);
        Ok(())
    }

    /// Record the intcode at intcode position `pos` (two bytes per code),
    /// verifying its embedded index against that position.
    pub fn set_intcode(&mut self, pos: usize, code: &str) -> Result<(), IntcodeError> {
        let (index, b0, b1) = intcode::decode_intcode(code)?;
        let expected = (pos as u32) % crate::config::INTCODE_INDEX_MOD;
        if index != expected {
            return Err(IntcodeError::Checksum {
                pos,
                expected,
                got: index,
            });
        }
        self.set_byte(2 * pos, b0);
        self.set_byte(2 * pos + 1, b1);
        Ok(())
    }

    /// Number of positions read so far.
    pub fn known(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Per-position view for the decoder.
    pub fn cells(&self) -> &[Option<u8>] {
        &self.cells
    }

    /// Infer the unread cells and re-render the whole block.
    ///
    /// Requires at least half the block (the message length) to be known;
    /// with less there is nothing the decoder could responsibly invent.
    pub fn recover(&self) -> Result<FilledBlock, SbkError> {
        let total = self.cells.len();
        let needed = total / 2;
        let known = self.known();
        if known < needed {
            return Err(IntcodeError::InsufficientData {
                known,
                total,
                needed,
            }
            .into());
        }

        let msg = ecc::decode(&self.cells)?;
        let bytes = ecc::encode(&msg)?;
        let phrase = mnemonic::bytes_to_phrase(&bytes);
        let intcodes = intcode::bytes_to_intcodes(&bytes)?;
        Ok(FilledBlock {
            bytes,
            phrase,
            intcodes,
        })
    }
}
