//! # Mnemonic Codec
//!
//! One word per byte, straight through the wordlist. Encoding cannot
//! fail; decoding is where the humanity happens. Phrases come back from
//! paper with transposed letters, missing letters, and whatever the pen
//! did. So word lookup is fuzzy: an exact match wins immediately, a
//! bare 3-letter input resolves through the unique-prefix property, and
//! anything else falls back to the closest word by Damerau–Levenshtein
//! distance, provided it is unambiguous and closer than the wordlist's
//! own minimum distance of 4.
//!
//! A tie between two candidates means the input is garbled beyond safe
//! guessing and surfaces as [`MnemonicError::AmbiguousWord`]; guessing
//! wrong here would silently reconstruct the wrong secret, which is the
//! one thing this codec must never do.

use thiserror::Error;

use super::wordlist::WORDS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    /// No wordlist entry is close enough to the input.
    #[error("unknown word '{word}'")]
    UnknownWord { word: String },

    /// Two wordlist entries are equally close to the input.
    #[error("ambiguous word '{word}' (equally close to '{a}' and '{b}')")]
    AmbiguousWord { word: String, a: String, b: String },

    /// Word count differs from the expected byte count.
    #[error("expected {expected} words, got {got}")]
    BadLength { expected: usize, got: usize },
}

/// Render bytes as a space-separated phrase, one word per byte.
pub fn bytes_to_phrase(data: &[u8]) -> String {
    data.iter()
        .map(|&b| WORDS[b as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a phrase back into exactly `expected_len` bytes.
pub fn phrase_to_bytes(phrase: &str, expected_len: usize) -> Result<Vec<u8>, MnemonicError> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() != expected_len {
        return Err(MnemonicError::BadLength {
            expected: expected_len,
            got: words.len(),
        });
    }
    words.iter().map(|w| word_to_byte(w)).collect()
}

/// Resolve a single (possibly misspelled) word to its byte value.
pub fn word_to_byte(word: &str) -> Result<u8, MnemonicError> {
    let needle = word.trim().to_ascii_lowercase();

    // Exact match first (the list is sorted), then the deliberate
    // 3-letter abbreviation. Anything longer that isn't an exact word is
    // a transcription and goes through the fuzzy scan, where ties can be
    // detected.
    if let Ok(i) = WORDS.binary_search(&needle.as_str()) {
        return Ok(i as u8);
    }
    if needle.len() == 3 {
        if let Some(i) = WORDS.iter().position(|w| w.starts_with(needle.as_str())) {
            return Ok(i as u8);
        }
    }

    // Fuzzy scan of all 256 words, tracking best and runner-up.
    let mut best = (usize::MAX, 0usize);
    let mut second = (usize::MAX, 0usize);
    for (i, w) in WORDS.iter().enumerate() {
        let d = damerau_levenshtein(&needle, w);
        if d < best.0 {
            second = best;
            best = (d, i);
        } else if d < second.0 {
            second = (d, i);
        }
    }

    if best.0 >= 4 {
        return Err(MnemonicError::UnknownWord { word: needle });
    }
    if second.0 == best.0 {
        return Err(MnemonicError::AmbiguousWord {
            word: needle,
            a: WORDS[best.1].to_string(),
            b: WORDS[second.1].to_string(),
        });
    }
    Ok(best.1 as u8)
}

/// Damerau–Levenshtein distance (optimal string alignment): insertions,
/// deletions, substitutions, and transposition of adjacent characters.
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<u8> = a.bytes().collect();
    let b: Vec<u8> = b.bytes().collect();
    let (la, lb) = (a.len(), b.len());

    let mut d = vec![vec![0usize; lb + 1]; la + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=lb {
        d[0][j] = j;
    }

    for i in 1..=la {
        for j in 1..=lb {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (d[i - 1][j] + 1).min(d[i][j - 1] + 1).min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(d[i - 2][j - 2] + cost);
            }
            d[i][j] = best;
        }
    }
    d[la][lb]
}
