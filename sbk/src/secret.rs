//! # Secret Buffers
//!
//! Typed byte buffers for the material that must never leak: the salt, the
//! brainkey, the joined master key, and derived wallet seeds. All of them
//! zeroize their heap storage on drop, none of them implement `Serialize`,
//! and their `Debug` output shows a length and nothing else.
//!
//! Serializing secrets should be a deliberate, conscious act; callers that
//! genuinely need the bytes go through `as_bytes()` and accept the
//! responsibility that comes with it.

use std::fmt;

use zeroize::Zeroizing;

/// A heap buffer that wipes itself on drop.
///
/// This is the common substrate of the typed secrets below. It exists so
/// that intermediate buffers (KDF inputs, join outputs) get the same
/// treatment as the named secrets without ceremony.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretBytes(Zeroizing<Vec<u8>>);

impl SecretBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        SecretBytes(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes({} bytes redacted)", self.0.len())
    }
}

macro_rules! secret_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(SecretBytes);

        impl $name {
            pub fn new(bytes: Vec<u8>) -> Self {
                $name(SecretBytes::new(bytes))
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({} bytes redacted)"), self.len())
            }
        }
    };
}

secret_newtype! {
    /// The written-down salt payload (without its parameter header).
    RawSalt
}

secret_newtype! {
    /// The memorized secret. Five to eight bytes the owner carries in
    /// their head, rendered as words for memorization.
    BrainKey
}

secret_newtype! {
    /// `raw_salt ‖ brainkey`: the byte string that gets split into
    /// shares and fed (with the wallet name) to the KDF.
    MasterKey
}

secret_newtype! {
    /// Output of the wallet-seed derivation. 32 bytes, rendered as hex
    /// only at the explicit request of the caller.
    WalletSeed
}

impl MasterKey {
    /// Concatenate salt and brainkey into the split/KDF input.
    pub fn compose(raw_salt: &RawSalt, brainkey: &BrainKey) -> Self {
        let mut buf = Zeroizing::new(Vec::with_capacity(raw_salt.len() + brainkey.len()));
        buf.extend_from_slice(raw_salt.as_bytes());
        buf.extend_from_slice(brainkey.as_bytes());
        MasterKey::new(buf.to_vec())
    }

    /// Split the master key back into `(raw_salt, brainkey)` at the
    /// configured salt length. Lengths are a caller concern: the wire
    /// format stores the combined payload only.
    pub fn decompose(&self, raw_salt_len: usize) -> Option<(RawSalt, BrainKey)> {
        if raw_salt_len == 0 || raw_salt_len >= self.len() {
            return None;
        }
        let bytes = self.as_bytes();
        Some((
            RawSalt::new(bytes[..raw_salt_len].to_vec()),
            BrainKey::new(bytes[raw_salt_len..].to_vec()),
        ))
    }
}

impl WalletSeed {
    /// Lowercase hex rendering, the only sanctioned way a seed leaves
    /// the process.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

/// Draw a fresh uniformly random secret of the given length.
pub fn random_secret<R: rand::RngCore + rand::CryptoRng>(len: usize, rng: &mut R) -> SecretBytes {
    let mut buf = Zeroizing::new(vec![0u8; len]);
    rng.fill_bytes(&mut buf);
    SecretBytes::new(buf.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let bk = BrainKey::new(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let dbg = format!("{:?}", bk);
        assert_eq!(dbg, "BrainKey(4 bytes redacted)");
        assert!(!dbg.contains("222")); // 0xDE
    }

    #[test]
    fn compose_then_decompose_round_trips() {
        let salt = RawSalt::new(vec![1, 2, 3, 4, 5, 6, 7]);
        let bk = BrainKey::new(vec![8, 9, 10, 11, 12, 13]);
        let master = MasterKey::compose(&salt, &bk);
        assert_eq!(master.len(), 13);

        let (salt2, bk2) = master.decompose(7).unwrap();
        assert_eq!(salt2.as_bytes(), salt.as_bytes());
        assert_eq!(bk2.as_bytes(), bk.as_bytes());
    }

    #[test]
    fn decompose_rejects_degenerate_splits() {
        let master = MasterKey::new(vec![0; 8]);
        assert!(master.decompose(0).is_none());
        assert!(master.decompose(8).is_none());
        assert!(master.decompose(9).is_none());
    }

    #[test]
    fn seed_hex_is_lowercase() {
        let seed = WalletSeed::new(vec![0xAB, 0xCD]);
        assert_eq!(seed.to_hex(), "abcd");
    }
}
