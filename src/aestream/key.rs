//! Defines the [`Key`] struct, which holds a valid AES key of 128, 192, or 256 bits.
//! Keys can be randomly generated or constructed from an existing byte slice.

use std::fmt;

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::aestream::error::{Error, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum KeyBytes {
    K128([u8; 16]),
    K192([u8; 24]),
    K256([u8; 32]),
}

/// AES variant selected by the key length.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Key length in bytes.
    pub const fn len(self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }

    /// Nk, the number of 32-bit words comprising the key.
    pub const fn words(self) -> usize {
        self.len() / 4
    }

    /// Nr, the number of rounds: 10, 12, or 14.
    pub const fn rounds(self) -> usize {
        self.words() + 6
    }

    /// Maps a key length in bytes to its variant.
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            _ => Err(Error::InvalidKeyLength { len }),
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.len() * 8)
    }
}

/// Contains a valid AES key. Can be instantiated with a random key, or built from a slice
/// of bytes that is 16, 24, or 32 bytes long.
/// A `key` object is required to instantiate a [Cipher](crate::Cipher).
///
/// ## Examples
/// ```
/// # fn main() -> aestream::Result<()> {
/// use aestream::{Key, KeySize};
///
/// let key_bytes: [u8; 32] = [0xBA, 0x32, 0x82, 0x9A, 0x43, 0x8A, 0x48, 0xED,
///                            0xC2, 0xEA, 0x10, 0x73, 0x26, 0xF8, 0xA9, 0x62,
///                            0xDE, 0x82, 0x06, 0xBA, 0x53, 0xC2, 0xC7, 0x55,
///                            0x2C, 0x72, 0xC5, 0x37, 0xBF, 0xD4, 0xDB, 0x5E];
/// let my_key_192 = Key::try_from_slice(&key_bytes[..24])?;
/// assert_eq!(my_key_192.as_bytes(), &key_bytes[..24]);
/// assert_eq!(my_key_192.size(), KeySize::Aes192);
///
/// // anything other than 16, 24, or 32 bytes is rejected
/// assert!(Key::try_from_slice(&key_bytes[..20]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    bytes: KeyBytes,
}

impl Key {
    /// Generate a random 128-bit key. Returns Error if OsRng fails.
    pub fn rand_key_128() -> Result<Self> {
        let mut k = [0u8; 16];
        OsRng.try_fill_bytes(&mut k)?;
        Ok(Self {
            bytes: KeyBytes::K128(k),
        })
    }

    /// Generate a random 192-bit key. Returns Error if OsRng fails.
    pub fn rand_key_192() -> Result<Self> {
        let mut k = [0u8; 24];
        OsRng.try_fill_bytes(&mut k)?;
        Ok(Self {
            bytes: KeyBytes::K192(k),
        })
    }

    /// Generate a random 256-bit key. Returns Error if OsRng fails.
    pub fn rand_key_256() -> Result<Self> {
        let mut k = [0u8; 32];
        OsRng.try_fill_bytes(&mut k)?;
        Ok(Self {
            bytes: KeyBytes::K256(k),
        })
    }

    /// Generate a random key of the given size.
    pub fn rand_key(size: KeySize) -> Result<Self> {
        match size {
            KeySize::Aes128 => Self::rand_key_128(),
            KeySize::Aes192 => Self::rand_key_192(),
            KeySize::Aes256 => Self::rand_key_256(),
        }
    }

    /// Attempts to build a key from a slice of bytes. Will return an InvalidKeyLength error
    /// if the input slice is anything other than 16, 24, or 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let invalid = || Error::InvalidKeyLength { len: bytes.len() };
        let bytes = match KeySize::from_len(bytes.len())? {
            KeySize::Aes128 => KeyBytes::K128(bytes.try_into().map_err(|_| invalid())?),
            KeySize::Aes192 => KeyBytes::K192(bytes.try_into().map_err(|_| invalid())?),
            KeySize::Aes256 => KeyBytes::K256(bytes.try_into().map_err(|_| invalid())?),
        };
        Ok(Self { bytes })
    }

    /// Returns a reference to the internal key as an array of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            KeyBytes::K128(k) => k,
            KeyBytes::K192(k) => k,
            KeyBytes::K256(k) => k,
        }
    }

    /// The AES variant this key selects.
    pub fn size(&self) -> KeySize {
        match self.bytes {
            KeyBytes::K128(_) => KeySize::Aes128,
            KeyBytes::K192(_) => KeySize::Aes192,
            KeyBytes::K256(_) => KeySize::Aes256,
        }
    }
}

// key material stays out of logs and panic messages
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key").field("size", &self.size()).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_lengths() -> Result<()> {
        for (len, size, rounds) in [
            (16, KeySize::Aes128, 10),
            (24, KeySize::Aes192, 12),
            (32, KeySize::Aes256, 14),
        ] {
            let bytes = vec![0xa5u8; len];
            let key = Key::try_from_slice(&bytes)?;
            assert_eq!(key.size(), size);
            assert_eq!(key.as_bytes(), bytes.as_slice());
            assert_eq!(size.rounds(), rounds);
            assert_eq!(size.words() * 4, len);
        }
        Ok(())
    }

    #[test]
    fn invalid_lengths() {
        for len in [0, 1, 15, 17, 20, 23, 25, 31, 33, 64] {
            let bytes = vec![0u8; len];
            match Key::try_from_slice(&bytes) {
                Err(Error::InvalidKeyLength { len: got }) => assert_eq!(got, len),
                other => panic!("expected InvalidKeyLength for {len} bytes, got {other:?}"),
            }
        }
    }

    #[test]
    fn random_keys() -> Result<()> {
        for size in [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256] {
            let a = Key::rand_key(size)?;
            let b = Key::rand_key(size)?;
            assert_eq!(a.size(), size);
            assert_eq!(a.as_bytes().len(), size.len());
            assert_ne!(a, b, "two random keys should not collide");
        }
        Ok(())
    }

    #[test]
    fn debug_hides_key_bytes() -> Result<()> {
        let key = Key::try_from_slice(&[0xab; 16])?;
        let shown = format!("{key:?}");
        assert!(shown.contains("Aes128"));
        assert!(!shown.contains("171"));
        Ok(())
    }
}
