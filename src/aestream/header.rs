//! Stream header: one mode byte, followed by the 16-byte IV when the mode is CBC.

use std::io::{Read, Write};

use crate::aestream::core::{BLOCK_SIZE, Block};
use crate::aestream::error::{Error, Result};
use crate::aestream::modes::{Chaining, Mode};
use crate::aestream::util::{random_iv, read_full};

/// Decoded stream header. Constructed with a fresh random IV on encryption, or parsed from the
/// front of a ciphertext stream on decryption.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Header {
    mode: Mode,
    iv: Option<Block>,
}

impl Header {
    /// Header for an ECB stream.
    pub const fn ecb() -> Self {
        Self {
            mode: Mode::Ecb,
            iv: None,
        }
    }

    /// Draws a header for a new encryption. CBC gets a fresh IV from the OS RNG; there is no
    /// way to supply one.
    pub fn generate(mode: Mode) -> Result<Self> {
        Ok(match mode {
            Mode::Ecb => Self::ecb(),
            Mode::Cbc => Self {
                mode,
                iv: Some(random_iv()?),
            },
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn iv(&self) -> Option<&Block> {
        self.iv.as_ref()
    }

    /// Serialized size: 1 byte, or 17 with an IV.
    pub fn encoded_len(&self) -> usize {
        1 + self.iv.map_or(0, |iv| iv.len())
    }

    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[self.mode.tag()])?;
        if let Some(iv) = &self.iv {
            writer.write_all(iv)?;
        }
        Ok(())
    }

    /// Reads the header from the front of `reader`, leaving it positioned at the first block.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut tag = [0u8; 1];
        if read_full(reader, &mut tag)? == 0 {
            return Err(Error::MalformedCiphertext {
                len: 0,
                context: "header: missing mode byte",
            });
        }

        let mode = Mode::from_tag(tag[0]).ok_or(Error::MalformedCiphertext {
            len: 1,
            context: "header: unknown mode byte",
        })?;

        let iv = if mode.uses_iv() {
            let mut iv = [0u8; BLOCK_SIZE];
            let n = read_full(reader, &mut iv)?;
            if n != BLOCK_SIZE {
                return Err(Error::MalformedCiphertext {
                    len: 1 + n,
                    context: "header: truncated IV",
                });
            }
            Some(iv)
        } else {
            None
        };

        Ok(Self { mode, iv })
    }

    /// Chaining state primed with this header's IV.
    pub(crate) fn chaining(&self) -> Chaining {
        match self.iv {
            Some(iv) => Chaining::cbc(iv),
            None => Chaining::ecb(),
        }
    }
}
