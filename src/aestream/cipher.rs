use std::io::{Cursor, Read, Write};

use log::trace;

use crate::aestream::core::{Block, decrypt_block, encrypt_block};
use crate::aestream::error::Result;
use crate::aestream::key::Key;
use crate::aestream::modes::Mode;
use crate::aestream::schedule::RoundKeys;
use crate::aestream::stream::{Options, decrypt_stream, encrypt_stream};

/// Provides stream encryption and decryption in modes [ECB](crate::Mode::Ecb) and
/// [CBC](crate::Mode::Cbc). Instantiated with an AES [Key], which is expanded into round keys
/// and stored in the instance.
///
/// Encrypted streams are laid out as `mode (1 byte) || IV (16 bytes, CBC only) || blocks`, with the
/// plaintext PKCS#7 padded to a whole number of blocks.
///
/// ## Examples
/// ```
/// # fn main() -> aestream::Result<()> {
/// use aestream::{Cipher, Key, Mode};
///
/// let cipher = Cipher::new(&Key::rand_key_256()?);
///
/// let mut ciphertext = Vec::new();
/// cipher.encrypt(&mut &b"Hello, World!"[..], &mut ciphertext, Mode::Cbc)?;
///
/// let mut plaintext = Vec::new();
/// cipher.decrypt(&mut ciphertext.as_slice(), &mut plaintext)?;
/// assert_eq!(plaintext, b"Hello, World!");
/// # Ok(())
/// # }
/// ```
pub struct Cipher {
    round_keys: RoundKeys,
}

impl Cipher {
    /// Generates round keys from provided key and stores in the returned instance.
    pub fn new(key: &Key) -> Self {
        let round_keys = RoundKeys::expand(key);
        trace!("expanded {} round keys for {}", round_keys.as_slice().len(), key.size());
        Self { round_keys }
    }

    /// Builds a cipher straight from raw key bytes. Fails with
    /// [InvalidKeyLength](crate::Error::InvalidKeyLength) unless there are 16, 24, or 32 of them.
    pub fn try_from_key_bytes(key: &[u8]) -> Result<Self> {
        Ok(Self::new(&Key::try_from_slice(key)?))
    }

    /// Getter for internal round keys. Returned as a slice of 16-byte arrays.
    pub fn get_round_keys(&self) -> &[Block] {
        self.round_keys.as_slice()
    }

    /// Number of rounds: 10, 12, or 14.
    pub fn rounds(&self) -> usize {
        self.round_keys.rounds()
    }

    /// Encrypts a single raw block, no mode, header, or padding.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(block, self.round_keys.as_slice())
    }

    /// Decrypts a single raw block, no mode, header, or padding.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(block, self.round_keys.as_slice())
    }

    /// Encrypts all of `input` into `output` under `mode`, writing the header first.
    ///
    /// CBC draws a fresh random IV from the OS for every call. Returns the number of plaintext
    /// bytes consumed.
    pub fn encrypt<R, W>(&self, input: &mut R, output: &mut W, mode: Mode) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        self.encrypt_with(input, output, mode, Options::default())
    }

    /// [encrypt](Cipher::encrypt) with explicit framing [Options].
    pub fn encrypt_with<R, W>(
        &self,
        input: &mut R,
        output: &mut W,
        mode: Mode,
        options: Options,
    ) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        encrypt_stream(input, output, &self.round_keys, mode, options)
    }

    /// Decrypts a stream produced by [encrypt](Cipher::encrypt). The mode and IV come from the
    /// header.
    ///
    /// Returns:
    /// - the number of plaintext bytes written, if decryption was successful.
    /// - [MalformedCiphertext](crate::Error::MalformedCiphertext) if the header is bad, the body
    ///   is not a positive multiple of 16 bytes, or the padding does not validate. Nothing is
    ///   written to `output` in that case.
    /// - [Io](crate::Error::Io) if either stream fails.
    pub fn decrypt<R, W>(&self, input: &mut R, output: &mut W) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        self.decrypt_with(input, output, Options::default())
    }

    /// [decrypt](Cipher::decrypt) with explicit framing [Options].
    pub fn decrypt_with<R, W>(&self, input: &mut R, output: &mut W, options: Options) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        decrypt_stream(input, output, &self.round_keys, options)
    }

    /// In-memory [encrypt](Cipher::encrypt).
    pub fn encrypt_to_vec(&self, plaintext: &[u8], mode: Mode) -> Result<Vec<u8>> {
        let mut ciphertext = Vec::with_capacity(plaintext.len() + 33);
        self.encrypt(&mut Cursor::new(plaintext), &mut ciphertext, mode)?;
        Ok(ciphertext)
    }

    /// In-memory [decrypt](Cipher::decrypt).
    pub fn decrypt_to_vec(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut plaintext = Vec::with_capacity(ciphertext.len());
        self.decrypt(&mut Cursor::new(ciphertext), &mut plaintext)?;
        Ok(plaintext)
    }
}
