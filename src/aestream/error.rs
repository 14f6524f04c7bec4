use rand::rand_core;
use thiserror::Error;

/// AES Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// AES Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attempted to instantiate an AES key with an input size that is not 128, 192, or 256 bits.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength { len: usize },

    /// Ciphertext did not match the stream format: bad header, a body that is not a positive
    /// multiple of 16 bytes, or PKCS#7 padding that failed validation.
    #[error("malformed ciphertext: {len} bytes ({context})")]
    MalformedCiphertext { len: usize, context: &'static str },

    /// Encryption without padding was asked for, but the input is not block aligned.
    #[error("plaintext of {len} bytes is not a multiple of 16 and padding is disabled")]
    UnalignedPlaintext { len: u64 },

    /// The requested combination of stream options cannot be encoded.
    #[error("invalid stream options: {context}")]
    InvalidOptions { context: &'static str },

    /// Reading from or writing to a caller-supplied stream failed.
    #[error("stream I/O failed")]
    Io(#[from] std::io::Error),

    /// OS RNG failed during random key or IV generation.
    #[error("OS RNG failed in random key or IV generation")]
    Rng(#[from] rand_core::OsError),
}
