//! Core AES implementation for encryption and decryption of a 16 byte block. Exports encrypt_block and decrypt_block.

pub mod constants;
mod decryption;
mod encryption;
mod util;

pub use decryption::decrypt_block;
pub use encryption::encrypt_block;

/// AES block size in bytes, for every key size.
pub const BLOCK_SIZE: usize = 16;

/// A single 16-byte block, stored column-major: bytes 0..4 are column 0, 4..8 column 1, and so on.
pub type Block = [u8; BLOCK_SIZE];
