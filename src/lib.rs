//! AES-128/192/256 implemented from FIPS-197, with ECB and CBC modes and a streaming codec that
//! writes `mode || IV || PKCS#7-padded blocks` and reads it back.
//!
//! Start with [Key] and [Cipher]. Both work on any [std::io::Read] / [std::io::Write] pair.

mod aestream;

pub use aestream::{
    BATCH_BLOCKS, BLOCK_SIZE, Block, Cipher, Error, Header, Key, KeySize, Mode, Options,
    PARALLEL_THRESHOLD, Result, RoundKeys,
};
