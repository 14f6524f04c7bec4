//! Modes of operation. [`Mode`] is the public selector; [`Chaining`] carries the per-stream state
//! of one encrypt or decrypt call and dispatches whole runs of blocks to the ECB or CBC cores.

mod cbc;
mod ecb;
pub(crate) mod util;

use std::fmt;

use log::trace;

use crate::aestream::core::Block;

pub use cbc::{cbc_core_dec_parallel, cbc_core_dec_serial, cbc_core_enc};
pub use ecb::{ecb_core_dec_parallel, ecb_core_dec_serial, ecb_core_enc_parallel, ecb_core_enc_serial};
pub use util::PARALLEL_THRESHOLD;

/// Block cipher mode of operation, recorded as the first byte of every encrypted stream.
///
/// - **ECB** (electronic codebook) encrypts each block on its own. Identical plaintext blocks give
///   identical ciphertext blocks, so patterns in the input survive encryption.
/// - **CBC** (cipher block chaining) XORs each plaintext block with the previous ciphertext block,
///   starting from a random 16-byte IV drawn fresh for every encryption.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
pub enum Mode {
    Ecb,
    #[default]
    Cbc,
}

impl Mode {
    /// Header byte for this mode.
    pub const fn tag(self) -> u8 {
        match self {
            Mode::Ecb => 0x00,
            Mode::Cbc => 0x01,
        }
    }

    /// Inverse of [`Mode::tag`]. Unknown tags yield None.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(Mode::Ecb),
            0x01 => Some(Mode::Cbc),
            _ => None,
        }
    }

    /// Whether the header carries an IV after the tag byte.
    pub const fn uses_iv(self) -> bool {
        matches!(self, Mode::Cbc)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Ecb => f.write_str("ECB"),
            Mode::Cbc => f.write_str("CBC"),
        }
    }
}

/// Chaining state for a single stream. CBC keeps the last ciphertext block between calls so a
/// stream can be fed in batches; ECB has nothing to carry.
#[derive(Clone, Debug)]
pub(crate) enum Chaining {
    Ecb,
    Cbc { chain: Block },
}

impl Chaining {
    pub(crate) fn ecb() -> Self {
        Chaining::Ecb
    }

    pub(crate) fn cbc(iv: Block) -> Self {
        Chaining::Cbc { chain: iv }
    }

    /// Encrypts a block-aligned run. `output` must be the same length as `input`.
    pub(crate) fn encrypt(&mut self, input: &[u8], output: &mut [u8], round_keys: &[Block]) {
        match self {
            Chaining::Ecb if input.len() >= PARALLEL_THRESHOLD => {
                trace!("ECB: encrypting {} bytes in parallel", input.len());
                ecb_core_enc_parallel(input, output, round_keys);
            }
            Chaining::Ecb => ecb_core_enc_serial(input, output, round_keys),
            Chaining::Cbc { chain } => *chain = cbc_core_enc(input, output, round_keys, chain),
        }
    }

    /// Decrypts a block-aligned run. `output` must be the same length as `input`.
    pub(crate) fn decrypt(&mut self, input: &[u8], output: &mut [u8], round_keys: &[Block]) {
        let parallel = input.len() >= PARALLEL_THRESHOLD;
        if parallel {
            trace!("decrypting {} bytes in parallel", input.len());
        }

        match self {
            Chaining::Ecb if parallel => ecb_core_dec_parallel(input, output, round_keys),
            Chaining::Ecb => ecb_core_dec_serial(input, output, round_keys),
            Chaining::Cbc { chain } if parallel => {
                *chain = cbc_core_dec_parallel(input, output, round_keys, chain)
            }
            Chaining::Cbc { chain } => {
                *chain = cbc_core_dec_serial(input, output, round_keys, chain)
            }
        }
    }
}
