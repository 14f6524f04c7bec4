use rayon::prelude::*;

use crate::aestream::core::{BLOCK_SIZE, Block, decrypt_block, encrypt_block};
use crate::aestream::util::xor_blocks;

/// Core CBC encryption algorithm. Each plaintext block is XOR'd with the previous ciphertext
/// block (the IV for the first) before encryption. Inherently sequential.
///
/// Returns the last ciphertext block, which chains into the next call.
pub fn cbc_core_enc(input: &[u8], output: &mut [u8], round_keys: &[Block], iv: &Block) -> Block {
    debug_assert_eq!(input.len(), output.len());
    debug_assert_eq!(input.len() % BLOCK_SIZE, 0);

    let mut chain = *iv;
    for (pt, ct) in input
        .chunks_exact(BLOCK_SIZE)
        .zip(output.chunks_exact_mut(BLOCK_SIZE))
    {
        let pt_block: &Block = pt.try_into().unwrap(); // safe unwrap, loop guarantees exact chunks 16
        chain = encrypt_block(&xor_blocks(pt_block, &chain), round_keys);
        ct.copy_from_slice(&chain);
    }
    chain
}

/// Core CBC decryption algorithm, one block at a time.
///
/// Returns the last ciphertext block, which chains into the next call.
pub fn cbc_core_dec_serial(
    input: &[u8],
    output: &mut [u8],
    round_keys: &[Block],
    iv: &Block,
) -> Block {
    debug_assert_eq!(input.len(), output.len());
    debug_assert_eq!(input.len() % BLOCK_SIZE, 0);

    let mut chain = *iv;
    for (ct, pt) in input
        .chunks_exact(BLOCK_SIZE)
        .zip(output.chunks_exact_mut(BLOCK_SIZE))
    {
        let ct_block: &Block = ct.try_into().unwrap(); // safe unwrap, loop guarantees exact chunks 16
        pt.copy_from_slice(&xor_blocks(&decrypt_block(ct_block, round_keys), &chain));
        chain = *ct_block;
    }
    chain
}

/// CBC decryption across the rayon pool. Block `i` only needs ciphertext blocks `i` and `i - 1`,
/// both already in hand, so there is no dependency between workers.
pub fn cbc_core_dec_parallel(
    input: &[u8],
    output: &mut [u8],
    round_keys: &[Block],
    iv: &Block,
) -> Block {
    debug_assert_eq!(input.len(), output.len());
    debug_assert_eq!(input.len() % BLOCK_SIZE, 0);

    output
        .par_chunks_exact_mut(BLOCK_SIZE)
        .enumerate()
        .for_each(|(i, pt)| {
            let start = i * BLOCK_SIZE;
            let ct_block: &Block = input[start..start + BLOCK_SIZE].try_into().unwrap();
            let prev: &Block = if i == 0 {
                iv
            } else {
                input[start - BLOCK_SIZE..start].try_into().unwrap()
            };
            pt.copy_from_slice(&xor_blocks(&decrypt_block(ct_block, round_keys), prev));
        });

    match input.len().checked_sub(BLOCK_SIZE) {
        Some(last) => input[last..].try_into().unwrap(),
        None => *iv,
    }
}
