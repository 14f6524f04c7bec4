use rayon::prelude::*;

use crate::aestream::core::{BLOCK_SIZE, Block, decrypt_block, encrypt_block};

// Both directions take block-aligned input and an output buffer of the same length.

/// Core ECB encryption algorithm. Encrypts each 16-byte block independently.
pub fn ecb_core_enc_serial(input: &[u8], output: &mut [u8], round_keys: &[Block]) {
    debug_assert_eq!(input.len(), output.len());
    debug_assert_eq!(input.len() % BLOCK_SIZE, 0);

    for (pt, ct) in input
        .chunks_exact(BLOCK_SIZE)
        .zip(output.chunks_exact_mut(BLOCK_SIZE))
    {
        let pt_block: &Block = pt.try_into().unwrap(); // safe unwrap, loop guarantees exact chunks 16
        ct.copy_from_slice(&encrypt_block(pt_block, round_keys));
    }
}

/// ECB encryption across the rayon pool. Output order matches input order.
pub fn ecb_core_enc_parallel(input: &[u8], output: &mut [u8], round_keys: &[Block]) {
    debug_assert_eq!(input.len(), output.len());
    debug_assert_eq!(input.len() % BLOCK_SIZE, 0);

    output
        .par_chunks_exact_mut(BLOCK_SIZE)
        .zip(input.par_chunks_exact(BLOCK_SIZE))
        .for_each(|(ct, pt)| {
            let pt_block: &Block = pt.try_into().unwrap();
            ct.copy_from_slice(&encrypt_block(pt_block, round_keys));
        });
}

/// Core ECB decryption algorithm. Decrypts each 16-byte block independently.
pub fn ecb_core_dec_serial(input: &[u8], output: &mut [u8], round_keys: &[Block]) {
    debug_assert_eq!(input.len(), output.len());
    debug_assert_eq!(input.len() % BLOCK_SIZE, 0);

    for (ct, pt) in input
        .chunks_exact(BLOCK_SIZE)
        .zip(output.chunks_exact_mut(BLOCK_SIZE))
    {
        let ct_block: &Block = ct.try_into().unwrap(); // safe unwrap, loop guarantees exact chunks 16
        pt.copy_from_slice(&decrypt_block(ct_block, round_keys));
    }
}

/// ECB decryption across the rayon pool. Output order matches input order.
pub fn ecb_core_dec_parallel(input: &[u8], output: &mut [u8], round_keys: &[Block]) {
    debug_assert_eq!(input.len(), output.len());
    debug_assert_eq!(input.len() % BLOCK_SIZE, 0);

    output
        .par_chunks_exact_mut(BLOCK_SIZE)
        .zip(input.par_chunks_exact(BLOCK_SIZE))
        .for_each(|(pt, ct)| {
            let ct_block: &Block = ct.try_into().unwrap();
            pt.copy_from_slice(&decrypt_block(ct_block, round_keys));
        });
}
