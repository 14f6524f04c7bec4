use super::Block;
use super::constants::{GMUL9, GMUL11, GMUL13, GMUL14, SBOX_INV};
use super::util::add_round_key;

/// Core AES decryption function. Applies the inverse round pipeline, consuming the round keys
/// from last to first.
#[inline(always)]
pub fn decrypt_block(ciphertext: &Block, round_keys: &[Block]) -> Block {
    let mut state = *ciphertext;
    let last_key_idx = round_keys.len() - 1;

    add_round_key(&mut state, &round_keys[last_key_idx]);

    for round_key in round_keys[1..last_key_idx].iter().rev() {
        shift_rows_inv(&mut state);
        sub_bytes_inv(&mut state);
        add_round_key(&mut state, round_key);
        mix_columns_inv(&mut state);
    }

    shift_rows_inv(&mut state);
    sub_bytes_inv(&mut state);
    add_round_key(&mut state, &round_keys[0]);

    state
}

#[inline(always)]
pub(crate) fn sub_bytes_inv(state: &mut Block) {
    for byte in state {
        *byte = SBOX_INV[*byte as usize];
    }
}

/// Row `r` rotates right by `r` positions.
#[inline(always)]
pub(crate) fn shift_rows_inv(state: &mut Block) {
    let s = *state;
    for row in 1..4 {
        for col in 0..4 {
            let old_idx = ((col + 4 - row) & 3) * 4 + row;
            state[col * 4 + row] = s[old_idx];
        }
    }
}

/// InvMixColumns step, the inverse matrix of [mix_columns](super::encryption::mix_columns).
/// [ 14 11 13  9 ]
/// |  9 14 11 13 |
/// | 13  9 14 11 |
/// [ 11 13  9 14 ]
#[inline(always)]
pub(crate) fn mix_columns_inv(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        let (a, b, c, d) = (
            col[0] as usize,
            col[1] as usize,
            col[2] as usize,
            col[3] as usize,
        );
        col[0] = GMUL14[a] ^ GMUL11[b] ^ GMUL13[c] ^ GMUL9[d];
        col[1] = GMUL9[a] ^ GMUL14[b] ^ GMUL11[c] ^ GMUL13[d];
        col[2] = GMUL13[a] ^ GMUL9[b] ^ GMUL14[c] ^ GMUL11[d];
        col[3] = GMUL11[a] ^ GMUL13[b] ^ GMUL9[c] ^ GMUL14[d];
    }
}
