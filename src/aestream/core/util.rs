use super::Block;

// used for both encryption and decryption
#[inline(always)]
pub(crate) fn add_round_key(state: &mut Block, round_key: &Block) {
    for (byte, k) in state.iter_mut().zip(round_key) {
        *byte ^= k;
    }
}
