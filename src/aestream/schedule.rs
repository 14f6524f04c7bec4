//! AES key schedule (FIPS-197 section 5.2).

use crate::aestream::core::Block;
use crate::aestream::core::constants::{RCON, SBOX};
use crate::aestream::key::Key;
use crate::aestream::util::xor_words;

/// The expanded key: one 16-byte round key per round plus the initial whitening key, so 11, 13,
/// or 15 blocks for AES-128, AES-192, and AES-256. Never modified after expansion.
#[derive(Clone, PartialEq, Eq)]
pub struct RoundKeys {
    keys: Vec<Block>,
}

impl RoundKeys {
    /// Runs the key schedule over `key`.
    pub fn expand(key: &Key) -> Self {
        let key = key.as_bytes();

        // Variable names match FIPS-197, NIST specification: https://doi.org/10.6028/NIST.FIPS.197-upd1
        // Nk   The number of 32-bit words comprising the key
        // Nr   The number of rounds. 10, 12, and 14 for AES-128, AES-192, and AES-256, respectively
        // w    The result of the key schedule, an array of words that form round keys
        // Nw   The total number of words generated by the key schedule (including initial key)
        let nk = key.len() / 4;
        let nr = nk + 6;
        let nw = (nr + 1) * 4;

        let mut w: Vec<[u8; 4]> = vec![[0u8; 4]; nw];

        // first nk words of w are filled with the initial key
        for (i, byte) in key.iter().enumerate() {
            w[i / 4][i % 4] = *byte;
        }

        for i in nk..nw {
            let mut temp = w[i - 1];
            if i % nk == 0 {
                // rot_word, then sub_word, then rcon on the leading byte
                temp = [
                    SBOX[temp[1] as usize] ^ RCON[i / nk - 1],
                    SBOX[temp[2] as usize],
                    SBOX[temp[3] as usize],
                    SBOX[temp[0] as usize],
                ];
            } else if nk == 8 && i % nk == 4 {
                // additional substitution on temp for AES-256 only
                temp = [
                    SBOX[temp[0] as usize],
                    SBOX[temp[1] as usize],
                    SBOX[temp[2] as usize],
                    SBOX[temp[3] as usize],
                ];
            }

            // w[i] = temp ⊕ w[i − Nk]
            w[i] = xor_words(&temp, &w[i - nk]);
        }

        // every 4 consecutive words form one column-major round key
        let keys = w
            .chunks_exact(4)
            .map(|words| {
                let mut round_key = [0u8; 16];
                for (col, word) in words.iter().enumerate() {
                    round_key[col * 4..col * 4 + 4].copy_from_slice(word);
                }
                round_key
            })
            .collect();

        Self { keys }
    }

    /// All round keys, initial key first.
    pub fn as_slice(&self) -> &[Block] {
        &self.keys
    }

    /// Nr, the number of cipher rounds these keys drive. There are always Nr + 1 round keys.
    pub fn rounds(&self) -> usize {
        self.keys.len() - 1
    }

    /// Round key for `round` (0 is the initial key), or None past the last round.
    pub fn get(&self, round: usize) -> Option<&Block> {
        self.keys.get(round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aestream::error::Result;

    fn schedule(key: &[u8]) -> Result<RoundKeys> {
        Ok(RoundKeys::expand(&Key::try_from_slice(key)?))
    }

    fn assert_schedule(key: &[u8], expected: &[Block]) -> Result<()> {
        let round_keys = schedule(key)?;
        assert_eq!(round_keys.as_slice().len(), expected.len());
        for (round, (actual, expected)) in round_keys.as_slice().iter().zip(expected).enumerate() {
            assert_eq!(actual, expected, "round key {round} does not match");
        }
        Ok(())
    }

    #[test]
    fn key_schedule_zero_key() -> Result<()> {
        assert_schedule(
            &[0x00; 16],
            &[
                [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
                [0x62, 0x63, 0x63, 0x63, 0x62, 0x63, 0x63, 0x63, 0x62, 0x63, 0x63, 0x63, 0x62, 0x63, 0x63, 0x63],
                [0x9b, 0x98, 0x98, 0xc9, 0xf9, 0xfb, 0xfb, 0xaa, 0x9b, 0x98, 0x98, 0xc9, 0xf9, 0xfb, 0xfb, 0xaa],
                [0x90, 0x97, 0x34, 0x50, 0x69, 0x6c, 0xcf, 0xfa, 0xf2, 0xf4, 0x57, 0x33, 0x0b, 0x0f, 0xac, 0x99],
                [0xee, 0x06, 0xda, 0x7b, 0x87, 0x6a, 0x15, 0x81, 0x75, 0x9e, 0x42, 0xb2, 0x7e, 0x91, 0xee, 0x2b],
                [0x7f, 0x2e, 0x2b, 0x88, 0xf8, 0x44, 0x3e, 0x09, 0x8d, 0xda, 0x7c, 0xbb, 0xf3, 0x4b, 0x92, 0x90],
                [0xec, 0x61, 0x4b, 0x85, 0x14, 0x25, 0x75, 0x8c, 0x99, 0xff, 0x09, 0x37, 0x6a, 0xb4, 0x9b, 0xa7],
                [0x21, 0x75, 0x17, 0x87, 0x35, 0x50, 0x62, 0x0b, 0xac, 0xaf, 0x6b, 0x3c, 0xc6, 0x1b, 0xf0, 0x9b],
                [0x0e, 0xf9, 0x03, 0x33, 0x3b, 0xa9, 0x61, 0x38, 0x97, 0x06, 0x0a, 0x04, 0x51, 0x1d, 0xfa, 0x9f],
                [0xb1, 0xd4, 0xd8, 0xe2, 0x8a, 0x7d, 0xb9, 0xda, 0x1d, 0x7b, 0xb3, 0xde, 0x4c, 0x66, 0x49, 0x41],
                [0xb4, 0xef, 0x5b, 0xcb, 0x3e, 0x92, 0xe2, 0x11, 0x23, 0xe9, 0x51, 0xcf, 0x6f, 0x8f, 0x18, 0x8e],
            ],
        )
    }

    #[test]
    fn key_schedule_ones_key() -> Result<()> {
        assert_schedule(
            &[0xff; 16],
            &[
                [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
                [0xe8, 0xe9, 0xe9, 0xe9, 0x17, 0x16, 0x16, 0x16, 0xe8, 0xe9, 0xe9, 0xe9, 0x17, 0x16, 0x16, 0x16],
                [0xad, 0xae, 0xae, 0x19, 0xba, 0xb8, 0xb8, 0x0f, 0x52, 0x51, 0x51, 0xe6, 0x45, 0x47, 0x47, 0xf0],
                [0x09, 0x0e, 0x22, 0x77, 0xb3, 0xb6, 0x9a, 0x78, 0xe1, 0xe7, 0xcb, 0x9e, 0xa4, 0xa0, 0x8c, 0x6e],
                [0xe1, 0x6a, 0xbd, 0x3e, 0x52, 0xdc, 0x27, 0x46, 0xb3, 0x3b, 0xec, 0xd8, 0x17, 0x9b, 0x60, 0xb6],
                [0xe5, 0xba, 0xf3, 0xce, 0xb7, 0x66, 0xd4, 0x88, 0x04, 0x5d, 0x38, 0x50, 0x13, 0xc6, 0x58, 0xe6],
                [0x71, 0xd0, 0x7d, 0xb3, 0xc6, 0xb6, 0xa9, 0x3b, 0xc2, 0xeb, 0x91, 0x6b, 0xd1, 0x2d, 0xc9, 0x8d],
                [0xe9, 0x0d, 0x20, 0x8d, 0x2f, 0xbb, 0x89, 0xb6, 0xed, 0x50, 0x18, 0xdd, 0x3c, 0x7d, 0xd1, 0x50],
                [0x96, 0x33, 0x73, 0x66, 0xb9, 0x88, 0xfa, 0xd0, 0x54, 0xd8, 0xe2, 0x0d, 0x68, 0xa5, 0x33, 0x5d],
                [0x8b, 0xf0, 0x3f, 0x23, 0x32, 0x78, 0xc5, 0xf3, 0x66, 0xa0, 0x27, 0xfe, 0x0e, 0x05, 0x14, 0xa3],
                [0xd6, 0x0a, 0x35, 0x88, 0xe4, 0x72, 0xf0, 0x7b, 0x82, 0xd2, 0xd7, 0x85, 0x8c, 0xd7, 0xc3, 0x26],
            ],
        )
    }

    #[test]
    fn key_schedule_sequential_key() -> Result<()> {
        let key: Vec<u8> = (0x00..0x10).collect();
        assert_schedule(
            &key,
            &[
                [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f],
                [0xd6, 0xaa, 0x74, 0xfd, 0xd2, 0xaf, 0x72, 0xfa, 0xda, 0xa6, 0x78, 0xf1, 0xd6, 0xab, 0x76, 0xfe],
                [0xb6, 0x92, 0xcf, 0x0b, 0x64, 0x3d, 0xbd, 0xf1, 0xbe, 0x9b, 0xc5, 0x00, 0x68, 0x30, 0xb3, 0xfe],
                [0xb6, 0xff, 0x74, 0x4e, 0xd2, 0xc2, 0xc9, 0xbf, 0x6c, 0x59, 0x0c, 0xbf, 0x04, 0x69, 0xbf, 0x41],
                [0x47, 0xf7, 0xf7, 0xbc, 0x95, 0x35, 0x3e, 0x03, 0xf9, 0x6c, 0x32, 0xbc, 0xfd, 0x05, 0x8d, 0xfd],
                [0x3c, 0xaa, 0xa3, 0xe8, 0xa9, 0x9f, 0x9d, 0xeb, 0x50, 0xf3, 0xaf, 0x57, 0xad, 0xf6, 0x22, 0xaa],
                [0x5e, 0x39, 0x0f, 0x7d, 0xf7, 0xa6, 0x92, 0x96, 0xa7, 0x55, 0x3d, 0xc1, 0x0a, 0xa3, 0x1f, 0x6b],
                [0x14, 0xf9, 0x70, 0x1a, 0xe3, 0x5f, 0xe2, 0x8c, 0x44, 0x0a, 0xdf, 0x4d, 0x4e, 0xa9, 0xc0, 0x26],
                [0x47, 0x43, 0x87, 0x35, 0xa4, 0x1c, 0x65, 0xb9, 0xe0, 0x16, 0xba, 0xf4, 0xae, 0xbf, 0x7a, 0xd2],
                [0x54, 0x99, 0x32, 0xd1, 0xf0, 0x85, 0x57, 0x68, 0x10, 0x93, 0xed, 0x9c, 0xbe, 0x2c, 0x97, 0x4e],
                [0x13, 0x11, 0x1d, 0x7f, 0xe3, 0x94, 0x4a, 0x17, 0xf3, 0x07, 0xa7, 0x8b, 0x4d, 0x2b, 0x30, 0xc5],
            ],
        )
    }

    #[test]
    fn key_schedule_ascii_key() -> Result<()> {
        // "I ♥ RadioGatun" as UTF-8
        assert_schedule(
            &[
                0x49, 0x20, 0xe2, 0x99, 0xa5, 0x20, 0x52, 0x61, //
                0x64, 0x69, 0x6f, 0x47, 0x61, 0x74, 0x75, 0x6e, //
            ],
            &[
                [0x49, 0x20, 0xe2, 0x99, 0xa5, 0x20, 0x52, 0x61, 0x64, 0x69, 0x6f, 0x47, 0x61, 0x74, 0x75, 0x6e],
                [0xda, 0xbd, 0x7d, 0x76, 0x7f, 0x9d, 0x2f, 0x17, 0x1b, 0xf4, 0x40, 0x50, 0x7a, 0x80, 0x35, 0x3e],
                [0x15, 0x2b, 0xcf, 0xac, 0x6a, 0xb6, 0xe0, 0xbb, 0x71, 0x42, 0xa0, 0xeb, 0x0b, 0xc2, 0x95, 0xd5],
                [0x34, 0x01, 0xcc, 0x87, 0x5e, 0xb7, 0x2c, 0x3c, 0x2f, 0xf5, 0x8c, 0xd7, 0x24, 0x37, 0x19, 0x02],
                [0xa6, 0xd5, 0xbb, 0xb1, 0xf8, 0x62, 0x97, 0x8d, 0xd7, 0x97, 0x1b, 0x5a, 0xf3, 0xa0, 0x02, 0x58],
                [0x56, 0xa2, 0xd1, 0xbc, 0xae, 0xc0, 0x46, 0x31, 0x79, 0x57, 0x5d, 0x6b, 0x8a, 0xf7, 0x5f, 0x33],
                [0x1e, 0x6d, 0x12, 0xc2, 0xb0, 0xad, 0x54, 0xf3, 0xc9, 0xfa, 0x09, 0x98, 0x43, 0x0d, 0x56, 0xab],
                [0x89, 0xdc, 0x70, 0xd8, 0x39, 0x71, 0x24, 0x2b, 0xf0, 0x8b, 0x2d, 0xb3, 0xb3, 0x86, 0x7b, 0x18],
                [0x4d, 0xfd, 0xdd, 0xb5, 0x74, 0x8c, 0xf9, 0x9e, 0x84, 0x07, 0xd4, 0x2d, 0x37, 0x81, 0xaf, 0x35],
                [0x5a, 0x84, 0x4b, 0x2f, 0x2e, 0x08, 0xb2, 0xb1, 0xaa, 0x0f, 0x66, 0x9c, 0x9d, 0x8e, 0xc9, 0xa9],
                [0x75, 0x59, 0x98, 0x71, 0x5b, 0x51, 0x2a, 0xc0, 0xf1, 0x5e, 0x4c, 0x5c, 0x6c, 0xd0, 0x85, 0xf5],
            ],
        )
    }

    #[test]
    fn key_schedule_128() -> Result<()> {
        // run key schedule on 128 bit sample key from FIPS-197 Appendix A.1
        let round_keys = schedule(&[
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ])?;

        // compare with last round key of sample schedule in A.1
        let expected: Block = [
            0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6, 0x63,
            0x0c, 0xa6,
        ];

        assert_eq!(round_keys.rounds(), 10);
        assert_eq!(round_keys.get(10), Some(&expected));
        assert_eq!(round_keys.get(11), None);
        Ok(())
    }

    #[test]
    fn key_schedule_192() -> Result<()> {
        // run key schedule on 192 bit sample key from FIPS-197 Appendix A.2
        let round_keys = schedule(&[
            0x8e, 0x73, 0xb0, 0xf7, 0xda, 0x0e, 0x64, 0x52, 0xc8, 0x10, 0xf3, 0x2b, 0x80, 0x90,
            0x79, 0xe5, 0x62, 0xf8, 0xea, 0xd2, 0x52, 0x2c, 0x6b, 0x7b,
        ])?;

        // compare with last round key of sample schedule in A.2
        let expected: Block = [
            0xe9, 0x8b, 0xa0, 0x6f, 0x44, 0x8c, 0x77, 0x3c, 0x8e, 0xcc, 0x72, 0x04, 0x01, 0x00,
            0x22, 0x02,
        ];

        assert_eq!(round_keys.rounds(), 12);
        assert_eq!(round_keys.as_slice().len(), 13);
        assert_eq!(round_keys.as_slice().last(), Some(&expected));
        Ok(())
    }

    #[test]
    fn key_schedule_256() -> Result<()> {
        // run key schedule on 256 bit sample key from FIPS-197 Appendix A.3
        let round_keys = schedule(&[
            0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d,
            0x77, 0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3,
            0x09, 0x14, 0xdf, 0xf4,
        ])?;

        // w[12] is the first word touched by the extra AES-256 SubWord (FIPS-197 A.3)
        let round_3: Block = [
            0xa8, 0xb0, 0x9c, 0x1a, 0x93, 0xd1, 0x94, 0xcd, 0xbe, 0x49, 0x84, 0x6e, 0xb7, 0x5d,
            0x5b, 0x9a,
        ];

        // compare with last round key of sample schedule in A.3
        let expected: Block = [
            0xfe, 0x48, 0x90, 0xd1, 0xe6, 0x18, 0x8d, 0x0b, 0x04, 0x6d, 0xf3, 0x44, 0x70, 0x6c,
            0x63, 0x1e,
        ];

        assert_eq!(round_keys.rounds(), 14);
        assert_eq!(round_keys.as_slice().len(), 15);
        assert_eq!(round_keys.get(3), Some(&round_3));
        assert_eq!(round_keys.as_slice().last(), Some(&expected));
        Ok(())
    }
}
