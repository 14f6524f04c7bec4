use std::io::{ErrorKind, Read};

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::aestream::core::{BLOCK_SIZE, Block};
use crate::aestream::error::*;

/// Fresh CBC initialisation vector from the OS RNG.
pub(crate) fn random_iv() -> Result<Block> {
    let mut iv = [0u8; BLOCK_SIZE];
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}

#[inline(always)]
pub(crate) fn xor_words(a: &[u8; 4], b: &[u8; 4]) -> [u8; 4] {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

#[inline(always)]
pub(crate) fn xor_blocks(a: &Block, b: &Block) -> Block {
    let mut out = *a;
    for (o, x) in out.iter_mut().zip(b) {
        *o ^= x;
    }
    out
}

/// PKCS#7 padding (16-byte blocks). Always adds at least one byte, so aligned input gains a
/// whole block of 0x10.
pub(crate) fn pad(plaintext: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;

    let mut out = Vec::with_capacity(plaintext.len() + pad_len);
    out.extend_from_slice(plaintext);
    out.resize(plaintext.len() + pad_len, pad_len as u8);
    out
}

/// Remove and validate PKCS#7 padding
pub(crate) fn unpad(input: &mut Vec<u8>) -> Result<()> {
    let Some(&last) = input.last() else {
        return Err(Error::MalformedCiphertext {
            len: 0,
            context: "unpad: attempted to unpad empty input",
        });
    };

    let pad = last as usize;
    if pad == 0 || pad > BLOCK_SIZE || pad > input.len() {
        return Err(Error::MalformedCiphertext {
            len: input.len(),
            context: "unpad: invalid padding length specified by last byte",
        });
    }

    let start = input.len() - pad;
    if !input[start..].iter().all(|&b| b == last) {
        return Err(Error::MalformedCiphertext {
            len: input.len(),
            context: "unpad: invalid PKCS#7 padding format",
        });
    }

    input.truncate(start);
    Ok(())
}

/// Fills `buf` from `reader`, stopping early only at end of input. Returns the number of bytes read.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_empty_is_full_block() {
        assert_eq!(pad(&[]), vec![0x10; 16]);
    }

    #[test]
    fn pad_aligned_adds_full_block() {
        let padded = pad(&[0xaa; 32]);
        assert_eq!(padded.len(), 48);
        assert_eq!(&padded[..32], &[0xaa; 32]);
        assert_eq!(&padded[32..], &[0x10; 16]);
    }

    #[test]
    fn pad_partial_block() {
        let padded = pad(b"YELLOW SUBMARINE!!!");
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[19..], &[13u8; 13]);

        let padded = pad(&[0u8; 15]);
        assert_eq!(padded.len(), 16);
        assert_eq!(padded[15], 0x01);
    }

    #[test]
    fn unpad_strips_valid_padding() -> Result<()> {
        for len in 0..=40 {
            let plaintext: Vec<u8> = (0..len as u8).collect();
            let mut padded = pad(&plaintext);
            unpad(&mut padded)?;
            assert_eq!(padded, plaintext);
        }
        Ok(())
    }

    #[test]
    fn unpad_rejects_bad_length_byte() {
        let mut block = vec![0u8; 16];
        assert!(matches!(unpad(&mut block), Err(Error::MalformedCiphertext { .. })));

        let mut block = vec![17u8; 16];
        assert!(matches!(unpad(&mut block), Err(Error::MalformedCiphertext { .. })));

        let mut block = vec![0xffu8; 16];
        assert!(matches!(unpad(&mut block), Err(Error::MalformedCiphertext { .. })));

        let mut empty = Vec::new();
        assert!(matches!(unpad(&mut empty), Err(Error::MalformedCiphertext { .. })));
    }

    #[test]
    fn unpad_rejects_inconsistent_bytes() {
        let mut block = vec![0x41u8; 16];
        block[12] = 0x04;
        block[13] = 0x04;
        block[14] = 0x03;
        block[15] = 0x04;
        let original = block.clone();

        assert!(matches!(unpad(&mut block), Err(Error::MalformedCiphertext { .. })));
        assert_eq!(block, original, "failed unpad must not modify input");
    }

    #[test]
    fn read_full_handles_short_reads() -> Result<()> {
        // a reader that hands out at most 3 bytes per call
        struct Trickle<'a>(&'a [u8]);
        impl Read for Trickle<'_> {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                let n = buf.len().min(3).min(self.0.len());
                buf[..n].copy_from_slice(&self.0[..n]);
                self.0 = &self.0[n..];
                Ok(n)
            }
        }

        let data: Vec<u8> = (0..20).collect();
        let mut reader = Trickle(&data);
        let mut buf = [0u8; 16];

        assert_eq!(read_full(&mut reader, &mut buf)?, 16);
        assert_eq!(&buf, &data[..16]);
        assert_eq!(read_full(&mut reader, &mut buf)?, 4);
        assert_eq!(&buf[..4], &data[16..]);
        assert_eq!(read_full(&mut reader, &mut buf)?, 0);
        Ok(())
    }
}
