//! Stream codec: turns an arbitrary-length byte stream into `header || blocks` and back.

use std::io::{Read, Write};

use log::{debug, trace};

use crate::aestream::core::BLOCK_SIZE;
use crate::aestream::error::{Error, Result};
use crate::aestream::header::Header;
use crate::aestream::modes::Mode;
use crate::aestream::schedule::RoundKeys;
use crate::aestream::util::{pad, read_full, unpad};

/// Number of blocks read from the input per batch while encrypting (64 KiB).
pub const BATCH_BLOCKS: usize = 4096;

/// Framing options for [Cipher::encrypt_with](crate::Cipher::encrypt_with) and
/// [Cipher::decrypt_with](crate::Cipher::decrypt_with).
///
/// Production streams always use both padding and the header, which is what [Default] gives.
/// Turning them off exists for checking against fixed-length reference vectors: without the
/// header a stream is raw ECB blocks, and without padding the input must be block aligned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Options {
    pub use_padding: bool,
    pub use_header: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            use_padding: true,
            use_header: true,
        }
    }
}

impl Options {
    /// Bare ECB blocks: no header, no padding.
    pub const fn raw() -> Self {
        Self {
            use_padding: false,
            use_header: false,
        }
    }
}

/// Encrypts everything `input` yields into `output`. Returns the number of plaintext bytes read.
///
/// With padding the input streams through in batches. Without padding the whole input is read and
/// its alignment checked before the header or any block reaches `output`.
pub(crate) fn encrypt_stream<R, W>(
    input: &mut R,
    output: &mut W,
    round_keys: &RoundKeys,
    mode: Mode,
    options: Options,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    if !options.use_header && mode != Mode::Ecb {
        return Err(Error::InvalidOptions {
            context: "a headerless stream has nowhere to store the CBC IV",
        });
    }

    let header = if options.use_header {
        Header::generate(mode)?
    } else {
        Header::ecb()
    };
    debug!(
        "encrypting {mode} stream ({} rounds, padding: {}, header: {} bytes)",
        round_keys.rounds(),
        options.use_padding,
        if options.use_header { header.encoded_len() } else { 0 },
    );

    let total = if options.use_padding {
        encrypt_padded(input, output, round_keys, &header, options.use_header)?
    } else {
        encrypt_unpadded(input, output, round_keys, &header, options.use_header)?
    };

    output.flush()?;
    debug!("encrypted {total} bytes");
    Ok(total)
}

fn encrypt_padded<R, W>(
    input: &mut R,
    output: &mut W,
    round_keys: &RoundKeys,
    header: &Header,
    use_header: bool,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    if use_header {
        header.write_to(output)?;
    }

    let round_keys = round_keys.as_slice();
    let mut chaining = header.chaining();
    let mut buf = vec![0u8; BATCH_BLOCKS * BLOCK_SIZE];
    let mut out = vec![0u8; BATCH_BLOCKS * BLOCK_SIZE];
    let mut total: u64 = 0;

    loop {
        let n = read_full(input, &mut buf)?;
        total += n as u64;

        if n == buf.len() {
            // more input may follow, so this batch cannot hold the padding
            trace!("encrypting full batch of {n} bytes");
            chaining.encrypt(&buf, &mut out, round_keys);
            output.write_all(&out)?;
            continue;
        }

        // short read: this is the final batch
        let last = pad(&buf[..n]);
        let mut last_out = vec![0u8; last.len()];
        chaining.encrypt(&last, &mut last_out, round_keys);
        output.write_all(&last_out)?;
        return Ok(total);
    }
}

fn encrypt_unpadded<R, W>(
    input: &mut R,
    output: &mut W,
    round_keys: &RoundKeys,
    header: &Header,
    use_header: bool,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut plaintext = Vec::new();
    input.read_to_end(&mut plaintext)?;
    let total = plaintext.len() as u64;

    if plaintext.len() % BLOCK_SIZE != 0 {
        return Err(Error::UnalignedPlaintext { len: total });
    }

    let mut ciphertext = vec![0u8; plaintext.len()];
    header
        .chaining()
        .encrypt(&plaintext, &mut ciphertext, round_keys.as_slice());

    if use_header {
        header.write_to(output)?;
    }
    output.write_all(&ciphertext)?;
    Ok(total)
}

/// Decrypts `input` into `output`. Returns the number of plaintext bytes written.
///
/// The whole ciphertext is validated before anything reaches `output`: on error nothing is
/// written.
pub(crate) fn decrypt_stream<R, W>(
    input: &mut R,
    output: &mut W,
    round_keys: &RoundKeys,
    options: Options,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let header = if options.use_header {
        Header::read_from(input)?
    } else {
        Header::ecb()
    };
    debug!(
        "decrypting {} stream ({} rounds, padding: {})",
        header.mode(),
        round_keys.rounds(),
        options.use_padding,
    );

    let mut ciphertext = Vec::new();
    input.read_to_end(&mut ciphertext)?;

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::MalformedCiphertext {
            len: ciphertext.len(),
            context: "ciphertext is not a positive multiple of 16 bytes",
        });
    }

    let mut plaintext = vec![0u8; ciphertext.len()];
    header
        .chaining()
        .decrypt(&ciphertext, &mut plaintext, round_keys.as_slice());

    if options.use_padding {
        unpad(&mut plaintext)?;
    }

    output.write_all(&plaintext)?;
    output.flush()?;
    debug!(
        "decrypted {} blocks into {} bytes",
        ciphertext.len() / BLOCK_SIZE,
        plaintext.len()
    );
    Ok(plaintext.len() as u64)
}
