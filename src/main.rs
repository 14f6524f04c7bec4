mod args;

use args::{Cli, Commands, CommonArgs};
use clap::Parser;

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use aestream::{Cipher, Key};
use log::{LevelFilter, debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("output file already exists (use --force to overwrite): {0}")]
    OutputExists(String),

    #[error("{path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Aes(#[from] aestream::Error),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match aes_cli(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn aes_cli(args: Cli) -> Result<(), CliError> {
    match args.command {
        Commands::Encrypt(enc) => {
            let common = enc.common;
            let mode: aestream::Mode = enc.mode.into();
            debug!(
                "encrypt: input={} output={} key={} mode={mode}",
                common.input.display(),
                common.output.display(),
                common.key.display(),
            );

            // a generated key is only written once input and output are open
            let mut wrote_key = false;
            let start = Instant::now();
            let result = with_files(&common, |input, output| {
                let key = if enc.gen_key {
                    let key = Key::rand_key(enc.key_size.into())?;
                    let mut key_file = create_output(&common.key, common.force)?;
                    wrote_key = true;
                    key_file.write_all(key.as_bytes())?;
                    info!("wrote generated {} key to {}", key.size(), common.key.display());
                    key
                } else {
                    read_key(&common.key)?
                };

                let cipher = Cipher::new(&key);
                Ok(cipher.encrypt(input, output, mode)?)
            });

            if result.is_err() && wrote_key {
                remove_quietly(&common.key);
            }
            let bytes = result?;

            println!(
                "Encrypted {} bytes in {} ms",
                bytes,
                start.elapsed().as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(common) => {
            let key = read_key(&common.key)?;
            debug!(
                "decrypt: input={} output={} key={}",
                common.input.display(),
                common.output.display(),
                common.key.display(),
            );

            let cipher = Cipher::new(&key);
            let start = Instant::now();
            let bytes = with_files(&common, |input, output| Ok(cipher.decrypt(input, output)?))?;

            println!(
                "Decrypted {} bytes in {} ms",
                bytes,
                start.elapsed().as_millis()
            );
            Ok(())
        }
    }
}

/// Reads a key file. Anything other than 16, 24, or 32 bytes is rejected by [Key::try_from_slice].
fn read_key(path: &Path) -> Result<Key, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::File {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Key::try_from_slice(&bytes)?)
}

fn create_output(path: &Path, force: bool) -> Result<File, CliError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    options.open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::AlreadyExists {
            CliError::OutputExists(path.display().to_string())
        } else {
            CliError::File {
                path: path.display().to_string(),
                source,
            }
        }
    })
}

/// Opens input and output, runs `op`, and removes the output again if `op` fails so that a failed
/// run never leaves a partial file behind.
fn with_files<F>(common: &CommonArgs, op: F) -> Result<u64, CliError>
where
    F: FnOnce(&mut BufReader<File>, &mut BufWriter<File>) -> Result<u64, CliError>,
{
    let input = File::open(&common.input).map_err(|source| CliError::File {
        path: common.input.display().to_string(),
        source,
    })?;
    let mut input = BufReader::new(input);
    let mut output = BufWriter::new(create_output(&common.output, common.force)?);

    let result = op(&mut input, &mut output).and_then(|bytes| {
        output.flush()?;
        Ok(bytes)
    });

    if result.is_err() {
        drop(output);
        remove_quietly(&common.output);
    }
    result
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        debug!("could not remove {}: {e}", path.display());
    }
}
