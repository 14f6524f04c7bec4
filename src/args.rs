use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, author, arg_required_else_help = true)]
pub struct Cli {
    /// Log progress of encryption/decryption to stderr.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt input to output
    Encrypt(EncryptArgs),

    /// Decrypt input to output. The mode is read from the ciphertext header.
    Decrypt(CommonArgs),
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct CommonArgs {
    /// Input file path.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file path. Not overwritten if it exists, unless --force is given.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Key file path. The file must contain exactly 16, 24, or 32 bytes.
    #[arg(short = 'k', long = "key")]
    pub key: PathBuf,

    /// Overwrite the output file (and a generated key file) if it already exists.
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Mode of operation.
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        default_value_t = Mode::ModeCBC,
    )]
    pub mode: Mode,

    /// Generate a random key (written to path specified by key)
    #[arg(long = "gen-key")]
    pub gen_key: bool,

    /// Only valid with --gen-key.
    #[arg(
        long = "key-size",
        value_enum,
        default_value_t = KeySize::Bits256,
        requires = "gen_key"
    )]
    pub key_size: KeySize,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum KeySize {
    #[value(name = "128")]
    Bits128,
    #[value(name = "192")]
    Bits192,
    #[value(name = "256")]
    Bits256,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum Mode {
    #[value(name = "ecb")]
    ModeECB,
    #[value(name = "cbc")]
    ModeCBC,
}

impl From<KeySize> for aestream::KeySize {
    fn from(size: KeySize) -> Self {
        match size {
            KeySize::Bits128 => aestream::KeySize::Aes128,
            KeySize::Bits192 => aestream::KeySize::Aes192,
            KeySize::Bits256 => aestream::KeySize::Aes256,
        }
    }
}

impl From<Mode> for aestream::Mode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::ModeECB => aestream::Mode::Ecb,
            Mode::ModeCBC => aestream::Mode::Cbc,
        }
    }
}
