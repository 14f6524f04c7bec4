mod cipher;
mod core;
mod error;
mod header;
mod key;
mod modes;
mod schedule;
mod stream;
mod util;

pub use cipher::Cipher;
pub use self::core::{BLOCK_SIZE, Block};
pub use error::{Error, Result};
pub use header::Header;
pub use key::{Key, KeySize};
pub use modes::{Mode, PARALLEL_THRESHOLD};
pub use schedule::RoundKeys;
pub use stream::{BATCH_BLOCKS, Options};
