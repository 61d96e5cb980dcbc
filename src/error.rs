use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, writing or converting containers.
///
/// The block codec itself cannot fail; everything here is detected at the
/// boundary before pixels or blocks reach it.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("not a {format} file: expected magic {expected:#x}, found {found:#x}")]
    InvalidMagic {
        format: &'static str,
        expected: u32,
        found: u32,
    },
    #[error("file is truncated: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("unsupported BMP: {0}")]
    UnsupportedBmp(String),
    #[error("unsupported DDS: {0}")]
    UnsupportedDds(String),
    #[error("image dimensions {width}x{height} are not non-zero multiples of 4")]
    InvalidDimensions { width: usize, height: usize },
    #[error("compressed stream length {0} is not a multiple of 8 bytes")]
    InvalidStreamLength(usize),
    #[error("expected {expected} blocks, found {found}")]
    BlockCountMismatch { expected: usize, found: usize },
    #[error("{} file not supported", .0.display())]
    UnsupportedExtension(PathBuf),
}

pub type Result<T> = core::result::Result<T, Error>;
