//! File level conversion between BMP and DDS.

use crate::bc1;
use crate::bmp;
use crate::dds;
use crate::error::{Error, Result};
use crate::plane::{check_dimensions, PixelBuffer};
use std::fs;
use std::path::{Path, PathBuf};

/// The two container formats the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Uncompressed 24-bit bitmap
    Bmp,
    /// DXT1 compressed surface
    Dds,
}

impl Container {
    /// Picks the container from a file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Container> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("bmp") {
            Some(Container::Bmp)
        } else if extension.eq_ignore_ascii_case("dds") {
            Some(Container::Dds)
        } else {
            None
        }
    }

    /// File extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            Container::Bmp => "bmp",
            Container::Dds => "dds",
        }
    }

    /// The container a file of this kind is converted into
    pub fn target(self) -> Container {
        match self {
            Container::Bmp => Container::Dds,
            Container::Dds => Container::Bmp,
        }
    }
}

/// Compresses a BMP file held in memory into a DDS file.
pub fn bmp_to_dds(data: &[u8]) -> Result<Vec<u8>> {
    let image = bmp::read_bmp(data)?;
    check_dimensions(image.width(), image.height())?;

    let blocks = bc1::compress(&image);
    dds::encode_dds(image.width(), image.height(), &blocks)
}

/// Decompresses a DDS file held in memory into a BMP file.
pub fn dds_to_bmp(data: &[u8]) -> Result<Vec<u8>> {
    let surface = dds::read_dds(data)?;
    check_dimensions(surface.width, surface.height)?;
    bc1::check_block_count(&surface.blocks, surface.width, surface.height)?;

    let image = bc1::decompress_image(&surface.blocks, surface.width, surface.height);
    bmp::encode_bmp(&image)
}

/// Where the converted form of `input` is written.
///
/// The file keeps its stem and swaps its extension; it lands next to the
/// input unless `output_dir` is given.
pub fn output_path(input: &Path, target: Container, output_dir: Option<&Path>) -> PathBuf {
    let converted = input.with_extension(target.extension());
    match (output_dir, converted.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => converted,
    }
}

/// Converts a `.bmp` file into a `.dds` file or the reverse, depending on
/// the extension of `input`. Returns the path of the written file.
pub fn convert_file(input: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let source = Container::from_path(input)
        .ok_or_else(|| Error::UnsupportedExtension(input.to_path_buf()))?;
    let target = source.target();

    let data = fs::read(input)?;
    let converted = match source {
        Container::Bmp => bmp_to_dds(&data)?,
        Container::Dds => dds_to_bmp(&data)?,
    };

    let output = output_path(input, target, output_dir);
    fs::write(&output, converted)?;
    log::info!("converted {} -> {}", input.display(), output.display());
    Ok(output)
}
