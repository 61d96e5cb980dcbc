//! Reading and writing of DXT1 DirectDraw Surface files.
//!
//! Only the legacy 128-byte header with a `DXT1` FourCC is handled. The top
//! mip level is read; anything after it is ignored.

use crate::bc1::{blocks_from_bytes, blocks_to_bytes, check_block_count};
use crate::colourblock::Block;
use crate::compressed_size;
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Write};

/// Magic header for DDS files ("DDS ")
pub const DDS_MAGIC: u32 = 0x2053_4444;
/// Size of the magic plus `DDS_HEADER`
pub const DDS_HEADER_SIZE: usize = 0x80;
/// Value of `DDS_HEADER::dwSize`
pub const DDS_STRUCT_SIZE: u32 = 124;
/// Value of `DDS_PIXELFORMAT::dwSize`
pub const DDS_PIXELFORMAT_SIZE: u32 = 32;

pub const FOURCC_DXT1: u32 = 0x3154_5844; // 'DXT1'

// DDS header flags
pub const DDSD_CAPS: u32 = 0x1;
pub const DDSD_HEIGHT: u32 = 0x2;
pub const DDSD_WIDTH: u32 = 0x4;
pub const DDSD_PIXELFORMAT: u32 = 0x1000;
pub const DDSD_MIPMAPCOUNT: u32 = 0x20000;
pub const DDSD_LINEARSIZE: u32 = 0x80000;

// DDS pixel format flags
pub const DDPF_FOURCC: u32 = 0x4;

pub const DDSCAPS_TEXTURE: u32 = 0x1000;

/// The fields of the DDS header that matter for decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsHeader {
    pub flags: u32,
    pub height: u32,
    pub width: u32,
    pub mipmap_count: u32,
    pub pixel_format_flags: u32,
    pub fourcc: u32,
}

/// A decoded DXT1 surface: the dimensions and the top level's block stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsImage {
    pub width: usize,
    pub height: usize,
    pub blocks: Vec<Block>,
}

fn fourcc_name(fourcc: u32) -> String {
    fourcc
        .to_le_bytes()
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { '?' })
        .collect()
}

/// Parses and validates the DDS header.
pub fn parse_header(data: &[u8]) -> Result<DdsHeader> {
    if data.len() < DDS_HEADER_SIZE {
        return Err(Error::Truncated {
            needed: DDS_HEADER_SIZE,
            available: data.len(),
        });
    }

    let mut reader = Cursor::new(data);
    let magic = reader.read_u32::<LittleEndian>()?;
    if magic != DDS_MAGIC {
        return Err(Error::InvalidMagic {
            format: "DDS",
            expected: DDS_MAGIC,
            found: magic,
        });
    }

    let size = reader.read_u32::<LittleEndian>()?;
    if size < DDS_STRUCT_SIZE {
        return Err(Error::Truncated {
            needed: DDS_STRUCT_SIZE as usize,
            available: size as usize,
        });
    }

    let flags = reader.read_u32::<LittleEndian>()?;
    let height = reader.read_u32::<LittleEndian>()?;
    let width = reader.read_u32::<LittleEndian>()?;
    let _pitch_or_linear_size = reader.read_u32::<LittleEndian>()?;
    let _depth = reader.read_u32::<LittleEndian>()?;
    let mipmap_count = reader.read_u32::<LittleEndian>()?;
    for _ in 0..11 {
        reader.read_u32::<LittleEndian>()?;
    }

    let _pixel_format_size = reader.read_u32::<LittleEndian>()?;
    let pixel_format_flags = reader.read_u32::<LittleEndian>()?;
    let fourcc = reader.read_u32::<LittleEndian>()?;

    if pixel_format_flags & DDPF_FOURCC == 0 {
        return Err(Error::UnsupportedDds(
            "uncompressed pixel format".to_string(),
        ));
    }
    if fourcc != FOURCC_DXT1 {
        return Err(Error::UnsupportedDds(format!(
            "FourCC '{}'",
            fourcc_name(fourcc)
        )));
    }

    Ok(DdsHeader {
        flags,
        height,
        width,
        mipmap_count,
        pixel_format_flags,
        fourcc,
    })
}

/// Reads the header and top level block stream of a DXT1 surface.
pub fn read_dds(data: &[u8]) -> Result<DdsImage> {
    let header = parse_header(data)?;
    let width = header.width as usize;
    let height = header.height as usize;

    let needed = DDS_HEADER_SIZE + compressed_size(width, height);
    if data.len() < needed {
        return Err(Error::Truncated {
            needed,
            available: data.len(),
        });
    }
    if data.len() > needed {
        log::debug!(
            "ignoring {} bytes after the top level ({} mip levels declared)",
            data.len() - needed,
            if header.flags & DDSD_MIPMAPCOUNT != 0 {
                header.mipmap_count
            } else {
                1
            }
        );
    }

    let blocks = blocks_from_bytes(&data[DDS_HEADER_SIZE..needed])?;
    log::debug!("read {width}x{height} DXT1 surface, {} blocks", blocks.len());
    Ok(DdsImage {
        width,
        height,
        blocks,
    })
}

/// Writes a single-level DXT1 surface.
///
/// `blocks` must hold exactly one block per 4x4 tile of a `width` x `height`
/// image.
pub fn write_dds<W: Write>(writer: &mut W, width: usize, height: usize, blocks: &[Block]) -> Result<()> {
    check_block_count(blocks, width, height)?;

    let too_large = || Error::UnsupportedDds(format!("{width}x{height} is too large"));
    let width_field = u32::try_from(width).map_err(|_| too_large())?;
    let height_field = u32::try_from(height).map_err(|_| too_large())?;
    let linear_size = u32::try_from(compressed_size(width, height)).map_err(|_| too_large())?;

    writer.write_u32::<LittleEndian>(DDS_MAGIC)?;
    writer.write_u32::<LittleEndian>(DDS_STRUCT_SIZE)?;
    writer.write_u32::<LittleEndian>(
        DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_LINEARSIZE,
    )?;
    writer.write_u32::<LittleEndian>(height_field)?;
    writer.write_u32::<LittleEndian>(width_field)?;
    writer.write_u32::<LittleEndian>(linear_size)?;
    writer.write_u32::<LittleEndian>(0)?; // depth
    writer.write_u32::<LittleEndian>(0)?; // mipmap count
    for _ in 0..11 {
        writer.write_u32::<LittleEndian>(0)?;
    }

    // DDS_PIXELFORMAT
    writer.write_u32::<LittleEndian>(DDS_PIXELFORMAT_SIZE)?;
    writer.write_u32::<LittleEndian>(DDPF_FOURCC)?;
    writer.write_u32::<LittleEndian>(FOURCC_DXT1)?;
    for _ in 0..5 {
        writer.write_u32::<LittleEndian>(0)?; // bit count and masks
    }

    writer.write_u32::<LittleEndian>(DDSCAPS_TEXTURE)?;
    for _ in 0..4 {
        writer.write_u32::<LittleEndian>(0)?; // caps2, caps3, caps4, reserved
    }

    writer.write_all(&blocks_to_bytes(blocks))?;
    Ok(())
}

/// Writes a single-level DXT1 surface to memory.
pub fn encode_dds(width: usize, height: usize, blocks: &[Block]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(DDS_HEADER_SIZE + compressed_size(width, height));
    write_dds(&mut bytes, width, height, blocks)?;
    Ok(bytes)
}
