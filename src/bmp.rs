//! Reading and writing of uncompressed 24-bit Windows bitmaps.
//!
//! Only the `BITMAPFILEHEADER` + `BITMAPINFOHEADER` layout with 24 bits per
//! pixel and no compression is handled. Rows are stored bottom-up and padded
//! to 4 bytes; row 0 of the file becomes row 0 of the [`RgbImage`].

use crate::colour::Rgb;
use crate::error::{Error, Result};
use crate::plane::{PixelBuffer, RgbImage};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Write};

/// "BM"
pub const BMP_MAGIC: u16 = 0x4D42;
/// Size of `BITMAPFILEHEADER`
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of `BITMAPINFOHEADER`
pub const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the pixel data in files we write
pub const HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE as usize;

const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 24;
const BI_RGB: u32 = 0;

/// The fields of the two bitmap headers that matter for decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_size: u32,
    pub data_offset: u32,
    pub width: u32,
    pub height: u32,
    pub bit_count: u16,
    pub compression: u32,
}

/// Number of bytes in one stored row, including padding
pub fn row_stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

/// Parses and validates the file and info headers.
pub fn parse_header(data: &[u8]) -> Result<BmpHeader> {
    if data.len() < HEADER_SIZE {
        return Err(Error::Truncated {
            needed: HEADER_SIZE,
            available: data.len(),
        });
    }

    let mut reader = Cursor::new(data);
    let magic = reader.read_u16::<LittleEndian>()?;
    if magic != BMP_MAGIC {
        return Err(Error::InvalidMagic {
            format: "BMP",
            expected: BMP_MAGIC as u32,
            found: magic as u32,
        });
    }

    let file_size = reader.read_u32::<LittleEndian>()?;
    if (file_size as usize) < HEADER_SIZE {
        return Err(Error::Truncated {
            needed: HEADER_SIZE,
            available: file_size as usize,
        });
    }
    let _reserved1 = reader.read_u16::<LittleEndian>()?;
    let _reserved2 = reader.read_u16::<LittleEndian>()?;
    let data_offset = reader.read_u32::<LittleEndian>()?;

    let info_size = reader.read_u32::<LittleEndian>()?;
    if info_size < INFO_HEADER_SIZE {
        return Err(Error::UnsupportedBmp(format!(
            "info header of {info_size} bytes"
        )));
    }
    let width = reader.read_i32::<LittleEndian>()?;
    let height = reader.read_i32::<LittleEndian>()?;
    let _planes = reader.read_u16::<LittleEndian>()?;
    let bit_count = reader.read_u16::<LittleEndian>()?;
    let compression = reader.read_u32::<LittleEndian>()?;

    if width < 0 {
        return Err(Error::UnsupportedBmp(format!("negative width {width}")));
    }
    if height < 0 {
        return Err(Error::UnsupportedBmp("top-down row order".to_string()));
    }
    if bit_count != BITS_PER_PIXEL {
        return Err(Error::UnsupportedBmp(format!("{bit_count} bits per pixel")));
    }
    if compression != BI_RGB {
        return Err(Error::UnsupportedBmp(format!("compression method {compression}")));
    }

    Ok(BmpHeader {
        file_size,
        data_offset,
        width: width as u32,
        height: height as u32,
        bit_count,
        compression,
    })
}

/// Decodes a 24-bit bitmap.
pub fn read_bmp(data: &[u8]) -> Result<RgbImage> {
    let header = parse_header(data)?;
    let width = header.width as usize;
    let height = header.height as usize;
    let stride = row_stride(width);

    let start = header.data_offset as usize;
    let needed = stride
        .checked_mul(height)
        .and_then(|size| size.checked_add(start))
        .unwrap_or(usize::MAX);
    if data.len() < needed {
        return Err(Error::Truncated {
            needed,
            available: data.len(),
        });
    }

    let mut pixels = Vec::with_capacity(width * height);
    for row in data[start..needed].chunks_exact(stride.max(1)).take(height) {
        // Channels are stored as B, G, R
        pixels.extend(
            row[..width * 3]
                .chunks_exact(3)
                .map(|bgr| Rgb::new(bgr[2], bgr[1], bgr[0])),
        );
    }

    log::debug!("read {width}x{height} bitmap, pixel data at {start}");
    RgbImage::from_pixels(width, height, pixels)
        .ok_or_else(|| Error::UnsupportedBmp("pixel data does not match dimensions".to_string()))
}

/// Encodes an image as a 24-bit bitmap.
pub fn write_bmp<W: Write, P: PixelBuffer + ?Sized>(writer: &mut W, image: &P) -> Result<()> {
    let width = image.width();
    let height = image.height();
    let stride = row_stride(width);

    let too_large = || Error::UnsupportedBmp(format!("{width}x{height} is too large"));
    let image_size = u32::try_from(stride * height).map_err(|_| too_large())?;
    let file_size = image_size
        .checked_add(HEADER_SIZE as u32)
        .ok_or_else(too_large)?;
    let width_field = i32::try_from(width).map_err(|_| too_large())?;
    let height_field = i32::try_from(height).map_err(|_| too_large())?;

    // BITMAPFILEHEADER
    writer.write_u16::<LittleEndian>(BMP_MAGIC)?;
    writer.write_u32::<LittleEndian>(file_size)?;
    writer.write_u16::<LittleEndian>(0)?;
    writer.write_u16::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(HEADER_SIZE as u32)?;

    // BITMAPINFOHEADER
    writer.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    writer.write_i32::<LittleEndian>(width_field)?;
    writer.write_i32::<LittleEndian>(height_field)?;
    writer.write_u16::<LittleEndian>(PLANES)?;
    writer.write_u16::<LittleEndian>(BITS_PER_PIXEL)?;
    writer.write_u32::<LittleEndian>(BI_RGB)?;
    writer.write_u32::<LittleEndian>(image_size)?;
    writer.write_u32::<LittleEndian>(0)?; // x pixels per metre
    writer.write_u32::<LittleEndian>(0)?; // y pixels per metre
    writer.write_u32::<LittleEndian>(0)?; // colours used
    writer.write_u32::<LittleEndian>(0)?; // important colours

    let mut row = vec![0u8; stride];
    for y in 0..height {
        for (x, bgr) in row.chunks_exact_mut(3).take(width).enumerate() {
            let pixel = image.get(x, y);
            bgr.copy_from_slice(&[pixel.b, pixel.g, pixel.r]);
        }
        writer.write_all(&row)?;
    }

    Ok(())
}

/// Encodes an image as a 24-bit bitmap in memory.
pub fn encode_bmp<P: PixelBuffer + ?Sized>(image: &P) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + row_stride(image.width()) * image.height());
    write_bmp(&mut bytes, image)?;
    Ok(bytes)
}
