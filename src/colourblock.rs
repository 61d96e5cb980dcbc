//! Encoding and decoding of single 8-byte colour blocks.
//!
//! A block stores two 5-6-5 endpoints followed by one index byte per tile
//! row. Within a row byte, column 0 sits in bits 0-1 and column 3 in bits 6-7.

use crate::colour::{pack, Colour565, Rgb};
use crate::palette::{decoder_palette, encoder_palette};

/// Size of a compressed block in bytes
pub const BLOCK_SIZE: usize = 8;

/// One compressed 4x4 tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block {
    /// Channel-wise maximum of the source tile
    pub colour0: Colour565,
    /// Channel-wise minimum of the source tile
    pub colour1: Colour565,
    /// 2-bit palette indices, one byte per tile row (top row first)
    pub indices: [u8; 4],
}

impl Block {
    /// Reads a block from its little-endian wire layout
    pub fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        Block {
            colour0: Colour565(u16::from_le_bytes([bytes[0], bytes[1]])),
            colour1: Colour565(u16::from_le_bytes([bytes[2], bytes[3]])),
            indices: [bytes[4], bytes[5], bytes[6], bytes[7]],
        }
    }

    /// Writes the block in its little-endian wire layout
    pub fn to_bytes(&self) -> [u8; BLOCK_SIZE] {
        let [c0_lo, c0_hi] = self.colour0.0.to_le_bytes();
        let [c1_lo, c1_hi] = self.colour1.0.to_le_bytes();
        let [i0, i1, i2, i3] = self.indices;
        [c0_lo, c0_hi, c1_lo, c1_hi, i0, i1, i2, i3]
    }

    /// Palette index of the pixel at (`column`, `row`) within the tile.
    ///
    /// Both coordinates must be below 4.
    #[inline]
    pub fn index(&self, column: usize, row: usize) -> u8 {
        (self.indices[row] >> (2 * column)) & 0x3
    }
}

/// Packs four 2-bit indices (columns 0 to 3) into one row byte.
#[inline]
pub fn encode_indices(row: [u8; 4]) -> u8 {
    row.iter()
        .enumerate()
        .fold(0u8, |byte, (column, &index)| byte | ((index & 0x3) << (2 * column)))
}

/// Splits a row byte into its four 2-bit indices (columns 0 to 3).
#[inline]
pub fn decode_indices(byte: u8) -> [u8; 4] {
    [byte & 0x3, (byte >> 2) & 0x3, (byte >> 4) & 0x3, (byte >> 6) & 0x3]
}

/// Selects the palette entry closest to `colour`.
///
/// Candidates are ranked by the squared difference of the raw 16-bit values,
/// compared in single precision. On a tie the lowest index wins.
fn nearest_index(palette: &[Colour565; 4], colour: Colour565) -> u8 {
    let mut best = 0;
    let mut best_distance = palette[0].packed_distance(colour) as f32;
    for (i, candidate) in palette.iter().enumerate().skip(1) {
        let distance = candidate.packed_distance(colour) as f32;
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best as u8
}

/// Compresses a 4x4 tile given in row-major order.
pub fn compress(tile: &[Rgb; 16]) -> Block {
    let (max, min) = Rgb::bounds(tile);
    let palette = encoder_palette(max, min);

    let mut indices = [0u8; 4];
    for (row_byte, row) in indices.iter_mut().zip(tile.chunks_exact(4)) {
        let mut row_indices = [0u8; 4];
        for (index, &pixel) in row_indices.iter_mut().zip(row) {
            *index = nearest_index(&palette, pack(pixel));
        }
        *row_byte = encode_indices(row_indices);
    }

    Block {
        colour0: palette[0],
        colour1: palette[1],
        indices,
    }
}

/// Decompresses a block into a 4x4 tile in row-major order.
pub fn decompress(block: &Block) -> [Rgb; 16] {
    let palette = decoder_palette(block.colour0, block.colour1);

    let mut tile = [Rgb::default(); 16];
    for (row, &byte) in block.indices.iter().enumerate() {
        for (column, index) in decode_indices(byte).into_iter().enumerate() {
            tile[4 * row + column] = palette[index as usize];
        }
    }
    tile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::unpack;
    use rstest::rstest;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn solid_red_tile() {
        let block = compress(&[RED; 16]);
        assert_eq!(block.colour0, Colour565(0xF800));
        assert_eq!(block.colour1, Colour565(0xF800));
        assert_eq!(block.indices, [0; 4]);
        assert_eq!(block.to_bytes(), [0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0]);
        assert_eq!(decompress(&block), [RED; 16]);
    }

    #[rstest]
    #[case(Rgb::new(255, 0, 0))]
    #[case(Rgb::new(0, 255, 255))]
    #[case(Rgb::new(123, 45, 67))]
    #[case(Rgb::new(1, 2, 3))]
    #[case(Rgb::new(200, 201, 202))]
    fn uniform_tile_uses_index_zero(#[case] colour: Rgb) {
        let block = compress(&[colour; 16]);
        assert_eq!(block.colour0, block.colour1);
        assert_eq!(block.indices, [0; 4]);
        assert_eq!(decompress(&block), [unpack(pack(colour)); 16]);
    }

    #[test]
    fn black_and_white_tile() {
        // Alternate halves of every row so both colours hit every column.
        let mut tile = [Rgb::BLACK; 16];
        for (i, pixel) in tile.iter_mut().enumerate() {
            if (i / 4 + i % 4) % 2 == 0 {
                *pixel = Rgb::WHITE;
            }
        }

        let block = compress(&tile);
        assert_eq!(block.colour0, pack(Rgb::WHITE));
        assert_eq!(block.colour1, pack(Rgb::BLACK));
        for (i, pixel) in tile.iter().enumerate() {
            let expected = if *pixel == Rgb::WHITE { 0 } else { 1 };
            assert_eq!(block.index(i % 4, i / 4), expected, "pixel {i}");
        }
        assert_eq!(decompress(&block), tile);
    }

    #[test]
    fn grey_ramp_selects_interpolated_entries() {
        // max = 255, min = 0: the palette is 0xFFFF, 0x0000, 0xAD55, 0x52AA
        let mut tile = [Rgb::BLACK; 16];
        tile[0] = Rgb::WHITE;
        tile[1] = Rgb::new(170, 170, 170);
        tile[2] = Rgb::new(85, 85, 85);

        let block = compress(&tile);
        assert_eq!(decode_indices(block.indices[0]), [0, 2, 3, 1]);
        assert_eq!(block.indices[1..], [0b01010101; 3]);

        let decoded = decompress(&block);
        assert_eq!(decoded[0], Rgb::WHITE);
        assert_eq!(decoded[1], Rgb::new(170, 170, 170));
        assert_eq!(decoded[2], Rgb::new(85, 85, 85));
        assert_eq!(decoded[3], Rgb::BLACK);
    }

    #[test]
    fn endpoints_are_channel_wise_not_actual_pixels() {
        let mut tile = [Rgb::new(255, 0, 0); 16];
        tile[15] = Rgb::new(0, 0, 255);

        let block = compress(&tile);
        assert_eq!(block.colour0, pack(Rgb::new(255, 0, 255)));
        assert_eq!(block.colour1, pack(Rgb::BLACK));
    }

    #[test]
    fn index_bytes_round_trip_for_every_value() {
        for byte in 0..=u8::MAX {
            let row = decode_indices(byte);
            assert_eq!(encode_indices(row), byte);
            assert_eq!(row[3], byte >> 6);
            assert_eq!(row[0], byte & 0x3);
        }
    }

    #[test]
    fn index_reads_the_right_bit_pair() {
        let block = Block {
            colour0: Colour565(0),
            colour1: Colour565(0),
            indices: [0b11_10_01_00, 0, 0, 0b00_00_00_11],
        };
        assert_eq!(block.index(0, 0), 0);
        assert_eq!(block.index(1, 0), 1);
        assert_eq!(block.index(2, 0), 2);
        assert_eq!(block.index(3, 0), 3);
        assert_eq!(block.index(0, 3), 3);
        assert_eq!(block.index(3, 3), 0);
    }

    #[test]
    fn wire_layout_is_little_endian() {
        let bytes = [0x34, 0x12, 0x78, 0x56, 0xE4, 0x01, 0x02, 0x03];
        let block = Block::from_bytes(&bytes);
        assert_eq!(block.colour0, Colour565(0x1234));
        assert_eq!(block.colour1, Colour565(0x5678));
        assert_eq!(block.indices, [0xE4, 0x01, 0x02, 0x03]);
        assert_eq!(block.to_bytes(), bytes);
    }

    #[test]
    fn decoding_ignores_endpoint_order() {
        // colour0 < colour1 would select the three-colour mode in real BC1;
        // here every index still refers to the four-colour palette.
        let block = Block {
            colour0: Colour565(0x0000),
            colour1: Colour565(0xFFFF),
            indices: [0b11_10_01_00; 4],
        };
        let tile = decompress(&block);
        assert_eq!(tile[0], Rgb::BLACK);
        assert_eq!(tile[1], Rgb::WHITE);
        assert_eq!(tile[2], Rgb::new(85, 85, 85));
        assert_eq!(tile[3], Rgb::new(170, 170, 170));
    }
}
