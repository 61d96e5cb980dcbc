// Copyright (c) 2006 Simon Brown <si@sjbrown.co.uk>
// Copyright (c) 2018-2021 Jan Solanti <jhs@psonet.com>
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to	deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
// OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! A converter between uncompressed 24-bit BMP images and DXT1 (BC1) DDS
//! textures.
//!
//! BC1 stores every 4x4 tile of an image in an 8-byte block:
//! * two 5-6-5 endpoint colours (`colour0`, `colour1`)
//! * sixteen 2-bit indices into a palette of the two endpoints and two
//!   colours interpolated at one and two thirds between them
//!
//! The encoder uses the simplest possible endpoint choice: the channel-wise
//! maximum and minimum of the tile. Pixels are matched to the palette by
//! comparing packed 16-bit values. Both choices are kept exactly as they
//! are so that output stays byte-identical with existing files.
//!
//! The codec ([`colour`], [`palette`], [`colourblock`], [`plane`], [`bc1`])
//! is pure and infallible. The containers ([`bmp`], [`dds`]) and the
//! conversion driver ([`convert`]) validate their input and report
//! problems through [`Error`].
//!
//! ```
//! use dxtconv::{bc1, PixelBuffer, Rgb, RgbImage};
//!
//! let mut image = RgbImage::new(8, 4);
//! image.set(0, 0, Rgb::new(255, 0, 0));
//!
//! let blocks = bc1::compress(&image);
//! assert_eq!(blocks.len(), 2);
//!
//! let decoded = bc1::decompress_image(&blocks, 8, 4);
//! assert_eq!(decoded.get(0, 0), Rgb::new(255, 0, 0));
//! ```

pub mod bc1;
pub mod bmp;
pub mod colour;
pub mod colourblock;
pub mod convert;
pub mod dds;
mod error;
pub mod palette;
pub mod plane;

pub use colour::{pack, unpack, Colour565, Rgb};
pub use colourblock::{Block, BLOCK_SIZE};
pub use convert::{convert_file, Container};
pub use error::{Error, Result};
pub use plane::{check_dimensions, BlockGrid, PixelBuffer, RgbImage};

/// Returns number of blocks needed for an image of given dimension
pub fn num_blocks(size: usize) -> usize {
    (size + 3) / 4
}

/// Computes the amount of space in bytes needed for the block stream of an
/// image of given size
///
/// * `width`  - Width of the uncompressed image
/// * `height` - Height of the uncompressed image
pub fn compressed_size(width: usize, height: usize) -> usize {
    num_blocks(width) * num_blocks(height) * BLOCK_SIZE
}

//--------------------------------------------------------------------------------
// Unit tests
//--------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_blocks() {
        assert_eq!(num_blocks(0), 0);
        assert_eq!(num_blocks(1), 1);
        assert_eq!(num_blocks(2), 1);
        assert_eq!(num_blocks(3), 1);
        assert_eq!(num_blocks(4), 1);
        assert_eq!(num_blocks(5), 2);
        assert_eq!(num_blocks(6), 2);
    }

    #[test]
    fn test_compressed_size() {
        assert_eq!(compressed_size(4, 4), 8);
        assert_eq!(compressed_size(256, 256), 32768);
        assert_eq!(compressed_size(0, 4), 0);
    }
}
