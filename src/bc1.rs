//! Whole-image BC1 encoding and decoding.
//!
//! Every function here expects dimensions that are non-zero multiples of 4
//! and, when decoding, exactly one block per tile. Violating this leads to
//! out-of-bounds tile addressing and a panic rather than an error; use
//! [`check_dimensions`](crate::plane::check_dimensions) and
//! [`blocks_from_bytes`] at the boundary.

use crate::colourblock::{self, Block, BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::plane::{BlockGrid, PixelBuffer, RgbImage};

/// Compresses an image into its row-major block stream.
///
/// The first block covers the top-left tile of the picture, which is the
/// last rows of the buffer.
pub fn compress<P: PixelBuffer + ?Sized>(image: &P) -> Vec<Block> {
    let grid = BlockGrid::new(image.width(), image.height());
    (0..grid.len())
        .map(|index| {
            let (column, row) = grid.position(index);
            colourblock::compress(&grid.extract_tile(image, column, row))
        })
        .collect()
}

/// Decompresses a block stream into `output`.
///
/// * `blocks` - One block per tile, in stream order
/// * `output` - Destination buffer; its size defines the block grid
pub fn decompress<P: PixelBuffer + ?Sized>(blocks: &[Block], output: &mut P) {
    let grid = BlockGrid::new(output.width(), output.height());
    assert_eq!(blocks.len(), grid.len());

    for (index, block) in blocks.iter().enumerate() {
        let (column, row) = grid.position(index);
        grid.place_tile(&mut *output, column, row, &colourblock::decompress(block));
    }
}

/// Decompresses a block stream into a newly allocated image.
pub fn decompress_image(blocks: &[Block], width: usize, height: usize) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    decompress(blocks, &mut image);
    image
}

/// Serialises blocks back to back in their wire layout.
pub fn blocks_to_bytes(blocks: &[Block]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(blocks.len() * BLOCK_SIZE);
    for block in blocks {
        bytes.extend_from_slice(&block.to_bytes());
    }
    bytes
}

/// Splits a raw stream into blocks.
///
/// Fails if the stream length is not a multiple of the block size.
pub fn blocks_from_bytes(bytes: &[u8]) -> Result<Vec<Block>> {
    if bytes.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidStreamLength(bytes.len()));
    }

    Ok(bytes
        .chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let mut raw = [0u8; BLOCK_SIZE];
            raw.copy_from_slice(chunk);
            Block::from_bytes(&raw)
        })
        .collect())
}

/// Checks that a block stream covers an image of the given size.
pub fn check_block_count(blocks: &[Block], width: usize, height: usize) -> Result<()> {
    let expected = BlockGrid::new(width, height).len();
    if blocks.len() != expected {
        return Err(Error::BlockCountMismatch {
            expected,
            found: blocks.len(),
        });
    }
    Ok(())
}
