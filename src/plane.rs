//! Mapping between pixel buffer coordinates and the block stream.
//!
//! Pixel buffers hold rows in raster container order: `y = 0` is the first
//! row stored in a bottom-up bitmap, i.e. the bottom of the picture. The
//! block stream runs top to bottom, so every tile is read and written with
//! its rows flipped.
//!
//! None of the functions here check bounds against the image size beyond
//! what the buffer itself does. Callers validate dimensions with
//! [`check_dimensions`] before touching the codec.

use crate::colour::Rgb;
use crate::error::{Error, Result};

/// Point access to a caller-owned raster.
///
/// The codec only ever reads or writes single pixels, so any storage layout
/// can be plugged in.
pub trait PixelBuffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Reads the pixel at (`x`, `y`)
    fn get(&self, x: usize, y: usize) -> Rgb;

    /// Overwrites the pixel at (`x`, `y`)
    fn set(&mut self, x: usize, y: usize, pixel: Rgb);
}

/// A row-major, heap allocated RGB raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Creates a black image of the given size
    pub fn new(width: usize, height: usize) -> Self {
        RgbImage {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    /// Creates an image from row-major pixels.
    ///
    /// Returns `None` if `pixels` does not hold exactly `width * height` entries.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Option<Self> {
        (pixels.len() == width * height).then_some(RgbImage {
            width,
            height,
            pixels,
        })
    }

    /// Row-major pixel storage
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// A single row of pixels
    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}

impl PixelBuffer for RgbImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, pixel: Rgb) {
        self.pixels[y * self.width + x] = pixel;
    }
}

/// Rejects sizes the codec cannot address: zero or not a multiple of 4.
pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width % 4 != 0 || height % 4 != 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

/// The grid of 4x4 tiles covering an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    width: usize,
    height: usize,
}

impl BlockGrid {
    /// Both dimensions are expected to be multiples of 4.
    pub fn new(width: usize, height: usize) -> Self {
        BlockGrid { width, height }
    }

    /// Number of blocks in one block row
    pub fn blocks_wide(&self) -> usize {
        crate::num_blocks(self.width)
    }

    /// Number of block rows
    pub fn blocks_high(&self) -> usize {
        crate::num_blocks(self.height)
    }

    /// Total number of blocks in the stream
    pub fn len(&self) -> usize {
        self.blocks_wide() * self.blocks_high()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(column, row)` of the block at position `index` in the stream
    #[inline]
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index % self.blocks_wide(), index / self.blocks_wide())
    }

    /// Buffer coordinates of pixel (`j`, `k`) of the tile at block
    /// (`column`, `row`), where `k = 0` is the top row of the tile.
    #[inline]
    pub fn pixel(&self, column: usize, row: usize, j: usize, k: usize) -> (usize, usize) {
        (column * 4 + j, (self.height - 1) - (row * 4 + k))
    }

    /// Gathers the tile at block (`column`, `row`) in row-major order.
    pub fn extract_tile<P: PixelBuffer + ?Sized>(
        &self,
        image: &P,
        column: usize,
        row: usize,
    ) -> [Rgb; 16] {
        let mut tile = [Rgb::default(); 16];
        for (i, pixel) in tile.iter_mut().enumerate() {
            let (x, y) = self.pixel(column, row, i % 4, i / 4);
            *pixel = image.get(x, y);
        }
        tile
    }

    /// Writes a row-major tile to its place in the image.
    pub fn place_tile<P: PixelBuffer + ?Sized>(
        &self,
        image: &mut P,
        column: usize,
        row: usize,
        tile: &[Rgb; 16],
    ) {
        for (i, &pixel) in tile.iter().enumerate() {
            let (x, y) = self.pixel(column, row, i % 4, i / 4);
            image.set(x, y, pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coordinate_image(width: usize, height: usize) -> RgbImage {
        let mut image = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set(x, y, Rgb::new(x as u8, y as u8, 0));
            }
        }
        image
    }

    #[rstest]
    #[case(4, 4, true)]
    #[case(8, 4, true)]
    #[case(256, 128, true)]
    #[case(0, 4, false)]
    #[case(4, 0, false)]
    #[case(6, 4, false)]
    #[case(4, 10, false)]
    fn dimension_check(#[case] width: usize, #[case] height: usize, #[case] ok: bool) {
        assert_eq!(check_dimensions(width, height).is_ok(), ok);
    }

    #[test]
    fn grid_counts_blocks_row_major() {
        let grid = BlockGrid::new(12, 8);
        assert_eq!(grid.blocks_wide(), 3);
        assert_eq!(grid.blocks_high(), 2);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.position(0), (0, 0));
        assert_eq!(grid.position(2), (2, 0));
        assert_eq!(grid.position(3), (0, 1));
        assert_eq!(grid.position(5), (2, 1));
    }

    #[test]
    fn first_block_starts_at_last_buffer_row() {
        let grid = BlockGrid::new(8, 8);
        assert_eq!(grid.pixel(0, 0, 0, 0), (0, 7));
        assert_eq!(grid.pixel(0, 0, 3, 3), (3, 4));
        assert_eq!(grid.pixel(1, 0, 0, 0), (4, 7));
        assert_eq!(grid.pixel(1, 1, 3, 3), (7, 0));
    }

    #[test]
    fn extract_tile_flips_rows() {
        let image = coordinate_image(8, 4);
        let tile = image_tile(&image, 1, 0);
        assert_eq!(tile[0], Rgb::new(4, 3, 0));
        assert_eq!(tile[3], Rgb::new(7, 3, 0));
        assert_eq!(tile[12], Rgb::new(4, 0, 0));
        assert_eq!(tile[15], Rgb::new(7, 0, 0));
    }

    fn image_tile(image: &RgbImage, column: usize, row: usize) -> [Rgb; 16] {
        BlockGrid::new(image.width(), image.height()).extract_tile(image, column, row)
    }

    #[rstest]
    #[case(8, 4)]
    #[case(4, 8)]
    #[case(12, 8)]
    #[case(16, 16)]
    fn place_inverts_extract(#[case] width: usize, #[case] height: usize) {
        let source = coordinate_image(width, height);
        let grid = BlockGrid::new(width, height);
        let mut target = RgbImage::new(width, height);
        for index in 0..grid.len() {
            let (column, row) = grid.position(index);
            let tile = grid.extract_tile(&source, column, row);
            grid.place_tile(&mut target, column, row, &tile);
        }
        assert_eq!(target, source);
    }

    #[test]
    fn every_pixel_is_covered_once() {
        let grid = BlockGrid::new(12, 8);
        let mut hits = vec![0u32; 12 * 8];
        for index in 0..grid.len() {
            let (column, row) = grid.position(index);
            for i in 0..16 {
                let (x, y) = grid.pixel(column, row, i % 4, i / 4);
                hits[y * 12 + x] += 1;
            }
        }
        assert!(hits.iter().all(|&h| h == 1));
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(RgbImage::from_pixels(4, 4, vec![Rgb::BLACK; 16]).is_some());
        assert!(RgbImage::from_pixels(4, 4, vec![Rgb::BLACK; 15]).is_none());
    }
}
