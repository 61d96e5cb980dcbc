//! Derivation of the two interpolated palette entries of a block.
//!
//! The palette of a block is always
//! `[colour0, colour1, 2/3·colour0 + 1/3·colour1, 1/3·colour0 + 2/3·colour1]`.
//! There is no three-colour mode: the order of the endpoints carries no meaning.

use crate::colour::{pack, unpack, Colour565, Rgb};

const TWO_THIRDS: f32 = 2.0 / 3.0;
const ONE_THIRD: f32 = 1.0 / 3.0;

/// Weighted mix of two channels, truncated towards zero.
#[inline]
fn mix(major: u8, minor: u8) -> u8 {
    (TWO_THIRDS * major as f32 + ONE_THIRD * minor as f32) as u8
}

/// Returns `(colour2, colour3)` for the endpoints `colour0` and `colour1`.
///
/// Interpolation happens in 8-bit space with single precision weights; the
/// float result is truncated, not rounded.
pub fn interpolate(colour0: Rgb, colour1: Rgb) -> (Rgb, Rgb) {
    let colour2 = Rgb::new(
        mix(colour0.r, colour1.r),
        mix(colour0.g, colour1.g),
        mix(colour0.b, colour1.b),
    );
    let colour3 = Rgb::new(
        mix(colour1.r, colour0.r),
        mix(colour1.g, colour0.g),
        mix(colour1.b, colour0.b),
    );
    (colour2, colour3)
}

/// Palette used while encoding, in packed form so pixels can be matched
/// against it by [`Colour565::packed_distance`].
///
/// * `max` - channel-wise maximum of the tile, becomes `colour0`
/// * `min` - channel-wise minimum of the tile, becomes `colour1`
pub fn encoder_palette(max: Rgb, min: Rgb) -> [Colour565; 4] {
    let (colour2, colour3) = interpolate(max, min);
    [pack(max), pack(min), pack(colour2), pack(colour3)]
}

/// Palette used while decoding.
///
/// The interpolated entries are recomputed from the expanded endpoints, so
/// they can differ slightly from those the encoder compared against.
pub fn decoder_palette(colour0: Colour565, colour1: Colour565) -> [Rgb; 4] {
    let c0 = unpack(colour0);
    let c1 = unpack(colour1);
    let (c2, c3) = interpolate(c0, c1);
    [c0, c1, c2, c3]
}
