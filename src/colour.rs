//! 8-8-8 pixels and their 5-6-5 packed counterparts.

/// A single 24-bit pixel without alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Channel-wise maximum of two colours.
    ///
    /// The result is generally not one of the two inputs.
    pub fn max(self, other: Rgb) -> Rgb {
        Rgb::new(self.r.max(other.r), self.g.max(other.g), self.b.max(other.b))
    }

    /// Channel-wise minimum of two colours.
    pub fn min(self, other: Rgb) -> Rgb {
        Rgb::new(self.r.min(other.r), self.g.min(other.g), self.b.min(other.b))
    }

    /// Channel-wise maximum and minimum over a set of pixels.
    ///
    /// Returns `(BLACK, WHITE)` for an empty set, which is never the case for a tile.
    pub fn bounds<'a, I>(pixels: I) -> (Rgb, Rgb)
    where
        I: IntoIterator<Item = &'a Rgb>,
    {
        pixels
            .into_iter()
            .fold((Rgb::BLACK, Rgb::WHITE), |(max, min), &p| (max.max(p), min.min(p)))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(p: Rgb) -> Self {
        [p.r, p.g, p.b]
    }
}

/// A 16-bit colour with 5 bits red (high), 6 bits green and 5 bits blue (low)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Colour565(pub u16);

impl Colour565 {
    /// Returns the raw 16-bit value
    #[inline]
    pub fn value(self) -> u16 {
        self.0
    }

    /// Squared difference of the two packed values, treated as plain integers.
    ///
    /// This is not a colour distance: a one step change in red outweighs
    /// any change in green or blue.
    #[inline]
    pub fn packed_distance(self, other: Colour565) -> u32 {
        let d = self.0.abs_diff(other.0) as u32;
        d * d
    }
}

/// Quantises a pixel to 5-6-5 by truncating the low bits of each channel.
#[inline]
pub fn pack(p: Rgb) -> Colour565 {
    let r = (p.r as u16 >> 3) << 11;
    let g = (p.g as u16 >> 2) << 5;
    let b = p.b as u16 >> 3;
    Colour565(r | g | b)
}

/// Expands a 5-6-5 colour back to 8 bits per channel.
///
/// The vacated low bits are filled with the field's own top bits so that
/// 0 maps to 0 and the field maximum maps to 255.
#[inline]
pub fn unpack(c: Colour565) -> Rgb {
    let r = ((c.0 >> 11) & 0x1F) as u8;
    let g = ((c.0 >> 5) & 0x3F) as u8;
    let b = (c.0 & 0x1F) as u8;
    Rgb::new((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rgb::new(255, 0, 0), 0xF800)]
    #[case(Rgb::new(0, 255, 0), 0x07E0)]
    #[case(Rgb::new(0, 0, 255), 0x001F)]
    #[case(Rgb::WHITE, 0xFFFF)]
    #[case(Rgb::BLACK, 0x0000)]
    #[case(Rgb::new(170, 170, 170), 0xAD55)]
    #[case(Rgb::new(7, 3, 7), 0x0000)]
    fn pack_truncates_each_channel(#[case] pixel: Rgb, #[case] expected: u16) {
        assert_eq!(pack(pixel), Colour565(expected));
    }

    #[test]
    fn pure_colours_round_trip_exactly() {
        for bits in 0..8u8 {
            let channel = |bit: u8| if bits & bit != 0 { 255 } else { 0 };
            let p = Rgb::new(channel(1), channel(2), channel(4));
            assert_eq!(unpack(pack(p)), p);
        }
    }

    #[test]
    fn lossy_round_trip_is_bounded() {
        for v in 0..=255u8 {
            let p = Rgb::new(v, v, v);
            let q = unpack(pack(p));
            assert!(p.r.abs_diff(q.r) <= 7, "red {v} -> {}", q.r);
            assert!(p.g.abs_diff(q.g) <= 3, "green {v} -> {}", q.g);
            assert!(p.b.abs_diff(q.b) <= 7, "blue {v} -> {}", q.b);
        }
    }

    #[test]
    fn unpack_then_pack_is_identity() {
        for raw in 0..=u16::MAX {
            assert_eq!(pack(unpack(Colour565(raw))), Colour565(raw));
        }
    }

    #[test]
    fn unpack_replicates_high_bits() {
        // r = 0b10000 -> 0b10000_100, g = 0b100000 -> 0b100000_10
        assert_eq!(unpack(Colour565(0x8400)), Rgb::new(0x84, 0x82, 0x00));
        assert_eq!(unpack(Colour565(0x0010)), Rgb::new(0x00, 0x00, 0x84));
    }

    #[test]
    fn bounds_are_channel_wise() {
        let pixels = [Rgb::new(200, 10, 50), Rgb::new(20, 100, 60), Rgb::new(90, 90, 5)];
        let (max, min) = Rgb::bounds(&pixels);
        assert_eq!(max, Rgb::new(200, 100, 60));
        assert_eq!(min, Rgb::new(20, 10, 5));
    }

    #[test]
    fn packed_distance_compares_raw_values() {
        assert_eq!(Colour565(0xFFFF).packed_distance(Colour565(0)), 65535 * 65535);
        assert_eq!(Colour565(3).packed_distance(Colour565(5)), 4);
        assert_eq!(Colour565(5).packed_distance(Colour565(3)), 4);
    }
}
