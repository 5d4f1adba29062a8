//! Turns iteration counts into colours.  The palette is a fixed
//! modular ramp, not a perceptual one: the same count always gives
//! the same three bytes.

/// One 8-bit-per-channel RGB pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct PixelColor {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl PixelColor {
    /// Interior points.
    pub const BLACK: PixelColor = PixelColor { r: 0, g: 0, b: 0 };

    /// Constructor.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        PixelColor { r, g, b }
    }

    /// The channels in the order they're laid out in a buffer.
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

fn channel(n: usize, multiplier: u64) -> u8 {
    ((n as u64).wrapping_mul(multiplier) % 255) as u8
}

/// Points that never escaped are black; everything else gets
/// `(50n mod 255, 30n mod 255, 20n mod 255)`.
pub fn color_of(n: usize, max_iterations: usize) -> PixelColor {
    if n == max_iterations {
        return PixelColor::BLACK;
    }
    PixelColor::new(channel(n, 50), channel(n, 30), channel(n, 20))
}
