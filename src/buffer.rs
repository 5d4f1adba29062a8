//! A rectangular block of RGB pixels, stored row-major, three bytes
//! per pixel.  A worker's local buffer holds only its own rows; the
//! coordinator's final buffer holds all of them.

use crate::errors::RenderError;
use crate::palette::PixelColor;

/// Bytes per pixel.
pub const CHANNELS: usize = 3;

/// Row-major RGB pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    rows: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// A black buffer `width` pixels wide and `rows` rows tall.
    pub fn new(width: usize, rows: usize) -> Self {
        PixelBuffer {
            width,
            rows,
            data: vec![0 as u8; width * rows * CHANNELS],
        }
    }

    /// Wraps bytes that arrived from elsewhere.  The length has to
    /// match the shape exactly.
    pub fn from_bytes(width: usize, rows: usize, data: Vec<u8>) -> Result<Self, RenderError> {
        let expected = width * rows * CHANNELS;
        if data.len() != expected {
            return Err(RenderError::Config(format!(
                "A {}x{} buffer needs {} bytes, not {}.",
                width,
                rows,
                expected,
                data.len()
            )));
        }
        Ok(PixelBuffer { width, rows, data })
    }

    /// Number of bytes a single row occupies.
    pub fn row_len(width: usize) -> usize {
        width * CHANNELS
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows held.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The linear offset of a pixel's first byte.
    fn offset(&self, x: usize, row: usize) -> usize {
        assert!(x < self.width && row < self.rows, "pixel out of bounds");
        (row * self.width + x) * CHANNELS
    }

    /// Writes one pixel.
    pub fn put(&mut self, x: usize, row: usize, color: PixelColor) {
        let offset = self.offset(x, row);
        self.data[offset..offset + CHANNELS].copy_from_slice(&color.channels());
    }

    /// Reads one pixel.
    pub fn get(&self, x: usize, row: usize) -> PixelColor {
        let offset = self.offset(x, row);
        PixelColor::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        )
    }

    /// The bytes of one row.
    pub fn row(&self, row: usize) -> &[u8] {
        let len = PixelBuffer::row_len(self.width);
        &self.data[row * len..(row + 1) * len]
    }

    /// All the bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Gives up the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
