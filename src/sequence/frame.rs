use image::{ImageBuffer, Rgba, RgbaImage};

/// An RGBA color used for canvas fills (fully transparent by default).
pub type Color = [u8; 4];

/// Fully transparent black, the default canvas background.
pub const TRANSPARENT: Color = [0, 0, 0, 0];

/// A single raster frame within an animated sequence
///
/// Wraps an RGBA image buffer. The alpha channel is required so frames can be
/// layered correctly during composition. A `Frame` is never mutated after
/// construction; editing operations build new frames instead.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    buffer: RgbaImage,
}

impl Frame {
    /// Create a new frame from an RGBA image buffer
    pub fn new(buffer: RgbaImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: Color) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba(color));
        Self { buffer }
    }

    /// Create a new fully transparent frame with the given dimensions
    pub fn new_transparent(width: u32, height: u32) -> Self {
        Self::new_filled(width, height, TRANSPARENT)
    }

    /// Get the width of the frame
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the height of the frame
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates (returns RGBA array)
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.buffer.get_pixel(x, y).0
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Consume the frame and return the underlying image buffer
    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }

    /// Convert the frame to raw RGBA bytes
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.buffer.as_raw().clone()
    }

    /// Create a frame from raw RGBA bytes
    pub fn from_rgba_bytes(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, data).map(|buffer| Self { buffer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_frame_has_uniform_pixels() {
        let frame = Frame::new_filled(4, 3, [255, 0, 0, 255]);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.get_pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(3, 2), [255, 0, 0, 255]);
    }

    #[test]
    fn transparent_frame_has_zero_alpha() {
        let frame = Frame::new_transparent(2, 2);
        assert_eq!(frame.get_pixel(1, 1), TRANSPARENT);
    }

    #[test]
    fn rgba_bytes_roundtrip() {
        let frame = Frame::new_filled(2, 1, [1, 2, 3, 4]);
        let bytes = frame.to_rgba_bytes();
        let restored = Frame::from_rgba_bytes(2, 1, bytes).unwrap();
        assert_eq!(restored, frame);
    }

    #[test]
    fn from_rgba_bytes_rejects_short_buffer() {
        assert!(Frame::from_rgba_bytes(2, 2, vec![0; 4]).is_none());
    }
}
