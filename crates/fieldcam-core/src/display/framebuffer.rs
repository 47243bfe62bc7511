use std::convert::Infallible;

use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
};

/// Off-screen 1-bit canvas matching the physical panel.
///
/// Rows are packed MSB first, `ceil(width / 8)` bytes per row. A set bit is
/// white paper, a cleared bit is ink, which is the layout e-paper
/// controllers expect. [`BinaryColor::On`] draws ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    size: Size,
    stride: usize,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    /// Blank (all white) canvas of `size`.
    pub fn new(size: Size) -> Self {
        let stride = size.width.div_ceil(8) as usize;
        Self {
            size,
            stride,
            bytes: vec![0xFF; stride * size.height as usize],
        }
    }

    /// Packed pixel data, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Color at `point`, `None` outside the canvas.
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        let (index, mask) = self.locate(point)?;
        if self.bytes[index] & mask == 0 {
            Some(BinaryColor::On)
        } else {
            Some(BinaryColor::Off)
        }
    }

    /// Number of ink pixels. Handy for diffing canvases in tests and logs.
    pub fn ink_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.size.height as i32 {
            for x in 0..self.size.width as i32 {
                if self.pixel(Point::new(x, y)) == Some(BinaryColor::On) {
                    count += 1;
                }
            }
        }
        count
    }

    fn locate(&self, point: Point) -> Option<(usize, u8)> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        if x >= self.size.width as usize || y >= self.size.height as usize {
            return None;
        }
        Some((y * self.stride + x / 8, 0x80 >> (x % 8)))
    }

    fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        // Primitives may overhang the panel edge; those pixels are dropped.
        if let Some((index, mask)) = self.locate(point) {
            match color {
                BinaryColor::On => self.bytes[index] &= !mask,
                BinaryColor::Off => self.bytes[index] |= mask,
            }
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }
}
