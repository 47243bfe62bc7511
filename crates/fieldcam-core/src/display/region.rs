use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

/// Rectangular area of the panel, in display pixel coordinates, whose
/// content changed since the last push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRegion {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DirtyRegion {
    /// Create a region from its top-left corner and size.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the region covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the rightmost column.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Smallest region covering both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Bounding box of every region in `regions`, `None` if there are none.
    pub fn bounding<I>(regions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        regions.into_iter().reduce(Self::union)
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Same area as an `embedded-graphics` rectangle.
    pub fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x as i32, self.y as i32),
            Size::new(self.width, self.height),
        )
    }
}

impl From<Rectangle> for DirtyRegion {
    /// Parts of the rectangle left of or above the origin are cut off.
    fn from(rect: Rectangle) -> Self {
        let x = rect.top_left.x.max(0);
        let y = rect.top_left.y.max(0);
        let cut_x = (x - rect.top_left.x) as u32;
        let cut_y = (y - rect.top_left.y) as u32;
        Self {
            x: x as u32,
            y: y as u32,
            width: rect.size.width.saturating_sub(cut_x),
            height: rect.size.height.saturating_sub(cut_y),
        }
    }
}
