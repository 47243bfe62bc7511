use crate::{
    CoreResult,
    display::{DirtyRegion, FrameBuffer},
};

use embedded_graphics::prelude::Size;

/// Electrical refresh mode of a bistable panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Slow, flashing refresh that clears ghosting.
    Full,
    /// Fast refresh of changed pixels only.
    Partial,
}

/// Capability implemented by physical (or virtual) panel drivers.
///
/// The renderer only ever hands over a complete frame; which pixels are
/// physically transferred is up to the driver. `region` is a hint covering
/// every pixel that changed since the previous push.
pub trait DisplayDriver: Send {
    /// Panel dimensions in pixels.
    fn size(&self) -> Size;

    /// Power up the controller and select the refresh mode for later pushes.
    fn init(&mut self, mode: RefreshMode) -> CoreResult<()>;

    /// Blank the panel to white.
    fn clear(&mut self) -> CoreResult<()>;

    /// Show `frame`.
    fn render(&mut self, frame: &FrameBuffer, region: Option<DirtyRegion>) -> CoreResult<()>;

    /// Put the controller into deep sleep. The image is retained.
    fn sleep(&mut self) -> CoreResult<()>;
}

impl<D: DisplayDriver + ?Sized> DisplayDriver for Box<D> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn init(&mut self, mode: RefreshMode) -> CoreResult<()> {
        (**self).init(mode)
    }

    fn clear(&mut self) -> CoreResult<()> {
        (**self).clear()
    }

    fn render(&mut self, frame: &FrameBuffer, region: Option<DirtyRegion>) -> CoreResult<()> {
        (**self).render(frame, region)
    }

    fn sleep(&mut self) -> CoreResult<()> {
        (**self).sleep()
    }
}
