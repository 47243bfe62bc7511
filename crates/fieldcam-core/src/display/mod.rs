//! Panel capability and the 1-bit canvas pushed to it.
//!
//! Hardware drivers implement [`DisplayDriver`]. [`PbmDisplay`] is a virtual
//! panel that writes each frame to a portable-bitmap file.

mod driver;
mod framebuffer;
mod pbm;
mod region;

pub use {
    driver::{DisplayDriver, RefreshMode},
    framebuffer::FrameBuffer,
    pbm::{PbmDisplay, RefreshStats},
    region::DirtyRegion,
};
