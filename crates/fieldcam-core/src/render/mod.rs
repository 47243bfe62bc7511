//! Dirty-region status screen.

mod elapsed;
mod frame_state;
pub(crate) mod indicator;
pub(crate) mod layout;
mod renderer;
mod text;

pub use {
    elapsed::{TextChange, diff_text, format_elapsed},
    frame_state::FrameState,
    indicator::{IndicatorStyle, IndicatorVariant},
    layout::{ELAPSED_PREFIX, Layout, STORAGE_PREFIX},
    renderer::{DirtyField, RenderOutcome, RendererOptions, StatusFacts, StatusRenderer},
    text::{StatusFont, TextMetrics},
};
