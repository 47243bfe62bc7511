use crate::{CoreError, CoreResult, render::TextMetrics};

use std::panic::Location;

use embedded_graphics::{
    mono_font::MonoFont,
    prelude::{Point, Size},
    primitives::Rectangle,
};
use error_location::ErrorLocation;

/// Label drawn in front of the elapsed time.
pub const ELAPSED_PREFIX: &str = "Time: ";

/// Label drawn in front of the storage percentage.
pub const STORAGE_PREFIX: &str = "Storage: ";

const HEADER_HEIGHT: u32 = 20;
const INDICATOR_SIDE: u32 = 31;
const BAR_MARGIN: u32 = 10;
const BAR_HEIGHT: u32 = 11;

/// Fixed positions of every field on the status screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Panel dimensions.
    pub panel: Size,
    /// Header band holding the `REC` / `IDLE` label.
    pub status: Rectangle,
    /// Top-left of the status label text.
    pub status_text: Point,
    /// Square box of the animated indicator.
    pub indicator: Rectangle,
    /// Top-left of the `Time:` label.
    pub elapsed: Point,
    /// Top-left of the `Storage:` label.
    pub storage: Point,
    /// Storage bar including its 1px outline.
    pub bar: Rectangle,
}

impl Layout {
    /// Lay the status screen out on `panel` using `font` for labels.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DisplayInit`] if the widest labels or the bar do
    /// not fit on the panel.
    #[track_caller]
    pub fn for_panel(panel: Size, font: &MonoFont<'_>) -> CoreResult<Self> {
        let layout = Self {
            panel,
            status: Rectangle::new(Point::zero(), Size::new(panel.width, HEADER_HEIGHT)),
            status_text: Point::new(5, 3),
            indicator: Rectangle::new(
                Point::new(10, 25),
                Size::new(INDICATOR_SIDE, INDICATOR_SIDE),
            ),
            elapsed: Point::new(50, 25),
            storage: Point::new(50, 45),
            bar: Rectangle::new(
                Point::new(BAR_MARGIN as i32, 75),
                Size::new(panel.width.saturating_sub(2 * BAR_MARGIN), BAR_HEIGHT),
            ),
        };

        let widest_elapsed =
            layout.elapsed.x as u32 + font.text_width(ELAPSED_PREFIX) + font.text_width("00:00:00");
        let widest_storage =
            layout.storage.x as u32 + font.text_width(STORAGE_PREFIX) + font.text_width("100%");
        let bottom = (layout.bar.top_left.y as u32 + BAR_HEIGHT)
            .max(layout.storage.y as u32 + font.line_height());

        if widest_elapsed > panel.width
            || widest_storage > panel.width
            || bottom > panel.height
            || layout.bar.size.width < 3
        {
            return Err(CoreError::DisplayInit {
                reason: format!(
                    "Status layout does not fit a {}x{} panel",
                    panel.width, panel.height
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(layout)
    }

    /// Fillable area inside the bar outline.
    pub fn bar_interior(&self) -> Rectangle {
        Rectangle::new(
            self.bar.top_left + Point::new(1, 1),
            Size::new(
                self.bar.size.width.saturating_sub(2),
                self.bar.size.height.saturating_sub(2),
            ),
        )
    }

    /// X coordinate where the elapsed-time digits start.
    pub fn elapsed_value_x(&self, font: &MonoFont<'_>) -> i32 {
        self.elapsed.x + font.text_width(ELAPSED_PREFIX) as i32
    }
}
