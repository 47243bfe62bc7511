use crate::{
    CoreError, CoreResult, Percent,
    display::{DirtyRegion, DisplayDriver, FrameBuffer, RefreshMode},
    render::{
        ELAPSED_PREFIX, FrameState, IndicatorStyle, Layout, STORAGE_PREFIX, StatusFont,
        TextChange, TextMetrics, diff_text, format_elapsed, indicator::draw_indicator,
    },
};

use std::{panic::Location, time::Duration};

use embedded_graphics::{
    Drawable,
    mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::{Point, Primitive, Size},
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Live facts rendered on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFacts {
    /// Whether a session is active.
    pub recording: bool,
    /// Time since the session started, zero when idle.
    pub elapsed: Duration,
    /// Used capacity of the recording volume.
    pub storage: Percent,
}

/// Visual field a dirty region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyField {
    /// `REC` / `IDLE` header.
    Status,
    /// Elapsed time digits (and the label on a whole redraw).
    Elapsed,
    /// `Storage: NN%` label.
    StorageLabel,
    /// Storage bar.
    StorageBar,
    /// Animated indicator, redrawn every tick.
    Indicator,
}

/// What one successful [`StatusRenderer::render`] drew and pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Every region drawn this tick, in drawing order.
    pub regions: Vec<(DirtyField, DirtyRegion)>,
    /// Refresh mode of the push.
    pub refresh: RefreshMode,
}

impl RenderOutcome {
    /// Regions of value-tracked fields, i.e. all but the indicator.
    pub fn field_regions(&self) -> impl Iterator<Item = &(DirtyField, DirtyRegion)> {
        self.regions
            .iter()
            .filter(|(field, _)| *field != DirtyField::Indicator)
    }

    /// Region drawn for `field`, if any.
    pub fn region(&self, field: DirtyField) -> Option<DirtyRegion> {
        self.regions
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, region)| *region)
    }

    /// Bounding box of everything drawn.
    pub fn bounds(&self) -> Option<DirtyRegion> {
        DirtyRegion::bounding(self.regions.iter().map(|(_, region)| *region))
    }
}

/// Renderer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererOptions {
    /// Label font.
    pub font: StatusFont,
    /// Indicator variant per recording state.
    pub indicator: IndicatorStyle,
    /// Push with a full refresh on the tick the recording flag flips.
    pub full_refresh_on_transition: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            font: StatusFont::default(),
            indicator: IndicatorStyle::default(),
            full_refresh_on_transition: true,
        }
    }
}

/// Dirty-region status screen renderer.
///
/// Keeps an off-screen canvas that always mirrors the last successful push
/// and a [`FrameState`] describing it. Each tick only the fields whose value
/// differs from `FrameState` are drawn, then the canvas is pushed once.
pub struct StatusRenderer<D> {
    display: D,
    layout: Layout,
    options: RendererOptions,
    canvas: FrameBuffer,
    state: FrameState,
    asleep: bool,
}

impl<D: DisplayDriver> StatusRenderer<D> {
    /// Initialize and clear `display`, then leave it in partial mode.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DisplayInit`] if the layout does not fit the
    /// panel or the driver fails to initialize or clear. This is fatal.
    #[track_caller]
    #[instrument(skip(display))]
    pub fn new(mut display: D, options: RendererOptions) -> CoreResult<Self> {
        let panel = display.size();
        let layout = Layout::for_panel(panel, options.font.mono_font())?;

        init_step(display.init(RefreshMode::Full), "full-mode init")?;
        init_step(display.clear(), "clear")?;
        init_step(display.init(RefreshMode::Partial), "partial-mode init")?;

        info!(
            width = panel.width,
            height = panel.height,
            "Status display initialized"
        );

        Ok(Self {
            display,
            layout,
            options,
            canvas: FrameBuffer::new(panel),
            state: FrameState::default(),
            asleep: false,
        })
    }

    /// Draw the fields that changed and push one frame.
    ///
    /// A panel put to sleep by [`StatusRenderer::shutdown`] is woken in
    /// partial mode first.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if waking or the push fails. The canvas is
    /// rolled back and `FrameState` is left untouched, so the next call
    /// redraws the same fields.
    #[instrument(skip(self))]
    pub fn render(&mut self, facts: StatusFacts) -> CoreResult<RenderOutcome> {
        if self.asleep {
            self.display.init(RefreshMode::Partial)?;
            self.asleep = false;
            debug!("Status display woken");
        }

        let snapshot = self.canvas.clone();
        let mut regions: Vec<(DirtyField, DirtyRegion)> = Vec::with_capacity(5);

        let flipped = self
            .state
            .last_recording
            .is_some_and(|shown| shown != facts.recording);

        if self.state.last_recording != Some(facts.recording) {
            regions.push((DirtyField::Status, self.draw_status(facts.recording)));
        }

        let elapsed_text = format_elapsed(facts.elapsed);
        if let Some(region) = self.draw_elapsed(&elapsed_text) {
            regions.push((DirtyField::Elapsed, region));
        }

        if self.state.last_storage != Some(facts.storage) {
            regions.push((DirtyField::StorageLabel, self.draw_storage_label(facts.storage)));
            regions.push((DirtyField::StorageBar, self.draw_storage_bar(facts.storage)));
        }

        let phase = !self.state.blink_phase;
        let variant = self.options.indicator.variant(facts.recording);
        draw_indicator(&mut self.canvas, self.layout.indicator, variant, phase);
        regions.push((DirtyField::Indicator, self.layout.indicator.into()));

        let refresh = if flipped && self.options.full_refresh_on_transition {
            RefreshMode::Full
        } else {
            RefreshMode::Partial
        };
        let bounds = DirtyRegion::bounding(regions.iter().map(|(_, region)| *region));

        if let Err(e) = self.push(refresh, bounds) {
            self.canvas = snapshot;
            return Err(e);
        }

        self.state.last_recording = Some(facts.recording);
        self.state.last_elapsed_text = Some(elapsed_text);
        self.state.last_storage = Some(facts.storage);
        self.state.blink_phase = phase;

        debug!(regions = regions.len(), ?refresh, ?bounds, "Status frame pushed");

        Ok(RenderOutcome { regions, refresh })
    }

    /// Clear the panel and put it to sleep. The next render wakes it and
    /// redraws every field.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if init, clear or sleep fails.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self) -> CoreResult<()> {
        self.display.init(RefreshMode::Full)?;
        self.display.clear()?;
        self.display.sleep()?;
        self.asleep = true;

        self.canvas = FrameBuffer::new(self.layout.panel);
        self.state = FrameState::default();

        info!("Status display cleared and sleeping");

        Ok(())
    }

    /// Record of what is on the panel.
    pub fn frame_state(&self) -> &FrameState {
        &self.state
    }

    /// Canvas as last pushed.
    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    /// Field positions in use.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The driver.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The driver, mutably.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Width of the bar fill for `percent`, within the bar interior.
    pub fn bar_fill_width(&self, percent: Percent) -> u32 {
        percent.of(self.layout.bar_interior().size.width)
    }

    fn font(&self) -> &'static MonoFont<'static> {
        self.options.font.mono_font()
    }

    fn push(&mut self, refresh: RefreshMode, bounds: Option<DirtyRegion>) -> CoreResult<()> {
        match refresh {
            RefreshMode::Partial => self.display.render(&self.canvas, bounds),
            RefreshMode::Full => {
                self.display.init(RefreshMode::Full)?;
                let pushed = self.display.render(&self.canvas, None);
                let restored = self.display.init(RefreshMode::Partial);
                pushed.and(restored)
            }
        }
    }

    fn draw_status(&mut self, recording: bool) -> DirtyRegion {
        let area = self.layout.status;
        let (label, paper, ink) = if recording {
            ("REC", BinaryColor::On, BinaryColor::Off)
        } else {
            ("IDLE", BinaryColor::Off, BinaryColor::On)
        };

        fill(&mut self.canvas, area, paper);
        let style = MonoTextStyleBuilder::new()
            .font(self.font())
            .text_color(ink)
            .background_color(paper)
            .build();
        draw_text(&mut self.canvas, label, self.layout.status_text, style);

        area.into()
    }

    fn draw_elapsed(&mut self, text: &str) -> Option<DirtyRegion> {
        let font = self.font();
        let previous = self.state.last_elapsed_text.as_deref();
        let height = font.line_height();
        let style = MonoTextStyle::new(font, BinaryColor::On);

        match diff_text(previous, text) {
            TextChange::Unchanged => None,
            TextChange::Whole => {
                let previous_width = previous.map_or(0, |p| font.text_width(p));
                let width = font.text_width(ELAPSED_PREFIX)
                    + font.text_width(text).max(previous_width);
                let area = Rectangle::new(self.layout.elapsed, Size::new(width, height));

                fill(&mut self.canvas, area, BinaryColor::Off);
                draw_text(&mut self.canvas, ELAPSED_PREFIX, self.layout.elapsed, style);
                let value_origin =
                    Point::new(self.layout.elapsed_value_x(font), self.layout.elapsed.y);
                draw_text(&mut self.canvas, text, value_origin, style);

                Some(area.into())
            }
            TextChange::From(index) => {
                // Glyphs left of `index` are already on the panel.
                let offset = font.prefix_width(text, index);
                let width = font.text_width(text) - offset;
                let origin = Point::new(
                    self.layout.elapsed_value_x(font) + offset as i32,
                    self.layout.elapsed.y,
                );
                let area = Rectangle::new(origin, Size::new(width, height));
                let tail = text
                    .char_indices()
                    .nth(index)
                    .map_or("", |(byte, _)| &text[byte..]);

                fill(&mut self.canvas, area, BinaryColor::Off);
                draw_text(&mut self.canvas, tail, origin, style);

                Some(area.into())
            }
        }
    }

    fn draw_storage_label(&mut self, percent: Percent) -> DirtyRegion {
        let font = self.font();
        let label = format!("{STORAGE_PREFIX}{percent}");
        let previous_width = self
            .state
            .last_storage
            .map_or(0, |p| font.text_width(&format!("{STORAGE_PREFIX}{p}")));
        let area = Rectangle::new(
            self.layout.storage,
            Size::new(font.text_width(&label).max(previous_width), font.line_height()),
        );

        fill(&mut self.canvas, area, BinaryColor::Off);
        draw_text(
            &mut self.canvas,
            &label,
            self.layout.storage,
            MonoTextStyle::new(font, BinaryColor::On),
        );

        area.into()
    }

    fn draw_storage_bar(&mut self, percent: Percent) -> DirtyRegion {
        let bar = self.layout.bar;
        let interior = self.layout.bar_interior();
        let fill_width = self.bar_fill_width(percent);

        fill(&mut self.canvas, bar, BinaryColor::Off);
        let Ok(()) = bar
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.canvas);
        if fill_width > 0 {
            let filled = Rectangle::new(
                interior.top_left,
                Size::new(fill_width, interior.size.height),
            );
            fill(&mut self.canvas, filled, BinaryColor::On);
        }

        bar.into()
    }
}

#[track_caller]
fn init_step(result: CoreResult<()>, step: &str) -> CoreResult<()> {
    result.map_err(|e| match e {
        CoreError::DisplayInit { .. } => e,
        other => CoreError::DisplayInit {
            reason: format!("Display {} failed: {}", step, other),
            location: ErrorLocation::from(Location::caller()),
        },
    })
}

fn fill(canvas: &mut FrameBuffer, area: Rectangle, color: BinaryColor) {
    let Ok(()) = area
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(canvas);
}

fn draw_text(
    canvas: &mut FrameBuffer,
    text: &str,
    origin: Point,
    style: MonoTextStyle<'static, BinaryColor>,
) {
    let Ok(_) = Text::with_baseline(text, origin, style, Baseline::Top).draw(canvas);
}
