use crate::display::FrameBuffer;

use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{Point, Primitive, Size},
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
};

/// Glyph drawn in the indicator box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorVariant {
    /// Ring with a filled centre, identical on every phase.
    SolidRing,
    /// Ring whose centre is filled on alternate phases.
    PulsingRing,
    /// Crosshair shown on alternate phases.
    Crosshair,
    /// Nothing; the box is kept white.
    Blank,
}

/// Indicator variant per recording state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorStyle {
    /// Used while a session is active.
    pub recording: IndicatorVariant,
    /// Used while idle.
    pub idle: IndicatorVariant,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            recording: IndicatorVariant::SolidRing,
            idle: IndicatorVariant::Crosshair,
        }
    }
}

impl IndicatorStyle {
    /// Variant for the given recording flag.
    pub fn variant(&self, recording: bool) -> IndicatorVariant {
        if recording { self.recording } else { self.idle }
    }
}

pub(crate) fn draw_indicator(
    canvas: &mut FrameBuffer,
    area: Rectangle,
    variant: IndicatorVariant,
    phase: bool,
) {
    let Ok(()) = area
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(canvas);

    let diameter = area.size.width.min(area.size.height);
    let ring = Circle::new(area.top_left, diameter);
    let core = Circle::new(area.top_left + Point::new(3, 3), diameter.saturating_sub(6));

    match variant {
        IndicatorVariant::SolidRing => {
            let Ok(()) = ring
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
                .draw(canvas);
            let Ok(()) = core
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(canvas);
        }
        IndicatorVariant::PulsingRing => {
            let Ok(()) = ring
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(canvas);
            if phase {
                let Ok(()) = core
                    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                    .draw(canvas);
            }
        }
        IndicatorVariant::Crosshair => {
            if phase {
                draw_crosshair(
                    canvas,
                    Rectangle::new(area.top_left, Size::new(diameter, diameter)),
                );
            }
        }
        IndicatorVariant::Blank => {}
    }
}

fn draw_crosshair(canvas: &mut FrameBuffer, area: Rectangle) {
    let center = area.center();
    let left = area.top_left.x;
    let top = area.top_left.y;
    let right = left + area.size.width as i32 - 1;
    let bottom = top + area.size.height as i32 - 1;
    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

    let Ok(()) = Line::new(Point::new(left, center.y), Point::new(right, center.y))
        .into_styled(stroke)
        .draw(canvas);
    let Ok(()) = Line::new(Point::new(center.x, top), Point::new(center.x, bottom))
        .into_styled(stroke)
        .draw(canvas);
    let Ok(()) = Circle::with_center(center, area.size.width / 2)
        .into_styled(stroke)
        .draw(canvas);
}
