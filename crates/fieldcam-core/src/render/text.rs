use embedded_graphics::mono_font::{
    MonoFont,
    ascii::{FONT_6X10, FONT_7X14, FONT_9X15},
};

/// Text measurement capability used to place and clear glyph spans.
pub trait TextMetrics {
    /// Advance width of the first `chars` characters of `text`.
    fn prefix_width(&self, text: &str, chars: usize) -> u32;

    /// Advance width of the whole of `text`.
    fn text_width(&self, text: &str) -> u32 {
        self.prefix_width(text, text.chars().count())
    }

    /// Height of one line of text.
    fn line_height(&self) -> u32;
}

impl TextMetrics for MonoFont<'_> {
    fn prefix_width(&self, text: &str, chars: usize) -> u32 {
        let counted = text.chars().take(chars).count() as u32;
        counted * (self.character_size.width + self.character_spacing)
    }

    fn line_height(&self) -> u32 {
        self.character_size.height
    }
}

/// Monospace font used for every label on the status screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFont {
    /// 6x10 glyphs.
    Small,
    /// 7x14 glyphs.
    #[default]
    Regular,
    /// 9x15 glyphs.
    Large,
}

impl StatusFont {
    /// The glyph set backing this choice.
    pub fn mono_font(self) -> &'static MonoFont<'static> {
        match self {
            StatusFont::Small => &FONT_6X10,
            StatusFont::Regular => &FONT_7X14,
            StatusFont::Large => &FONT_9X15,
        }
    }
}
