use std::time::Duration;

/// How a text field changed between two renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChange {
    /// Same text, nothing to draw.
    Unchanged,
    /// No comparable previous text; redraw the whole field.
    Whole,
    /// Characters from this index to the end differ.
    From(usize),
}

/// Zero-padded `HH:MM:SS`. Hours keep growing past 99 instead of wrapping.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Character-wise comparison of `next` against what was last drawn.
///
/// A length mismatch is treated as a whole-field change so indices are only
/// ever compared within both strings.
pub fn diff_text(previous: Option<&str>, next: &str) -> TextChange {
    let Some(previous) = previous else {
        return TextChange::Whole;
    };

    if previous.chars().count() != next.chars().count() {
        return TextChange::Whole;
    }

    match previous
        .chars()
        .zip(next.chars())
        .position(|(old, new)| old != new)
    {
        Some(index) => TextChange::From(index),
        None => TextChange::Unchanged,
    }
}
