use crate::render::{TextChange, diff_text, format_elapsed};

use std::time::Duration;

/// WHAT: Elapsed time is zero-padded HH:MM:SS
/// WHY: A fixed-width string keeps character positions stable between ticks
#[test]
fn given_durations_when_formatting_then_zero_padded() {
    // Given / When / Then
    assert_eq!(format_elapsed(Duration::ZERO), "00:00:00");
    assert_eq!(format_elapsed(Duration::from_millis(9_999)), "00:00:09");
    assert_eq!(format_elapsed(Duration::from_secs(3_661)), "01:01:01");
}

/// WHAT: Hours past 99 widen the string rather than wrap
/// WHY: A wrapped clock would silently lie about a long session
#[test]
fn given_more_than_99_hours_when_formatting_then_hours_grow() {
    // Given: 100 hours
    let elapsed = Duration::from_secs(100 * 3600);

    // When
    let text = format_elapsed(elapsed);

    // Then
    assert_eq!(text, "100:00:00");
}

/// WHAT: 00:00:09 -> 00:00:10 differs from index 6 onward
/// WHY: Only the last two digits need clearing and redrawing
#[test]
fn given_tick_over_ten_seconds_when_diffing_then_first_difference_at_six() {
    // Given / When
    let change = diff_text(Some("00:00:09"), "00:00:10");

    // Then
    assert_eq!(change, TextChange::From(6));
}

/// WHAT: Missing or differently sized previous text redraws the whole field
/// WHY: Index comparison is only meaningful between equal-length strings
#[test]
fn given_no_previous_or_length_change_when_diffing_then_whole() {
    // Given / When / Then
    assert_eq!(diff_text(None, "00:00:00"), TextChange::Whole);
    assert_eq!(diff_text(Some("99:59:59"), "100:00:00"), TextChange::Whole);
}

/// WHAT: Identical text needs no redraw
/// WHY: Idle screens must not touch the elapsed field every tick
#[test]
fn given_same_text_when_diffing_then_unchanged() {
    // Given / When / Then
    assert_eq!(diff_text(Some("00:12:34"), "00:12:34"), TextChange::Unchanged);
}
