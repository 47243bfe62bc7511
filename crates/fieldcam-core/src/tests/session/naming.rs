use crate::session::{segment_file_name, segment_template, session_directory_name, time_prefix};

use chrono::{NaiveDate, TimeZone, Utc};

/// WHAT: Session directory and segment prefix come from the start time
/// WHY: Operators find footage by date and hour on the card
#[test]
#[allow(clippy::unwrap_used)]
fn given_start_time_when_naming_then_hourly_directory_and_time_prefix() {
    // Given: 2024-03-07 09:05:02
    let naive = NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(9, 5, 2)
        .unwrap();
    let started = Utc.from_utc_datetime(&naive);

    // When
    let directory = session_directory_name(&started);
    let prefix = time_prefix(&started);

    // Then
    assert_eq!(directory, "2024_03_07_09");
    assert_eq!(prefix, "09_05_02");
}

/// WHAT: The first segment of a session is numbered 000
/// WHY: The template is handed to the encoder, which counts from zero
#[test]
fn given_prefix_when_building_names_then_template_and_first_segment_agree() {
    // Given
    let prefix = "09_05_02";

    // When
    let template = segment_template(prefix, "mp4");
    let first = segment_file_name(prefix, 0, "mp4");

    // Then
    assert_eq!(template, "time_09_05_02_%03d.mp4");
    assert_eq!(first, "time_09_05_02_000.mp4");
    assert_eq!(segment_file_name(prefix, 12, "mkv"), "time_09_05_02_012.mkv");
}
