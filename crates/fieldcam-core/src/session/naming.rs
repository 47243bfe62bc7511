use chrono::{DateTime, TimeZone};

/// `YYYY_MM_DD_HH` directory holding one session's segments.
pub fn session_directory_name<Tz: TimeZone>(started: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    started.format("%Y_%m_%d_%H").to_string()
}

/// `HH_MM_SS` prefix shared by every segment of a session.
pub fn time_prefix<Tz: TimeZone>(started: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    started.format("%H_%M_%S").to_string()
}

/// File name template handed to the encoder; it fills in `%03d`.
pub fn segment_template(prefix: &str, container: &str) -> String {
    format!("time_{prefix}_%03d.{container}")
}

/// Name the encoder gives to segment number `sequence`.
pub fn segment_file_name(prefix: &str, sequence: u32, container: &str) -> String {
    format!("time_{prefix}_{sequence:03}.{container}")
}
