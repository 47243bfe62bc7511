use crate::{
    session::{EncoderInvocation, Resolution, TimestampOverlay},
    tests::support::session_config,
};

use std::{ffi::OsStr, path::Path, time::Duration};

/// WHAT: The invocation carries device, size, codec and segment settings
/// WHY: The encoder is launched without a shell, so every value is one argument
#[test]
fn given_session_config_when_building_invocation_then_arguments_in_place() {
    // Given
    let config = session_config(Path::new("/media/usb/recordings"));
    let template = Path::new("/media/usb/recordings/2024_03_07_09/time_09_05_02_%03d.mp4");

    // When
    let invocation = EncoderInvocation::new(&config, template);

    // Then
    assert_eq!(invocation.program(), Path::new("ffmpeg"));
    assert_eq!(invocation.arg_after("-i"), Some(OsStr::new("/dev/video0")));
    assert_eq!(invocation.arg_after("-s"), Some(OsStr::new("1280x720")));
    assert_eq!(invocation.arg_after("-c:v"), Some(OsStr::new("libx264")));
    assert_eq!(invocation.arg_after("-segment_time"), Some(OsStr::new("30")));
    assert_eq!(invocation.arg_after("-segment_start_number"), Some(OsStr::new("0")));
    assert_eq!(invocation.args().last().map(|a| a.as_os_str()), Some(template.as_os_str()));
    for flag in ["-an", "-sn", "-dn"] {
        assert!(invocation.args().iter().any(|a| a == flag), "missing {flag}");
    }
    assert_eq!(invocation.arg_after("-vf"), None);
}

/// WHAT: The forced input format precedes the input
/// WHY: ffmpeg applies -f to the next -i only
#[test]
fn given_input_format_when_building_invocation_then_f_before_i() {
    // Given
    let config = session_config(Path::new("/tmp"));

    // When
    let invocation = EncoderInvocation::new(&config, Path::new("/tmp/out_%03d.mp4"));

    // Then
    let args = invocation.args();
    let format_at = args.iter().position(|a| a == "v4l2");
    let input_at = args.iter().position(|a| a == "-i");
    assert!(format_at.is_some());
    assert!(format_at < input_at);
}

/// WHAT: An overlay adds a drawtext filter with local time
/// WHY: Footage must carry a burned-in wall-clock timestamp
#[test]
fn given_overlay_when_building_invocation_then_drawtext_filter_added() {
    // Given
    let mut config = session_config(Path::new("/tmp"));
    config.overlay = Some(TimestampOverlay {
        font_file: "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".into(),
        font_size: 24,
    });
    config.resolution = Resolution {
        width: 640,
        height: 480,
    };
    config.segment_duration = Duration::from_secs(300);

    // When
    let invocation = EncoderInvocation::new(&config, Path::new("/tmp/out_%03d.mp4"));

    // Then
    let filter = invocation
        .arg_after("-vf")
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    assert!(
        filter.starts_with("drawtext=fontfile=/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf:")
    );
    assert!(filter.contains("localtime"));
    assert!(filter.contains("fontsize=24"));
    assert_eq!(invocation.arg_after("-segment_time"), Some(OsStr::new("300")));
    assert_eq!(invocation.arg_after("-s"), Some(OsStr::new("640x480")));
}

/// WHAT: Resolution strings parse as WIDTHxHEIGHT
/// WHY: VIDEO_SIZE is supplied by deployment scripts in that form
#[test]
fn given_resolution_strings_when_parsing_then_only_valid_sizes_accepted() {
    // Given / When / Then
    assert_eq!(
        Resolution::parse("1920x1080"),
        Some(Resolution {
            width: 1920,
            height: 1080
        })
    );
    assert_eq!(Resolution::parse(" 640X480 ").map(|r| r.to_string()), Some("640x480".to_string()));
    assert_eq!(Resolution::parse("0x480"), None);
    assert_eq!(Resolution::parse("1080p"), None);
}
