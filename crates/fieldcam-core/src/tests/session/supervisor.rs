use crate::{
    CoreError, EncoderSupervisor, SupervisorState,
    session::{ProcessLauncher, segment_file_name},
    tests::support::{MissingProgramLauncher, ShellLauncher, session_config},
};

use std::time::{Duration, Instant as StdInstant};

const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// WHAT: Start creates the dated directory and launches with its template
/// WHY: Segments must land in <root>/<YYYY_MM_DD_HH>/time_<HH_MM_SS>_NNN.<ext>
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_idle_supervisor_when_starting_then_active_with_session_directory() {
    // Given
    let root = tempfile::tempdir().unwrap();
    let supervisor = EncoderSupervisor::with_launcher(ShellLauncher::long_running(), STOP_TIMEOUT);

    // When
    let handle = supervisor.start(&session_config(root.path())).await.unwrap();

    // Then
    assert_eq!(supervisor.state(), SupervisorState::Active);
    assert!(supervisor.is_active());
    assert!(handle.directory.is_dir());
    assert_eq!(handle.directory.parent(), Some(root.path()));

    let dir_name = handle.directory.file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(dir_name.len(), "YYYY_MM_DD_HH".len());

    let template = handle.segment_template.file_name().unwrap().to_string_lossy().into_owned();
    assert!(template.starts_with("time_"));
    assert!(template.ends_with("_%03d.mp4"));

    assert_eq!(supervisor.launcher().launched().len(), 1);

    supervisor.stop().await.unwrap();
}

/// WHAT: The encoder receives the session's own output template
/// WHY: The template is the only link between the session and its files
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_started_session_when_inspecting_invocation_then_template_is_last_argument() {
    // Given
    let root = tempfile::tempdir().unwrap();
    let supervisor = EncoderSupervisor::with_launcher(ShellLauncher::long_running(), STOP_TIMEOUT);

    // When
    let handle = supervisor.start(&session_config(root.path())).await.unwrap();

    // Then
    let invocation = supervisor.launcher().launched().remove(0);
    assert_eq!(
        invocation.args().last().map(|a| a.as_os_str()),
        Some(handle.segment_template.as_os_str())
    );

    supervisor.stop().await.unwrap();
}

/// WHAT: Starting while active fails and leaves the session untouched
/// WHY: Exactly one session may exist; a double press must not restart it
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_active_session_when_starting_again_then_already_active_and_start_unchanged() {
    // Given
    let root = tempfile::tempdir().unwrap();
    let supervisor = EncoderSupervisor::with_launcher(ShellLauncher::long_running(), STOP_TIMEOUT);
    let config = session_config(root.path());
    let first = supervisor.start(&config).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    // When
    let second = supervisor.start(&config).await;

    // Then
    assert!(matches!(
        second,
        Err(CoreError::AlreadyActive { session_id, .. }) if session_id == first.session_id
    ));
    let snapshot = supervisor.snapshot();
    assert_eq!(snapshot.session.as_ref().map(|s| s.started_at), Some(first.started_at));
    assert_eq!(supervisor.launcher().launched().len(), 1);

    supervisor.stop().await.unwrap();
}

/// WHAT: Stop while idle is a successful no-op
/// WHY: Stop is idempotent so shutdown can always call it
#[tokio::test]
async fn given_idle_supervisor_when_stopping_then_ok_and_idle() {
    // Given
    let supervisor = EncoderSupervisor::new(STOP_TIMEOUT);

    // When
    let result = supervisor.stop().await;

    // Then
    assert!(result.is_ok());
    assert_eq!(supervisor.state(), SupervisorState::Idle);
    assert_eq!(supervisor.elapsed(), Duration::ZERO);
}

/// WHAT: A session started after a stop counts elapsed time from its own start
/// WHY: The panel's timer must read zero at the beginning of every session
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_stopped_session_when_starting_again_then_elapsed_restarts_from_zero() {
    // Given: A session that ran for a while and was stopped
    let root = tempfile::tempdir().unwrap();
    let supervisor = EncoderSupervisor::with_launcher(ShellLauncher::long_running(), STOP_TIMEOUT);
    let config = session_config(root.path());
    let first = supervisor.start(&config).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    let first_elapsed = supervisor.elapsed();
    supervisor.stop().await.unwrap();
    let idle_elapsed = supervisor.elapsed();

    // When
    let second = supervisor.start(&config).await.unwrap();
    let second_elapsed = supervisor.elapsed();

    // Then
    assert!(first_elapsed >= Duration::from_millis(300));
    assert_eq!(idle_elapsed, Duration::ZERO);
    assert!(second_elapsed < Duration::from_millis(300));
    assert!(second.started_at > first.started_at);
    assert_ne!(second.session_id, first.session_id);

    supervisor.stop().await.unwrap();
}

/// WHAT: Stop terminates the encoder and returns to Idle
/// WHY: SIGTERM lets the encoder finish the open segment
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_active_session_when_stopping_then_idle_and_process_gone() {
    // Given
    let root = tempfile::tempdir().unwrap();
    let supervisor = EncoderSupervisor::with_launcher(ShellLauncher::long_running(), STOP_TIMEOUT);
    supervisor.start(&session_config(root.path())).await.unwrap();

    // When
    let began = StdInstant::now();
    let result = supervisor.stop().await;

    // Then: Graceful exit well within the timeout
    assert!(result.is_ok());
    assert!(began.elapsed() < STOP_TIMEOUT);
    assert_eq!(supervisor.state(), SupervisorState::Idle);
    assert!(supervisor.snapshot().session.is_none());
    assert!(!supervisor.is_alive().await);
    assert!(supervisor.stop().await.is_ok());
}

/// WHAT: An encoder ignoring SIGTERM is killed after the timeout
/// WHY: Stop must be bounded so a wedged encoder cannot block shutdown
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_encoder_ignoring_term_when_stopping_then_killed_after_timeout() {
    // Given
    let root = tempfile::tempdir().unwrap();
    let launcher = ShellLauncher::new("trap '' TERM; exec sleep 30");
    let supervisor = EncoderSupervisor::with_launcher(launcher, Duration::from_millis(300));
    supervisor.start(&session_config(root.path())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // When
    let began = StdInstant::now();
    let result = supervisor.stop().await;

    // Then
    assert!(result.is_ok());
    assert!(began.elapsed() < Duration::from_secs(5));
    assert_eq!(supervisor.state(), SupervisorState::Idle);
}

/// WHAT: A launch failure is EncoderSpawn and leaves the supervisor Idle
/// WHY: The operator may retry, so a failed start must not wedge the state
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_missing_program_when_starting_then_encoder_spawn_and_idle() {
    // Given
    let root = tempfile::tempdir().unwrap();
    let supervisor = EncoderSupervisor::with_launcher(MissingProgramLauncher, STOP_TIMEOUT);
    let config = session_config(root.path());

    // When
    let first = supervisor.start(&config).await;
    let retry = supervisor.start(&config).await;

    // Then
    assert!(matches!(first, Err(CoreError::EncoderSpawn { .. })));
    assert!(matches!(retry, Err(CoreError::EncoderSpawn { .. })));
    assert_eq!(supervisor.state(), SupervisorState::Idle);
    assert!(!supervisor.is_alive().await);
}

/// WHAT: An unusable output root is EncoderSpawn before anything launches
/// WHY: Recording without a session directory would lose every segment
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_output_root_is_a_file_when_starting_then_encoder_spawn_without_launch() {
    // Given: The output root path is a regular file
    let scratch = tempfile::tempdir().unwrap();
    let root = scratch.path().join("not-a-directory");
    std::fs::write(&root, b"").unwrap();
    let supervisor = EncoderSupervisor::with_launcher(ShellLauncher::long_running(), STOP_TIMEOUT);

    // When
    let result = supervisor.start(&session_config(&root)).await;

    // Then
    assert!(matches!(result, Err(CoreError::EncoderSpawn { .. })));
    assert_eq!(supervisor.launcher().launched().len(), 0);
    assert_eq!(supervisor.state(), SupervisorState::Idle);
}

/// WHAT: An encoder that exits on its own is detected and the session closed
/// WHY: A crashed encoder must not leave the screen showing REC
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_encoder_exits_when_polling_liveness_then_idle() {
    // Given
    let root = tempfile::tempdir().unwrap();
    let supervisor = EncoderSupervisor::with_launcher(ShellLauncher::new("exit 3"), STOP_TIMEOUT);
    supervisor.start(&session_config(root.path())).await.unwrap();

    // When: Polling until the exit is noticed
    let mut alive = true;
    for _ in 0..100 {
        alive = supervisor.is_alive().await;
        if !alive {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Then
    assert!(!alive);
    assert_eq!(supervisor.state(), SupervisorState::Idle);
    assert_eq!(supervisor.elapsed(), Duration::ZERO);
    assert!(supervisor.stop().await.is_ok());
}

/// WHAT: Observers are notified of transitions
/// WHY: The status loop reads the published snapshot, never the session
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_subscriber_when_session_starts_and_stops_then_snapshots_follow() {
    // Given
    let root = tempfile::tempdir().unwrap();
    let supervisor = EncoderSupervisor::with_launcher(ShellLauncher::long_running(), STOP_TIMEOUT);
    let mut rx = supervisor.subscribe();

    // When
    let handle = supervisor.start(&session_config(root.path())).await.unwrap();

    // Then
    assert!(rx.has_changed().unwrap());
    let active = rx.borrow_and_update().clone();
    assert!(active.is_recording());
    assert_eq!(active.session.map(|s| s.session_id), Some(handle.session_id));

    // When
    supervisor.stop().await.unwrap();

    // Then
    assert_eq!(rx.borrow_and_update().state, SupervisorState::Idle);
}

/// WHAT: A real encoder produces numbered segments from 000
/// WHY: End-to-end check of the invocation against ffmpeg
#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
async fn given_ffmpeg_test_source_when_recording_65_seconds_then_two_completed_segments() {
    // Given: A synthetic source, 30 second segments
    let root = tempfile::tempdir().unwrap();
    let mut config = session_config(root.path());
    config.input_format = Some("lavfi".to_string());
    config.device = "testsrc=size=320x240:rate=10".to_string();
    config.resolution = crate::session::Resolution {
        width: 320,
        height: 240,
    };
    config.codec = "mpeg4".to_string();
    config.container = "mkv".to_string();
    let supervisor = EncoderSupervisor::with_launcher(ProcessLauncher, STOP_TIMEOUT);

    // When
    let handle = supervisor.start(&config).await.unwrap();
    tokio::time::sleep(Duration::from_secs(65)).await;
    supervisor.stop().await.unwrap();

    // Then
    let template = handle.segment_template.file_name().unwrap().to_string_lossy().into_owned();
    let prefix = template
        .strip_prefix("time_")
        .and_then(|t| t.strip_suffix("_%03d.mkv"))
        .unwrap()
        .to_string();
    let mut segments: Vec<String> = std::fs::read_dir(&handle.directory)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    segments.sort();

    assert_eq!(segments.first(), Some(&segment_file_name(&prefix, 0, "mkv")));
    assert!(segments.contains(&segment_file_name(&prefix, 1, "mkv")));
    assert!(segments.len() >= 2);
}
