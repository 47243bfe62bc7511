use crate::Percent;

/// What is physically on the panel right now.
///
/// Every field starts as `None` (nothing drawn yet) and is only written by
/// the renderer after a push succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameState {
    /// Storage percentage shown by the label and bar.
    pub last_storage: Option<Percent>,
    /// Recording flag shown in the header.
    pub last_recording: Option<bool>,
    /// Elapsed time text, `HH:MM:SS`.
    pub last_elapsed_text: Option<String>,
    /// Phase used for the most recent indicator frame.
    pub blink_phase: bool,
}
