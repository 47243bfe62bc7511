use crate::session::SessionConfig;

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

/// Argument-list invocation of the encoder. Nothing is passed through a
/// shell, so paths and timestamps are never re-interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderInvocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl EncoderInvocation {
    /// Build the segmenting encoder invocation writing to `template`.
    pub fn new(config: &SessionConfig, template: &Path) -> Self {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "warning"]
            .into_iter()
            .map(OsString::from)
            .collect();

        if let Some(format) = &config.input_format {
            args.push("-f".into());
            args.push(format.into());
        }
        args.push("-i".into());
        args.push((&config.device).into());

        for arg in ["-c:v", config.codec.as_str()] {
            args.push(arg.into());
        }
        args.push("-s".into());
        args.push(config.resolution.to_string().into());
        // Video only.
        for arg in ["-an", "-sn", "-dn"] {
            args.push(arg.into());
        }

        if let Some(overlay) = &config.overlay {
            args.push("-vf".into());
            args.push(
                format!(
                    "drawtext=fontfile={}:text='%{{localtime\\:%Y-%m-%d %H\\:%M\\:%S}}'\
                     :x=10:y=10:fontcolor=white:fontsize={}:box=1:boxcolor=black@0.5",
                    overlay.font_file.display(),
                    overlay.font_size
                )
                .into(),
            );
        }

        for arg in ["-f", "segment", "-segment_time"] {
            args.push(arg.into());
        }
        args.push(config.segment_duration.as_secs().max(1).to_string().into());
        for arg in ["-segment_start_number", "0", "-reset_timestamps", "1"] {
            args.push(arg.into());
        }
        args.push(template.as_os_str().to_owned());

        Self {
            program: config.program.clone(),
            args,
        }
    }

    /// Executable to launch.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in order.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Value following `flag`, if the flag is present.
    pub fn arg_after(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|index| self.args.get(index + 1))
            .map(OsString::as_os_str)
    }
}
