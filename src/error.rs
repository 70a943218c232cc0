use std::io;
use std::process::ExitStatus;

/// Everything that can go wrong while handing a target to the OS launcher.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    #[error("failed to start {program}")]
    Start {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited unsuccessfully ({status})")]
    Exit {
        program: &'static str,
        status: ExitStatus,
    },

    #[error("failed to wait on {program}")]
    Wait {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    /// The wait was abandoned. The child may still be running.
    #[error("cancelled while waiting on {program}")]
    Cancelled { program: &'static str },
}

impl Error {
    /// Exit code of the launcher command, if it ran and exited with one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { status, .. } => status.code(),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
