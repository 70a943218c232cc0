use std::ffi::OsStr;
use std::io;
use std::process::{Child, ExitStatus};

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::platform::{LaunchSpec, Platform};

/// Hands targets to one launcher command.
///
/// A `Launcher` holds no state besides its [`LaunchSpec`], so it can be copied
/// into as many concurrent callers as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Launcher {
    spec: LaunchSpec,
}

impl Launcher {
    /// Launcher for the host operating system.
    pub fn detect() -> Result<Self> {
        Ok(Self::with_spec(Platform::current()?.launch_spec()))
    }

    pub const fn with_spec(spec: LaunchSpec) -> Self {
        Self { spec }
    }

    pub const fn spec(&self) -> &LaunchSpec {
        &self.spec
    }

    /// Opens `target` and blocks until the launcher command exits.
    pub fn run(&self, target: impl AsRef<OsStr>) -> Result<()> {
        self.start(target)?.wait()
    }

    /// Spawns the launcher command without waiting on it.
    ///
    /// Only failures to create the process are reported here; the exit status
    /// comes from [`Launch::wait`].
    pub fn start(&self, target: impl AsRef<OsStr>) -> Result<Launch> {
        let program = self.spec.program();
        let child = self
            .spec
            .command(target.as_ref())
            .spawn()
            .map_err(|source| Error::Start { program, source })?;
        debug!(program, args = ?self.spec.args(), pid = child.id(), "launcher started");
        Ok(Launch { program, child })
    }

    /// Like [`Launcher::run`], but gives up waiting once `cancel` fires.
    pub async fn run_with_cancellation(
        &self,
        cancel: &CancellationToken,
        target: impl AsRef<OsStr>,
    ) -> Result<()> {
        self.start_with_cancellation(cancel, target)?.wait().await
    }

    /// Like [`Launcher::start`], but the returned handle stops waiting once
    /// `cancel` fires. Nothing is spawned if `cancel` has already fired.
    ///
    /// Without a running Tokio runtime nothing is spawned and a
    /// [`Error::Start`] is returned.
    pub fn start_with_cancellation(
        &self,
        cancel: &CancellationToken,
        target: impl AsRef<OsStr>,
    ) -> Result<CancellableLaunch> {
        let program = self.spec.program();
        if cancel.is_cancelled() {
            debug!(program, "cancelled before start");
            return Err(Error::Cancelled { program });
        }
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(Error::Start {
                program,
                source: io::Error::other("no Tokio runtime is running"),
            });
        }
        let child = tokio::process::Command::from(self.spec.command(target.as_ref()))
            .spawn()
            .map_err(|source| Error::Start { program, source })?;
        debug!(program, args = ?self.spec.args(), pid = child.id(), "launcher started");
        Ok(CancellableLaunch {
            program,
            child,
            cancel: cancel.clone(),
        })
    }
}

/// A running launcher command returned by [`Launcher::start`].
///
/// Dropping it without calling [`Launch::wait`] leaves the child running
/// unsupervised.
#[derive(Debug)]
pub struct Launch {
    program: &'static str,
    child: Child,
}

impl Launch {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Blocks until the launcher command exits. Consumes the handle.
    pub fn wait(mut self) -> Result<()> {
        let status = self.child.wait();
        check_exit(self.program, status)
    }
}

/// A running launcher command returned by [`Launcher::start_with_cancellation`].
#[derive(Debug)]
pub struct CancellableLaunch {
    program: &'static str,
    child: tokio::process::Child,
    cancel: CancellationToken,
}

impl CancellableLaunch {
    /// `None` once the child has been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Waits for the launcher command to exit or for cancellation, whichever
    /// comes first. Consumes the handle.
    ///
    /// On cancellation the child is sent a kill signal and the call returns
    /// without waiting for it to die.
    pub async fn wait(mut self) -> Result<()> {
        let program = self.program;
        let cancel = self.cancel.clone();
        let exited = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            status = self.child.wait() => Some(status),
        };
        match exited {
            Some(status) => check_exit(program, status),
            None => {
                if let Err(err) = self.child.start_kill() {
                    warn!(program, "failed to kill launcher after cancellation: {err}");
                }
                debug!(program, "wait cancelled");
                Err(Error::Cancelled { program })
            }
        }
    }
}

fn check_exit(program: &'static str, status: io::Result<ExitStatus>) -> Result<()> {
    let status = status.map_err(|source| Error::Wait { program, source })?;
    trace!(program, %status, "launcher exited");
    if status.success() {
        Ok(())
    } else {
        Err(Error::Exit { program, status })
    }
}

/// Opens `target` with the host's default handler and waits for the launcher.
pub fn run(target: impl AsRef<OsStr>) -> Result<()> {
    Launcher::detect()?.run(target)
}

/// Opens `target` with the host's default handler without waiting.
pub fn start(target: impl AsRef<OsStr>) -> Result<Launch> {
    Launcher::detect()?.start(target)
}

pub async fn run_with_cancellation(
    cancel: &CancellationToken,
    target: impl AsRef<OsStr>,
) -> Result<()> {
    Launcher::detect()?.run_with_cancellation(cancel, target).await
}

pub fn start_with_cancellation(
    cancel: &CancellationToken,
    target: impl AsRef<OsStr>,
) -> Result<CancellableLaunch> {
    Launcher::detect()?.start_with_cancellation(cancel, target)
}
