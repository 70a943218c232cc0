//! Open URIs and paths with the operating system's default handler.
//!
//! The target is handed verbatim to the platform launcher command
//! (`open` on macOS, `rundll32 url.dll,FileProtocolHandler` on Windows,
//! `xdg-open` elsewhere). Nothing is parsed or validated here; a target the
//! handler cannot open surfaces as [`Error::Exit`].
//!
//! ```no_run
//! # fn main() -> uri_open::Result<()> {
//! uri_open::run("https://www.rust-lang.org")?;
//!
//! let launch = uri_open::start("/tmp/report.pdf")?;
//! launch.wait()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod launcher;
mod platform;

pub use error::{Error, Result};
pub use launcher::{
    run, run_with_cancellation, start, start_with_cancellation, CancellableLaunch, Launch,
    Launcher,
};
pub use platform::{LaunchSpec, Platform};
pub use tokio_util::sync::CancellationToken;
