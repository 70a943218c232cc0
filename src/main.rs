use std::ffi::OsString;
use std::io::IsTerminal;

use anyhow::{Context, Result};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};
use uri_open::Launcher;

mod config;

fn setup_logging(config: &config::Config) {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::filter::targets::Targets::default()
        .with_default(config.log_level);

    let ansi_colors_enabled = !cfg!(windows) && std::io::stderr().is_terminal();
    let format = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_ansi(ansi_colors_enabled);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

fn detach(launcher: &Launcher, targets: &[OsString]) -> Result<()> {
    for target in targets {
        let launch = launcher
            .start(target)
            .with_context(|| format!("cannot open {}", target.to_string_lossy()))?;
        info!(pid = launch.id(), "detached from launcher for {target:?}");
    }
    Ok(())
}

fn cancel_on_interrupt(cancel: &CancellationToken) {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupted");
            cancel.cancel();
        }
    });
}

fn cancel_after(cancel: &CancellationToken, timeout: std::time::Duration) {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        debug!("timed out after {timeout:?}");
        cancel.cancel();
    });
}

/// The error with its whole source chain.
fn describe(err: uri_open::Error) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

async fn open_all(launcher: Launcher, targets: &[OsString], cancel: CancellationToken) -> Result<()> {
    let mut tasks = JoinSet::new();
    for target in targets.iter().cloned() {
        let cancel = cancel.clone();
        tasks.spawn(async move {
            let res = launcher.run_with_cancellation(&cancel, &target).await;
            (target, res)
        });
    }

    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (target, res) = joined?;
        match res {
            Ok(()) => info!("opened {target:?}"),
            Err(err) => {
                error!("cannot open {target:?}: {}", describe(err));
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} target(s) could not be opened", targets.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = config::parse_args();
    let config = config::app_config();

    setup_logging(config);

    let launcher = Launcher::detect()?;
    debug!("using launcher {:?}", launcher.spec());

    if config.detach {
        return detach(&launcher, &config.targets);
    }

    let cancel = CancellationToken::new();
    cancel_on_interrupt(&cancel);
    if let Some(timeout) = config.timeout {
        cancel_after(&cancel, timeout);
    }
    open_all(launcher, &config.targets, cancel).await
}
