//! The `inspect` and `watch` commands.

use std::fmt::Write as _;
use std::future::Future;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use farmstead_core::clock::{Clock, SystemClock};
use farmstead_core::config::FarmsteadConfig;
use farmstead_core::ingest::{AccountSource, FileAccountSource, decode_tiles};
use farmstead_core::poller::{PollStats, Poller};
use farmstead_core::snapshot::FarmSnapshot;
use farmstead_types::CropType;
use farmstead_world::GRID_SIZE;

use crate::error::CliError;

/// Evaluate the account at `account` once and render it as pretty JSON.
///
/// With `tile`, only that plot's report is rendered.
pub fn inspect(
    config: &FarmsteadConfig,
    account: &Path,
    tile: Option<usize>,
    clock: &dyn Clock,
) -> Result<String, CliError> {
    let modifiers = config.yields.modifiers()?;
    let record = FileAccountSource::new(account).fetch()?;
    let tiles = decode_tiles(&record)?;
    let snapshot = FarmSnapshot::build(&tiles, clock.now(), &modifiers)?;

    let json = match tile {
        Some(index) => serde_json::to_string_pretty(snapshot.plot(index)?)?,
        None => serde_json::to_string_pretty(&snapshot)?,
    };
    Ok(json)
}

/// Poll `account` until Ctrl-C, printing a status block per frame.
pub async fn watch(config: &FarmsteadConfig, account: &Path) -> Result<(), CliError> {
    let poller = Poller::new(
        Box::new(FileAccountSource::new(account)),
        Arc::new(SystemClock),
        config.yields.modifiers()?,
        config.client.poll_interval_ms,
    );

    info!(account = %account.display(), "Watching account, Ctrl-C to stop");

    let ctrl_c = async {
        tokio::signal::ctrl_c().await.map_err(|e| CliError::Runtime {
            message: format!("failed to listen for Ctrl-C: {e}"),
        })?;
        info!("Ctrl-C received, stopping");
        Ok(())
    };
    let stats = watch_until(poller, ctrl_c, &mut std::io::stdout()).await?;
    info!(
        published = stats.frames_published,
        skipped = stats.frames_skipped,
        "Watch finished"
    );
    Ok(())
}

/// Run `poller`, writing [`render_status`] to `out` for every published
/// frame, until `stop` resolves.
///
/// The poller is always shut down and joined before returning, including
/// when `stop` or a write fails.
pub async fn watch_until<S, W>(poller: Poller, stop: S, out: &mut W) -> Result<PollStats, CliError>
where
    S: Future<Output = Result<(), CliError>>,
    W: Write,
{
    let (snapshot_tx, mut snapshot_rx) = watch::channel(None);
    let (stop_tx, stop_rx) = watch::channel(false);
    let task = tokio::spawn(poller.run(snapshot_tx, stop_rx));

    tokio::pin!(stop);
    let outcome = loop {
        tokio::select! {
            result = &mut stop => break result,
            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let latest = snapshot_rx.borrow_and_update().clone();
                let Some(snapshot) = latest else { continue };
                if let Err(e) = writeln!(out, "{}", render_status(&snapshot)) {
                    break Err(CliError::from(e));
                }
            }
        }
    };

    // The poller may already have exited; a closed channel is fine.
    let _ = stop_tx.send(true);
    let stats = task.await.map_err(|e| CliError::Runtime {
        message: format!("poller task failed: {e}"),
    })?;
    outcome.map(|()| stats)
}

/// One-line summary followed by the grid.
pub fn render_status(snapshot: &FarmSnapshot) -> String {
    let summary = snapshot.summary();
    format!(
        "t={} planted={} ready={} patterns={} ready_yield={}\n{}",
        summary.evaluated_at,
        summary.planted,
        summary.ready,
        summary.patterns,
        summary.ready_yield,
        render_grid(snapshot)
    )
}

/// Render the farm as a 5x5 block of cells.
///
/// Each cell is the crop's initial, followed by `*` when ready, `+` when it
/// is in at least one pattern, or a space. Empty plots are `..`.
pub fn render_grid(snapshot: &FarmSnapshot) -> String {
    let mut out = String::new();
    for row in snapshot.plots().chunks(GRID_SIZE) {
        let cells: Vec<String> = row
            .iter()
            .map(|plot| match plot.state.crop {
                None => "..".to_owned(),
                Some(crop) => {
                    let mark = if !plot.patterns.is_empty() {
                        '+'
                    } else if plot.state.is_ready {
                        '*'
                    } else {
                        ' '
                    };
                    format!("{}{mark}", crop_initial(crop))
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" ").trim_end());
    }
    out
}

const fn crop_initial(crop: CropType) -> char {
    match crop {
        CropType::Wheat => 'W',
        CropType::Tomato => 'T',
        CropType::Corn => 'C',
        CropType::Carrot => 'R',
        CropType::Lettuce => 'L',
    }
}
