//! Account polling loop.
//!
//! [`Poller::run`] fetches the account on a fixed interval, rebuilds the
//! [`FarmSnapshot`], and publishes it on a `watch` channel. Subscribers
//! always see the latest good frame. A fetch or build failure is logged and
//! the frame skipped; the previous snapshot stays published.
//!
//! A [`RefreshHandle`] lets the caller force an immediate poll, for example
//! right after a planting or harvest transaction lands. The interval
//! restarts from that poll.
//!
//! Inside [`Poller::run`] the [`AccountSource`] fetch runs on tokio's
//! blocking pool, so file reads never stall the async workers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use farmstead_world::{FarmError, YieldModifiers};

use crate::clock::Clock;
use crate::ingest::{AccountRecord, AccountSource, IngestError, decode_tiles};
use crate::snapshot::FarmSnapshot;

/// Errors that cause a single frame to be skipped.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The account could not be fetched or decoded.
    #[error("ingest error: {source}")]
    Ingest {
        /// The underlying ingest error.
        #[from]
        source: IngestError,
    },

    /// The decoded tiles could not be evaluated.
    #[error("farm error: {source}")]
    Farm {
        /// The underlying computation error.
        #[from]
        source: FarmError,
    },
}

/// Latest published snapshot; `None` until the first good frame.
pub type SnapshotReceiver = watch::Receiver<Option<Arc<FarmSnapshot>>>;

/// Publishing side of [`SnapshotReceiver`].
pub type SnapshotSender = watch::Sender<Option<Arc<FarmSnapshot>>>;

/// Frame counts from a finished poll loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    /// Snapshots published.
    pub frames_published: u64,
    /// Frames skipped on error.
    pub frames_skipped: u64,
}

/// Forces the poller to fetch immediately.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    notify: Arc<Notify>,
}

impl RefreshHandle {
    /// Request a poll now. Requests made while a poll is pending coalesce.
    pub fn refresh(&self) {
        self.notify.notify_one();
    }
}

/// Drives account fetches and snapshot publication.
pub struct Poller {
    source: Box<dyn AccountSource>,
    clock: Arc<dyn Clock>,
    modifiers: YieldModifiers,
    interval: Duration,
    refresh: Arc<Notify>,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("modifiers", &self.modifiers)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl Poller {
    /// A poller reading from `source` every `interval_ms` milliseconds.
    ///
    /// An interval of zero is raised to one millisecond.
    pub fn new(
        source: Box<dyn AccountSource>,
        clock: Arc<dyn Clock>,
        modifiers: YieldModifiers,
        interval_ms: u64,
    ) -> Self {
        Self {
            source,
            clock,
            modifiers,
            interval: Duration::from_millis(interval_ms.max(1)),
            refresh: Arc::new(Notify::new()),
        }
    }

    /// A handle that triggers an immediate poll.
    pub fn refresh_handle(&self) -> RefreshHandle {
        RefreshHandle {
            notify: Arc::clone(&self.refresh),
        }
    }

    /// Fetch, decode, and evaluate the account once.
    ///
    /// # Errors
    ///
    /// Returns [`PollError`] if any stage fails.
    pub fn poll_once(&mut self) -> Result<FarmSnapshot, PollError> {
        let account = self.source.fetch()?;
        evaluate(&account, self.clock.now(), &self.modifiers)
    }

    /// Poll until `shutdown` turns `true` or its sender is dropped.
    ///
    /// The first poll happens immediately. A fetch that panics stops the
    /// loop, since the source is lost with it.
    pub async fn run(
        self,
        snapshots: SnapshotSender,
        mut shutdown: watch::Receiver<bool>,
    ) -> PollStats {
        let Self {
            mut source,
            clock,
            modifiers,
            interval,
            refresh,
        } = self;
        let mut stats = PollStats::default();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval = ?interval, "Account poller starting");

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                () = refresh.notified() => {
                    debug!("Refresh requested");
                    ticker.reset();
                }
                _ = ticker.tick() => {}
            }

            let joined = tokio::task::spawn_blocking(move || {
                let fetched = source.fetch();
                (source, fetched)
            })
            .await;
            let fetched = match joined {
                Ok((returned, fetched)) => {
                    source = returned;
                    fetched
                }
                Err(err) => {
                    error!(error = %err, "Account fetch task failed");
                    break;
                }
            };

            let frame = fetched
                .map_err(PollError::from)
                .and_then(|account| evaluate(&account, clock.now(), &modifiers));
            match frame {
                Ok(snapshot) => {
                    let summary = snapshot.summary();
                    debug!(
                        evaluated_at = summary.evaluated_at,
                        ready = summary.ready,
                        "Snapshot published"
                    );
                    snapshots.send_replace(Some(Arc::new(snapshot)));
                    stats.frames_published = stats.frames_published.saturating_add(1);
                }
                Err(err) => {
                    warn!(error = %err, "Skipping frame");
                    stats.frames_skipped = stats.frames_skipped.saturating_add(1);
                }
            }
        }

        info!(
            published = stats.frames_published,
            skipped = stats.frames_skipped,
            "Account poller stopped"
        );
        stats
    }
}

fn evaluate(
    account: &AccountRecord,
    now: i64,
    modifiers: &YieldModifiers,
) -> Result<FarmSnapshot, PollError> {
    let tiles = decode_tiles(account)?;
    Ok(FarmSnapshot::build(&tiles, now, modifiers)?)
}
