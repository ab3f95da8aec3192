use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use crate::error::{Error, Result};
use crate::feed::{FeedState, FeedTarget, OracleFeed};
use crate::observability::metrics::BATCH_FAILURES;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug)]
enum FeedCommand {
    Refresh,
    SetTarget(FeedTarget),
}

/// Cloneable handle for reading feed state and steering the poll loop.
#[derive(Clone)]
pub struct FeedControl {
    commands: mpsc::UnboundedSender<FeedCommand>,
    state: watch::Receiver<FeedState>,
}

impl FeedControl {
    pub fn state(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.clone()
    }

    /// Clear the cached entry for the current target and fetch right away.
    pub fn refresh(&self) -> Result<()> {
        self.send(FeedCommand::Refresh)
    }

    /// Switch oracle address or symbol list; fetches immediately.
    pub fn set_target(&self, target: FeedTarget) -> Result<()> {
        self.send(FeedCommand::SetTarget(target))
    }

    fn send(&self, command: FeedCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::TaskFailed("feed poller stopped".to_string()))
    }
}

/// Background task that keeps a `FeedState` current.
///
/// Fetches once on start, then every `interval`. The task is aborted when the
/// poller is shut down or dropped.
pub struct FeedPoller {
    control: FeedControl,
    handle: JoinHandle<()>,
}

impl FeedPoller {
    pub fn spawn(feed: Arc<OracleFeed>, target: FeedTarget, interval: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(FeedState::default());
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(run(feed, target, interval, state_tx, command_rx));
        tracing::info!("Spawned feed poller (interval {:?})", interval);

        FeedPoller {
            control: FeedControl {
                commands: command_tx,
                state: state_rx,
            },
            handle,
        }
    }

    pub fn control(&self) -> FeedControl {
        self.control.clone()
    }

    pub fn state(&self) -> FeedState {
        self.control.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.control.subscribe()
    }

    pub fn refresh(&self) -> Result<()> {
        self.control.refresh()
    }

    pub fn set_target(&self, target: FeedTarget) -> Result<()> {
        self.control.set_target(target)
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn shutdown(self) {
        // Drop aborts the task.
    }
}

impl Drop for FeedPoller {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::info!("Feed poller stopped");
    }
}

async fn run(
    feed: Arc<OracleFeed>,
    mut target: FeedTarget,
    period: Duration,
    state: watch::Sender<FeedState>,
    mut commands: mpsc::UnboundedReceiver<FeedCommand>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // Start of the batch; a fetched result is cached as of this instant so
        // it has expired by the next tick.
        let started = tokio::select! {
            at = ticker.tick() => at,
            command = commands.recv() => {
                let now = Instant::now();
                match command {
                    Some(FeedCommand::Refresh) => {
                        feed.invalidate(&target);
                    }
                    Some(FeedCommand::SetTarget(next)) => {
                        tracing::info!("Feed target changed: {:?}", next.address);
                        target = next;
                    }
                    None => break,
                }
                ticker.reset();
                now
            }
        };

        poll_once(&feed, &target, &state, started).await;
    }
}

async fn poll_once(
    feed: &OracleFeed,
    target: &FeedTarget,
    state: &watch::Sender<FeedState>,
    started: Instant,
) {
    if !feed.is_cached(target) {
        state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    match feed.fetch_as_of(target, started).await {
        Ok(prices) => state.send_modify(|s| {
            s.prices = prices;
            s.loading = false;
            s.error = None;
            s.updated_at = Some(Utc::now());
        }),
        Err(e) => {
            BATCH_FAILURES.inc();
            tracing::error!("Oracle batch fetch failed: {}", e);
            // Previously published prices stay visible.
            state.send_modify(|s| {
                s.error = Some(e.to_string());
                s.loading = false;
            });
        }
    }
}
