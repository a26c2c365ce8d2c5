use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One clock tick, stamped with the clock epoch it was scheduled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub epoch: u64,
}

/// Background task that emits one `Tick` per period while a turn clock runs.
///
/// Restarting or stopping aborts the previous task; ticks it already queued
/// carry the old epoch and are dropped by the clock.
#[derive(Debug)]
pub struct Ticker<T> {
    sender: UnboundedSender<T>,
    wrap: fn(Tick) -> T,
    period: Duration,
    task: Option<JoinHandle<()>>,
    epoch: Option<u64>,
}

impl<T: Send + 'static> Ticker<T> {
    pub fn new(sender: UnboundedSender<T>, wrap: fn(Tick) -> T) -> Self {
        Self::with_period(sender, wrap, TICK_PERIOD)
    }

    pub fn with_period(sender: UnboundedSender<T>, wrap: fn(Tick) -> T, period: Duration) -> Self {
        Self {
            sender,
            wrap,
            period,
            task: None,
            epoch: None,
        }
    }

    pub fn start(&mut self, epoch: u64) {
        self.stop();

        let sender = self.sender.clone();
        let wrap = self.wrap;
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if sender.send(wrap(Tick { epoch })).is_err() {
                    break;
                }
            }
        }));
        self.epoch = Some(epoch);
        debug!("Ticker started for epoch {}", epoch);
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Ticker stopped for epoch {:?}", self.epoch);
        }
        self.epoch = None;
    }

    /// Epoch of the running task, `None` when stopped.
    pub fn epoch(&self) -> Option<u64> {
        self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl<T> Drop for Ticker<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
