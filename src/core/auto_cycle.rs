//! Repeating auto-cycle timer.
//!
//! A tokio task ticks every `period` and sends `CyclerCommand::Tick` into the
//! command channel the main loop drains. At most one task is alive per timer:
//! starting again aborts the previous task first.

use super::messages::CyclerCommand;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub struct AutoCycle {
    period: Duration,
    tick_tx: UnboundedSender<CyclerCommand>,
    handle: Option<JoinHandle<()>>,
}

impl AutoCycle {
    pub fn new(period: Duration, tick_tx: UnboundedSender<CyclerCommand>) -> Self {
        Self {
            period,
            tick_tx,
            handle: None,
        }
    }

    /// Start ticking; the first tick arrives one full period from now.
    ///
    /// Needs a tokio runtime. Without one the timer stays stopped.
    pub fn start(&mut self) {
        self.stop();

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!("Auto-cycle not started, no tokio runtime: {}", e);
                return;
            }
        };

        let period = self.period;
        let tx = self.tick_tx.clone();
        self.handle = Some(runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(CyclerCommand::Tick).is_err() {
                    tracing::debug!("Auto-cycle receiver closed, timer exiting");
                    break;
                }
            }
        }));
        tracing::debug!("Auto-cycle started ({} ms)", period.as_millis());
    }

    /// Cancel the timer task, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Auto-cycle stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AutoCycle {
    fn drop(&mut self) {
        self.stop();
    }
}
