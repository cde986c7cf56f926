//! Periodic clock ticks for status recomputation.
//!
//! A `Ticker` lives exactly as long as its owner: `stop` cancels and joins the
//! task, and dropping an unstopped ticker cancels it.

use anyhow::Context;
use chronos_core::types::Moment;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::state::ServerEvent;

pub struct Ticker {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking every `period` with the local wall clock. The first tick
    /// is sent immediately.
    pub fn start(period: Duration, tx: broadcast::Sender<ServerEvent>) -> Self {
        Self::start_with_clock(period, tx, Moment::now)
    }

    pub fn start_with_clock(
        period: Duration,
        tx: broadcast::Sender<ServerEvent>,
        clock: fn() -> Moment,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        // Nobody listening is not an error.
                        let _ = tx.send(ServerEvent::Tick(clock()));
                    }
                    _ = token.cancelled() => {
                        tracing::debug!("status ticker stopped");
                        break;
                    }
                }
            }
        });

        tracing::debug!(period_secs = period.as_secs_f64(), "status ticker started");
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub async fn stop(mut self) -> anyhow::Result<()> {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            handle.await.context("status ticker failed to join")?;
        }
        Ok(())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
