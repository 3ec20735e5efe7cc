//! Native frame loop
//!
//! Ticks a callback on a tokio interval until the owning [`FrameLoop`] is
//! cancelled or dropped. Missed ticks are skipped, so a slow frame never
//! causes a burst of catch-up frames.

use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::core::FrameClock;

/// ~60 Hz
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Handle to a running frame task
pub struct FrameLoop {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<u64>>,
}

impl FrameLoop {
    /// Spawn on the current tokio runtime. `on_frame` receives seconds since
    /// the first frame.
    pub fn spawn<F>(period: Duration, mut on_frame: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let (tx, mut rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let origin = Instant::now();
            let mut clock = FrameClock::new();
            let mut frames = 0u64;

            loop {
                tokio::select! {
                    biased;
                    // Fires on cancel() and when the handle is dropped
                    _ = &mut rx => break,
                    _ = ticker.tick() => {
                        on_frame(clock.elapsed(origin.elapsed().as_secs_f64()));
                        frames += 1;
                    }
                }
            }
            debug!(frames, "Frame loop stopped");
            frames
        });

        debug!(period_ms = period.as_millis() as u64, "Frame loop started");
        Self {
            cancel: Some(tx),
            task: Some(task),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the loop and wait for the in-flight frame. Returns frames run.
    pub async fn cancel(mut self) -> u64 {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
        match self.task.take() {
            Some(task) => match task.await {
                Ok(frames) => frames,
                Err(e) => {
                    error!(error = %e, "Frame task failed");
                    0
                }
            },
            None => 0,
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }
}
