//! TeamFormer processor.
//!
//! The TeamFormer is responsible for:
//! - Ticking at the configured scheduler interval
//! - Running one `FormationPass` per tick, never two at once
//! - Stopping cleanly when the shutdown signal flips

use super::{FormationPass, TickReport};
use crate::utils::utc_now;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// TeamFormer drives the formation pass on a fixed interval.
pub struct TeamFormer {
    pass: FormationPass,
    shutdown_rx: watch::Receiver<bool>,
}

impl TeamFormer {
    /// Create a new TeamFormer.
    ///
    /// # Arguments
    ///
    /// * `pass` - The formation pass run on every tick
    /// * `shutdown_rx` - Receiver for shutdown signal
    pub fn new(pass: FormationPass, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self { pass, shutdown_rx }
    }

    /// Run the TeamFormer.
    ///
    /// The first tick fires immediately. A slow pass delays the next tick
    /// instead of stacking ticks up behind it.
    pub async fn run(mut self) {
        info!(
            interval_secs = self.pass.interval().as_secs(),
            "TeamFormer started"
        );

        let mut ticker = tokio::time::interval(self.pass.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                // Check for shutdown
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("TeamFormer received shutdown signal");
                        break;
                    }
                }

                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        info!("TeamFormer shutdown complete");
    }

    async fn tick(&mut self) -> Option<TickReport> {
        match self.pass.run_once(utc_now()).await {
            Ok(report) => {
                if report.candidates > 0 {
                    info!(
                        candidates = report.candidates,
                        formed = report.formed,
                        skipped = report.skipped,
                        failed = report.failed,
                        "Formation tick finished"
                    );
                } else {
                    debug!("Formation tick finished with nothing to do");
                }
                Some(report)
            }
            Err(e) => {
                error!(error = %e, "Formation tick aborted, will retry next tick");
                None
            }
        }
    }
}
