//! Periodic expired-session sweep.
//!
//! Expiry is already enforced at read time; the sweeper only keeps the
//! table from accumulating dead rows.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use jeton_core::config::session::SessionConfig;
use jeton_core::error::AppError;

use super::store::SessionStore;

/// Handles periodic cleanup of expired sessions.
#[derive(Debug, Clone)]
pub struct SessionSweeper {
    /// Session store for deleting expired rows.
    store: Arc<SessionStore>,
    /// Sweep interval.
    interval: Duration,
}

impl SessionSweeper {
    /// Creates a new sweeper from session configuration.
    pub fn new(store: Arc<SessionStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            interval: Duration::from_secs(config.cleanup_interval_minutes * 60),
        }
    }

    /// Runs one sweep cycle, returning the number of rows removed.
    pub async fn run_once(&self) -> Result<u64, AppError> {
        let removed = self.store.sweep_expired().await?;
        if removed > 0 {
            info!(removed, "Expired sessions swept");
        }
        Ok(removed)
    }

    /// Runs the sweep loop forever. Spawn this on its own task and abort
    /// it on shutdown.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if let Err(e) = self.run_once().await {
                warn!(error = %e, "Session sweep failed");
            }
        }
    }
}
