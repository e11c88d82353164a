//! Background eviction of idle chat sessions.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use nosh_core::session::SessionStore;

/// Spawn a task that drops sessions idle for longer than `idle_ttl`,
/// checking every `interval`, until `cancel` fires.
pub fn spawn_session_sweeper<S>(
    sessions: S,
    idle_ttl: Duration,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Session sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let ttl = chrono::Duration::from_std(idle_ttl).unwrap_or(chrono::Duration::MAX);
                    let cutoff = chrono::Utc::now()
                        .checked_sub_signed(ttl)
                        .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
                    let evicted = sessions.evict_idle(cutoff);
                    if evicted > 0 {
                        info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
                    }
                }
            }
        }
    })
}
