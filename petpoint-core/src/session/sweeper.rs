//! Background task that expires idle sessions

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::store::SessionStore;

/// Periodically calls [`SessionStore::sweep`] on a fixed cadence.
///
/// The cadence is independent of the store's idle timeout, so a session is
/// removed somewhere between `timeout` and `timeout + interval` after its
/// last append.
pub struct SessionSweeper {
    store: Arc<SessionStore>,
    interval: Duration,
    running: Arc<RwLock<bool>>,
    task: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl SessionSweeper {
    /// Create a sweeper; nothing runs until [`start`](Self::start)
    pub fn new(store: Arc<SessionStore>, interval: Duration) -> Self {
        Self {
            store,
            interval,
            running: Arc::new(RwLock::new(false)),
            task: Arc::new(RwLock::new(None)),
        }
    }

    /// Start the sweep loop
    pub async fn start(&self) {
        {
            let running_guard = self.running.read().await;
            if *running_guard {
                debug!("Session sweeper already running");
                return;
            }
        }

        *self.running.write().await = true;

        let interval = self.interval;
        let running = Arc::clone(&self.running);
        let store = Arc::clone(&self.store);

        let task = tokio::spawn(async move {
            run_loop(store, running, interval).await;
        });

        *self.task.write().await = Some(task);
        info!(
            "Session sweeper started (every {}s, timeout {}s)",
            self.interval.as_secs_f64(),
            self.store.timeout().as_secs_f64()
        );
    }

    /// Stop the sweep loop. An in-flight pass is abandoned.
    pub async fn stop(&self) {
        *self.running.write().await = false;

        let mut task_guard = self.task.write().await;
        if let Some(task) = task_guard.take() {
            task.abort();
            info!("Session sweeper stopped");
        }
    }

    /// Check if the sweep loop is running
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    /// Run one sweep pass immediately
    pub fn sweep_now(&self) -> HashSet<String> {
        sweep_once(&self.store)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Get sweeper status
    pub async fn status(&self) -> serde_json::Value {
        let is_running = *self.running.read().await;

        serde_json::json!({
            "running": is_running,
            "interval_s": self.interval.as_secs(),
            "timeout_s": self.store.timeout().as_secs(),
            "sessions": self.store.len(),
        })
    }
}

async fn run_loop(store: Arc<SessionStore>, running: Arc<RwLock<bool>>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;

        if !*running.read().await {
            break;
        }

        sweep_once(&store);
    }
}

fn sweep_once(store: &SessionStore) -> HashSet<String> {
    let now = store.clock().now();
    let expired = store.sweep(now);
    if !expired.is_empty() {
        info!("Swept {} idle session(s)", expired.len());
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::clock::ManualClock;
    use crate::session::types::Exchange;
    use chrono::Duration as TimeDelta;

    fn store_with_clock(timeout_s: u64) -> (Arc<SessionStore>, ManualClock) {
        let clock = ManualClock::default();
        let store = SessionStore::with_clock(
            Duration::from_secs(timeout_s),
            Arc::new(clock.clone()),
        );
        (Arc::new(store), clock)
    }

    #[tokio::test]
    async fn test_sweeper_new_is_stopped() {
        let (store, _clock) = store_with_clock(300);
        let sweeper = SessionSweeper::new(store, Duration::from_secs(60));
        assert!(!sweeper.is_running().await);
    }

    #[tokio::test]
    async fn test_sweeper_start_stop() {
        let (store, _clock) = store_with_clock(300);
        let sweeper = SessionSweeper::new(store, Duration::from_secs(3600));

        sweeper.start().await;
        sweeper.start().await;
        assert!(sweeper.is_running().await);

        sweeper.stop().await;
        assert!(!sweeper.is_running().await);
    }

    #[tokio::test]
    async fn test_sweeper_status() {
        let (store, _clock) = store_with_clock(300);
        store.append("a", Exchange::new("hi", "hello"));
        let sweeper = SessionSweeper::new(store, Duration::from_secs(60));

        let status = sweeper.status().await;
        assert!(!status["running"].as_bool().unwrap());
        assert_eq!(status["interval_s"].as_u64().unwrap(), 60);
        assert_eq!(status["timeout_s"].as_u64().unwrap(), 300);
        assert_eq!(status["sessions"].as_u64().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sweep_now_uses_store_clock() {
        let (store, clock) = store_with_clock(300);
        store.append("a", Exchange::new("hi", "hello"));
        let sweeper = SessionSweeper::new(Arc::clone(&store), Duration::from_secs(60));

        assert!(sweeper.sweep_now().is_empty());

        clock.advance(TimeDelta::seconds(301));
        assert_eq!(sweeper.sweep_now(), HashSet::from(["a".to_string()]));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_background_loop_expires_idle_sessions() {
        let (store, clock) = store_with_clock(300);
        store.append("idle", Exchange::new("hi", "hello"));
        clock.advance(TimeDelta::seconds(301));
        store.append("active", Exchange::new("still", "here"));

        let sweeper = SessionSweeper::new(Arc::clone(&store), Duration::from_millis(20));
        sweeper.start().await;

        tokio::time::sleep(Duration::from_millis(300)).await;
        sweeper.stop().await;

        assert!(!store.contains("idle"));
        assert!(store.contains("active"));
    }

    #[tokio::test]
    async fn test_stopped_loop_no_longer_sweeps() {
        let (store, clock) = store_with_clock(300);
        let sweeper = SessionSweeper::new(Arc::clone(&store), Duration::from_millis(20));
        sweeper.start().await;
        sweeper.stop().await;

        store.append("a", Exchange::new("hi", "hello"));
        clock.advance(TimeDelta::seconds(301));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(store.contains("a"));
    }
}
