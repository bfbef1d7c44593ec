//! Named recurring timers tied to the session lifecycle
//!
//! Each timer is a tokio task holding an interval and a broadcast stop
//! channel; stopping is an explicit call, not an emergent property of task
//! cleanup. Starting a timer under a name that is already running replaces
//! the old one.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

/// The recurring jobs a campaign session owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Stats snapshot refresh.
    Stats,
    /// Log and contact refresh.
    Data,
    /// Calling-window enforcement while calling is active.
    WindowGuard,
}

impl TimerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerKind::Stats => "stats",
            TimerKind::Data => "data",
            TimerKind::WindowGuard => "window-guard",
        }
    }
}

struct TimerHandle {
    stop_tx: broadcast::Sender<()>,
}

/// Owns the set of running timers.
#[derive(Clone)]
pub struct PollScheduler {
    timers: Arc<RwLock<HashMap<TimerKind, TimerHandle>>>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self {
            timers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start (or replace) a recurring timer. The first tick fires one full
    /// period after start; callers do their own initial refresh.
    pub async fn start<F, Fut>(&self, kind: TimerKind, period: Duration, tick: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let mut timers = self.timers.write().await;
        if let Some(previous) = timers.remove(&kind) {
            let _ = previous.stop_tx.send(());
        }

        let (stop_tx, mut stop_rx) = broadcast::channel(1);
        debug!("starting {} timer every {:?}", kind.as_str(), period);

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.recv() => {
                        debug!("{} timer stopped", kind.as_str());
                        break;
                    }
                    _ = ticker.tick() => tick().await,
                }
            }
        });

        timers.insert(kind, TimerHandle { stop_tx });
    }

    /// Cancel one timer. Ticks already executing run to completion.
    pub async fn stop(&self, kind: TimerKind) {
        if let Some(handle) = self.timers.write().await.remove(&kind) {
            let _ = handle.stop_tx.send(());
        }
    }

    /// Cancel every timer. Used on deselect and teardown so nothing
    /// outlives the session that created it.
    pub async fn stop_all(&self) {
        for (_, handle) in self.timers.write().await.drain() {
            let _ = handle.stop_tx.send(());
        }
    }

    pub async fn is_running(&self, kind: TimerKind) -> bool {
        self.timers.read().await.contains_key(&kind)
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_tick(counter: Arc<AtomicUsize>) -> impl Fn() -> std::future::Ready<()> {
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_on_the_period_and_stops() {
        let scheduler = PollScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        scheduler
            .start(
                TimerKind::Stats,
                Duration::from_secs(5),
                counting_tick(counter.clone()),
            )
            .await;
        assert!(scheduler.is_running(TimerKind::Stats).await);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        scheduler.stop(TimerKind::Stats).await;
        tokio::task::yield_now().await;
        let after_stop = counter.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_stop);
        assert!(!scheduler.is_running(TimerKind::Stats).await);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_replaces_the_previous_timer() {
        let scheduler = PollScheduler::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        scheduler
            .start(
                TimerKind::Data,
                Duration::from_secs(5),
                counting_tick(first.clone()),
            )
            .await;
        scheduler
            .start(
                TimerKind::Data,
                Duration::from_secs(5),
                counting_tick(second.clone()),
            )
            .await;

        tokio::time::sleep(Duration::from_secs(16)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0, "replaced before first tick");
        assert!(second.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_all_cancels_everything() {
        let scheduler = PollScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler
            .start(
                TimerKind::Stats,
                Duration::from_secs(5),
                counting_tick(counter.clone()),
            )
            .await;
        scheduler
            .start(
                TimerKind::Data,
                Duration::from_secs(10),
                counting_tick(counter.clone()),
            )
            .await;

        scheduler.stop_all().await;
        tokio::task::yield_now().await;

        let stopped_at = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(counter.load(Ordering::SeqCst), stopped_at);
        assert!(!scheduler.is_running(TimerKind::Stats).await);
        assert!(!scheduler.is_running(TimerKind::Data).await);
    }
}
