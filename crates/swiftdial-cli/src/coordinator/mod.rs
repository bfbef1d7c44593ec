//! Campaign session coordinator
//!
//! Tracks the one active outbound-calling session: which campaign is
//! selected, whether calling is running, and the polled stats/logs/contacts.
//! Owns the recurring timers through [`PollScheduler`] and enforces the
//! calling window while calling is active.

mod backend;
mod scheduler;

pub use backend::CampaignBackend;
pub use scheduler::{PollScheduler, TimerKind};

use crate::api::ApiError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use swiftdial_core::duration;
use swiftdial_core::window::{CallWindow, ORG_TIMEZONE};
use swiftdial_core::SessionState;
use swiftdial_types::{Campaign, LogEntry, StatsSnapshot};
use tokio::sync::{mpsc, RwLock};
use tokio::time::Duration;
use tracing::warn;

pub const STATS_INTERVAL: Duration = Duration::from_secs(5);
pub const DATA_INTERVAL: Duration = Duration::from_secs(10);
pub const GUARD_INTERVAL: Duration = Duration::from_secs(60);

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Why calling ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    UserRequested,
    OutsideWindow,
}

/// What the coordinator surfaces to whoever is rendering the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A session log line (client- or backend-generated), newest first.
    Log(LogEntry),
    /// A user-visible alert outside the log flow.
    Notice(String),
    /// The stats snapshot changed.
    Stats(StatsSnapshot),
    /// Calling ended.
    Stopped(StopReason),
}

#[derive(Clone)]
pub struct SessionCoordinator {
    backend: Arc<dyn CampaignBackend>,
    state: Arc<RwLock<SessionState>>,
    scheduler: PollScheduler,
    window: CallWindow,
    events: mpsc::UnboundedSender<SessionEvent>,
    clock: Clock,
}

impl SessionCoordinator {
    pub fn new(
        backend: Arc<dyn CampaignBackend>,
        window: CallWindow,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        Self::with_clock(backend, window, Arc::new(Utc::now))
    }

    fn with_clock(
        backend: Arc<dyn CampaignBackend>,
        window: CallWindow,
        clock: Clock,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let coordinator = Self {
            backend,
            state: Arc::new(RwLock::new(SessionState::new())),
            scheduler: PollScheduler::new(),
            window,
            events,
            clock,
        };
        (coordinator, receiver)
    }

    #[allow(dead_code)]
    pub fn window(&self) -> CallWindow {
        self.window
    }

    /// Snapshot of the full session state, for rendering.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Select a campaign. Any previous session is torn down first: its
    /// timers stop and its ephemeral state is discarded.
    pub async fn select(&self, campaign: Campaign) {
        self.stop(StopReason::UserRequested).await;
        self.scheduler.stop_all().await;

        let name = campaign.name.clone();
        let generation = self.state.write().await.select(campaign);

        self.log(LogEntry::success(format!("=== Campaign {} Selected ===", name)))
            .await;
        self.log(LogEntry::info("=== Loading Campaign Data ===")).await;

        // Initial fetch before the timers take over.
        self.refresh_stats(generation).await;
        self.refresh_data(generation).await;
        self.log(LogEntry::success("=== Campaign Data Loaded ===")).await;

        let coordinator = self.clone();
        self.scheduler
            .start(TimerKind::Stats, STATS_INTERVAL, move || {
                let coordinator = coordinator.clone();
                async move { coordinator.stats_tick().await }
            })
            .await;

        let coordinator = self.clone();
        self.scheduler
            .start(TimerKind::Data, DATA_INTERVAL, move || {
                let coordinator = coordinator.clone();
                async move { coordinator.data_tick().await }
            })
            .await;
    }

    /// Drop the selection: stop calling if active, cancel every timer,
    /// discard ephemeral state.
    pub async fn deselect(&self) {
        self.stop(StopReason::UserRequested).await;
        self.scheduler.stop_all().await;
        self.state.write().await.deselect();
    }

    /// Begin calling. Preconditions are checked locally first; a failure
    /// surfaces a notice and issues no network call.
    pub async fn start(&self) -> bool {
        let (campaign, already_active) = {
            let state = self.state.read().await;
            (state.campaign.clone(), state.phase.is_active())
        };
        let Some(campaign) = campaign else {
            self.notice("Select a campaign before starting calls").await;
            return false;
        };
        if already_active {
            self.notice("Calling is already active").await;
            return false;
        }
        if !self.window.contains((self.clock)()) {
            self.notice(format!(
                "Calls can only be made between {} and {} ({})",
                self.window.start_hhmm(),
                self.window.end_hhmm(),
                ORG_TIMEZONE
            ))
            .await;
            return false;
        }

        match self.backend.start_calling(&campaign.id).await {
            Ok(()) => {
                self.state.write().await.begin_calling();
                self.log(LogEntry::success("=== Calling Started ===")).await;

                let coordinator = self.clone();
                self.scheduler
                    .start(TimerKind::WindowGuard, GUARD_INTERVAL, move || {
                        let coordinator = coordinator.clone();
                        async move { coordinator.guard_tick().await }
                    })
                    .await;
                true
            }
            Err(e) => {
                self.notice(format!("Error starting campaign calls: {}", e))
                    .await;
                false
            }
        }
    }

    /// End calling. The Active -> Selected transition gates the backend
    /// call, so at most one stop is issued per activation no matter how
    /// many times this races.
    pub async fn stop(&self, reason: StopReason) {
        let campaign_id = {
            let mut state = self.state.write().await;
            if !state.end_calling() {
                return;
            }
            state.campaign_id().map(str::to_string)
        };
        self.scheduler.stop(TimerKind::WindowGuard).await;

        if let Some(id) = campaign_id {
            if let Err(e) = self.backend.stop_calling(&id).await {
                self.notice(format!("Error stopping campaign calls: {}", e))
                    .await;
            }
        }

        match reason {
            StopReason::UserRequested => {
                self.log(LogEntry::info("=== Calling Stopped ===")).await;
            }
            StopReason::OutsideWindow => {
                self.notice("Campaign stopped: outside of allowed hours").await;
            }
        }
        let _ = self.events.send(SessionEvent::Stopped(reason));
    }

    #[allow(dead_code)]
    pub async fn clear_logs(&self) {
        self.state.write().await.clear_logs();
    }

    async fn stats_tick(&self) {
        let generation = self.state.read().await.generation();
        self.refresh_stats(generation).await;
    }

    async fn data_tick(&self) {
        let generation = self.state.read().await.generation();
        self.refresh_data(generation).await;
    }

    async fn guard_tick(&self) {
        if !self.window.contains((self.clock)()) {
            self.stop(StopReason::OutsideWindow).await;
        }
    }

    /// Fetch stats and merge them unless the session moved on while the
    /// request was in flight.
    async fn refresh_stats(&self, generation: u64) {
        let Some(campaign_id) = self.campaign_id().await else {
            return;
        };
        match self.backend.fetch_stats(&campaign_id).await {
            Ok(stats) => {
                let snapshot = duration::snapshot(&stats);
                if self.state.write().await.apply_stats(generation, snapshot.clone()) {
                    let _ = self.events.send(SessionEvent::Stats(snapshot));
                }
            }
            Err(ApiError::Unauthorized) => self.expire_session().await,
            Err(e) => {
                warn!("stats refresh failed: {}", e);
                self.refresh_failed(generation, "=== Error Loading Campaign Stats ===")
                    .await;
            }
        }
    }

    /// Fetch logs and contacts on the shared data timer.
    async fn refresh_data(&self, generation: u64) {
        let Some(campaign_id) = self.campaign_id().await else {
            return;
        };

        match self.backend.fetch_logs(&campaign_id).await {
            Ok(entries) => {
                let applied = self
                    .state
                    .write()
                    .await
                    .prepend_logs(generation, entries.clone());
                if applied {
                    for entry in entries {
                        let _ = self.events.send(SessionEvent::Log(entry));
                    }
                }
            }
            Err(ApiError::Unauthorized) => {
                self.expire_session().await;
                return;
            }
            Err(e) => {
                warn!("log refresh failed: {}", e);
                self.refresh_failed(generation, "=== Error Loading Campaign Logs ===")
                    .await;
            }
        }

        match self.backend.fetch_contacts(&campaign_id).await {
            Ok(contacts) => {
                self.state.write().await.apply_contacts(generation, contacts);
            }
            Err(ApiError::Unauthorized) => self.expire_session().await,
            Err(e) => {
                warn!("contact refresh failed: {}", e);
                self.refresh_failed(generation, "=== Error Loading Campaign Contacts ===")
                    .await;
            }
        }
    }

    /// The backend rejected the token mid-session; polling cannot continue.
    async fn expire_session(&self) {
        self.notice("Session expired - log in again with `swiftdial auth login`")
            .await;
        self.deselect().await;
    }

    /// A failed refresh becomes an error log line; the timer retries on its
    /// next tick.
    async fn refresh_failed(&self, generation: u64, message: &str) {
        let entry = LogEntry::error(message);
        let applied = self
            .state
            .write()
            .await
            .prepend_logs(generation, vec![entry.clone()]);
        if applied {
            let _ = self.events.send(SessionEvent::Log(entry));
        }
    }

    async fn campaign_id(&self) -> Option<String> {
        self.state.read().await.campaign_id().map(str::to_string)
    }

    async fn log(&self, entry: LogEntry) {
        self.state.write().await.push_log(entry.clone());
        let _ = self.events.send(SessionEvent::Log(entry));
    }

    async fn notice(&self, message: impl Into<String>) {
        let _ = self.events.send(SessionEvent::Notice(message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use swiftdial_types::{CampaignStats, Contact};

    #[derive(Default)]
    struct FakeBackend {
        stats_calls: AtomicUsize,
        logs_calls: AtomicUsize,
        contacts_calls: AtomicUsize,
        start_calls: AtomicUsize,
        stop_calls: AtomicUsize,
        fail_stats: AtomicBool,
        stats_delay: Mutex<Duration>,
    }

    impl FakeBackend {
        fn data_calls(&self) -> usize {
            self.stats_calls.load(Ordering::SeqCst)
                + self.logs_calls.load(Ordering::SeqCst)
                + self.contacts_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CampaignBackend for FakeBackend {
        async fn fetch_stats(&self, _campaign_id: &str) -> ApiResult<CampaignStats> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            let delay = *self.stats_delay.lock().unwrap();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if self.fail_stats.load(Ordering::SeqCst) {
                return Err(ApiError::Backend("stats unavailable".to_string()));
            }
            Ok(CampaignStats {
                total_calls: 5,
                total_duration: "00:05:00".to_string(),
                ..Default::default()
            })
        }

        async fn fetch_logs(&self, _campaign_id: &str) -> ApiResult<Vec<LogEntry>> {
            let n = self.logs_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![LogEntry::info(format!("backend line {}", n))])
        }

        async fn fetch_contacts(&self, _campaign_id: &str) -> ApiResult<Vec<Contact>> {
            self.contacts_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn start_calling(&self, _campaign_id: &str) -> ApiResult<()> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn stop_calling(&self, _campaign_id: &str) -> ApiResult<()> {
            self.stop_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn campaign(id: &str) -> Campaign {
        Campaign {
            id: id.to_string(),
            name: format!("Campaign {}", id),
            description: String::new(),
            call_window_start: "09:00".to_string(),
            call_window_end: "17:00".to_string(),
            user_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Clock pinned to a mutable org-local wall time.
    fn movable_clock(hour: u32, minute: u32) -> (Clock, Arc<Mutex<(u32, u32)>>) {
        let setting = Arc::new(Mutex::new((hour, minute)));
        let handle = setting.clone();
        let clock: Clock = Arc::new(move || {
            let (h, m) = *setting.lock().unwrap();
            ORG_TIMEZONE
                .with_ymd_and_hms(2024, 6, 3, h, m, 0)
                .unwrap()
                .with_timezone(&Utc)
        });
        (clock, handle)
    }

    fn coordinator_at(
        backend: Arc<FakeBackend>,
        hour: u32,
        minute: u32,
    ) -> (
        SessionCoordinator,
        mpsc::UnboundedReceiver<SessionEvent>,
        Arc<Mutex<(u32, u32)>>,
    ) {
        let window = CallWindow::parse("09:00", "17:00").unwrap();
        let (clock, handle) = movable_clock(hour, minute);
        let (coordinator, events) = SessionCoordinator::with_clock(backend, window, clock);
        (coordinator, events, handle)
    }

    fn drain_notices(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<String> {
        let mut notices = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let SessionEvent::Notice(msg) = event {
                notices.push(msg);
            }
        }
        notices
    }

    #[tokio::test(start_paused = true)]
    async fn start_without_selection_issues_no_call() {
        let backend = Arc::new(FakeBackend::default());
        let (coordinator, mut events, _) = coordinator_at(backend.clone(), 10, 0);

        assert!(!coordinator.start().await);
        assert_eq!(backend.start_calls.load(Ordering::SeqCst), 0);

        let notices = drain_notices(&mut events);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("Select a campaign"));
    }

    #[tokio::test(start_paused = true)]
    async fn start_outside_window_issues_no_call() {
        let backend = Arc::new(FakeBackend::default());
        let (coordinator, mut events, _) = coordinator_at(backend.clone(), 18, 30);

        coordinator.select(campaign("a")).await;
        assert!(!coordinator.start().await);

        assert_eq!(backend.start_calls.load(Ordering::SeqCst), 0);
        let notices = drain_notices(&mut events);
        assert!(notices.iter().any(|n| n.contains("09:00") && n.contains("17:00")));
    }

    #[tokio::test(start_paused = true)]
    async fn window_guard_stops_exactly_once() {
        let backend = Arc::new(FakeBackend::default());
        let (coordinator, _events, clock) = coordinator_at(backend.clone(), 16, 0);

        coordinator.select(campaign("a")).await;
        assert!(coordinator.start().await);
        assert_eq!(backend.start_calls.load(Ordering::SeqCst), 1);

        // Wall clock drifts past the window between guard ticks.
        *clock.lock().unwrap() = (17, 5);
        coordinator.guard_tick().await;
        coordinator.guard_tick().await;
        coordinator.guard_tick().await;

        assert_eq!(backend.stop_calls.load(Ordering::SeqCst), 1);
        let state = coordinator.state().await;
        assert!(!state.phase.is_active());
        assert!(state.phase.is_selected());
    }

    #[tokio::test(start_paused = true)]
    async fn guard_timer_fires_and_stops_session() {
        let backend = Arc::new(FakeBackend::default());
        let (coordinator, _events, clock) = coordinator_at(backend.clone(), 16, 59);

        coordinator.select(campaign("a")).await;
        assert!(coordinator.start().await);
        assert!(coordinator.scheduler.is_running(TimerKind::WindowGuard).await);

        *clock.lock().unwrap() = (17, 2);
        // Several guard periods elapse; the stop must still be single.
        tokio::time::sleep(GUARD_INTERVAL * 3).await;

        assert_eq!(backend.stop_calls.load(Ordering::SeqCst), 1);
        assert!(!coordinator.state().await.phase.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn deselect_stops_all_polling() {
        let backend = Arc::new(FakeBackend::default());
        let (coordinator, _events, _) = coordinator_at(backend.clone(), 10, 0);

        coordinator.select(campaign("a")).await;
        tokio::time::sleep(Duration::from_secs(21)).await;
        assert!(backend.data_calls() > 3, "polling should have been running");

        coordinator.deselect().await;
        // Let the timer tasks observe their stop signals.
        tokio::time::sleep(Duration::from_millis(10)).await;

        let settled = backend.data_calls();
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(backend.data_calls(), settled, "no refresh after deselect");
        assert!(!coordinator.scheduler.is_running(TimerKind::Stats).await);
        assert!(!coordinator.scheduler.is_running(TimerKind::Data).await);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_stats_response_is_discarded() {
        let backend = Arc::new(FakeBackend::default());
        let (coordinator, _events, _) = coordinator_at(backend.clone(), 10, 0);

        coordinator.select(campaign("a")).await;
        let generation = coordinator.state().await.generation();

        // A slow refresh is in flight when the campaign is deselected.
        *backend.stats_delay.lock().unwrap() = Duration::from_millis(50);
        let in_flight = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.refresh_stats(generation).await })
        };
        tokio::task::yield_now().await;
        coordinator.deselect().await;
        in_flight.await.unwrap();

        let state = coordinator.state().await;
        assert_eq!(state.stats.total_calls, 0, "stale merge must be dropped");
        assert!(state.campaign.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_logs_and_keeps_polling() {
        let backend = Arc::new(FakeBackend::default());
        let (coordinator, _events, _) = coordinator_at(backend.clone(), 10, 0);

        coordinator.select(campaign("a")).await;
        backend.fail_stats.store(true, Ordering::SeqCst);

        tokio::time::sleep(STATS_INTERVAL + Duration::from_secs(1)).await;
        let after_first_failure = backend.stats_calls.load(Ordering::SeqCst);
        tokio::time::sleep(STATS_INTERVAL).await;
        assert!(
            backend.stats_calls.load(Ordering::SeqCst) > after_first_failure,
            "timer must retry on the next tick"
        );

        let state = coordinator.state().await;
        assert!(state
            .logs
            .iter()
            .any(|l| l.message.contains("Error Loading Campaign Stats")));
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_a_new_campaign_replaces_the_session() {
        let backend = Arc::new(FakeBackend::default());
        let (coordinator, _events, _) = coordinator_at(backend.clone(), 10, 0);

        coordinator.select(campaign("a")).await;
        assert!(coordinator.start().await);
        let first_generation = coordinator.state().await.generation();

        coordinator.select(campaign("b")).await;
        let state = coordinator.state().await;
        assert_eq!(state.campaign_id(), Some("b"));
        assert!(state.generation() > first_generation);
        // Switching away from an active session stops it on the backend.
        assert_eq!(backend.stop_calls.load(Ordering::SeqCst), 1);
        assert!(!state.phase.is_active());
    }
}
