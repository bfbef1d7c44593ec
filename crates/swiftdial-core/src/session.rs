//! Client-side campaign session state
//!
//! One console owns at most one session. The store is the single source of
//! truth for which campaign is selected, whether calling is active, and the
//! cached stats/logs/contacts. Every mutation that invalidates cached data
//! bumps a generation counter; refresh results tagged with an older
//! generation are discarded instead of applied.

use serde::{Deserialize, Serialize};
use swiftdial_types::{Campaign, Contact, LogEntry, StatsSnapshot};

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No campaign selected.
    Idle,
    /// Campaign selected, data polling runs, calling not active.
    Selected,
    /// Calling in progress; the window guard is armed.
    Active,
}

impl SessionPhase {
    pub fn is_selected(&self) -> bool {
        !matches!(self, SessionPhase::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::Active)
    }
}

/// The session state store.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub campaign: Option<Campaign>,
    pub stats: StatsSnapshot,
    pub contacts: Vec<Contact>,
    /// Newest first, unbounded until cleared.
    pub logs: Vec<LogEntry>,
    generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            campaign: None,
            stats: StatsSnapshot::default(),
            contacts: Vec::new(),
            logs: Vec::new(),
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn campaign_id(&self) -> Option<&str> {
        self.campaign.as_ref().map(|c| c.id.as_str())
    }

    /// Select a campaign, implicitly discarding any previous session.
    /// Returns the new generation for tagging refreshes.
    pub fn select(&mut self, campaign: Campaign) -> u64 {
        self.reset();
        self.campaign = Some(campaign);
        self.phase = SessionPhase::Selected;
        self.generation
    }

    /// Drop the selection and all ephemeral state.
    pub fn deselect(&mut self) {
        self.reset();
    }

    /// Selected -> Active. False if there is nothing to start.
    pub fn begin_calling(&mut self) -> bool {
        if self.phase != SessionPhase::Selected {
            return false;
        }
        self.phase = SessionPhase::Active;
        true
    }

    /// Active -> Selected. Returns true only for the transition that
    /// actually ends calling, so a stop is issued at most once per
    /// activation.
    pub fn end_calling(&mut self) -> bool {
        if self.phase != SessionPhase::Active {
            return false;
        }
        self.phase = SessionPhase::Selected;
        true
    }

    /// Apply a stats refresh tagged with the generation it was issued
    /// under. Stale results are discarded.
    pub fn apply_stats(&mut self, generation: u64, stats: StatsSnapshot) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.stats = stats;
        true
    }

    /// Apply a contact refresh; same staleness rule as stats.
    pub fn apply_contacts(&mut self, generation: u64, contacts: Vec<Contact>) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.contacts = contacts;
        true
    }

    /// Merge a batch of log lines onto the front of the log, newest batch
    /// first. Stale batches are discarded.
    pub fn prepend_logs(&mut self, generation: u64, entries: Vec<LogEntry>) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.logs.splice(0..0, entries);
        true
    }

    /// Push a single client-generated entry (selection notices, refresh
    /// failures) onto the front of the log.
    pub fn push_log(&mut self, entry: LogEntry) {
        self.logs.insert(0, entry);
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    fn accepts(&self, generation: u64) -> bool {
        self.generation == generation && self.phase.is_selected()
    }

    fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.campaign = None;
        self.stats = StatsSnapshot::default();
        self.contacts.clear();
        self.logs.clear();
        self.generation += 1;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftdial_types::LogLevel;

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

    #[test]
    fn select_enters_selected_and_bumps_generation() {
        let mut state = SessionState::new();
        let gen0 = state.generation();

        let gen1 = state.select(campaign("a"));
        assert_eq!(state.phase, SessionPhase::Selected);
        assert_eq!(state.campaign_id(), Some("a"));
        assert!(gen1 > gen0);
    }

    #[test]
    fn calling_starts_and_stops_exactly_once() {
        let mut state = SessionState::new();
        assert!(!state.begin_calling(), "nothing selected");

        state.select(campaign("a"));
        assert!(state.begin_calling());
        assert!(!state.begin_calling(), "already active");

        assert!(state.end_calling());
        assert!(!state.end_calling(), "second stop must be a no-op");
        assert_eq!(state.phase, SessionPhase::Selected);
    }

    #[test]
    fn stale_refreshes_are_discarded() {
        let mut state = SessionState::new();
        let old_gen = state.select(campaign("a"));

        // Reselect while the old refresh is in flight.
        let new_gen = state.select(campaign("b"));
        let stale = StatsSnapshot {
            total_calls: 99,
            ..Default::default()
        };
        assert!(!state.apply_stats(old_gen, stale));
        assert_eq!(state.stats.total_calls, 0);

        assert!(state.apply_stats(
            new_gen,
            StatsSnapshot {
                total_calls: 7,
                ..Default::default()
            }
        ));
        assert_eq!(state.stats.total_calls, 7);
    }

    #[test]
    fn refreshes_after_deselect_are_discarded() {
        let mut state = SessionState::new();
        let generation = state.select(campaign("a"));
        state.deselect();

        assert!(!state.apply_contacts(generation, Vec::new()));
        assert!(!state.prepend_logs(generation, vec![LogEntry::info("late")]));
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.logs.is_empty());
    }

    #[test]
    fn log_batches_prepend_newest_first() {
        let mut state = SessionState::new();
        let generation = state.select(campaign("a"));

        let batch_a = vec![LogEntry::info("a1"), LogEntry::info("a2")];
        let batch_b = vec![LogEntry::info("b1"), LogEntry::info("b2")];
        assert!(state.prepend_logs(generation, batch_a));
        assert!(state.prepend_logs(generation, batch_b));

        let messages: Vec<&str> = state.logs.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["b1", "b2", "a1", "a2"]);
    }

    #[test]
    fn deselect_discards_ephemeral_state() {
        let mut state = SessionState::new();
        let generation = state.select(campaign("a"));
        state.push_log(LogEntry::now(LogLevel::Success, "selected"));
        state.apply_stats(
            generation,
            StatsSnapshot {
                total_calls: 3,
                ..Default::default()
            },
        );

        state.deselect();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.campaign.is_none());
        assert!(state.logs.is_empty());
        assert_eq!(state.stats.total_calls, 0);
    }
}
