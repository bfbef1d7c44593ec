//! Calling-window guard
//!
//! Decides whether the current instant falls inside the daily interval
//! during which outbound calls may be placed. All windows are evaluated in
//! the organization's civil timezone, regardless of where the console runs.

use crate::error::{CoreError, Result};
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Timezone all calling windows are evaluated in.
pub const ORG_TIMEZONE: Tz = chrono_tz::America::New_York;

/// A daily `[start, end]` interval at hour:minute granularity.
///
/// Both ends are inclusive. Windows that cross midnight (start > end) are
/// rejected at construction rather than given wrap-around semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallWindow {
    /// Minutes since midnight.
    start: u32,
    end: u32,
}

impl CallWindow {
    /// Build a window from "HH:MM" bounds.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start_min = parse_hhmm(start)?;
        let end_min = parse_hhmm(end)?;
        if start_min > end_min {
            return Err(CoreError::WindowCrossesMidnight {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start: start_min,
            end: end_min,
        })
    }

    /// True iff `instant`, viewed in [`ORG_TIMEZONE`], falls inside the
    /// window. Side-effect-free.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&ORG_TIMEZONE);
        let now = local.hour() * 60 + local.minute();
        self.start <= now && now <= self.end
    }

    pub fn start_hhmm(&self) -> String {
        format_hhmm(self.start)
    }

    pub fn end_hhmm(&self) -> String {
        format_hhmm(self.end)
    }
}

impl std::fmt::Display for CallWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_hhmm(), self.end_hhmm())
    }
}

fn parse_hhmm(s: &str) -> Result<u32> {
    let invalid = || CoreError::InvalidTime(s.to_string());

    let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

fn format_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
