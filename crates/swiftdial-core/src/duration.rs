//! Call-duration parsing and formatting
//!
//! The backend reports talk time as "HH:MM:SS" strings; the client derives
//! the per-call average itself.

use crate::error::{CoreError, Result};
use swiftdial_types::{CampaignStats, StatsSnapshot};

/// Parse "HH:MM:SS" into total seconds.
pub fn parse_hms(s: &str) -> Result<u64> {
    let invalid = || CoreError::InvalidDuration(s.to_string());

    let mut parts = s.split(':');
    let (h, m, sec) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(s), None) => (h, m, s),
        _ => return Err(invalid()),
    };
    let h: u64 = h.parse().map_err(|_| invalid())?;
    let m: u64 = m.parse().map_err(|_| invalid())?;
    let sec: u64 = sec.parse().map_err(|_| invalid())?;
    if m > 59 || sec > 59 {
        return Err(invalid());
    }
    Ok(h * 3600 + m * 60 + sec)
}

/// Format total seconds as "HH:MM:SS".
pub fn format_hms(total_seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

/// Derive the display snapshot from wire stats.
///
/// An unparseable total duration degrades to zero rather than failing the
/// refresh.
pub fn snapshot(stats: &CampaignStats) -> StatsSnapshot {
    let total_secs = parse_hms(&stats.total_duration).unwrap_or(0);
    let avg_duration = if stats.total_calls > 0 {
        format_hms(total_secs / stats.total_calls)
    } else {
        format_hms(0)
    };

    StatsSnapshot {
        total_calls: stats.total_calls,
        voicemails: stats.voicemail_count,
        hot_leads: stats.hot_leads,
        total_duration: format_hms(total_secs),
        avg_duration,
        total_cost: stats.total_cost,
        avg_cost: stats.avg_cost_per_call,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        assert_eq!(parse_hms("00:00:00").unwrap(), 0);
        assert_eq!(parse_hms("01:02:03").unwrap(), 3723);
        assert_eq!(format_hms(3723), "01:02:03");
        assert_eq!(format_hms(0), "00:00:00");
        // Hours beyond a day are legal for aggregate talk time.
        assert_eq!(parse_hms("99:00:00").unwrap(), 99 * 3600);
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(parse_hms("1:2").is_err());
        assert!(parse_hms("01:60:00").is_err());
        assert!(parse_hms("abc").is_err());
        assert!(parse_hms("01:02:03:04").is_err());
    }

    #[test]
    fn snapshot_derives_average() {
        let stats = CampaignStats {
            total_calls: 4,
            voicemail_count: 1,
            hot_leads: 2,
            total_duration: "00:02:00".to_string(),
            total_cost: 1.2,
            avg_cost_per_call: 0.3,
            ..Default::default()
        };
        let snap = snapshot(&stats);
        assert_eq!(snap.avg_duration, "00:00:30");
        assert_eq!(snap.total_duration, "00:02:00");
        assert_eq!(snap.hot_leads, 2);
    }

    #[test]
    fn snapshot_with_no_calls_has_zero_average() {
        let snap = snapshot(&CampaignStats::default());
        assert_eq!(snap.avg_duration, "00:00:00");
        assert_eq!(snap.total_calls, 0);
    }
}
