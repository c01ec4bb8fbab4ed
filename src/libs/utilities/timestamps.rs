use chrono::{DateTime, SecondsFormat, Utc};

/// Returns the current timestamp in ISO 8601 form with millisecond precision
/// and a `Z` suffix, e.g. `2024-03-07T10:30:45.123Z`.
///
/// This is the format stamped into `lastUpdated`, `exportDate` and
/// `lastValidation`, and matches what a browser's `Date.toISOString()`
/// produces, so documents written by either side compare cleanly.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Converts an RFC 3339 timestamp into a human-readable relative time string.
///
/// # Arguments
/// * `timestamp` - An RFC 3339 formatted timestamp string
///
/// # Returns
/// * `Some(String)` - e.g. "2 days ago", "3 hours ago" or "just now"
/// * `None` - If the timestamp cannot be parsed
///
/// # Time Ranges
/// - At least 1 day: "X days ago" ("1 day ago")
/// - At least 1 hour: "X hours ago" ("1 hour ago")
/// - At least 1 minute: "X minutes ago" ("1 minute ago")
/// - Less than 1 minute (or in the future): "just now"
pub fn time_since(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| {
            let duration = Utc::now().signed_duration_since(dt.with_timezone(&Utc));

            if duration.num_days() > 0 {
                ago(duration.num_days(), "day")
            } else if duration.num_hours() > 0 {
                ago(duration.num_hours(), "hour")
            } else if duration.num_minutes() > 0 {
                ago(duration.num_minutes(), "minute")
            } else {
                "just now".to_string()
            }
        })
        .ok()
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn current_timestamp_is_iso_with_millis_and_z() {
        let ts = current_timestamp();
        assert!(ts.ends_with('Z'), "unexpected suffix in {ts}");
        // 2024-03-07T10:30:45.123Z
        assert_eq!(ts.len(), 24);
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn time_since_picks_the_largest_unit() {
        let three_days = (Utc::now() - Duration::days(3)).to_rfc3339();
        assert_eq!(time_since(&three_days).as_deref(), Some("3 days ago"));

        let two_hours = (Utc::now() - Duration::hours(2)).to_rfc3339();
        assert_eq!(time_since(&two_hours).as_deref(), Some("2 hours ago"));

        assert_eq!(time_since(&current_timestamp()).as_deref(), Some("just now"));
    }

    #[test]
    fn time_since_uses_singular_for_one() {
        let one_day = (Utc::now() - Duration::hours(30)).to_rfc3339();
        assert_eq!(time_since(&one_day).as_deref(), Some("1 day ago"));

        let one_hour = (Utc::now() - Duration::minutes(90)).to_rfc3339();
        assert_eq!(time_since(&one_hour).as_deref(), Some("1 hour ago"));

        let one_minute = (Utc::now() - Duration::seconds(75)).to_rfc3339();
        assert_eq!(time_since(&one_minute).as_deref(), Some("1 minute ago"));
    }

    #[test]
    fn time_since_rejects_garbage() {
        assert!(time_since("yesterday-ish").is_none());
    }
}
