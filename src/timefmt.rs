use chrono::{DateTime, Utc};

/// Format a published timestamp relative to `now`.
/// Buckets: under a minute -> "Just now", under an hour -> minutes,
/// under a day -> hours, otherwise days. All floor-divided.
/// Timestamps in the future clamp to "Just now".
pub fn time_ago(now: DateTime<Utc>, published: DateTime<Utc>) -> String {
    let secs = (now - published).num_seconds().max(0);

    if secs < 60 {
        "Just now".to_string()
    } else if secs < 3600 {
        format!("{} minutes ago", secs / 60)
    } else if secs < 86_400 {
        format!("{} hours ago", secs / 3600)
    } else {
        format!("{} days ago", secs / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_just_now_under_a_minute() {
        assert_eq!(time_ago(now(), now() - Duration::seconds(45)), "Just now");
    }

    #[test]
    fn test_minutes_ago() {
        assert_eq!(
            time_ago(now(), now() - Duration::minutes(5)),
            "5 minutes ago"
        );
    }

    #[test]
    fn test_hours_ago() {
        assert_eq!(time_ago(now(), now() - Duration::hours(3)), "3 hours ago");
    }

    #[test]
    fn test_days_ago() {
        assert_eq!(time_ago(now(), now() - Duration::days(2)), "2 days ago");
    }

    #[test]
    fn test_floor_division() {
        // 119 minutes is still "1 hours ago"
        assert_eq!(
            time_ago(now(), now() - Duration::minutes(119)),
            "1 hours ago"
        );
    }

    #[test]
    fn test_boundary_exactly_one_minute() {
        assert_eq!(
            time_ago(now(), now() - Duration::seconds(60)),
            "1 minutes ago"
        );
    }

    #[test]
    fn test_future_timestamp_clamps() {
        assert_eq!(time_ago(now(), now() + Duration::minutes(10)), "Just now");
    }
}
