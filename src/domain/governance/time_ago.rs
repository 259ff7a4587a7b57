//! Relative time labels ("3 hours ago").

use crate::domain::foundation::Timestamp;

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Formats how long ago `then` was, seen from `now`.
///
/// Whole days once a day has passed, whole hours once an hour has passed,
/// otherwise "Just now". Timestamps in the future also read "Just now".
/// Call on every render; the label is not meant to be cached.
pub fn format_time_ago(now: &Timestamp, then: &Timestamp) -> String {
    format_elapsed_millis(now.millis_since(then))
}

/// Same as [`format_time_ago`], for an already computed elapsed time.
pub fn format_elapsed_millis(elapsed_ms: i64) -> String {
    if elapsed_ms >= MILLIS_PER_DAY {
        plural(elapsed_ms / MILLIS_PER_DAY, "day")
    } else if elapsed_ms >= MILLIS_PER_HOUR {
        plural(elapsed_ms / MILLIS_PER_HOUR, "hour")
    } else {
        "Just now".to_string()
    }
}

fn plural(count: i64, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun} ago")
    } else {
        format!("{count} {noun}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundary_labels() {
        assert_eq!(format_elapsed_millis(0), "Just now");
        assert_eq!(format_elapsed_millis(3_599_999), "Just now");
        assert_eq!(format_elapsed_millis(3_600_000), "1 hour ago");
        assert_eq!(format_elapsed_millis(7_200_000), "2 hours ago");
        assert_eq!(format_elapsed_millis(86_399_999), "23 hours ago");
        assert_eq!(format_elapsed_millis(86_400_000), "1 day ago");
        assert_eq!(format_elapsed_millis(172_800_000), "2 days ago");
    }

    #[test]
    fn future_timestamps_read_just_now() {
        assert_eq!(format_elapsed_millis(-5_000), "Just now");
    }

    #[test]
    fn format_time_ago_uses_both_timestamps() {
        let now = Timestamp::from_unix_millis(1_000_000_000_000).unwrap();
        assert_eq!(format_time_ago(&now, &now.minus_days(1)), "1 day ago");
        assert_eq!(format_time_ago(&now, &now.minus_millis(7_200_000)), "2 hours ago");
        assert_eq!(format_time_ago(&now, &now), "Just now");
    }

    proptest! {
        #[test]
        fn anything_under_an_hour_is_just_now(ms in i64::MIN..3_600_000i64) {
            prop_assert_eq!(format_elapsed_millis(ms), "Just now");
        }

        #[test]
        fn day_labels_use_whole_days(days in 1i64..10_000, rest in 0i64..86_400_000) {
            let label = format_elapsed_millis(days * 86_400_000 + rest);
            let expected = format!("{days} day");
            prop_assert!(label.starts_with(&expected));
        }
    }
}
