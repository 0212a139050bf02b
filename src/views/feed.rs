use chrono::{DateTime, Utc};

use crate::model::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFeed<'a> {
    /// Newest undismissed notifications, at most the preview size.
    pub recent: Vec<&'a Notification>,
    /// All undismissed notifications.
    pub active_count: usize,
}

impl NotificationFeed<'_> {
    pub fn has_more(&self) -> bool {
        self.active_count > self.recent.len()
    }
}

/// Notifications are stored newest first, so the preview is a prefix.
pub fn notification_feed(notifications: &[Notification], preview: usize) -> NotificationFeed<'_> {
    let active: Vec<&Notification> = notifications.iter().filter(|n| !n.dismissed).collect();
    let active_count = active.len();
    NotificationFeed {
        recent: active.into_iter().take(preview).collect(),
        active_count,
    }
}

/// "5m ago", "3h ago", or the date once a day has passed.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes().max(0))
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationKind;
    use chrono::{Duration, TimeZone};

    fn notification(id: &str, dismissed: bool) -> Notification {
        Notification {
            id: id.to_string(),
            message: format!("message {}", id),
            kind: NotificationKind::Info,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            dismissed,
        }
    }

    #[test]
    fn test_feed_skips_dismissed_and_truncates() {
        let notifications: Vec<Notification> = (0..12)
            .map(|i| notification(&format!("n{}", i), i % 4 == 0))
            .collect();
        let feed = notification_feed(&notifications, 5);
        assert_eq!(feed.active_count, 9);
        assert_eq!(feed.recent.len(), 5);
        assert_eq!(feed.recent[0].id, "n1");
        assert!(feed.has_more());
    }

    #[test]
    fn test_relative_time() {
        let then = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(relative_time(then, then + Duration::minutes(5)), "5m ago");
        assert_eq!(relative_time(then, then + Duration::hours(3)), "3h ago");
        assert_eq!(relative_time(then, then + Duration::hours(30)), "2025-06-01");
    }
}
