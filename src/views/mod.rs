//! Read-only projections over a [`Snapshot`](crate::store::Snapshot).
//!
//! Nothing here mutates or persists; callers pass the evaluation date in.

pub mod calendar;
pub mod feed;
pub mod filter;
pub mod kpi;
pub mod overdue;
pub mod ship;

pub use calendar::{CalendarDay, CalendarMonth};
pub use feed::NotificationFeed;
pub use filter::{Filter, JobQuery, ShipQuery};
pub use kpi::{FleetKpis, ShipStats};
pub use ship::ShipDetail;

pub const DEFAULT_OVERDUE_AFTER_DAYS: i64 = 90;
pub const DEFAULT_CALENDAR_PREVIEW: usize = 2;
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;
pub const DEFAULT_NOTIFICATION_PREVIEW: usize = 10;

/// Tunables for the derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub overdue_after_days: i64,
    pub calendar_preview_per_day: usize,
    pub upcoming_limit: usize,
    pub notification_preview: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            overdue_after_days: DEFAULT_OVERDUE_AFTER_DAYS,
            calendar_preview_per_day: DEFAULT_CALENDAR_PREVIEW,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            notification_preview: DEFAULT_NOTIFICATION_PREVIEW,
        }
    }
}
