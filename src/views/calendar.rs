use chrono::{Datelike, NaiveDate};

use crate::model::{Job, JobStatus};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    /// First few jobs scheduled on this day.
    pub preview: Vec<&'a Job>,
    /// Jobs on this day beyond the preview.
    pub overflow: usize,
    pub is_today: bool,
}

impl CalendarDay<'_> {
    pub fn total_jobs(&self) -> usize {
        self.preview.len() + self.overflow
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth<'a> {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 in a Sunday-first week.
    pub leading_blanks: usize,
    pub days: Vec<CalendarDay<'a>>,
    /// Non-completed jobs in the month, earliest first.
    pub upcoming: Vec<&'a Job>,
}

impl CalendarMonth<'_> {
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (ny, nm) = next_month(year, month);
    let next_first = NaiveDate::from_ymd_opt(ny, nm, 1)?;
    Some((next_first - first).num_days() as u32)
}

/// Jobs whose scheduled date is exactly `date`, in collection order.
pub fn jobs_on(jobs: &[Job], date: NaiveDate) -> Vec<&Job> {
    jobs.iter().filter(|j| j.scheduled_date == date).collect()
}

/// Non-completed jobs scheduled in the month, earliest first, at most `limit`.
pub fn upcoming_in_month(jobs: &[Job], year: i32, month: u32, limit: usize) -> Vec<&Job> {
    let mut upcoming: Vec<&Job> = jobs
        .iter()
        .filter(|j| {
            j.scheduled_date.year() == year
                && j.scheduled_date.month() == month
                && j.status != JobStatus::Completed
        })
        .collect();
    upcoming.sort_by_key(|j| j.scheduled_date);
    upcoming.truncate(limit);
    upcoming
}

/// Lay out a month grid. `None` when `month` is not 1..=12.
pub fn build_month<'a>(
    jobs: &'a [Job],
    year: i32,
    month: u32,
    today: NaiveDate,
    preview_per_day: usize,
    upcoming_limit: usize,
) -> Option<CalendarMonth<'a>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let day_count = days_in_month(year, month)?;

    let mut days = Vec::with_capacity(day_count as usize);
    for day in 1..=day_count {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let mut scheduled = jobs_on(jobs, date);
        let overflow = scheduled.len().saturating_sub(preview_per_day);
        scheduled.truncate(preview_per_day);
        days.push(CalendarDay {
            date,
            preview: scheduled,
            overflow,
            is_today: date == today,
        });
    }

    Some(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday() as usize,
        days,
        upcoming: upcoming_in_month(jobs, year, month, upcoming_limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn job_on(id: &str, day: &str, status: JobStatus) -> Job {
        let mut job = seed::jobs().remove(0);
        job.id = id.to_string();
        job.scheduled_date = date(day);
        job.status = status;
        job
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(next_month(2025, 12), (2026, 1));
        assert_eq!(next_month(2025, 5), (2025, 6));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn test_day_cell_preview_and_overflow() {
        let jobs = vec![
            job_on("a", "2025-06-05", JobStatus::Open),
            job_on("b", "2025-06-05", JobStatus::Open),
            job_on("c", "2025-06-05", JobStatus::Completed),
            job_on("d", "2025-06-06", JobStatus::Open),
        ];
        let month = build_month(&jobs, 2025, 6, date("2025-06-06"), 2, 5).unwrap();
        assert_eq!(month.days.len(), 30);
        // 1 June 2025 is a Sunday.
        assert_eq!(month.leading_blanks, 0);

        let fifth = &month.days[4];
        assert_eq!(fifth.preview.len(), 2);
        assert_eq!(fifth.overflow, 1);
        assert_eq!(fifth.total_jobs(), 3);
        assert!(month.days[5].is_today);
        assert_eq!(month.title(), "June 2025");
    }

    #[test]
    fn test_upcoming_is_sorted_and_skips_completed() {
        let jobs = vec![
            job_on("late", "2025-06-20", JobStatus::Open),
            job_on("done", "2025-06-01", JobStatus::Completed),
            job_on("early", "2025-06-02", JobStatus::InProgress),
            job_on("other-month", "2025-07-01", JobStatus::Open),
        ];
        let upcoming = upcoming_in_month(&jobs, 2025, 6, 5);
        let ids: Vec<&str> = upcoming.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert_eq!(upcoming_in_month(&jobs, 2025, 6, 1).len(), 1);
    }

    #[test]
    fn test_leading_blanks_follow_weekday() {
        // 1 May 2025 is a Thursday.
        let month = build_month(&[], 2025, 5, date("2025-05-01"), 2, 5).unwrap();
        assert_eq!(month.leading_blanks, 4);
        assert!(build_month(&[], 2025, 0, date("2025-05-01"), 2, 5).is_none());
    }
}
