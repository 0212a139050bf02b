use chrono::NaiveDate;

use crate::model::{Component, Job, JobStatus};

/// Overdue once last maintenance is strictly more than `after_days` days
/// before `today`.
pub fn component_is_overdue(component: &Component, today: NaiveDate, after_days: i64) -> bool {
    (today - component.last_maintenance_date).num_days() > after_days
}

/// Overdue when not completed and scheduled before `today`.
pub fn job_is_overdue(job: &Job, today: NaiveDate) -> bool {
    job.status != JobStatus::Completed && job.scheduled_date < today
}

pub fn overdue_components<'a>(
    components: &'a [Component],
    today: NaiveDate,
    after_days: i64,
) -> Vec<&'a Component> {
    components
        .iter()
        .filter(|c| component_is_overdue(c, today, after_days))
        .collect()
}

pub fn overdue_jobs(jobs: &[Job], today: NaiveDate) -> Vec<&Job> {
    jobs.iter().filter(|j| job_is_overdue(j, today)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::Duration;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_component_overdue_boundary() {
        let today = date("2025-06-01");
        let mut component = seed::components().remove(0);

        component.last_maintenance_date = today - Duration::days(90);
        assert!(!component_is_overdue(&component, today, 90));

        component.last_maintenance_date = today - Duration::days(91);
        assert!(component_is_overdue(&component, today, 90));
    }

    #[test]
    fn test_completed_job_is_never_overdue() {
        let today = date("2025-06-10");
        let mut job = seed::jobs().remove(0);
        assert!(job_is_overdue(&job, today));

        job.status = JobStatus::Completed;
        assert!(!job_is_overdue(&job, today));
    }

    #[test]
    fn test_job_scheduled_today_is_not_overdue() {
        let job = seed::jobs().remove(0);
        assert!(!job_is_overdue(&job, job.scheduled_date));
        assert!(job_is_overdue(&job, job.scheduled_date + Duration::days(1)));
    }

    #[test]
    fn test_seed_components_overdue_in_mid_2025() {
        let components = seed::components();
        let overdue = overdue_components(&components, date("2025-06-01"), 90);
        assert_eq!(overdue.len(), 4);
        let overdue = overdue_components(&components, date("2024-04-01"), 90);
        // Only the radar and propeller were last serviced before January.
        let ids: Vec<&str> = overdue.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c4"]);
    }
}
