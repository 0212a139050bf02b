use chrono::NaiveDate;
use serde::Serialize;

use super::overdue::{component_is_overdue, job_is_overdue};
use crate::model::{JobPriority, JobStatus, ShipStatus};
use crate::store::Snapshot;

/// Dashboard headline numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FleetKpis {
    pub total_ships: usize,
    pub active_ships: usize,
    pub ships_under_maintenance: usize,
    pub inactive_ships: usize,
    pub total_jobs: usize,
    pub open_jobs: usize,
    pub in_progress_jobs: usize,
    pub completed_jobs: usize,
    pub cancelled_jobs: usize,
    pub overdue_components: usize,
    pub overdue_jobs: usize,
    /// Critical priority and not yet completed.
    pub critical_jobs: usize,
}

impl FleetKpis {
    /// Open plus in progress.
    pub fn active_jobs(&self) -> usize {
        self.open_jobs + self.in_progress_jobs
    }
}

pub fn fleet_kpis(snapshot: &Snapshot, today: NaiveDate, overdue_after_days: i64) -> FleetKpis {
    let mut kpis = FleetKpis {
        total_ships: snapshot.ships.len(),
        total_jobs: snapshot.jobs.len(),
        ..Default::default()
    };

    for ship in &snapshot.ships {
        match ship.status {
            ShipStatus::Active => kpis.active_ships += 1,
            ShipStatus::UnderMaintenance => kpis.ships_under_maintenance += 1,
            ShipStatus::Inactive => kpis.inactive_ships += 1,
        }
    }

    for job in &snapshot.jobs {
        match job.status {
            JobStatus::Open => kpis.open_jobs += 1,
            JobStatus::InProgress => kpis.in_progress_jobs += 1,
            JobStatus::Completed => kpis.completed_jobs += 1,
            JobStatus::Cancelled => kpis.cancelled_jobs += 1,
        }
        if job.priority == JobPriority::Critical && job.status != JobStatus::Completed {
            kpis.critical_jobs += 1;
        }
        if job_is_overdue(job, today) {
            kpis.overdue_jobs += 1;
        }
    }

    kpis.overdue_components = snapshot
        .components
        .iter()
        .filter(|c| component_is_overdue(c, today, overdue_after_days))
        .count();

    kpis
}

/// Ship count per status, in declaration order.
pub fn ship_status_distribution(snapshot: &Snapshot) -> Vec<(ShipStatus, usize)> {
    ShipStatus::ALL
        .iter()
        .map(|status| {
            let count = snapshot.ships.iter().filter(|s| s.status == *status).count();
            (*status, count)
        })
        .collect()
}

/// Job count per priority, lowest first.
pub fn job_priority_distribution(snapshot: &Snapshot) -> Vec<(JobPriority, usize)> {
    JobPriority::ALL
        .iter()
        .map(|priority| {
            let count = snapshot.jobs.iter().filter(|j| j.priority == *priority).count();
            (*priority, count)
        })
        .collect()
}

pub fn job_status_distribution(snapshot: &Snapshot) -> Vec<(JobStatus, usize)> {
    JobStatus::ALL
        .iter()
        .map(|status| {
            let count = snapshot.jobs.iter().filter(|j| j.status == *status).count();
            (*status, count)
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShipStats {
    pub components: usize,
    pub overdue_components: usize,
    pub active_jobs: usize,
    pub critical_jobs: usize,
    pub total_jobs: usize,
}

pub fn ship_stats(
    snapshot: &Snapshot,
    ship_id: &str,
    today: NaiveDate,
    overdue_after_days: i64,
) -> ShipStats {
    let mut stats = ShipStats::default();
    for component in snapshot.components.iter().filter(|c| c.ship_id == ship_id) {
        stats.components += 1;
        if component_is_overdue(component, today, overdue_after_days) {
            stats.overdue_components += 1;
        }
    }
    for job in snapshot.jobs.iter().filter(|j| j.ship_id == ship_id) {
        stats.total_jobs += 1;
        if job.status.is_active() {
            stats.active_jobs += 1;
        }
        if job.priority == JobPriority::Critical && job.status != JobStatus::Completed {
            stats.critical_jobs += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_seed_kpis() {
        let snapshot = Snapshot::seeded();
        let kpis = fleet_kpis(&snapshot, date("2024-04-01"), 90);
        assert_eq!(kpis.total_ships, 3);
        assert_eq!(kpis.active_ships, 2);
        assert_eq!(kpis.ships_under_maintenance, 1);
        assert_eq!(kpis.open_jobs, 1);
        assert_eq!(kpis.in_progress_jobs, 1);
        assert_eq!(kpis.active_jobs(), 2);
        assert_eq!(kpis.completed_jobs, 0);
        assert_eq!(kpis.critical_jobs, 1);
        assert_eq!(kpis.overdue_components, 2);
        assert_eq!(kpis.overdue_jobs, 0);
    }

    #[test]
    fn test_completed_critical_job_is_not_counted() {
        let mut snapshot = Snapshot::seeded();
        snapshot.jobs[1].status = JobStatus::Completed;
        let kpis = fleet_kpis(&snapshot, date("2024-04-01"), 90);
        assert_eq!(kpis.critical_jobs, 0);
        assert_eq!(kpis.completed_jobs, 1);
    }

    #[test]
    fn test_distributions_cover_every_variant() {
        let snapshot = Snapshot::seeded();
        let ships = ship_status_distribution(&snapshot);
        assert_eq!(
            ships,
            vec![
                (ShipStatus::Active, 2),
                (ShipStatus::UnderMaintenance, 1),
                (ShipStatus::Inactive, 0)
            ]
        );
        let priorities = job_priority_distribution(&snapshot);
        assert_eq!(priorities.len(), 4);
        assert_eq!(priorities[2], (JobPriority::High, 1));
        assert_eq!(priorities[3], (JobPriority::Critical, 1));
        let statuses = job_status_distribution(&snapshot);
        assert_eq!(statuses[1], (JobStatus::InProgress, 1));
    }

    #[test]
    fn test_ship_stats() {
        let snapshot = Snapshot::seeded();
        let stats = ship_stats(&snapshot, "s1", date("2024-04-01"), 90);
        assert_eq!(
            stats,
            ShipStats {
                components: 2,
                overdue_components: 0,
                active_jobs: 1,
                critical_jobs: 0,
                total_jobs: 1,
            }
        );
        let stats = ship_stats(&snapshot, "s2", date("2024-04-01"), 90);
        assert_eq!(stats.critical_jobs, 1);
        assert_eq!(stats.overdue_components, 1);
    }
}
