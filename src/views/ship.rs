use chrono::NaiveDate;

use super::kpi::{ship_stats, ShipStats};
use super::overdue::component_is_overdue;
use crate::model::{Component, Job, JobStatus, Ship};
use crate::store::Snapshot;

pub fn components_of<'a>(snapshot: &'a Snapshot, ship_id: &str) -> Vec<&'a Component> {
    snapshot
        .components
        .iter()
        .filter(|c| c.ship_id == ship_id)
        .collect()
}

pub fn jobs_of<'a>(snapshot: &'a Snapshot, ship_id: &str) -> Vec<&'a Job> {
    snapshot.jobs.iter().filter(|j| j.ship_id == ship_id).collect()
}

/// Completed jobs for the ship, most recently scheduled first.
pub fn maintenance_history<'a>(snapshot: &'a Snapshot, ship_id: &str) -> Vec<&'a Job> {
    let mut history: Vec<&Job> = snapshot
        .jobs
        .iter()
        .filter(|j| j.ship_id == ship_id && j.status == JobStatus::Completed)
        .collect();
    history.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
    history
}

/// Everything the ship page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipDetail<'a> {
    pub ship: &'a Ship,
    pub components: Vec<(&'a Component, bool)>,
    pub jobs: Vec<&'a Job>,
    pub history: Vec<&'a Job>,
    pub stats: ShipStats,
}

pub fn ship_detail<'a>(
    snapshot: &'a Snapshot,
    ship_id: &str,
    today: NaiveDate,
    overdue_after_days: i64,
) -> Option<ShipDetail<'a>> {
    let ship = snapshot.ship(ship_id)?;
    let components = components_of(snapshot, ship_id)
        .into_iter()
        .map(|c| (c, component_is_overdue(c, today, overdue_after_days)))
        .collect();
    Some(ShipDetail {
        ship,
        components,
        jobs: jobs_of(snapshot, ship_id),
        history: maintenance_history(snapshot, ship_id),
        stats: ship_stats(snapshot, ship_id, today, overdue_after_days),
    })
}
