//! Removal of a parent entity together with everything that references it.

use std::collections::HashSet;

use super::Snapshot;

/// How many rows a delete took out of each collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removed {
    pub ships: usize,
    pub components: usize,
    pub jobs: usize,
}

/// Remove a ship, its components, and every job that points at the ship or
/// at one of those components.
pub fn remove_ship(snapshot: &mut Snapshot, ship_id: &str) -> Removed {
    let ships_before = snapshot.ships.len();
    snapshot.ships.retain(|s| s.id != ship_id);

    let owned: HashSet<String> = snapshot
        .components
        .iter()
        .filter(|c| c.ship_id == ship_id)
        .map(|c| c.id.clone())
        .collect();

    let components_before = snapshot.components.len();
    snapshot.components.retain(|c| !owned.contains(&c.id));

    let jobs_before = snapshot.jobs.len();
    snapshot
        .jobs
        .retain(|j| j.ship_id != ship_id && !owned.contains(&j.component_id));

    Removed {
        ships: ships_before - snapshot.ships.len(),
        components: components_before - snapshot.components.len(),
        jobs: jobs_before - snapshot.jobs.len(),
    }
}

/// Remove a component and its jobs. Sibling components are untouched.
pub fn remove_component(snapshot: &mut Snapshot, component_id: &str) -> Removed {
    let components_before = snapshot.components.len();
    snapshot.components.retain(|c| c.id != component_id);

    let jobs_before = snapshot.jobs.len();
    snapshot.jobs.retain(|j| j.component_id != component_id);

    Removed {
        ships: 0,
        components: components_before - snapshot.components.len(),
        jobs: jobs_before - snapshot.jobs.len(),
    }
}

pub fn remove_job(snapshot: &mut Snapshot, job_id: &str) -> Removed {
    let jobs_before = snapshot.jobs.len();
    snapshot.jobs.retain(|j| j.id != job_id);

    Removed {
        jobs: jobs_before - snapshot.jobs.len(),
        ..Default::default()
    }
}
