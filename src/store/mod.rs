pub mod cascade;

pub use cascade::Removed;

use rand::Rng;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::model::{
    Component, ComponentPatch, Job, JobPatch, JobStatus, NewComponent, NewJob, NewShip,
    Notification, NotificationKind, Ship, ShipPatch,
};
use crate::seed;
use crate::storage::{
    self, KvStore, WriteOp, COMPONENTS_KEY, JOBS_KEY, NOTIFICATIONS_KEY, SHIPS_KEY,
};

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The four persisted collections at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub ships: Vec<Ship>,
    pub components: Vec<Component>,
    pub jobs: Vec<Job>,
    /// Newest first.
    pub notifications: Vec<Notification>,
}

impl Snapshot {
    pub fn seeded() -> Self {
        Snapshot {
            ships: seed::ships(),
            components: seed::components(),
            jobs: seed::jobs(),
            notifications: Vec::new(),
        }
    }

    pub fn ship(&self, id: &str) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    fn id_taken(&self, id: &str) -> bool {
        self.ship(id).is_some()
            || self.component(id).is_some()
            || self.job(id).is_some()
            || self.notification(id).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Ships,
    Components,
    Jobs,
    Notifications,
}

impl Collection {
    fn key(self) -> &'static str {
        match self {
            Collection::Ships => SHIPS_KEY,
            Collection::Components => COMPONENTS_KEY,
            Collection::Jobs => JOBS_KEY,
            Collection::Notifications => NOTIFICATIONS_KEY,
        }
    }
}

/// Owns the fleet collections and is their only write path. Every mutation
/// is written through to the backend before memory is updated, so a failed
/// write leaves both sides as they were.
pub struct FleetStore<S: KvStore> {
    backend: S,
    clock: Box<dyn Clock>,
    snapshot: Snapshot,
}

impl<S: KvStore> FleetStore<S> {
    pub fn open(backend: S) -> Result<Self> {
        Self::open_with_clock(backend, Box::new(SystemClock))
    }

    /// Hydrate from `backend`; each missing key falls back to seed data.
    pub fn open_with_clock(backend: S, clock: Box<dyn Clock>) -> Result<Self> {
        let ships = storage::load_json(&backend, SHIPS_KEY)?;
        let components = storage::load_json(&backend, COMPONENTS_KEY)?;
        let jobs = storage::load_json(&backend, JOBS_KEY)?;
        let notifications = storage::load_json(&backend, NOTIFICATIONS_KEY)?;

        let snapshot = Snapshot {
            ships: ships.unwrap_or_else(|| {
                debug!("No persisted ships, using seed data");
                seed::ships()
            }),
            components: components.unwrap_or_else(|| {
                debug!("No persisted components, using seed data");
                seed::components()
            }),
            jobs: jobs.unwrap_or_else(|| {
                debug!("No persisted jobs, using seed data");
                seed::jobs()
            }),
            notifications: notifications.unwrap_or_default(),
        };
        debug!(
            "Fleet store hydrated: {} ships, {} components, {} jobs, {} notifications",
            snapshot.ships.len(),
            snapshot.components.len(),
            snapshot.jobs.len(),
            snapshot.notifications.len()
        );

        Ok(FleetStore {
            backend,
            clock,
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn ships(&self) -> &[Ship] {
        &self.snapshot.ships
    }

    pub fn components(&self) -> &[Component] {
        &self.snapshot.components
    }

    pub fn jobs(&self) -> &[Job] {
        &self.snapshot.jobs
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.snapshot.notifications
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// The session shares this backend for its own key.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Drop everything persisted for the fleet and start again from seed data.
    pub fn reset(&mut self) -> Result<()> {
        let next = Snapshot::seeded();
        self.persist(
            &next,
            &[
                Collection::Ships,
                Collection::Components,
                Collection::Jobs,
                Collection::Notifications,
            ],
        )?;
        self.snapshot = next;
        info!("Fleet store reset to seed data");
        Ok(())
    }

    // Ships

    pub fn add_ship(&mut self, draft: NewShip) -> Result<Ship> {
        draft.validate().into_result()?;
        let ship = draft.into_ship(self.fresh_id());

        let mut next = self.snapshot.clone();
        next.ships.push(ship.clone());
        let message = format!("Ship \"{}\" has been added", ship.name);
        self.commit(next, &[Collection::Ships], message, NotificationKind::Success)?;

        info!("Added ship {} ({})", ship.id, ship.name);
        Ok(ship)
    }

    pub fn update_ship(&mut self, id: &str, patch: &ShipPatch) -> Result<Ship> {
        let current = self
            .snapshot
            .ship(id)
            .ok_or_else(|| Error::not_found("Ship", id))?;
        let updated = patch.apply(current).map_err(Error::Validation)?;

        let mut next = self.snapshot.clone();
        replace(&mut next.ships, |s| s.id == id, updated.clone());
        self.commit(
            next,
            &[Collection::Ships],
            "Ship has been updated".to_string(),
            NotificationKind::Info,
        )?;

        info!("Updated ship {}", id);
        Ok(updated)
    }

    pub fn delete_ship(&mut self, id: &str) -> Result<Removed> {
        if self.snapshot.ship(id).is_none() {
            return Err(Error::not_found("Ship", id));
        }

        let mut next = self.snapshot.clone();
        let removed = cascade::remove_ship(&mut next, id);
        self.commit(
            next,
            &[Collection::Ships, Collection::Components, Collection::Jobs],
            "Ship has been deleted".to_string(),
            NotificationKind::Warning,
        )?;

        info!(
            "Deleted ship {} with {} component(s) and {} job(s)",
            id, removed.components, removed.jobs
        );
        Ok(removed)
    }

    // Components

    pub fn add_component(&mut self, draft: NewComponent) -> Result<Component> {
        let component = draft.build(self.fresh_id()).map_err(Error::Validation)?;
        if self.snapshot.ship(&component.ship_id).is_none() {
            return Err(Error::Integrity(format!(
                "ship '{}' does not exist",
                component.ship_id
            )));
        }

        let mut next = self.snapshot.clone();
        next.components.push(component.clone());
        let message = format!("Component \"{}\" has been added", component.name);
        self.commit(next, &[Collection::Components], message, NotificationKind::Success)?;

        info!(
            "Added component {} ({}) to ship {}",
            component.id, component.name, component.ship_id
        );
        Ok(component)
    }

    pub fn update_component(&mut self, id: &str, patch: &ComponentPatch) -> Result<Component> {
        let current = self
            .snapshot
            .component(id)
            .ok_or_else(|| Error::not_found("Component", id))?;
        let updated = patch.apply(current).map_err(Error::Validation)?;

        let mut next = self.snapshot.clone();
        replace(&mut next.components, |c| c.id == id, updated.clone());
        self.commit(
            next,
            &[Collection::Components],
            "Component has been updated".to_string(),
            NotificationKind::Info,
        )?;

        info!("Updated component {}", id);
        Ok(updated)
    }

    pub fn delete_component(&mut self, id: &str) -> Result<Removed> {
        if self.snapshot.component(id).is_none() {
            return Err(Error::not_found("Component", id));
        }

        let mut next = self.snapshot.clone();
        let removed = cascade::remove_component(&mut next, id);
        self.commit(
            next,
            &[Collection::Components, Collection::Jobs],
            "Component has been deleted".to_string(),
            NotificationKind::Warning,
        )?;

        info!("Deleted component {} with {} job(s)", id, removed.jobs);
        Ok(removed)
    }

    // Jobs

    pub fn add_job(&mut self, draft: NewJob) -> Result<Job> {
        let job = draft
            .build(self.fresh_id(), self.clock.today())
            .map_err(Error::Validation)?;
        self.check_job_refs(&job)?;

        let mut next = self.snapshot.clone();
        next.jobs.push(job.clone());
        self.commit(
            next,
            &[Collection::Jobs],
            "Job has been created".to_string(),
            NotificationKind::Success,
        )?;

        info!("Created job {} on component {}", job.id, job.component_id);
        Ok(job)
    }

    /// A status change is announced with the new status; anything else is a
    /// plain update notice.
    pub fn update_job(&mut self, id: &str, patch: &JobPatch) -> Result<Job> {
        let current = self
            .snapshot
            .job(id)
            .ok_or_else(|| Error::not_found("Job", id))?;
        let updated = patch.apply(current).map_err(Error::Validation)?;
        if updated.ship_id != current.ship_id || updated.component_id != current.component_id {
            self.check_job_refs(&updated)?;
        }

        let (message, kind) = match patch.status {
            Some(status) if status != current.status => (
                format!("Job status updated to \"{}\"", status),
                if status == JobStatus::Completed {
                    NotificationKind::Success
                } else {
                    NotificationKind::Info
                },
            ),
            _ => ("Job has been updated".to_string(), NotificationKind::Info),
        };

        let mut next = self.snapshot.clone();
        replace(&mut next.jobs, |j| j.id == id, updated.clone());
        self.commit(next, &[Collection::Jobs], message, kind)?;

        info!("Updated job {} (status {})", id, updated.status);
        Ok(updated)
    }

    pub fn set_job_status(&mut self, id: &str, status: JobStatus) -> Result<Job> {
        self.update_job(id, &JobPatch::status(status))
    }

    pub fn delete_job(&mut self, id: &str) -> Result<Removed> {
        if self.snapshot.job(id).is_none() {
            return Err(Error::not_found("Job", id));
        }

        let mut next = self.snapshot.clone();
        let removed = cascade::remove_job(&mut next, id);
        self.commit(
            next,
            &[Collection::Jobs],
            "Job has been deleted".to_string(),
            NotificationKind::Warning,
        )?;

        info!("Deleted job {}", id);
        Ok(removed)
    }

    // Notifications

    pub fn add_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Result<Notification> {
        let mut next = self.snapshot.clone();
        let notification = self.push_notification(&mut next, message.into(), kind);
        self.persist(&next, &[Collection::Notifications])?;
        self.snapshot = next;
        Ok(notification)
    }

    /// Mark a notification dismissed. It stays in the collection.
    pub fn dismiss_notification(&mut self, id: &str) -> Result<()> {
        let current = self
            .snapshot
            .notification(id)
            .ok_or_else(|| Error::not_found("Notification", id))?;
        if current.dismissed {
            return Ok(());
        }

        let mut next = self.snapshot.clone();
        if let Some(n) = next.notifications.iter_mut().find(|n| n.id == id) {
            n.dismissed = true;
        }
        self.persist(&next, &[Collection::Notifications])?;
        self.snapshot = next;
        debug!("Dismissed notification {}", id);
        Ok(())
    }

    /// Dismiss every active notification; returns how many changed.
    pub fn dismiss_all_notifications(&mut self) -> Result<usize> {
        let mut next = self.snapshot.clone();
        let mut changed = 0;
        for n in next.notifications.iter_mut().filter(|n| !n.dismissed) {
            n.dismissed = true;
            changed += 1;
        }
        if changed > 0 {
            self.persist(&next, &[Collection::Notifications])?;
            self.snapshot = next;
        }
        Ok(changed)
    }

    fn check_job_refs(&self, job: &Job) -> Result<()> {
        if self.snapshot.ship(&job.ship_id).is_none() {
            return Err(Error::Integrity(format!(
                "ship '{}' does not exist",
                job.ship_id
            )));
        }
        match self.snapshot.component(&job.component_id) {
            None => Err(Error::Integrity(format!(
                "component '{}' does not exist",
                job.component_id
            ))),
            Some(c) if c.ship_id != job.ship_id => Err(Error::Integrity(format!(
                "component '{}' belongs to ship '{}', not '{}'",
                c.id, c.ship_id, job.ship_id
            ))),
            Some(_) => Ok(()),
        }
    }

    /// Append the notice for this mutation, write the touched collections
    /// and the notifications in one batch, then swap in `next`.
    fn commit(
        &mut self,
        mut next: Snapshot,
        touched: &[Collection],
        message: String,
        kind: NotificationKind,
    ) -> Result<()> {
        self.push_notification(&mut next, message, kind);

        let mut collections = touched.to_vec();
        collections.push(Collection::Notifications);
        self.persist(&next, &collections)?;

        self.snapshot = next;
        Ok(())
    }

    fn push_notification(
        &self,
        next: &mut Snapshot,
        message: String,
        kind: NotificationKind,
    ) -> Notification {
        let notification = Notification {
            id: fresh_id_for(next),
            message,
            kind,
            timestamp: self.clock.now(),
            dismissed: false,
        };
        next.notifications.insert(0, notification.clone());
        notification
    }

    fn persist(&mut self, next: &Snapshot, collections: &[Collection]) -> Result<()> {
        let mut batch: Vec<WriteOp> = Vec::with_capacity(collections.len());
        for collection in collections {
            let key = collection.key();
            let op = match collection {
                Collection::Ships => storage::put_json(key, &next.ships)?,
                Collection::Components => storage::put_json(key, &next.components)?,
                Collection::Jobs => storage::put_json(key, &next.jobs)?,
                Collection::Notifications => storage::put_json(key, &next.notifications)?,
            };
            batch.push(op);
        }

        let keys: Vec<&str> = batch.iter().map(|op| op.key()).collect();
        debug!("Persisting {:?}", keys);
        self.backend.write(batch)
    }

    fn fresh_id(&self) -> String {
        fresh_id_for(&self.snapshot)
    }
}

fn replace<T>(items: &mut [T], matches: impl Fn(&T) -> bool, value: T) {
    if let Some(slot) = items.iter_mut().find(|item| matches(item)) {
        *slot = value;
    }
}

/// Random 9-character base36 id not used anywhere in `snapshot`.
fn fresh_id_for(snapshot: &Snapshot) -> String {
    let mut rng = rand::rng();
    loop {
        let id: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        if !snapshot.id_taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_fresh_ids_are_base36() {
        let snapshot = Snapshot::seeded();
        let id = fresh_id_for(&snapshot);
        assert_eq!(id.len(), ID_LEN);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_open_empty_backend_uses_seed() {
        let store = FleetStore::open(MemoryStore::new()).unwrap();
        assert_eq!(store.ships().len(), 3);
        assert_eq!(store.components().len(), 4);
        assert_eq!(store.jobs().len(), 2);
        assert!(store.notifications().is_empty());
        // Nothing is written until the first mutation.
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_replace_only_touches_match() {
        let mut items = vec![1, 2, 3];
        replace(&mut items, |v| *v == 2, 20);
        assert_eq!(items, vec![1, 20, 3]);
        replace(&mut items, |v| *v == 9, 90);
        assert_eq!(items, vec![1, 20, 3]);
    }
}
