use chrono::NaiveDate;
use fleet_maint::model::{JobPriority, JobStatus, NewComponent};
use fleet_maint::storage::MemoryStore;
use fleet_maint::views::{calendar, feed, kpi, overdue, Filter, JobQuery};
use fleet_maint::{FixedClock, FleetStore};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn store_on(today: &str) -> FleetStore<MemoryStore> {
    FleetStore::open_with_clock(MemoryStore::new(), Box::new(FixedClock::on(date(today)))).unwrap()
}

#[test]
fn test_completed_filter_with_any_priority() {
    let mut store = store_on("2025-06-01");
    store.set_job_status("j2", JobStatus::Completed).unwrap();

    let query = JobQuery {
        status: Filter::Only(JobStatus::Completed),
        priority: Filter::All,
        ..Default::default()
    };
    let snapshot = store.snapshot();
    let found = query.apply(&snapshot.jobs, &snapshot.ships, &snapshot.components);
    let ids: Vec<&str> = found.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["j2"]);

    let query = JobQuery {
        status: Filter::Only(JobStatus::Completed),
        priority: Filter::Only(JobPriority::High),
        ..Default::default()
    };
    assert!(query
        .apply(&snapshot.jobs, &snapshot.ships, &snapshot.components)
        .is_empty());
}

#[test]
fn test_overdue_boundary_through_the_store() {
    let mut store = store_on("2025-06-01");
    let ship_id = store.ships()[0].id.clone();
    for (serial, last) in [("D90", "2025-03-03"), ("D91", "2025-03-02")] {
        store
            .add_component(NewComponent {
                ship_id: ship_id.clone(),
                name: format!("Pump {}", serial),
                serial_number: serial.to_string(),
                install_date: Some(date("2020-01-01")),
                last_maintenance_date: Some(date(last)),
            })
            .unwrap();
    }

    let today = store.clock().today();
    let late: Vec<&str> = overdue::overdue_components(store.components(), today, 90)
        .iter()
        .map(|c| c.serial_number.as_str())
        .collect();
    assert!(late.contains(&"D91"));
    assert!(!late.contains(&"D90"));
}

#[test]
fn test_kpis_follow_mutations() {
    let mut store = store_on("2025-06-01");
    let before = kpi::fleet_kpis(store.snapshot(), store.clock().today(), 90);
    assert_eq!(before.total_ships, 3);
    assert_eq!(before.critical_jobs, 1);

    store.delete_ship("s2").unwrap();
    let after = kpi::fleet_kpis(store.snapshot(), store.clock().today(), 90);
    assert_eq!(after.total_ships, 2);
    assert_eq!(after.ships_under_maintenance, 0);
    assert_eq!(after.critical_jobs, 0);
    assert_eq!(after.in_progress_jobs, 0);
}

#[test]
fn test_seed_calendar_for_june_2025() {
    let store = store_on("2025-06-01");
    let month = calendar::build_month(store.jobs(), 2025, 6, store.clock().today(), 2, 5).unwrap();

    assert!(month.days[0].is_today);
    assert_eq!(month.days[4].total_jobs(), 1);
    assert_eq!(month.days[4].preview[0].id, "j1");
    let upcoming: Vec<&str> = month.upcoming.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(upcoming, vec!["j1"]);

    let may = calendar::build_month(store.jobs(), 2025, 5, store.clock().today(), 2, 5).unwrap();
    assert_eq!(may.days[27].preview[0].id, "j2");
}

#[test]
fn test_feed_reflects_dismissals() {
    let mut store = store_on("2025-06-01");
    store.set_job_status("j1", JobStatus::InProgress).unwrap();
    store.set_job_status("j2", JobStatus::Completed).unwrap();

    let id = store.notifications()[0].id.clone();
    store.dismiss_notification(&id).unwrap();

    let recent = feed::notification_feed(store.notifications(), 10);
    assert_eq!(recent.active_count, 1);
    assert_eq!(recent.recent[0].message, "Job status updated to \"In Progress\"");
    assert!(!recent.has_more());
}
