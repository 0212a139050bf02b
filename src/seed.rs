//! Fleet data used when the store has nothing persisted yet.

use chrono::NaiveDate;

use crate::model::{Component, Job, JobPriority, JobStatus, JobType, Ship, ShipStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn ship(id: &str, name: &str, imo: &str, flag: &str, status: ShipStatus) -> Ship {
    Ship {
        id: id.to_string(),
        name: name.to_string(),
        imo: imo.to_string(),
        flag: flag.to_string(),
        status,
    }
}

fn component(
    id: &str,
    ship_id: &str,
    name: &str,
    serial: &str,
    installed: NaiveDate,
    last_maintained: NaiveDate,
) -> Component {
    Component {
        id: id.to_string(),
        ship_id: ship_id.to_string(),
        name: name.to_string(),
        serial_number: serial.to_string(),
        install_date: installed,
        last_maintenance_date: last_maintained,
    }
}

pub fn ships() -> Vec<Ship> {
    vec![
        ship("s1", "Ever Given", "9811000", "Panama", ShipStatus::Active),
        ship("s2", "Maersk Alabama", "9164263", "USA", ShipStatus::UnderMaintenance),
        ship("s3", "MSC Oscar", "9684750", "Panama", ShipStatus::Active),
    ]
}

pub fn components() -> Vec<Component> {
    vec![
        component("c1", "s1", "Main Engine", "ME-1234", date(2020, 1, 10), date(2024, 3, 12)),
        component("c2", "s2", "Radar", "RAD-5678", date(2021, 7, 18), date(2023, 12, 1)),
        component("c3", "s1", "Navigation System", "NAV-9012", date(2020, 1, 10), date(2024, 1, 15)),
        component("c4", "s3", "Propeller", "PROP-3456", date(2019, 6, 20), date(2023, 11, 10)),
    ]
}

pub fn jobs() -> Vec<Job> {
    vec![
        Job {
            id: "j1".to_string(),
            component_id: "c1".to_string(),
            ship_id: "s1".to_string(),
            job_type: JobType::Inspection,
            priority: JobPriority::High,
            status: JobStatus::Open,
            assigned_engineer_id: "3".to_string(),
            scheduled_date: date(2025, 6, 5),
            description: "Regular inspection of main engine".to_string(),
            created_date: date(2025, 5, 20),
        },
        Job {
            id: "j2".to_string(),
            component_id: "c2".to_string(),
            ship_id: "s2".to_string(),
            job_type: JobType::Repair,
            priority: JobPriority::Critical,
            status: JobStatus::InProgress,
            assigned_engineer_id: "3".to_string(),
            scheduled_date: date(2025, 5, 28),
            description: "Radar malfunction repair".to_string(),
            created_date: date(2025, 5, 15),
        },
    ]
}
