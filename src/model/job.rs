use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{parse_label, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Inspection,
    Repair,
    Replacement,
    Preventive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobPriority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::Inspection,
        JobType::Repair,
        JobType::Replacement,
        JobType::Preventive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobType::Inspection => "Inspection",
            JobType::Repair => "Repair",
            JobType::Replacement => "Replacement",
            JobType::Preventive => "Preventive",
        }
    }
}

impl JobPriority {
    pub const ALL: [JobPriority; 4] = [
        JobPriority::Low,
        JobPriority::Medium,
        JobPriority::High,
        JobPriority::Critical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobPriority::Low => "Low",
            JobPriority::Medium => "Medium",
            JobPriority::High => "High",
            JobPriority::Critical => "Critical",
        }
    }
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Open,
        JobStatus::InProgress,
        JobStatus::Completed,
        JobStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Open => "Open",
            JobStatus::InProgress => "In Progress",
            JobStatus::Completed => "Completed",
            JobStatus::Cancelled => "Cancelled",
        }
    }

    /// Open or in progress.
    pub fn is_active(self) -> bool {
        matches!(self, JobStatus::Open | JobStatus::InProgress)
    }
}

macro_rules! label_traits {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_label(s, &$ty::ALL, $ty::label)
                    .ok_or_else(|| format!("unknown {} '{}'", $what, s))
            }
        }
    };
}

label_traits!(JobType, "job type");
label_traits!(JobPriority, "job priority");
label_traits!(JobStatus, "job status");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub component_id: String,
    pub ship_id: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub priority: JobPriority,
    pub status: JobStatus,
    pub assigned_engineer_id: String,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub created_date: NaiveDate,
}

/// Engineer id new jobs fall back to when none is given.
pub const DEFAULT_ENGINEER_ID: &str = "3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub ship_id: String,
    pub component_id: String,
    pub job_type: JobType,
    pub priority: JobPriority,
    pub status: JobStatus,
    pub assigned_engineer_id: String,
    pub scheduled_date: Option<NaiveDate>,
    pub description: String,
}

impl NewJob {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("shipId", &self.ship_id, "Ship is required");
        errors.require("componentId", &self.component_id, "Component is required");
        if self.scheduled_date.is_none() {
            errors.add("scheduledDate", "Scheduled date is required");
        }
        errors.require("description", &self.description, "Description is required");
        errors
    }

    pub(crate) fn build(self, id: String, created_date: NaiveDate) -> Result<Job, FieldErrors> {
        let errors = self.validate();
        match self.scheduled_date {
            Some(scheduled_date) if errors.is_empty() => {
                let engineer = self.assigned_engineer_id.trim();
                Ok(Job {
                    id,
                    component_id: self.component_id.trim().to_string(),
                    ship_id: self.ship_id.trim().to_string(),
                    job_type: self.job_type,
                    priority: self.priority,
                    status: self.status,
                    assigned_engineer_id: if engineer.is_empty() {
                        DEFAULT_ENGINEER_ID.to_string()
                    } else {
                        engineer.to_string()
                    },
                    scheduled_date,
                    description: self.description.trim().to_string(),
                    created_date,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Partial update. `created_date` cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    pub ship_id: Option<String>,
    pub component_id: Option<String>,
    pub job_type: Option<JobType>,
    pub priority: Option<JobPriority>,
    pub status: Option<JobStatus>,
    pub assigned_engineer_id: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl JobPatch {
    pub fn status(status: JobStatus) -> Self {
        JobPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    /// True when the patch changes nothing but the status.
    pub fn is_status_only(&self) -> bool {
        self.status.is_some()
            && self.ship_id.is_none()
            && self.component_id.is_none()
            && self.job_type.is_none()
            && self.priority.is_none()
            && self.assigned_engineer_id.is_none()
            && self.scheduled_date.is_none()
            && self.description.is_none()
    }

    pub(crate) fn apply(&self, job: &Job) -> Result<Job, FieldErrors> {
        let mut merged = job.clone();
        if let Some(ship_id) = &self.ship_id {
            merged.ship_id = ship_id.trim().to_string();
        }
        if let Some(component_id) = &self.component_id {
            merged.component_id = component_id.trim().to_string();
        }
        if let Some(job_type) = self.job_type {
            merged.job_type = job_type;
        }
        if let Some(priority) = self.priority {
            merged.priority = priority;
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        if let Some(engineer) = &self.assigned_engineer_id {
            merged.assigned_engineer_id = engineer.trim().to_string();
        }
        if let Some(date) = self.scheduled_date {
            merged.scheduled_date = date;
        }
        if let Some(description) = &self.description {
            merged.description = description.trim().to_string();
        }

        let mut errors = FieldErrors::new();
        errors.require("shipId", &merged.ship_id, "Ship is required");
        errors.require("componentId", &merged.component_id, "Component is required");
        if self.description.is_some() {
            errors.require("description", &merged.description, "Description is required");
        }
        if errors.is_empty() {
            Ok(merged)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft() -> NewJob {
        NewJob {
            ship_id: "s1".to_string(),
            component_id: "c1".to_string(),
            job_type: JobType::Inspection,
            priority: JobPriority::High,
            status: JobStatus::Open,
            assigned_engineer_id: String::new(),
            scheduled_date: Some(date("2025-06-05")),
            description: "Regular inspection of main engine".to_string(),
        }
    }

    #[test]
    fn test_build_stamps_created_date_and_default_engineer() {
        let job = draft().build("j1".to_string(), date("2025-05-20")).unwrap();
        assert_eq!(job.created_date, date("2025-05-20"));
        assert_eq!(job.assigned_engineer_id, DEFAULT_ENGINEER_ID);
    }

    #[test]
    fn test_validation_reports_each_missing_field() {
        let job = NewJob {
            ship_id: String::new(),
            component_id: String::new(),
            scheduled_date: None,
            description: "   ".to_string(),
            ..draft()
        };
        let errors = job.validate();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("scheduledDate"), Some("Scheduled date is required"));
    }

    #[test]
    fn test_patch_never_touches_created_date() {
        let job = draft().build("j1".to_string(), date("2025-05-20")).unwrap();
        let patch = JobPatch {
            scheduled_date: Some(date("2025-07-01")),
            status: Some(JobStatus::InProgress),
            ..Default::default()
        };
        let merged = patch.apply(&job).unwrap();
        assert_eq!(merged.created_date, job.created_date);
        assert_eq!(merged.scheduled_date, date("2025-07-01"));
    }

    #[test]
    fn test_status_only_patch() {
        assert!(JobPatch::status(JobStatus::Completed).is_status_only());
        let patch = JobPatch {
            status: Some(JobStatus::Completed),
            priority: Some(JobPriority::Low),
            ..Default::default()
        };
        assert!(!patch.is_status_only());
        assert!(!JobPatch::default().is_status_only());
    }

    #[test]
    fn test_wire_shape_uses_type_and_labels() {
        let job = draft().build("j1".to_string(), date("2025-05-20")).unwrap();
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["type"], "Inspection");
        assert_eq!(value["createdDate"], "2025-05-20");

        let mut in_progress = job;
        in_progress.status = JobStatus::InProgress;
        let value = serde_json::to_value(&in_progress).unwrap();
        assert_eq!(value["status"], "In Progress");
    }

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("in progress".parse(), Ok(JobStatus::InProgress));
        assert_eq!("critical".parse(), Ok(JobPriority::Critical));
        assert_eq!("Preventive".parse(), Ok(JobType::Preventive));
        assert!("urgent".parse::<JobPriority>().is_err());
    }
}
