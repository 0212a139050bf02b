use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub ship_id: String,
    pub name: String,
    pub serial_number: String,
    pub install_date: NaiveDate,
    pub last_maintenance_date: NaiveDate,
}

/// Input for installing a component on a ship. Dates are optional here so
/// that a missing date is a field error rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComponent {
    pub ship_id: String,
    pub name: String,
    pub serial_number: String,
    pub install_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
}

impl NewComponent {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("shipId", &self.ship_id, "Ship is required");
        errors.require("name", &self.name, "Component name is required");
        errors.require("serialNumber", &self.serial_number, "Serial number is required");
        if self.install_date.is_none() {
            errors.add("installDate", "Installation date is required");
        }
        if self.last_maintenance_date.is_none() {
            errors.add("lastMaintenanceDate", "Last maintenance date is required");
        }
        errors
    }

    pub(crate) fn build(self, id: String) -> Result<Component, FieldErrors> {
        let errors = self.validate();
        match (self.install_date, self.last_maintenance_date) {
            (Some(install_date), Some(last_maintenance_date)) if errors.is_empty() => {
                Ok(Component {
                    id,
                    ship_id: self.ship_id.trim().to_string(),
                    name: self.name.trim().to_string(),
                    serial_number: self.serial_number.trim().to_string(),
                    install_date,
                    last_maintenance_date,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Partial update. The owning ship is fixed once a component is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentPatch {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub install_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
}

impl ComponentPatch {
    pub(crate) fn apply(&self, component: &Component) -> Result<Component, FieldErrors> {
        let mut merged = component.clone();
        if let Some(name) = &self.name {
            merged.name = name.trim().to_string();
        }
        if let Some(serial) = &self.serial_number {
            merged.serial_number = serial.trim().to_string();
        }
        if let Some(date) = self.install_date {
            merged.install_date = date;
        }
        if let Some(date) = self.last_maintenance_date {
            merged.last_maintenance_date = date;
        }

        let mut errors = FieldErrors::new();
        errors.require("name", &merged.name, "Component name is required");
        errors.require("serialNumber", &merged.serial_number, "Serial number is required");
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

    #[test]
    fn test_missing_dates_are_field_errors() {
        let draft = NewComponent {
            ship_id: "s1".to_string(),
            name: "Radar".to_string(),
            serial_number: "RAD-1".to_string(),
            install_date: None,
            last_maintenance_date: Some(date("2024-01-01")),
        };
        let errors = draft.clone().build("c9".to_string()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("installDate"), Some("Installation date is required"));
    }

    #[test]
    fn test_build_trims_text_fields() {
        let draft = NewComponent {
            ship_id: "s1".to_string(),
            name: "  Main Engine ".to_string(),
            serial_number: "ME-1234".to_string(),
            install_date: Some(date("2020-01-10")),
            last_maintenance_date: Some(date("2024-03-12")),
        };
        let component = draft.build("c1".to_string()).unwrap();
        assert_eq!(component.name, "Main Engine");
        assert_eq!(component.id, "c1");
    }

    #[test]
    fn test_serializes_camel_case_dates() {
        let component = Component {
            id: "c1".to_string(),
            ship_id: "s1".to_string(),
            name: "Main Engine".to_string(),
            serial_number: "ME-1234".to_string(),
            install_date: date("2020-01-10"),
            last_maintenance_date: date("2024-03-12"),
        };
        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(value["shipId"], "s1");
        assert_eq!(value["lastMaintenanceDate"], "2024-03-12");
    }

    #[test]
    fn test_patch_rejects_blank_name() {
        let component = Component {
            id: "c1".to_string(),
            ship_id: "s1".to_string(),
            name: "Radar".to_string(),
            serial_number: "RAD-5678".to_string(),
            install_date: date("2021-07-18"),
            last_maintenance_date: date("2023-12-01"),
        };
        let patch = ComponentPatch {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            patch.apply(&component).unwrap_err().get("name"),
            Some("Component name is required")
        );
    }
}
