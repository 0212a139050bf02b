use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{parse_label, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipStatus {
    Active,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
    Inactive,
}

impl ShipStatus {
    pub const ALL: [ShipStatus; 3] = [
        ShipStatus::Active,
        ShipStatus::UnderMaintenance,
        ShipStatus::Inactive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShipStatus::Active => "Active",
            ShipStatus::UnderMaintenance => "Under Maintenance",
            ShipStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for ShipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &ShipStatus::ALL, ShipStatus::label)
            .ok_or_else(|| format!("unknown ship status '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: String,
    pub name: String,
    pub imo: String,
    pub flag: String,
    pub status: ShipStatus,
}

/// Input for adding a ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShip {
    pub name: String,
    pub imo: String,
    pub flag: String,
    pub status: ShipStatus,
}

impl NewShip {
    pub fn validate(&self) -> FieldErrors {
        validate_fields(&self.name, &self.imo, &self.flag)
    }

    pub(crate) fn into_ship(self, id: String) -> Ship {
        Ship {
            id,
            name: self.name.trim().to_string(),
            imo: self.imo.trim().to_string(),
            flag: self.flag.trim().to_string(),
            status: self.status,
        }
    }
}

/// Partial update; `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipPatch {
    pub name: Option<String>,
    pub imo: Option<String>,
    pub flag: Option<String>,
    pub status: Option<ShipStatus>,
}

impl ShipPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.imo.is_none() && self.flag.is_none() && self.status.is_none()
    }

    /// Returns the merged ship, or the field errors of the merged result.
    pub(crate) fn apply(&self, ship: &Ship) -> Result<Ship, FieldErrors> {
        let mut merged = ship.clone();
        if let Some(name) = &self.name {
            merged.name = name.trim().to_string();
        }
        if let Some(imo) = &self.imo {
            merged.imo = imo.trim().to_string();
        }
        if let Some(flag) = &self.flag {
            merged.flag = flag.trim().to_string();
        }
        if let Some(status) = self.status {
            merged.status = status;
        }

        let errors = validate_fields(&merged.name, &merged.imo, &merged.flag);
        if errors.is_empty() {
            Ok(merged)
        } else {
            Err(errors)
        }
    }
}

pub fn is_valid_imo(imo: &str) -> bool {
    imo.len() == 7 && imo.bytes().all(|b| b.is_ascii_digit())
}

fn validate_fields(name: &str, imo: &str, flag: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.require("name", name, "Ship name is required");
    let imo = imo.trim();
    if imo.is_empty() {
        errors.add("imo", "IMO number is required");
    } else if !is_valid_imo(imo) {
        errors.add("imo", "IMO number must be 7 digits");
    }
    errors.require("flag", flag, "Flag is required");
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewShip {
        NewShip {
            name: "Ever Given".to_string(),
            imo: "9811000".to_string(),
            flag: "Panama".to_string(),
            status: ShipStatus::Active,
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        assert!(draft().validate().is_empty());
    }

    #[test]
    fn test_imo_must_be_seven_digits() {
        let mut ship = draft();
        ship.imo = "98110".to_string();
        let errors = ship.validate();
        assert_eq!(errors.get("imo"), Some("IMO number must be 7 digits"));

        ship.imo = "98110AB".to_string();
        assert_eq!(ship.validate().get("imo"), Some("IMO number must be 7 digits"));

        ship.imo = "   ".to_string();
        assert_eq!(ship.validate().get("imo"), Some("IMO number is required"));
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let ship = NewShip {
            name: String::new(),
            imo: String::new(),
            flag: " ".to_string(),
            status: ShipStatus::Inactive,
        };
        let errors = ship.validate();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("Ship name is required"));
        assert_eq!(errors.get("flag"), Some("Flag is required"));
    }

    #[test]
    fn test_patch_validates_merged_result() {
        let ship = draft().into_ship("s1".to_string());
        let patch = ShipPatch {
            imo: Some("123".to_string()),
            ..Default::default()
        };
        assert!(patch.apply(&ship).is_err());

        let patch = ShipPatch {
            status: Some(ShipStatus::UnderMaintenance),
            ..Default::default()
        };
        let merged = patch.apply(&ship).unwrap();
        assert_eq!(merged.status, ShipStatus::UnderMaintenance);
        assert_eq!(merged.name, "Ever Given");
    }

    #[test]
    fn test_status_parses_labels() {
        assert_eq!("under maintenance".parse(), Ok(ShipStatus::UnderMaintenance));
        assert_eq!("UnderMaintenance".parse(), Ok(ShipStatus::UnderMaintenance));
        assert_eq!("ACTIVE".parse(), Ok(ShipStatus::Active));
        assert!("sunk".parse::<ShipStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&ShipStatus::UnderMaintenance).unwrap();
        assert_eq!(json, "\"Under Maintenance\"");
    }
}
