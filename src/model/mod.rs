pub mod component;
pub mod job;
pub mod notification;
pub mod ship;
pub mod user;

pub use component::{Component, ComponentPatch, NewComponent};
pub use job::{Job, JobPatch, JobPriority, JobStatus, JobType, NewJob};
pub use notification::{Notification, NotificationKind};
pub use ship::{NewShip, Ship, ShipPatch, ShipStatus};
pub use user::{Role, User};

use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation messages, keyed by the serialized field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Parse a display label into one of `variants`, case-insensitively.
pub(crate) fn parse_label<T: Copy>(
    input: &str,
    variants: &[T],
    label: fn(T) -> &'static str,
) -> Option<T> {
    let needle = input.trim();
    variants.iter().copied().find(|v| {
        let name = label(*v);
        name.eq_ignore_ascii_case(needle) || name.replace(' ', "").eq_ignore_ascii_case(needle)
    })
}
