//! Which roles may perform which mutations.
//!
//! The fleet store never checks this table. Callers that offer mutations to
//! a user ask here first.

use std::fmt;
use thiserror::Error;

use crate::model::{JobPatch, Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateShip,
    EditShip,
    DeleteShip,
    CreateComponent,
    EditComponent,
    DeleteComponent,
    CreateJob,
    EditJob,
    DeleteJob,
    UpdateJobStatus,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::CreateShip,
        Action::EditShip,
        Action::DeleteShip,
        Action::CreateComponent,
        Action::EditComponent,
        Action::DeleteComponent,
        Action::CreateJob,
        Action::EditJob,
        Action::DeleteJob,
        Action::UpdateJobStatus,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::CreateShip => "create ship",
            Action::EditShip => "edit ship",
            Action::DeleteShip => "delete ship",
            Action::CreateComponent => "create component",
            Action::EditComponent => "edit component",
            Action::DeleteComponent => "delete component",
            Action::CreateJob => "create job",
            Action::EditJob => "edit job",
            Action::DeleteJob => "delete job",
            Action::UpdateJobStatus => "update job status",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Denied {
    #[error("not logged in")]
    NotLoggedIn,

    #[error("role {role} may not {action}")]
    Forbidden { role: Role, action: Action },
}

pub fn permits(role: Role, action: Action) -> bool {
    match role {
        Role::Admin | Role::Inspector => true,
        Role::Engineer => action == Action::UpdateJobStatus,
    }
}

pub fn allowed_actions(role: Role) -> Vec<Action> {
    Action::ALL
        .iter()
        .copied()
        .filter(|a| permits(role, *a))
        .collect()
}

/// Full create/edit/delete rights.
pub fn can_modify(role: Role) -> bool {
    permits(role, Action::EditShip)
}

/// A status-only patch needs the status right; anything else is a full edit.
pub fn action_for_job_patch(patch: &JobPatch) -> Action {
    if patch.is_status_only() {
        Action::UpdateJobStatus
    } else {
        Action::EditJob
    }
}

pub fn authorize(user: Option<&User>, action: Action) -> Result<(), Denied> {
    let user = user.ok_or(Denied::NotLoggedIn)?;
    if permits(user.role, action) {
        Ok(())
    } else {
        Err(Denied::Forbidden {
            role: user.role,
            action,
        })
    }
}
