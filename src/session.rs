use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::{Role, User};
use crate::storage::{self, KvStore, CURRENT_USER_KEY};

struct Credential {
    email: &'static str,
    password: &'static str,
    user: User,
}

fn credential(
    email: &'static str,
    password: &'static str,
    id: &str,
    role: Role,
    name: &str,
) -> Credential {
    Credential {
        email,
        password,
        user: User {
            id: id.to_string(),
            role,
            email: email.to_string(),
            name: name.to_string(),
        },
    }
}

lazy_static::lazy_static! {
    static ref CREDENTIALS: Vec<Credential> = vec![
        credential("admin@entnt.in", "admin123", "1", Role::Admin, "Admin User"),
        credential("inspector@entnt.in", "inspect123", "2", Role::Inspector, "John Inspector"),
        credential("engineer@entnt.in", "engine123", "3", Role::Engineer, "Mike Engineer"),
    ];
}

/// Exact match against the credential table.
pub fn authenticate(email: &str, password: &str) -> Option<User> {
    CREDENTIALS
        .iter()
        .find(|c| c.email == email && c.password == password)
        .map(|c| c.user.clone())
}

/// Every user the table knows about.
pub fn known_users() -> Vec<User> {
    CREDENTIALS.iter().map(|c| c.user.clone()).collect()
}

/// The signed-in user, mirrored under `currentUser` in the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn restore<S: KvStore + ?Sized>(store: &S) -> Result<Self> {
        let current: Option<User> = storage::load_json(store, CURRENT_USER_KEY)?;
        if let Some(user) = &current {
            debug!("Restored session for {}", user.email);
        }
        Ok(Session { current })
    }

    /// `Ok(false)` on a bad pair; which half was wrong is not reported.
    pub fn login<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        email: &str,
        password: &str,
    ) -> Result<bool> {
        match authenticate(email, password) {
            Some(user) => {
                store.write(vec![storage::put_json(CURRENT_USER_KEY, &user)?])?;
                info!("{} logged in as {}", user.email, user.role);
                self.current = Some(user);
                Ok(true)
            }
            None => {
                warn!("Rejected login attempt for '{}'", email);
                Ok(false)
            }
        }
    }

    pub fn logout<S: KvStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        store.delete(CURRENT_USER_KEY)?;
        if let Some(user) = self.current.take() {
            info!("{} logged out", user.email);
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_exact_pairs_only() {
        assert_eq!(authenticate("admin@entnt.in", "admin123").unwrap().role, Role::Admin);
        assert_eq!(
            authenticate("inspector@entnt.in", "inspect123").unwrap().name,
            "John Inspector"
        );
        assert_eq!(authenticate("engineer@entnt.in", "engine123").unwrap().id, "3");

        assert!(authenticate("admin@entnt.in", "inspect123").is_none());
        assert!(authenticate("ADMIN@entnt.in", "admin123").is_none());
        assert!(authenticate("admin@entnt.in ", "admin123").is_none());
        assert!(authenticate("", "").is_none());
    }

    #[test]
    fn test_known_users() {
        let roles: Vec<Role> = known_users().iter().map(|u| u.role).collect();
        assert_eq!(roles, vec![Role::Admin, Role::Inspector, Role::Engineer]);
    }
}
