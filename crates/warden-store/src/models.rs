//! Account store models

use warden_types::{AccountId, Role};

use crate::generate_marker;

/// Snapshot of the fields the session authority needs on every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    /// Current invalidation marker
    pub marker: String,
    /// Account role
    pub role: Role,
}

/// Full account record as kept by a store
#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: AccountId,
    /// Absent for accounts that only sign in through a third party
    pub password_hash: Option<String>,
    pub invalidation_marker: String,
    pub role: Role,
}

impl AccountRow {
    /// Create an account row with a fresh marker and no password
    pub fn new(id: impl Into<AccountId>, role: Role) -> Self {
        Self {
            id: id.into(),
            password_hash: None,
            invalidation_marker: generate_marker(),
            role,
        }
    }

    /// Set the stored password hash
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Set the invalidation marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.invalidation_marker = marker.into();
        self
    }

    /// State snapshot used for token checks
    pub fn state(&self) -> AccountState {
        AccountState {
            marker: self.invalidation_marker.clone(),
            role: self.role,
        }
    }
}
