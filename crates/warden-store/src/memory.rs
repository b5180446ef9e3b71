//! In-memory account store
//!
//! Backed by a [`DashMap`]; suitable for tests and single-process embedders.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use warden_types::AccountId;

use crate::error::{StoreError, StoreResult};
use crate::models::{AccountRow, AccountState};
use crate::repo::AccountStore;
use crate::generate_marker;

/// In-memory account store
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<DashMap<AccountId, AccountRow>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account
    pub fn insert_account(&self, account: AccountRow) {
        self.accounts.insert(account.id.clone(), account);
    }

    /// Remove an account, returning it if present
    pub fn remove_account(&self, id: &AccountId) -> Option<AccountRow> {
        self.accounts.remove(id).map(|(_, row)| row)
    }

    /// Current marker of an account
    pub fn marker(&self, id: &AccountId) -> Option<String> {
        self.accounts
            .get(id)
            .map(|r| r.value().invalidation_marker.clone())
    }

    /// Full account record
    pub fn account(&self, id: &AccountId) -> Option<AccountRow> {
        self.accounts.get(id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl std::fmt::Debug for InMemoryAccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAccountStore")
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get_marker_and_role(&self, id: &AccountId) -> StoreResult<Option<AccountState>> {
        Ok(self.accounts.get(id).map(|r| r.value().state()))
    }

    async fn get_password_hash(&self, id: &AccountId) -> StoreResult<Option<Option<String>>> {
        Ok(self
            .accounts
            .get(id)
            .map(|r| r.value().password_hash.clone()))
    }

    async fn rotate_marker(&self, id: &AccountId) -> StoreResult<String> {
        let mut account = self.accounts.get_mut(id).ok_or(StoreError::NotFound)?;
        let marker = generate_marker();
        account.invalidation_marker = marker.clone();
        tracing::debug!(account_id = %id, "Invalidation marker rotated");
        Ok(marker)
    }

    async fn set_password_and_rotate_marker(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> StoreResult<String> {
        let mut account = self.accounts.get_mut(id).ok_or(StoreError::NotFound)?;
        let marker = generate_marker();
        account.password_hash = Some(password_hash.to_string());
        account.invalidation_marker = marker.clone();
        tracing::debug!(account_id = %id, "Password replaced and marker rotated");
        Ok(marker)
    }
}
