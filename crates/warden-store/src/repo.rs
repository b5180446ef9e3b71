//! Repository traits
//!
//! Define the async account store interface consumed by the session authority.

use async_trait::async_trait;
use warden_types::AccountId;

use crate::error::StoreResult;
use crate::models::AccountState;

/// Account store trait
///
/// Timeouts and retries are the implementation's concern; callers treat any
/// [`StoreError::Unavailable`](crate::StoreError::Unavailable) as terminal.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Current invalidation marker and role, `None` if the account is unknown
    async fn get_marker_and_role(&self, id: &AccountId) -> StoreResult<Option<AccountState>>;

    /// Stored password hash.
    ///
    /// Outer `None` means the account is unknown; inner `None` means the
    /// account has no password set.
    async fn get_password_hash(&self, id: &AccountId) -> StoreResult<Option<Option<String>>>;

    /// Replace the marker with a fresh, unpredictable value and return it
    async fn rotate_marker(&self, id: &AccountId) -> StoreResult<String>;

    /// Replace the password hash and rotate the marker in one write
    async fn set_password_and_rotate_marker(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> StoreResult<String>;
}

#[async_trait]
impl<T: AccountStore + ?Sized> AccountStore for std::sync::Arc<T> {
    async fn get_marker_and_role(&self, id: &AccountId) -> StoreResult<Option<AccountState>> {
        (**self).get_marker_and_role(id).await
    }

    async fn get_password_hash(&self, id: &AccountId) -> StoreResult<Option<Option<String>>> {
        (**self).get_password_hash(id).await
    }

    async fn rotate_marker(&self, id: &AccountId) -> StoreResult<String> {
        (**self).rotate_marker(id).await
    }

    async fn set_password_and_rotate_marker(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> StoreResult<String> {
        (**self).set_password_and_rotate_marker(id, password_hash).await
    }
}
