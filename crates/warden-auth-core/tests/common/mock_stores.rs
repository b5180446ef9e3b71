//! Mock account stores for testing

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use warden_store::{AccountState, AccountStore, InMemoryAccountStore, StoreError, StoreResult};
use warden_types::AccountId;

/// Store whose backend is always down
#[derive(Default, Clone)]
pub struct FailingStore;

#[async_trait]
impl AccountStore for FailingStore {
    async fn get_marker_and_role(&self, _: &AccountId) -> StoreResult<Option<AccountState>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get_password_hash(&self, _: &AccountId) -> StoreResult<Option<Option<String>>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn rotate_marker(&self, _: &AccountId) -> StoreResult<String> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn set_password_and_rotate_marker(&self, _: &AccountId, _: &str) -> StoreResult<String> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// In-memory store that counts calls per operation
#[derive(Default, Clone)]
pub struct CountingStore {
    pub inner: InMemoryAccountStore,
    calls: Arc<DashMap<&'static str, usize>>,
}

impl CountingStore {
    pub fn new(inner: InMemoryAccountStore) -> Self {
        Self {
            inner,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self, op: &'static str) -> usize {
        self.calls.get(op).map(|c| *c.value()).unwrap_or(0)
    }

    fn record(&self, op: &'static str) {
        *self.calls.entry(op).or_insert(0) += 1;
    }
}

#[async_trait]
impl AccountStore for CountingStore {
    async fn get_marker_and_role(&self, id: &AccountId) -> StoreResult<Option<AccountState>> {
        self.record("get_marker_and_role");
        self.inner.get_marker_and_role(id).await
    }

    async fn get_password_hash(&self, id: &AccountId) -> StoreResult<Option<Option<String>>> {
        self.record("get_password_hash");
        self.inner.get_password_hash(id).await
    }

    async fn rotate_marker(&self, id: &AccountId) -> StoreResult<String> {
        self.record("rotate_marker");
        self.inner.rotate_marker(id).await
    }

    async fn set_password_and_rotate_marker(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> StoreResult<String> {
        self.record("set_password_and_rotate_marker");
        self.inner
            .set_password_and_rotate_marker(id, password_hash)
            .await
    }
}

/// Store whose reads start failing right after the first marker rotation
#[derive(Default, Clone)]
pub struct ReadOutageStore {
    pub inner: InMemoryAccountStore,
    reads_down: Arc<AtomicBool>,
    rotations: Arc<AtomicUsize>,
}

impl ReadOutageStore {
    pub fn new(inner: InMemoryAccountStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn restore_reads(&self) {
        self.reads_down.store(false, Ordering::SeqCst);
    }

    pub fn rotations(&self) -> usize {
        self.rotations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStore for ReadOutageStore {
    async fn get_marker_and_role(&self, id: &AccountId) -> StoreResult<Option<AccountState>> {
        if self.reads_down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read replica down".to_string()));
        }
        self.inner.get_marker_and_role(id).await
    }

    async fn get_password_hash(&self, id: &AccountId) -> StoreResult<Option<Option<String>>> {
        self.inner.get_password_hash(id).await
    }

    async fn rotate_marker(&self, id: &AccountId) -> StoreResult<String> {
        let marker = self.inner.rotate_marker(id).await?;
        self.rotations.fetch_add(1, Ordering::SeqCst);
        self.reads_down.store(true, Ordering::SeqCst);
        Ok(marker)
    }

    async fn set_password_and_rotate_marker(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> StoreResult<String> {
        self.inner
            .set_password_and_rotate_marker(id, password_hash)
            .await
    }
}
