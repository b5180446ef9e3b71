//! Authority and token fixtures

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use warden_auth_core::{AuthConfig, Claims, SessionAuthority};
use warden_store::{AccountRow, AccountStore, InMemoryAccountStore};
use warden_types::{AccountId, Role};

pub const TEST_KEY: &str = "integration-test-signing-key-0123456789";
pub const TEST_ISSUER: &str = "warden-test";

/// Config with refresh enabled and the cheapest bcrypt cost
pub fn test_config() -> AuthConfig {
    AuthConfig::new(TEST_KEY)
        .with_issuer(TEST_ISSUER)
        .with_ttl(Duration::from_secs(15 * 60))
        .with_refresh_ttl(Duration::from_secs(24 * 60 * 60))
        .with_hash_cost(4)
}

/// In-memory store seeded with one account
pub fn seeded_store(id: &str, marker: &str, role: Role) -> InMemoryAccountStore {
    let store = InMemoryAccountStore::new();
    store.insert_account(AccountRow::new(id, role).with_marker(marker));
    store
}

pub fn authority<S: AccountStore>(store: S) -> SessionAuthority<S> {
    SessionAuthority::new(test_config(), Arc::new(store)).expect("test config is valid")
}

/// Sign an access token that expired an hour ago together with its paired,
/// still-valid refresh token. Returns `(access, refresh)`.
pub fn expired_access_pair<S: AccountStore>(
    auth: &SessionAuthority<S>,
    account_id: &str,
    marker: &str,
) -> (String, String) {
    let issued_at = Utc::now().timestamp() - 2 * 60 * 60;
    let access = Claims::access(
        Some(TEST_ISSUER.to_string()),
        AccountId::from(account_id),
        marker,
        issued_at,
        60 * 60,
    );
    let refresh = access.paired_refresh(24 * 60 * 60);
    (
        auth.codec().sign(&access).expect("sign access"),
        auth.codec().sign(&refresh).expect("sign refresh"),
    )
}
