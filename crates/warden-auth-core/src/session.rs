//! Session authority
//!
//! Issues, verifies, refreshes and revokes token pairs. A token is live while
//! it is unexpired *and* the account's stored invalidation marker still equals
//! the one embedded at issuance. The marker is re-read on every verification;
//! rotating it revokes every token issued before the rotation.

use chrono::Utc;
use std::sync::Arc;
use warden_store::{AccountState, AccountStore, StoreError};
use warden_types::{AccountId, TokenPair};

use crate::{
    constant_time_str_eq, Access, AuthConfig, AuthError, Audience, Claims, PasswordHasher,
    SigningKey, TokenCodec,
};

/// Session authority over an account store
pub struct SessionAuthority<S: AccountStore> {
    config: Arc<AuthConfig>,
    codec: TokenCodec,
    hasher: PasswordHasher,
    store: Arc<S>,
}

impl<S: AccountStore> Clone for SessionAuthority<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            codec: self.codec.clone(),
            hasher: self.hasher,
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: AccountStore> SessionAuthority<S> {
    /// Create a new session authority
    ///
    /// # Errors
    /// [`AuthError::Configuration`] if the configuration does not validate.
    pub fn new(config: AuthConfig, store: Arc<S>) -> Result<Self, AuthError> {
        config
            .validate()
            .map_err(|e| AuthError::Configuration(e.to_string()))?;

        let key = SigningKey::new(config.signing_key.as_bytes())
            .map_err(|e| AuthError::Configuration(e.to_string()))?;
        let codec = TokenCodec::new(&key, config.algorithm)?;
        let hasher = PasswordHasher::new(config.hash_cost)?;

        Ok(Self {
            config: Arc::new(config),
            codec,
            hasher,
            store,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // =========================================================================
    // Issuance
    // =========================================================================

    /// Issue an access token, plus a paired refresh token when enabled.
    ///
    /// Issuance never mutates the account.
    pub async fn issue_token_pair(&self, account_id: &AccountId) -> Result<TokenPair, AuthError> {
        let state = self
            .store
            .get_marker_and_role(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let now = Utc::now().timestamp();
        let access = Claims::access(
            self.config.issuer.clone(),
            account_id.clone(),
            state.marker,
            now,
            secs(self.config.ttl),
        );
        let access_token = self.codec.sign(&access)?;

        let mut pair = TokenPair::new(access_token, self.config.ttl.as_secs());

        if self.config.refresh_enabled() {
            let refresh = access.paired_refresh(secs(self.config.refresh_ttl));
            pair = pair.with_refresh_token(self.codec.sign(&refresh)?);
        }

        tracing::info!(
            account_id = %account_id,
            token_id = %access.token_id,
            refresh = pair.refresh_token.is_some(),
            "Token pair issued"
        );
        Ok(pair)
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Verify a token and return its claims.
    ///
    /// Time expiry and a stale invalidation marker both surface as
    /// [`AuthError::TokenExpired`].
    pub async fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_live(token).await.map(|(claims, _)| claims)
    }

    /// Verify an access token and derive the caller's [`Access`]
    pub async fn authenticate(&self, token: &str) -> Result<Access, AuthError> {
        let (claims, state) = self.verify_live(token).await?;
        if claims.audience != Audience::Access {
            tracing::debug!(token_id = %claims.token_id, "Refresh token used as access token");
            return Err(AuthError::AudienceMismatch);
        }
        Ok(Access::from_claims(&claims, state.role).with_request_time(Utc::now()))
    }

    async fn verify_live(&self, token: &str) -> Result<(Claims, AccountState), AuthError> {
        let claims = self.decode(token)?;

        if claims.is_expired_at(Utc::now().timestamp()) {
            tracing::debug!(token_id = %claims.token_id, "Token past expiry");
            return Err(AuthError::TokenExpired);
        }

        let state = self.store.get_marker_and_role(&claims.subject).await?;
        match state {
            Some(state)
                if constant_time_str_eq(&state.marker, &claims.invalidation_marker) =>
            {
                Ok((claims, state))
            }
            Some(_) => {
                tracing::debug!(
                    account_id = %claims.subject,
                    token_id = %claims.token_id,
                    "Invalidation marker changed since issuance"
                );
                Err(AuthError::TokenExpired)
            }
            None => {
                tracing::debug!(account_id = %claims.subject, "Token subject no longer exists");
                Err(AuthError::TokenExpired)
            }
        }
    }

    /// Signature and issuer checks only
    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.codec.verify(token)?;

        if let Some(expected) = &self.config.issuer {
            if claims.issuer.as_deref() != Some(expected.as_str()) {
                tracing::debug!(
                    "Issuer mismatch: expected {}, got {:?}",
                    expected,
                    claims.issuer
                );
                return Err(AuthError::IssuerMismatch);
            }
        }

        Ok(claims)
    }

    // =========================================================================
    // Refresh and revocation
    // =========================================================================

    /// Exchange a refresh token and its paired access token for a new pair.
    ///
    /// The access token may already be expired. On success every token issued
    /// for the account before this call stops verifying.
    ///
    /// Rotation is not atomic with respect to other refreshes of the same
    /// account: two concurrent calls with the same pair can both succeed, and
    /// only the pair matching the last write stays live.
    pub async fn refresh_token_pair(
        &self,
        refresh_token: &str,
        access_token: &str,
    ) -> Result<TokenPair, AuthError> {
        let refresh = self.verify_token(refresh_token).await?;

        if refresh.audience != Audience::Refresh {
            tracing::debug!(token_id = %refresh.token_id, "Refresh called with non-refresh token");
            return Err(AuthError::AudienceMismatch);
        }

        // Expiry (time or marker) of the access token is expected here, so
        // only the signature and issuer are checked.
        let access = self.decode(access_token)?;

        if !refresh.is_paired_with(&access) {
            tracing::debug!(
                account_id = %refresh.subject,
                refresh_id = %refresh.token_id,
                access_id = %access.token_id,
                "Refresh token not paired with access token"
            );
            return Err(AuthError::TokenMismatch);
        }

        // A failure after this point leaves the old session revoked
        self.store.rotate_marker(&refresh.subject).await?;
        tracing::info!(account_id = %refresh.subject, "Session refreshed, marker rotated");

        self.issue_token_pair(&refresh.subject).await
    }

    /// Revoke every token issued for an account so far.
    ///
    /// Idempotent. An account the store does not know has no live tokens, so
    /// only [`AuthError::StoreUnavailable`] is ever returned.
    pub async fn revoke_all(&self, account_id: &AccountId) -> Result<(), AuthError> {
        match self.store.rotate_marker(account_id).await {
            Ok(_) => {
                tracing::info!(account_id = %account_id, "All sessions revoked");
                Ok(())
            }
            Err(StoreError::NotFound) => {
                tracing::debug!(account_id = %account_id, "Revoke for unknown account");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    /// Check a password and issue a token pair
    pub async fn login(
        &self,
        account_id: &AccountId,
        password: &str,
    ) -> Result<TokenPair, AuthError> {
        let hash = self
            .store
            .get_password_hash(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        // Accounts created through third-party login have no password
        let Some(hash) = hash.filter(|h| !h.is_empty()) else {
            tracing::debug!(account_id = %account_id, "Password login for account without password");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.compare(&hash, password)? {
            tracing::debug!(account_id = %account_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token_pair(account_id).await
    }

    /// Replace the password and revoke all existing sessions
    pub async fn change_password(
        &self,
        account_id: &AccountId,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let hash = self.hasher.hash(new_password)?;
        self.store
            .set_password_and_rotate_marker(account_id, &hash)
            .await?;
        tracing::info!(account_id = %account_id, "Password changed, sessions revoked");
        Ok(())
    }
}

impl<S: AccountStore> std::fmt::Debug for SessionAuthority<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthority")
            .field("config", &self.config)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

fn secs(d: std::time::Duration) -> i64 {
    i64::try_from(d.as_secs()).unwrap_or(i64::MAX)
}
