//! Configuration types for the session authority

use jsonwebtoken::Algorithm;
use std::time::Duration;

/// Default bcrypt work factor
pub const DEFAULT_HASH_COST: u32 = 10;

/// Auth configuration
///
/// Immutable once handed to [`SessionAuthority`](crate::SessionAuthority).
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared secret used to sign and verify tokens
    pub signing_key: String,
    /// Expected `iss` claim; issuer checks are skipped when unset
    pub issuer: Option<String>,
    /// Symmetric signing algorithm
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub ttl: Duration,
    /// Refresh token lifetime; refresh tokens are issued only when this is at
    /// least `ttl`
    pub refresh_ttl: Duration,
    /// bcrypt work factor for password hashing
    pub hash_cost: u32,
}

impl AuthConfig {
    /// Create a new auth config with default lifetimes
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            issuer: None,
            algorithm: Algorithm::HS256,
            ttl: Duration::from_secs(60 * 60), // 1 hour
            refresh_ttl: Duration::ZERO,
            hash_cost: DEFAULT_HASH_COST,
        }
    }

    /// Set the issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the signing algorithm
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set access token lifetime
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set refresh token lifetime
    pub fn with_refresh_ttl(mut self, refresh_ttl: Duration) -> Self {
        self.refresh_ttl = refresh_ttl;
        self
    }

    /// Set bcrypt cost
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Whether refresh tokens are issued alongside access tokens
    pub fn refresh_enabled(&self) -> bool {
        self.refresh_ttl >= self.ttl
    }

    /// Check the configuration for values the authority cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signing_key.is_empty() {
            return Err(ConfigError::Missing("SESSION_KEY"));
        }
        if self.signing_key.len() < crate::SigningKey::MIN_KEY_LENGTH {
            return Err(ConfigError::Invalid(
                "SESSION_KEY must be at least 32 characters",
            ));
        }
        if !is_symmetric(self.algorithm) {
            return Err(ConfigError::Invalid(
                "JWT_ALGORITHM must be one of HS256, HS384, HS512",
            ));
        }
        if self.ttl.as_secs() == 0 {
            return Err(ConfigError::Invalid(
                "SESSION_TTL_SECS must be at least one second",
            ));
        }
        if !crate::password::COST_RANGE.contains(&self.hash_cost) {
            return Err(ConfigError::Invalid("JWT_HASH_COST must be between 4 and 31"));
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_key = lookup("SESSION_KEY").ok_or(ConfigError::Missing("SESSION_KEY"))?;
        let issuer = lookup("JWT_ISSUER")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_ISSUER"))?;

        let algorithm = lookup("JWT_ALGORITHM")
            .unwrap_or_else(|| "HS256".to_string())
            .parse::<Algorithm>()
            .map_err(|_| ConfigError::Invalid("JWT_ALGORITHM"))?;

        let ttl_secs: u64 = lookup("SESSION_TTL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SESSION_TTL_SECS"))?;

        let refresh_ttl_secs: u64 = lookup("SESSION_REFRESH_TTL_SECS")
            .unwrap_or_else(|| "0".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SESSION_REFRESH_TTL_SECS"))?;

        let hash_cost: u32 = lookup("JWT_HASH_COST")
            .unwrap_or_else(|| DEFAULT_HASH_COST.to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("JWT_HASH_COST"))?;

        let config = Self::new(signing_key)
            .with_issuer(issuer)
            .with_algorithm(algorithm)
            .with_ttl(Duration::from_secs(ttl_secs))
            .with_refresh_ttl(Duration::from_secs(refresh_ttl_secs))
            .with_hash_cost(hash_cost);

        config.validate()?;
        Ok(config)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("hash_cost", &self.hash_cost)
            .finish_non_exhaustive()
    }
}

/// Only HMAC algorithms are supported
pub(crate) fn is_symmetric(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
