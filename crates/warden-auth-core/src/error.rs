//! Auth errors

use thiserror::Error;
use warden_store::StoreError;

/// Authentication errors
///
/// Every variant is terminal for the current call; nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Account store has no record for the account
    #[error("account not found")]
    AccountNotFound,

    /// Token signature does not verify against the configured key
    #[error("invalid token signature")]
    SignatureInvalid,

    /// Token structure or claims cannot be parsed
    #[error("malformed token")]
    MalformedToken,

    /// Token issuer differs from the configured issuer
    #[error("token issuer mismatch")]
    IssuerMismatch,

    /// Token is past its expiry or its invalidation marker is stale
    #[error("token expired")]
    TokenExpired,

    /// Token was presented where the other audience is required
    #[error("token audience mismatch")]
    AudienceMismatch,

    /// Refresh token is not paired with the presented access token
    #[error("token mismatch")]
    TokenMismatch,

    /// Trust headers are missing or inconsistent
    #[error("unauthorized")]
    Unauthorized,

    /// Wrong password, or the account has no password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account store failure
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Hashing or signing failure
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SignatureInvalid
            | Self::MalformedToken
            | Self::IssuerMismatch
            | Self::TokenExpired
            | Self::AudienceMismatch
            | Self::TokenMismatch
            | Self::Unauthorized
            | Self::InvalidCredentials => 401,
            Self::AccountNotFound => 404,
            Self::StoreUnavailable(_) => 503,
            Self::Encoding(_) | Self::Configuration(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::SignatureInvalid => "SIGNATURE_INVALID",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::IssuerMismatch => "ISSUER_MISMATCH",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::AudienceMismatch => "AUDIENCE_MISMATCH",
            Self::TokenMismatch => "TOKEN_MISMATCH",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Encoding(_) => "ENCODING_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::AccountNotFound,
            StoreError::Unavailable(msg) => {
                tracing::error!("Account store error: {}", msg);
                Self::StoreUnavailable(msg)
            }
        }
    }
}
