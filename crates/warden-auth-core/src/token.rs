//! Signed token encoding
//!
//! Tokens are compact JWS strings (`header.claims.signature`) signed with a
//! shared HMAC key. The codec only proves integrity; issuer, expiry and
//! marker checks happen in the session authority.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use warden_types::AccountId;

use crate::config::is_symmetric;
use crate::{AuthError, SigningKey};

pub use jsonwebtoken::Algorithm;

/// Suffix appended to an access token ID to form its refresh token ID
pub const REFRESH_ID_SUFFIX: &str = "-refresh";

/// Intended use of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Access,
    Refresh,
}

/// Signed claim set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, omitted when none is configured
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Account the token was issued for
    #[serde(rename = "sub")]
    pub subject: AccountId,
    #[serde(rename = "aud")]
    pub audience: Audience,
    /// Issued at (unix seconds)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Not valid before (unix seconds)
    #[serde(rename = "nbf")]
    pub not_before: i64,
    /// Expiration (unix seconds)
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Unique per issuance
    #[serde(rename = "jti")]
    pub token_id: String,
    /// Account invalidation marker at issuance time
    #[serde(rename = "mkr")]
    pub invalidation_marker: String,
}

impl Claims {
    /// Build access claims with a fresh token ID
    pub fn access(
        issuer: Option<String>,
        subject: AccountId,
        marker: impl Into<String>,
        now: i64,
        ttl_secs: i64,
    ) -> Self {
        Self {
            issuer,
            subject,
            audience: Audience::Access,
            issued_at: now,
            not_before: now,
            expires_at: now.saturating_add(ttl_secs),
            token_id: uuid::Uuid::new_v4().to_string(),
            invalidation_marker: marker.into(),
        }
    }

    /// Build the refresh claims paired with these access claims
    pub fn paired_refresh(&self, refresh_ttl_secs: i64) -> Self {
        Self {
            audience: Audience::Refresh,
            expires_at: self.issued_at.saturating_add(refresh_ttl_secs),
            token_id: refresh_token_id(&self.token_id),
            ..self.clone()
        }
    }

    /// Whether these refresh claims were issued alongside `access`
    pub fn is_paired_with(&self, access: &Claims) -> bool {
        self.token_id == refresh_token_id(&access.token_id)
            && self.subject == access.subject
            && self.issued_at == access.issued_at
    }

    /// Whether the token is expired at `now` (unix seconds)
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// Derive the refresh token ID for an access token ID
pub fn refresh_token_id(access_token_id: &str) -> String {
    format!("{access_token_id}{REFRESH_ID_SUFFIX}")
}

/// Signs and verifies claim sets
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec for a symmetric algorithm
    pub fn new(key: &SigningKey, algorithm: Algorithm) -> Result<Self, AuthError> {
        if !is_symmetric(algorithm) {
            return Err(AuthError::Configuration(format!(
                "unsupported signing algorithm {algorithm:?}"
            )));
        }

        // Signature and algorithm only; claim checks live in the authority
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            algorithm,
            encoding_key: key.encoding_key(),
            decoding_key: key.decoding_key(),
            validation,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Serialize and sign claims
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::Encoding("failed to sign token".to_string())
        })
    }

    /// Verify the signature, then decode the claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token verification failed: {}", e);
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        AuthError::SignatureInvalid
                    }
                    _ => AuthError::MalformedToken,
                }
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
