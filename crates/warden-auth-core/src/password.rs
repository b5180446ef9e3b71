//! Password hashing
//!
//! bcrypt with a configurable work factor. Verification runs in constant
//! time with respect to the stored hash.

use std::ops::RangeInclusive;

use crate::AuthError;

/// Work factors accepted by bcrypt
pub const COST_RANGE: RangeInclusive<u32> = 4..=31;

/// One-way password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !COST_RANGE.contains(&cost) {
            return Err(AuthError::Configuration(format!(
                "bcrypt cost {cost} outside {}..={}",
                COST_RANGE.start(),
                COST_RANGE.end()
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password.
    ///
    /// Output differs on every call (random salt) but always uses the
    /// modular-crypt `$2b$` format. Only the first 72 bytes of the password
    /// contribute to the hash.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AuthError::Encoding("failed to hash password".to_string())
        })
    }

    /// Compare a password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only a structurally invalid hash is an error.
    pub fn compare(&self, hash: &str, password: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, hash).map_err(|e| {
            tracing::debug!("Stored password hash is invalid: {}", e);
            AuthError::Encoding("invalid password hash".to_string())
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: crate::DEFAULT_HASH_COST,
        }
    }
}
