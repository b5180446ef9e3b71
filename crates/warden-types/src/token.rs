//! Token pair types

use serde::{Deserialize, Serialize};

/// Token type reported alongside every issued pair
pub const TOKEN_TYPE: &str = "jwt";

/// Token pair returned after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived)
    pub access_token: String,
    /// Token type (always "jwt")
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    /// Refresh token, present only when refresh issuance is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// Create a pair without a refresh token
    pub fn new(access_token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: TOKEN_TYPE.to_string(),
            expires_in,
            refresh_token: None,
        }
    }

    /// Attach a refresh token
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_omitted_when_absent() {
        let pair = TokenPair::new("a.b.c", 3600);
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["token_type"], "jwt");
        assert_eq!(json["expires_in"], 3600);
        assert!(json.get("refresh_token").is_none());
    }

    #[test]
    fn test_refresh_token_present() {
        let pair = TokenPair::new("a.b.c", 60).with_refresh_token("d.e.f");
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["refresh_token"], "d.e.f");
    }
}
