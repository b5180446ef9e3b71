//! Role types

use serde::{Deserialize, Serialize};

/// Roles recognised by the trust-header contract.
///
/// The vocabulary is closed: anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Unauthenticated caller
    Anonymous,
    /// Elevated, identity-erased trust
    Admin,
    /// Regular account holder
    #[default]
    User,
    /// Moderator (deployment dependent)
    Moderator,
}

impl Role {
    /// All recognised roles
    pub const ALL: [Role; 4] = [Self::Anonymous, Self::Admin, Self::User, Self::Moderator];

    /// Wire name of the role
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Admin => "admin",
            Self::User => "user",
            Self::Moderator => "moderator",
        }
    }

    /// Whether a caller with this role may omit its account identity.
    pub const fn identity_optional(&self) -> bool {
        match self {
            Self::Anonymous | Self::Admin | Self::Moderator => true,
            Self::User => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anonymous" => Ok(Self::Anonymous),
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Error parsing a role string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);
