//! Caller identity and trust headers.
//!
//! An [`Access`] is built once per inbound call, either from verified token
//! claims or from the trust headers of an already-authenticated internal
//! call, and is attached to every downstream request made on its behalf.

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use warden_types::{AccountId, Role};

use crate::{AuthError, Claims};

/// Role marker header
pub const ROLE_HEADER: &str = "x-hasura-role";
/// Identity marker header
pub const USER_ID_HEADER: &str = "x-hasura-user-id";
/// Email header (read by [`Access::parse`], never produced)
pub const USER_EMAIL_HEADER: &str = "x-hasura-user-email";
/// Request-time marker header
pub const CURRENT_TIME_HEADER: &str = "x-hasura-current-time";

/// Trust headers keyed by lowercase header name
pub type TrustHeaders = HashMap<String, String>;

/// Who is making a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub account_id: Option<AccountId>,
    pub role: Role,
}

impl Actor {
    /// Elevated actor with no identity
    pub fn admin() -> Self {
        Self {
            account_id: None,
            role: Role::Admin,
        }
    }

    /// Unauthenticated actor
    pub fn anonymous() -> Self {
        Self {
            account_id: None,
            role: Role::Anonymous,
        }
    }

    /// Actor acting as a specific account
    pub fn account(account_id: impl Into<AccountId>, role: Role) -> Self {
        Self {
            account_id: Some(account_id.into()),
            role,
        }
    }

    /// Case-insensitive check against any of the given role names
    pub fn has_role(&self, roles: &[&str]) -> bool {
        roles
            .iter()
            .any(|r| r.eq_ignore_ascii_case(self.role.as_str()))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&[Role::Admin.as_str()])
    }

    pub fn is_anonymous(&self) -> bool {
        self.has_role(&[Role::Anonymous.as_str()])
    }
}

/// What a given actor can access for the lifetime of one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Access {
    actor: Actor,
    email: Option<String>,
    request_time: Option<DateTime<Utc>>,
}

impl Access {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            email: None,
            request_time: None,
        }
    }

    /// Identity-erased elevated access
    pub fn admin() -> Self {
        Self::new(Actor::admin())
    }

    /// Access for the subject of verified claims
    pub fn from_claims(claims: &Claims, role: Role) -> Self {
        Self::new(Actor::account(claims.subject.clone(), role))
    }

    /// Attach the request-time marker
    #[must_use]
    pub fn with_request_time(mut self, at: DateTime<Utc>) -> Self {
        self.request_time = Some(at);
        self
    }

    /// Attach the caller's email as supplied by the trusted upstream
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn role(&self) -> Role {
        self.actor.role
    }

    pub fn account_id(&self) -> Option<&AccountId> {
        self.actor.account_id.as_ref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn request_time(&self) -> Option<DateTime<Utc>> {
        self.request_time
    }

    pub fn is_admin(&self) -> bool {
        self.actor.is_admin()
    }

    pub fn is_anonymous(&self) -> bool {
        self.actor.is_anonymous()
    }

    /// Headers to attach to downstream calls.
    ///
    /// Admin access carries the role only: downstream systems must never see
    /// an account identity on an admin-trusted call.
    pub fn to_trust_headers(&self) -> TrustHeaders {
        let mut headers = TrustHeaders::new();
        if self.actor.is_admin() {
            headers.insert(ROLE_HEADER.to_string(), Role::Admin.to_string());
        } else {
            headers.insert(ROLE_HEADER.to_string(), self.actor.role.to_string());
            if let Some(id) = &self.actor.account_id {
                headers.insert(USER_ID_HEADER.to_string(), id.to_string());
            }
        }
        if let Some(at) = self.request_time {
            headers.insert(
                CURRENT_TIME_HEADER.to_string(),
                at.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
        headers
    }

    /// Rebuild access from inbound trust headers.
    ///
    /// # Errors
    /// [`AuthError::Unauthorized`] when the role is missing or unknown, or
    /// when the identity is missing for a role that requires one.
    pub fn parse(headers: &TrustHeaders) -> Result<Self, AuthError> {
        let role = header(headers, ROLE_HEADER).ok_or_else(|| {
            tracing::debug!("Trust headers missing role");
            AuthError::Unauthorized
        })?;

        let role: Role = role.parse().map_err(|e| {
            tracing::debug!("Trust headers carry {}", e);
            AuthError::Unauthorized
        })?;

        let account_id = header(headers, USER_ID_HEADER)
            .filter(|id| !id.is_empty())
            .map(AccountId::from);

        if account_id.is_none() && !role.identity_optional() {
            tracing::debug!(%role, "Trust headers missing identity");
            return Err(AuthError::Unauthorized);
        }

        let email = header(headers, USER_EMAIL_HEADER)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        let request_time = header(headers, CURRENT_TIME_HEADER)
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc));

        Ok(Self {
            actor: Actor { account_id, role },
            email,
            request_time,
        })
    }
}

/// Header lookup tolerant of non-lowercase keys
fn header<'a>(headers: &'a TrustHeaders, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
        .map(String::as_str)
}
