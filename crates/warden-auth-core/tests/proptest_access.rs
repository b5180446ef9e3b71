//! Property-based tests for trust-header handling
//!
//! These tests verify:
//! - Admin headers never carry an identity
//! - Non-admin headers always carry role and identity, and parse back
//! - Unknown roles and missing role markers are always rejected

mod common;

use proptest::prelude::*;
use std::collections::HashMap;
use warden_auth_core::{Access, Actor, AuthError, ROLE_HEADER, USER_ID_HEADER};
use warden_types::Role;

// ============================================================================
// Strategies
// ============================================================================

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Anonymous),
        Just(Role::Admin),
        Just(Role::User),
        Just(Role::Moderator),
    ]
}

fn arb_account_id() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9-]{1,36}"
}

/// Role strings outside the vocabulary, including near misses
fn arb_unknown_role() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,12}".prop_filter("known role", |s| s.parse::<Role>().is_err()),
        Just("admins".to_string()),
        Just("administrator".to_string()),
        Just("user ".to_string()),
        Just(" admin".to_string()),
        Just("".to_string()),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: Admin access never exposes an identity downstream
    #[test]
    fn prop_admin_headers_identity_erased(id in proptest::option::of(arb_account_id())) {
        let actor = Actor { account_id: id.map(Into::into), role: Role::Admin };
        let headers = Access::new(actor).to_trust_headers();
        prop_assert_eq!(headers.get(ROLE_HEADER).map(String::as_str), Some("admin"));
        prop_assert!(!headers.contains_key(USER_ID_HEADER));
    }

    /// Property: Non-admin access carries role and identity and parses back
    #[test]
    fn prop_non_admin_headers_roundtrip(role in arb_role(), id in arb_account_id()) {
        prop_assume!(role != Role::Admin);
        let access = Access::new(Actor::account(id.as_str(), role));
        let headers = access.to_trust_headers();

        prop_assert_eq!(headers.get(ROLE_HEADER), Some(&role.to_string()));
        prop_assert_eq!(headers.get(USER_ID_HEADER), Some(&id));
        prop_assert_eq!(Access::parse(&headers).unwrap(), access);
    }

    /// Property: Unknown roles are rejected even with an identity
    #[test]
    fn prop_unknown_role_rejected(role in arb_unknown_role(), id in arb_account_id()) {
        let headers: HashMap<String, String> = [
            (ROLE_HEADER.to_string(), role),
            (USER_ID_HEADER.to_string(), id),
        ]
        .into_iter()
        .collect();
        prop_assert_eq!(Access::parse(&headers), Err(AuthError::Unauthorized));
    }

    /// Property: Without a role marker nothing parses
    #[test]
    fn prop_missing_role_rejected(
        extra in prop::collection::hash_map("x-[a-z-]{1,12}", "[a-z0-9]{0,8}", 0..4)
    ) {
        let mut headers = extra;
        headers.remove(ROLE_HEADER);
        prop_assert_eq!(Access::parse(&headers), Err(AuthError::Unauthorized));
    }

    /// Property: Role comparisons ignore case
    #[test]
    fn prop_role_parse_case_insensitive(role in arb_role(), upper in any::<bool>()) {
        let name = if upper { role.as_str().to_uppercase() } else { role.as_str().to_string() };
        let actor = Actor { account_id: None, role };
        prop_assert!(actor.has_role(&[name.as_str()]));
        prop_assert_eq!(name.parse::<Role>().unwrap(), role);
    }
}
