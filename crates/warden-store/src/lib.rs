//! Warden Store - Account store abstraction
//!
//! The session authority never owns account data. It talks to an
//! [`AccountStore`], which keeps each account's invalidation marker,
//! role and password hash.
//!
//! # Example
//!
//! ```rust,ignore
//! use warden_store::{AccountRow, AccountStore, InMemoryAccountStore};
//!
//! let store = InMemoryAccountStore::new();
//! store.insert_account(AccountRow::new("u1", Role::User));
//!
//! let state = store.get_marker_and_role(&"u1".into()).await?;
//! ```

pub mod error;
pub mod marker;
pub mod memory;
pub mod models;
pub mod repo;

pub use error::{StoreError, StoreResult};
pub use marker::generate_marker;
pub use memory::InMemoryAccountStore;
pub use models::*;
pub use repo::*;
