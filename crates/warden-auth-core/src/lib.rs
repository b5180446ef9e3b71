//! Warden Auth Core - Session-token authority
//!
//! Issues, verifies, refreshes and revokes signed access/refresh token pairs.
//! Liveness of every token is tied to a per-account invalidation marker held
//! by an external [`AccountStore`](warden_store::AccountStore).

pub mod access;
pub mod config;
pub mod crypto;
pub mod error;
pub mod password;
pub mod session;
pub mod token;

pub use access::*;
pub use config::*;
pub use crypto::*;
pub use error::*;
pub use password::*;
pub use session::*;
pub use token::*;
