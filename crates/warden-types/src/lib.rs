//! Warden Types - Shared domain types
//!
//! This crate contains domain types used across Warden crates:
//! - Account identity
//! - Roles recognised by the trust-header contract
//! - Token pairs handed back to callers

pub mod account;
pub mod role;
pub mod token;

pub use account::*;
pub use role::*;
pub use token::*;
