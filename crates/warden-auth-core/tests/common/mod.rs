//! Common test utilities for warden-auth-core integration tests

pub mod fixtures;
pub mod mock_stores;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_stores::{CountingStore, FailingStore, ReadOutageStore};
