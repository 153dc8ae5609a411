//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod key_store;

pub use key_store::KeyStore;

#[cfg(test)]
pub use key_store::MockKeyStore;
