//! Key store implementations.
//!
//! - [`MemoryKeyStore`] - Concurrent in-process map, used without a database
//! - [`PgKeyStore`] - PostgreSQL table with a unique constraint on the short key

pub mod memory_key_store;
pub mod pg_key_store;

pub use memory_key_store::MemoryKeyStore;
pub use pg_key_store::PgKeyStore;
