//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! - [`cache`] - Resolution cache backends (in-process, Redis, no-op)
//! - [`persistence`] - Key store backends (in-memory, PostgreSQL)

pub mod cache;
pub mod persistence;
