//! Helpers shared across layers.
//!
//! - [`key_generator`] - Short key generation and shape validation
//! - [`url_validator`] - Long URL validation

pub mod key_generator;
pub mod url_validator;
