//! Short key generation and validation utilities.
//!
//! Every short key, generated or caller-supplied, has the same shape:
//! [`KEY_LENGTH`] characters, an ASCII letter first, ASCII alphanumerics after.
//! Generated keys are drawn from a cryptographically secure generator because
//! a short key doubles as an access token for its URL.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use crate::error::AppError;

/// Fixed length of every short key.
pub const KEY_LENGTH: usize = 6;

/// Full key alphabet. The first 52 characters are letters.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of letters at the start of [`ALPHABET`], used for position 0.
const LETTER_COUNT: usize = 52;

/// Source of candidate short keys.
///
/// The service asks for a fresh candidate on every attempt; uniqueness is
/// checked against the key store, not guaranteed by the generator.
#[cfg_attr(test, mockall::automock)]
pub trait KeyGenerator: Send + Sync {
    /// Returns a new candidate key satisfying [`is_valid_key`].
    fn generate(&self) -> String;
}

/// Uniform random key generator backed by a ChaCha-based CSPRNG.
pub struct RandomKeyGenerator {
    rng: Mutex<StdRng>,
}

impl RandomKeyGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Creates a generator around an already constructed RNG.
    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Creates a deterministic generator. Intended for tests only.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self) -> String {
        // The draws cannot leave the RNG inconsistent, so a poisoned lock is safe to reuse.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut key = String::with_capacity(KEY_LENGTH);
        key.push(ALPHABET[rng.random_range(0..LETTER_COUNT)] as char);
        for _ in 1..KEY_LENGTH {
            key.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
        }

        key
    }
}

/// Returns true if `key` has the short key shape.
pub fn is_valid_key(key: &str) -> bool {
    let bytes = key.as_bytes();

    bytes.len() == KEY_LENGTH
        && bytes[0].is_ascii_alphabetic()
        && bytes[1..].iter().all(u8::is_ascii_alphanumeric)
}

/// Validates a caller-supplied custom key.
///
/// # Rules
///
/// - Length: exactly 6 characters
/// - First character: ASCII letter
/// - Remaining characters: ASCII letters or digits
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_key(key: &str) -> Result<(), AppError> {
    if key.chars().count() != KEY_LENGTH {
        return Err(AppError::bad_request(
            "Custom key must be exactly 6 characters",
            json!({ "provided_length": key.chars().count() }),
        ));
    }

    if !is_valid_key(key) {
        return Err(AppError::bad_request(
            "Custom key must start with a letter and contain only letters and digits",
            json!({ "key": key }),
        ));
    }

    Ok(())
}
