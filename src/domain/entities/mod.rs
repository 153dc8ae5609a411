//! Core domain entities.
//!
//! - [`UrlEntry`] - A stored short key assignment
//! - [`NewUrlEntry`] - Insert payload; the store fills in `id` and `created_at`

pub mod url_entry;

pub use url_entry::{NewUrlEntry, UrlEntry};
