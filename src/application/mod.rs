//! Application layer services implementing business logic.
//!
//! Services consume repository traits and infrastructure abstractions and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! - [`services::shortener_service::ShortenerService`] - Short key assignment and resolution

pub mod services;
