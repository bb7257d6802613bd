//! Configuration and shared error types for hooksig.
//!
//! Configuration is read from the environment once at startup and passed
//! down explicitly; nothing below the binary reads the environment itself.

mod config;
mod error;

pub use config::HookSigConfig;
pub use error::{HookSigError, HookSigResult};
