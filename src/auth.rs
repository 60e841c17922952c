//! Credential handling: the redacted API secret and the environments it selects.

pub mod environment;
pub mod secret;

pub use environment::*;
pub use secret::*;
