//! API secret wrapper that redacts sensitive material.

// self
use crate::{_prelude::*, auth::Environment, error::ConfigError};

/// Redacted platform secret keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecret(String);
impl ApiSecret {
	/// Wraps a secret string, rejecting empty or whitespace-only values.
	pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
		let value = value.into();

		if value.trim().is_empty() {
			return Err(ConfigError::EmptySecret);
		}

		Ok(Self(value))
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Environment the issuer operates in, used to filter connected platforms.
	pub fn environment(&self) -> Environment {
		Environment::from_secret(self.expose())
	}

	/// Environment tag attached to outgoing event-link and embed-token payloads.
	pub fn payload_environment(&self) -> Environment {
		Environment::payload_tag(self.expose())
	}
}
impl TryFrom<String> for ApiSecret {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl TryFrom<&str> for ApiSecret {
	type Error = ConfigError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for ApiSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiSecret").field(&"<redacted>").finish()
	}
}
impl Display for ApiSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
