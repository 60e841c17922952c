//! Issuer configuration and origin resolution.
//!
//! Callers supply an optional mapping whose `base_url` key selects the services origin. The api
//! origin (hosting public connection definitions) is derived from it unless `api_url` pins it
//! explicitly.

// self
use crate::{_prelude::*, error::ConfigError};

/// Production origin serving both the services and the public API.
pub const PRODUCTION_ORIGIN: &str = "https://api.integrationos.com";
/// Public API origin paired with development services deployments.
pub const DEVELOPMENT_API_ORIGIN: &str = "https://development-api.integrationos.com";
/// Public API origin paired with locally running services.
pub const LOCAL_API_ORIGIN: &str = "http://localhost:3005";

/// Optional overrides accepted when constructing an issuer.
///
/// Unknown keys are ignored when deserializing so callers can share a larger configuration map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
	/// Services origin, used verbatim as the prefix of internal endpoints.
	pub base_url: Option<String>,
	/// Explicit public API origin; derived from `base_url` when unset.
	pub api_url: Option<String>,
}
impl IssuerConfig {
	/// Sets the services origin.
	pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Pins the public API origin instead of deriving it from the services origin.
	pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
		self.api_url = Some(url.into());

		self
	}

	/// Validates the configured values and resolves both origins.
	pub fn origins(&self) -> Result<ApiOrigins, ConfigError> {
		let services = self.base_url.clone().unwrap_or_else(|| PRODUCTION_ORIGIN.into());

		validate_origin("base_url", &services)?;

		let api = match &self.api_url {
			Some(api) => {
				validate_origin("api_url", api)?;

				api.clone()
			},
			None => derive_api_origin(&services).into(),
		};

		Ok(ApiOrigins { services, api })
	}
}

/// Resolved origins every endpoint URL is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiOrigins {
	services: String,
	api: String,
}
impl ApiOrigins {
	/// Origin prefixing internal and session-id endpoints.
	pub fn services(&self) -> &str {
		&self.services
	}

	/// Origin prefixing public connection-definition listings.
	pub fn api(&self) -> &str {
		&self.api
	}
}
impl Default for ApiOrigins {
	fn default() -> Self {
		Self { services: PRODUCTION_ORIGIN.into(), api: PRODUCTION_ORIGIN.into() }
	}
}

/// Maps a services origin onto the public API origin deployed alongside it.
pub fn derive_api_origin(services: &str) -> &'static str {
	if services.contains("localhost") {
		LOCAL_API_ORIGIN
	} else if services.contains("development") {
		DEVELOPMENT_API_ORIGIN
	} else {
		PRODUCTION_ORIGIN
	}
}

fn validate_origin(key: &'static str, value: &str) -> Result<(), ConfigError> {
	Url::parse(value)
		.map(|_| ())
		.map_err(|source| ConfigError::InvalidOrigin { key, value: value.into(), source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_to_production() {
		let origins = IssuerConfig::default().origins().expect("Default origins should resolve.");

		assert_eq!(origins, ApiOrigins::default());
	}

	#[test]
	fn api_origin_follows_services_origin() {
		assert_eq!(derive_api_origin("http://localhost:3001"), LOCAL_API_ORIGIN);
		assert_eq!(derive_api_origin("https://development.integrationos.com"), DEVELOPMENT_API_ORIGIN);
		assert_eq!(derive_api_origin("https://staging.example.com"), PRODUCTION_ORIGIN);
		// `localhost` wins when both markers are present.
		assert_eq!(derive_api_origin("http://development.localhost:8080"), LOCAL_API_ORIGIN);
	}

	#[test]
	fn explicit_api_url_overrides_derivation() {
		let origins = IssuerConfig::default()
			.with_base_url("http://localhost:3001")
			.with_api_url("http://127.0.0.1:9000")
			.origins()
			.expect("Explicit origins should resolve.");

		assert_eq!(origins.services(), "http://localhost:3001");
		assert_eq!(origins.api(), "http://127.0.0.1:9000");
	}

	#[test]
	fn invalid_origins_are_rejected() {
		let err = IssuerConfig::default()
			.with_base_url("not a url")
			.origins()
			.expect_err("Relative base URLs must be rejected.");

		assert!(matches!(err, ConfigError::InvalidOrigin { key: "base_url", .. }));

		let err = IssuerConfig::default()
			.with_api_url("/relative")
			.origins()
			.expect_err("Relative api URLs must be rejected.");

		assert!(matches!(err, ConfigError::InvalidOrigin { key: "api_url", .. }));
	}

	#[test]
	fn deserializes_partial_mappings() {
		let config: IssuerConfig = serde_json::from_str(
			"{\"base_url\":\"https://development.integrationos.com\",\"unrelated\":true}",
		)
		.expect("Config mapping should deserialize.");

		assert_eq!(config.base_url.as_deref(), Some("https://development.integrationos.com"));
		assert_eq!(config.api_url, None);

		let empty: IssuerConfig =
			serde_json::from_str("{}").expect("Empty config mapping should deserialize.");

		assert_eq!(empty, IssuerConfig::default());
	}
}
