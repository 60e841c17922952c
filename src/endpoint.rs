//! Closed set of remote endpoints the issuer calls, with their methods, header sets, and URLs.

// self
use crate::{_prelude::*, auth::ApiSecret, config::ApiOrigins, error::ConfigError};

/// HTTP methods used by the workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
}
impl HttpMethod {
	/// Returns the canonical method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Header sets the platform accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HeaderKind {
	/// Internal services authentication plus a JSON content type.
	#[default]
	Buildable,
	/// Public API authentication.
	IosSecret,
}
impl HeaderKind {
	/// Header carrying the secret on internal services calls.
	pub const BUILDABLE_SECRET: &'static str = "X-Buildable-Secret";
	/// Header carrying the secret on public API calls.
	pub const IOS_SECRET: &'static str = "x-integrationos-secret";

	/// Materializes the header set for `secret`.
	pub fn headers(self, secret: &ApiSecret) -> Vec<(&'static str, String)> {
		match self {
			Self::Buildable => vec![
				(Self::BUILDABLE_SECRET, secret.expose().to_owned()),
				("Content-Type", "application/json".to_owned()),
			],
			Self::IosSecret => vec![(Self::IOS_SECRET, secret.expose().to_owned())],
		}
	}
}

/// Which resolved origin an endpoint hangs off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
	/// `base_url`, used verbatim.
	Services,
	/// Public API origin.
	Api,
}

/// Remote endpoints called while issuing an embed token, in workflow order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Account settings lookup.
	GetSettings,
	/// Event-link registration.
	CreateEventLink,
	/// Public connection-definition listing.
	GetConnectionDefinitions,
	/// Session id generator.
	GetSessionId,
	/// Embed-token exchange.
	CreateEmbedToken,
}
impl Endpoint {
	/// Every endpoint in the order the workflow calls them.
	pub const ALL: [Self; 5] = [
		Self::GetSettings,
		Self::CreateEventLink,
		Self::GetConnectionDefinitions,
		Self::GetSessionId,
		Self::CreateEmbedToken,
	];

	/// Returns a stable label suitable for span, metric, or error fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::GetSettings => "get_settings",
			Self::CreateEventLink => "create_event_link",
			Self::GetConnectionDefinitions => "get_connection_definitions",
			Self::GetSessionId => "get_session_id",
			Self::CreateEmbedToken => "create_embed_token",
		}
	}

	/// HTTP method used for the call.
	pub const fn method(self) -> HttpMethod {
		match self {
			Self::GetConnectionDefinitions | Self::GetSessionId => HttpMethod::Get,
			Self::GetSettings | Self::CreateEventLink | Self::CreateEmbedToken => HttpMethod::Post,
		}
	}

	/// Header set attached to the call.
	pub const fn header_kind(self) -> HeaderKind {
		match self {
			Self::GetConnectionDefinitions => HeaderKind::IosSecret,
			_ => HeaderKind::Buildable,
		}
	}

	/// Origin the path is appended to.
	pub const fn origin(self) -> Origin {
		match self {
			Self::GetConnectionDefinitions => Origin::Api,
			_ => Origin::Services,
		}
	}

	/// Path (and query) appended to the origin.
	pub const fn path(self) -> &'static str {
		match self {
			Self::GetSettings => "/internal/v1/settings/get",
			Self::CreateEventLink => "/internal/v1/event-links/create",
			Self::GetConnectionDefinitions => "/v1/public/connection-definitions?limit=100",
			Self::GetSessionId => "/v1/public/generate-id/session_id",
			Self::CreateEmbedToken => "/internal/v1/embed-tokens/create",
		}
	}

	/// Builds the absolute URL for this endpoint.
	pub fn url(self, origins: &ApiOrigins) -> Result<Url, ConfigError> {
		let origin = match self.origin() {
			Origin::Services => origins.services(),
			Origin::Api => origins.api(),
		};
		let value = format!("{origin}{}", self.path());

		Url::parse(&value).map_err(|source| ConfigError::InvalidEndpointUrl {
			endpoint: self,
			value,
			source,
		})
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
