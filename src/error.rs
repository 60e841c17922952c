//! Issuer-level error types shared across configuration, transport, and the token workflow.

// self
use crate::{_prelude::*, endpoint::Endpoint};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const BODY_PREVIEW_LIMIT: usize = 256;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Remote endpoint answered with a non-success status.
	#[error("The {endpoint} endpoint responded with HTTP {status}: {body_preview}.")]
	Remote {
		/// Endpoint that rejected the call.
		endpoint: Endpoint,
		/// HTTP status code returned upstream.
		status: u16,
		/// Truncated response body for diagnostics.
		body_preview: String,
	},
	/// Remote endpoint returned a body that does not match its schema.
	#[error("The {endpoint} endpoint returned an unexpected body.")]
	Decode {
		/// Endpoint whose response failed to decode.
		endpoint: Endpoint,
		/// Structured parsing failure including the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Request body could not be serialized.
	#[error("Request body for the {endpoint} endpoint could not be encoded.")]
	Encode {
		/// Endpoint the body was destined for.
		endpoint: Endpoint,
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl Error {
	/// HTTP status a calling layer should surface for this failure.
	///
	/// Every failure aborts token issuance as a whole, so all variants map to `500`.
	pub const fn status_code(&self) -> u16 {
		500
	}

	/// Endpoint involved in the failure, when one is known.
	pub fn endpoint(&self) -> Option<Endpoint> {
		match self {
			Self::Config(_) => None,
			Self::Transport(e) => Some(e.endpoint()),
			Self::Remote { endpoint, .. }
			| Self::Decode { endpoint, .. }
			| Self::Encode { endpoint, .. } => Some(*endpoint),
		}
	}

	/// Renders the error together with every underlying cause.
	///
	/// Links are joined with `": "`; the trailing period of each link but the last is dropped, so
	/// a refused connection reads
	/// `Network error occurred while calling the get_settings endpoint: <cause>`.
	pub fn describe(&self) -> String {
		let mut message = self.to_string();
		let mut cause = self.source();

		while let Some(link) = cause {
			let text = link.to_string();

			if !text.is_empty() {
				message.truncate(message.trim_end_matches('.').len());
				message.push_str(": ");
				message.push_str(&text);
			}

			cause = link.source();
		}

		message
	}

	pub(crate) fn remote(endpoint: Endpoint, status: u16, body: &[u8]) -> Self {
		let text = String::from_utf8_lossy(body);
		let trimmed = text.trim();
		let body_preview = if trimmed.is_empty() {
			"<empty body>".into()
		} else if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
			let mut preview = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

			preview.push('…');

			preview
		} else {
			trimmed.to_owned()
		};

		Self::Remote { endpoint, status, body_preview }
	}
}

/// Configuration and validation failures raised while building an issuer.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request could not be assembled by the transport.
	#[error("HTTP request for the {endpoint} endpoint could not be built.")]
	HttpRequest {
		/// Endpoint whose request failed to build.
		endpoint: Endpoint,
		/// Underlying builder failure.
		#[source]
		source: BoxError,
	},
	/// API secret is empty.
	#[error("API secret cannot be empty.")]
	EmptySecret,
	/// Configured origin is not an absolute URL.
	#[error("The {key} origin `{value}` is not a valid URL.")]
	InvalidOrigin {
		/// Configuration key that carried the value.
		key: &'static str,
		/// Raw configured value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint URL assembled from the origins failed to parse.
	#[error("The {endpoint} endpoint URL `{value}` is invalid.")]
	InvalidEndpointUrl {
		/// Endpoint being resolved.
		endpoint: Endpoint,
		/// Assembled URL string.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a transport's request-building failure inside [`ConfigError`].
	pub fn http_request(
		endpoint: Endpoint,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::HttpRequest { endpoint, source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client gave up waiting for the endpoint.
	#[error("Timed out while calling the {endpoint} endpoint.")]
	Timeout {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(endpoint: Endpoint, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(endpoint: Endpoint, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { endpoint, source: Box::new(src) }
	}

	/// Endpoint the failed call targeted.
	pub fn endpoint(&self) -> Endpoint {
		match self {
			Self::Network { endpoint, .. } | Self::Timeout { endpoint, .. } => *endpoint,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn remote_error_truncates_long_bodies() {
		let body = "x".repeat(BODY_PREVIEW_LIMIT + 10);
		let err = Error::remote(Endpoint::GetSettings, 502, body.as_bytes());

		match &err {
			Error::Remote { status, body_preview, .. } => {
				assert_eq!(*status, 502);
				assert_eq!(body_preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
				assert!(body_preview.ends_with('…'));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		assert_eq!(err.status_code(), 500);
		assert_eq!(err.endpoint(), Some(Endpoint::GetSettings));
	}

	#[test]
	fn remote_error_marks_empty_bodies() {
		let err = Error::remote(Endpoint::GetSessionId, 404, b"  ");

		assert_eq!(
			err.to_string(),
			"The get_session_id endpoint responded with HTTP 404: <empty body>."
		);
	}

	#[test]
	fn describe_appends_every_cause() {
		#[derive(Debug, ThisError)]
		#[error("tcp connect error.")]
		struct Connect(#[source] std::io::Error);

		let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
		let err = Error::from(TransportError::network(Endpoint::GetSettings, Connect(refused)));

		assert_eq!(err.to_string(), "Network error occurred while calling the get_settings endpoint.");
		assert_eq!(
			err.describe(),
			"Network error occurred while calling the get_settings endpoint: tcp connect error: connection refused"
		);
	}

	#[test]
	fn describe_includes_decode_path() {
		let mut deserializer = serde_json::Deserializer::from_str("{\"id\":7}");
		let source = serde_path_to_error::deserialize::<_, crate::schema::SessionId>(&mut deserializer)
			.expect_err("Numeric id must fail.");
		let err = Error::Decode { endpoint: Endpoint::GetSessionId, source };
		let message = err.describe();

		assert!(message.starts_with("The get_session_id endpoint returned an unexpected body: id: "));
		assert_eq!(message.matches("invalid type").count(), 1);
	}

	#[test]
	fn describe_without_cause_matches_display() {
		let err = Error::remote(Endpoint::CreateEventLink, 500, b"upstream exploded");

		assert_eq!(err.describe(), err.to_string());
	}

	#[test]
	fn config_errors_carry_no_endpoint() {
		let err = Error::from(ConfigError::EmptySecret);

		assert_eq!(err.endpoint(), None);
		assert_eq!(err.to_string(), "API secret cannot be empty.");
	}
}
