//! Transport primitives for the issuer's remote calls.
//!
//! The module exposes [`ApiHttpClient`], the issuer's only dependency on an HTTP stack, and
//! [`TransportErrorMapper`], which classifies transport failures into crate [`Error`] values.
//! Downstream crates can plug in a custom client (with its own timeouts, proxies, or test doubles)
//! by implementing both traits.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	endpoint::{Endpoint, HttpMethod},
};
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Boxed request future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + 'a + Send>>;

/// Fully resolved outbound request.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute endpoint URL.
	pub url: Url,
	/// Header pairs; values may contain the API secret.
	pub headers: Vec<(&'static str, String)>,
	/// JSON-encoded body, if any.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Returns the value of the first header named `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let header_names = self.headers.iter().map(|(name, _)| *name).collect::<Vec<_>>();

		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &header_names)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.finish()
	}
}

/// Raw response captured by the transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Unparsed response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Whether the status is in the `2xx` range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports able to execute the issuer's requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared across
/// issuers behind an [`Arc`], and the returned futures must be `Send` so `create` can hop
/// executors.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and returns the raw response regardless of its status.
	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Maps transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an error emitted while calling `endpoint` into a crate error.
	fn map_transport_error(&self, endpoint: Endpoint, error: E) -> Error;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts, proxies, and TLS settings belong to the wrapped client; the issuer imposes none.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in request.headers {
				builder = builder.header(name, value);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok::<_, ReqwestError>(ApiResponse { status, body })
		})
	}
}

/// Default mapper for reqwest-backed transports.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, endpoint: Endpoint, error: ReqwestError) -> Error {
		if error.is_builder() {
			ConfigError::http_request(endpoint, error).into()
		} else if error.is_timeout() {
			TransportError::timeout(endpoint, error).into()
		} else {
			TransportError::network(endpoint, error).into()
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn request() -> ApiRequest {
		ApiRequest {
			method: HttpMethod::Post,
			url: Url::parse("https://api.integrationos.com/internal/v1/settings/get")
				.expect("Fixture URL should parse."),
			headers: vec![
				("X-Buildable-Secret", "sk_test_secret".into()),
				("Content-Type", "application/json".into()),
			],
			body: Some(b"{}".to_vec()),
		}
	}

	#[test]
	fn header_lookup_is_case_insensitive() {
		let request = request();

		assert_eq!(request.header("x-buildable-secret"), Some("sk_test_secret"));
		assert_eq!(request.header("content-type"), Some("application/json"));
		assert_eq!(request.header("x-integrationos-secret"), None);
	}

	#[test]
	fn request_debug_hides_header_values() {
		let rendered = format!("{:?}", request());

		assert!(rendered.contains("X-Buildable-Secret"));
		assert!(!rendered.contains("sk_test_secret"));
	}

	#[test]
	fn success_range_is_2xx() {
		assert!(ApiResponse { status: 200, body: Vec::new() }.is_success());
		assert!(ApiResponse { status: 204, body: Vec::new() }.is_success());
		assert!(!ApiResponse { status: 302, body: Vec::new() }.is_success());
		assert!(!ApiResponse { status: 500, body: Vec::new() }.is_success());
	}
}
