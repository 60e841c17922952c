//! Embed-token issuer: owns the credentials, resolved origins, and transport handles shared by
//! every step of the workflow.

pub mod outcome;

mod workflow;

pub use outcome::*;
pub use workflow::EMBED_TOKEN_TTL;

// self
use crate::{
	_prelude::*,
	auth::{ApiSecret, Environment},
	clock::{Clock, SystemClock},
	config::{ApiOrigins, IssuerConfig},
	endpoint::Endpoint,
	http::{ApiHttpClient, TransportErrorMapper},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Issuer specialized for the crate's default reqwest transport stack.
pub type ReqwestEmbedTokenIssuer = EmbedTokenIssuer<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Provisions embed tokens for end users.
///
/// The issuer is immutable after construction: it captures the secret, the resolved origins, and
/// shared handles to the HTTP client, transport error mapper, and clock. Concurrent
/// [`create`](EmbedTokenIssuer::create) calls therefore need no coordination.
#[derive(Clone)]
pub struct EmbedTokenIssuer<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Time source for token expiry.
	pub clock: Arc<dyn Clock>,
	secret: ApiSecret,
	origins: ApiOrigins,
	environment: Environment,
}
impl<C, M> EmbedTokenIssuer<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates an issuer that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		secret: impl Into<String>,
		config: IssuerConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let secret = ApiSecret::new(secret)?;
		let origins = config.origins()?;
		let environment = secret.environment();

		Ok(Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			clock: Arc::new(SystemClock),
			secret,
			origins,
			environment,
		})
	}

	/// Replaces the clock used to stamp token expiry.
	pub fn with_clock(mut self, clock: impl 'static + Clock) -> Self {
		self.clock = Arc::new(clock);

		self
	}

	/// Environment used to filter connected platforms.
	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Environment tag attached to event-link and embed-token payloads.
	pub fn payload_environment(&self) -> Environment {
		self.secret.payload_environment()
	}

	/// Origins every endpoint URL is built from.
	pub fn origins(&self) -> &ApiOrigins {
		&self.origins
	}

	/// Resolves the absolute URL for `endpoint`.
	pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
		Ok(endpoint.url(&self.origins)?)
	}
}
#[cfg(feature = "reqwest")]
impl EmbedTokenIssuer<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates an issuer for the production platform.
	///
	/// The issuer provisions its own reqwest-backed transport so callers do not need to pass HTTP
	/// handles explicitly.
	pub fn new(secret: impl Into<String>) -> Result<Self> {
		Self::with_config(secret, IssuerConfig::default())
	}

	/// Creates a reqwest-backed issuer honoring `config` overrides.
	pub fn with_config(secret: impl Into<String>, config: IssuerConfig) -> Result<Self> {
		Self::with_http_client(
			secret,
			config,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
	}
}
impl<C, M> Debug for EmbedTokenIssuer<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("EmbedTokenIssuer")
			.field("secret", &self.secret)
			.field("origins", &self.origins)
			.field("environment", &self.environment)
			.finish()
	}
}
