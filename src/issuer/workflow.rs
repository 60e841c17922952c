//! The five-call issuance workflow.
//!
//! [`EmbedTokenIssuer::create`] runs the steps strictly in order: settings, event link,
//! connection definitions, session id, embed token. The first failure aborts the rest; nothing is
//! retried and there is nothing to roll back.

// self
use crate::{
	_prelude::*,
	clock,
	endpoint::Endpoint,
	filter,
	http::{ApiHttpClient, ApiRequest, TransportErrorMapper},
	issuer::{EmbedTokenIssuer, Issuance},
	obs::{self, IssueSpan, Outcome},
	schema::{
		ConnectedPlatform, ConnectionDefinitionPage, EmbedToken, EmbedTokenRequest, EventLink,
		EventLinkRequest, LinkSettings, SessionId, Settings,
	},
};

/// Lifetime granted to every embed token.
pub const EMBED_TOKEN_TTL: Duration = Duration::minutes(5);

impl<C, M> EmbedTokenIssuer<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Issues an embed token for `payload`, the event-link attributes supplied by the caller.
	pub async fn create(&self, payload: JsonMap<String, JsonValue>) -> Result<EmbedToken> {
		let span = IssueSpan::issue(self.environment().as_str());

		obs::record_issue_outcome(Outcome::Attempt);

		let result = span.instrument(self.run(payload)).await;

		obs::record_issue_outcome(Outcome::of(&result));

		if let Err(e) = &result {
			obs::warn_issue_failure(e);
		}

		result
	}

	/// Same as [`create`](Self::create) but folds failures into an [`Issuance`] carrying the
	/// `{message}` payload and the status the calling layer should answer with.
	pub async fn issue(&self, payload: JsonMap<String, JsonValue>) -> Issuance {
		self.create(payload).await.into()
	}

	/// Fetches account settings.
	pub async fn get_settings(&self) -> Result<Settings> {
		let body = encode(Endpoint::GetSettings, &JsonMap::new())?;

		self.call(Endpoint::GetSettings, Some(body)).await
	}

	/// Registers an event link for `payload`, tagged with the payload environment and SDK usage
	/// source.
	pub async fn create_event_link(&self, payload: JsonMap<String, JsonValue>) -> Result<EventLink> {
		let request = EventLinkRequest::new(payload, self.payload_environment());
		let body = encode(Endpoint::CreateEventLink, &request)?;

		self.call(Endpoint::CreateEventLink, Some(body)).await
	}

	/// Lists connection definitions from the public API.
	pub async fn get_connection_definitions(&self) -> Result<ConnectionDefinitionPage> {
		self.call(Endpoint::GetConnectionDefinitions, None).await
	}

	/// Mints a session identifier.
	pub async fn get_session_id(&self) -> Result<SessionId> {
		self.call(Endpoint::GetSessionId, None).await
	}

	/// Fetches a session id and exchanges the assembled payload for an embed token.
	pub async fn create_embed_token(
		&self,
		connected_platforms: Vec<ConnectedPlatform>,
		event_link: EventLink,
		settings: Settings,
	) -> Result<EmbedToken> {
		let session = self.get_session_id().await?;
		let request = self.embed_token_request(connected_platforms, event_link, settings, session);
		let body = encode(Endpoint::CreateEmbedToken, &request)?;

		self.call(Endpoint::CreateEmbedToken, Some(body)).await
	}

	fn embed_token_request(
		&self,
		connected_platforms: Vec<ConnectedPlatform>,
		event_link: EventLink,
		settings: Settings,
		session: SessionId,
	) -> EmbedTokenRequest {
		let expires_at = clock::unix_millis(self.clock.now() + EMBED_TOKEN_TTL);

		EmbedTokenRequest {
			link_settings: LinkSettings { connected_platforms, event_inc_token: event_link.token },
			group: event_link.group,
			label: event_link.label,
			environment: self.payload_environment(),
			expires_at,
			session_id: session.id,
			features: settings.features,
		}
	}

	async fn run(&self, payload: JsonMap<String, JsonValue>) -> Result<EmbedToken> {
		let settings = self.get_settings().await?;
		let event_link = self.create_event_link(payload).await?;
		let definitions = self.get_connection_definitions().await?;
		let connected_platforms = filter::select_connected_platforms(
			&settings.connected_platforms,
			&definitions.rows,
			self.environment(),
		);

		self.create_embed_token(connected_platforms, event_link, settings).await
	}

	async fn call<T>(&self, endpoint: Endpoint, body: Option<Vec<u8>>) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let span = IssueSpan::call(endpoint);

		obs::record_call_outcome(endpoint, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let request = ApiRequest {
					method: endpoint.method(),
					url: self.endpoint_url(endpoint)?,
					headers: endpoint.header_kind().headers(&self.secret),
					body,
				};
				let response = self
					.http_client
					.execute(request)
					.await
					.map_err(|e| self.transport_mapper.map_transport_error(endpoint, e))?;

				if !response.is_success() {
					return Err(Error::remote(endpoint, response.status, &response.body));
				}

				decode(endpoint, &response.body)
			})
			.await;

		obs::record_call_outcome(endpoint, Outcome::of(&result));

		result
	}
}

fn encode<B>(endpoint: Endpoint, body: &B) -> Result<Vec<u8>>
where
	B: ?Sized + Serialize,
{
	serde_json::to_vec(body).map_err(|source| Error::Encode { endpoint, source })
}

fn decode<T>(endpoint: Endpoint, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { endpoint, source })
}
