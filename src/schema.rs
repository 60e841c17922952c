//! Typed schemas for every remote request and response body.
//!
//! Sequences the platform may omit (`connectedPlatforms`, `rows`) default to empty, including when
//! they arrive as `null`. Connected platforms and definition rows with missing or `null` flags are
//! kept and simply never selected. Fields the embed-token payload depends on (`token`, `group`, `label`,
//! `id`, `features`) are required so a malformed response fails before anything is sent onward.

// self
use crate::{_prelude::*, auth::Environment};

/// Account settings returned by the settings endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
	/// Tenant-level platform activations, in display order.
	#[serde(default, deserialize_with = "null_as_default")]
	pub connected_platforms: Vec<ConnectedPlatform>,
	/// Feature flags forwarded verbatim to the embed token.
	pub features: JsonValue,
}

/// Tenant-specific activation of a connection definition.
///
/// The record stays the JSON object the platform returned, explicit `null`s included, so it reaches
/// the embed token unchanged. The accessors read the fields the filter inspects leniently.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectedPlatform(JsonMap<String, JsonValue>);
impl ConnectedPlatform {
	/// Connection definition this platform activates; non-string ids never match.
	pub fn connection_definition_id(&self) -> Option<&str> {
		self.0.get("connectionDefinitionId").and_then(JsonValue::as_str)
	}

	/// Whether the tenant enabled the platform; anything other than `true` counts as disabled.
	pub fn active(&self) -> bool {
		self.0.get("active").and_then(JsonValue::as_bool).unwrap_or(false)
	}

	/// Environment tag, `None` when missing or `null`.
	///
	/// A tag that is not a string reads as an empty tag, which no environment admits.
	pub fn environment(&self) -> Option<&str> {
		match self.0.get("environment") {
			None | Some(JsonValue::Null) => None,
			Some(tag) => Some(tag.as_str().unwrap_or_default()),
		}
	}

	/// Looks up a top-level field.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Borrows the underlying JSON object.
	pub fn as_map(&self) -> &JsonMap<String, JsonValue> {
		&self.0
	}
}
impl From<JsonMap<String, JsonValue>> for ConnectedPlatform {
	fn from(value: JsonMap<String, JsonValue>) -> Self {
		Self(value)
	}
}

/// Reference returned by the event-link endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventLink {
	/// Token routed into `linkSettings.eventIncToken`.
	pub token: String,
	/// Group the embed token is issued for.
	pub group: String,
	/// Human-readable label for the embed token.
	pub label: String,
	/// Remaining fields, passed through untouched.
	#[serde(flatten)]
	pub extra: JsonMap<String, JsonValue>,
}

/// Descriptor of an integrable third-party platform.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDefinition {
	/// Definition identifier referenced by connected platforms; rows without one are ignored.
	#[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Whether the platform is currently offered; `null` counts as inactive.
	#[serde(default, deserialize_with = "null_as_default")]
	pub active: bool,
}

/// Page returned by the connection-definition listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDefinitionPage {
	/// Definitions on this page.
	#[serde(default, deserialize_with = "null_as_default")]
	pub rows: Vec<ConnectionDefinition>,
}

/// Identifier minted by the session-id generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId {
	/// Generated session identifier.
	pub id: String,
}

/// Body sent to the event-link endpoint: the caller payload plus the issuer's tags.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventLinkRequest {
	payload: JsonMap<String, JsonValue>,
}
impl EventLinkRequest {
	/// Usage source reported for every SDK-originated event link.
	pub const USAGE_SOURCE: &'static str = "sdk";

	/// Merges `environment` and `usageSource` into `payload`, overriding caller-supplied keys.
	pub fn new(mut payload: JsonMap<String, JsonValue>, environment: Environment) -> Self {
		payload.insert("environment".into(), environment.as_str().into());
		payload.insert("usageSource".into(), Self::USAGE_SOURCE.into());

		Self { payload }
	}

	/// Merged body as a JSON object.
	pub fn as_map(&self) -> &JsonMap<String, JsonValue> {
		&self.payload
	}
}

/// `linkSettings` section of the embed-token request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSettings {
	/// Platforms the embed token is scoped to.
	pub connected_platforms: Vec<ConnectedPlatform>,
	/// Event-link token.
	pub event_inc_token: String,
}

/// Body sent to the embed-token endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedTokenRequest {
	/// Platform scope and event routing.
	pub link_settings: LinkSettings,
	/// Group copied from the event link.
	pub group: String,
	/// Label copied from the event link.
	pub label: String,
	/// Payload environment tag.
	pub environment: Environment,
	/// Expiry as Unix epoch milliseconds.
	pub expires_at: i64,
	/// Session identifier from the generator.
	pub session_id: String,
	/// Feature flags copied from settings.
	pub features: JsonValue,
}

/// Token payload returned by the platform, kept as an opaque JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbedToken(JsonMap<String, JsonValue>);
impl EmbedToken {
	/// Looks up a top-level field.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Borrows the underlying JSON object.
	pub fn as_map(&self) -> &JsonMap<String, JsonValue> {
		&self.0
	}

	/// Unwraps the underlying JSON object.
	pub fn into_inner(self) -> JsonMap<String, JsonValue> {
		self.0
	}
}
impl From<JsonMap<String, JsonValue>> for EmbedToken {
	fn from(value: JsonMap<String, JsonValue>) -> Self {
		Self(value)
	}
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
