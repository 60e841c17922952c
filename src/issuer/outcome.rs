//! Typed issuance result for callers that answer HTTP requests themselves.

// self
use crate::{_prelude::*, schema::EmbedToken};

/// Status reported alongside a successfully issued token.
pub const ISSUED_STATUS: u16 = 200;

/// Result of [`EmbedTokenIssuer::issue`](crate::issuer::EmbedTokenIssuer::issue).
///
/// Serializes to the token object on success and to `{"message": …}` on failure; the calling
/// layer picks the HTTP status from [`Issuance::status`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Issuance {
	/// Token issued by the platform.
	Issued(EmbedToken),
	/// Issuance aborted.
	Failed(IssueFailure),
}
impl Issuance {
	/// Suggested HTTP status for the calling layer.
	pub fn status(&self) -> u16 {
		match self {
			Self::Issued(_) => ISSUED_STATUS,
			Self::Failed(failure) => failure.status,
		}
	}

	/// Borrows the issued token, if any.
	pub fn token(&self) -> Option<&EmbedToken> {
		match self {
			Self::Issued(token) => Some(token),
			Self::Failed(_) => None,
		}
	}

	/// Borrows the failure, if any.
	pub fn failure(&self) -> Option<&IssueFailure> {
		match self {
			Self::Issued(_) => None,
			Self::Failed(failure) => Some(failure),
		}
	}

	/// JSON body to send back to the caller.
	pub fn to_json(&self) -> JsonValue {
		match self {
			Self::Issued(token) => JsonValue::Object(token.as_map().clone()),
			Self::Failed(failure) => {
				let mut body = JsonMap::new();

				body.insert("message".into(), failure.message.clone().into());

				JsonValue::Object(body)
			},
		}
	}
}
impl From<Result<EmbedToken>> for Issuance {
	fn from(result: Result<EmbedToken>) -> Self {
		match result {
			Ok(token) => Self::Issued(token),
			Err(e) => Self::Failed(IssueFailure::from(&e)),
		}
	}
}

/// User-visible failure payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IssueFailure {
	/// Human-readable description of what went wrong, underlying causes included.
	pub message: String,
	/// Suggested HTTP status; not part of the serialized body.
	#[serde(skip)]
	pub status: u16,
}
impl From<&Error> for IssueFailure {
	fn from(e: &Error) -> Self {
		Self { message: e.describe(), status: e.status_code() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{endpoint::Endpoint, error::TransportError};

	#[derive(Debug)]
	struct Refused;
	impl Display for Refused {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("connection refused")
		}
	}
	impl StdError for Refused {}

	#[test]
	fn failure_serializes_message_only() {
		let err = Error::from(TransportError::network(Endpoint::GetSettings, Refused));
		let issuance = Issuance::from(Err(err));

		assert_eq!(issuance.status(), 500);
		assert!(issuance.token().is_none());
		assert_eq!(
			serde_json::to_value(&issuance).expect("Failure should serialize."),
			serde_json::json!({
				"message": "Network error occurred while calling the get_settings endpoint."
			})
		);
		assert_eq!(
			issuance.to_json(),
			serde_json::to_value(&issuance).expect("Failure should serialize.")
		);
	}

	#[test]
	fn success_serializes_token_verbatim() {
		let mut map = JsonMap::new();

		map.insert("sessionId".into(), "session-1".into());

		let issuance = Issuance::from(Ok(EmbedToken::from(map)));

		assert_eq!(issuance.status(), ISSUED_STATUS);
		assert!(issuance.failure().is_none());
		assert_eq!(issuance.to_json(), serde_json::json!({ "sessionId": "session-1" }));
	}
}
