//! Demonstrates issuing an embed token with the default reqwest transport against a mock
//! platform, then answering with the status and body a web handler would return.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::{Map, json};
// self
use integrationos_authkit::{config::IssuerConfig, issuer::ReqwestEmbedTokenIssuer};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/internal/v1/settings/get");
			then.status(200).json_body(json!({
				"connectedPlatforms": [
					{ "connectionDefinitionId": "conn::stripe", "active": true, "type": "stripe" }
				],
				"features": []
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/internal/v1/event-links/create");
			then.status(200).json_body(json!({
				"token": "demo-event-token",
				"group": "demo-group",
				"label": "Demo Customer"
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/public/connection-definitions");
			then.status(200).json_body(json!({ "rows": [{ "_id": "conn::stripe", "active": true }] }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/public/generate-id/session_id");
			then.status(200).json_body(json!({ "id": "session::demo" }));
		})
		.await;

	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/internal/v1/embed-tokens/create");
			then.status(200).json_body(json!({ "sessionId": "session::demo", "token": "embed-demo" }));
		})
		.await;
	let config = IssuerConfig::default()
		.with_base_url(server.base_url())
		.with_api_url(server.base_url());
	let issuer = ReqwestEmbedTokenIssuer::with_config("sk_test_demo", config)?;
	let mut payload = Map::new();

	payload.insert("group".into(), "demo-group".into());
	payload.insert("label".into(), "Demo Customer".into());

	let issuance = issuer.issue(payload).await;

	println!("HTTP {}: {}.", issuance.status(), issuance.to_json());

	token_mock.assert_async().await;

	Ok(())
}
