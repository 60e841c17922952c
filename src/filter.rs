//! Connected-platform selection against active connection definitions.

// self
use crate::{
	_prelude::*,
	auth::Environment,
	schema::{ConnectedPlatform, ConnectionDefinition},
};

/// Identifiers of the definitions flagged `active`; rows without an identifier are skipped.
pub fn active_definition_ids(rows: &[ConnectionDefinition]) -> HashSet<&str> {
	rows.iter().filter(|row| row.active).filter_map(|row| row.id.as_deref()).collect()
}

/// Keeps the platforms an embed token may be scoped to, preserving their order.
///
/// A platform survives when it is active, references an active definition, and its environment
/// tag is admitted by `environment` (see [`Environment::admits`]).
pub fn select_connected_platforms(
	platforms: &[ConnectedPlatform],
	definitions: &[ConnectionDefinition],
	environment: Environment,
) -> Vec<ConnectedPlatform> {
	let active_ids = active_definition_ids(definitions);

	platforms
		.iter()
		.filter(|platform| {
			platform.connection_definition_id().is_some_and(|id| active_ids.contains(id))
				&& platform.active()
				&& environment.admits(platform.environment())
		})
		.cloned()
		.collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::schema::{ConnectionDefinitionPage, Settings};

	fn platform(id: &str, active: bool, environment: Option<&str>) -> ConnectedPlatform {
		let mut record = JsonMap::new();

		record.insert("connectionDefinitionId".into(), id.into());
		record.insert("active".into(), active.into());

		if let Some(environment) = environment {
			record.insert("environment".into(), environment.into());
		}

		ConnectedPlatform::from(record)
	}

	fn definition(id: &str, active: bool) -> ConnectionDefinition {
		ConnectionDefinition { id: Some(id.into()), active }
	}

	fn ids(platforms: &[ConnectedPlatform]) -> Vec<&str> {
		platforms.iter().filter_map(ConnectedPlatform::connection_definition_id).collect()
	}

	#[test]
	fn live_requires_explicit_live_tag() {
		let platforms = [platform("a", true, Some("live")), platform("b", true, None)];
		let definitions = [definition("a", true)];
		let selected = select_connected_platforms(&platforms, &definitions, Environment::Live);

		assert_eq!(ids(&selected), ["a"]);
	}

	#[test]
	fn test_admits_untagged_platforms() {
		let platforms = [
			platform("a", true, None),
			platform("b", true, Some("test")),
			platform("c", true, Some("live")),
		];
		let definitions = [definition("a", true), definition("b", true), definition("c", true)];
		let selected = select_connected_platforms(&platforms, &definitions, Environment::Test);

		assert_eq!(ids(&selected), ["a", "b"]);
	}

	#[test]
	fn inactive_platforms_and_definitions_are_dropped() {
		let platforms = [
			platform("a", false, Some("live")),
			platform("b", true, Some("live")),
			platform("c", true, Some("live")),
			platform("d", true, Some("live")),
		];
		let definitions = [definition("a", true), definition("b", false), definition("d", true)];
		let selected = select_connected_platforms(&platforms, &definitions, Environment::Live);

		assert_eq!(ids(&selected), ["d"]);
	}

	#[test]
	fn order_and_duplicates_are_preserved() {
		let platforms = [
			platform("z", true, None),
			platform("a", true, None),
			platform("z", true, Some("test")),
		];
		let definitions = [definition("a", true), definition("z", true)];
		let selected = select_connected_platforms(&platforms, &definitions, Environment::Test);

		assert_eq!(ids(&selected), ["z", "a", "z"]);
	}

	#[test]
	fn platforms_without_definition_never_match() {
		let orphan: ConnectedPlatform = serde_json::from_value(serde_json::json!({ "active": true }))
			.expect("Platform should deserialize.");
		let selected =
			select_connected_platforms(&[orphan], &[definition("a", true)], Environment::Test);

		assert!(selected.is_empty());
	}

	#[test]
	fn null_active_flags_count_as_inactive() {
		let settings: Settings = serde_json::from_value(serde_json::json!({
			"connectedPlatforms": [
				{ "connectionDefinitionId": "a", "active": null },
				{ "connectionDefinitionId": "b", "active": true }
			],
			"features": null
		}))
		.expect("Settings should deserialize.");
		let page: ConnectionDefinitionPage = serde_json::from_value(serde_json::json!({
			"rows": [{ "_id": "a", "active": true }, { "_id": "b", "active": null }]
		}))
		.expect("Page should deserialize.");
		let selected = select_connected_platforms(
			&settings.connected_platforms,
			&page.rows,
			Environment::Test,
		);

		assert!(selected.is_empty());
	}

	#[test]
	fn definitions_without_id_are_skipped() {
		let page: ConnectionDefinitionPage = serde_json::from_value(serde_json::json!({
			"rows": [{ "active": true }, { "_id": "a", "active": true }, { "_id": null, "active": true }]
		}))
		.expect("Page should deserialize.");

		assert_eq!(active_definition_ids(&page.rows), HashSet::from(["a"]));

		let selected = select_connected_platforms(
			&[platform("a", true, None), platform("b", true, None)],
			&page.rows,
			Environment::Test,
		);

		assert_eq!(ids(&selected), ["a"]);
	}

	#[test]
	fn explicit_nulls_survive_selection() {
		let raw = serde_json::json!({
			"connectionDefinitionId": "a",
			"active": true,
			"environment": null,
			"title": null
		});
		let platform: ConnectedPlatform =
			serde_json::from_value(raw.clone()).expect("Platform should deserialize.");
		let selected =
			select_connected_platforms(&[platform], &[definition("a", true)], Environment::Test);

		assert_eq!(
			serde_json::to_value(&selected).expect("Selection should serialize."),
			serde_json::json!([raw])
		);
	}

	#[test]
	fn empty_inputs_yield_empty_selection() {
		assert!(select_connected_platforms(&[], &[definition("a", true)], Environment::Live).is_empty());
		assert!(
			select_connected_platforms(&[platform("a", true, None)], &[], Environment::Test).is_empty()
		);
	}
}
