//! Live/test environment selection derived from the API secret.
//!
//! Two derivations coexist on purpose. [`Environment::from_secret`] decides which connected
//! platforms are eligible, while [`Environment::payload_tag`] labels the payloads sent to the
//! event-link and embed-token endpoints. They agree for every `sk_live_…`/`sk_test_…` secret the
//! platform issues but diverge for other shapes: `rk_…` filters as test yet is tagged live.

// self
use crate::_prelude::*;

const LIVE_MARKER: &str = "sk_live_";
const TEST_PREFIX: &str = "sk_test";

/// Platform environment a secret belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	/// Production traffic.
	Live,
	/// Sandbox traffic.
	Test,
}
impl Environment {
	/// `Live` when the secret contains `sk_live_` anywhere, `Test` otherwise.
	pub fn from_secret(secret: &str) -> Self {
		if secret.contains(LIVE_MARKER) { Self::Live } else { Self::Test }
	}

	/// `Test` when the secret starts with `sk_test`, `Live` otherwise.
	pub fn payload_tag(secret: &str) -> Self {
		if secret.starts_with(TEST_PREFIX) { Self::Test } else { Self::Live }
	}

	/// Returns a stable label matching the platform's wire format.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Live => "live",
			Self::Test => "test",
		}
	}

	/// Whether a connected platform tagged with `platform` may be used from this environment.
	///
	/// Live requires an explicit `live` tag; test accepts `test` or an untagged platform.
	pub fn admits(self, platform: Option<&str>) -> bool {
		match self {
			Self::Live => platform == Some(Self::Live.as_str()),
			Self::Test => platform.is_none_or(|tag| tag == Self::Test.as_str()),
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
