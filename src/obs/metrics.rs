// self
use crate::{endpoint::Endpoint, obs::Outcome};

/// Records an issuance outcome via the global metrics recorder (when enabled).
pub fn record_issue_outcome(outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("authkit_issue_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records a remote call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(endpoint: Endpoint, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"authkit_call_total",
			"endpoint" => endpoint.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (endpoint, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_outcomes_noop_without_recorder() {
		record_issue_outcome(Outcome::Attempt);
		record_call_outcome(Endpoint::CreateEmbedToken, Outcome::Failure);
	}
}
