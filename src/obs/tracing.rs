// self
use crate::{_prelude::*, endpoint::Endpoint};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFuture<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFuture<F> = F;

/// A span builder used by the issuer.
#[derive(Clone, Debug)]
pub struct IssueSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl IssueSpan {
	/// Span covering one whole issuance, tagged with the issuer environment.
	pub fn issue(environment: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("authkit.issue", environment);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = environment;

			Self {}
		}
	}

	/// Span covering a single remote call.
	pub fn call(endpoint: Endpoint) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!(
				"authkit.call",
				endpoint = endpoint.as_str(),
				method = endpoint.method().as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = endpoint;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFuture<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `warn` event describing a failed issuance.
pub fn warn_issue_failure(error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			endpoint = error.endpoint().map(|endpoint| endpoint.as_str()),
			status = error.status_code(),
			"embed token issuance failed: {error}"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}
