//! Time source used to stamp embed-token expiry.

// self
use crate::_prelude::*;

/// Supplies the current instant.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Returns the current UTC instant.
	fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time via [`OffsetDateTime::now_utc`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Clock frozen at a single instant; handy for deterministic tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub OffsetDateTime);
impl Clock for FixedClock {
	fn now(&self) -> OffsetDateTime {
		self.0
	}
}

/// Milliseconds since the Unix epoch for `instant`.
pub fn unix_millis(instant: OffsetDateTime) -> i64 {
	(instant.unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn fixed_clock_reports_its_instant() {
		let instant = datetime!(2025-01-02 03:04:05.678 UTC);

		assert_eq!(FixedClock(instant).now(), instant);
		assert_eq!(unix_millis(instant), 1_735_787_045_678);
	}

	#[test]
	fn system_clock_moves_forward() {
		let clock = SystemClock;
		let first = clock.now();

		assert!(clock.now() >= first);
	}
}
