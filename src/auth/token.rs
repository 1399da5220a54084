//! Cached bearer token record and lifecycle helpers.

// self
use crate::{_prelude::*, auth::Secret};

/// Lifecycle status of a cached token at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token may still be presented to the carrier.
	Active,
	/// Token reached its cache expiry and must be replaced.
	Expired,
}

/// Single bearer token held by the token cache.
///
/// `expires_at` is the cache expiry, which already includes the safety margin applied by
/// the provider, so a token is usable only while `now < expires_at`.
#[derive(Clone, Serialize, Deserialize)]
pub struct CachedToken {
	/// Bearer token value; callers must avoid logging it.
	pub value: Secret,
	/// Instant the token was installed in the cache.
	pub issued_at: OffsetDateTime,
	/// Instant from which the token is no longer served from the cache.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Builds a record that stays usable for `ttl` after `issued_at`.
	///
	/// Negative TTLs are floored to zero, producing a record that is already expired at
	/// `issued_at`.
	pub fn new(value: Secret, issued_at: OffsetDateTime, ttl: Duration) -> Self {
		let ttl = if ttl.is_negative() { Duration::ZERO } else { ttl };

		Self { value, issued_at, expires_at: issued_at + ttl }
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant >= self.expires_at { TokenStatus::Expired } else { TokenStatus::Active }
	}

	/// Returns `true` if the token can be served at the provided instant.
	pub fn is_active_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Active)
	}

	/// Remaining lifetime at the provided instant, never negative.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("value", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn status_flips_at_expiry() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let token = CachedToken::new(Secret::new("access"), issued, Duration::minutes(55));

		assert_eq!(token.expires_at, macros::datetime!(2025-01-01 00:55 UTC));
		assert_eq!(token.status_at(macros::datetime!(2025-01-01 00:54:59 UTC)), TokenStatus::Active);
		assert_eq!(token.status_at(macros::datetime!(2025-01-01 00:55 UTC)), TokenStatus::Expired);
		assert_eq!(
			token.remaining_at(macros::datetime!(2025-01-01 00:50 UTC)),
			Duration::minutes(5)
		);
	}

	#[test]
	fn negative_ttl_is_floored_to_zero() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let token = CachedToken::new(Secret::new("short"), issued, Duration::seconds(-100));

		assert_eq!(token.expires_at, issued);
		assert!(!token.is_active_at(issued));
		assert_eq!(token.remaining_at(issued - Duration::hours(1)), Duration::hours(1));
		assert_eq!(token.remaining_at(issued + Duration::hours(1)), Duration::ZERO);
	}

	#[test]
	fn debug_redacts_value() {
		let token = CachedToken::new(
			Secret::new("bearer-value"),
			macros::datetime!(2025-01-01 00:00 UTC),
			Duration::hours(1),
		);

		assert!(!format!("{token:?}").contains("bearer-value"));
	}
}
