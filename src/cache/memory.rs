//! Mutex-guarded in-process [`TokenCache`].

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, Secret},
	cache::TokenCache,
	clock::{Clock, SystemClock},
};

/// Thread-safe single-slot cache; critical sections only clone the stored record.
#[derive(Clone)]
pub struct MemoryTokenCache {
	slot: Arc<Mutex<Option<CachedToken>>>,
	clock: Arc<dyn Clock>,
}
impl MemoryTokenCache {
	/// Creates an empty cache reading time from `clock`.
	pub fn new(clock: Arc<dyn Clock>) -> Self {
		Self { slot: Default::default(), clock }
	}
}
impl Default for MemoryTokenCache {
	fn default() -> Self {
		Self::new(Arc::new(SystemClock))
	}
}
impl TokenCache for MemoryTokenCache {
	fn get(&self) -> Option<Secret> {
		let now = self.clock.now();
		let mut slot = self.slot.lock();

		match slot.as_ref() {
			Some(token) if token.is_active_at(now) => Some(token.value.clone()),
			Some(_) => {
				*slot = None;

				None
			},
			None => None,
		}
	}

	fn set(&self, token: Secret, ttl: Duration) {
		let record = CachedToken::new(token, self.clock.now(), ttl);

		*self.slot.lock() = Some(record);
	}

	fn evict(&self) {
		self.slot.lock().take();
	}

	fn peek(&self) -> Option<CachedToken> {
		self.slot.lock().clone()
	}
}
impl Debug for MemoryTokenCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MemoryTokenCache").field("slot", &*self.slot.lock()).finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::clock::ManualClock;

	fn cache_at(start: OffsetDateTime) -> (MemoryTokenCache, ManualClock) {
		let clock = ManualClock::new(start);

		(MemoryTokenCache::new(Arc::new(clock.clone())), clock)
	}

	#[test]
	fn get_returns_token_until_expiry_then_evicts() {
		let (cache, clock) = cache_at(macros::datetime!(2025-06-01 08:00 UTC));

		cache.set(Secret::new("tok-1"), Duration::seconds(60));

		assert_eq!(cache.get().map(|t| t.expose().to_owned()), Some("tok-1".into()));

		clock.advance(Duration::seconds(59));

		assert!(cache.get().is_some());

		clock.advance(Duration::seconds(1));

		assert!(cache.get().is_none());
		assert!(cache.peek().is_none(), "Stale entry should be evicted on read.");
	}

	#[test]
	fn set_overwrites_slot_last_writer_wins() {
		let (cache, _clock) = cache_at(macros::datetime!(2025-06-01 08:00 UTC));

		cache.set(Secret::new("first"), Duration::hours(1));
		cache.set(Secret::new("second"), Duration::minutes(5));

		let record = cache.peek().expect("Slot should hold the second token.");

		assert_eq!(record.value.expose(), "second");
		assert_eq!(record.expires_at, macros::datetime!(2025-06-01 08:05 UTC));
	}

	#[test]
	fn zero_ttl_is_never_served() {
		let (cache, _clock) = cache_at(macros::datetime!(2025-06-01 08:00 UTC));

		cache.set(Secret::new("instant"), Duration::ZERO);

		assert!(cache.get().is_none());
	}

	#[test]
	fn evict_clears_slot() {
		let cache = MemoryTokenCache::default();

		cache.set(Secret::new("gone"), Duration::hours(1));
		cache.evict();

		assert!(cache.get().is_none());
		assert!(cache.peek().is_none());
	}
}
