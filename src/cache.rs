//! Token cache contract and the built-in single-slot implementation.

pub mod memory;

pub use memory::MemoryTokenCache;

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, Secret},
};

/// Single-slot cache for the carrier bearer token.
///
/// Each call is atomic on its own; callers must not assume a `get` followed by a `set`
/// happens without interleaving from other tasks.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Returns the cached token iff present and unexpired. Stale entries may be evicted.
	fn get(&self) -> Option<Secret>;

	/// Overwrites the slot with `token`, usable for `ttl` from now. Last writer wins.
	fn set(&self, token: Secret, ttl: Duration);

	/// Drops whatever the slot currently holds.
	fn evict(&self);

	/// Returns the raw slot contents, expired or not.
	fn peek(&self) -> Option<CachedToken>;
}
