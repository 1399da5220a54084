//! Token provider: cache lookup, client-credentials exchange on miss, and cache refill.
//!
//! [`TokenProvider::get_valid_token`] returns the cached bearer token without touching the
//! network while it is fresh. On a miss it performs a single client-credentials exchange
//! (HTTP Basic auth), subtracts [`SAFETY_MARGIN`] from the advertised lifetime, and stores
//! the result. Concurrent misses queue behind one async guard and re-check the cache before
//! exchanging, so a burst of requests triggers one exchange. Failures are never cached and
//! never retried here.

pub mod response;

pub use response::*;

// crates.io
use reqwest::header::{ACCEPT, AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, Secret},
	cache::TokenCache,
	error::{AuthError, TransportError},
	http::{CarrierHttpClient, CarrierResponse},
	obs::{FlowKind, FlowSpan},
};

/// Lifetime trimmed from every advertised token lifetime before caching.
pub const SAFETY_MARGIN: Duration = Duration::seconds(300);

/// Largest advertised lifetime accepted from the carrier (about 68 years).
const MAX_EXPIRES_IN: u64 = i32::MAX as u64;

/// Boxed future returned by [`AccessTokenSource::access_token`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<Secret, AuthError>> + 'a + Send>>;

/// Anything able to hand out a currently valid bearer token.
pub trait AccessTokenSource
where
	Self: Send + Sync,
{
	/// Resolves a bearer token usable right now.
	fn access_token(&self) -> TokenFuture<'_>;
}

/// Computes the cache TTL for an advertised lifetime, floored at zero.
pub fn cache_ttl(expires_in: u64) -> Result<Duration, AuthError> {
	if expires_in > MAX_EXPIRES_IN {
		return Err(AuthError::ExpiresInOutOfRange);
	}

	let advertised =
		Duration::seconds(i64::try_from(expires_in).map_err(|_| AuthError::ExpiresInOutOfRange)?);
	let ttl = advertised - SAFETY_MARGIN;

	Ok(if ttl.is_negative() { Duration::ZERO } else { ttl })
}

/// Orchestrates cache lookups and client-credentials exchanges for one carrier account.
pub struct TokenProvider {
	http_client: CarrierHttpClient,
	cache: Arc<dyn TokenCache>,
	token_endpoint: Url,
	credentials: Credentials,
	exchange_guard: AsyncMutex<()>,
}
impl TokenProvider {
	/// Creates a provider exchanging `credentials` at `token_endpoint` and filling `cache`.
	pub fn new(
		http_client: CarrierHttpClient,
		cache: Arc<dyn TokenCache>,
		token_endpoint: Url,
		credentials: Credentials,
	) -> Self {
		Self {
			http_client,
			cache,
			token_endpoint,
			credentials,
			exchange_guard: AsyncMutex::new(()),
		}
	}

	/// Cache the provider reads from and writes to.
	pub fn cache(&self) -> &Arc<dyn TokenCache> {
		&self.cache
	}

	/// Returns a valid bearer token, exchanging credentials only on a cache miss.
	pub async fn get_valid_token(&self) -> Result<Secret, AuthError> {
		if let Some(token) = self.cache.get() {
			return Ok(token);
		}

		FlowSpan::new(FlowKind::TokenExchange, "get_valid_token")
			.observe(async {
				let _singleflight = self.exchange_guard.lock().await;

				if let Some(token) = self.cache.get() {
					tracing::debug!("Token cache was refilled while waiting for the exchange guard.");

					return Ok(token);
				}

				let grant = self.exchange().await?;
				let ttl = cache_ttl(grant.expires_in)?;

				if ttl.is_zero() {
					tracing::warn!(
						expires_in = grant.expires_in,
						"Carrier token lifetime is within the safety margin; it will not be reused."
					);
				}

				self.cache.set(grant.access_token.clone(), ttl);

				tracing::info!(ttl_secs = ttl.whole_seconds(), "Cached a fresh carrier access token.");

				Ok(grant.access_token)
			})
			.await
	}

	async fn exchange(&self) -> Result<TokenResponse, AuthError> {
		let response = self
			.http_client
			.post(self.token_endpoint.clone())
			.header(AUTHORIZATION, self.credentials.basic_authorization().expose())
			.header(ACCEPT, "application/json")
			.form(&[("grant_type", "client_credentials")])
			.send()
			.await
			.map_err(|e| {
				tracing::error!(error = %e, "Token endpoint could not be reached.");

				TransportError::from(e)
			})?;
		let response = CarrierResponse::read(response).await.map_err(TransportError::from)?;

		if !response.is_success() {
			tracing::error!(
				status = response.status,
				detail = %response.body,
				"Carrier rejected the client-credentials exchange."
			);

			return Err(AuthError::Rejected { status: response.status, detail: response.body });
		}

		TokenResponse::parse(response.status, &response.body).inspect_err(|e| {
			if let AuthError::TokenResponseParse { source, status } = e {
				tracing::error!(status, error = %source, "Carrier token response is malformed.");
			}
		})
	}
}
impl AccessTokenSource for TokenProvider {
	fn access_token(&self) -> TokenFuture<'_> {
		Box::pin(self.get_valid_token())
	}
}
impl Debug for TokenProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("token_endpoint", &self.token_endpoint)
			.field("credentials", &self.credentials)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn ttl_subtracts_safety_margin() {
		assert_eq!(cache_ttl(3600).expect("3600s should be in range."), Duration::seconds(3300));
		assert_eq!(cache_ttl(301).expect("301s should be in range."), Duration::seconds(1));
	}

	#[test]
	fn ttl_floors_at_zero_inside_margin() {
		assert_eq!(cache_ttl(300).expect("300s should be in range."), Duration::ZERO);
		assert_eq!(cache_ttl(200).expect("200s should be in range."), Duration::ZERO);
		assert_eq!(cache_ttl(0).expect("0s should be in range."), Duration::ZERO);
	}

	#[test]
	fn ttl_rejects_absurd_lifetimes() {
		assert!(matches!(cache_ttl(u64::MAX), Err(AuthError::ExpiresInOutOfRange)));
		assert!(cache_ttl(MAX_EXPIRES_IN).is_ok());
	}
}
