//! Shipping-rate proxy for a legacy client: authenticates against the carrier once, caches the
//! bearer token, forwards rate queries, and reshapes the XML reply into compact JSON.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod carrier;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
pub mod rate;
pub mod server;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::net::SocketAddr;
	// self
	use crate::{
		auth::{Credentials, Secret},
		cache::{MemoryTokenCache, TokenCache},
		carrier::CarrierEndpoints,
		clock::Clock,
		config::{CarrierConfig, ServiceConfig},
		error::AuthError,
		http::CarrierHttpClient,
		provider::{AccessTokenSource, TokenFuture, TokenProvider},
		server::AppState,
	};

	/// Client identifier used by test stacks.
	pub const TEST_CLIENT_ID: &str = "test-client";
	/// Client secret used by test stacks.
	pub const TEST_CLIENT_SECRET: &str = "test-secret";
	/// API key configured on test stacks.
	pub const TEST_API_KEY: &str = "test-api-key";

	/// Builds a carrier client that accepts the self-signed certificates of local mock servers.
	pub fn test_http_client() -> CarrierHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		CarrierHttpClient::with_client(client)
	}

	/// Builds a provider for `token_endpoint` backed by a fresh in-memory cache on `clock`.
	pub fn build_test_provider(
		token_endpoint: &str,
		clock: Arc<dyn Clock>,
	) -> (TokenProvider, Arc<MemoryTokenCache>) {
		let cache_backend = Arc::new(MemoryTokenCache::new(clock));
		let cache: Arc<dyn TokenCache> = cache_backend.clone();
		let endpoint = Url::parse(token_endpoint).expect("Test token endpoint should parse.");
		let provider = TokenProvider::new(
			test_http_client(),
			cache,
			endpoint,
			Credentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET),
		);

		(provider, cache_backend)
	}

	/// Service configuration pointing at mock carrier endpoints.
	pub fn test_config(token_endpoint: &str, rating_endpoint: &str) -> ServiceConfig {
		let endpoints = CarrierEndpoints::parse(token_endpoint, rating_endpoint)
			.expect("Test carrier endpoints should validate.");

		ServiceConfig {
			listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
			api_key: Some(Secret::new(TEST_API_KEY)),
			carrier: CarrierConfig {
				credentials: Credentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET),
				endpoints,
			},
		}
	}

	/// Wires an [`AppState`] for `config` using the test HTTP client.
	pub fn build_test_state(config: &ServiceConfig, clock: Arc<dyn Clock>) -> AppState {
		AppState::assemble(test_http_client(), config, clock)
	}

	/// Token source that always yields the same bearer token.
	#[derive(Clone, Debug)]
	pub struct StaticTokenSource(pub Secret);
	impl AccessTokenSource for StaticTokenSource {
		fn access_token(&self) -> TokenFuture<'_> {
			let token = self.0.clone();

			Box::pin(async move { Ok(token) })
		}
	}

	/// Token source that always fails as if the carrier rejected the credentials.
	#[derive(Clone, Debug)]
	pub struct RejectingTokenSource;
	impl AccessTokenSource for RejectingTokenSource {
		fn access_token(&self) -> TokenFuture<'_> {
			Box::pin(async {
				Err(AuthError::Rejected { status: 401, detail: "invalid_client".into() })
			})
		}
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
use color_eyre as _;
#[cfg(test)] use {httpmock as _, tower as _, ups_rate_proxy as _};
