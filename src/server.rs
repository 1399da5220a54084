//! HTTP surface: `POST /api/ups/rates` behind the API-key gate, plus `GET /healthz`.

pub mod api_key;
pub mod handlers;

pub use api_key::*;
pub use handlers::*;

// crates.io
use axum::{
	Router, middleware,
	routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
// self
use crate::{
	_prelude::*,
	cache::{MemoryTokenCache, TokenCache},
	clock::{Clock, SystemClock},
	config::ServiceConfig,
	error::ConfigError,
	http::CarrierHttpClient,
	provider::TokenProvider,
	rate::RateClient,
};

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
	/// Rate client backed by the process-wide token provider.
	pub rates: Arc<RateClient>,
	/// Expected API key.
	pub api_key: ApiKeyGate,
}
impl AppState {
	/// Wires the production stack: system clock, in-memory cache, default HTTP client.
	pub fn from_config(config: &ServiceConfig) -> Result<Self, ConfigError> {
		Ok(Self::assemble(CarrierHttpClient::new()?, config, Arc::new(SystemClock)))
	}

	/// Wires the stack from explicit collaborators.
	pub fn assemble(
		http_client: CarrierHttpClient,
		config: &ServiceConfig,
		clock: Arc<dyn Clock>,
	) -> Self {
		let cache: Arc<dyn TokenCache> = Arc::new(MemoryTokenCache::new(clock));
		let provider = TokenProvider::new(
			http_client.clone(),
			cache,
			config.carrier.endpoints.token.clone(),
			config.carrier.credentials.clone(),
		);
		let rates =
			RateClient::new(http_client, Arc::new(provider), config.carrier.endpoints.rating.clone());

		Self { rates: Arc::new(rates), api_key: ApiKeyGate::new(config.api_key.clone()) }
	}
}

/// Builds the router.
pub fn router(state: AppState) -> Router {
	let api = Router::new()
		.route("/api/ups/rates", post(handlers::quote_rates))
		.route_layer(middleware::from_fn_with_state(
			state.api_key.clone(),
			api_key::require_api_key,
		));

	Router::new()
		.route("/healthz", get(handlers::health))
		.merge(api)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

/// Binds `config.listen_addr` and serves until Ctrl-C or SIGTERM.
pub async fn serve(config: ServiceConfig) -> Result<()> {
	let state = AppState::from_config(&config)?;
	let listener = TcpListener::bind(config.listen_addr).await?;

	if config.api_key.is_none() {
		tracing::warn!("No API key configured; every API request will be refused.");
	}

	tracing::info!(addr = %listener.local_addr()?, "Rate proxy listening.");

	axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;

	tracing::info!("Rate proxy stopped.");

	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "Failed to listen for Ctrl-C.");
			std::future::pending::<()>().await;
		}
	};
	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			},
			Err(e) => {
				tracing::error!(error = %e, "Failed to listen for SIGTERM.");
				std::future::pending::<()>().await;
			},
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	tracing::info!("Shutdown signal received.");
}
