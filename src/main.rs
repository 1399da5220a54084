//! Entry point for the `ups-rate-proxy` service.

// crates.io
use color_eyre::Result;
// self
use ups_rate_proxy::{
	config::ServiceConfig,
	obs::{self, LogFormat},
	server,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	obs::init_subscriber(LogFormat::from_env());

	let config = ServiceConfig::load().inspect_err(|e| {
		tracing::error!(
			path = %ServiceConfig::config_path().display(),
			error = %e,
			"Failed to load configuration."
		);
	})?;

	server::serve(config).await?;

	Ok(())
}
