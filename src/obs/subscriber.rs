// crates.io
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "ups_rate_proxy=info,tower_http=info";

/// Output format for the global subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
	/// Human-readable lines.
	#[default]
	Pretty,
	/// One JSON object per event.
	Json,
}
impl LogFormat {
	/// Reads `UPS_PROXY_LOG_FORMAT`; anything other than `json` selects [`LogFormat::Pretty`].
	pub fn from_env() -> Self {
		match std::env::var("UPS_PROXY_LOG_FORMAT") {
			Ok(value) if value.eq_ignore_ascii_case("json") => Self::Json,
			_ => Self::Pretty,
		}
	}
}

/// Installs the global `fmt` subscriber. `RUST_LOG` overrides the default filter.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_subscriber(format: LogFormat) -> bool {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	match format {
		LogFormat::Json => fmt().json().with_env_filter(filter).with_target(true).try_init().is_ok(),
		LogFormat::Pretty => fmt().with_env_filter(filter).with_target(true).try_init().is_ok(),
	}
}
