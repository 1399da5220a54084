//! Service configuration: TOML file plus environment overrides.
//!
//! The file path comes from `UPS_PROXY_CONFIG` (default `ups-proxy.toml`). A missing file is
//! fine when the environment supplies the credentials.
//!
//! ```toml
//! listen_addr = "0.0.0.0:8080"
//! api_key = "legacy-client-key"
//!
//! [carrier]
//! client_id = "..."
//! client_secret = "..."
//! token_endpoint = "https://onlinetools.ups.com/security/v1/oauth/token"
//! rating_endpoint = "https://onlinetools.ups.com/api/rating/v2205"
//! ```
//!
//! Environment overrides: `UPS_PROXY_LISTEN_ADDR`, `UPS_PROXY_API_KEY`, `UPS_CLIENT_ID`,
//! `UPS_CLIENT_SECRET`, `UPS_TOKEN_ENDPOINT`, `UPS_RATING_ENDPOINT`.

// std
use std::{
	io::ErrorKind,
	net::SocketAddr,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, Secret},
	carrier::{CarrierEndpoints, DEFAULT_RATING_ENDPOINT, DEFAULT_TOKEN_ENDPOINT},
	error::ConfigError,
};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "UPS_PROXY_CONFIG";
/// Config file read when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "ups-proxy.toml";
/// Listen address used when neither the file nor the environment sets one.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

const LISTEN_ADDR_ENV: &str = "UPS_PROXY_LISTEN_ADDR";
const API_KEY_ENV: &str = "UPS_PROXY_API_KEY";
const CLIENT_ID_ENV: &str = "UPS_CLIENT_ID";
const CLIENT_SECRET_ENV: &str = "UPS_CLIENT_SECRET";
const TOKEN_ENDPOINT_ENV: &str = "UPS_TOKEN_ENDPOINT";
const RATING_ENDPOINT_ENV: &str = "UPS_RATING_ENDPOINT";

/// Fully resolved service configuration.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
	/// Socket the HTTP surface binds to.
	pub listen_addr: SocketAddr,
	/// Key legacy clients must send in `X-API-Key`; `None` rejects every keyed request.
	pub api_key: Option<Secret>,
	/// Carrier account settings.
	pub carrier: CarrierConfig,
}
impl ServiceConfig {
	/// Loads the config file named by `UPS_PROXY_CONFIG` and applies process environment overrides.
	pub fn load() -> Result<Self, ConfigError> {
		let path = Self::config_path();
		let file = read_optional(&path)?;

		Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
	}

	/// Path the config file is read from.
	pub fn config_path() -> PathBuf {
		std::env::var_os(CONFIG_PATH_ENV)
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
	}

	/// Resolves configuration from optional TOML text and an environment lookup.
	///
	/// Environment values win over file values; blank values count as unset.
	pub fn from_sources<F>(toml_text: Option<&str>, env: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let file: FileConfig = match toml_text {
			Some(text) => toml::from_str(text)?,
			None => FileConfig::default(),
		};
		let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());
		let listen_raw = lookup(LISTEN_ADDR_ENV)
			.or(file.listen_addr)
			.unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
		let listen_addr = listen_raw
			.trim()
			.parse::<SocketAddr>()
			.map_err(|source| ConfigError::InvalidListenAddr { value: listen_raw.clone(), source })?;
		let api_key =
			lookup(API_KEY_ENV).map(Secret::new).or(file.api_key).filter(|key| !key.is_blank());
		let client_id = lookup(CLIENT_ID_ENV)
			.or(file.carrier.client_id)
			.filter(|value| !value.trim().is_empty())
			.ok_or(ConfigError::MissingValue { field: "carrier.client_id", env: CLIENT_ID_ENV })?;
		let client_secret = lookup(CLIENT_SECRET_ENV)
			.map(Secret::new)
			.or(file.carrier.client_secret)
			.filter(|value| !value.is_blank())
			.ok_or(ConfigError::MissingValue {
				field: "carrier.client_secret",
				env: CLIENT_SECRET_ENV,
			})?;
		let token_endpoint = lookup(TOKEN_ENDPOINT_ENV)
			.or(file.carrier.token_endpoint)
			.unwrap_or_else(|| DEFAULT_TOKEN_ENDPOINT.to_owned());
		let rating_endpoint = lookup(RATING_ENDPOINT_ENV)
			.or(file.carrier.rating_endpoint)
			.unwrap_or_else(|| DEFAULT_RATING_ENDPOINT.to_owned());
		let endpoints = CarrierEndpoints::parse(&token_endpoint, &rating_endpoint)?;

		Ok(Self {
			listen_addr,
			api_key,
			carrier: CarrierConfig {
				credentials: Credentials::new(client_id, client_secret.expose()),
				endpoints,
			},
		})
	}
}

/// Carrier account settings.
#[derive(Clone, Debug)]
pub struct CarrierConfig {
	/// Client-credentials pair.
	pub credentials: Credentials,
	/// Token + rating endpoints.
	pub endpoints: CarrierEndpoints,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
	listen_addr: Option<String>,
	api_key: Option<Secret>,
	carrier: FileCarrierConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileCarrierConfig {
	client_id: Option<String>,
	client_secret: Option<Secret>,
	token_endpoint: Option<String>,
	rating_endpoint: Option<String>,
}

fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
	match std::fs::read_to_string(path) {
		Ok(text) => Ok(Some(text)),
		Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
		Err(source) => Err(ConfigError::Read { path: path.to_owned(), source }),
	}
}
