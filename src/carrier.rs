//! Carrier endpoint set (token + rating) and its validating builder.
//!
//! Endpoints must use HTTPS. Plain HTTP is only accepted for loopback hosts so local
//! mock carriers can stand in during development and tests.

// std
use std::net::IpAddr;
// self
use crate::_prelude::*;

/// Production OAuth token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://onlinetools.ups.com/security/v1/oauth/token";
/// Production rating endpoint.
pub const DEFAULT_RATING_ENDPOINT: &str = "https://onlinetools.ups.com/api/rating/v2205";

/// Errors raised while constructing or validating carrier endpoints.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CarrierEndpointsError {
	/// Endpoint string could not be parsed as a URL.
	#[error("The {endpoint} endpoint is not a valid URL: {message}.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Parser message.
		message: String,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Validated endpoints the proxy talks to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CarrierEndpoints {
	/// OAuth client-credentials token endpoint.
	pub token: Url,
	/// Rating endpoint receiving XML rate requests.
	pub rating: Url,
}
impl CarrierEndpoints {
	/// Creates a builder seeded with the production endpoints.
	pub fn builder() -> CarrierEndpointsBuilder {
		CarrierEndpointsBuilder::default()
	}

	/// Parses and validates both endpoints from strings.
	pub fn parse(token: &str, rating: &str) -> Result<Self, CarrierEndpointsError> {
		Self::builder()
			.token_endpoint(parse_url("token", token)?)
			.rating_endpoint(parse_url("rating", rating)?)
			.build()
	}

	fn validate(&self) -> Result<(), CarrierEndpointsError> {
		ensure_secure("token", &self.token)?;
		ensure_secure("rating", &self.rating)?;

		Ok(())
	}
}
impl Default for CarrierEndpoints {
	fn default() -> Self {
		Self {
			token: Url::parse(DEFAULT_TOKEN_ENDPOINT)
				.unwrap_or_else(|_| unreachable!("Default token endpoint is a valid URL.")),
			rating: Url::parse(DEFAULT_RATING_ENDPOINT)
				.unwrap_or_else(|_| unreachable!("Default rating endpoint is a valid URL.")),
		}
	}
}

/// Builder for [`CarrierEndpoints`] values.
#[derive(Debug)]
pub struct CarrierEndpointsBuilder {
	/// Token endpoint used for the client-credentials exchange.
	pub token_endpoint: Url,
	/// Rating endpoint used for quotes.
	pub rating_endpoint: Url,
}
impl CarrierEndpointsBuilder {
	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = url;

		self
	}

	/// Sets the rating endpoint.
	pub fn rating_endpoint(mut self, url: Url) -> Self {
		self.rating_endpoint = url;

		self
	}

	/// Consumes the builder and validates the resulting endpoint set.
	pub fn build(self) -> Result<CarrierEndpoints, CarrierEndpointsError> {
		let endpoints =
			CarrierEndpoints { token: self.token_endpoint, rating: self.rating_endpoint };

		endpoints.validate()?;

		Ok(endpoints)
	}
}
impl Default for CarrierEndpointsBuilder {
	fn default() -> Self {
		let defaults = CarrierEndpoints::default();

		Self { token_endpoint: defaults.token, rating_endpoint: defaults.rating }
	}
}

fn parse_url(endpoint: &'static str, raw: &str) -> Result<Url, CarrierEndpointsError> {
	Url::parse(raw.trim())
		.map_err(|e| CarrierEndpointsError::InvalidUrl { endpoint, message: e.to_string() })
}

fn ensure_secure(endpoint: &'static str, url: &Url) -> Result<(), CarrierEndpointsError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(CarrierEndpointsError::InsecureEndpoint { endpoint, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host_str() {
		Some("localhost") => true,
		Some(host) => host
			.trim_start_matches('[')
			.trim_end_matches(']')
			.parse::<IpAddr>()
			.map(|ip| ip.is_loopback())
			.unwrap_or(false),
		None => false,
	}
}
