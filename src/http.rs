//! Shared HTTP transport for carrier calls.
//!
//! Both the token exchange and the rating call go through [`CarrierHttpClient`], a thin
//! wrapper around [`ReqwestClient`] so connection pooling and TLS setup live in one place.
//! Carrier endpoints answer directly; redirects are never followed.

// std
use std::ops::Deref;
// crates.io
use reqwest::{Response, redirect::Policy};
// self
use crate::{_prelude::*, error::ConfigError};

/// Thin wrapper around [`ReqwestClient`] shared by the provider and the rate client.
#[derive(Clone, Debug)]
pub struct CarrierHttpClient(pub ReqwestClient);
impl CarrierHttpClient {
	/// Builds the default client: no redirects, rustls TLS.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(Policy::none())
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for CarrierHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for CarrierHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Status + body of a carrier response, read eagerly so error paths can log the body.
#[derive(Clone, Debug)]
pub struct CarrierResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: String,
}
impl CarrierResponse {
	/// Drains a reqwest response into memory.
	pub async fn read(response: Response) -> Result<Self, ReqwestError> {
		let status = response.status().as_u16();
		let body = response.text().await?;

		Ok(Self { status, body })
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_client_builds() {
		CarrierHttpClient::new().expect("Default carrier client should build.");
	}

	#[test]
	fn success_range_is_2xx_only() {
		let ok = CarrierResponse { status: 204, body: String::new() };
		let redirect = CarrierResponse { status: 302, body: String::new() };
		let rejected = CarrierResponse { status: 401, body: "denied".into() };

		assert!(ok.is_success());
		assert!(!redirect.is_success());
		assert!(!rejected.is_success());
	}
}
