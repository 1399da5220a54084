//! Token endpoint response model.

// crates.io
use serde::{Deserializer, de::Error as _};
// self
use crate::{_prelude::*, auth::Secret, error::AuthError};

/// Successful client-credentials response.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Bearer token to present on rating calls.
	#[serde(deserialize_with = "non_blank_secret")]
	pub access_token: Secret,
	/// Advertised lifetime in seconds; the carrier encodes it as a string.
	#[serde(deserialize_with = "seconds_from_number_or_string")]
	pub expires_in: u64,
	/// Token type hint, normally `Bearer`.
	#[serde(default)]
	pub token_type: Option<String>,
}
impl TokenResponse {
	/// Parses a response body, reporting the failing JSON path on error.
	pub fn parse(status: u16, body: &str) -> Result<Self, AuthError> {
		let mut de = serde_json::Deserializer::from_str(body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| AuthError::TokenResponseParse { source, status })
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
	Number(u64),
	Text(String),
}

fn seconds_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: Deserializer<'de>,
{
	match Seconds::deserialize(deserializer)? {
		Seconds::Number(value) => Ok(value),
		Seconds::Text(raw) => raw
			.trim()
			.parse::<u64>()
			.map_err(|_| D::Error::custom(format!("expected a non-negative integer, got `{raw}`"))),
	}
}

fn non_blank_secret<'de, D>(deserializer: D) -> Result<Secret, D::Error>
where
	D: Deserializer<'de>,
{
	let secret = Secret::deserialize(deserializer)?;

	if secret.is_blank() {
		return Err(D::Error::custom("access_token must not be empty"));
	}

	Ok(secret)
}
