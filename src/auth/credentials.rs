//! Carrier client credentials used for the client-credentials grant.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::Secret};

/// Client identifier + secret pair issued by the carrier.
///
/// Loaded once at startup and immutable afterwards. Neither field is ever rendered by
/// `Debug`; the identifier is not secret on its own but is kept out of logs alongside
/// the secret it pairs with.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	client_id: String,
	client_secret: Secret,
}
impl Credentials {
	/// Builds a credential pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: Secret::new(client_secret) }
	}

	/// Returns the client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Returns the client secret.
	pub fn client_secret(&self) -> &Secret {
		&self.client_secret
	}

	/// Renders the HTTP Basic `Authorization` value: `Basic base64(client_id:client_secret)`.
	pub fn basic_authorization(&self) -> Secret {
		let raw = format!("{}:{}", self.client_id, self.client_secret.expose());

		Secret::new(format!("Basic {}", STANDARD.encode(raw)))
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &"<redacted>")
			.field("client_secret", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn basic_authorization_encodes_pair() {
		let credentials = Credentials::new("Aladdin", "open sesame");

		assert_eq!(
			credentials.basic_authorization().expose(),
			"Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
		);
	}

	#[test]
	fn debug_hides_both_fields() {
		let rendered = format!("{:?}", Credentials::new("client-123", "secret-456"));

		assert!(!rendered.contains("client-123"));
		assert!(!rendered.contains("secret-456"));
	}
}
