//! `X-API-Key` gate placed in front of every `/api` route.

// crates.io
use axum::{
	extract::{Request, State},
	http::{HeaderMap, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
// self
use crate::{_prelude::*, auth::Secret};

/// Header legacy clients put their key in.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Result of checking a request's headers against the configured key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCheck {
	/// Header carries the configured key.
	Accepted,
	/// Header is absent.
	Missing,
	/// Header is present but wrong, unreadable, or no key is configured.
	Invalid,
}

/// Expected API key shared with the middleware.
#[derive(Clone, Debug, Default)]
pub struct ApiKeyGate {
	expected: Option<Arc<Secret>>,
}
impl ApiKeyGate {
	/// Creates a gate; `None` means no key is configured and every keyed request is refused.
	pub fn new(expected: Option<Secret>) -> Self {
		Self { expected: expected.map(Arc::new) }
	}

	/// Classifies the request headers.
	pub fn check(&self, headers: &HeaderMap) -> KeyCheck {
		let Some(presented) = headers.get(API_KEY_HEADER) else {
			return KeyCheck::Missing;
		};

		match &self.expected {
			Some(expected) if bool::from(presented.as_bytes().ct_eq(expected.expose().as_bytes())) =>
				KeyCheck::Accepted,
			_ => KeyCheck::Invalid,
		}
	}
}

/// Rejects requests without the configured key: 401 when absent, 403 when wrong.
pub async fn require_api_key(
	State(gate): State<ApiKeyGate>,
	request: Request,
	next: Next,
) -> Response {
	match gate.check(request.headers()) {
		KeyCheck::Accepted => next.run(request).await,
		KeyCheck::Missing => {
			tracing::info!(uri = %request.uri(), "Rejected request without an API key.");

			(StatusCode::UNAUTHORIZED, "API Key is missing").into_response()
		},
		KeyCheck::Invalid => {
			tracing::info!(uri = %request.uri(), "Rejected request with an invalid API key.");

			(StatusCode::FORBIDDEN, "Invalid or missing API Key").into_response()
		},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use axum::http::HeaderValue;
	// self
	use super::*;

	fn headers(value: Option<&'static [u8]>) -> HeaderMap {
		let mut map = HeaderMap::new();

		if let Some(raw) = value {
			map.insert(
				API_KEY_HEADER,
				HeaderValue::from_bytes(raw).expect("Header fixture should be valid."),
			);
		}

		map
	}

	#[test]
	fn classifies_headers() {
		let gate = ApiKeyGate::new(Some(Secret::new("right")));

		assert_eq!(gate.check(&headers(Some(b"right"))), KeyCheck::Accepted);
		assert_eq!(gate.check(&headers(None)), KeyCheck::Missing);
		assert_eq!(gate.check(&headers(Some(b"wrong"))), KeyCheck::Invalid);
		assert_eq!(gate.check(&headers(Some(b""))), KeyCheck::Invalid);
		assert_eq!(gate.check(&headers(Some(b"\xffright"))), KeyCheck::Invalid);
	}

	#[test]
	fn near_misses_are_invalid() {
		let gate = ApiKeyGate::new(Some(Secret::new("legacy-key-01")));

		assert_eq!(gate.check(&headers(Some(b"legacy-key-01"))), KeyCheck::Accepted);
		assert_eq!(gate.check(&headers(Some(b"legacy-key-02"))), KeyCheck::Invalid);
		assert_eq!(gate.check(&headers(Some(b"legacy-key-0"))), KeyCheck::Invalid);
		assert_eq!(gate.check(&headers(Some(b"legacy-key-011"))), KeyCheck::Invalid);
		assert_eq!(gate.check(&headers(Some(b"LEGACY-KEY-01"))), KeyCheck::Invalid);
	}

	#[test]
	fn unconfigured_gate_refuses_every_key() {
		let gate = ApiKeyGate::default();

		assert_eq!(gate.check(&headers(Some(b"anything"))), KeyCheck::Invalid);
		assert_eq!(gate.check(&headers(None)), KeyCheck::Missing);
	}
}
