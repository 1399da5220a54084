//! Proxy-level error types shared by the token provider, rate client, and HTTP surface.

// std
use std::{net::AddrParseError, path::PathBuf};
// self
use crate::{_prelude::*, carrier::CarrierEndpointsError, rate::QueryError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Credential exchange failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Rate quote could not be produced.
	#[error(transparent)]
	Rate(#[from] RateError),
	/// Inbound rate query failed validation.
	#[error(transparent)]
	Query(#[from] QueryError),
	/// Listener or runtime I/O failure.
	#[error("I/O error: {0}.")]
	Io(#[from] std::io::Error),
}

/// Configuration and validation failures raised at startup.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Config file exists but could not be read.
	#[error("Config file {path:?} could not be read.")]
	Read {
		/// Path that failed to load.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// Config file is not valid TOML for [`crate::config::ServiceConfig`].
	#[error("Config file is invalid.")]
	Parse(#[from] toml::de::Error),
	/// Required value was supplied neither by the file nor the environment.
	#[error("Missing required config value `{field}` (env `{env}`).")]
	MissingValue {
		/// Config key.
		field: &'static str,
		/// Environment override name.
		env: &'static str,
	},
	/// Carrier endpoints failed validation.
	#[error(transparent)]
	InvalidEndpoint(#[from] CarrierEndpointsError),
	/// Listen address cannot be parsed.
	#[error("Listen address `{value}` is invalid.")]
	InvalidListenAddr {
		/// Raw value supplied.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: AddrParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Credential exchange failures. Carrier detail is kept for logs, never for `Display`.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint rejected the client-credentials exchange with HTTP {status}.")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Raw carrier response body, for diagnostics only.
		detail: String,
	},
	/// Token endpoint responded with a body that is not a token response.
	#[error("Token endpoint returned a malformed token response.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code.
		status: u16,
	},
	/// Token endpoint advertised a lifetime that does not fit in a duration.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Network failure while calling the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Broad reason a rate quote failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateFailureCause {
	/// No bearer token could be obtained.
	Auth,
	/// Rating endpoint answered with a non-success status.
	CarrierRejected,
	/// Rating endpoint body could not be interpreted.
	Malformed,
	/// Request could not be built or delivered.
	Transport,
}

/// Failures raised while producing a rate quote.
#[derive(Debug, ThisError)]
pub enum RateError {
	/// Token acquisition failed; carries the original [`AuthError`].
	#[error("{0}")]
	Auth(#[from] AuthError),
	/// Rating endpoint answered with a non-success status.
	#[error("Rating endpoint rejected the request with HTTP {status}.")]
	CarrierRejected {
		/// HTTP status code.
		status: u16,
		/// Raw carrier response body, for diagnostics only.
		detail: String,
	},
	/// Rating endpoint body is not a parseable rate response.
	#[error("Rating endpoint returned a malformed rate response.")]
	Malformed {
		/// XML decoding failure.
		#[source]
		source: quick_xml::DeError,
	},
	/// Rate request document could not be serialized.
	#[error("Rate request could not be encoded: {message}.")]
	RequestEncode {
		/// Serializer message.
		message: String,
	},
	/// Network failure while calling the rating endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl RateError {
	/// Classifies the failure.
	pub fn cause(&self) -> RateFailureCause {
		match self {
			Self::Auth(_) => RateFailureCause::Auth,
			Self::CarrierRejected { .. } => RateFailureCause::CarrierRejected,
			Self::Malformed { .. } => RateFailureCause::Malformed,
			Self::RequestEncode { .. } | Self::Transport(_) => RateFailureCause::Transport,
		}
	}

	/// HTTP status reported by the carrier, when the failure came from a response.
	pub fn carrier_status(&self) -> Option<u16> {
		match self {
			Self::Auth(AuthError::Rejected { status, .. })
			| Self::Auth(AuthError::TokenResponseParse { status, .. })
			| Self::CarrierRejected { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Generic message safe to return to external callers.
	pub fn public_message(&self) -> &'static str {
		match self.cause() {
			RateFailureCause::Auth => "Carrier authentication failed.",
			_ => "Carrier rate request failed.",
		}
	}
}

/// Transport-level failures (network, TLS, body streaming).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the carrier.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
