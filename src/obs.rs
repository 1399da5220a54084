//! Logging and metrics for the two outbound carrier calls.
//!
//! Token exchanges and rate quotes each run inside a [`FlowSpan`] (`ups_rate_proxy.flow`,
//! fields `flow`, `stage`, `outcome`). With the `metrics` feature every attempt and its
//! outcome also bump `ups_rate_proxy_flow_total`. [`init_subscriber`] installs the process
//! log subscriber for the binary.

mod metrics;
mod subscriber;
mod tracing;

pub use metrics::*;
pub use subscriber::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outbound carrier call being observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// OAuth client-credentials exchange.
	TokenExchange,
	/// Rating call.
	RateQuote,
}
impl FlowKind {
	/// Label used for span and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::TokenExchange => "token_exchange",
			Self::RateQuote => "rate_quote",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Result label of a carrier call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Call started.
	Attempt,
	/// Call produced a value.
	Success,
	/// Call returned an error to its caller.
	Failure,
}
impl FlowOutcome {
	/// Classifies a finished call.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}

	/// Label used for span and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Failure => "failure",
		}
	}
}
