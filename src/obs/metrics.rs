// self
use crate::obs::{FlowKind, FlowOutcome};

/// Bumps `ups_rate_proxy_flow_total{flow, outcome}`; a no-op unless `metrics` is enabled.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"ups_rate_proxy_flow_total",
		"flow" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}
