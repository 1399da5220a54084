// crates.io
use tracing::{Instrument, Span, field::Empty};
// self
use crate::{
	_prelude::*,
	obs::{self, FlowKind, FlowOutcome},
};

/// Span wrapping one carrier call; records the outcome both on the span and as a metric.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	kind: FlowKind,
	span: Span,
}
impl FlowSpan {
	/// Opens a `ups_rate_proxy.flow` span for `kind` at `stage`.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		let span =
			tracing::info_span!("ups_rate_proxy.flow", flow = kind.as_str(), stage, outcome = Empty);

		Self { kind, span }
	}

	/// Runs `fut` inside the span, recording the attempt and its outcome.
	pub async fn observe<T, E, Fut>(&self, fut: Fut) -> Result<T, E>
	where
		Fut: Future<Output = Result<T, E>>,
	{
		obs::record_flow_outcome(self.kind, FlowOutcome::Attempt);

		let result = fut.instrument(self.span.clone()).await;
		let outcome = FlowOutcome::of(&result);

		self.span.record("outcome", outcome.as_str());
		obs::record_flow_outcome(self.kind, outcome);

		result
	}
}
