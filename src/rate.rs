//! Rate client: builds the carrier rate request, authenticates it, and reduces the XML reply
//! to a [`RateQuoteSummary`].

pub mod document;
pub mod query;

pub use document::*;
pub use query::*;

// crates.io
use reqwest::header::{ACCEPT, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	error::{RateError, TransportError},
	http::{CarrierHttpClient, CarrierResponse},
	obs::{FlowKind, FlowSpan},
	provider::AccessTokenSource,
};

/// Issues rate quotes against the carrier rating endpoint.
///
/// A quote has no side effects beyond the outbound calls and a possible token cache fill,
/// so repeating a query is safe.
#[derive(Clone)]
pub struct RateClient {
	http_client: CarrierHttpClient,
	tokens: Arc<dyn AccessTokenSource>,
	rating_endpoint: Url,
}
impl RateClient {
	/// Creates a client posting to `rating_endpoint` with tokens from `tokens`.
	pub fn new(
		http_client: CarrierHttpClient,
		tokens: Arc<dyn AccessTokenSource>,
		rating_endpoint: Url,
	) -> Self {
		Self { http_client, tokens, rating_endpoint }
	}

	/// Quotes ground and air rates for `query`.
	pub async fn quote(&self, query: RateQuery) -> Result<RateQuoteSummary, RateError> {
		FlowSpan::new(FlowKind::RateQuote, "quote")
			.observe(self.quote_inner(&query))
			.await
			.inspect_err(|e| tracing::warn!(cause = ?e.cause(), error = %e, "Rate quote failed."))
	}

	async fn quote_inner(&self, query: &RateQuery) -> Result<RateQuoteSummary, RateError> {
		let token = self.tokens.access_token().await?;
		let body = RateRequestDocument::shop(query)
			.to_xml()
			.map_err(|e| RateError::RequestEncode { message: e.to_string() })?;
		let response = self
			.http_client
			.post(self.rating_endpoint.clone())
			.bearer_auth(token.expose())
			.header(CONTENT_TYPE, "application/xml")
			.header(ACCEPT, "application/xml")
			.body(body)
			.send()
			.await
			.map_err(|e| {
				tracing::error!(error = %e, "Rating endpoint could not be reached.");

				TransportError::from(e)
			})?;
		let response = CarrierResponse::read(response).await.map_err(TransportError::from)?;

		if !response.is_success() {
			tracing::error!(
				status = response.status,
				detail = %response.body,
				"Carrier rejected the rate request."
			);

			return Err(RateError::CarrierRejected {
				status: response.status,
				detail: response.body,
			});
		}

		let shipments = parse_rated_shipments(&response.body).map_err(|source| {
			tracing::error!(
				error = %source,
				detail = %response.body,
				"Carrier rate response could not be parsed."
			);

			RateError::Malformed { source }
		})?;

		tracing::debug!(entries = shipments.len(), "Parsed rated shipments.");

		Ok(RateQuoteSummary::from_rated_shipments(&shipments))
	}
}
impl Debug for RateClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RateClient").field("rating_endpoint", &self.rating_endpoint).finish()
	}
}
