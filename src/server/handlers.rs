//! Route handlers.

// crates.io
use axum::{
	Json,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
};
// self
use crate::{_prelude::*, rate::RateQuery, server::AppState};

/// Body of `POST /api/ups/rates`. PascalCase and camelCase names are accepted as well.
#[derive(Clone, Debug, Deserialize)]
pub struct RateRequestBody {
	/// Shipper postal code.
	#[serde(alias = "FromZip", alias = "fromZip")]
	pub from_zip: String,
	/// Recipient postal code.
	#[serde(alias = "ToZip", alias = "toZip")]
	pub to_zip: String,
	/// Package weight in pounds.
	#[serde(alias = "Weight")]
	pub weight: f64,
}

/// `{"Error": "..."}` body returned on failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Caller-safe message.
	#[serde(rename = "Error")]
	pub error: String,
}
impl ErrorBody {
	/// Pairs the body with a status code.
	pub fn respond(status: StatusCode, message: impl Into<String>) -> Response {
		(status, Json(Self { error: message.into() })).into_response()
	}
}

/// Quotes ground and air rates for the posted shipment.
pub async fn quote_rates(
	State(state): State<AppState>,
	Json(body): Json<RateRequestBody>,
) -> Response {
	let query = match RateQuery::new(&body.from_zip, &body.to_zip, body.weight) {
		Ok(query) => query,
		Err(e) => return ErrorBody::respond(StatusCode::BAD_REQUEST, e.to_string()),
	};

	match state.rates.quote(query).await {
		Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
		Err(e) => ErrorBody::respond(StatusCode::INTERNAL_SERVER_ERROR, e.public_message()),
	}
}

/// Liveness probe.
pub async fn health() -> &'static str {
	"ok"
}
