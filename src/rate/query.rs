//! Inbound rate query and outbound quote summary.

// self
use crate::_prelude::*;

/// Validation failures for [`RateQuery`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum QueryError {
	/// Postal code was empty or whitespace.
	#[error("The {field} postal code must not be blank.")]
	BlankPostalCode {
		/// Which side of the shipment failed validation.
		field: &'static str,
	},
	/// Weight was negative.
	#[error("Package weight must not be negative.")]
	NegativeWeight,
	/// Weight was NaN or infinite.
	#[error("Package weight must be a finite number.")]
	NonFiniteWeight,
}

/// One shipment to quote.
#[derive(Clone, Debug, PartialEq)]
pub struct RateQuery {
	origin_postal_code: String,
	destination_postal_code: String,
	weight_lbs: f64,
}
impl RateQuery {
	/// Validates and builds a query. Postal codes are trimmed.
	pub fn new(
		origin_postal_code: impl AsRef<str>,
		destination_postal_code: impl AsRef<str>,
		weight_lbs: f64,
	) -> Result<Self, QueryError> {
		let origin = origin_postal_code.as_ref().trim();
		let destination = destination_postal_code.as_ref().trim();

		if origin.is_empty() {
			return Err(QueryError::BlankPostalCode { field: "origin" });
		}
		if destination.is_empty() {
			return Err(QueryError::BlankPostalCode { field: "destination" });
		}
		if !weight_lbs.is_finite() {
			return Err(QueryError::NonFiniteWeight);
		}
		if weight_lbs < 0. {
			return Err(QueryError::NegativeWeight);
		}

		Ok(Self {
			origin_postal_code: origin.to_owned(),
			destination_postal_code: destination.to_owned(),
			weight_lbs,
		})
	}

	/// Shipper postal code.
	pub fn origin_postal_code(&self) -> &str {
		&self.origin_postal_code
	}

	/// Recipient postal code.
	pub fn destination_postal_code(&self) -> &str {
		&self.destination_postal_code
	}

	/// Package weight in pounds.
	pub fn weight_lbs(&self) -> f64 {
		self.weight_lbs
	}
}

/// Ground and air totals extracted from a carrier rate response.
///
/// Serializes to the legacy client's shape: `{"GroundRate": .., "AirRate": ..}`, with
/// `null` for services the carrier did not quote.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuoteSummary {
	/// Total charge for service code `03`.
	#[serde(rename = "GroundRate")]
	pub ground_rate: Option<String>,
	/// Total charge for service code `02`.
	#[serde(rename = "AirRate")]
	pub air_rate: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn query_trims_and_validates() {
		let query = RateQuery::new(" 30301 ", "10001", 2.5).expect("Query should be valid.");

		assert_eq!(query.origin_postal_code(), "30301");
		assert_eq!(query.destination_postal_code(), "10001");
		assert_eq!(query.weight_lbs(), 2.5);
		assert!(RateQuery::new("30301", "10001", 0.).is_ok());
		assert_eq!(
			RateQuery::new("", "10001", 1.),
			Err(QueryError::BlankPostalCode { field: "origin" })
		);
		assert_eq!(
			RateQuery::new("30301", "   ", 1.),
			Err(QueryError::BlankPostalCode { field: "destination" })
		);
		assert_eq!(RateQuery::new("30301", "10001", -0.5), Err(QueryError::NegativeWeight));
		assert_eq!(RateQuery::new("30301", "10001", f64::NAN), Err(QueryError::NonFiniteWeight));
	}

	#[test]
	fn summary_serializes_legacy_shape() {
		let summary =
			RateQuoteSummary { ground_rate: Some("12.50".into()), air_rate: None };

		assert_eq!(
			serde_json::to_string(&summary).expect("Summary should serialize."),
			"{\"GroundRate\":\"12.50\",\"AirRate\":null}"
		);
	}
}
