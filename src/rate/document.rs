//! XML documents exchanged with the rating endpoint.
//!
//! The request is serialized from borrowed views over a [`RateQuery`]; the response is
//! decoded into typed `(service code, total charge)` pairs before any mapping happens.

// crates.io
use quick_xml::{DeError, Reader, events::Event};
// self
use crate::{
	_prelude::*,
	rate::{RateQuery, RateQuoteSummary},
};

/// Service code the carrier uses for ground shipping.
pub const GROUND_SERVICE_CODE: &str = "03";
/// Service code the carrier uses for second-day air.
pub const AIR_SERVICE_CODE: &str = "02";

/// `RatingServiceSelectionRequest` document asking for every service level.
#[derive(Debug, Serialize)]
#[serde(rename = "RatingServiceSelectionRequest", rename_all = "PascalCase")]
pub struct RateRequestDocument<'a> {
	request: RequestHeader,
	shipment: Shipment<'a>,
}
impl<'a> RateRequestDocument<'a> {
	/// Builds a `Rate`/`Shop` request for `query`.
	pub fn shop(query: &'a RateQuery) -> Self {
		Self {
			request: RequestHeader { request_action: "Rate", request_option: "Shop" },
			shipment: Shipment {
				shipper: Party { address: Address { postal_code: query.origin_postal_code() } },
				ship_to: Party {
					address: Address { postal_code: query.destination_postal_code() },
				},
				package: Package {
					package_weight: PackageWeight {
						unit_of_measurement: UnitOfMeasurement { code: "LBS" },
						weight: query.weight_lbs().to_string(),
					},
				},
			},
		}
	}

	/// Serializes the document.
	pub fn to_xml(&self) -> Result<String, quick_xml::SeError> {
		quick_xml::se::to_string(self)
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RequestHeader {
	request_action: &'static str,
	request_option: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Shipment<'a> {
	shipper: Party<'a>,
	ship_to: Party<'a>,
	package: Package,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Party<'a> {
	address: Address<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Address<'a> {
	postal_code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Package {
	package_weight: PackageWeight,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PackageWeight {
	unit_of_measurement: UnitOfMeasurement,
	weight: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UnitOfMeasurement {
	code: &'static str,
}

/// One quoted service level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatedShipment {
	/// Carrier service code, e.g. `03`.
	pub service_code: String,
	/// Total charge as sent by the carrier; `None` when the entry carries no charge.
	pub monetary_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RatedShipmentElement {
	#[serde(default)]
	service: Option<ServiceElement>,
	#[serde(default)]
	total_charges: Option<ChargesElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceElement {
	#[serde(default)]
	code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChargesElement {
	#[serde(default)]
	monetary_value: Option<String>,
}

/// Decodes every `RatedShipment` element carrying a service code, at any depth.
///
/// Envelopes around the rating response (SOAP `Envelope/Body`, vendor wrappers) are walked
/// through; only the shipment subtrees are deserialized. Document order is preserved.
pub fn parse_rated_shipments(xml: &str) -> Result<Vec<RatedShipment>, DeError> {
	let mut reader = Reader::from_str(xml);
	let mut shipments = Vec::new();
	let mut depth = 0_usize;
	let mut saw_root = false;

	loop {
		match reader.read_event()? {
			Event::Start(start) if start.local_name().as_ref() == RATED_SHIPMENT_TAG => {
				saw_root = true;

				let span = reader.read_to_end(start.name())?;
				let inner = byte_offset(span.start)
					.zip(byte_offset(span.end))
					.and_then(|(from, to)| xml.get(from..to))
					.ok_or(DeError::UnexpectedEof)?;
				let element: RatedShipmentElement =
					quick_xml::de::from_str(&format!("<RatedShipment>{inner}</RatedShipment>"))?;

				shipments.extend(RatedShipment::from_element(element));
			},
			Event::Start(_) => {
				saw_root = true;
				depth += 1;
			},
			Event::End(_) => depth = depth.saturating_sub(1),
			Event::Empty(_) => saw_root = true,
			Event::Eof => break,
			_ => {},
		}
	}

	if !saw_root || depth != 0 {
		return Err(DeError::UnexpectedEof);
	}

	Ok(shipments)
}

const RATED_SHIPMENT_TAG: &[u8] = b"RatedShipment";

fn byte_offset(position: impl TryInto<usize>) -> Option<usize> {
	position.try_into().ok()
}

impl RatedShipment {
	fn from_element(element: RatedShipmentElement) -> Option<Self> {
		let service_code = non_empty(element.service?.code?)?;
		let monetary_value =
			element.total_charges.and_then(|charges| charges.monetary_value).and_then(non_empty);

		Some(Self { service_code, monetary_value })
	}
}

fn non_empty(value: String) -> Option<String> {
	let trimmed = value.trim();

	if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

impl RateQuoteSummary {
	/// Maps code `03` to ground and `02` to air.
	///
	/// The first entry per code decides the rate; if that entry has no charge the rate is
	/// `None`, even when a later entry with the same code carries one.
	pub fn from_rated_shipments(shipments: &[RatedShipment]) -> Self {
		let charge_for = |code: &str| {
			shipments
				.iter()
				.find(|shipment| shipment.service_code == code)
				.and_then(|shipment| shipment.monetary_value.clone())
		};

		Self { ground_rate: charge_for(GROUND_SERVICE_CODE), air_rate: charge_for(AIR_SERVICE_CODE) }
	}
}
