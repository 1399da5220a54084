// crates.io
use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode, header::CONTENT_TYPE},
};
use httpmock::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;
// self
use ups_rate_proxy::{_preludet::*, clock::SystemClock, server};

const SHOP_RESPONSE: &str = "<RatingServiceSelectionResponse><RatedShipment><Service><Code>03</Code></Service><TotalCharges><MonetaryValue>12.50</MonetaryValue></TotalCharges></RatedShipment><RatedShipment><Service><Code>02</Code></Service><TotalCharges><MonetaryValue>45.00</MonetaryValue></TotalCharges></RatedShipment></RatingServiceSelectionResponse>";

fn app(server: &MockServer) -> Router {
	let config = test_config(&server.url("/token"), &server.url("/rating"));

	server::router(build_test_state(&config, Arc::new(SystemClock)))
}

fn rate_request(api_key: Option<&str>, body: Value) -> Request<Body> {
	let mut builder = Request::builder()
		.method("POST")
		.uri("/api/ups/rates")
		.header(CONTENT_TYPE, "application/json");

	if let Some(key) = api_key {
		builder = builder.header("X-API-Key", key);
	}

	builder.body(Body::from(body.to_string())).expect("Request fixture should build.")
}

fn shipment() -> Value {
	json!({ "FromZip": "30301", "ToZip": "10001", "Weight": 5.0 })
}

async fn read_body(response: axum::response::Response) -> String {
	let bytes =
		body::to_bytes(response.into_body(), usize::MAX).await.expect("Body should be readable.");

	String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8.")
}

async fn mock_token_endpoint(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"server-token\",\"token_type\":\"Bearer\",\"expires_in\":3600}");
		})
		.await
}

#[tokio::test]
async fn missing_api_key_is_unauthorized() {
	let server = MockServer::start_async().await;
	let response = app(&server)
		.oneshot(rate_request(None, shipment()))
		.await
		.expect("Router should respond.");

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(read_body(response).await, "API Key is missing");
}

#[tokio::test]
async fn wrong_api_key_is_forbidden() {
	let server = MockServer::start_async().await;
	let token_mock = mock_token_endpoint(&server).await;
	let response = app(&server)
		.oneshot(rate_request(Some("not-the-key"), shipment()))
		.await
		.expect("Router should respond.");

	assert_eq!(response.status(), StatusCode::FORBIDDEN);
	assert_eq!(read_body(response).await, "Invalid or missing API Key");

	token_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn valid_request_returns_rates() {
	let server = MockServer::start_async().await;
	let token_mock = mock_token_endpoint(&server).await;
	let rating_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/rating").header("authorization", "Bearer server-token");
			then.status(200).header("content-type", "application/xml").body(SHOP_RESPONSE);
		})
		.await;
	let response = app(&server)
		.oneshot(rate_request(Some(TEST_API_KEY), shipment()))
		.await
		.expect("Router should respond.");

	assert_eq!(response.status(), StatusCode::OK);

	let body: Value =
		serde_json::from_str(&read_body(response).await).expect("Body should be JSON.");

	assert_eq!(body, json!({ "GroundRate": "12.50", "AirRate": "45.00" }));

	token_mock.assert_calls_async(1).await;
	rating_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn camel_case_body_is_accepted() {
	let server = MockServer::start_async().await;
	let _token_mock = mock_token_endpoint(&server).await;
	let _rating_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/rating");
			then.status(200).header("content-type", "application/xml").body(SHOP_RESPONSE);
		})
		.await;
	let response = app(&server)
		.oneshot(rate_request(
			Some(TEST_API_KEY),
			json!({ "fromZip": "30301", "toZip": "10001", "weight": 2.5 }),
		))
		.await
		.expect("Router should respond.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn carrier_failure_returns_generic_error() {
	let server = MockServer::start_async().await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"response\":{\"errors\":[{\"code\":\"250003\",\"message\":\"Invalid credentials\"}]}}");
		})
		.await;
	let response = app(&server)
		.oneshot(rate_request(Some(TEST_API_KEY), shipment()))
		.await
		.expect("Router should respond.");

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let raw = read_body(response).await;

	assert!(!raw.contains("250003"));
	assert!(!raw.contains("Invalid credentials"));

	let body: Value = serde_json::from_str(&raw).expect("Body should be JSON.");

	assert_eq!(body, json!({ "Error": "Carrier authentication failed." }));
}

#[tokio::test]
async fn rating_rejection_returns_generic_error() {
	let server = MockServer::start_async().await;
	let _token_mock = mock_token_endpoint(&server).await;
	let _rating_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/rating");
			then.status(500).body("<Fault>internal stack trace</Fault>");
		})
		.await;
	let response = app(&server)
		.oneshot(rate_request(Some(TEST_API_KEY), shipment()))
		.await
		.expect("Router should respond.");

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let raw = read_body(response).await;

	assert!(!raw.contains("stack trace"));
	assert_eq!(
		serde_json::from_str::<Value>(&raw).expect("Body should be JSON."),
		json!({ "Error": "Carrier rate request failed." })
	);
}

#[tokio::test]
async fn invalid_shipment_is_a_bad_request() {
	let server = MockServer::start_async().await;
	let token_mock = mock_token_endpoint(&server).await;
	let response = app(&server)
		.oneshot(rate_request(
			Some(TEST_API_KEY),
			json!({ "FromZip": "  ", "ToZip": "10001", "Weight": 1.0 }),
		))
		.await
		.expect("Router should respond.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body: Value =
		serde_json::from_str(&read_body(response).await).expect("Body should be JSON.");

	assert!(body["Error"].is_string());

	token_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn health_needs_no_api_key() {
	let server = MockServer::start_async().await;
	let response = app(&server)
		.oneshot(
			Request::builder()
				.uri("/healthz")
				.body(Body::empty())
				.expect("Request fixture should build."),
		)
		.await
		.expect("Router should respond.");

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(read_body(response).await, "ok");
}
