// libs/geolocation-cell/tests/geocoding_test.rs

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use geolocation_cell::{Geocoder, NominatimGeocoder};
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

#[tokio::test]
async fn test_geocode_returns_first_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Maarif, Casablanca"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockSupabaseResponses::nominatim_hit(33.5883, -7.6325)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::new(&TestConfig::with_mock_server(&mock_server.uri()).to_app_config());
    let coordinate = geocoder.geocode("  Maarif, Casablanca ").await.unwrap();

    assert!((coordinate.latitude() - 33.5883).abs() < 1e-9);
    assert!((coordinate.longitude() + 7.6325).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_no_match_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::new(&TestConfig::with_mock_server(&mock_server.uri()).to_app_config());

    assert_eq!(geocoder.geocode("Nowhere at all").await, None);
}

#[tokio::test]
async fn test_geocode_upstream_failure_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::new(&TestConfig::with_mock_server(&mock_server.uri()).to_app_config());

    assert_eq!(geocoder.geocode("Casablanca").await, None);
}

#[tokio::test]
async fn test_geocode_out_of_range_answer_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "lat": "123.0", "lon": "0.0" }])))
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::new(&TestConfig::with_mock_server(&mock_server.uri()).to_app_config());

    assert_eq!(geocoder.geocode("Somewhere odd").await, None);
}

#[tokio::test]
async fn test_blank_address_skips_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::new(&TestConfig::with_mock_server(&mock_server.uri()).to_app_config());

    assert_eq!(geocoder.geocode("   ").await, None);
}
