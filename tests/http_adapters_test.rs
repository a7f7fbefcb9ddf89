use citybike_skill::adapters::{DigitransitStationProvider, HttpAddressProvider, NominatimGeocoder};
use citybike_skill::domain::envelope::DeviceContext;
use citybike_skill::domain::ports::{AddressProvider, Geocoder, StationProvider};
use citybike_skill::utils::error::{DeviceAddressError, GeocodingError, StationDataError};
use citybike_skill::SkillFileConfig;
use httpmock::prelude::*;
use serde_json::json;

fn config_for(server: &MockServer, api_key: Option<&str>) -> SkillFileConfig {
    let mut config = SkillFileConfig::default();
    config.skill.application_id = Some("amzn1.ask.skill.test".to_string());
    config.stations.endpoint = Some(server.url("/routing/v1/routers/hsl/index/graphql"));
    config.stations.api_key = api_key.map(str::to_string);
    config.geocoder.endpoint = Some(server.base_url());
    config.geocoder.user_agent = Some("citybike-skill-tests".to_string());
    config
}

fn device_for(server: &MockServer) -> DeviceContext {
    DeviceContext {
        access_token: "token-abc".to_string(),
        api_endpoint: server.base_url(),
        device_id: "device-9".to_string(),
    }
}

#[tokio::test]
async fn test_device_address_success() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/devices/device-9/settings/address")
                .header("authorization", "Bearer token-abc");
            then.status(200).json_body(json!({
                "addressLine1": "Kaivokatu 8",
                "city": "Helsinki",
                "countryCode": "FI"
            }));
        })
        .await;

    let provider = HttpAddressProvider::new(&config_for(&server, None)).unwrap();
    let address = provider.device_address(&device_for(&server)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(address.to_query().as_deref(), Some("Kaivokatu 8, Helsinki FI"));
}

#[tokio::test]
async fn test_device_address_status_mapping() {
    for (status, expect_permission) in [(403, true), (401, false), (500, false)] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/devices/device-9/settings/address");
                then.status(status);
            })
            .await;

        let provider = HttpAddressProvider::new(&config_for(&server, None)).unwrap();
        let err = provider
            .device_address(&device_for(&server))
            .await
            .unwrap_err();

        if expect_permission {
            assert!(matches!(err, DeviceAddressError::PermissionDenied));
        } else {
            assert!(
                matches!(err, DeviceAddressError::Status { status: s } if s == status),
                "unexpected error for {}: {}",
                status,
                err
            );
        }
    }
}

#[tokio::test]
async fn test_device_address_network_failure() {
    // httpmock 的伺服器放回池中仍會監聽，改用剛釋放的臨時埠口
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let unreachable = DeviceContext {
        access_token: "token-abc".to_string(),
        api_endpoint: format!("http://127.0.0.1:{}", port),
        device_id: "device-9".to_string(),
    };

    let provider = HttpAddressProvider::new(&SkillFileConfig::default()).unwrap();

    let err = provider.device_address(&unreachable).await.unwrap_err();
    assert!(matches!(err, DeviceAddressError::Network(_)));
}

#[tokio::test]
async fn test_device_address_malformed_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/devices/device-9/settings/address");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let provider = HttpAddressProvider::new(&config_for(&server, None)).unwrap();
    let err = provider
        .device_address(&device_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, DeviceAddressError::Malformed { .. }));
}

#[tokio::test]
async fn test_geocode_found() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "Kaivokatu 8, Helsinki FI")
                .query_param("limit", "1")
                .header("user-agent", "citybike-skill-tests");
            then.status(200)
                .json_body(json!([{"lat": "60.1710", "lon": "24.9410", "display_name": "Kaivokatu"}]));
        })
        .await;

    let geocoder = NominatimGeocoder::new(&config_for(&server, None)).unwrap();
    let location = geocoder.geocode("Kaivokatu 8, Helsinki FI").await.unwrap();

    mock.assert_async().await;
    assert!((location.latitude() - 60.1710).abs() < 1e-9);
    assert!((location.longitude() - 24.9410).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_not_found_and_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search").query_param("q", "Nowhere");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search").query_param("q", "Busy");
            then.status(503);
        })
        .await;

    let geocoder = NominatimGeocoder::new(&config_for(&server, None)).unwrap();

    assert!(matches!(
        geocoder.geocode("Nowhere").await,
        Err(GeocodingError::NotFound(_))
    ));
    assert!(matches!(
        geocoder.geocode("Busy").await,
        Err(GeocodingError::Unavailable(_))
    ));
    assert!(matches!(
        geocoder.geocode("   ").await,
        Err(GeocodingError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_stations_query_with_subscription_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/routing/v1/routers/hsl/index/graphql")
                .header("digitransit-subscription-key", "key-1")
                .body_contains("bikeRentalStations");
            then.status(200).json_body(json!({"data": {"bikeRentalStations": [
                {"name": "Kaivopuisto", "stationId": "001", "bikesAvailable": 4, "lat": 60.155, "lon": 24.950},
                {"name": "Laivasillankatu", "stationId": "002", "bikesAvailable": 0, "lat": 60.160, "lon": 24.956}
            ]}}));
        })
        .await;

    let provider = DigitransitStationProvider::new(&config_for(&server, Some("key-1"))).unwrap();
    let stations = provider.stations().await.unwrap();

    mock.assert_async().await;
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].name, "Kaivopuisto");
    assert_eq!(stations[1].bikes_available, 0);
}

#[tokio::test]
async fn test_stations_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/routing/v1/routers/hsl/index/graphql");
            then.status(200).json_body(json!({
                "data": null,
                "errors": [{"message": "Query complexity too high"}]
            }));
        })
        .await;

    let provider = DigitransitStationProvider::new(&config_for(&server, None)).unwrap();
    assert!(matches!(
        provider.stations().await,
        Err(StationDataError::Query { .. })
    ));

    let failing = MockServer::start_async().await;
    failing
        .mock_async(|when, then| {
            when.method(POST).path("/routing/v1/routers/hsl/index/graphql");
            then.status(401);
        })
        .await;

    let provider = DigitransitStationProvider::new(&config_for(&failing, None)).unwrap();
    assert!(matches!(
        provider.stations().await,
        Err(StationDataError::Status { status: 401 })
    ));
}
