//! Open-Meteo forecast client against a mock server.

mod common;

use wetter_core::{Coordinates, ForecastError, ForecastSource, OpenMeteoClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use common::{DAILY_LEN, HOURLY_LEN, forecast_config, forecast_fixture};

fn client(server: &MockServer) -> OpenMeteoClient {
    OpenMeteoClient::new(&forecast_config(server)).expect("client")
}

fn berlin() -> Coordinates {
    Coordinates::new(52.52, 13.405).expect("valid coordinates")
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_sends_variables_and_parses_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.405"))
        .and(query_param("current_weather", "true"))
        .and(query_param("hourly", "temperature_2m,precipitation,cloudcover,windspeed_10m"))
        .and(query_param("daily", "temperature_2m_max,temperature_2m_min,precipitation_sum"))
        .and(query_param("timezone", "Europe/Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = client(&server).fetch(berlin()).await.expect("forecast");

    assert_eq!(forecast.current_weather.weathercode, 3);
    assert_eq!(forecast.current_weather.temperature, 8.2);
    assert_eq!(forecast.hourly.time.len(), HOURLY_LEN);
    assert_eq!(forecast.daily.time.len(), DAILY_LEN);
}

#[tokio::test]
async fn error_status_is_reported_with_code() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        ResponseTemplate::new(400)
            .set_body_json(serde_json::json!({ "error": true, "reason": "Latitude must be in range" })),
    )
    .await;

    let err = client(&server).fetch(berlin()).await.unwrap_err();

    match err {
        ForecastError::Status { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Latitude"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_section_is_a_parse_error() {
    let server = MockServer::start().await;

    let mut payload = forecast_fixture();
    payload.as_object_mut().expect("object").remove("daily");
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(payload)).await;

    let err = client(&server).fetch(berlin()).await.unwrap_err();
    assert!(matches!(err, ForecastError::Parse(_)));
}

#[tokio::test]
async fn mismatched_series_is_a_parse_error() {
    let server = MockServer::start().await;

    let mut payload = forecast_fixture();
    payload["hourly"]["precipitation"] = serde_json::json!([0.0, 0.1]);
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(payload)).await;

    let err = client(&server).fetch(berlin()).await.unwrap_err();
    assert!(matches!(err, ForecastError::Parse(ref msg) if msg.contains("hourly.precipitation")));
}

#[tokio::test]
async fn timeout_is_a_network_error() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(forecast_fixture())
            .set_delay(std::time::Duration::from_secs(10)),
    )
    .await;

    let mut config = forecast_config(&server);
    config.timeout_secs = 1;
    let err = OpenMeteoClient::new(&config)
        .expect("client")
        .fetch(berlin())
        .await
        .unwrap_err();

    assert!(matches!(err, ForecastError::Network(_)));
}

#[tokio::test]
async fn null_values_in_series_are_accepted() {
    let server = MockServer::start().await;
    let mut body = forecast_fixture();
    body["hourly"]["temperature_2m"][5] = serde_json::Value::Null;
    body["daily"]["precipitation_sum"][1] = serde_json::Value::Null;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let forecast = client(&server).fetch(berlin()).await.expect("forecast");

    assert_eq!(forecast.utc_offset_seconds, Some(3600));
    assert_eq!(forecast.hourly.temperature_2m[5], None);
    assert_eq!(forecast.daily.precipitation_sum[1], None);
}
