//! The NWS client against a mock api.weather.gov.

use serde_json::json;
use swa::config::Config;
use swa::locate::Located;
use swa::nws::{Client, Upstream};
use swa::weather::Coordinates;
use swa::{pipeline, Error};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config
}

fn honolulu() -> Located {
    Located::Fix(Coordinates::new(21.306_944, -157.858_333))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_point_not_found_skips_remaining_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/points/21.3069,-157.8583"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "title": "Data Unavailable For Requested Point"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "@graph": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = tokio::task::spawn_blocking(move || {
        let client = Client::new(&config.api)?;
        pipeline::run(&client, honolulu(), &config)
    })
    .await
    .unwrap();

    match result {
        Err(Error::UpstreamUnavailable { status, reason }) => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected UpstreamUnavailable, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_cycle_with_headers_and_query() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/points/21.3069,-157.8583"))
        .and(header("accept", "application/ld+json"))
        .and(header("user-agent", "https://github.com/jquagga/swa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "forecast": format!("{uri}/gridpoints/HFO/153,144/forecast"),
            "forecastHourly": format!("{uri}/gridpoints/HFO/153,144/forecast/hourly"),
            "relativeLocation": { "city": "Honolulu", "state": "HI" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/alerts"))
        .and(query_param("active", "true"))
        .and(query_param("status", "actual"))
        .and(query_param("message_type", "alert,update"))
        .and(query_param("point", "21.3069,-157.8583"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@graph": [
                {
                    "id": "urn:oid:2.49.0.1.840.0.1",
                    "event": "High Surf Advisory",
                    "severity": "Moderate",
                    "headline": "High Surf Advisory issued",
                    "description": "Surf 8 to 12 feet.",
                    "instruction": "Stay out of the water."
                },
                {
                    "id": "urn:oid:2.49.0.1.840.0.1",
                    "event": "High Surf Advisory",
                    "severity": "Moderate",
                    "headline": "High Surf Advisory issued",
                    "description": "Surf 8 to 12 feet.",
                    "instruction": null
                }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/HFO/153,144/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "periods": [
                { "name": "Tonight", "detailedForecast": "Partly cloudy, with a low around 70." },
                { "name": "Tuesday", "detailedForecast": "Mostly sunny, with a high near 83." }
            ]
        })))
        .mount(&server)
        .await;

    let hourly: Vec<_> = (0..24)
        .map(|h| {
            json!({
                "startTime": format!("2024-01-15T{h:02}:00:00-10:00"),
                "temperature": 75,
                "temperatureUnit": "F",
                "windSpeed": "10 mph",
                "relativeHumidity": { "value": 65 },
                "probabilityOfPrecipitation": { "value": 20 }
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/gridpoints/HFO/153,144/forecast/hourly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "periods": hourly })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let report = tokio::task::spawn_blocking(move || {
        let client = Client::new(&config.api)?;
        pipeline::run(&client, honolulu(), &config)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(report.point.city, "Honolulu");
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.forecast.len(), 2);
    assert_eq!(report.hourly.len(), 8);
    assert_eq!(report.hourly[0].hour_label, "12 AM");
    assert_eq!(report.hourly[7].hour_label, "7 AM");
    assert_eq!(report.hourly[0].wind_chill_f, None);
    assert!(report.hourly[0].apparent_temp_f.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_forecast_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/GID/1,1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = tokio::task::spawn_blocking(move || {
        let client = Client::new(&config.api)?;
        client.forecast(&format!("{}/gridpoints/GID/1,1/forecast", config.api.base_url))
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(Error::Http(_))));
}
