//! Client for the api.weather.gov point, alerts and forecast endpoints.

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::weather::{Alert, Coordinates, ForecastPeriod, HourlyPeriod, Point};

const ALERT_QUERY: &str = "active=true&status=actual&message_type=alert,update";
const ALERT_LIMIT: u32 = 50;

/// The four upstream lookups the pipeline depends on.
pub trait Upstream {
    /// Fails with [`Error::UpstreamUnavailable`] when the location is not
    /// served.
    fn point(&self, at: Coordinates) -> Result<Point>;

    fn alerts(&self, at: Coordinates) -> Result<Vec<Alert>>;

    fn forecast(&self, url: &str) -> Result<Vec<ForecastPeriod>>;

    fn forecast_hourly(&self, url: &str) -> Result<Vec<HourlyPeriod>>;
}

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
}

impl Client {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);

        let http = HttpClient::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, url: &str) -> Result<Response> {
        debug!(url, "GET");
        Ok(self.http.get(url).send()?)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        Ok(self.get(url)?.error_for_status()?.json()?)
    }
}

impl Upstream for Client {
    fn point(&self, at: Coordinates) -> Result<Point> {
        let url = format!("{}/points/{at}", self.base_url);
        let response = self.get(&url)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%at, status = status.as_u16(), "point lookup failed");
            return Err(Error::upstream(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        response.json::<points::Response>()?.into_point()
    }

    fn alerts(&self, at: Coordinates) -> Result<Vec<Alert>> {
        let url = format!(
            "{}/alerts?{ALERT_QUERY}&point={at}&limit={ALERT_LIMIT}",
            self.base_url
        );
        let response: alerts::Response = self.get_json(&url)?;
        Ok(response.into_alerts())
    }

    fn forecast(&self, url: &str) -> Result<Vec<ForecastPeriod>> {
        let response: forecast::Response = self.get_json(url)?;
        Ok(response.into_periods())
    }

    fn forecast_hourly(&self, url: &str) -> Result<Vec<HourlyPeriod>> {
        let response: hourly::Response = self.get_json(url)?;
        Ok(response.into_periods())
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Config(format!("header {value:?}: {e}")))
}

/// `{ "value": ... }` wrapper used for measured quantities.
#[derive(Deserialize, Debug, Default)]
pub struct Value<T> {
    pub value: T,
}

pub mod points {
    use super::*;

    #[derive(Deserialize, Debug)]
    pub struct Response {
        forecast: Option<String>,

        #[serde(rename = "forecastHourly")]
        forecast_hourly: Option<String>,

        #[serde(rename = "relativeLocation")]
        relative_location: RelativeLocation,
    }

    #[derive(Deserialize, Debug)]
    pub struct RelativeLocation {
        city: String,
        state: String,
    }

    impl Response {
        /// Marine and out-of-grid points come back without forecast links.
        pub fn into_point(self) -> Result<Point> {
            Ok(Point {
                forecast_url: self.forecast.ok_or(Error::MissingField("forecast"))?,
                forecast_hourly_url: self
                    .forecast_hourly
                    .ok_or(Error::MissingField("forecastHourly"))?,
                city: self.relative_location.city,
                state: self.relative_location.state,
            })
        }
    }
}

pub mod alerts {
    use super::*;

    #[derive(Deserialize, Debug, Default)]
    pub struct Response {
        #[serde(rename = "@graph", default)]
        pub graph: Vec<Properties>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Properties {
        pub id: String,
        pub event: String,

        #[serde(default)]
        pub severity: String,

        pub headline: Option<String>,
        pub description: Option<String>,
        pub instruction: Option<String>,

        #[serde(default)]
        pub parameters: Parameters,
    }

    #[derive(Deserialize, Debug, Default)]
    pub struct Parameters {
        #[serde(rename = "NWSheadline", default)]
        pub nws_headline: Vec<String>,
    }

    impl Response {
        pub fn into_alerts(self) -> Vec<Alert> {
            self.graph.into_iter().map(Properties::into_alert).collect()
        }
    }

    impl Properties {
        fn into_alert(self) -> Alert {
            let headline = self
                .headline
                .or_else(|| self.parameters.nws_headline.into_iter().next())
                .unwrap_or_else(|| self.event.clone());
            Alert {
                id: self.id,
                event: self.event,
                severity: self.severity,
                headline,
                description: self.description.unwrap_or_default(),
                instruction: self.instruction,
            }
        }
    }
}

pub mod forecast {
    use super::*;

    #[derive(Deserialize, Debug, Default)]
    pub struct Response {
        pub periods: Vec<Results>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Results {
        pub name: String,

        #[serde(rename = "detailedForecast", default)]
        pub detailed_forecast: String,
    }

    impl Response {
        pub fn into_periods(self) -> Vec<ForecastPeriod> {
            self.periods
                .into_iter()
                .map(|p| ForecastPeriod {
                    name: p.name,
                    detailed_forecast: p.detailed_forecast,
                })
                .collect()
        }
    }
}

pub mod hourly {
    use super::*;
    use crate::units::temperature;

    #[derive(Deserialize, Debug, Default)]
    pub struct Response {
        pub periods: Vec<Results>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Results {
        #[serde(rename = "startTime")]
        pub start_time: String,

        pub temperature: f64,

        #[serde(rename = "temperatureUnit", default)]
        pub temperature_unit: Option<String>,

        #[serde(rename = "windSpeed")]
        pub wind_speed: Option<String>,

        #[serde(rename = "relativeHumidity")]
        pub relative_humidity: Option<Value<Option<f64>>>,

        #[serde(rename = "probabilityOfPrecipitation")]
        pub probability_of_precipitation: Option<Value<Option<f64>>>,
    }

    impl Response {
        pub fn into_periods(self) -> Vec<HourlyPeriod> {
            self.periods.into_iter().map(Results::into_period).collect()
        }
    }

    impl Results {
        fn into_period(self) -> HourlyPeriod {
            let temperature_f = match self.temperature_unit.as_deref() {
                Some("C") => temperature::c2f(self.temperature),
                _ => self.temperature,
            };
            HourlyPeriod {
                start_time: self.start_time,
                temperature_f,
                wind_speed: self.wind_speed,
                relative_humidity_pct: self.relative_humidity.and_then(|v| v.value),
                probability_of_precipitation_pct: self
                    .probability_of_precipitation
                    .and_then(|v| v.value),
            }
        }
    }
}
