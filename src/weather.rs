use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Rounded to four decimal places, the precision api.weather.gov accepts
    /// without redirecting.
    pub fn rounded(&self) -> Self {
        let round = |v: f64| (v * 10_000.0).round() / 10_000.0;
        Self::new(round(self.latitude), round(self.longitude))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)
    }
}

/// Forecast location resolved by the point lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub forecast_url: String,
    pub forecast_hourly_url: String,
    pub city: String,
    pub state: String,
}

/// One named period of the daily forecast ("Tonight", "Tuesday", ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub detailed_forecast: String,
}

/// One hour of the gridded hourly forecast, temperatures in Fahrenheit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPeriod {
    pub start_time: String,
    pub temperature_f: f64,
    /// Raw upstream wind speed, e.g. `"10 mph"`.
    pub wind_speed: Option<String>,
    pub relative_humidity_pct: Option<f64>,
    pub probability_of_precipitation_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub event: String,
    pub severity: String,
    pub headline: String,
    pub description: String,
    pub instruction: Option<String>,
}

impl Alert {
    pub fn severity_class(&self) -> SeverityClass {
        SeverityClass::from_severity(&self.severity)
    }
}

/// Display category of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeverityClass {
    Danger,
    Warning,
    Info,
}

impl SeverityClass {
    pub fn from_severity(severity: &str) -> Self {
        match severity {
            "Extreme" => Self::Danger,
            "Severe" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// An hourly period with the values derived for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayHourlyPeriod {
    pub period: HourlyPeriod,
    pub hour_label: String,
    pub wind_speed_mph: Option<f64>,
    pub wind_chill_f: Option<f64>,
    pub apparent_temp_f: Option<f64>,
    pub heat_index_f: Option<f64>,
}
