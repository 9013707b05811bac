//! Settings passed explicitly into the pipeline and renderers.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "fallback": { "latitude": 39.7456, "longitude": -97.0892 }, "window": 12 }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::derive::DEFAULT_WINDOW;
use crate::error::{Error, Result};
use crate::weather::Coordinates;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    /// Shown when no location fix is available.
    pub fallback: Coordinates,
    pub locate: LocatePolicy,
    /// Hourly periods charted.
    pub window: usize,
    /// Daily periods listed in the forecast table.
    pub forecast_rows: usize,
    pub series: Series,
    pub map: MapConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            fallback: Coordinates::new(21.3069, -157.8583),
            locate: LocatePolicy::default(),
            window: DEFAULT_WINDOW,
            forecast_rows: 6,
            series: Series::default(),
            map: MapConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::Config("window must be at least 1".to_string()));
        }
        if !(-90.0..=90.0).contains(&self.fallback.latitude)
            || !(-180.0..=180.0).contains(&self.fallback.longitude)
        {
            return Err(Error::Config(format!(
                "fallback {} is not a valid coordinate",
                self.fallback
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
    pub accept: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "https://github.com/jquagga/swa".to_string(),
            accept: "application/ld+json".to_string(),
        }
    }
}

/// How hard to try for a location fix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocatePolicy {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl Default for LocatePolicy {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: 15_000,
            maximum_age_ms: 3600,
        }
    }
}

/// Which derived series are charted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Series {
    pub temperature: bool,
    pub wind_chill: bool,
    pub apparent_temperature: bool,
    pub heat_index: bool,
    pub precipitation: bool,
}

impl Default for Series {
    fn default() -> Self {
        Self {
            temperature: true,
            wind_chill: false,
            apparent_temperature: true,
            heat_index: false,
            precipitation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub zoom: u8,
    pub style_url: String,
    pub radar_wms_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: 7,
            style_url: "https://tiles.openfreemap.org/styles/positron".to_string(),
            radar_wms_url: "https://mapservices.weather.noaa.gov/eventdriven/services/radar/radar_base_reflectivity/MapServer/WMSServer?bbox={bbox-epsg-3857}&format=image/png&service=WMS&version=1.1.1&request=GetMap&srs=EPSG:3857&transparent=true&styles=default&width=256&height=256&layers=1".to_string(),
        }
    }
}
