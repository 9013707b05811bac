//! One render cycle: point lookup, then alerts and forecasts, then derivation.

use chrono::{DateTime, Local};
use tracing::{info, instrument};

use crate::config::Config;
use crate::derive;
use crate::error::Result;
use crate::locate::Located;
use crate::nws::Upstream;
use crate::weather::{Alert, DisplayHourlyPeriod, ForecastPeriod, Point};

/// Everything the presentation layer needs for one location.
#[derive(Debug, Clone)]
pub struct Report {
    pub located: Located,
    pub point: Point,
    pub alerts: Vec<Alert>,
    pub forecast: Vec<ForecastPeriod>,
    pub hourly: Vec<DisplayHourlyPeriod>,
    pub generated_at: DateTime<Local>,
}

/// Runs the fetches in order. A failed point lookup ends the cycle before
/// any other request is made.
#[instrument(skip(upstream, config), fields(at = %located.coordinates()))]
pub fn run<U: Upstream + ?Sized>(upstream: &U, located: Located, config: &Config) -> Result<Report> {
    let at = located.coordinates().rounded();

    let point = upstream.point(at)?;
    info!(city = %point.city, state = %point.state, "resolved point");

    let alerts = derive::dedupe_alerts(upstream.alerts(at)?);
    let forecast = upstream.forecast(&point.forecast_url)?;
    let hourly = upstream.forecast_hourly(&point.forecast_hourly_url)?;
    info!(
        alerts = alerts.len(),
        daily = forecast.len(),
        hourly = hourly.len(),
        "fetched forecast"
    );

    Ok(Report {
        hourly: derive::window(&hourly, config.window)?,
        forecast: forecast.into_iter().take(config.forecast_rows).collect(),
        alerts,
        point,
        located,
        generated_at: Local::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::Error;
    use crate::locate::LocationError;
    use crate::weather::{Coordinates, HourlyPeriod};

    /// Canned upstream that records which lookups were made.
    struct Canned {
        point_status: Option<u16>,
        daily: usize,
        hourly: usize,
        calls: RefCell<Vec<String>>,
    }

    impl Canned {
        fn serving(daily: usize, hourly: usize) -> Self {
            Self {
                point_status: None,
                daily,
                hourly,
                calls: RefCell::new(vec![]),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                point_status: Some(status),
                ..Self::serving(0, 0)
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Upstream for Canned {
        fn point(&self, at: Coordinates) -> Result<Point> {
            self.calls.borrow_mut().push(format!("point {at}"));
            if let Some(status) = self.point_status {
                return Err(Error::upstream(status, "Not Found"));
            }
            Ok(Point {
                forecast_url: "daily".to_string(),
                forecast_hourly_url: "hourly".to_string(),
                city: "Honolulu".to_string(),
                state: "HI".to_string(),
            })
        }

        fn alerts(&self, _at: Coordinates) -> Result<Vec<Alert>> {
            self.calls.borrow_mut().push("alerts".to_string());
            let alert = |id: &str| Alert {
                id: id.to_string(),
                event: "Flood Watch".to_string(),
                severity: "Severe".to_string(),
                headline: "Flood Watch in effect".to_string(),
                description: String::new(),
                instruction: None,
            };
            Ok(vec![alert("a"), alert("a"), alert("b")])
        }

        fn forecast(&self, url: &str) -> Result<Vec<ForecastPeriod>> {
            self.calls.borrow_mut().push(url.to_string());
            Ok((0..self.daily)
                .map(|i| ForecastPeriod {
                    name: format!("Period {i}"),
                    detailed_forecast: "Sunny.".to_string(),
                })
                .collect())
        }

        fn forecast_hourly(&self, url: &str) -> Result<Vec<HourlyPeriod>> {
            self.calls.borrow_mut().push(url.to_string());
            Ok((0..self.hourly)
                .map(|i| HourlyPeriod {
                    start_time: format!("2024-01-15T{:02}:00:00-10:00", i % 24),
                    temperature_f: 45.0,
                    wind_speed: Some("5 mph".to_string()),
                    relative_humidity_pct: Some(70.0),
                    probability_of_precipitation_pct: Some(20.0),
                })
                .collect())
        }
    }

    fn fix() -> Located {
        Located::Fix(Coordinates::new(21.306_944, -157.858_333))
    }

    #[test]
    fn test_point_failure_stops_pipeline() {
        let upstream = Canned::failing(404);
        let result = run(&upstream, fix(), &Config::default());

        assert!(matches!(
            result,
            Err(Error::UpstreamUnavailable { status: 404, .. })
        ));
        assert_eq!(upstream.calls(), vec!["point 21.3069,-157.8583"]);
    }

    #[test]
    fn test_full_cycle() {
        let upstream = Canned::serving(14, 168);
        let report = run(&upstream, fix(), &Config::default()).unwrap();

        assert_eq!(
            upstream.calls(),
            vec!["point 21.3069,-157.8583", "alerts", "daily", "hourly"]
        );
        assert_eq!(report.point.city, "Honolulu");
        assert_eq!(report.alerts.len(), 2);
        assert_eq!(report.forecast.len(), 6);
        assert_eq!(report.hourly.len(), 8);
        assert_eq!(report.hourly[0].hour_label, "12 AM");
        assert!(report.hourly[0].wind_chill_f.is_some());
    }

    #[test]
    fn test_short_forecasts_degrade() {
        let upstream = Canned::serving(2, 3);
        let report = run(&upstream, fix(), &Config::default()).unwrap();
        assert_eq!(report.forecast.len(), 2);
        assert_eq!(report.hourly.len(), 3);
    }

    #[test]
    fn test_fallback_is_carried_through() {
        let config = Config::default();
        let located = Located::Fallback {
            at: config.fallback,
            cause: LocationError::Denied,
        };
        let report = run(&Canned::serving(1, 1), located, &config).unwrap();
        assert!(report.located.is_fallback());
    }
}
