//! HTML rendering of a [`Report`].
//!
//! The chart and map widgets are emitted as JSON specifications in `data-`
//! attributes; the page's script hands them to the charting and map
//! libraries unchanged.

use std::fmt::Write;

use serde_json::{json, Value};

use crate::config::{Config, MapConfig, Series};
use crate::error::{Error, ALTERNATIVE_PROVIDER};
use crate::pipeline::Report;
use crate::weather::{Alert, Coordinates, DisplayHourlyPeriod, ForecastPeriod, Point};

const FALLBACK_NOTICE: &str = "<b>Hello!</b> This forecast is generated from your location using \
    the U.S. National Weather Service's \
    <a href=\"https://www.weather.gov/documentation/services-web-api\">weather.gov</a> API. \
    Your location could not be determined, so the forecast for the fallback location is shown.";

/// The full page fragment for a successful cycle.
pub fn page(report: &Report, config: &Config) -> String {
    let at = report.located.coordinates();
    let mut html = String::new();

    if report.located.is_fallback() {
        let _ = writeln!(
            html,
            r#"<div class="alert alert-primary" role="alert">{FALLBACK_NOTICE}</div>"#
        );
    }
    html.push_str(&header(&report.point));
    html.push_str(&alerts(&report.alerts));
    let _ = writeln!(
        html,
        r#"<div class="container"><canvas id="myChart" data-chart="{}"></canvas></div>"#,
        escape(&chart_spec(&report.hourly, &config.series).to_string())
    );
    html.push_str(&forecast_table(&report.forecast));
    let _ = writeln!(
        html,
        r#"<div id="map" style="min-width: 100%; min-height: 50vh; position: relative" data-map="{}"></div>"#,
        escape(&map_spec(at, &config.map).to_string())
    );
    html.push_str(&footer(at));
    html
}

/// Shown instead of the page when the point lookup fails.
pub fn upstream_notice(err: &Error) -> String {
    format!(
        r#"<div id="error-container" class="alert alert-danger">{}</div>
<div class="text-center"><a href="{ALTERNATIVE_PROVIDER}">{ALTERNATIVE_PROVIDER}</a></div>
"#,
        escape(&err.user_message())
    )
}

pub fn header(point: &Point) -> String {
    format!(
        "<div class=\"container\">\n  <h1>Weather for {}, {}</h1>\n</div>\n",
        escape(&point.city),
        escape(&point.state)
    )
}

/// One collapsible panel per alert, coloured by severity class.
pub fn alerts(alerts: &[Alert]) -> String {
    let mut html = String::from("<div class=\"container\" id=\"alerts\">\n");
    for (i, alert) in alerts.iter().enumerate() {
        let _ = writeln!(
            html,
            r##"<div class="alert alert-{class}" role="alert">
  <h4 class="alert-heading"><a class="alert-link" data-bs-toggle="collapse" href="#collapse{i}">{event}</a></h4>
  <div class="collapse" id="collapse{i}">
    <hr>
    <p>{headline}</p>
    <p>{description}</p>
    <p>{instruction}</p>
  </div>
</div>"##,
            class = alert.severity_class().css_class(),
            event = escape(&alert.event),
            headline = escape(&alert.headline),
            description = escape(&alert.description),
            instruction = escape(alert.instruction.as_deref().unwrap_or_default()),
        );
    }
    html.push_str("</div>\n");
    html
}

pub fn forecast_table(periods: &[ForecastPeriod]) -> String {
    let mut html = String::from("<table class=\"table table-striped\">\n  <tbody>\n");
    for period in periods {
        let _ = writeln!(
            html,
            "    <tr>\n      <td><b>{}</b></td>\n      <td>{}</td>\n    </tr>",
            escape(&period.name),
            escape(&period.detailed_forecast)
        );
    }
    html.push_str("  </tbody>\n</table>\n");
    html
}

fn footer(at: Coordinates) -> String {
    format!(
        r#"<div class="text-center"><a href="https://forecast.weather.gov/MapClick.php?lat={}&amp;lon={}"><button type="button" class="btn btn-primary">Weather.gov forecast</button></a></div>
<p class="text-center">This forecast is generated from the U.S. National Weather Service's <a href="https://www.weather.gov/documentation/services-web-api">weather.gov API</a>.</p>
"#,
        at.latitude, at.longitude
    )
}

/// Line chart of the hourly window. Undefined values are `null`, which the
/// chart draws as gaps.
pub fn chart_spec(hourly: &[DisplayHourlyPeriod], series: &Series) -> Value {
    let labels: Vec<&str> = hourly.iter().map(|p| p.hour_label.as_str()).collect();
    let mut datasets = vec![];

    if series.temperature {
        datasets.push(point_series(
            "Temperature",
            "#FF0000",
            hourly.iter().map(|p| Some(p.period.temperature_f)),
        ));
    }
    if series.apparent_temperature {
        datasets.push(point_series(
            "Apparent Temperature",
            "#a40000",
            hourly.iter().map(|p| p.apparent_temp_f),
        ));
    }
    if series.wind_chill {
        datasets.push(point_series(
            "Wind Chill",
            "#0000CC",
            hourly.iter().map(|p| p.wind_chill_f),
        ));
    }
    if series.heat_index {
        datasets.push(point_series(
            "Heat Index",
            "#FF8C00",
            hourly.iter().map(|p| p.heat_index_f),
        ));
    }
    if series.precipitation {
        let data: Vec<Option<f64>> = hourly
            .iter()
            .map(|p| p.period.probability_of_precipitation_pct)
            .collect();
        datasets.push(json!({
            "label": "Chance of Precipitation",
            "data": data,
            "borderColor": "#add8e6",
            "backgroundColor": "#add8e6",
            "showLine": true,
            "fill": true,
            "yAxisID": "y1",
            "pointRadius": 0,
            "datalabels": { "display": false },
        }));
    }

    json!({
        "type": "line",
        "data": { "labels": labels, "datasets": datasets },
        "options": {
            "animation": false,
            "scales": {
                "y": { "type": "linear", "beginAtZero": false, "grace": "5%" },
                "y1": {
                    "type": "linear",
                    "display": false,
                    "position": "right",
                    "min": 0,
                    "max": 100,
                    "grid": { "drawOnChartArea": false },
                },
            },
            "plugins": {
                "legend": {
                    "display": true,
                    "position": "bottom",
                    "align": "start",
                    "labels": { "usePointStyle": true },
                },
            },
        },
    })
}

fn point_series(label: &str, color: &str, values: impl Iterator<Item = Option<f64>>) -> Value {
    let data: Vec<Option<f64>> = values.map(|v| v.map(|v| v.round())).collect();
    json!({
        "label": label,
        "data": data,
        "borderColor": color,
        "backgroundColor": color,
        "showLine": false,
        "yAxisID": "y",
    })
}

/// Non-interactive map centred on `at` with the NWS radar overlay.
pub fn map_spec(at: Coordinates, map: &MapConfig) -> Value {
    json!({
        "style": map.style_url,
        "center": [at.longitude, at.latitude],
        "zoom": map.zoom,
        "interactive": false,
        "marker": [at.longitude, at.latitude],
        "sources": {
            "nws_radar": {
                "type": "raster",
                "tiles": [map.radar_wms_url],
                "tileSize": 256,
            },
        },
        "layers": [{ "id": "nws_radar", "type": "raster", "source": "nws_radar" }],
    })
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
