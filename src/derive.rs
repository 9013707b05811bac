//! Pure derivations from upstream forecast data to display values.
//!
//! Nothing here touches the network. Values that are not defined for an
//! input (wind chill on a warm day, apparent temperature without humidity)
//! come back as `None`; payloads that cannot be read come back as errors so
//! that a wrong number is never shown.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::units::{speed, temperature};
use crate::weather::{Alert, DisplayHourlyPeriod, HourlyPeriod};

/// Hourly periods shown in the chart by default.
pub const DEFAULT_WINDOW: usize = 8;

/// Byte offset of the hour in `YYYY-MM-DDTHH:mm:ss±HH:MM`.
const HOUR_OFFSET: usize = 11;

/// 12-hour label for the hour field of an ISO-8601 timestamp.
///
/// The hour is read from its fixed offset; the upstream timestamp is already
/// in the location's local offset, so no timezone conversion is done.
pub fn hour_label(timestamp: &str) -> Result<String> {
    let invalid = || Error::InvalidTimestamp(timestamp.to_string());

    let field = timestamp
        .get(HOUR_OFFSET..HOUR_OFFSET + 2)
        .filter(|f| f.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(invalid)?;
    let hour: u8 = field.parse().map_err(|_| invalid())?;

    format_hour(hour).ok_or_else(invalid)
}

/// `None` for hours outside `0..=23`.
pub fn format_hour(hour: u8) -> Option<String> {
    let label = match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{hour} AM"),
        12 => "12 PM".to_string(),
        13..=23 => format!("{} PM", hour - 12),
        _ => return None,
    };
    Some(label)
}

/// Parses an upstream wind speed such as `"10 mph"`.
///
/// Ranges (`"5 to 10 mph"`) resolve to their first number.
pub fn parse_wind_speed(raw: &str) -> Result<f64> {
    let malformed = || Error::MalformedWindSpeed(raw.to_string());

    let mut tokens = raw.split_whitespace();
    let value: f64 = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .filter(|v: &f64| v.is_finite() && *v >= 0.0)
        .ok_or_else(malformed)?;

    match tokens.last() {
        Some(unit) if unit.eq_ignore_ascii_case("mph") => Ok(value),
        _ => Err(malformed()),
    }
}

/// NWS wind chill in Fahrenheit, defined below 50 °F with wind over 3 mph.
pub fn wind_chill(temp_f: f64, wind_mph: f64) -> Option<f64> {
    if temp_f >= 50.0 || wind_mph <= 3.0 {
        return None;
    }
    let v = wind_mph.powf(0.16);
    Some(35.74 + 0.6215 * temp_f - 35.75 * v + 0.4275 * temp_f * v)
}

/// Feels-like temperature blending humidity and wind, in Fahrenheit.
///
/// Uses the vapour-pressure form `Tc + 0.33e - 0.7v - 4.0`. The formula has
/// a pole at `Tc = -237.7`, far outside any observed temperature.
pub fn apparent_temperature(
    temp_f: Option<f64>,
    humidity_pct: Option<f64>,
    wind_mph: Option<f64>,
) -> Option<f64> {
    let (temp_f, rh, wind_mph) = (temp_f?, humidity_pct?, wind_mph?);

    let tc = temperature::f2c(temp_f);
    let wind_ms = speed::mph2ms(wind_mph);
    let vapour = (rh / 100.0) * 6.105 * (17.27 * tc / (237.7 + tc)).exp();

    Some(temperature::c2f(tc + 0.33 * vapour - 0.7 * wind_ms - 4.0))
}

/// NWS heat index (Rothfusz regression), defined above 80 °F.
pub fn heat_index(temp_f: f64, humidity_pct: Option<f64>) -> Option<f64> {
    let rh = humidity_pct?;
    if temp_f <= 80.0 {
        return None;
    }
    let t = temp_f;
    let mut hi = -42.379 + 2.049_015_23 * t + 10.143_331_27 * rh
        - 0.224_755_41 * t * rh
        - 6.837_83e-3 * t * t
        - 5.481_717e-2 * rh * rh
        + 1.228_74e-3 * t * t * rh
        + 8.528_2e-4 * t * rh * rh
        - 1.99e-6 * t * t * rh * rh;

    if rh < 13.0 && t < 112.0 {
        hi -= ((13.0 - rh) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    } else if rh > 85.0 && t < 87.0 {
        hi += ((rh - 85.0) / 10.0) * ((87.0 - t) / 5.0);
    }
    Some(hi)
}

/// Attaches the derived display values to one hourly period.
pub fn display_period(period: &HourlyPeriod) -> Result<DisplayHourlyPeriod> {
    let hour_label = hour_label(&period.start_time)?;
    let wind_speed_mph = period
        .wind_speed
        .as_deref()
        .map(parse_wind_speed)
        .transpose()?;
    let temp = period.temperature_f;

    Ok(DisplayHourlyPeriod {
        hour_label,
        wind_speed_mph,
        wind_chill_f: wind_speed_mph.and_then(|v| wind_chill(temp, v)),
        apparent_temp_f: apparent_temperature(
            Some(temp),
            period.relative_humidity_pct,
            wind_speed_mph,
        ),
        heat_index_f: heat_index(temp, period.relative_humidity_pct),
        period: period.clone(),
    })
}

/// The first `min(size, len)` periods, in order, with derived values.
pub fn window(periods: &[HourlyPeriod], size: usize) -> Result<Vec<DisplayHourlyPeriod>> {
    periods.iter().take(size).map(display_period).collect()
}

/// Drops alerts whose `id` was already seen, keeping the first occurrence.
pub fn dedupe_alerts(alerts: Vec<Alert>) -> Vec<Alert> {
    let mut seen = HashSet::new();
    alerts
        .into_iter()
        .filter(|a| seen.insert(a.id.clone()))
        .collect()
}
