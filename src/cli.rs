use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "NWS forecast for a location";

const LONG_ABOUT: &str = "
Local forecast, active alerts and feels-like temperatures sourced from the U.S. National Weather
Service (https://api.weather.gov).

Pass the location with --lat and --lon. Without a location, the fallback location from the
configuration is shown. Locations outside NWS coverage report an error instead of a forecast.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(long, allow_negative_numbers = true, requires = "lon", help = "Latitude in decimal degrees")]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "lat", help = "Longitude in decimal degrees")]
    pub lon: Option<f64>,

    #[arg(short, long, help = "JSON configuration file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Number of hourly periods to chart")]
    pub window: Option<usize>,

    #[arg(long, help = "Print the HTML page to stdout instead of opening the viewer")]
    pub html: bool,
}
