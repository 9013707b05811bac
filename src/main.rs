use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io};
use tracing_subscriber::EnvFilter;

mod app;
mod cli;

use crate::app::run_app;
use crate::cli::Args;

use swa::config::Config;
use swa::locate::{self, ManualFix};
use swa::nws::Client;
use swa::weather::Coordinates;
use swa::{pipeline, render};

fn load_config(args: &Args) -> swa::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(window) = args.window {
        config.window = window;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // stderr shares the terminal with the viewer.
    let default_filter = if args.html { "warn" } else { "off" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    let client = Client::new(&config.api)?;
    let fix = ManualFix::new(
        args.lat
            .zip(args.lon)
            .map(|(lat, lon)| Coordinates::new(lat, lon)),
    );

    let get_data = || {
        let located = locate::resolve(&fix, &config);
        pipeline::run(&client, located, &config)
    };

    if args.html {
        match get_data() {
            Ok(report) => print!("{}", render::page(&report, &config)),
            Err(err @ swa::Error::UpstreamUnavailable { .. }) => {
                print!("{}", render::upstream_notice(&err));
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        }
        return Ok(());
    }

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let res = run_app(&mut terminal, get_data);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}
