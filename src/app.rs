use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::{time::Duration, time::Instant};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};

use swa::pipeline::Report;
use swa::weather::{Alert, DisplayHourlyPeriod, ForecastPeriod, SeverityClass};
use swa::Result;

const MISSING: &str = "--";
const TICK: Duration = Duration::from_millis(250);
const REFRESH: Duration = Duration::from_secs(15 * 60);

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    get_data: impl Fn() -> Result<Report>,
) -> io::Result<()> {
    let mut outcome = get_data();
    let mut last_fetch = Instant::now();
    loop {
        terminal.draw(|f| ui(f, &outcome))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('r') => {
                            outcome = get_data();
                            last_fetch = Instant::now();
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_fetch.elapsed() >= REFRESH {
            last_fetch = Instant::now();
            outcome = get_data();
        }
    }
}

fn block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Yellow),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

fn or_missing(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.0}{unit}"),
        None => MISSING.to_string(),
    }
}

fn severity_color(class: SeverityClass) -> Color {
    match class {
        SeverityClass::Danger => Color::Red,
        SeverityClass::Warning => Color::Yellow,
        SeverityClass::Info => Color::Green,
    }
}

fn display_forecast(period: &ForecastPeriod) -> Vec<Line<'_>> {
    vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                period.name.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                period.detailed_forecast.as_str(),
                Style::default().fg(Color::Green),
            ),
        ]),
    ]
}

fn display_alert(alert: &Alert) -> Vec<Line<'_>> {
    let color = severity_color(alert.severity_class());
    vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::raw(format!("{:10}", "Event")),
            Span::styled(
                alert.event.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(" "),
            Span::raw(format!("{:10}", "Severity")),
            Span::styled(alert.severity.as_str(), Style::default().fg(color)),
        ]),
        Line::from(vec![
            Span::raw(" "),
            Span::raw(format!("{:10}", "Headline")),
            Span::styled(alert.headline.as_str(), Style::default().fg(Color::Green)),
        ]),
    ]
}

fn display_hourly(hourly: &[DisplayHourlyPeriod]) -> Table<'_> {
    let header = Row::new(vec![
        " Hour", "Temp", "Feels", "Chill", "Heat", "Precip", "Wind",
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows = hourly.iter().map(|p| {
        Row::new(vec![
            Cell::from(format!(" {}", p.hour_label)),
            Cell::from(format!("{:.0} F", p.period.temperature_f))
                .style(Style::default().fg(Color::Green)),
            Cell::from(or_missing(p.apparent_temp_f, " F")),
            Cell::from(or_missing(p.wind_chill_f, " F")).style(Style::default().fg(Color::Blue)),
            Cell::from(or_missing(p.heat_index_f, " F")).style(Style::default().fg(Color::Red)),
            Cell::from(or_missing(p.period.probability_of_precipitation_pct, "%")),
            Cell::from(or_missing(p.wind_speed_mph, " mph")),
        ])
    });

    Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block("Hourly"))
}

fn display_headline(report: &Report) -> Paragraph<'_> {
    let at = report.located.coordinates();
    let mut where_line = vec![
        Span::raw(" "),
        Span::styled(format!("{at}"), Style::default().fg(Color::Blue)),
        Span::raw(format!(
            "  updated {}",
            report.generated_at.format("%d-%m-%Y %H:%M")
        )),
    ];
    if report.located.is_fallback() {
        where_line.push(Span::styled(
            "  (location unavailable, showing fallback)",
            Style::default().fg(Color::Red),
        ));
    }

    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(" Weather for "),
            Span::styled(
                format!("{}, {}", report.point.city, report.point.state),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(where_line),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

fn ui(f: &mut Frame, outcome: &Result<Report>) {
    let report = match outcome {
        Ok(report) => report,
        Err(err) => {
            let notice = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!(" {}", err.user_message()),
                    Style::default().fg(Color::Red),
                )),
                Line::from(""),
                Line::from(" Press r to retry, q to quit."),
            ])
            .wrap(Wrap { trim: false })
            .block(block("Error"));
            f.render_widget(notice, f.area());
            return;
        }
    };

    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(f.area());

    f.render_widget(display_headline(report), vert_layout[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vert_layout[1]);

    let lchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(report.hourly.len() as u16 + 3),
            Constraint::Min(0),
        ])
        .split(chunks[0]);

    f.render_widget(display_hourly(&report.hourly), lchunks[0]);

    let alert_items: Vec<ListItem> = if report.alerts.is_empty() {
        vec![ListItem::new(format!("\n  {MISSING}"))]
    } else {
        report
            .alerts
            .iter()
            .map(|a| ListItem::new(display_alert(a)))
            .collect()
    };
    f.render_widget(List::new(alert_items).block(block("Alerts")), lchunks[1]);

    let forecast_items: Vec<ListItem> = report
        .forecast
        .iter()
        .map(|p| ListItem::new(display_forecast(p)))
        .collect();
    f.render_widget(
        List::new(forecast_items).block(block("Forecast")),
        chunks[1],
    );
}
