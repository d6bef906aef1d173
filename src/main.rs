//! Loopback demo - hosts the feedback widget in a terminal session.
//!
//! A minimal host application: it owns the terminal, runs the draw loop,
//! forwards key events to the widget and reacts to the events the widget
//! emits. Everything interesting lives in the library.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use loopback::config::{Position, RatingType, Variant, WidgetConfig};
use loopback::constants::APP_NAME;
use loopback::sink::MockSink;
use loopback::tui::{restore_terminal, setup_terminal, Component, FeedbackWidget, WidgetEvent};

/// Loopback - feedback widget demo host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a widget config file (TOML or JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Feedback channel identifier
    #[arg(long, default_value = "demo")]
    source_id: String,

    /// Presentation variant: embedded or modal
    #[arg(long, value_name = "VARIANT")]
    variant: Option<String>,

    /// Anchor position: bottom-right, bottom-left or center
    #[arg(long, value_name = "POSITION")]
    position: Option<String>,

    /// Rating scale: emoji, star or number
    #[arg(long, value_name = "TYPE")]
    rating_type: Option<String>,

    /// Theme mode: auto, dark or light
    #[arg(long, default_value = "auto")]
    theme: String,

    /// Start with the widget open (uncontrolled modal)
    #[arg(long)]
    default_open: bool,

    /// Hide the floating trigger button
    #[arg(long)]
    hide_trigger: bool,

    /// Run in controlled mode; Ctrl+O toggles the external open value
    #[arg(long)]
    controlled: bool,

    /// Make the mock sink reject every submission
    #[arg(long)]
    fail_submissions: bool,
}

fn init_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("loopback");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    let log_file = fs::File::create(log_dir.join("loopback.log"))
        .context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_config(cli: &Cli) -> Result<WidgetConfig> {
    let mut config = match &cli.config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::new(cli.source_id.clone()),
    };

    if let Some(variant) = &cli.variant {
        config.variant = match variant.as_str() {
            "embedded" => Variant::Embedded,
            "modal" => Variant::Modal,
            other => anyhow::bail!("Unknown variant: {other} (expected embedded or modal)"),
        };
    }

    if let Some(position) = &cli.position {
        config.position = match position.as_str() {
            "bottom-right" => Position::BottomRight,
            "bottom-left" => Position::BottomLeft,
            "center" => Position::Center,
            other => anyhow::bail!(
                "Unknown position: {other} (expected bottom-right, bottom-left or center)"
            ),
        };
    }

    if let Some(rating_type) = &cli.rating_type {
        config.rating_type = match rating_type.as_str() {
            "emoji" => RatingType::Emoji,
            "star" => RatingType::Star,
            "number" => RatingType::Number,
            other => anyhow::bail!("Unknown rating type: {other} (expected emoji, star or number)"),
        };
    }

    if cli.default_open {
        config.default_open = true;
    }
    if cli.hide_trigger {
        config.show_trigger = false;
    }
    if cli.controlled {
        config.is_open = Some(config.default_open);
    }

    // CLI theme mode fills in dark_mode only when the config file left it unset
    if config.theme.dark_mode.is_none() {
        config.theme.dark_mode = Some(match cli.theme.as_str() {
            "dark" => true,
            "light" => false,
            "auto" => matches!(
                dark_light::detect(),
                Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_)
            ),
            other => anyhow::bail!("Unknown theme mode: {other} (expected auto, dark or light)"),
        });
    }

    Ok(config)
}

fn run_demo(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    widget: &mut FeedbackWidget,
    controlled: bool,
) -> Result<()> {
    let mut external_open = widget.is_open();

    loop {
        terminal.draw(|f| {
            let help = if controlled {
                format!(" {APP_NAME} demo  Ctrl+Q Quit  Ctrl+O Toggle open")
            } else {
                format!(" {APP_NAME} demo  Ctrl+Q Quit")
            };
            let header = Paragraph::new(Span::styled(
                help,
                Style::default().add_modifier(Modifier::DIM),
            ));
            f.render_widget(header, f.area());
            widget.render(f, f.area());
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Char('q' | 'c') if ctrl => return Ok(()),
                    KeyCode::Char('o') if ctrl && controlled => {
                        external_open = !external_open;
                        widget.set_open(external_open);
                        info!(external_open, "host toggled external open value");
                    }
                    _ => {
                        if let Some(widget_event) = widget.handle_input(key) {
                            handle_widget_event(widget, &widget_event, &mut external_open, controlled);
                        }
                    }
                }
            }
        }

        if let Some(widget_event) = widget.tick(Instant::now()) {
            handle_widget_event(widget, &widget_event, &mut external_open, controlled);
        }
    }
}

fn handle_widget_event(
    widget: &mut FeedbackWidget,
    widget_event: &WidgetEvent,
    external_open: &mut bool,
    controlled: bool,
) {
    match widget_event {
        WidgetEvent::Opened => info!("widget opened"),
        WidgetEvent::SubmissionAccepted => info!("submission accepted"),
        WidgetEvent::SubmissionFailed(reason) => info!(reason, "submission failed"),
        WidgetEvent::CloseRequested => {
            info!("widget requested close");
            if controlled {
                // The host owns visibility in controlled mode
                *external_open = false;
                widget.set_open(false);
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = build_config(&cli)?;
    let controlled = config.is_controlled();

    let sink = if cli.fail_submissions {
        MockSink::rejecting(
            Duration::from_millis(loopback::constants::MOCK_SINK_DELAY_MS),
            "mock sink rejected the submission",
        )
    } else {
        MockSink::new()
    };
    let mut widget = FeedbackWidget::new(config)?.with_sink(sink);

    let mut terminal = setup_terminal()?;
    let result = run_demo(&mut terminal, &mut widget, controlled);
    restore_terminal(terminal)?;
    result
}
