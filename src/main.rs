//! A terminal preview of a one-page site with smooth section scrolling.
//!
//! Run the binary to browse the page; navigation links scroll with an
//! eased animation, the nav highlights the section in view and the
//! services backdrop changes as it scrolls past.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Alignment,
    widgets::Paragraph,
    Terminal,
};
use tokio::time::{interval, MissedTickBehavior};

use crate::app::{
    document::Document,
    event::{spawn_event_reader, AppEvent},
    handler,
    page::SITE,
    page_view::PageView,
    state::AppState,
    viewport::TerminalViewport,
};
use crate::core::scroller::ScrollOutcome;
use crate::core::viewport::{MonotonicClock, Viewport};
use crate::ui::{layout::AppLayout, nav_bar::NavBar, page_widget::PageWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Smooth-scrolling one-page site preview")]
struct Cli {
    /// Section to scroll to on start (e.g. `services`).
    #[arg(long)]
    section: Option<String>,

    /// Scroll animation length in milliseconds.
    #[arg(long = "duration-ms")]
    duration_ms: Option<u64>,

    /// Linear progress applied on the first frame of a scroll (0-1).
    #[arg(long = "initial-jump", value_parser = parse_fraction)]
    initial_jump: Option<f64>,

    /// Interval between animation frames in milliseconds.
    #[arg(long = "frame-ms")]
    frame_ms: Option<u64>,

    /// Write trace output here instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Save the effective configuration and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

type Tui = Terminal<CrosstermBackend<Stderr>>;

fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("`{s}` is not between 0 and 1"))
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = config::AppConfig::load();
    if let Some(ms) = cli.duration_ms {
        config.scroll_duration_ms = ms.min(10_000);
    }
    if let Some(jump) = cli.initial_jump {
        config.initial_jump = jump;
    }
    if let Some(ms) = cli.frame_ms {
        config.frame_ms = ms.clamp(4, 100);
    }

    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config, cli.section.as_deref()).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Tui, config: config::AppConfig, section: Option<&str>) -> Result<()> {
    let size = terminal.size()?;
    let viewport = TerminalViewport::new(Document::layout(&SITE), size.height.saturating_sub(1));
    let options = config.scroll_options();
    let page = PageView::mount(viewport, MonotonicClock::new(), &SITE, options)?;
    let mut state = AppState::new(page, &SITE, config);

    if let Some(id) = section {
        let outcome = state.page.navigate(id);
        if let ScrollOutcome::Skipped = state.track(outcome) {
            state.status_message = Some(format!("No section `{id}`"));
        }
    }

    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = interval(state.config.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());
            let viewport = state.page.viewport();
            let derived = state.page.derived();

            frame.render_widget(
                PageWidget {
                    document: viewport.document(),
                    page: state.site,
                    first_row: viewport.first_row(),
                    derived,
                },
                layout.page_area,
            );
            if viewport.header_height().is_some() {
                frame.render_widget(
                    NavBar {
                        title: state.site.title,
                        sections: state.page.sections(),
                        active: derived.active_section,
                        floating: derived.nav_floating,
                    },
                    layout.nav_area,
                );
            }

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);

            let percent = (viewport.scrolled_fraction() * 100.0).round() as u32;
            let moving = if state.page.is_animating() { "↕ " } else { "" };
            let position = Paragraph::new(format!("{moving}{percent:>3}% "))
                .alignment(Alignment::Right)
                .style(Theme::status_bar_style());
            frame.render_widget(position, layout.status_area);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => {
                        state.status_message = None;
                        handler::handle_key(&mut state, k);
                    }
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, h) => {
                        state.page.viewport_mut().resize(h.saturating_sub(1));
                    }
                }
            }

            _ = frames.tick(), if state.frame_pending() => {
                state.run_frame();
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    let AppState { page, .. } = state;
    let viewport = page.unmount();
    tracing::debug!("unmounted at offset {}", viewport.scroll_offset());

    Ok(())
}
