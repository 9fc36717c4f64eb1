//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

/// One colour per backdrop frame; cycles if there are more frames.
const BACKDROPS: &[Color] = &[
    Color::Rgb(92, 70, 12),
    Color::Rgb(18, 62, 48),
    Color::Rgb(20, 44, 86),
];

impl Theme {
    // ── page ───────────────────────────────────────────────────
    pub fn section_style(index: usize) -> Style {
        let bg = if index % 2 == 0 {
            Color::Reset
        } else {
            Color::Rgb(24, 24, 28)
        };
        Style::default().bg(bg).fg(Color::White)
    }

    pub fn backdrop_style(frame: usize) -> Style {
        Style::default()
            .bg(BACKDROPS[frame % BACKDROPS.len()])
            .fg(Color::White)
    }

    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn active_marker_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn caption_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_docked_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn nav_floating_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn nav_active_style() -> Style {
        Style::default()
            .bg(Color::Green)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
