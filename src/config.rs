//! User configuration — keybindings, animation settings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scrollspy/config.toml` (default `~/.config/scrollspy/config.toml`).
//! Lines that fail to parse are reported and skipped; everything else keeps
//! its default.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::scroller::{ScrollOptions, DEFAULT_DURATION, INITIAL_JUMP_PROGRESS};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PrevSection,
    NextSection,
    Top,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::PrevSection,
        Action::NextSection,
        Action::Top,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::Top => "top",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Short label for the status bar (e.g. `"↓"`, `"Ctrl+n"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            _ => self.key_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Serialise to config-file format (e.g. `"Shift+Tab"`, `"j"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.key_name())
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        s
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+n"`, `"Shift+Tab"`, `"k"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            // Keep the case of single characters.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── errors ────────────

/// A rejected config line.  Reported at load time; the line is skipped.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("line {line}: expected `key = value`")]
    Syntax { line: usize },

    #[error("line {line}: unknown setting `{key}`")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and animation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Length of a section-to-section scroll.
    pub scroll_duration_ms: u64,
    /// Linear progress whose eased value is applied on the frame a scroll starts.
    pub initial_jump: f64,
    /// Interval between animation frames.
    pub frame_ms: u64,
    /// Rows moved per arrow key or wheel notch.
    pub scroll_step_rows: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            scroll_duration_ms: DEFAULT_DURATION.as_millis() as u64,
            initial_jump: INITIAL_JUMP_PROGRESS,
            frame_ms: 16,
            scroll_step_rows: 3,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(
            Action::PrevSection,
            vec![KeyBind::new(BackTab, KeyModifiers::SHIFT), KeyBind::new(Char('p'), n)],
        );
        m.insert(Action::NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(Char('n'), n)]);
        m.insert(Action::Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Scroll options derived from the animation settings.
    pub fn scroll_options(&self) -> ScrollOptions {
        ScrollOptions {
            duration: Duration::from_millis(self.scroll_duration_ms),
            initial_jump: self.initial_jump,
            ..ScrollOptions::default()
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: next section | {}: previous | 1-9: jump | {}: top | {}: quit",
            self.short_binding(Action::NextSection),
            self.short_binding(Action::PrevSection),
            self.short_binding(Action::Top),
            self.short_binding(Action::Quit),
        )
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.  Rejected lines are
    /// logged and skipped.
    pub fn load() -> Self {
        let path = config_path();
        let Ok(contents) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        let (config, errors) = Self::parse(&contents);
        for err in errors {
            tracing::warn!("{}: {err}", path.display());
        }
        config
    }

    /// Persist current config to disk and return where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                errors.push(ConfigError::Syntax { line: line_no });
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let invalid = || ConfigError::InvalidValue {
                line: line_no,
                key: key.to_string(),
                value: value.to_string(),
            };

            match key {
                "scroll_duration_ms" => match value.parse::<u64>() {
                    Ok(v) => config.scroll_duration_ms = v.min(10_000),
                    Err(_) => errors.push(invalid()),
                },
                "initial_jump" => match value.parse::<f64>() {
                    Ok(v) if v.is_finite() => config.initial_jump = v.clamp(0.0, 1.0),
                    _ => errors.push(invalid()),
                },
                "frame_ms" => match value.parse::<u64>() {
                    Ok(v) => config.frame_ms = v.clamp(4, 100),
                    Err(_) => errors.push(invalid()),
                },
                "scroll_step_rows" => match value.parse::<u16>() {
                    Ok(v) => config.scroll_step_rows = v.clamp(1, 50),
                    Err(_) => errors.push(invalid()),
                },
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        errors.push(ConfigError::UnknownKey {
                            line: line_no,
                            key: key.to_string(),
                        });
                        continue;
                    };
                    let parsed: Option<Vec<KeyBind>> = value
                        .split(',')
                        .map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                        .collect();
                    match parsed {
                        Some(binds) if !binds.is_empty() => {
                            config.bindings.insert(action, binds);
                        }
                        _ => errors.push(invalid()),
                    }
                }
            }
        }

        (config, errors)
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# scrollspy configuration".to_string(),
            String::new(),
            "# Animation".to_string(),
            format!("scroll_duration_ms = {}", self.scroll_duration_ms),
            format!("initial_jump = {}", self.initial_jump),
            format!("frame_ms = {}", self.frame_ms),
            format!("scroll_step_rows = {}", self.scroll_step_rows),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/scrollspy/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn serialised_config_parses_back_cleanly() {
        let mut config = AppConfig::default();
        config.scroll_duration_ms = 900;
        config.initial_jump = 0.25;
        let (parsed, errors) = AppConfig::parse(&config.serialise());
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(parsed, config);
    }

    #[test]
    fn values_are_clamped() {
        let (config, errors) = AppConfig::parse(
            "scroll_duration_ms = 99999\ninitial_jump = 3\nframe_ms = 1\nscroll_step_rows = 0",
        );
        assert!(errors.is_empty());
        assert_eq!(config.scroll_duration_ms, 10_000);
        assert_eq!(config.initial_jump, 1.0);
        assert_eq!(config.frame_ms, 4);
        assert_eq!(config.scroll_step_rows, 1);
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let (config, errors) = AppConfig::parse(
            "# comment\nframe_ms = fast\nnot a setting\nwarp_speed = 9\nquit = Hyper+q\nnext_section = Ctrl+n",
        );
        assert_eq!(
            errors,
            vec![
                ConfigError::InvalidValue {
                    line: 2,
                    key: "frame_ms".into(),
                    value: "fast".into()
                },
                ConfigError::Syntax { line: 3 },
                ConfigError::UnknownKey {
                    line: 4,
                    key: "warp_speed".into()
                },
                ConfigError::InvalidValue {
                    line: 5,
                    key: "quit".into(),
                    value: "Hyper+q".into()
                },
            ]
        );
        assert_eq!(config.frame_ms, 16);
        assert_eq!(config.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
        assert_eq!(
            config.bindings[&Action::NextSection],
            vec![KeyBind::new(KeyCode::Char('n'), KeyModifiers::CONTROL)]
        );
    }

    #[test]
    fn match_key_prefers_more_modifiers() {
        let mut config = AppConfig::default();
        config
            .bindings
            .insert(Action::Top, vec![KeyBind::new(KeyCode::Char('n'), KeyModifiers::CONTROL)]);

        assert_eq!(
            config.match_key(key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(Action::NextSection)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(Action::Top)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_strings_round_trip_with_case() {
        assert_eq!(
            KeyBind::parse("Shift+G"),
            Some(KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT))
        );
        assert_eq!(KeyBind::parse("f5"), Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Meta+x"), None);
        assert_eq!(KeyBind::parse(""), None);
    }

    #[test]
    fn scroll_options_follow_settings() {
        let mut config = AppConfig::default();
        config.scroll_duration_ms = 0;
        let options = config.scroll_options();
        assert_eq!(options.duration, Duration::ZERO);
        assert_eq!(options.initial_jump, INITIAL_JUMP_PROGRESS);
    }
}
