//! User configuration: keybindings, effect constants, and persistence.
//!
//! Everything is stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/motion-lab/config.toml` (default
//! `~/.config/motion-lab/config.toml`).  Values that fail validation are
//! logged and replaced by their defaults; a bad file never stops startup.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::pull_refresh::PullConfig;
use crate::core::swipe_row::SwipeConfig;
use crate::error::ConfigError;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextDemo,
    PrevDemo,
    Up,
    Down,
    Activate,
    Delete,
    Search,
    Cancel,
    Restart,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help overlay).
    pub const ALL: &[Action] = &[
        Action::NextDemo,
        Action::PrevDemo,
        Action::Up,
        Action::Down,
        Action::Activate,
        Action::Delete,
        Action::Search,
        Action::Cancel,
        Action::Restart,
        Action::Help,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::NextDemo => "Next Demo",
            Action::PrevDemo => "Previous Demo",
            Action::Up => "Scroll / Select Up",
            Action::Down => "Scroll / Select Down",
            Action::Activate => "Toggle / Pull / Start",
            Action::Delete => "Delete Open Row",
            Action::Search => "Focus Search",
            Action::Cancel => "Cancel / Close",
            Action::Restart => "Restart Demo",
            Action::Help => "Show Controls",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::NextDemo => "next_demo",
            Action::PrevDemo => "prev_demo",
            Action::Up => "up",
            Action::Down => "down",
            Action::Activate => "activate",
            Action::Delete => "delete",
            Action::Search => "search",
            Action::Cancel => "cancel",
            Action::Restart => "restart",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Shift+Tab"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "Tab".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Serialise to config-file format (e.g. `"Shift+BackTab"`, `"q"`).
    fn to_config_string(&self) -> String {
        let key = match self.code {
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
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+BackTab"`, `"q"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
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
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── effects ───────────

/// Tunable constants for every demo, in terminal cells and milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectConfig {
    /// Rows per glyph in a digit strip.
    pub glyph_height: f64,
    /// Columns revealed behind an open swipe row.
    pub delete_width: f64,
    /// Fraction of `delete_width` a drag must cover to commit.
    pub snap_fraction: f64,
    /// Height of the pinned upper region in the parallax demo.
    pub header_height: f64,
    /// How far the upper region drifts while scrolled away.
    pub parallax_depth: f64,
    pub pull_threshold: f64,
    pub pull_max: f64,
    pub pull_resistance: f64,
    pub settle_ms: u64,
    pub roll_ms: u64,
    pub refresh_ms: u64,
    pub section_count: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            glyph_height: 3.0,
            delete_width: 12.0,
            snap_fraction: 0.2,
            header_height: 8.0,
            parallax_depth: 3.0,
            pull_threshold: 4.0,
            pull_max: 12.0,
            pull_resistance: 0.5,
            settle_ms: 300,
            roll_ms: 400,
            refresh_ms: 2000,
            section_count: 9,
        }
    }
}

impl EffectConfig {
    /// Every key this section understands, in file order.
    const KEYS: &[&str] = &[
        "glyph_height",
        "delete_width",
        "snap_fraction",
        "header_height",
        "parallax_depth",
        "pull_threshold",
        "pull_max",
        "pull_resistance",
        "settle_ms",
        "roll_ms",
        "refresh_ms",
        "section_count",
    ];

    pub fn swipe(&self) -> SwipeConfig {
        SwipeConfig {
            delete_width: self.delete_width,
            snap_fraction: self.snap_fraction,
            settle: Duration::from_millis(self.settle_ms),
        }
    }

    pub fn pull(&self) -> PullConfig {
        PullConfig {
            threshold: self.pull_threshold,
            max_pull: self.pull_max,
            resistance: self.pull_resistance,
            refresh: Duration::from_millis(self.refresh_ms),
            ..PullConfig::default()
        }
    }

    pub fn roll(&self) -> Duration {
        Duration::from_millis(self.roll_ms)
    }

    /// Check every constant against its allowed range, then the pairs that
    /// depend on each other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in Self::KEYS {
            self.validate_field(key)?;
        }
        in_range("parallax_depth", self.parallax_depth, 0.0, self.header_height)?;
        in_range("pull_max", self.pull_max, self.pull_threshold, f64::MAX)?;
        Ok(())
    }

    fn validate_field(&self, key: &str) -> Result<(), ConfigError> {
        match key {
            "glyph_height" => positive(key, self.glyph_height),
            "delete_width" => positive(key, self.delete_width),
            "snap_fraction" => in_range(key, self.snap_fraction, 0.01, 0.5),
            "header_height" => positive(key, self.header_height),
            "parallax_depth" => in_range(key, self.parallax_depth, 0.0, f64::MAX),
            "pull_threshold" => positive(key, self.pull_threshold),
            "pull_max" => positive(key, self.pull_max),
            "pull_resistance" => in_range(key, self.pull_resistance, 0.01, 1.0),
            "section_count" => positive(key, self.section_count as f64),
            _ => Ok(()),
        }
    }

    /// Apply a single `key = value` pair.  On error the field is untouched.
    /// Constraints between fields are left to [`EffectConfig::validate`].
    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let float = || {
            value.parse::<f64>().map_err(|_| ConfigError::Unparsable {
                key: key.to_string(),
                value: value.to_string(),
            })
        };
        let int = || {
            value.parse::<u64>().map_err(|_| ConfigError::Unparsable {
                key: key.to_string(),
                value: value.to_string(),
            })
        };

        let mut next = self.clone();
        match key {
            "glyph_height" => next.glyph_height = float()?,
            "delete_width" => next.delete_width = float()?,
            "snap_fraction" => next.snap_fraction = float()?,
            "header_height" => next.header_height = float()?,
            "parallax_depth" => next.parallax_depth = float()?,
            "pull_threshold" => next.pull_threshold = float()?,
            "pull_max" => next.pull_max = float()?,
            "pull_resistance" => next.pull_resistance = float()?,
            "settle_ms" => next.settle_ms = int()?,
            "roll_ms" => next.roll_ms = int()?,
            "refresh_ms" => next.refresh_ms = int()?,
            "section_count" => next.section_count = int()? as usize,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        next.validate_field(key)?;
        *self = next;
        Ok(())
    }

    fn value_string(&self, key: &str) -> String {
        match key {
            "glyph_height" => self.glyph_height.to_string(),
            "delete_width" => self.delete_width.to_string(),
            "snap_fraction" => self.snap_fraction.to_string(),
            "header_height" => self.header_height.to_string(),
            "parallax_depth" => self.parallax_depth.to_string(),
            "pull_threshold" => self.pull_threshold.to_string(),
            "pull_max" => self.pull_max.to_string(),
            "pull_resistance" => self.pull_resistance.to_string(),
            "settle_ms" => self.settle_ms.to_string(),
            "roll_ms" => self.roll_ms.to_string(),
            "refresh_ms" => self.refresh_ms.to_string(),
            "section_count" => self.section_count.to_string(),
            _ => String::new(),
        }
    }
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            key: key.to_string(),
            value,
        })
    }
}

fn in_range(key: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value,
            min,
            max,
        })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and effect constants.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub effects: EffectConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            effects: EffectConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(Action::NextDemo, vec![KeyBind::new(Tab, n), KeyBind::new(Right, n)]);
        m.insert(Action::PrevDemo, vec![KeyBind::new(BackTab, shift), KeyBind::new(Left, n)]);
        m.insert(Action::Up, vec![KeyBind::new(KeyCode::Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::Down, vec![KeyBind::new(KeyCode::Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::Activate, vec![KeyBind::new(Enter, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::Delete, vec![KeyBind::new(Char('d'), n), KeyBind::new(KeyCode::Delete, n)]);
        m.insert(Action::Search, vec![KeyBind::new(Char('/'), n)]);
        m.insert(Action::Cancel, vec![KeyBind::new(Esc, n)]);
        m.insert(Action::Restart, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Action::Help, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Char('c'), ctrl)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: demo | {}: act | {}: restart | {}: controls | {}: quit",
            self.short_binding(Action::NextDemo),
            self.short_binding(Action::Activate),
            self.short_binding(Action::Restart),
            self.short_binding(Action::Help),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not read config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = lineno + 1, "ignoring config line without `=`");
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if let Some(action) = Action::from_config_key(key) {
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                    .collect();
                if parsed.is_empty() {
                    tracing::warn!(key, value, "no usable key bindings, keeping defaults");
                } else {
                    config.bindings.insert(action, parsed);
                }
                continue;
            }

            if let Err(e) = config.effects.set(key, value) {
                tracing::warn!(line = lineno + 1, "{e}; using default");
            }
        }

        if let Err(e) = config.effects.validate() {
            tracing::warn!("{e}; using default effect constants");
            config.effects = EffectConfig::default();
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# motion-lab configuration".to_string(),
            String::new(),
            "# Effect constants (cells / milliseconds)".to_string(),
        ];
        for key in EffectConfig::KEYS {
            lines.push(format!("{key} = {}", self.effects.value_string(key)));
        }
        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, BackTab,".to_string(),
            "#   Backspace, Delete, Space, F1-F12".to_string(),
            String::new(),
        ]);

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

/// Return the config file path (`$XDG_CONFIG_HOME/motion-lab/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("motion-lab").join("config.toml")
}
