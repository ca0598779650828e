//! User configuration — keybindings, input tuning, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/services-showcase/config.toml`
//! (default `~/.config/services-showcase/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::input::{
    InputConfig, TOUCH_MIN_INTERVAL_MS, TOUCH_SENSITIVITY, WHEEL_SENSITIVITY,
};

// ───────────────────────────────────────── errors ────────────

/// A config line that could not be applied.  Reported and skipped; a bad
/// line never prevents the rest of the file from loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: `{key}` expects a number, got `{value}`")]
    InvalidNumber {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: `{value}` is not a valid key for `{key}`")]
    InvalidKey {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: unknown setting `{key}`")]
    UnknownSetting { line: usize, key: String },
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    NextItem,
    PrevItem,
    Reset,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::NextItem,
        Action::PrevItem,
        Action::Reset,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::NextItem => "next_item",
            Action::PrevItem => "prev_item",
            Action::Reset => "reset",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "scroll_down" => Some(Action::ScrollDown),
            "scroll_up" => Some(Action::ScrollUp),
            "next_item" => Some(Action::NextItem),
            "prev_item" => Some(Action::PrevItem),
            "reset" => Some(Action::Reset),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
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

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Down"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"PageDown"`, `"j"`.
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
            "backspace" | "bksp" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
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

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

const DEFAULT_WHEEL_NOTCH: f64 = 100.0;
const DEFAULT_CELL_WIDTH: f64 = 8.0;
const DEFAULT_CELL_HEIGHT: f64 = 16.0;
const DEFAULT_FRAME_MS: u64 = 16;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Scroll-scalar gain per unit of wheel delta.
    pub wheel_sensitivity: f64,
    /// Scroll-scalar gain per unit of drag distance.
    pub touch_sensitivity: f64,
    /// Drag samples closer together than this are ignored.
    pub touch_min_interval_ms: u64,
    /// Wheel delta produced by one mouse-wheel notch or scroll key press.
    pub wheel_notch: f64,
    /// Layout units per terminal column.
    pub cell_width: f64,
    /// Layout units per terminal row.
    pub cell_height: f64,
    /// Animation frame interval.
    pub frame_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            wheel_sensitivity: WHEEL_SENSITIVITY,
            touch_sensitivity: TOUCH_SENSITIVITY,
            touch_min_interval_ms: TOUCH_MIN_INTERVAL_MS,
            wheel_notch: DEFAULT_WHEEL_NOTCH,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl AppConfig {
    /// Built-in keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(NextItem, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(PrevItem, vec![KeyBind::new(PageUp, n)]);
        m.insert(Reset, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Input tuning for the core normaliser.
    pub fn input(&self) -> InputConfig {
        InputConfig {
            wheel_sensitivity: self.wheel_sensitivity,
            touch_sensitivity: self.touch_sensitivity,
            touch_min_interval_ms: self.touch_min_interval_ms,
        }
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
            "{}/{}: scroll | {}/{}: item | 1-8: jump | {}: top | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::NextItem),
            self.short_binding(Action::PrevItem),
            self.short_binding(Action::Reset),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from `path`, falling back to defaults.  Problems are
    /// logged and the offending lines skipped.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let (config, problems) = Self::parse(&contents);
                for problem in &problems {
                    tracing::warn!(path = %path.display(), "{problem}");
                }
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "{}", ConfigError::from(err));
                Self::default()
            }
        }
    }

    /// Persist current config to `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    /// Parse config text on top of the defaults.
    pub fn parse(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut problems = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let number = || {
                value.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                    ConfigError::InvalidNumber {
                        line: line_no,
                        key: key.to_string(),
                        value: value.to_string(),
                    }
                })
            };

            // Input and rendering settings.
            let applied = match key {
                "wheel_sensitivity" => number().map(|v| config.wheel_sensitivity = v.abs()),
                "touch_sensitivity" => number().map(|v| config.touch_sensitivity = v.abs()),
                "touch_min_interval_ms" => {
                    number().map(|v| config.touch_min_interval_ms = v.max(0.0) as u64)
                }
                "wheel_notch" => number().map(|v| config.wheel_notch = v.abs()),
                "cell_width" => number().map(|v| config.cell_width = v.clamp(1.0, 64.0)),
                "cell_height" => number().map(|v| config.cell_height = v.clamp(1.0, 64.0)),
                "frame_ms" => number().map(|v| config.frame_ms = (v as u64).clamp(8, 100)),
                _ => match Action::from_config_key(key) {
                    Some(action) => parse_bindings(line_no, key, value)
                        .map(|binds| {
                            config.bindings.insert(action, binds);
                        }),
                    None => Err(ConfigError::UnknownSetting {
                        line: line_no,
                        key: key.to_string(),
                    }),
                },
            };
            if let Err(problem) = applied {
                problems.push(problem);
            }
        }

        (config, problems)
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# services-showcase configuration".to_string(),
            String::new(),
            "# Input".to_string(),
            format!("wheel_sensitivity = {}", self.wheel_sensitivity),
            format!("touch_sensitivity = {}", self.touch_sensitivity),
            format!("touch_min_interval_ms = {}", self.touch_min_interval_ms),
            format!("wheel_notch = {}", self.wheel_notch),
            String::new(),
            "# Rendering".to_string(),
            format!("cell_width = {}", self.cell_width),
            format!("cell_height = {}", self.cell_height),
            format!("frame_ms = {}", self.frame_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
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

/// Parse a comma-separated binding list.  Any unparsable key rejects the
/// whole line so a typo never silently drops a binding.
fn parse_bindings(line: usize, key: &str, value: &str) -> Result<Vec<KeyBind>, ConfigError> {
    let mut parsed = Vec::new();
    for part in value.split(',') {
        let part = part.trim().trim_matches('"');
        if part.is_empty() {
            continue;
        }
        let bind = KeyBind::parse(part).ok_or_else(|| ConfigError::InvalidKey {
            line,
            key: key.to_string(),
            value: part.to_string(),
        })?;
        parsed.push(bind);
    }
    Ok(parsed)
}

/// Return the default config file path
/// (`$XDG_CONFIG_HOME/services-showcase/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("services-showcase").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn defaults_match_core_constants() {
        let c = AppConfig::default();
        assert_eq!(c.input(), InputConfig::default());
        assert_eq!(c.match_key(key(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(c.match_key(key(KeyCode::PageUp)), Some(Action::PrevItem));
        assert_eq!(c.match_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn parses_settings_and_bindings() {
        let (c, problems) = AppConfig::parse(
            "# comment\n\
             wheel_sensitivity = 0.01\n\
             frame_ms = 500\n\
             quit = Ctrl+x, F10\n",
        );
        assert!(problems.is_empty(), "{problems:?}");
        assert_eq!(c.wheel_sensitivity, 0.01);
        assert_eq!(c.frame_ms, 100);
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(c.match_key(ctrl_x), Some(Action::Quit));
        assert_eq!(c.match_key(key(KeyCode::F(10))), Some(Action::Quit));
        assert_eq!(c.match_key(key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let (c, problems) = AppConfig::parse(
            "wheel_sensitivity = fast\n\
             scroll_down = Hyper+j\n\
             colour = blue\n\
             cell_width = 10\n",
        );
        assert_eq!(problems.len(), 3);
        assert!(matches!(problems[0], ConfigError::InvalidNumber { line: 1, .. }));
        assert!(matches!(problems[1], ConfigError::InvalidKey { line: 2, .. }));
        assert!(matches!(problems[2], ConfigError::UnknownSetting { line: 3, .. }));
        assert_eq!(c.wheel_sensitivity, WHEEL_SENSITIVITY);
        assert_eq!(c.match_key(key(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(c.cell_width, 10.0);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut c = AppConfig::default();
        c.touch_min_interval_ms = 80;
        c.cell_height = 20.0;
        c.bindings.insert(
            Action::Reset,
            vec![KeyBind::new(KeyCode::Char('r'), KeyModifiers::ALT)],
        );
        c.save(&path).unwrap();

        let loaded = AppConfig::load(&path);
        assert_eq!(loaded.touch_min_interval_ms, 80);
        assert_eq!(loaded.cell_height, 20.0);
        let alt_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::ALT);
        assert_eq!(loaded.match_key(alt_r), Some(Action::Reset));
        assert_eq!(loaded.match_key(key(KeyCode::Home)), None);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = AppConfig::load(&dir.path().join("absent.toml"));
        assert_eq!(c.frame_ms, DEFAULT_FRAME_MS);
    }

    #[test]
    fn key_display() {
        assert_eq!(KeyBind::new(KeyCode::Down, KeyModifiers::NONE).display(), "↓");
        assert_eq!(
            KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL).display(),
            "Ctrl+c"
        );
        assert_eq!(KeyBind::parse("space"), Some(KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE)));
    }
}
