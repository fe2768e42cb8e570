//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Shape colours and board/UI colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Colour per shape id 1..=7 (I, J, L, O, S, T, Z), stored at index id - 1.
    pub shapes: [Color; 7],
    /// Playfield background.
    pub bg: Color,
    /// Board border.
    pub border: Color,
    pub title: Color,
    /// Help line under the board.
    pub text: Color,
    /// Colour the board flashes when rows are swept.
    pub flash: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// Saturated arcade palette on black.
    pub const fn classic() -> Self {
        Self {
            shapes: [
                Color::Rgb(0x00, 0xF0, 0xF0), // I cyan
                Color::Rgb(0x00, 0x00, 0xF0), // J blue
                Color::Rgb(0xF0, 0xA0, 0x00), // L orange
                Color::Rgb(0xF0, 0xF0, 0x00), // O yellow
                Color::Rgb(0x00, 0xF0, 0x00), // S green
                Color::Rgb(0xA0, 0x00, 0xF0), // T purple
                Color::Rgb(0xF0, 0x00, 0x00), // Z red
            ],
            bg: Color::Rgb(0x00, 0x00, 0x00),
            border: Color::Rgb(0x3F, 0x44, 0x4F),
            title: Color::Rgb(0xE5, 0xC0, 0x7B),
            text: Color::Rgb(0xAB, 0xB2, 0xBF),
            flash: Color::Rgb(0xFF, 0xFF, 0xFF),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to the classic palette if path is None or the file does not exist; keys that
    /// are missing or hold bad hex keep their default.
    pub fn load(path: Option<&Path>) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        Ok(Self::from_map(&map))
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let mut theme = Self::classic();
        for (i, slot) in theme.shapes.iter_mut().enumerate() {
            if let Some(c) = get(&format!("shape_{}", i + 1)) {
                *slot = c;
            }
        }
        theme.bg = get("bg").unwrap_or(theme.bg);
        theme.border = get("border").unwrap_or(theme.border);
        theme.title = get("title").unwrap_or(theme.title);
        theme.text = get("text").unwrap_or(theme.text);
        theme.flash = get("flash").unwrap_or(theme.flash);
        theme
    }

    /// Colour for a cell value; empty and unknown ids get the background.
    #[inline]
    pub fn cell_color(&self, id: u8) -> Color {
        usize::from(id)
            .checked_sub(1)
            .and_then(|i| self.shapes.get(i))
            .copied()
            .unwrap_or(self.bg)
    }
}

/// Keys a theme file may set.
const THEME_KEYS: [&str; 12] = [
    "bg", "border", "title", "text", "flash", "shape_1", "shape_2", "shape_3", "shape_4",
    "shape_5", "shape_6", "shape_7",
];

/// Collect `theme[key]="value"` lines. Comments, blank lines and malformed lines are skipped;
/// unknown keys are logged and dropped.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line
            .strip_prefix("theme[")
            .and_then(|rest| rest.split_once(']'))
            .and_then(|(key, rest)| Some((key.trim(), rest.trim().strip_prefix('=')?)))
        else {
            continue;
        };
        let value = value.trim().trim_matches(['"', '\'']);
        if value.is_empty() {
            continue;
        }
        if THEME_KEYS.contains(&key) {
            map.insert(key.to_string(), value.to_string());
        } else {
            log::warn!("ignoring unknown theme key {key:?}");
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    let (r, g, b) = match s.len() {
        _ if !s.is_ascii() => return Err(invalid()),
        6 => (channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?),
        3 => (
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        ),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}
