//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use crate::board::CellValue;
use crate::config::MAX_COLORS;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const PALETTE_LEN: usize = MAX_COLORS as usize;

/// Colours for each cell tag plus UI colours loaded from a theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Cell colours for tags 1..=6: red, blue, green, yellow, purple, cyan.
    pub cells: [Color; PALETTE_LEN],
    /// Board background.
    pub bg: Color,
    /// Grid / border.
    pub div_line: Color,
    /// Text (score, chain).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text (key hints).
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// One Dark hex values, used whenever a key is missing.
const ONEDARK_CELLS: [&str; PALETTE_LEN] =
    ["#E06C75", "#61AFEF", "#98C379", "#E5C07B", "#C678DD", "#56B6C2"];
const ONEDARK_BG: &str = "#282C34";
const ONEDARK_DIV_LINE: &str = "#3F444F";
const ONEDARK_MAIN_FG: &str = "#ABB2BF";
const ONEDARK_TITLE: &str = "#E5C07B";
const ONEDARK_INACTIVE_FG: &str = "#5C6370";

const HIGH_CONTRAST_CELLS: [&str; PALETTE_LEN] =
    ["#FF0000", "#0088FF", "#00FF00", "#FFFF00", "#FF00FF", "#00FFFF"];
const COLORBLIND_CELLS: [&str; PALETTE_LEN] =
    ["#CC3311", "#0077BB", "#009988", "#EE7733", "#EE3377", "#BBBB00"];

impl Default for Theme {
    fn default() -> Self {
        Self::onedark_default()
    }
}

impl Theme {
    pub fn onedark_default() -> Self {
        Self {
            cells: hex_array(&ONEDARK_CELLS),
            bg: hex_or_gray(ONEDARK_BG),
            div_line: hex_or_gray(ONEDARK_DIV_LINE),
            main_fg: hex_or_gray(ONEDARK_MAIN_FG),
            title: hex_or_gray(ONEDARK_TITLE),
            inactive_fg: hex_or_gray(ONEDARK_INACTIVE_FG),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to One Dark defaults if path is None or the file does not exist.
    /// `palette` then overrides the cell colours.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let mut theme = match path {
            Some(p) if p.exists() => {
                let s = std::fs::read_to_string(p)?;
                Self::from_map(&parse_theme_file(&s))
            }
            _ => Self::onedark_default(),
        };
        theme.apply_palette(palette);
        Ok(theme)
    }

    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => self.cells = hex_array(&HIGH_CONTRAST_CELLS),
            crate::Palette::Colorblind => self.cells = hex_array(&COLORBLIND_CELLS),
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |keys: &[&str], fallback: &str| {
            keys.iter()
                .find_map(|k| map.get(*k).and_then(|v| parse_hex(v).ok()))
                .unwrap_or_else(|| hex_or_gray(fallback))
        };
        Self {
            cells: [
                get(&["cpu_end", "temp_end"], ONEDARK_CELLS[0]),
                get(&["cpu_box"], ONEDARK_CELLS[1]),
                get(&["mem_box", "cpu_start"], ONEDARK_CELLS[2]),
                get(&["cpu_mid"], ONEDARK_CELLS[3]),
                get(&["net_box"], ONEDARK_CELLS[4]),
                get(&["hi_fg", "proc_misc"], ONEDARK_CELLS[5]),
            ],
            bg: get(&["main_bg"], ONEDARK_BG),
            div_line: get(&["div_line"], ONEDARK_DIV_LINE),
            main_fg: get(&["main_fg"], ONEDARK_MAIN_FG),
            title: get(&["title"], ONEDARK_TITLE),
            inactive_fg: get(&["inactive_fg"], ONEDARK_INACTIVE_FG),
        }
    }

    /// Colour for an occupied cell tag (1-based); other tags get the background.
    #[inline]
    pub fn cell_color(&self, tag: CellValue) -> Color {
        match usize::try_from(tag) {
            Ok(t) if t >= 1 => self.cells[(t - 1) % PALETTE_LEN],
            _ => self.bg,
        }
    }
}

fn hex_or_gray(s: &str) -> Color {
    parse_hex(s).unwrap_or(Color::Gray)
}

fn hex_array(hex: &[&str; PALETTE_LEN]) -> [Color; PALETTE_LEN] {
    hex.map(hex_or_gray)
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(ThemeError::InvalidHex(s.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))
    };
    let (r, g, b) = match s.len() {
        6 => (channel(0..2)?, channel(2..4)?, channel(4..6)?),
        3 => (channel(0..1)? * 17, channel(1..2)? * 17, channel(2..3)? * 17),
        _ => return Err(ThemeError::InvalidHex(s.to_string())),
    };
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#98C379").unwrap();
        assert!(matches!(c, Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(r##"theme[main_bg]="#31353F""##);
        assert_eq!(map.get("main_bg"), Some(&"#31353F".to_string()));
    }

    #[test]
    fn test_theme_file_overrides_cells() {
        let map = parse_theme_file("theme[cpu_end]='#FF0000'\n# comment\ntheme[cpu_box]=\"#0000FF\"");
        let theme = Theme::from_map(&map);
        assert_eq!(theme.cell_color(1), Color::Rgb(255, 0, 0));
        assert_eq!(theme.cell_color(2), Color::Rgb(0, 0, 255));
        assert_eq!(theme.cell_color(3), Theme::default().cell_color(3));
    }

    #[test]
    fn test_cell_color_tags() {
        let theme = Theme::default();
        assert_eq!(theme.cell_color(0), theme.bg);
        assert_eq!(theme.cell_color(-1), theme.bg);
        assert_eq!(theme.cell_color(1), theme.cells[0]);
        assert_eq!(theme.cell_color(6), theme.cells[5]);
    }

    #[test]
    fn test_palettes_replace_cells() {
        let mut theme = Theme::default();
        theme.apply_palette(crate::Palette::HighContrast);
        assert_eq!(theme.cell_color(1), Color::Rgb(255, 0, 0));
    }
}
