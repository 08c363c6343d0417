//! Color configuration for the TUI.
//!
//! The `[colors]` table only lists what differs from the defaults:
//!
//! ```toml
//! [colors]
//! error = "#c33"
//! heading = "lightyellow"
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct ColorConfig {
    pub active_border: Color,
    pub inactive_border: Color,
    pub selection_bg_active: Color,
    pub selection_fg_active: Color,
    pub selection_bg_inactive: Color,
    pub selection_fg_inactive: Color,
    /// Site name, section titles and the picker banner.
    pub heading: Color,
    /// Loading placeholders.
    pub skeleton: Color,
    /// Error panels and the site failure panel.
    pub error: Color,
    pub metadata_author: Color,
    pub metadata_date: Color,
    pub metadata_link: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            active_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            selection_bg_active: Color::Cyan,
            selection_fg_active: Color::Black,
            selection_bg_inactive: Color::DarkGray,
            selection_fg_inactive: Color::White,
            heading: Color::White,
            skeleton: Color::DarkGray,
            error: Color::LightRed,
            metadata_author: Color::Yellow,
            metadata_date: Color::Yellow,
            metadata_link: Color::Blue,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

impl ColorConfig {
    fn slot(&mut self, name: &str) -> Option<&mut Color> {
        Some(match name {
            "active_border" => &mut self.active_border,
            "inactive_border" => &mut self.inactive_border,
            "selection_bg_active" => &mut self.selection_bg_active,
            "selection_fg_active" => &mut self.selection_fg_active,
            "selection_bg_inactive" => &mut self.selection_bg_inactive,
            "selection_fg_inactive" => &mut self.selection_fg_inactive,
            "heading" => &mut self.heading,
            "skeleton" => &mut self.skeleton,
            "error" => &mut self.error,
            "metadata_author" => &mut self.metadata_author,
            "metadata_date" => &mut self.metadata_date,
            "metadata_link" => &mut self.metadata_link,
            "status_fg" => &mut self.status_fg,
            "status_bg" => &mut self.status_bg,
            _ => return None,
        })
    }
}

impl TryFrom<BTreeMap<String, String>> for ColorConfig {
    type Error = String;

    fn try_from(overrides: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut colors = Self::default();
        for (name, value) in overrides {
            let slot = colors
                .slot(&name)
                .ok_or_else(|| format!("Unknown color setting: {}", name))?;
            *slot = parse_color_string(&value)?;
        }
        Ok(colors)
    }
}

/// Parse a color name, a 256-color index, `#RRGGBB` or the short `#RGB`.
///
/// Names are matched case-insensitively by ratatui, so `LightRed` and
/// `lightred` are the same color.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if let Some(short) = s.strip_prefix('#').filter(|h| h.len() == 3) {
        return expand_short_hex(short).ok_or_else(|| format!("Invalid hex color: {}", s));
    }
    Color::from_str(s).map_err(|_| format!("Unknown color: {}", s))
}

fn expand_short_hex(hex: &str) -> Option<Color> {
    let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| d as u8 * 17));
    Some(Color::Rgb(digits.next()??, digits.next()??, digits.next()??))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("LightRed").unwrap(), Color::LightRed);
        assert_eq!(parse_color_string("darkgray").unwrap(), Color::DarkGray);
        assert_eq!(parse_color_string("42").unwrap(), Color::Indexed(42));
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#FF0000").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color_string("#0F0").unwrap(), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color_string(" #800 ").unwrap(), Color::Rgb(136, 0, 0));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("invalid").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#GG0").is_err());
        assert!(parse_color_string("#12345").is_err());
    }

    #[test]
    fn test_overrides_keep_other_defaults() {
        let colors: ColorConfig = toml::from_str("error = \"#800\"\nheading = \"Yellow\"").unwrap();
        assert_eq!(colors.error, Color::Rgb(136, 0, 0));
        assert_eq!(colors.heading, Color::Yellow);
        assert_eq!(colors.skeleton, Color::DarkGray);
    }

    #[test]
    fn test_unknown_setting_is_rejected() {
        let err = toml::from_str::<ColorConfig>("unread_item = \"Red\"").unwrap_err();
        assert!(err.to_string().contains("Unknown color setting: unread_item"));
    }
}
