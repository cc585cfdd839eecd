//! Color configuration for the TUI.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Configuration for all TUI colors.
///
/// The configurable palette is the dark theme; the light theme is built in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub title: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub headline: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub summary: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub score: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub filter_active: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub filter_inactive: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub pull_indicator: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub background: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            title: Color::LightYellow,
            selection_bg: Color::Yellow,
            selection_fg: Color::Black,
            headline: Color::White,
            summary: Color::Gray,
            metadata: Color::DarkGray,
            score: Color::LightGreen,
            filter_active: Color::LightYellow,
            filter_inactive: Color::DarkGray,
            error_fg: Color::White,
            error_bg: Color::Red,
            pull_indicator: Color::LightCyan,
            background: Color::Reset,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

impl ColorConfig {
    /// Built-in palette used when dark mode is off.
    pub fn light() -> Self {
        Self {
            border: Color::Gray,
            title: Color::Rgb(180, 100, 0),
            selection_bg: Color::Rgb(255, 214, 102),
            selection_fg: Color::Black,
            headline: Color::Black,
            summary: Color::Rgb(60, 60, 60),
            metadata: Color::Rgb(110, 110, 110),
            score: Color::Rgb(0, 128, 64),
            filter_active: Color::Rgb(180, 100, 0),
            filter_inactive: Color::Rgb(110, 110, 110),
            error_fg: Color::White,
            error_bg: Color::Rgb(190, 30, 45),
            pull_indicator: Color::Blue,
            background: Color::Rgb(250, 248, 240),
            status_fg: Color::Black,
            status_bg: Color::Rgb(230, 226, 214),
        }
    }
}

/// Custom deserializer for Color that supports named colors and hex codes.
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a color string into a ratatui Color.
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "Gray",
///   "DarkGray", "LightRed", "LightGreen", "LightYellow", "LightBlue", "LightMagenta",
///   "LightCyan", "White", "Reset"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    // Handle hex colors
    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    // Handle named colors (case-insensitive)
    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

/// Parse `#RRGGBB` or `#RGB`.
fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let invalid = || format!("Invalid hex color: {}", s);
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .ok_or_else(invalid)
    };

    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // Each digit doubles: #F80 is #FF8800.
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("CYAN").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("DarkGray").unwrap(), Color::DarkGray);
        assert_eq!(parse_color_string("darkgray").unwrap(), Color::DarkGray);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            parse_color_string("#FF0000").unwrap(),
            Color::Rgb(255, 0, 0)
        );
        assert_eq!(
            parse_color_string("#00ff00").unwrap(),
            Color::Rgb(0, 255, 0)
        );
        assert_eq!(
            parse_color_string("#0000FF").unwrap(),
            Color::Rgb(0, 0, 255)
        );
    }

    #[test]
    fn test_parse_short_hex_colors() {
        assert_eq!(parse_color_string("#F00").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color_string("#0F0").unwrap(), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color_string("#00F").unwrap(), Color::Rgb(0, 0, 255));
        assert_eq!(
            parse_color_string("#FFF").unwrap(),
            Color::Rgb(255, 255, 255)
        );
    }

    #[test]
    fn test_light_palette_differs_from_dark() {
        let dark = ColorConfig::default();
        let light = ColorConfig::light();
        assert_ne!(dark.background, light.background);
        assert_ne!(dark.headline, light.headline);
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("invalid").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
    }
}
