//! Theme structure
//!
//! Semantic color system. Colors are organized by purpose, not by color name.

use ratatui::style::Color;

/// Theme colors with semantic organization
#[derive(Clone, Debug)]
pub struct Theme {
    // ─────────────────────────────────────────────────────────────────────────
    // Surfaces - Background layers
    // ─────────────────────────────────────────────────────────────────────────
    /// Main background color
    pub background: Color,
    /// Card/panel background (slightly elevated)
    pub surface: Color,
    /// Toasts and overlays (most elevated)
    pub surface_elevated: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Text - Foreground colors
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary text - headers, active items, important content
    pub text_primary: Color,
    /// Secondary text - descriptions, labels, less important
    pub text_secondary: Color,
    /// Muted text - hints, disabled controls, timestamps
    pub text_muted: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Accents - Brand/highlight colors
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary accent - logo, focused control (grass green)
    pub accent: Color,
    /// Secondary accent - start game control (diamond cyan)
    pub accent_secondary: Color,
    /// Login control while logged out (rose)
    pub accent_login: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Semantic - Status colors
    // ─────────────────────────────────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Borders - Edge colors
    // ─────────────────────────────────────────────────────────────────────────
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::craft_dark()
    }
}

impl Theme {
    /// Dark launcher theme, the default
    pub fn craft_dark() -> Self {
        Self {
            // Surfaces
            background: Color::Rgb(24, 26, 33),
            surface: Color::Rgb(36, 39, 48),
            surface_elevated: Color::Rgb(52, 56, 68),

            // Text
            text_primary: Color::Rgb(245, 245, 247),
            text_secondary: Color::Rgb(180, 180, 185),
            text_muted: Color::Rgb(120, 122, 130),

            // Accents
            accent: Color::Rgb(139, 195, 74),           // #8bc34a
            accent_secondary: Color::Rgb(0, 188, 212),  // #00bcd4
            accent_login: Color::Rgb(255, 107, 157),    // #ff6b9d

            // Semantic
            success: Color::Rgb(76, 175, 80),           // #4caf50
            warning: Color::Rgb(255, 152, 0),           // #ff9800
            error: Color::Rgb(244, 67, 54),             // #f44336
            info: Color::Rgb(33, 150, 243),             // #2196f3

            // Borders
            border: Color::Rgb(58, 62, 75),
            border_focused: Color::Rgb(139, 195, 74),
        }
    }

    /// Default theme with the accent from settings, if it parses
    pub fn load(accent: Option<&str>) -> Self {
        let mut theme = Self::default();
        if let Some(color) = accent.and_then(Self::hex_to_color) {
            theme.accent = color;
            theme.border_focused = color;
        }
        theme
    }

    /// Convert hex string to Color
    pub fn hex_to_color(hex: &str) -> Option<Color> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }

    /// Blend two colors with a ratio (0.0 = color2, 1.0 = color1)
    pub fn blend_colors(color1: Color, color2: Color, ratio: f32) -> Color {
        match (color1, color2) {
            (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
                let blend = |c1: u8, c2: u8| -> u8 {
                    let c1 = c1 as f32;
                    let c2 = c2 as f32;
                    (c1 * ratio + c2 * (1.0 - ratio)) as u8
                };
                Color::Rgb(blend(r1, r2), blend(g1, g2), blend(b1, b2))
            }
            _ => color1,
        }
    }

    /// HSL to RGB, hue in degrees, saturation and lightness in 0..=1
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Color::Rgb(channel(r), channel(g), channel(b))
    }

    /// Status dot character
    pub fn status_dot(&self, active: bool) -> &'static str {
        if active {
            "●"
        } else {
            "○"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(Theme::hex_to_color("#4caf50"), Some(Color::Rgb(76, 175, 80)));
        assert_eq!(Theme::hex_to_color("4CAF50"), Some(Color::Rgb(76, 175, 80)));
        assert_eq!(Theme::hex_to_color("#fff"), None);
        assert_eq!(Theme::hex_to_color("#zzzzzz"), None);
    }

    #[test]
    fn test_accent_override() {
        let theme = Theme::load(Some("#112233"));
        assert_eq!(theme.accent, Color::Rgb(17, 34, 51));
        assert_eq!(theme.border_focused, Color::Rgb(17, 34, 51));

        let theme = Theme::load(Some("not a color"));
        assert_eq!(theme.accent, Theme::default().accent);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Theme::hsl(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(Theme::hsl(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(Theme::hsl(240.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
    }
}
