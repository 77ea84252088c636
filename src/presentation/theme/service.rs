use super::adapter::ColorConverter;
use crate::domain::ThemeMode;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Palette for one theme mode, derived from the configured accent.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub mode: ThemeMode,
    pub accent: Color,
    pub base_style: Style,
    pub chrome_style: Style,
    pub selection_style: Style,
    pub dimmed_style: Style,
    pub heading_style: Style,
    pub link_style: Style,
    pub focused_link_style: Style,
    pub code_style: Style,
    pub quote_style: Style,
    pub error_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Cyan", ThemeMode::default())
    }
}

impl Theme {
    pub fn new(accent_color_str: &str, mode: ThemeMode) -> Self {
        Self::from_color(parse_color(accent_color_str), mode)
    }

    #[must_use]
    pub fn from_color(accent: Color, mode: ThemeMode) -> Self {
        let dark = mode.is_dark();

        let (foreground, background) = if dark {
            (Color::Rgb(220, 223, 228), Color::Rgb(24, 26, 31))
        } else {
            (Color::Rgb(36, 41, 47), Color::Rgb(250, 250, 248))
        };

        let chrome = ColorConverter::shade(accent, Some(0.25), if dark { 0.12 } else { 0.90 });
        let selection =
            ColorConverter::shade(accent, Some(0.35), if dark { 0.22 } else { 0.82 });
        // Accent-hued text must stay readable on both backgrounds.
        let ink = ColorConverter::shade(accent, None, if dark { 0.65 } else { 0.35 });
        let code_bg = ColorConverter::shade(accent, Some(0.08), if dark { 0.15 } else { 0.93 });

        let dimmed = if dark {
            Color::Rgb(125, 130, 140)
        } else {
            Color::Rgb(120, 125, 132)
        };
        let error = if dark {
            Color::Rgb(240, 110, 110)
        } else {
            Color::Rgb(190, 30, 40)
        };

        Self {
            mode,
            accent,
            base_style: Style::default().fg(foreground).bg(background),
            chrome_style: Style::default().fg(foreground).bg(chrome),
            selection_style: Style::default().fg(foreground).bg(selection),
            dimmed_style: Style::default().fg(dimmed),
            heading_style: Style::default().fg(ink).add_modifier(Modifier::BOLD),
            link_style: Style::default()
                .fg(ink)
                .add_modifier(Modifier::UNDERLINED),
            focused_link_style: Style::default()
                .fg(background)
                .bg(ink)
                .add_modifier(Modifier::BOLD),
            code_style: Style::default().fg(foreground).bg(code_bg),
            quote_style: Style::default().fg(dimmed).add_modifier(Modifier::ITALIC),
            error_style: Style::default().fg(error).add_modifier(Modifier::BOLD),
        }
    }

    /// Same accent, other mode.
    #[must_use]
    pub fn with_mode(&self, mode: ThemeMode) -> Self {
        Self::from_color(self.accent, mode)
    }
}

pub fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if s.starts_with('#')
        && let Ok((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        _ => Color::Cyan,
    }
}

fn parse_hex_color(s: &str) -> Result<(u8, u8, u8), ()> {
    let s = s.trim_start_matches('#');

    if !s.is_ascii() {
        return Err(());
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| ())?;
        let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| ())?;
        let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| ())?;
        Ok((r, g, b))
    } else if s.len() == 3 {
        let digit = |i: usize| u8::from_str_radix(&s[i..=i], 16).map(|v| v * 17);
        let r = digit(0).map_err(|_| ())?;
        let g = digit(1).map_err(|_| ())?;
        let b = digit(2).map_err(|_| ())?;
        Ok((r, g, b))
    } else {
        Err(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Red"), Color::Red);
        assert_eq!(parse_color("blue"), Color::Blue);
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("Orange"), Color::Indexed(208));
        assert_eq!(parse_color("Invalid"), Color::Cyan);
    }

    #[test]
    fn test_modes_differ_in_background() {
        let light = Theme::new("Cyan", ThemeMode::Light);
        let dark = light.with_mode(ThemeMode::Dark);

        assert_eq!(dark.mode, ThemeMode::Dark);
        assert_eq!(dark.accent, light.accent);
        assert_ne!(light.base_style.bg, dark.base_style.bg);
        assert_ne!(light.chrome_style.bg, dark.chrome_style.bg);
    }

    #[test]
    fn test_links_are_underlined() {
        let theme = Theme::default();
        assert!(theme.link_style.add_modifier.contains(Modifier::UNDERLINED));
        assert!(theme.heading_style.add_modifier.contains(Modifier::BOLD));
    }
}
