use crate::domain::ThemeMode;
use crate::presentation::theme::Theme;
use crate::presentation::theme::adapter::ColorConverter;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const fn theme_indicator(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "☀ LIGHT",
        ThemeMode::Dark => "☾ DARK",
    }
}

pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub version: Style,
    pub topic: Style,
    pub location: Style,
    pub theme_indicator: Style,
}

impl HeaderBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let accent = theme.accent;
        let version_bg = ColorConverter::shade(accent, Some(0.5), 0.08);
        let on_accent = if ColorConverter::lightness(accent) > 0.5 {
            Color::Black
        } else {
            Color::White
        };

        Self {
            background: theme.chrome_style,
            app_name: Style::default()
                .bg(accent)
                .fg(on_accent)
                .add_modifier(Modifier::BOLD),
            version: Style::default().bg(version_bg).fg(Color::White),
            topic: theme.chrome_style.add_modifier(Modifier::BOLD),
            location: theme.chrome_style.patch(theme.dimmed_style),
            theme_indicator: Style::default()
                .bg(version_bg)
                .fg(accent)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    topic: Option<&'a str>,
    location: Option<String>,
    mode: ThemeMode,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            topic: None,
            location: None,
            mode: ThemeMode::default(),
            style: HeaderBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn topic(mut self, label: &'a str) -> Self {
        self.topic = Some(label);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    fn left_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                self.style.app_name,
            ),
            Span::styled(format!(" v{} ", self.version), self.style.version),
        ];
        if let Some(topic) = self.topic {
            spans.push(Span::styled(format!("  {topic}"), self.style.topic));
        }
        if let Some(location) = &self.location {
            spans.push(Span::styled(format!("  {location}"), self.style.location));
        }
        spans
    }
}

impl Widget for HeaderBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let indicator = format!(" {} ", theme_indicator(self.mode));
        let indicator_width = indicator.width() as u16;

        let left_width = area.width.saturating_sub(indicator_width + 1);
        let left_area = Rect::new(area.x, area.y, left_width, 1);
        Paragraph::new(Line::from(self.left_spans())).render(left_area, buf);

        if indicator_width < area.width {
            let right_x = area.right().saturating_sub(indicator_width);
            let right_area = Rect::new(right_x, area.y, indicator_width, 1);
            Paragraph::new(Line::from(Span::styled(
                indicator,
                self.style.theme_indicator,
            )))
            .render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_header_shows_topic_location_and_mode() {
        let area = Rect::new(0, 0, 70, 1);
        let mut buf = Buffer::empty(area);

        HeaderBar::new("studyguide", "0.1.0")
            .topic("Templates")
            .location("#4-Templates.md")
            .mode(ThemeMode::Dark)
            .render(area, &mut buf);

        let text = row(&buf, 0);
        assert!(text.starts_with(" STUDYGUIDE  v0.1.0 "));
        assert!(text.contains("Templates"));
        assert!(text.contains("#4-Templates.md"));
        assert!(text.contains("DARK"));
    }

    #[test]
    fn test_theme_indicator() {
        assert!(theme_indicator(ThemeMode::Light).contains("LIGHT"));
        assert!(theme_indicator(ThemeMode::Dark).contains("DARK"));
    }
}
