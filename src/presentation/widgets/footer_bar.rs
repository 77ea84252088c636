use crate::domain::keybinding::Keybind;
use crate::presentation::theme::Theme;
use crate::presentation::theme::adapter::ColorConverter;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    Sidebar,
    #[default]
    Content,
}

impl FocusContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sidebar => "TOPICS",
            Self::Content => "READING",
        }
    }
}

pub struct FooterBarStyle {
    pub background: Style,
    pub label_style: Style,
    pub key_style: Style,
    pub info: Style,
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let accent = theme.accent;
        let key_bg = ColorConverter::shade(accent, Some(0.5), 0.08);

        Self {
            background: theme.chrome_style,
            label_style: Style::default()
                .bg(accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().bg(key_bg).fg(Color::White),
            info: theme.chrome_style.patch(theme.dimmed_style),
            focus_indicator: Style::default()
                .bg(key_bg)
                .fg(accent)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct FooterBar<'a> {
    keybindings: &'a [Keybind],
    focus_context: Option<FocusContext>,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keybindings: &'a [Keybind]) -> Self {
        Self {
            keybindings,
            focus_context: None,
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn focus_context(mut self, context: FocusContext) -> Self {
        self.focus_context = Some(context);
        self
    }

    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Short form of a key for the hint bar, e.g. `C-d` or `A-←`.
    #[must_use]
    pub fn format_key(key: &KeyEvent) -> String {
        use std::fmt::Write;
        let mut s = String::new();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("C-");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("A-");
        }
        if key.modifiers.contains(KeyModifiers::SHIFT)
            && !matches!(key.code, KeyCode::Char(_) | KeyCode::BackTab)
        {
            s.push_str("S-");
        }

        match key.code {
            KeyCode::Char(' ') => s.push_str("Space"),
            KeyCode::Char(c) => s.push(c),
            KeyCode::Enter => s.push_str("Enter"),
            KeyCode::Esc => s.push_str("Esc"),
            KeyCode::Tab => s.push_str("Tab"),
            KeyCode::BackTab => s.push_str("S-Tab"),
            KeyCode::Backspace => s.push_str("Bksp"),
            KeyCode::Up => s.push('↑'),
            KeyCode::Down => s.push('↓'),
            KeyCode::Left => s.push('←'),
            KeyCode::Right => s.push('→'),
            KeyCode::Home => s.push_str("Home"),
            KeyCode::End => s.push_str("End"),
            KeyCode::PageUp => s.push_str("PgUp"),
            KeyCode::PageDown => s.push_str("PgDn"),
            KeyCode::F(n) => {
                let _ = write!(s, "F{n}");
            }
            _ => {
                let _ = write!(s, "{:?}", key.code);
            }
        }
        s
    }

    fn build_left_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();

        if let Some(context) = self.focus_context {
            spans.push(Span::styled(
                format!(" {} ", context.display_name()),
                self.style.focus_indicator,
            ));
            spans.push(Span::raw(" "));
        }

        for (i, binding) in self
            .keybindings
            .iter()
            .filter(|k| k.visible_in_bar)
            .enumerate()
        {
            if i > 0 {
                spans.push(Span::raw(" "));
            }

            spans.push(Span::styled(
                format!(" {} ", binding.label),
                self.style.label_style,
            ));
            spans.push(Span::styled(
                format!(" {} ", Self::format_key(&binding.key)),
                self.style.key_style,
            ));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let right_width = self.right_info.map_or(0, |s| s.width() as u16);
        let left_width = area.width.saturating_sub(right_width + 1);

        let left_area = Rect::new(area.x, area.y, left_width, 1);
        Paragraph::new(Line::from(self.build_left_spans())).render(left_area, buf);

        if let Some(info) = self.right_info.filter(|_| right_width < area.width) {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Line::from(Span::styled(info, self.style.info))).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keybinding::Action;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_format_key() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let alt_left = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        let shift_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);

        assert_eq!(FooterBar::format_key(&ctrl_d), "C-d");
        assert_eq!(FooterBar::format_key(&alt_left), "A-←");
        assert_eq!(FooterBar::format_key(&shift_tab), "S-Tab");
    }

    #[test]
    fn test_hidden_bindings_are_skipped() {
        let bindings = vec![
            Keybind::new(
                KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
                Action::Quit,
                "Quit",
            ),
            Keybind::new(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Action::Quit,
                "Quit",
            )
            .hidden(),
        ];
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);

        FooterBar::new(&bindings)
            .focus_context(FocusContext::Sidebar)
            .right_info(Some("#1-OOP.md"))
            .render(area, &mut buf);

        let text = row(&buf);
        assert!(text.starts_with(" TOPICS "));
        assert!(text.contains(" q "));
        assert!(!text.contains("C-c"));
        assert!(text.trim_end().ends_with("#1-OOP.md"));
    }
}
