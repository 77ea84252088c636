//! Progress through the curriculum with the previous and next buttons.

use crate::domain::{Progress, StepButton};
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

const BUTTON_WIDTH: u16 = 24;

pub struct ProgressBarStyle {
    pub button: Style,
    pub disabled: Style,
    pub gauge: Style,
    pub background: Style,
}

impl ProgressBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            button: theme.chrome_style.fg(theme.accent).add_modifier(Modifier::BOLD),
            disabled: theme.chrome_style.patch(theme.dimmed_style),
            gauge: theme.chrome_style.fg(theme.accent),
            background: theme.chrome_style,
        }
    }
}

impl Default for ProgressBarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct ProgressBar<'a> {
    progress: Progress,
    previous: &'a StepButton,
    next: &'a StepButton,
    style: ProgressBarStyle,
}

impl<'a> ProgressBar<'a> {
    #[must_use]
    pub fn new(progress: Progress, previous: &'a StepButton, next: &'a StepButton) -> Self {
        Self {
            progress,
            previous,
            next,
            style: ProgressBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: ProgressBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Previous button, gauge and next button areas.
    #[must_use]
    pub fn areas(area: Rect) -> [Rect; 3] {
        let button = BUTTON_WIDTH.min(area.width / 3);
        Layout::horizontal([
            Constraint::Length(button),
            Constraint::Min(0),
            Constraint::Length(button),
        ])
        .areas(area)
    }

    fn button(&self, button: &StepButton, text: String) -> Span<'static> {
        let style = if button.enabled {
            self.style.button
        } else {
            self.style.disabled
        };
        Span::styled(text, style)
    }
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, self.style.background);

        let [previous_area, gauge_area, next_area] = Self::areas(area);
        let room = usize::from(previous_area.width).saturating_sub(3);

        let previous = self.previous.label.as_deref().unwrap_or("Previous");
        Paragraph::new(Line::from(
            self.button(self.previous, format!(" ◀ {}", truncate(previous, room))),
        ))
        .render(previous_area, buf);

        let next = self.next.label.as_deref().unwrap_or("Next");
        Paragraph::new(
            Line::from(self.button(self.next, format!("{} ▶ ", truncate(next, room))))
                .right_aligned(),
        )
        .render(next_area, buf);

        Gauge::default()
            .gauge_style(self.style.gauge)
            .ratio(self.progress.percent.clamp(0.0, 100.0) / 100.0)
            .label(self.progress.label.to_string())
            .use_unicode(true)
            .render(gauge_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TopicCatalog;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_shows_step_label_and_neighbours() {
        let catalog = TopicCatalog::builtin();
        let progress = Progress::at(&catalog, 1);
        let previous = StepButton::previous(&catalog, 1);
        let next = StepButton::next(&catalog, 1);
        let area = Rect::new(0, 0, 90, 1);
        let mut buf = Buffer::empty(area);

        ProgressBar::new(progress, &previous, &next).render(area, &mut buf);

        let text = row(&buf);
        assert!(text.contains("◀"));
        assert!(text.contains("▶"));
        assert!(text.contains("1/7"));
    }

    #[test]
    fn test_disabled_button_is_dimmed() {
        let catalog = TopicCatalog::builtin();
        let progress = Progress::at(&catalog, 0);
        let previous = StepButton::previous(&catalog, 0);
        let next = StepButton::next(&catalog, 0);
        let style = ProgressBarStyle::default();
        let disabled = style.disabled;
        let area = Rect::new(0, 0, 90, 1);
        let mut buf = Buffer::empty(area);

        ProgressBar::new(progress, &previous, &next)
            .style(style)
            .render(area, &mut buf);

        assert!(!previous.enabled);
        assert!(row(&buf).contains("Previous"));
        assert_eq!(buf[(1, 0)].fg, disabled.fg.unwrap_or_default());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Templates", 20), "Templates");
        assert_eq!(truncate("Object Oriented Programming", 8), "Object …");
    }
}
