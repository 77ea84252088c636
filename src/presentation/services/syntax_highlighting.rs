//! Code block highlighting.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style as SyntectStyle, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::debug;

use crate::domain::ThemeMode;

const DARK_THEME: &str = "base16-ocean.dark";
const LIGHT_THEME: &str = "InspiredGitHub";

/// Turns source code into styled spans. Line breaks stay inside the span
/// text; callers split on `'\n'`.
pub trait SyntaxHighlighter: Send + Sync {
    fn highlight(&self, code: &str, lang: Option<&str>, mode: ThemeMode) -> Vec<Span<'static>>;
}

pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl SyntectHighlighter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: Option<&str>, mode: ThemeMode) -> Vec<Span<'static>> {
        let syntax = lang
            .and_then(|l| self.syntaxes.find_syntax_by_token(l))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        let theme_name = if mode.is_dark() { DARK_THEME } else { LIGHT_THEME };
        let Some(theme) = self.themes.themes.get(theme_name) else {
            return vec![Span::raw(code.to_string())];
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut spans = Vec::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => spans.extend(
                    ranges
                        .into_iter()
                        .map(|(style, text)| Span::styled(text.to_string(), convert_style(style))),
                ),
                Err(e) => {
                    debug!(error = %e, "Highlighting failed, using plain text");
                    spans.push(Span::raw(line.to_string()));
                }
            }
        }

        spans
    }
}

/// Foreground and font style only; the code block background comes from
/// the palette.
fn convert_style(style: SyntectStyle) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));

    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }
    converted
}
