use crate::domain::keybinding::{Action, Keybind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::warn;

pub struct CommandRegistry {
    display_bindings: HashMap<Action, KeyEvent>,
    input_bindings: Vec<(KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut display_bindings = HashMap::new();
        let mut input_bindings = Vec::new();

        let mut register = |action: Action, code: KeyCode, modifiers: KeyModifiers, primary| {
            let key = KeyEvent::new(code, modifiers);
            if primary {
                display_bindings.insert(action, key);
            }
            input_bindings.push((key, action));
        };

        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let alt = KeyModifiers::ALT;
        let shift = KeyModifiers::SHIFT;

        register(Action::Quit, KeyCode::Char('q'), none, true);
        register(Action::Quit, KeyCode::Char('c'), ctrl, false);
        register(Action::ToggleSidebar, KeyCode::Char('b'), none, true);
        register(Action::ToggleTheme, KeyCode::Char('t'), none, true);

        register(Action::FocusNext, KeyCode::Tab, none, true);
        register(Action::FocusPrevious, KeyCode::BackTab, shift, true);
        register(Action::FocusPrevious, KeyCode::BackTab, none, false);

        register(Action::PreviousTopic, KeyCode::Char('p'), none, true);
        register(Action::PreviousTopic, KeyCode::Left, none, false);
        register(Action::NextTopic, KeyCode::Char('n'), none, true);
        register(Action::NextTopic, KeyCode::Right, none, false);
        register(Action::HistoryBack, KeyCode::Left, alt, true);
        register(Action::HistoryBack, KeyCode::Backspace, none, false);
        register(Action::HistoryForward, KeyCode::Right, alt, true);
        register(Action::Retry, KeyCode::Char('r'), none, true);

        register(Action::NavigateUp, KeyCode::Up, none, true);
        register(Action::NavigateUp, KeyCode::Char('k'), none, false);
        register(Action::NavigateDown, KeyCode::Down, none, true);
        register(Action::NavigateDown, KeyCode::Char('j'), none, false);
        register(Action::SelectFirst, KeyCode::Char('g'), none, true);
        register(Action::SelectFirst, KeyCode::Home, none, false);
        register(Action::SelectLast, KeyCode::Char('G'), shift, true);
        register(Action::SelectLast, KeyCode::Char('G'), none, false);
        register(Action::SelectLast, KeyCode::End, none, false);
        register(Action::Select, KeyCode::Enter, none, true);

        register(Action::ScrollDown, KeyCode::Char('e'), ctrl, true);
        register(Action::ScrollUp, KeyCode::Char('y'), ctrl, true);
        register(Action::PageDown, KeyCode::PageDown, none, true);
        register(Action::PageDown, KeyCode::Char(' '), none, false);
        register(Action::PageDown, KeyCode::Char('d'), ctrl, false);
        register(Action::PageUp, KeyCode::PageUp, none, true);
        register(Action::PageUp, KeyCode::Char('u'), ctrl, false);
        register(Action::ScrollToTop, KeyCode::Home, ctrl, true);
        register(Action::ScrollToBottom, KeyCode::End, ctrl, true);
        register(Action::ScrollLeft, KeyCode::Char('h'), none, true);
        register(Action::ScrollRight, KeyCode::Char('l'), none, true);
        register(Action::NextLink, KeyCode::Char(']'), none, true);
        register(Action::PreviousLink, KeyCode::Char('['), none, true);
        register(Action::CopyCode, KeyCode::Char('y'), none, true);
        register(Action::Cancel, KeyCode::Esc, none, true);

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default bindings with `overrides` (key notation to action) taking
    /// precedence. Unparseable keys are skipped.
    pub fn with_overrides(overrides: &HashMap<String, Action>) -> Self {
        let mut registry = Self::default();
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (notation, action) in entries {
            match parse_key(notation) {
                Some(key) => registry.bind(key, *action),
                None => warn!(key = %notation, "Ignoring unparseable keybinding"),
            }
        }
        registry
    }

    /// Binds `key` to `action`, replacing whatever `key` did before.
    pub fn bind(&mut self, key: KeyEvent, action: Action) {
        self.input_bindings
            .retain(|(k, _)| !(k.code == key.code && k.modifiers == key.modifiers));
        self.input_bindings.insert(0, (key, action));
        self.display_bindings
            .retain(|_, k| !(k.code == key.code && k.modifiers == key.modifiers));
        self.display_bindings.insert(action, key);
    }

    pub fn get(&self, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&action).copied()
    }

    pub fn find_action(&self, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, a)| *a)
    }
}

pub trait HasCommands {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind>;
}

/// Parses key notation such as `q`, `Ctrl+q`, `Alt+Left` or `F5`.
#[must_use]
pub fn parse_key(notation: &str) -> Option<KeyEvent> {
    let notation = notation.trim();
    if notation.is_empty() {
        return None;
    }

    // A lone "+" names the plus key itself.
    let (modifier_part, key_part) = match notation.rsplit_once('+') {
        Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", notation),
    };

    let mut modifiers = KeyModifiers::NONE;
    for name in modifier_part.split('+').filter(|m| !m.is_empty()) {
        modifiers |= match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "c" => KeyModifiers::CONTROL,
            "alt" | "meta" | "a" => KeyModifiers::ALT,
            "shift" | "s" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    let code = match key_part.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bksp" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        lower => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                KeyCode::F(n)
            } else {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        if c.is_ascii_uppercase() {
                            modifiers |= KeyModifiers::SHIFT;
                        }
                        KeyCode::Char(c)
                    }
                    _ => return None,
                }
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_default_bindings() {
        let registry = CommandRegistry::new();

        assert_eq!(
            registry.find_action(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(
            registry.find_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            registry.find_action(key(KeyCode::Right, KeyModifiers::NONE)),
            Some(Action::NextTopic)
        );
        assert_eq!(
            registry.find_action(key(KeyCode::Left, KeyModifiers::ALT)),
            Some(Action::HistoryBack)
        );
        assert_eq!(
            registry.find_action(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_display_binding_is_primary_key() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.get(Action::NextTopic),
            Some(key(KeyCode::Char('n'), KeyModifiers::NONE))
        );
    }

    #[test]
    fn test_override_replaces_key() {
        let mut overrides = HashMap::new();
        overrides.insert("Ctrl+q".to_string(), Action::Quit);
        overrides.insert("t".to_string(), Action::ToggleSidebar);
        overrides.insert("Hyper+x".to_string(), Action::Quit);

        let registry = CommandRegistry::with_overrides(&overrides);

        assert_eq!(
            registry.find_action(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            registry.find_action(key(KeyCode::Char('t'), KeyModifiers::NONE)),
            Some(Action::ToggleSidebar)
        );
        assert_eq!(
            registry.get(Action::ToggleSidebar),
            Some(key(KeyCode::Char('t'), KeyModifiers::NONE))
        );
    }

    #[test_case("q", KeyCode::Char('q'), KeyModifiers::NONE)]
    #[test_case("Ctrl+q", KeyCode::Char('q'), KeyModifiers::CONTROL)]
    #[test_case("alt+left", KeyCode::Left, KeyModifiers::ALT)]
    #[test_case("G", KeyCode::Char('G'), KeyModifiers::SHIFT)]
    #[test_case("F5", KeyCode::F(5), KeyModifiers::NONE)]
    #[test_case("Space", KeyCode::Char(' '), KeyModifiers::NONE)]
    #[test_case("Ctrl++", KeyCode::Char('+'), KeyModifiers::CONTROL)]
    #[test_case("PageDown", KeyCode::PageDown, KeyModifiers::NONE)]
    fn test_parse_key(notation: &str, code: KeyCode, modifiers: KeyModifiers) {
        assert_eq!(parse_key(notation), Some(KeyEvent::new(code, modifiers)));
    }

    #[test_case(""; "empty")]
    #[test_case("Hyper+x"; "unknown modifier")]
    #[test_case("Ctrl+ab"; "two characters")]
    fn test_parse_key_rejects(notation: &str) {
        assert_eq!(parse_key(notation), None);
    }
}
