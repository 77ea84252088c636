//! Location fragment and navigation history.

use percent_encoding::percent_decode_str;

use super::topic::TopicId;

/// The `#<topicId>` part of the reader's address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    fragment: Option<String>,
}

impl Location {
    /// Parses a startup reference.
    ///
    /// Accepts `#1-OOP.md`, a bare `1-OOP.md`, or a full URL such as
    /// `https://host/guide/index.html#1-OOP.md`. Percent escapes in the
    /// fragment are decoded. A URL without a fragment yields no fragment.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        let raw = if let Some((_, fragment)) = input.split_once('#') {
            fragment
        } else if input.contains("://") {
            ""
        } else {
            input
        };

        let decoded = percent_decode_str(raw).decode_utf8_lossy().into_owned();
        let fragment = if decoded.is_empty() {
            None
        } else {
            Some(decoded)
        };

        Self { fragment }
    }

    /// Location pointing at `id`.
    #[must_use]
    pub fn for_topic(id: &TopicId) -> Self {
        Self {
            fragment: Some(id.as_str().to_string()),
        }
    }

    /// Fragment without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fragment {
            Some(fragment) => write!(f, "#{fragment}"),
            None => Ok(()),
        }
    }
}

/// Back/forward list of visited topics.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<TopicId>,
    cursor: usize,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit, dropping any forward entries.
    ///
    /// Visiting the current entry again is not recorded twice.
    pub fn push(&mut self, id: TopicId) {
        if self.current() == Some(&id) {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(id);
        self.cursor = self.entries.len() - 1;
    }

    /// Replaces the current entry without growing the list.
    pub fn replace(&mut self, id: TopicId) {
        if self.entries.is_empty() {
            self.entries.push(id);
            self.cursor = 0;
        } else {
            self.entries[self.cursor] = id;
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&TopicId> {
        self.entries.get(self.cursor)
    }

    pub fn back(&mut self) -> Option<&TopicId> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    pub fn forward(&mut self) -> Option<&TopicId> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("#1-OOP.md", Some("1-OOP.md"); "hash prefixed")]
    #[test_case("1-OOP.md", Some("1-OOP.md"); "bare id")]
    #[test_case("https://example.org/guide/index.html#4-Templates.md", Some("4-Templates.md"); "full url")]
    #[test_case("https://example.org/guide/", None; "url without fragment")]
    #[test_case("#", None; "empty fragment")]
    #[test_case("  ", None; "blank")]
    #[test_case("#Smart%20Pointers.md", Some("Smart Pointers.md"); "percent encoded")]
    #[test_case("#100%", Some("100%"); "dangling percent")]
    #[test_case("#a%zzb", Some("a%zzb"); "invalid escape kept")]
    #[test_case("#Templates%C3%A9.md", Some("Templatesé.md"); "utf8 escape")]
    fn test_parse(input: &str, expected: Option<&str>) {
        assert_eq!(Location::parse(input).fragment(), expected);
    }

    #[test]
    fn test_display_round_trip() {
        let location = Location::for_topic(&TopicId::new("2-Inheritance.md"));
        let text = location.to_string();

        assert_eq!(text, "#2-Inheritance.md");
        assert_eq!(Location::parse(&text), location);
    }

    #[test]
    fn test_history_back_and_forward() {
        let mut history = History::new();
        history.push(TopicId::new("a.md"));
        history.push(TopicId::new("b.md"));
        history.push(TopicId::new("c.md"));

        assert_eq!(history.back().unwrap(), "b.md");
        assert_eq!(history.back().unwrap(), "a.md");
        assert!(history.back().is_none());
        assert_eq!(history.forward().unwrap(), "b.md");
        assert!(history.can_go_forward());
    }

    #[test]
    fn test_history_push_truncates_forward_entries() {
        let mut history = History::new();
        history.push(TopicId::new("a.md"));
        history.push(TopicId::new("b.md"));
        history.back();
        history.push(TopicId::new("c.md"));

        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(history.current().unwrap(), "c.md");
    }

    #[test]
    fn test_history_ignores_repeat_visit() {
        let mut history = History::new();
        history.push(TopicId::new("a.md"));
        history.push(TopicId::new("a.md"));

        assert_eq!(history.len(), 1);
    }
}
