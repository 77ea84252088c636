//! Navigation state and the indicators derived from it.

use super::entities::{Topic, TopicCatalog};
use super::theme::ThemeMode;

/// The controller's mutable UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    /// Index of the active topic.
    pub current: usize,
    /// Whether the sidebar is hidden on narrow layouts.
    pub sidebar_collapsed: bool,
    pub theme: ThemeMode,
}

/// Text shown next to the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLabel {
    /// Position inside the main curriculum, out of `last`.
    Step { index: usize, last: usize },
    /// Reference material past the curriculum.
    Complete,
}

impl std::fmt::Display for ProgressLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Step { index, last } => write!(f, "{index}/{last}"),
            Self::Complete => f.write_str("Complete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub percent: f64,
    pub label: ProgressLabel,
}

impl Progress {
    /// Progress at `index`.
    ///
    /// Linear over the main curriculum, full with a `Complete` label past it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn at(catalog: &TopicCatalog, index: usize) -> Self {
        let main_count = catalog.main_count();

        if index >= main_count {
            return Self {
                percent: 100.0,
                label: ProgressLabel::Complete,
            };
        }

        let last = main_count - 1;
        let percent = if last == 0 {
            100.0
        } else {
            index as f64 / last as f64 * 100.0
        };

        Self {
            percent,
            label: ProgressLabel::Step { index, last },
        }
    }

    /// Percentage rounded for gauges.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded(&self) -> u16 {
        self.percent.round().clamp(0.0, 100.0) as u16
    }
}

/// Previous or next button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepButton {
    pub enabled: bool,
    /// Label of the adjacent topic when enabled.
    pub label: Option<String>,
}

impl StepButton {
    fn for_topic(topic: Option<&Topic>) -> Self {
        match topic {
            Some(t) => Self {
                enabled: true,
                label: Some(t.label().to_string()),
            },
            None => Self {
                enabled: false,
                label: None,
            },
        }
    }

    /// Button before `index`.
    #[must_use]
    pub fn previous(catalog: &TopicCatalog, index: usize) -> Self {
        Self::for_topic(index.checked_sub(1).and_then(|i| catalog.get(i)))
    }

    /// Button after `index`.
    #[must_use]
    pub fn next(catalog: &TopicCatalog, index: usize) -> Self {
        Self::for_topic(catalog.get(index + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0; "first lesson")]
    #[test_case(7, 100; "last lesson")]
    #[test_case(1, 14; "second lesson")]
    #[test_case(4, 57; "middle")]
    fn test_main_curriculum_progress(index: usize, expected: u16) {
        let catalog = TopicCatalog::builtin();
        let progress = Progress::at(&catalog, index);

        assert_eq!(progress.rounded(), expected);
        assert_eq!(progress.label, ProgressLabel::Step { index, last: 7 });
    }

    #[test_case(8)]
    #[test_case(9)]
    fn test_reference_material_is_complete(index: usize) {
        let catalog = TopicCatalog::builtin();
        let progress = Progress::at(&catalog, index);

        assert_eq!(progress.rounded(), 100);
        assert_eq!(progress.label, ProgressLabel::Complete);
        assert_eq!(progress.label.to_string(), "Complete");
    }

    #[test]
    fn test_single_topic_curriculum_is_full() {
        let catalog = TopicCatalog::new(
            vec![("only.md".to_string(), "Only".to_string())],
            1,
            Vec::new(),
        )
        .unwrap();
        assert_eq!(Progress::at(&catalog, 0).rounded(), 100);
    }

    #[test]
    fn test_step_buttons_at_ends() {
        let catalog = TopicCatalog::builtin();

        let prev = StepButton::previous(&catalog, 0);
        assert!(!prev.enabled);
        assert!(prev.label.is_none());

        let next = StepButton::next(&catalog, catalog.last_index());
        assert!(!next.enabled);
    }

    #[test]
    fn test_step_buttons_name_neighbours() {
        let catalog = TopicCatalog::builtin();

        assert_eq!(
            StepButton::previous(&catalog, 2).label.as_deref(),
            Some("Object-Oriented Programming")
        );
        assert_eq!(StepButton::next(&catalog, 2).label.as_deref(), Some("Polymorphism"));
    }
}
