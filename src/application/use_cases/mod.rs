//! Use case implementations.

mod load_topic_use_case;
mod theme_preference_use_case;

pub use load_topic_use_case::LoadTopicUseCase;
pub use theme_preference_use_case::ThemePreferenceUseCase;
