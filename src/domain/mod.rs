//! Domain layer with core entities, navigation state and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Navigation state, progress and step buttons.
pub mod navigation;
/// Port definitions.
pub mod ports;
/// Theme flag.
pub mod theme;

pub use entities::{RenderedDocument, Topic, TopicCatalog, TopicId};
pub use errors::{CatalogError, ContentError, PreferenceError};
pub use navigation::{NavigationState, Progress, ProgressLabel, StepButton};
pub use ports::{ContentSourcePort, MarkdownRenderer, PreferenceStorePort};
pub use theme::{THEME_PREFERENCE_KEY, ThemeMode};
