//! Application layer with the navigation controller, services and use cases.

/// Content navigation controller.
pub mod controller;
/// Markdown parsing and post-processing.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use controller::{
    ContentView, ControllerSettings, Effect, NavigationController, RequestId, SidebarEntry,
};
pub use use_cases::{LoadTopicUseCase, ThemePreferenceUseCase};
