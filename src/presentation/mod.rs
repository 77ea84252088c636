//! Presentation layer with UI components and event handling.

/// Key command registry.
pub mod commands;
/// Event handling.
pub mod events;
/// Document layout and syntax highlighting.
pub mod services;
/// Palette derived from the accent color.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
