//! Studyguide - a terminal reader for Markdown study guides.
//!
//! This crate provides a sidebar-and-content reader with clean architecture:
//! a navigation controller keeping topic, progress and location consistent,
//! pluggable content sources, and a TUI interface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the navigation controller and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "studyguide";
