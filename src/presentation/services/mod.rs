//! Rendering services.

pub mod document_layout;
pub mod syntax_highlighting;

pub use document_layout::{CodeRegion, DocumentLayout, DocumentView, FocusTarget};
pub use syntax_highlighting::{SyntaxHighlighter, SyntectHighlighter};
