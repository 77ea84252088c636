pub mod content_processor;
pub mod markdown_parser;

pub use content_processor::{ContentProcessor, TocPolicy};
pub use markdown_parser::BlockMarkdownRenderer;

#[cfg(test)]
mod markdown_parser_test;
