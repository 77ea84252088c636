mod content_source_port;
mod markdown_renderer_port;
mod preference_store_port;

pub use content_source_port::ContentSourcePort;
pub use markdown_renderer_port::MarkdownRenderer;
pub use preference_store_port::PreferenceStorePort;
