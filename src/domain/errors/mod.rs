//! Domain error types.

mod catalog_error;
mod content_error;
mod preference_error;

pub use catalog_error::CatalogError;
pub use content_error::ContentError;
pub use preference_error::PreferenceError;
