//! Topic catalog validation errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CatalogError {
    #[error("the guide has no topics")]
    Empty,

    #[error("topic {id} is listed more than once")]
    DuplicateTopic { id: String },

    #[error("main curriculum length {main_count} is outside 1..={len}")]
    InvalidMainCount { main_count: usize, len: usize },

    #[error("legacy name {alias} points at unknown topic {target}")]
    UnknownAliasTarget { alias: String, target: String },
}
