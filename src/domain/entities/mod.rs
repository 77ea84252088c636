//! Domain entity definitions.

mod catalog;
mod document;
mod location;
mod topic;

pub use catalog::TopicCatalog;
pub use document::{
    Alignment, Block, CodeBlock, CopyAffordance, Heading, Inline, Link, LinkTarget, ListMarker,
    RenderedDocument, Table, TableWrapper, TocEntry, plain_text, slugify,
};
pub use location::{History, Location};
pub use topic::{Topic, TopicId};
