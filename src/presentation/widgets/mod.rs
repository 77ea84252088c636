mod content_pane;
mod footer_bar;
mod header_bar;
mod progress_bar;
mod status_bar;
mod topic_sidebar;

pub use content_pane::{ContentPane, ContentPaneState, ContentPaneStyle};
pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle};
pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use progress_bar::{ProgressBar, ProgressBarStyle};
pub use status_bar::{StatusBar, StatusLevel, StatusMessage};
pub use topic_sidebar::{SidebarState, TopicSidebar, TopicSidebarStyle};
