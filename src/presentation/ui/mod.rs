//! UI screens.

mod app;
mod reader_screen;

pub use app::App;
pub use reader_screen::{
    ReaderFocus, ReaderKeyResult, ReaderOptions, ReaderScreen, ReaderScreenState,
};
