// Log Stream Viewer TUI - Common Widgets Module

pub mod footer;
pub mod header;
pub mod popups;

pub use footer::*;
pub use header::*;
pub use popups::*;
