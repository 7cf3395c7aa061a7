// Log Stream Viewer TUI - Input handlers

pub mod input;
