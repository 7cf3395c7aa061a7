// TUI App module root - re-exports state and core types

mod actions_ctrl;
mod events;
mod logs_ctrl;
mod state;

pub use logs_ctrl::line_rows;
pub use state::{App, AppResult, StreamStatus};

#[cfg(test)]
pub(crate) use state::tests as tests_support;
