//! Terminal User Interface components for runlog-tui.

pub mod chart;
mod help;
mod prompt;
mod theme;
pub mod widgets;

pub use help::HelpOverlay;
pub use prompt::{ConfirmDialog, PathPrompt};
pub use theme::Theme;
