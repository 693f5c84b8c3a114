//! Terminal UI for snapboard.
//!
//! This crate provides a Ratatui-based kanban board whose cards can be
//! dragged between columns with the mouse or the keyboard. The board is
//! exposed to the drag engine through [`BoardSurface`].
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`surface`]: The board as a drag surface
//! - [`state`]: Keyboard selection
//! - [`layout`]: Layout constants and cell/unit conversion
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`widgets`]: Board, card and status bar rendering
//!
//! # Example
//!
//! ```no_run
//! use snapboard_config::DndConfig;
//! use snapboard_protocol::dummy::dummy_board;
//! use snapboard_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(dummy_board(), DndConfig::default());
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod layout;
pub mod state;
pub mod surface;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::AppState;
pub use surface::BoardSurface;
