//! Widget components for the snapboard TUI.
//!
//! This module provides rendering functions for the board, organized into
//! focused submodules for each visual component.
//!
//! # Overview
//!
//! The widget system follows a functional rendering approach where each widget
//! is a pure function that renders state to a buffer. This enables easy testing
//! and composition.
//!
//! # Modules
//!
//! - [`board`]: Renders the four columns, their cards, the placeholder and
//!   the ghost
//! - [`card`]: Renders a single task card and the placeholder box
//! - [`status_bar`]: Renders the footer with announcements and key hints
//!
//! # Card Styles
//!
//! | Style | Border |
//! |-------|--------|
//! | `Normal` | Rounded |
//! | `Selected` | Thick, cyan |
//! | `Lifted` | Rounded, dimmed |
//! | `Ghost` | Double, yellow |
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use snapboard_protocol::dummy::dummy_board;
//! use snapboard_tui::{AppState, BoardSurface, widgets};
//!
//! let area = Rect::new(0, 0, 80, 24);
//! let mut surface = BoardSurface::new(dummy_board());
//! surface.set_area(area);
//!
//! let mut buf = Buffer::empty(area);
//! widgets::render_board(&surface, &AppState::new(), None, &mut buf);
//! ```

pub mod board;
pub mod card;
pub mod status_bar;

// Re-export primary rendering functions for convenience
pub use board::render_board;
pub use card::{CardStyle, priority_color, render_card, render_placeholder};
pub use status_bar::render_status_bar;
