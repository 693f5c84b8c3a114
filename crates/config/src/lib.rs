//! Configuration management for the snapboard drag-and-drop engine.
//!
//! This crate defines every tunable of the drag engine, the named presets,
//! and the settings file that selects a preset and overrides single leaves.
//!
//! # Overview
//!
//! - [`dnd`]: The resolved [`DndConfig`] and its groups
//! - [`overrides`]: Partial configuration and the key-by-key [`build_config`]
//! - [`presets`]: Named presets and [`DeviceProfile`]-based selection
//! - [`settings`]: The settings file and its resolution
//! - [`persistence`]: Settings file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Resolution Order
//!
//! 1. The settings file's `preset`, or the preset preferred by the detected
//!    device profile
//! 2. The settings file's `overrides`, applied leaf by leaf
//!
//! The settings file is `./snapboard.json5` (or `.json`) or
//! `~/.config/snapboard/config.json5` (or `.json`).
//!
//! # Examples
//!
//! ```no_run
//! use snapboard_config::{DeviceProfile, Settings};
//!
//! # fn example() -> snapboard_config::Result<()> {
//! let settings = Settings::load()?;
//! let config = settings.resolve(&DeviceProfile::detect())?;
//! println!("Column tolerance: {}", config.snap.targets.tolerance);
//! # Ok(())
//! # }
//! ```

pub mod dnd;
pub mod error;
pub mod overrides;
pub mod persistence;
pub mod presets;
pub mod settings;

// Re-export primary types at crate root for convenience
pub use dnd::{
    AccessibilityConfig, Announcements, AutoScrollConfig, AxisScrollConfig, DndConfig,
    GhostConfig, GridConfig, KeyboardConfig, PlaceholderConfig, PlaceholderHeight, SnapConfig,
    TargetsConfig, ThresholdsConfig,
};
pub use error::{ConfigError, Result};
pub use overrides::{DndConfigOverrides, build_config};
pub use presets::{DeviceProfile, Preset, optimal_config};
pub use settings::Settings;
