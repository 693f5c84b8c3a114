//! Drag-and-drop tunables.
//!
//! [`DndConfig`] is the full, resolved set of settings the drag engine reads.
//! Every group implements [`Default`] with the values of the
//! [`Preset::Default`](crate::Preset::Default) preset, so a partially written
//! file still deserializes into a complete configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// The complete drag-and-drop configuration.
///
/// # Examples
///
/// ```
/// use snapboard_config::DndConfig;
///
/// let config = DndConfig::default();
/// assert_eq!(config.snap.thresholds.drag_threshold, 8.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DndConfig {
    /// Column and slot snapping.
    pub snap: SnapConfig,
    /// Edge auto-scroll.
    pub auto_scroll: AutoScrollConfig,
    /// Keyboard drag and screen reader announcements.
    pub accessibility: AccessibilityConfig,
    /// The floating clone that follows the pointer.
    pub ghost: GhostConfig,
    /// The box marking where the card will land.
    pub placeholder: PlaceholderConfig,
    /// Log geometry snapshots and snap decisions at debug level.
    pub debug: bool,
}

/// Snapping settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Vertical slot grid.
    pub grid: GridConfig,
    /// Horizontal column targets.
    pub targets: TargetsConfig,
    /// Distance thresholds.
    pub thresholds: ThresholdsConfig,
}

/// Vertical slot grid inside a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Whether slots are computed at all.
    pub enabled: bool,
    /// Height of the trailing "insert at end" slot.
    pub slot_height: f64,
    /// Gap between cards; the trailing slot starts this far below the last card.
    pub gap: f64,
    /// Size the trailing slot like the dragged card instead of `slot_height`.
    pub dynamic_height: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            slot_height: 120.0,
            gap: 12.0,
            dynamic_height: true,
        }
    }
}

/// Horizontal column targeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetsConfig {
    /// When disabled the nearest column always qualifies.
    pub enabled: bool,
    /// Maximum distance from a column's horizontal centre.
    pub tolerance: f64,
    /// Ghost smoothing factor in `0..=1`; 0 follows the pointer exactly.
    pub smoothing: f64,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: 60.0,
            smoothing: 0.2,
        }
    }
}

/// Distance thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Accepted for settings compatibility. Snap resolution always takes
    /// the nearest slot and does not read it.
    pub snap_threshold: f64,
    /// Pointer travel required before a press becomes a drag.
    pub drag_threshold: f64,
    /// Fallback edge zone for axes whose own zone is zero.
    pub auto_scroll_threshold: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 10.0,
            drag_threshold: 8.0,
            auto_scroll_threshold: 60.0,
        }
    }
}

/// Auto-scroll settings per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollConfig {
    /// Top/bottom edge zones.
    pub vertical: AxisScrollConfig,
    /// Left/right edge zones.
    pub horizontal: AxisScrollConfig,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            vertical: AxisScrollConfig {
                enabled: true,
                speed: 3.0,
                zone: 60.0,
                max_speed: 15.0,
            },
            horizontal: AxisScrollConfig {
                enabled: true,
                speed: 2.0,
                zone: 50.0,
                max_speed: 10.0,
            },
        }
    }
}

/// Auto-scroll settings for one axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisScrollConfig {
    /// Whether this axis scrolls.
    pub enabled: bool,
    /// Units scrolled per frame.
    pub speed: f64,
    /// Size of the activation zone at each edge.
    pub zone: f64,
    /// Upper bound for the per-frame speed.
    pub max_speed: f64,
}

/// Accessibility settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityConfig {
    /// Keyboard drag.
    pub keyboard: KeyboardConfig,
    /// Live-region message templates.
    pub announcements: Announcements,
}

/// Keyboard drag settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Whether keyboard pickup is available.
    pub enabled: bool,
    /// Distance an arrow key moves the held card.
    pub move_step: f64,
    /// Whether changes are announced through the live region.
    pub announce_changes: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            move_step: 10.0,
            announce_changes: true,
        }
    }
}

/// Announcement templates.
///
/// Placeholders in braces (`{column}`, `{position}`, `{title}`, ...) are
/// substituted by the drag engine. An empty template announces nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Announcements {
    /// Spoken when a card is picked up.
    pub on_pickup: String,
    /// Spoken when the resolved target changes.
    pub on_move: String,
    /// Spoken when a card is dropped.
    pub on_drop: String,
    /// Spoken when a drag is cancelled.
    pub on_cancel: String,
}

impl Default for Announcements {
    fn default() -> Self {
        Self {
            on_pickup: "Card picked up. Use the arrow keys to move it, Enter to drop, Escape to cancel."
                .to_string(),
            on_move: "Moving to {column}, position {position}".to_string(),
            on_drop: "Card moved to {column}, position {position}.".to_string(),
            on_cancel: "Move cancelled. The card returned to its original position.".to_string(),
        }
    }
}

/// Ghost appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Whether a ghost is shown.
    pub enabled: bool,
    /// Opacity in `0..=1`.
    pub opacity: f64,
    /// Scale factor.
    pub scale: f64,
    /// Stacking order.
    pub z_index: i32,
    /// Extra class name handed to the host.
    pub class_name: Option<String>,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.7,
            scale: 1.08,
            z_index: 9999,
            class_name: Some("board-drag-ghost".to_string()),
        }
    }
}

/// Placeholder height policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderHeight {
    /// Same height as the dragged card.
    #[default]
    Auto,
    /// A fixed height.
    Fixed(f64),
}

/// Placeholder appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Whether a placeholder is shown.
    pub enabled: bool,
    /// Opacity in `0..=1` once faded in.
    pub opacity: f64,
    /// Height policy.
    pub height: PlaceholderHeight,
    /// Background colour handed to the host.
    pub background_color: Option<String>,
    /// Border style handed to the host.
    pub border_style: Option<String>,
    /// Enter/exit animation duration in milliseconds.
    pub animation_duration_ms: u64,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.4,
            height: PlaceholderHeight::Auto,
            background_color: Some("#e5e7eb".to_string()),
            border_style: Some("2px dashed #9ca3af".to_string()),
            animation_duration_ms: 250,
        }
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} is outside 0..=1"),
        })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} must be a finite, non-negative number"),
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} must be a finite, positive number"),
        })
    }
}

impl DndConfig {
    /// Validates value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_config::DndConfig;
    ///
    /// let mut config = DndConfig::default();
    /// config.ghost.opacity = 1.5;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let grid = &self.snap.grid;
        check_positive("snap.grid.slot_height", grid.slot_height)?;
        check_non_negative("snap.grid.gap", grid.gap)?;

        let targets = &self.snap.targets;
        check_non_negative("snap.targets.tolerance", targets.tolerance)?;
        check_unit("snap.targets.smoothing", targets.smoothing)?;

        let thresholds = &self.snap.thresholds;
        check_non_negative("snap.thresholds.snap_threshold", thresholds.snap_threshold)?;
        check_non_negative("snap.thresholds.drag_threshold", thresholds.drag_threshold)?;
        check_non_negative(
            "snap.thresholds.auto_scroll_threshold",
            thresholds.auto_scroll_threshold,
        )?;

        for (prefix, axis) in [
            ("auto_scroll.vertical", &self.auto_scroll.vertical),
            ("auto_scroll.horizontal", &self.auto_scroll.horizontal),
        ] {
            check_non_negative(prefix, axis.speed)?;
            check_non_negative(prefix, axis.zone)?;
            check_non_negative(prefix, axis.max_speed)?;
        }

        check_positive(
            "accessibility.keyboard.move_step",
            self.accessibility.keyboard.move_step,
        )?;

        check_unit("ghost.opacity", self.ghost.opacity)?;
        check_positive("ghost.scale", self.ghost.scale)?;

        check_unit("placeholder.opacity", self.placeholder.opacity)?;
        if let PlaceholderHeight::Fixed(height) = self.placeholder.height {
            check_positive("placeholder.height", height)?;
        }

        Ok(())
    }
}
