//! Named configuration presets and device-based selection.
//!
//! Each preset is expressed as overrides on top of [`DndConfig::default`],
//! which keeps the difference between presets visible in one place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dnd::DndConfig;
use crate::overrides::{
    AccessibilityOverrides, AnnouncementOverrides, AutoScrollOverrides, AxisScrollOverrides,
    DndConfigOverrides, GhostOverrides, KeyboardOverrides, PlaceholderOverrides, SnapOverrides,
    TargetsOverrides, ThresholdsOverrides, build_config,
};

/// A named drag-and-drop configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Balanced defaults.
    #[default]
    Default,
    /// Larger tolerances and faster scrolling for touch input.
    Mobile,
    /// Tight tolerances and faster placeholder animation.
    Precision,
    /// Small keyboard steps, verbose announcements, no ghost.
    Accessible,
    /// Cheaper visuals and no horizontal auto-scroll.
    LowPerformance,
}

impl Preset {
    /// Returns all presets.
    #[must_use]
    pub const fn all() -> &'static [Preset] {
        &[
            Self::Default,
            Self::Mobile,
            Self::Precision,
            Self::Accessible,
            Self::LowPerformance,
        ]
    }

    /// Returns the snake_case name used in settings files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Mobile => "mobile",
            Self::Precision => "precision",
            Self::Accessible => "accessible",
            Self::LowPerformance => "low_performance",
        }
    }

    /// Returns the preset as overrides on the default configuration.
    #[must_use]
    pub fn overrides(&self) -> DndConfigOverrides {
        match self {
            Self::Default => DndConfigOverrides::default(),
            Self::Mobile => DndConfigOverrides {
                snap: SnapOverrides {
                    targets: TargetsOverrides {
                        enabled: Some(true),
                        tolerance: Some(80.0),
                        smoothing: Some(0.25),
                    },
                    thresholds: ThresholdsOverrides {
                        snap_threshold: Some(15.0),
                        drag_threshold: Some(12.0),
                        auto_scroll_threshold: Some(80.0),
                    },
                    ..Default::default()
                },
                auto_scroll: AutoScrollOverrides {
                    vertical: axis(true, 4.0, 80.0, 20.0),
                    horizontal: axis(true, 3.0, 60.0, 15.0),
                },
                ghost: GhostOverrides {
                    scale: Some(1.1),
                    opacity: Some(0.8),
                    ..Default::default()
                },
                ..Default::default()
            },
            Self::Precision => DndConfigOverrides {
                snap: SnapOverrides {
                    targets: TargetsOverrides {
                        enabled: Some(true),
                        tolerance: Some(40.0),
                        smoothing: Some(0.1),
                    },
                    thresholds: ThresholdsOverrides {
                        snap_threshold: Some(5.0),
                        drag_threshold: Some(3.0),
                        auto_scroll_threshold: Some(40.0),
                    },
                    ..Default::default()
                },
                placeholder: PlaceholderOverrides {
                    animation_duration_ms: Some(150),
                    ..Default::default()
                },
                ..Default::default()
            },
            Self::Accessible => DndConfigOverrides {
                accessibility: AccessibilityOverrides {
                    keyboard: KeyboardOverrides {
                        enabled: Some(true),
                        move_step: Some(5.0),
                        announce_changes: Some(true),
                    },
                    announcements: AnnouncementOverrides {
                        on_pickup: Some(
                            "Card selected. Title: {title}. Current status: {status}. \
                             Use the arrow keys to move, Enter to drop, Escape to cancel."
                                .to_string(),
                        ),
                        on_move: Some(
                            "Moving card to column {column}, position {position} of {total}"
                                .to_string(),
                        ),
                        on_drop: Some(
                            "Card \"{title}\" moved from {from_column} to {to_column}, \
                             position {position}"
                                .to_string(),
                        ),
                        on_cancel: Some(
                            "Move of card \"{title}\" cancelled. It returned to \
                             {original_column}, position {original_position}"
                                .to_string(),
                        ),
                    },
                },
                ghost: GhostOverrides {
                    enabled: Some(false),
                    ..Default::default()
                },
                placeholder: PlaceholderOverrides {
                    opacity: Some(0.8),
                    animation_duration_ms: Some(400),
                    ..Default::default()
                },
                ..Default::default()
            },
            Self::LowPerformance => DndConfigOverrides {
                auto_scroll: AutoScrollOverrides {
                    vertical: axis(true, 2.0, 40.0, 8.0),
                    horizontal: axis(false, 0.0, 0.0, 0.0),
                },
                ghost: GhostOverrides {
                    enabled: Some(false),
                    ..Default::default()
                },
                placeholder: PlaceholderOverrides {
                    animation_duration_ms: Some(100),
                    ..Default::default()
                },
                accessibility: AccessibilityOverrides {
                    announcements: AnnouncementOverrides {
                        on_pickup: Some("Card picked up".to_string()),
                        on_move: Some(String::new()),
                        on_drop: Some("Card moved".to_string()),
                        on_cancel: Some("Move cancelled".to_string()),
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    /// Returns the fully resolved configuration for this preset.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_config::Preset;
    ///
    /// let config = Preset::Mobile.config();
    /// assert_eq!(config.snap.targets.tolerance, 80.0);
    /// assert_eq!(config.snap.grid.gap, 12.0);
    /// ```
    #[must_use]
    pub fn config(&self) -> DndConfig {
        build_config(&DndConfig::default(), &self.overrides())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn axis(enabled: bool, speed: f64, zone: f64, max_speed: f64) -> AxisScrollOverrides {
    AxisScrollOverrides {
        enabled: Some(enabled),
        speed: Some(speed),
        zone: Some(zone),
        max_speed: Some(max_speed),
    }
}

/// Environment variable forcing touch input (`1` or `true`).
pub const TOUCH_ENV: &str = "SNAPBOARD_TOUCH";

/// Environment variable requesting reduced motion (`1` or `true`).
pub const REDUCED_MOTION_ENV: &str = "SNAPBOARD_REDUCED_MOTION";

/// Traits of the running device that influence preset selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Primary input is a touch screen.
    pub touch: bool,
    /// The user asked for less motion.
    pub prefers_reduced_motion: bool,
    /// Logical CPU count.
    pub cpu_cores: usize,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            touch: false,
            prefers_reduced_motion: false,
            cpu_cores: 4,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl DeviceProfile {
    /// Detects the profile from the environment.
    ///
    /// Touch and reduced motion come from [`TOUCH_ENV`] and
    /// [`REDUCED_MOTION_ENV`]; the core count from the OS.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            touch: env_flag(TOUCH_ENV),
            prefers_reduced_motion: env_flag(REDUCED_MOTION_ENV),
            cpu_cores: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
        }
    }

    /// Picks the preset for this device.
    ///
    /// Reduced motion wins over a low core count, which wins over touch.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_config::{DeviceProfile, Preset};
    ///
    /// let phone = DeviceProfile { touch: true, prefers_reduced_motion: false, cpu_cores: 8 };
    /// assert_eq!(phone.preferred_preset(), Preset::Mobile);
    ///
    /// let old_phone = DeviceProfile { cpu_cores: 2, ..phone };
    /// assert_eq!(old_phone.preferred_preset(), Preset::LowPerformance);
    /// ```
    #[must_use]
    pub const fn preferred_preset(&self) -> Preset {
        if self.prefers_reduced_motion {
            Preset::Accessible
        } else if self.cpu_cores <= 2 {
            Preset::LowPerformance
        } else if self.touch {
            Preset::Mobile
        } else {
            Preset::Default
        }
    }
}

/// Returns the configuration best suited to `profile`.
#[must_use]
pub fn optimal_config(profile: &DeviceProfile) -> DndConfig {
    profile.preferred_preset().config()
}
