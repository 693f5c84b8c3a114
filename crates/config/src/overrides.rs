//! Partial configuration and the key-by-key merge.
//!
//! Every leaf of [`DndConfigOverrides`] is optional. [`build_config`] copies a
//! base configuration and replaces exactly the leaves that are set, so an
//! override that touches one setting of a group never drops its siblings.

use serde::{Deserialize, Serialize};

use crate::dnd::{
    AccessibilityConfig, Announcements, AutoScrollConfig, AxisScrollConfig, DndConfig,
    GhostConfig, GridConfig, KeyboardConfig, PlaceholderConfig, PlaceholderHeight, SnapConfig,
    TargetsConfig, ThresholdsConfig,
};

fn set<T: Clone>(slot: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// A partial [`DndConfig`].
///
/// # Examples
///
/// ```
/// use snapboard_config::{build_config, DndConfig, DndConfigOverrides};
///
/// let overrides: DndConfigOverrides =
///     serde_json::from_str(r#"{"snap": {"targets": {"tolerance": 90}}}"#).unwrap();
/// let config = build_config(&DndConfig::default(), &overrides);
///
/// assert_eq!(config.snap.targets.tolerance, 90.0);
/// assert_eq!(config.snap.targets.smoothing, 0.2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DndConfigOverrides {
    pub snap: SnapOverrides,
    pub auto_scroll: AutoScrollOverrides,
    pub accessibility: AccessibilityOverrides,
    pub ghost: GhostOverrides,
    pub placeholder: PlaceholderOverrides,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapOverrides {
    pub grid: GridOverrides,
    pub targets: TargetsOverrides,
    pub thresholds: ThresholdsOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_height: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothing: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scroll_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutoScrollOverrides {
    pub vertical: AxisScrollOverrides,
    pub horizontal: AxisScrollOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisScrollOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessibilityOverrides {
    pub keyboard: KeyboardOverrides,
    pub announcements: AnnouncementOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyboardOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announce_changes: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnouncementOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_pickup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_move: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_drop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_cancel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GhostOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// `Some(None)` is not expressible; an empty string clears the class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<PlaceholderHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_duration_ms: Option<u64>,
}

impl GridOverrides {
    fn apply(&self, base: &mut GridConfig) {
        set(&mut base.enabled, self.enabled.as_ref());
        set(&mut base.slot_height, self.slot_height.as_ref());
        set(&mut base.gap, self.gap.as_ref());
        set(&mut base.dynamic_height, self.dynamic_height.as_ref());
    }
}

impl TargetsOverrides {
    fn apply(&self, base: &mut TargetsConfig) {
        set(&mut base.enabled, self.enabled.as_ref());
        set(&mut base.tolerance, self.tolerance.as_ref());
        set(&mut base.smoothing, self.smoothing.as_ref());
    }
}

impl ThresholdsOverrides {
    fn apply(&self, base: &mut ThresholdsConfig) {
        set(&mut base.snap_threshold, self.snap_threshold.as_ref());
        set(&mut base.drag_threshold, self.drag_threshold.as_ref());
        set(
            &mut base.auto_scroll_threshold,
            self.auto_scroll_threshold.as_ref(),
        );
    }
}

impl SnapOverrides {
    fn apply(&self, base: &mut SnapConfig) {
        self.grid.apply(&mut base.grid);
        self.targets.apply(&mut base.targets);
        self.thresholds.apply(&mut base.thresholds);
    }
}

impl AxisScrollOverrides {
    fn apply(&self, base: &mut AxisScrollConfig) {
        set(&mut base.enabled, self.enabled.as_ref());
        set(&mut base.speed, self.speed.as_ref());
        set(&mut base.zone, self.zone.as_ref());
        set(&mut base.max_speed, self.max_speed.as_ref());
    }
}

impl AutoScrollOverrides {
    fn apply(&self, base: &mut AutoScrollConfig) {
        self.vertical.apply(&mut base.vertical);
        self.horizontal.apply(&mut base.horizontal);
    }
}

impl KeyboardOverrides {
    fn apply(&self, base: &mut KeyboardConfig) {
        set(&mut base.enabled, self.enabled.as_ref());
        set(&mut base.move_step, self.move_step.as_ref());
        set(&mut base.announce_changes, self.announce_changes.as_ref());
    }
}

impl AnnouncementOverrides {
    fn apply(&self, base: &mut Announcements) {
        set(&mut base.on_pickup, self.on_pickup.as_ref());
        set(&mut base.on_move, self.on_move.as_ref());
        set(&mut base.on_drop, self.on_drop.as_ref());
        set(&mut base.on_cancel, self.on_cancel.as_ref());
    }
}

impl AccessibilityOverrides {
    fn apply(&self, base: &mut AccessibilityConfig) {
        self.keyboard.apply(&mut base.keyboard);
        self.announcements.apply(&mut base.announcements);
    }
}

impl GhostOverrides {
    fn apply(&self, base: &mut GhostConfig) {
        set(&mut base.enabled, self.enabled.as_ref());
        set(&mut base.opacity, self.opacity.as_ref());
        set(&mut base.scale, self.scale.as_ref());
        set(&mut base.z_index, self.z_index.as_ref());
        if let Some(class_name) = &self.class_name {
            base.class_name = (!class_name.is_empty()).then(|| class_name.clone());
        }
    }
}

impl PlaceholderOverrides {
    fn apply(&self, base: &mut PlaceholderConfig) {
        set(&mut base.enabled, self.enabled.as_ref());
        set(&mut base.opacity, self.opacity.as_ref());
        set(&mut base.height, self.height.as_ref());
        if let Some(color) = &self.background_color {
            base.background_color = Some(color.clone());
        }
        if let Some(border) = &self.border_style {
            base.border_style = Some(border.clone());
        }
        set(
            &mut base.animation_duration_ms,
            self.animation_duration_ms.as_ref(),
        );
    }
}

impl DndConfigOverrides {
    /// Returns `true` if no leaf is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the set leaves onto `base` in place.
    pub fn apply(&self, base: &mut DndConfig) {
        self.snap.apply(&mut base.snap);
        self.auto_scroll.apply(&mut base.auto_scroll);
        self.accessibility.apply(&mut base.accessibility);
        self.ghost.apply(&mut base.ghost);
        self.placeholder.apply(&mut base.placeholder);
        set(&mut base.debug, self.debug.as_ref());
    }
}

/// Merges `overrides` onto a copy of `base`, key by key.
///
/// Pure: neither argument is modified.
#[must_use]
pub fn build_config(base: &DndConfig, overrides: &DndConfigOverrides) -> DndConfig {
    let mut config = base.clone();
    overrides.apply(&mut config);
    config
}
