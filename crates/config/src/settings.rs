//! The settings file and its resolution into a [`DndConfig`].
//!
//! A settings file names an optional preset and optional overrides:
//!
//! ```json5
//! {
//!   preset: "precision",
//!   overrides: {
//!     snap: { grid: { gap: 1 } },
//!   },
//! }
//! ```
//!
//! Without a preset the one matching the detected [`DeviceProfile`] is used.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dnd::DndConfig;
use crate::error::Result;
use crate::overrides::{DndConfigOverrides, build_config};
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::presets::{DeviceProfile, Preset};

/// Contents of a settings file.
///
/// # Examples
///
/// ```
/// use snapboard_config::{DeviceProfile, Preset, Settings};
///
/// let settings = Settings::with_preset(Preset::Precision);
/// let config = settings.resolve(&DeviceProfile::default()).unwrap();
/// assert_eq!(config.snap.targets.tolerance, 40.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Preset to start from; `None` selects one from the device profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    /// Leaves replaced on top of the preset.
    #[serde(default, skip_serializing_if = "DndConfigOverrides::is_empty")]
    pub overrides: DndConfigOverrides,
}

impl Settings {
    /// Settings that pin a preset and override nothing.
    #[must_use]
    pub fn with_preset(preset: Preset) -> Self {
        Self {
            preset: Some(preset),
            overrides: DndConfigOverrides::default(),
        }
    }

    /// Loads settings from the default file locations.
    ///
    /// Returns default settings when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is found but cannot be read, parsed, or
    /// resolves to an invalid configuration.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration fails [`Settings::validate`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use snapboard_config::Settings;
    ///
    /// # fn example() -> snapboard_config::Result<()> {
    /// let settings = Settings::load_from("snapboard.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Settings = read_config_file(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Saves the settings as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration these settings produce.
    ///
    /// The device profile does not matter here: every preset is valid on
    /// its own, so only the overrides can break a range. They are checked
    /// against the pinned preset, or the default one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`](crate::ConfigError::InvalidValue)
    /// for the first out-of-range setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_config::Settings;
    ///
    /// let settings: Settings =
    ///     serde_json::from_str(r#"{"overrides": {"ghost": {"opacity": 3}}}"#).unwrap();
    /// assert!(settings.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let base = self.preset.unwrap_or_default().config();
        build_config(&base, &self.overrides).validate()
    }

    /// Returns the preset in effect for `profile`.
    #[must_use]
    pub fn effective_preset(&self, profile: &DeviceProfile) -> Preset {
        self.preset.unwrap_or_else(|| profile.preferred_preset())
    }

    /// Resolves the settings into a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged configuration is out of range.
    pub fn resolve(&self, profile: &DeviceProfile) -> Result<DndConfig> {
        let base = self.effective_preset(profile).config();
        let config = build_config(&base, &self.overrides);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use tempfile::TempDir;

    #[test]
    fn empty_settings_follow_device() {
        let settings = Settings::default();
        let phone = DeviceProfile {
            touch: true,
            ..DeviceProfile::default()
        };
        assert_eq!(settings.effective_preset(&phone), Preset::Mobile);
        assert_eq!(settings.resolve(&phone).unwrap(), Preset::Mobile.config());
    }

    #[test]
    fn pinned_preset_ignores_device() {
        let settings = Settings::with_preset(Preset::Precision);
        let phone = DeviceProfile {
            touch: true,
            ..DeviceProfile::default()
        };
        assert_eq!(settings.effective_preset(&phone), Preset::Precision);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let settings: Settings = serde_json5::from_str(
            r#"{
                preset: "mobile",
                overrides: { snap: { targets: { tolerance: 25 } } },
            }"#,
        )
        .unwrap();

        let config = settings.resolve(&DeviceProfile::default()).unwrap();
        assert_eq!(config.snap.targets.tolerance, 25.0);
        assert_eq!(config.snap.targets.smoothing, 0.25);
        assert_eq!(config.ghost.scale, 1.1);
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapboard.json5");
        std::fs::write(
            &path,
            r#"
            {
                preset: "accessible",
                overrides: {
                    // keep the ghost after all
                    ghost: { enabled: true },
                    placeholder: { height: { fixed: 3 } },
                },
            }
            "#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.preset, Some(Preset::Accessible));
        let config = settings.resolve(&DeviceProfile::default()).unwrap();
        assert!(config.ghost.enabled);
        assert_eq!(
            config.placeholder.height,
            crate::dnd::PlaceholderHeight::Fixed(3.0)
        );
        assert_eq!(config.accessibility.keyboard.move_step, 5.0);
    }

    #[test]
    fn load_rejects_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapboard.json");
        std::fs::write(&path, r#"{"overrides": {"snap": {"targets": {"smoothing": 2}}}}"#)
            .unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "snap.targets.smoothing",
                ..
            }
        ));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("snapboard.json");

        let mut original = Settings::with_preset(Preset::LowPerformance);
        original.overrides.debug = Some(true);
        original.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), original);
    }

    #[test]
    fn default_settings_serialize_to_empty_object() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
