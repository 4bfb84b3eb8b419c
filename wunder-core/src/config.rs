use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::UnitSystem;

/// Stored user preferences.
///
/// `None` means the setting has never been supplied, which is distinct
/// from any valid value; required settings are only enforced in
/// [`Preferences::resolve`], after command-line overrides are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// `true` selects imperial units, `false` metric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imperial: Option<bool>,
}

/// Values supplied on the command line for this run.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub location: Option<String>,
    pub imperial: Option<bool>,
}

/// Fully-resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub location: String,
    pub units: UnitSystem,
}

impl Preferences {
    /// Load preferences from disk, or return the all-unset default if the
    /// file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::store_file_path()?;
        if !path.exists() {
            // First run: nothing stored yet.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preference file: {}", path.display()))?;

        let prefs: Preferences = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preference file: {}", path.display()))?;

        Ok(prefs)
    }

    /// Save preferences to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::store_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preference directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize preferences to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write preference file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the preference file.
    pub fn store_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wunder", "wunder")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("preferences.toml"))
    }

    /// Merge command-line values over the stored ones.
    ///
    /// Returns whether anything changed and needs to be written back; a
    /// command-line value equal to the stored one causes no rewrite.
    pub fn apply(&mut self, overrides: &Overrides) -> bool {
        let mut changed = false;

        if overrides.api_key.is_some() && overrides.api_key != self.api_key {
            self.api_key = overrides.api_key.clone();
            changed = true;
        }
        if overrides.location.is_some() && overrides.location != self.location {
            self.location = overrides.location.clone();
            changed = true;
        }
        if overrides.imperial.is_some() && overrides.imperial != self.imperial {
            self.imperial = overrides.imperial;
            changed = true;
        }

        changed
    }

    /// Check that every required setting is present, in option order.
    ///
    /// The returned error names the first missing setting; callers stop
    /// before any network access.
    pub fn resolve(&self) -> Result<Settings> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            anyhow!(
                "API key not set.\n\
                 Hint: pass `--key <API key>` once; it is stored for later runs."
            )
        })?;

        let location = self.location.clone().ok_or_else(|| {
            anyhow!(
                "Location not set.\n\
                 Hint: pass `--location <location>` once; it is stored for later runs."
            )
        })?;

        let units = match self.imperial {
            Some(true) => UnitSystem::Imperial,
            Some(false) => UnitSystem::Metric,
            None => {
                return Err(anyhow!(
                    "Units not set (Imperial/Metric).\n\
                     Hint: pass `--imperial` or `--metric` once; the choice is stored for later runs."
                ));
            }
        };

        Ok(Settings { api_key, location, units })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_prefs() -> Preferences {
        Preferences {
            api_key: Some("SECRET".to_string()),
            location: Some("95128".to_string()),
            imperial: Some(true),
        }
    }

    #[test]
    fn resolve_errors_when_api_key_missing() {
        let prefs = Preferences::default();
        let err = prefs.resolve().unwrap_err();

        assert!(err.to_string().contains("API key not set"));
    }

    #[test]
    fn resolve_errors_when_location_missing() {
        let prefs = Preferences { api_key: Some("SECRET".to_string()), ..Default::default() };
        let err = prefs.resolve().unwrap_err();

        assert!(err.to_string().contains("Location not set"));
    }

    #[test]
    fn resolve_errors_when_units_missing() {
        let prefs = Preferences {
            api_key: Some("SECRET".to_string()),
            location: Some("95128".to_string()),
            imperial: None,
        };
        let err = prefs.resolve().unwrap_err();

        assert!(err.to_string().contains("Units not set (Imperial/Metric)"));
    }

    #[test]
    fn resolve_maps_stored_boolean_to_unit_system() {
        let settings = full_prefs().resolve().expect("all settings are present");
        assert_eq!(settings.units, UnitSystem::Imperial);
        assert_eq!(settings.api_key, "SECRET");
        assert_eq!(settings.location, "95128");

        let metric = Preferences { imperial: Some(false), ..full_prefs() };
        let settings = metric.resolve().expect("all settings are present");
        assert_eq!(settings.units, UnitSystem::Metric);
    }

    #[test]
    fn overrides_take_precedence_and_mark_the_record_changed() {
        let mut prefs = full_prefs();
        let overrides = Overrides {
            location: Some("London".to_string()),
            imperial: Some(false),
            ..Default::default()
        };

        assert!(prefs.apply(&overrides));
        assert_eq!(prefs.api_key.as_deref(), Some("SECRET"));
        assert_eq!(prefs.location.as_deref(), Some("London"));
        assert_eq!(prefs.imperial, Some(false));
    }

    #[test]
    fn absent_overrides_leave_stored_values_untouched() {
        let mut prefs = full_prefs();

        assert!(!prefs.apply(&Overrides::default()));
        assert_eq!(prefs, full_prefs());
    }

    #[test]
    fn override_equal_to_stored_value_causes_no_rewrite() {
        let mut prefs = full_prefs();
        let overrides = Overrides {
            api_key: Some("SECRET".to_string()),
            location: Some("95128".to_string()),
            imperial: Some(true),
        };

        assert!(!prefs.apply(&overrides));
    }

    #[test]
    fn first_run_overrides_populate_an_empty_record() {
        let mut prefs = Preferences::default();
        let overrides = Overrides {
            api_key: Some("SECRET".to_string()),
            location: Some("95128".to_string()),
            imperial: Some(true),
        };

        assert!(prefs.apply(&overrides));
        assert_eq!(prefs, full_prefs());
    }

    #[test]
    fn preferences_round_trip_through_toml() {
        let prefs = full_prefs();

        let serialized = toml::to_string_pretty(&prefs).expect("preferences serialize");
        let parsed: Preferences = toml::from_str(&serialized).expect("preferences parse");

        assert_eq!(parsed, prefs);
    }

    #[test]
    fn unset_fields_are_omitted_and_read_back_as_unset() {
        let prefs = Preferences { location: Some("95128".to_string()), ..Default::default() };

        let serialized = toml::to_string_pretty(&prefs).expect("preferences serialize");
        assert!(!serialized.contains("api_key"));
        assert!(!serialized.contains("imperial"));

        let parsed: Preferences = toml::from_str(&serialized).expect("preferences parse");
        assert_eq!(parsed, prefs);
    }
}
