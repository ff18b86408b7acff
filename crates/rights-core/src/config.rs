//! Engine configuration

use crate::error::RightsError;
use rights_model::{ClassId, ZonePath};
use rights_writer::DEFAULT_WRITER;
use serde::{Deserialize, Serialize};

/// Rights engine configuration
///
/// Names the records and classes rights are stored under, and the writer
/// strategy used when a caller does not pick one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Writer strategy used by `save_rules`
    pub default_strategy: String,
    /// Zone holding installation-wide records
    pub system_zone: String,
    /// Record name of the installation-wide preferences
    pub global_preferences_name: String,
    /// Record name of each zone's preferences
    pub zone_preferences_name: String,
    /// Class of rights stored on preferences records
    pub global_rights_class: String,
    /// Class of rights stored on pages
    pub page_rights_class: String,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML or fails validation
    pub fn from_toml_str(source: &str) -> Result<Self, RightsError> {
        let config: Self =
            toml::from_str(source).map_err(|e| RightsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// With default writer strategy
    #[inline]
    #[must_use]
    pub fn with_default_strategy(mut self, name: impl Into<String>) -> Self {
        self.default_strategy = name.into();
        self
    }

    /// With system zone
    #[inline]
    #[must_use]
    pub fn with_system_zone(mut self, zone: impl Into<String>) -> Self {
        self.system_zone = zone.into();
        self
    }

    /// With preferences record names
    #[inline]
    #[must_use]
    pub fn with_preferences_names(
        mut self,
        global: impl Into<String>,
        zone: impl Into<String>,
    ) -> Self {
        self.global_preferences_name = global.into();
        self.zone_preferences_name = zone.into();
        self
    }

    /// With rights class ids
    #[inline]
    #[must_use]
    pub fn with_rights_classes(
        mut self,
        global: impl Into<String>,
        page: impl Into<String>,
    ) -> Self {
        self.global_rights_class = global.into();
        self.page_rights_class = page.into();
        self
    }

    /// Check that every name is usable
    ///
    /// # Errors
    /// Returns [`RightsError::Config`] naming the first bad entry
    pub fn validate(&self) -> Result<(), RightsError> {
        let required = [
            ("default_strategy", &self.default_strategy),
            ("global_preferences_name", &self.global_preferences_name),
            ("zone_preferences_name", &self.zone_preferences_name),
            ("global_rights_class", &self.global_rights_class),
            ("page_rights_class", &self.page_rights_class),
        ];
        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(RightsError::Config(format!("{key} must not be empty")));
        }
        let record_names = [
            ("global_preferences_name", &self.global_preferences_name),
            ("zone_preferences_name", &self.zone_preferences_name),
        ];
        if let Some((key, value)) = record_names.iter().find(|(_, value)| value.contains('.')) {
            return Err(RightsError::Config(format!("{key} '{value}' must not contain '.'")));
        }
        self.system_zone_path()
            .map_err(|e| RightsError::Config(format!("system_zone: {e}")))?;
        Ok(())
    }

    /// Parsed system zone
    pub(crate) fn system_zone_path(&self) -> Result<ZonePath, rights_model::ModelError> {
        self.system_zone.parse()
    }

    pub(crate) fn global_rights_class_id(&self) -> ClassId {
        ClassId::new(&self.global_rights_class)
    }

    pub(crate) fn page_rights_class_id(&self) -> ClassId {
        ClassId::new(&self.page_rights_class)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_strategy: DEFAULT_WRITER.to_string(),
            system_zone: "XWiki".to_string(),
            global_preferences_name: "XWikiPreferences".to_string(),
            zone_preferences_name: "WebPreferences".to_string(),
            global_rights_class: "XWiki.XWikiGlobalRights".to_string(),
            page_rights_class: "XWiki.XWikiRights".to_string(),
        }
    }
}
