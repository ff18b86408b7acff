//! Scope resolution
//!
//! Maps a [`ScopeReference`] onto the record and class that store its rights.

use crate::config::EngineConfig;
use crate::error::RightsError;
use rights_model::{ClassId, RecordId, ScopeReference, ZonePath};

/// Where the rights of one scope live
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageTarget {
    /// Record holding the rights objects
    pub record: RecordId,
    /// Class of the rights objects
    pub class: ClassId,
    /// Record exists only to carry rights for a container scope
    pub is_derived_preferences_record: bool,
}

/// Resolves scope references to storage targets
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    global_record: RecordId,
    zone_preferences_name: String,
    global_class: ClassId,
    page_class: ClassId,
}

impl ScopeResolver {
    /// Create resolver from configuration
    ///
    /// # Errors
    /// Returns [`RightsError::Config`] if the configuration is invalid
    pub fn new(config: &EngineConfig) -> Result<Self, RightsError> {
        config.validate()?;
        let system_zone: ZonePath = config.system_zone_path()?;
        Ok(Self {
            global_record: system_zone.record(&config.global_preferences_name)?,
            zone_preferences_name: config.zone_preferences_name.clone(),
            global_class: config.global_rights_class_id(),
            page_class: config.page_rights_class_id(),
        })
    }

    /// Resolve a scope
    ///
    /// # Errors
    /// Returns [`RightsError::UnsupportedScope`] for anything other than
    /// global, zone or page references
    pub fn resolve(&self, scope: &ScopeReference) -> Result<StorageTarget, RightsError> {
        let target = match scope {
            ScopeReference::Global => StorageTarget {
                record: self.global_record.clone(),
                class: self.global_class.clone(),
                is_derived_preferences_record: true,
            },
            ScopeReference::Zone(zone) => StorageTarget {
                record: zone.record(&self.zone_preferences_name)?,
                class: self.global_class.clone(),
                is_derived_preferences_record: true,
            },
            ScopeReference::Page(page) => StorageTarget {
                record: page.clone(),
                class: self.page_class.clone(),
                is_derived_preferences_record: false,
            },
            ScopeReference::Object(_) | ScopeReference::Attachment { .. } => {
                return Err(RightsError::UnsupportedScope { kind: scope.kind() });
            }
        };

        tracing::debug!(
            scope = %scope,
            record = %target.record,
            class = %target.class,
            "Resolved rights storage"
        );
        Ok(target)
    }

    /// Record holding installation-wide rights
    #[inline]
    #[must_use]
    pub fn global_record(&self) -> &RecordId {
        &self.global_record
    }
}
