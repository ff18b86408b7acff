//! Hierarchical addressing of zones, records and sub-objects
//!
//! Provides [`ZonePath`] for nested containers and [`RecordId`] for the
//! terminal records that live inside them.

use crate::error::ModelError;
use crate::record::ClassId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path of a zone in the content tree
///
/// Nested zones are written with dots, outermost first.
///
/// # Examples
/// - `["Main"]` → `Main`
/// - `["Sandbox", "Drafts"]` → `Sandbox.Drafts`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZonePath(Vec<String>);

impl ZonePath {
    /// Create path from segments
    ///
    /// # Errors
    /// Returns error if there are no segments or one of them is empty
    pub fn new<I, S>(segments: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ModelError::Empty("zone path"));
        }
        if segments.iter().any(|s| s.is_empty() || s.contains('.')) {
            return Err(ModelError::EmptySegment);
        }
        Ok(Self(segments))
    }

    /// Record with the given name inside this zone
    ///
    /// # Errors
    /// Returns error if `name` is empty or contains a dot
    pub fn record(&self, name: impl Into<String>) -> Result<RecordId, ModelError> {
        RecordId::new(self.clone(), name)
    }
}

impl Display for ZonePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for ZonePath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ModelError::Empty("zone path"));
        }
        Self::new(s.split('.'))
    }
}

impl TryFrom<String> for ZonePath {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZonePath> for String {
    fn from(path: ZonePath) -> Self {
        path.to_string()
    }
}

/// Identifier of a record held by the document store
///
/// A record is a named leaf inside a zone, written `Zone.Sub.Name`. The
/// name never contains a dot, so the written form parses back to the same id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId {
    zone: ZonePath,
    name: String,
}

/// Reference to a terminal page; pages are addressed like any other record
pub type PageRef = RecordId;

impl RecordId {
    /// Create record id
    ///
    /// # Errors
    /// Returns error if `name` is empty or contains a dot
    pub fn new(zone: ZonePath, name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::Empty("record name"));
        }
        if name.contains('.') {
            return Err(ModelError::DottedName(name));
        }
        Ok(Self { zone, name })
    }

    #[inline]
    #[must_use]
    pub fn zone(&self) -> &ZonePath {
        &self.zone
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.zone, self.name)
    }
}

impl TryFrom<String> for RecordId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

impl FromStr for RecordId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('.') {
            Some((zone, name)) => Self::new(zone.parse()?, name),
            None if s.is_empty() => Err(ModelError::Empty("record reference")),
            None => Err(ModelError::IncompleteReference(s.to_string())),
        }
    }
}

/// Reference to one object attached to a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Page holding the object
    pub page: PageRef,
    /// Object class
    pub class: ClassId,
    /// Object number within the class
    pub number: u32,
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}^{}[{}]", self.page, self.class, self.number)
    }
}
