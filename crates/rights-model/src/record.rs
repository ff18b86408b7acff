//! Records and their numbered rights objects
//!
//! A [`Record`] is the unit the document store loads and saves. It holds,
//! per schema class, a collection of numbered [`RightsObject`] slots.

use crate::error::ModelError;
use crate::path::RecordId;
use crate::rule::{PrincipalRef, SecurityRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Serialized object fields, keyed by field name
pub type ObjectFields = BTreeMap<String, String>;

/// Identifier of a rights schema class
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One numbered slot of a record, holding one encoded rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightsObject {
    class: ClassId,
    number: u32,
    fields: ObjectFields,
}

impl RightsObject {
    #[inline]
    #[must_use]
    pub fn class(&self) -> &ClassId {
        &self.class
    }

    /// Slot number, unique per (record, class)
    #[inline]
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[inline]
    #[must_use]
    pub fn fields(&self) -> &ObjectFields {
        &self.fields
    }

    /// Overwrite the fields with the encoding of `rule`
    ///
    /// Returns `false` when the slot already held exactly that encoding.
    pub fn write_rule(&mut self, rule: &SecurityRule) -> bool {
        let fields = rule.to_fields();
        if fields == self.fields {
            return false;
        }
        self.fields = fields;
        true
    }

    /// Decode the rule held by this slot
    ///
    /// # Errors
    /// Returns error if the fields do not encode a rule
    pub fn read_rule(&self) -> Result<SecurityRule, ModelError> {
        SecurityRule::from_fields(&self.fields)
    }
}

/// Objects of one class within a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ClassObjects {
    objects: BTreeMap<u32, RightsObject>,
    /// Next number to hand out; never decreases
    next_number: u32,
}

/// Mutable container of rights objects, owned by the document store
///
/// # Invariants
/// - Object numbers are unique per class
/// - A new object always gets a number above every number ever used for
///   its class in this record
///
/// Deserialization checks both invariants, so a record read back from a
/// store backend can never hand out a number that is already taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct Record {
    id: RecordId,
    is_new: bool,
    hidden: bool,
    author: Option<PrincipalRef>,
    version: u64,
    classes: BTreeMap<ClassId, ClassObjects>,
}

/// Unchecked serialized form of [`Record`]
#[derive(Deserialize)]
struct StoredRecord {
    id: RecordId,
    is_new: bool,
    hidden: bool,
    author: Option<PrincipalRef>,
    version: u64,
    classes: BTreeMap<ClassId, ClassObjects>,
}

impl TryFrom<StoredRecord> for Record {
    type Error = ModelError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| ModelError::InvalidRecord {
            record: stored.id.to_string(),
            reason,
        };
        for (class, slots) in &stored.classes {
            for (number, object) in &slots.objects {
                if object.number != *number || object.class != *class {
                    return Err(invalid(format!(
                        "slot {class}[{number}] holds object {}[{}]",
                        object.class, object.number
                    )));
                }
            }
            if let Some(highest) = slots.objects.keys().next_back() {
                if slots.next_number <= *highest {
                    return Err(invalid(format!(
                        "next number {} of {class} is not above {highest}",
                        slots.next_number
                    )));
                }
            }
        }
        Ok(Self {
            id: stored.id,
            is_new: stored.is_new,
            hidden: stored.hidden,
            author: stored.author,
            version: stored.version,
            classes: stored.classes,
        })
    }
}

impl Record {
    /// Create a record that has never been persisted
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            is_new: true,
            hidden: false,
            author: None,
            version: 0,
            classes: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// True if no persisted version of this record exists
    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    #[inline]
    #[must_use]
    pub fn author(&self) -> Option<&PrincipalRef> {
        self.author.as_ref()
    }

    #[inline]
    pub fn set_author(&mut self, author: Option<PrincipalRef>) {
        self.author = author;
    }

    /// Version assigned by the store on last save (0 if never saved)
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Mark this record as persisted under `version`
    ///
    /// Called by document store implementations on a successful save.
    pub fn mark_persisted(&mut self, version: u64) {
        self.is_new = false;
        self.version = version;
    }

    /// Objects of `class`, in ascending number order
    pub fn objects<'a>(&'a self, class: &ClassId) -> impl Iterator<Item = &'a RightsObject> + 'a {
        self.classes
            .get(class)
            .into_iter()
            .flat_map(|c| c.objects.values())
    }

    /// Numbers of the objects of `class`, ascending
    #[must_use]
    pub fn object_numbers(&self, class: &ClassId) -> Vec<u32> {
        self.objects(class).map(RightsObject::number).collect()
    }

    /// Number of objects of `class`
    #[must_use]
    pub fn object_count(&self, class: &ClassId) -> usize {
        self.classes.get(class).map_or(0, |c| c.objects.len())
    }

    /// Total number of objects across all classes
    #[must_use]
    pub fn total_object_count(&self) -> usize {
        self.classes.values().map(|c| c.objects.len()).sum()
    }

    #[must_use]
    pub fn object(&self, class: &ClassId, number: u32) -> Option<&RightsObject> {
        self.classes.get(class).and_then(|c| c.objects.get(&number))
    }

    pub fn object_mut(&mut self, class: &ClassId, number: u32) -> Option<&mut RightsObject> {
        self.classes
            .get_mut(class)
            .and_then(|c| c.objects.get_mut(&number))
    }

    /// Number the next new object of `class` will receive
    #[must_use]
    pub fn next_number(&self, class: &ClassId) -> u32 {
        self.classes.get(class).map_or(0, |c| c.next_number)
    }

    /// Append a new object of `class` encoding `rule`
    ///
    /// Returns the number assigned to the new object.
    pub fn add_object(&mut self, class: &ClassId, rule: &SecurityRule) -> u32 {
        let slots = self.classes.entry(class.clone()).or_default();
        let number = slots.next_number;
        slots.next_number += 1;
        slots.objects.insert(
            number,
            RightsObject {
                class: class.clone(),
                number,
                fields: rule.to_fields(),
            },
        );
        number
    }

    /// Delete the object `number` of `class`
    ///
    /// The number is not handed out again.
    pub fn remove_object(&mut self, class: &ClassId, number: u32) -> Option<RightsObject> {
        self.classes
            .get_mut(class)
            .and_then(|c| c.objects.remove(&number))
    }

    /// Decode every object of `class` back into rules, in number order
    ///
    /// # Errors
    /// Returns error on the first object that does not encode a rule
    pub fn rules(&self, class: &ClassId) -> Result<Vec<SecurityRule>, ModelError> {
        self.objects(class).map(RightsObject::read_rule).collect()
    }
}
