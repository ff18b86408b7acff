//! Security rules
//!
//! A [`SecurityRule`] says which users and groups are allowed (or denied) a
//! set of [`Right`]s. Rules are plain values: two rules with the same fields
//! are the same rule.

use crate::error::ModelError;
use crate::record::ObjectFields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Object field holding the comma-separated user list
pub const USERS_FIELD: &str = "users";
/// Object field holding the comma-separated group list
pub const GROUPS_FIELD: &str = "groups";
/// Object field holding the comma-separated right names
pub const LEVELS_FIELD: &str = "levels";
/// Object field holding the rule state (`1` allow, `0` deny)
pub const ALLOW_FIELD: &str = "allow";

/// Named permission
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Right {
    View,
    Edit,
    Comment,
    Delete,
    Admin,
    Register,
    Programming,
    Login,
    Script,
    CreateWiki,
    /// Right registered by an extension
    Custom(CustomRight),
}

/// Name of an extension right
///
/// Always trimmed, lowercase, non-empty and free of the list separator, so
/// it reads back unchanged from a persisted `levels` field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomRight(String);

impl CustomRight {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Right {
    /// Right with the given name
    ///
    /// Built-in names resolve to their own variant, so `custom("View")` is
    /// [`Right::View`].
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidRight`] if `name` is blank or contains `,`
    pub fn custom(name: &str) -> Result<Self, ModelError> {
        name.parse()
    }

    /// Lowercase textual form used in persisted objects
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Comment => "comment",
            Self::Delete => "delete",
            Self::Admin => "admin",
            Self::Register => "register",
            Self::Programming => "programming",
            Self::Login => "login",
            Self::Script => "script",
            Self::CreateWiki => "createwiki",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl Display for Right {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Right {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.contains(',') {
            return Err(ModelError::InvalidRight(s.to_string()));
        }
        let right = match trimmed.to_ascii_lowercase().as_str() {
            "view" => Self::View,
            "edit" => Self::Edit,
            "comment" => Self::Comment,
            "delete" => Self::Delete,
            "admin" => Self::Admin,
            "register" => Self::Register,
            "programming" => Self::Programming,
            "login" => Self::Login,
            "script" => Self::Script,
            "createwiki" => Self::CreateWiki,
            other => Self::Custom(CustomRight(other.to_string())),
        };
        Ok(right)
    }
}

impl TryFrom<String> for Right {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Right> for String {
    fn from(right: Right) -> Self {
        right.as_str().to_string()
    }
}

/// Polarity of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleState {
    Allow,
    Deny,
}

impl RuleState {
    #[inline]
    #[must_use]
    pub fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Identifier of a user or group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalRef(String);

impl PrincipalRef {
    /// Create principal reference
    ///
    /// Surrounding whitespace is dropped, matching how stored lists are read.
    ///
    /// # Errors
    /// Returns error if `id` is blank or contains the list separator
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() || trimmed.contains(',') {
            return Err(ModelError::InvalidPrincipal(id));
        }
        if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PrincipalRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PrincipalRef {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PrincipalRef {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PrincipalRef> for String {
    fn from(principal: PrincipalRef) -> Self {
        principal.0
    }
}

/// Declarative security rule
///
/// # Invariants
/// - Immutable once built
/// - Identity is the field values; sets keep a deterministic order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityRule {
    users: BTreeSet<PrincipalRef>,
    groups: BTreeSet<PrincipalRef>,
    rights: BTreeSet<Right>,
    state: RuleState,
}

impl SecurityRule {
    /// Create rule from its parts
    #[must_use]
    pub fn new(
        users: impl IntoIterator<Item = PrincipalRef>,
        groups: impl IntoIterator<Item = PrincipalRef>,
        rights: impl IntoIterator<Item = Right>,
        state: RuleState,
    ) -> Self {
        Self {
            users: users.into_iter().collect(),
            groups: groups.into_iter().collect(),
            rights: rights.into_iter().collect(),
            state,
        }
    }

    /// Start building an allow rule
    #[inline]
    #[must_use]
    pub fn allow() -> SecurityRuleBuilder {
        SecurityRuleBuilder::new(RuleState::Allow)
    }

    /// Start building a deny rule
    #[inline]
    #[must_use]
    pub fn deny() -> SecurityRuleBuilder {
        SecurityRuleBuilder::new(RuleState::Deny)
    }

    #[inline]
    #[must_use]
    pub fn users(&self) -> &BTreeSet<PrincipalRef> {
        &self.users
    }

    #[inline]
    #[must_use]
    pub fn groups(&self) -> &BTreeSet<PrincipalRef> {
        &self.groups
    }

    #[inline]
    #[must_use]
    pub fn rights(&self) -> &BTreeSet<Right> {
        &self.rights
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> RuleState {
        self.state
    }

    /// Encode this rule as rights object fields
    #[must_use]
    pub fn to_fields(&self) -> ObjectFields {
        let mut fields = ObjectFields::new();
        fields.insert(USERS_FIELD.to_string(), join(&self.users));
        fields.insert(GROUPS_FIELD.to_string(), join(&self.groups));
        fields.insert(LEVELS_FIELD.to_string(), join(&self.rights));
        let allow = if self.state.is_allow() { "1" } else { "0" };
        fields.insert(ALLOW_FIELD.to_string(), allow.to_string());
        fields
    }

    /// Decode a rule from rights object fields
    ///
    /// Missing `users`/`groups` lists read as empty; `levels` and `allow`
    /// are required.
    ///
    /// # Errors
    /// Returns error if a required field is missing or malformed
    pub fn from_fields(fields: &ObjectFields) -> Result<Self, ModelError> {
        let users = split(field_or_empty(fields, USERS_FIELD), |s| PrincipalRef::new(s))?;
        let groups = split(field_or_empty(fields, GROUPS_FIELD), |s| PrincipalRef::new(s))?;
        let levels = fields
            .get(LEVELS_FIELD)
            .ok_or(ModelError::MissingField(LEVELS_FIELD))?;
        let rights = split(levels, |s| s.parse::<Right>())?;
        let state = match fields.get(ALLOW_FIELD).map(|s| s.trim()) {
            Some("1") => RuleState::Allow,
            Some("0") => RuleState::Deny,
            Some(other) => {
                return Err(ModelError::InvalidField {
                    field: ALLOW_FIELD,
                    value: other.to_string(),
                })
            }
            None => return Err(ModelError::MissingField(ALLOW_FIELD)),
        };
        Ok(Self {
            users,
            groups,
            rights,
            state,
        })
    }
}

fn field_or_empty<'a>(fields: &'a ObjectFields, name: &str) -> &'a str {
    fields.get(name).map_or("", String::as_str)
}

fn join<T: Display>(items: &BTreeSet<T>) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn split<T, F>(raw: &str, parse: F) -> Result<BTreeSet<T>, ModelError>
where
    T: Ord,
    F: Fn(&str) -> Result<T, ModelError>,
{
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse)
        .collect()
}

/// Builder for [`SecurityRule`]
#[derive(Debug, Clone)]
pub struct SecurityRuleBuilder {
    users: BTreeSet<PrincipalRef>,
    groups: BTreeSet<PrincipalRef>,
    rights: BTreeSet<Right>,
    state: RuleState,
}

impl SecurityRuleBuilder {
    fn new(state: RuleState) -> Self {
        Self {
            users: BTreeSet::new(),
            groups: BTreeSet::new(),
            rights: BTreeSet::new(),
            state,
        }
    }

    /// Add a user principal
    #[must_use]
    pub fn user(mut self, user: PrincipalRef) -> Self {
        self.users.insert(user);
        self
    }

    /// Add a group principal
    #[must_use]
    pub fn group(mut self, group: PrincipalRef) -> Self {
        self.groups.insert(group);
        self
    }

    /// Add a right
    #[must_use]
    pub fn right(mut self, right: Right) -> Self {
        self.rights.insert(right);
        self
    }

    /// Add several rights
    #[must_use]
    pub fn rights(mut self, rights: impl IntoIterator<Item = Right>) -> Self {
        self.rights.extend(rights);
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityRule {
        SecurityRule {
            users: self.users,
            groups: self.groups,
            rights: self.rights,
            state: self.state,
        }
    }
}
