//! Scope references: where in the content tree rights are assigned

use crate::path::{ObjectRef, PageRef, ZonePath};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Target of a rights assignment
///
/// Only `Global`, `Zone` and `Page` can carry rights. The other kinds exist
/// so callers holding such a reference get a proper error instead of a
/// silent mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ScopeReference {
    /// The entire installation
    Global,
    /// A hierarchical container and everything below it
    Zone(ZonePath),
    /// A single terminal page
    Page(PageRef),
    /// An object attached to a page
    Object(ObjectRef),
    /// A file attached to a page
    Attachment {
        /// Page holding the attachment
        page: PageRef,
        /// Attachment file name
        name: String,
    },
}

impl ScopeReference {
    /// Short name of the reference kind, for diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Zone(_) => "zone",
            Self::Page(_) => "page",
            Self::Object(_) => "object",
            Self::Attachment { .. } => "attachment",
        }
    }
}

impl Display for ScopeReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Zone(zone) => write!(f, "zone:{zone}"),
            Self::Page(page) => write!(f, "page:{page}"),
            Self::Object(object) => write!(f, "object:{object}"),
            Self::Attachment { page, name } => write!(f, "attachment:{page}@{name}"),
        }
    }
}
