//! Acting principal lookup

use rights_model::PrincipalRef;

/// Supplies the principal performing the current operation
pub trait ActorProvider: Send + Sync {
    /// Current actor; `None` for a guest
    fn current_actor(&self) -> Option<PrincipalRef>;
}

/// Provider that always reports the same actor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedActor(Option<PrincipalRef>);

impl FixedActor {
    #[inline]
    #[must_use]
    pub fn new(actor: PrincipalRef) -> Self {
        Self(Some(actor))
    }

    /// Provider for an unauthenticated caller
    #[inline]
    #[must_use]
    pub fn guest() -> Self {
        Self(None)
    }
}

impl ActorProvider for FixedActor {
    fn current_actor(&self) -> Option<PrincipalRef> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_actor_reports_principal() {
        let admin = PrincipalRef::new("XWiki.Admin").unwrap();
        assert_eq!(FixedActor::new(admin.clone()).current_actor(), Some(admin));
        assert_eq!(FixedActor::guest().current_actor(), None);
    }
}
