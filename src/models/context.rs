// SPDX-License-Identifier: MIT

//! Explicit per-call user context.
//!
//! Every store and routing operation takes the identity and hub selection as
//! an explicit parameter object. There is no ambient "current user" state.

/// Namespace used for all local keys when no identity is present.
pub const GUEST_NAMESPACE: &str = "guest";

/// Identity plus active hub selection for one logical user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    identity: Option<String>,
    hub: Option<String>,
}

impl UserContext {
    /// Anonymous context: local storage only, no hub.
    pub fn guest() -> Self {
        Self::default()
    }

    /// Context for a signed-in identity (an opaque string, e.g. an email).
    pub fn for_identity(identity: impl Into<String>) -> Self {
        Self {
            identity: Some(identity.into()),
            hub: None,
        }
    }

    /// Same context with the given hub selected.
    pub fn with_hub(mut self, hub_id: impl Into<String>) -> Self {
        self.hub = Some(hub_id.into());
        self
    }

    /// Same context with no hub selected.
    pub fn without_hub(mut self) -> Self {
        self.hub = None;
        self
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn hub_id(&self) -> Option<&str> {
        self.hub.as_deref()
    }

    /// Namespace for local storage keys: the identity, or a fixed guest
    /// namespace when anonymous.
    pub fn namespace(&self) -> &str {
        self.identity.as_deref().unwrap_or(GUEST_NAMESPACE)
    }
}
