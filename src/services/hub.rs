// SPDX-License-Identifier: MIT

//! Hub selection and membership.
//!
//! The selected hub id is a per-identity value in local storage; at most one
//! hub is active per identity. Membership lives on the hub document itself.

use crate::db::{keys, HubStore, LocalStore};
use crate::error::{Error, Result};
use crate::models::UserContext;
use std::sync::Arc;

const DEFAULT_HUB_NAME: &str = "Learning Hub";

/// Hub membership operations plus local persistence of the active selection.
pub struct HubService<R: HubStore, L: LocalStore> {
    remote: R,
    local: Arc<L>,
}

impl<R: HubStore, L: LocalStore> HubService<R, L> {
    pub fn new(remote: R, local: Arc<L>) -> Self {
        Self { remote, local }
    }

    /// The persisted hub selection for this identity, if any.
    pub fn selection(&self, ctx: &UserContext) -> Option<String> {
        let id: String = self.local.get_or_default(&keys::hub(ctx.namespace()));
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    fn set_selection(&self, ctx: &UserContext, hub_id: &str) -> Result<()> {
        self.local
            .set_typed(&keys::hub(ctx.namespace()), &hub_id.to_string())
    }

    /// Context rebuilt with the persisted hub selection applied.
    pub fn resolve(&self, ctx: &UserContext) -> UserContext {
        match self.selection(ctx) {
            Some(hub_id) => ctx.clone().with_hub(hub_id),
            None => ctx.clone().without_hub(),
        }
    }

    /// Create a hub, select it, and return its id for sharing. Requires a
    /// signed-in identity.
    pub async fn create_hub(&self, ctx: &UserContext) -> Result<String> {
        let identity = ctx.identity().ok_or(Error::IdentityRequired)?;
        let hub_id = self.remote.create_hub(DEFAULT_HUB_NAME, identity).await?;
        self.set_selection(ctx, &hub_id)?;
        tracing::info!(hub_id = %hub_id, "Hub created and selected");
        Ok(hub_id)
    }

    /// Join an existing hub by code and select it. The local selection is
    /// only updated after the remote join succeeds.
    pub async fn join_hub(&self, ctx: &UserContext, code: &str) -> Result<()> {
        let identity = ctx.identity().ok_or(Error::IdentityRequired)?;
        let hub_id = code.trim();
        if hub_id.is_empty() {
            return Err(Error::Validation("enter a hub code".into()));
        }

        self.remote.join_hub(hub_id, identity).await?;
        self.set_selection(ctx, hub_id)?;
        tracing::info!(hub_id, "Hub joined and selected");
        Ok(())
    }

    /// Clear the local selection. Membership on the hub document is left
    /// as-is; subsequent schedule operations route to local storage.
    pub fn leave_hub(&self, ctx: &UserContext) -> Result<()> {
        self.set_selection(ctx, "")
    }
}
