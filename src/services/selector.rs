// SPDX-License-Identifier: MIT

//! Data source selection for schedule and live-session operations.

use crate::models::UserContext;

/// Which data source an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Per-identity local storage.
    Local,
    /// The shared remote collections for the selected hub.
    Shared,
}

/// True when schedule/live operations should target the shared hub store:
/// a signed-in identity, a selected hub, and remote connectivity must all be
/// present. A pure function of its inputs.
pub fn using_shared_source(ctx: &UserContext, connected: bool) -> bool {
    connected && ctx.identity().is_some() && ctx.hub_id().is_some()
}

/// The active data source for a context.
pub fn select(ctx: &UserContext, connected: bool) -> DataSource {
    if using_shared_source(ctx, connected) {
        DataSource::Shared
    } else {
        DataSource::Local
    }
}
