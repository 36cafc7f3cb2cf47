// SPDX-License-Identifier: MIT

//! Schedule operations, routed to local storage or the shared hub store.

use crate::db::{keys, HubStore, LocalStore};
use crate::error::{Error, Result};
use crate::models::schedule::sanitize_video_url;
use crate::models::{ScheduleItem, SessionDraft, SessionEntry, SessionKey, UserContext};
use crate::services::selector::{self, DataSource};
use std::sync::Arc;

/// Local sessions for a context, position-addressed in insertion order.
pub fn local_sessions<L: LocalStore>(local: &L, ctx: &UserContext) -> Vec<SessionEntry> {
    let items: Vec<ScheduleItem> = local.get_or_default(&keys::schedule(ctx.namespace()));
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| SessionEntry {
            key: SessionKey::Local(idx),
            item,
        })
        .collect()
}

/// Schedule CRUD over the active data source.
pub struct ScheduleService<R: HubStore, L: LocalStore> {
    remote: R,
    local: Arc<L>,
    connected: bool,
}

impl<R: HubStore, L: LocalStore> ScheduleService<R, L> {
    pub fn new(remote: R, local: Arc<L>, connected: bool) -> Self {
        Self {
            remote,
            local,
            connected,
        }
    }

    fn source(&self, ctx: &UserContext) -> DataSource {
        selector::select(ctx, self.connected)
    }

    fn load_local(&self, ctx: &UserContext) -> Vec<ScheduleItem> {
        self.local.get_or_default(&keys::schedule(ctx.namespace()))
    }

    fn save_local(&self, ctx: &UserContext, items: &Vec<ScheduleItem>) -> Result<()> {
        self.local
            .set_typed(&keys::schedule(ctx.namespace()), items)
    }

    /// Add a session to the active source. Returns where it landed.
    pub async fn add_session(&self, ctx: &UserContext, draft: SessionDraft) -> Result<SessionKey> {
        let title = draft.title.trim();
        if title.is_empty() || draft.date.is_empty() || draft.time.is_empty() {
            return Err(Error::Validation(
                "title, date, and time are required".into(),
            ));
        }

        let item = ScheduleItem {
            title: title.to_string(),
            date: draft.date,
            time: draft.time,
            notes: draft.notes.trim().to_string(),
            video_url: sanitize_video_url(&draft.video_url),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        match self.source(ctx) {
            DataSource::Shared => {
                let hub_id = ctx.hub_id().ok_or(Error::SharedSourceRequired)?;
                let id = self.remote.add_session(hub_id, &item).await?;
                tracing::debug!(hub_id, session_id = %id, "Session added (shared)");
                Ok(SessionKey::Shared(id))
            }
            DataSource::Local => {
                let mut items = self.load_local(ctx);
                items.push(item);
                let idx = items.len() - 1;
                self.save_local(ctx, &items)?;
                tracing::debug!(namespace = ctx.namespace(), idx, "Session added (local)");
                Ok(SessionKey::Local(idx))
            }
        }
    }

    /// Delete one session. Local keys are bounds-checked no-ops when stale;
    /// a key from the wrong source is rejected.
    pub async fn delete_session(&self, ctx: &UserContext, key: &SessionKey) -> Result<()> {
        match (self.source(ctx), key) {
            (DataSource::Shared, SessionKey::Shared(id)) => {
                let hub_id = ctx.hub_id().ok_or(Error::SharedSourceRequired)?;
                self.remote.delete_session(hub_id, id).await
            }
            (DataSource::Local, SessionKey::Local(idx)) => {
                let mut items = self.load_local(ctx);
                if *idx >= items.len() {
                    return Ok(());
                }
                items.remove(*idx);
                self.save_local(ctx, &items)
            }
            _ => Err(Error::Validation(
                "session key does not match the active data source".into(),
            )),
        }
    }

    /// Delete every session in the active source.
    pub async fn clear_sessions(&self, ctx: &UserContext) -> Result<()> {
        match self.source(ctx) {
            DataSource::Shared => {
                let hub_id = ctx.hub_id().ok_or(Error::SharedSourceRequired)?;
                let count = self.remote.clear_sessions(hub_id).await?;
                tracing::debug!(hub_id, count, "Sessions cleared (shared)");
                Ok(())
            }
            DataSource::Local => self.save_local(ctx, &Vec::new()),
        }
    }

    /// Current sessions from the active source. Shared results come ordered
    /// by date-time ascending; local results keep insertion order.
    pub async fn list_sessions(&self, ctx: &UserContext) -> Result<Vec<SessionEntry>> {
        match self.source(ctx) {
            DataSource::Shared => {
                let hub_id = ctx.hub_id().ok_or(Error::SharedSourceRequired)?;
                Ok(self
                    .remote
                    .list_sessions(hub_id)
                    .await?
                    .into_iter()
                    .map(|(id, item)| SessionEntry {
                        key: SessionKey::Shared(id),
                        item,
                    })
                    .collect())
            }
            DataSource::Local => Ok(local_sessions(self.local.as_ref(), ctx)),
        }
    }
}
