// SPDX-License-Identifier: MIT

//! Live study session operations. These exist only within a shared hub:
//! without an identity, a hub, and connectivity they fail with
//! `SharedSourceRequired`.

use crate::db::HubStore;
use crate::error::{Error, Result};
use crate::models::{LiveSession, UserContext};
use crate::services::selector;
use std::collections::HashMap;

/// Live session operations against the shared hub store.
pub struct LiveService<R: HubStore> {
    remote: R,
    connected: bool,
}

impl<R: HubStore> LiveService<R> {
    pub fn new(remote: R, connected: bool) -> Self {
        Self { remote, connected }
    }

    /// Identity and hub id, or `SharedSourceRequired`.
    fn shared_scope<'a>(&self, ctx: &'a UserContext) -> Result<(&'a str, &'a str)> {
        if !selector::using_shared_source(ctx, self.connected) {
            return Err(Error::SharedSourceRequired);
        }
        // using_shared_source guarantees both are present.
        match (ctx.identity(), ctx.hub_id()) {
            (Some(identity), Some(hub_id)) => Ok((identity, hub_id)),
            _ => Err(Error::SharedSourceRequired),
        }
    }

    /// Start a live session from an existing shared schedule session. The
    /// caller becomes the host and first participant. Returns the live
    /// session id.
    pub async fn start_live(&self, ctx: &UserContext, session_id: &str) -> Result<String> {
        let (identity, hub_id) = self.shared_scope(ctx)?;

        let session = self
            .remote
            .get_session(hub_id, session_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("session {session_id}")))?;

        let title = if session.title.is_empty() {
            "Study Session".to_string()
        } else {
            session.title.clone()
        };

        let mut participants = HashMap::new();
        participants.insert(identity.to_string(), identity.to_string());

        let live = LiveSession {
            active: true,
            title,
            host: identity.to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
            ended_at: None,
            video_url: session.video_url.clone(),
            participants,
        };

        self.remote.add_live(hub_id, &live).await
    }

    /// Join an active live session as a participant.
    pub async fn join_live(&self, ctx: &UserContext, live_id: &str) -> Result<()> {
        let (identity, hub_id) = self.shared_scope(ctx)?;
        self.remote
            .set_live_participant(hub_id, live_id, identity, identity)
            .await
    }

    /// End a live session. Host-only: anyone else gets `NotHost` and the
    /// session stays active.
    pub async fn end_live(&self, ctx: &UserContext, live_id: &str) -> Result<()> {
        let (identity, hub_id) = self.shared_scope(ctx)?;

        let live = self
            .remote
            .get_live(hub_id, live_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("live session {live_id}")))?;

        if live.host != identity {
            return Err(Error::NotHost);
        }

        self.remote
            .end_live(hub_id, live_id, &chrono::Utc::now().to_rfc3339())
            .await?;
        tracing::info!(hub_id, live_id, "Live session ended");
        Ok(())
    }
}
