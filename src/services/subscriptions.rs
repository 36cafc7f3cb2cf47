// SPDX-License-Identifier: MIT

//! Subscription manager: at most one live subscription per logical feed.
//!
//! Starting a feed always tears down any prior subscription first, so a
//! source switch (identity change, hub join/create/leave) can never leave a
//! stale listener delivering into the UI. A local source delivers the
//! current snapshot once, synchronously; a shared source keeps delivering
//! full snapshots until stopped or until the remote reports an error.

use crate::db::{HubStore, LocalStore, SnapshotEvent, Watch, WatchGuard};
use crate::models::{LiveSession, SessionEntry, SessionKey, UserContext};
use crate::services::schedule::local_sessions;
use crate::services::selector;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Logical feeds the UI renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Schedule,
    Live,
}

/// One active live session in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveEntry {
    pub id: String,
    pub session: LiveSession,
}

struct ActiveSubscription {
    _guard: WatchGuard,
    forwarder: JoinHandle<()>,
}

impl Drop for ActiveSubscription {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}

/// Per-feed subscription registry.
pub struct SubscriptionManager<R: HubStore, L: LocalStore> {
    remote: R,
    local: Arc<L>,
    connected: bool,
    active: DashMap<Feed, ActiveSubscription>,
}

impl<R: HubStore, L: LocalStore> SubscriptionManager<R, L> {
    pub fn new(remote: R, local: Arc<L>, connected: bool) -> Self {
        Self {
            remote,
            local,
            connected,
            active: DashMap::new(),
        }
    }

    /// Whether a feed currently has a remote subscription open.
    pub fn is_subscribed(&self, feed: Feed) -> bool {
        self.active.contains_key(&feed)
    }

    /// Start (or restart) the schedule feed for a context.
    ///
    /// Every delivery to `render` is the full, authoritative result set.
    /// Remote failures go to `status` once and stop the feed; restarting is
    /// the caller's decision (e.g. on the next hub change).
    pub fn start_schedule(
        &self,
        ctx: &UserContext,
        render: impl Fn(Vec<SessionEntry>) + Send + Sync + 'static,
        status: impl Fn(String) + Send + Sync + 'static,
    ) {
        self.stop(Feed::Schedule);

        if !selector::using_shared_source(ctx, self.connected) {
            render(local_sessions(self.local.as_ref(), ctx));
            return;
        }
        let Some(hub_id) = ctx.hub_id() else {
            return;
        };

        let Watch { guard, mut rx } = self.remote.watch_sessions(hub_id);
        let forwarder = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    SnapshotEvent::Snapshot(items) => {
                        let entries = items
                            .into_iter()
                            .map(|(id, item)| SessionEntry {
                                key: SessionKey::Shared(id),
                                item,
                            })
                            .collect();
                        render(entries);
                    }
                    SnapshotEvent::Error(msg) => {
                        tracing::warn!(error = %msg, "Schedule subscription failed");
                        status(msg);
                        return;
                    }
                }
            }
        });

        self.active.insert(
            Feed::Schedule,
            ActiveSubscription {
                _guard: guard,
                forwarder,
            },
        );
    }

    /// Start (or restart) the live-sessions feed for a context.
    ///
    /// Live sessions have no local equivalent: without a shared source the
    /// feed delivers one empty snapshot and stays unsubscribed.
    pub fn start_live(
        &self,
        ctx: &UserContext,
        render: impl Fn(Vec<LiveEntry>) + Send + Sync + 'static,
        status: impl Fn(String) + Send + Sync + 'static,
    ) {
        self.stop(Feed::Live);

        if !selector::using_shared_source(ctx, self.connected) {
            render(Vec::new());
            return;
        }
        let Some(hub_id) = ctx.hub_id() else {
            return;
        };

        let Watch { guard, mut rx } = self.remote.watch_live(hub_id);
        let forwarder = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    SnapshotEvent::Snapshot(items) => {
                        let entries = items
                            .into_iter()
                            .map(|(id, session)| LiveEntry { id, session })
                            .collect();
                        render(entries);
                    }
                    SnapshotEvent::Error(msg) => {
                        tracing::warn!(error = %msg, "Live subscription failed");
                        status(msg);
                        return;
                    }
                }
            }
        });

        self.active.insert(
            Feed::Live,
            ActiveSubscription {
                _guard: guard,
                forwarder,
            },
        );
    }

    /// Tear down one feed's subscription. Safe to call when already stopped.
    pub fn stop(&self, feed: Feed) {
        if self.active.remove(&feed).is_some() {
            tracing::debug!(?feed, "Subscription stopped");
        }
    }

    /// Tear down everything (e.g. on sign-out).
    pub fn stop_all(&self) {
        self.stop(Feed::Schedule);
        self.stop(Feed::Live);
    }
}
