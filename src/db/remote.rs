// SPDX-License-Identifier: MIT

//! Shared hub store abstraction.
//!
//! The remote realtime document store is an external collaborator; this trait
//! is the seam. Two implementations exist: a Firestore adapter
//! ([`crate::db::FirestoreHubStore`]) and an in-memory push-based double
//! ([`crate::db::MemoryHubStore`]) used by tests and offline development.

use crate::error::Result;
use crate::models::{LiveSession, ScheduleItem};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A hub document: a shared group that members route their schedule and live
/// sessions through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubDoc {
    pub name: String,
    /// Identities of everyone who has joined.
    pub members: Vec<String>,
    pub created_at: String,
}

/// One delivery on a watch channel: a full result-set snapshot, or a
/// terminal error. Snapshots are authoritative and complete, never diffs.
#[derive(Debug)]
pub enum SnapshotEvent<T> {
    Snapshot(T),
    /// The subscription failed and will deliver nothing further until
    /// restarted. No automatic retry.
    Error(String),
}

/// Handle for an open watch. Dropping (or cancelling) it stops deliveries.
#[derive(Debug)]
pub struct WatchGuard {
    handle: JoinHandle<()>,
}

impl WatchGuard {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    /// Stop the watch. Idempotent; dropping the guard has the same effect.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// An open watch on a remote collection.
pub struct Watch<T> {
    pub guard: WatchGuard,
    pub rx: mpsc::Receiver<SnapshotEvent<T>>,
}

/// Snapshot of a hub's schedule: (document id, item) ordered by date-time
/// ascending.
pub type SessionsSnapshot = Vec<(String, ScheduleItem)>;

/// Snapshot of a hub's active live sessions: (document id, session).
pub type LiveSnapshot = Vec<(String, LiveSession)>;

/// Operations on the shared hub collections.
///
/// Writes are last-write-wins; there is no client-side queuing or retry. All
/// session/live documents are scoped by an explicit hub id.
#[allow(async_fn_in_trait)]
pub trait HubStore: Clone + Send + Sync + 'static {
    // ─── Hubs ────────────────────────────────────────────────────

    /// Create a hub and return its generated id. The creator becomes the
    /// first member.
    async fn create_hub(&self, name: &str, creator: &str) -> Result<String>;

    async fn get_hub(&self, hub_id: &str) -> Result<Option<HubDoc>>;

    /// Add a member to an existing hub. Fails with `HubNotFound` if the hub
    /// does not exist.
    async fn join_hub(&self, hub_id: &str, member: &str) -> Result<()>;

    // ─── Schedule sessions ───────────────────────────────────────

    /// Add a session and return its document id.
    async fn add_session(&self, hub_id: &str, item: &ScheduleItem) -> Result<String>;

    async fn get_session(&self, hub_id: &str, id: &str) -> Result<Option<ScheduleItem>>;

    async fn delete_session(&self, hub_id: &str, id: &str) -> Result<()>;

    /// Delete every session in the hub; returns how many were removed.
    async fn clear_sessions(&self, hub_id: &str) -> Result<usize>;

    /// All sessions ordered by date-time ascending.
    async fn list_sessions(&self, hub_id: &str) -> Result<SessionsSnapshot>;

    // ─── Live sessions ───────────────────────────────────────────

    /// Create a live session document and return its id.
    async fn add_live(&self, hub_id: &str, live: &LiveSession) -> Result<String>;

    async fn get_live(&self, hub_id: &str, id: &str) -> Result<Option<LiveSession>>;

    /// Add or update one participant entry on a live session.
    async fn set_live_participant(
        &self,
        hub_id: &str,
        id: &str,
        identity: &str,
        display_name: &str,
    ) -> Result<()>;

    /// Mark a live session inactive and stamp its end time.
    async fn end_live(&self, hub_id: &str, id: &str, ended_at: &str) -> Result<()>;

    /// Live sessions with `active == true` only.
    async fn list_active_live(&self, hub_id: &str) -> Result<LiveSnapshot>;

    // ─── Watches ─────────────────────────────────────────────────

    /// Watch the hub's schedule. Delivers a full snapshot immediately and
    /// again on every observed change.
    fn watch_sessions(&self, hub_id: &str) -> Watch<SessionsSnapshot>;

    /// Watch the hub's active live sessions.
    fn watch_live(&self, hub_id: &str) -> Watch<LiveSnapshot>;
}
