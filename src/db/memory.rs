// SPDX-License-Identifier: MIT

//! In-memory hub store double.
//!
//! Push-based: every mutation signals open watches, which then deliver a
//! fresh full snapshot. Used by tests and by offline development where no
//! Firestore project is configured.

use crate::db::remote::{
    HubDoc, HubStore, LiveSnapshot, SessionsSnapshot, SnapshotEvent, Watch, WatchGuard,
};
use crate::db::generate_doc_id;
use crate::error::{Error, Result};
use crate::models::{LiveSession, ScheduleItem};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc};

#[derive(Default)]
struct Inner {
    hubs: DashMap<String, HubDoc>,
    /// Per-hub sessions in insertion order; snapshots sort by date-time.
    sessions: DashMap<String, Vec<(String, ScheduleItem)>>,
    live: DashMap<String, Vec<(String, LiveSession)>>,
    /// Per-hub change signal for open watches.
    signals: DashMap<String, broadcast::Sender<()>>,
    /// Currently running watch tasks (observable from tests).
    watchers: AtomicUsize,
    /// When set, new watches fail immediately with this message.
    watch_error: Mutex<Option<String>>,
}

impl Inner {
    fn notify(&self, hub_id: &str) {
        if let Some(tx) = self.signals.get(hub_id) {
            let _ = tx.send(());
        }
    }

    fn signal(&self, hub_id: &str) -> broadcast::Receiver<()> {
        self.signals
            .entry(hub_id.to_string())
            .or_insert_with(|| broadcast::channel(32).0)
            .subscribe()
    }

    fn sessions_snapshot(&self, hub_id: &str) -> SessionsSnapshot {
        let mut items: SessionsSnapshot = self
            .sessions
            .get(hub_id)
            .map(|v| v.clone())
            .unwrap_or_default();
        items.sort_by(|a, b| a.1.date_time().cmp(&b.1.date_time()));
        items
    }

    fn live_snapshot(&self, hub_id: &str) -> LiveSnapshot {
        self.live
            .get(hub_id)
            .map(|v| {
                v.iter()
                    .filter(|(_, l)| l.active)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    }
}

/// Counts a running watch task; decremented when the task is dropped,
/// including on abort.
struct WatcherToken(Arc<Inner>);

impl WatcherToken {
    fn new(inner: Arc<Inner>) -> Self {
        inner.watchers.fetch_add(1, Ordering::SeqCst);
        Self(inner)
    }
}

impl Drop for WatcherToken {
    fn drop(&mut self) {
        self.0.watchers.fetch_sub(1, Ordering::SeqCst);
    }
}

/// In-memory [`HubStore`] implementation.
#[derive(Clone, Default)]
pub struct MemoryHubStore {
    inner: Arc<Inner>,
}

impl MemoryHubStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of watch tasks currently running across all feeds.
    pub fn active_watch_count(&self) -> usize {
        self.inner.watchers.load(Ordering::SeqCst)
    }

    /// Make every subsequently opened watch fail immediately with `message`.
    /// Used to exercise the no-retry error policy.
    pub fn fail_watches(&self, message: &str) {
        if let Ok(mut slot) = self.inner.watch_error.lock() {
            *slot = Some(message.to_string());
        }
    }

    fn watch_with<T, F>(&self, hub_id: &str, snapshot: F) -> Watch<T>
    where
        T: Send + 'static,
        F: Fn(&Inner, &str) -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let forced_error = self
            .inner
            .watch_error
            .lock()
            .ok()
            .and_then(|slot| slot.clone());
        let mut signal = self.inner.signal(hub_id);
        let inner = self.inner.clone();
        let hub = hub_id.to_string();

        let handle = tokio::spawn(async move {
            let _token = WatcherToken::new(inner.clone());

            if let Some(msg) = forced_error {
                let _ = tx.send(SnapshotEvent::Error(msg)).await;
                return;
            }

            if tx
                .send(SnapshotEvent::Snapshot(snapshot(&inner, &hub)))
                .await
                .is_err()
            {
                return;
            }
            loop {
                match signal.recv().await {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        if tx
                            .send(SnapshotEvent::Snapshot(snapshot(&inner, &hub)))
                            .await
                            .is_err()
                        {
                            return;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => return,
                }
            }
        });

        Watch {
            guard: WatchGuard::new(handle),
            rx,
        }
    }
}

impl HubStore for MemoryHubStore {
    async fn create_hub(&self, name: &str, creator: &str) -> Result<String> {
        let id = generate_doc_id();
        self.inner.hubs.insert(
            id.clone(),
            HubDoc {
                name: name.to_string(),
                members: vec![creator.to_string()],
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        Ok(id)
    }

    async fn get_hub(&self, hub_id: &str) -> Result<Option<HubDoc>> {
        Ok(self.inner.hubs.get(hub_id).map(|h| h.clone()))
    }

    async fn join_hub(&self, hub_id: &str, member: &str) -> Result<()> {
        let mut hub = self
            .inner
            .hubs
            .get_mut(hub_id)
            .ok_or_else(|| Error::HubNotFound(hub_id.to_string()))?;
        if !hub.members.iter().any(|m| m == member) {
            hub.members.push(member.to_string());
        }
        Ok(())
    }

    async fn add_session(&self, hub_id: &str, item: &ScheduleItem) -> Result<String> {
        let id = generate_doc_id();
        self.inner
            .sessions
            .entry(hub_id.to_string())
            .or_default()
            .push((id.clone(), item.clone()));
        self.inner.notify(hub_id);
        Ok(id)
    }

    async fn get_session(&self, hub_id: &str, id: &str) -> Result<Option<ScheduleItem>> {
        Ok(self.inner.sessions.get(hub_id).and_then(|v| {
            v.iter()
                .find(|(sid, _)| sid == id)
                .map(|(_, item)| item.clone())
        }))
    }

    async fn delete_session(&self, hub_id: &str, id: &str) -> Result<()> {
        if let Some(mut v) = self.inner.sessions.get_mut(hub_id) {
            v.retain(|(sid, _)| sid != id);
        }
        self.inner.notify(hub_id);
        Ok(())
    }

    async fn clear_sessions(&self, hub_id: &str) -> Result<usize> {
        let removed = self
            .inner
            .sessions
            .get_mut(hub_id)
            .map(|mut v| {
                let n = v.len();
                v.clear();
                n
            })
            .unwrap_or(0);
        self.inner.notify(hub_id);
        Ok(removed)
    }

    async fn list_sessions(&self, hub_id: &str) -> Result<SessionsSnapshot> {
        Ok(self.inner.sessions_snapshot(hub_id))
    }

    async fn add_live(&self, hub_id: &str, live: &LiveSession) -> Result<String> {
        let id = generate_doc_id();
        self.inner
            .live
            .entry(hub_id.to_string())
            .or_default()
            .push((id.clone(), live.clone()));
        self.inner.notify(hub_id);
        Ok(id)
    }

    async fn get_live(&self, hub_id: &str, id: &str) -> Result<Option<LiveSession>> {
        Ok(self.inner.live.get(hub_id).and_then(|v| {
            v.iter()
                .find(|(lid, _)| lid == id)
                .map(|(_, live)| live.clone())
        }))
    }

    async fn set_live_participant(
        &self,
        hub_id: &str,
        id: &str,
        identity: &str,
        display_name: &str,
    ) -> Result<()> {
        let mut lives = self
            .inner
            .live
            .get_mut(hub_id)
            .ok_or_else(|| Error::NotFound(format!("live session {id}")))?;
        let live = lives
            .iter_mut()
            .find(|(lid, _)| lid == id)
            .map(|(_, l)| l)
            .ok_or_else(|| Error::NotFound(format!("live session {id}")))?;
        live.participants
            .insert(identity.to_string(), display_name.to_string());
        drop(lives);
        self.inner.notify(hub_id);
        Ok(())
    }

    async fn end_live(&self, hub_id: &str, id: &str, ended_at: &str) -> Result<()> {
        let mut lives = self
            .inner
            .live
            .get_mut(hub_id)
            .ok_or_else(|| Error::NotFound(format!("live session {id}")))?;
        let live = lives
            .iter_mut()
            .find(|(lid, _)| lid == id)
            .map(|(_, l)| l)
            .ok_or_else(|| Error::NotFound(format!("live session {id}")))?;
        live.active = false;
        live.ended_at = Some(ended_at.to_string());
        drop(lives);
        self.inner.notify(hub_id);
        Ok(())
    }

    async fn list_active_live(&self, hub_id: &str) -> Result<LiveSnapshot> {
        Ok(self.inner.live_snapshot(hub_id))
    }

    fn watch_sessions(&self, hub_id: &str) -> Watch<SessionsSnapshot> {
        self.watch_with(hub_id, |inner, hub| inner.sessions_snapshot(hub))
    }

    fn watch_live(&self, hub_id: &str) -> Watch<LiveSnapshot> {
        self.watch_with(hub_id, |inner, hub| inner.live_snapshot(hub))
    }
}
