// SPDX-License-Identifier: MIT

//! Firestore adapter for the shared hub store.
//!
//! Hubs live in a `hubs` collection keyed by hub id; schedule and live
//! sessions live in flat collections filtered by a `hub_id` field. Watches
//! are snapshot polls: the watched query is re-run on an interval and a
//! delivery happens whenever the result set changed.

use crate::db::collections;
use crate::db::generate_doc_id;
use crate::db::remote::{
    HubDoc, HubStore, LiveSnapshot, SessionsSnapshot, SnapshotEvent, Watch, WatchGuard,
};
use crate::error::{Error, Result};
use crate::models::{LiveSession, ScheduleItem};
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Stored form of a schedule session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionDoc {
    /// Also the document id.
    session_id: String,
    hub_id: String,
    title: String,
    date: String,
    time: String,
    notes: String,
    video_url: String,
    /// Sortable "YYYY-MM-DDTHH:MM:00"; queries order by this ascending.
    date_time: String,
    created_at: String,
}

impl SessionDoc {
    fn new(session_id: String, hub_id: &str, item: &ScheduleItem) -> Self {
        Self {
            session_id,
            hub_id: hub_id.to_string(),
            title: item.title.clone(),
            date: item.date.clone(),
            time: item.time.clone(),
            notes: item.notes.clone(),
            video_url: item.video_url.clone(),
            date_time: item.date_time(),
            created_at: item.created_at.clone(),
        }
    }

    fn into_pair(self) -> (String, ScheduleItem) {
        (
            self.session_id,
            ScheduleItem {
                title: self.title,
                date: self.date,
                time: self.time,
                notes: self.notes,
                video_url: self.video_url,
                created_at: self.created_at,
            },
        )
    }
}

/// Stored form of a live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveDoc {
    /// Also the document id.
    live_id: String,
    hub_id: String,
    active: bool,
    title: String,
    host: String,
    started_at: String,
    #[serde(default)]
    ended_at: Option<String>,
    #[serde(default)]
    video_url: String,
    #[serde(default)]
    participants: HashMap<String, String>,
}

impl LiveDoc {
    fn new(live_id: String, hub_id: &str, live: &LiveSession) -> Self {
        Self {
            live_id,
            hub_id: hub_id.to_string(),
            active: live.active,
            title: live.title.clone(),
            host: live.host.clone(),
            started_at: live.started_at.clone(),
            ended_at: live.ended_at.clone(),
            video_url: live.video_url.clone(),
            participants: live.participants.clone(),
        }
    }

    fn into_pair(self) -> (String, LiveSession) {
        (
            self.live_id,
            LiveSession {
                active: self.active,
                title: self.title,
                host: self.host,
                started_at: self.started_at,
                ended_at: self.ended_at,
                video_url: self.video_url,
                participants: self.participants,
            },
        )
    }
}

/// Firestore-backed [`HubStore`].
#[derive(Clone)]
pub struct FirestoreHubStore {
    client: firestore::FirestoreDb,
    poll_interval: Duration,
}

impl FirestoreHubStore {
    /// Connect to Firestore.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn connect(project_id: &str, poll_interval: Duration) -> Result<Self> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(project_id, poll_interval).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| Error::Remote(format!("failed to connect to Firestore: {e}")))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client,
            poll_interval,
        })
    }

    /// Connect to the emulator with unauthenticated access.
    pub async fn connect_emulator(project_id: &str, poll_interval: Duration) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without a custom
        // TokenSource implementation.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| Error::Remote(format!("failed to connect to Firestore Emulator: {e}")))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client,
            poll_interval,
        })
    }

    async fn query_sessions(&self, hub_id: &str) -> Result<Vec<SessionDoc>> {
        let hub = hub_id.to_string();
        self.client
            .fluent()
            .select()
            .from(collections::HUB_SESSIONS)
            .filter(move |q| q.for_all([q.field("hubId").eq(hub.clone())]))
            .order_by([(
                "dateTime",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| Error::Remote(e.to_string()))
    }

    async fn query_active_live(&self, hub_id: &str) -> Result<Vec<LiveDoc>> {
        let hub = hub_id.to_string();
        self.client
            .fluent()
            .select()
            .from(collections::HUB_LIVE_SESSIONS)
            .filter(move |q| {
                q.for_all([q.field("hubId").eq(hub.clone()), q.field("active").eq(true)])
            })
            .obj()
            .query()
            .await
            .map_err(|e| Error::Remote(e.to_string()))
    }

    async fn get_live_doc(&self, hub_id: &str, id: &str) -> Result<Option<LiveDoc>> {
        let doc: Option<LiveDoc> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::HUB_LIVE_SESSIONS)
            .obj()
            .one(id)
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;
        Ok(doc.filter(|d| d.hub_id == hub_id))
    }

    async fn put_live_doc(&self, doc: &LiveDoc) -> Result<()> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::HUB_LIVE_SESSIONS)
            .document_id(&doc.live_id)
            .object(doc)
            .execute()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;
        Ok(())
    }

    fn poll_watch<T, Fut, F>(&self, make_query: F) -> Watch<T>
    where
        T: PartialEq + Clone + Send + 'static,
        Fut: std::future::Future<Output = Result<T>> + Send + 'static,
        F: Fn() -> Fut + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let interval = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut last: Option<T> = None;

            loop {
                ticker.tick().await;
                match make_query().await {
                    Ok(snapshot) => {
                        if last.as_ref() != Some(&snapshot) {
                            last = Some(snapshot.clone());
                            if tx.send(SnapshotEvent::Snapshot(snapshot)).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        // No automatic retry: report and stop until restarted.
                        let _ = tx.send(SnapshotEvent::Error(e.to_string())).await;
                        return;
                    }
                }
            }
        });

        Watch {
            guard: WatchGuard::new(handle),
            rx,
        }
    }
}

impl HubStore for FirestoreHubStore {
    async fn create_hub(&self, name: &str, creator: &str) -> Result<String> {
        let id = generate_doc_id();
        let hub = HubDoc {
            name: name.to_string(),
            members: vec![creator.to_string()],
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::HUBS)
            .document_id(&id)
            .object(&hub)
            .execute()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;

        tracing::info!(hub_id = %id, "Hub created");
        Ok(id)
    }

    async fn get_hub(&self, hub_id: &str) -> Result<Option<HubDoc>> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::HUBS)
            .obj()
            .one(hub_id)
            .await
            .map_err(|e| Error::Remote(e.to_string()))
    }

    async fn join_hub(&self, hub_id: &str, member: &str) -> Result<()> {
        let mut hub = self
            .get_hub(hub_id)
            .await?
            .ok_or_else(|| Error::HubNotFound(hub_id.to_string()))?;

        if !hub.members.iter().any(|m| m == member) {
            hub.members.push(member.to_string());
        }

        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::HUBS)
            .document_id(hub_id)
            .object(&hub)
            .execute()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;

        tracing::info!(hub_id, member, "Joined hub");
        Ok(())
    }

    async fn add_session(&self, hub_id: &str, item: &ScheduleItem) -> Result<String> {
        let id = generate_doc_id();
        let doc = SessionDoc::new(id.clone(), hub_id, item);

        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::HUB_SESSIONS)
            .document_id(&id)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;
        Ok(id)
    }

    async fn get_session(&self, hub_id: &str, id: &str) -> Result<Option<ScheduleItem>> {
        let doc: Option<SessionDoc> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::HUB_SESSIONS)
            .obj()
            .one(id)
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;
        Ok(doc
            .filter(|d| d.hub_id == hub_id)
            .map(|d| d.into_pair().1))
    }

    async fn delete_session(&self, hub_id: &str, id: &str) -> Result<()> {
        // Scope check before the blind delete.
        if self.get_session(hub_id, id).await?.is_none() {
            return Ok(());
        }

        self.client
            .fluent()
            .delete()
            .from(collections::HUB_SESSIONS)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;
        Ok(())
    }

    async fn clear_sessions(&self, hub_id: &str) -> Result<usize> {
        let docs = self.query_sessions(hub_id).await?;
        let count = docs.len();
        let client = &self.client;

        let results: Vec<Result<()>> = stream::iter(docs)
            .map(|doc| async move {
                client
                    .fluent()
                    .delete()
                    .from(collections::HUB_SESSIONS)
                    .document_id(&doc.session_id)
                    .execute()
                    .await
                    .map_err(|e| Error::Remote(e.to_string()))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect()
            .await;
        results.into_iter().collect::<Result<Vec<()>>>()?;

        tracing::debug!(hub_id, count, "Cleared hub sessions");
        Ok(count)
    }

    async fn list_sessions(&self, hub_id: &str) -> Result<SessionsSnapshot> {
        Ok(self
            .query_sessions(hub_id)
            .await?
            .into_iter()
            .map(SessionDoc::into_pair)
            .collect())
    }

    async fn add_live(&self, hub_id: &str, live: &LiveSession) -> Result<String> {
        let id = generate_doc_id();
        let doc = LiveDoc::new(id.clone(), hub_id, live);
        self.put_live_doc(&doc).await?;
        tracing::info!(hub_id, live_id = %id, "Live session started");
        Ok(id)
    }

    async fn get_live(&self, hub_id: &str, id: &str) -> Result<Option<LiveSession>> {
        Ok(self
            .get_live_doc(hub_id, id)
            .await?
            .map(|d| d.into_pair().1))
    }

    async fn set_live_participant(
        &self,
        hub_id: &str,
        id: &str,
        identity: &str,
        display_name: &str,
    ) -> Result<()> {
        let mut doc = self
            .get_live_doc(hub_id, id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("live session {id}")))?;
        doc.participants
            .insert(identity.to_string(), display_name.to_string());
        self.put_live_doc(&doc).await
    }

    async fn end_live(&self, hub_id: &str, id: &str, ended_at: &str) -> Result<()> {
        let mut doc = self
            .get_live_doc(hub_id, id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("live session {id}")))?;
        doc.active = false;
        doc.ended_at = Some(ended_at.to_string());
        self.put_live_doc(&doc).await
    }

    async fn list_active_live(&self, hub_id: &str) -> Result<LiveSnapshot> {
        Ok(self
            .query_active_live(hub_id)
            .await?
            .into_iter()
            .map(LiveDoc::into_pair)
            .collect())
    }

    fn watch_sessions(&self, hub_id: &str) -> Watch<SessionsSnapshot> {
        let store = self.clone();
        let hub = hub_id.to_string();
        self.poll_watch(move || {
            let store = store.clone();
            let hub = hub.clone();
            async move { store.list_sessions(&hub).await }
        })
    }

    fn watch_live(&self, hub_id: &str) -> Watch<LiveSnapshot> {
        let store = self.clone();
        let hub = hub_id.to_string();
        self.poll_watch(move || {
            let store = store.clone();
            let hub = hub.clone();
            async move { store.list_active_live(&hub).await }
        })
    }
}
