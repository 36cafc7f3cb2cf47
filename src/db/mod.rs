// SPDX-License-Identifier: MIT

//! Storage layer: local keyed JSON store and the shared hub store.

pub mod firestore;
pub mod local;
pub mod memory;
pub mod remote;

pub use firestore::FirestoreHubStore;
pub use local::{JsonFileStore, LocalStore, MemoryLocalStore};
pub use memory::MemoryHubStore;
pub use remote::{HubDoc, HubStore, SnapshotEvent, Watch, WatchGuard};

/// Collection names as constants.
pub mod collections {
    pub const HUBS: &str = "hubs";
    /// Shared schedule sessions, filtered by `hub_id`.
    pub const HUB_SESSIONS: &str = "hub_sessions";
    /// Live study sessions, filtered by `hub_id`.
    pub const HUB_LIVE_SESSIONS: &str = "hub_live_sessions";
}

/// Local storage key builders, namespaced per identity.
pub mod keys {
    pub fn grades(namespace: &str) -> String {
        format!("grades:{namespace}")
    }

    pub fn schedule(namespace: &str) -> String {
        format!("schedule:{namespace}")
    }

    pub fn tasks(namespace: &str) -> String {
        format!("tasks:{namespace}")
    }

    pub fn streak(namespace: &str) -> String {
        format!("streak:{namespace}")
    }

    pub fn study(namespace: &str) -> String {
        format!("study:{namespace}")
    }

    pub fn resources(namespace: &str) -> String {
        format!("resources:{namespace}")
    }

    pub fn hub(namespace: &str) -> String {
        format!("hub:{namespace}")
    }
}

/// Generate a unique document id (timestamp plus process-local counter).
pub(crate) fn generate_doc_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    format!("{:x}-{:x}", nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}
