// SPDX-License-Identifier: MIT

use study_hub::db::{FirestoreHubStore, MemoryHubStore, MemoryLocalStore};
use study_hub::models::{SessionDraft, UserContext};
use std::sync::Arc;
use std::time::Duration;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Connect to the Firestore emulator with a short poll interval so watch
/// tests converge quickly.
#[allow(dead_code)]
pub async fn emulator_hub() -> FirestoreHubStore {
    FirestoreHubStore::connect_emulator("test-project", Duration::from_millis(200))
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Fresh in-memory local store.
#[allow(dead_code)]
pub fn local_store() -> Arc<MemoryLocalStore> {
    Arc::new(MemoryLocalStore::new())
}

/// Fresh in-memory hub store.
#[allow(dead_code)]
pub fn hub_store() -> MemoryHubStore {
    MemoryHubStore::new()
}

/// A signed-in context without a hub.
#[allow(dead_code)]
pub fn signed_in(identity: &str) -> UserContext {
    UserContext::for_identity(identity)
}

/// A signed-in context with a hub already selected.
#[allow(dead_code)]
pub fn in_hub(identity: &str, hub_id: &str) -> UserContext {
    UserContext::for_identity(identity).with_hub(hub_id)
}

/// A valid session draft for a given title and date-time.
#[allow(dead_code)]
pub fn draft(title: &str, date: &str, time: &str) -> SessionDraft {
    SessionDraft {
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        notes: String::new(),
        video_url: String::new(),
    }
}
