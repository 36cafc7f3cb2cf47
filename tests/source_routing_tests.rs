// SPDX-License-Identifier: MIT

//! Data-source routing tests.
//!
//! These tests verify that:
//! 1. Schedule operations route to local storage unless identity, hub, and
//!    connectivity are all present
//! 2. Shared results are ordered by date-time, local results by insertion
//! 3. Keys from the wrong source are rejected
//! 4. Live operations exist only on the shared source

use study_hub::db::HubStore;
use study_hub::models::{SessionKey, UserContext};
use study_hub::services::{LiveService, ScheduleService};
use study_hub::Error;

mod common;
use common::{draft, hub_store, in_hub, local_store, signed_in};

#[tokio::test]
async fn test_guest_routes_to_local() {
    let hub = hub_store();
    let service = ScheduleService::new(hub.clone(), local_store(), true);
    let ctx = UserContext::guest();

    let key = service
        .add_session(&ctx, draft("Solo review", "2026-03-10", "15:00"))
        .await
        .unwrap();
    assert_eq!(key, SessionKey::Local(0));

    let sessions = service.list_sessions(&ctx).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].item.title, "Solo review");
}

#[tokio::test]
async fn test_signed_in_without_hub_routes_to_local() {
    let hub = hub_store();
    let service = ScheduleService::new(hub, local_store(), true);
    let ctx = signed_in("alice");

    let key = service
        .add_session(&ctx, draft("Notes", "2026-03-10", "15:00"))
        .await
        .unwrap();
    assert!(matches!(key, SessionKey::Local(0)));
}

#[tokio::test]
async fn test_disconnected_member_routes_to_local() {
    let hub = hub_store();
    let hub_id = hub.create_hub("Learning Hub", "alice").await.unwrap();
    let service = ScheduleService::new(hub.clone(), local_store(), false);
    let ctx = in_hub("alice", &hub_id);

    let key = service
        .add_session(&ctx, draft("Offline", "2026-03-10", "15:00"))
        .await
        .unwrap();
    assert!(matches!(key, SessionKey::Local(0)));
    assert!(hub.list_sessions(&hub_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_hub_member_routes_to_shared_ordered_by_date_time() {
    let hub = hub_store();
    let hub_id = hub.create_hub("Learning Hub", "alice").await.unwrap();
    let local = local_store();
    let service = ScheduleService::new(hub.clone(), local.clone(), true);
    let ctx = in_hub("alice", &hub_id);

    // Inserted latest-first; listing must come back date-time ascending.
    let key = service
        .add_session(&ctx, draft("Later", "2026-03-12", "18:00"))
        .await
        .unwrap();
    assert!(matches!(key, SessionKey::Shared(_)));
    service
        .add_session(&ctx, draft("Earlier", "2026-03-12", "09:00"))
        .await
        .unwrap();
    service
        .add_session(&ctx, draft("Earliest", "2026-03-11", "23:00"))
        .await
        .unwrap();

    let sessions = service.list_sessions(&ctx).await.unwrap();
    let titles: Vec<&str> = sessions.iter().map(|s| s.item.title.as_str()).collect();
    assert_eq!(titles, ["Earliest", "Earlier", "Later"]);

    // Nothing leaked into the local store.
    let guest_view = study_hub::services::schedule::local_sessions(local.as_ref(), &ctx);
    assert!(guest_view.is_empty());
}

#[tokio::test]
async fn test_local_sessions_keep_insertion_order() {
    let service = ScheduleService::new(hub_store(), local_store(), false);
    let ctx = UserContext::guest();

    service
        .add_session(&ctx, draft("B", "2026-03-12", "18:00"))
        .await
        .unwrap();
    service
        .add_session(&ctx, draft("A", "2026-03-11", "09:00"))
        .await
        .unwrap();

    let sessions = service.list_sessions(&ctx).await.unwrap();
    let titles: Vec<&str> = sessions.iter().map(|s| s.item.title.as_str()).collect();
    assert_eq!(titles, ["B", "A"]);
    assert_eq!(sessions[1].key, SessionKey::Local(1));
}

#[tokio::test]
async fn test_add_session_requires_title_date_time() {
    let service = ScheduleService::new(hub_store(), local_store(), false);
    let ctx = UserContext::guest();

    let missing_title = service
        .add_session(&ctx, draft("   ", "2026-03-10", "15:00"))
        .await;
    assert!(matches!(missing_title, Err(Error::Validation(_))));

    let missing_date = service.add_session(&ctx, draft("Review", "", "15:00")).await;
    assert!(matches!(missing_date, Err(Error::Validation(_))));

    assert!(service.list_sessions(&ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_video_url_sanitized_on_add() {
    let service = ScheduleService::new(hub_store(), local_store(), false);
    let ctx = UserContext::guest();

    let mut d = draft("With link", "2026-03-10", "15:00");
    d.video_url = "javascript:alert(1)".to_string();
    service.add_session(&ctx, d).await.unwrap();

    let mut d = draft("Https link", "2026-03-10", "16:00");
    d.video_url = "https://meet.example.com/room".to_string();
    service.add_session(&ctx, d).await.unwrap();

    let sessions = service.list_sessions(&ctx).await.unwrap();
    assert_eq!(sessions[0].item.video_url, "");
    assert_eq!(sessions[1].item.video_url, "https://meet.example.com/room");
}

#[tokio::test]
async fn test_delete_rejects_key_from_wrong_source() {
    let hub = hub_store();
    let hub_id = hub.create_hub("Learning Hub", "alice").await.unwrap();
    let service = ScheduleService::new(hub, local_store(), true);
    let ctx = in_hub("alice", &hub_id);

    let result = service.delete_session(&ctx, &SessionKey::Local(0)).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_local_delete_out_of_bounds_is_noop() {
    let service = ScheduleService::new(hub_store(), local_store(), false);
    let ctx = UserContext::guest();

    service
        .add_session(&ctx, draft("Keep me", "2026-03-10", "15:00"))
        .await
        .unwrap();
    service
        .delete_session(&ctx, &SessionKey::Local(5))
        .await
        .unwrap();

    assert_eq!(service.list_sessions(&ctx).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_clear_sessions_per_source() {
    let hub = hub_store();
    let hub_id = hub.create_hub("Learning Hub", "alice").await.unwrap();
    let local = local_store();
    let shared = ScheduleService::new(hub.clone(), local.clone(), true);
    let ctx = in_hub("alice", &hub_id);

    shared
        .add_session(&ctx, draft("Shared", "2026-03-10", "15:00"))
        .await
        .unwrap();

    // Same identity, offline: writes land locally.
    let offline = ScheduleService::new(hub.clone(), local.clone(), false);
    offline
        .add_session(&ctx, draft("Local", "2026-03-10", "16:00"))
        .await
        .unwrap();

    shared.clear_sessions(&ctx).await.unwrap();
    assert!(shared.list_sessions(&ctx).await.unwrap().is_empty());
    // The local copy survives a shared clear.
    assert_eq!(offline.list_sessions(&ctx).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_live_operations_require_shared_source() {
    let hub = hub_store();
    let live = LiveService::new(hub.clone(), true);

    let guest = UserContext::guest();
    assert!(matches!(
        live.start_live(&guest, "some-session").await,
        Err(Error::SharedSourceRequired)
    ));

    let no_hub = signed_in("alice");
    assert!(matches!(
        live.join_live(&no_hub, "some-live").await,
        Err(Error::SharedSourceRequired)
    ));

    let hub_id = hub.create_hub("Learning Hub", "alice").await.unwrap();
    let offline = LiveService::new(hub, false);
    assert!(matches!(
        offline.end_live(&in_hub("alice", &hub_id), "some-live").await,
        Err(Error::SharedSourceRequired)
    ));
}
