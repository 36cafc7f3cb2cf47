// SPDX-License-Identifier: MIT

//! Hub membership and live-session ownership tests.
//!
//! These tests verify that:
//! 1. Creating/joining a hub requires identity and updates the selection
//! 2. Joining a nonexistent hub fails without touching the selection
//! 3. Leaving a hub clears the local selection but not remote membership
//! 4. Only the host can end a live session

use study_hub::db::HubStore;
use study_hub::models::UserContext;
use study_hub::services::{HubService, LiveService, ScheduleService};
use study_hub::Error;

mod common;
use common::{draft, hub_store, in_hub, local_store, signed_in};

#[tokio::test]
async fn test_create_hub_selects_it_and_adds_creator() {
    let hub = hub_store();
    let service = HubService::new(hub.clone(), local_store());
    let ctx = signed_in("alice");

    let hub_id = service.create_hub(&ctx).await.unwrap();
    assert_eq!(service.selection(&ctx), Some(hub_id.clone()));
    assert_eq!(service.resolve(&ctx).hub_id(), Some(hub_id.as_str()));

    let doc = hub.get_hub(&hub_id).await.unwrap().unwrap();
    assert_eq!(doc.members, vec!["alice".to_string()]);
}

#[tokio::test]
async fn test_create_hub_requires_identity() {
    let service = HubService::new(hub_store(), local_store());
    let result = service.create_hub(&UserContext::guest()).await;
    assert!(matches!(result, Err(Error::IdentityRequired)));
}

#[tokio::test]
async fn test_join_hub_adds_member_and_selects() {
    let hub = hub_store();
    let local = local_store();
    let hub_id = hub.create_hub("Learning Hub", "alice").await.unwrap();

    let service = HubService::new(hub.clone(), local);
    let bob = signed_in("bob");
    // Codes arrive pasted, often with whitespace.
    service.join_hub(&bob, &format!("  {hub_id}  ")).await.unwrap();

    assert_eq!(service.selection(&bob), Some(hub_id.clone()));
    let doc = hub.get_hub(&hub_id).await.unwrap().unwrap();
    assert!(doc.members.contains(&"bob".to_string()));
}

#[tokio::test]
async fn test_join_unknown_hub_leaves_selection_unchanged() {
    let hub = hub_store();
    let service = HubService::new(hub.clone(), local_store());
    let ctx = signed_in("alice");

    let existing = service.create_hub(&ctx).await.unwrap();

    let result = service.join_hub(&ctx, "no-such-hub").await;
    assert!(matches!(result, Err(Error::HubNotFound(_))));
    assert_eq!(service.selection(&ctx), Some(existing));
}

#[tokio::test]
async fn test_join_hub_rejects_empty_code() {
    let service = HubService::new(hub_store(), local_store());
    let result = service.join_hub(&signed_in("alice"), "   ").await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_leave_hub_clears_selection_but_not_membership() {
    let hub = hub_store();
    let service = HubService::new(hub.clone(), local_store());
    let ctx = signed_in("alice");

    let hub_id = service.create_hub(&ctx).await.unwrap();
    service.leave_hub(&ctx).unwrap();

    assert_eq!(service.selection(&ctx), None);
    assert!(service.resolve(&ctx).hub_id().is_none());

    let doc = hub.get_hub(&hub_id).await.unwrap().unwrap();
    assert!(doc.members.contains(&"alice".to_string()));
}

#[tokio::test]
async fn test_selection_is_per_identity() {
    let hub = hub_store();
    let local = local_store();
    let service = HubService::new(hub, local);

    let alice = signed_in("alice");
    let hub_id = service.create_hub(&alice).await.unwrap();

    assert_eq!(service.selection(&alice), Some(hub_id));
    assert_eq!(service.selection(&signed_in("bob")), None);
    assert_eq!(service.selection(&UserContext::guest()), None);
}

#[tokio::test]
async fn test_live_session_lifecycle() {
    let hub = hub_store();
    let hub_id = hub.create_hub("Learning Hub", "alice").await.unwrap();
    hub.join_hub(&hub_id, "bob").await.unwrap();

    let alice = in_hub("alice", &hub_id);
    let bob = in_hub("bob", &hub_id);

    let schedule = ScheduleService::new(hub.clone(), local_store(), true);
    let key = schedule
        .add_session(&alice, draft("Review for final", "2026-05-20", "19:00"))
        .await
        .unwrap();
    let session_id = match key {
        study_hub::models::SessionKey::Shared(id) => id,
        other => panic!("expected shared key, got {other:?}"),
    };

    let live = LiveService::new(hub.clone(), true);
    let live_id = live.start_live(&alice, &session_id).await.unwrap();

    let doc = hub.get_live(&hub_id, &live_id).await.unwrap().unwrap();
    assert!(doc.active);
    assert_eq!(doc.host, "alice");
    assert_eq!(doc.title, "Review for final");
    assert_eq!(doc.participants.len(), 1);

    live.join_live(&bob, &live_id).await.unwrap();
    let doc = hub.get_live(&hub_id, &live_id).await.unwrap().unwrap();
    assert_eq!(doc.participants.len(), 2);
    assert!(doc.participants.contains_key("bob"));

    // Non-host cannot end it.
    let denied = live.end_live(&bob, &live_id).await;
    assert!(matches!(denied, Err(Error::NotHost)));
    let doc = hub.get_live(&hub_id, &live_id).await.unwrap().unwrap();
    assert!(doc.active, "denied end must leave the session running");

    live.end_live(&alice, &live_id).await.unwrap();
    let doc = hub.get_live(&hub_id, &live_id).await.unwrap().unwrap();
    assert!(!doc.active);
    assert!(doc.ended_at.is_some());
    assert!(hub.list_active_live(&hub_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_start_live_from_unknown_session() {
    let hub = hub_store();
    let hub_id = hub.create_hub("Learning Hub", "alice").await.unwrap();
    let live = LiveService::new(hub, true);

    let result = live.start_live(&in_hub("alice", &hub_id), "missing").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}
