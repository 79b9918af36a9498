//! Presence synchronization tests
//!
//! Several clients joined to an in-process loopback peer.
//!
//! Run with: cargo test -p integration-tests --test presence_tests

use integration_tests::{persistent_config, LoopbackPeer, TestParticipant};
use presence_client::persistence::FilePersistence;
use presence_client::protocol::snapshot_from_states;
use presence_client::{
    AvailabilityOverlay, Frame, PresenceChannel, PresenceMessage, SessionState, StatusIcon,
};
use presence_common::PresenceConfig;
use presence_core::{Availability, ParticipantId, PresenceState, SavedPresence, StatePersistence};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Fan-out
// ============================================================================

#[tokio::test]
async fn test_status_change_reaches_other_participant() {
    let peer = LoopbackPeer::new();
    let mut a = TestParticipant::start().await.unwrap();
    let mut b = TestParticipant::start().await.unwrap();

    peer.join(&a).unwrap();
    peer.join(&b).unwrap();
    peer.relay(&mut a).unwrap();
    peer.relay(&mut b).unwrap();

    a.client.set_own_status("recording");
    assert_eq!(peer.relay(&mut a).unwrap(), 1);

    let seen = b.client.remote_state(a.id()).unwrap();
    assert_eq!(seen, PresenceState::new(a.id(), "recording", Availability::Unset));

    let presentation = b.client.presentation(a.id()).unwrap();
    assert_eq!(presentation.icon, StatusIcon::Recording);
    assert_eq!(presentation.overlay, AvailabilityOverlay::NoAvailability);

    peer.leave(&b).unwrap();
    assert!(b.client.remote_state(a.id()).is_none());
    assert_eq!(b.client.session_state(), SessionState::Disconnected);
}

#[tokio::test]
async fn test_joiner_receives_existing_population() {
    let peer = LoopbackPeer::new();
    let mut a = TestParticipant::start().await.unwrap();
    a.client.set_own_availability(Availability::DoNotDisturb);
    peer.join(&a).unwrap();
    peer.relay(&mut a).unwrap();

    let b = TestParticipant::start().await.unwrap();
    peer.join(&b).unwrap();

    let seen = b.client.remote_state(a.id()).unwrap();
    assert_eq!(seen.availability, Availability::DoNotDisturb);
    assert_eq!(
        b.client.presentation(a.id()).unwrap().overlay,
        AvailabilityOverlay::DoNotDisturb
    );
}

#[tokio::test]
async fn test_connect_publishes_own_state_to_members() {
    let peer = LoopbackPeer::new();
    let a = TestParticipant::start().await.unwrap();
    peer.join(&a).unwrap();

    let mut b = TestParticipant::start_with(
        PresenceConfig {
            default_status: "streaming".to_string(),
            default_availability: Availability::Open,
            ..PresenceConfig::default()
        },
        None,
    )
    .await
    .unwrap();
    peer.join(&b).unwrap();
    peer.relay(&mut b).unwrap();

    let seen = a.client.remote_state(b.id()).unwrap();
    assert_eq!(seen.status, "streaming");
    assert_eq!(seen.availability, Availability::Open);
}

#[tokio::test]
async fn test_leaving_participant_removed_from_others() {
    let peer = LoopbackPeer::new();
    let mut a = TestParticipant::start().await.unwrap();
    let mut b = TestParticipant::start().await.unwrap();
    peer.join(&a).unwrap();
    peer.join(&b).unwrap();
    peer.relay(&mut a).unwrap();
    peer.relay(&mut b).unwrap();
    assert!(a.client.remote_state(b.id()).is_some());

    peer.leave(&b).unwrap();

    assert!(a.client.remote_state(b.id()).is_none());
    assert_eq!(peer.member_count(), 1);
}

// ============================================================================
// Snapshots
// ============================================================================

#[tokio::test]
async fn test_snapshot_replaces_remote_population() {
    let b = TestParticipant::start().await.unwrap();
    let a_id = ParticipantId::random();
    let c_id = ParticipantId::random();
    let d_id = ParticipantId::random();

    b.client.apply(PresenceMessage::SingleUpdate(PresenceState::new(
        d_id,
        "no_sleep",
        Availability::Open,
    )));
    assert!(b.client.remote_state(d_id).is_some());

    let a = PresenceState::new(a_id, "recording", Availability::Unset);
    let c = PresenceState::new(c_id, "idle", Availability::Open);
    let frame = PresenceMessage::Snapshot(snapshot_from_states([a.clone(), c.clone()]))
        .to_frame()
        .unwrap();
    b.client.handle_frame(&frame).unwrap();

    assert!(b.client.remote_state(d_id).is_none());
    assert_eq!(b.client.remote_state(a_id), Some(a));
    assert_eq!(b.client.remote_state(c_id), Some(c));
}

#[tokio::test]
async fn test_late_snapshot_overwrites_newer_update() {
    let peer = LoopbackPeer::new();
    let mut a = TestParticipant::start().await.unwrap();
    let b = TestParticipant::start().await.unwrap();
    peer.join(&a).unwrap();
    peer.join(&b).unwrap();
    peer.relay(&mut a).unwrap();

    let stale = PresenceMessage::Snapshot(snapshot_from_states([PresenceState::new(
        a.id(),
        "",
        Availability::Unset,
    )]))
    .to_frame()
    .unwrap();

    a.client.set_own_status("streaming");
    peer.relay(&mut a).unwrap();
    assert_eq!(b.client.remote_state(a.id()).unwrap().status, "streaming");

    // Last applied wins, regardless of when it was produced
    b.client.handle_frame(&stale).unwrap();
    assert_eq!(b.client.remote_state(a.id()).unwrap().status, "");

    peer.resync_all().unwrap();
    assert_eq!(b.client.remote_state(a.id()).unwrap().status, "streaming");
}

// ============================================================================
// Own state
// ============================================================================

#[tokio::test]
async fn test_own_state_round_trip_sends_one_frame() {
    let mut a = TestParticipant::start().await.unwrap();

    let state = a.client.set_own_status("recording");
    assert_eq!(a.client.own_state(), state);

    let frames = a.sent_frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].known_channel(), Some(PresenceChannel::State));
    assert_eq!(
        PresenceMessage::from_frame(&frames[0]).unwrap(),
        PresenceMessage::SingleUpdate(state)
    );
}

#[tokio::test]
async fn test_repeated_update_is_idempotent() {
    let b = TestParticipant::start().await.unwrap();
    let state = PresenceState::new(ParticipantId::random(), "recording", Availability::Open);

    b.client.apply(PresenceMessage::SingleUpdate(state.clone()));
    let once = b.client.remote_states();
    b.client.apply(PresenceMessage::SingleUpdate(state));

    assert_eq!(b.client.remote_states(), once);
}

#[tokio::test]
async fn test_own_id_echo_does_not_touch_own_state() {
    let a = TestParticipant::start().await.unwrap();
    a.client.set_own_status("recording");

    a.client.apply(PresenceMessage::SingleUpdate(PresenceState::new(
        a.id(),
        "streaming",
        Availability::DoNotDisturb,
    )));

    assert_eq!(a.client.own_state().status, "recording");
    assert_eq!(a.client.remote_state(a.id()).unwrap().status, "streaming");
}

#[tokio::test]
async fn test_own_state_survives_disconnect() {
    let peer = LoopbackPeer::new();
    let a = TestParticipant::start().await.unwrap();
    peer.join(&a).unwrap();
    a.client.set_own_availability(Availability::Open);

    peer.leave(&a).unwrap();

    assert_eq!(a.client.own_state().availability, Availability::Open);
}

// ============================================================================
// Initialization and persistence
// ============================================================================

#[tokio::test]
async fn test_default_construction_uses_configured_defaults() {
    let a = TestParticipant::start_with(
        PresenceConfig {
            default_status: "idle".to_string(),
            default_availability: Availability::Open,
            ..PresenceConfig::default()
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(a.client.own_state().status, "idle");
    assert_eq!(a.client.own_state().availability, Availability::Open);
}

#[tokio::test]
async fn test_persistent_state_restored_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presence.json");

    let file: Arc<dyn StatePersistence> = Arc::new(FilePersistence::new(&path));
    let first = TestParticipant::start_with(persistent_config(&path), Some(file.clone()))
        .await
        .unwrap();
    first.client.set_own_status("no_sleep");
    first.client.set_own_availability(Availability::DoNotDisturb);
    first.client.shutdown().await;

    assert_eq!(
        file.load().await.unwrap(),
        Some(SavedPresence::new("no_sleep", Availability::DoNotDisturb))
    );

    let second = TestParticipant::start_with(persistent_config(&path), Some(file))
        .await
        .unwrap();
    assert_eq!(second.client.own_state().status, "no_sleep");
    assert_eq!(
        second.client.own_state().availability,
        Availability::DoNotDisturb
    );
}

#[tokio::test]
async fn test_corrupt_state_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presence.json");
    tokio::fs::write(&path, b"{ not json").await.unwrap();

    let config = PresenceConfig {
        default_status: "idle".to_string(),
        ..persistent_config(&path)
    };
    let a = TestParticipant::start_with(config, Some(Arc::new(FilePersistence::new(&path))))
        .await
        .unwrap();

    assert_eq!(a.client.own_state().status, "idle");
    assert_eq!(a.client.own_state().availability, Availability::Unset);
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn test_join_notice_fires_on_every_connect() {
    let peer = LoopbackPeer::new();
    let a = TestParticipant::start().await.unwrap();
    let notices = Arc::new(AtomicUsize::new(0));
    let counter = notices.clone();
    a.client.on_join_notice(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    peer.join(&a).unwrap();
    peer.leave(&a).unwrap();
    peer.join(&a).unwrap();

    assert_eq!(notices.load(Ordering::SeqCst), 2);
    assert_eq!(a.client.session_state(), SessionState::Connected);
}

#[tokio::test]
async fn test_join_notice_disabled() {
    let a = TestParticipant::start_with(
        PresenceConfig {
            show_join_message: false,
            ..PresenceConfig::default()
        },
        None,
    )
    .await
    .unwrap();
    let notices = Arc::new(AtomicUsize::new(0));
    let counter = notices.clone();
    a.client.on_join_notice(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    a.client.on_connect();

    assert_eq!(notices.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Peer validation
// ============================================================================

#[tokio::test]
async fn test_peer_rejects_snapshot_from_client() {
    let peer = LoopbackPeer::new();
    let a = TestParticipant::start().await.unwrap();
    let b = TestParticipant::start().await.unwrap();
    peer.join(&a).unwrap();
    peer.join(&b).unwrap();

    let forged = PresenceMessage::Snapshot(snapshot_from_states([PresenceState::new(
        b.id(),
        "recording",
        Availability::Open,
    )]))
    .to_frame()
    .unwrap();

    assert_eq!(peer.relay_frames(a.id(), vec![forged]).unwrap(), 0);
    assert_eq!(peer.rejected_count(), 1);
    assert!(b.client.remote_states().is_empty());
}

#[tokio::test]
async fn test_peer_rejects_update_for_other_participant() {
    let peer = LoopbackPeer::new();
    let a = TestParticipant::start().await.unwrap();
    let b = TestParticipant::start().await.unwrap();
    peer.join(&a).unwrap();
    peer.join(&b).unwrap();

    let spoofed = PresenceMessage::SingleUpdate(PresenceState::new(
        ParticipantId::random(),
        "recording",
        Availability::Unset,
    ))
    .to_frame()
    .unwrap();

    assert_eq!(peer.relay_frames(a.id(), vec![spoofed]).unwrap(), 0);
    assert_eq!(peer.rejected_count(), 1);
}

#[tokio::test]
async fn test_unknown_channel_rejected_by_client() {
    let a = TestParticipant::start().await.unwrap();
    let frame = Frame::from_json(r#"{"channel":"presence:typing","d":{}}"#).unwrap();

    assert!(a.client.handle_frame(&frame).is_err());
    assert!(a.client.remote_states().is_empty());
}
