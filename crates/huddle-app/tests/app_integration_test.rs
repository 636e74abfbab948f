//! Integration tests for App and Bridge behavior.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - App state reflects the session state
//! - Tiles, flags, and transcript are consistent
//! - Outgoing session actions match the user intent

use huddle_app::{App, AppAction, AppEvent, Bridge, ConnectionState, KeyInput};
use huddle_client::{ScreenShareCapability, SessionAction, SessionEvent};
use huddle_core::{CaptionEvent, CaptionsId, MediaKind, Region, RoomCredentials, StreamId};

fn credentials() -> RoomCredentials {
    RoomCredentials::new("app-key", "session-1", "token-1", "Alice")
}

/// Process actions from App through Bridge and update App state.
fn process_actions(app: &mut App, bridge: &mut Bridge, actions: Vec<AppAction>) {
    let mut pending = actions;
    while !pending.is_empty() {
        for action in std::mem::take(&mut pending) {
            match action {
                AppAction::JoinCall
                | AppAction::ToggleCamera
                | AppAction::ToggleMicrophone
                | AppAction::ToggleScreenShare
                | AppAction::ToggleCaptions
                | AppAction::EndCall => {
                    let events = bridge.process_app_action(action);
                    for event in events {
                        pending.extend(app.handle(event));
                    }
                },
                AppAction::Render | AppAction::Quit | AppAction::ExportTranscript { .. } => {},
            }
        }
    }
}

/// Simulate receiving an SDK or backend event.
fn receive(app: &mut App, bridge: &mut Bridge, event: SessionEvent) {
    let events = bridge.handle_sdk_event(event);
    for event in events {
        let actions = app.handle(event);
        process_actions(app, bridge, actions);
    }
}

/// Press a key and process the resulting actions through the Bridge.
fn press(app: &mut App, bridge: &mut Bridge, key: KeyInput) {
    let actions = app.handle(AppEvent::Key(key));
    process_actions(app, bridge, actions);
}

/// Create an App/Bridge pair with a live call and a ready publisher.
fn joined_pair() -> (App, Bridge) {
    let mut app = App::new();
    let mut bridge = Bridge::new(credentials());

    let actions = app.join();
    process_actions(&mut app, &mut bridge, actions);
    receive(&mut app, &mut bridge, SessionEvent::Connected);
    receive(&mut app, &mut bridge, SessionEvent::PublisherReady {
        stream_id: StreamId::new("me"),
    });
    let _ = bridge.take_outgoing();

    (app, bridge)
}

fn announce_camera(app: &mut App, bridge: &mut Bridge, id: &str, name: &str) {
    receive(app, bridge, SessionEvent::StreamCreated {
        stream_id: StreamId::new(id),
        name: name.to_string(),
        kind: MediaKind::Camera,
    });
}

#[test]
fn join_flow_reaches_in_call() {
    let mut app = App::new();
    let mut bridge = Bridge::new(credentials());

    let actions = app.join();
    process_actions(&mut app, &mut bridge, actions);
    assert_eq!(app.connection_state(), ConnectionState::Connecting);
    assert!(bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Connect { .. })));

    receive(&mut app, &mut bridge, SessionEvent::Connected);
    assert_eq!(app.connection_state(), ConnectionState::InCall);
    assert!(app.waiting_for_peers(), "Spinner until the first remote stream");
    assert!(bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Publish { .. })));
}

#[test]
fn remote_stream_becomes_a_tile() {
    let (mut app, mut bridge) = joined_pair();

    announce_camera(&mut app, &mut bridge, "s1", "Bob");

    let tile = app.tile_for(&StreamId::new("s1")).expect("tile for announced stream");
    assert_eq!(tile.name, "Bob");
    assert_eq!(tile.region, Region::Remote);
    assert!(!app.waiting_for_peers());
    assert!(
        bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Subscribe { .. }))
    );
}

#[test]
fn toggles_round_trip_through_bridge() {
    let (mut app, mut bridge) = joined_pair();
    assert!(app.flags().camera);

    press(&mut app, &mut bridge, KeyInput::Char('c'));
    assert!(!app.flags().camera, "Camera flag should follow the toggle");
    assert!(app.flags().mic);
    assert!(bridge.take_outgoing().iter().any(|a| matches!(
        a,
        SessionAction::SetPublishFlags { video: false, audio: true }
    )));

    press(&mut app, &mut bridge, KeyInput::Char('m'));
    assert!(!app.flags().mic);
    assert!(!app.flags().camera);
}

#[test]
fn captions_flow_fills_transcript_view() {
    let (mut app, mut bridge) = joined_pair();

    press(&mut app, &mut bridge, KeyInput::Char('t'));
    assert!(!app.flags().captions, "Flag waits for the backend to resolve");

    receive(&mut app, &mut bridge, SessionEvent::CaptionsStarted {
        captions_id: CaptionsId::new("c1"),
    });
    assert!(app.flags().captions);

    announce_camera(&mut app, &mut bridge, "s1", "Bob");
    receive(
        &mut app,
        &mut bridge,
        SessionEvent::CaptionReceived(CaptionEvent::interim(StreamId::new("s1"), "hel")),
    );
    receive(
        &mut app,
        &mut bridge,
        SessionEvent::CaptionReceived(CaptionEvent::finalized(StreamId::new("s1"), "hello")),
    );

    assert_eq!(app.transcript().entries().len(), 1, "Only the final caption lands");
    assert_eq!(app.transcript().entries()[0].speaker, "Bob");
}

#[test]
fn export_key_produces_rendered_transcript() {
    let (mut app, mut bridge) = joined_pair();
    announce_camera(&mut app, &mut bridge, "s1", "Bob");
    receive(
        &mut app,
        &mut bridge,
        SessionEvent::CaptionReceived(CaptionEvent::finalized(StreamId::new("s1"), "hi all")),
    );

    let actions = app.handle(AppEvent::Key(KeyInput::Char('d')));
    let exported = actions.iter().find_map(|a| match a {
        AppAction::ExportTranscript { contents } => Some(contents.clone()),
        _ => None,
    });
    assert_eq!(exported.as_deref(), Some("Name: Bob \n Text: hi all \n"));
}

#[test]
fn screen_share_happy_path_sets_flag() {
    let (mut app, mut bridge) = joined_pair();

    press(&mut app, &mut bridge, KeyInput::Char('s'));
    assert!(!app.flags().screen_sharing, "Flag waits for the capability probe");
    assert!(
        bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::ProbeScreenShare))
    );

    receive(
        &mut app,
        &mut bridge,
        SessionEvent::ScreenShareCapability(ScreenShareCapability::native()),
    );
    assert!(app.flags().screen_sharing);
    assert!(
        bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::PublishScreen { .. }))
    );

    press(&mut app, &mut bridge, KeyInput::Char('s'));
    assert!(!app.flags().screen_sharing);
    assert!(bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::DestroyScreen)));
}

#[test]
fn unsupported_share_alert_blocks_input() {
    let (mut app, mut bridge) = joined_pair();

    press(&mut app, &mut bridge, KeyInput::Char('s'));
    receive(
        &mut app,
        &mut bridge,
        SessionEvent::ScreenShareCapability(ScreenShareCapability::unsupported()),
    );
    assert_eq!(app.alert(), Some("Screen sharing not supported"));
    assert!(!app.flags().screen_sharing);

    // The next key only dismisses the alert.
    press(&mut app, &mut bridge, KeyInput::Char('c'));
    assert!(app.alert().is_none());
    assert!(app.flags().camera, "Camera toggle must not fire through the alert");
}

#[test]
fn remote_screen_share_fills_screen_region() {
    let (mut app, mut bridge) = joined_pair();

    receive(&mut app, &mut bridge, SessionEvent::StreamCreated {
        stream_id: StreamId::new("scr"),
        name: "Bob".to_string(),
        kind: MediaKind::Screen,
    });
    assert!(app.remote_screen_active());

    receive(&mut app, &mut bridge, SessionEvent::StreamDestroyed {
        stream_id: StreamId::new("scr"),
    });
    assert!(!app.remote_screen_active());
}

#[test]
fn departure_notice_and_tile_removal() {
    let (mut app, mut bridge) = joined_pair();
    announce_camera(&mut app, &mut bridge, "s1", "Bob");

    receive(&mut app, &mut bridge, SessionEvent::StreamDestroyed {
        stream_id: StreamId::new("s1"),
    });

    assert!(app.tiles().is_empty());
    assert_eq!(app.status_message(), Some("Bob out room"));
}

#[test]
fn esc_ends_call_and_resets() {
    let (mut app, mut bridge) = joined_pair();
    announce_camera(&mut app, &mut bridge, "s1", "Bob");
    press(&mut app, &mut bridge, KeyInput::Char('c'));
    let _ = bridge.take_outgoing();

    press(&mut app, &mut bridge, KeyInput::Esc);

    assert_eq!(app.connection_state(), ConnectionState::Disconnected);
    assert!(app.tiles().is_empty());
    assert!(app.transcript().is_empty());
    assert!(app.flags().camera, "Flags reset to defaults");
    let outgoing = bridge.take_outgoing();
    assert!(outgoing.iter().any(|a| matches!(a, SessionAction::Unpublish)));
    assert!(outgoing.iter().any(|a| matches!(a, SessionAction::Unsubscribe { .. })));
    assert!(outgoing.iter().any(|a| matches!(a, SessionAction::Disconnect)));
}

#[test]
fn enter_rejoins_after_call_end() {
    let (mut app, mut bridge) = joined_pair();
    announce_camera(&mut app, &mut bridge, "s1", "Bob");
    receive(
        &mut app,
        &mut bridge,
        SessionEvent::CaptionReceived(CaptionEvent::finalized(StreamId::new("s1"), "bye")),
    );
    press(&mut app, &mut bridge, KeyInput::Esc);
    let _ = bridge.take_outgoing();

    press(&mut app, &mut bridge, KeyInput::Enter);
    assert_eq!(app.connection_state(), ConnectionState::Connecting);
    assert!(bridge.take_outgoing().iter().any(|a| matches!(a, SessionAction::Connect { .. })));

    receive(&mut app, &mut bridge, SessionEvent::Connected);
    receive(&mut app, &mut bridge, SessionEvent::PublisherReady {
        stream_id: StreamId::new("me-2"),
    });
    assert_eq!(app.connection_state(), ConnectionState::InCall);
    assert!(app.tiles().is_empty(), "Old tiles do not leak into the new call");

    // Fresh transcript cursor: the first caption of the new call lands once.
    announce_camera(&mut app, &mut bridge, "s2", "Carol");
    receive(
        &mut app,
        &mut bridge,
        SessionEvent::CaptionReceived(CaptionEvent::finalized(StreamId::new("s2"), "back again")),
    );
    assert_eq!(app.transcript().entries().len(), 1);
    assert_eq!(app.transcript().entries()[0].speaker, "Carol");
}

#[test]
fn late_sdk_events_after_end_are_inert() {
    let (mut app, mut bridge) = joined_pair();
    press(&mut app, &mut bridge, KeyInput::Esc);
    let _ = bridge.take_outgoing();

    announce_camera(&mut app, &mut bridge, "s9", "Ghost");
    assert!(app.tiles().is_empty());
    assert!(bridge.take_outgoing().is_empty());
}

#[test]
fn late_captions_start_is_compensated() {
    let (mut app, mut bridge) = joined_pair();
    press(&mut app, &mut bridge, KeyInput::Char('t'));
    press(&mut app, &mut bridge, KeyInput::Esc);
    let _ = bridge.take_outgoing();

    receive(&mut app, &mut bridge, SessionEvent::CaptionsStarted {
        captions_id: CaptionsId::new("late"),
    });

    assert!(!app.flags().captions);
    assert!(bridge.take_outgoing().iter().any(|a| matches!(
        a,
        SessionAction::StopCaptions { caption_id } if caption_id.as_str() == "late"
    )));
}
