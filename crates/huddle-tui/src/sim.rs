//! In-process simulated call.
//!
//! Runs a scripted SDK session in-process using channels for the action and
//! event flow. No media stack - session actions flow in and SDK-shaped
//! events flow out through mpsc channels for deterministic testing with a
//! real terminal.

use std::time::Duration;

use huddle_client::{ScreenShareCapability, SessionAction, SessionEvent};
use huddle_core::{CaptionEvent, CaptionsId, MediaKind, StreamId};
use rand::Rng;
use tokio::sync::mpsc;

/// Scripted remote participants.
const PEERS: [(&str, &str); 2] = [("sim-cam-1", "Sam"), ("sim-cam-2", "Rio")];

/// Caption lines the simulated peers speak, in rotation.
const PHRASES: [&str; 6] = [
    "good morning everyone",
    "can you all see my slides",
    "let us start with the roadmap",
    "I will follow up after the call",
    "sounds good to me",
    "any questions so far",
];

/// Interval between simulated caption lines.
const CAPTION_INTERVAL: Duration = Duration::from_secs(2);

/// Delay before the simulated session reports connected.
const CONNECT_DELAY: Duration = Duration::from_millis(150);

/// Handle to a running in-process call.
pub struct CallHandle {
    /// Send session actions to the call.
    pub to_call: mpsc::Sender<SessionAction>,
    /// Receive SDK-shaped events from the call.
    pub from_call: mpsc::Receiver<SessionEvent>,
    /// Abort handle to stop the call task.
    abort_handle: tokio::task::AbortHandle,
}

impl CallHandle {
    /// Stop the call.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Spawn an in-process simulated call.
///
/// Returns a handle with channels for the action and event flow. The call
/// runs as a tokio task until disconnected or stopped.
pub fn spawn_call() -> CallHandle {
    let (action_tx, action_rx) = mpsc::channel::<SessionAction>(32);
    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(32);

    let handle = tokio::spawn(run_call(action_rx, event_tx));

    CallHandle { to_call: action_tx, from_call: event_rx, abort_handle: handle.abort_handle() }
}

async fn run_call(mut actions: mpsc::Receiver<SessionAction>, events: mpsc::Sender<SessionEvent>) {
    let mut captions_active = false;
    let mut peers_announced = false;
    let mut phrase_index = 0usize;
    let mut caption_tick = tokio::time::interval(CAPTION_INTERVAL);

    loop {
        tokio::select! {
            maybe_action = actions.recv() => {
                let Some(action) = maybe_action else { break };
                let done = handle_action(
                    action,
                    &events,
                    &mut captions_active,
                    &mut peers_announced,
                ).await;
                if done {
                    break;
                }
            }

            _ = caption_tick.tick() => {
                if captions_active && peers_announced {
                    let (stream_id, _) = PEERS[rand::rng().random_range(0..PEERS.len())];
                    let caption = CaptionEvent::finalized(
                        StreamId::new(stream_id),
                        PHRASES[phrase_index % PHRASES.len()],
                    );
                    phrase_index += 1;
                    if events.send(SessionEvent::CaptionReceived(caption)).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Respond to one session action. Returns `true` when the call is over.
async fn handle_action(
    action: SessionAction,
    events: &mpsc::Sender<SessionEvent>,
    captions_active: &mut bool,
    peers_announced: &mut bool,
) -> bool {
    match action {
        SessionAction::Connect { .. } => {
            tokio::time::sleep(CONNECT_DELAY).await;
            if events.send(SessionEvent::Connected).await.is_err() {
                return true;
            }
        },

        SessionAction::Publish { .. } => {
            let stream_id = StreamId::new(format!("local-{:04x}", rand::rng().random::<u16>()));
            if events.send(SessionEvent::PublisherReady { stream_id }).await.is_err() {
                return true;
            }

            // Peers trickle in once we are publishing.
            for (stream_id, name) in PEERS {
                let event = SessionEvent::StreamCreated {
                    stream_id: StreamId::new(stream_id),
                    name: name.to_string(),
                    kind: MediaKind::Camera,
                };
                if events.send(event).await.is_err() {
                    return true;
                }
            }
            *peers_announced = true;
        },

        SessionAction::ProbeScreenShare => {
            let event = SessionEvent::ScreenShareCapability(ScreenShareCapability::native());
            if events.send(event).await.is_err() {
                return true;
            }
        },

        SessionAction::StartCaptions { .. } => {
            *captions_active = true;
            let captions_id = CaptionsId::new(format!("cap-{:08x}", rand::rng().random::<u32>()));
            if events.send(SessionEvent::CaptionsStarted { captions_id }).await.is_err() {
                return true;
            }
        },

        SessionAction::StopCaptions { .. } => {
            *captions_active = false;
            if events.send(SessionEvent::CaptionsStopped).await.is_err() {
                return true;
            }
        },

        SessionAction::Disconnect => return true,

        SessionAction::SetPublishFlags { .. }
        | SessionAction::SubscribeSelfCaptions { .. }
        | SessionAction::PublishScreen { .. }
        | SessionAction::DestroyScreen
        | SessionAction::Subscribe { .. }
        | SessionAction::Unsubscribe { .. }
        | SessionAction::Unpublish
        | SessionAction::Alert { .. }
        | SessionAction::Notify { .. } => {},
    }

    false
}
