//! Session service - Applies state-machine actions against the speech ports

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{Turn, UiPreferences};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use crate::dispatcher::IntentDispatcher;
use crate::ports::{RecognitionEvent, SpeechInputPort, SpeechOutputPort};
use crate::session::state::{
    SessionAction, SessionEvent, SessionPhase, SessionSettings, VoiceSession,
};

/// Orchestrates one voice session over the speech ports
///
/// Events arrive on an mpsc channel (mic clicks from the shell, recognizer
/// events forwarded from the input adapter, reply timers armed here) and are
/// fed through the pure state machine; the resulting actions are applied
/// asynchronously. Synthesis is fire-and-forget and never blocks the next
/// turn.
pub struct SessionService {
    input: Arc<dyn SpeechInputPort>,
    output: Arc<dyn SpeechOutputPort>,
    session: Mutex<VoiceSession>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("session", &*self.session.lock())
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// Create a service and the event receiver to drive it with
    pub fn new(
        input: Arc<dyn SpeechInputPort>,
        output: Arc<dyn SpeechOutputPort>,
        dispatcher: IntentDispatcher,
        prefs: UiPreferences,
        settings: SessionSettings,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Arc::new(Self {
            input,
            output,
            session: Mutex::new(VoiceSession::new(dispatcher, prefs, settings)),
            events: tx,
        });
        (service, rx)
    }

    /// A sender for feeding events into the service
    pub fn sender(&self) -> mpsc::UnboundedSender<SessionEvent> {
        self.events.clone()
    }

    /// Forward recognizer events from an adapter channel into the session
    pub fn spawn_recognition_forwarder(
        &self,
        mut recognizer_events: mpsc::UnboundedReceiver<RecognitionEvent>,
    ) {
        let events = self.events.clone();
        tokio::spawn(async move {
            while let Some(event) = recognizer_events.recv().await {
                if events.send(SessionEvent::Recognition(event)).is_err() {
                    break;
                }
            }
        });
    }

    /// Drain the event channel until all senders hang up
    pub async fn run(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<SessionEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        debug!("Session event channel closed");
    }

    /// Feed one event through the state machine and apply its actions
    #[instrument(skip(self, event), fields(event = ?event))]
    pub async fn handle_event(&self, event: SessionEvent) {
        let actions = self.session.lock().handle(event);
        for action in actions {
            self.apply(action).await;
        }
    }

    async fn apply(&self, action: SessionAction) {
        match action {
            SessionAction::StartRecognizer => {
                if let Err(err) = self.input.start_listening().await {
                    warn!(%err, "Recognizer failed to start");
                    // The adapter will emit nothing; unwind the listening
                    // phase the same way an engine error would.
                    let mut session = self.session.lock();
                    session.handle(SessionEvent::Recognition(RecognitionEvent::Error {
                        code: "start-failed".to_string(),
                    }));
                    session.handle(SessionEvent::Recognition(RecognitionEvent::End));
                }
            },
            SessionAction::StopRecognizer => {
                if let Err(err) = self.input.stop_listening().await {
                    warn!(%err, "Recognizer failed to stop");
                }
            },
            SessionAction::Speak(text) => {
                let output = Arc::clone(&self.output);
                tokio::spawn(async move {
                    if let Err(err) = output.speak(&text).await {
                        warn!(%err, "Synthesis failed");
                    }
                });
            },
            SessionAction::ScheduleReply { token, delay_ms } => {
                let events = self.events.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    if events.send(SessionEvent::ReplyTimerElapsed { token }).is_err() {
                        warn!(%token, "Session gone before reply timer fired");
                    }
                });
            },
        }
    }

    /// Current phase of the turn-taking cycle
    pub fn phase(&self) -> SessionPhase {
        self.session.lock().phase()
    }

    /// Whether a recognition session is active
    pub fn is_listening(&self) -> bool {
        self.session.lock().is_listening()
    }

    /// Snapshot of the conversation log for rendering
    pub fn transcript(&self) -> Vec<Turn> {
        self.session.lock().log().turns().to_vec()
    }

    /// Current UI preferences
    pub fn preferences(&self) -> UiPreferences {
        self.session.lock().preferences()
    }

    /// Whether the synthesis adapter reports itself available
    pub async fn synthesis_available(&self) -> bool {
        self.output.is_available().await
    }
}
