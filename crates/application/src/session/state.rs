//! Turn-taking state machine
//!
//! Phases: `Idle → Listening → Processing → Idle`. The machine is pure: it
//! consumes [`SessionEvent`]s and returns [`SessionAction`]s for the service
//! to apply, so every transition is unit-testable without ports or timers.
//!
//! `Processing` spans the window between a session's `Result` and `End`
//! events. A delayed reply outlives that window as a pending placeholder in
//! the log; its one-shot timer commits it through the pending-token
//! protocol, so a clear or a new cycle in between leaves nothing stray.

use domain::{ConversationLog, PendingToken, Turn, UiEffect, UiPreferences};
use tracing::{debug, warn};

use crate::dispatcher::IntentDispatcher;
use crate::ports::RecognitionEvent;

/// Phase of the turn-taking cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the user to press the mic
    Idle,
    /// A recognition session is active
    Listening,
    /// A transcript arrived and its reply is being produced
    Processing,
}

/// Events the state machine consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The mic control was clicked
    MicToggled,
    /// The theme control was clicked (bypasses the dispatcher)
    ThemeToggled,
    /// An event from the recognition adapter
    Recognition(RecognitionEvent),
    /// The thinking-delay timer for a pending reply fired
    ReplyTimerElapsed {
        /// Token of the placeholder to commit
        token: PendingToken,
    },
}

/// Actions the service must apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Start a recognition session
    StartRecognizer,
    /// Abort the active recognition session
    StopRecognizer,
    /// Speak a reply, fire-and-forget
    Speak(String),
    /// Arm the one-shot thinking-delay timer for a pending reply
    ScheduleReply {
        /// Token of the placeholder the timer will commit
        token: PendingToken,
        /// Delay before the commit
        delay_ms: u64,
    },
}

/// Tunables for the turn-taking cycle
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Thinking delay before the reply is committed; 0 commits immediately
    pub thinking_delay_ms: u64,
    /// Text of the placeholder turn shown during the delay
    pub placeholder_text: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 0,
            placeholder_text: "Thinking...".to_string(),
        }
    }
}

/// The turn-taking state machine for one session
pub struct VoiceSession {
    dispatcher: IntentDispatcher,
    settings: SessionSettings,
    phase: SessionPhase,
    log: ConversationLog,
    prefs: UiPreferences,
    /// Reply text waiting for its thinking-delay timer
    pending_reply: Option<(PendingToken, String)>,
}

impl std::fmt::Debug for VoiceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceSession")
            .field("phase", &self.phase)
            .field("turns", &self.log.len())
            .field("prefs", &self.prefs)
            .finish_non_exhaustive()
    }
}

impl VoiceSession {
    /// Create a session with the given preferences and settings
    pub fn new(dispatcher: IntentDispatcher, prefs: UiPreferences, settings: SessionSettings) -> Self {
        Self {
            dispatcher,
            settings,
            phase: SessionPhase::Idle,
            log: ConversationLog::new(),
            prefs,
            pending_reply: None,
        }
    }

    /// Current phase
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether a recognition session is active
    pub fn is_listening(&self) -> bool {
        self.phase == SessionPhase::Listening
    }

    /// The conversation log
    pub const fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Current UI preferences
    pub const fn preferences(&self) -> UiPreferences {
        self.prefs
    }

    /// Whether a delayed reply is still outstanding
    pub const fn has_pending_reply(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// Feed one event through the machine
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        match event {
            SessionEvent::MicToggled => self.on_mic_toggled(),
            SessionEvent::ThemeToggled => {
                self.prefs.toggle_dark_mode();
                debug!(dark_mode = self.prefs.dark_mode, "Theme toggled directly");
                Vec::new()
            },
            SessionEvent::Recognition(recognition) => self.on_recognition(recognition),
            SessionEvent::ReplyTimerElapsed { token } => self.on_reply_timer(token),
        }
    }

    fn on_mic_toggled(&mut self) -> Vec<SessionAction> {
        match self.phase {
            SessionPhase::Idle => {
                self.phase = SessionPhase::Listening;
                debug!("Listening started");
                vec![SessionAction::StartRecognizer]
            },
            SessionPhase::Listening => {
                // Toggle means stop; the phase resets when End arrives.
                debug!("Listening stopped by user");
                vec![SessionAction::StopRecognizer]
            },
            SessionPhase::Processing => {
                debug!("Mic toggle ignored while processing");
                Vec::new()
            },
        }
    }

    fn on_recognition(&mut self, event: RecognitionEvent) -> Vec<SessionAction> {
        match event {
            RecognitionEvent::Result { transcript } => {
                if self.phase != SessionPhase::Listening {
                    warn!(?transcript, "Transcript outside a listening phase, dropped");
                    return Vec::new();
                }
                self.phase = SessionPhase::Processing;
                self.on_transcript(&transcript)
            },
            RecognitionEvent::Error { code } => {
                warn!(code, "Recognition error");
                self.phase = SessionPhase::Idle;
                Vec::new()
            },
            RecognitionEvent::End => {
                self.phase = SessionPhase::Idle;
                Vec::new()
            },
        }
    }

    fn on_transcript(&mut self, transcript: &str) -> Vec<SessionAction> {
        self.log.append(Turn::user(transcript));

        let outcome = self.dispatcher.dispatch(transcript, &self.prefs);
        for effect in &outcome.effects {
            self.apply_effect(*effect);
        }

        let Some(reply) = outcome.reply else {
            // Clear-chat short circuit: no assistant turn, nothing spoken.
            return Vec::new();
        };

        if self.settings.thinking_delay_ms == 0 {
            self.log.append(Turn::assistant(&reply));
            return vec![SessionAction::Speak(reply)];
        }

        let placeholder = Turn::assistant(&self.settings.placeholder_text);
        let token = self.log.begin_pending(placeholder);
        self.pending_reply = Some((token, reply));
        vec![SessionAction::ScheduleReply {
            token,
            delay_ms: self.settings.thinking_delay_ms,
        }]
    }

    fn on_reply_timer(&mut self, token: PendingToken) -> Vec<SessionAction> {
        let Some((pending_token, reply)) = self.pending_reply.take() else {
            debug!(%token, "Reply timer fired with nothing pending");
            return Vec::new();
        };

        if pending_token != token {
            // A newer pending reply superseded this timer.
            self.pending_reply = Some((pending_token, reply));
            debug!(%token, "Stale reply timer dropped");
            return Vec::new();
        }

        match self.log.resolve_pending(token, Turn::assistant(&reply)) {
            Ok(()) => {
                if self.phase == SessionPhase::Processing {
                    self.phase = SessionPhase::Idle;
                }
                vec![SessionAction::Speak(reply)]
            },
            Err(err) => {
                // The placeholder is gone (cleared or superseded); drop the
                // reply rather than appending it out of place.
                warn!(%token, %err, "Pending reply dropped");
                Vec::new()
            },
        }
    }

    fn apply_effect(&mut self, effect: UiEffect) {
        debug!(effect = effect.description(), "Applying effect");
        match effect {
            UiEffect::ToggleDarkMode => self.prefs.toggle_dark_mode(),
            UiEffect::ClearLog => {
                self.log.clear();
                self.pending_reply = None;
            },
            UiEffect::IncreaseFontScale => self.prefs.increase_font_scale(),
            UiEffect::DecreaseFontScale => self.prefs.decrease_font_scale(),
        }
    }

    /// Thinking delay currently configured
    pub const fn thinking_delay_ms(&self) -> u64 {
        self.settings.thinking_delay_ms
    }
}

#[cfg(test)]
mod tests {
    use domain::Speaker;

    use super::*;
    use crate::dispatcher::{FALLBACK_REPLY, GREETING_REPLY};

    fn session() -> VoiceSession {
        VoiceSession::new(
            IntentDispatcher::new(),
            UiPreferences::default(),
            SessionSettings::default(),
        )
    }

    fn session_with_delay(delay_ms: u64) -> VoiceSession {
        VoiceSession::new(
            IntentDispatcher::new(),
            UiPreferences::default(),
            SessionSettings {
                thinking_delay_ms: delay_ms,
                ..SessionSettings::default()
            },
        )
    }

    fn result(transcript: &str) -> SessionEvent {
        SessionEvent::Recognition(RecognitionEvent::Result {
            transcript: transcript.to_string(),
        })
    }

    const END: SessionEvent = SessionEvent::Recognition(RecognitionEvent::End);

    #[test]
    fn mic_toggle_starts_listening() {
        let mut session = session();
        let actions = session.handle(SessionEvent::MicToggled);

        assert_eq!(actions, vec![SessionAction::StartRecognizer]);
        assert!(session.is_listening());
    }

    #[test]
    fn second_mic_toggle_stops_instead_of_restarting() {
        let mut session = session();
        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(SessionEvent::MicToggled);

        assert_eq!(actions, vec![SessionAction::StopRecognizer]);
        // Still listening until the adapter signals End.
        assert!(session.is_listening());

        session.handle(END);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.log().is_empty());
    }

    #[test]
    fn transcript_appends_user_turn_and_speaks_reply() {
        let mut session = session();
        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(result("Hello there"));

        assert_eq!(
            actions,
            vec![SessionAction::Speak(GREETING_REPLY.to_string())]
        );
        assert_eq!(session.log().len(), 2);

        let turns = session.log().turns();
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[0].text, "Hello there");
        assert_eq!(turns[1].speaker, Speaker::Assistant);
        assert_eq!(turns[1].text, GREETING_REPLY);

        session.handle(END);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn unmatched_transcript_gets_fallback_reply() {
        let mut session = session();
        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(result("abracadabra"));

        assert_eq!(
            actions,
            vec![SessionAction::Speak(FALLBACK_REPLY.to_string())]
        );
    }

    #[test]
    fn recognition_error_returns_to_idle_without_turns() {
        let mut session = session();
        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(SessionEvent::Recognition(RecognitionEvent::Error {
            code: "not-allowed".to_string(),
        }));

        assert!(actions.is_empty());
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.log().is_empty());

        session.handle(END);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn end_without_result_returns_to_idle() {
        let mut session = session();
        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(END);

        assert!(actions.is_empty());
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.log().is_empty());
    }

    #[test]
    fn clear_chat_suppresses_reply_and_empties_log() {
        let mut session = session();
        session.handle(SessionEvent::MicToggled);
        session.handle(result("Hello there"));
        session.handle(END);

        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(result("clear the chat"));

        assert!(actions.is_empty());
        assert!(session.log().is_empty());
    }

    #[test]
    fn theme_toggle_bypasses_dispatcher() {
        let mut session = session();
        let actions = session.handle(SessionEvent::ThemeToggled);

        assert!(actions.is_empty());
        assert!(session.preferences().dark_mode);
        assert!(session.log().is_empty());
    }

    #[test]
    fn switch_theme_transcript_flips_preference() {
        let mut session = session();
        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(result("please switch the theme"));

        assert!(session.preferences().dark_mode);
        assert!(matches!(actions.as_slice(), [SessionAction::Speak(_)]));
    }

    #[test]
    fn font_transcripts_adjust_scale_not_theme() {
        let mut session = session();
        session.handle(SessionEvent::MicToggled);
        session.handle(result("increase the font"));
        session.handle(END);

        assert_eq!(session.preferences().font_scale.percent(), 110);
        assert!(!session.preferences().dark_mode);

        session.handle(SessionEvent::MicToggled);
        session.handle(result("decrease the font"));

        assert_eq!(session.preferences().font_scale.percent(), 100);
        assert!(!session.preferences().dark_mode);
    }

    #[test]
    fn delayed_reply_shows_placeholder_then_commits() {
        let mut session = session_with_delay(500);
        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(result("Hello there"));

        let [SessionAction::ScheduleReply { token, delay_ms }] = actions.as_slice() else {
            unreachable!("Expected a scheduled reply")
        };
        assert_eq!(*delay_ms, 500);
        assert_eq!(session.log().len(), 2);
        assert_eq!(session.log().last().unwrap().text, "Thinking...");
        assert!(session.has_pending_reply());

        session.handle(END);

        let actions = session.handle(SessionEvent::ReplyTimerElapsed { token: *token });
        assert_eq!(
            actions,
            vec![SessionAction::Speak(GREETING_REPLY.to_string())]
        );
        assert_eq!(session.log().last().unwrap().text, GREETING_REPLY);
        assert!(!session.has_pending_reply());
        assert!(!session.log().has_pending());
    }

    #[test]
    fn clear_chat_mid_delay_drops_pending_reply() {
        let mut session = session_with_delay(500);
        session.handle(SessionEvent::MicToggled);
        let actions = session.handle(result("Hello there"));
        let [SessionAction::ScheduleReply { token, .. }] = actions.as_slice() else {
            unreachable!("Expected a scheduled reply")
        };
        let token = *token;
        session.handle(END);

        // Clear the chat before the timer fires.
        session.handle(SessionEvent::MicToggled);
        session.handle(result("clear the chat"));
        session.handle(END);
        assert!(session.log().is_empty());

        let actions = session.handle(SessionEvent::ReplyTimerElapsed { token });
        assert!(actions.is_empty());
        assert!(session.log().is_empty());
    }

    #[test]
    fn new_cycle_mid_delay_supersedes_placeholder() {
        let mut session = session_with_delay(500);
        session.handle(SessionEvent::MicToggled);
        let first = session.handle(result("Hello there"));
        let [SessionAction::ScheduleReply { token: stale, .. }] = first.as_slice() else {
            unreachable!("Expected a scheduled reply")
        };
        let stale = *stale;
        session.handle(END);

        // Second cycle replaces the placeholder with a new user turn.
        session.handle(SessionEvent::MicToggled);
        let second = session.handle(result("what is your name"));
        let [SessionAction::ScheduleReply { token: current, .. }] = second.as_slice() else {
            unreachable!("Expected a scheduled reply")
        };
        let current = *current;
        session.handle(END);

        // The stale timer commits nothing.
        assert!(
            session
                .handle(SessionEvent::ReplyTimerElapsed { token: stale })
                .is_empty()
        );

        // The current timer commits the second reply.
        let actions = session.handle(SessionEvent::ReplyTimerElapsed { token: current });
        assert!(matches!(actions.as_slice(), [SessionAction::Speak(_)]));
        assert_eq!(
            session.log().last().unwrap().text,
            "My name is Voice Assistant."
        );
        // User turn, then committed reply; the first cycle's placeholder is gone.
        let speakers: Vec<Speaker> = session.log().turns().iter().map(|t| t.speaker).collect();
        assert_eq!(
            speakers,
            [
                Speaker::User,
                Speaker::User,
                Speaker::Assistant
            ]
        );
    }

    #[test]
    fn transcript_outside_listening_is_dropped() {
        let mut session = session();
        let actions = session.handle(result("Hello there"));

        assert!(actions.is_empty());
        assert!(session.log().is_empty());
    }

    #[test]
    fn mic_toggle_while_processing_is_ignored() {
        let mut session = session_with_delay(500);
        session.handle(SessionEvent::MicToggled);
        session.handle(result("Hello there"));

        // Processing lasts until End; the toggle does nothing here.
        let actions = session.handle(SessionEvent::MicToggled);
        assert!(actions.is_empty());
        assert_eq!(session.phase(), SessionPhase::Processing);
    }
}
