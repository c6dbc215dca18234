//! Intent dispatcher - Turn a transcript into a reply and side effects
//!
//! Matching is an ordered table of keyword rules, evaluated top to bottom,
//! first match wins. The dispatcher never mutates state: effects come back
//! as data for the session to apply.

mod rules;

use std::fmt;

use domain::{UiEffect, UiPreferences};
use tracing::debug;

/// Greeting reply (rule: "hello")
pub const GREETING_REPLY: &str = "Hi there! How are you?";
/// Self-introduction reply (rule: "name")
pub const NAME_REPLY: &str = "My name is Voice Assistant.";
/// Prefix of the wall-clock reply (rule: "time")
pub const TIME_REPLY_PREFIX: &str = "The current time is ";
/// Reply when no rule matches
pub const FALLBACK_REPLY: &str = "Sorry, I didn't catch that.";

/// Result of dispatching one transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Reply to append and speak; `None` suppresses the reply pipeline
    pub reply: Option<String>,
    /// Side effects for the session to apply
    pub effects: Vec<UiEffect>,
}

impl DispatchOutcome {
    /// A plain reply with no effects
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            effects: Vec::new(),
        }
    }

    /// A reply accompanied by one effect
    pub fn reply_with_effect(text: impl Into<String>, effect: UiEffect) -> Self {
        Self {
            reply: Some(text.into()),
            effects: vec![effect],
        }
    }

    /// An effect with no reply (short-circuits the reply pipeline)
    pub fn silent(effect: UiEffect) -> Self {
        Self {
            reply: None,
            effects: vec![effect],
        }
    }

    /// The fallback reply for unmatched transcripts
    pub fn fallback() -> Self {
        Self::reply(FALLBACK_REPLY)
    }
}

/// A keyword rule: fires when the lowercased transcript contains every keyword
pub(super) struct ReplyRule {
    /// Rule name for logging
    pub(super) name: &'static str,
    /// Keywords that must all be present
    pub(super) keywords: &'static [&'static str],
    /// Function building the outcome
    pub(super) builder: fn(&UiPreferences) -> DispatchOutcome,
}

/// Dispatcher mapping transcripts to canned replies and effects
pub struct IntentDispatcher {
    rules: Vec<ReplyRule>,
}

impl fmt::Debug for IntentDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentDispatcher")
            .field("rule_count", &self.rules.len())
            .finish()
    }
}

impl IntentDispatcher {
    /// Create a dispatcher with the built-in rule table
    pub fn new() -> Self {
        Self {
            rules: rules::build_rules(),
        }
    }

    /// Dispatch a transcript against the rule table
    ///
    /// Case-insensitive; deterministic for a given (transcript, prefs)
    /// except the wall-clock "time" rule.
    pub fn dispatch(&self, transcript: &str, prefs: &UiPreferences) -> DispatchOutcome {
        let lower = transcript.to_lowercase();

        for rule in &self.rules {
            if rule.keywords.iter().all(|kw| lower.contains(kw)) {
                let outcome = (rule.builder)(prefs);
                debug!(
                    rule = rule.name,
                    effects = outcome.effects.len(),
                    has_reply = outcome.reply.is_some(),
                    "Matched intent rule"
                );
                return outcome;
            }
        }

        debug!("No rule matched, using fallback reply");
        DispatchOutcome::fallback()
    }
}

impl Default for IntentDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
