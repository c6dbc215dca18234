//! The built-in reply rule table

use chrono::Local;
use domain::UiEffect;

use super::{DispatchOutcome, GREETING_REPLY, NAME_REPLY, ReplyRule, TIME_REPLY_PREFIX};

/// Build the ordered rule table; first match wins
pub(super) fn build_rules() -> Vec<ReplyRule> {
    vec![
        ReplyRule {
            name: "greeting",
            keywords: &["hello"],
            builder: |_prefs| DispatchOutcome::reply(GREETING_REPLY),
        },
        ReplyRule {
            name: "time",
            keywords: &["time"],
            builder: |_prefs| DispatchOutcome::reply(current_time_reply()),
        },
        ReplyRule {
            name: "name",
            keywords: &["name"],
            builder: |_prefs| DispatchOutcome::reply(NAME_REPLY),
        },
        ReplyRule {
            name: "switch-theme",
            keywords: &["switch", "theme"],
            builder: |prefs| {
                let target = if prefs.dark_mode { "light" } else { "dark" };
                DispatchOutcome::reply_with_effect(
                    format!("Okay, switching to {target} mode."),
                    UiEffect::ToggleDarkMode,
                )
            },
        },
        ReplyRule {
            name: "clear-chat",
            keywords: &["clear", "chat"],
            builder: |_prefs| DispatchOutcome::silent(UiEffect::ClearLog),
        },
        ReplyRule {
            name: "increase-font",
            keywords: &["increase", "font"],
            builder: |_prefs| {
                DispatchOutcome::reply_with_effect(
                    "Okay, making the text bigger.",
                    UiEffect::IncreaseFontScale,
                )
            },
        },
        ReplyRule {
            name: "decrease-font",
            keywords: &["decrease", "font"],
            builder: |_prefs| {
                DispatchOutcome::reply_with_effect(
                    "Okay, making the text smaller.",
                    UiEffect::DecreaseFontScale,
                )
            },
        },
    ]
}

/// The wall-clock reply, formatted as a time of day
fn current_time_reply() -> String {
    let now = Local::now().format("%-I:%M:%S %p");
    format!("{TIME_REPLY_PREFIX}{now}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table_order_matches_priority() {
        let names: Vec<&str> = build_rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "greeting",
                "time",
                "name",
                "switch-theme",
                "clear-chat",
                "increase-font",
                "decrease-font",
            ]
        );
    }

    #[test]
    fn time_reply_has_meridiem() {
        let reply = current_time_reply();
        assert!(reply.ends_with("AM") || reply.ends_with("PM"));
    }

    #[test]
    fn multi_keyword_rules_require_every_keyword() {
        for rule in build_rules() {
            assert!(!rule.keywords.is_empty());
            for keyword in rule.keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }
}
