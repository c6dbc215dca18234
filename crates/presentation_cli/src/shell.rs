//! Interactive terminal shell
//!
//! Renders the transcript panel and wires keyboard commands to session
//! events.

use std::sync::Arc;
use std::time::Duration;

use application::session::{SessionEvent, SessionService};
use domain::Speaker;
use speech::{RecognitionErrorCode, ScriptedRecognizer, SpeechError, SpeechRecognizer, TypedRecognizer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const RESET: &str = "\x1b[0m";
const DARK_PANEL: &str = "\x1b[97;40m";
const LIGHT_PANEL: &str = "\x1b[30;47m";

/// Where utterances come from
#[derive(Debug)]
pub enum VoiceInput {
    /// Interactive: `say <text>` delivers an utterance
    Typed(TypedRecognizer),
    /// Playback: each mic toggle consumes the next scripted line
    Scripted(ScriptedRecognizer),
}

impl VoiceInput {
    /// The recognizer to hand to the session's input adapter
    pub fn recognizer(&self) -> Arc<dyn SpeechRecognizer> {
        match self {
            Self::Typed(recognizer) => Arc::new(recognizer.clone()),
            Self::Scripted(recognizer) => Arc::new(recognizer.clone()),
        }
    }
}

/// The interactive shell loop
#[derive(Debug)]
pub struct Shell {
    service: Arc<SessionService>,
    input: VoiceInput,
}

impl Shell {
    /// Create a shell over a running session service
    pub fn new(service: Arc<SessionService>, input: VoiceInput) -> Self {
        Self { service, input }
    }

    /// Run until the user quits or stdin closes
    pub async fn run(self) -> anyhow::Result<()> {
        println!("\u{1f3a4} VoxShell - say `help` for commands");
        self.render().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            let (command, rest) = match line.split_once(' ') {
                Some((command, rest)) => (command, rest.trim()),
                None => (line, ""),
            };

            match command {
                "" | "log" => {},
                "m" | "mic" => {
                    let _ = self.service.sender().send(SessionEvent::MicToggled);
                },
                "say" => self.submit_utterance(rest),
                "fail" => self.inject_failure(rest),
                "t" | "theme" => {
                    let _ = self.service.sender().send(SessionEvent::ThemeToggled);
                },
                "help" | "?" => {
                    print_help();
                    continue;
                },
                "q" | "quit" | "exit" => break,
                unknown => {
                    println!("Unknown command: {unknown} (try `help`)");
                    continue;
                },
            }

            // Let the event loop catch up before redrawing.
            tokio::time::sleep(Duration::from_millis(150)).await;
            self.render().await;
        }

        debug!("Shell loop finished");
        Ok(())
    }

    fn submit_utterance(&self, text: &str) {
        match &self.input {
            VoiceInput::Typed(recognizer) => match recognizer.submit(text) {
                Ok(()) => {},
                Err(SpeechError::NotActive) => {
                    println!("Not listening - toggle the mic first (`mic`)");
                },
                Err(err) => println!("Could not submit utterance: {err}"),
            },
            VoiceInput::Scripted(_) => {
                println!("Running a script - `say` is only available without --script");
            },
        }
    }

    fn inject_failure(&self, code: &str) {
        match &self.input {
            VoiceInput::Typed(recognizer) => {
                let code = if code.is_empty() { "aborted" } else { code };
                match recognizer.fail(RecognitionErrorCode::from_code(code)) {
                    Ok(()) => {},
                    Err(SpeechError::NotActive) => {
                        println!("Not listening - toggle the mic first (`mic`)");
                    },
                    Err(err) => println!("Could not inject failure: {err}"),
                }
            },
            VoiceInput::Scripted(_) => {
                println!("Running a script - `fail` is only available without --script");
            },
        }
    }

    async fn render(&self) {
        let prefs = self.service.preferences();
        let panel = if prefs.dark_mode {
            DARK_PANEL
        } else {
            LIGHT_PANEL
        };

        println!();
        println!("{panel} \u{1f4dd} Transcript {RESET}");
        let transcript = self.service.transcript();
        if transcript.is_empty() {
            println!("  (empty)");
        }
        for turn in &transcript {
            match turn.speaker {
                Speaker::User => println!("  \x1b[1m{}\x1b[22m: {}", turn.speaker, turn.text),
                Speaker::Assistant => println!("  {}: {}", turn.speaker, turn.text),
            }
        }

        let mic = if self.service.is_listening() {
            "\u{1f3a4} Listening..."
        } else {
            "\u{1f3a4} Click the mic to speak (`mic`)"
        };
        let mode = if prefs.dark_mode { "dark" } else { "light" };
        let synth = if self.service.synthesis_available().await {
            ""
        } else {
            " | voice output unavailable"
        };
        print!("{mic} | {mode} mode | font {}{synth}", prefs.font_scale);
        if let VoiceInput::Scripted(recognizer) = &self.input {
            print!(" | {} scripted utterance(s) left", recognizer.remaining());
        }
        println!();
    }
}

fn print_help() {
    println!("Commands:");
    println!("  mic            toggle the microphone (m)");
    println!("  say <text>     deliver an utterance while listening");
    println!("  fail [code]    end the listening session with an engine error");
    println!("  theme          toggle dark mode directly (t)");
    println!("  log            redraw the transcript panel");
    println!("  quit           leave the shell (q)");
}
