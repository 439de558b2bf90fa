//! Display side of the game.
//!
//! A [`Presenter`] owns a fixed set of display regions: the creature name and
//! artwork, the streak counters, and a feedback line with a correct/incorrect
//! style. It only projects what the session tells it; it holds no game state.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Visual category of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

/// Rendering target for a game session.
pub trait Presenter: Send {
    /// Show a freshly loaded creature. `name` is the raw lowercase API name.
    fn show_entity(&mut self, name: &str, image_url: &str);
    fn show_feedback(&mut self, message: &str, kind: FeedbackKind);
    fn update_streak_display(&mut self, current: u32, best: u32);
    fn clear_feedback(&mut self);
    /// Informational text outside the feedback region (help, ignored input).
    fn show_notice(&mut self, message: &str);
}

/// Capitalize the first letter of an API name for display: `mr-mime` -> `Mr-mime`.
pub fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Line-oriented presenter for a terminal.
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
    color: bool,
    feedback_visible: bool,
}

impl TerminalPresenter<std::io::Stdout> {
    /// Presenter on stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), atty::is(atty::Stream::Stdout))
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            feedback_visible: false,
        }
    }

    /// Whether a feedback line is showing for the current creature.
    pub fn feedback_visible(&self) -> bool {
        self.feedback_visible
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn show_entity(&mut self, name: &str, image_url: &str) {
        let shown = display_name(name);
        let title = self.paint(BOLD, &shown);
        self.line("────────────────────────────────────────");
        self.line(&format!("  {}", title));
        self.line(&format!("  [{}] {}", shown, image_url));
        self.line("Guess the base stat total (or type 'giveup'):");
    }

    fn show_feedback(&mut self, message: &str, kind: FeedbackKind) {
        let code = match kind {
            FeedbackKind::Correct => GREEN,
            FeedbackKind::Incorrect => RED,
        };
        let painted = self.paint(code, message);
        self.line(&painted);
        self.feedback_visible = true;
    }

    fn update_streak_display(&mut self, current: u32, best: u32) {
        self.line(&format!("  Streak: {}   Best: {}", current, best));
    }

    fn clear_feedback(&mut self) {
        // Terminal output is append-only; just forget the old feedback
        self.feedback_visible = false;
    }

    fn show_notice(&mut self, message: &str) {
        self.line(message);
    }
}

/// One presenter call, as captured by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Entity { name: String, image_url: String },
    Feedback { message: String, kind: FeedbackKind },
    Streak { current: u32, best: u32 },
    ClearFeedback,
    Notice(String),
}

/// Presenter that records every call; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Arc<Mutex<Vec<PresenterEvent>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Most recent feedback message and its category.
    pub fn last_feedback(&self) -> Option<(String, FeedbackKind)> {
        self.events().into_iter().rev().find_map(|e| match e {
            PresenterEvent::Feedback { message, kind } => Some((message, kind)),
            _ => None,
        })
    }

    pub fn last_streak(&self) -> Option<(u32, u32)> {
        self.events().into_iter().rev().find_map(|e| match e {
            PresenterEvent::Streak { current, best } => Some((current, best)),
            _ => None,
        })
    }

    pub fn entities_shown(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PresenterEvent::Entity { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut g) = self.events.lock() {
            g.clear();
        }
    }

    fn push(&self, event: PresenterEvent) {
        if let Ok(mut g) = self.events.lock() {
            g.push(event);
        }
    }
}

impl Presenter for RecordingPresenter {
    fn show_entity(&mut self, name: &str, image_url: &str) {
        self.push(PresenterEvent::Entity {
            name: name.to_string(),
            image_url: image_url.to_string(),
        });
    }

    fn show_feedback(&mut self, message: &str, kind: FeedbackKind) {
        self.push(PresenterEvent::Feedback {
            message: message.to_string(),
            kind,
        });
    }

    fn update_streak_display(&mut self, current: u32, best: u32) {
        self.push(PresenterEvent::Streak { current, best });
    }

    fn clear_feedback(&mut self) {
        self.push(PresenterEvent::ClearFeedback);
    }

    fn show_notice(&mut self, message: &str) {
        self.push(PresenterEvent::Notice(message.to_string()));
    }
}
