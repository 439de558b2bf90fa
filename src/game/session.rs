//! # Game Session
//!
//! Owns the round and streak state for one player and drives the round
//! lifecycle:
//!
//! ```text
//! Idle ─start_round─▶ Loading ─fetch ok─▶ Displayed ─guess/give up─▶ FeedbackShown
//!                        │                   │  ▲                          │
//!                  fetch failed              └──┘ invalid guess            │
//!                        ▼                                                 │
//!                     Stalled ◀── next ──▶ Loading ◀──── delay elapsed ────┘
//! ```
//!
//! Guesses and give-ups only count in `Displayed`; anywhere else they are
//! answered with a notice and leave the streak alone. Fetches run on spawned
//! tasks and report back as [`GameEvent::Fetched`]; each carries the
//! [`RoundToken`] of the round that started it, and only the newest round's
//! result is applied.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::commands::{Command, HELP_TEXT};
use super::errors::{FetchError, ValidationError};
use super::events::{GameEvent, RoundToken};
use super::fetcher::{Creature, CreatureSource};
use super::presenter::{FeedbackKind, Presenter};
use super::streak::StreakState;
use super::timer::RoundTimer;
use crate::logutil::preview_input;
use crate::storage::StreakStore;
use crate::validation::parse_guess;

pub const INVALID_GUESS_MESSAGE: &str = "Please enter a valid number!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Displayed,
    FeedbackShown,
    /// The last fetch failed; whatever was on screen is still there.
    Stalled,
}

/// Target for the creature currently (or most recently) on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub target_total: u32,
    pub displayed: bool,
}

/// What a guess or give-up did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { total: u32, new_best: bool },
    Incorrect { guess: i64, total: u32 },
    GaveUp { total: u32 },
    /// Not an integer; nothing changed.
    Invalid(ValidationError),
    /// No round was accepting answers.
    Ignored,
}

/// How a fetch completion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStart {
    Displayed,
    Failed,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct GameSession {
    source: Arc<dyn CreatureSource>,
    presenter: Box<dyn Presenter>,
    store: StreakStore,
    timer: RoundTimer,
    events: mpsc::UnboundedSender<GameEvent>,
    feedback_delay: Duration,
    streak: StreakState,
    round: Option<RoundState>,
    creature: Option<Creature>,
    phase: Phase,
    token: RoundToken,
}

impl GameSession {
    /// Create a session; the best streak is read from `store` right away.
    pub fn new(
        source: Arc<dyn CreatureSource>,
        mut presenter: Box<dyn Presenter>,
        store: StreakStore,
        feedback_delay: Duration,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let streak = StreakState::with_best(store.load_best());
        info!("Session ready (best streak {})", streak.best);
        presenter.update_streak_display(streak.current, streak.best);
        Self {
            source,
            presenter,
            store,
            timer: RoundTimer::new(events.clone()),
            events,
            feedback_delay,
            streak,
            round: None,
            creature: None,
            phase: Phase::Idle,
            token: RoundToken::default(),
        }
    }

    pub fn streak(&self) -> StreakState {
        self.streak
    }

    pub fn round(&self) -> Option<RoundState> {
        self.round
    }

    pub fn creature(&self) -> Option<&Creature> {
        self.creature.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_token(&self) -> RoundToken {
        self.token
    }

    /// Token of the scheduled next round, if the feedback delay is running.
    pub fn pending_advance(&self) -> Option<RoundToken> {
        self.timer.pending()
    }

    /// Begin loading a new creature.
    ///
    /// Cancels any pending advance, supersedes any fetch still in flight, and
    /// spawns the fetch. The result comes back as [`GameEvent::Fetched`].
    pub fn start_round(&mut self) -> RoundToken {
        self.timer.cancel();
        self.token = self.token.next();
        self.phase = Phase::Loading;
        if let Some(round) = self.round.as_mut() {
            round.displayed = false;
        }

        let token = self.token;
        let source = Arc::clone(&self.source);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_random().await;
            let _ = tx.send(GameEvent::Fetched { token, result });
        });
        debug!("Round {:?} loading", token);
        token
    }

    /// Apply a finished fetch.
    pub fn finish_round(
        &mut self,
        token: RoundToken,
        result: Result<Creature, FetchError>,
    ) -> RoundStart {
        if token != self.token || self.phase != Phase::Loading {
            debug!(
                "Discarding fetch result for {:?} (current {:?}, {:?})",
                token, self.token, self.phase
            );
            return RoundStart::Stale;
        }

        match result {
            Ok(creature) => {
                let total = creature.base_stat_total();
                debug!("Current BST: {}", total);
                self.round = Some(RoundState {
                    target_total: total,
                    displayed: true,
                });
                self.presenter.clear_feedback();
                self.presenter.show_entity(&creature.name, &creature.image_url);
                self.creature = Some(creature);
                self.phase = Phase::Displayed;
                RoundStart::Displayed
            }
            Err(e) => {
                warn!("Error fetching creature: {}", e);
                self.phase = Phase::Stalled;
                self.presenter
                    .show_notice("Couldn't load a new creature. Type 'next' to try again.");
                RoundStart::Failed
            }
        }
    }

    /// Check a guess against the current target.
    pub fn submit_guess(&mut self, raw_input: &str) -> GuessOutcome {
        let round = match self.answerable_round() {
            Some(r) => r,
            None => return GuessOutcome::Ignored,
        };

        let guess = match parse_guess(raw_input) {
            Ok(g) => g,
            Err(e) => {
                debug!("Rejected guess \"{}\"", preview_input(raw_input));
                self.presenter
                    .show_feedback(INVALID_GUESS_MESSAGE, FeedbackKind::Incorrect);
                return GuessOutcome::Invalid(e);
            }
        };

        let total = round.target_total;
        if guess == total as i64 {
            let new_best = self.streak.record_correct();
            if new_best {
                self.persist_best();
            }
            self.presenter
                .update_streak_display(self.streak.current, self.streak.best);
            self.presenter
                .show_feedback(&format!("🎉 Correct! BST: {}", total), FeedbackKind::Correct);
            self.schedule_next_round();
            GuessOutcome::Correct { total, new_best }
        } else {
            self.streak.record_miss();
            self.presenter
                .update_streak_display(self.streak.current, self.streak.best);
            self.presenter.show_feedback(
                &format!("❌ Wrong! The BST was {}", total),
                FeedbackKind::Incorrect,
            );
            self.schedule_next_round();
            GuessOutcome::Incorrect { guess, total }
        }
    }

    /// Reveal the total, reset the streak and move on.
    pub fn give_up(&mut self) -> GuessOutcome {
        let round = match self.answerable_round() {
            Some(r) => r,
            None => return GuessOutcome::Ignored,
        };
        let total = round.target_total;
        self.streak.record_miss();
        self.presenter
            .update_streak_display(self.streak.current, self.streak.best);
        self.presenter
            .show_feedback(&format!("The BST was {}", total), FeedbackKind::Incorrect);
        self.schedule_next_round();
        GuessOutcome::GaveUp { total }
    }

    /// Player asked for a new creature. Only honored when none is on screen.
    pub fn request_next(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::Stalled | Phase::Loading => {
                self.start_round();
                true
            }
            Phase::Displayed => {
                self.presenter
                    .show_notice("Finish this one first: guess or type 'giveup'.");
                false
            }
            Phase::FeedbackShown => {
                self.presenter.show_notice("The next creature is on its way.");
                false
            }
        }
    }

    /// The feedback delay for `token` elapsed.
    pub fn handle_advance(&mut self, token: RoundToken) -> bool {
        if token == self.token && self.phase == Phase::FeedbackShown {
            self.start_round();
            true
        } else {
            debug!("Ignoring stale advance for {:?}", token);
            false
        }
    }

    pub fn handle_event(&mut self, event: GameEvent) -> Flow {
        match event {
            GameEvent::Input(line) => return self.handle_command(Command::parse(&line)),
            GameEvent::Fetched { token, result } => {
                self.finish_round(token, result);
            }
            GameEvent::Advance(token) => {
                self.handle_advance(token);
            }
            GameEvent::InputClosed => return Flow::Quit,
        }
        Flow::Continue
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Guess(raw) => {
                self.submit_guess(&raw);
            }
            Command::GiveUp => {
                self.give_up();
            }
            Command::Next => {
                self.request_next();
            }
            Command::Help => self.presenter.show_notice(HELP_TEXT),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// The round accepting answers, or `None` after telling the player why not.
    fn answerable_round(&mut self) -> Option<RoundState> {
        let notice = match (self.phase, self.round) {
            (Phase::Displayed, Some(round)) => return Some(round),
            (Phase::Loading, _) => "Still loading the next creature...",
            (Phase::FeedbackShown, _) => "The next creature is on its way.",
            _ => "No creature on screen. Type 'next' to load one.",
        };
        debug!("Ignoring answer in {:?}", self.phase);
        self.presenter.show_notice(notice);
        None
    }

    fn schedule_next_round(&mut self) {
        self.phase = Phase::FeedbackShown;
        self.timer.schedule(self.feedback_delay, self.token);
    }

    fn persist_best(&self) {
        let best = self.streak.best;
        match self.store.save_best(best) {
            Ok(()) => info!("New best streak: {}", best),
            Err(e) => warn!("streak: failed to persist best streak {}: {}", best, e),
        }
    }
}
