//! # Game Core Module
//!
//! One round of the game: fetch a random creature, have the player guess its
//! base stat total, update the streak, pause on the feedback, repeat.
//!
//! ## Components
//!
//! - [`fetcher`] - PokéAPI client behind the [`fetcher::CreatureSource`] trait
//! - [`scorer`] - Base stat total
//! - [`streak`] - Current/best streak bookkeeping
//! - [`session`] - Round lifecycle and guess handling
//! - [`presenter`] - Display trait plus terminal and recording implementations
//! - [`timer`] - Cancellable delayed round advance
//! - [`commands`] - Input line parsing
//! - [`runner`] - Event loop wiring stdin to the session
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bstguess::config::Config;
//! use bstguess::game::{GameRunner, PokeApiClient, TerminalPresenter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let source = Arc::new(PokeApiClient::new(config.api.clone(), config.game.max_creature_id));
//!     let mut runner = GameRunner::new(&config, source, Box::new(TerminalPresenter::stdout()));
//!     runner.attach_input(std::io::stdin());
//!     runner.run().await
//! }
//! ```

pub mod commands;
pub mod errors;
pub mod events;
pub mod fetcher;
pub mod presenter;
pub mod runner;
pub mod scorer;
pub mod session;
pub mod streak;
pub mod timer;

pub use errors::{FetchError, ValidationError};
pub use events::{GameEvent, RoundToken};
pub use fetcher::{Creature, CreatureSource, PokeApiClient, Stat};
pub use presenter::{FeedbackKind, Presenter, RecordingPresenter, TerminalPresenter};
pub use runner::GameRunner;
pub use session::{Flow, GameSession, GuessOutcome, Phase, RoundStart, RoundState};
pub use streak::StreakState;
