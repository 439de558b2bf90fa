//! # bstguess - Base Stat Total guessing game
//!
//! A small terminal game: a random Pokémon is fetched from PokéAPI and the
//! player guesses the sum of its six base stats. Correct guesses build a
//! streak; the best streak is kept on disk between runs.
//!
//! ## Features
//!
//! - **Live data**: one PokéAPI request per round, artwork URL shown alongside the name.
//! - **Streaks**: current and best streak, best persisted to `<data_dir>/bstguess/streak.json`.
//! - **Paced rounds**: feedback stays up for a configurable delay before the next creature loads.
//! - **Race-free loop**: one event loop, round tokens discard stale fetches and timers.
//! - **Pluggable display**: anything implementing [`game::Presenter`] can render a session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bstguess::config::Config;
//! use bstguess::game::{GameRunner, PokeApiClient, TerminalPresenter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("config.toml").await?;
//!     let source = Arc::new(PokeApiClient::new(config.api.clone(), config.game.max_creature_id));
//!     let mut runner = GameRunner::new(&config, source, Box::new(TerminalPresenter::stdout()));
//!     runner.attach_input(std::io::stdin());
//!     runner.run().await
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - Fetcher, scorer, session controller, presenter and event loop
//! - [`storage`] - Best streak persistence
//! - [`config`] - Configuration loading and defaults
//! - [`validation`] - Guess parsing
//! - [`logutil`] - Log previews of player input

pub mod config;
pub mod game;
pub mod logutil;
pub mod storage;
pub mod validation;
