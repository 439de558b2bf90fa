//! Event loop tying the session to real input.
//!
//! Everything that can change the game arrives on one unbounded channel:
//! input lines from a reader thread, fetch completions and timer expiries from
//! the session's own tasks. The loop applies them one at a time, so the
//! session never needs a lock.
//!
//! Input is read on a plain OS thread, not `tokio::io::stdin`: a pending read
//! on the blocking pool cannot be cancelled and would hold up runtime shutdown
//! after `quit`.

use anyhow::Result;
use log::{info, warn};
use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::mpsc;

use super::events::GameEvent;
use super::fetcher::CreatureSource;
use super::presenter::Presenter;
use super::session::{Flow, GameSession};
use crate::config::Config;
use crate::storage::StreakStore;

pub struct GameRunner {
    session: GameSession,
    tx: mpsc::UnboundedSender<GameEvent>,
    rx: mpsc::UnboundedReceiver<GameEvent>,
}

impl GameRunner {
    pub fn new(
        config: &Config,
        source: Arc<dyn CreatureSource>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = StreakStore::new(&config.storage.data_dir);
        let session = GameSession::new(
            source,
            presenter,
            store,
            config.game.feedback_delay(),
            tx.clone(),
        );
        Self { session, tx, rx }
    }

    /// Sender for injecting events (input lines, in practice).
    pub fn sender(&self) -> mpsc::UnboundedSender<GameEvent> {
        self.tx.clone()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Forward lines from `reader` into this runner.
    pub fn attach_input<R>(&self, reader: R) -> JoinHandle<()>
    where
        R: Read + Send + 'static,
    {
        spawn_line_reader(reader, self.sender())
    }

    /// Start the first round and process events until quit or end of input.
    pub async fn run(&mut self) -> Result<()> {
        self.session.start_round();
        while let Some(event) = self.rx.recv().await {
            if self.session.handle_event(event) == Flow::Quit {
                break;
            }
        }
        let streak = self.session.streak();
        info!(
            "Game over (streak {}, best {})",
            streak.current, streak.best
        );
        Ok(())
    }
}

/// Spawn a thread sending each line of `reader` as [`GameEvent::Input`], then
/// [`GameEvent::InputClosed`] at end of input.
///
/// The thread stops on its own once the receiver is gone; nobody has to join
/// it, so a reader parked on a terminal never holds up shutdown.
pub fn spawn_line_reader<R>(reader: R, tx: mpsc::UnboundedSender<GameEvent>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            match line {
                Ok(line) => {
                    if tx.send(GameEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("Input read error: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(GameEvent::InputClosed);
    })
}
