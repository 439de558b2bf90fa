//! Delayed round advance.
//!
//! After feedback is shown the next round starts on a timer. [`RoundTimer`]
//! holds at most one pending advance: scheduling replaces it and starting a
//! round early cancels it, so a stale timer can never start an extra round.

use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::events::{GameEvent, RoundToken};

pub struct RoundTimer {
    tx: mpsc::UnboundedSender<GameEvent>,
    pending: Option<(RoundToken, JoinHandle<()>)>,
}

impl RoundTimer {
    pub fn new(tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { tx, pending: None }
    }

    /// After `delay`, enqueue [`GameEvent::Advance`] for `token`.
    pub fn schedule(&mut self, delay: Duration, token: RoundToken) {
        self.cancel();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(GameEvent::Advance(token));
        });
        debug!("Next round for {:?} scheduled in {:?}", token, delay);
        self.pending = Some((token, handle));
    }

    /// Abort the pending advance. Returns `true` if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some((token, handle)) => {
                let waiting = !handle.is_finished();
                handle.abort();
                if waiting {
                    debug!("Cancelled pending advance for {:?}", token);
                }
                waiting
            }
            None => false,
        }
    }

    /// Token of the advance still waiting to fire, if any.
    pub fn pending(&self) -> Option<RoundToken> {
        match &self.pending {
            Some((token, handle)) if !handle.is_finished() => Some(*token),
            _ => None,
        }
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.pending.take() {
            handle.abort();
        }
    }
}
