//! Test utilities & fixtures.
//! A scripted creature source and a harness that drives a `GameSession`
//! against a temp data dir and a recording presenter.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use bstguess::game::{
    Creature, CreatureSource, FetchError, GameEvent, GameSession, RecordingPresenter, Stat,
};
use bstguess::storage::StreakStore;

const STAT_NAMES: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

/// Build a creature with the six given base stats.
pub fn creature(name: &str, values: [u32; 6]) -> Creature {
    Creature {
        id: 1,
        name: name.to_string(),
        stats: STAT_NAMES
            .iter()
            .zip(values)
            .map(|(n, v)| Stat {
                name: n.to_string(),
                value: v,
            })
            .collect(),
        image_url: format!("https://img.example/{}.png", name),
    }
}

/// BST 318
pub fn bulbasaur() -> Creature {
    creature("bulbasaur", [45, 49, 49, 65, 65, 45])
}

/// Source that replays queued results in order; answers 503 when empty.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<(Duration, Result<Creature, FetchError>)>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, result: Result<Creature, FetchError>) {
        self.push_delayed(Duration::ZERO, result);
    }

    pub fn push_delayed(&self, delay: Duration, result: Result<Creature, FetchError>) {
        self.responses.lock().unwrap().push_back((delay, result));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CreatureSource for ScriptedSource {
    async fn fetch(&self, _id: u32) -> Result<Creature, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(FetchError::Status(503)),
        }
    }
}

pub struct Harness {
    pub session: GameSession,
    pub rx: mpsc::UnboundedReceiver<GameEvent>,
    pub presenter: RecordingPresenter,
    pub source: Arc<ScriptedSource>,
    pub store: StreakStore,
    pub delay: Duration,
    _tmp: tempfile::TempDir,
}

/// Session with a fresh data dir whose persisted best streak is `best`.
pub fn harness(best: u32, delay: Duration) -> Harness {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = StreakStore::new(tmp.path().to_str().unwrap());
    if best > 0 {
        store.save_best(best).expect("seed best streak");
    }
    let source = Arc::new(ScriptedSource::new());
    let presenter = RecordingPresenter::new();
    let (tx, rx) = mpsc::unbounded_channel();
    let session = GameSession::new(
        source.clone(),
        Box::new(presenter.clone()),
        store.clone(),
        delay,
        tx,
    );
    Harness {
        session,
        rx,
        presenter,
        source,
        store,
        delay,
        _tmp: tmp,
    }
}

impl Harness {
    /// Wait (bounded) for the next event without applying it.
    pub async fn next_event(&mut self) -> GameEvent {
        tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .expect("timeout waiting for game event")
            .expect("event channel closed")
    }

    /// Wait for the next event and apply it to the session.
    pub async fn pump(&mut self) {
        let event = self.next_event().await;
        self.session.handle_event(event);
    }

    /// Queue `creature`, start a round and apply its fetch result.
    pub async fn load(&mut self, creature: Creature) {
        self.source.push(Ok(creature));
        self.session.start_round();
        self.pump().await;
    }

    /// True if no event shows up within `wait`.
    pub async fn quiet_for(&mut self, wait: Duration) -> bool {
        tokio::time::timeout(wait, self.rx.recv()).await.is_err()
    }
}
