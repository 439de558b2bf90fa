use super::errors::FetchError;
use super::fetcher::Creature;

/// Identifies one round start. Results and timers tagged with an older token
/// belong to a round that has since been replaced and are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundToken(pub u64);

impl RoundToken {
    pub fn next(self) -> Self {
        RoundToken(self.0.wrapping_add(1))
    }
}

/// Everything the runner loop feeds into the session.
#[derive(Debug)]
pub enum GameEvent {
    /// One submitted line of player input.
    Input(String),
    /// A fetch started by the round with `token` finished.
    Fetched {
        token: RoundToken,
        result: Result<Creature, FetchError>,
    },
    /// The feedback delay scheduled by the round with this token elapsed.
    Advance(RoundToken),
    /// The input stream ended.
    InputClosed,
}
