//! Win streak bookkeeping.
//!
//! `best` only ever grows and always covers `current`. The persisted copy of
//! `best` lives in [`crate::storage::StreakStore`]; this type is the in-memory
//! half and never touches disk itself.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakState {
    pub current: u32,
    pub best: u32,
}

impl StreakState {
    /// Start a session with a best streak read from storage.
    pub fn with_best(best: u32) -> Self {
        Self { current: 0, best }
    }

    /// Count a correct guess. Returns `true` when this set a new best.
    pub fn record_correct(&mut self) -> bool {
        self.current = self.current.saturating_add(1);
        if self.current > self.best {
            self.best = self.current;
            true
        } else {
            false
        }
    }

    /// Count a wrong guess or a give-up.
    pub fn record_miss(&mut self) {
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_below_best_keeps_best() {
        let mut s = StreakState { current: 0, best: 5 };
        assert!(!s.record_correct());
        assert_eq!(s, StreakState { current: 1, best: 5 });
    }

    #[test]
    fn correct_past_best_raises_best() {
        let mut s = StreakState { current: 6, best: 5 };
        assert!(s.record_correct());
        assert_eq!(s, StreakState { current: 7, best: 7 });
    }

    #[test]
    fn miss_resets_current_only() {
        let mut s = StreakState { current: 4, best: 9 };
        s.record_miss();
        assert_eq!(s, StreakState { current: 0, best: 9 });
    }

    #[test]
    fn best_covers_current_over_mixed_sequence() {
        let mut s = StreakState::with_best(2);
        let mut last_best = s.best;
        let pattern = [true, true, true, false, true, false, false, true, true, true, true];
        for correct in pattern {
            if correct {
                s.record_correct();
            } else {
                s.record_miss();
            }
            assert!(s.best >= s.current);
            assert!(s.best >= last_best);
            last_best = s.best;
        }
        assert_eq!(s.best, 4);
        assert_eq!(s.current, 4);
    }
}
