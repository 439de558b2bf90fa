use std::time::{Duration, Instant};

mod common;
use common::{bulbasaur, creature, harness};

use bstguess::game::presenter::PresenterEvent;
use bstguess::game::session::INVALID_GUESS_MESSAGE;
use bstguess::game::{
    FeedbackKind, FetchError, GameEvent, GuessOutcome, Phase, RoundStart, RoundToken, StreakState,
};

const DELAY: Duration = Duration::from_millis(60);

#[tokio::test]
async fn correct_guess_below_best_keeps_best_and_advances_after_delay() {
    let mut h = harness(5, DELAY);
    h.load(bulbasaur()).await;
    assert_eq!(h.session.phase(), Phase::Displayed);
    assert_eq!(h.session.round().map(|r| r.target_total), Some(318));

    let guessed_at = Instant::now();
    let outcome = h.session.submit_guess("318");
    assert_eq!(
        outcome,
        GuessOutcome::Correct {
            total: 318,
            new_best: false
        }
    );
    assert_eq!(h.session.streak(), StreakState { current: 1, best: 5 });
    assert_eq!(
        h.presenter.last_feedback(),
        Some(("🎉 Correct! BST: 318".to_string(), FeedbackKind::Correct))
    );
    assert_eq!(h.presenter.last_streak(), Some((1, 5)));
    assert_eq!(h.session.phase(), Phase::FeedbackShown);
    let token = h.session.current_token();
    assert_eq!(h.session.pending_advance(), Some(token));

    // Best was not beaten, so nothing new on disk
    assert_eq!(h.store.load_best(), 5);

    let event = h.next_event().await;
    assert!(guessed_at.elapsed() >= DELAY, "advanced too early");
    assert!(matches!(event, GameEvent::Advance(t) if t == token));

    h.source.push(Ok(creature("ivysaur", [60, 62, 63, 80, 80, 60])));
    h.session.handle_event(event);
    assert_eq!(h.session.phase(), Phase::Loading);
    assert!(h.session.current_token() > token);
    h.pump().await;
    assert_eq!(h.session.phase(), Phase::Displayed);
    assert_eq!(h.session.round().map(|r| r.target_total), Some(405));
}

#[tokio::test]
async fn new_best_is_persisted_as_streak_grows() {
    let mut h = harness(2, Duration::from_millis(5));
    for round in 1..=4u32 {
        h.load(bulbasaur()).await;
        let outcome = h.session.submit_guess("318");
        assert_eq!(
            outcome,
            GuessOutcome::Correct {
                total: 318,
                new_best: round > 2
            }
        );
        // Let the advance fire; the next load() starts its own round
        let event = h.next_event().await;
        assert!(matches!(event, GameEvent::Advance(_)));
    }
    assert_eq!(h.session.streak(), StreakState { current: 4, best: 4 });
    assert_eq!(h.store.load_best(), 4);
}

#[tokio::test]
async fn invalid_guesses_change_nothing_and_schedule_nothing() {
    let mut h = harness(3, Duration::from_millis(20));
    h.load(bulbasaur()).await;
    h.session.submit_guess("318");
    h.pump().await; // advance
    h.pump().await; // 503 from the empty script -> stalled
    h.load(bulbasaur()).await;
    assert_eq!(h.session.phase(), Phase::Displayed);
    let before = h.session.streak();
    assert_eq!(before.current, 1);

    for bad in ["abc", "", "3.5.2"] {
        let outcome = h.session.submit_guess(bad);
        assert!(matches!(outcome, GuessOutcome::Invalid(_)), "{:?}", bad);
        assert_eq!(h.session.streak(), before);
        assert_eq!(h.session.phase(), Phase::Displayed);
        assert_eq!(h.session.pending_advance(), None);
        assert_eq!(
            h.presenter.last_feedback(),
            Some((INVALID_GUESS_MESSAGE.to_string(), FeedbackKind::Incorrect))
        );
    }
    assert!(h.quiet_for(Duration::from_millis(80)).await);

    // Still answerable after the validation message
    assert!(matches!(
        h.session.submit_guess("318"),
        GuessOutcome::Correct { .. }
    ));
}

#[tokio::test]
async fn wrong_guess_resets_current_streak() {
    let mut h = harness(0, Duration::from_millis(5));
    for _ in 0..2 {
        h.load(bulbasaur()).await;
        h.session.submit_guess("318");
        h.next_event().await;
    }
    assert_eq!(h.session.streak(), StreakState { current: 2, best: 2 });

    h.load(bulbasaur()).await;
    let outcome = h.session.submit_guess("317");
    assert_eq!(
        outcome,
        GuessOutcome::Incorrect {
            guess: 317,
            total: 318
        }
    );
    assert_eq!(h.session.streak(), StreakState { current: 0, best: 2 });
    assert_eq!(
        h.presenter.last_feedback(),
        Some(("❌ Wrong! The BST was 318".to_string(), FeedbackKind::Incorrect))
    );
    assert!(h.session.pending_advance().is_some());
}

#[tokio::test]
async fn give_up_reveals_total_without_wrong_framing() {
    let mut h = harness(4, DELAY);
    h.load(creature("weakling", [20, 20, 20, 20, 20, 20])).await;

    let outcome = h.session.give_up();
    assert_eq!(outcome, GuessOutcome::GaveUp { total: 120 });
    let (message, kind) = h.presenter.last_feedback().unwrap();
    assert!(message.contains("120"));
    assert!(!message.contains("Wrong"));
    assert_eq!(kind, FeedbackKind::Incorrect);
    assert_eq!(h.session.streak(), StreakState { current: 0, best: 4 });
    assert_eq!(h.session.phase(), Phase::FeedbackShown);

    let event = h.next_event().await;
    assert!(matches!(event, GameEvent::Advance(_)));
}

#[tokio::test]
async fn answers_during_feedback_window_are_ignored() {
    let mut h = harness(0, DELAY);
    h.load(bulbasaur()).await;
    h.session.submit_guess("318");
    let after_first = h.session.streak();

    assert_eq!(h.session.submit_guess("318"), GuessOutcome::Ignored);
    assert_eq!(h.session.submit_guess("1"), GuessOutcome::Ignored);
    assert_eq!(h.session.give_up(), GuessOutcome::Ignored);
    assert_eq!(h.session.streak(), after_first);
    assert!(!h.session.request_next());
    assert!(matches!(
        h.presenter.events().last(),
        Some(PresenterEvent::Notice(_))
    ));
}

#[tokio::test]
async fn answers_while_loading_are_ignored() {
    let mut h = harness(0, DELAY);
    h.session.start_round();
    assert_eq!(h.session.phase(), Phase::Loading);
    assert_eq!(h.session.submit_guess("318"), GuessOutcome::Ignored);
    assert_eq!(h.session.give_up(), GuessOutcome::Ignored);
    assert_eq!(h.session.streak(), StreakState::default());
}

#[tokio::test]
async fn fetch_failure_leaves_previous_round_on_screen() {
    let mut h = harness(0, Duration::from_millis(5));
    h.load(bulbasaur()).await;
    h.session.submit_guess("318");

    h.source.push(Err(FetchError::Status(500)));
    h.pump().await; // advance -> start_round
    let events_before = h.presenter.events().len();
    let event = h.next_event().await;
    let (token, result) = match event {
        GameEvent::Fetched { token, result } => (token, result),
        other => panic!("expected fetch result, got {:?}", other),
    };
    assert_eq!(h.session.finish_round(token, result), RoundStart::Failed);

    assert_eq!(h.session.phase(), Phase::Stalled);
    assert_eq!(h.session.round().map(|r| r.target_total), Some(318));
    assert_eq!(h.session.creature().map(|c| c.name.as_str()), Some("bulbasaur"));
    assert_eq!(h.presenter.entities_shown(), vec!["bulbasaur".to_string()]);
    // Only a notice was added; no entity, feedback or clear
    let added: Vec<_> = h.presenter.events().split_off(events_before);
    assert_eq!(added.len(), 1);
    assert!(matches!(added[0], PresenterEvent::Notice(_)));

    // A guess has nothing to count against
    assert_eq!(h.session.submit_guess("318"), GuessOutcome::Ignored);
    assert_eq!(h.session.streak().current, 1);

    // The player can retry by hand
    h.source.push(Ok(creature("ivysaur", [60, 62, 63, 80, 80, 60])));
    assert!(h.session.request_next());
    h.pump().await;
    assert_eq!(h.session.phase(), Phase::Displayed);
    assert_eq!(h.session.round().map(|r| r.target_total), Some(405));
}

#[tokio::test]
async fn stale_fetch_result_is_discarded() {
    let mut h = harness(0, DELAY);
    h.source.push_delayed(
        Duration::from_millis(150),
        Ok(creature("slowpoke", [90, 65, 65, 40, 40, 15])),
    );
    h.source.push(Ok(bulbasaur()));

    let first = h.session.start_round();
    // Let the first fetch claim the slow response before the retry starts
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(h.session.request_next());
    let second = h.session.current_token();
    assert!(second > first);

    h.pump().await;
    assert_eq!(h.session.phase(), Phase::Displayed);
    assert_eq!(h.session.round().map(|r| r.target_total), Some(318));

    let late = h.next_event().await;
    let (token, result) = match late {
        GameEvent::Fetched { token, result } => (token, result),
        other => panic!("expected fetch result, got {:?}", other),
    };
    assert_eq!(token, first);
    assert_eq!(h.session.finish_round(token, result), RoundStart::Stale);
    assert_eq!(h.presenter.entities_shown(), vec!["bulbasaur".to_string()]);
    assert_eq!(h.session.round().map(|r| r.target_total), Some(318));
    assert_eq!(h.source.calls(), 2);
}

#[tokio::test]
async fn stale_advance_does_not_start_a_round() {
    let mut h = harness(0, DELAY);
    h.load(bulbasaur()).await;
    h.session.give_up();
    let token = h.session.current_token();

    assert!(!h.session.handle_advance(RoundToken(token.0 + 7)));
    assert_eq!(h.session.phase(), Phase::FeedbackShown);
    assert!(h.session.handle_advance(token));
    assert_eq!(h.session.phase(), Phase::Loading);
    // The real timer for `token` was cancelled by the round start above
    assert_eq!(h.session.pending_advance(), None);
}

#[tokio::test]
async fn next_is_refused_while_a_creature_is_displayed() {
    let mut h = harness(0, DELAY);
    h.load(bulbasaur()).await;
    let token = h.session.current_token();
    assert!(!h.session.request_next());
    assert_eq!(h.session.current_token(), token);
    assert_eq!(h.session.phase(), Phase::Displayed);
}

#[tokio::test]
async fn best_never_drops_below_current_over_mixed_play() {
    let mut h = harness(1, Duration::from_millis(2));
    let script = ["318", "318", "1", "318", "giveup", "318", "318", "318", "x", "318"];
    let mut last_best = h.session.streak().best;
    for answer in script {
        h.load(bulbasaur()).await;
        let outcome = if answer == "giveup" {
            h.session.give_up()
        } else {
            h.session.submit_guess(answer)
        };
        let s = h.session.streak();
        assert!(s.best >= s.current, "{:?} after {:?}", s, outcome);
        assert!(s.best >= last_best);
        last_best = s.best;
        if !matches!(outcome, GuessOutcome::Invalid(_)) {
            h.next_event().await;
        }
    }
    assert_eq!(h.session.streak(), StreakState { current: 4, best: 4 });
    assert_eq!(h.store.load_best(), 4);
}

#[tokio::test]
async fn oversized_integer_is_a_wrong_guess() {
    let mut h = harness(0, DELAY);
    h.load(bulbasaur()).await;
    let outcome = h.session.submit_guess("99999999999999999999");
    assert_eq!(
        outcome,
        GuessOutcome::Incorrect {
            guess: i64::MAX,
            total: 318
        }
    );
    assert_eq!(
        h.presenter.last_feedback(),
        Some(("❌ Wrong! The BST was 318".to_string(), FeedbackKind::Incorrect))
    );
    assert!(h.session.pending_advance().is_some());
}
