use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use typetick::{
    corpus::Corpus,
    scoring::compute_wpm,
    timer::{ManualClock, Timer},
    CharStatus, Key, Mode, Session, SessionConfig,
};

fn corpus() -> Corpus {
    Corpus::builtin().unwrap()
}

fn type_str(session: &mut Session<ManualClock>, s: &str) {
    for c in s.chars() {
        session.handle_key(Key::Char(c));
    }
}

fn word_session(content: &str, clock: &ManualClock) -> Session<ManualClock> {
    let config = SessionConfig::new(Mode::WordCount, 2).unwrap();
    Session::from_content(config, content, clock.clone()).unwrap()
}

#[test]
fn word_count_content_has_target_tokens() {
    let corpus = corpus();
    let mut rng = StdRng::seed_from_u64(2024);

    for target in [1, 14, 15, 16, 45, 100] {
        let config = SessionConfig::new(Mode::WordCount, target).unwrap();
        let session = Session::with_clock(config, &corpus, &mut rng, ManualClock::new()).unwrap();

        let content = session.content_string();
        assert_eq!(content.split_whitespace().count(), target as usize);
        assert_eq!(session.status().len(), session.content().len());
        assert!(session.status().iter().all(|s| *s == CharStatus::Unmatched));
    }
}

#[test]
fn same_seed_and_keys_give_same_state() {
    let corpus = corpus();
    let config = SessionConfig::new(Mode::WordCount, 30).unwrap();
    let keys = "the be and of xx".chars().map(Key::Char).chain([
        Key::Backspace,
        Key::Backspace,
        Key::Char('q'),
        Key::Char(' '),
    ]);
    let keys: Vec<Key> = keys.collect();

    let run = || {
        let mut rng = StdRng::seed_from_u64(99);
        let mut session =
            Session::with_clock(config, &corpus, &mut rng, ManualClock::new()).unwrap();
        for k in &keys {
            session.handle_key(*k);
        }
        (
            session.content().to_vec(),
            session.status().to_vec(),
            session.cursor(),
        )
    };

    assert_eq!(run(), run());
}

#[test]
fn backspace_restores_only_the_previous_position() {
    let clock = ManualClock::new();
    let mut session = word_session("abc def ", &clock);
    type_str(&mut session, "ab");
    let before = session.status().to_vec();

    session.handle_key(Key::Backspace);

    assert_eq!(session.cursor(), 1);
    for (idx, (now, was)) in session.status().iter().zip(&before).enumerate() {
        if idx == 1 {
            assert_eq!(*now, CharStatus::Unmatched);
        } else {
            assert_eq!(now, was);
        }
    }
}

#[test]
fn overflow_backspaced_away_restores_separator() {
    for k in 1..=4 {
        let clock = ManualClock::new();
        let mut session = word_session("ab cd ", &clock);
        type_str(&mut session, "ab");
        type_str(&mut session, &"x".repeat(k));
        assert_eq!(session.overflow(), k);
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.status()[1], CharStatus::Incorrect);

        for _ in 0..k {
            session.handle_key(Key::Backspace);
        }

        assert_eq!(session.overflow(), 0, "k = {k}");
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.status()[1], CharStatus::Correct);
        assert_eq!(session.status()[2], CharStatus::Correct);
    }
}

#[test]
fn wpm_reference_example() {
    let mut status = vec![CharStatus::Correct; 54];
    status.extend([CharStatus::Incorrect; 6]);
    status.extend([CharStatus::Unmatched; 20]);

    assert!((compute_wpm(&status, 30.0) - 21.6).abs() < 1e-9);
}

#[test]
fn countdown_finishes_at_budget_and_scores_once() {
    let corpus = corpus();
    let clock = ManualClock::new();
    let config = SessionConfig::new(Mode::Countdown, 30).unwrap();
    let mut session =
        Session::with_clock(config, &corpus, &mut StdRng::seed_from_u64(1), clock.clone())
            .unwrap();
    assert_eq!(session.content_string().split_whitespace().count(), 300);

    let first = session.content()[0];
    session.handle_key(Key::Char(first));
    assert!(session.is_active());

    clock.advance(Duration::from_millis(29_900));
    session.on_tick();
    assert!(!session.is_finished());
    let fraction = session.remaining_fraction().unwrap();
    assert!(fraction > 0.0 && fraction < 0.01);

    clock.advance(Duration::from_millis(100));
    session.on_tick();
    assert!(session.is_finished());
    let score = session.final_score();
    // one correct character over the 30 second budget
    assert!((score.unwrap() - 0.4).abs() < 1e-9);

    clock.advance_secs(10.0);
    session.stop();
    session.on_tick();
    session.stop();
    assert_eq!(session.final_score(), score);
    assert_matches::assert_matches!(session.timer(), Timer::CountDown { .. });
}

#[test]
fn word_count_finishes_one_before_the_end() {
    let clock = ManualClock::new();
    let mut session = word_session("ab cd ", &clock);
    let last = session.content().len() - 1;

    type_str(&mut session, "ab c");
    clock.advance_secs(2.0);
    assert!(!session.is_finished());

    session.handle_key(Key::Char('d'));
    assert_eq!(session.cursor(), last);
    assert!(session.is_finished());
    assert_eq!(session.status()[last], CharStatus::Unmatched);
    assert!((session.final_score().unwrap() - 30.0).abs() < 1e-9);

    // stray keys after the finish change nothing
    session.handle_key(Key::Char(' '));
    assert_eq!(session.cursor(), last);
}

#[test]
fn word_count_last_position_reached_with_errors() {
    let clock = ManualClock::new();
    let mut session = word_session("ab cd ", &clock);

    type_str(&mut session, "xb c");
    clock.advance_secs(6.0);
    type_str(&mut session, "q");

    assert!(session.is_finished());
    // 5 scanned, 2 incorrect, 6 seconds
    assert!((session.final_score().unwrap() - 6.0).abs() < 1e-9);
}

#[test]
fn line_break_is_scored_like_a_letter() {
    let clock = ManualClock::new();
    let mut session = word_session("ab\ncd ", &clock);

    type_str(&mut session, "abx");
    assert_eq!(session.cursor(), 3);
    assert_eq!(session.overflow(), 0);
    assert_eq!(
        &session.status()[..3],
        &[CharStatus::Correct, CharStatus::Correct, CharStatus::Incorrect]
    );

    session.handle_key(Key::Backspace);
    session.handle_key(Key::Char(' '));
    assert_eq!(session.cursor(), 3);
    assert_eq!(session.status()[2], CharStatus::Incorrect);
}
