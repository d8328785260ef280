use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{scoring::compute_wpm, typing_policy::CharStatus};

/// Source of monotonic time for a session.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// State shared by both timer variants.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    started_at: Option<Instant>,
    finished: bool,
    finished_elapsed: f64,
}

/// Round timer: count up for word-count rounds, count down for timed rounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Timer {
    CountUp(Span),
    CountDown { span: Span, budget_secs: f64 },
}

impl Timer {
    pub fn count_up() -> Self {
        Timer::CountUp(Span::default())
    }

    pub fn count_down(budget_secs: u32) -> Self {
        Timer::CountDown {
            span: Span::default(),
            budget_secs: budget_secs as f64,
        }
    }

    fn span(&self) -> &Span {
        match self {
            Timer::CountUp(span) | Timer::CountDown { span, .. } => span,
        }
    }

    fn span_mut(&mut self) -> &mut Span {
        match self {
            Timer::CountUp(span) | Timer::CountDown { span, .. } => span,
        }
    }

    /// Record the start time. Only the first call has any effect.
    pub fn start(&mut self, now: Instant) {
        let span = self.span_mut();
        if span.started_at.is_none() {
            span.started_at = Some(now);
            debug!("timer started");
        }
    }

    pub fn is_started(&self) -> bool {
        self.span().started_at.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.is_started() && !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.span().finished
    }

    /// Stop the timer and score `status`.
    ///
    /// Returns the WPM on the first call and `None` on every later one.
    pub fn stop(&mut self, now: Instant, status: &[CharStatus]) -> Option<f64> {
        if self.is_finished() {
            return None;
        }

        let elapsed = self.elapsed_secs(now);
        let seconds = match self {
            Timer::CountUp(_) => elapsed,
            Timer::CountDown { budget_secs, .. } => *budget_secs,
        };

        let span = self.span_mut();
        span.finished = true;
        span.finished_elapsed = elapsed;

        Some(compute_wpm(status, seconds))
    }

    /// Seconds since start, frozen once the timer has stopped.
    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        let span = self.span();
        if span.finished {
            return span.finished_elapsed;
        }
        span.started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn budget_secs(&self) -> Option<f64> {
        match self {
            Timer::CountUp(_) => None,
            Timer::CountDown { budget_secs, .. } => Some(*budget_secs),
        }
    }

    /// Seconds left in a countdown, never below zero.
    pub fn remaining_secs(&self, now: Instant) -> Option<f64> {
        self.budget_secs()
            .map(|budget| (budget - self.elapsed_secs(now)).max(0.0))
    }

    /// Share of a countdown still left. Not clamped: it drops below zero once
    /// the budget is overrun and a tick has not yet stopped the round.
    pub fn remaining_fraction(&self, now: Instant) -> Option<f64> {
        self.budget_secs()
            .map(|budget| (budget - self.elapsed_secs(now)) / budget)
    }

    /// Whether a started countdown has used up its budget.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.budget_secs() {
            Some(budget) => self.is_started() && self.elapsed_secs(now) >= budget,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CharStatus::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_new_timers_are_idle() {
        for timer in [Timer::count_up(), Timer::count_down(30)] {
            assert!(!timer.is_started());
            assert!(!timer.is_active());
            assert!(!timer.is_finished());
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let clock = ManualClock::new();
        let mut timer = Timer::count_up();

        timer.start(clock.now());
        clock.advance_secs(2.0);
        timer.start(clock.now());
        clock.advance_secs(1.0);

        assert!(timer.is_active());
        assert!(approx_eq(timer.elapsed_secs(clock.now()), 3.0));
    }

    #[test]
    fn test_elapsed_before_start_is_zero() {
        let clock = ManualClock::new();
        let timer = Timer::count_down(10);

        clock.advance_secs(5.0);
        assert_eq!(timer.elapsed_secs(clock.now()), 0.0);
        assert_eq!(timer.remaining_fraction(clock.now()), Some(1.0));
        assert!(!timer.is_expired(clock.now()));
    }

    #[test]
    fn test_count_up_scores_on_elapsed_time() {
        let clock = ManualClock::new();
        let mut timer = Timer::count_up();
        timer.start(clock.now());
        clock.advance_secs(6.0);

        let wpm = timer.stop(clock.now(), &[Correct; 10]).unwrap();
        assert!(approx_eq(wpm, 20.0));
        assert!(timer.is_finished());
        assert!(!timer.is_active());
    }

    #[test]
    fn test_count_down_scores_on_budget() {
        let clock = ManualClock::new();
        let mut timer = Timer::count_down(60);
        timer.start(clock.now());
        clock.advance_secs(61.5);

        let wpm = timer.stop(clock.now(), &[Correct; 10]).unwrap();
        assert!(approx_eq(wpm, 2.0));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let clock = ManualClock::new();
        let mut timer = Timer::count_up();
        timer.start(clock.now());
        clock.advance_secs(1.0);

        assert!(timer.stop(clock.now(), &[Correct; 5]).is_some());
        clock.advance_secs(10.0);
        assert_eq!(timer.stop(clock.now(), &[Correct; 50]), None);
        assert!(approx_eq(timer.elapsed_secs(clock.now()), 1.0));
    }

    #[test]
    fn test_remaining_values() {
        let clock = ManualClock::new();
        let mut timer = Timer::count_down(20);
        timer.start(clock.now());
        clock.advance_secs(5.0);

        assert!(approx_eq(timer.remaining_secs(clock.now()).unwrap(), 15.0));
        assert!(approx_eq(timer.remaining_fraction(clock.now()).unwrap(), 0.75));

        clock.advance_secs(25.0);
        assert_eq!(timer.remaining_secs(clock.now()), Some(0.0));
        assert!(timer.remaining_fraction(clock.now()).unwrap() < 0.0);
    }

    #[test]
    fn test_count_up_has_no_budget() {
        let clock = ManualClock::new();
        let mut timer = Timer::count_up();
        timer.start(clock.now());
        clock.advance_secs(1000.0);

        assert_eq!(timer.budget_secs(), None);
        assert_eq!(timer.remaining_secs(clock.now()), None);
        assert_eq!(timer.remaining_fraction(clock.now()), None);
        assert!(!timer.is_expired(clock.now()));
    }

    #[test]
    fn test_expiry_boundary() {
        let clock = ManualClock::new();
        let mut timer = Timer::count_down(30);
        timer.start(clock.now());

        clock.advance(Duration::from_millis(29_900));
        assert!(!timer.is_expired(clock.now()));
        clock.advance(Duration::from_millis(100));
        assert!(timer.is_expired(clock.now()));
    }
}
