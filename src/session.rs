use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    corpus::Corpus,
    error::SessionError,
    timer::{Clock, SystemClock, Timer},
    typing_policy::{CharStatus, Key, Matcher},
    word_generator::WordGenerator,
};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// type a fixed number of words, measure the time taken
    #[strum(to_string = "words")]
    #[value(name = "words")]
    WordCount,
    /// type as much as possible before the time runs out
    #[strum(to_string = "countdown")]
    Countdown,
}

/// Validated parameters for a round: a word count or a number of seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    mode: Mode,
    target: u32,
}

impl SessionConfig {
    pub fn new(mode: Mode, target: u32) -> Result<Self, SessionError> {
        if target == 0 {
            warn!(%mode, "rejecting zero target");
            return Err(SessionError::InvalidTarget(target));
        }
        Ok(Self { mode, target })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn target(&self) -> u32 {
        self.target
    }
}

/// One attempt at the exercise, from generated content to final score.
///
/// A new round always builds a new session; nothing is reset in place.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    config: SessionConfig,
    matcher: Matcher,
    timer: Timer,
    final_score: Option<f64>,
    clock: C,
}

impl Session<SystemClock> {
    pub fn new<R: Rng + ?Sized>(
        config: SessionConfig,
        corpus: &Corpus,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        Self::with_clock(config, corpus, rng, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock<R: Rng + ?Sized>(
        config: SessionConfig,
        corpus: &Corpus,
        rng: &mut R,
        clock: C,
    ) -> Result<Self, SessionError> {
        debug!(corpus = corpus.name(), words = corpus.len(), "generating content");
        let content = WordGenerator::new(corpus).generate(&config, rng);
        Self::from_content(config, content, clock)
    }

    /// Build a session over fixed content instead of generated words.
    pub fn from_content(
        config: SessionConfig,
        content: impl Into<String>,
        clock: C,
    ) -> Result<Self, SessionError> {
        let content = content.into();
        if content.is_empty() {
            return Err(SessionError::EmptyContent);
        }

        let timer = match config.mode() {
            Mode::WordCount => Timer::count_up(),
            Mode::Countdown => Timer::count_down(config.target()),
        };
        info!(
            mode = %config.mode(),
            target = config.target(),
            chars = content.chars().count(),
            "new session"
        );

        Ok(Self {
            config,
            matcher: Matcher::new(&content),
            timer,
            final_score: None,
            clock,
        })
    }

    /// Feed one keystroke. Ignored once the round is finished.
    pub fn handle_key(&mut self, key: Key) {
        if self.is_finished() {
            return;
        }

        let transition = self.matcher.apply(key);
        if transition.starts_timer() {
            self.timer.start(self.clock.now());
        }
        self.check_completion();
    }

    /// Re-evaluate time-based completion. Called on every host tick.
    pub fn on_tick(&mut self) {
        if !self.is_finished() {
            self.check_completion();
        }
    }

    fn check_completion(&mut self) {
        let done = match self.config.mode() {
            Mode::Countdown => self.timer.is_expired(self.clock.now()),
            // the trailing separator is never typed
            Mode::WordCount => self.matcher.cursor() >= self.matcher.len() - 1,
        };
        if done {
            self.stop();
        }
    }

    /// Stop the timer and record the score. Only the first call scores.
    pub fn stop(&mut self) {
        if let Some(wpm) = self.timer.stop(self.clock.now(), self.matcher.status()) {
            self.final_score = Some(wpm);
            info!(
                mode = %self.config.mode(),
                wpm,
                elapsed = self.timer.elapsed_secs(self.clock.now()),
                "session finished"
            );
        }
    }

    pub fn mode(&self) -> Mode {
        self.config.mode()
    }

    pub fn target(&self) -> u32 {
        self.config.target()
    }

    pub fn content(&self) -> &[char] {
        self.matcher.content()
    }

    pub fn content_string(&self) -> String {
        self.matcher.content().iter().collect()
    }

    pub fn status(&self) -> &[CharStatus] {
        self.matcher.status()
    }

    pub fn cursor(&self) -> usize {
        self.matcher.cursor()
    }

    pub fn overflow(&self) -> usize {
        self.matcher.overflow()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }

    pub fn final_score(&self) -> Option<f64> {
        self.final_score
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.timer.elapsed_secs(self.clock.now())
    }

    pub fn remaining_secs(&self) -> Option<f64> {
        self.timer.remaining_secs(self.clock.now())
    }

    pub fn remaining_fraction(&self) -> Option<f64> {
        self.timer.remaining_fraction(self.clock.now())
    }
}
