use rand::Rng;

use crate::{
    corpus::Corpus,
    session::{Mode, SessionConfig},
};

/// Words generated for a countdown round, independent of its duration.
pub const COUNTDOWN_POOL_WORDS: usize = 300;

/// A word-count round breaks the line after this many words.
pub const WORDS_PER_LINE: usize = 15;

/// Builds the target text for a round from a corpus and an injected rng.
pub struct WordGenerator<'a> {
    corpus: &'a Corpus,
}

impl<'a> WordGenerator<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Generate the content for a round.
    ///
    /// Every word is followed by a separator, including the last one.
    pub fn generate<R: Rng + ?Sized>(&self, config: &SessionConfig, rng: &mut R) -> String {
        match config.mode() {
            Mode::WordCount => self.generate_words(config.target() as usize, rng),
            Mode::Countdown => self.generate_pool(rng),
        }
    }

    fn generate_words<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> String {
        let mut content = String::new();
        for i in 1..=count {
            content.push_str(self.pick(rng));
            content.push(if i % WORDS_PER_LINE == 0 { '\n' } else { ' ' });
        }
        content
    }

    fn generate_pool<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut content = String::new();
        for _ in 0..COUNTDOWN_POOL_WORDS {
            content.push_str(self.pick(rng));
            content.push(' ');
        }
        content
    }

    // Corpus guarantees at least one word.
    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a str {
        let words = self.corpus.words();
        &words[rng.gen_range(0..words.len())]
    }
}
