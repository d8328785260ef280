use tracing::debug;

/// A keystroke token accepted by the matcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CharStatus {
    #[default]
    Unmatched,
    Correct,
    Incorrect,
}

/// Which rule a keystroke triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Content exhausted, or backspace at the start.
    Ignored,
    /// An ordinary character was scored and the cursor advanced.
    Typed { correct: bool },
    /// The separator after a word was typed.
    BoundaryMatched,
    /// A non-space key was pressed where a separator was expected.
    Overflowed,
    /// The previous position was cleared and the cursor moved back.
    Retreated,
    /// One of several overflow keystrokes was removed.
    OverflowShrunk,
    /// The last overflow keystroke was removed.
    OverflowCleared,
}

impl Transition {
    /// Whether this keystroke should start the round's timer.
    pub fn starts_timer(&self) -> bool {
        matches!(self, Transition::Typed { .. })
    }
}

/// Cursor and per-character status over a fixed piece of content.
///
/// Positions before the cursor are scored, positions at or after it are
/// unmatched. Overflow briefly breaks that: while the user types past the end
/// of a word the cursor stays on the separator and the last letter of the word
/// is flagged instead.
#[derive(Clone, Debug, PartialEq)]
pub struct Matcher {
    content: Vec<char>,
    status: Vec<CharStatus>,
    cursor: usize,
    overflow: usize,
}

impl Matcher {
    pub fn new(content: &str) -> Self {
        let content: Vec<char> = content.chars().collect();
        Self {
            status: vec![CharStatus::Unmatched; content.len()],
            content,
            cursor: 0,
            overflow: 0,
        }
    }

    pub fn apply(&mut self, key: Key) -> Transition {
        let transition = match key {
            Key::Backspace => self.backspace(),
            Key::Char(c) => self.write(c),
        };
        debug!(?key, ?transition, cursor = self.cursor, overflow = self.overflow);
        transition
    }

    fn backspace(&mut self) -> Transition {
        if self.cursor == 0 {
            return Transition::Ignored;
        }

        match self.overflow {
            1 => {
                // the stray keystroke is gone; the word and its separator count as typed
                self.overflow = 0;
                self.status[self.cursor] = CharStatus::Correct;
                self.status[self.cursor - 1] = CharStatus::Correct;
                Transition::OverflowCleared
            }
            n if n > 1 => {
                self.overflow -= 1;
                self.status[self.cursor] = CharStatus::Incorrect;
                Transition::OverflowShrunk
            }
            _ => {
                self.status[self.cursor - 1] = CharStatus::Unmatched;
                self.cursor -= 1;
                Transition::Retreated
            }
        }
    }

    fn write(&mut self, c: char) -> Transition {
        let Some(&expected) = self.content.get(self.cursor) else {
            return Transition::Ignored;
        };

        if expected == ' ' {
            if c == ' ' {
                self.status[self.cursor] = CharStatus::Correct;
                self.cursor += 1;
                self.overflow = 0;
                Transition::BoundaryMatched
            } else {
                self.overflow += 1;
                if let Some(prev) = self.cursor.checked_sub(1) {
                    self.status[prev] = CharStatus::Incorrect;
                }
                Transition::Overflowed
            }
        } else {
            let correct = c == expected;
            self.status[self.cursor] = if correct {
                CharStatus::Correct
            } else {
                CharStatus::Incorrect
            };
            self.cursor += 1;
            Transition::Typed { correct }
        }
    }

    pub fn content(&self) -> &[char] {
        &self.content
    }

    pub fn status(&self) -> &[CharStatus] {
        &self.status
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
