use crate::{config::Config, session::Mode};

pub const TIME_LIMITS: [u32; 5] = [15, 30, 60, 90, 120];
pub const WORD_LIMITS: [u32; 5] = [15, 30, 50, 60, 100];

/// The three selectable fields, in Tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    GameMode,
    TimeLimit,
    WordLimit,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::GameMode, Field::TimeLimit, Field::WordLimit];

    pub fn title(&self) -> &'static str {
        match self {
            Field::GameMode => "Game Mode",
            Field::TimeLimit => "Time Limit",
            Field::WordLimit => "Word Limit",
        }
    }

    pub fn options(&self) -> Vec<String> {
        match self {
            Field::GameMode => vec!["Time Limit".into(), "Word Limit".into()],
            Field::TimeLimit => TIME_LIMITS.iter().map(u32::to_string).collect(),
            Field::WordLimit => WORD_LIMITS.iter().map(u32::to_string).collect(),
        }
    }
}

/// Selection state behind the settings tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    active: usize,
    mode: Mode,
    time_idx: usize,
    word_idx: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Settings {
    /// Preselect the stored values. Values outside the presets fall back to
    /// the closest preset.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            active: 0,
            mode: cfg.mode,
            time_idx: closest(&TIME_LIMITS, cfg.time_limit_secs),
            word_idx: closest(&WORD_LIMITS, cfg.word_count),
        }
    }

    pub fn to_config(&self) -> Config {
        Config {
            mode: self.mode,
            word_count: WORD_LIMITS[self.word_idx],
            time_limit_secs: TIME_LIMITS[self.time_idx],
        }
    }

    pub fn active(&self) -> Field {
        Field::ALL[self.active]
    }

    /// Index of the selected option for `field`.
    pub fn selected(&self, field: Field) -> usize {
        match field {
            Field::GameMode => match self.mode {
                Mode::Countdown => 0,
                Mode::WordCount => 1,
            },
            Field::TimeLimit => self.time_idx,
            Field::WordLimit => self.word_idx,
        }
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % Field::ALL.len();
    }

    pub fn next_option(&mut self) {
        self.step_option(1);
    }

    pub fn previous_option(&mut self) {
        self.step_option(-1);
    }

    fn step_option(&mut self, delta: isize) {
        match self.active() {
            Field::GameMode => {
                self.mode = match self.mode {
                    Mode::Countdown => Mode::WordCount,
                    Mode::WordCount => Mode::Countdown,
                }
            }
            Field::TimeLimit => self.time_idx = wrap(self.time_idx, delta, TIME_LIMITS.len()),
            Field::WordLimit => self.word_idx = wrap(self.word_idx, delta, WORD_LIMITS.len()),
        }
    }
}

fn wrap(idx: usize, delta: isize, len: usize) -> usize {
    (idx as isize + delta).rem_euclid(len as isize) as usize
}

fn closest(presets: &[u32], value: u32) -> usize {
    presets
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.abs_diff(value))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
