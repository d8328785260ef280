mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use typetick::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    corpus::Corpus,
    logging,
    runtime::{typing_key, CrosstermEventSource, FixedTicker, Runner, SessionEvent},
    settings::Settings,
    Mode, Session, SessionError, TICK_RATE_MS,
};

/// terminal typing-speed trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a fixed number of words against the clock, or as many words as possible before a countdown runs out, and get your words per minute."
)]
pub struct Cli {
    /// kind of round to start with (defaults to the saved setting)
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// number of words in a word round
    #[clap(short = 'w', long = "words")]
    number_of_words: Option<u32>,

    /// number of seconds in a countdown round
    #[clap(short = 's', long = "secs")]
    number_of_secs: Option<u32>,

    /// seed for word selection, for repeatable rounds
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Override the stored settings with whatever was passed on the command line
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if let Some(words) = self.number_of_words {
            cfg.word_count = words;
        }
        if let Some(secs) = self.number_of_secs {
            cfg.time_limit_secs = secs;
        }
        cfg
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Typing,
    Settings,
    Help,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Typing, Tab::Settings, Tab::Help];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Typing => "Typing",
            Tab::Settings => "Settings",
            Tab::Help => "Help",
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn previous(&self) -> Tab {
        Tab::ALL[self.index().saturating_sub(1)]
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1).min(Tab::ALL.len() - 1)]
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub session: Session,
    pub settings: Settings,
    pub tab: Tab,
    round: Config,
    corpus: Corpus,
    rng: StdRng,
    store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(
        round: Config,
        corpus: Corpus,
        mut rng: StdRng,
        store: Box<dyn ConfigStore>,
    ) -> Result<Self, SessionError> {
        let session = Session::new(round.session_config()?, &corpus, &mut rng)?;

        Ok(Self {
            session,
            settings: Settings::from_config(&round),
            tab: Tab::Typing,
            round,
            corpus,
            rng,
            store,
        })
    }

    /// Replace the current session with a fresh one
    fn start_round(&mut self) -> Result<(), SessionError> {
        self.session = Session::new(self.round.session_config()?, &self.corpus, &mut self.rng)?;
        Ok(())
    }

    fn apply_settings(&mut self) -> Result<(), SessionError> {
        self.round = self.settings.to_config();
        self.start_round()
    }

    fn on_key(&mut self, key: KeyEvent) -> Result<Flow, SessionError> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Char('c') if ctrl => return Ok(Flow::Quit),
            KeyCode::Char('r') if ctrl => self.start_round()?,
            KeyCode::Left => self.tab = self.tab.previous(),
            KeyCode::Right => self.tab = self.tab.next(),
            KeyCode::Enter => {
                self.start_round()?;
                self.tab = Tab::Typing;
                if let Err(err) = self.store.save(&self.round) {
                    tracing::warn!(%err, "unable to save settings");
                }
            }
            _ => match self.tab {
                Tab::Typing => {
                    if let Some(k) = typing_key(&key) {
                        self.session.handle_key(k);
                    }
                }
                Tab::Settings => match key.code {
                    KeyCode::Tab => self.settings.next_field(),
                    KeyCode::Down => {
                        self.settings.next_option();
                        self.apply_settings()?;
                    }
                    KeyCode::Up => {
                        self.settings.previous_option();
                        self.apply_settings()?;
                    }
                    _ => {}
                },
                Tab::Help => {}
            },
        }

        Ok(Flow::Continue)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = AppDirs::log_dir().and_then(|dir| logging::init(&dir));

    let store = FileConfigStore::new();
    let round = cli.apply(store.load());
    let mut app = App::new(round, Corpus::builtin()?, cli.rng(), Box::new(store))?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            SessionEvent::Tick => {
                // redraw while the clock is visibly moving, and once more when it stops
                let was_active = app.session.is_active();
                app.session.on_tick();
                if was_active {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            SessionEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            SessionEvent::Key(key) => {
                if app.on_key(key)? == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
