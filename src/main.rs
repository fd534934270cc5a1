use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{error, info};
use typerush::{
    app::{Action, App},
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    error::BankError,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    sentence_bank::{RandomPicker, SentenceBank, SentenceSet, SequentialPicker},
    session::MAX_DURATION_SECS,
    typing_session::TypingSession,
};

/// sixty second typing speed test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the sentence on screen before the countdown runs out. Reports words per minute, accuracy and elapsed time."
)]
pub struct Cli {
    /// number of seconds on the countdown (default: 60, or the saved config)
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..=MAX_DURATION_SECS as i64))]
    seconds: Option<u32>,

    /// built-in sentence set to draw from
    #[clap(short = 'l', long, value_enum)]
    sentence_set: Option<SentenceSet>,

    /// read sentences from a text file, one per line
    #[clap(short = 'f', long)]
    sentences_file: Option<PathBuf>,

    /// type this exact sentence instead of a random one
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// seed for sentence selection, for repeatable runs
    #[clap(long, conflicts_with = "sequential")]
    seed: Option<u64>,

    /// walk the sentences in order instead of picking at random
    #[clap(long)]
    sequential: bool,

    /// store --seconds and --sentence-set as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlay command line flags on the saved config
    fn merge_into(&self, mut config: Config) -> Config {
        if let Some(seconds) = self.seconds {
            config.duration_secs = seconds;
        }
        if let Some(set) = self.sentence_set {
            config.sentence_set = set;
        }
        config
    }

    fn build_bank(&self, config: &Config) -> Result<SentenceBank, BankError> {
        let bank = if let Some(ref prompt) = self.prompt {
            SentenceBank::new("prompt", [prompt.as_str()])?
        } else if let Some(ref path) = self.sentences_file {
            SentenceBank::from_file(path)?
        } else {
            SentenceBank::builtin(config.sentence_set)?
        };

        Ok(if self.sequential {
            bank.with_picker(SequentialPicker::default())
        } else if let Some(seed) = self.seed {
            bank.with_picker(RandomPicker::seeded(seed))
        } else {
            bank
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    let store = FileConfigStore::new();
    let config = cli.merge_into(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = ?store.path(), "saved config");
    }

    let bank = match cli.build_bank(&config) {
        Ok(bank) => bank,
        Err(err) => {
            error!(%err, "could not load sentences");
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, err).exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(TypingSession::new(bank, SystemClock, config.duration_secs));
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let event = runner
            .step()
            .inspect_err(|_| error!("terminal event reader stopped"))?;
        if app.on_event(event) == Action::Quit {
            break;
        }
    }

    Ok(())
}
