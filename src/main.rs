use anyhow::{bail, Context, Result};
use clap::Parser;
use ratatui::{backend::TermionBackend, Terminal};
use std::fs::File;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use termion::input::MouseTerminal;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;
use tracing::{info, warn};

use linepick::config::Config;
use linepick::editor::engine::Engine;
use linepick::input::InputHandler;
use linepick::menu::history::History;
use linepick::menu::{Menu, Outcome};
use linepick::theme::get_builtin_theme;
use linepick::ui::UI;

/// linepick - Pick a line from standard input interactively
#[derive(Parser)]
#[command(name = "linepick")]
#[command(version)]
#[command(about = "Pick a line from standard input interactively", long_about = None)]
struct Cli {
    /// Show at most this many results
    #[arg(short, long)]
    limit: Option<usize>,

    /// Initial input
    #[arg(short, long, default_value = "")]
    input: String,

    /// Complete only up to the next occurrence of this separator
    #[arg(long)]
    completion_sep: Option<String>,

    /// Keep input history under this key
    #[arg(long)]
    history_key: Option<String>,

    /// Allow accepting the typed input instead of a result
    #[arg(long)]
    accept_input: bool,

    /// Word delimiter characters for word erase and pattern cycling
    #[arg(short, long)]
    delimiters: Option<String>,

    /// Theme name (default: from config, else default-dark)
    #[arg(short, long)]
    theme: Option<String>,

    /// Write debug logs
    #[arg(short = 'D', long)]
    debug: bool,

    /// Log file (implies logging)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Set up a panic hook that restores the terminal before displaying panic information.
///
/// The UI is drawn on /dev/tty, so that is where the terminal is restored.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if let Ok(mut tty) = File::options().write(true).open("/dev/tty") {
            let _ = write!(tty, "{}", termion::screen::ToMainScreen);
            let _ = write!(tty, "{}", termion::cursor::Show);
            let _ = tty.flush();
        }

        default_panic(panic_info);
    }));
}

/// Reads candidate lines from standard input.
fn read_lines() -> Result<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No input: pipe the lines to choose from into linepick");
    }
    stdin
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("Failed to read lines from stdin")
}

fn setup_logging(cli: &Cli, config: &Config) -> Result<()> {
    let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
    let log_file = match (log_file, cli.debug) {
        (Some(path), _) => path,
        (None, true) => dirs::data_dir()
            .map(|dir| dir.join("linepick").join("linepick.log"))
            .context("Could not determine a log file location")?,
        (None, false) => return Ok(()),
    };
    let level = if cli.debug {
        "debug"
    } else {
        config.log_level.as_str()
    };
    linepick::logging::init(&log_file, level)
}

fn open_history(key: Option<&str>, config: &Config) -> History {
    let (Some(key), Some(path)) = (key, config.history_path()) else {
        return History::disabled();
    };
    History::open(&path, key).unwrap_or_else(|e| {
        warn!("History disabled: {:#}", e);
        History::disabled()
    })
}

fn main() -> Result<ExitCode> {
    setup_panic_hook();

    let cli = Cli::parse();
    // Logging is configured from the file, so a bad file is reported on stderr
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}, using defaults", e);
        Config::default()
    });
    setup_logging(&cli, &config)?;

    // Read candidates BEFORE terminal setup
    let lines = read_lines()?;
    info!("read {} lines", lines.len());

    // CLI overrides config
    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = match get_builtin_theme(theme_name) {
        Some(theme) => theme,
        None => {
            eprintln!(
                "Warning: Theme '{}' not found, using default-dark",
                theme_name
            );
            Default::default()
        }
    };
    let delimiters = cli
        .delimiters
        .as_deref()
        .map(|d| d.chars().collect())
        .unwrap_or_else(|| config.delimiters());

    let menu = Menu::new(lines)
        .with_limit(cli.limit.or(config.limit))
        .with_completion_sep(cli.completion_sep.clone().or(config.completion_sep.clone()))
        .with_accept_input(cli.accept_input || config.accept_input)
        .with_history(open_history(cli.history_key.as_deref(), &config));

    let mut engine = Engine::new(menu, config.bindings()).with_delimiters(delimiters);
    let ui = UI::new(theme);

    let outcome = run(&ui, &mut engine, &cli.input)?;

    match outcome {
        Outcome::Selected(value) | Outcome::Input(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Dismissed => Ok(ExitCode::FAILURE),
    }
}

/// Runs the widget on /dev/tty until it produces an outcome.
///
/// Standard output stays free for the result. The terminal is restored when
/// this returns, through the Drop guards of the raw and alternate screens.
fn run(ui: &UI, engine: &mut Engine<Menu>, input: &str) -> Result<Outcome> {
    let tty = File::options()
        .write(true)
        .open("/dev/tty")
        .context("Failed to open /dev/tty for drawing")?;
    let tty = tty.into_raw_mode().context("Failed to enable raw mode")?;
    let tty = MouseTerminal::from(tty);
    let tty = tty
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;

    let backend = TermionBackend::new(tty);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut input_handler = InputHandler::new_with_tty()?;
    engine.start(input);

    let result = run_event_loop(&mut terminal, ui, &mut input_handler, engine);

    write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
    terminal.backend_mut().flush()?;

    result
}

fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ui: &UI,
    input_handler: &mut InputHandler,
    engine: &mut Engine<Menu>,
) -> Result<Outcome> {
    loop {
        ui.render(terminal, engine)?;

        let Some(event) = input_handler.poll_event(Duration::from_millis(100))? else {
            // Terminal closed
            return Ok(Outcome::Dismissed);
        };
        input_handler.handle_event(event, engine);

        if let Some(outcome) = engine.backend_mut().take_outcome() {
            return Ok(outcome);
        }
    }
}
