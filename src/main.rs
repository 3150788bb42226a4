use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
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
    path::PathBuf,
};
use unicode_width::UnicodeWidthStr;
use vistrace::{
    app::{App, Control},
    clock::format_clock,
    color::Rgb,
    config::{save_session_config, FigurePool, FileKvStore, SessionConfig},
    figure::Difficulty,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::{EndReason, Session, SessionError, SessionStats, StoreStatsSink},
    ui,
};

const LABEL_COLUMN: usize = 14;

/// anaglyph figure tracing for vision therapy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Trace shuffled figures with the mouse through red/cyan glasses. Each session runs for a fixed number of minutes and shows your trace over the reference after every figure."
)]
pub struct Cli {
    /// key-value store file holding configuration and results
    #[clap(long, global = true)]
    store: Option<PathBuf>,

    /// seed for figure order and placement
    #[clap(long, global = true)]
    seed: Option<u64>,

    /// log file (defaults to the state directory; filter with VISTRACE_LOG)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// write the session configuration
    Setup(SetupArgs),
    /// run a tracing session (default)
    Play,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SetupArgs {
    /// color of the reference figure (#RRGGBB, #RGB or a color name)
    #[clap(long, default_value = "#FF0000")]
    color1: Rgb,

    /// color of your trace
    #[clap(long, default_value = "#00FFFF")]
    color2: Rgb,

    /// canvas background
    #[clap(long, default_value = "white")]
    background: Rgb,

    #[clap(short, long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// session length in minutes
    #[clap(short = 'm', long, default_value_t = 10)]
    duration: u32,

    /// draw from every difficulty instead of only the chosen one
    #[clap(long)]
    all_figures: bool,
}

impl SetupArgs {
    fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            color1: self.color1,
            color2: self.color2,
            background_color: self.background,
            difficulty: self.difficulty,
            duration: self.duration,
            pool: if self.all_figures {
                FigurePool::All
            } else {
                FigurePool::Difficulty
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_file.clone());

    let store = match &cli.store {
        Some(path) => FileKvStore::with_path(path),
        None => FileKvStore::new(),
    };

    match cli.command.clone().unwrap_or(Command::Play) {
        Command::Setup(args) => {
            let config = args.to_session_config();
            if let Err(e) = save_session_config(&store, &config) {
                Cli::command().error(ErrorKind::InvalidValue, e).exit();
            }
            println!("saved session configuration to {}", store.path().display());
            Ok(())
        }
        Command::Play => play(&cli, store),
    }
}

fn play(cli: &Cli, store: FileKvStore) -> Result<(), Box<dyn Error>> {
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sink = Box::new(StoreStatsSink::new(store.clone()));
    let session = match Session::prepare(&store, sink, rng) {
        Ok(session) => session,
        Err(SessionError::Config(e)) => {
            tracing::warn!(error = %e, "cannot start session");
            eprintln!("vistrace: {e}");
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // leaving the loop any other way still counts as ending the session
    app.session.terminate(EndReason::Terminated);
    if let Some(stats) = app.session.outcome() {
        println!("{}", summary(stats));
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::seconds());
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match app.step(&runner) {
            Control::Quit => break,
            Control::Redraw => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            Control::Continue => {}
        }
    }

    Ok(())
}

fn summary(stats: &SessionStats) -> String {
    let mut lines = vec![format!(
        "session {}: {} figures traced in {}",
        stats.reason,
        stats.completed_count(),
        format_clock(stats.total_seconds())
    )];
    if let Some(avg) = stats.average_seconds() {
        lines.push(format!("average {avg:.1} s per figure"));
    }
    for attempt in &stats.attempts {
        let label = attempt.figure.label();
        // custom figure ids may hold wide characters
        let pad = LABEL_COLUMN.saturating_sub(label.width());
        lines.push(format!(
            "  {label}{} {}",
            " ".repeat(pad),
            format_clock(attempt.elapsed_seconds)
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use vistrace::figure::{Figure, FigureKind};
    use vistrace::session::FigureAttemptStat;

    #[test]
    fn test_cli_defaults_to_play() {
        let cli = Cli::parse_from(["vistrace"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.seed, None);
        assert_eq!(cli.store, None);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["vistrace", "play", "--seed", "7", "--store", "/tmp/s.json"]);
        assert!(matches!(cli.command, Some(Command::Play)));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn test_setup_defaults_match_default_config() {
        let cli = Cli::parse_from(["vistrace", "setup"]);
        let Some(Command::Setup(args)) = cli.command else {
            panic!("expected setup");
        };
        assert_eq!(args.to_session_config(), SessionConfig::default());
    }

    #[test]
    fn test_setup_flags() {
        let cli = Cli::parse_from([
            "vistrace",
            "setup",
            "--color1",
            "blue",
            "--color2",
            "#f80",
            "--background",
            "black",
            "--difficulty",
            "hard",
            "--duration",
            "3",
            "--all-figures",
        ]);
        let Some(Command::Setup(args)) = cli.command else {
            panic!("expected setup");
        };
        let config = args.to_session_config();
        assert_eq!(config.color1, Rgb::new(0, 0, 255));
        assert_eq!(config.color2, Rgb::new(0xff, 0x88, 0x00));
        assert_eq!(config.background_color, Rgb::BLACK);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.duration, 3);
        assert_eq!(config.pool, FigurePool::All);
    }

    #[test]
    fn test_setup_rejects_bad_color() {
        let result = Cli::try_parse_from(["vistrace", "setup", "--color1", "chartreuse-ish"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_lists_attempts() {
        let stats = SessionStats {
            attempts: vec![
                FigureAttemptStat {
                    figure: Figure::shape("circle", FigureKind::Geometric, Difficulty::Easy),
                    elapsed_seconds: 4,
                    completed: true,
                },
                FigureAttemptStat {
                    figure: Figure::glyph("A", Difficulty::Easy),
                    elapsed_seconds: 8,
                    completed: true,
                },
            ],
            reason: EndReason::TimeExpired,
            finished_at: Local::now(),
        };
        let text = summary(&stats);
        assert!(text.starts_with("session time expired: 2 figures traced in 0:12"));
        assert!(text.contains("average 6.0 s per figure"));
        assert!(text.contains("\n  circle         0:04"));
        assert!(text.contains("\"A\""));
    }
}
