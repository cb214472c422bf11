mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod screen;
mod swipe;
mod tuning;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Session;
use crate::tuning::Variant;
use anyhow::Context;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use lexopt::{Arg, Parser, ValueExt};
use log::{info, warn, LevelFilter};
use ratatui::DefaultTerminal;
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: powersnake [OPTIONS]\n",
    "\n",
    "Terminal snake with ghost and wraparound power-ups\n",
    "\n",
    "Options:\n",
    "  --config FILE       Read configuration from FILE\n",
    "  --variant NAME      Play the given variant (\"classic\" or \"neon\")\n",
    "  --log-level LEVEL   Minimum level of messages to write to the log file\n",
    "  -h, --help          Show this help and exit\n",
    "  -V, --version       Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run {
        config: Option<PathBuf>,
        variant: Option<Variant>,
        log_level: Option<LevelFilter>,
    },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        let mut variant = None;
        let mut log_level = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                Arg::Long("config") => config = Some(PathBuf::from(parser.value()?)),
                Arg::Long("variant") => variant = Some(parser.value()?.parse()?),
                Arg::Long("log-level") => log_level = Some(parser.value()?.parse()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run {
            config,
            variant,
            log_level,
        })
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(Parser::from_env()) {
        Ok(Arguments::Run {
            config,
            variant,
            log_level,
        }) => exit(run(config.as_deref(), variant, log_level)),
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("powersnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(
    config_path: Option<&Path>,
    variant: Option<Variant>,
    log_level: Option<LevelFilter>,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(p) => Config::load(p, false),
        None => Config::default_path().map_or_else(|_| Ok(Config::default()), |p| {
            Config::load(&p, true)
        }),
    }
    .context("failed to load configuration")?;
    let level = log_level.or(config.log_level).unwrap_or(LevelFilter::Info);
    if let Some(path) = config.log_file() {
        if let Err(e) = init_logging(&path, level) {
            eprintln!("powersnake: logging disabled: {e}");
        }
    }
    info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    match config_path {
        Some(p) => info!("Configuration read from {}", p.display()),
        None => info!("Using default configuration location"),
    }

    if let Some(v) = variant {
        config.game.variant = v;
    }
    let variant = config.game.variant;
    let tuning = config
        .game
        .tuning()
        .with_context(|| format!("invalid settings for {variant} variant"))?;
    let high_scores = match config.load_high_scores() {
        Ok(scores) => Some(scores),
        Err(e) => {
            warn!(
                "{:#}; new high scores will not be saved",
                anyhow::Error::new(e)
            );
            None
        }
    };
    let high_score = high_scores
        .as_ref()
        .and_then(|hs| hs.get(variant))
        .map_or(0, NonZeroU32::get);
    let app = App::new(Session::new(tuning, high_score), variant, config, high_scores);

    let terminal = ratatui::init();
    let r = play(app, terminal);
    ratatui::restore();
    r.map_err(Into::into)
}

fn play(app: App, terminal: DefaultTerminal) -> io::Result<()> {
    crossterm::execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)?;
    let r = app.run(terminal);
    let cleanup = crossterm::execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
    r.and(cleanup)
}

fn init_logging(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("powersnake: {e:?}");
            ExitCode::from(2)
        }
    }
}
