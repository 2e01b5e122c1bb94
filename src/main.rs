mod tui;
use crate::tui::App;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use mathsnake::{Config, Game, HighScores, Scheduler};
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: mathsnake [<options>]

Steer the snake into the answer to each sum.

Options:
  -c, --config <PATH>   Read configuration from the given file
      --seed <N>        Seed the random number generator for a repeatable game
      --debug           Log more detail to the log file
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit

Keys:
  arrows, wasd, hjkl    Steer
  p, Esc                Pause/resume
  r                     Restart
  q, Ctrl-C             Quit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse::<u64>()?),
                Arg::Long("debug") => args.debug = true,
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }

    fn run(self) -> ExitCode {
        match self {
            Cli::Run(args) => exit(args.run()),
            Cli::Help => {
                print!("{USAGE}");
                ExitCode::SUCCESS
            }
            Cli::Version => {
                println!("mathsnake {}", env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    seed: Option<u64>,
    debug: bool,
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let config = match self.config {
            Some(ref path) => Config::load(path, false)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            None => match Config::default_path() {
                Ok(path) => Config::load(&path, true).with_context(|| {
                    format!("failed to load configuration from {}", path.display())
                })?,
                Err(_) => Config::default(),
            },
        };
        let level = if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        if let Some(path) = config.log_file() {
            init_logging(&path, level);
        }
        log::info!("Starting mathsnake {}", env!("CARGO_PKG_VERSION"));

        let high_scores_file = config.high_scores_file();
        let high_scores = match high_scores_file.as_deref() {
            Some(path) => HighScores::load(path).unwrap_or_else(|e| {
                log::warn!("{:?}", anyhow::Error::from(e));
                HighScores::default()
            }),
            None => HighScores::default(),
        };
        let game = match self.seed {
            Some(seed) => Game::with_seed(config.rules, seed),
            None => Game::new(config.rules),
        }
        .context("invalid rules")?;
        let app = App::new(Scheduler::new(game), high_scores, high_scores_file);
        let terminal = ratatui::init();
        let r = app.run(terminal);
        ratatui::restore();
        log::info!("Exiting");
        r.map_err(Into::into)
    }
}

/// Send log messages to `path`.  The terminal belongs to the game, so a log
/// file that cannot be opened is reported and then logging is skipped.
fn init_logging(path: &Path, level: LevelFilter) {
    let file = path
        .parent()
        .map_or(Ok(()), fs_err::create_dir_all)
        .and_then(|()| {
            fs_err::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
        });
    match file {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), file) {
                eprintln!("mathsnake: failed to initialize logging: {e}");
            }
        }
        Err(e) => eprintln!("mathsnake: {e}"),
    }
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("mathsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(cli) => cli.run(),
        Err(e) => {
            eprintln!("mathsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}
