//! fu - A fast, composable filename search tool.
//!
//! Usage:
//!   fu QUERY [PATHS]...        Exact basename match
//!   fu -a .rs src              Basenames ending in `.rs`
//!   fu -r '^test_.*' .         Regular expression match
//!   fu -e -a .rs -d .          Neither a directory nor ending in `.rs`
//!   fu --help                  Show help

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::eyre::Result;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use fu_core::{NameFlags, NameMode, SearchConfig, SearchError, TraversalMode, parse_duration, parse_permission};
use fu_scan::{EntryWarning, MatchSink, Search};

#[derive(Parser)]
#[command(
    name = "fu",
    version,
    disable_version_flag = true,
    about = "A fast, composable filename search tool",
    long_about = "fu searches directory trees for entries whose name matches QUERY.\n\n\
                  Without a matcher flag the basename must equal QUERY exactly; an \
                  empty QUERY matches everything. Filters stack, and --exclude \
                  reports entries that fail every filter instead."
)]
struct Cli {
    /// Name to search for
    query: String,

    /// Directories to search (defaults to current directory)
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Fuzzy match: query characters appear in order, ignoring case
    #[arg(short, long)]
    fuzzy: bool,

    /// Treat the query as a regular expression
    #[arg(short, long = "regexp")]
    regex: bool,

    /// Match names ending with the query
    #[arg(short = 'a', long)]
    suffix: bool,

    /// Match names starting with the query
    #[arg(short = 'b', long)]
    prefix: bool,

    /// Match names containing the query
    #[arg(short, long)]
    substring: bool,

    /// Only report directories
    #[arg(short, long)]
    dirs: bool,

    /// Permission mask of which any bit must be set (e.g. "0o111", "0755", "73")
    #[arg(short = 'm', long = "perm", value_name = "MASK", value_parser = parse_permission)]
    permission: Option<u32>,

    /// Only report entries modified longer ago than this (e.g. "90s", "1h30m", "2d")
    #[arg(short, long, value_name = "DURATION", value_parser = parse_duration)]
    older: Option<Duration>,

    /// Only report entries modified more recently than this
    #[arg(short, long, value_name = "DURATION", value_parser = parse_duration)]
    younger: Option<Duration>,

    /// Report entries that fail every filter instead
    #[arg(short, long)]
    exclude: bool,

    /// Walk directories one at a time, in sorted order
    #[arg(long)]
    seq: bool,

    /// Parallel traversal (the default; kept for old scripts)
    #[arg(short = 'c', long, hide = true)]
    parallel: bool,

    /// Worker threads for parallel traversal (0 = one per core)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    fn into_config(self) -> Result<SearchConfig, SearchError> {
        let flags = NameFlags {
            regex: self.regex,
            suffix: self.suffix,
            prefix: self.prefix,
            fuzzy: self.fuzzy,
            substring: self.substring,
        };
        if self.parallel {
            tracing::debug!("--parallel is the default and has no effect");
        }

        SearchConfig::builder()
            .name_mode(NameMode::from_flags(flags, &self.query))
            .query(self.query)
            .roots(self.paths)
            .permission(self.permission)
            .dirs_only(self.dirs)
            .older_than(self.older)
            .younger_than(self.younger)
            .exclude(self.exclude)
            .traversal(if self.seq {
                TraversalMode::Sequential
            } else {
                TraversalMode::Parallel
            })
            .threads(self.threads)
            .build()
            .map_err(|e| SearchError::InvalidConfig {
                message: e.to_string(),
            })
    }
}

/// Streams matches to stdout, one path per line.
struct StdoutSink {
    show_errors: bool,
}

impl MatchSink for StdoutSink {
    fn on_match(&self, path: &Path) {
        if let Err(err) = writeln!(io::stdout().lock(), "{}", path.display()) {
            if reader_gone(&err) {
                // The reader closed the pipe; nothing left to do.
                std::process::exit(0);
            }
            tracing::warn!(error = %err, "failed to write match");
        }
    }

    fn on_error(&self, warning: &EntryWarning) {
        if self.show_errors {
            eprintln!("{}", warning.message.as_str().red());
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let interactive = io::stderr().is_terminal();

    let search = match cli.into_config().and_then(|config| Search::new(&config)) {
        Ok(search) => search,
        Err(err) => {
            eprintln!("fu: {err}");
            std::process::exit(1);
        }
    };

    let sink = Arc::new(StdoutSink {
        show_errors: interactive,
    });
    let summary = search.run(sink);

    if interactive {
        eprintln!("\n{summary}");
    }

    Ok(())
}

fn reader_gone(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}
