use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use super::parsers::{parse_duration_arg, parse_ramp_up_arg};
use super::types::Profile;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "mach",
    version,
    about = "Raw HTTP/1.1 load tester with latency percentiles and before/after regression gates.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub attack: AttackArgs,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Directory for saved runs and tags (default: ~/.mach)
    #[arg(long = "data-dir", global = true, env = "MACH_HOME")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a load test (the default when no command is given)
    Attack(AttackArgs),
    /// Browse saved runs in a full-screen view
    #[command(alias = "dash")]
    Dashboard,
    /// List or clear saved runs
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Print usage examples
    Examples,
    /// Print version information
    Version,
}

#[derive(Debug, Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// List saved runs, newest first
    List,
    /// Delete all saved runs
    Clear,
}

/// Options for one load test. Unset options fall back to the profile, the
/// config file and then built-in defaults, in that order.
#[derive(Debug, Args, Clone, Default)]
pub struct AttackArgs {
    /// Target URL
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Total number of requests [default: 100]
    #[arg(short = 'n', long = "requests")]
    pub requests: Option<u64>,

    /// Run for a duration instead of a request count (ms/s/m/h, bare number = seconds)
    #[arg(short = 'd', long = "duration", value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Number of concurrent workers [default: 10]
    #[arg(short = 'c', long = "concurrency")]
    pub concurrency: Option<usize>,

    /// Requests per second per worker
    #[arg(short = 'r', long = "rps")]
    pub rps: Option<u32>,

    /// Load profile
    #[arg(short = 'p', long = "profile", value_enum)]
    pub profile: Option<Profile>,

    /// HTTP method [default: GET]
    #[arg(short = 'm', long = "method")]
    pub method: Option<String>,

    /// Extra header, 'Key: Value' (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(short = 'b', long = "body", conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the request body from a file
    #[arg(long = "body-file")]
    pub body_file: Option<PathBuf>,

    /// Read target URLs from a file, one per line
    #[arg(long = "urls-file")]
    pub urls_file: Option<PathBuf>,

    /// Spread worker start times over this window
    #[arg(long = "ramp-up", value_parser = parse_ramp_up_arg)]
    pub ramp_up: Option<Duration>,

    /// Connect and I/O timeout [default: 10s]
    #[arg(short = 't', long = "timeout", value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Skip TLS certificate and hostname verification
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,

    /// Tag used to save or compare before/after snapshots
    #[arg(long = "tag")]
    pub tag: Option<String>,

    /// Save this run as the tag's baseline
    #[arg(long = "before", conflicts_with = "after")]
    pub before: bool,

    /// Save this run as the tag's candidate and compare it to the baseline
    #[arg(long = "after")]
    pub after: bool,

    /// Show the stored comparison for --tag without running
    #[arg(long = "result")]
    pub result: bool,

    /// Fail with exit code 3 when average latency regresses by more than this percentage
    #[arg(long = "threshold", allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Config file (.toml or .json); ./mach.toml and ./mach.json are tried by default
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Suppress the progress line
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
