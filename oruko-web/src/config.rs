//! Command line configuration for the server

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Service base URL; falls back to `ORUKO_API_BASE_URL` when unset
    pub api_base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub font: Option<PathBuf>,
    pub pixel_ratio: Option<f32>,
    pub session_ttl: Duration,
    pub max_sessions: usize,
    pub mock: bool,
}

pub fn command() -> Command {
    Command::new("oruko-web")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Name meaning lookups and shareable name cards over HTTP")
        .arg(
            Arg::new("bind")
                .long("bind")
                .short('b')
                .help("Address to listen on")
                .value_parser(value_parser!(SocketAddr))
                .default_value(DEFAULT_BIND),
        )
        .arg(
            Arg::new("api-base-url")
                .long("api-base-url")
                .help("Base URL of the translation service (default: $ORUKO_API_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Translation service timeout in seconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("font")
                .long("font")
                .help("Extra font file for card text")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("pixel-ratio")
                .long("pixel-ratio")
                .help("Output pixels per card pixel, 2 to 4 (default: 2)")
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("session-ttl")
                .long("session-ttl")
                .help("Seconds of inactivity before a session is dropped")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("1800"),
        )
        .arg(
            Arg::new("max-sessions")
                .long("max-sessions")
                .help("Most sessions held at once; the least recently used goes first")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("10000"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Serve canned answers instead of calling the translation service")
                .action(ArgAction::SetTrue),
        )
}

impl ServerConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            bind: matches
                .get_one::<SocketAddr>("bind")
                .copied()
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000))),
            api_base_url: matches.get_one::<String>("api-base-url").cloned(),
            timeout: matches
                .get_one::<u64>("timeout")
                .map(|secs| Duration::from_secs(*secs)),
            font: matches.get_one::<PathBuf>("font").cloned(),
            pixel_ratio: matches.get_one::<f32>("pixel-ratio").copied(),
            session_ttl: Duration::from_secs(
                matches.get_one::<u64>("session-ttl").copied().unwrap_or(1800),
            ),
            max_sessions: matches
                .get_one::<u64>("max-sessions")
                .map_or(10_000, |n| *n as usize),
            mock: matches.get_flag("mock"),
        }
    }
}
