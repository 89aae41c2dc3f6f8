//! Runtime configuration: environment variables, then command-line flags.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::input::handler::DEFAULT_KEY_RELEASE_TIMEOUT_MS;

pub const DEFAULT_CELL_WIDTH: u16 = 2;
pub const MAX_CELL_WIDTH: u16 = 4;

pub const USAGE: &str = "\
usage: blockfall [--seed N] [--log PATH] [--cell-width N]

keys:  left/right (a/d, h/l) move   up (w/k) rotate   down (s/j) soft drop
       enter/space start            q quit

env:   BLOCKFALL_SEED, BLOCKFALL_LOG_PATH,
       BLOCKFALL_KEY_RELEASE_TIMEOUT_MS, BLOCKFALL_CELL_WIDTH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Piece RNG seed
    pub seed: u32,
    /// JSON-lines event log destination
    pub log_path: Option<PathBuf>,
    pub key_release_timeout_ms: u32,
    /// Terminal columns per board cell
    pub cell_width: u16,
    pub show_help: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            log_path: None,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            cell_width: DEFAULT_CELL_WIDTH,
            show_help: false,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`], reading variables through `lookup`.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let key_release_timeout_ms = lookup("BLOCKFALL_KEY_RELEASE_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.key_release_timeout_ms);

        let cell_width = lookup("BLOCKFALL_CELL_WIDTH")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .map(clamp_cell_width)
            .unwrap_or(defaults.cell_width);

        Self {
            seed,
            log_path,
            key_release_timeout_ms,
            cell_width,
            show_help: false,
        }
    }

    /// Apply command-line flags on top of this config.
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                }
                "--log" => {
                    i += 1;
                    let v = args.get(i).ok_or_else(|| anyhow!("missing value for --log"))?;
                    self.log_path = Some(PathBuf::from(v));
                }
                "--cell-width" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --cell-width"))?;
                    let w = v
                        .parse::<u16>()
                        .map_err(|_| anyhow!("invalid --cell-width value: {}", v))?;
                    self.cell_width = clamp_cell_width(w);
                }
                "-h" | "--help" => {
                    self.show_help = true;
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(self)
    }
}

fn clamp_cell_width(w: u16) -> u16 {
    w.clamp(1, MAX_CELL_WIDTH)
}

/// Seed from the wall clock, never zero.
fn time_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.subsec_nanos() ^ now.as_secs() as u32).max(1)
}
