//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Mahjong rules engine tooling: deal, simulate, snapshot and replay hands.
#[derive(Parser, Debug)]
#[command(name = "majiang", version)]
pub struct MajiangCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand and show every seat's tiles and the wall cursors
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        /// Seats to fill, comma separated (e.g. east,west)
        #[arg(long)]
        seats: Option<String>,
        /// Render tiles as Unicode glyphs
        #[arg(long)]
        unicode: bool,
    },
    /// Let bots play hands and record them as JSONL
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        output: Option<String>,
        /// Base seed; hand `i` is dealt with `seed + i`
        #[arg(long)]
        seed: Option<u64>,
        /// Bot type for every seat
        #[arg(long)]
        ai: Option<String>,
    },
    /// Re-run recorded hands from their seeds and check they end the same way
    Replay {
        #[arg(long)]
        input: String,
        /// Print every action
        #[arg(long)]
        verbose: bool,
    },
    /// Print a game snapshot, or one seat's redacted view, after some bot moves
    Snapshot {
        #[arg(long)]
        seed: Option<u64>,
        /// Continue from a snapshot file instead of dealing a new hand
        #[arg(long)]
        resume: Option<String>,
        /// Number of bot moves to play before printing
        #[arg(long, default_value_t = 0)]
        steps: usize,
        /// Print only what this seat may see
        #[arg(long)]
        view: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print deal RNG samples for a seed
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}
