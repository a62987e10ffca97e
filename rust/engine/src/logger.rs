use serde::{Deserialize, Serialize};

use crate::claims::ClaimCall;
use crate::game::{Game, Outcome};
use crate::player::Seat;
use crate::tiles::TileId;

/// A command a seat issued, in the form it is recorded and replayed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Discard(TileId),
    ConcealedGang([TileId; 4]),
    SelfDrawWin,
    Pass,
    Chi([TileId; 2]),
    Peng([TileId; 2]),
    Gang([TileId; 3]),
    Hu,
}

impl From<ClaimCall> for Action {
    fn from(call: ClaimCall) -> Self {
        match call {
            ClaimCall::Chi(t) => Action::Chi(t),
            ClaimCall::Peng(t) => Action::Peng(t),
            ClaimCall::Gang(t) => Action::Gang(t),
            ClaimCall::Hu => Action::Hu,
        }
    }
}

/// Records a single accepted command.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat that issued the command
    pub seat: Seat,
    /// The command itself
    pub action: Action,
}

/// Complete record of one hand: enough to replay it from the seed.
/// Serialized to JSONL format for hand history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Deal seed (enables deterministic replay)
    pub seed: Option<u64>,
    /// Seats that were occupied
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub dealer: Option<Seat>,
    /// Chronological list of accepted commands
    pub actions: Vec<ActionRecord>,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl HandRecord {
    /// Captures a game's seats, dealer, history and outcome.
    pub fn from_game(game: &Game, hand_id: String, seed: Option<u64>) -> Self {
        Self {
            hand_id,
            seed,
            seats: game.occupied_seats(),
            dealer: game.dealer(),
            actions: game.history().to_vec(),
            outcome: game.outcome(),
            ts: None,
            meta: None,
        }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that numbers hands but writes nowhere.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
