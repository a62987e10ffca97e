//! Snapshot command handler.
//!
//! Deals a hand (or loads a saved snapshot), lets the configured bot make a
//! number of moves, then prints either the full internal snapshot or the
//! redacted view of one seat. A snapshot written with `--output` can be fed
//! back with `--resume` to continue the same hand later.

use crate::config::{self, parse_seat};
use crate::error::CliError;
use crate::io_utils::{read_text_auto, write_text};
use crate::ui;
use majiang_ai::{create_ai, play_out};
use majiang_engine::game::Game;
use majiang_engine::wall::SeededDeal;
use std::io::Write;
use std::path::Path;

/// Handle the snapshot command.
///
/// # Arguments
///
/// * `seed` - Deal seed for a new hand, or for later re-deals of a resumed one
/// * `resume` - Snapshot file to continue from
/// * `steps` - Bot moves to play before printing
/// * `view` - Seat whose redacted view to print instead of the full snapshot
/// * `output` - File to write instead of `out`
/// * `out` - Output stream for the JSON document
/// * `err` - Output stream for warnings and errors
pub fn handle_snapshot_command(
    seed: Option<u64>,
    resume: Option<String>,
    steps: usize,
    view: Option<String>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let viewer = match view {
        Some(name) => match parse_seat(&name) {
            Some(seat) => Some(seat),
            None => {
                let msg = format!("Invalid seat '{}'", name);
                ui::write_error(err, &msg)?;
                return Err(CliError::InvalidInput(msg));
            }
        },
        None => None,
    };

    let mut game = match resume {
        Some(path) => {
            let text = read_text_auto(&path).map_err(|e| {
                CliError::InvalidInput(format!("Failed to read {}: {}", path, e))
            })?;
            match seed.or(cfg.seed) {
                Some(s) => Game::deserialize_with_source(&text, Box::new(SeededDeal::new(s)))?,
                None => Game::deserialize(&text)?,
            }
        }
        None => {
            let mut game = Game::new_with_seed(seed.or(cfg.seed).unwrap_or_else(rand::random));
            game.init(&cfg.seats)?;
            game.start()?;
            game
        }
    };

    if steps > 0 {
        let bot = create_ai(&cfg.ai)
            .ok_or_else(|| CliError::Config(format!("unknown ai '{}'", cfg.ai)))?;
        let played = play_out(&mut game, bot.as_ref(), steps)?;
        if played < steps {
            ui::display_warning(err, &format!("hand ended after {} of {} moves", played, steps))?;
        }
    }

    let json = match viewer {
        Some(seat) => serde_json::to_string_pretty(&game.view(seat)?),
        None => serde_json::to_string_pretty(&game.snapshot()),
    }
    .map_err(std::io::Error::other)?;

    match output {
        Some(path) => {
            write_text(Path::new(&path), &json).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            writeln!(out, "Saved snapshot to {}", path)?;
        }
        None => writeln!(out, "{}", json)?,
    }
    Ok(())
}
