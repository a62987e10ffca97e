//! Replay command handler.
//!
//! Re-deals every recorded hand from its seed, feeds the recorded actions
//! back through the engine and checks the hand ends exactly as recorded.
//! Because dealing is deterministic for a seed, any divergence means the
//! record was edited or was produced by different rules.
//!
//! ## Format
//!
//! Reads JSONL files (optionally `.zst` compressed) of `HandRecord`s, as
//! written by `sim`.

use crate::error::{BatchValidationError, CliError};
use crate::formatters::{format_action, format_meld, format_outcome};
use crate::io_utils::read_text_auto;
use crate::ui;
use majiang_engine::game::Game;
use majiang_engine::logger::HandRecord;
use std::io::Write;

/// Handle the replay command.
///
/// # Arguments
///
/// * `input` - Path to JSONL file containing hand records
/// * `verbose` - Print every replayed action
/// * `out` - Output stream for the per-hand report
/// * `err` - Error stream for mismatches
///
/// # Returns
///
/// `Ok(())` when every hand reproduces, `Err(CliError)` if the file cannot be
/// read or any hand fails to parse or reproduce.
pub fn handle_replay_command(
    input: String,
    verbose: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = match read_text_auto(&input) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!("Failed to read {}: {}", input, e);
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };

    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        writeln!(out, "No hands found in file.")?;
        return Ok(());
    }

    let mut failures: Vec<BatchValidationError<String>> = Vec::new();
    for (n, line) in lines.iter().enumerate() {
        let record: HandRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                failures.push(BatchValidationError {
                    item_context: format!("line {}", n + 1),
                    message: format!("cannot parse hand record: {}", e),
                });
                continue;
            }
        };
        if let Some(message) = replay_record(&record, verbose, out)? {
            failures.push(BatchValidationError {
                item_context: record.hand_id.clone(),
                message,
            });
        }
    }

    writeln!(
        out,
        "Replayed: {} hands, {} mismatched",
        lines.len(),
        failures.len()
    )?;
    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        ui::write_error(err, &failure.to_string())?;
    }
    Err(CliError::InvalidInput(format!(
        "{} of {} hands did not replay",
        failures.len(),
        lines.len()
    )))
}

/// Replays one record; `Ok(Some(reason))` when it diverges.
fn replay_record(
    record: &HandRecord,
    verbose: bool,
    out: &mut dyn Write,
) -> Result<Option<String>, CliError> {
    let Some(seed) = record.seed else {
        return Ok(Some("record has no seed".to_string()));
    };

    let mut game = Game::new_with_seed(seed);
    if let Err(e) = game.init(&record.seats).and_then(|()| game.start()) {
        return Ok(Some(format!("cannot deal: {}", e)));
    }
    if game.dealer() != record.dealer {
        return Ok(Some("dealer differs".to_string()));
    }

    writeln!(out, "Hand {} (seed {})", record.hand_id, seed)?;
    for (i, entry) in record.actions.iter().enumerate() {
        if verbose {
            writeln!(out, "  {:<5} {}", entry.seat.to_string(), format_action(&entry.action))?;
        }
        if let Err(e) = game.apply(entry.seat, &entry.action) {
            return Ok(Some(format!(
                "action {} ({} {}) rejected: {}",
                i + 1,
                entry.seat,
                format_action(&entry.action),
                e
            )));
        }
    }

    let replayed = game.outcome();
    if replayed != record.outcome {
        return Ok(Some(format!(
            "outcome differs: recorded {}, replayed {}",
            format_outcome(record.outcome.as_ref()),
            format_outcome(replayed.as_ref())
        )));
    }
    if verbose {
        for seat in game.occupied_seats() {
            for set in game.player(seat).map(|p| p.opened()).unwrap_or_default() {
                writeln!(out, "  {:<5} {}", seat.to_string(), format_meld(set, false))?;
            }
        }
    }
    writeln!(out, "  -> {}", format_outcome(replayed.as_ref()))?;
    Ok(None)
}
