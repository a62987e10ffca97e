//! Simulation command handler for bot self-play.
//!
//! Every seat is played by the same bot. Hand `i` is dealt with
//! `seed + i`, so any single hand of a run can be reproduced (and replayed)
//! from its record alone.
//!
//! # Examples
//!
//! ```no_run
//! use majiang_cli::commands::sim::handle_sim_command;
//! use std::io;
//!
//! let mut out = io::stdout();
//! let mut err = io::stderr();
//!
//! // Run 100 hands with seed 42
//! handle_sim_command(100, Some("data/sim.jsonl".to_string()), Some(42), None, &mut out, &mut err).unwrap();
//! ```

use crate::config;
use crate::error::CliError;
use crate::formatters::format_outcome;
use crate::ui;
use majiang_ai::{create_ai, play_out};
use majiang_engine::game::{Game, GameState, Outcome};
use majiang_engine::logger::{HandLogger, HandRecord};
use std::io::Write;
use tracing::info;

#[derive(Debug, Default)]
struct Tally {
    discard_wins: usize,
    self_drawn_wins: usize,
    exhausted: usize,
    unfinished: usize,
}

impl Tally {
    fn count(&mut self, outcome: Option<Outcome>) {
        match outcome {
            Some(Outcome::DiscardWin { .. }) => self.discard_wins += 1,
            Some(Outcome::SelfDrawnWin { .. }) => self.self_drawn_wins += 1,
            Some(Outcome::Exhausted) => self.exhausted += 1,
            None => self.unfinished += 1,
        }
    }
}

/// Handle the sim command: play hands with bots and record them.
///
/// # Arguments
///
/// * `hands` - Total number of hands to simulate
/// * `output` - Path to save hand records (JSONL format); truncated first
/// * `seed` - Base RNG seed (each hand uses seed + hand_index)
/// * `ai` - Bot type, overriding the configured one
/// * `out` - Output stream for the summary
/// * `err` - Output stream for warnings and errors
///
/// # Returns
///
/// `Ok(())` on success, or `CliError` on failure
pub fn handle_sim_command(
    hands: u64,
    output: Option<String>,
    seed: Option<u64>,
    ai: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let cfg = config::load()?;
    let ai_name = ai.unwrap_or(cfg.ai);
    let Some(bot) = create_ai(&ai_name) else {
        let msg = format!("unknown ai '{}'", ai_name);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    };
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut logger = match &output {
        Some(path) => match HandLogger::create(path) {
            Ok(logger) => logger,
            Err(e) => {
                ui::write_error(err, &format!("Failed to open output file: {}", e))?;
                return Err(CliError::Io(e));
            }
        },
        None => HandLogger::detached(&chrono::Utc::now().format("%Y%m%d").to_string()),
    };

    let mut tally = Tally::default();
    for i in 0..hands {
        let hand_seed = base_seed.wrapping_add(i);
        let mut game = Game::new_with_seed(hand_seed);
        game.init(&cfg.seats)?;
        game.start()?;
        let steps = play_out(&mut game, bot.as_ref(), cfg.max_steps)?;

        let mut record = HandRecord::from_game(&game, logger.next_id(), Some(hand_seed));
        if game.state() != GameState::End {
            ui::display_warning(
                err,
                &format!("hand {} stopped after {} steps", record.hand_id, steps),
            )?;
        }
        record.meta = Some(serde_json::json!({ "ai": bot.name(), "steps": steps }));
        info!(
            hand_id = %record.hand_id,
            seed = hand_seed,
            outcome = %format_outcome(record.outcome.as_ref()),
            "hand simulated"
        );
        tally.count(record.outcome);
        logger.write(&record)?;
    }

    writeln!(out, "Simulated: {} hands", hands)?;
    writeln!(
        out,
        "Outcomes: {} discard wins, {} self-drawn wins, {} exhausted, {} unfinished",
        tally.discard_wins, tally.self_drawn_wins, tally.exhausted, tally.unfinished
    )?;
    Ok(())
}
