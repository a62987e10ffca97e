//! Deal command handler for single hand dealing and display.
//!
//! Deals one hand with the configured seating and prints the dealer, both
//! wall cursors and every seat's opening tiles. The same seed always prints
//! the same table.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_hand, supports_unicode};
use majiang_engine::game::Game;
use std::io::Write;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Optional RNG seed; falls back to the configured seed, then a random one
/// * `seats` - Optional comma-separated seat list overriding the configuration
/// * `unicode` - Render tiles as glyphs instead of face names
/// * `out` - Output stream for command results
///
/// # Returns
///
/// Returns `Ok(())` on success, or `CliError` on bad seats or I/O errors.
pub fn handle_deal_command(
    seed: Option<u64>,
    seats: Option<String>,
    unicode: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seats = match seats {
        Some(list) => {
            config::parse_seats(&list).map_err(|e| CliError::InvalidInput(e.to_string()))?
        }
        None => cfg.seats,
    };
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let unicode = unicode && supports_unicode();

    let mut game = Game::new_with_seed(base_seed);
    game.init(&seats)?;
    game.start()?;

    writeln!(out, "Seed: {}", base_seed)?;
    if let Some(dealer) = game.dealer() {
        writeln!(out, "Dealer: {}", dealer)?;
    }
    writeln!(
        out,
        "Live wall: {}  Dead wall: {}",
        game.live_cursor(),
        game.dead_cursor()
    )?;
    for seat in game.occupied_seats() {
        if let Some(player) = game.player(seat) {
            writeln!(
                out,
                "{:<5} {}",
                seat.to_string(),
                format_hand(player.hand(), player.picked(), unicode)
            )?;
        }
    }
    writeln!(out, "Wall: {} tiles left", game.tiles_remaining())?;
    Ok(())
}
