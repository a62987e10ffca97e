//! Random number generator inspection command.
//!
//! Prints the seed and the first values of the ChaCha20 stream the deal
//! engine draws from, plus the dice a deal with that seed rolls after the
//! wall shuffle. Useful for checking that a seed reproduces across machines.

use crate::error::CliError;
use majiang_engine::player::Seat;
use majiang_engine::tiles::full_set;
use majiang_engine::wall::{cursors_from_dice, DealSource, SeededDeal};
use rand::{RngCore, SeedableRng};
use std::io::Write;

/// Handle the rng command.
///
/// # Arguments
///
/// * `seed` - Optional seed value for the RNG (uses random seed if None)
/// * `out` - Output stream for RNG sample values
pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let mut vals = vec![];
    for _ in 0..5 {
        vals.push(rng.next_u64());
    }
    // the deal shuffles the walls before it rolls
    let mut source = SeededDeal::new(s);
    source.shuffle(&mut full_set());
    let (d1, d2) = source.roll();
    let (live, dead) = cursors_from_dice(Seat::East, (d1, d2));
    writeln!(out, "Seed: {}", s)?;
    writeln!(out, "RNG sample: {:?}", vals)?;
    writeln!(out, "Dice: {} + {}", d1, d2)?;
    writeln!(out, "Live wall: {}  Dead wall: {}", live, dead)?;
    Ok(())
}
