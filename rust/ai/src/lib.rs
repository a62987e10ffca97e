//! # majiang-ai: Bot seats for the Mahjong engine
//!
//! Provides bot policies that play a seat through the same command surface a
//! human uses. A bot only ever *chooses* an [`Action`]; the engine validates
//! and applies it, so a bot can never put the game into a state a person
//! could not.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the interface for bot decision-making
//! - [`baseline`] - Rule-of-thumb bot: wins when it can, claims greedily,
//!   throws away its least connected tile
//! - [`passive`] - Bot that never claims and always throws its highest tile
//! - [`create_ai`] - Factory function for creating bots by name
//! - [`autoplay_step`] / [`play_out`] - Drivers that let a bot answer
//!   whatever the game is waiting for
//!
//! ## Quick Start
//!
//! ```rust
//! use majiang_ai::{create_ai, play_out};
//! use majiang_engine::game::{Game, GameState};
//! use majiang_engine::player::Seat;
//!
//! let ai = create_ai("baseline").expect("known bot");
//!
//! let mut game = Game::new_with_seed(42);
//! game.init(&Seat::ALL).expect("seat players");
//! game.start().expect("deal");
//!
//! play_out(&mut game, ai.as_ref(), 5_000).expect("bot moves are legal");
//! assert_eq!(game.state(), GameState::End);
//! ```
//!
//! ## AI Types
//!
//! Currently supported AI types (see [`AI_TYPES`]):
//! - `"baseline"` - Greedy rule-based bot
//! - `"passive"` - Discards its highest tile and passes every claim

use majiang_engine::errors::GameError;
use majiang_engine::game::{Game, GameState};
use majiang_engine::logger::Action;
use majiang_engine::player::Seat;

pub mod baseline;
pub mod passive;

/// Names accepted by [`create_ai`].
pub const AI_TYPES: &[&str] = &["baseline", "passive"];

/// Trait defining the interface for bot seats.
///
/// # Required Methods
///
/// - [`decide`](AIOpponent::decide) - Choose the seat's next command
/// - [`name`](AIOpponent::name) - Return the bot's identifier/name
///
/// # Example Implementation
///
/// ```rust
/// use majiang_ai::AIOpponent;
/// use majiang_engine::game::Game;
/// use majiang_engine::logger::Action;
/// use majiang_engine::player::Seat;
///
/// struct AlwaysPass;
///
/// impl AIOpponent for AlwaysPass {
///     fn decide(&self, _game: &Game, _seat: Seat) -> Option<Action> {
///         Some(Action::Pass)
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysPass"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Choose the next command for `seat`.
    ///
    /// # Arguments
    ///
    /// * `game` - The game as the seat sees it
    /// * `seat` - The seat to decide for
    ///
    /// # Returns
    ///
    /// `None` when the game is not waiting on this seat, otherwise the
    /// command to issue. The engine still validates it.
    fn decide(&self, game: &Game, seat: Seat) -> Option<Action>;

    /// Return the name/identifier of this bot.
    fn name(&self) -> &str;
}

/// Factory function to create bots by type string.
///
/// # Arguments
///
/// * `ai_type` - String identifier for the bot type (one of [`AI_TYPES`])
///
/// # Returns
///
/// A boxed trait object implementing `AIOpponent`, or `None` for an unknown
/// type.
///
/// # Example
///
/// ```rust
/// use majiang_ai::create_ai;
///
/// let ai = create_ai("baseline").unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("oracle").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AIOpponent>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        "passive" => Some(Box::new(passive::PassiveAI::new())),
        _ => None,
    }
}

/// The seat whose command the game is waiting for, if any.
///
/// While a turn is open that is the current seat; while a discard is being
/// offered it is the highest-priority seat that has not answered yet.
pub fn seat_to_act(game: &Game) -> Option<Seat> {
    match game.state() {
        GameState::WaitingAction => game.current(),
        GameState::WaitingPass => game.pending_claims().first_waiting().map(|c| c.seat),
        _ => None,
    }
}

/// Let `ai` answer for whichever seat the game is waiting on.
///
/// Returns `Ok(false)` when there is nothing to answer (the hand has not
/// started or is over) or the bot declines, `Ok(true)` after a command was
/// applied.
pub fn autoplay_step(game: &mut Game, ai: &dyn AIOpponent) -> Result<bool, GameError> {
    let Some(seat) = seat_to_act(game) else {
        return Ok(false);
    };
    let Some(action) = ai.decide(game, seat) else {
        return Ok(false);
    };
    game.apply(seat, &action)?;
    Ok(true)
}

/// Run [`autoplay_step`] until it stops or `max_steps` commands were applied.
///
/// Returns the number of applied commands.
pub fn play_out(game: &mut Game, ai: &dyn AIOpponent, max_steps: usize) -> Result<usize, GameError> {
    let mut steps = 0;
    while steps < max_steps && autoplay_step(game, ai)? {
        steps += 1;
    }
    Ok(steps)
}
