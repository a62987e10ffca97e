//! Passive bot: never claims, throws away its highest tile.
//!
//! Stands in for an unattended seat: it keeps the hand moving without ever
//! changing its outcome. Every table of passive bots ends exhausted.

use crate::AIOpponent;
use majiang_engine::game::{Game, GameState};
use majiang_engine::logger::Action;
use majiang_engine::player::Seat;

#[derive(Debug, Clone, Default)]
pub struct PassiveAI;

impl PassiveAI {
    pub fn new() -> Self {
        Self
    }
}

impl AIOpponent for PassiveAI {
    fn decide(&self, game: &Game, seat: Seat) -> Option<Action> {
        match game.state() {
            GameState::WaitingAction if game.current() == Some(seat) => game
                .player(seat)?
                .concealed()
                .into_iter()
                .max()
                .map(Action::Discard),
            GameState::WaitingPass if game.pending_claims().has_waiting(seat) => Some(Action::Pass),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        "PassiveAI"
    }
}
