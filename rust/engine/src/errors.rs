use crate::game::GameState;
use crate::player::Seat;
use crate::tiles::TileId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot {action} while the game is {state:?}")]
    WrongState {
        action: &'static str,
        state: GameState,
    },
    #[error("It's not {seat}'s turn")]
    NotYourTurn { seat: Seat },
    #[error("Seat {0} is empty")]
    EmptySeat(Seat),
    #[error("{seat} does not hold tile {tile}")]
    TileNotInHand { seat: Seat, tile: TileId },
    #[error("Illegal set: {0}")]
    IllegalSet(String),
    #[error("{seat} does not have a winning hand")]
    CannotWin { seat: Seat },
    #[error("Seat {0} listed more than once")]
    DuplicateSeat(Seat),
    #[error("At least one seat must be occupied")]
    NoPlayers,
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("Serialization failed: {0}")]
    Serialization(String),
}
