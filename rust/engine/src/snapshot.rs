//! Flat snapshots of a [`Game`] and the redacted per-seat view.
//!
//! [`GameSnapshot`] carries everything, hidden tiles included, and is meant
//! for persistence and transfer between trusted processes. [`GameView`] is
//! what a single seat is allowed to see.

use serde::{Deserialize, Serialize};

use crate::claims::{Claim, ClaimQueue, ClaimStatus};
use crate::errors::GameError;
use crate::game::{Game, GameState, Outcome};
use crate::logger::ActionRecord;
use crate::player::{MeldKind, OpenedSet, Seat, SeatSlot};
use crate::tiles::{TileId, TILE_COUNT};
use crate::wall::{DealSource, SeededDeal, WallCursor, Walls, WALL_LEN};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: [SeatSlot; 4],
    pub walls: Walls,
    pub discards: [Vec<TileId>; 4],
    pub state: GameState,
    pub latest_tile: Option<TileId>,
    pub current: Option<Seat>,
    pub dealer: Option<Seat>,
    pub live_cursor: WallCursor,
    pub dead_cursor: WallCursor,
    pub claims: ClaimQueue,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub history: Vec<ActionRecord>,
}

fn invalid(msg: impl Into<String>) -> GameError {
    GameError::InvalidSnapshot(msg.into())
}

impl GameSnapshot {
    /// Checks the structural invariants a live game always holds.
    pub fn validate(&self) -> Result<(), GameError> {
        for (i, slot) in self.players.iter().enumerate() {
            if let Some(p) = slot.player() {
                if p.seat().index() != i {
                    return Err(invalid(format!("player {} stored in slot {}", p.seat(), i)));
                }
            }
        }
        let occupied = |seat: Seat| self.players[seat.index()].is_occupied();

        for (seat, wall) in Seat::ALL.iter().zip(self.walls.iter()) {
            if wall.seat() != *seat || wall.slots().len() != WALL_LEN {
                return Err(invalid(format!("malformed wall for {}", seat)));
            }
        }
        for cursor in [self.live_cursor, self.dead_cursor] {
            if cursor.index >= WALL_LEN {
                return Err(invalid(format!("cursor {} out of range", cursor)));
            }
        }

        let mut seen = [false; TILE_COUNT];
        for tile in self.tiles() {
            let slot = &mut seen[usize::from(tile.raw())];
            if *slot {
                return Err(invalid(format!("tile {} appears twice", tile)));
            }
            *slot = true;
        }

        for seat in [self.current, self.dealer].into_iter().flatten() {
            if !occupied(seat) {
                return Err(invalid(format!("{} is referenced but empty", seat)));
            }
        }
        match self.state {
            GameState::WaitingAction | GameState::WaitingPass if self.current.is_none() => {
                return Err(invalid("no current seat"));
            }
            GameState::WaitingPass => {
                let discarder = self.current.map(Seat::index).unwrap_or_default();
                match self.latest_tile {
                    Some(tile) if self.discards[discarder].last() == Some(&tile) => {}
                    _ => return Err(invalid("open discard is not on the discarder's pile")),
                }
            }
            GameState::End if self.outcome.is_none() => {
                return Err(invalid("finished hand without an outcome"));
            }
            _ => {}
        }
        if self.state != GameState::End && self.outcome.is_some() {
            return Err(invalid("outcome recorded before the hand ended"));
        }

        if !self.claims.is_priority_ordered() {
            return Err(invalid("claims out of priority order"));
        }
        for claim in self.claims.entries() {
            if !occupied(claim.seat) {
                return Err(invalid(format!("claim by empty seat {}", claim.seat)));
            }
            if claim.status == ClaimStatus::Accepting && claim.call.is_none() {
                return Err(invalid(format!("accepted claim of {} has no call", claim.seat)));
            }
        }
        Ok(())
    }

    fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        let held = self.players.iter().filter_map(SeatSlot::player).flat_map(|p| {
            p.hand()
                .iter()
                .copied()
                .chain(p.picked())
                .chain(p.opened().iter().flat_map(|s| s.tiles.iter().copied()))
        });
        self.walls
            .tiles()
            .chain(held)
            .chain(self.discards.iter().flatten().copied())
    }
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.seats.clone(),
            walls: self.walls.clone(),
            discards: self.discards.clone(),
            state: self.state,
            latest_tile: self.latest_tile,
            current: self.current,
            dealer: self.dealer,
            live_cursor: self.live,
            dead_cursor: self.dead,
            claims: self.claims.clone(),
            outcome: self.outcome,
            history: self.history.clone(),
        }
    }

    /// Rebuilds a game from a validated snapshot. `source` feeds later
    /// `init` calls only; nothing already on the table is re-rolled.
    pub fn restore(snapshot: GameSnapshot, source: Box<dyn DealSource>) -> Result<Game, GameError> {
        snapshot.validate()?;
        let mut game = Game::with_source(source);
        game.seats = snapshot.players;
        game.walls = snapshot.walls;
        game.discards = snapshot.discards;
        game.state = snapshot.state;
        game.latest_tile = snapshot.latest_tile;
        game.current = snapshot.current;
        game.dealer = snapshot.dealer;
        game.live = snapshot.live_cursor;
        game.dead = snapshot.dead_cursor;
        game.claims = snapshot.claims;
        game.outcome = snapshot.outcome;
        game.history = snapshot.history;
        Ok(game)
    }

    pub fn serialize(&self) -> Result<String, GameError> {
        serde_json::to_string(&self.snapshot()).map_err(|e| GameError::Serialization(e.to_string()))
    }

    /// Parses and restores a serialized game with a randomly seeded deal
    /// source. The deal source is not part of a snapshot, so later
    /// `reset`s shuffle differently from the game that was saved; use
    /// [`Game::deserialize_with_source`] to keep them reproducible.
    pub fn deserialize(json: &str) -> Result<Game, GameError> {
        Game::deserialize_with_source(json, Box::new(SeededDeal::new(rand::random())))
    }

    pub fn deserialize_with_source(
        json: &str,
        source: Box<dyn DealSource>,
    ) -> Result<Game, GameError> {
        let snapshot: GameSnapshot =
            serde_json::from_str(json).map_err(|e| GameError::Serialization(e.to_string()))?;
        Game::restore(snapshot, source)
    }

    /// What `viewer` may see: its own tiles and claims, and only counts and
    /// exposed sets for everyone else.
    pub fn view(&self, viewer: Seat) -> Result<GameView, GameError> {
        let me = self.player(viewer).ok_or(GameError::EmptySeat(viewer))?;
        let seats = Seat::ALL.map(|seat| {
            self.player(seat).map(|p| {
                let (hidden, shown): (Vec<&OpenedSet>, Vec<&OpenedSet>) = p
                    .opened()
                    .iter()
                    .partition(|s| s.kind == MeldKind::ConcealedGang && seat != viewer);
                SeatView {
                    seat,
                    concealed_count: p.concealed_len(),
                    has_picked: p.picked().is_some(),
                    opened: shown.into_iter().cloned().collect(),
                    concealed_kongs: hidden.len(),
                }
            })
        });
        Ok(GameView {
            viewer,
            state: self.state,
            current: self.current,
            dealer: self.dealer,
            latest_tile: self.latest_tile,
            hand: me.hand().to_vec(),
            picked: me.picked(),
            seats,
            discards: self.discards.clone(),
            tiles_remaining: self.tiles_remaining(),
            claims: self
                .claims
                .entries()
                .iter()
                .filter(|c| c.seat == viewer)
                .cloned()
                .collect(),
            outcome: self.outcome,
        })
    }
}

/// Public information about one seat.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: Seat,
    pub concealed_count: usize,
    pub has_picked: bool,
    pub opened: Vec<OpenedSet>,
    /// Concealed kongs declared by another seat, shown face down
    pub concealed_kongs: usize,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub viewer: Seat,
    pub state: GameState,
    pub current: Option<Seat>,
    pub dealer: Option<Seat>,
    pub latest_tile: Option<TileId>,
    pub hand: Vec<TileId>,
    pub picked: Option<TileId>,
    pub seats: [Option<SeatView>; 4],
    pub discards: [Vec<TileId>; 4],
    pub tiles_remaining: usize,
    /// The viewer's own claim entries
    pub claims: Vec<Claim>,
    pub outcome: Option<Outcome>,
}
