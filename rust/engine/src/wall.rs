use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::player::Seat;
use crate::tiles::{full_set, TileId, TILE_COUNT};

/// Slots per seat wall.
pub const WALL_LEN: usize = TILE_COUNT / 4;

/// Source of all randomness in a hand: the wall shuffle and the dice.
pub trait DealSource: Send + fmt::Debug {
    fn shuffle(&mut self, tiles: &mut [TileId]);
    /// Two independent 1-6 rolls.
    fn roll(&mut self) -> (u8, u8);
}

/// Deterministic deal source; the same seed always builds the same walls
/// and rolls the same dice.
#[derive(Debug, Clone)]
pub struct SeededDeal {
    rng: ChaCha20Rng,
    seed: u64,
}

impl SeededDeal {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DealSource for SeededDeal {
    fn shuffle(&mut self, tiles: &mut [TileId]) {
        tiles.shuffle(&mut self.rng);
    }

    fn roll(&mut self) -> (u8, u8) {
        (self.rng.random_range(1..=6), self.rng.random_range(1..=6))
    }
}

/// A draw position: seat wall plus slot index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WallCursor {
    pub seat: Seat,
    pub index: usize,
}

impl WallCursor {
    pub fn new(seat: Seat, index: usize) -> Self {
        Self { seat, index }
    }

    /// Forward step used by the live cursor.
    pub fn advance(&mut self) {
        self.index += 1;
        if self.index >= WALL_LEN {
            self.index = 0;
            self.seat = self.seat.next();
        }
    }

    /// Backward step used by the dead-wall cursor.
    pub fn retreat(&mut self) {
        if self.index == 0 {
            self.index = WALL_LEN - 1;
            self.seat = self.seat.prev();
        } else {
            self.index -= 1;
        }
    }
}

impl fmt::Display for WallCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.seat, self.index)
    }
}

/// Live and dead cursors derived from the dealer seat and a dice roll.
pub fn cursors_from_dice(dealer: Seat, dice: (u8, u8)) -> (WallCursor, WallCursor) {
    let (d1, d2) = dice;
    let seat = dealer.offset(usize::from(d1) + usize::from(d2));
    let index = (usize::from(d1.max(d2)) + 1) * 2;
    (WallCursor::new(seat, index), WallCursor::new(seat, index - 1))
}

/// One seat's stack of 34 slots; `None` marks a drawn slot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    seat: Seat,
    slots: Vec<Option<TileId>>,
}

impl Wall {
    pub fn new(seat: Seat, slots: Vec<Option<TileId>>) -> Self {
        Self { seat, slots }
    }

    fn empty(seat: Seat) -> Self {
        Self::new(seat, vec![None; WALL_LEN])
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn slots(&self) -> &[Option<TileId>] {
        &self.slots
    }

    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// The four seat walls and the two draw rules over them.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Walls {
    walls: [Wall; 4],
}

impl Walls {
    /// Four walls with every slot drawn.
    pub fn empty() -> Self {
        Self {
            walls: Seat::ALL.map(Wall::empty),
        }
    }

    /// Shuffles the full set and splits it into four contiguous walls in
    /// seat order.
    pub fn build(source: &mut dyn DealSource) -> Self {
        let mut tiles = full_set();
        source.shuffle(&mut tiles);
        let walls = Seat::ALL.map(|seat| {
            let start = seat.index() * WALL_LEN;
            let slots = tiles[start..start + WALL_LEN]
                .iter()
                .copied()
                .map(Some)
                .collect();
            Wall::new(seat, slots)
        });
        Self { walls }
    }

    pub fn from_walls(walls: [Wall; 4]) -> Self {
        Self { walls }
    }

    pub fn wall(&self, seat: Seat) -> &Wall {
        &self.walls[seat.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter()
    }

    /// Every tile still standing in the walls.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.walls.iter().flat_map(|w| w.slots.iter().flatten().copied())
    }

    pub fn remaining(&self) -> usize {
        self.walls.iter().map(Wall::remaining).sum()
    }

    fn slot(&self, seat: Seat, index: usize) -> Option<TileId> {
        self.walls[seat.index()].slots.get(index).copied().flatten()
    }

    fn take_slot(&mut self, seat: Seat, index: usize) -> TileId {
        match self.walls[seat.index()].slots.get_mut(index).and_then(Option::take) {
            Some(tile) => tile,
            None => panic!("drew from empty wall slot {}[{}]", seat, index),
        }
    }

    pub fn peek_live(&self, cursor: WallCursor) -> Option<TileId> {
        self.slot(cursor.seat, cursor.index)
    }

    /// Takes the tile under the live cursor and advances it.
    ///
    /// # Panics
    ///
    /// If the slot is already empty; callers check [`Walls::peek_live`] first.
    pub fn take_live(&mut self, cursor: &mut WallCursor) -> TileId {
        let tile = self.take_slot(cursor.seat, cursor.index);
        cursor.advance();
        tile
    }

    /// Tiles sit in stacked pairs; the dead wall takes the upper tile of the
    /// pair under the cursor while it stands, then the lower one.
    fn dead_index(&self, cursor: WallCursor) -> usize {
        let upper = cursor.index / 2 * 2;
        if self.slot(cursor.seat, upper).is_some() {
            upper
        } else {
            upper + 1
        }
    }

    pub fn peek_dead(&self, cursor: WallCursor) -> Option<TileId> {
        self.slot(cursor.seat, self.dead_index(cursor))
    }

    /// Takes a replacement tile from the dead wall and retreats the cursor.
    ///
    /// # Panics
    ///
    /// If the chosen slot is already empty; callers check
    /// [`Walls::peek_dead`] first.
    pub fn take_dead(&mut self, cursor: &mut WallCursor) -> TileId {
        let index = self.dead_index(*cursor);
        let tile = self.take_slot(cursor.seat, index);
        cursor.retreat();
        tile
    }
}
