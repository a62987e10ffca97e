use crate::tiles::{sort_tiles, TileId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A compass seat at the table. Turn order is East → South → West → North.
///
/// Serialized as its index (0..4).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Seat {
    East,
    South,
    West,
    North,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::East, Seat::South, Seat::West, Seat::North];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Seat> {
        Seat::ALL.get(index).copied()
    }

    /// Seat `steps` places later in turn order.
    pub fn offset(self, steps: usize) -> Seat {
        Seat::ALL[(self.index() + steps) % 4]
    }

    pub fn next(self) -> Seat {
        self.offset(1)
    }

    pub fn prev(self) -> Seat {
        self.offset(3)
    }
}

impl TryFrom<u8> for Seat {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Seat::from_index(usize::from(raw)).ok_or_else(|| format!("seat index {} is out of range", raw))
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> u8 {
        seat as u8
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
            Seat::North => "North",
        };
        f.write_str(name)
    }
}

/// How an exposed set was formed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldKind {
    /// Triplet completed with a discard
    Peng,
    /// Run completed with the previous seat's discard
    Chi,
    /// Quad completed with a discard
    Gang,
    /// Quad declared from the hand
    ConcealedGang,
}

/// A set of 3 or 4 tiles taken out of the concealed hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct OpenedSet {
    /// All tiles of the set, the claimed tile included
    pub tiles: Vec<TileId>,
    /// The claimed discard; `None` for a concealed kong
    pub target: Option<TileId>,
    pub kind: MeldKind,
    /// Seat the target came from (the owner for a concealed kong)
    pub from: Seat,
}

/// A seated player and the tiles they hold.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    seat: Seat,
    /// Concealed tiles, sorted by id, excluding `picked`
    hand: Vec<TileId>,
    /// The just-drawn tile awaiting a decision
    picked: Option<TileId>,
    opened: Vec<OpenedSet>,
}

impl Player {
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            hand: Vec::with_capacity(14),
            picked: None,
            opened: Vec::new(),
        }
    }

    /// A player holding the given tiles; the hand is sorted on the way in.
    pub fn with_tiles(
        seat: Seat,
        mut hand: Vec<TileId>,
        picked: Option<TileId>,
        opened: Vec<OpenedSet>,
    ) -> Self {
        sort_tiles(&mut hand);
        Self {
            seat,
            hand,
            picked,
            opened,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }
    pub fn hand(&self) -> &[TileId] {
        &self.hand
    }
    pub fn picked(&self) -> Option<TileId> {
        self.picked
    }
    pub fn opened(&self) -> &[OpenedSet] {
        &self.opened
    }

    /// Concealed hand plus the picked tile, sorted.
    pub fn concealed(&self) -> Vec<TileId> {
        let mut tiles = self.hand.clone();
        tiles.extend(self.picked);
        sort_tiles(&mut tiles);
        tiles
    }

    /// Number of concealed tiles including the picked one.
    pub fn concealed_len(&self) -> usize {
        self.hand.len() + usize::from(self.picked.is_some())
    }

    pub fn holds(&self, tile: TileId) -> bool {
        self.hand.contains(&tile)
    }

    pub(crate) fn give(&mut self, tile: TileId) {
        self.hand.push(tile);
    }

    pub(crate) fn sort_hand(&mut self) {
        sort_tiles(&mut self.hand);
    }

    pub(crate) fn set_picked(&mut self, tile: Option<TileId>) {
        self.picked = tile;
    }

    /// Pops the highest tile of the sorted hand into `picked`.
    pub(crate) fn pick_from_hand(&mut self) {
        self.picked = self.hand.pop();
    }

    /// Moves the picked tile (if any) into the hand and re-sorts.
    pub(crate) fn merge_picked(&mut self) {
        if let Some(t) = self.picked.take() {
            self.hand.push(t);
        }
        self.sort_hand();
    }

    /// Removes one instance of each tile. Callers validate presence first.
    pub(crate) fn remove_tiles(&mut self, tiles: &[TileId]) {
        for t in tiles {
            if let Some(pos) = self.hand.iter().position(|h| h == t) {
                self.hand.remove(pos);
            }
        }
    }

    pub(crate) fn push_set(&mut self, set: OpenedSet) {
        self.opened.push(set);
    }
}

/// One of the four fixed places at the table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "Option<Player>", into = "Option<Player>")]
pub enum SeatSlot {
    #[default]
    Empty,
    Occupied(Player),
}

impl SeatSlot {
    pub fn player(&self) -> Option<&Player> {
        match self {
            SeatSlot::Occupied(p) => Some(p),
            SeatSlot::Empty => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        match self {
            SeatSlot::Occupied(p) => Some(p),
            SeatSlot::Empty => None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, SeatSlot::Occupied(_))
    }
}

impl From<Option<Player>> for SeatSlot {
    fn from(p: Option<Player>) -> Self {
        p.map_or(SeatSlot::Empty, SeatSlot::Occupied)
    }
}

impl From<SeatSlot> for Option<Player> {
    fn from(slot: SeatSlot) -> Self {
        match slot {
            SeatSlot::Occupied(p) => Some(p),
            SeatSlot::Empty => None,
        }
    }
}
