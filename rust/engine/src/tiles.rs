use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of physical tiles in a full set (34 faces × 4 copies).
pub const TILE_COUNT: usize = 136;

/// Number of distinct faces.
pub const FACE_COUNT: usize = 34;

/// Id reported by [`Tile::UNKNOWN`], outside the 0..136 range.
pub const UNKNOWN_TILE_ID: u16 = 999;

/// Represents one of the three numbered suits or the honor group.
/// Used as a component of [`TileFace`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    /// Characters (wan), ranks 1-9
    Characters,
    /// Dots (tong), ranks 1-9
    Dots,
    /// Bamboo (tiao), ranks 1-9
    Bamboo,
    /// Winds and dragons, ranks 1-7
    Honor,
}

impl Suit {
    /// Numbered suits can form runs; honors cannot.
    pub fn is_numbered(self) -> bool {
        !matches!(self, Suit::Honor)
    }

    fn ranks(self) -> u8 {
        match self {
            Suit::Honor => 7,
            _ => 9,
        }
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Characters, Suit::Dots, Suit::Bamboo, Suit::Honor]
}

const FACE_NAMES: [&str; FACE_COUNT] = [
    "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", //
    "1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p", //
    "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", //
    "East", "South", "West", "North", "Red", "Green", "White",
];

/// A tile face: what is printed on the tile, ignoring which copy it is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TileFace {
    /// The suit of the face
    pub suit: Suit,
    /// 1-9 for numbered suits, 1-7 for honors
    pub rank: u8,
}

impl TileFace {
    /// Dense index 0..34 used for count tables.
    pub fn index(self) -> usize {
        let base = match self.suit {
            Suit::Characters => 0,
            Suit::Dots => 9,
            Suit::Bamboo => 18,
            Suit::Honor => 27,
        };
        base + usize::from(self.rank) - 1
    }

    pub fn from_index(index: usize) -> Option<TileFace> {
        if index >= FACE_COUNT {
            return None;
        }
        let (suit, base) = match index {
            0..=8 => (Suit::Characters, 0),
            9..=17 => (Suit::Dots, 9),
            18..=26 => (Suit::Bamboo, 18),
            _ => (Suit::Honor, 27),
        };
        Some(TileFace {
            suit,
            rank: (index - base) as u8 + 1,
        })
    }

    pub fn name(self) -> &'static str {
        FACE_NAMES[self.index()]
    }

    /// The four physical tiles carrying this face.
    pub fn copies(self) -> [TileId; 4] {
        let base = (self.index() * 4) as u8;
        [
            TileId(base),
            TileId(base + 1),
            TileId(base + 2),
            TileId(base + 3),
        ]
    }
}

impl fmt::Display for TileFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn all_faces() -> impl Iterator<Item = TileFace> {
    all_suits().into_iter().flat_map(|suit| {
        (1..=suit.ranks()).map(move |rank| TileFace { suit, rank })
    })
}

/// Identity of one physical tile, 0..136.
///
/// The id is a stable index into the fixed tile table: `id / 4` is the face
/// index and `id % 4` the copy. Values outside the range are rejected both on
/// construction and when deserializing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TileId(u8);

impl TileId {
    pub fn new(raw: u8) -> Option<TileId> {
        (usize::from(raw) < TILE_COUNT).then_some(TileId(raw))
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn face(self) -> TileFace {
        // always in range by construction
        match TileFace::from_index(usize::from(self.0 / 4)) {
            Some(face) => face,
            None => unreachable!("tile id {} out of range", self.0),
        }
    }

    pub fn copy_index(self) -> u8 {
        self.0 % 4
    }

    pub fn name(self) -> &'static str {
        self.face().name()
    }
}

impl TryFrom<u8> for TileId {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        TileId::new(raw).ok_or_else(|| format!("tile id {} is out of range", raw))
    }
}

impl From<TileId> for u8 {
    fn from(id: TileId) -> u8 {
        id.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name(), self.0)
    }
}

/// Display record for a tile id, including the two sentinels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tile {
    pub id: u16,
    pub face: Option<TileFace>,
    pub copy_index: u8,
    pub name: &'static str,
}

impl Tile {
    /// No tile at all (an empty slot).
    pub const VOID: Tile = Tile {
        id: u16::MAX,
        face: None,
        copy_index: 0,
        name: "",
    };

    /// Fallback for ids that are not in the table.
    pub const UNKNOWN: Tile = Tile {
        id: UNKNOWN_TILE_ID,
        face: None,
        copy_index: 0,
        name: "?",
    };

    /// Look up a raw id; misses yield [`Tile::UNKNOWN`].
    pub fn lookup(raw: u16) -> Tile {
        match u8::try_from(raw).ok().and_then(TileId::new) {
            Some(id) => Tile::from(id),
            None => Tile::UNKNOWN,
        }
    }

    /// Display record for an optional slot; `None` is [`Tile::VOID`].
    pub fn from_slot(slot: Option<TileId>) -> Tile {
        slot.map(Tile::from).unwrap_or(Tile::VOID)
    }

    pub fn is_void(&self) -> bool {
        *self == Tile::VOID
    }
}

impl From<TileId> for Tile {
    fn from(id: TileId) -> Tile {
        Tile {
            id: u16::from(id.raw()),
            face: Some(id.face()),
            copy_index: id.copy_index(),
            name: id.name(),
        }
    }
}

/// All 136 tile ids in table order.
pub fn full_set() -> Vec<TileId> {
    (0..TILE_COUNT as u8).map(TileId).collect()
}

/// Sort tiles by id in place.
pub fn sort_tiles(tiles: &mut [TileId]) {
    tiles.sort_unstable();
}

/// Render a list of tiles as space-separated face names.
pub fn format_tiles(tiles: &[TileId]) -> String {
    tiles
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(" ")
}
