//! Fixtures for building tables with hand-picked tiles.
//!
//! `table` restores a game in `WaitingAction` for the given seat. Tiles not
//! placed in a hand fill the walls in id order starting at East slot 0, so
//! the next live draw is always the lowest unused id.

use majiang_engine::claims::ClaimQueue;
use majiang_engine::game::{Game, GameState};
use majiang_engine::player::{Player, Seat, SeatSlot};
use majiang_engine::snapshot::GameSnapshot;
use majiang_engine::tiles::{full_set, TileId};
use majiang_engine::wall::{SeededDeal, Wall, WallCursor, Walls, WALL_LEN};

#[allow(dead_code)]
pub fn m(rank: u8, copy: u8) -> TileId {
    TileId::new((rank - 1) * 4 + copy).unwrap()
}

#[allow(dead_code)]
pub fn p(rank: u8, copy: u8) -> TileId {
    TileId::new(36 + (rank - 1) * 4 + copy).unwrap()
}

#[allow(dead_code)]
pub fn s(rank: u8, copy: u8) -> TileId {
    TileId::new(72 + (rank - 1) * 4 + copy).unwrap()
}

/// Winds then dragons, rank 1..=7
#[allow(dead_code)]
pub fn h(rank: u8, copy: u8) -> TileId {
    TileId::new(108 + (rank - 1) * 4 + copy).unwrap()
}

/// Three copies of a face starting at copy 0.
#[allow(dead_code)]
pub fn triple(f: fn(u8, u8) -> TileId, rank: u8) -> Vec<TileId> {
    (0..3).map(|c| f(rank, c)).collect()
}

#[allow(dead_code)]
pub struct Seating {
    pub seat: Seat,
    pub hand: Vec<TileId>,
    pub picked: Option<TileId>,
}

#[allow(dead_code)]
pub fn seat(seat: Seat, hand: Vec<TileId>, picked: Option<TileId>) -> Seating {
    Seating { seat, hand, picked }
}

/// Table whose walls hold every tile not dealt.
#[allow(dead_code)]
pub fn table(seatings: Vec<Seating>, current: Seat) -> Game {
    let used: Vec<TileId> = seatings
        .iter()
        .flat_map(|s| s.hand.iter().copied().chain(s.picked))
        .collect();
    let wall: Vec<TileId> = full_set().into_iter().filter(|t| !used.contains(t)).collect();
    table_with_wall(seatings, current, wall)
}

/// Table whose walls hold exactly `wall`, laid out from East slot 0.
#[allow(dead_code)]
pub fn table_with_wall(seatings: Vec<Seating>, current: Seat, wall: Vec<TileId>) -> Game {
    let mut players: [SeatSlot; 4] = Default::default();
    for s in seatings {
        players[s.seat.index()] =
            SeatSlot::Occupied(Player::with_tiles(s.seat, s.hand, s.picked, Vec::new()));
    }

    let mut slots: Vec<Option<TileId>> = wall.iter().copied().map(Some).collect();
    slots.resize(WALL_LEN * 4, None);
    let walls = Walls::from_walls(Seat::ALL.map(|seat| {
        let start = seat.index() * WALL_LEN;
        Wall::new(seat, slots[start..start + WALL_LEN].to_vec())
    }));

    let last = wall.len().saturating_sub(1);
    let dead = WallCursor::new(
        Seat::from_index(last / WALL_LEN).unwrap(),
        last % WALL_LEN,
    );

    let snapshot = GameSnapshot {
        players,
        walls,
        discards: Default::default(),
        state: GameState::WaitingAction,
        latest_tile: None,
        current: Some(current),
        dealer: Some(current),
        live_cursor: WallCursor::new(Seat::East, 0),
        dead_cursor: dead,
        claims: ClaimQueue::new(),
        outcome: None,
        history: Vec::new(),
    };
    Game::restore(snapshot, Box::new(SeededDeal::new(0))).expect("fixture snapshot is valid")
}

/// Thirteen honors for a seat that should never claim suited discards.
#[allow(dead_code)]
pub fn honor_filler() -> Vec<TileId> {
    let mut tiles = Vec::new();
    for rank in 1..=4 {
        tiles.extend(triple(h, rank));
    }
    tiles.push(h(5, 0));
    tiles
}
