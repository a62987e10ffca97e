//! Baseline bot for Mahjong seats.
//!
//! Provides a simple opponent for self-play, testing and benchmarking. The
//! strategy is greedy and stateless: every decision is a pure function of the
//! seat's own tiles and the pending claim window.

use crate::AIOpponent;
use majiang_engine::claims::{ClaimKind, ClaimStatus};
use majiang_engine::game::{Game, GameState};
use majiang_engine::hand::{can_win, chi_options};
use majiang_engine::logger::Action;
use majiang_engine::player::Seat;
use majiang_engine::tiles::{TileFace, TileId};

/// Baseline bot implementing a greedy rule-based strategy.
///
/// # Strategy
///
/// On its own turn:
/// - declares a self-drawn win whenever the concealed tiles form one
/// - declares a concealed kong as soon as it holds all four copies of a face
/// - otherwise discards its least connected tile (see [`choose_discard`])
///
/// On someone else's discard it takes the strongest claim the engine offered
/// it (win, kong, pung, then the first available chow) and passes otherwise.
///
/// # Example
///
/// ```rust
/// use majiang_ai::{baseline::BaselineAI, AIOpponent};
/// use majiang_engine::game::Game;
/// use majiang_engine::player::Seat;
///
/// let ai = BaselineAI::new();
/// let mut game = Game::new_with_seed(7);
/// game.init(&Seat::ALL).unwrap();
/// game.start().unwrap();
///
/// let dealer = game.current().unwrap();
/// assert!(ai.decide(&game, dealer).is_some());
/// assert!(ai.decide(&game, dealer.next()).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    fn own_turn(game: &Game, seat: Seat) -> Option<Action> {
        let concealed = game.player(seat)?.concealed();
        if can_win(&concealed, None) {
            return Some(Action::SelfDrawWin);
        }
        if let Some(kong) = full_kong(&concealed) {
            return Some(Action::ConcealedGang(kong));
        }
        choose_discard(&concealed).map(Action::Discard)
    }

    fn answer_discard(game: &Game, seat: Seat) -> Option<Action> {
        let target = game.latest_tile()?;
        let hand = game.player(seat)?.concealed();
        let offered: Vec<ClaimKind> = game
            .pending_claims()
            .entries()
            .iter()
            .filter(|c| c.seat == seat && c.status == ClaimStatus::Waiting)
            .map(|c| c.kind)
            .collect();
        if offered.is_empty() {
            return None;
        }

        let face = target.face();
        // entries are priority ordered, so the first one that works is the strongest
        for kind in offered {
            let call = match kind {
                ClaimKind::Hu => Some(Action::Hu),
                ClaimKind::Gang => <[TileId; 3]>::try_from(of_face(&hand, face, 3))
                    .ok()
                    .map(Action::Gang),
                ClaimKind::Peng => <[TileId; 2]>::try_from(of_face(&hand, face, 2))
                    .ok()
                    .map(Action::Peng),
                ClaimKind::Chi => chi_options(&hand, target).first().copied().map(Action::Chi),
            };
            if call.is_some() {
                return call;
            }
        }
        Some(Action::Pass)
    }
}

impl AIOpponent for BaselineAI {
    fn decide(&self, game: &Game, seat: Seat) -> Option<Action> {
        match game.state() {
            GameState::WaitingAction if game.current() == Some(seat) => Self::own_turn(game, seat),
            GameState::WaitingPass => Self::answer_discard(game, seat),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

/// Up to `n` held tiles of `face`, lowest ids first.
fn of_face(tiles: &[TileId], face: TileFace, n: usize) -> Vec<TileId> {
    let mut found: Vec<TileId> = tiles.iter().copied().filter(|t| t.face() == face).collect();
    found.sort_unstable();
    found.truncate(n);
    found
}

/// All four copies of the first face held four times over, if any.
fn full_kong(tiles: &[TileId]) -> Option<[TileId; 4]> {
    let mut sorted = tiles.to_vec();
    sorted.sort_unstable();
    sorted.iter().find_map(|t| {
        let copies = t.face().copies();
        copies.iter().all(|c| tiles.contains(c)).then_some(copies)
    })
}

/// How much a tile contributes to the rest of the hand.
///
/// Each other copy of the same face counts 4, a same-suit neighbour one rank
/// away counts 2 and one two ranks away counts 1. Honors only score on copies.
fn keep_score(tile: TileId, tiles: &[TileId]) -> u32 {
    let face = tile.face();
    tiles
        .iter()
        .filter(|other| **other != tile)
        .map(|other| {
            let f = other.face();
            if f == face {
                4
            } else if f.suit == face.suit && face.suit.is_numbered() {
                match f.rank.abs_diff(face.rank) {
                    1 => 2,
                    2 => 1,
                    _ => 0,
                }
            } else {
                0
            }
        })
        .sum()
}

/// The tile to throw away: lowest [`keep_score`], highest id on ties.
pub fn choose_discard(tiles: &[TileId]) -> Option<TileId> {
    tiles
        .iter()
        .copied()
        .min_by(|a, b| {
            keep_score(*a, tiles)
                .cmp(&keep_score(*b, tiles))
                .then_with(|| b.cmp(a))
        })
}
