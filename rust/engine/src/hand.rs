//! Tile predicates and winning-hand decomposition.
//!
//! Everything here is pure: functions take tile slices and never touch game
//! state, so the claim logic and the bots can call them freely.

use crate::tiles::{TileFace, TileId, FACE_COUNT};
use serde::{Deserialize, Serialize};

/// True iff every tile shares one face. Copy index is ignored.
pub fn same_face(tiles: &[TileId]) -> bool {
    match tiles.split_first() {
        Some((first, rest)) => rest.iter().all(|t| t.face() == first.face()),
        None => true,
    }
}

/// True iff 2 or 3 tiles of one numbered suit have strictly consecutive
/// ranks once sorted. Honors never qualify.
pub fn is_consecutive(tiles: &[TileId]) -> bool {
    if !(2..=3).contains(&tiles.len()) {
        return false;
    }
    let mut faces: Vec<TileFace> = tiles.iter().map(|t| t.face()).collect();
    if !faces[0].suit.is_numbered() {
        return false;
    }
    faces.sort_by_key(|f| f.rank);
    faces
        .windows(2)
        .all(|w| w[0].suit == w[1].suit && w[0].rank + 1 == w[1].rank)
}

fn count_face(hand: &[TileId], target: TileId) -> usize {
    hand.iter().filter(|t| t.face() == target.face()).count()
}

pub fn can_peng(hand: &[TileId], target: TileId) -> bool {
    count_face(hand, target) >= 2
}

pub fn can_gang(hand: &[TileId], target: TileId) -> bool {
    count_face(hand, target) >= 3
}

/// Every distinct pair of hand tiles that completes a run with `target`.
///
/// One representative tile is returned per face (the lowest id held), so a
/// hand holding two copies of a face does not yield duplicate options.
pub fn chi_options(hand: &[TileId], target: TileId) -> Vec<[TileId; 2]> {
    let mut reps: Vec<TileId> = Vec::new();
    let mut sorted = hand.to_vec();
    sorted.sort_unstable();
    for t in sorted {
        if t.face() == target.face() {
            continue;
        }
        if reps.last().is_some_and(|r| r.face() == t.face()) {
            continue;
        }
        reps.push(t);
    }

    let mut options = Vec::new();
    for i in 0..reps.len() {
        for j in i + 1..reps.len() {
            if is_consecutive(&[reps[i], reps[j], target]) {
                options.push([reps[i], reps[j]]);
            }
        }
    }
    options
}

pub fn can_chi(hand: &[TileId], target: TileId) -> bool {
    !chi_options(hand, target).is_empty()
}

/// One 3-tile group of a decomposed hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Group {
    Triplet(TileFace),
    /// Run identified by its lowest face
    Run(TileFace),
}

/// A winning shape: exactly one pair plus zero or more groups.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub pair: TileFace,
    pub groups: Vec<Group>,
}

fn face_counts(tiles: &[TileId]) -> [u8; FACE_COUNT] {
    let mut counts = [0u8; FACE_COUNT];
    for t in tiles {
        counts[t.face().index()] += 1;
    }
    counts
}

/// Strips groups from the lowest remaining face upward. The lowest face must
/// start either a triplet or a run, so trying both branches there covers
/// every decomposition.
fn strip_groups(counts: &mut [u8; FACE_COUNT], groups: &mut Vec<Group>) -> bool {
    let Some(i) = counts.iter().position(|&c| c > 0) else {
        return true;
    };
    let Some(face) = TileFace::from_index(i) else {
        return false;
    };

    if counts[i] >= 3 {
        counts[i] -= 3;
        groups.push(Group::Triplet(face));
        if strip_groups(counts, groups) {
            return true;
        }
        groups.pop();
        counts[i] += 3;
    }

    let runs_from_here = face.suit.is_numbered() && face.rank <= 7;
    if runs_from_here && counts[i + 1] > 0 && counts[i + 2] > 0 {
        for k in i..i + 3 {
            counts[k] -= 1;
        }
        groups.push(Group::Run(face));
        if strip_groups(counts, groups) {
            return true;
        }
        groups.pop();
        for k in i..i + 3 {
            counts[k] += 1;
        }
    }

    false
}

/// Finds a pair-plus-groups decomposition of exactly these tiles.
///
/// Pair candidates are tried in face order; for each one the remainder is
/// searched with full backtracking, so hands with ambiguous groupings are
/// never rejected.
pub fn decompose(tiles: &[TileId]) -> Option<Decomposition> {
    if tiles.len() % 3 != 2 {
        return None;
    }
    let mut counts = face_counts(tiles);
    for i in 0..FACE_COUNT {
        if counts[i] < 2 {
            continue;
        }
        counts[i] -= 2;
        let mut groups = Vec::with_capacity(tiles.len() / 3);
        if strip_groups(&mut counts, &mut groups) {
            return TileFace::from_index(i).map(|pair| Decomposition { pair, groups });
        }
        counts[i] += 2;
    }
    None
}

/// True iff `hand` plus the optional `extra` tile forms a winning shape.
pub fn can_win(hand: &[TileId], extra: Option<TileId>) -> bool {
    let mut tiles = hand.to_vec();
    tiles.extend(extra);
    decompose(&tiles).is_some()
}
