use crate::claims::{ClaimCall, ClaimKind};
use crate::errors::GameError;
use crate::hand::{can_gang, can_peng, can_win, chi_options, is_consecutive, same_face};
use crate::player::Seat;
use crate::tiles::TileId;

fn check_held(seat: Seat, available: &[TileId], tiles: &[TileId]) -> Result<(), GameError> {
    for (i, tile) in tiles.iter().enumerate() {
        if tiles[..i].contains(tile) {
            return Err(GameError::IllegalSet(format!("tile {} listed twice", tile)));
        }
        if !available.contains(tile) {
            return Err(GameError::TileNotInHand { seat, tile: *tile });
        }
    }
    Ok(())
}

/// Validates a claim call against the claimant's concealed hand and the
/// discarded `target`.
///
/// The listed tiles must be distinct and held; together with `target` they
/// must form a run (chi), a triplet (peng) or a quad (gang). A win call
/// checks the whole hand plus `target`.
///
/// # Errors
///
/// - [`GameError::TileNotInHand`] - a listed tile is not in the hand
/// - [`GameError::IllegalSet`] - the tiles do not form the claimed set
/// - [`GameError::CannotWin`] - a win call on a non-winning hand
///
/// # Examples
///
/// ```
/// use majiang_engine::claims::ClaimCall;
/// use majiang_engine::errors::GameError;
/// use majiang_engine::player::Seat;
/// use majiang_engine::rules::validate_call;
/// use majiang_engine::tiles::TileId;
///
/// let t = |raw| TileId::new(raw).unwrap();
/// // 1m 2m in hand, 3m discarded
/// let hand = [t(0), t(4), t(40)];
/// assert!(validate_call(Seat::South, &hand, &ClaimCall::Chi([t(0), t(4)]), t(8)).is_ok());
///
/// let err = validate_call(Seat::South, &hand, &ClaimCall::Peng([t(0), t(4)]), t(8));
/// assert!(matches!(err, Err(GameError::IllegalSet(_))));
/// ```
pub fn validate_call(
    seat: Seat,
    hand: &[TileId],
    call: &ClaimCall,
    target: TileId,
) -> Result<(), GameError> {
    check_held(seat, hand, call.tiles())?;
    match call {
        ClaimCall::Chi([a, b]) => {
            if !is_consecutive(&[*a, *b, target]) {
                return Err(GameError::IllegalSet(format!(
                    "{} {} {} is not a run",
                    a, b, target
                )));
            }
        }
        ClaimCall::Peng([a, b]) => {
            if !same_face(&[*a, *b, target]) {
                return Err(GameError::IllegalSet(format!(
                    "{} {} {} is not a triplet",
                    a, b, target
                )));
            }
        }
        ClaimCall::Gang([a, b, c]) => {
            if !same_face(&[*a, *b, *c, target]) {
                return Err(GameError::IllegalSet(format!(
                    "{} {} {} {} is not a quad",
                    a, b, c, target
                )));
            }
        }
        ClaimCall::Hu => {
            if !can_win(hand, Some(target)) {
                return Err(GameError::CannotWin { seat });
            }
        }
    }
    Ok(())
}

/// Validates a concealed kong declared from `available` (hand plus picked).
pub fn validate_concealed_gang(
    seat: Seat,
    available: &[TileId],
    tiles: &[TileId; 4],
) -> Result<(), GameError> {
    check_held(seat, available, tiles)?;
    if !same_face(tiles) {
        return Err(GameError::IllegalSet(format!(
            "{} {} {} {} is not a quad",
            tiles[0], tiles[1], tiles[2], tiles[3]
        )));
    }
    Ok(())
}

/// Validates a self-drawn win on the full concealed hand.
pub fn validate_self_draw(seat: Seat, concealed: &[TileId]) -> Result<(), GameError> {
    if can_win(concealed, None) {
        Ok(())
    } else {
        Err(GameError::CannotWin { seat })
    }
}

/// Claim kinds a seat may make on `target`, strongest first.
///
/// Kong replaces pung; chow is only offered to the seat right after the
/// discarder.
pub fn claim_kinds(hand: &[TileId], target: TileId, is_next: bool) -> Vec<ClaimKind> {
    let mut kinds = Vec::new();
    if can_win(hand, Some(target)) {
        kinds.push(ClaimKind::Hu);
    }
    if can_gang(hand, target) {
        kinds.push(ClaimKind::Gang);
    } else if can_peng(hand, target) {
        kinds.push(ClaimKind::Peng);
    }
    if is_next && !chi_options(hand, target).is_empty() {
        kinds.push(ClaimKind::Chi);
    }
    kinds
}
