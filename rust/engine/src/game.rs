use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::claims::{Claim, ClaimCall, ClaimKind, ClaimQueue, Resolution};
use crate::errors::GameError;
use crate::logger::{Action, ActionRecord};
use crate::player::{MeldKind, OpenedSet, Player, Seat, SeatSlot};
use crate::rules::{claim_kinds, validate_call, validate_concealed_gang, validate_self_draw};
use crate::tiles::{sort_tiles, TileId};
use crate::wall::{cursors_from_dice, DealSource, SeededDeal, WallCursor, Walls};

/// Lifecycle of one hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Walls built, players seated, nothing dealt
    Init,
    /// Opening hands being dealt
    Dispatching,
    /// The current seat must discard, declare a concealed kong or win
    WaitingAction,
    /// A discard is on the table and other seats may claim it
    WaitingPass,
    /// The hand is over; see [`Game::outcome`]
    End,
}

/// How a hand ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Won on the seat's own hand; `tile` is the drawn tile if any
    SelfDrawnWin { seat: Seat, tile: Option<TileId> },
    /// Won by claiming `from`'s discard
    DiscardWin { seat: Seat, tile: TileId, from: Seat },
    /// The live and dead walls met
    Exhausted,
}

/// The rules engine for one table.
///
/// All commands validate before they mutate: an `Err` leaves the game
/// exactly as it was.
///
/// # Examples
///
/// ```
/// use majiang_engine::game::{Game, GameState};
/// use majiang_engine::player::Seat;
///
/// let mut game = Game::new_with_seed(7);
/// game.init(&Seat::ALL).unwrap();
/// game.start().unwrap();
///
/// assert_eq!(game.state(), GameState::WaitingAction);
/// assert_eq!(game.current(), Some(Seat::East));
/// // 13 × 4 + 1 dealt
/// assert_eq!(game.tiles_remaining(), 136 - 53);
/// ```
#[derive(Debug)]
pub struct Game {
    pub(crate) seats: [SeatSlot; 4],
    pub(crate) walls: Walls,
    pub(crate) discards: [Vec<TileId>; 4],
    pub(crate) state: GameState,
    /// The discard currently open to claims
    pub(crate) latest_tile: Option<TileId>,
    pub(crate) current: Option<Seat>,
    pub(crate) dealer: Option<Seat>,
    pub(crate) live: WallCursor,
    pub(crate) dead: WallCursor,
    pub(crate) claims: ClaimQueue,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) history: Vec<ActionRecord>,
    pub(crate) source: Box<dyn DealSource>,
}

impl Game {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_source(Box::new(SeededDeal::new(seed)))
    }

    pub fn with_source(source: Box<dyn DealSource>) -> Self {
        Self {
            seats: Default::default(),
            walls: Walls::empty(),
            discards: Default::default(),
            state: GameState::Init,
            latest_tile: None,
            current: None,
            dealer: None,
            live: WallCursor::new(Seat::East, 0),
            dead: WallCursor::new(Seat::North, 0),
            claims: ClaimQueue::new(),
            outcome: None,
            history: Vec::new(),
            source,
        }
    }

    /// Clears the table, builds fresh walls and seats a player at each
    /// listed seat. Allowed in any state.
    pub fn init(&mut self, seats: &[Seat]) -> Result<(), GameError> {
        if seats.is_empty() {
            return Err(GameError::NoPlayers);
        }
        for (i, seat) in seats.iter().enumerate() {
            if seats[..i].contains(seat) {
                return Err(GameError::DuplicateSeat(*seat));
            }
        }

        self.seats = Default::default();
        for seat in seats {
            self.seats[seat.index()] = SeatSlot::Occupied(Player::new(*seat));
        }
        self.discards = Default::default();
        self.walls = Walls::build(self.source.as_mut());
        self.latest_tile = None;
        self.current = None;
        self.dealer = None;
        self.live = WallCursor::new(Seat::East, 0);
        self.dead = WallCursor::new(Seat::North, 0);
        self.claims.clear();
        self.outcome = None;
        self.history.clear();
        self.state = GameState::Init;
        debug!(?seats, "table initialised");
        Ok(())
    }

    /// Re-initialises with the players currently seated.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let seats = self.occupied_seats();
        self.init(&seats)
    }

    /// Assigns the dealer, rolls the dice and deals the opening hands.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.expect_state("start", GameState::Init)?;
        let dealer = self.assign_dealer().ok_or(GameError::NoPlayers)?;
        let dice = self.source.roll();
        let (live, dead) = cursors_from_dice(dealer, dice);
        self.live = live;
        self.dead = dead;
        debug!(%dealer, ?dice, %live, %dead, "dice rolled");
        self.dispatch(dealer);
        info!(%dealer, remaining = self.tiles_remaining(), "hand started");
        Ok(())
    }

    fn assign_dealer(&mut self) -> Option<Seat> {
        self.dealer = self
            .seats
            .iter()
            .find_map(|slot| slot.player().map(Player::seat));
        self.dealer
    }

    fn dispatch(&mut self, dealer: Seat) {
        self.state = GameState::Dispatching;
        // three passes of four, then one pass of one
        for per_seat in [4, 4, 4, 1] {
            for step in 0..4 {
                let seat = dealer.offset(step);
                if !self.seats[seat.index()].is_occupied() {
                    continue;
                }
                for _ in 0..per_seat {
                    let tile = self.walls.take_live(&mut self.live);
                    if let Some(p) = self.seats[seat.index()].player_mut() {
                        p.give(tile);
                    }
                }
            }
        }
        let extra = self.walls.take_live(&mut self.live);
        for slot in self.seats.iter_mut() {
            if let Some(p) = slot.player_mut() {
                if p.seat() == dealer {
                    p.give(extra);
                }
                p.sort_hand();
                if p.seat() == dealer {
                    p.pick_from_hand();
                }
            }
        }
        self.current = Some(dealer);
        self.state = GameState::WaitingAction;
    }

    fn expect_state(&self, action: &'static str, state: GameState) -> Result<(), GameError> {
        if self.state == state {
            Ok(())
        } else {
            Err(GameError::WrongState {
                action,
                state: self.state,
            })
        }
    }

    fn occupied(&self, seat: Seat) -> Result<&Player, GameError> {
        self.seats[seat.index()]
            .player()
            .ok_or(GameError::EmptySeat(seat))
    }

    fn occupied_mut(&mut self, seat: Seat) -> Result<&mut Player, GameError> {
        self.seats[seat.index()]
            .player_mut()
            .ok_or(GameError::EmptySeat(seat))
    }

    /// State, occupancy and turn checks shared by the WaitingAction commands.
    fn expect_turn(&self, seat: Seat, action: &'static str) -> Result<&Player, GameError> {
        self.expect_state(action, GameState::WaitingAction)?;
        let player = self.occupied(seat)?;
        if self.current != Some(seat) {
            return Err(GameError::NotYourTurn { seat });
        }
        Ok(player)
    }

    /// Next occupied seat after `seat` in turn order.
    fn next_occupied(&self, seat: Seat) -> Seat {
        (1..=4)
            .map(|step| seat.offset(step))
            .find(|s| self.seats[s.index()].is_occupied())
            .unwrap_or(seat)
    }

    fn record(&mut self, seat: Seat, action: Action) {
        self.history.push(ActionRecord { seat, action });
    }

    /// Discards a tile from the hand or the picked slot and opens the claim
    /// window.
    pub fn discard(&mut self, seat: Seat, tile: TileId) -> Result<(), GameError> {
        let player = self.expect_turn(seat, "discard")?;
        let from_hand = player.holds(tile);
        if !from_hand && player.picked() != Some(tile) {
            return Err(GameError::TileNotInHand { seat, tile });
        }

        let player = self.occupied_mut(seat)?;
        if from_hand {
            player.remove_tiles(&[tile]);
        } else {
            player.set_picked(None);
        }
        player.merge_picked();
        self.discards[seat.index()].push(tile);
        self.latest_tile = Some(tile);
        self.state = GameState::WaitingPass;
        self.record(seat, Action::Discard(tile));
        debug!(%seat, %tile, "discard");

        self.open_claims(seat, tile);
        self.settle_claims();
        Ok(())
    }

    /// Builds the claim queue: wins, then kongs and pungs, then the chow of
    /// the next seat, each class in turn order after the discarder.
    fn open_claims(&mut self, discarder: Seat, tile: TileId) {
        let next = self.next_occupied(discarder);
        let mut wins = Vec::new();
        let mut sets = Vec::new();
        let mut chows = Vec::new();
        for step in 1..4 {
            let seat = discarder.offset(step);
            let Some(player) = self.seats[seat.index()].player() else {
                continue;
            };
            for kind in claim_kinds(&player.concealed(), tile, seat == next) {
                let claim = Claim::waiting(seat, kind);
                match kind {
                    ClaimKind::Hu => wins.push(claim),
                    ClaimKind::Gang | ClaimKind::Peng => sets.push(claim),
                    ClaimKind::Chi => chows.push(claim),
                }
            }
        }
        wins.append(&mut sets);
        wins.append(&mut chows);
        debug!(claims = wins.len(), "claim window opened");
        self.claims = ClaimQueue::from_entries(wins);
    }

    fn settle_claims(&mut self) {
        match self.claims.resolve() {
            Resolution::Pending => {}
            Resolution::Fire { seat, call } => self.fire_claim(seat, call),
            Resolution::AllPassed => self.advance_turn(),
        }
    }

    fn fire_claim(&mut self, seat: Seat, call: ClaimCall) {
        let (Some(tile), Some(from)) = (self.latest_tile, self.current) else {
            return;
        };
        self.claims.clear();
        debug!(%seat, kind = %call.kind(), %tile, "claim fired");

        let kind = match call {
            ClaimCall::Hu => {
                self.finish(Outcome::DiscardWin { seat, tile, from });
                return;
            }
            ClaimCall::Chi(_) => MeldKind::Chi,
            ClaimCall::Peng(_) => MeldKind::Peng,
            ClaimCall::Gang(_) => MeldKind::Gang,
        };

        let pile = &mut self.discards[from.index()];
        if let Some(pos) = pile.iter().rposition(|t| *t == tile) {
            pile.remove(pos);
        }
        let mut tiles = call.tiles().to_vec();
        tiles.push(tile);
        sort_tiles(&mut tiles);
        if let Some(player) = self.seats[seat.index()].player_mut() {
            player.remove_tiles(call.tiles());
            player.push_set(OpenedSet {
                tiles,
                target: Some(tile),
                kind,
                from,
            });
        }
        self.latest_tile = None;
        self.current = Some(seat);
        self.state = GameState::WaitingAction;

        if kind == MeldKind::Gang {
            self.draw_replacement(seat);
        }
    }

    /// Everyone passed: the next seat draws from the live wall.
    fn advance_turn(&mut self) {
        self.claims.clear();
        self.latest_tile = None;
        let Some(current) = self.current else {
            return;
        };
        if self.walls.peek_live(self.live).is_none() {
            self.finish(Outcome::Exhausted);
            return;
        }
        let next = self.next_occupied(current);
        let tile = self.walls.take_live(&mut self.live);
        if let Some(p) = self.seats[next.index()].player_mut() {
            p.set_picked(Some(tile));
        }
        self.current = Some(next);
        self.state = GameState::WaitingAction;
        debug!(seat = %next, "turn advanced");
    }

    fn draw_replacement(&mut self, seat: Seat) {
        if self.walls.peek_dead(self.dead).is_none() {
            self.finish(Outcome::Exhausted);
            return;
        }
        let tile = self.walls.take_dead(&mut self.dead);
        if let Some(p) = self.seats[seat.index()].player_mut() {
            p.set_picked(Some(tile));
        }
        debug!(%seat, "replacement drawn");
    }

    fn finish(&mut self, outcome: Outcome) {
        self.claims.clear();
        self.outcome = Some(outcome);
        self.state = GameState::End;
        info!(?outcome, "hand over");
    }

    /// Declares a concealed kong from hand and picked tile, then draws a
    /// replacement from the dead wall.
    pub fn angang(&mut self, seat: Seat, tiles: [TileId; 4]) -> Result<(), GameError> {
        let player = self.expect_turn(seat, "declare a concealed kong")?;
        validate_concealed_gang(seat, &player.concealed(), &tiles)?;

        let player = self.occupied_mut(seat)?;
        if let Some(picked) = player.picked() {
            if tiles.contains(&picked) {
                player.set_picked(None);
            }
        }
        player.remove_tiles(&tiles);
        player.merge_picked();
        let mut set = tiles.to_vec();
        sort_tiles(&mut set);
        player.push_set(OpenedSet {
            tiles: set,
            target: None,
            kind: MeldKind::ConcealedGang,
            from: seat,
        });
        self.latest_tile = None;
        self.record(seat, Action::ConcealedGang(tiles));
        debug!(%seat, "concealed kong");
        self.draw_replacement(seat);
        Ok(())
    }

    /// Wins on the seat's own hand plus picked tile.
    pub fn self_draw_win(&mut self, seat: Seat) -> Result<(), GameError> {
        let player = self.expect_turn(seat, "declare a self-drawn win")?;
        validate_self_draw(seat, &player.concealed())?;
        let tile = player.picked();
        self.record(seat, Action::SelfDrawWin);
        self.finish(Outcome::SelfDrawnWin { seat, tile });
        Ok(())
    }

    /// Declines every pending claim of the seat. A no-op for the discarder
    /// and for seats with nothing to answer.
    pub fn pass(&mut self, seat: Seat) -> Result<(), GameError> {
        self.expect_state("pass", GameState::WaitingPass)?;
        self.occupied(seat)?;
        if self.claims.pass(seat) {
            self.record(seat, Action::Pass);
            debug!(%seat, "pass");
            self.settle_claims();
        }
        Ok(())
    }

    pub fn chi(&mut self, seat: Seat, tiles: [TileId; 2]) -> Result<(), GameError> {
        self.respond(seat, ClaimCall::Chi(tiles), "chi")
    }

    pub fn peng(&mut self, seat: Seat, tiles: [TileId; 2]) -> Result<(), GameError> {
        self.respond(seat, ClaimCall::Peng(tiles), "peng")
    }

    pub fn gang(&mut self, seat: Seat, tiles: [TileId; 3]) -> Result<(), GameError> {
        self.respond(seat, ClaimCall::Gang(tiles), "gang")
    }

    pub fn hu(&mut self, seat: Seat) -> Result<(), GameError> {
        self.respond(seat, ClaimCall::Hu, "hu")
    }

    fn respond(
        &mut self,
        seat: Seat,
        call: ClaimCall,
        action: &'static str,
    ) -> Result<(), GameError> {
        self.expect_state(action, GameState::WaitingPass)?;
        let player = self.occupied(seat)?;
        if !self.claims.has_waiting(seat) {
            return Ok(());
        }
        if self.claims.waiting_entry(seat, call.kind()).is_none() {
            return Err(GameError::IllegalSet(format!(
                "{} has no pending {} claim",
                seat,
                call.kind()
            )));
        }
        let target = self.latest_tile.ok_or(GameError::WrongState {
            action,
            state: self.state,
        })?;
        validate_call(seat, &player.concealed(), &call, target)?;

        self.claims.accept(seat, call);
        self.record(seat, Action::from(call));
        debug!(%seat, kind = %call.kind(), "claim accepted");
        self.settle_claims();
        Ok(())
    }

    /// Dispatches a recorded action to the matching command.
    pub fn apply(&mut self, seat: Seat, action: &Action) -> Result<(), GameError> {
        match *action {
            Action::Discard(tile) => self.discard(seat, tile),
            Action::ConcealedGang(tiles) => self.angang(seat, tiles),
            Action::SelfDrawWin => self.self_draw_win(seat),
            Action::Pass => self.pass(seat),
            Action::Chi(tiles) => self.chi(seat, tiles),
            Action::Peng(tiles) => self.peng(seat, tiles),
            Action::Gang(tiles) => self.gang(seat, tiles),
            Action::Hu => self.hu(seat),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }
    pub fn current(&self) -> Option<Seat> {
        self.current
    }
    pub fn dealer(&self) -> Option<Seat> {
        self.dealer
    }
    pub fn players(&self) -> &[SeatSlot; 4] {
        &self.seats
    }
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.seats[seat.index()].player()
    }
    pub fn occupied_seats(&self) -> Vec<Seat> {
        self.seats
            .iter()
            .filter_map(|slot| slot.player().map(Player::seat))
            .collect()
    }
    pub fn walls(&self) -> &Walls {
        &self.walls
    }
    pub fn discards(&self, seat: Seat) -> &[TileId] {
        &self.discards[seat.index()]
    }
    pub fn latest_tile(&self) -> Option<TileId> {
        self.latest_tile
    }
    pub fn pending_claims(&self) -> &ClaimQueue {
        &self.claims
    }
    pub fn live_cursor(&self) -> WallCursor {
        self.live
    }
    pub fn dead_cursor(&self) -> WallCursor {
        self.dead
    }
    pub fn tiles_remaining(&self) -> usize {
        self.walls.remaining()
    }
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Every tile id on the table: walls, concealed hands, picked tiles,
    /// exposed sets and discard piles.
    pub fn accounted_tiles(&self) -> Vec<TileId> {
        let mut tiles: Vec<TileId> = self.walls.tiles().collect();
        for player in self.seats.iter().filter_map(SeatSlot::player) {
            tiles.extend_from_slice(player.hand());
            tiles.extend(player.picked());
            for set in player.opened() {
                tiles.extend_from_slice(&set.tiles);
            }
        }
        for pile in &self.discards {
            tiles.extend_from_slice(pile);
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TILE_COUNT;

    fn started(seats: &[Seat]) -> Game {
        let mut g = Game::new_with_seed(42);
        g.init(seats).unwrap();
        g.start().unwrap();
        g
    }

    #[test]
    fn init_rejects_bad_seat_lists() {
        let mut g = Game::new_with_seed(1);
        assert_eq!(g.init(&[]), Err(GameError::NoPlayers));
        assert_eq!(
            g.init(&[Seat::East, Seat::East]),
            Err(GameError::DuplicateSeat(Seat::East))
        );
    }

    #[test]
    fn start_requires_init() {
        let mut g = started(&Seat::ALL);
        assert!(matches!(
            g.start(),
            Err(GameError::WrongState {
                state: GameState::WaitingAction,
                ..
            })
        ));
        let mut fresh = Game::new_with_seed(1);
        assert_eq!(fresh.start(), Err(GameError::NoPlayers));
    }

    #[test]
    fn deal_gives_thirteen_and_dealer_picks() {
        let g = started(&Seat::ALL);
        let dealer = g.dealer().unwrap();
        for seat in Seat::ALL {
            let p = g.player(seat).unwrap();
            assert_eq!(p.hand().len(), 13);
            assert_eq!(p.picked().is_some(), seat == dealer);
            assert!(p.hand().windows(2).all(|w| w[0] < w[1]));
        }
        assert_eq!(g.accounted_tiles().len(), TILE_COUNT);
    }

    #[test]
    fn empty_seats_consume_rotation_but_get_nothing() {
        let g = started(&[Seat::South, Seat::North]);
        assert_eq!(g.dealer(), Some(Seat::South));
        assert!(g.player(Seat::East).is_none());
        assert_eq!(g.tiles_remaining(), TILE_COUNT - 27);
    }

    #[test]
    fn failed_discard_leaves_state_untouched() {
        let mut g = started(&Seat::ALL);
        let not_turn = g.player(Seat::South).unwrap().hand()[0];
        assert_eq!(
            g.discard(Seat::South, not_turn),
            Err(GameError::NotYourTurn { seat: Seat::South })
        );
        assert_eq!(
            g.discard(Seat::East, not_turn),
            Err(GameError::TileNotInHand {
                seat: Seat::East,
                tile: not_turn
            })
        );
        assert_eq!(g.state(), GameState::WaitingAction);
        assert!(g.history().is_empty());
    }

    #[test]
    fn reset_keeps_seats_and_returns_to_init() {
        let mut g = started(&[Seat::East, Seat::West]);
        g.reset().unwrap();
        assert_eq!(g.state(), GameState::Init);
        assert_eq!(g.occupied_seats(), vec![Seat::East, Seat::West]);
        assert_eq!(g.tiles_remaining(), TILE_COUNT);
    }
}
