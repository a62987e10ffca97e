//! The claim window that opens after every discard.
//!
//! Entries are kept in resolution order: all win claims first, then
//! kong/pung claims, then the single chow claim, each class in turn order
//! after the discarder. Resolution is a pure scan over that order, so the
//! outcome depends only on which calls were made, never on when.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::player::Seat;
use crate::tiles::TileId;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Hu,
    Gang,
    Peng,
    Chi,
}

impl ClaimKind {
    /// Lower resolves first. Gang and Peng share a class.
    pub fn priority(self) -> u8 {
        match self {
            ClaimKind::Hu => 0,
            ClaimKind::Gang | ClaimKind::Peng => 1,
            ClaimKind::Chi => 2,
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClaimKind::Hu => "hu",
            ClaimKind::Gang => "gang",
            ClaimKind::Peng => "peng",
            ClaimKind::Chi => "chi",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Waiting,
    Accepting,
    Passed,
}

/// A claim a seat has committed to, with the hand tiles it will expose.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCall {
    Chi([TileId; 2]),
    Peng([TileId; 2]),
    Gang([TileId; 3]),
    Hu,
}

impl ClaimCall {
    pub fn kind(&self) -> ClaimKind {
        match self {
            ClaimCall::Chi(_) => ClaimKind::Chi,
            ClaimCall::Peng(_) => ClaimKind::Peng,
            ClaimCall::Gang(_) => ClaimKind::Gang,
            ClaimCall::Hu => ClaimKind::Hu,
        }
    }

    /// Hand tiles the call exposes (none for a win).
    pub fn tiles(&self) -> &[TileId] {
        match self {
            ClaimCall::Chi(t) | ClaimCall::Peng(t) => &t[..],
            ClaimCall::Gang(t) => &t[..],
            ClaimCall::Hu => &[],
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub seat: Seat,
    pub kind: ClaimKind,
    pub status: ClaimStatus,
    /// Set once the entry is Accepting
    #[serde(default)]
    pub call: Option<ClaimCall>,
}

impl Claim {
    pub fn waiting(seat: Seat, kind: ClaimKind) -> Self {
        Self {
            seat,
            kind,
            status: ClaimStatus::Waiting,
            call: None,
        }
    }

    /// A kong entry also takes a pung call.
    pub fn accepts(&self, call: ClaimKind) -> bool {
        self.kind == call || (self.kind == ClaimKind::Gang && call == ClaimKind::Peng)
    }
}

/// Result of scanning the queue.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Resolution {
    /// A higher-priority entry has not answered yet
    Pending,
    /// This accepted call wins the window
    Fire { seat: Seat, call: ClaimCall },
    /// Nobody claims the tile
    AllPassed,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimQueue {
    entries: Vec<Claim>,
}

impl ClaimQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Claim>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Claim] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, claim: Claim) {
        self.entries.push(claim);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True iff the seat still owes an answer.
    pub fn has_waiting(&self, seat: Seat) -> bool {
        self.entries
            .iter()
            .any(|c| c.seat == seat && c.status == ClaimStatus::Waiting)
    }

    /// The seat's waiting entry able to take a call of this kind.
    pub fn waiting_entry(&self, seat: Seat, kind: ClaimKind) -> Option<&Claim> {
        self.entries
            .iter()
            .find(|c| c.seat == seat && c.status == ClaimStatus::Waiting && c.accepts(kind))
    }

    /// First entry still waiting, in resolution order.
    pub fn first_waiting(&self) -> Option<&Claim> {
        self.entries
            .iter()
            .find(|c| c.status == ClaimStatus::Waiting)
    }

    /// Marks every waiting entry of the seat Passed. Returns false if the
    /// seat had nothing to answer.
    pub fn pass(&mut self, seat: Seat) -> bool {
        let mut changed = false;
        for c in self
            .entries
            .iter_mut()
            .filter(|c| c.seat == seat && c.status == ClaimStatus::Waiting)
        {
            c.status = ClaimStatus::Passed;
            changed = true;
        }
        changed
    }

    /// Marks the matching entry Accepting with the call and passes the
    /// seat's other waiting entries. Returns false if no waiting entry
    /// takes the call.
    pub fn accept(&mut self, seat: Seat, call: ClaimCall) -> bool {
        let Some(pos) = self.entries.iter().position(|c| {
            c.seat == seat && c.status == ClaimStatus::Waiting && c.accepts(call.kind())
        }) else {
            return false;
        };
        for (i, c) in self.entries.iter_mut().enumerate() {
            if c.seat != seat || c.status != ClaimStatus::Waiting {
                continue;
            }
            if i == pos {
                c.status = ClaimStatus::Accepting;
                c.call = Some(call);
            } else {
                c.status = ClaimStatus::Passed;
            }
        }
        true
    }

    pub fn resolve(&self) -> Resolution {
        for c in &self.entries {
            match c.status {
                ClaimStatus::Passed => continue,
                ClaimStatus::Waiting => return Resolution::Pending,
                ClaimStatus::Accepting => {
                    return match c.call {
                        Some(call) => Resolution::Fire { seat: c.seat, call },
                        None => Resolution::Pending,
                    }
                }
            }
        }
        Resolution::AllPassed
    }

    /// Entries never decrease in priority class.
    pub fn is_priority_ordered(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[0].kind.priority() <= w[1].kind.priority())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: u8) -> TileId {
        TileId::new(raw).unwrap()
    }

    fn queue() -> ClaimQueue {
        ClaimQueue::from_entries(vec![
            Claim::waiting(Seat::West, ClaimKind::Hu),
            Claim::waiting(Seat::North, ClaimKind::Gang),
            Claim::waiting(Seat::South, ClaimKind::Chi),
        ])
    }

    #[test]
    fn lower_class_waits_for_higher() {
        let mut q = queue();
        assert!(q.accept(Seat::South, ClaimCall::Chi([t(0), t(4)])));
        assert_eq!(q.resolve(), Resolution::Pending);
        assert!(q.pass(Seat::West));
        assert_eq!(q.resolve(), Resolution::Pending);
        assert!(q.pass(Seat::North));
        match q.resolve() {
            Resolution::Fire { seat, call } => {
                assert_eq!(seat, Seat::South);
                assert_eq!(call.kind(), ClaimKind::Chi);
            }
            other => panic!("expected chi to fire, got {:?}", other),
        }
    }

    #[test]
    fn gang_entry_takes_peng_call() {
        let mut q = queue();
        assert!(q.accept(Seat::North, ClaimCall::Peng([t(8), t(9)])));
        let entry = &q.entries()[1];
        assert_eq!(entry.status, ClaimStatus::Accepting);
        assert_eq!(entry.call.map(|c| c.kind()), Some(ClaimKind::Peng));
    }

    #[test]
    fn accept_without_matching_entry_is_refused() {
        let mut q = queue();
        assert!(!q.accept(Seat::South, ClaimCall::Hu));
        assert!(!q.accept(Seat::East, ClaimCall::Hu));
        assert_eq!(q, queue());
    }

    #[test]
    fn pass_is_idempotent() {
        let mut q = queue();
        assert!(q.pass(Seat::West));
        let after_first = q.clone();
        assert!(!q.pass(Seat::West));
        assert_eq!(q, after_first);
    }

    #[test]
    fn empty_queue_resolves_to_all_passed() {
        assert_eq!(ClaimQueue::new().resolve(), Resolution::AllPassed);
        let mut q = queue();
        for seat in Seat::ALL {
            q.pass(seat);
        }
        assert_eq!(q.resolve(), Resolution::AllPassed);
    }

    #[test]
    fn priority_order_check() {
        assert!(queue().is_priority_ordered());
        let bad = ClaimQueue::from_entries(vec![
            Claim::waiting(Seat::South, ClaimKind::Chi),
            Claim::waiting(Seat::West, ClaimKind::Hu),
        ]);
        assert!(!bad.is_priority_ordered());
    }
}
