//! # majiang-engine: Four-Player Mahjong Rules Engine
//!
//! A deterministic rules engine for four-player Mahjong. It owns tile
//! identity, wall construction and dealing, turn progression, and the claim
//! window that opens after every discard. Transport, sessions and scoring
//! live elsewhere; this crate only answers "is this legal, and what happens
//! next".
//!
//! ## Core Modules
//!
//! - [`tiles`] - Tile identity (Suit, TileFace, TileId) and the 136-tile set
//! - [`hand`] - Set predicates and winning-hand decomposition
//! - [`wall`] - Seat walls, draw cursors and the injectable deal source
//! - [`player`] - Seats, players and exposed sets
//! - [`claims`] - The priority-ordered claim queue
//! - [`rules`] - Legality checks for claims, kongs and wins
//! - [`game`] - The `Game` state machine
//! - [`snapshot`] - Full snapshots and redacted per-seat views
//! - [`logger`] - Action history and HandRecord serialization
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use majiang_engine::game::{Game, GameState};
//! use majiang_engine::player::Seat;
//!
//! let mut game = Game::new_with_seed(42);
//! game.init(&Seat::ALL).unwrap();
//! game.start().unwrap();
//!
//! // The dealer holds 13 tiles plus the picked one and must act first
//! let dealer = game.current().unwrap();
//! let picked = game.player(dealer).unwrap().picked().unwrap();
//! game.discard(dealer, picked).unwrap();
//! assert_ne!(game.state(), GameState::Init);
//! ```
//!
//! ## Winning Hands
//!
//! ```rust
//! use majiang_engine::hand::can_win;
//! use majiang_engine::tiles::TileId;
//!
//! let t = |raw| TileId::new(raw).unwrap();
//! // 1m1m 2m2m 3m3m 4m4m: pair of 1m plus two 2m-3m-4m runs
//! let hand = [t(0), t(1), t(4), t(5), t(8), t(9), t(12), t(13)];
//! assert!(can_win(&hand, None));
//! // six tiles can never win
//! assert!(!can_win(&hand[..6], None));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Every random choice goes through a [`wall::DealSource`]; the same seed
//! always builds the same walls and rolls the same dice:
//!
//! ```rust
//! use majiang_engine::wall::{SeededDeal, Walls};
//!
//! let a = Walls::build(&mut SeededDeal::new(9));
//! let b = Walls::build(&mut SeededDeal::new(9));
//! assert_eq!(a, b);
//! ```

pub mod claims;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod snapshot;
pub mod tiles;
pub mod wall;
