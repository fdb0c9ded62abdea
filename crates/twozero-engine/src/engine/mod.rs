//! Live game state built on the value-semantic [`core`](crate::core) types.
//!
//! - [`Game`] - the board actually being played, with undo history and statistics
//! - [`TileSpawner`] - the real random spawn policy applied after every move
//! - [`GameSeed`] - seed for deterministic games
//! - [`GameStats`] - per-game counters
//!
//! The search engine never touches a [`Game`]; it receives a cloned [`Board`](crate::Board)
//! snapshot and returns a direction, which the caller applies with [`Game::play`].
//!
//! # Example
//!
//! ```
//! use twozero_engine::{Direction, Game, GameSeed};
//!
//! let mut game = Game::with_seed(4, 4, GameSeed::from_u128(7)).unwrap();
//! assert_eq!(game.board().empty_count(), 14);
//!
//! let direction = game.board().legal_directions()[0];
//! game.play(direction).unwrap();
//! assert_eq!(game.stats().moves(), 1);
//!
//! assert!(game.undo());
//! assert_eq!(game.stats().moves(), 0);
//! ```

pub use self::{game::*, game_stats::*, spawner::*};

mod game;
mod game_stats;
mod spawner;
