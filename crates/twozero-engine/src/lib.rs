//! Board model, move simulation and live game state for the 2048 sliding-tile puzzle.
//!
//! The crate is split into two layers:
//!
//! - [`core`] - value-semantic data structures: [`Tile`], [`Board`], [`Direction`],
//!   [`Position`] and the shift-and-merge move simulator ([`Board::apply_move`])
//! - [`engine`] - the live game built on top of the core: tile spawning, undo history
//!   and statistics
//!
//! Search code only ever touches the [`core`] layer. Every simulated move returns a new
//! [`Board`]; nothing is mutated in place and nothing needs to be reverted.
//!
//! # Example
//!
//! ```
//! use twozero_engine::{Board, Direction};
//!
//! let board: Board = "2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
//! let outcome = board.apply_move(Direction::Left);
//!
//! assert!(outcome.legal);
//! assert_eq!(outcome.score_delta, 4);
//! assert_eq!(outcome.board.to_string().lines().next().unwrap().trim(), "4 . . .");
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A tile value that is not a power of two greater than or equal to 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("tile value {value} is not a power of two >= 2")]
pub struct InvalidTileError {
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board dimensions {width}x{height} are out of range")]
    InvalidDimensions { width: usize, height: usize },
    #[display("row {row} has {len} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("invalid tile at ({x}, {y})")]
    InvalidTile {
        x: usize,
        y: usize,
        source: InvalidTileError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("invalid score")]
    InvalidScore(std::num::ParseIntError),
    #[display("invalid cell {cell:?}")]
    InvalidCell { cell: String },
    #[display("{_0}")]
    Board(BoardError),
}

/// The requested move does not change the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("moving {direction} does not change the board")]
pub struct IllegalMoveError {
    pub direction: Direction,
}
