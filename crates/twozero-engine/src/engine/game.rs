use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    BoardError, IllegalMoveError,
    core::{Board, Direction},
};

use super::{game_stats::GameStats, spawner::TileSpawner};

/// Seed for deterministic tile spawning.
///
/// A 128-bit seed written as a 32-character hex string. Two games created with the same
/// seed and fed the same moves produce identical boards.
///
/// # Example
///
/// ```
/// use twozero_engine::GameSeed;
/// use rand::Rng as _;
///
/// let seed: GameSeed = rand::rng().random();
/// let parsed: GameSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSeed([u8; 16]);

impl GameSeed {
    #[must_use]
    pub const fn from_u128(num: u128) -> Self {
        Self(num.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for GameSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        u128::from_str_radix(s, 16)
            .map(Self::from_u128)
            .map_err(|_| err())
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `GameSeed` values with `rng.random()`.
impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    stats: GameStats,
}

/// The live game: the board being played, its spawn RNG, statistics and undo history.
///
/// [`Game::play`] is the only way the board advances. It applies a real move, spawns one
/// random tile and remembers the previous position so it can be reverted with
/// [`Game::undo`]. The RNG is not rewound by an undo, so replaying the same move can
/// spawn a different tile.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    seed: GameSeed,
    rng: Pcg32,
    spawner: TileSpawner,
    stats: GameStats,
    history: VecDeque<Snapshot>,
    history_limit: usize,
}

impl Game {
    /// Number of tiles on a freshly started board.
    pub const INITIAL_TILES: usize = 2;
    /// Default number of undo steps kept.
    pub const DEFAULT_HISTORY_LIMIT: usize = 1;

    /// Starts a new game with a random seed.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        Self::with_seed(width, height, rand::rng().random())
    }

    /// Like [`Self::new`], but with a fixed seed.
    pub fn with_seed(width: usize, height: usize, seed: GameSeed) -> Result<Self, BoardError> {
        let mut game = Self::from_board(Board::empty(width, height)?, seed);
        for _ in 0..Self::INITIAL_TILES {
            if let Some((_, tile)) = game.spawner.spawn(&mut game.board, &mut game.rng) {
                game.stats.record_spawn(tile);
            }
        }
        Ok(game)
    }

    /// Continues from an existing board without spawning opening tiles.
    #[must_use]
    pub fn from_board(board: Board, seed: GameSeed) -> Self {
        let mut stats = GameStats::with_score(board.score());
        stats.observe_max_tile(board.max_tile());
        Self {
            board,
            seed,
            rng: Pcg32::from_seed(seed.0),
            spawner: TileSpawner::new(),
            stats,
            history: VecDeque::new(),
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
        }
    }

    #[must_use]
    pub fn with_spawner(mut self, spawner: TileSpawner) -> Self {
        self.spawner = spawner;
        self
    }

    /// Sets how many moves can be undone; `0` disables undo.
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = limit;
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn seed(&self) -> GameSeed {
        self.seed
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns `true` when no direction changes the board.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.board.is_terminal()
    }

    /// Applies a move to the live board and spawns a random tile.
    ///
    /// Returns the score gained by merges, or an error (leaving the game untouched) if the
    /// move would not change the board.
    pub fn play(&mut self, direction: Direction) -> Result<u64, IllegalMoveError> {
        let outcome = self
            .board
            .try_move(direction)
            .ok_or(IllegalMoveError { direction })?;

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(Snapshot {
                board: self.board.clone(),
                stats: self.stats.clone(),
            });
        }

        self.board = outcome.board;
        let spawned = self.spawner.spawn(&mut self.board, &mut self.rng);
        self.stats.complete_move(
            direction,
            outcome.score_delta,
            spawned.map(|(_, tile)| tile),
            self.board.max_tile(),
        );
        tracing::debug!(
            %direction,
            score_delta = outcome.score_delta,
            score = self.board.score(),
            "move applied"
        );
        Ok(outcome.score_delta)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Reverts the most recent move. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop_back() else {
            return false;
        };
        self.board = snapshot.board;
        self.stats = snapshot.stats;
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Tile;

    use super::*;

    const SEED: GameSeed = GameSeed::from_u128(0x2048);

    #[test]
    fn test_new_game_has_two_tiles() {
        let game = Game::with_seed(4, 4, SEED).unwrap();
        assert_eq!(game.board().empty_count(), 14);
        assert_eq!(game.board().score(), 0);
        assert_eq!(game.stats().spawned().iter().sum::<usize>(), 2);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            Game::with_seed(0, 4, SEED),
            Err(BoardError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Game::with_seed(4, 4, SEED).unwrap();
        let mut b = Game::with_seed(4, 4, SEED).unwrap();
        for _ in 0..50 {
            assert_eq!(a.board(), b.board());
            let Some(&direction) = a.board().legal_directions().first() else {
                break;
            };
            a.play(direction).unwrap();
            b.play(direction).unwrap();
        }
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn test_play_spawns_after_move() {
        let board: Board = "2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
        let mut game = Game::from_board(board, SEED);
        assert_eq!(game.play(Direction::Left), Ok(4));
        assert_eq!(game.board().get(crate::Position::new(0, 0)), Some(Tile::FOUR));
        assert_eq!(game.board().empty_count(), 14);
        assert_eq!(game.board().score(), 4);
        assert_eq!(game.stats().score(), 4);
        assert_eq!(game.stats().moves(), 1);
    }

    #[test]
    fn test_resumed_game_keeps_board_score() {
        let board: Board = "2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0@100".parse().unwrap();
        let mut game = Game::from_board(board, SEED);
        assert_eq!(game.stats().score(), 100);
        game.play(Direction::Left).unwrap();
        assert_eq!(game.stats().score(), game.board().score());
        assert_eq!(game.stats().score(), 104);
    }

    #[test]
    fn test_illegal_move_leaves_game_untouched() {
        let board: Board = "2,0,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
        let mut game = Game::from_board(board.clone(), SEED);
        assert_eq!(
            game.play(Direction::Left),
            Err(IllegalMoveError {
                direction: Direction::Left
            })
        );
        assert_eq!(game.board(), &board);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut game = Game::with_seed(4, 4, SEED).unwrap();
        let before = game.board().clone();
        let direction = game.board().legal_directions()[0];
        game.play(direction).unwrap();
        assert!(game.can_undo());
        assert!(game.undo());
        assert_eq!(game.board(), &before);
        assert_eq!(game.stats().moves(), 0);
        assert!(!game.undo());
    }

    #[test]
    fn test_history_limit() {
        let board: Board = "2,0,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
        let mut game = Game::from_board(board, SEED);
        game.set_history_limit(2);
        for _ in 0..3 {
            let direction = game.board().legal_directions()[0];
            game.play(direction).unwrap();
        }
        assert!(game.undo());
        assert!(game.undo());
        assert!(!game.undo());

        game.set_history_limit(0);
        let direction = game.board().legal_directions()[0];
        game.play(direction).unwrap();
        assert!(!game.can_undo());
    }

    #[test]
    fn test_game_over_detection() {
        let board: Board = "2,4,2,4/4,2,4,2/2,4,2,4/4,2,4,2".parse().unwrap();
        let mut game = Game::from_board(board, SEED);
        assert!(game.is_over());
        for direction in Direction::ALL {
            assert!(game.play(direction).is_err());
        }
    }

    #[test]
    fn test_seed_text_and_serde() {
        assert_eq!(SEED.to_string(), "00000000000000000000000000002048");
        assert_eq!("00000000000000000000000000002048".parse(), Ok(SEED));
        assert!("2048".parse::<GameSeed>().is_err());
        assert!("zz000000000000000000000000002048".parse::<GameSeed>().is_err());

        let json = serde_json::to_string(&SEED).unwrap();
        assert_eq!(json, "\"00000000000000000000000000002048\"");
        assert_eq!(serde_json::from_str::<GameSeed>(&json).unwrap(), SEED);
    }
}
