use std::{fmt, iter, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{BoardError, ParseBoardError};

use super::{
    direction::{Direction, Position},
    tile::Tile,
};

const MAX_SIDE: usize = 8;
const MAX_CELLS: usize = MAX_SIDE * MAX_SIDE;

/// Positions of one row or column, ordered from the far edge in the direction of motion.
pub type Line = ArrayVec<Position, MAX_SIDE>;

/// A grid of tiles plus the score accumulated so far.
///
/// `Board` is a plain value: cloning copies every cell (the cells live inline, no heap
/// allocation), and all move operations return a new board instead of mutating the
/// receiver. Search code can therefore hand independent snapshots to every branch.
///
/// # Layout
///
/// - Cells are stored row-major, `(0, 0)` is the top-left corner
/// - Width and height are each in `1..=`[`Board::MAX_SIDE`]; the standard game is 4×4
/// - Every present tile is a power of two ≥ 2 (enforced by [`Tile`])
///
/// # Text format
///
/// Boards parse from and serialize to a compact row notation: rows separated by `/`,
/// cells by `,`, `0` or `.` for an empty cell, with an optional `@score` suffix.
///
/// ```
/// use twozero_engine::{Board, Position, Tile};
///
/// let board: Board = "2,0,0,0/0,4,0,0/0,0,0,0/0,0,0,8@20".parse().unwrap();
/// assert_eq!(board.score(), 20);
/// assert_eq!(board.get(Position::new(1, 1)), Some(Tile::FOUR));
/// assert_eq!(board.empty_count(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    width: usize,
    height: usize,
    cells: ArrayVec<Option<Tile>, MAX_CELLS>,
    score: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub const MAX_SIDE: usize = MAX_SIDE;
    pub const MAX_CELLS: usize = MAX_CELLS;
    pub const STANDARD_SIDE: usize = 4;

    fn blank(width: usize, height: usize) -> Self {
        let mut cells = ArrayVec::new();
        cells.extend(iter::repeat_n(None, width * height));
        Self {
            width,
            height,
            cells,
            score: 0,
        }
    }

    /// Creates an empty 4×4 board with zero score.
    #[must_use]
    pub fn standard() -> Self {
        Self::blank(Self::STANDARD_SIDE, Self::STANDARD_SIDE)
    }

    /// Creates an empty board of the given size.
    pub fn empty(width: usize, height: usize) -> Result<Self, BoardError> {
        let range = 1..=Self::MAX_SIDE;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self::blank(width, height))
    }

    /// Builds a board from tile values, `0` meaning an empty cell.
    ///
    /// Rows of different lengths, out-of-range dimensions and values that are not
    /// powers of two are rejected.
    pub fn from_rows(rows: &[Vec<u64>], score: u64) -> Result<Self, BoardError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut board = Self::empty(width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::RaggedRows {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let tile = Tile::from_value(value)
                    .map_err(|source| BoardError::InvalidTile { x, y, source })?;
                board.place(Position::new(x, y), tile);
            }
        }
        board.score = score;
        Ok(board)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }

    pub(crate) fn add_score(&mut self, delta: u64) {
        self.score = self.score.saturating_add(delta);
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then_some(pos.y * self.width + pos.x)
    }

    /// Returns the tile at `pos`, or `None` for an empty or out-of-range cell.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// Puts `tile` at `pos`, replacing whatever was there.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    pub fn place(&mut self, pos: Position, tile: Tile) {
        self.set(pos, Some(tile));
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Option<Tile>) {
        let index = self
            .index(pos)
            .unwrap_or_else(|| panic!("position {pos} outside {}x{}", self.width, self.height));
        self.cells[index] = cell;
    }

    /// Returns a copy of this board with `tile` placed at `pos`.
    #[must_use]
    pub fn with_tile(&self, pos: Position, tile: Tile) -> Self {
        let mut board = self.clone();
        board.place(pos, tile);
        board
    }

    pub(crate) fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(|y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        iter::zip(self.positions(), &self.cells).filter_map(|(pos, cell)| cell.map(|t| (pos, t)))
    }

    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        iter::zip(self.positions(), &self.cells)
            .filter(|(_, cell)| cell.is_none())
            .map(|(pos, _)| pos)
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn max_tile(&self) -> Option<Tile> {
        self.cells.iter().flatten().max().copied()
    }

    /// Returns the tile values row by row, `0` for empty cells.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<u64>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.map_or(0, Tile::value)).collect())
            .collect()
    }

    /// Number of lines a move in `direction` processes (rows for horizontal moves).
    #[must_use]
    pub const fn line_count(&self, direction: Direction) -> usize {
        if direction.is_horizontal() {
            self.height
        } else {
            self.width
        }
    }

    /// Returns the positions of line `index`, starting at the edge tiles move toward.
    #[must_use]
    pub fn line(&self, direction: Direction, index: usize) -> Line {
        match direction {
            Direction::Left => (0..self.width).map(|x| Position::new(x, index)).collect(),
            Direction::Right => (0..self.width)
                .rev()
                .map(|x| Position::new(x, index))
                .collect(),
            Direction::Up => (0..self.height).map(|y| Position::new(index, y)).collect(),
            Direction::Down => (0..self.height)
                .rev()
                .map(|y| Position::new(index, y))
                .collect(),
        }
    }

    pub fn lines(&self, direction: Direction) -> impl Iterator<Item = Line> + '_ {
        (0..self.line_count(direction)).map(move |i| self.line(direction, i))
    }

    /// Finds the first occupied cell strictly beyond `from` in `direction`.
    #[must_use]
    pub fn nearest_occupied(&self, from: Position, direction: Direction) -> Option<(Position, Tile)> {
        let step = |pos: Position| pos.step(direction, self.width, self.height);
        iter::successors(step(from), |pos| step(*pos))
            .find_map(|pos| self.get(pos).map(|tile| (pos, tile)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = self
            .max_tile()
            .map_or(1, |tile| tile.value().to_string().len());
        for row in self.cells.chunks(self.width) {
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(tile) => write!(f, "{:>cell_width$}", tile.value())?,
                    None => write!(f, "{:>cell_width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "score: {}", self.score)
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (grid, score) = match s.split_once('@') {
            Some((grid, score)) => (
                grid,
                score
                    .trim()
                    .parse()
                    .map_err(ParseBoardError::InvalidScore)?,
            ),
            None => (s, 0),
        };
        let rows = grid
            .split('/')
            .map(|row| row.split(',').map(parse_cell).collect())
            .collect::<Result<Vec<Vec<u64>>, _>>()?;
        Self::from_rows(&rows, score).map_err(ParseBoardError::Board)
    }
}

fn parse_cell(cell: &str) -> Result<u64, ParseBoardError> {
    let cell = cell.trim();
    if cell == "." {
        return Ok(0);
    }
    cell.parse().map_err(|_| ParseBoardError::InvalidCell {
        cell: cell.to_owned(),
    })
}

#[derive(Serialize, Deserialize)]
struct BoardRepr {
    rows: Vec<Vec<u64>>,
    #[serde(default)]
    score: u64,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        Self::from_rows(&repr.rows, repr.score)
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            rows: board.rows(),
            score: board.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::InvalidTileError;

    use super::*;

    #[test]
    fn test_standard_board_is_empty() {
        let board = Board::standard();
        assert_eq!((board.width(), board.height()), (4, 4));
        assert_eq!(board.empty_count(), 16);
        assert_eq!(board.max_tile(), None);
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_empty_rejects_bad_dimensions() {
        for (width, height) in [(0, 4), (4, 0), (9, 4), (4, 9)] {
            assert_eq!(
                Board::empty(width, height),
                Err(BoardError::InvalidDimensions { width, height })
            );
        }
        assert!(Board::empty(2, 3).is_ok());
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![vec![2, 0, 0], vec![0, 0]];
        assert_eq!(
            Board::from_rows(&rows, 0),
            Err(BoardError::RaggedRows {
                row: 1,
                len: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_invalid_tiles() {
        let rows = vec![vec![2, 0], vec![0, 6]];
        assert_eq!(
            Board::from_rows(&rows, 0),
            Err(BoardError::InvalidTile {
                x: 1,
                y: 1,
                source: InvalidTileError { value: 6 }
            })
        );
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![vec![2, 0, 4], vec![0, 8, 0]];
        let board = Board::from_rows(&rows, 12).unwrap();
        assert_eq!((board.width(), board.height()), (3, 2));
        assert_eq!(board.rows(), rows);
        assert_eq!(board.score(), 12);
    }

    #[test]
    fn test_parse_accepts_dots_and_score() {
        let a: Board = "2,.,.,./.,.,.,./.,.,.,./.,.,.,4@8".parse().unwrap();
        let b: Board = "2,0,0,0/0,0,0,0/0,0,0,0/0,0,0,4@8".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.score(), 8);
        assert_eq!(a.max_tile(), Some(Tile::FOUR));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "2,x/0,0".parse::<Board>(),
            Err(ParseBoardError::InvalidCell { cell }) if cell == "x"
        ));
        assert!(matches!(
            "2,0/0,0@abc".parse::<Board>(),
            Err(ParseBoardError::InvalidScore(_))
        ));
        assert!(matches!(
            "2,0/0".parse::<Board>(),
            Err(ParseBoardError::Board(BoardError::RaggedRows { .. }))
        ));
    }

    #[test]
    fn test_serde_format() {
        let board: Board = "2,0/0,4@4".parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"{"rows":[[2,0],[0,4]],"score":4}"#);
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
    }

    #[test]
    fn test_serde_validates_input() {
        assert!(serde_json::from_str::<Board>(r#"{"rows":[[3,0],[0,4]]}"#).is_err());
        assert!(serde_json::from_str::<Board>(r#"{"rows":[[2,0],[0]]}"#).is_err());
        let board = serde_json::from_str::<Board>(r#"{"rows":[[2,0],[0,0]]}"#).unwrap();
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_line_order_follows_motion() {
        let board = Board::empty(3, 2).unwrap();
        let p = Position::new;
        assert_eq!(board.line(Direction::Left, 1).as_slice(), &[p(0, 1), p(1, 1), p(2, 1)]);
        assert_eq!(board.line(Direction::Right, 0).as_slice(), &[p(2, 0), p(1, 0), p(0, 0)]);
        assert_eq!(board.line(Direction::Up, 2).as_slice(), &[p(2, 0), p(2, 1)]);
        assert_eq!(board.line(Direction::Down, 0).as_slice(), &[p(0, 1), p(0, 0)]);
        assert_eq!(board.lines(Direction::Left).count(), 2);
        assert_eq!(board.lines(Direction::Up).count(), 3);
    }

    #[test]
    fn test_nearest_occupied_skips_gaps() {
        let board: Board = "2,0,0,8/0,0,0,0/0,0,0,0/4,0,0,0".parse().unwrap();
        let origin = Position::new(0, 0);
        assert_eq!(
            board.nearest_occupied(origin, Direction::Right),
            Some((Position::new(3, 0), Tile::from_value(8).unwrap()))
        );
        assert_eq!(
            board.nearest_occupied(origin, Direction::Down),
            Some((Position::new(0, 3), Tile::FOUR))
        );
        assert_eq!(board.nearest_occupied(origin, Direction::Left), None);
    }

    #[test]
    fn test_with_tile_leaves_original_untouched() {
        let board = Board::standard();
        let filled = board.with_tile(Position::new(1, 2), Tile::TWO);
        assert_eq!(board.empty_count(), 16);
        assert_eq!(filled.empty_count(), 15);
        assert_eq!(filled.get(Position::new(1, 2)), Some(Tile::TWO));
    }

    #[test]
    fn test_display() {
        let board: Board = "2,0/128,4@12".parse().unwrap();
        assert_eq!(board.to_string(), "  2   .\n128   4\nscore: 12");
    }
}
