//! Lazily computed board metrics.
//!
//! [`BoardAnalysis`] wraps a borrowed board and computes each metric the first time it is
//! requested. The adversary's spawn proxy only needs smoothness, while a leaf evaluation
//! needs everything; both go through the same analysis without recomputing anything.
//!
//! All state lives inside the analysis value. In particular island counting keeps its
//! visited set local to one call, so analyses of different boards never interact.

use std::{cell::OnceCell, cmp};

use arrayvec::ArrayVec;
use twozero_engine::{Board, Direction, Position, Tile};

#[derive(Debug)]
pub struct BoardAnalysis<'a> {
    board: &'a Board,
    smoothness: OnceCell<u32>,
    monotonicity: OnceCell<u32>,
    islands: OnceCell<usize>,
}

impl<'a> BoardAnalysis<'a> {
    #[must_use]
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            smoothness: OnceCell::new(),
            monotonicity: OnceCell::new(),
            islands: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Sum of `|log2 a - log2 b|` between every tile and its nearest occupied neighbor to
    /// the right and below.
    ///
    /// This is the magnitude of the smoothness penalty: `0` for a perfectly smooth board.
    #[must_use]
    pub fn roughness(&self) -> u32 {
        *self.smoothness.get_or_init(|| {
            let mut roughness = 0;
            for (pos, tile) in self.board.occupied() {
                for direction in [Direction::Right, Direction::Down] {
                    if let Some((_, neighbor)) = self.board.nearest_occupied(pos, direction) {
                        roughness += u32::from(tile.rank().abs_diff(neighbor.rank()));
                    }
                }
            }
            roughness
        })
    }

    /// Sum over rows, then columns, of `max(total increase, total decrease)` in `log2`
    /// space, skipping empty cells.
    #[must_use]
    pub fn monotonicity(&self) -> u32 {
        *self.monotonicity.get_or_init(|| {
            let rows = self.board.lines(Direction::Left);
            let columns = self.board.lines(Direction::Up);
            rows.chain(columns)
                .map(|line| {
                    let ranks = line
                        .iter()
                        .filter_map(|pos| self.board.get(*pos))
                        .map(Tile::rank)
                        .collect::<ArrayVec<u8, { Board::MAX_SIDE }>>();
                    line_monotonicity(&ranks)
                })
                .sum()
        })
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.board.empty_count()
    }

    #[must_use]
    pub fn max_tile(&self) -> Option<Tile> {
        self.board.max_tile()
    }

    /// Number of maximal 4-connected regions of equal-valued tiles.
    #[must_use]
    pub fn islands(&self) -> usize {
        *self.islands.get_or_init(|| {
            let board = self.board;
            let (width, height) = (board.width(), board.height());
            let index = |pos: Position| pos.y * width + pos.x;
            let mut visited = vec![false; width * height];
            let mut stack = Vec::new();
            let mut islands = 0;
            for (start, tile) in board.occupied() {
                if visited[index(start)] {
                    continue;
                }
                islands += 1;
                visited[index(start)] = true;
                stack.push(start);
                while let Some(pos) = stack.pop() {
                    for direction in Direction::ALL {
                        let Some(next) = pos.step(direction, width, height) else {
                            continue;
                        };
                        if !visited[index(next)] && board.get(next) == Some(tile) {
                            visited[index(next)] = true;
                            stack.push(next);
                        }
                    }
                }
            }
            islands
        })
    }
}

fn line_monotonicity(ranks: &[u8]) -> u32 {
    let mut increase = 0;
    let mut decrease = 0;
    for pair in ranks.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if next > current {
            increase += u32::from(next - current);
        } else {
            decrease += u32::from(current - next);
        }
    }
    cmp::max(increase, decrease)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_metrics() {
        let board = Board::standard();
        let analysis = BoardAnalysis::new(&board);
        assert_eq!(analysis.roughness(), 0);
        assert_eq!(analysis.monotonicity(), 0);
        assert_eq!(analysis.empty_count(), 16);
        assert_eq!(analysis.max_tile(), None);
        assert_eq!(analysis.islands(), 0);
    }

    #[test]
    fn test_roughness_uses_nearest_neighbor() {
        // 2 .. 8 in a row: one pair with rank difference 2
        let b = board("2,0,0,8/0,0,0,0/0,0,0,0/0,0,0,0");
        assert_eq!(BoardAnalysis::new(&b).roughness(), 2);

        // both right and down neighbors are counted
        let b = board("2,4/8,0");
        assert_eq!(BoardAnalysis::new(&b).roughness(), 1 + 2);
    }

    #[test]
    fn test_roughness_zero_for_equal_neighbors() {
        let b = board("4,4/4,4");
        assert_eq!(BoardAnalysis::new(&b).roughness(), 0);
    }

    #[test]
    fn test_monotonicity_per_line() {
        assert_eq!(line_monotonicity(&[]), 0);
        assert_eq!(line_monotonicity(&[3]), 0);
        assert_eq!(line_monotonicity(&[1, 2, 3, 4]), 3);
        assert_eq!(line_monotonicity(&[4, 3, 1]), 3);
        // up 3, down 2
        assert_eq!(line_monotonicity(&[1, 4, 2]), 3);
    }

    #[test]
    fn test_monotonicity_sums_rows_and_columns() {
        // row 0: 2 4 8 -> increase 2; column 0: 2 16 -> increase 3
        let b = board("2,4,8/16,0,0/0,0,0");
        assert_eq!(BoardAnalysis::new(&b).monotonicity(), 2 + 3);
    }

    #[test]
    fn test_monotonicity_skips_empty_cells() {
        let b = board("2,0,8,0");
        assert_eq!(BoardAnalysis::new(&b).monotonicity(), 2);
    }

    #[test]
    fn test_islands_example() {
        let b = board("2,2,0,0/0,0,4,4");
        assert_eq!(BoardAnalysis::new(&b).islands(), 2);
    }

    #[test]
    fn test_islands_diagonal_not_connected() {
        let b = board("2,0/0,2");
        assert_eq!(BoardAnalysis::new(&b).islands(), 2);
    }

    #[test]
    fn test_islands_snake_region() {
        let b = board("2,2,2/4,4,2/2,2,2");
        assert_eq!(BoardAnalysis::new(&b).islands(), 2);

        let checker = board("2,4,2,4/4,2,4,2/2,4,2,4/4,2,4,2");
        assert_eq!(BoardAnalysis::new(&checker).islands(), 16);
    }

    #[test]
    fn test_islands_repeatable_across_analyses() {
        let b = board("2,2,0,0/0,0,4,4");
        for _ in 0..3 {
            let analysis = BoardAnalysis::new(&b);
            assert_eq!(analysis.islands(), 2);
            assert_eq!(analysis.islands(), 2);
        }
    }
}
