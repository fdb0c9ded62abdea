use std::iter;

use arrayvec::ArrayVec;

use super::{
    board::{Board, Line},
    direction::Direction,
    tile::Tile,
};

/// Result of shifting a board in one direction.
///
/// An illegal move carries an unchanged copy of the input board and a zero score delta:
/// legality and "no-op" are the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether at least one tile moved or merged.
    pub legal: bool,
    /// The board after the move, with `score_delta` already added to its score.
    pub board: Board,
    /// Sum of the values of all tiles created by merges.
    pub score_delta: u64,
}

impl Board {
    /// Shifts every tile toward the edge in `direction`, merging equal neighbors.
    ///
    /// Lines are processed from the far edge backwards. Each tile merges at most once per
    /// move, so `2 2 4 _` moving left becomes `4 4 _ _`, never `8 _ _ _`. The receiver is
    /// left untouched; the returned board shares nothing with it.
    ///
    /// # Example
    ///
    /// ```
    /// use twozero_engine::{Board, Direction};
    ///
    /// let board: Board = "2,2,4,0/0,0,0,0".parse().unwrap();
    /// let outcome = board.apply_move(Direction::Left);
    /// assert_eq!(outcome.board.rows()[0], [4, 4, 0, 0]);
    /// assert_eq!(outcome.score_delta, 4);
    /// ```
    #[must_use]
    pub fn apply_move(&self, direction: Direction) -> MoveOutcome {
        let mut board = self.clone();
        let mut score_delta = 0_u64;
        for line in self.lines(direction) {
            score_delta = score_delta.saturating_add(compact_line(&mut board, self, &line));
        }
        let legal = board.cells() != self.cells();
        board.add_score(score_delta);
        MoveOutcome {
            legal,
            board,
            score_delta,
        }
    }

    /// Like [`Self::apply_move`], but returns `None` when the move changes nothing.
    #[must_use]
    pub fn try_move(&self, direction: Direction) -> Option<MoveOutcome> {
        Some(self.apply_move(direction)).filter(|outcome| outcome.legal)
    }

    /// Returns every direction that changes the board, in [`Direction::ALL`] order.
    #[must_use]
    pub fn legal_directions(&self) -> ArrayVec<Direction, { Direction::LEN }> {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.apply_move(*direction).legal)
            .collect()
    }

    /// A board is terminal when no direction changes it (full, with no adjacent pair).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        Direction::ALL
            .into_iter()
            .all(|direction| !self.apply_move(direction).legal)
    }
}

/// Compacts one line of `source` into `target` and returns the merge score.
fn compact_line(target: &mut Board, source: &Board, line: &Line) -> u64 {
    // (tile, merged in this move)
    let mut packed = ArrayVec::<(Tile, bool), { Board::MAX_SIDE }>::new();
    let mut score_delta = 0_u64;
    for tile in line.iter().filter_map(|pos| source.get(*pos)) {
        if let Some((last, merged)) = packed.last_mut()
            && !*merged
            && *last == tile
            && let Some(doubled) = last.merged()
        {
            *last = doubled;
            *merged = true;
            score_delta = score_delta.saturating_add(doubled.value());
            continue;
        }
        packed.push((tile, false));
    }
    let cells = packed
        .into_iter()
        .map(|(tile, _)| Some(tile))
        .chain(iter::repeat(None));
    for (pos, cell) in iter::zip(line, cells) {
        target.set(*pos, cell);
    }
    score_delta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_merge_pair_left() {
        let outcome = board("2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0").apply_move(Direction::Left);
        assert!(outcome.legal);
        assert_eq!(outcome.board, board("4,0,0,0/0,0,0,0/0,0,0,0/0,0,0,0@4"));
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_each_direction_moves_toward_its_edge() {
        let start = board("0,0,0,0/0,2,0,0/0,0,0,0/0,0,0,0");
        let cases = [
            (Direction::Up, "0,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0"),
            (Direction::Right, "0,0,0,0/0,0,0,2/0,0,0,0/0,0,0,0"),
            (Direction::Down, "0,0,0,0/0,0,0,0/0,0,0,0/0,2,0,0"),
            (Direction::Left, "0,0,0,0/2,0,0,0/0,0,0,0/0,0,0,0"),
        ];
        for (direction, expected) in cases {
            let outcome = start.apply_move(direction);
            assert!(outcome.legal, "{direction} should be legal");
            assert_eq!(outcome.board, board(expected), "moving {direction}");
            assert_eq!(outcome.score_delta, 0);
        }
    }

    #[test]
    fn test_no_triple_merge() {
        let outcome = board("2,2,4,0").apply_move(Direction::Left);
        assert_eq!(outcome.board.rows(), [[4, 4, 0, 0]]);
        assert_eq!(outcome.score_delta, 4);

        let outcome = board("4,4,8,0").apply_move(Direction::Left);
        assert_eq!(outcome.board.rows(), [[8, 8, 0, 0]]);
    }

    #[test]
    fn test_four_equal_tiles_merge_pairwise() {
        let outcome = board("2,2,2,2").apply_move(Direction::Right);
        assert_eq!(outcome.board.rows(), [[0, 0, 4, 4]]);
        assert_eq!(outcome.score_delta, 8);
    }

    #[test]
    fn test_merge_prefers_far_edge() {
        let outcome = board("2,2,2,0").apply_move(Direction::Right);
        assert_eq!(outcome.board.rows(), [[0, 0, 2, 4]]);

        let outcome = board("2,2,2,0").apply_move(Direction::Left);
        assert_eq!(outcome.board.rows(), [[4, 2, 0, 0]]);
    }

    #[test]
    fn test_vertical_merge() {
        let outcome = board("2,0/2,0/4,0").apply_move(Direction::Down);
        assert_eq!(outcome.board.rows(), [[0, 0], [4, 0], [4, 0]]);
        let outcome = board("2,0/2,0/4,0").apply_move(Direction::Up);
        assert_eq!(outcome.board.rows(), [[4, 0], [4, 0], [0, 0]]);
    }

    #[test]
    fn test_score_accumulates_on_board() {
        let outcome = board("4,4,2,2@100").apply_move(Direction::Left);
        assert_eq!(outcome.score_delta, 12);
        assert_eq!(outcome.board.score(), 112);
    }

    #[test]
    fn test_illegal_move_is_noop() {
        let boards = [
            "2,0,0,0/4,0,0,0/0,0,0,0/0,0,0,0",
            "2,4,2,4/4,2,4,2/2,4,2,4/4,2,4,2@16",
            "2,4/8,16",
        ];
        for s in boards {
            let start = board(s);
            for direction in Direction::ALL {
                let outcome = start.apply_move(direction);
                if !outcome.legal {
                    assert_eq!(outcome.board, start, "{direction} on {s}");
                    assert_eq!(outcome.score_delta, 0);
                } else {
                    assert_ne!(outcome.board, start, "{direction} on {s}");
                }
            }
        }
    }

    #[test]
    fn test_checkerboard_is_terminal() {
        let start = board("2,4,2,4/4,2,4,2/2,4,2,4/4,2,4,2");
        assert!(start.is_terminal());
        assert!(start.legal_directions().is_empty());
        for direction in Direction::ALL {
            assert!(start.try_move(direction).is_none());
        }
    }

    #[test]
    fn test_full_board_with_merge_is_not_terminal() {
        let start = board("2,2,4,8/4,8,16,32/8,16,32,64/16,32,64,128");
        assert!(!start.is_terminal());
        assert_eq!(
            start.legal_directions().as_slice(),
            &[Direction::Right, Direction::Left]
        );
    }

    #[test]
    fn test_legal_directions_in_corner() {
        let start = board("2,0,0,0/0,0,0,0/0,0,0,0/0,0,0,0");
        assert_eq!(
            start.legal_directions().as_slice(),
            &[Direction::Right, Direction::Down]
        );
    }

    #[test]
    fn test_top_rank_tiles_never_merge() {
        let top = 1_u64 << Tile::MAX_RANK;
        let start = Board::from_rows(&[vec![top, top]], 0).unwrap();
        let outcome = start.apply_move(Direction::Left);
        assert!(!outcome.legal);
        assert_eq!(outcome.board.rows(), [[top, top]]);
        assert!(start.is_terminal());
    }

    #[test]
    fn test_huge_merges_saturate_score() {
        let start = Board::from_rows(&[vec![1_u64 << 62; 4]], 0).unwrap();
        let outcome = start.apply_move(Direction::Left);
        assert!(outcome.legal);
        assert_eq!(outcome.board.rows(), [[1_u64 << 63, 1 << 63, 0, 0]]);
        assert_eq!(outcome.score_delta, u64::MAX);
        assert_eq!(outcome.board.score(), u64::MAX);
    }

    #[test]
    fn test_input_board_untouched() {
        let start = board("2,2,2,2/4,4,0,0");
        let copy = start.clone();
        let _ = start.apply_move(Direction::Left);
        assert_eq!(start, copy);
    }
}
