//! Incremental side-to-side connectivity via union-find
//!
//! Each side gets its own disjoint-set forest over the N*N cells plus two
//! virtual nodes, one standing for the entry edge and one for the exit edge.
//! A side has won as soon as its two virtual nodes share a root.

use crate::board::{Board, Side};

// ============================================================================
// DISJOINT SET
// ============================================================================

/// Disjoint-set forest with union by rank and path halving
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// `len` singleton sets
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set containing `x`
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merge the sets of `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Back to all singletons
    pub fn reset(&mut self) {
        for (i, p) in self.parent.iter_mut().enumerate() {
            *p = i;
        }
        self.rank.fill(0);
    }
}

// ============================================================================
// CONNECTIVITY TRACKER
// ============================================================================

/// Tracks, per side, whether claimed cells join that side's two edges
#[derive(Clone, Debug)]
pub struct ConnectivityTracker {
    dimension: usize,
    forests: [DisjointSet; 2],
}

impl ConnectivityTracker {
    pub fn new(dimension: usize) -> Self {
        let len = dimension * dimension + 2;
        Self {
            dimension,
            forests: [DisjointSet::new(len), DisjointSet::new(len)],
        }
    }

    fn entry_node(&self) -> usize {
        self.dimension * self.dimension
    }

    fn exit_node(&self) -> usize {
        self.dimension * self.dimension + 1
    }

    /// Fold a claim that has already been committed to `board` into `side`'s forest.
    ///
    /// # Panics
    ///
    /// If the cell is not owned by `side` on `board`, or the board size differs.
    /// Both mean the caller fed the tracker something the board never accepted.
    pub fn record_claim(&mut self, board: &Board, row: usize, column: usize, side: Side) {
        assert_eq!(
            board.dimension(),
            self.dimension,
            "tracker built for a {0}x{0} board was given a {1}x{1} board",
            self.dimension,
            board.dimension()
        );
        let owner = board.owner(row, column).ok().flatten();
        assert_eq!(
            owner,
            Some(side),
            "cell ({row}, {column}) recorded for {side} but the board shows {owner:?}"
        );

        let orientation = side.orientation();
        let cell = board.index_of(row, column);
        let entry = self.entry_node();
        let exit = self.exit_node();
        let forest = &mut self.forests[side.index()];

        for (r, c) in board.neighbors(row, column) {
            if board.owner(r, c).ok().flatten() == Some(side) {
                forest.union(cell, board.index_of(r, c));
            }
        }

        if orientation.is_entry(row, column) {
            forest.union(cell, entry);
        }
        if orientation.is_exit(row, column, self.dimension) {
            forest.union(cell, exit);
        }
    }

    /// True iff `side`'s claimed cells connect its entry and exit edges
    pub fn has_won(&mut self, side: Side) -> bool {
        let entry = self.entry_node();
        let exit = self.exit_node();
        self.forests[side.index()].connected(entry, exit)
    }

    /// True iff two cells are linked through `side`'s claimed cells
    pub fn connected(&mut self, side: Side, a: (usize, usize), b: (usize, usize)) -> bool {
        let n = self.dimension;
        self.forests[side.index()].connected(a.0 * n + a.1, b.0 * n + b.1)
    }

    /// Forget every claim
    pub fn reset(&mut self) {
        for forest in &mut self.forests {
            forest.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    fn claim(board: &mut Board, tracker: &mut ConnectivityTracker, r: usize, c: usize, side: Side) {
        board.claim(r, c, side).unwrap();
        tracker.record_claim(board, r, c, side);
    }

    /// Reference answer: breadth-first search over the whole board
    fn bfs_has_won(board: &Board, side: Side) -> bool {
        let n = board.dimension();
        let orientation = side.orientation();
        let mut seen = vec![false; n * n];
        let mut queue = VecDeque::new();

        for t in board.tiles() {
            if t.owner() == Some(side) && orientation.is_entry(t.row(), t.column()) {
                seen[t.row() * n + t.column()] = true;
                queue.push_back((t.row(), t.column()));
            }
        }

        while let Some((r, c)) = queue.pop_front() {
            if orientation.is_exit(r, c, n) {
                return true;
            }
            for (nr, nc) in board.neighbors(r, c) {
                if !seen[nr * n + nc] && board.owner(nr, nc).unwrap() == Some(side) {
                    seen[nr * n + nc] = true;
                    queue.push_back((nr, nc));
                }
            }
        }
        false
    }

    #[test]
    fn test_disjoint_set_basics() {
        let mut ds = DisjointSet::new(6);
        assert_eq!(ds.len(), 6);
        assert!(!ds.connected(0, 1));
        assert!(ds.union(0, 1));
        assert!(ds.union(2, 3));
        assert!(!ds.connected(1, 2));
        assert!(ds.union(1, 3));
        assert!(ds.connected(0, 2));
        assert!(!ds.union(0, 3));
        assert!(!ds.connected(4, 5));

        ds.reset();
        assert!(!ds.connected(0, 1));
        assert_eq!(ds.find(3), 3);
    }

    #[test]
    fn test_straight_column_wins_for_red() {
        let mut board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);

        for r in 0..9 {
            assert!(!tracker.has_won(Side::Red), "won early at row {r}");
            claim(&mut board, &mut tracker, r, 4, Side::Red);
        }
        assert!(tracker.has_won(Side::Red));
        assert!(!tracker.has_won(Side::Blue));
    }

    #[test]
    fn test_straight_column_does_not_win_for_blue() {
        // A top-to-bottom chain is worthless for the left-right side
        let mut board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);
        for r in 0..9 {
            claim(&mut board, &mut tracker, r, 0, Side::Blue);
        }
        assert!(!tracker.has_won(Side::Blue));
    }

    #[test]
    fn test_diagonal_chain_wins_for_blue() {
        // (r, c) -> (r - 1, c + 1) is a hex neighbour
        let mut board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);
        for c in 0..9 {
            claim(&mut board, &mut tracker, 8 - c, c, Side::Blue);
        }
        assert!(tracker.has_won(Side::Blue));
    }

    #[test]
    fn test_other_diagonal_is_not_adjacent() {
        // (r, c) -> (r + 1, c + 1) is not a hex neighbour
        let mut board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);
        for i in 0..9 {
            claim(&mut board, &mut tracker, i, i, Side::Red);
        }
        assert!(!tracker.has_won(Side::Red));
        assert!(!tracker.connected(Side::Red, (0, 0), (1, 1)));
    }

    #[test]
    fn test_touching_one_edge_only() {
        let mut board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);
        for c in 0..9 {
            claim(&mut board, &mut tracker, 0, c, Side::Red);
        }
        for r in 1..8 {
            claim(&mut board, &mut tracker, r, 0, Side::Red);
        }
        assert!(!tracker.has_won(Side::Red));

        claim(&mut board, &mut tracker, 8, 0, Side::Red);
        assert!(tracker.has_won(Side::Red));
    }

    #[test]
    fn test_gap_filled_last() {
        let mut board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);
        for r in (0..9).filter(|&r| r != 5) {
            claim(&mut board, &mut tracker, r, 2, Side::Red);
        }
        assert!(!tracker.has_won(Side::Red));
        assert!(!tracker.connected(Side::Red, (4, 2), (6, 2)));

        claim(&mut board, &mut tracker, 5, 2, Side::Red);
        assert!(tracker.has_won(Side::Red));
        assert!(tracker.connected(Side::Red, (0, 2), (8, 2)));
    }

    #[test]
    fn test_opponent_cells_do_not_link() {
        let mut board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);
        for r in 0..9 {
            let side = if r == 4 { Side::Blue } else { Side::Red };
            claim(&mut board, &mut tracker, r, 3, side);
        }
        assert!(!tracker.has_won(Side::Red));
        assert!(!tracker.has_won(Side::Blue));
    }

    #[test]
    fn test_reset_clears_connections() {
        let mut board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);
        for r in 0..9 {
            claim(&mut board, &mut tracker, r, 1, Side::Red);
        }
        assert!(tracker.has_won(Side::Red));

        board.reset_tiles();
        tracker.reset();
        assert!(!tracker.has_won(Side::Red));
        assert!(!tracker.has_won(Side::Blue));
        assert!(!tracker.connected(Side::Red, (0, 1), (1, 1)));
    }

    #[test]
    #[should_panic(expected = "recorded for Red")]
    fn test_record_unclaimed_cell_panics() {
        let board = Board::new(9, 9).unwrap();
        let mut tracker = ConnectivityTracker::new(9);
        tracker.record_claim(&board, 0, 0, Side::Red);
    }

    proptest! {
        #[test]
        fn win_matches_breadth_first_search(
            n in 9usize..12,
            picks in proptest::collection::vec((0usize..19, 0usize..19), 1..150),
        ) {
            let mut board = Board::new(n, n).unwrap();
            let mut tracker = ConnectivityTracker::new(n);
            let mut side = Side::Red;

            for (r, c) in picks {
                let (r, c) = (r % n, c % n);
                if board.claim(r, c, side).is_err() {
                    continue;
                }
                tracker.record_claim(&board, r, c, side);

                for s in Side::ALL {
                    prop_assert_eq!(tracker.has_won(s), bfs_has_won(&board, s));
                }
                side = side.opponent();
            }
        }
    }
}
