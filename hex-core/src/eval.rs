//! Position evaluation: how far each side is from connecting its edges

use std::collections::VecDeque;

use crate::board::{Board, Side};

/// Score used in place of a distance when a side is completely cut off
pub const BLOCKED: usize = usize::MAX / 4;

/// Fewest unclaimed cells `side` must still claim to connect its two edges.
///
/// Own cells cost nothing, empty cells cost one and opponent cells cannot be
/// crossed. `Some(0)` means `side` is already connected, `None` that the
/// opponent has cut every route.
pub fn connection_distance(board: &Board, side: Side) -> Option<usize> {
    distance_with(board, side, None)
}

/// Like [`connection_distance`], as if `(row, column)` were also owned by `claimer`
pub fn connection_distance_after(
    board: &Board,
    side: Side,
    row: usize,
    column: usize,
    claimer: Side,
) -> Option<usize> {
    distance_with(board, side, Some((row, column, claimer)))
}

// ============================================================================
// 0-1 BFS
// ============================================================================

fn distance_with(
    board: &Board,
    side: Side,
    hypothetical: Option<(usize, usize, Side)>,
) -> Option<usize> {
    let n = board.dimension();
    let orientation = side.orientation();

    let owner_at = |r: usize, c: usize| -> Option<Side> {
        match hypothetical {
            Some((hr, hc, claimer)) if hr == r && hc == c => Some(claimer),
            _ => board.owner(r, c).ok().flatten(),
        }
    };
    // None = impassable
    let cost = |r: usize, c: usize| -> Option<usize> {
        match owner_at(r, c) {
            Some(owner) if owner == side => Some(0),
            Some(_) => None,
            None => Some(1),
        }
    };

    let mut dist = vec![usize::MAX; n * n];
    let mut deque = VecDeque::new();

    for r in 0..n {
        for c in 0..n {
            if !orientation.is_entry(r, c) {
                continue;
            }
            if let Some(w) = cost(r, c) {
                dist[r * n + c] = w;
                if w == 0 {
                    deque.push_front((r, c));
                } else {
                    deque.push_back((r, c));
                }
            }
        }
    }

    let mut best: Option<usize> = None;

    while let Some((r, c)) = deque.pop_front() {
        let d = dist[r * n + c];
        if orientation.is_exit(r, c, n) {
            best = Some(best.map_or(d, |b| b.min(d)));
        }

        for (nr, nc) in board.neighbors(r, c) {
            let Some(w) = cost(nr, nc) else { continue };
            let nd = d + w;
            let slot = &mut dist[nr * n + nc];
            if nd < *slot {
                *slot = nd;
                if w == 0 {
                    deque.push_front((nr, nc));
                } else {
                    deque.push_back((nr, nc));
                }
            }
        }
    }

    best
}
