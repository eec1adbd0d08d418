//! Path growth: the main path and its branches
//!
//! Algorithm:
//! 1. Main path: starting on row 0, repeatedly step to the unclaimed
//!    neighbour with the greatest priority. When stuck, backtrack (pop the
//!    tail and set it aside). Stop once the path has at least `min_moves`
//!    cells and its tail sits on the grid boundary. Cells set aside become
//!    available again afterwards. If the search backs all the way up to the
//!    start cell, the longest path seen that ended on the boundary is
//!    restored instead.
//! 2. Branches: sweep the paths of one level at a time. For every cell of the
//!    current path that still has an unclaimed neighbour, grow a branch from
//!    that neighbour (no backtracking, at most `max_sub_path_moves` cells).
//!    Once every path of the level is exhausted, move to the next level.
//!    Repeat until every cell is claimed.
//!
//! Each step only reads the priority map and the occupancy map, so a given
//! priority map always yields the same tree.

use crate::difficulty::Bounds;
use crate::error::MazeError;
use crate::grid::{Cell, OccupancyMap, PriorityMap};
use crate::path_tree::{PathId, PathTree};

/// Finished paths plus the occupancy map they were grown against
#[derive(Debug, Clone)]
pub struct Growth {
    pub tree: PathTree,
    pub occupancy: OccupancyMap,
}

/// Grow the main path and every branch for one grid
pub fn grow(start: Cell, priorities: &PriorityMap, bounds: Bounds) -> Result<Growth, MazeError> {
    let mut occupancy = OccupancyMap::new(priorities.size_x(), priorities.size_y());
    let mut tree = PathTree::new(start);
    occupancy.claim(start, PathId::ROOT)?;

    build_initial_path(&mut tree, &mut occupancy, priorities, bounds.min_moves)?;
    tracing::debug!(
        "Main path finished with {} cells ({} unclaimed cells left)",
        tree.root().len(),
        occupancy.unclaimed_count()
    );

    build_sub_paths(&mut tree, &mut occupancy, priorities, bounds.max_sub_path_moves)?;
    tracing::debug!("Grew {} paths in total", tree.len());

    Ok(Growth { tree, occupancy })
}

/// Whether the main path has to keep growing (or backtracking)
fn must_continue(tail: Cell, len: usize, min_moves: usize, size_x: usize, size_y: usize) -> bool {
    len < min_moves || !tail.is_on_boundary(size_x, size_y)
}

fn build_initial_path(
    tree: &mut PathTree,
    occupancy: &mut OccupancyMap,
    priorities: &PriorityMap,
    min_moves: usize,
) -> Result<(), MazeError> {
    let (size_x, size_y) = (priorities.size_x(), priorities.size_y());
    let mut backtracked: Vec<Cell> = Vec::new();

    // Longest path so far whose tail was on the boundary. Its first `shared`
    // cells still match the live path, so only the rest is copied on update.
    let mut fallback: Vec<Cell> = Vec::new();
    let mut shared = 0;

    loop {
        let len = tree.root().len();
        let tail = tree
            .root()
            .tail()
            .ok_or_else(|| MazeError::invariant("main path lost its starting cell"))?;

        if !must_continue(tail, len, min_moves, size_x, size_y) {
            break;
        }

        if let Some(next) = occupancy.greatest_unclaimed_neighbour(tail, priorities) {
            occupancy.claim(next, PathId::ROOT)?;
            tree.push(PathId::ROOT, next);

            if next.is_on_boundary(size_x, size_y) && len + 1 > fallback.len() {
                fallback.truncate(shared);
                fallback.extend_from_slice(&tree.root().cells()[shared..]);
                shared = fallback.len();
            }
            continue;
        }

        if len == 1 {
            // The bounds ask for more than any path from this start can give
            if fallback.len() < 2 {
                tracing::warn!(
                    "Main path exhausted every cell reachable from {} without meeting its bounds",
                    tail
                );
                break;
            }

            tracing::warn!(
                "Main path backtracked to {}; keeping its longest boundary run ({} of {} cells)",
                tail,
                fallback.len(),
                min_moves
            );
            for &cell in &fallback[1..] {
                occupancy.reset_reclaimable(cell);
                occupancy.claim(cell, PathId::ROOT)?;
                tree.push(PathId::ROOT, cell);
            }
            break;
        }

        shared = shared.min(len - 1);
        tree.pop(PathId::ROOT);
        occupancy.mark_reclaimable(tail)?;
        backtracked.push(tail);
    }

    tracing::debug!("Main path backtracked over {} cells", backtracked.len());
    for cell in backtracked {
        occupancy.reset_reclaimable(cell);
    }

    Ok(())
}

fn build_sub_paths(
    tree: &mut PathTree,
    occupancy: &mut OccupancyMap,
    priorities: &PriorityMap,
    max_sub_path_moves: usize,
) -> Result<(), MazeError> {
    let mut level = 0;
    let mut sweep_start = PathId::ROOT;
    let mut current = PathId::ROOT;

    while !occupancy.is_full() {
        let path_len = tree.get(current).len();
        let mut index = 0;
        // Cells passed since the last branch. Claims never free a neighbour,
        // so a full lap without a branch means the path is exhausted.
        let mut idle = 0;

        while idle < path_len && !occupancy.is_full() {
            let cell = tree.get(current).cells()[index];

            if let Some(first) = occupancy.greatest_unclaimed_neighbour(cell, priorities) {
                let branch = tree.spawn(current, index, first);
                occupancy.claim(first, branch)?;
                grow_branch(tree, occupancy, priorities, branch, max_sub_path_moves)?;
                idle = 0;
            } else {
                idle += 1;
            }

            index = (index + 1) % path_len;
        }

        if occupancy.is_full() {
            break;
        }

        current = tree
            .next_at_level(current, level)
            .ok_or_else(|| MazeError::invariant(format!("no path left at level {}", level)))?;

        if current == sweep_start {
            level += 1;
            current = tree.next_at_level(current, level).ok_or_else(|| {
                MazeError::invariant(format!(
                    "{} cells unclaimed but no path exists at level {}",
                    occupancy.unclaimed_count(),
                    level
                ))
            })?;
            sweep_start = current;
            tracing::debug!("Branch sweep moved to level {}", level);
        }
    }

    Ok(())
}

/// Extend a fresh branch until it stalls or reaches its length cap
fn grow_branch(
    tree: &mut PathTree,
    occupancy: &mut OccupancyMap,
    priorities: &PriorityMap,
    branch: PathId,
    max_sub_path_moves: usize,
) -> Result<(), MazeError> {
    while tree.get(branch).len() < max_sub_path_moves {
        let Some(tail) = tree.get(branch).tail() else {
            break;
        };
        let Some(next) = occupancy.greatest_unclaimed_neighbour(tail, priorities) else {
            break;
        };
        occupancy.claim(next, branch)?;
        tree.push(branch, next);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyCurve;
    use crate::grid::Occupancy;
    use crate::rng::draw_sequence;

    fn grow_seed(seed: u64, size_x: usize, size_y: usize, difficulty: u8) -> (Growth, Bounds) {
        let draw = draw_sequence(seed, size_x, size_y);
        let bounds = Bounds::compute(difficulty, size_x, size_y, DifficultyCurve::Linear);
        (grow(draw.start, &draw.priorities, bounds).unwrap(), bounds)
    }

    fn assert_adjacent(a: Cell, b: Cell) {
        let dist = a.x.abs_diff(b.x) + a.y.abs_diff(b.y);
        assert_eq!(dist, 1, "{} and {} are not adjacent", a, b);
    }

    #[test]
    fn test_every_cell_claimed_once() {
        for seed in [1u64, 42, 99999, 2918957128] {
            let (growth, _) = grow_seed(seed, 12, 9, 5);

            assert!(growth.occupancy.is_full());
            assert_eq!(growth.tree.total_cells(), 12 * 9);

            for (id, path) in growth.tree.iter() {
                for &cell in path.cells() {
                    assert_eq!(growth.occupancy.get(cell), Occupancy::Claimed(id));
                }
            }
        }
    }

    #[test]
    fn test_main_path_bounds() {
        for difficulty in [1u8, 5, 8, 10] {
            let (growth, bounds) = grow_seed(7, 10, 10, difficulty);
            let root = growth.tree.root();

            assert!(root.len() >= bounds.min_moves);
            assert_eq!(root.first().unwrap().y, 0, "main path starts on the top row");
            assert!(root.tail().unwrap().is_on_boundary(10, 10));
        }
    }

    #[test]
    fn test_branch_length_cap() {
        for seed in 0..20u64 {
            let (growth, bounds) = grow_seed(seed, 8, 8, 3);
            for (id, path) in growth.tree.iter().skip(1) {
                assert!(
                    path.len() <= bounds.max_sub_path_moves,
                    "path {} has {} cells, cap {}",
                    id,
                    path.len(),
                    bounds.max_sub_path_moves
                );
            }
        }
    }

    #[test]
    fn test_paths_are_contiguous() {
        let (growth, _) = grow_seed(31337, 15, 11, 8);

        for (id, path) in growth.tree.iter() {
            for pair in path.cells().windows(2) {
                assert_adjacent(pair[0], pair[1]);
            }
            if id != PathId::ROOT {
                let branch = growth.tree.branch_cell(id).unwrap();
                assert_adjacent(branch, path.first().unwrap());
            }
        }
    }

    #[test]
    fn test_levels_follow_parents() {
        let (growth, _) = grow_seed(5, 10, 6, 5);

        for (_, path) in growth.tree.iter().skip(1) {
            let parent = path.parent().unwrap();
            assert!(parent.path.0 < growth.tree.len());
            assert_eq!(path.level(), growth.tree.get(parent.path).level() + 1);
        }
    }

    #[test]
    fn test_deterministic() {
        let (a, _) = grow_seed(123, 9, 9, 5);
        let (b, _) = grow_seed(123, 9, 9, 5);

        assert_eq!(a.tree.len(), b.tree.len());
        for ((_, pa), (_, pb)) in a.tree.iter().zip(b.tree.iter()) {
            assert_eq!(pa.cells(), pb.cells());
        }
    }

    #[test]
    fn test_single_cell_grid() {
        let (growth, _) = grow_seed(9, 1, 1, 1);
        assert_eq!(growth.tree.len(), 1);
        assert_eq!(growth.tree.root().cells(), &[Cell::new(0, 0)]);
        assert!(growth.occupancy.is_full());
    }

    #[test]
    fn test_single_row_grid() {
        let (growth, _) = grow_seed(4, 7, 1, 10);
        assert!(growth.occupancy.is_full());
        assert!(growth.tree.root().len() >= 2);
    }

    #[test]
    fn test_hand_built_priorities() {
        // 3x2 grid, start (0,0). Priorities steer the main path right along
        // the top row: (0,0) -> (1,0) -> (2,0).
        let priorities = PriorityMap::from_row_major(3, 2, vec![0.0, 0.9, 0.8, 0.1, 0.2, 0.3]);
        let bounds = Bounds { min_moves: 3, max_sub_path_moves: 2 };

        let growth = grow(Cell::new(0, 0), &priorities, bounds).unwrap();
        assert_eq!(
            growth.tree.root().cells(),
            &[Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
        );

        // (0,0) branches down to (0,1), which continues right to (1,1) and hits the cap.
        let first_branch = growth.tree.get(PathId(1));
        assert_eq!(first_branch.cells(), &[Cell::new(0, 1), Cell::new(1, 1)]);
        assert_eq!(growth.tree.branch_cell(PathId(1)), Some(Cell::new(0, 0)));

        // (2,0) picks up the last cell.
        let second_branch = growth.tree.get(PathId(2));
        assert_eq!(second_branch.cells(), &[Cell::new(2, 1)]);
        assert_eq!(growth.tree.branch_cell(PathId(2)), Some(Cell::new(2, 0)));
        assert_eq!(growth.tree.len(), 3);
    }

    #[test]
    fn test_backtracking_reclaims_cells() {
        // 2x3 grid, start (0,0). The main path runs (0,0) (0,1) (1,1) (1,0)
        // and gets stuck at four cells with five required, so it backtracks
        // off (1,0) and finishes through (1,2) (0,2). The popped cell is
        // picked up by a branch afterwards.
        let priorities = PriorityMap::from_row_major(2, 3, vec![0.0, 0.6, 0.7, 0.8, 0.1, 0.5]);
        let bounds = Bounds { min_moves: 5, max_sub_path_moves: 2 };

        let growth = grow(Cell::new(0, 0), &priorities, bounds).unwrap();
        assert_eq!(
            growth.tree.root().cells(),
            &[Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1), Cell::new(1, 2), Cell::new(0, 2)]
        );
        assert_eq!(growth.tree.get(PathId(1)).cells(), &[Cell::new(1, 0)]);
        assert_eq!(growth.tree.branch_cell(PathId(1)), Some(Cell::new(0, 0)));
        assert_eq!(growth.occupancy.get(Cell::new(1, 0)), Occupancy::Claimed(PathId(1)));
        assert!(growth.occupancy.is_full());
    }

    #[test]
    fn test_exhausted_main_path_restores_longest_boundary_run() {
        // 3x3, start (1,0): no nine-cell path starts on an edge midpoint, so
        // the search backs all the way home. The longest run it saw that
        // ended on the boundary becomes the main path, and the rest of the
        // grid is picked up by a branch.
        let priorities = PriorityMap::from_row_major(
            3,
            3,
            vec![0.5, 0.0, 0.4, 0.3, 0.9, 0.2, 0.6, 0.8, 0.7],
        );
        let bounds = Bounds { min_moves: 9, max_sub_path_moves: 3 };

        let growth = grow(Cell::new(1, 0), &priorities, bounds).unwrap();
        assert_eq!(
            growth.tree.root().cells(),
            &[
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(2, 2),
                Cell::new(2, 1),
                Cell::new(2, 0)
            ]
        );
        assert_eq!(
            growth.tree.get(PathId(1)).cells(),
            &[Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]
        );
        assert_eq!(growth.tree.len(), 2);
        assert!(growth.occupancy.is_full());
        assert_eq!(growth.tree.total_cells(), 9);
    }

    #[test]
    fn test_extreme_main_path_ends_away_from_start() {
        // These seeds send the main path back to its start cell on large
        // EXTREME grids; the restored run must still end on another cell.
        for (size, seed) in [(64usize, 4u64), (96, 1), (96, 3), (96, 4)] {
            let (growth, _) = grow_seed(seed, size, size, 10);
            let root = growth.tree.root();

            assert!(root.len() >= 2, "{}x{} seed {}: main path is a single cell", size, size, seed);
            assert_ne!(root.first(), root.tail());
            assert!(root.tail().unwrap().is_on_boundary(size, size));
            assert!(growth.occupancy.is_full());
            assert_eq!(growth.tree.total_cells(), size * size);
        }
    }
}
