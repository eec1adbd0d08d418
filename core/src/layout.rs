//! Per-cell border states and carving them out of a finished path tree

use crate::error::MazeError;
use crate::grid::{Cell, Grid};
use crate::path_tree::{PathId, PathTree};

/// One of the four sides of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
}

impl Side {
    /// Boundary sides are tried in this order when placing the entrance and exit
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The side of `from` that faces `to`. The cells must be orthogonal neighbours.
    pub fn between(from: Cell, to: Cell) -> Result<Side, MazeError> {
        let side = if from.x == to.x && to.y + 1 == from.y {
            Side::Top
        } else if from.x == to.x && from.y + 1 == to.y {
            Side::Bottom
        } else if from.y == to.y && to.x + 1 == from.x {
            Side::Left
        } else if from.y == to.y && from.x + 1 == to.x {
            Side::Right
        } else {
            return Err(MazeError::invariant(format!(
                "cells {} and {} are identical or not adjacent",
                from, to
            )));
        };
        Ok(side)
    }

    /// Whether this side of `cell` lies on the outer edge of the grid
    pub fn is_boundary_of(self, cell: Cell, size_x: usize, size_y: usize) -> bool {
        match self {
            Side::Top => cell.y == 0,
            Side::Bottom => cell.y + 1 == size_y,
            Side::Left => cell.x == 0,
            Side::Right => cell.x + 1 == size_x,
        }
    }
}

/// State of one cell side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Border {
    #[default]
    Wall,
    Open,
    Entrance,
    Exit,
}

impl Border {
    pub fn is_passable(self) -> bool {
        self != Border::Wall
    }
}

/// The four borders of a cell, indexed by [`Side`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellLayout {
    borders: [Border; 4], // [TOP, BOTTOM, LEFT, RIGHT]
}

impl CellLayout {
    pub fn border(&self, side: Side) -> Border {
        self.borders[side as usize]
    }

    pub fn set_border(&mut self, side: Side, border: Border) {
        self.borders[side as usize] = border;
    }

    pub fn border_is(&self, side: Side, border: Border) -> bool {
        self.border(side) == border
    }

    pub fn open_sides(&self) -> impl Iterator<Item = Side> + '_ {
        Side::ALL.into_iter().filter(|&s| self.border(s).is_passable())
    }
}

/// Border states for every cell of the maze
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutGrid {
    cells: Grid<CellLayout>,
}

impl LayoutGrid {
    /// Every side of every cell walled
    pub fn walled(size_x: usize, size_y: usize) -> Self {
        Self {
            cells: Grid::filled(size_x, size_y, CellLayout::default()),
        }
    }

    pub fn size_x(&self) -> usize {
        self.cells.size_x()
    }

    pub fn size_y(&self) -> usize {
        self.cells.size_y()
    }

    pub fn cell(&self, cell: Cell) -> &CellLayout {
        &self.cells[cell]
    }

    pub fn get(&self, cell: Cell) -> Option<&CellLayout> {
        self.cells.get(cell)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellLayout]> {
        self.cells.rows()
    }

    /// Open a corridor between two adjacent cells, on both sides
    pub fn open_between(&mut self, a: Cell, b: Cell) -> Result<(), MazeError> {
        let side = Side::between(a, b)?;
        self.cells[a].set_border(side, Border::Open);
        self.cells[b].set_border(side.opposite(), Border::Open);
        Ok(())
    }

    /// Put `border` on the first outer side of `cell` (in [`Side::ALL`] order)
    /// that is still a wall. Returns the side used.
    pub fn mark_boundary(&mut self, cell: Cell, border: Border) -> Result<Side, MazeError> {
        let (size_x, size_y) = (self.size_x(), self.size_y());
        let side = Side::ALL
            .into_iter()
            .filter(|s| s.is_boundary_of(cell, size_x, size_y))
            .find(|&s| self.cells[cell].border_is(s, Border::Wall))
            .ok_or_else(|| {
                MazeError::invariant(format!("cell {} has no free side on the grid boundary", cell))
            })?;

        self.cells[cell].set_border(side, border);
        Ok(side)
    }

    /// Every (cell, side) pair carrying `border`, in row-major order
    pub fn find(&self, border: Border) -> Vec<(Cell, Side)> {
        self.cells
            .cells()
            .flat_map(|cell| {
                let layout = self.cells[cell];
                Side::ALL
                    .into_iter()
                    .filter(move |&s| layout.border_is(s, border))
                    .map(move |s| (cell, s))
            })
            .collect()
    }

    /// Number of open corridors between cells (each counted once)
    pub fn corridor_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| {
                // Count only the Bottom and Right halves of each mirrored pair
                [Side::Bottom, Side::Right]
                    .into_iter()
                    .filter(|&s| c.border_is(s, Border::Open))
                    .count()
            })
            .sum()
    }
}

/// Turn a finished path tree into borders.
///
/// Consecutive cells of every path are joined, every branch is joined to the
/// parent cell it grew from, and the main path gets the entrance on its first
/// cell and the exit on its last.
pub fn carve(tree: &PathTree, size_x: usize, size_y: usize) -> Result<LayoutGrid, MazeError> {
    let mut layout = LayoutGrid::walled(size_x, size_y);

    for (id, path) in tree.iter() {
        for pair in path.cells().windows(2) {
            layout.open_between(pair[0], pair[1])?;
        }

        if id != PathId::ROOT {
            let first = path
                .first()
                .ok_or_else(|| MazeError::invariant(format!("path {} is empty", id)))?;
            let branch = tree
                .branch_cell(id)
                .ok_or_else(|| MazeError::invariant(format!("path {} has no parent cell", id)))?;
            layout.open_between(first, branch)?;
        }
    }

    let root = tree.root();
    let (first, last) = match (root.first(), root.tail()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(MazeError::invariant("main path is empty")),
    };

    layout.mark_boundary(first, Border::Entrance)?;
    // With a single-cell main path the exit takes the next free boundary side
    layout.mark_boundary(last, Border::Exit)?;

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_between() {
        let c = Cell::new(1, 1);
        assert_eq!(Side::between(c, Cell::new(1, 0)), Ok(Side::Top));
        assert_eq!(Side::between(c, Cell::new(1, 2)), Ok(Side::Bottom));
        assert_eq!(Side::between(c, Cell::new(0, 1)), Ok(Side::Left));
        assert_eq!(Side::between(c, Cell::new(2, 1)), Ok(Side::Right));
    }

    #[test]
    fn test_side_between_rejects_non_neighbours() {
        let c = Cell::new(1, 1);
        assert!(matches!(Side::between(c, c), Err(MazeError::Invariant(_))));
        assert!(matches!(Side::between(c, Cell::new(2, 2)), Err(MazeError::Invariant(_))));
        assert!(matches!(Side::between(c, Cell::new(1, 3)), Err(MazeError::Invariant(_))));
    }

    #[test]
    fn test_opposite() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_ne!(side.opposite(), side);
        }
    }

    #[test]
    fn test_open_between_mirrors() {
        let mut layout = LayoutGrid::walled(2, 2);
        layout.open_between(Cell::new(0, 0), Cell::new(1, 0)).unwrap();

        assert!(layout.cell(Cell::new(0, 0)).border_is(Side::Right, Border::Open));
        assert!(layout.cell(Cell::new(1, 0)).border_is(Side::Left, Border::Open));
        assert!(layout.cell(Cell::new(0, 1)).border_is(Side::Top, Border::Wall));
        assert_eq!(layout.corridor_count(), 1);
    }

    #[test]
    fn test_mark_boundary_order() {
        let mut layout = LayoutGrid::walled(1, 1);
        let cell = Cell::new(0, 0);

        assert_eq!(layout.mark_boundary(cell, Border::Entrance), Ok(Side::Top));
        assert_eq!(layout.mark_boundary(cell, Border::Exit), Ok(Side::Bottom));
        assert_eq!(layout.find(Border::Entrance), vec![(cell, Side::Top)]);
        assert_eq!(layout.find(Border::Exit), vec![(cell, Side::Bottom)]);
    }

    #[test]
    fn test_mark_boundary_interior_cell_fails() {
        let mut layout = LayoutGrid::walled(3, 3);
        assert!(matches!(
            layout.mark_boundary(Cell::new(1, 1), Border::Exit),
            Err(MazeError::Invariant(_))
        ));
    }

    #[test]
    fn test_carve_small_tree() {
        // Main path along the top row of a 3x2 grid, one branch down from (1,0)
        let mut tree = PathTree::new(Cell::new(0, 0));
        tree.push(PathId::ROOT, Cell::new(1, 0));
        tree.push(PathId::ROOT, Cell::new(2, 0));
        let branch = tree.spawn(PathId::ROOT, 1, Cell::new(1, 1));
        tree.push(branch, Cell::new(0, 1));
        tree.spawn(branch, 0, Cell::new(2, 1));

        let layout = carve(&tree, 3, 2).unwrap();

        assert_eq!(layout.find(Border::Entrance), vec![(Cell::new(0, 0), Side::Top)]);
        assert_eq!(layout.find(Border::Exit), vec![(Cell::new(2, 0), Side::Top)]);
        assert_eq!(layout.corridor_count(), 5);

        let joint = layout.cell(Cell::new(1, 0));
        assert!(joint.border_is(Side::Left, Border::Open));
        assert!(joint.border_is(Side::Right, Border::Open));
        assert!(joint.border_is(Side::Bottom, Border::Open));
        assert!(joint.border_is(Side::Top, Border::Wall));

        let twig_cell = layout.cell(Cell::new(2, 1));
        assert_eq!(twig_cell.open_sides().collect::<Vec<_>>(), vec![Side::Left]);
    }

    #[test]
    fn test_carve_single_cell() {
        let tree = PathTree::new(Cell::new(0, 0));
        let layout = carve(&tree, 1, 1).unwrap();

        let cell = layout.cell(Cell::new(0, 0));
        assert!(cell.border_is(Side::Top, Border::Entrance));
        assert!(cell.border_is(Side::Bottom, Border::Exit));
        assert!(cell.border_is(Side::Left, Border::Wall));
        assert!(cell.border_is(Side::Right, Border::Wall));
        assert_eq!(layout.corridor_count(), 0);
    }
}
