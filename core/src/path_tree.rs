//! Arena of paths grown during generation
//!
//! Paths are stored in creation order and referenced by [`PathId`]. The root
//! path is always `PathId(0)`; every other path records the parent path and
//! the index of the parent cell it branched from.

use crate::grid::Cell;

/// Index of a path inside a [`PathTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathId(pub usize);

impl PathId {
    pub const ROOT: PathId = PathId(0);
}

impl core::fmt::Display for PathId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a subpath attaches to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    pub path: PathId,
    /// Index into the parent's cells of the cell the branch grew from
    pub branch_index: usize,
}

/// An ordered run of cells grown in one pass
#[derive(Debug, Clone)]
pub struct Path {
    cells: Vec<Cell>,
    level: usize,
    parent: Option<ParentLink>,
}

impl Path {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn tail(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// 0 for the root, parent level + 1 otherwise
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn parent(&self) -> Option<ParentLink> {
        self.parent
    }
}

#[derive(Debug, Clone)]
pub struct PathTree {
    paths: Vec<Path>,
}

impl PathTree {
    /// Start a tree whose root path begins at `start`
    pub fn new(start: Cell) -> Self {
        Self {
            paths: vec![Path {
                cells: vec![start],
                level: 0,
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> &Path {
        &self.paths[PathId::ROOT.0]
    }

    pub fn get(&self, id: PathId) -> &Path {
        &self.paths[id.0]
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PathId, &Path)> {
        self.paths.iter().enumerate().map(|(i, p)| (PathId(i), p))
    }

    /// Create a subpath of `parent` branching from `parent.cells[branch_index]`
    pub fn spawn(&mut self, parent: PathId, branch_index: usize, first: Cell) -> PathId {
        let level = self.get(parent).level + 1;
        debug_assert!(branch_index < self.get(parent).len());

        let id = PathId(self.paths.len());
        self.paths.push(Path {
            cells: vec![first],
            level,
            parent: Some(ParentLink { path: parent, branch_index }),
        });
        id
    }

    pub fn push(&mut self, id: PathId, cell: Cell) {
        self.paths[id.0].cells.push(cell);
    }

    pub fn pop(&mut self, id: PathId) -> Option<Cell> {
        self.paths[id.0].cells.pop()
    }

    /// The next path after `from` (wrapping around) whose level is `level`.
    ///
    /// Returns `from` itself when it is the only path at that level.
    pub fn next_at_level(&self, from: PathId, level: usize) -> Option<PathId> {
        let count = self.paths.len();
        (1..=count)
            .map(|step| (from.0 + step) % count)
            .find(|&i| self.paths[i].level == level)
            .map(PathId)
    }

    /// Parent cell a subpath is attached to
    pub fn branch_cell(&self, id: PathId) -> Option<Cell> {
        let link = self.get(id).parent?;
        self.get(link.path).cells.get(link.branch_index).copied()
    }

    pub fn total_cells(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }
}
