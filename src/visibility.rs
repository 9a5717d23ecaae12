use crate::grid::{CellKind, Grid, Position};
use log::debug;
use std::collections::HashSet;

/// Result of a visibility query: a clipped window of the grid and a circular mask over it
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    /// Cell kinds inside the clipped bounding box
    pub window: Vec<Vec<CellKind>>,
    /// `mask[r][c]` is true when window cell (r, c) lies within the radius
    pub mask: Vec<Vec<bool>>,
    /// Origin cell in window-local coordinates
    pub origin: Position,
    /// Grid position of the window's top-left cell
    pub offset: Position,
}

/// Compute the cells visible from `origin` within Euclidean `radius`
///
/// The window is the square bounding box of the circle, clipped to the grid,
/// so cells past the grid edge are absent rather than reported as visible.
/// A radius of zero or less yields the 1x1 window holding only the origin.
pub fn compute_view(grid: &Grid, origin: Position, radius: i32) -> View {
    debug_assert!(grid.contains(origin), "view origin {} outside grid", origin);

    let radius = radius.max(0);

    let top_left = Position::new(
        origin.row.saturating_sub(radius).max(0),
        origin.col.saturating_sub(radius).max(0),
    );
    let bottom_right = Position::new(
        origin.row.saturating_add(radius).min(grid.rows - 1),
        origin.col.saturating_add(radius).min(grid.cols - 1),
    );

    let window = grid.sub_matrix(top_left, bottom_right);
    let local_origin = Position::new(origin.row - top_left.row, origin.col - top_left.col);

    let radius_squared = radius as i64 * radius as i64;
    let mask = window
        .iter()
        .enumerate()
        .map(|(r, row)| {
            (0..row.len())
                .map(|c| {
                    Position::new(r as i32, c as i32).distance_squared(&local_origin)
                        <= radius_squared
                })
                .collect()
        })
        .collect();

    debug!(
        "View from {} radius {}: window {}..={}",
        origin, radius, top_left, bottom_right
    );

    View {
        window,
        mask,
        origin: local_origin,
        offset: top_left,
    }
}

impl View {
    pub fn rows(&self) -> usize {
        self.window.len()
    }

    pub fn cols(&self) -> usize {
        self.window.first().map_or(0, Vec::len)
    }

    /// Whether the window-local cell is inside the visibility circle
    pub fn is_visible(&self, local: Position) -> bool {
        if local.row < 0 || local.col < 0 {
            return false;
        }
        self.mask
            .get(local.row as usize)
            .and_then(|row| row.get(local.col as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Convert a window-local position to grid coordinates
    pub fn to_global(&self, local: Position) -> Position {
        Position::new(local.row + self.offset.row, local.col + self.offset.col)
    }

    /// Convert a grid position to window-local coordinates, if it falls inside the window
    pub fn to_local(&self, global: Position) -> Option<Position> {
        let local = Position::new(global.row - self.offset.row, global.col - self.offset.col);
        let inside = local.row >= 0
            && local.col >= 0
            && (local.row as usize) < self.rows()
            && (local.col as usize) < self.cols();
        inside.then_some(local)
    }

    /// All visible cells in grid coordinates
    pub fn visible_cells(&self) -> HashSet<Position> {
        let mut visible = HashSet::new();
        for (r, row) in self.mask.iter().enumerate() {
            for (c, &seen) in row.iter().enumerate() {
                if seen {
                    visible.insert(self.to_global(Position::new(r as i32, c as i32)));
                }
            }
        }
        visible
    }
}
