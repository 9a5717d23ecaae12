use crate::error::{Result, SimError};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Terrain kind of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Open,
    Barrier,
    /// Border ring added around every interior matrix
    Wall,
}

impl CellKind {
    /// Display symbol used when printing the grid or a look view
    pub fn symbol(self) -> char {
        match self {
            CellKind::Open => '.',
            CellKind::Barrier => '+',
            CellKind::Wall => 'x',
        }
    }

    pub fn is_passable(self) -> bool {
        self == CellKind::Open
    }
}

impl TryFrom<u8> for CellKind {
    type Error = SimError;

    /// Interior matrices only carry 0 (open) and 1 (barrier)
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CellKind::Open),
            1 => Ok(CellKind::Barrier),
            other => Err(SimError::InvalidGrid(format!(
                "cell value {} is not 0 (open) or 1 (barrier)",
                other
            ))),
        }
    }
}

/// A (row, col) cell coordinate in the padded grid
///
/// Serialized as a `[row, col]` pair, which is the form stored in the movement log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Offset this position by a (row, col) delta
    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Position::new(self.row + d_row, self.col + d_col)
    }

    /// Squared Euclidean distance to another cell
    pub fn distance_squared(&self, other: &Position) -> i64 {
        let dr = self.row as i64 - other.row as i64;
        let dc = self.col as i64 - other.col as i64;
        dr * dr + dc * dc
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

impl From<Position> for (i32, i32) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Occupancy grid padded with a one-cell wall ring
///
/// `rows` and `cols` are the padded dimensions. The interior is fixed at
/// construction and never changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Build a grid from an interior matrix of 0 (open) / 1 (barrier) values
    pub fn new<R: AsRef<[u8]>>(interior: &[R]) -> Result<Self> {
        let kinds = interior
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&value| CellKind::try_from(value))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_interior_kinds(&kinds)
    }

    /// Build a grid from an interior matrix of kinds, surrounding it with walls
    pub fn from_interior_kinds(interior: &[Vec<CellKind>]) -> Result<Self> {
        let interior_rows = interior.len();
        if interior_rows == 0 {
            return Err(SimError::InvalidGrid("interior matrix is empty".to_string()));
        }

        let interior_cols = interior[0].len();
        if interior_cols == 0 {
            return Err(SimError::InvalidGrid("interior matrix has empty rows".to_string()));
        }

        if let Some((i, row)) = interior
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != interior_cols)
        {
            return Err(SimError::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                interior_cols
            )));
        }

        if interior.iter().flatten().any(|&kind| kind == CellKind::Wall) {
            return Err(SimError::InvalidGrid(
                "interior cells must be open or barrier".to_string(),
            ));
        }

        if !interior.iter().flatten().any(|kind| kind.is_passable()) {
            return Err(SimError::InvalidGrid(
                "interior has no open cell to place a robot".to_string(),
            ));
        }

        let rows = interior_rows as i32 + 2;
        let cols = interior_cols as i32 + 2;
        let mut cells = vec![CellKind::Wall; (rows * cols) as usize];

        for (r, row) in interior.iter().enumerate() {
            for (c, &kind) in row.iter().enumerate() {
                let id = (r + 1) * cols as usize + (c + 1);
                cells[id] = kind;
            }
        }

        debug!("Built {}x{} grid ({}x{} interior)", rows, cols, interior_rows, interior_cols);

        Ok(Grid { rows, cols, cells })
    }

    /// Generate a random interior where each cell is a barrier with probability `p`
    pub fn generate_random(rows: i32, cols: i32, p: f64) -> Result<Self> {
        Self::generate_random_with(rows, cols, p, &mut rand::thread_rng())
    }

    /// Same as [`Grid::generate_random`] but drawing from the given generator
    pub fn generate_random_with<G: Rng>(
        rows: i32,
        cols: i32,
        p: f64,
        rng: &mut G,
    ) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(SimError::InvalidGrid(format!(
                "grid dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(SimError::InvalidGrid(format!(
                "barrier probability {} is outside [0, 1]",
                p
            )));
        }

        let interior: Vec<Vec<CellKind>> = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| {
                        if rng.gen_bool(p) {
                            CellKind::Barrier
                        } else {
                            CellKind::Open
                        }
                    })
                    .collect()
            })
            .collect();

        Self::from_interior_kinds(&interior)
    }

    /// Parse an interior matrix from text
    ///
    /// One row per non-empty line; cells are `0` or `1`, optionally separated
    /// by whitespace or commas.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut interior = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let row = line
                .chars()
                .filter(|ch| !ch.is_whitespace() && *ch != ',')
                .map(|ch| match ch {
                    '0' => Ok(0u8),
                    '1' => Ok(1u8),
                    other => Err(SimError::InvalidGrid(format!(
                        "unexpected character '{}' on line {}",
                        other,
                        line_no + 1
                    ))),
                })
                .collect::<Result<Vec<u8>>>()?;

            interior.push(row);
        }

        Self::new(&interior)
    }

    /// Load an interior matrix text file, see [`Grid::from_text`]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Padded height
    pub fn height(&self) -> i32 {
        self.rows
    }

    /// Padded width
    pub fn width(&self) -> i32 {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    fn get_id(&self, pos: Position) -> usize {
        (pos.row * self.cols + pos.col) as usize
    }

    /// Kind of the cell at `pos`
    pub fn cell_kind(&self, pos: Position) -> Result<CellKind> {
        if !self.contains(pos) {
            return Err(SimError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(self.cells[self.get_id(pos)])
    }

    /// Whether a robot may stand on `pos`; out-of-bounds cells are never passable
    pub fn is_passable(&self, pos: Position) -> bool {
        self.cell_kind(pos).map(CellKind::is_passable).unwrap_or(false)
    }

    /// Open cell closest (Euclidean) to the geometric center of the padded grid
    ///
    /// Cells are scanned row-major and the first cell at the minimal distance wins.
    pub fn nearest_open_cell_to_center(&self) -> Result<Position> {
        // Doubled coordinates keep the center integral for even dimensions.
        let center_row2 = self.rows - 1;
        let center_col2 = self.cols - 1;

        let mut best: Option<(i64, Position)> = None;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                if !self.cells[self.get_id(pos)].is_passable() {
                    continue;
                }

                let dr = (2 * row - center_row2) as i64;
                let dc = (2 * col - center_col2) as i64;
                let dist = dr * dr + dc * dc;

                match best {
                    Some((best_dist, _)) if best_dist <= dist => {}
                    _ => best = Some((dist, pos)),
                }
            }
        }

        best.map(|(_, pos)| pos)
            .ok_or_else(|| SimError::InvalidGrid("grid has no open cell".to_string()))
    }

    /// Kinds in the inclusive rectangle `top_left..=bottom_right`, clipped to the grid
    pub fn sub_matrix(&self, top_left: Position, bottom_right: Position) -> Vec<Vec<CellKind>> {
        let top = top_left.row.max(0);
        let left = top_left.col.max(0);
        let bottom = bottom_right.row.min(self.rows - 1);
        let right = bottom_right.col.min(self.cols - 1);

        (top..=bottom)
            .map(|row| {
                (left..=right)
                    .map(|col| self.cells[self.get_id(Position::new(row, col))])
                    .collect()
            })
            .collect()
    }

    /// The full padded grid as a kind matrix
    pub fn matrix(&self) -> Vec<Vec<CellKind>> {
        self.sub_matrix(Position::new(0, 0), Position::new(self.rows - 1, self.cols - 1))
    }

    /// The interior without the wall ring
    pub fn interior(&self) -> Vec<Vec<CellKind>> {
        self.sub_matrix(Position::new(1, 1), Position::new(self.rows - 2, self.cols - 2))
    }

    /// Map a kind matrix to its display symbols, keeping its shape
    pub fn render_symbols(kinds: &[Vec<CellKind>]) -> Vec<Vec<char>> {
        kinds
            .iter()
            .map(|row| row.iter().map(|kind| kind.symbol()).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in Grid::render_symbols(&self.matrix()) {
            writeln!(f, "{}", row.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}
