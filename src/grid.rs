//! Dense 2D numeric canvas produced by the render engine.

use serde::{Deserialize, Serialize};

/// Row-major grid of cells. Row 0 is the bottom of the canvas (lowest data
/// Y), matching the client image glyph. Serializes as a list of rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl Grid {
    /// Zero-filled grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<f64>) -> Option<Self> {
        (cells.len() == width * height).then_some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks(0) panics, an empty grid simply has no rows
        self.cells.chunks(self.width.max(1))
    }

    /// Largest finite cell value.
    pub fn max_value(&self) -> Option<f64> {
        self.cells
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

impl From<Grid> for Vec<Vec<f64>> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Grid {
    type Error = String;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(format!(
                "ragged image: row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                width
            ));
        }
        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let grid = Grid::try_from(rows.clone()).unwrap();
        assert_eq!(grid.shape(), (3, 2));
        assert_eq!(grid.get(2, 1), Some(6.0));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(Vec::<Vec<f64>>::from(grid), rows);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Grid::try_from(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.contains("row 1"));
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::new(0, 0);
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(grid.max_value(), None);
    }
}
