use super::Point;
use thiserror::Error;

/// Opaque white marks impassable terrain in map images.
pub const BOUNDARY_COLOR: [u8; 4] = [255, 255, 255, 255];

#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("map must have non-zero dimensions, got {width}x{height}")]
    Empty { width: usize, height: usize },
    #[error("pixel buffer holds {actual} pixels, expected {expected} for a {width}x{height} map")]
    PixelCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Obstacle,
}

/// Obstacle classification surface for one episode.
///
/// Point queries floor continuous coordinates before lookup, so `(0.5, 3.9)` reads
/// cell `(0, 3)`. Anything outside `[0, width) x [0, height)`, including small negative
/// coordinates and NaN, reports as an obstacle.
#[derive(Debug, Clone)]
pub struct RasterMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl RasterMap {
    /// A map with no obstacles at all.
    pub fn open(width: usize, height: usize) -> Result<Self, MapError> {
        Self::from_cells(width, height, vec![Cell::Free; width * height])
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(MapError::PixelCountMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Classifies a row-major RGBA buffer. Only pixels exactly equal to `boundary`
    /// become obstacles.
    pub fn from_rgba(
        width: usize,
        height: usize,
        pixels: &[[u8; 4]],
        boundary: [u8; 4],
    ) -> Result<Self, MapError> {
        let cells = pixels
            .iter()
            .map(|px| if *px == boundary { Cell::Obstacle } else { Cell::Free })
            .collect();
        Self::from_cells(width, height, cells)
    }

    /// Parses a text grid where `#` is boundary and every other character is free space.
    /// Blank lines are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let count = line.chars().count();
            if count != width {
                return Err(MapError::RaggedRow { row, expected: width, actual: count });
            }
            cells.extend(line.chars().map(|c| if c == '#' { Cell::Obstacle } else { Cell::Free }));
        }

        Self::from_cells(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Marks every cell of the given rectangle (clipped to the map) as an obstacle.
    pub fn fill(&mut self, x: usize, y: usize, width: usize, height: usize) {
        for row in y..(y + height).min(self.height) {
            for col in x..(x + width).min(self.width) {
                self.cells[row * self.width + col] = Cell::Obstacle;
            }
        }
    }

    pub fn cell(&self, x: f32, y: f32) -> Option<Cell> {
        if !(x >= 0.0 && y >= 0.0 && x.is_finite() && y.is_finite()) {
            return None;
        }
        let (col, row) = (x as usize, y as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    pub fn in_bounds(&self, x: f32, y: f32) -> bool {
        self.cell(x, y).is_some()
    }

    pub fn is_obstacle(&self, x: f32, y: f32) -> bool {
        !matches!(self.cell(x, y), Some(Cell::Free))
    }

    /// Whether a continuous point lies strictly inside the map edges.
    ///
    /// Stricter than `in_bounds`: a vehicle centre sitting exactly on `x == 0` is
    /// already considered off the map.
    pub fn interior_contains(&self, point: &Point) -> bool {
        point.x > 0.0
            && point.x < self.width as f32
            && point.y > 0.0
            && point.y < self.height as f32
    }
}
