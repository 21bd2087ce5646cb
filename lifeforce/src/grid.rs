// grid.rs - Binary frame shared by the engine and its renderers

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ConfigurationError;

pub const DEFAULT_WIDTH: usize = 50;
pub const DEFAULT_HEIGHT: usize = 50;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// Largest number of cells a grid may hold.
pub const MAX_CELLS: usize = 1 << 26;

const DEAD_GLYPH: char = '·';
const ALIVE_GLYPH: char = '•';

/// Grid position, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Row-major 2-D array of 0/1 values. This is the authoritative state of a
/// simulation and the only thing renderers get to see.
///
/// Serializes as a list of rows; deserializing goes through [`Frame::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

/// Number of cells in a `width` x `height` grid, rejecting empty and oversized grids.
pub fn cell_count(width: usize, height: usize) -> Result<usize, ConfigurationError> {
    if width == 0 || height == 0 {
        return Err(ConfigurationError::ZeroDimensions { width, height });
    }
    width
        .checked_mul(height)
        .filter(|&count| count <= MAX_CELLS)
        .ok_or(ConfigurationError::TooLarge { width, height })
}

impl Frame {
    /// All-dead frame.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigurationError> {
        let count = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![DEAD; count],
        })
    }

    /// Builds a frame from explicit rows. Rows must be non-empty, rectangular and binary.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, ConfigurationError> {
        let first = rows.first().ok_or(ConfigurationError::EmptySeed)?;
        let width = first.len();
        let height = rows.len();
        let mut cells = Vec::with_capacity(cell_count(width, height)?);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ConfigurationError::RaggedSeed {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                if value > ALIVE {
                    return Err(ConfigurationError::NonBinaryValue { x, y, value });
                }
                cells.push(value);
            }
        }

        Ok(Self { width, height, cells })
    }

    /// Builds a frame with the listed `(x, y)` positions alive. Out-of-range positions are ignored.
    pub fn from_cells(
        width: usize,
        height: usize,
        alive: &[(usize, usize)],
    ) -> Result<Self, ConfigurationError> {
        let mut frame = Self::new(width, height)?;
        for &(x, y) in alive {
            if x < width && y < height {
                frame.set(Coord::new(x, y), true);
            }
        }
        Ok(frame)
    }

    /// Each cell is alive independently with probability `alive_probability`.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        if !(0.0..=1.0).contains(&alive_probability) {
            return Err(ConfigurationError::AliveProbability(alive_probability));
        }
        let mut frame = Self::new(width, height)?;
        for cell in &mut frame.cells {
            *cell = u8::from(rng.random_bool(alive_probability));
        }
        Ok(frame)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Row-major index of an in-bounds coordinate.
    pub fn index_of(&self, coord: Coord) -> usize {
        coord.y * self.width + coord.x
    }

    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.contains(x, y).then(|| self.cells[y * self.width + x])
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(ALIVE)
    }

    pub(crate) fn set(&mut self, coord: Coord, alive: bool) {
        let index = self.index_of(coord);
        self.cells[index] = u8::from(alive);
    }

    /// Returns a copy with one cell flipped. Used by editors, never by the engine itself.
    pub fn toggled(&self, x: usize, y: usize) -> Self {
        let mut frame = self.clone();
        if self.contains(x, y) {
            let alive = frame.is_alive(x, y);
            frame.set(Coord::new(x, y), !alive);
        }
        frame
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == ALIVE).count()
    }

    /// Hash of the binary content, for cheap repeat detection.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Frame {
    type Error = ConfigurationError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<Frame> for Vec<Vec<u8>> {
    fn from(frame: Frame) -> Self {
        frame.to_rows()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                let glyph = if cell == ALIVE { ALIVE_GLYPH } else { DEAD_GLYPH };
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn from_rows_infers_dimensions() {
        let frame = Frame::from_rows(&[vec![0, 1, 0], vec![1, 1, 0]]).expect("valid seed");
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert!(frame.is_alive(1, 0));
        assert!(frame.is_alive(0, 1));
        assert!(!frame.is_alive(2, 1));
        assert_eq!(frame.population(), 3);
    }

    #[test]
    fn rejects_malformed_seeds() {
        assert!(matches!(
            Frame::from_rows(&[]),
            Err(ConfigurationError::EmptySeed)
        ));
        assert!(matches!(
            Frame::from_rows(&[vec![]]),
            Err(ConfigurationError::ZeroDimensions { .. })
        ));
        assert!(matches!(
            Frame::from_rows(&[vec![0, 1], vec![1]]),
            Err(ConfigurationError::RaggedSeed { row: 1, expected: 2, found: 1 })
        ));
        assert!(matches!(
            Frame::from_rows(&[vec![0, 2]]),
            Err(ConfigurationError::NonBinaryValue { x: 1, y: 0, value: 2 })
        ));
        assert!(matches!(
            Frame::new(0, 4),
            Err(ConfigurationError::ZeroDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn rejects_oversized_grids() {
        assert!(matches!(
            Frame::new(1 << 32, 1 << 32),
            Err(ConfigurationError::TooLarge { .. })
        ));
        assert!(matches!(
            Frame::new(MAX_CELLS, 2),
            Err(ConfigurationError::TooLarge { .. })
        ));
        assert_eq!(cell_count(MAX_CELLS, 1).expect("at the cap"), MAX_CELLS);
    }

    #[test]
    fn deserializes_through_row_validation() {
        let frame: Frame = serde_json::from_str("[[0,1,0],[1,1,0]]").expect("valid rows");
        assert_eq!(frame, Frame::from_cells(3, 2, &[(1, 0), (0, 1), (1, 1)]).expect("valid dims"));
        assert_eq!(serde_json::to_string(&frame).expect("serializable"), "[[0,1,0],[1,1,0]]");

        // The old struct layout is no longer accepted.
        assert!(serde_json::from_str::<Frame>(r#"{"width":3,"height":3,"cells":[7]}"#).is_err());
        assert!(serde_json::from_str::<Frame>("[[0,7]]").is_err());
        assert!(serde_json::from_str::<Frame>("[[0,1],[1]]").is_err());
        assert!(serde_json::from_str::<Frame>("[]").is_err());
    }

    #[test]
    fn random_fill_respects_probability_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let empty = Frame::random(8, 8, 0.0, &mut rng).expect("valid probability");
        assert_eq!(empty.population(), 0);
        let full = Frame::random(8, 8, 1.0, &mut rng).expect("valid probability");
        assert_eq!(full.population(), 64);
        assert!(matches!(
            Frame::random(8, 8, 1.5, &mut rng),
            Err(ConfigurationError::AliveProbability(_))
        ));
    }

    #[test]
    fn displays_as_glyph_rows() {
        let frame = Frame::from_cells(3, 2, &[(1, 0), (2, 1)]).expect("valid dims");
        assert_eq!(frame.to_string(), "·•·\n··•");
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = Frame::from_cells(4, 4, &[(1, 1)]).expect("valid dims");
        let b = a.toggled(1, 1);
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), b.toggled(1, 1).fingerprint());
    }
}
