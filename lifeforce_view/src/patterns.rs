// patterns.rs - Seed patterns offered by the viewers

use lifeforce::{ConfigurationError, Frame};

/// Where a pattern lands on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Top-left corner, one cell in from the edges.
    TopLeft,
    Centered,
}

/// Shape in local `(x, y)` coordinates.
pub struct Pattern {
    pub name: &'static str,
    pub anchor: Anchor,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        anchor: Anchor::TopLeft,
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        anchor: Anchor::Centered,
        cells: &[(0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Toad",
        anchor: Anchor::Centered,
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        anchor: Anchor::Centered,
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        anchor: Anchor::Centered,
        cells: &[
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        anchor: Anchor::Centered,
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        anchor: Anchor::TopLeft,
        cells: &[
            (24, 0),
            (22, 1), (24, 1),
            (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
            (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
            (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
            (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
            (10, 6), (16, 6), (24, 6),
            (11, 7), (15, 7),
            (12, 8), (13, 8),
        ],
    },
];

impl Pattern {
    /// `(width, height)` of the pattern's bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }

    /// Places the pattern on an otherwise dead frame. Cells that do not fit are dropped.
    pub fn frame(&self, width: usize, height: usize) -> Result<Frame, ConfigurationError> {
        let (extent_x, extent_y) = self.extent();
        let (offset_x, offset_y) = match self.anchor {
            Anchor::TopLeft => (1, 1),
            Anchor::Centered => (
                width.saturating_sub(extent_x) / 2,
                height.saturating_sub(extent_y) / 2,
            ),
        };
        let placed: Vec<(usize, usize)> = self
            .cells
            .iter()
            .map(|&(x, y)| (x + offset_x, y + offset_y))
            .collect();
        Frame::from_cells(width, height, &placed)
    }
}
