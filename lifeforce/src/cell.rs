// cell.rs - One automaton unit: state, cached neighborhood and received influence

use rand::Rng;

use crate::config::Mode;
use crate::grid::Coord;
use crate::payload;
use crate::rules;

/// `(dx, dy)` offsets in the order neighbors are visited.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// In-bounds neighbors of a cell. Edge and corner cells hold fewer than 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    coords: [Coord; 8],
    len: usize,
}

impl Neighborhood {
    pub fn around(center: Coord, width: usize, height: usize) -> Self {
        let mut coords = [Coord::default(); 8];
        let mut len = 0;
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let (Some(x), Some(y)) = (
                center.x.checked_add_signed(dx),
                center.y.checked_add_signed(dy),
            ) else {
                continue;
            };
            if x < width && y < height {
                coords[len] = Coord::new(x, y);
                len += 1;
            }
        }
        Self { coords, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords[..self.len].iter().copied()
    }
}

/// Payload buffers of a generative cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genome {
    /// Genetic material received while dead.
    pub dna: Vec<String>,
    /// Committed output, grows while the cell keeps surviving.
    pub art: Vec<String>,
    /// Art received this tick, not yet committed.
    pub new_art: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Signals {
    Classic { influence_count: usize },
    Generative(Genome),
}

#[derive(Debug, Clone)]
pub struct Cell {
    coord: Coord,
    alive: bool,
    neighbors: Option<Neighborhood>,
    subscribed_to_register: bool,
    signals: Signals,
}

impl Cell {
    pub fn new<R: Rng + ?Sized>(coord: Coord, alive: bool, mode: Mode, rng: &mut R) -> Self {
        let signals = match mode {
            Mode::Classic => Signals::Classic { influence_count: 0 },
            Mode::Generative => Signals::Generative(Genome {
                dna: if alive { payload::genome(rng) } else { Vec::new() },
                ..Genome::default()
            }),
        };
        Self {
            coord,
            alive,
            neighbors: None,
            subscribed_to_register: false,
            signals,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed_to_register
    }

    pub fn genome(&self) -> Option<&Genome> {
        match &self.signals {
            Signals::Generative(genome) => Some(genome),
            Signals::Classic { .. } => None,
        }
    }

    /// Neighbor list, built on first use and cached for the rest of the run.
    pub fn neighborhood(&mut self, width: usize, height: usize) -> Neighborhood {
        let coord = self.coord;
        *self
            .neighbors
            .get_or_insert_with(|| Neighborhood::around(coord, width, height))
    }

    /// Influence accumulated this tick: the count in classic mode, otherwise the
    /// length of the buffer matching the current state.
    pub fn influence(&self) -> usize {
        match &self.signals {
            Signals::Classic { influence_count } => *influence_count,
            Signals::Generative(genome) if self.alive => genome.new_art.len(),
            Signals::Generative(genome) => genome.dna.len(),
        }
    }

    /// Records one unit of influence. Returns `true` when the cell has to be put
    /// on the frame register, which happens at most once per tick.
    pub fn receive_influence(&mut self, payload: Option<String>) -> bool {
        match &mut self.signals {
            Signals::Classic { influence_count } => *influence_count += 1,
            Signals::Generative(genome) => {
                let payload = payload.unwrap_or_default();
                if self.alive {
                    genome.new_art.push(payload);
                } else {
                    genome.dna.push(payload);
                }
            }
        }
        self.subscribe()
    }

    /// Marks the cell as registered for this tick. Returns `false` if it already was.
    pub fn subscribe(&mut self) -> bool {
        if self.subscribed_to_register {
            return false;
        }
        self.subscribed_to_register = true;
        true
    }

    /// Evaluates and commits the next state, then resets the per-tick buffers.
    pub fn apply_rules(&mut self) -> (Coord, bool) {
        let next = rules::next_state(self.alive, self.influence());

        match &mut self.signals {
            Signals::Classic { influence_count } => *influence_count = 0,
            Signals::Generative(genome) => {
                let Genome { dna, art, new_art } = genome;
                if next && self.alive {
                    art.append(new_art);
                }
                if !next {
                    dna.clear();
                }
                new_art.clear();
            }
        }

        self.alive = next;
        self.subscribed_to_register = false;
        (self.coord, next)
    }
}
