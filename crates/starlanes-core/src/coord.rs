//! Integer coordinates for the galaxy grid.
//!
//! Every star system, explored marker and warp gate endpoint is keyed by a
//! triple of integers. Coordinates double as deterministic seed material,
//! so ordering and distance calculations must be exact integer math.

use serde::{Deserialize, Serialize};

/// A position in the galaxy grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Lexicographic ordering for deterministic iteration and tie-breaks
        (self.x, self.y, self.z).cmp(&(other.x, other.y, other.z))
    }
}

impl Coordinate {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan (L1) distance to another coordinate.
    pub fn manhattan_distance(&self, other: &Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Chebyshev (L-infinity) distance to another coordinate.
    ///
    /// This is the "orbital shell" metric: all coordinates at Chebyshev
    /// distance `r` form the surface of a cube of side `2r + 1`.
    pub fn chebyshev_distance(&self, other: &Coordinate) -> u32 {
        self.x
            .abs_diff(other.x)
            .max(self.y.abs_diff(other.y))
            .max(self.z.abs_diff(other.z))
    }

    /// Euclidean distance to another coordinate.
    pub fn euclidean_distance(&self, other: &Coordinate) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        let dz = (self.z - other.z) as f64;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Move one step along an axis direction.
    pub fn step(&self, direction: Direction) -> Coordinate {
        self.offset(direction, 1)
    }

    /// Move `steps` along an axis direction.
    pub fn offset(&self, direction: Direction, steps: i32) -> Coordinate {
        let (dx, dy, dz) = direction.unit();
        Coordinate::new(
            self.x + dx * steps,
            self.y + dy * steps,
            self.z + dz * steps,
        )
    }

    /// The six axis-adjacent coordinates, in fixed `Direction::all()` order.
    pub fn axis_neighbors(&self) -> [Coordinate; 6] {
        let mut out = [*self; 6];
        for (slot, dir) in out.iter_mut().zip(Direction::all()) {
            *slot = self.step(*dir);
        }
        out
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the six axis directions a ship can travel.
///
/// In-game these carry nautical aliases: spinward (+x), antispinward (-x),
/// north (+y), south (-y), up (+z), down (-z).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Spinward,
    Antispinward,
    North,
    South,
    Up,
    Down,
}

impl Direction {
    /// Unit vector (dx, dy, dz) for this direction.
    pub const fn unit(&self) -> (i32, i32, i32) {
        match self {
            Direction::Spinward => (1, 0, 0),
            Direction::Antispinward => (-1, 0, 0),
            Direction::North => (0, 1, 0),
            Direction::South => (0, -1, 0),
            Direction::Up => (0, 0, 1),
            Direction::Down => (0, 0, -1),
        }
    }

    /// All six directions in fixed order (+x, -x, +y, -y, +z, -z).
    pub const fn all() -> &'static [Direction] {
        &[
            Direction::Spinward,
            Direction::Antispinward,
            Direction::North,
            Direction::South,
            Direction::Up,
            Direction::Down,
        ]
    }

    /// The opposite direction.
    pub const fn opposite(&self) -> Direction {
        match self {
            Direction::Spinward => Direction::Antispinward,
            Direction::Antispinward => Direction::Spinward,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Spinward => write!(f, "spinward"),
            Direction::Antispinward => write!(f, "antispinward"),
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// The valid coordinate range for a galaxy.
///
/// The range is configuration, not a constant: different deployments run
/// different galaxy sizes, so every search takes its bounds as a parameter.
/// Both endpoints are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordBounds {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl CoordBounds {
    /// Create bounds from inclusive corners.
    ///
    /// Callers must supply `min <= max` on every axis.
    pub const fn new(min: Coordinate, max: Coordinate) -> Self {
        Self { min, max }
    }

    /// A cube spanning `lo..=hi` on all three axes.
    pub const fn cube(lo: i32, hi: i32) -> Self {
        Self {
            min: Coordinate::new(lo, lo, lo),
            max: Coordinate::new(hi, hi, hi),
        }
    }

    /// Check whether a coordinate lies inside the bounds.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
            && coord.z >= self.min.z
            && coord.z <= self.max.z
    }

    /// Side length along each axis.
    pub fn dimensions(&self) -> (u64, u64, u64) {
        (
            (self.max.x as i64 - self.min.x as i64 + 1) as u64,
            (self.max.y as i64 - self.min.y as i64 + 1) as u64,
            (self.max.z as i64 - self.min.z as i64 + 1) as u64,
        )
    }

    /// Total number of coordinates inside the bounds.
    pub fn total_coordinates(&self) -> u64 {
        let (w, h, d) = self.dimensions();
        w * h * d
    }

    /// Iterate every coordinate in lexicographic (x, y, z) order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y)
                .flat_map(move |y| (min.z..=max.z).map(move |z| Coordinate::new(x, y, z)))
        })
    }
}

impl Default for CoordBounds {
    fn default() -> Self {
        // Small starter galaxy; deployments override this
        Self::cube(0, 9)
    }
}
