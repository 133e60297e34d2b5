//! Exploration searches over the galaxy grid.
//!
//! All searches operate on a caller-supplied set of already-explored
//! coordinates plus an injectable [`CoordBounds`]; the engine holds no state
//! of its own. Absence of a result is a normal outcome and always returns
//! `None`.
//!
//! Distance metric choices are deliberate and fixed:
//! - free search minimizes **Manhattan** distance, ties broken by
//!   lexicographic (x, y, z) order;
//! - orbital search expands **Chebyshev** shells, so the shell at radius r
//!   is the surface of a cube and contains all six axis face points at r.

use crate::coord::{CoordBounds, Coordinate, Direction};
use std::collections::HashSet;

/// Find the unexplored in-bounds coordinate nearest to `origin`.
///
/// Nearest by Manhattan distance; among equals the lexicographically
/// smallest coordinate wins, so repeated calls are fully deterministic.
/// Returns `None` when every coordinate in bounds is explored.
pub fn closest_unexplored(
    origin: &Coordinate,
    explored: &HashSet<Coordinate>,
    bounds: &CoordBounds,
) -> Option<Coordinate> {
    let mut best: Option<(u32, Coordinate)> = None;

    for candidate in bounds.iter_sorted() {
        if explored.contains(&candidate) {
            continue;
        }
        let distance = origin.manhattan_distance(&candidate);
        let better = match best {
            None => true,
            // Lexicographic tie-break falls out of iter_sorted order: the
            // first candidate seen at a given distance is the smallest
            Some((best_distance, _)) => distance < best_distance,
        };
        if better {
            best = Some((distance, candidate));
        }
    }

    best.map(|(_, coord)| coord)
}

/// Find the nearest unexplored coordinate along one axis direction.
///
/// The two non-primary axes stay fixed at the origin's values; the search
/// steps outward one coordinate at a time in the requested sign until it
/// finds an unexplored coordinate or walks out of bounds.
pub fn closest_unexplored_in_direction(
    origin: &Coordinate,
    explored: &HashSet<Coordinate>,
    bounds: &CoordBounds,
    direction: Direction,
) -> Option<Coordinate> {
    let mut current = origin.step(direction);
    while bounds.contains(&current) {
        if !explored.contains(&current) {
            return Some(current);
        }
        current = current.step(direction);
    }
    None
}

/// Find the first unexplored coordinate in expanding orbital shells.
///
/// Shell r is the set of in-bounds coordinates at Chebyshev distance
/// exactly r from `origin`, starting at r = 0 (the origin itself) and
/// growing to `max_shell_radius` inclusive. Within a shell, candidates are
/// visited in lexicographic (x, y, z) order. Returns `None` when the
/// radius cap is exhausted.
pub fn closest_unexplored_orbital(
    origin: &Coordinate,
    explored: &HashSet<Coordinate>,
    bounds: &CoordBounds,
    max_shell_radius: u32,
) -> Option<Coordinate> {
    for radius in 0..=max_shell_radius {
        for candidate in shell_coordinates(origin, radius) {
            if bounds.contains(&candidate) && !explored.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// All coordinates at Chebyshev distance exactly `radius` from `origin`,
/// in lexicographic order.
pub fn shell_coordinates(origin: &Coordinate, radius: u32) -> Vec<Coordinate> {
    if radius == 0 {
        return vec![*origin];
    }
    let r = radius as i32;
    let mut shell = Vec::new();
    for dx in -r..=r {
        for dy in -r..=r {
            for dz in -r..=r {
                if dx.abs().max(dy.abs()).max(dz.abs()) == r {
                    shell.push(Coordinate::new(
                        origin.x + dx,
                        origin.y + dy,
                        origin.z + dz,
                    ));
                }
            }
        }
    }
    shell
}

/// Number of coordinates inside the valid range.
pub fn total_coordinates(bounds: &CoordBounds) -> u64 {
    bounds.total_coordinates()
}

/// How many of a user's explored coordinates fall inside the valid range.
///
/// Markers outside the bounds (left over from older galaxy layouts) are
/// excluded from progress.
pub fn explored_count(explored: &HashSet<Coordinate>, bounds: &CoordBounds) -> u64 {
    explored.iter().filter(|c| bounds.contains(c)).count() as u64
}

/// Exploration progress as a percentage of the valid range.
pub fn progress_percentage(explored: &HashSet<Coordinate>, bounds: &CoordBounds) -> f64 {
    let total = total_coordinates(bounds);
    if total == 0 {
        return 0.0;
    }
    explored_count(explored, bounds) as f64 / total as f64 * 100.0
}

/// Has every coordinate in the valid range been explored?
pub fn all_explored(explored: &HashSet<Coordinate>, bounds: &CoordBounds) -> bool {
    explored_count(explored, bounds) == total_coordinates(bounds)
}
