//! Warp gate network: routing and geometric auto-linking.
//!
//! Discovered systems form an undirected graph whose edges are warp gates.
//! Routing is plain breadth-first search over active gates, so the returned
//! route always has the fewest hops and is deterministic given the sorted
//! edge storage.
//!
//! Auto-linking keeps the network navigable as systems are discovered:
//! space around each system is divided into six directional "pyramids"
//! (dominant-axis regions), and each pyramid holds at most one gate to the
//! nearest known system in that region. Newly discovered systems both link
//! outward and steal existing pyramid slots when they are strictly closer.

use crate::coord::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Operational status of a warp gate. Offline gates are invisible to
/// routing but still occupy their pyramid slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateStatus {
    Active,
    Offline,
}

/// One of six directional regions around a system.
///
/// A candidate falls into the pyramid of whichever axis dominates the
/// offset to it; ties resolve in X > Y > Z priority and a zero offset
/// defaults to `PosX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pyramid {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Pyramid {
    /// All six pyramids in fixed order.
    pub const fn all() -> &'static [Pyramid] {
        &[
            Pyramid::PosX,
            Pyramid::NegX,
            Pyramid::PosY,
            Pyramid::NegY,
            Pyramid::PosZ,
            Pyramid::NegZ,
        ]
    }
}

impl std::fmt::Display for Pyramid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pyramid::PosX => write!(f, "+x"),
            Pyramid::NegX => write!(f, "-x"),
            Pyramid::PosY => write!(f, "+y"),
            Pyramid::NegY => write!(f, "-y"),
            Pyramid::PosZ => write!(f, "+z"),
            Pyramid::NegZ => write!(f, "-z"),
        }
    }
}

/// Classify which pyramid `candidate` occupies relative to `origin`.
///
/// Always returns exactly one pyramid and is deterministic: the dominant
/// axis is the one with the largest absolute offset, ties break X > Y > Z,
/// and `candidate == origin` defaults to `PosX`.
pub fn classify_pyramid(origin: &Coordinate, candidate: &Coordinate) -> Pyramid {
    let dx = candidate.x - origin.x;
    let dy = candidate.y - origin.y;
    let dz = candidate.z - origin.z;

    let ax = dx.unsigned_abs();
    let ay = dy.unsigned_abs();
    let az = dz.unsigned_abs();

    if ax >= ay && ax >= az {
        if dx >= 0 {
            Pyramid::PosX
        } else {
            Pyramid::NegX
        }
    } else if ay >= az {
        if dy >= 0 {
            Pyramid::PosY
        } else {
            Pyramid::NegY
        }
    } else if dz >= 0 {
        Pyramid::PosZ
    } else {
        Pyramid::NegZ
    }
}

/// An edge-mutation instruction for the persistence layer.
///
/// Endpoints are always reported in normalized (smaller, larger) order so
/// the caller's unordered-pair uniqueness constraint is never violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateChange {
    Added { a: Coordinate, b: Coordinate },
    Removed { a: Coordinate, b: Coordinate },
}

/// A computed route through the gate network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Systems visited, source and destination inclusive.
    pub path: Vec<Coordinate>,
    /// Number of gate transits.
    pub hops: u32,
    /// Total fuel: hops x the configured per-hop cost.
    pub fuel_cost: u32,
}

/// Configuration for the warp network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpConfig {
    /// Fuel consumed per gate transit.
    pub fuel_cost_per_hop: u32,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self { fuel_cost_per_hop: 10 }
    }
}

/// The warp gate network over discovered systems.
///
/// Gates are stored under normalized coordinate pairs, so lookup is
/// symmetric and no unordered pair can appear twice. BTree storage keeps
/// every iteration order deterministic.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WarpGraph {
    config: WarpConfig,
    /// Known systems (candidates for auto-linking).
    systems: BTreeSet<Coordinate>,
    /// Gates keyed by normalized (smaller, larger) endpoint pair.
    /// Serialized as a flat edge list; JSON maps need string keys.
    #[serde(with = "gates_serde")]
    gates: BTreeMap<(Coordinate, Coordinate), GateStatus>,
}

mod gates_serde {
    use super::{Coordinate, GateStatus};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        gates: &BTreeMap<(Coordinate, Coordinate), GateStatus>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let edges: Vec<(Coordinate, Coordinate, GateStatus)> = gates
            .iter()
            .map(|((a, b), status)| (*a, *b, *status))
            .collect();
        edges.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<(Coordinate, Coordinate), GateStatus>, D::Error> {
        let edges = Vec::<(Coordinate, Coordinate, GateStatus)>::deserialize(deserializer)?;
        Ok(edges
            .into_iter()
            .map(|(a, b, status)| ((a, b), status))
            .collect())
    }
}

fn normalize(a: Coordinate, b: Coordinate) -> (Coordinate, Coordinate) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl WarpGraph {
    /// Create an empty network.
    pub fn new(config: WarpConfig) -> Self {
        Self {
            config,
            systems: BTreeSet::new(),
            gates: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &WarpConfig {
        &self.config
    }

    /// Register a system as a linking candidate without creating gates.
    ///
    /// Returns `true` if the system was not already known.
    pub fn add_system(&mut self, system: Coordinate) -> bool {
        self.systems.insert(system)
    }

    /// All known systems in lexicographic order.
    pub fn systems(&self) -> impl Iterator<Item = &Coordinate> {
        self.systems.iter()
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Symmetric gate lookup: the status of the gate between two systems,
    /// queried in either endpoint order.
    pub fn gate_between(&self, a: &Coordinate, b: &Coordinate) -> Option<GateStatus> {
        self.gates.get(&normalize(*a, *b)).copied()
    }

    /// Set a gate's status. Returns `false` when no such gate exists.
    pub fn set_status(&mut self, a: &Coordinate, b: &Coordinate, status: GateStatus) -> bool {
        match self.gates.get_mut(&normalize(*a, *b)) {
            Some(slot) => {
                *slot = status;
                true
            }
            None => false,
        }
    }

    /// All gate partners of a system, with gate status, in lexicographic
    /// partner order.
    pub fn neighbors_of(&self, system: &Coordinate) -> Vec<(Coordinate, GateStatus)> {
        let mut neighbors: Vec<(Coordinate, GateStatus)> = self
            .gates
            .iter()
            .filter_map(|((a, b), status)| {
                if a == system {
                    Some((*b, *status))
                } else if b == system {
                    Some((*a, *status))
                } else {
                    None
                }
            })
            .collect();
        neighbors.sort();
        neighbors
    }

    fn active_neighbors(&self, system: &Coordinate) -> Vec<Coordinate> {
        self.neighbors_of(system)
            .into_iter()
            .filter(|(_, status)| *status == GateStatus::Active)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Fewest-hop route between two systems over active gates.
    ///
    /// Offline gates are treated as absent. `None` when no route exists;
    /// a route from a system to itself is the trivial zero-hop route.
    pub fn find_route(&self, source: &Coordinate, destination: &Coordinate) -> Option<Route> {
        if source == destination {
            return Some(Route {
                path: vec![*source],
                hops: 0,
                fuel_cost: 0,
            });
        }

        let mut came_from: HashMap<Coordinate, Coordinate> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(*source);
        came_from.insert(*source, *source);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.active_neighbors(&current) {
                if came_from.contains_key(&neighbor) {
                    continue;
                }
                came_from.insert(neighbor, current);
                if neighbor == *destination {
                    let path = reconstruct_path(&came_from, *source, *destination);
                    let hops = (path.len() - 1) as u32;
                    return Some(Route {
                        path,
                        hops,
                        fuel_cost: hops * self.config.fuel_cost_per_hop,
                    });
                }
                queue.push_back(neighbor);
            }
        }

        None
    }

    /// Auto-link a newly discovered system into the network.
    ///
    /// For each of the six pyramids around `new_system`, finds the nearest
    /// (Euclidean, ties lexicographic) known system in that pyramid and
    /// creates a gate unless one already exists. Registers the system as a
    /// candidate. Returns the applied changes.
    pub fn link(&mut self, new_system: Coordinate) -> Vec<GateChange> {
        self.systems.insert(new_system);
        let mut changes = Vec::new();

        for pyramid in Pyramid::all() {
            let candidate = self
                .systems
                .iter()
                .filter(|s| **s != new_system)
                .filter(|s| classify_pyramid(&new_system, s) == *pyramid)
                .copied()
                .min_by(|a, b| {
                    distance_key(&new_system, a)
                        .partial_cmp(&distance_key(&new_system, b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| a.cmp(b))
                });

            if let Some(target) = candidate {
                if self.gate_between(&new_system, &target).is_none() {
                    let (a, b) = normalize(new_system, target);
                    self.gates.insert((a, b), GateStatus::Active);
                    changes.push(GateChange::Added { a, b });
                }
            }
        }

        changes
    }

    /// Let a newly discovered system steal pyramid slots it wins.
    ///
    /// For every other system, if `new_system` falls into the same pyramid
    /// (relative to that system) as one of its current links and is
    /// strictly closer than the nearest such link, the old gate is removed
    /// and replaced by a gate to `new_system`. Returns the applied changes.
    pub fn relink_neighbors(&mut self, new_system: Coordinate) -> Vec<GateChange> {
        let mut changes = Vec::new();
        let others: Vec<Coordinate> = self
            .systems
            .iter()
            .filter(|s| **s != new_system)
            .copied()
            .collect();

        for other in others {
            let pyramid = classify_pyramid(&other, &new_system);

            // Nearest current link of `other` inside that pyramid
            let current = self
                .neighbors_of(&other)
                .into_iter()
                .map(|(partner, _)| partner)
                .filter(|partner| *partner != new_system)
                .filter(|partner| classify_pyramid(&other, partner) == pyramid)
                .min_by(|a, b| {
                    distance_key(&other, a)
                        .partial_cmp(&distance_key(&other, b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| a.cmp(b))
                });

            let Some(incumbent) = current else { continue };
            if distance_key(&other, &new_system) >= distance_key(&other, &incumbent) {
                continue;
            }

            let (ra, rb) = normalize(other, incumbent);
            self.gates.remove(&(ra, rb));
            changes.push(GateChange::Removed { a: ra, b: rb });

            if self.gate_between(&other, &new_system).is_none() {
                let (aa, ab) = normalize(other, new_system);
                self.gates.insert((aa, ab), GateStatus::Active);
                changes.push(GateChange::Added { a: aa, b: ab });
            }
        }

        changes
    }

    /// Remove a system from the network entirely.
    ///
    /// Drops every gate touching it, deregisters it as a candidate, then
    /// lets each former neighbor search for replacement links. Returns the
    /// applied changes.
    pub fn unlink(&mut self, system: Coordinate) -> Vec<GateChange> {
        let mut changes = Vec::new();

        let partners: Vec<Coordinate> = self
            .neighbors_of(&system)
            .into_iter()
            .map(|(partner, _)| partner)
            .collect();

        for partner in &partners {
            let (a, b) = normalize(system, *partner);
            self.gates.remove(&(a, b));
            changes.push(GateChange::Removed { a, b });
        }
        self.systems.remove(&system);

        for partner in partners {
            changes.extend(self.link(partner));
        }

        changes
    }
}

fn distance_key(a: &Coordinate, b: &Coordinate) -> f64 {
    a.euclidean_distance(b)
}

fn reconstruct_path(
    came_from: &HashMap<Coordinate, Coordinate>,
    source: Coordinate,
    destination: Coordinate,
) -> Vec<Coordinate> {
    let mut path = vec![destination];
    let mut current = destination;
    while current != source {
        if let Some(&prev) = came_from.get(&current) {
            path.push(prev);
            current = prev;
        } else {
            break;
        }
    }
    path.reverse();
    path
}
