// Area graph: the online map of traversable space.
//
// The graph is a set of `Area`s (ground points on a horizontal grid) each
// carrying a fixed four-slot neighbour table, one slot per `Direction`. A
// slot is in exactly one of three states:
// - `Unresolved`: nobody has probed this direction yet.
// - `Blocked`: probed, no passage.
// - `Linked(id)`: probed, passage to the Area `id`.
//
// The graph owns every Area in a `BTreeMap` keyed by `AreaId`, so iteration
// order is deterministic and IDs stay stable across evictions. Neighbour
// slots hold IDs, never references: an Area cannot keep another alive, and
// removing an Area (see `remove_area`) scrubs every inbound link back to
// `Unresolved` so the surviving neighbours get re-probed.
//
// Linked Areas always sit exactly one grid step apart along one horizontal
// axis. The graph itself does not check that; `builder.rs` only ever links
// points it derived from `position + direction * grid_step`.
//
// See also: `builder.rs` which grows and prunes the graph, `pathfinding.rs`
// for A* over it, `bot.rs` which owns it.

use crate::types::{AreaId, Direction};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Upper bound on the distance `find_nearest_area` will accept.
pub const NEAREST_AREA_MAX_DISTANCE: f32 = 99_999.0;

/// Resolution state of one direction of an Area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Neighbour {
    #[default]
    Unresolved,
    Blocked,
    Linked(AreaId),
}

impl Neighbour {
    pub fn is_resolved(self) -> bool {
        self != Neighbour::Unresolved
    }

    pub fn linked(self) -> Option<AreaId> {
        match self {
            Neighbour::Linked(id) => Some(id),
            _ => None,
        }
    }
}

/// A discovered navigable cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    /// Ground point. X/Y lie on the grid, Z is the probed floor height.
    pub position: Vec3,
    neighbours: [Neighbour; 4],
}

impl Area {
    pub fn neighbour(&self, dir: Direction) -> Neighbour {
        self.neighbours[dir.index()]
    }

    /// All four directions carry a decision.
    pub fn is_explored(&self) -> bool {
        self.neighbours.iter().all(|n| n.is_resolved())
    }

    /// First direction, in exploration order, still awaiting a decision.
    pub fn first_unresolved(&self) -> Option<Direction> {
        Direction::EXPLORE_ORDER
            .into_iter()
            .find(|&dir| !self.neighbour(dir).is_resolved())
    }

    /// `(direction, neighbour id)` for every linked slot.
    pub fn links(&self) -> SmallVec<[(Direction, AreaId); 4]> {
        Direction::EXPLORE_ORDER
            .into_iter()
            .filter_map(|dir| self.neighbour(dir).linked().map(|id| (dir, id)))
            .collect()
    }

    /// Number of directions holding a link.
    pub fn link_count(&self) -> usize {
        self.neighbours.iter().filter(|n| n.linked().is_some()).count()
    }
}

/// The owning collection of Areas.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AreaGraph {
    areas: BTreeMap<AreaId, Area>,
    next_id: u32,
}

impl AreaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new unexplored Area at `position`. Returns its ID.
    pub fn add_area(&mut self, position: Vec3) -> AreaId {
        let id = AreaId(self.next_id);
        self.next_id += 1;
        self.areas.insert(
            id,
            Area {
                id,
                position,
                neighbours: [Neighbour::Unresolved; 4],
            },
        );
        id
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    pub fn contains(&self, id: AreaId) -> bool {
        self.areas.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.areas.keys().copied()
    }

    /// Linear scan for the Area closest to `pos`. `None` when the graph is
    /// empty or every Area is beyond `NEAREST_AREA_MAX_DISTANCE`.
    pub fn find_nearest_area(&self, pos: Vec3) -> Option<AreaId> {
        let mut best = None;
        let mut best_dist = NEAREST_AREA_MAX_DISTANCE;
        for area in self.areas.values() {
            let dist = area.position.distance(pos);
            if dist < best_dist {
                best_dist = dist;
                best = Some(area.id);
            }
        }
        best
    }

    /// First Area (in ID order) within `tolerance` of `pos`.
    pub fn find_exact_area(&self, pos: Vec3, tolerance: f32) -> Option<AreaId> {
        self.areas
            .values()
            .find(|a| a.position.distance(pos) <= tolerance)
            .map(|a| a.id)
    }

    /// Nearest Area that still has an unresolved direction, ignoring any
    /// within `min_distance` of `pos`.
    pub fn find_nearest_unexplored(&self, pos: Vec3, min_distance: f32) -> Option<AreaId> {
        self.areas
            .values()
            .filter(|a| !a.is_explored())
            .map(|a| (a.id, a.position.distance(pos)))
            .filter(|&(_, d)| d > min_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// At least one linked neighbour of `id` is itself unexplored.
    pub fn is_border(&self, id: AreaId) -> bool {
        let Some(area) = self.areas.get(&id) else {
            return false;
        };
        area.links()
            .iter()
            .any(|&(_, n)| self.areas.get(&n).is_some_and(|na| !na.is_explored()))
    }

    /// Overwrite one neighbour slot. No reciprocal update.
    pub fn set_neighbour(&mut self, id: AreaId, dir: Direction, value: Neighbour) {
        if let Some(area) = self.areas.get_mut(&id) {
            area.neighbours[dir.index()] = value;
        }
    }

    /// Link `a` to `b` through `dir` and `b` back to `a` through the
    /// opposite direction.
    pub fn link(&mut self, a: AreaId, dir: Direction, b: AreaId) {
        self.set_neighbour(a, dir, Neighbour::Linked(b));
        self.set_neighbour(b, dir.opposite(), Neighbour::Linked(a));
    }

    /// Remove an Area and reset every surviving slot that linked to it.
    pub fn remove_area(&mut self, id: AreaId) -> Option<Area> {
        let removed = self.areas.remove(&id)?;
        for area in self.areas.values_mut() {
            for slot in area.neighbours.iter_mut() {
                if *slot == Neighbour::Linked(id) {
                    *slot = Neighbour::Unresolved;
                }
            }
        }
        Some(removed)
    }

    /// Remove every Area farther than `radius` from `center`. Returns how
    /// many were removed.
    pub fn evict_beyond(&mut self, center: Vec3, radius: f32) -> usize {
        self.evict_sweep(None, usize::MAX, center, radius).evicted
    }

    /// Look at up to `limit` Areas with IDs after `after` (from the start
    /// when `None`) and remove the ones farther than `radius` from `center`.
    /// Feed `resume_after` back in to continue the sweep on a later call.
    pub fn evict_sweep(
        &mut self,
        after: Option<AreaId>,
        limit: usize,
        center: Vec3,
        radius: f32,
    ) -> EvictionSweep {
        let limit = limit.max(1);
        let lower = after.map_or(Bound::Unbounded, Bound::Excluded);
        let window: Vec<(AreaId, bool)> = self
            .areas
            .range((lower, Bound::Unbounded))
            .take(limit.saturating_add(1))
            .map(|(&id, a)| (id, a.position.distance(center) > radius))
            .collect();
        let scanned = &window[..window.len().min(limit)];
        let resume_after = if window.len() > limit {
            scanned.last().map(|&(id, _)| id)
        } else {
            None
        };

        let mut evicted = 0;
        for &(id, far) in scanned {
            if far && self.remove_area(id).is_some() {
                evicted += 1;
            }
        }
        EvictionSweep {
            visited: scanned.len(),
            evicted,
            resume_after,
        }
    }

    /// Read-only copy for telemetry and visualization.
    pub fn snapshot(&self) -> GraphSnapshot {
        let areas = self
            .areas
            .values()
            .map(|a| AreaSnapshot {
                id: a.id,
                position: a.position,
                neighbours: a.neighbours,
                explored: a.is_explored(),
                border: self.is_border(a.id),
            })
            .collect();
        GraphSnapshot { areas }
    }
}

/// Outcome of one `AreaGraph::evict_sweep` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvictionSweep {
    /// Areas looked at.
    pub visited: usize,
    pub evicted: usize,
    /// Last Area looked at when more remain, else `None`.
    pub resume_after: Option<AreaId>,
}

/// Serializable view of one Area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub id: AreaId,
    pub position: Vec3,
    /// Indexed by `Direction::index()`.
    pub neighbours: [Neighbour; 4],
    pub explored: bool,
    pub border: bool,
}

/// Serializable view of the whole graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub areas: Vec<AreaSnapshot>,
}

impl GraphSnapshot {
    pub fn explored_count(&self) -> usize {
        self.areas.iter().filter(|a| a.explored).count()
    }

    pub fn unexplored_count(&self) -> usize {
        self.areas.len() - self.explored_count()
    }

    pub fn border_count(&self) -> usize {
        self.areas.iter().filter(|a| a.border).count()
    }
}
