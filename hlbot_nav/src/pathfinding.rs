// A* path search over the area graph.
//
// Standard A* with a `BinaryHeap` open set (min-heap via reversed ordering).
// Scores and parent pointers live in `BTreeMap`s keyed by `AreaId` because
// IDs are sparse once eviction has run.
//
// Cost of stepping from `a` into neighbour `b` is the Euclidean distance
// between them times a connectivity penalty of `b`:
//
//     penalty(b) = PENALTY_BASE - (PENALTY_BASE / 4) * links(b) + 1
//
// where `links(b)` counts the directions of `b` holding a link. Entering a
// well-mapped Area is cheaper than entering a frontier one, which keeps
// routes inside territory the mesh builder has already validated. The
// heuristic is the straight-line distance to the destination.
//
// An edge `a -> b` is only traversed when `b` links back to `a` through the
// opposite direction. Eviction can leave one-way links behind and those are
// treated as walls.
//
// Ties on `f` go to the entry pushed first.
//
// See also: `area.rs` for the graph, `movement.rs` which consumes the chain.

use crate::area::AreaGraph;
use crate::types::AreaId;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};

/// Ordered route of Areas, source first.
pub type NavChain = VecDeque<AreaId>;

/// Starting connectivity penalty of an Area with no links.
pub const PENALTY_BASE: f32 = 16.0;

/// Entry in the A* open set (min-heap via reversed ordering).
struct OpenEntry {
    area: AreaId,
    f_score: f32,
    /// Push order, for first-found tie breaking.
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f_score, then earliest push, is
        // "greatest".
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Connectivity penalty of stepping into `links` linked directions.
pub fn connectivity_penalty(links: usize) -> f32 {
    PENALTY_BASE - (PENALTY_BASE / 4.0) * links as f32 + 1.0
}

/// Find a route from `start` to `goal`.
///
/// Returns an empty chain if either Area is missing or no path exists.
/// `start == goal` yields a single-node chain.
pub fn astar(graph: &AreaGraph, start: AreaId, goal: AreaId) -> NavChain {
    let (Some(start_area), Some(goal_area)) = (graph.area(start), graph.area(goal)) else {
        return NavChain::new();
    };
    if start == goal {
        return NavChain::from([start]);
    }
    let goal_pos = goal_area.position;

    let mut g_score: BTreeMap<AreaId, f32> = BTreeMap::new();
    let mut came_from: BTreeMap<AreaId, AreaId> = BTreeMap::new();
    let mut closed: BTreeSet<AreaId> = BTreeSet::new();
    let mut seq = 0;

    g_score.insert(start, 0.0);
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        area: start,
        f_score: start_area.position.distance(goal_pos),
        seq,
    });

    while let Some(current) = open.pop() {
        let current_id = current.area;
        if current_id == goal {
            return reconstruct_chain(&came_from, start, goal);
        }
        if !closed.insert(current_id) {
            continue;
        }
        let Some(area) = graph.area(current_id) else {
            continue;
        };
        let current_g = g_score.get(&current_id).copied().unwrap_or(f32::INFINITY);

        for (dir, neighbour_id) in area.links() {
            if closed.contains(&neighbour_id) {
                continue;
            }
            let Some(neighbour) = graph.area(neighbour_id) else {
                continue;
            };
            // One-way edge.
            if neighbour.neighbour(dir.opposite()).linked() != Some(current_id) {
                continue;
            }

            let step = area.position.distance(neighbour.position)
                * connectivity_penalty(neighbour.link_count());
            let tentative_g = current_g + step;

            let known = g_score.get(&neighbour_id).copied().unwrap_or(f32::INFINITY);
            if tentative_g < known {
                g_score.insert(neighbour_id, tentative_g);
                came_from.insert(neighbour_id, current_id);
                seq += 1;
                open.push(OpenEntry {
                    area: neighbour_id,
                    f_score: tentative_g + neighbour.position.distance(goal_pos),
                    seq,
                });
            }
        }
    }

    NavChain::new()
}

/// Walk parent pointers back from `goal`, filling the chain front-first so it
/// comes out source to destination.
fn reconstruct_chain(came_from: &BTreeMap<AreaId, AreaId>, start: AreaId, goal: AreaId) -> NavChain {
    let mut chain = NavChain::new();
    let mut current = goal;
    loop {
        chain.push_front(current);
        if current == start {
            break;
        }
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => break,
        }
    }
    chain
}
