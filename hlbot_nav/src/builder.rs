// Incremental mesh builder: grows the area graph from live collision probes.
//
// The builder is a resumable cursor. `advance()` is called once per tick and
// spends two budgets before returning: at most
// `MeshParams::resolutions_per_tick` neighbour resolutions (one by default)
// and at most `MeshParams::visits_per_tick` Areas looked at, whether by the
// eviction sweep or by the flood. A tick therefore costs a bounded number of
// traces and a bounded amount of bookkeeping no matter how large the graph
// gets. State that outlives a call (the pass phase, the open worklist, the
// visited set, the Area being resolved) lives in `MeshBuilder`.
//
// A pass works like this:
// 1. Sweep the graph for Areas beyond `MeshParams::eviction_radius()` of the
//    agent's foot, a window of IDs per tick.
// 2. Find the base Area under the agent. If there is none within the seed
//    tolerance, insert a singleton Area and stop (Processing).
// 3. Pop Areas from the front of the open list. Resolve each one direction
//    at a time (see `explore_direction`) until all four carry a decision,
//    then push its linked neighbours inside the explore radius to the front.
// 4. When the open list drains, the pass reports Finished only if it
//    resolved nothing. Otherwise it reports Processing and the next call
//    starts a fresh pass from the agent's new position.
//
// A direction is resolved by three probes: a horizontal sweep at step height
// towards the stepped destination, a ground probe there, and a roof probe
// measuring the duck window above that ground. Any failure marks the
// direction Blocked.
//
// See also: `area.rs` for the graph being grown, `trace.rs` for the probes,
// `bot.rs` which calls `advance()` every tick.

use crate::area::{AreaGraph, Neighbour};
use crate::config::NavConfig;
use crate::trace::{CollisionOracle, ModelIndex, ground_probe, roof_probe};
use crate::types::{AreaId, Direction, Status, quantize};
use glam::Vec3;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    /// No pass in progress.
    #[default]
    Idle,
    /// Eviction sweep, resuming after the given Area.
    Evicting(Option<AreaId>),
    Flooding,
}

/// Resumable flood-fill state.
#[derive(Clone, Debug, Default)]
pub struct MeshBuilder {
    phase: Phase,
    /// Areas waiting to be resolved this pass, front first.
    open: VecDeque<AreaId>,
    /// Areas already popped this pass.
    visited: FxHashSet<AreaId>,
    /// Area currently being resolved, carried across calls.
    current: Option<AreaId>,
    /// Number of resolutions performed in the current pass.
    pass_resolutions: usize,
    /// Number of Areas evicted by the current pass's sweep.
    pass_evicted: usize,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pass is in progress and will resume on the next call.
    pub fn in_pass(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// The current pass is still sweeping for far Areas.
    pub fn is_evicting(&self) -> bool {
        matches!(self.phase, Phase::Evicting(_))
    }

    /// Abandon the current pass. The next call starts over from the agent.
    pub fn reset(&mut self) {
        self.open.clear();
        self.visited.clear();
        self.current = None;
        self.phase = Phase::Idle;
        self.pass_resolutions = 0;
        self.pass_evicted = 0;
    }

    /// Do one bounded unit of mesh work around the agent standing at `foot`.
    pub fn advance(
        &mut self,
        graph: &mut AreaGraph,
        oracle: &dyn CollisionOracle,
        foot: Vec3,
        ignore: &[ModelIndex],
        config: &NavConfig,
    ) -> Status {
        let mut visits = config.mesh.visits_per_tick.max(1) as usize;
        let mut budget = config.mesh.resolutions_per_tick.max(1);

        if self.phase == Phase::Idle {
            self.reset();
            self.phase = Phase::Evicting(None);
        }

        if let Phase::Evicting(after) = self.phase {
            let sweep = graph.evict_sweep(after, visits, foot, config.mesh.eviction_radius());
            visits = visits.saturating_sub(sweep.visited);
            self.pass_evicted += sweep.evicted;
            if let Some(resume) = sweep.resume_after {
                self.phase = Phase::Evicting(Some(resume));
                return Status::Processing;
            }
            if self.pass_evicted > 0 {
                debug!(evicted = self.pass_evicted, remaining = graph.len(), "evicted far areas");
            }
            let Some(base) = seed_area(graph, oracle, foot, ignore, config) else {
                self.phase = Phase::Idle;
                return Status::Processing;
            };
            self.open.push_back(base);
            self.phase = Phase::Flooding;
        }

        let explore_radius = config.mesh.explore_radius;
        loop {
            let id = match self.current {
                Some(id) if graph.contains(id) => id,
                _ => {
                    self.current = None;
                    if visits == 0 && !self.open.is_empty() {
                        return Status::Processing;
                    }
                    let Some(next) = self.open.pop_front() else {
                        return self.finish_pass();
                    };
                    visits -= 1;
                    if !graph.contains(next) || !self.visited.insert(next) {
                        continue;
                    }
                    self.current = Some(next);
                    next
                }
            };

            let Some(area) = graph.area(id) else {
                continue;
            };
            if let Some(dir) = area.first_unresolved() {
                if budget == 0 {
                    return Status::Processing;
                }
                explore_direction(graph, oracle, id, dir, ignore, config);
                budget -= 1;
                self.pass_resolutions += 1;
                continue;
            }

            // Every direction is decided. Queue neighbours near the agent.
            for (_, neighbour) in area.links().into_iter().rev() {
                if self.visited.contains(&neighbour) {
                    continue;
                }
                let near = graph
                    .area(neighbour)
                    .is_some_and(|n| n.position.distance(foot) <= explore_radius);
                if near {
                    self.open.push_front(neighbour);
                }
            }
            self.current = None;
        }
    }

    fn finish_pass(&mut self) -> Status {
        let resolutions = self.pass_resolutions;
        self.reset();
        if resolutions > 0 {
            trace!(resolutions, "mesh pass done");
            Status::Processing
        } else {
            Status::Finished
        }
    }
}

/// Locate (or create) the Area under the agent. Returns `None` when this
/// tick's work ends at seeding.
fn seed_area(
    graph: &mut AreaGraph,
    oracle: &dyn CollisionOracle,
    foot: Vec3,
    ignore: &[ModelIndex],
    config: &NavConfig,
) -> Option<AreaId> {
    let step = config.hull.step_height;
    let seed_tolerance = config.mesh.seed_tolerance();
    let grid_point = quantize(foot, config.mesh.grid_step);

    match ground_probe(oracle, grid_point + Vec3::Z * step, step * 2.0, ignore) {
        Some(ground) => match graph.find_exact_area(ground, seed_tolerance) {
            Some(id) => Some(id),
            None => {
                let id = graph.add_area(ground);
                debug!(%id, ?ground, "seeded area");
                None
            }
        },
        // No usable ground under the grid point. Fall back to an Area the
        // agent is already standing near, else retry next tick.
        None => graph.find_exact_area(foot, seed_tolerance),
    }
}

/// Resolve direction `dir` of Area `id`.
pub fn explore_direction(
    graph: &mut AreaGraph,
    oracle: &dyn CollisionOracle,
    id: AreaId,
    dir: Direction,
    ignore: &[ModelIndex],
    config: &NavConfig,
) -> Neighbour {
    let Some(area) = graph.area(id) else {
        return Neighbour::Unresolved;
    };
    let step = config.hull.step_height;
    let source = area.position;
    let destination = source + dir.offset() * config.mesh.grid_step;
    let raised = Vec3::Z * step;

    let result = match probe_destination(oracle, source + raised, destination + raised, ignore, config) {
        Some(ground) => {
            let neighbour = match graph.find_exact_area(ground, config.mesh.link_tolerance()) {
                Some(existing) if existing != id => existing,
                _ => graph.add_area(ground),
            };
            graph.link(id, dir, neighbour);
            Neighbour::Linked(neighbour)
        }
        None => {
            graph.set_neighbour(id, dir, Neighbour::Blocked);
            Neighbour::Blocked
        }
    };

    trace!(%id, %dir, ?result, "resolved direction");
    result
}

/// Ground point at `to` reachable from `from`, or `None` if the passage is
/// blocked.
fn probe_destination(
    oracle: &dyn CollisionOracle,
    from: Vec3,
    to: Vec3,
    ignore: &[ModelIndex],
    config: &NavConfig,
) -> Option<Vec3> {
    let hull = &config.hull;
    if oracle.trace_line(from, to, ignore).is_blocked() {
        return None;
    }
    let ground = ground_probe(oracle, to, hull.step_height * 2.0, ignore)?;
    let roof = roof_probe(oracle, ground + Vec3::Z, hull.duck_height, ignore)?;
    if roof.z - ground.z < hull.duck_height {
        return None;
    }
    Some(ground)
}
