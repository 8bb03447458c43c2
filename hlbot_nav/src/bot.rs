// Behavior arbiter: the per-tick entry point of one navigating agent.
//
// `Bot` owns everything the agent keeps between ticks: its area graph, the
// mesh builder cursor, the movement controller with its cached chain and
// latches, and the custom move target. The caller invokes `think()` once per
// frame with the current world view and the outgoing command; nothing else
// mutates the bot.
//
// Per tick, in order, stopping at the first step that takes control:
// 1. Stamp the frame delta on the command and reset its motion and buttons,
//    carrying over last tick's facing.
// 2. Skip movement entirely while dead or spectating. The agent will come
//    back somewhere else, so the builder pass and the cached chain are
//    dropped.
// 3. Advance the mesh builder by one bounded unit.
// 4. Step away from a nearby visible player.
// 5. Pursue the custom move target, through the graph or by direct seek
//    depending on `use_nav_movement`. A target that reports Finished is
//    cleared.
// 6. With no target, pick the nearest frontier Area as the next target when
//    idle exploration is on.
// Latched jump/duck intents are applied to the command last.
//
// See also: `movement.rs`, `builder.rs`, `area.rs`.

use crate::area::{AreaGraph, GraphSnapshot};
use crate::builder::MeshBuilder;
use crate::command::UserCmd;
use crate::config::NavConfig;
use crate::movement::{MoveContext, MovementController};
use crate::pathfinding::NavChain;
use crate::trace::CollisionOracle;
use crate::types::Status;
use crate::world::WorldView;
use glam::Vec3;
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Bot {
    config: NavConfig,
    graph: AreaGraph,
    builder: MeshBuilder,
    movement: MovementController,
    move_target: Option<Vec3>,
    use_nav_movement: bool,
    last_think: Option<Duration>,
    /// Facing carried from one tick to the next.
    view_angles: Vec3,
}

impl Bot {
    pub fn new(config: NavConfig) -> Self {
        Self {
            graph: AreaGraph::new(),
            builder: MeshBuilder::new(),
            movement: MovementController::new(&config),
            move_target: None,
            use_nav_movement: config.behavior.use_nav_movement,
            last_think: None,
            view_angles: Vec3::ZERO,
            config,
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Run one tick. `now` is the caller's monotonic clock.
    pub fn think(
        &mut self,
        now: Duration,
        world: &WorldView,
        oracle: &dyn CollisionOracle,
        cmd: &mut UserCmd,
    ) {
        let delta = self
            .last_think
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_think = Some(now);
        cmd.set_msec(delta.as_millis());
        cmd.reset_motion();
        cmd.view_angles = self.view_angles;

        let agent = &world.agent;
        if !agent.can_move() {
            self.builder.reset();
            self.movement.clear_chain();
            return;
        }

        let foot = agent.foot(&self.config.hull);
        self.builder.advance(
            &mut self.graph,
            oracle,
            foot,
            &world.ignore_models,
            &self.config,
        );

        let ctx = MoveContext {
            oracle,
            agent,
            ignore: &world.ignore_models,
            config: &self.config,
            now,
        };

        if !self.movement.avoid_agents(&ctx, cmd, &world.entities) {
            if let Some(target) = self.move_target {
                let status = if self.use_nav_movement {
                    self.movement.nav_move_to(&ctx, &self.graph, cmd, target)
                } else {
                    self.movement.trivial_move_to(&ctx, cmd, target, true)
                };
                if status == Status::Finished {
                    debug!(?target, "move target reached");
                    self.move_target = None;
                }
            } else if self.config.behavior.explore_when_idle {
                let pick = self
                    .graph
                    .find_nearest_unexplored(foot, self.config.min_distance())
                    .and_then(|id| self.graph.area(id).map(|a| (id, a.position)));
                if let Some((id, position)) = pick {
                    debug!(%id, ?position, "exploring frontier");
                    self.move_target = Some(position);
                }
            }
        }

        self.movement.apply_intents(cmd, agent, now);
        self.view_angles = cmd.view_angles;
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn graph(&self) -> &AreaGraph {
        &self.graph
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.graph.snapshot()
    }

    pub fn nav_chain(&self) -> &NavChain {
        self.movement.chain()
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn move_target(&self) -> Option<Vec3> {
        self.move_target
    }

    /// Replace the custom move target. A different target invalidates the
    /// cached chain on the next path-following tick.
    pub fn set_move_target(&mut self, target: Option<Vec3>) {
        if target != self.move_target {
            debug!(?target, "move target set");
        }
        self.move_target = target;
    }

    pub fn use_nav_movement(&self) -> bool {
        self.use_nav_movement
    }

    pub fn set_use_nav_movement(&mut self, enabled: bool) {
        self.use_nav_movement = enabled;
    }
}
