// Movement controller: turns a target point into per-tick steering.
//
// Every call receives the tick's `MoveContext` (oracle, agent state, config,
// clock) and writes into the outgoing `UserCmd`. The only state carried
// between ticks is the cached `NavChain` with the target it was built for,
// the latched jump/duck intents, and the last time the agent was off the
// ground.
//
// Steering layers, each of which issues its own motion when it claims the
// tick:
// - `trivial_move_to`: face the target, then try vertical obstacle handling,
//   then wall-corner avoidance, else plain forward motion.
// - `nav_move_to`: follow a chain from `pathfinding::astar`, consuming nodes
//   as the agent reaches them, and fall back to `trivial_move_to` for the
//   final stretch or when no route exists.
// - `avoid_agents`: step away from a nearby visible player. The arbiter
//   runs it before everything else.
//
// Jumping is latched: `jump()` only records intent and is refused while the
// agent is tired. `apply_intents()` turns the latch into buttons at the end
// of the tick, and only while the agent has footing.
//
// See also: `bot.rs` for the call order, `trace.rs` for the probes.

use crate::area::AreaGraph;
use crate::command::{Buttons, UserCmd};
use crate::config::NavConfig;
use crate::pathfinding::{NavChain, astar};
use crate::trace::{CollisionOracle, ModelIndex, ground_probe, roof_probe};
use crate::types::{Status, planar_direction, planar_distance, yaw_of};
use crate::world::{AgentState, EntityInfo};
use glam::Vec3;
use std::time::Duration;
use tracing::{debug, trace};

/// Everything a steering call reads during one tick.
#[derive(Clone, Copy)]
pub struct MoveContext<'a> {
    pub oracle: &'a dyn CollisionOracle,
    pub agent: &'a AgentState,
    pub ignore: &'a [ModelIndex],
    pub config: &'a NavConfig,
    /// Time of this tick.
    pub now: Duration,
}

impl MoveContext<'_> {
    pub fn foot(&self) -> Vec3 {
        self.agent.foot(&self.config.hull)
    }
}

#[derive(Clone, Debug)]
pub struct MovementController {
    chain: NavChain,
    /// Target the current chain was built for.
    chain_target: Option<Vec3>,
    want_jump: bool,
    want_duck: bool,
    /// Last tick the agent had no footing, or the last accepted jump.
    last_air_time: Option<Duration>,
    jump_cooldown: Duration,
}

impl MovementController {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            chain: NavChain::new(),
            chain_target: None,
            want_jump: false,
            want_duck: false,
            last_air_time: None,
            jump_cooldown: Duration::try_from_secs_f32(config.movement.jump_cooldown_secs)
                .unwrap_or(Duration::ZERO),
        }
    }

    pub fn chain(&self) -> &NavChain {
        &self.chain
    }

    pub fn chain_target(&self) -> Option<Vec3> {
        self.chain_target
    }

    /// Drop the cached route. The next `nav_move_to` rebuilds it.
    pub fn clear_chain(&mut self) {
        self.chain.clear();
        self.chain_target = None;
    }

    pub fn wants_jump(&self) -> bool {
        self.want_jump
    }

    pub fn wants_duck(&self) -> bool {
        self.want_duck
    }

    // -----------------------------------------------------------------------
    // Direct seek
    // -----------------------------------------------------------------------

    /// Steer straight at `target`. Finished once the agent's foot is within
    /// `NavConfig::min_distance()` of it on the horizontal plane.
    pub fn trivial_move_to(
        &mut self,
        ctx: &MoveContext<'_>,
        cmd: &mut UserCmd,
        target: Vec3,
        allow_walk: bool,
    ) -> Status {
        let foot = ctx.foot();
        let distance = planar_distance(foot, target);
        if distance <= ctx.config.min_distance() {
            return Status::Finished;
        }
        let Some(heading) = planar_direction(foot, target) else {
            return Status::Finished;
        };
        cmd.set_yaw(yaw_of(heading));

        if self.handle_vertical(ctx, cmd, heading) {
            return Status::Processing;
        }
        if avoid_corners(ctx, cmd, heading) {
            return Status::Processing;
        }

        let max_speed = ctx.agent.max_speed;
        cmd.forward_move = if allow_walk && distance < ctx.config.walk_distance() {
            max_speed * ctx.config.movement.walk_speed_factor
        } else {
            max_speed
        };
        Status::Processing
    }

    /// Look one hull width ahead for the first window at least duck height
    /// tall and jump or duck to get through it. Returns true when it took
    /// control of the tick.
    fn handle_vertical(&mut self, ctx: &MoveContext<'_>, cmd: &mut UserCmd, heading: Vec3) -> bool {
        let hull = &ctx.config.hull;
        let foot = ctx.foot();
        let ahead = foot + heading * hull.player_width;

        let mut lift = 0.0;
        while lift <= hull.jump_crouch_height {
            let start = ahead + Vec3::Z * (lift + hull.duck_height);
            let depth = lift + hull.duck_height + hull.step_height;
            lift += hull.duck_height;

            let Some(ground) = ground_probe(ctx.oracle, start, depth, ctx.ignore) else {
                continue;
            };
            let Some(roof) = roof_probe(ctx.oracle, ground + Vec3::Z, hull.player_height, ctx.ignore)
            else {
                continue;
            };
            let window = roof.z - ground.z;
            if window < hull.duck_height {
                continue;
            }

            let rise = ground.z - foot.z;
            if rise > hull.step_height {
                if rise > hull.jump_crouch_height {
                    return false;
                }
                self.jump(true, ctx.now);
                cmd.forward_move = ctx.agent.max_speed;
                return true;
            }
            if window < hull.player_height {
                self.duck();
                cmd.forward_move = ctx.agent.max_speed;
                return true;
            }
            return false;
        }
        false
    }

    // -----------------------------------------------------------------------
    // Path following
    // -----------------------------------------------------------------------

    /// Follow the area graph to `target`, rebuilding the route whenever it
    /// runs out or the target moves.
    pub fn nav_move_to(
        &mut self,
        ctx: &MoveContext<'_>,
        graph: &AreaGraph,
        cmd: &mut UserCmd,
        target: Vec3,
    ) -> Status {
        let foot = ctx.foot();
        if self.chain.is_empty() || self.chain_target != Some(target) {
            let (Some(src), Some(dst)) = (graph.find_nearest_area(foot), graph.find_nearest_area(target))
            else {
                return Status::Processing;
            };
            let retarget = self.chain_target != Some(target);
            self.chain = astar(graph, src, dst);
            self.chain_target = Some(target);
            if retarget {
                debug!(%src, %dst, len = self.chain.len(), "built nav chain");
            } else {
                trace!(%src, %dst, len = self.chain.len(), "rebuilt nav chain");
            }
        }

        let tolerance = ctx.config.chain_node_tolerance();
        while let Some(&front) = self.chain.front() {
            match graph.area(front) {
                Some(area) if planar_distance(area.position, foot) > tolerance => break,
                _ => {
                    self.chain.pop_front();
                }
            }
        }

        match self.chain.front().and_then(|&id| graph.area(id)) {
            Some(area) => {
                let waypoint = area.position;
                self.trivial_move_to(ctx, cmd, waypoint, false);
                Status::Processing
            }
            None => self.trivial_move_to(ctx, cmd, target, true),
        }
    }

    // -----------------------------------------------------------------------
    // Jump/duck latch
    // -----------------------------------------------------------------------

    /// Request a jump, crouched if `duck`. Refused while tired.
    pub fn jump(&mut self, duck: bool, now: Duration) -> bool {
        if self.is_tired(now) {
            return false;
        }
        trace!(duck, "jump latched");
        self.want_jump = true;
        if duck {
            self.want_duck = true;
        }
        self.last_air_time = Some(now);
        true
    }

    pub fn duck(&mut self) {
        if !self.want_duck {
            trace!("duck latched");
        }
        self.want_duck = true;
    }

    /// The agent left the ground (or jumped) less than the cooldown ago.
    pub fn is_tired(&self, now: Duration) -> bool {
        self.last_air_time
            .is_some_and(|t| now.saturating_sub(t) < self.jump_cooldown)
    }

    /// Write the latched intents into `cmd` and clear them for the next tick.
    pub fn apply_intents(&mut self, cmd: &mut UserCmd, agent: &AgentState, now: Duration) {
        let has_footing = agent.on_ground || agent.on_ladder;
        if !has_footing {
            self.last_air_time = Some(now);
        }

        let jumped = self.want_jump && has_footing;
        if jumped {
            cmd.buttons |= Buttons::JUMP;
        }
        if self.want_duck {
            cmd.buttons |= Buttons::DUCK;
        }

        self.want_jump = false;
        if agent.on_ground && !jumped {
            self.want_duck = false;
        }
    }

    // -----------------------------------------------------------------------
    // Other agents
    // -----------------------------------------------------------------------

    /// Walk away from the nearest visible player within the avoid distance.
    pub fn avoid_agents(&self, ctx: &MoveContext<'_>, cmd: &mut UserCmd, entities: &[EntityInfo]) -> bool {
        let origin = ctx.agent.origin;
        let radius = ctx.config.movement.avoid_distance;
        let nearest = entities
            .iter()
            .filter(|e| e.is_player)
            .map(|e| (e, e.origin.distance(origin)))
            .filter(|&(_, d)| d <= radius)
            .filter(|(e, _)| !ctx.oracle.trace_line(origin, e.origin, ctx.ignore).is_blocked())
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((other, _)) = nearest else {
            return false;
        };
        let Some(away) = planar_direction(other.origin, origin) else {
            return false;
        };
        trace!(entity = other.index, "stepping away from player");
        cmd.set_yaw(yaw_of(away));
        cmd.forward_move = ctx.agent.max_speed;
        true
    }
}

/// Cast two short rays either side of the heading. When exactly one is
/// blocked, steer towards the end of the clear one.
fn avoid_corners(ctx: &MoveContext<'_>, cmd: &mut UserCmd, heading: Vec3) -> bool {
    let hull = &ctx.config.hull;
    let foot = ctx.foot();
    let left = Vec3::new(-heading.y, heading.x, 0.0) * (hull.player_width * 0.5);
    let reach = heading * ctx.config.corner_probe_length();
    let base = foot + Vec3::Z * hull.step_height;

    let left_from = base + left;
    let right_from = base - left;
    let left_tr = ctx.oracle.trace_line(left_from, left_from + reach, ctx.ignore);
    let right_tr = ctx.oracle.trace_line(right_from, right_from + reach, ctx.ignore);

    let clear_end = match (left_tr.is_blocked(), right_tr.is_blocked()) {
        (true, false) => right_tr.endpos,
        (false, true) => left_tr.endpos,
        _ => return false,
    };
    let Some(nudge) = planar_direction(foot, clear_end) else {
        return false;
    };
    cmd.set_yaw(yaw_of(nudge));
    cmd.forward_move = ctx.agent.max_speed;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BoxWorld;
    use crate::types::Direction;

    fn open_floor() -> BoxWorld {
        let mut world = BoxWorld::new();
        world.add_world_brush(Vec3::new(-1000.0, -1000.0, -16.0), Vec3::new(1000.0, 1000.0, 0.0));
        world
    }

    fn ctx<'a>(
        world: &'a BoxWorld,
        agent: &'a AgentState,
        config: &'a NavConfig,
        secs: f32,
    ) -> MoveContext<'a> {
        MoveContext {
            oracle: world,
            agent,
            ignore: &[],
            config,
            now: Duration::from_secs_f32(secs),
        }
    }

    fn grounded(config: &NavConfig) -> AgentState {
        AgentState::standing_at(Vec3::ZERO, &config.hull)
    }

    #[test]
    fn trivial_move_finishes_within_min_distance() {
        let world = open_floor();
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 0.0);

        let inside = Vec3::new(config.min_distance(), 0.0, 50.0);
        assert_eq!(mover.trivial_move_to(&c, &mut cmd, inside, true), Status::Finished);
        assert_eq!(cmd.forward_move, 0.0);

        let outside = Vec3::new(config.min_distance() + 0.5, 0.0, 0.0);
        assert_eq!(mover.trivial_move_to(&c, &mut cmd, outside, true), Status::Processing);
        assert!(cmd.forward_move > 0.0);
    }

    #[test]
    fn trivial_move_faces_and_walks_near_target() {
        let world = open_floor();
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let c = ctx(&world, &agent, &config, 0.0);

        let mut cmd = UserCmd::default();
        mover.trivial_move_to(&c, &mut cmd, Vec3::new(0.0, 40.0, 0.0), true);
        assert!((cmd.yaw() - 90.0).abs() < 1e-3);
        assert!(cmd.forward_move < agent.max_speed);

        let mut cmd = UserCmd::default();
        mover.trivial_move_to(&c, &mut cmd, Vec3::new(0.0, 40.0, 0.0), false);
        assert_eq!(cmd.forward_move, agent.max_speed);

        let mut cmd = UserCmd::default();
        mover.trivial_move_to(&c, &mut cmd, Vec3::new(500.0, 0.0, 0.0), true);
        assert_eq!(cmd.forward_move, agent.max_speed);
    }

    #[test]
    fn step_ahead_triggers_crouch_jump() {
        let mut world = open_floor();
        world.add_world_brush(Vec3::new(20.0, -100.0, 0.0), Vec3::new(200.0, 100.0, 20.0));
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 1.0);

        mover.trivial_move_to(&c, &mut cmd, Vec3::new(150.0, 0.0, 20.0), true);
        assert!(mover.wants_jump());
        assert!(mover.wants_duck());
        mover.apply_intents(&mut cmd, &agent, c.now);
        assert!(cmd.buttons.contains(Buttons::JUMP | Buttons::DUCK));
    }

    #[test]
    fn small_step_needs_no_jump() {
        let mut world = open_floor();
        world.add_world_brush(Vec3::new(20.0, -100.0, 0.0), Vec3::new(200.0, 100.0, 12.0));
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 1.0);

        mover.trivial_move_to(&c, &mut cmd, Vec3::new(150.0, 0.0, 12.0), true);
        assert!(!mover.wants_jump());
        assert_eq!(cmd.forward_move, agent.max_speed);
    }

    #[test]
    fn tall_wall_is_not_jumped() {
        let mut world = open_floor();
        world.add_world_brush(Vec3::new(20.0, -100.0, 0.0), Vec3::new(40.0, 100.0, 200.0));
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 1.0);

        let status = mover.trivial_move_to(&c, &mut cmd, Vec3::new(150.0, 0.0, 0.0), true);
        assert_eq!(status, Status::Processing);
        assert!(!mover.wants_jump());
    }

    #[test]
    fn low_ceiling_triggers_duck() {
        let mut world = open_floor();
        world.add_world_brush(Vec3::new(20.0, -100.0, 50.0), Vec3::new(200.0, 100.0, 100.0));
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 1.0);

        mover.trivial_move_to(&c, &mut cmd, Vec3::new(150.0, 0.0, 0.0), true);
        assert!(mover.wants_duck());
        assert!(!mover.wants_jump());
        mover.apply_intents(&mut cmd, &agent, c.now);
        assert!(cmd.buttons.contains(Buttons::DUCK));
        assert!(!cmd.buttons.contains(Buttons::JUMP));
    }

    #[test]
    fn corner_on_one_side_nudges_away() {
        let mut world = open_floor();
        // Wall edge just left of the heading.
        world.add_world_brush(Vec3::new(20.0, 4.0, 0.0), Vec3::new(200.0, 100.0, 200.0));
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 1.0);

        mover.trivial_move_to(&c, &mut cmd, Vec3::new(500.0, 0.0, 0.0), true);
        assert!(cmd.yaw() < 0.0, "yaw {}", cmd.yaw());
        assert_eq!(cmd.forward_move, agent.max_speed);
    }

    #[test]
    fn corner_blocked_both_sides_goes_straight() {
        let mut world = open_floor();
        world.add_world_brush(Vec3::new(20.0, 4.0, 0.0), Vec3::new(200.0, 100.0, 200.0));
        world.add_world_brush(Vec3::new(20.0, -100.0, 0.0), Vec3::new(200.0, -4.0, 200.0));
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 1.0);

        let status = mover.trivial_move_to(&c, &mut cmd, Vec3::new(500.0, 0.0, 0.0), true);
        assert_eq!(status, Status::Processing);
        assert!(cmd.yaw().abs() < 1e-3, "yaw {}", cmd.yaw());
        assert_eq!(cmd.forward_move, agent.max_speed);
        assert!(!mover.wants_jump());
    }

    #[test]
    fn jump_latch_refuses_while_tired() {
        let config = NavConfig::default();
        let mut mover = MovementController::new(&config);
        let t0 = Duration::from_secs(10);
        assert!(!mover.is_tired(t0));
        assert!(mover.jump(false, t0));
        assert!(mover.is_tired(t0));
        assert!(!mover.jump(false, t0 + Duration::from_millis(100)));
        assert!(!mover.is_tired(t0 + Duration::from_millis(401)));
        assert!(mover.jump(false, t0 + Duration::from_millis(401)));
    }

    #[test]
    fn intents_need_footing_and_clear_each_tick() {
        let config = NavConfig::default();
        let mut mover = MovementController::new(&config);
        let mut airborne = grounded(&config);
        airborne.on_ground = false;
        let t0 = Duration::from_secs(1);

        mover.jump(true, t0);
        let mut cmd = UserCmd::default();
        mover.apply_intents(&mut cmd, &airborne, t0);
        assert!(!cmd.buttons.contains(Buttons::JUMP));
        assert!(cmd.buttons.contains(Buttons::DUCK));
        assert!(!mover.wants_jump());
        // Duck persists until grounded.
        assert!(mover.wants_duck());

        let landed = grounded(&config);
        let mut cmd = UserCmd::default();
        mover.apply_intents(&mut cmd, &landed, t0 + Duration::from_millis(16));
        assert!(cmd.buttons.contains(Buttons::DUCK));
        assert!(!mover.wants_duck());
    }

    #[test]
    fn airborne_ticks_extend_tiredness() {
        let config = NavConfig::default();
        let mut mover = MovementController::new(&config);
        let mut agent = grounded(&config);
        agent.on_ground = false;
        let t = Duration::from_secs(5);
        mover.apply_intents(&mut UserCmd::default(), &agent, t);
        assert!(mover.is_tired(t + Duration::from_millis(200)));
        assert!(!mover.is_tired(t + Duration::from_millis(500)));
    }

    #[test]
    fn ladder_counts_as_footing() {
        let config = NavConfig::default();
        let mut mover = MovementController::new(&config);
        let mut agent = grounded(&config);
        agent.on_ground = false;
        agent.on_ladder = true;
        mover.jump(false, Duration::from_secs(1));
        let mut cmd = UserCmd::default();
        mover.apply_intents(&mut cmd, &agent, Duration::from_secs(1));
        assert!(cmd.buttons.contains(Buttons::JUMP));
    }

    #[test]
    fn nav_move_skips_on_empty_graph() {
        let world = open_floor();
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 0.0);
        let graph = AreaGraph::new();

        let status = mover.nav_move_to(&c, &graph, &mut cmd, Vec3::new(200.0, 0.0, 0.0));
        assert_eq!(status, Status::Processing);
        assert_eq!(cmd.forward_move, 0.0);
        assert!(mover.chain().is_empty());
    }

    #[test]
    fn nav_move_follows_chain_then_seeks_target() {
        let world = open_floor();
        let config = NavConfig::default();
        let mut graph = AreaGraph::new();
        let ids: Vec<_> = (0..6)
            .map(|i| graph.add_area(Vec3::new(i as f32 * 32.0, 0.0, 0.0)))
            .collect();
        for pair in ids.windows(2) {
            graph.link(pair[0], Direction::Forward, pair[1]);
        }
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 0.0);
        let target = Vec3::new(160.0, 0.0, 0.0);

        assert_eq!(mover.nav_move_to(&c, &graph, &mut cmd, target), Status::Processing);
        // Nodes within two hull widths are consumed.
        assert_eq!(mover.chain().front(), Some(&ids[3]));
        assert_eq!(mover.chain_target(), Some(target));
        assert_eq!(cmd.forward_move, agent.max_speed);

        let near = AgentState::standing_at(Vec3::new(150.0, 0.0, 0.0), &config.hull);
        let c = ctx(&world, &near, &config, 0.1);
        let _ = mover.nav_move_to(&c, &graph, &mut cmd, target);
        assert!(mover.chain().is_empty());
        let done = AgentState::standing_at(target, &config.hull);
        let c = ctx(&world, &done, &config, 0.2);
        assert_eq!(mover.nav_move_to(&c, &graph, &mut cmd, target), Status::Finished);
    }

    #[test]
    fn chain_nodes_are_consumed_by_planar_distance() {
        let world = open_floor();
        let config = NavConfig::default();
        let mut graph = AreaGraph::new();
        let low = graph.add_area(Vec3::ZERO);
        // Top of a tall ledge right beside the agent, then ground beyond.
        let ledge = graph.add_area(Vec3::new(32.0, 0.0, 80.0));
        let beyond = graph.add_area(Vec3::new(64.0, 0.0, 80.0));
        let far = graph.add_area(Vec3::new(160.0, 0.0, 80.0));
        graph.link(low, Direction::Forward, ledge);
        graph.link(ledge, Direction::Forward, beyond);
        graph.link(beyond, Direction::Forward, far);

        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 0.0);
        mover.nav_move_to(&c, &graph, &mut cmd, Vec3::new(160.0, 0.0, 80.0));
        assert_eq!(mover.chain().front(), Some(&far));
    }

    #[test]
    fn changed_target_rebuilds_chain() {
        let world = open_floor();
        let config = NavConfig::default();
        let mut graph = AreaGraph::new();
        let ids: Vec<_> = (0..8)
            .map(|i| graph.add_area(Vec3::new(i as f32 * 32.0, 0.0, 0.0)))
            .collect();
        for pair in ids.windows(2) {
            graph.link(pair[0], Direction::Forward, pair[1]);
        }
        let agent = grounded(&config);
        let mut mover = MovementController::new(&config);
        let mut cmd = UserCmd::default();
        let c = ctx(&world, &agent, &config, 0.0);

        mover.nav_move_to(&c, &graph, &mut cmd, Vec3::new(128.0, 0.0, 0.0));
        assert_eq!(mover.chain().back(), Some(&ids[4]));
        mover.nav_move_to(&c, &graph, &mut cmd, Vec3::new(224.0, 0.0, 0.0));
        assert_eq!(mover.chain().back(), Some(&ids[7]));
    }

    #[test]
    fn avoids_nearby_visible_player() {
        let world = open_floor();
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mover = MovementController::new(&config);
        let c = ctx(&world, &agent, &config, 0.0);
        let other = EntityInfo {
            index: 2,
            origin: agent.origin + Vec3::new(0.0, 30.0, 0.0),
            is_player: true,
        };

        let mut cmd = UserCmd::default();
        assert!(mover.avoid_agents(&c, &mut cmd, std::slice::from_ref(&other)));
        assert!((cmd.yaw() + 90.0).abs() < 1e-3);
        assert_eq!(cmd.forward_move, agent.max_speed);

        let far = EntityInfo {
            origin: agent.origin + Vec3::new(0.0, 300.0, 0.0),
            ..other.clone()
        };
        let prop = EntityInfo {
            is_player: false,
            ..other
        };
        let mut cmd = UserCmd::default();
        assert!(!mover.avoid_agents(&c, &mut cmd, &[far, prop]));
    }

    #[test]
    fn player_behind_wall_is_ignored() {
        let mut world = open_floor();
        world.add_world_brush(Vec3::new(-100.0, 10.0, 0.0), Vec3::new(100.0, 14.0, 200.0));
        let config = NavConfig::default();
        let agent = grounded(&config);
        let mover = MovementController::new(&config);
        let c = ctx(&world, &agent, &config, 0.0);
        let other = EntityInfo {
            index: 2,
            origin: agent.origin + Vec3::new(0.0, 30.0, 0.0),
            is_player: true,
        };
        let mut cmd = UserCmd::default();
        assert!(!mover.avoid_agents(&c, &mut cmd, &[other]));
    }
}
