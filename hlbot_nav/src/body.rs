// Toy kinematic body for driving the bot against a collision oracle.
//
// The real client gets the agent's state back from the server. Headless
// runs (scenario tests, benches, the sandbox binary) need something that
// turns a `UserCmd` into a new `AgentState` instead, and this is it: a point
// hull with instant horizontal acceleration, gravity while airborne, a jump
// impulse, ground snapping and step-up over anything below step height.
//
// Horizontal motion is swept one axis at a time at three heights (just above
// step height, mid hull, top of hull). A blocked axis is dropped for that
// tick, which makes the body slide along walls.

use crate::command::{Buttons, UserCmd};
use crate::config::HullParams;
use crate::trace::{CollisionOracle, ModelIndex, ground_probe, roof_probe};
use crate::world::AgentState;
use glam::Vec3;

pub const DEFAULT_GRAVITY: f32 = 800.0;

#[derive(Clone, Debug)]
pub struct KinematicBody {
    pub state: AgentState,
    pub gravity: f32,
    pub jump_speed: f32,
}

impl KinematicBody {
    /// A body standing with its feet at `foot`. The jump impulse is chosen
    /// so the apex of a standing jump is `hull.jump_height`.
    pub fn new(foot: Vec3, hull: &HullParams) -> Self {
        Self {
            state: AgentState::standing_at(foot, hull),
            gravity: DEFAULT_GRAVITY,
            jump_speed: (2.0 * DEFAULT_GRAVITY * hull.jump_height.max(0.0)).sqrt(),
        }
    }

    pub fn foot(&self, hull: &HullParams) -> Vec3 {
        self.state.foot(hull)
    }

    /// Integrate one command.
    pub fn step(
        &mut self,
        oracle: &dyn CollisionOracle,
        cmd: &UserCmd,
        hull: &HullParams,
        ignore: &[ModelIndex],
    ) {
        let dt = f32::from(cmd.msec) / 1000.0;
        if dt <= 0.0 || !self.state.can_move() {
            return;
        }

        let mut foot = self.state.foot(hull);
        self.state.ducking = cmd.buttons.contains(Buttons::DUCK);
        let height = if self.state.ducking {
            hull.duck_height
        } else {
            hull.player_height
        };

        let yaw = cmd.yaw().to_radians();
        let forward = Vec3::new(yaw.cos(), yaw.sin(), 0.0);
        let left = Vec3::new(-yaw.sin(), yaw.cos(), 0.0);
        let wish = (forward * cmd.forward_move + left * cmd.side_move)
            .clamp_length_max(self.state.max_speed);

        let was_grounded = self.state.on_ground;
        let mut vz = if was_grounded { 0.0 } else { self.state.velocity.z };
        if was_grounded && cmd.buttons.contains(Buttons::JUMP) {
            vz = self.jump_speed;
        }

        let delta = wish * dt;
        for axis in [Vec3::new(delta.x, 0.0, 0.0), Vec3::new(0.0, delta.y, 0.0)] {
            if sweep_clear(oracle, foot, axis, height, hull, ignore) {
                foot += axis;
            }
        }

        let mut grounded = false;
        if vz > 0.0 {
            let head = foot + Vec3::Z * height;
            let rise = vz * dt;
            if let Some(stop) = roof_probe(oracle, head, rise, ignore) {
                let climbed = stop.z - head.z;
                foot.z += climbed;
                if climbed < rise {
                    vz = 0.0;
                }
            }
            vz -= self.gravity * dt;
        } else {
            vz -= self.gravity * dt;
            let fall = -vz * dt;
            let stick = if was_grounded { hull.step_height } else { 0.0 };
            let depth = hull.step_height + fall + stick;
            match ground_probe(oracle, foot + Vec3::Z * hull.step_height, depth, ignore) {
                Some(ground) => {
                    foot.z = ground.z;
                    vz = 0.0;
                    grounded = true;
                }
                None => foot.z -= fall,
            }
        }

        self.state.on_ground = grounded;
        self.state.velocity = Vec3::new(wish.x, wish.y, vz);
        self.state.origin = foot + Vec3::Z * (height * 0.5);
    }
}

fn sweep_clear(
    oracle: &dyn CollisionOracle,
    foot: Vec3,
    delta: Vec3,
    height: f32,
    hull: &HullParams,
    ignore: &[ModelIndex],
) -> bool {
    let Some(dir) = delta.try_normalize() else {
        return false;
    };
    let reach = delta + dir * (hull.player_width * 0.5);
    [hull.step_height + 0.5, height * 0.5, height - 1.0]
        .into_iter()
        .all(|h| {
            let from = foot + Vec3::Z * h;
            !oracle.trace_line(from, from + reach, ignore).is_blocked()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BoxWorld;

    fn open_floor() -> BoxWorld {
        let mut world = BoxWorld::new();
        world.add_world_brush(Vec3::new(-1000.0, -1000.0, -16.0), Vec3::new(1000.0, 1000.0, 0.0));
        world
    }

    fn forward_cmd(speed: f32) -> UserCmd {
        UserCmd {
            msec: 16,
            forward_move: speed,
            ..UserCmd::default()
        }
    }

    #[test]
    fn walks_forward_on_flat_ground() {
        let world = open_floor();
        let hull = HullParams::default();
        let mut body = KinematicBody::new(Vec3::ZERO, &hull);
        for _ in 0..10 {
            body.step(&world, &forward_cmd(250.0), &hull, &[]);
        }
        let foot = body.foot(&hull);
        assert!((foot.x - 40.0).abs() < 0.01, "{foot:?}");
        assert!(foot.z.abs() < 0.1);
        assert!(body.state.on_ground);
    }

    #[test]
    fn wall_stops_motion() {
        let mut world = open_floor();
        world.add_world_brush(Vec3::new(40.0, -100.0, 0.0), Vec3::new(60.0, 100.0, 200.0));
        let hull = HullParams::default();
        let mut body = KinematicBody::new(Vec3::ZERO, &hull);
        for _ in 0..100 {
            body.step(&world, &forward_cmd(250.0), &hull, &[]);
        }
        assert!(body.foot(&hull).x < 40.0);
    }

    #[test]
    fn steps_up_small_ledge() {
        let mut world = open_floor();
        world.add_world_brush(Vec3::new(40.0, -100.0, 0.0), Vec3::new(200.0, 100.0, 12.0));
        let hull = HullParams::default();
        let mut body = KinematicBody::new(Vec3::ZERO, &hull);
        for _ in 0..30 {
            body.step(&world, &forward_cmd(250.0), &hull, &[]);
        }
        let foot = body.foot(&hull);
        assert!(foot.x > 60.0);
        assert!((foot.z - 12.0).abs() < 0.1, "{foot:?}");
    }

    #[test]
    fn jump_leaves_and_returns_to_ground() {
        let world = open_floor();
        let hull = HullParams::default();
        let mut body = KinematicBody::new(Vec3::ZERO, &hull);
        let mut cmd = forward_cmd(0.0);
        cmd.buttons = Buttons::JUMP;
        body.step(&world, &cmd, &hull, &[]);
        assert!(!body.state.on_ground);
        let mut apex: f32 = 0.0;
        for _ in 0..100 {
            body.step(&world, &forward_cmd(0.0), &hull, &[]);
            apex = apex.max(body.foot(&hull).z);
        }
        assert!(body.state.on_ground);
        assert!(apex > 30.0 && apex < 50.0, "apex {apex}");
    }

    fn jump_apex(hull: &HullParams) -> f32 {
        let world = open_floor();
        let mut body = KinematicBody::new(Vec3::ZERO, hull);
        let mut cmd = forward_cmd(0.0);
        cmd.buttons = Buttons::JUMP;
        body.step(&world, &cmd, hull, &[]);
        let mut apex: f32 = 0.0;
        for _ in 0..100 {
            body.step(&world, &forward_cmd(0.0), hull, &[]);
            apex = apex.max(body.foot(hull).z);
        }
        apex
    }

    #[test]
    fn jump_height_sets_the_apex() {
        let low = HullParams {
            jump_height: 20.0,
            ..HullParams::default()
        };
        let apex = jump_apex(&low);
        assert!(apex > 15.0 && apex < 22.0, "apex {apex}");
        assert!(jump_apex(&HullParams::default()) > apex + 15.0);
    }

    #[test]
    fn dead_body_stays_put() {
        let world = open_floor();
        let hull = HullParams::default();
        let mut body = KinematicBody::new(Vec3::ZERO, &hull);
        body.state.alive = false;
        body.step(&world, &forward_cmd(250.0), &hull, &[]);
        assert_eq!(body.foot(&hull), Vec3::ZERO);
    }
}
