// Box levels the sandbox can run the bot in.
//
// Every level is a `BoxWorld`: one floor slab, surrounding walls, and
// whatever furniture the level type adds. Levels may also carry doors,
// sub-model brushes that slide out of the way after a number of ticks, and
// scripted players that pace back and forth for the avoidance logic to react
// to.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use hlbot_nav::brush::BoxWorld;
use hlbot_nav::trace::ModelIndex;
use hlbot_nav::world::EntityInfo;
use rand::Rng;
use rand::rngs::StdRng;

const WALL_HEIGHT: f32 = 256.0;
const WALL_THICKNESS: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelKind {
    Corridor,
    Room,
    Pillars,
    Step,
}

impl FromStr for LevelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corridor" => Ok(LevelKind::Corridor),
            "room" => Ok(LevelKind::Room),
            "pillars" => Ok(LevelKind::Pillars),
            "step" => Ok(LevelKind::Step),
            other => Err(format!("unknown level '{other}' (corridor|room|pillars|step)")),
        }
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LevelKind::Corridor => "corridor",
            LevelKind::Room => "room",
            LevelKind::Pillars => "pillars",
            LevelKind::Step => "step",
        };
        f.write_str(name)
    }
}

/// A sub-model that lifts out of the way once `open_at_tick` is reached.
#[derive(Clone, Debug)]
pub struct Door {
    pub model: ModelIndex,
    pub open_at_tick: u32,
    pub lift: f32,
}

/// A player entity pacing along X around `anchor`.
#[derive(Clone, Debug)]
pub struct ScriptedPlayer {
    pub index: u32,
    pub anchor: Vec3,
    pub amplitude: f32,
    pub period_secs: f32,
}

impl ScriptedPlayer {
    pub fn entity_at(&self, secs: f32) -> EntityInfo {
        let phase = secs / self.period_secs * std::f32::consts::TAU;
        EntityInfo {
            index: self.index,
            origin: self.anchor + Vec3::X * (self.amplitude * phase.sin()),
            is_player: true,
        }
    }
}

pub struct Level {
    pub kind: LevelKind,
    pub world: BoxWorld,
    /// Foot position the agent spawns at.
    pub spawn: Vec3,
    /// Horizontal extent from the origin to the inner wall faces.
    pub half_extent: Vec3,
    pub doors: Vec<Door>,
}

impl Level {
    /// Move every door whose time has come.
    pub fn update_doors(&mut self, tick: u32) {
        for door in &self.doors {
            let offset = if tick >= door.open_at_tick {
                Vec3::Z * door.lift
            } else {
                Vec3::ZERO
            };
            self.world.set_model_offset(door.model, offset);
        }
    }

    /// Sub-models that have started moving by `tick`. Their brushes are
    /// handed to every trace as the ignore list.
    pub fn ignore_models(&self, tick: u32) -> Vec<ModelIndex> {
        self.doors
            .iter()
            .filter(|d| tick >= d.open_at_tick)
            .map(|d| d.model)
            .collect()
    }

    /// `count` players placed at random spots away from the spawn.
    pub fn scripted_players(&self, count: u32, rng: &mut StdRng) -> Vec<ScriptedPlayer> {
        let reach = self.half_extent - Vec3::splat(48.0);
        (0..count)
            .map(|i| {
                let anchor = Vec3::new(
                    rng.gen_range(-reach.x..=reach.x),
                    rng.gen_range(-reach.y..=reach.y),
                    36.0,
                );
                ScriptedPlayer {
                    index: i + 1,
                    anchor,
                    amplitude: rng.gen_range(16.0..64.0),
                    period_secs: rng.gen_range(2.0..6.0),
                }
            })
            .collect()
    }
}

pub fn build(kind: LevelKind, rng: &mut StdRng) -> Level {
    match kind {
        LevelKind::Corridor => corridor(),
        LevelKind::Room => room(256.0, kind),
        LevelKind::Pillars => pillars(rng),
        LevelKind::Step => step(),
    }
}

fn walled_floor(world: &mut BoxWorld, half: Vec3) {
    world.add_world_brush(Vec3::new(-half.x, -half.y, -16.0), Vec3::new(half.x, half.y, 0.0));
    let (ox, oy) = (half.x + WALL_THICKNESS, half.y + WALL_THICKNESS);
    world.add_world_brush(Vec3::new(-ox, -oy, 0.0), Vec3::new(ox, -half.y, WALL_HEIGHT));
    world.add_world_brush(Vec3::new(-ox, half.y, 0.0), Vec3::new(ox, oy, WALL_HEIGHT));
    world.add_world_brush(Vec3::new(-ox, -oy, 0.0), Vec3::new(-half.x, oy, WALL_HEIGHT));
    world.add_world_brush(Vec3::new(half.x, -oy, 0.0), Vec3::new(ox, oy, WALL_HEIGHT));
}

fn corridor() -> Level {
    let half = Vec3::new(512.0, 48.0, 0.0);
    let mut world = BoxWorld::new();
    walled_floor(&mut world, half);
    let door = ModelIndex(1);
    world.add_model_brush(door, Vec3::new(240.0, -half.y, 0.0), Vec3::new(256.0, half.y, 128.0));
    Level {
        kind: LevelKind::Corridor,
        world,
        spawn: Vec3::new(-448.0, 0.0, 0.0),
        half_extent: half,
        doors: vec![Door {
            model: door,
            open_at_tick: 300,
            lift: 200.0,
        }],
    }
}

fn room(size: f32, kind: LevelKind) -> Level {
    let half = Vec3::new(size, size, 0.0);
    let mut world = BoxWorld::new();
    walled_floor(&mut world, half);
    Level {
        kind,
        world,
        spawn: Vec3::ZERO,
        half_extent: half,
        doors: Vec::new(),
    }
}

fn pillars(rng: &mut StdRng) -> Level {
    let mut level = room(256.0, LevelKind::Pillars);
    let reach = level.half_extent.x - 48.0;
    for _ in 0..12 {
        let x = rng.gen_range(-reach..=reach);
        let y = rng.gen_range(-reach..=reach);
        let size = rng.gen_range(8.0..32.0);
        if x.abs() < size + 48.0 && y.abs() < size + 48.0 {
            continue;
        }
        level.world.add_world_brush(
            Vec3::new(x - size, y - size, 0.0),
            Vec3::new(x + size, y + size, WALL_HEIGHT),
        );
    }
    level
}

fn step() -> Level {
    let mut level = room(256.0, LevelKind::Step);
    let half = level.half_extent;
    // A 20-unit platform: above step height, well within a crouch jump.
    level.world.add_world_brush(Vec3::new(64.0, -half.y, 0.0), Vec3::new(half.x, half.y, 20.0));
    level
}
