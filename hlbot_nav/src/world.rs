// World and entity state consumed each tick.
//
// The navigation core does not own or replicate world state. The caller
// (the client's replication layer) builds a `WorldView` every tick from what
// the server last sent: the agent's own physics flags, the nearby entities,
// and the list of moving sub-models whose positions it has synchronized into
// the collision oracle.
//
// See also: `bot.rs`, which takes a `WorldView` on every `think()`.

use crate::config::HullParams;
use crate::trace::ModelIndex;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The controlled agent's state as last replicated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Centre of the collision hull.
    pub origin: Vec3,
    pub velocity: Vec3,
    pub on_ground: bool,
    /// Attached to a climbable surface (ladder).
    pub on_ladder: bool,
    pub ducking: bool,
    pub alive: bool,
    pub spectator: bool,
    pub max_speed: f32,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            velocity: Vec3::ZERO,
            on_ground: true,
            on_ladder: false,
            ducking: false,
            alive: true,
            spectator: false,
            max_speed: 250.0,
        }
    }
}

impl AgentState {
    /// Standing agent with its feet at `foot`.
    pub fn standing_at(foot: Vec3, hull: &HullParams) -> Self {
        Self {
            origin: foot + Vec3::Z * (hull.player_height * 0.5),
            ..Self::default()
        }
    }

    /// Bottom centre of the hull.
    pub fn foot(&self, hull: &HullParams) -> Vec3 {
        let height = if self.ducking {
            hull.duck_height
        } else {
            hull.player_height
        };
        self.origin - Vec3::Z * (height * 0.5)
    }

    /// Whether movement decisions apply at all this tick.
    pub fn can_move(&self) -> bool {
        self.alive && !self.spectator
    }
}

/// Another entity near the agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub index: u32,
    pub origin: Vec3,
    /// Player-type entities are the ones the agent steps away from.
    pub is_player: bool,
}

/// Everything the core reads from the world in one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldView {
    pub agent: AgentState,
    pub entities: Vec<EntityInfo>,
    /// Sub-models excluded from every trace this tick.
    pub ignore_models: Vec<ModelIndex>,
}

impl WorldView {
    pub fn new(agent: AgentState) -> Self {
        Self {
            agent,
            entities: Vec::new(),
            ignore_models: Vec::new(),
        }
    }
}
