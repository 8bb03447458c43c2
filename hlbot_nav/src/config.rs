// Data-driven navigation configuration.
//
// Every tunable of the navigation core lives in `NavConfig`, passed by
// reference to the mesh builder, the movement controller and the behavior
// arbiter at construction. Nothing reads a global or a console variable.
//
// Parameters are grouped the way they are consumed:
// - `MeshParams`: grid step, explore radius, match tolerances, per-tick
//   trace budget of the mesh builder.
// - `HullParams`: the agent's collision hull (width, stand/duck heights) and
//   what it can climb (step, jump, crouch-jump heights).
// - `MoveParams`: steering thresholds, walking speed, jump cooldown, and the
//   other-agent avoidance distance.
// - `BehaviorParams`: arbiter mode switches.
//
// Distances that scale with the hull are stored as factors of
// `HullParams::player_width` and resolved through accessor methods so a
// narrower or wider agent keeps the same behavior.
//
// Each group is `#[serde(default)]`, so a JSON file only needs the fields it
// changes. See also: `error.rs` for `ConfigError`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Controls how the area graph is grown and pruned.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    /// Horizontal spacing between adjacent Areas, in world units.
    pub grid_step: f32,
    /// Areas farther than this from the agent are not expanded.
    pub explore_radius: f32,
    /// Areas farther than `explore_radius * eviction_factor` are evicted.
    pub eviction_factor: f32,
    /// The agent's ground point matches an existing Area within
    /// `grid_step * seed_match_factor`; otherwise a fresh seed is inserted.
    pub seed_match_factor: f32,
    /// A probed destination reuses an existing Area within
    /// `grid_step * link_match_factor`. Must stay below 1.0 so neighbouring
    /// grid points never merge.
    pub link_match_factor: f32,
    /// Maximum number of direction resolutions (each costing at most three
    /// traces) the builder performs per tick. Floored at 1.
    pub resolutions_per_tick: u32,
    /// Maximum number of Areas the builder looks at per tick, counting both
    /// the eviction sweep and the flood's pops. Floored at 1.
    pub visits_per_tick: u32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            grid_step: 32.0,
            explore_radius: 512.0,
            eviction_factor: 1.25,
            seed_match_factor: 1.25,
            link_match_factor: 0.5,
            resolutions_per_tick: 1,
            visits_per_tick: 32,
        }
    }
}

impl MeshParams {
    pub fn seed_tolerance(&self) -> f32 {
        self.grid_step * self.seed_match_factor
    }

    pub fn link_tolerance(&self) -> f32 {
        self.grid_step * self.link_match_factor
    }

    pub fn eviction_radius(&self) -> f32 {
        self.explore_radius * self.eviction_factor
    }
}

/// The agent's collision hull and climbing limits.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HullParams {
    pub player_width: f32,
    /// Standing hull height.
    pub player_height: f32,
    /// Ducked hull height; also the minimum usable vertical window.
    pub duck_height: f32,
    /// Highest ledge the agent walks up without jumping.
    pub step_height: f32,
    /// Apex of a standing jump.
    pub jump_height: f32,
    /// Highest ledge reachable with a crouch-jump. Bounds the vertical
    /// window search.
    pub jump_crouch_height: f32,
}

impl Default for HullParams {
    fn default() -> Self {
        Self {
            player_width: 32.0,
            player_height: 72.0,
            duck_height: 36.0,
            step_height: 18.0,
            jump_height: 45.0,
            jump_crouch_height: 63.0,
        }
    }
}

/// Steering thresholds for the movement controller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveParams {
    /// Direct seek reports Finished within `player_width * min_distance_factor`.
    pub min_distance_factor: f32,
    /// Within `player_width * walk_distance_factor` of the target the agent
    /// slows to walking speed (when the caller allows it).
    pub walk_distance_factor: f32,
    /// Walking speed as a fraction of the agent's max speed.
    pub walk_speed_factor: f32,
    /// Chain nodes within `player_width * chain_node_tolerance_factor` of the
    /// foot position count as reached.
    pub chain_node_tolerance_factor: f32,
    /// Length and side offset of the wall-corner probes, as a factor of width.
    pub corner_probe_factor: f32,
    /// Seconds after last being airborne during which a new jump is refused.
    pub jump_cooldown_secs: f32,
    /// Visible players closer than this are actively avoided.
    pub avoid_distance: f32,
}

impl Default for MoveParams {
    fn default() -> Self {
        Self {
            min_distance_factor: 0.5,
            walk_distance_factor: 2.0,
            walk_speed_factor: 0.4,
            chain_node_tolerance_factor: 2.0,
            corner_probe_factor: 1.0,
            jump_cooldown_secs: 0.4,
            avoid_distance: 64.0,
        }
    }
}

/// Arbiter mode switches.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorParams {
    /// Pursue move targets through the area graph (true) or by direct
    /// steering (false). Settable at runtime on the bot.
    pub use_nav_movement: bool,
    /// With no move target, walk to the nearest unexplored Area.
    pub explore_when_idle: bool,
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self {
            use_nav_movement: true,
            explore_when_idle: true,
        }
    }
}

/// Complete navigation configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub mesh: MeshParams,
    pub hull: HullParams,
    pub movement: MoveParams,
    pub behavior: BehaviorParams,
}

impl NavConfig {
    /// Parse a config from JSON. Missing groups and fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn min_distance(&self) -> f32 {
        self.hull.player_width * self.movement.min_distance_factor
    }

    pub fn walk_distance(&self) -> f32 {
        self.hull.player_width * self.movement.walk_distance_factor
    }

    pub fn chain_node_tolerance(&self) -> f32 {
        self.hull.player_width * self.movement.chain_node_tolerance_factor
    }

    pub fn corner_probe_length(&self) -> f32 {
        self.hull.player_width * self.movement.corner_probe_factor
    }
}
