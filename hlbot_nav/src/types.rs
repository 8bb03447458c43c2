// Core types shared across the navigation core.
//
// Defines the four cardinal exploration directions (`Direction`), the arena
// identifier for discovered cells (`AreaId`), the cooperative progress value
// every incremental operation returns (`Status`), and a handful of planar
// helpers over `glam::Vec3`.
//
// Coordinate conventions follow the game world: Z is up, the horizontal plane
// is X/Y. "Planar" always means the X/Y projection.
//
// See also: `area.rs` for the graph these IDs index, `builder.rs` and
// `movement.rs` which return `Status` from every per-tick call.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// One of the four horizontal grid directions an Area can connect through.
///
/// - Forward: +X
/// - Back:    -X
/// - Left:    +Y
/// - Right:   -Y
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    /// The order in which the mesh builder probes unresolved directions.
    pub const EXPLORE_ORDER: [Direction; 4] = [
        Direction::Forward,
        Direction::Left,
        Direction::Right,
        Direction::Back,
    ];

    /// Slot of this direction in a `[_; 4]` neighbour table.
    pub const fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Back => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Back,
            Direction::Back => Direction::Forward,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector on the horizontal plane.
    pub fn offset(self) -> Vec3 {
        match self {
            Direction::Forward => Vec3::X,
            Direction::Back => Vec3::NEG_X,
            Direction::Left => Vec3::Y,
            Direction::Right => Vec3::NEG_Y,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Forward => "forward",
            Direction::Back => "back",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// IDs and status
// ---------------------------------------------------------------------------

/// Stable identifier of an Area. Assigned sequentially, never reused within
/// one graph, so a stale ID held after eviction simply fails to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub u32);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Area#{}", self.0)
    }
}

/// Result of one bounded increment of a long-running operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The operation has nothing left to do.
    Finished,
    /// More work remains; call again next tick.
    Processing,
}

impl Status {
    pub fn is_finished(self) -> bool {
        self == Status::Finished
    }
}

// ---------------------------------------------------------------------------
// Planar helpers
// ---------------------------------------------------------------------------

/// Drop the vertical component.
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Distance between two points ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}

/// Normalized horizontal direction from `from` towards `to`, or `None` when
/// the two points share the same X/Y.
pub fn planar_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let d = Vec3::new(to.x - from.x, to.y - from.y, 0.0);
    d.try_normalize()
}

/// Snap the horizontal components to the nearest multiple of `step`. The
/// height is left untouched.
pub fn quantize(p: Vec3, step: f32) -> Vec3 {
    Vec3::new((p.x / step).round() * step, (p.y / step).round() * step, p.z)
}

/// Yaw (degrees) of a horizontal heading, matching the engine's view angles.
pub fn yaw_of(dir: Vec3) -> f32 {
    dir.y.atan2(dir.x).to_degrees()
}
