// Collision oracle contract and the probes built on it.
//
// The level's ray-intersection engine is external to the navigation core.
// Everything here consumes a single query, `CollisionOracle::trace_line`,
// which casts one ray against static level geometry (optionally skipping
// moving sub-models whose positions the caller has synchronized).
//
// On top of that query this module defines the two probes the mesh builder
// and movement controller share:
// - `ground_probe`: a downward ray returning the walkable surface under a point.
// - `roof_probe`: an upward ray returning the nearest obstruction above a point.
//
// Both treat a start-solid result as "no answer". The caller retries on a
// later tick rather than trusting an undefined endpoint.
//
// See also: `brush.rs` for the reference `BoxWorld` oracle used by tests and
// the sandbox binary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index of a brush sub-model (door, platform, lift) in the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelIndex(pub u32);

/// Outcome of one ray cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceResult {
    /// Where the ray stopped: `begin + fraction * (end - begin)`.
    pub endpos: Vec3,
    /// 1.0 means the ray reached `end` unobstructed.
    pub fraction: f32,
    /// The ray origin is embedded in solid geometry; `endpos` and `fraction`
    /// carry no usable information.
    pub start_solid: bool,
}

impl TraceResult {
    /// An unobstructed trace ending at `end`.
    pub fn clear(end: Vec3) -> Self {
        Self {
            endpos: end,
            fraction: 1.0,
            start_solid: false,
        }
    }

    /// The ray was stopped before reaching its end (or never left solid).
    pub fn is_blocked(&self) -> bool {
        self.start_solid || self.fraction < 1.0
    }
}

/// Single-ray intersection test against static level geometry.
pub trait CollisionOracle {
    /// Cast a ray from `begin` to `end`, ignoring brushes owned by any model
    /// in `ignore`.
    fn trace_line(&self, begin: Vec3, end: Vec3, ignore: &[ModelIndex]) -> TraceResult;
}

impl<T: CollisionOracle + ?Sized> CollisionOracle for &T {
    fn trace_line(&self, begin: Vec3, end: Vec3, ignore: &[ModelIndex]) -> TraceResult {
        (**self).trace_line(begin, end, ignore)
    }
}

/// Drop a ray from `from` straight down by `depth` and return the surface it
/// lands on. `None` when nothing is hit within `depth` or the ray starts
/// inside solid.
pub fn ground_probe(
    oracle: &dyn CollisionOracle,
    from: Vec3,
    depth: f32,
    ignore: &[ModelIndex],
) -> Option<Vec3> {
    let tr = oracle.trace_line(from, from - Vec3::Z * depth, ignore);
    if tr.start_solid || tr.fraction >= 1.0 {
        return None;
    }
    Some(tr.endpos)
}

/// Cast a ray from `from` straight up by `height` and return the point where
/// it stops. An open sky returns `from + height`. `None` when the ray starts
/// inside solid.
pub fn roof_probe(
    oracle: &dyn CollisionOracle,
    from: Vec3,
    height: f32,
    ignore: &[ModelIndex],
) -> Option<Vec3> {
    let tr = oracle.trace_line(from, from + Vec3::Z * height, ignore);
    if tr.start_solid {
        return None;
    }
    Some(tr.endpos)
}
