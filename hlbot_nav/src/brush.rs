// Axis-aligned brush level, the reference collision oracle.
//
// A `BoxWorld` is a list of solid boxes. Each brush either belongs to the
// static world or to a numbered sub-model (a door, lift or platform) that can
// be displaced with `set_model_offset` to mirror where the engine currently
// has it. `trace_line` clips the ray against every brush with a slab test and
// keeps the nearest entry, the same enter/leave fraction bookkeeping a BSP
// brush clip does.
//
// Conventions that the navigation probes rely on:
// - A point exactly on a brush face is outside the brush. A ray sliding along
//   a floor's top face does not hit the floor.
// - A hit backs off by `DIST_EPSILON` along the ray, so a new trace starting
//   at a returned `endpos` is never start-solid.
// - A ray starting strictly inside any brush reports `start_solid` with
//   `fraction == 0`.
//
// The navigation core never depends on this type; it exists so tests, benches
// and the sandbox binary have real geometry to probe.

use crate::trace::{CollisionOracle, ModelIndex, TraceResult};
use glam::Vec3;
use std::collections::BTreeMap;

/// Distance a hit is backed off from the surface it struck.
pub const DIST_EPSILON: f32 = 0.03125;

/// One solid axis-aligned box.
#[derive(Clone, Debug, PartialEq)]
pub struct Brush {
    pub mins: Vec3,
    pub maxs: Vec3,
    /// Owning sub-model, or `None` for static world geometry.
    pub model: Option<ModelIndex>,
}

/// A level made of axis-aligned brushes.
#[derive(Clone, Debug, Default)]
pub struct BoxWorld {
    brushes: Vec<Brush>,
    /// Current displacement of each sub-model from its spawn position.
    model_offsets: BTreeMap<ModelIndex, Vec3>,
}

impl BoxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static world brush spanning `mins..maxs`.
    pub fn add_world_brush(&mut self, mins: Vec3, maxs: Vec3) {
        self.brushes.push(Brush {
            mins: mins.min(maxs),
            maxs: mins.max(maxs),
            model: None,
        });
    }

    /// Add a brush owned by sub-model `model`.
    pub fn add_model_brush(&mut self, model: ModelIndex, mins: Vec3, maxs: Vec3) {
        self.brushes.push(Brush {
            mins: mins.min(maxs),
            maxs: mins.max(maxs),
            model: Some(model),
        });
    }

    /// Move every brush of `model` to `offset` from where it was added.
    pub fn set_model_offset(&mut self, model: ModelIndex, offset: Vec3) {
        self.model_offsets.insert(model, offset);
    }

    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    /// Bounds of `brush` after applying its model's current offset.
    fn placed_bounds(&self, brush: &Brush) -> (Vec3, Vec3) {
        let offset = brush
            .model
            .and_then(|m| self.model_offsets.get(&m).copied())
            .unwrap_or(Vec3::ZERO);
        (brush.mins + offset, brush.maxs + offset)
    }
}

/// Clip of one ray against one box.
enum Clip {
    Miss,
    StartSolid,
    /// Entry fraction along the ray, in `[0, 1]`.
    Enter(f32),
}

fn clip_ray_to_box(begin: Vec3, delta: Vec3, mins: Vec3, maxs: Vec3) -> Clip {
    let b = begin.to_array();
    let d = delta.to_array();
    let lo = mins.to_array();
    let hi = maxs.to_array();

    let inside = (0..3).all(|i| b[i] > lo[i] && b[i] < hi[i]);
    if inside {
        return Clip::StartSolid;
    }

    let mut enter = f32::NEG_INFINITY;
    let mut leave = f32::INFINITY;
    for axis in 0..3 {
        if d[axis] == 0.0 {
            // A ray parallel to this slab either lies within it for its
            // whole length or never touches the box.
            if b[axis] <= lo[axis] || b[axis] >= hi[axis] {
                return Clip::Miss;
            }
            continue;
        }
        let t0 = (lo[axis] - b[axis]) / d[axis];
        let t1 = (hi[axis] - b[axis]) / d[axis];
        let (near, far) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        enter = enter.max(near);
        leave = leave.min(far);
    }

    if enter < leave && (0.0..=1.0).contains(&enter) {
        Clip::Enter(enter)
    } else {
        Clip::Miss
    }
}

impl CollisionOracle for BoxWorld {
    fn trace_line(&self, begin: Vec3, end: Vec3, ignore: &[ModelIndex]) -> TraceResult {
        let delta = end - begin;
        let length = delta.length();
        let mut best: Option<f32> = None;

        for brush in &self.brushes {
            if brush.model.is_some_and(|m| ignore.contains(&m)) {
                continue;
            }
            let (mins, maxs) = self.placed_bounds(brush);
            match clip_ray_to_box(begin, delta, mins, maxs) {
                Clip::Miss => {}
                Clip::StartSolid => {
                    return TraceResult {
                        endpos: begin,
                        fraction: 0.0,
                        start_solid: true,
                    };
                }
                Clip::Enter(t) => {
                    if best.is_none_or(|b| t < b) {
                        best = Some(t);
                    }
                }
            }
        }

        match best {
            None => TraceResult::clear(end),
            Some(t) => {
                let backoff = if length > 0.0 { DIST_EPSILON / length } else { 0.0 };
                let fraction = (t - backoff).max(0.0);
                TraceResult {
                    endpos: begin + delta * fraction,
                    fraction,
                    start_solid: false,
                }
            }
        }
    }
}
