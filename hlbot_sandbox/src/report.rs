// JSON summary of a sandbox run.
//
// Carries the same read-only telemetry the client exposes for its debug
// overlay (graph snapshot, current chain, move target, mode flag) plus a few
// run statistics.

use glam::Vec3;
use hlbot_nav::area::GraphSnapshot;
use hlbot_nav::bot::Bot;
use hlbot_nav::types::AreaId;
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct RunStats {
    pub ticks: u32,
    pub jumps: u32,
    pub ducked_ticks: u32,
    pub distance_travelled: f32,
    pub targets_reached: u32,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub level: String,
    pub seed: u64,
    pub use_nav_movement: bool,
    pub final_foot: Vec3,
    pub move_target: Option<Vec3>,
    pub nav_chain: Vec<AreaId>,
    pub stats: RunStats,
    pub area_count: usize,
    pub explored: usize,
    pub unexplored: usize,
    pub border: usize,
    pub graph: GraphSnapshot,
}

impl Report {
    pub fn collect(level: String, seed: u64, bot: &Bot, final_foot: Vec3, stats: RunStats) -> Self {
        let graph = bot.snapshot();
        Self {
            level,
            seed,
            use_nav_movement: bot.use_nav_movement(),
            final_foot,
            move_target: bot.move_target(),
            nav_chain: bot.nav_chain().iter().copied().collect(),
            stats,
            area_count: graph.areas.len(),
            explored: graph.explored_count(),
            unexplored: graph.unexplored_count(),
            border: graph.border_count(),
            graph,
        }
    }
}
