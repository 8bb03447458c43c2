// hlbot_nav: navigation core for a game-client bot.
//
// This crate lets one autonomous agent find its way around a level it has
// never seen. It maps traversable space online from live ray casts, plans
// routes across that map, and turns routes into per-tick movement commands.
// It has no engine, network, or rendering dependencies. The level geometry
// is reached only through the `CollisionOracle` trait, so everything can be
// tested, benchmarked, and run headless against the bundled `BoxWorld`.
//
// Module overview:
// - `bot.rs`:         Behavior arbiter, the per-tick `think()` entry point and read-only introspection.
// - `area.rs`:        Area graph: cells with a fixed four-slot neighbour table, eviction, snapshots.
// - `builder.rs`:     Incremental mesh builder (flood fill from the agent, bounded work per tick).
// - `pathfinding.rs`: A* over the area graph with the connectivity penalty.
// - `movement.rs`:    Direct seek, vertical obstacles, corner sliding, path following, jump latch.
// - `trace.rs`:       `CollisionOracle` contract plus ground/roof probes.
// - `brush.rs`:       `BoxWorld`, an axis-aligned brush level implementing the oracle.
// - `body.rs`:        Toy kinematic body that integrates `UserCmd`s for headless runs.
// - `world.rs`:       Agent and entity state consumed each tick.
// - `command.rs`:     `UserCmd` and `Buttons`, the outgoing per-tick command.
// - `config.rs`:      `NavConfig` and its parameter groups, JSON loading.
// - `error.rs`:       `ConfigError`.
// - `types.rs`:       `Direction`, `AreaId`, `Status`, planar helpers.
//
// **Critical constraint: bounded ticks.** Nothing here blocks or loops
// without bound inside one call. Long operations (mesh building, path
// following) are resumable cursors returning `Status::Processing` until they
// are done. Areas live in a `BTreeMap` so iteration, and therefore every
// decision, is deterministic for a given sequence of trace results.

pub mod area;
pub mod body;
pub mod bot;
pub mod brush;
pub mod builder;
pub mod command;
pub mod config;
pub mod error;
pub mod movement;
pub mod pathfinding;
pub mod trace;
pub mod types;
pub mod world;
