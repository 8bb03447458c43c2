// CLI entry point for the hlbot navigation sandbox.
//
// Runs one bot headless in a box level. Every tick the bot thinks against the
// level's `BoxWorld`, a `KinematicBody` integrates the command it produced,
// and the body's new state is fed back on the next tick, the way the real
// client would get it from the server. At the end a JSON report (graph
// snapshot, chain, target, run statistics) goes to stdout or `--out`.
//
// Usage:
//   hlbot-sandbox [OPTIONS]
//     --config <PATH>       NavConfig JSON (default: built-in defaults)
//     --level <KIND>        corridor | room | pillars | step (default: room)
//     --ticks <N>           Ticks to simulate, 16 ms each (default: 1000)
//     --seed <N>            Seed for random levels and players (default: 1)
//     --target <X,Y,Z>      Custom move target (default: explore)
//     --direct              Steer straight at the target instead of pathing
//     --players <N>         Scripted players pacing around the level (default: 0)
//     --out <PATH>          Write the report here instead of stdout
//
// Logging goes through `tracing`; set `RUST_LOG=hlbot_nav=debug` to watch
// the mesh grow.

mod error;
mod level;
mod report;

use std::path::PathBuf;
use std::time::Duration;

use error::SandboxError;
use glam::Vec3;
use hlbot_nav::body::KinematicBody;
use hlbot_nav::bot::Bot;
use hlbot_nav::command::{Buttons, UserCmd};
use hlbot_nav::config::NavConfig;
use hlbot_nav::world::WorldView;
use level::LevelKind;
use rand::SeedableRng;
use rand::rngs::StdRng;
use report::{Report, RunStats};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const TICK: Duration = Duration::from_millis(16);

struct Args {
    config: Option<PathBuf>,
    level: LevelKind,
    ticks: u32,
    seed: u64,
    target: Option<Vec3>,
    direct: bool,
    players: u32,
    out: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            level: LevelKind::Room,
            ticks: 1000,
            seed: 1,
            target: None,
            direct: false,
            players: 0,
            out: None,
        }
    }
}

fn main() {
    let args = parse_args();
    if let Err(e) = init_tracing().and_then(|()| run(&args)) {
        eprintln!("hlbot-sandbox: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<(), SandboxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(args: &Args) -> Result<(), SandboxError> {
    let config = match &args.config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut level = level::build(args.level, &mut rng);
    let players = level.scripted_players(args.players, &mut rng);
    info!(level = %level.kind, seed = args.seed, ticks = args.ticks, "starting run");

    let mut bot = Bot::new(config.clone());
    if args.direct {
        bot.set_use_nav_movement(false);
    }
    bot.set_move_target(args.target);
    let mut body = KinematicBody::new(level.spawn, &config.hull);

    let mut stats = RunStats::default();
    let mut had_target = bot.move_target().is_some();
    for tick in 0..args.ticks {
        let now = TICK * tick;
        level.update_doors(tick);

        let mut view = WorldView::new(body.state.clone());
        view.ignore_models = level.ignore_models(tick);
        view.entities = players
            .iter()
            .map(|p| p.entity_at(now.as_secs_f32()))
            .collect();

        let mut cmd = UserCmd::default();
        bot.think(now, &view, &level.world, &mut cmd);
        if cmd.buttons.contains(Buttons::JUMP) {
            stats.jumps += 1;
        }
        if cmd.buttons.contains(Buttons::DUCK) {
            stats.ducked_ticks += 1;
        }

        let before = body.foot(&config.hull);
        body.step(&level.world, &cmd, &config.hull, &view.ignore_models);
        stats.distance_travelled += before.distance(body.foot(&config.hull));
        stats.ticks += 1;

        let has_target = bot.move_target().is_some();
        if had_target && !has_target {
            stats.targets_reached += 1;
        }
        had_target = has_target;

        if tick % 100 == 0 {
            debug!(
                tick,
                areas = bot.graph().len(),
                chain = bot.nav_chain().len(),
                foot = ?body.foot(&config.hull),
                "progress"
            );
        }
    }

    let report = Report::collect(
        level.kind.to_string(),
        args.seed,
        &bot,
        body.foot(&config.hull),
        stats,
    );
    info!(
        areas = report.area_count,
        explored = report.explored,
        border = report.border,
        jumps = report.stats.jumps,
        reached = report.stats.targets_reached,
        "run finished"
    );

    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> Args {
    let mut args = Args::default();
    let argv: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < argv.len() {
        match argv[i].as_str() {
            "--config" => {
                i += 1;
                args.config = Some(PathBuf::from(value(&argv, i, "--config")));
            }
            "--level" => {
                i += 1;
                args.level = value(&argv, i, "--level").parse().unwrap_or_else(|e: String| fail(&e));
            }
            "--ticks" => {
                i += 1;
                args.ticks = value(&argv, i, "--ticks")
                    .parse()
                    .unwrap_or_else(|_| fail("--ticks requires a number"));
            }
            "--seed" => {
                i += 1;
                args.seed = value(&argv, i, "--seed")
                    .parse()
                    .unwrap_or_else(|_| fail("--seed requires a number"));
            }
            "--target" => {
                i += 1;
                let text = value(&argv, i, "--target");
                args.target = Some(
                    parse_vec3(text).unwrap_or_else(|| fail("--target requires x,y,z")),
                );
            }
            "--direct" => args.direct = true,
            "--players" => {
                i += 1;
                args.players = value(&argv, i, "--players")
                    .parse()
                    .unwrap_or_else(|_| fail("--players requires a number"));
            }
            "--out" => {
                i += 1;
                args.out = Some(PathBuf::from(value(&argv, i, "--out")));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: hlbot-sandbox [--config PATH] [--level corridor|room|pillars|step] \
                     [--ticks N] [--seed N] [--target X,Y,Z] [--direct] [--players N] [--out PATH]"
                );
                std::process::exit(0);
            }
            other => fail(&format!("unknown argument: {other}")),
        }
        i += 1;
    }

    args
}

fn value<'a>(argv: &'a [String], i: usize, flag: &str) -> &'a str {
    argv.get(i)
        .map(String::as_str)
        .unwrap_or_else(|| fail(&format!("{flag} requires a value")))
}

fn fail(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn parse_vec3(text: &str) -> Option<Vec3> {
    let parts: Vec<f32> = text
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        &[x, y, z] => Some(Vec3::new(x, y, z)),
        _ => None,
    }
}
