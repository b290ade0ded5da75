//! Watch command: animate the simulation in the terminal

use super::{load_config, make_rng, RngKind};
use crate::ascii::AsciiRenderer;
use crate::clock::FrameClock;
use anyhow::{Context, Result};
use drift_polygons::PolygonOrchestrator;
use std::io::{self, Write};
use std::thread;

pub struct WatchArgs {
    pub config: Option<String>,
    pub fps: f64,
    pub width: usize,
    pub height: usize,
    pub steps: Option<u64>,
    pub seed: Option<u64>,
}

pub fn run(args: WatchArgs) -> Result<()> {
    if !(args.fps > 0.0) {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or(config.seed);
    let mut rng = make_rng(RngKind::Xorshift, seed);
    let mut orchestrator =
        PolygonOrchestrator::new(&config).context("Failed to build the simulation")?;

    // Fit the reaction disc across the grid width
    let scale = config.polygons.react_radius * 2.2 / args.width.max(1) as f32;
    let mut renderer = AsciiRenderer::new(args.width, args.height, scale);
    let mut clock = FrameClock::with_rate(args.fps);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        clock.tick();

        let mut stepped = false;
        while clock.should_step() {
            if args.steps.is_some_and(|limit| orchestrator.frame() >= limit) {
                return Ok(());
            }
            orchestrator.step(rng.as_mut())?;
            clock.consume_step();
            stepped = true;
        }

        if stepped {
            orchestrator.render(&mut renderer);
            write!(out, "\x1b[2J\x1b[H{}", renderer.frame_text())?;
            writeln!(
                out,
                "step {}  polygons {}  particles {}",
                orchestrator.frame(),
                orchestrator.polygon_count(),
                orchestrator.total_particles()
            )?;
            out.flush()?;
        }

        thread::sleep(clock.until_next_step());
    }
}
