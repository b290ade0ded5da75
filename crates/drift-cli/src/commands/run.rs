//! Run command: headless simulation with a summary or per-frame JSON

use super::{load_config, make_rng, RngKind};
use crate::json::JsonRenderer;
use anyhow::{Context, Result};
use drift_core::FrameDigest;
use drift_polygons::PolygonOrchestrator;
use std::io::{self, Write};
use std::time::Instant;

pub struct RunArgs {
    pub config: Option<String>,
    pub steps: Option<u64>,
    pub seed: Option<u64>,
    pub rng: RngKind,
    pub format: String,
    pub digest: bool,
}

/// Running totals reported at the end of a text run
#[derive(Default)]
struct RunStats {
    peak_polygons: usize,
    peak_particles: usize,
    hull_vertices: u64,
    hulls: u64,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let steps = args.steps.unwrap_or(config.steps);
    let seed = args.seed.unwrap_or(config.seed);

    let mut rng = make_rng(args.rng, seed);
    let mut orchestrator =
        PolygonOrchestrator::new(&config).context("Failed to build the simulation")?;
    let mut digest = args.digest.then(FrameDigest::builder);
    let mut json = (args.format == "json").then(JsonRenderer::default);
    let mut stats = RunStats::default();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let started = Instant::now();

    for _ in 0..steps {
        orchestrator.step(rng.as_mut())?;

        if let Some(builder) = digest.as_mut() {
            orchestrator.digest_frame(builder);
        }

        if let Some(renderer) = json.as_mut() {
            orchestrator.render(renderer);
            if let Some(frame) = renderer.take_frame() {
                serde_json::to_writer(&mut out, &frame)?;
                writeln!(out)?;
            }
        }

        stats.peak_polygons = stats.peak_polygons.max(orchestrator.polygon_count());
        stats.peak_particles = stats.peak_particles.max(orchestrator.total_particles());
        for polygon in orchestrator.polygons() {
            stats.hull_vertices += polygon.hull().len() as u64;
            stats.hulls += 1;
        }
    }

    log::info!(
        "{} step(s) in {:.2?} (seed {}, {:?})",
        steps,
        started.elapsed(),
        seed,
        args.rng
    );

    if json.is_none() {
        writeln!(out, "Steps:            {}", orchestrator.frame())?;
        writeln!(out, "Live polygons:    {}", orchestrator.polygon_count())?;
        writeln!(out, "Live particles:   {}", orchestrator.total_particles())?;
        writeln!(out, "Peak polygons:    {}", stats.peak_polygons)?;
        writeln!(out, "Peak particles:   {}", stats.peak_particles)?;
        if stats.hulls > 0 {
            writeln!(
                out,
                "Mean hull size:   {:.2}",
                stats.hull_vertices as f64 / stats.hulls as f64
            )?;
        }
        let focus = orchestrator.focus();
        writeln!(out, "Focus:            ({:.1}, {:.1})", focus.x, focus.y)?;
    }

    if let Some(builder) = digest {
        writeln!(out, "Digest:           {}", builder.finish().to_prefixed_hex())?;
    }

    Ok(())
}
