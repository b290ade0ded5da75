//! Hull command: wrap a point set given on the command line or in a file

use anyhow::{Context, Result};
use drift_core::Vec2;
use drift_hull::{HullConfig, HullEngine, Winding};
use std::fs;

pub struct HullArgs {
    pub points: Vec<[f32; 2]>,
    pub file: Option<String>,
    pub epsilon_sq: f32,
    pub clockwise: bool,
    pub format: String,
}

pub fn run(args: HullArgs) -> Result<()> {
    let mut points: Vec<Vec2> = args.points.iter().copied().map(Vec2::from_array).collect();
    if let Some(path) = &args.file {
        points.extend(read_points(path)?);
    }

    let engine = HullEngine::new(HullConfig {
        epsilon_sq: args.epsilon_sq,
        winding: if args.clockwise {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        },
    })?;
    let hull = engine.compute_hull(&points);
    log::info!("{} input point(s), {} hull vertices", points.len(), hull.len());

    match args.format.as_str() {
        "json" => {
            let pairs: Vec<[f32; 2]> = hull.iter().map(Vec2::to_array).collect();
            println!("{}", serde_json::to_string(&pairs)?);
        }
        _ => {
            for v in &hull {
                println!("{}, {}", v.x, v.y);
            }
        }
    }
    Ok(())
}

fn read_points(path: &str) -> Result<Vec<Vec2>> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))?;
    let pairs: Vec<[f32; 2]> = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a JSON array of [x, y] pairs", path))?;
    Ok(pairs.into_iter().map(Vec2::from_array).collect())
}
