//! Drift CLI - run, watch and inspect the particle hull simulation

mod ascii;
mod clock;
mod commands;
mod json;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{hull, init, run, watch, RngKind};

#[derive(Parser)]
#[command(name = "drift")]
#[command(about = "Random-walk particle clouds wrapped in convex hulls", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Output path
        #[arg(default_value = "drift.toml")]
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run the simulation headless
    Run {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<String>,

        /// Number of steps (overrides the config)
        #[arg(long)]
        steps: Option<u64>,

        /// Random seed (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        /// Random generator
        #[arg(long, value_enum, default_value = "xorshift")]
        rng: RngKind,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Print a SHA-256 digest of every frame's positions and hulls
        #[arg(long)]
        digest: bool,
    },

    /// Animate the simulation in the terminal
    Watch {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<String>,

        /// Steps per second
        #[arg(long, default_value = "30")]
        fps: f64,

        /// Grid width in characters
        #[arg(long, default_value = "100")]
        width: usize,

        /// Grid height in characters
        #[arg(long, default_value = "40")]
        height: usize,

        /// Stop after this many steps (runs until interrupted otherwise)
        #[arg(long)]
        steps: Option<u64>,

        /// Random seed (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compute the convex hull of a point set
    Hull {
        /// Points as x,y pairs
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        points: Vec<[f32; 2]>,

        /// Read points from a JSON file of [x, y] pairs
        #[arg(long)]
        file: Option<String>,

        /// Squared merge distance for near-duplicate points
        #[arg(long, default_value = "4.0")]
        epsilon_sq: f32,

        /// Emit the hull clockwise instead of counter-clockwise
        #[arg(long)]
        clockwise: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn parse_point(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok([x, y])
}

/// Log level selected by the `-v` count and `--quiet`; `-v` wins over `--quiet`
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    match verbose {
        0 if quiet => log::LevelFilter::Error,
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, refines or overrides the flag-derived level
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),
        Commands::Run {
            config,
            steps,
            seed,
            rng,
            format,
            digest,
        } => run::run(run::RunArgs {
            config,
            steps,
            seed,
            rng,
            format,
            digest,
        }),
        Commands::Watch {
            config,
            fps,
            width,
            height,
            steps,
            seed,
        } => watch::run(watch::WatchArgs {
            config,
            fps,
            width,
            height,
            steps,
            seed,
        }),
        Commands::Hull {
            points,
            file,
            epsilon_sq,
            clockwise,
            format,
        } => hull::run(hull::HullArgs {
            points,
            file,
            epsilon_sq,
            clockwise,
            format,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_pairs() {
        assert_eq!(parse_point("1.5, -2").unwrap(), [1.5, -2.0]);
        assert!(parse_point("1,2,3").is_err());
        assert!(parse_point("a,2").is_err());
    }

    #[test]
    fn verbosity_maps_to_log_level() {
        use log::LevelFilter;
        assert_eq!(log_level(0, false), LevelFilter::Warn);
        assert_eq!(log_level(0, true), LevelFilter::Error);
        assert_eq!(log_level(1, false), LevelFilter::Info);
        assert_eq!(log_level(2, true), LevelFilter::Debug);
        assert_eq!(log_level(3, false), LevelFilter::Trace);
        assert_eq!(log_level(9, false), LevelFilter::Trace);
    }

    #[test]
    fn verbose_flag_counts_before_and_after_the_command() {
        let cli = Cli::try_parse_from(["drift", "-v", "run", "-v", "--steps", "1"]).unwrap();
        assert_eq!(log_level(cli.verbose, cli.quiet), log::LevelFilter::Debug);
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "drift", "-vv", "run", "--steps", "10", "--rng", "std", "--format", "json", "--digest",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                steps,
                rng,
                format,
                digest,
                ..
            } => {
                assert_eq!(steps, Some(10));
                assert_eq!(rng, RngKind::Std);
                assert_eq!(format, "json");
                assert!(digest);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn cli_parses_negative_hull_points() {
        let cli = Cli::try_parse_from(["drift", "hull", "0,0", "-4,2", "3,-1"]).unwrap();
        match cli.command {
            Commands::Hull { points, .. } => {
                assert_eq!(points, vec![[0.0, 0.0], [-4.0, 2.0], [3.0, -1.0]]);
            }
            _ => panic!("expected hull command"),
        }
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["drift", "run", "--format", "xml"]).is_err());
    }
}
