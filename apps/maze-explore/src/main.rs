//! maze-explore: run a robot swarm over a maze and report what it mapped.
//!
//! ```text
//! maze-explore --robots 3 --xsize 8 --ysize 8 --seed 7 --output-dir output/run
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sw_core::SwarmConfig;
use sw_map::Maze;
use sw_master::{NoopObserver, SwarmBuilder, SwarmReport};
use sw_output::{CsvWriter, OutputObserver};
use sw_robot::RobotOptions;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of robots
    #[arg(short, long, default_value_t = 1)]
    robots: usize,

    /// Maze width in cells
    #[arg(short = 'x', long, default_value_t = 4)]
    xsize: u32,

    /// Maze height in cells
    #[arg(short = 'y', long, default_value_t = 4)]
    ysize: u32,

    /// Seed for maze generation and start placement
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Explore a maze with no interior walls
    #[arg(long, conflicts_with = "maze_file")]
    open: bool,

    /// Load the maze from a rendered text file instead of generating one.
    /// Its size must match --xsize and --ysize.
    #[arg(long)]
    maze_file: Option<PathBuf>,

    /// Robots skip reservations and map everything themselves
    #[arg(long)]
    uninformed: bool,

    /// Robots ask before stepping onto a cell another robot may occupy
    #[arg(long)]
    collision_checks: bool,

    /// Pause before every move, in milliseconds
    #[arg(long)]
    step_delay_ms: Option<u64>,

    /// Give up on a coordinator reply after this many milliseconds
    #[arg(long)]
    reply_timeout_ms: Option<u64>,

    /// Directory for map_updates.csv and run_summary.csv
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log the rendered global map after every update
    #[arg(long)]
    render: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log)?;

    let maze = match &args.maze_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read maze file {}", path.display()))?;
            Some(Maze::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?)
        }
        None if args.open => Some(Maze::open(args.xsize, args.ysize)),
        None => None,
    };
    let (xsize, ysize) = (args.xsize, args.ysize);

    let config = SwarmConfig {
        maze_xsize:         xsize,
        maze_ysize:         ysize,
        swarm_size:         args.robots,
        seed:               args.seed,
        render_map_updates: args.render,
        reply_timeout:      args.reply_timeout_ms.map(Duration::from_millis),
    };

    let mut options = if args.uninformed { RobotOptions::uninformed() } else { RobotOptions::informed() };
    if args.collision_checks {
        options = options.with_collision_checks();
    }
    if let Some(ms) = args.step_delay_ms {
        options = options.with_step_delay(Duration::from_millis(ms));
    }

    let mut builder = SwarmBuilder::new(config).robot_options(options);
    if let Some(maze) = maze {
        builder = builder.maze(maze);
    }
    let swarm = builder.build()?;

    println!("=== maze-explore ===");
    println!("Robots: {}  |  Maze: {xsize}x{ysize}  |  Seed: {}", args.robots, args.seed);
    println!("{}", swarm.maze());
    let starts: Vec<String> = swarm.starts().iter().map(ToString::to_string).collect();
    println!("Starts: {}", starts.join(" "));
    println!();

    let t0 = Instant::now();
    let report = match &args.output_dir {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("failed to open output in {}", dir.display()))?;
            let mut obs = OutputObserver::new(writer);
            let report = swarm.run(&mut obs)?;
            if let Some(e) = obs.take_error() {
                eprintln!("output error: {e}");
            }
            println!("  map_updates.csv : {} rows", obs.rows_written());
            report
        }
        None => swarm.run(&mut NoopObserver)?,
    };
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "run complete");

    print_report(&report);
    Ok(())
}

fn print_report(report: &SwarmReport) {
    let m = &report.master;
    println!();
    println!("{}", m.final_map);
    println!(
        "Explored {}/{} cells in {:.3} s ({} requests)",
        m.cells_explored,
        m.cells_total,
        m.elapsed.as_secs_f64(),
        m.requests
    );
    println!();

    println!(
        "{:<8} {:<10} {:>8} {:>7} {:>8} {:>9} {:>7} {:>8}",
        "Robot", "Final", "Scanned", "Moves", "Blocked", "Reserved", "Denied", "Submaps"
    );
    println!("{}", "-".repeat(72));
    for r in &report.robots {
        println!(
            "{:<8} {:<10} {:>8} {:>7} {:>8} {:>9} {:>7} {:>8}",
            r.id.0,
            r.final_position.to_string(),
            r.cells_scanned,
            r.moves,
            r.moves_blocked,
            r.reservations_granted,
            r.reservations_denied,
            r.submaps_merged,
        );
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();

    Ok(())
}
