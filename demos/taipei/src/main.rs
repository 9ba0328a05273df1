//! taipei: disaster-aware route planning demo.
//!
//! Generates a synthetic road network over central Taipei, overlays hazard
//! zones, and plans the safest / fastest / balanced routes from Taipei Main
//! Station to Taipei 101.  Routes are written to `output/taipei/`.
//!
//! Run with `--help` for the flags.
//!
//! Set `RUST_LOG=debug` for per-road and per-search detail.

// Lattice generation churns through many small per-node allocations.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use memory_stats::memory_stats;

use hazmap_core::TravelMode;
use hazmap_io::{load_hazard_zones_csv, load_network_spec, save_network_spec, CsvRouteWriter, RouteWriter};
use hazmap_routing::{format_distance, RoutePlanner, VariantRequest};

use network::{default_hazards, taipei_spec, TAIPEI_101, TAIPEI_MAIN_STATION};

/// Instructions printed per route; the CSV always has the full count.
const SHOWN_INSTRUCTIONS: usize = 8;

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

#[derive(Parser)]
#[command(name = "taipei", version, about = "Hazard-aware route planning across central Taipei")]
struct Args {
    /// Network spec JSON; the built-in Taipei preset when absent.
    #[arg(long)]
    spec:          Option<PathBuf>,
    /// Hazard zone CSV (lat,lon,radius_m,level,label); sample zones when absent.
    #[arg(long)]
    hazards:       Option<PathBuf>,
    /// Directory for route_points.csv and route_summaries.csv.
    #[arg(long, default_value = "output/taipei")]
    out:           PathBuf,
    /// Also write the network spec in use to this file.
    #[arg(long)]
    dump_spec:     Option<PathBuf>,
    /// Plan for walking instead of driving.
    #[arg(long)]
    walk:          bool,
    /// Add the hazard penalty to every variant.
    #[arg(long)]
    prefer_safety: bool,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();
    let args = Args::parse();

    println!("=== taipei: hazard-aware routing ===");

    // 1. Network spec.
    let spec = match &args.spec {
        Some(path) => load_network_spec(path).with_context(|| format!("loading {}", path.display()))?,
        None => taipei_spec(),
    };
    if let Some(path) = &args.dump_spec {
        save_network_spec(path, &spec)?;
        println!("Wrote network spec to {}", path.display());
    }

    // 2. Generate.
    let t0 = Instant::now();
    let mut network = spec.generate()?;
    let stats = network.stats();
    println!(
        "Road network: {} nodes, {} segments, {} components, {} isolated ({:.2} s, {:.0} MB)",
        stats.nodes,
        stats.segments,
        stats.components,
        stats.isolated,
        t0.elapsed().as_secs_f64(),
        mem_mb(),
    );

    // 3. Hazards.
    let zones = match &args.hazards {
        Some(path) => load_hazard_zones_csv(path).with_context(|| format!("loading {}", path.display()))?,
        None => default_hazards(),
    };
    let hits = network.apply_hazard_zones(&zones)?;
    println!("Hazards: {} zones covering {hits} nodes", zones.len());
    println!();

    // 4. Plan.
    let request = VariantRequest {
        prefer_safety:   args.prefer_safety,
        prefer_highways: false,
        mode:            if args.walk { TravelMode::Walking } else { TravelMode::Driving },
    };
    let planner = RoutePlanner::new(&network);
    let t0 = Instant::now();
    let variants = planner.plan_variants(TAIPEI_MAIN_STATION, TAIPEI_101, &request)?;
    println!(
        "Taipei Main Station -> Taipei 101 ({}, {:.1} ms)",
        request.mode,
        t0.elapsed().as_secs_f64() * 1e3,
    );
    println!();

    // 5. Report.
    println!("{:<10} {:>10} {:>10} {:>6} {:>6}", "Variant", "Distance", "Time", "Risk", "Steps");
    println!("{}", "-".repeat(46));
    for (name, route) in variants.iter() {
        println!(
            "{:<10} {:>10} {:>6.1} min {:>6.1} {:>6}",
            name,
            format_distance(route.total_distance_m),
            route.total_time_s / 60.0,
            route.risk_score,
            route.instructions.len(),
        );
    }
    for (name, route) in variants.iter() {
        println!();
        println!("[{name}]");
        for text in route.instruction_texts().iter().take(SHOWN_INSTRUCTIONS) {
            println!("  {text}");
        }
        if route.instructions.len() > SHOWN_INSTRUCTIONS {
            println!("  ... {} more", route.instructions.len() - SHOWN_INSTRUCTIONS);
        }
    }

    // 6. Export.
    let out = &args.out;
    std::fs::create_dir_all(out)?;
    let mut writer = CsvRouteWriter::new(out)?;
    for (name, route) in variants.iter() {
        writer.write_route(name, route, &network)?;
    }
    writer.finish()?;
    println!();
    println!("Routes written to {}", out.display());

    Ok(())
}
