//! westwood — plan one delivery round over a small street grid.
//!
//! Usage:
//!
//! ```text
//! westwood [MAP_FILE] [MANIFEST_FILE] [CONFIG_JSON]
//! ```
//!
//! Without arguments the bundled 4×4 Westwood grid and manifest in `data/`
//! are used.  The optional JSON config may set any subset of
//! `PlannerConfig` fields, e.g. `{"annealing": {"seed": 7}}`.
//!
//! The round is planned with several seeds at once (`plan_batch`) and the
//! shortest plan is printed.  Set `RUST_LOG=debug` for per-leg routing
//! events.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use dp_core::{DeliveryRequest, PlannerConfig};
use dp_planner::{DeliveryManifest, DeliveryPlan, DeliveryPlanner, load_manifest_file, load_manifest_reader};
use dp_spatial::{StreetMap, load_map_file, load_map_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const BUNDLED_MAP:      &str  = include_str!("../data/mapdata.txt");
const BUNDLED_MANIFEST: &str  = include_str!("../data/deliveries.txt");
const SEEDS_TRIED:      usize = 4;

// ── Inputs ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&String>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {path}"))?;
    let config: PlannerConfig =
        serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path}"))?;
    config.validate()?;
    Ok(config)
}

fn load_map(path: Option<&String>, config: &PlannerConfig) -> Result<StreetMap> {
    let map = match path {
        Some(p) => load_map_file(Path::new(p), config.index).with_context(|| format!("loading map {p}"))?,
        None => load_map_reader(BUNDLED_MAP.as_bytes(), config.index)?,
    };
    Ok(map)
}

fn load_manifest(path: Option<&String>) -> Result<DeliveryManifest> {
    let manifest = match path {
        Some(p) => load_manifest_file(Path::new(p)).with_context(|| format!("loading manifest {p}"))?,
        None => load_manifest_reader(BUNDLED_MANIFEST.as_bytes())?,
    };
    Ok(manifest)
}

/// Move deliveries that miss every map node onto the closest one.
fn snap_to_map(map: &StreetMap, requests: &mut [DeliveryRequest]) {
    for req in requests.iter_mut() {
        if map.contains(&req.location) {
            continue;
        }
        if let Some(near) = map.nearest_coord(req.location.lat, req.location.lon) {
            tracing::warn!(item = %req.item, from = %req.location, to = %near, "delivery snapped to nearest map node");
            req.location = near.clone();
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() > 3 {
        bail!("usage: westwood [MAP_FILE] [MANIFEST_FILE] [CONFIG_JSON]");
    }

    // 1. Configuration and inputs.
    let config = load_config(args.get(2))?;
    let map = load_map(args.first(), &config)?;
    let mut manifest = load_manifest(args.get(1))?;
    snap_to_map(&map, &mut manifest.requests);

    println!("=== westwood — delivery planner ===");
    println!(
        "Map: {} intersections, {} directed segments  |  Deliveries: {}",
        map.node_count(),
        map.segment_count(),
        manifest.requests.len()
    );
    println!();

    // 2. Plan the same round under several seeds.
    let planner = DeliveryPlanner::new(&map).annealing(config.annealing)?;
    let job = manifest.into_job();
    let jobs = vec![job; SEEDS_TRIED];

    let t0 = Instant::now();
    let plans = planner.plan_batch(&jobs);
    let elapsed = t0.elapsed();

    let mut best: Option<DeliveryPlan> = None;
    for (i, plan) in plans.into_iter().enumerate() {
        let plan = plan.with_context(|| format!("planning attempt {i}"))?;
        println!("  attempt {i}: {:.2} road miles", plan.total_miles);
        if best.as_ref().is_none_or(|b| plan.total_miles < b.total_miles) {
            best = Some(plan);
        }
    }
    let Some(plan) = best else {
        bail!("no plans produced");
    };
    println!("Planned {SEEDS_TRIED} attempts in {:.3} s", elapsed.as_secs_f64());
    println!();

    // 3. Commands.
    for (i, cmd) in plan.commands.iter().enumerate() {
        println!("{:>3}. {cmd}", i + 1);
    }
    println!();

    // 4. Summary.
    println!("Crow-fly tour before optimizing : {:.2} miles", plan.original_crow_miles);
    println!("Crow-fly tour after optimizing  : {:.2} miles", plan.optimized_crow_miles);
    println!("Road miles travelled            : {:.2} miles", plan.total_miles);

    Ok(())
}
