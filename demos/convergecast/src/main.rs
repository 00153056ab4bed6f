//! convergecast — schedule and simulate a small sensor field.
//!
//! 1. Builds one frame per routing mode for the "one message per node"
//!    snapshot and prints it slot by slot.
//! 2. Runs the buffer simulator, writing CSV output to
//!    `output/convergecast/`.
//! 3. Repeats the simulation over several seeds and prints the spread.
//!
//! Pass a JSON `SimConfig` path as the first argument to override the
//! built-in parameters; missing fields keep their defaults.

mod network;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wsn_core::{RoutingMode, SimConfig};
use wsn_output::{CsvWriter, SimOutputObserver};
use wsn_routing::one_per_node;
use wsn_schedule::schedule_snapshot;
use wsn_sim::{run_replications, BufferSimBuilder, ReplicationSummary};
use wsn_topology::Topology;

use network::{build_network, NODE_COUNT};

// ── Constants ─────────────────────────────────────────────────────────────────

const ARRIVAL_PROBABILITY: f64 = 0.02;
const NUM_FRAMES:          u64 = 500;
const ADAPTATION:          u64 = 10;
const SEED:                u64 = 42;
const REPLICATIONS:        u64 = 8;
const OUTPUT_DIR:          &str = "output/convergecast";

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig {
            arrival_probability: ARRIVAL_PROBABILITY,
            num_frames:          NUM_FRAMES,
            adaptation:          ADAPTATION,
            routing:             RoutingMode::Balanced,
            seed:                SEED,
            ..SimConfig::default()
        });
    };
    let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
    let config: SimConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {path}"))?;
    info!(path = %path, "loaded config");
    Ok(config)
}

fn print_schedules(topology: &Topology) -> Result<()> {
    let snapshot = one_per_node(topology.node_count());
    for mode in [RoutingMode::Unbalanced, RoutingMode::Balanced] {
        let mut t = topology.clone();
        let report = schedule_snapshot(&mut t, mode, &snapshot)?;
        if !report.frame.is_interference_free(&t) {
            bail!("{mode} frame has conflicting transmissions");
        }
        println!(
            "{:<10} {} slots, {} transmissions, {} delivered",
            mode.as_str(),
            report.frame.len(),
            report.frame.transmission_count(),
            report.total_delivered(),
        );
        for (i, slot) in report.frame.iter().enumerate() {
            let txs: Vec<String> = slot.iter().map(ToString::to_string).collect();
            println!("  slot {i:>2}: {}", txs.join("  "));
        }
    }
    println!();
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,convergecast=info,wsn_sim=info")),
        )
        .init();

    let config = load_config()?;
    config.validate()?;

    println!("=== convergecast ===");
    println!(
        "Nodes: {NODE_COUNT}  |  p: {}  |  Frames: {}  |  Adapt every: {}  |  Routing: {}",
        config.arrival_probability, config.num_frames, config.adaptation, config.routing
    );
    println!();

    // 1. Network and single-shot schedules.
    let topology = build_network()?;
    println!("Sensor field: {} nodes, {} links", topology.node_count(), topology.edge_count());
    print_schedules(&topology)?;

    // 2. Simulation with CSV output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = SimOutputObserver::new(writer);
    let mut sim = BufferSimBuilder::new(config.clone(), topology.clone()).build()?;

    let t0 = Instant::now();
    let report = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  mean occupancy     : {:.3}", report.mean_occupancy);
    println!("  delivered / arrived: {} / {}", report.delivered, report.arrived);
    println!("  idle transmissions : {}", report.idle_transmissions);
    println!("  adaptations        : {}", report.adaptations);
    println!("  output             : {OUTPUT_DIR}/");
    println!();

    println!("{:<6} {:>14}", "Node", "Mean buffered");
    println!("{}", "-".repeat(21));
    for (node, mean) in report.per_node_mean.iter().enumerate().skip(1) {
        println!("{node:<6} {mean:>14.3}");
    }
    println!();

    // 3. Replications.
    let seeds: Vec<u64> = (0..REPLICATIONS).map(|i| config.seed.wrapping_add(i)).collect();
    let reports = run_replications(&config, &topology, &seeds)?;
    let summary = ReplicationSummary::from_reports(&reports);
    println!(
        "{} replications: mean occupancy {:.3} ± {:.3}",
        summary.runs, summary.mean, summary.std_dev
    );

    Ok(())
}
