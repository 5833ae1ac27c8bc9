//! beijing — ant K-path search over a 22-station Beijing subway sample.
//!
//! Loads `network.json`, `map.txt`, and `demand.csv` from the data directory,
//! runs one colony per OD pair, prints the K-paths of every pair, and then
//! prints the assigned flow on every loaded link.  Pass `--output <dir>` to
//! also write the CSV tables.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;

use kp_core::ColonyConfig;
use kp_output::report::{flow_line, outcome_lines};
use kp_output::{CsvWriter, RunOutputObserver};
use kp_route::{DemandTable, EdgeFlowTable, OdDemand, load_demand_csv};
use kp_sim::{Driver, IterationStats, LogObserver, OdOutcome, RunObserver};
use kp_world::{GridLayout, TransitNetwork, load_network_config};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding network.json, map.txt and demand.csv
    #[arg(short, long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data"))]
    data_dir: PathBuf,

    /// Override the master seed from network.json
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override iterations per OD pair
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Override ants per OD pair
    #[arg(short, long)]
    ants: Option<usize>,

    /// Only solve these pairs, written as ORIGIN-DEST (repeatable)
    #[arg(long = "od", value_name = "ORIGIN-DEST")]
    pairs: Vec<String>,

    /// Also write kpaths.csv, od_summary.csv and edge_flows.csv here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply(&self, mut params: ColonyConfig) -> ColonyConfig {
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(iterations) = self.iterations {
            params.iterations = iterations;
        }
        if let Some(ants) = self.ants {
            params.ant_count = ants;
        }
        params
    }
}

// ── Console observer ──────────────────────────────────────────────────────────

/// Prints each pair's K-paths as it finishes and forwards every callback to
/// the log observer and, when present, the CSV observer.
struct ConsoleObserver<'a> {
    network: &'a TransitNetwork,
    log:     LogObserver<'a>,
    csv:     Option<RunOutputObserver<'a, CsvWriter>>,
    failed:  usize,
}

impl RunObserver for ConsoleObserver<'_> {
    fn on_od_start(&mut self, index: usize, od: &OdDemand) {
        self.log.on_od_start(index, od);
    }

    fn on_iteration_end(&mut self, od: &OdDemand, stats: &IterationStats) {
        self.log.on_iteration_end(od, stats);
    }

    fn on_od_end(&mut self, outcome: &OdOutcome) {
        for line in outcome_lines(self.network, outcome) {
            println!("{line}");
        }
        if !outcome.found() {
            self.failed += 1;
        }
        self.log.on_od_end(outcome);
        if let Some(csv) = &mut self.csv {
            csv.on_od_end(outcome);
        }
    }

    fn on_run_end(&mut self, flows: &EdgeFlowTable) {
        self.log.on_run_end(flows);
        if let Some(csv) = &mut self.csv {
            csv.on_run_end(flows);
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn select_pairs(demand: &mut DemandTable, network: &TransitNetwork, pairs: &[String]) -> Result<()> {
    if pairs.is_empty() {
        return Ok(());
    }
    let mut keep = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Some((o, d)) = pair.split_once('-') else {
            bail!("--od expects ORIGIN-DEST, got {pair:?}");
        };
        let origin = network.station(o).with_context(|| format!("unknown station {o:?}"))?;
        let destination = network.station(d).with_context(|| format!("unknown station {d:?}"))?;
        if demand.get(origin, destination).is_none() {
            bail!("no demand recorded for {o}-{d}");
        }
        keep.push((origin, destination));
    }
    demand.retain(|od| keep.contains(&(od.origin, od.destination)));
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // 1. Network, parameters, and layout.
    let config = load_network_config(args.data_dir.join("network.json"))
        .with_context(|| format!("loading {}", args.data_dir.join("network.json").display()))?;
    let network = config.network;
    let params = args.apply(config.params);

    let layout = GridLayout::load(args.data_dir.join("map.txt"), ',', &network)
        .context("loading map.txt")?;
    for (a, b) in layout.unreachable_links(&network) {
        log::warn!(
            "link {}-{} joins stations that are not grid neighbors; ants cannot use it",
            network.label(a),
            network.label(b),
        );
    }

    // 2. Demand.
    let mut demand =
        load_demand_csv(args.data_dir.join("demand.csv"), &network).context("loading demand.csv")?;
    select_pairs(&mut demand, &network, &args.pairs)?;

    println!("=== beijing — ant K-path search ===");
    println!(
        "Stations: {}  |  Links: {}  |  Lines: {}  |  OD pairs: {}  |  Passengers: {}",
        network.station_count(),
        network.edge_count(),
        network.lines().len(),
        demand.len(),
        demand.total(),
    );
    println!(
        "Seed: {}  |  Iterations: {}  |  Ants: {}",
        params.seed, params.iterations, params.ant_count
    );
    println!();

    // 3. Observers.
    let csv = match &args.output {
        Some(dir) => Some(RunOutputObserver::new(
            CsvWriter::new(dir).with_context(|| format!("creating {}", dir.display()))?,
            &network,
        )),
        None => None,
    };
    let mut obs = ConsoleObserver { network: &network, log: LogObserver::new(&network), csv, failed: 0 };

    // 4. Run.
    let mut driver = Driver::new(&network, &layout, params)?;
    let t0 = Instant::now();
    let outcomes = driver.run(&demand, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.csv.as_mut().and_then(|c| c.take_error()) {
        return Err(e).context("writing output");
    }

    // 5. Flows.
    println!();
    println!("Edge flows:");
    for (a, b, flow) in driver.flows().iter() {
        if flow > 0.0 {
            println!("{}", flow_line(network.label(a), network.label(b), flow));
        }
    }

    println!();
    println!(
        "Solved {} of {} pairs in {:.3} s",
        outcomes.len() - obs.failed,
        outcomes.len(),
        elapsed.as_secs_f64()
    );
    if let Some(dir) = &args.output {
        println!("Output written to {}", dir.display());
    }

    Ok(())
}
