//! `thesis` — the reference rescue scenario.
//!
//! A 19×19 disaster area with 100 patients scattered around its centre.
//! Fire fighters start at the centre and search the grid; a hospital and a
//! control tower occupy fixed cells.  Under the Directed and Acknowledged
//! topologies the control tower periodically polls every fire fighter for a
//! location and discovery report.
//!
//! Run with:
//!   cargo run -p thesis --release -- --config demos/thesis/scenario.toml
//!
//! Set `RUST_LOG=sos_sim=debug` to see message routing.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use sos_behavior::{COORDINATOR, FieldKey, Message, Purpose};
use sos_core::{Location, ObservationMode, ScenarioConfig, SosType, Tick};
use sos_output::{CsvWriter, SimOutputObserver};
use sos_sim::{SimObserver, TickSummary, World, WorldBuilder};

#[cfg(test)]
mod tests;

const FIRE_FIGHTER: &str = "FireFighter";

/// Command line arguments.  Flags override values from `--config`.
#[derive(Parser, Debug)]
#[command(name = "thesis")]
#[command(about = "SoS rescue simulation: reference scenario")]
struct Args {
    /// TOML scenario file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command-and-control topology (directed, acknowledged, collaborative)
    #[arg(long)]
    sos_type: Option<SosType>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Number of patients
    #[arg(long)]
    patients: Option<usize>,

    /// Observation range (local, global)
    #[arg(long)]
    observation: Option<ObservationMode>,

    /// Number of fire fighters
    #[arg(long)]
    fire_fighters: Option<usize>,

    /// Directory for CSV output
    #[arg(long, default_value = "output/thesis")]
    output: PathBuf,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ScenarioFile {
    scenario: ScenarioConfig,
    units:    UnitsSection,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
struct UnitsSection {
    fire_fighters: usize,
    poll_interval: u64,
}

impl Default for UnitsSection {
    fn default() -> Self {
        Self { fire_fighters: 5, poll_interval: 5 }
    }
}

fn load_scenario(path: Option<&Path>) -> Result<ScenarioFile> {
    let Some(path) = path else {
        return Ok(ScenarioFile::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
}

// ── Progress reporting ────────────────────────────────────────────────────────

/// Wraps the CSV observer and logs discovery progress.
struct ProgressObserver<O: SimObserver> {
    inner:      O,
    discovered: u32,
}

impl<O: SimObserver> SimObserver for ProgressObserver<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        if summary.discovered != self.discovered {
            info!(tick = %summary.tick, discovered = summary.discovered, "progress");
            self.discovered = summary.discovered;
        }
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, snapshot: &sos_sim::Snapshot) {
        self.inner.on_snapshot(snapshot);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

/// Run to the end tick, polling fire fighters every `poll_interval` ticks.
fn run_with_polls<O: SimObserver>(world: &mut World, poll_interval: u64, observer: &mut O) {
    if poll_interval == 0 {
        world.run(observer);
        return;
    }

    let end = world.config().end_tick();
    while world.time() < end {
        if world.time().is_every(poll_interval) {
            let poll = Message::new(COORDINATOR, FIRE_FIGHTER, Purpose::RequestInfo)
                .named("Request location and discovery report")
                .requesting(FieldKey::Location)
                .requesting(FieldKey::Discovered);
            world.send_message(poll);
        }
        world.run_ticks(1, observer);
    }
    observer.on_sim_end(world.time());
}

/// Install the global `fmt` subscriber, `RUST_LOG` overriding `info`.
fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing tracing subscriber")
}

fn main() -> Result<()> {
    init_tracing()?;

    let args = Args::parse();
    let ScenarioFile { scenario: mut config, units } = load_scenario(args.config.as_deref())?;

    if let Some(v) = args.sos_type {
        config.sos_type = v;
    }
    if let Some(v) = args.seed {
        config.seed = v;
    }
    if let Some(v) = args.ticks {
        config.total_ticks = v;
    }
    if let Some(v) = args.patients {
        config.patient_count = v;
    }
    if let Some(v) = args.observation {
        config.observation = v;
    }
    let fire_fighters = args.fire_fighters.unwrap_or(units.fire_fighters);

    println!("=== thesis — SoS rescue simulation ===");
    println!(
        "Grid: {}x{}  |  Patients: {}  |  Topology: {}  |  Seed: {}",
        config.width, config.height, config.patient_count, config.sos_type, config.seed
    );
    println!();

    // 1. Build the world.  Fire fighters start at the centre; the hospital
    //    and control tower sit in opposite corners of the search area.
    let centre = Location::new((config.width / 2) as i32, (config.height / 2) as i32);
    let hospital = Location::new(1, 1);
    let tower = Location::new(config.width as i32 - 2, config.height as i32 - 2);

    let mut world = WorldBuilder::new(config.clone())
        .rescue_units(FIRE_FIGHTER, fire_fighters, centre)
        .facility("Hospital1", hospital)
        .facility(COORDINATOR, tower)
        .build()?;

    // 2. Set up output.
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let writer = CsvWriter::new(&args.output)?;
    let mut obs = ProgressObserver { inner: SimOutputObserver::new(writer), discovered: 0 };

    // 3. Run.
    let t0 = Instant::now();
    let poll_interval = if config.sos_type.rules().requires_acknowledgement {
        units.poll_interval
    } else {
        0
    };
    run_with_polls(&mut world, poll_interval, &mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        return Err(e).context("writing output");
    }

    // 4. Report.
    let snapshot = world.snapshot();
    println!();
    println!("Ran {} ticks in {:.2?}", world.time().0, elapsed);
    println!(
        "Discovered {} / {} patients",
        snapshot.discovered(),
        snapshot.patients.len()
    );
    for unit in snapshot.units.iter().filter(|u| u.name.starts_with(FIRE_FIGHTER)) {
        let at = unit.location.map(|l| l.to_string()).unwrap_or_default();
        println!("  {:<14} at {at:<9} knows of {} patients", unit.name, unit.believed);
    }
    println!("Output written to {}", args.output.display());
    Ok(())
}
