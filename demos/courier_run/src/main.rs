//! courier_run: batch runner for the courier twin.
//!
//! Loads an optional JSON `SimConfig`, applies command-line overrides, runs
//! the simulation headless and prints the run summary as JSON on stdout.
//! Progress goes through `tracing`; set `RUST_LOG=info` (or `debug` for
//! every claim and switch) to see it.
//!
//! ```text
//! cargo run -p courier_run -- --autonomy 3 --ticks 28800 --opportunistic
//! cargo run -p courier_run -- --config experiment.json --replications 10
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ct_core::{AutonomyLevel, Cooperativeness, FadeStrategy, SimConfig, Tick};
use ct_sim::{run_replications, SimBuilder, SimMetrics, SimObserver};

/// Headless courier autonomy / cooperation simulation
#[derive(Parser, Debug)]
#[command(name = "courier_run")]
#[command(about = "Run the courier simulation and print the run summary as JSON")]
struct Args {
    /// JSON file with a (partial) SimConfig; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate (1 tick = 1 simulated second)
    #[arg(long)]
    ticks: Option<u64>,

    /// Autonomy level 0–3
    #[arg(long)]
    autonomy: Option<u8>,

    /// Cooperativeness level 1–3
    #[arg(long)]
    cooperativeness: Option<u8>,

    /// Number of couriers
    #[arg(long)]
    couriers: Option<usize>,

    /// Percent chance of a job arriving per tick
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Memory fade model
    #[arg(long, value_enum)]
    fade: Option<FadeArg>,

    /// Disable reward memory
    #[arg(long)]
    no_memory: bool,

    /// Switch jobs whenever a better one beats the threshold
    #[arg(long)]
    opportunistic: bool,

    /// Run this many seeds (seed, seed+1, ...) and print every summary
    #[arg(long, default_value_t = 1)]
    replications: u64,

    /// Log a status line every N ticks (0 = never)
    #[arg(long, default_value_t = 3_600)]
    progress_every: u64,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FadeArg {
    None,
    Linear,
    Exponential,
    Recency,
}

impl From<FadeArg> for FadeStrategy {
    fn from(arg: FadeArg) -> Self {
        match arg {
            FadeArg::None        => FadeStrategy::None,
            FadeArg::Linear      => FadeStrategy::Linear,
            FadeArg::Exponential => FadeStrategy::Exponential,
            FadeArg::Recency     => FadeStrategy::RecencyWeighted,
        }
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

struct Progress {
    every: u64,
}

impl SimObserver for Progress {
    fn wants_metrics(&self, tick: Tick) -> bool {
        tick.every(self.every)
    }

    fn on_tick_end(&mut self, tick: Tick, metrics: &SimMetrics) {
        let [searching, waiting, moving, on_job] = metrics.status_counts;
        info!(
            %tick,
            block = %metrics.block,
            searching,
            waiting,
            moving,
            on_job,
            open_jobs = metrics.open_jobs,
            on_the_fly = metrics.on_the_fly_jobs,
            memory = metrics.memory_jobs,
            accuracy = ?metrics.prediction_accuracy,
            "progress"
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.total_ticks = ticks;
    }
    if let Some(level) = args.autonomy {
        config.autonomy_level = AutonomyLevel::from_level(level)
            .with_context(|| format!("autonomy level {level} outside 0–3"))?;
    }
    if let Some(level) = args.cooperativeness {
        config.cooperativeness_level = Cooperativeness::from_level(level)
            .with_context(|| format!("cooperativeness level {level} outside 1–3"))?;
    }
    if let Some(n) = args.couriers {
        config.courier_population = n;
    }
    if let Some(rate) = args.arrival_rate {
        config.job_arrival_rate = rate;
    }
    if let Some(fade) = args.fade {
        config.fade_strategy = fade.into();
    }
    if args.no_memory {
        config.use_memory = false;
    }
    if args.opportunistic {
        config.opportunistic_switch = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(label = %config.label(), seed = config.seed, ticks = config.total_ticks, "configuration loaded");

    let t0 = Instant::now();
    if args.replications > 1 {
        let seeds: Vec<u64> = (0..args.replications).map(|i| config.seed.wrapping_add(i)).collect();
        let summaries = run_replications(&config, &seeds)?;
        info!(runs = summaries.len(), secs = t0.elapsed().as_secs_f64(), "replications complete");
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let mut sim = SimBuilder::new(config).build()?;
    sim.run(&mut Progress { every: args.progress_every })?;
    info!(secs = t0.elapsed().as_secs_f64(), "run complete");
    println!("{}", serde_json::to_string_pretty(&sim.summary())?);
    Ok(())
}
