//! Independent replications of one configuration.

use tracing::info;

use ct_core::SimConfig;

use crate::{NoopObserver, RunSummary, SimBuilder, SimResult};

/// Build and run one simulation per seed; summaries come back in seed order.
///
/// With the `parallel` feature the runs share Rayon's thread pool.  Each run
/// is still single-threaded and fully determined by its seed.
pub fn run_replications(config: &SimConfig, seeds: &[u64]) -> SimResult<Vec<RunSummary>> {
    info!(label = %config.label(), replications = seeds.len(), "running replications");

    let run_one = |&seed: &u64| -> SimResult<RunSummary> {
        let mut sim = SimBuilder::new(SimConfig { seed, ..config.clone() }).build()?;
        sim.run(&mut NoopObserver)?;
        Ok(sim.summary())
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        seeds.par_iter().map(run_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(run_one).collect()
    }
}
