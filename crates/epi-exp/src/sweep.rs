use std::path::Path;

use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::{derive_substream_seed, Label, RngHandle};
use epi_engine::{ContagionParams, Evolution, EvolutionRecord};
use epi_graph::Graph;
use epi_store::ArtifactStore;
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::plan::SweepPlan;

/// Outcome of one run inside a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepJobReport {
    pub index: usize,
    pub probability: f64,
    pub repeat: usize,
    pub seed: u64,
    pub evolution_uid: String,
    pub rounds: usize,
    pub ever_infected: usize,
    pub peak_infectious: usize,
    #[serde(default)]
    pub truncated: bool,
}

/// Aggregate sweep report, jobs ordered by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub graph_uid: String,
    pub master_seed: u64,
    pub parallelism: usize,
    pub jobs: Vec<SweepJobReport>,
}

struct Job {
    index: usize,
    repeat: usize,
    params: ContagionParams,
    seed: u64,
}

/// Runs every (probability, repeat) job of the plan and stores one evolution
/// artifact per job under `store_dir`.
///
/// Jobs are independent: each owns its engine and random source, seeded from
/// the master seed and the job index, so results do not depend on
/// `parallelism`.
pub fn sweep(
    graph: &Graph,
    graph_uid: &str,
    seeds: &[Label],
    plan: &SweepPlan,
    store_dir: &Path,
) -> Result<SweepReport, EpiError> {
    let params = plan.params()?;
    let store = ArtifactStore::open(store_dir)?;
    let master_seed = plan
        .master_seed
        .unwrap_or_else(|| RngHandle::from_entropy().next_u64());

    let initial: Vec<Label> = seeds
        .iter()
        .filter(|label| {
            let known = graph.contains(label);
            if !known {
                warn!(label = %label, "initial label is not a graph node, ignoring");
            }
            known
        })
        .cloned()
        .collect();

    let jobs: Vec<Job> = params
        .iter()
        .flat_map(|params| (0..plan.repeats).map(move |repeat| (*params, repeat)))
        .enumerate()
        .map(|(index, (params, repeat))| Job {
            index,
            repeat,
            params,
            seed: derive_substream_seed(master_seed, index as u64),
        })
        .collect();
    info!(
        jobs = jobs.len(),
        master_seed,
        parallelism = plan.parallelism,
        "starting sweep"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(plan.parallelism.max(1))
        .build()
        .map_err(|err| EpiError::Io(ErrorInfo::new("thread-pool", err.to_string())))?;

    let results: Result<Vec<SweepJobReport>, EpiError> = pool.install(|| {
        jobs.par_iter()
            .map(|job| run_job(graph, graph_uid, &initial, plan, &store, job))
            .collect()
    });
    let mut jobs = results?;
    jobs.sort_by_key(|job| job.index);

    Ok(SweepReport {
        graph_uid: graph_uid.to_string(),
        master_seed,
        parallelism: plan.parallelism.max(1),
        jobs,
    })
}

fn run_job(
    graph: &Graph,
    graph_uid: &str,
    initial: &[Label],
    plan: &SweepPlan,
    store: &ArtifactStore,
    job: &Job,
) -> Result<SweepJobReport, EpiError> {
    let mut evolution = Evolution::new(
        graph,
        initial.iter().cloned(),
        job.params,
        RngHandle::from_seed(job.seed),
    )?;
    let outcome = evolution.run_bounded(plan.max_rounds)?;
    if outcome.truncated {
        warn!(
            job = job.index,
            rounds = outcome.rounds,
            "round ceiling reached with infectious nodes left"
        );
    }

    let trace = evolution.trace();
    let ever_infected = trace.ever_infected().len();
    let peak_infectious = trace.peak_infectious();
    let bytes = EvolutionRecord::from_evolution(&evolution)
        .with_graph_uid(graph_uid)
        .with_seed(Some(job.seed))
        .with_truncated(outcome.truncated)
        .to_json_bytes()?;
    let evolution_uid = store.save_evolution(graph_uid, &bytes)?;
    debug!(
        job = job.index,
        probability = job.params.contagion_probability,
        rounds = outcome.rounds,
        ever_infected,
        "job finished"
    );
    info!(uid = %evolution_uid, "evolution saved");

    Ok(SweepJobReport {
        index: job.index,
        probability: job.params.contagion_probability,
        repeat: job.repeat,
        seed: job.seed,
        evolution_uid,
        rounds: outcome.rounds,
        ever_infected,
        peak_infectious,
        truncated: outcome.truncated,
    })
}
