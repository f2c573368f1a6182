//! Square-Root Cut trial orchestrator (§4.E).
//!
//! Ties every other component together: estimates how many Monte-Carlo
//! trials a target success probability requires, picks the low- or
//! high-concurrency execution mode, runs the trials, and folds every
//! worker's candidate into one global minimum.

use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;

use crate::base_case;
use crate::builder::ConcurrencyOverride;
use crate::cluster::{Cluster, CollectiveTimer, map_workers, mix_worker_seed, reduce_min, worker_rng};
use crate::dense_matrix::DenseMatrix;
use crate::edge::EdgeSlice;
use crate::error::{MincutError, Result};
use crate::graph_source::GraphSource;
use crate::iss::Iss;
use crate::memory;
use crate::rc;
use crate::report::{CutReport, Variant};
use crate::trial_config::TrialConfig;

/// The constant named `group_size` in the original LC/HC boundary check
/// (distinct from the dynamically computed HC group size below).
const LC_HC_BOUNDARY_FACTOR: u64 = 2;

/// Lower bound on a single RC execution's success probability, as a function
/// of the intermediate target size (§4.D "RC success-probability rationale":
/// Ω(1/log n)).
#[allow(
    clippy::float_arithmetic,
    reason = "RC success-probability lower bound is inherently floating-point (§4.D)"
)]
fn min_success_in_one_trial(target: u64) -> f64 {
    let t = (target.max(3)) as f64;
    (1.0 / t.ln()).clamp(f64::MIN_POSITIVE, 1.0)
}

/// Computes `T_total` from §4.E's trial-count formula.
#[allow(
    clippy::float_arithmetic,
    reason = "trial-count formula is inherently floating-point (§4.E)"
)]
fn required_trial_count(n: u64, m: u64, target: u64, config: &TrialConfig) -> Result<u64> {
    if n < 2 || m == 0 {
        return Ok(1);
    }

    let c = config.base_case_multiplier();
    let p_base = min_success_in_one_trial(target);
    #[allow(clippy::cast_precision_loss, reason = "graph sizes fit comfortably in f64's mantissa")]
    let numerator = (n as f64) * (n as f64) * (1.0 / (1.0 - config.success_probability())).ln();
    #[allow(clippy::cast_precision_loss, reason = "graph sizes fit comfortably in f64's mantissa")]
    let denominator = c * c * (m as f64) * p_base;

    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(MincutError::TrialCountOverflow {
            vertex_count: n,
            edge_count: m,
            success_probability: config.success_probability().to_string(),
        });
    }

    let total = (numerator / denominator).ceil();
    #[allow(clippy::cast_precision_loss, reason = "bounds check against u64::MAX as f64")]
    if !total.is_finite() || total > u64::MAX as f64 {
        return Err(MincutError::TrialCountOverflow {
            vertex_count: n,
            edge_count: m,
            success_probability: config.success_probability().to_string(),
        });
    }

    #[allow(clippy::cast_possible_truncation, reason = "checked finite and in-range above")]
    Ok((total.max(1.0)) as u64)
}

fn select_variant(processors: usize, trial_count: u64) -> Variant {
    if (processors as u64) < LC_HC_BOUNDARY_FACTOR * trial_count {
        Variant::LowConcurrency
    } else {
        Variant::HighConcurrency
    }
}

/// Largest power of two no greater than `processors / trial_count`, raised to
/// whatever power-of-two group size [`memory::group_size_for_budget`]
/// requires to keep each worker's dense-matrix slice under
/// `max_worker_memory_bytes`, clamped to `[1, processors]` (§4.E "Group size
/// is taken as the largest power of two...", §4.G, §5).
fn hc_group_size(processors: usize, trial_count: u64, vertex_count: u64, max_worker_memory_bytes: u64) -> usize {
    let ratio = (processors as u64) / trial_count.max(1);
    let mut heuristic_size = 1_usize;
    while heuristic_size * 2 <= processors && (heuristic_size as u64) * 2 <= ratio.max(1) {
        heuristic_size *= 2;
    }
    let heuristic_size = heuristic_size.max(1).min(processors.max(1));

    let budget_size = memory::group_size_for_budget(
        vertex_count as usize,
        heuristic_size,
        processors.max(1),
        max_worker_memory_bytes,
    );

    let mut group_size = 1_usize;
    while group_size * 2 <= processors && group_size * 2 <= budget_size {
        group_size *= 2;
    }
    group_size.max(1).min(processors.max(1))
}

fn run_low_concurrency(
    source: &dyn GraphSource,
    processors: usize,
    trial_count_formula: u64,
    config: &TrialConfig,
) -> Result<(u64, u64)> {
    let n = source.vertex_count();
    let trials_per_worker = trial_count_formula.div_ceil(processors as u64).max(1);

    let full_edges = source
        .slice(0, 1)
        .map_err(|error| MincutError::GraphSource {
            name: Arc::from(source.name()),
            error,
        })?;
    let edge_slice = EdgeSlice::from_owned(full_edges);
    let matrix = DenseMatrix::from_slices(std::slice::from_ref(&edge_slice), n as usize, 1);

    let base_seed = config.base_seed();
    let workers: Vec<usize> = (0..processors).collect();
    let candidates = map_workers(&workers, |rank, _| {
        let mut rng = worker_rng(base_seed, rank);
        (0..trials_per_worker)
            .map(|_| base_case::solve(&matrix, config, &mut rng))
            .min()
            .unwrap_or(u64::MAX)
    });

    Ok((reduce_min(&candidates), trials_per_worker.saturating_mul(processors as u64)))
}

fn run_high_concurrency(
    source: &dyn GraphSource,
    processors: usize,
    trial_count_formula: u64,
    target: u64,
    config: &TrialConfig,
) -> Result<(u64, u64)> {
    let n = source.vertex_count();
    let group_size = hc_group_size(processors, trial_count_formula, n, config.max_worker_memory_bytes());
    let num_groups = processors / group_size;
    let odd_workers = processors - num_groups * group_size;

    let mut candidates = Vec::new();
    for group_index in 0..num_groups {
        let group_seed = mix_worker_seed(config.base_seed(), group_index);
        let slices: Vec<EdgeSlice<'static>> = (0..group_size)
            .map(|rank| {
                source
                    .slice(rank, group_size)
                    .map(EdgeSlice::from_owned)
                    .map_err(|error| MincutError::GraphSource {
                        name: Arc::from(source.name()),
                        error,
                    })
            })
            .collect::<Result<_>>()?;

        let group_cluster = Cluster::new(group_size, group_seed);
        let mut iss = Iss::new(&group_cluster, n, slices, true);
        iss.shrink(target);
        let shrunk_n = iss.vertex_count();
        let post_iss_slices = iss.into_slices();
        let matrix = DenseMatrix::from_slices(&post_iss_slices, shrunk_n as usize, group_size);

        candidates.extend(rc::recursive_contract(&matrix, &group_cluster, config)?);
    }

    if odd_workers > 0 {
        candidates.push(u64::MAX);
    }

    #[allow(clippy::cast_possible_truncation, reason = "processors fits comfortably in u64")]
    let trial_count = (num_groups * group_size) as u64;
    Ok((reduce_min(&candidates), trial_count))
}

/// Runs the full Square-Root Cut trial orchestration over `source` using
/// `processors` simulated workers.
pub struct Orchestrator;

impl Orchestrator {
    /// Computes an upper bound on `source`'s minimum cut weight, selecting
    /// between the low- and high-concurrency execution modes as described in
    /// §4.E, and returns a [`CutReport`] summarizing the run.
    ///
    /// # Errors
    ///
    /// Returns [`MincutError::TrialCountOverflow`] if the trial-count formula
    /// cannot be evaluated for the given inputs, or
    /// [`MincutError::GraphSource`] if `source` fails to produce a slice.
    ///
    /// # Panics
    ///
    /// Panics if `processors` is zero.
    #[instrument(skip(source, config), fields(processors, vertex_count = source.vertex_count(), edge_count = source.edge_count()))]
    pub fn run(source: &dyn GraphSource, processors: usize, config: &TrialConfig) -> Result<CutReport> {
        assert!(processors > 0, "orchestrator requires at least one worker");

        let n = source.vertex_count();
        let m = source.edge_count();
        let start = Instant::now();
        let mut collective_timer = CollectiveTimer::new();

        #[allow(clippy::cast_precision_loss, reason = "edge counts fit comfortably in f64's mantissa")]
        let target = collective_timer.time(|| {
            #[allow(clippy::cast_possible_truncation, reason = "target sizes stay well within u64 range")]
            #[allow(
                clippy::float_arithmetic,
                reason = "ISS/RC target-size formula is inherently floating-point (§4.E)"
            )]
            let t = (config.base_case_multiplier() * (m as f64).sqrt()).ceil() as u64 + 1;
            t.min(n.max(1))
        });

        let trial_count_formula = required_trial_count(n, m, target, config)?;

        let variant = match config.concurrency_override() {
            ConcurrencyOverride::ForceLowConcurrency => Variant::LowConcurrency,
            ConcurrencyOverride::ForceHighConcurrency => Variant::HighConcurrency,
            ConcurrencyOverride::Auto => select_variant(processors, trial_count_formula),
        };

        let (cut_weight, trial_count) = match variant {
            Variant::LowConcurrency => {
                run_low_concurrency(source, processors, trial_count_formula, config)?
            }
            Variant::HighConcurrency => {
                run_high_concurrency(source, processors, trial_count_formula, target, config)?
            }
        };

        let cutting_time = start.elapsed().saturating_sub(collective_timer.total());
        Ok(CutReport::new(
            cut_weight,
            trial_count,
            variant,
            n,
            m,
            cutting_time,
            collective_timer.total(),
        ))
    }
}
