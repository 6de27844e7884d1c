//! Trial runner and statistical outcome reporting.
//!
//! The stub tasks are random by construction, so their interesting
//! aggregate property is the long-run outcome distribution. The runner
//! executes one workload across many seeded simulation iterations and
//! counts outcome labels, which is what the statistical tests and the
//! CLI's `--trials` mode consume.

use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::pin::Pin;
use std::time::Duration;

use drydock_core::{SimulationError, SimulationResult};

use crate::providers::SimProviders;
use crate::world::SimWorld;

/// Consecutive scheduler passes with no pending events and no workload
/// progress before the run is declared stalled.
const STALL_THRESHOLD: usize = 16;

/// Drives a workload future to completion against a simulation world.
///
/// The future is spawned on the local task set and cooperatively
/// interleaved with event processing: each pass steps the world once (if
/// it has pending events) and yields so the workload can run. A workload
/// that is still pending while the event queue stays empty cannot make
/// progress; it is aborted and reported as
/// [`SimulationError::InvalidState`] instead of hanging the caller.
///
/// Must be called within a `tokio::task::LocalSet` (or local runtime),
/// since simulation futures are not `Send`.
pub async fn run_to_completion<F, T>(sim: &mut SimWorld, future: F) -> SimulationResult<T>
where
    F: Future<Output = SimulationResult<T>> + 'static,
    T: 'static,
{
    let handle = tokio::task::spawn_local(future);

    let mut stalled_passes = 0;
    while !handle.is_finished() {
        if sim.has_pending_events() {
            sim.step();
            stalled_passes = 0;
        } else {
            stalled_passes += 1;
            if stalled_passes > STALL_THRESHOLD {
                handle.abort();
                return Err(SimulationError::InvalidState(
                    "workload stalled with no pending events".to_string(),
                ));
            }
        }

        tokio::task::yield_now().await;
    }

    match handle.await {
        Ok(result) => result,
        Err(_) => Err(SimulationError::InvalidState(
            "workload task panicked".to_string(),
        )),
    }
}

/// Type alias for the registered workload function.
type WorkloadFn =
    Box<dyn Fn(SimProviders) -> Pin<Box<dyn Future<Output = SimulationResult<String>>>>>;

/// A registered workload executed once per trial iteration.
struct Workload {
    name: String,
    run: WorkloadFn,
}

impl fmt::Debug for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workload")
            .field("name", &self.name)
            .field("run", &"<closure>")
            .finish()
    }
}

/// Builder for running a workload across many seeded iterations.
///
/// Each iteration gets a fresh [`SimWorld`] and a [`SimProviders`]
/// bundle seeded for that iteration; the workload returns an outcome
/// label that the final [`TrialReport`] counts.
#[derive(Debug)]
pub struct TrialBuilder {
    workload: Option<Workload>,
    iterations: usize,
    seeds: Vec<u64>,
}

impl TrialBuilder {
    /// Create a new trial builder with a single iteration and no
    /// explicit seeds.
    pub fn new() -> Self {
        Self {
            workload: None,
            iterations: 1,
            seeds: Vec::new(),
        }
    }

    /// Register the workload to run.
    ///
    /// The closure receives the per-iteration providers bundle and
    /// returns the iteration's outcome label.
    pub fn workload<S, F, Fut>(mut self, name: S, workload: F) -> Self
    where
        S: Into<String>,
        F: Fn(SimProviders) -> Fut + 'static,
        Fut: Future<Output = SimulationResult<String>> + 'static,
    {
        let boxed: WorkloadFn = Box::new(move |providers| Box::pin(workload(providers)));
        self.workload = Some(Workload {
            name: name.into(),
            run: boxed,
        });
        self
    }

    /// Set the number of iterations to run.
    pub fn set_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set explicit seeds for reproducible runs.
    ///
    /// Iterations beyond the provided seeds derive theirs
    /// deterministically from a per-run base seed and the iteration
    /// index.
    pub fn set_seeds(mut self, seeds: Vec<u64>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Run the trials and produce a report.
    ///
    /// Must be called within a `tokio::task::LocalSet` (or local
    /// runtime); see [`run_to_completion`].
    pub async fn run(self) -> TrialReport {
        let Some(workload) = self.workload else {
            return TrialReport::empty(String::new());
        };

        let base_seed = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(12345);

        let mut report = TrialReport::empty(workload.name.clone());

        for iteration in 0..self.iterations {
            let seed = self
                .seeds
                .get(iteration)
                .copied()
                .unwrap_or_else(|| derive_seed(base_seed, iteration));
            report.seeds_used.push(seed);

            let mut sim = SimWorld::new();
            let providers = SimProviders::new(sim.downgrade(), seed);

            tracing::debug!(iteration, seed, "starting trial iteration");
            let result = run_to_completion(&mut sim, (workload.run)(providers)).await;
            sim.run_until_empty();

            match result {
                Ok(label) => {
                    report.successful_runs += 1;
                    *report.outcome_counts.entry(label).or_insert(0) += 1;
                    report.total_simulated_time += sim.current_time();
                    report.events_processed += sim.events_processed();
                }
                Err(error) => {
                    tracing::warn!(iteration, seed, %error, "trial iteration failed");
                    report.failed_runs += 1;
                    report.seeds_failing.push(seed);
                }
            }
            report.iterations += 1;
        }

        report
    }
}

impl Default for TrialBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a deterministic seed from a base seed and an iteration index.
fn derive_seed(base_seed: u64, iteration: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    base_seed.hash(&mut hasher);
    iteration.hash(&mut hasher);
    hasher.finish()
}

/// Aggregated results of a trial run.
#[derive(Debug, Clone, Serialize)]
pub struct TrialReport {
    /// Name of the workload that produced this report.
    pub workload: String,
    /// Number of iterations executed.
    pub iterations: usize,
    /// Number of iterations that completed with an outcome label.
    pub successful_runs: usize,
    /// Number of iterations that failed in the simulation engine.
    pub failed_runs: usize,
    /// Outcome labels and how often each occurred.
    pub outcome_counts: BTreeMap<String, usize>,
    /// Seeds used, one per iteration.
    pub seeds_used: Vec<u64>,
    /// Seeds of failed iterations, for replay.
    pub seeds_failing: Vec<u64>,
    /// Sum of simulated time across successful iterations.
    pub total_simulated_time: Duration,
    /// Sum of events processed across successful iterations.
    pub events_processed: u64,
}

impl TrialReport {
    fn empty(workload: String) -> Self {
        Self {
            workload,
            iterations: 0,
            successful_runs: 0,
            failed_runs: 0,
            outcome_counts: BTreeMap::new(),
            seeds_used: Vec::new(),
            seeds_failing: Vec::new(),
            total_simulated_time: Duration::ZERO,
            events_processed: 0,
        }
    }

    /// How often `label` occurred, as a count.
    pub fn count(&self, label: &str) -> usize {
        self.outcome_counts.get(label).copied().unwrap_or(0)
    }

    /// How often `label` occurred, as a fraction of successful runs.
    pub fn frequency(&self, label: &str) -> f64 {
        if self.successful_runs == 0 {
            0.0
        } else {
            self.count(label) as f64 / self.successful_runs as f64
        }
    }

    /// Fraction of iterations that completed, as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            (self.successful_runs as f64 / self.iterations as f64) * 100.0
        }
    }

    /// Average simulated time per successful iteration.
    pub fn average_simulated_time(&self) -> Duration {
        if self.successful_runs == 0 {
            Duration::ZERO
        } else {
            self.total_simulated_time / self.successful_runs as u32
        }
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Trial Report: {} ===", self.workload)?;
        writeln!(f, "Iterations: {}", self.iterations)?;
        writeln!(f, "Successful: {}", self.successful_runs)?;
        writeln!(f, "Failed: {}", self.failed_runs)?;
        writeln!(f, "Success Rate: {:.2}%", self.success_rate())?;
        writeln!(f)?;
        writeln!(f, "Outcomes:")?;
        for (label, count) in &self.outcome_counts {
            writeln!(
                f,
                "  {}: {} ({:.1}%)",
                label,
                count,
                self.frequency(label) * 100.0
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Average Simulated Time: {:?}",
            self.average_simulated_time()
        )?;
        writeln!(f, "Events Processed: {}", self.events_processed)?;

        if !self.seeds_failing.is_empty() {
            writeln!(f)?;
            writeln!(f, "Faulty seeds: {:?}", self.seeds_failing)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drydock_core::{Providers, RandomProvider, TimeProvider};

    fn local_block_on<F: Future>(future: F) -> F::Output {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("failed to build runtime");
        let local = tokio::task::LocalSet::new();
        rt.block_on(local.run_until(future))
    }

    #[test]
    fn trials_count_outcomes_and_seeds() {
        let report = local_block_on(
            TrialBuilder::new()
                .workload("coin", |providers: SimProviders| async move {
                    providers.time().sleep(Duration::from_secs(1)).await.ok();
                    let label = if providers.random().random_bool(0.5) {
                        "heads"
                    } else {
                        "tails"
                    };
                    Ok(label.to_string())
                })
                .set_iterations(20)
                .set_seeds((0..20).collect())
                .run(),
        );

        assert_eq!(report.iterations, 20);
        assert_eq!(report.successful_runs, 20);
        assert_eq!(report.failed_runs, 0);
        assert_eq!(report.success_rate(), 100.0);
        assert_eq!(report.count("heads") + report.count("tails"), 20);
        assert_eq!(report.seeds_used, (0..20).collect::<Vec<u64>>());
        // One simulated second per iteration.
        assert_eq!(report.total_simulated_time, Duration::from_secs(20));
        assert_eq!(report.average_simulated_time(), Duration::from_secs(1));
    }

    #[test]
    fn identical_seeds_reproduce_identical_reports() {
        let run = || {
            local_block_on(
                TrialBuilder::new()
                    .workload("coin", |providers: SimProviders| async move {
                        providers.time().sleep(Duration::from_secs(1)).await.ok();
                        Ok(providers.random().random_bool(0.5).to_string())
                    })
                    .set_iterations(10)
                    .set_seeds((100..110).collect())
                    .run(),
            )
        };

        let first = run();
        let second = run();
        assert_eq!(first.outcome_counts, second.outcome_counts);
        assert_eq!(first.seeds_used, second.seeds_used);
    }

    #[test]
    fn stalled_workload_is_reported_not_hung() {
        let result = local_block_on(async {
            let mut sim = SimWorld::new();
            run_to_completion(&mut sim, async {
                std::future::pending::<()>().await;
                Ok(42)
            })
            .await
        });

        assert!(matches!(result, Err(SimulationError::InvalidState(_))));
    }

    #[test]
    fn panicking_workload_is_reported_as_failure() {
        let report = local_block_on(
            TrialBuilder::new()
                .workload("broken", |_providers: SimProviders| async move {
                    panic!("workload bug")
                })
                .set_iterations(2)
                .set_seeds(vec![1, 2])
                .run(),
        );

        assert_eq!(report.failed_runs, 2);
        assert_eq!(report.successful_runs, 0);
        assert_eq!(report.seeds_failing, vec![1, 2]);
    }

    #[test]
    fn empty_builder_produces_empty_report() {
        let report = local_block_on(TrialBuilder::new().set_iterations(5).run());
        assert_eq!(report.iterations, 0);
        assert_eq!(report.success_rate(), 0.0);
    }

    #[test]
    fn report_display_lists_outcomes() {
        let mut report = TrialReport::empty("status".to_string());
        report.iterations = 4;
        report.successful_runs = 4;
        report.outcome_counts.insert("running".to_string(), 3);
        report.outcome_counts.insert("stopped".to_string(), 1);

        let display = format!("{report}");
        assert!(display.contains("Trial Report: status"));
        assert!(display.contains("running: 3 (75.0%)"));
        assert!(display.contains("Success Rate: 100.00%"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = TrialReport::empty("deploy".to_string());
        report.iterations = 1;
        report.successful_runs = 1;
        report.outcome_counts.insert("success".to_string(), 1);

        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json["workload"], "deploy");
        assert_eq!(json["outcome_counts"]["success"], 1);
    }
}
