//! engine.rs
//! Runs rule computations. A batch holds at most one job per output, so no two
//! workers ever write the same output; independent outputs run concurrently.

use crate::chart::ChartSpec;
use crate::compute::ledger::ComputeError;
use crate::graph::{ComputeFn, Inputs, RuleId};
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

/// One recomputation: a rule, the trigger that caused it, and its input snapshot.
pub struct Job {
    pub rule: RuleId,
    pub sequence: u64,
    pub inputs: Inputs,
    pub compute: ComputeFn,
}

#[derive(Debug)]
pub struct Completion {
    pub rule: RuleId,
    pub sequence: u64,
    pub result: Result<ChartSpec, ComputeError>,
}

#[derive(Debug, Default)]
pub struct Engine {
    /// Dedicated worker pool. `None` uses rayon's global pool.
    pool: Option<rayon::ThreadPool>,
}

impl Engine {
    pub fn new() -> Self { Self::default() }

    pub fn with_workers(workers: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("dash-compute-{}", i))
            .build()?;
        Ok(Self { pool: Some(pool) })
    }

    /// Executes the batch and hands each completion to `on_complete` on the
    /// calling thread, in completion order. A slow job does not hold back the
    /// delivery of the others.
    pub fn run<F>(&self, jobs: Vec<Job>, mut on_complete: F)
    where
        F: FnMut(Completion),
    {
        match jobs.len() {
            0 => {}
            1 => {
                for job in jobs {
                    on_complete(execute(job));
                }
            }
            n => {
                tracing::debug!(jobs = n, "Running recomputation batch on workers");
                let (tx, rx) = mpsc::channel();
                std::thread::scope(|scope| {
                    scope.spawn(move || {
                        let drive = move || {
                            jobs.into_par_iter().for_each_with(tx, |tx, job| {
                                // The receiver outlives the batch; a send cannot fail.
                                let _ = tx.send(execute(job));
                            });
                        };
                        match &self.pool {
                            Some(pool) => pool.install(drive),
                            None => drive(),
                        }
                    });
                    for done in rx {
                        on_complete(done);
                    }
                });
            }
        }
    }
}

/// Runs one job. Panics inside the compute function are turned into errors.
fn execute(job: Job) -> Completion {
    let Job { rule, sequence, inputs, compute } = job;
    let result = match panic::catch_unwind(AssertUnwindSafe(|| compute(&inputs))) {
        Ok(result) => result,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ComputeError::Panicked(msg))
        }
    };
    Completion { rule, sequence, result }
}
