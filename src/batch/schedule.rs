use crate::batch::job::{Job, Outcome, RunTracker, LAUNCH_FAILURE_CODE};
use crate::batch::ports::{ProcessBackend, Reporter, WorkerHandle};
use anyhow::{bail, Result};
use std::collections::{HashSet, VecDeque};

struct InFlight {
    job: Job,
    handle: Box<dyn WorkerHandle>,
}

/// Runs every job to completion, at most `max_workers` at a time.
///
/// Jobs are dequeued in submission order whenever a worker slot frees
/// up. A build that fails, or cannot even be launched, becomes a failed
/// outcome; it never stops the rest of the run. Only broken
/// preconditions abort before anything is spawned.
pub fn run_jobs(
    jobs: Vec<Job>,
    max_workers: usize,
    backend: &mut dyn ProcessBackend,
    reporter: &mut dyn Reporter,
) -> Result<RunTracker> {
    if max_workers < 1 {
        bail!("worker cap must be at least 1, got {}", max_workers);
    }
    let mut seen = HashSet::new();
    for job in &jobs {
        if !seen.insert(job.name.as_str()) {
            bail!("duplicate job name: {}", job.name);
        }
    }

    let mut pending: VecDeque<Job> = jobs.into();
    let mut active: Vec<InFlight> = Vec::new();
    let mut tracker = RunTracker::new();

    while !pending.is_empty() || !active.is_empty() {
        let mut progressed = false;

        // Reap finished builds. Dropping an entry closes its log sink.
        let mut index = 0;
        while index < active.len() {
            let status = match active[index].handle.poll() {
                Ok(status) => status,
                Err(_) => Some(active[index].handle.wait().unwrap_or(-1)),
            };
            match status {
                None => index += 1,
                Some(exit_code) => {
                    let done = active.swap_remove(index);
                    let outcome = Outcome {
                        name: done.job.name,
                        exit_code,
                        log_path: done.job.log_path,
                    };
                    reporter.outcome(&outcome);
                    tracker.record(outcome);
                    progressed = true;
                }
            }
        }

        // Fill free worker slots from the front of the queue.
        while active.len() < max_workers {
            let Some(job) = pending.pop_front() else {
                break;
            };
            reporter.started(&job);
            match backend.launch(&job) {
                Ok(handle) => active.push(InFlight { job, handle }),
                Err(error) => {
                    reporter.error(format!("could not launch {}: {:#}", job.name, error));
                    let outcome = Outcome {
                        name: job.name,
                        exit_code: LAUNCH_FAILURE_CODE,
                        log_path: job.log_path,
                    };
                    reporter.outcome(&outcome);
                    tracker.record(outcome);
                }
            }
            progressed = true;
        }

        if !progressed && !active.is_empty() {
            backend.idle();
        }
    }

    tracker.finish();
    Ok(tracker)
}
