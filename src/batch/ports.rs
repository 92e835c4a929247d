use crate::batch::job::{Job, Outcome};
use anyhow::Result;

/// One spawned build process. Dropping the handle releases whatever
/// resources it owns, including its log sink.
pub trait WorkerHandle {
    /// Non-blocking termination check: `None` while still running,
    /// `Some(exit_code)` once terminated.
    fn poll(&mut self) -> Result<Option<i32>>;

    /// Blocking wait, the final-drain fallback.
    fn wait(&mut self) -> Result<i32>;
}

pub trait ProcessBackend {
    /// Open the job's log sink (truncate-create) and spawn its command
    /// with stdout and stderr redirected into it.
    fn launch(&mut self, job: &Job) -> Result<Box<dyn WorkerHandle>>;

    /// Bounded sleep between polling rounds when no progress is possible.
    fn idle(&mut self);
}

pub trait Reporter {
    fn started(&mut self, job: &Job);
    fn outcome(&mut self, outcome: &Outcome);
    fn error(&mut self, message: String);
}

pub struct NullReporter;

impl Reporter for NullReporter {
    fn started(&mut self, _: &Job) {}
    fn outcome(&mut self, _: &Outcome) {}
    fn error(&mut self, _: String) {}
}
