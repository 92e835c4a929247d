use crate::batch::ports::Reporter;
use crate::batch::process::OsBackend;
use crate::batch::report::{ConsoleReporter, QuietReporter};
use crate::batch::schedule::run_jobs;
use crate::config::Config;
use anyhow::Result;
use std::num::NonZeroUsize;

pub mod job;
pub mod ports;
pub mod process;
pub mod report;
pub mod schedule;

pub struct Batch {}

impl Batch {
    pub fn run(&mut self, config: Config, workers_override: Option<usize>) -> Result<bool> {
        let jobs = config.jobs()?;
        let max_workers = workers_override
            .or(config.workers())
            .unwrap_or_else(default_workers);

        let mut reporter: Box<dyn Reporter> = if atty::is(atty::Stream::Stdout) {
            Box::new(ConsoleReporter)
        } else {
            Box::new(QuietReporter)
        };

        let tracker = run_jobs(jobs, max_workers, &mut OsBackend, &mut *reporter)?;
        println!("{}", tracker);

        Ok(!tracker.has_failed)
    }

    pub fn list(&mut self, config: Config) -> Result<()> {
        let mut names = config.job_names();
        names.sort();
        names.iter().for_each(|name| println!("{}", name));
        Ok(())
    }
}

pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
