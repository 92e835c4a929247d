use indexmap::IndexMap;
use std::path::PathBuf;
use std::time::SystemTime;

/// Exit code recorded when a build could not be started at all
/// (missing executable, bad workdir, unwritable log file).
pub const LAUNCH_FAILURE_CODE: i32 = 127;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Job {
    pub name: String,
    pub command: Vec<String>,
    pub workdir: PathBuf,
    pub log_path: PathBuf,
}

impl Job {
    pub fn new(name: String, command: Vec<String>, workdir: PathBuf, log_path: PathBuf) -> Self {
        Self {
            name,
            command,
            workdir,
            log_path,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub name: String,
    pub exit_code: i32,
    pub log_path: PathBuf,
}

impl Outcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

pub struct RunTracker {
    pub start_time: SystemTime,
    pub end_time: Option<SystemTime>,
    pub outcomes: IndexMap<String, Outcome>,
    pub has_failed: bool,
}

impl RunTracker {
    pub fn new() -> Self {
        RunTracker {
            start_time: SystemTime::now(),
            end_time: None,
            outcomes: IndexMap::new(),
            has_failed: false,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.has_failed |= !outcome.succeeded();
        self.outcomes.insert(outcome.name.clone(), outcome);
    }

    pub fn finish(&mut self) {
        if self.end_time.is_none() {
            self.end_time = Some(SystemTime::now());
        }
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|outcome| !outcome.succeeded())
            .count()
    }
}
