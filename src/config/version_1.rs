use crate::batch::job::Job;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::PathBuf;

pub type JobSet = IndexMap<String, Vec<String>>;

#[derive(Deserialize, Debug, PartialEq)]
pub struct Version1 {
    #[serde(default)]
    workdir: Option<PathBuf>,
    #[serde(default)]
    log_dir: Option<PathBuf>,
    #[serde(default)]
    workers: Option<usize>,
    jobs: JobSet,
}

impl Version1 {
    pub fn workers(&self) -> Option<usize> {
        self.workers
    }

    pub fn job_names(&self) -> Vec<String> {
        self.jobs.keys().cloned().collect()
    }

    /// Turns the configured job set into concrete jobs, in file order.
    /// Log files land in `log_dir` (default: the workdir) following the
    /// `build.<name>.log` convention.
    pub fn load_into(&self, vec: &mut Vec<Job>) -> Result<(), String> {
        let workdir = self.workdir.clone().unwrap_or_else(|| PathBuf::from("."));
        let log_dir = self.log_dir.clone().unwrap_or_else(|| workdir.clone());

        for (name, command) in &self.jobs {
            if command.is_empty() {
                return Err(format!("job {} has an empty command", name));
            }
            vec.push(Job::new(
                name.clone(),
                command.clone(),
                workdir.clone(),
                log_dir.join(format!("build.{}.log", name)),
            ));
        }

        Ok(())
    }
}
