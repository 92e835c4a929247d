use crate::batch::job::Job;
use crate::batch::ports::{ProcessBackend, WorkerHandle};
use anyhow::{Context, Result};
use std::fs::File;
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(40);

/// A build running as an OS child process. The log file handle lives
/// as long as the process handle, so the sink is closed exactly once,
/// whichever way the build ends.
pub struct OsProcess {
    child: Child,
    _log: File,
}

impl WorkerHandle for OsProcess {
    fn poll(&mut self) -> Result<Option<i32>> {
        let status = self
            .child
            .try_wait()
            .context("could not poll build process")?;
        Ok(status.map(|status| status.code().unwrap_or(-1)))
    }

    fn wait(&mut self) -> Result<i32> {
        let status = self
            .child
            .wait()
            .context("could not wait for build process")?;
        Ok(status.code().unwrap_or(-1))
    }
}

pub struct OsBackend;

impl ProcessBackend for OsBackend {
    fn launch(&mut self, job: &Job) -> Result<Box<dyn WorkerHandle>> {
        let log = File::create(&job.log_path)
            .with_context(|| format!("could not create log file {}", job.log_path.display()))?;

        let (program, args) = job
            .command
            .split_first()
            .with_context(|| format!("job {} has an empty command", job.name))?;

        let stdout = log
            .try_clone()
            .context("could not duplicate log handle for stdout")?;
        let stderr = log
            .try_clone()
            .context("could not duplicate log handle for stderr")?;

        let child = Command::new(program)
            .args(args)
            .current_dir(&job.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .spawn()
            .with_context(|| format!("could not start {}", program))?;

        Ok(Box::new(OsProcess { child, _log: log }))
    }

    fn idle(&mut self) {
        sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_log(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("parbuild-{}-{}.log", std::process::id(), name))
    }

    fn job(name: &str, command: &[&str]) -> Job {
        Job::new(
            name.to_string(),
            command.iter().map(|arg| arg.to_string()).collect(),
            std::env::temp_dir(),
            scratch_log(name),
        )
    }

    #[test]
    pub fn captures_exit_code_and_output() {
        let job = job("echoes", &["sh", "-c", "echo hello; echo oops >&2"]);
        let mut backend = OsBackend;
        let mut handle = backend.launch(&job).unwrap();
        assert_eq!(handle.wait().unwrap(), 0);
        drop(handle);
        let log = std::fs::read_to_string(&job.log_path).unwrap();
        assert!(log.contains("hello"));
        assert!(log.contains("oops"));
        std::fs::remove_file(&job.log_path).ok();
    }

    #[test]
    pub fn surfaces_nonzero_exit() {
        let job = job("fails", &["sh", "-c", "exit 3"]);
        let mut handle = OsBackend.launch(&job).unwrap();
        assert_eq!(handle.wait().unwrap(), 3);
        std::fs::remove_file(&job.log_path).ok();
    }

    #[test]
    pub fn missing_executable_is_a_launch_error() {
        let job = job("ghost", &["parbuild-no-such-binary"]);
        assert!(OsBackend.launch(&job).is_err());
        std::fs::remove_file(&job.log_path).ok();
    }

    #[test]
    pub fn poll_eventually_reports_termination() {
        let job = job("polled", &["sh", "-c", "exit 0"]);
        let mut handle = OsBackend.launch(&job).unwrap();
        let code = loop {
            if let Some(code) = handle.poll().unwrap() {
                break code;
            }
            sleep(Duration::from_millis(5));
        };
        assert_eq!(code, 0);
        std::fs::remove_file(&job.log_path).ok();
    }
}
