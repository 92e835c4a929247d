use crate::batch::job::{Job, Outcome, RunTracker};
use crate::batch::ports::Reporter;
use std::fmt::Formatter;
use std::time::Duration;

const CHECK: &str = "✔";
const CROSS: &str = "❌";

/// Announces every job start and every failure as it happens.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn started(&mut self, job: &Job) {
        println!("Building {}", job.name);
    }

    fn outcome(&mut self, outcome: &Outcome) {
        if !outcome.succeeded() {
            println!(
                "Building {} failed (exit code {}). See log: {}",
                outcome.name,
                outcome.exit_code,
                outcome.log_path.display()
            );
        }
    }

    fn error(&mut self, message: String) {
        eprintln!("{}", message);
    }
}

/// Failures only, for tty-less runs.
pub struct QuietReporter;

impl Reporter for QuietReporter {
    fn started(&mut self, _: &Job) {}

    fn outcome(&mut self, outcome: &Outcome) {
        if !outcome.succeeded() {
            println!(
                "{} failed (exit code {}), log: {}",
                outcome.name,
                outcome.exit_code,
                outcome.log_path.display()
            );
        }
    }

    fn error(&mut self, message: String) {
        eprintln!("{}", message);
    }
}

impl std::fmt::Display for RunTracker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for outcome in self.outcomes.values() {
            if outcome.succeeded() {
                writeln!(f, "{} {}", CHECK, outcome.name)?;
            } else {
                writeln!(
                    f,
                    "{} {} (exit code {}, log: {})",
                    CROSS,
                    outcome.name,
                    outcome.exit_code,
                    outcome.log_path.display()
                )?;
            }
        }
        let elapsed = self
            .end_time
            .and_then(|end| end.duration_since(self.start_time).ok())
            .unwrap_or(Duration::ZERO);
        let failed = self.failure_count();
        if failed == 0 {
            write!(f, "{} builds in {:.1}s", self.outcomes.len(), elapsed.as_secs_f32())
        } else {
            write!(
                f,
                "{} builds in {:.1}s, {} failed",
                self.outcomes.len(),
                elapsed.as_secs_f32(),
                failed
            )
        }
    }
}
