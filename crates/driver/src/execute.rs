//! Execution of a [`Plan`] against the real toolchain.
//!
//! The driver does not care _how_ a command is run, only about the exit status
//! that results. This is captured by the [`Runner`] trait, which allows the
//! executor to be driven by something other than real subprocesses (e.g. in
//! tests).

use std::process::Command;

use bitcc_errors::execute::{Error, Result, LAUNCH_FAILURE_EXIT_CODE};
use tracing::{info, warn};

use crate::{command::CommandVector, plan::Plan};

/// Something that is able to run a single command to completion.
pub trait Runner {
    /// Runs `command`, returning its exit status.
    ///
    /// # Errors
    ///
    /// - [`Error`] if the command could not be run at all.
    fn run(&mut self, command: &CommandVector) -> Result<i32>;
}

/// A [`Runner`] that spawns each command as a subprocess.
///
/// The subprocess inherits the standard streams of the wrapper, so the tools'
/// diagnostics reach the user directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&mut self, command: &CommandVector) -> Result<i32> {
        let program = command.program();
        if program.is_empty() {
            return Err(Error::EmptyCommand);
        }

        let mut child = Command::new(program)
            .args(command.arguments())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;
        let status = child.wait().map_err(|source| Error::Wait {
            program: program.to_string(),
            source,
        })?;

        // A process killed by a signal has no exit code.
        Ok(status.code().unwrap_or(LAUNCH_FAILURE_EXIT_CODE))
    }
}

/// The result of executing a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every command in the plan exited successfully.
    Success,

    /// A command exited with a non-zero `status`, and the commands after it
    /// were not run.
    Failed {
        command: CommandVector,
        status:  i32,
    },
}

impl Outcome {
    /// Gets the exit status that the wrapper should report for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failed { status, .. } => *status,
        }
    }
}

/// Runs each command in `plan` in order using `runner`, stopping at the first
/// one that exits with a non-zero status.
///
/// # Errors
///
/// - [`Error`] if a command could not be run at all. The remaining commands
///   are not run.
pub fn execute(plan: &Plan, runner: &mut impl Runner) -> Result<Outcome> {
    for command in plan {
        info!(%command, "Running");
        let status = runner.run(command)?;

        if status != 0 {
            warn!(%command, status, "Command failed; skipping the remaining commands");
            return Ok(Outcome::Failed {
                command: command.clone(),
                status,
            });
        }
    }

    Ok(Outcome::Success)
}

#[cfg(test)]
pub(crate) mod test {
    use std::collections::HashMap;

    use bitcc_errors::execute::{Error, Result};

    use crate::{
        command::CommandVector,
        execute::{execute, Outcome, ProcessRunner, Runner},
        plan::Plan,
    };

    /// A runner that records what it was asked to run, and reports a fixed
    /// exit status for each program.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRunner {
        pub(crate) statuses: HashMap<String, i32>,
        pub(crate) missing:  Vec<String>,
        pub(crate) ran:      Vec<String>,
    }

    impl RecordingRunner {
        pub(crate) fn failing(program: &str, status: i32) -> Self {
            let mut runner = Self::default();
            runner.statuses.insert(program.to_string(), status);
            runner
        }
    }

    impl Runner for RecordingRunner {
        fn run(&mut self, command: &CommandVector) -> Result<i32> {
            let program = command.program().to_string();
            if self.missing.contains(&program) {
                return Err(Error::Spawn {
                    program,
                    source: std::io::ErrorKind::NotFound.into(),
                });
            }

            self.ran.push(command.to_string());
            Ok(self.statuses.get(&program).copied().unwrap_or(0))
        }
    }

    fn plan() -> Plan {
        Plan::new(vec![
            CommandVector::new("clang").arg("a.c"),
            CommandVector::new("llvm-link").arg("a.o.llvm"),
            CommandVector::new("objcopy").arg("a.out"),
        ])
    }

    #[test]
    fn runs_everything_in_order_on_success() -> anyhow::Result<()> {
        let mut runner = RecordingRunner::default();
        let outcome = execute(&plan(), &mut runner)?;

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(runner.ran, vec!["clang a.c", "llvm-link a.o.llvm", "objcopy a.out"]);

        Ok(())
    }

    #[test]
    fn stops_at_first_failure() -> anyhow::Result<()> {
        let mut runner = RecordingRunner::failing("llvm-link", 3);
        let outcome = execute(&plan(), &mut runner)?;

        assert_eq!(
            outcome,
            Outcome::Failed {
                command: CommandVector::new("llvm-link").arg("a.o.llvm"),
                status:  3,
            }
        );
        assert_eq!(outcome.exit_code(), 3);
        assert_eq!(runner.ran, vec!["clang a.c", "llvm-link a.o.llvm"]);

        Ok(())
    }

    #[test]
    fn launch_failures_abort_the_plan() {
        let mut runner = RecordingRunner {
            missing: vec!["clang".to_string()],
            ..RecordingRunner::default()
        };
        let result = execute(&plan(), &mut runner);

        assert!(matches!(result, Err(Error::Spawn { ref program, .. }) if program == "clang"));
        assert!(runner.ran.is_empty());
    }

    #[test]
    fn empty_plan_succeeds() -> anyhow::Result<()> {
        let outcome = execute(&Plan::default(), &mut RecordingRunner::default())?;

        assert_eq!(outcome, Outcome::Success);

        Ok(())
    }

    #[test]
    fn process_runner_rejects_an_empty_program() {
        let result = ProcessRunner.run(&CommandVector::new(""));

        assert!(matches!(result, Err(Error::EmptyCommand)));
    }

    #[test]
    fn process_runner_reports_missing_programs() {
        let command = CommandVector::new("bitcc-test-program-that-does-not-exist");
        let result = ProcessRunner.run(&command);

        assert!(matches!(result, Err(Error::Spawn { .. })));
    }
}
