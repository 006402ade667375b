//! Error types and utilities to do with running the synthesized commands.

use thiserror::Error;

/// The exit status used when a tool could not be launched, or did not exit
/// normally.
pub const LAUNCH_FAILURE_EXIT_CODE: i32 = 127;

/// The result type for use in the executor.
pub type Result<T> = std::result::Result<T, Error>;

/// This error type is for use while executing a plan of commands.
///
/// Note that a tool exiting with a non-zero status is _not_ an error. It is an
/// ordinary outcome that the executor reports back to its caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Emitted when asked to run a command with no program in it.
    #[error("Cannot run an empty command")]
    EmptyCommand,

    /// The program could not be started at all, e.g. because it does not
    /// exist or is not executable.
    #[error("Failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        source:  std::io::Error,
    },

    /// The program was started but waiting for it to finish failed.
    #[error("Failed to wait for `{program}`: {source}")]
    Wait {
        program: String,
        source:  std::io::Error,
    },
}
