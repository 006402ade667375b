//! Error handling types and utilities for the bitcc workspace.
//!
//! # Error Conventions
//!
//! The driver is a library that others may want to interact with from _code_
//! as well as from the CLI, so we keep our errors strongly typed at all times.
//! While libraries like [anyhow](https://docs.rs/anyhow/latest/anyhow/) are
//! well-suited for application code, they make it more difficult than is
//! necessary to handle specific errors in library code. To that end, the
//! errors here stay strongly typed, and only the CLI binary erases them.
//!
//! Note that the synthesis of command vectors is infallible. Everything here
//! describes failures of the layers around it: reading the command line and
//! running the resulting subprocesses.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod execute;
pub mod invocation;

use thiserror::Error;

/// The result type to be used at the boundaries of the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The root of the error hierarchy for the workspace.
///
/// All errors should be able to be implicitly converted to this error type as
/// this is the type that is used at the boundaries of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Invocation(#[from] invocation::Error),

    #[error(transparent)]
    Execute(#[from] execute::Error),
}

impl Error {
    /// Gets the process exit status that the wrapper should terminate with
    /// when it fails with this error.
    ///
    /// Usage errors follow the `argparse` convention of exiting with `2`, while
    /// failures to launch a tool follow the `execvp` convention of `127`.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Invocation(_) => invocation::USAGE_EXIT_CODE,
            Self::Execute(_) => execute::LAUNCH_FAILURE_EXIT_CODE,
        }
    }
}
