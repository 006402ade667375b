//! This library implements a compiler driver that sits in front of a C
//! compiler, and translates compiler-style invocations into invocations of an
//! [LLVM](https://llvm.org) toolchain that produce bitcode alongside the
//! native artifacts.
//!
//! The goal is that any build system able to drive `cc` can, with no changes
//! to the build itself, also produce whole-program LLVM bitcode for the
//! resulting binaries.
//!
//! # Process Overview
//!
//! 1. Response files (`@file`) in the command line are expanded (see
//!    [`response_file`]).
//! 2. The arguments are parsed into an [`Invocation`], made up of the flags we
//!    understand and the _remainder_ that we forward untouched.
//! 3. The invocation is classified (see [`classify`]) as compiling, linking,
//!    both, or neither.
//! 4. The commands that carry out that work are synthesized (see
//!    [`synthesize`]) and collected into a [`Plan`].
//! 5. The plan is executed (see [`execute`]), stopping at the first failure.
//!
//! # Bitcode Layout
//!
//! Every source `foo.c` is compiled to `foo.o.llvm` next to its native object.
//! At link time these are combined with `llvm-link` into `prog.llvm`, which is
//! then embedded into the native `prog` in the `.note.llvm` section by
//! `objcopy`. The bitcode can later be recovered from the binary alone.
//!
//! Steps 2 through 4 are pure: the same configuration and arguments always
//! give the same plan.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod classify;
pub mod command;
pub mod config;
pub mod execute;
pub mod invocation;
pub mod plan;
pub mod response_file;
pub mod synthesize;

use bitcc_errors::Result;

pub use crate::{
    command::CommandVector,
    config::Config,
    execute::{Outcome, ProcessRunner, Runner},
    invocation::{Flags, Invocation},
    plan::Plan,
};

/// Drives a single invocation of the wrapper from the raw arguments through to
/// execution.
#[derive(Debug)]
pub struct Driver<R: Runner> {
    /// The configuration of the tools to delegate to.
    config: Config,

    /// The runner used to execute the planned commands.
    runner: R,
}

impl Driver<ProcessRunner> {
    /// Constructs a driver that runs its commands as real subprocesses.
    #[must_use]
    pub fn with_processes(config: Config) -> Self {
        Self::new(config, ProcessRunner)
    }
}

impl<R: Runner> Driver<R> {
    /// Constructs a new driver with the provided `config`, that executes its
    /// commands using `runner`.
    #[must_use]
    pub fn new(config: Config, runner: R) -> Self {
        Self { config, runner }
    }

    /// Gets the configuration that the driver was created with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Works out the plan for the provided `args`, which should not include
    /// the program name.
    ///
    /// # Errors
    ///
    /// - [`bitcc_errors::invocation::Error`] if the arguments cannot be
    ///   parsed.
    pub fn plan<I, S>(&self, args: I) -> Result<Plan>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments = response_file::expand(args);
        let invocation = Invocation::parse(arguments.iter().cloned())?;

        Ok(Plan::build(&self.config, &invocation, &arguments))
    }

    /// Plans and executes the provided `args`, which should not include the
    /// program name.
    ///
    /// Note that this invokes a state transition that leaves the driver
    /// spent, and hence it consumes the driver to prevent API misuse.
    ///
    /// # Errors
    ///
    /// - [`bitcc_errors::Error`] if the arguments cannot be parsed, or if a
    ///   command cannot be launched.
    pub fn run<I, S>(mut self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let plan = self.plan(args)?;
        let outcome = execute::execute(&plan, &mut self.runner)?;

        Ok(outcome)
    }
}
