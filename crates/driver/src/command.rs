//! This module contains the definition of the [`CommandVector`], the unit of
//! work that the driver hands to the executor.

use std::fmt::{Display, Formatter};

use itertools::Itertools;

/// A single subprocess invocation, consisting of the program to run followed
/// by the arguments to pass to it.
///
/// Command vectors are built up in the "fluent" API style and are immutable
/// once built. There is always at least one token: the program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandVector {
    /// The program followed by its arguments, in order.
    tokens: Vec<String>,
}

impl CommandVector {
    /// Creates a new command vector that runs `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        let tokens = vec![program.into()];
        Self { tokens }
    }

    /// Appends a single `arg` to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.tokens.push(arg.into());
        self
    }

    /// Appends each of the provided `args` to the command, in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends `arg` to the command only if `condition` holds.
    #[must_use]
    pub fn arg_if(self, condition: bool, arg: impl Into<String>) -> Self {
        if condition {
            self.arg(arg)
        } else {
            self
        }
    }

    /// Gets the program that this command runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Gets the arguments passed to the program, excluding the program itself.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// Gets the full token sequence, program first.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Display for CommandVector {
    /// Renders the command as its space-separated tokens, as it would be
    /// typed at a shell without any quoting.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}
