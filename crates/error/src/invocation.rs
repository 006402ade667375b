//! Error types to do with reading the wrapper's command line.

use thiserror::Error;

/// The exit status used when the command line cannot be understood.
pub const USAGE_EXIT_CODE: i32 = 2;

/// The result type for use while parsing an invocation.
pub type Result<T> = std::result::Result<T, Error>;

/// This error type is for use while turning the raw argument list into a
/// parsed invocation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Emitted when a flag that requires a value (`-o`, `-I`) is the last
    /// argument, or is followed by something that looks like another flag.
    #[error("argument {_0}: expected one argument")]
    MissingValue(String),

    /// Emitted when an argument is not valid Unicode. The payload is the
    /// argument with the invalid sequences replaced.
    #[error("argument {_0:?} is not valid Unicode")]
    NonUnicodeArgument(String),
}
