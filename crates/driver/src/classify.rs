//! Classification of an invocation into the work that it requires.
//!
//! An invocation may be _compiling_ (it names at least one C source), _linking_
//! (it names sources or objects and was not asked to stop after compilation),
//! both at once, or neither. The last case is called _other_, and is serviced by
//! forwarding the invocation to the compiler unchanged.
//!
//! All of these predicates look only at the suffixes of the remainder tokens,
//! and never touch the filesystem.

use crate::invocation::{Flags, Invocation};

/// The suffix that marks a C source file.
pub const SOURCE_SUFFIX: &str = ".c";

/// The suffix that marks a native object file.
pub const OBJECT_SUFFIX: &str = ".o";

/// Checks whether `token` names a C source file.
#[must_use]
pub fn is_source(token: &str) -> bool {
    token.ends_with(SOURCE_SUFFIX)
}

/// Checks whether `token` names a native object file.
#[must_use]
pub fn is_object(token: &str) -> bool {
    token.ends_with(OBJECT_SUFFIX)
}

/// Checks whether the invocation requires a link step.
///
/// This is never the case when `-c` was given. Otherwise, a link is required
/// if there is at least one source or object in the `remainder`.
#[must_use]
pub fn is_linking(flags: &Flags, remainder: &[String]) -> bool {
    !flags.compile_only && remainder.iter().any(|r| is_source(r) || is_object(r))
}

/// Checks whether the invocation requires compilation of at least one source.
///
/// This is independent of `-c`, as sources are compiled whether or not the
/// result is linked afterwards.
#[must_use]
pub fn is_compiling(_flags: &Flags, remainder: &[String]) -> bool {
    remainder.iter().any(|r| is_source(r))
}

/// Checks whether the invocation is neither compiling nor linking.
#[must_use]
pub fn is_other(flags: &Flags, remainder: &[String]) -> bool {
    !is_linking(flags, remainder) && !is_compiling(flags, remainder)
}

/// The result of classifying a single invocation.
///
/// Note that `compiling` and `linking` are not exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    /// Whether there are sources to compile to bitcode.
    pub compiling: bool,

    /// Whether there is bitcode to link.
    pub linking: bool,
}

impl Classification {
    /// Classifies the provided `invocation`.
    #[must_use]
    pub fn of(invocation: &Invocation) -> Self {
        let flags = invocation.flags();
        let remainder = invocation.remainder();
        let compiling = is_compiling(flags, remainder);
        let linking = is_linking(flags, remainder);

        Self { compiling, linking }
    }

    /// Whether the invocation is neither compiling nor linking, and hence
    /// should be passed through to the compiler.
    #[must_use]
    pub fn is_other(&self) -> bool {
        !self.compiling && !self.linking
    }
}
