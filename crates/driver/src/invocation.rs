//! Reading of the wrapper's command line into an [`Invocation`].
//!
//! The wrapper only understands four flags: `-c`, `-o`, `-I` and `-v`.
//! Everything else is kept, in order, as the _remainder_ of the invocation and
//! forwarded to the underlying tools. This mirrors the "parse known arguments"
//! behaviour of typical scripting-language argument parsers, rather than that of
//! a strict CLI parser that would reject unknown options.
//!
//! Both the separated (`-o prog`) and attached (`-oprog`, `-o=prog`) forms of
//! the valued flags are recognised, as are clusters of the boolean flags such
//! as `-cv`. Nothing after a `--` is treated as a flag.

use std::ffi::OsString;

use bitcc_errors::invocation::{Error, Result};

/// Suppresses the link step.
pub const COMPILE_ONLY_FLAG: &str = "-c";

/// Names the output of the link step.
pub const OUTPUT_FLAG: &str = "-o";

/// Adds a directory to the include search path.
pub const INCLUDE_FLAG: &str = "-I";

/// Asks the tools to be verbose.
pub const VERBOSE_FLAG: &str = "-v";

/// Marks the end of the flags. It is forwarded along with everything after it.
pub const END_OF_FLAGS: &str = "--";

/// The flags that the wrapper understands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Set by `-c`: compile only, do not link.
    pub compile_only: bool,

    /// The value of the last `-o`, if any.
    pub output: Option<String>,

    /// The values of every `-I`, in the order they were given.
    pub include_dirs: Vec<String>,

    /// Set by `-v`.
    pub verbose: bool,
}

/// A parsed invocation of the wrapper.
///
/// This is immutable once constructed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    flags:     Flags,
    remainder: Vec<String>,
}

impl Invocation {
    /// Creates an invocation directly from its parts.
    #[must_use]
    pub fn new(flags: Flags, remainder: Vec<String>) -> Self {
        Self { flags, remainder }
    }

    /// Parses the provided `args`, which should _not_ include the program
    /// name.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingValue`] if `-o` or `-I` is not followed by a value.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut flags = Flags::default();
        let mut remainder = Vec::new();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            if arg == END_OF_FLAGS {
                remainder.push(arg);
                remainder.extend(&mut args);
                break;
            }

            match recognize(&arg) {
                Token::Switches {
                    compile_only,
                    verbose,
                } => {
                    flags.compile_only |= compile_only;
                    flags.verbose |= verbose;
                }
                Token::Output(attached) => {
                    flags.output = Some(value_for(OUTPUT_FLAG, attached, &mut args)?);
                }
                Token::Include(attached) => {
                    flags.include_dirs.push(value_for(INCLUDE_FLAG, attached, &mut args)?);
                }
                Token::Other => remainder.push(arg),
            }
        }

        Ok(Self::new(flags, remainder))
    }

    /// Gets the flags that were recognised.
    #[must_use]
    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Gets every argument that was not a recognised flag, in order.
    #[must_use]
    pub fn remainder(&self) -> &[String] {
        &self.remainder
    }
}

/// What a single argument turned out to be.
enum Token {
    /// `-c`, `-v`, or a cluster of them such as `-cv`.
    Switches { compile_only: bool, verbose: bool },

    /// `-o`, with the attached value if there was one.
    Output(Option<String>),

    /// `-I`, with the attached value if there was one.
    Include(Option<String>),

    Other,
}

fn recognize(arg: &str) -> Token {
    if let Some(value) = arg.strip_prefix(OUTPUT_FLAG) {
        Token::Output(attached(value))
    } else if let Some(value) = arg.strip_prefix(INCLUDE_FLAG) {
        Token::Include(attached(value))
    } else {
        switches(arg).unwrap_or(Token::Other)
    }
}

/// Gets the value written directly after a valued flag, where `-o=prog` is
/// the same as `-oprog`.
fn attached(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.strip_prefix('=').unwrap_or(value).to_string())
    }
}

/// Recognises `-c`, `-v` and any cluster made only of those letters.
///
/// Clusters that mix in other letters (`-coverage`, `-version`) belong to the
/// underlying tools and are left alone.
fn switches(arg: &str) -> Option<Token> {
    let letters = arg.strip_prefix('-').filter(|letters| !letters.is_empty())?;
    let compile_only = &COMPILE_ONLY_FLAG[1..];
    let verbose = &VERBOSE_FLAG[1..];

    letters
        .chars()
        .all(|letter| compile_only.contains(letter) || verbose.contains(letter))
        .then(|| Token::Switches {
            compile_only: letters.contains(compile_only),
            verbose:      letters.contains(verbose),
        })
}

/// Resolves the value for `flag`, taking it from the following argument if it
/// was not attached.
///
/// A following argument that looks like a flag is not accepted as a value,
/// with the exception of a lone `-`.
fn value_for(
    flag: &str,
    attached: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String> {
    if let Some(value) = attached {
        return Ok(value);
    }

    match rest.next() {
        Some(value) if value == "-" || !value.starts_with('-') => Ok(value),
        _ => Err(Error::MissingValue(flag.to_string())),
    }
}

/// Converts the raw process arguments into strings.
///
/// # Errors
///
/// - [`Error::NonUnicodeArgument`] for the first argument that is not valid
///   Unicode.
pub fn decode<I>(args: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| Error::NonUnicodeArgument(arg.to_string_lossy().into_owned()))
        })
        .collect()
}
