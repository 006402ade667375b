//! Expansion of `@file` response-file arguments.
//!
//! Build systems pass long command lines to compilers through response files:
//! an argument `@args.rsp` stands for the arguments contained in `args.rsp`.
//! These have to be expanded before parsing, as they may contain any of the
//! flags that the wrapper cares about.
//!
//! Inside a response file, arguments are separated by whitespace. Single or
//! double quotes group whitespace into an argument, and a backslash escapes the
//! character after it. Response files may themselves refer to other response
//! files.

use tracing::warn;

/// The prefix that marks a response-file argument.
pub const RESPONSE_FILE_PREFIX: char = '@';

/// How deeply response files may refer to each other before we stop
/// expanding.
pub const MAX_DEPTH: usize = 32;

/// Expands every response-file argument in `args`.
///
/// Any response file that cannot be read is left in place verbatim, so that
/// the underlying tools get a chance to interpret it themselves.
pub fn expand<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut expanded = Vec::new();
    for arg in args {
        expand_into(arg.into(), &mut expanded, 0);
    }
    expanded
}

fn expand_into(arg: String, out: &mut Vec<String>, depth: usize) {
    let Some(path) = arg.strip_prefix(RESPONSE_FILE_PREFIX) else {
        out.push(arg);
        return;
    };

    if depth >= MAX_DEPTH {
        warn!(%arg, "Response files are nested too deeply; not expanding");
        out.push(arg);
        return;
    }

    match std::fs::read_to_string(path) {
        Ok(text) => {
            for inner in split(&text) {
                expand_into(inner, out, depth + 1);
            }
        }
        Err(error) => {
            warn!(%arg, %error, "Could not read response file; passing it through");
            out.push(arg);
        }
    }
}

/// Splits the contents of a response file into its arguments.
///
/// Empty arguments (e.g. `""`) are dropped.
#[must_use]
pub fn split(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (c, quote) {
            ('\\', _) => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ('"' | '\'', None) => quote = Some(c),
            ('"' | '\'', Some(open)) if open == c => quote = None,
            (c, None) if c.is_whitespace() => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            (c, _) => current.push(c),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}
