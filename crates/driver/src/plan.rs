//! Assembly of the synthesized commands into an ordered [`Plan`].

use tracing::debug;

use crate::{
    classify::Classification,
    command::CommandVector,
    config::Config,
    invocation::Invocation,
    synthesize::{compile_commands, link_commands, native_command, pass_through_command},
};

/// The ordered sequence of commands that carries out one invocation of the
/// wrapper.
///
/// Each command consumes the outputs of the ones before it, so they must be
/// run strictly in order, stopping at the first failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    commands: Vec<CommandVector>,
}

impl Plan {
    /// Builds the plan for `invocation` under `config`.
    ///
    /// The `arguments` are the wrapper's arguments as originally given, and
    /// are only used for the native step when one is configured.
    ///
    /// The plan consists of, in order:
    ///
    /// 1. The native compiler run, if configured and the invocation is
    ///    compiling or linking.
    /// 2. One bitcode compilation per source, if compiling.
    /// 3. The bitcode link and the embedding of its output, if linking.
    ///
    /// An invocation that is neither compiling nor linking gets a single
    /// pass-through command instead.
    #[must_use]
    pub fn build(config: &Config, invocation: &Invocation, arguments: &[String]) -> Self {
        let classification = Classification::of(invocation);
        debug!(
            compiling = classification.compiling,
            linking = classification.linking,
            "Classified invocation"
        );

        if classification.is_other() {
            return Self::new(vec![pass_through_command(config, invocation)]);
        }

        let mut commands = Vec::new();
        if let Some(native_compiler) = &config.native_compiler {
            commands.push(native_command(native_compiler, arguments));
        }
        if classification.compiling {
            commands.extend(compile_commands(config, invocation));
        }
        if classification.linking {
            commands.extend(link_commands(config, invocation));
        }

        Self::new(commands)
    }

    /// Wraps an already-ordered list of `commands`.
    #[must_use]
    pub fn new(commands: Vec<CommandVector>) -> Self {
        Self { commands }
    }

    /// Gets the commands in the order that they must run.
    #[must_use]
    pub fn commands(&self) -> &[CommandVector] {
        &self.commands
    }
}

impl<'a> IntoIterator for &'a Plan {
    type IntoIter = std::slice::Iter<'a, CommandVector>;
    type Item = &'a CommandVector;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
