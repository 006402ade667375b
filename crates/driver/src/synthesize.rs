//! Synthesis of the command vectors that carry out a classified invocation.
//!
//! Each function here assumes that the corresponding predicate in
//! [`crate::classify`] already holds for the invocation, and does not check it
//! again. Nothing is validated beyond suffix matching, so odd inputs (such as a
//! bare `.c`) produce odd but well-formed commands rather than errors.
//!
//! # File Naming
//!
//! The bitcode artifacts sit next to the native ones:
//!
//! - A source `foo.c` is compiled to `foo.o.llvm`.
//! - An object `bar.o` is expected to have a sibling `bar.o.llvm`.
//! - A link output `prog` gets its bitcode in `prog.llvm`, which is then
//!   embedded into `prog` under the [`BITCODE_SECTION`] section.

use tracing::debug;

use crate::{
    classify::{is_object, is_source, SOURCE_SUFFIX},
    command::CommandVector,
    config::Config,
    invocation::{Invocation, COMPILE_ONLY_FLAG, INCLUDE_FLAG, OUTPUT_FLAG, VERBOSE_FLAG},
};

/// The suffix appended to a native artifact's name to get its bitcode sibling.
pub const BITCODE_SUFFIX: &str = ".llvm";

/// The link output used when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "a.out";

/// The name of the section in the native output that holds its bitcode.
pub const BITCODE_SECTION: &str = ".note.llvm";

/// Gets the bitcode object name for a `source` file, i.e. `foo.c` becomes
/// `foo.o.llvm`.
#[must_use]
pub fn bitcode_for_source(source: &str) -> String {
    let stem = source.strip_suffix(SOURCE_SUFFIX).unwrap_or(source);
    format!("{stem}.o{BITCODE_SUFFIX}")
}

/// Gets the bitcode sibling of a native `object`, i.e. `bar.o` becomes
/// `bar.o.llvm`.
#[must_use]
pub fn bitcode_for_object(object: &str) -> String {
    format!("{object}{BITCODE_SUFFIX}")
}

/// Builds one bitcode compilation command per source in the invocation, in
/// the order that the sources appear.
///
/// Every remainder token that is neither a source nor an object is forwarded
/// to each of the commands.
#[must_use]
pub fn compile_commands(config: &Config, invocation: &Invocation) -> Vec<CommandVector> {
    let flags = invocation.flags();
    let remainder = invocation.remainder();
    let passthrough = remainder
        .iter()
        .filter(|r| !is_source(r) && !is_object(r))
        .collect::<Vec<_>>();

    remainder
        .iter()
        .filter(|r| is_source(r))
        .map(|source| {
            let command = CommandVector::new(&config.compiler)
                .arg(source)
                .arg(COMPILE_ONLY_FLAG)
                .arg("-emit-llvm")
                .arg(OUTPUT_FLAG)
                .arg(bitcode_for_source(source))
                .args(flags.include_dirs.iter().map(|dir| format!("{INCLUDE_FLAG}{dir}")))
                .arg_if(flags.verbose, VERBOSE_FLAG)
                .args(passthrough.iter().copied());
            debug!(%command, "Synthesized compile command");
            command
        })
        .collect()
}

/// Builds the commands that link the invocation's bitcode and embed the
/// result into the native output.
///
/// There are always exactly two commands: the bitcode link, which must run
/// first, and the `objcopy` that embeds its output.
#[must_use]
pub fn link_commands(config: &Config, invocation: &Invocation) -> Vec<CommandVector> {
    let linker_output = invocation
        .flags()
        .output
        .as_deref()
        .unwrap_or(DEFAULT_OUTPUT);
    let llvm_output = format!("{linker_output}{BITCODE_SUFFIX}");

    let inputs = invocation.remainder().iter().filter_map(|r| {
        if is_source(r) {
            Some(bitcode_for_source(r))
        } else if is_object(r) {
            Some(bitcode_for_object(r))
        } else {
            None
        }
    });
    let link = CommandVector::new(&config.linker)
        .arg(format!("{OUTPUT_FLAG}={llvm_output}"))
        .args(inputs);
    debug!(command = %link, "Synthesized link command");

    let embed = CommandVector::new(&config.objcopy)
        .arg("--add-section")
        .arg(format!("{BITCODE_SECTION}={llvm_output}"))
        .arg(linker_output);
    debug!(command = %embed, "Synthesized embed command");

    vec![link, embed]
}

/// Builds the command that forwards an invocation that is neither compiling
/// nor linking straight to the compiler.
#[must_use]
pub fn pass_through_command(config: &Config, invocation: &Invocation) -> CommandVector {
    let command = CommandVector::new(&config.compiler)
        .arg_if(invocation.flags().verbose, VERBOSE_FLAG)
        .args(invocation.remainder());
    debug!(%command, "Synthesized pass-through command");
    command
}

/// Builds the command that runs the native compiler with the wrapper's
/// original `arguments`, unchanged.
#[must_use]
pub fn native_command(native_compiler: &str, arguments: &[String]) -> CommandVector {
    CommandVector::new(native_compiler).args(arguments)
}

#[cfg(test)]
mod test {
    use crate::{
        command::CommandVector,
        config::Config,
        invocation::Invocation,
        synthesize::{
            bitcode_for_object,
            bitcode_for_source,
            compile_commands,
            link_commands,
            native_command,
            pass_through_command,
        },
    };

    fn config() -> Config {
        Config::builder()
            .with_compiler("CLANG")
            .with_linker("LLVM_LINK")
            .build()
    }

    fn tokens(commands: &[CommandVector]) -> Vec<Vec<String>> {
        commands.iter().map(|c| c.tokens().to_vec()).collect()
    }

    #[test]
    fn bitcode_names_follow_their_native_artifacts() {
        assert_eq!(bitcode_for_source("src/foo.c"), "src/foo.o.llvm");
        assert_eq!(bitcode_for_object("bar.o"), "bar.o.llvm");
    }

    #[test]
    fn bare_source_suffix_is_stripped_without_complaint() {
        assert_eq!(bitcode_for_source(".c"), ".o.llvm");
    }

    #[test]
    fn compiles_each_source_in_order() -> anyhow::Result<()> {
        let invocation = Invocation::parse(["b.c", "x.o", "a.c", "-c"])?;
        let commands = compile_commands(&config(), &invocation);

        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0].tokens(),
            &["CLANG", "b.c", "-c", "-emit-llvm", "-o", "b.o.llvm"]
        );
        assert_eq!(
            commands[1].tokens(),
            &["CLANG", "a.c", "-c", "-emit-llvm", "-o", "a.o.llvm"]
        );

        Ok(())
    }

    #[test]
    fn compile_forwards_includes_verbosity_and_other_arguments() -> anyhow::Result<()> {
        let invocation =
            Invocation::parse(["-Wall", "-I", "inc", "foo.c", "-v", "bar.o", "-Ilib", "-DX=1"])?;
        let commands = compile_commands(&config(), &invocation);

        assert_eq!(
            tokens(&commands),
            vec![vec![
                "CLANG",
                "foo.c",
                "-c",
                "-emit-llvm",
                "-o",
                "foo.o.llvm",
                "-Iinc",
                "-Ilib",
                "-v",
                "-Wall",
                "-DX=1",
            ]]
        );

        Ok(())
    }

    #[test]
    fn every_compile_command_gets_the_same_forwarded_arguments() -> anyhow::Result<()> {
        let invocation = Invocation::parse(["a.c", "-O2", "b.c"])?;
        let commands = compile_commands(&config(), &invocation);

        for command in &commands {
            assert_eq!(command.tokens().last().map(String::as_str), Some("-O2"));
            assert!(command.tokens().iter().any(|t| t == "-emit-llvm"));
        }

        Ok(())
    }

    #[test]
    fn link_defaults_to_a_out() -> anyhow::Result<()> {
        let invocation = Invocation::parse(["foo.c"])?;
        let commands = link_commands(&config(), &invocation);

        assert_eq!(
            tokens(&commands),
            vec![
                vec!["LLVM_LINK", "-o=a.out.llvm", "foo.o.llvm"],
                vec!["objcopy", "--add-section", ".note.llvm=a.out.llvm", "a.out"],
            ]
        );

        Ok(())
    }

    #[test]
    fn link_interleaves_inputs_in_remainder_order() -> anyhow::Result<()> {
        let invocation = Invocation::parse(["x.o", "-lm", "a.c", "y.o", "-o", "prog"])?;
        let commands = link_commands(&config(), &invocation);

        assert_eq!(
            commands[0].tokens(),
            &["LLVM_LINK", "-o=prog.llvm", "x.o.llvm", "a.o.llvm", "y.o.llvm"]
        );
        assert_eq!(
            commands[1].tokens(),
            &["objcopy", "--add-section", ".note.llvm=prog.llvm", "prog"]
        );

        Ok(())
    }

    #[test]
    fn link_uses_the_configured_objcopy() -> anyhow::Result<()> {
        let config = Config::builder().with_objcopy("llvm-objcopy").build();
        let invocation = Invocation::parse(["bar.o"])?;
        let commands = link_commands(&config, &invocation);

        assert_eq!(commands[1].program(), "llvm-objcopy");

        Ok(())
    }

    #[test]
    fn pass_through_forwards_everything() -> anyhow::Result<()> {
        let invocation = Invocation::parse(["-E", "-v", "foo.h", "-DX"])?;
        let command = pass_through_command(&config(), &invocation);

        assert_eq!(command.tokens(), &["CLANG", "-v", "-E", "foo.h", "-DX"]);

        Ok(())
    }

    #[test]
    fn synthesis_is_idempotent() -> anyhow::Result<()> {
        let config = config();
        let invocation = Invocation::parse(["-Iinc", "-v", "a.c", "b.o", "-Wextra"])?;

        assert_eq!(
            compile_commands(&config, &invocation),
            compile_commands(&config, &invocation)
        );
        assert_eq!(
            link_commands(&config, &invocation),
            link_commands(&config, &invocation)
        );
        assert_eq!(
            pass_through_command(&config, &invocation),
            pass_through_command(&config, &invocation)
        );

        Ok(())
    }

    #[test]
    fn native_command_keeps_arguments_verbatim() {
        let args = vec!["-c".to_string(), "foo.c".to_string(), "-Iinc".to_string()];

        assert_eq!(
            native_command("gcc", &args).tokens(),
            &["gcc", "-c", "foo.c", "-Iinc"]
        );
    }
}
