//! Configuration of the tools that the driver delegates to.
//!
//! The driver never checks that the configured programs exist. They are
//! handed as-is to the executor, which reports a launch failure if they cannot
//! be run.
//!
//! # Environment
//!
//! When loaded with [`Config::from_env`], the following variables are read.
//! Empty variables are treated as if they were unset.
//!
//! | Variable          | Meaning                                          | Default     |
//! |-------------------|--------------------------------------------------|-------------|
//! | `BITCC_CLANG`     | The bitcode-emitting C compiler.                 | `clang`     |
//! | `BITCC_LLVM_LINK` | The bitcode linker.                              | `llvm-link` |
//! | `BITCC_OBJCOPY`   | The tool used to embed bitcode in native output. | `objcopy`   |
//! | `BITCC_NATIVE_CC` | A native compiler to run before the bitcode ones.| unset       |
//! | `BITCC_DRY_RUN`   | Print the commands instead of running them.      | false       |

/// The environment variable that overrides the bitcode compiler.
pub const COMPILER_VAR: &str = "BITCC_CLANG";

/// The environment variable that overrides the bitcode linker.
pub const LINKER_VAR: &str = "BITCC_LLVM_LINK";

/// The environment variable that overrides the `objcopy` program.
pub const OBJCOPY_VAR: &str = "BITCC_OBJCOPY";

/// The environment variable that enables the native compilation step.
pub const NATIVE_COMPILER_VAR: &str = "BITCC_NATIVE_CC";

/// The environment variable that enables dry-run mode.
pub const DRY_RUN_VAR: &str = "BITCC_DRY_RUN";

/// The default bitcode compiler.
pub const DEFAULT_COMPILER: &str = "clang";

/// The default bitcode linker.
pub const DEFAULT_LINKER: &str = "llvm-link";

/// The default program used to add the bitcode section to the native output.
pub const DEFAULT_OBJCOPY: &str = "objcopy";

/// The configuration of the driver.
///
/// This is read-only once constructed, and is fixed for the lifetime of a
/// single wrapped invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The compiler used to emit LLVM bitcode, and to service pass-through
    /// invocations.
    pub compiler: String,

    /// The linker used to combine bitcode files.
    pub linker: String,

    /// The program used to embed the linked bitcode into the native output.
    pub objcopy: String,

    /// If set, the native compiler that is run with the original arguments
    /// before any bitcode is produced.
    pub native_compiler: Option<String>,

    /// Whether the commands should be printed rather than executed.
    pub dry_run: bool,
}

impl Config {
    /// Starts building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Reads the configuration from the process environment, falling back to
    /// the defaults for anything that is not set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration using `lookup` to resolve each variable name to
    /// its value, if any.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let mut builder = Self::builder();

        if let Some(compiler) = lookup(COMPILER_VAR) {
            builder = builder.with_compiler(compiler);
        }
        if let Some(linker) = lookup(LINKER_VAR) {
            builder = builder.with_linker(linker);
        }
        if let Some(objcopy) = lookup(OBJCOPY_VAR) {
            builder = builder.with_objcopy(objcopy);
        }
        if let Some(native_compiler) = lookup(NATIVE_COMPILER_VAR) {
            builder = builder.with_native_compiler(native_compiler);
        }
        if let Some(dry_run) = lookup(DRY_RUN_VAR) {
            builder = builder.with_dry_run(is_truthy(&dry_run));
        }

        builder.build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Allows for building a [`Config`] while retaining the defaults for fields
/// that do not need to be customized.
///
/// # API Style
///
/// Please note that the API for the builder consumes `self` and is hence
/// designed to have calls chained in the "fluent" API style.
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    compiler:        Option<String>,
    linker:          Option<String>,
    objcopy:         Option<String>,
    native_compiler: Option<String>,
    dry_run:         bool,
}

impl ConfigBuilder {
    /// Creates a new builder with every field left at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies the bitcode compiler.
    #[must_use]
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = Some(compiler.into());
        self
    }

    /// Specifies the bitcode linker.
    #[must_use]
    pub fn with_linker(mut self, linker: impl Into<String>) -> Self {
        self.linker = Some(linker.into());
        self
    }

    /// Specifies the program used to embed bitcode into the native output.
    #[must_use]
    pub fn with_objcopy(mut self, objcopy: impl Into<String>) -> Self {
        self.objcopy = Some(objcopy.into());
        self
    }

    /// Enables the native compilation step, using `native_compiler`.
    #[must_use]
    pub fn with_native_compiler(mut self, native_compiler: impl Into<String>) -> Self {
        self.native_compiler = Some(native_compiler.into());
        self
    }

    /// Specifies whether commands should be printed instead of executed.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        Config {
            compiler:        self.compiler.unwrap_or_else(|| DEFAULT_COMPILER.to_string()),
            linker:          self.linker.unwrap_or_else(|| DEFAULT_LINKER.to_string()),
            objcopy:         self.objcopy.unwrap_or_else(|| DEFAULT_OBJCOPY.to_string()),
            native_compiler: self.native_compiler,
            dry_run:         self.dry_run,
        }
    }
}

/// Interprets a boolean-ish environment value.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
