//! This is the CLI for the bitcc compiler wrapper. It is intended to be used
//! in place of `cc`, e.g. by setting `CC=bitcc` for a build. For more detail,
//! please see the documentation for the [`bitcc_driver`] crate.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

mod logging;

use std::ffi::OsString;

use bitcc_driver::{invocation, Config, Driver};
use tracing::info;

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("bitcc: warning: {e:#}");
    }

    let code = match run(Config::from_env(), std::env::args_os().skip(1)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("bitcc: error: {e:#}");
            e.downcast_ref::<bitcc_errors::Error>()
                .map_or(1, bitcc_errors::Error::exit_code)
        }
    };

    std::process::exit(code);
}

/// Runs the wrapper on the raw `args`, returning the status to exit with.
fn run(config: Config, args: impl IntoIterator<Item = OsString>) -> anyhow::Result<i32> {
    let args = invocation::decode(args).map_err(bitcc_errors::Error::from)?;
    info!(?args, "Wrapping invocation");

    let driver = Driver::with_processes(config);

    if driver.config().dry_run {
        for command in &driver.plan(args)? {
            println!("{command}");
        }
        return Ok(0);
    }

    Ok(driver.run(args)?.exit_code())
}
