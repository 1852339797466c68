//! Driver binary for the ferrolite compiler (`§6`): parses CLI flags, reads a
//! source file, runs the pipeline, prints diagnostics, and exits with the
//! contract `§6` specifies — `0` on success, `1` if any `Error`/`Fatal` was
//! reported, `2` on invocation errors.

mod cli;
mod compilation_pipeline;
mod exit;

use std::fs;

use clap::Parser as ClapParser;
use cli::{Cli, Command};
use compilation_pipeline::{CompilationPipeline, render};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        exit::with_code(exit::Code::Usage, "error: no command given, try `ferrolite compile <file>`");
    };

    let Command::Compile { input, emit, max_errors, verbose, .. } = &command;
    let recovery_mode = command.recovery_enabled();

    init_tracing(*verbose);

    let source = match fs::read_to_string(input) {
        Ok(source) => source,
        Err(err) => exit::with_code(exit::Code::Usage, &format!("error: cannot read '{input}': {err}")),
    };

    let result = CompilationPipeline::new(&source, Some(input.clone()), *max_errors, recovery_mode).run();
    result.diagnostics.report_all(&source);

    if let Some(ir) = &result.ir {
        println!("{}", render(ir, *emit));
    }

    if result.diagnostics.has_errors() {
        std::process::exit(exit::Code::CompilationFailed as i32);
    }
}

/// Sets the tracing subscriber's filter from `-v`/`--verbose` repeat count,
/// but lets `RUST_LOG` override it when set (`§6`: "honored only to adjust
/// the verbosity of ambient tracing output, never to change compilation
/// results").
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}
