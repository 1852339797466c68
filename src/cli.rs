use clap::{Parser as ClapParser, Subcommand, ValueEnum};

/// Command line interface for the ferrolite compiler.
#[derive(ClapParser)]
#[command(
    name = "ferrolite",
    version,
    about = "Front end and optimizer for a small statically-typed language",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a source file, print its diagnostics, and emit the resulting IR
    Compile {
        /// Input source file
        input: String,

        /// What form to print after a successful pipeline run
        #[arg(long, value_enum, default_value_t = Emit::Ir)]
        emit: Emit,

        /// Diagnostics cap; compilation stops collecting more past this (`§4.1`)
        #[arg(long, default_value_t = 100)]
        max_errors: usize,

        /// Keep going past a recoverable error instead of stopping at the first one
        #[arg(long, default_value_t = true)]
        recovery: bool,

        /// Disable recovery: stop at the first recoverable error
        #[arg(long)]
        no_recovery: bool,

        /// Raise the tracing subscriber's verbosity; repeat for more (`§10.1`)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
}

/// The two `--emit` renderings described in `§6`'s "IR surface".
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Emit {
    /// Indented, depth-first tree text.
    Ir,
    /// Flat, stack-machine-style instruction stream.
    Asm,
}

impl Command {
    pub fn recovery_enabled(&self) -> bool {
        match self {
            Command::Compile { recovery, no_recovery, .. } => *recovery && !*no_recovery,
        }
    }
}
