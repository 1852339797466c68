//! Process exit codes (`§6`): the driver only ever distinguishes three
//! outcomes, unlike the sysexits-style granularity a bytecode-executing VM
//! might want.

#[allow(dead_code)]
#[derive(Debug, Copy, Clone)]
pub enum Code {
    /// No `Error` or `Fatal` diagnostic was reported.
    Success = 0,
    /// At least one `Error` or `Fatal` diagnostic was reported.
    CompilationFailed = 1,
    /// The invocation itself was malformed (bad flags, unreadable input file).
    Usage = 2,
}

/// Prints `message` to stderr and terminates the process with `code`.
pub fn with_code(code: Code, message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(code as i32);
}
