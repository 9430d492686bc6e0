// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: CLI tools are expected to print errors to stderr.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

use std::io::Write;

use clap::Parser;

use langcheck_cli::cli::{self, Cli, EXIT_FAILURE};
use langcheck_cli::logging;

fn main() {
    let args = Cli::parse();
    logging::init(args.verbose);

    let mut stdout = std::io::stdout().lock();
    let code = match cli::run(&args, &mut stdout) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_FAILURE
        }
    };
    // process::exit skips destructors, so flush explicitly.
    let _ = stdout.flush();
    std::process::exit(i32::from(code));
}
