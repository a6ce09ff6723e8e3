//! # fifotail binary
//!
//! Wires the pieces together: parse arguments, set up the fifo, run the
//! ingestion loop on stdin + fifo, and translate the outcome into a
//! process exit status.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fifotail::{init_logging, open_fifo, Config, LineBuffer, TailError, Tailer};

/// Live log tailer for named pipes.
///
/// Producers write lines into the fifo; fifotail keeps the most recent N
/// in memory. Press `p` ENTER to dump them to stderr, `q` ENTER to quit.
#[derive(Parser, Debug)]
#[command(name = "fifotail", version, about)]
struct Args {
    /// Path of the named pipe to tail (created if absent)
    #[arg(long, default_value = "debug")]
    fifo: PathBuf,

    /// Number of lines to retain
    #[arg(long, default_value_t = 40)]
    lines: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Every fatal condition is reported on the diagnostic
            // stream, never the data channel.
            eprintln!("fifotail: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), TailError> {
    let config = Config {
        fifo_path: args.fifo,
        line_capacity: args.lines,
    };

    if let Some(err) = config.validate().into_iter().next() {
        return Err(TailError::Config(err));
    }

    eprintln!("fifotail v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "Abort with q <ENTER> and print the last {} lines with p <ENTER>.",
        config.line_capacity
    );

    let buffer = LineBuffer::new(config.line_capacity);
    let fifo = open_fifo(&config.fifo_path)?;

    // Announce the pipe on stdout so producers can find it:
    //   logger_process >> "$(cat)" style scripting, or just `tee`.
    println!("{}", config.fifo_path.display());

    let mut tailer = Tailer::new(io::stdin(), fifo, buffer, io::stderr())?;
    tailer.run()
}
