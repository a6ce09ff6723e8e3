//! # fifotail
//!
//! A live log tailer for named pipes: producers write an unbounded stream
//! of lines into a fifo, fifotail retains only the most recent N of them,
//! and the operator can dump that window or quit with a single keystroke.
//!
//! ## Architecture Overview
//!
//! The application is structured into independent modules:
//!
//! - `buffer`: Ring buffer retaining the most recent lines
//! - `reader`: Line assembly over the non-blocking data stream
//! - `tailer`: Event loop multiplexing the command and data streams
//! - `fifo`: Named-pipe creation and opening
//! - `config`: Application configuration
//! - `error`: Error types
//!
//! ## Data flow
//!
//! ```text
//! fifo -> LineReader -> LineBuffer::store     (on data readiness)
//! stdin 'p' -> LineBuffer::dump -> stderr     (on command readiness)
//! stdin 'q' -> loop terminates
//! ```
//!
//! Everything runs on one thread; the only suspension point is the
//! indefinite readiness wait inside [`Tailer`].

// ============================================
// MODULE DECLARATIONS
// ============================================

pub mod buffer;
pub mod config;
pub mod error;
pub mod fifo;
pub mod reader;
pub mod tailer;

// ============================================
// RE-EXPORTS
// ============================================

pub use buffer::{Line, LineBuffer, RingBuffer};
pub use config::Config;
pub use error::{TailError, TailResult};
pub use fifo::open_fifo;
pub use reader::{LineReader, ReadOutcome};
pub use tailer::{LoopState, Tailer};

// ============================================
// LOGGING
// ============================================

/// Initialize logging for the process.
///
/// Diagnostics go to stderr, same stream as dumps and the farewell -
/// nothing is ever written to the data channel.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::builder().filter_level(level).try_init();
}
