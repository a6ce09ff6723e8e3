//! # Ingestion Loop Module
//!
//! The event loop that drives the whole program.
//!
//! ## Plain English
//!
//! One thread, two mailboxes, one clerk. The clerk sleeps until either
//! mailbox has something in it:
//! - The COMMAND mailbox (the operator's keyboard): a single letter
//!   telling us to dump the window or quit
//! - The DATA mailbox (the fifo): log lines from producers
//!
//! When the data mailbox rings, the clerk empties it completely before
//! going back to sleep - the doorbell is edge-triggered and won't ring
//! again for mail that's already inside.
//!
//! ## How the wait works
//!
//! [`mio::Poll`] wraps the platform's readiness primitive (epoll on
//! Linux, kqueue on macOS). Both input sources are registered as raw file
//! descriptors via [`SourceFd`], each with its own [`Token`] so the loop
//! knows which one woke it. The wait has no timeout; absent input it
//! blocks forever.

use std::io::{ErrorKind, Read, Write};
use std::os::fd::AsRawFd;

use mio::unix::SourceFd;
use mio::{Events, Interest, Poll, Token};

use crate::buffer::LineBuffer;
use crate::error::{TailError, TailResult};
use crate::reader::{LineReader, ReadOutcome};

/// Capacity for the [`mio::Events`] buffer. Two sources, so tiny.
const EVENTS_CAPACITY: usize = 4;

/// Scratch space for draining command bytes in one readiness wakeup.
const COMMAND_READ_BUFFER_SIZE: usize = 64;

// ============================================
// READY SOURCES
// ============================================

/// Identifies which event source became ready.
///
/// Single source of truth for the [`Token`] <-> source mapping: tokens go
/// in at registration via [`to_token`] and come back out of the poll via
/// [`from_token`].
///
/// [`to_token`]: SourceReady::to_token
/// [`from_token`]: SourceReady::from_token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceReady {
    /// The command stream has input (operator pressed a key).
    Command,
    /// The data stream has input (a producer wrote to the fifo).
    Data,
    /// Unknown token - should not happen in normal operation.
    Unknown,
}

impl SourceReady {
    /// Returns the [`Token`] used to register this source.
    pub const fn to_token(self) -> Token {
        match self {
            Self::Command => Token(0),
            Self::Data => Token(1),
            Self::Unknown => Token(usize::MAX),
        }
    }

    /// Converts a polled [`Token`] back to the source it belongs to.
    pub const fn from_token(token: Token) -> Self {
        match token.0 {
            0 => Self::Command,
            1 => Self::Data,
            _ => Self::Unknown,
        }
    }
}

// ============================================
// LOOP STATE
// ============================================

/// The ingestion loop's state machine. Two states, one transition.
///
/// `Running -> Terminated` happens only on the quit command or a fatal
/// multiplex error; `Terminated` is terminal and triggers teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for input and dispatching.
    Running,
    /// Done; no further reads on either stream.
    Terminated,
}

// ============================================
// TAILER
// ============================================

/// The ingestion loop: multiplexes the command and data streams and owns
/// the retention buffer.
///
/// ## Per-iteration protocol
///
/// 1. Block (no timeout) until either source is ready. An interrupted
///    wait is retried; any other wait failure is fatal.
/// 2. Command ready: drain the available bytes and act on each -
///    `q` quits with a farewell on the diagnostic sink, `p` dumps the
///    retained window to the diagnostic sink, anything else is ignored.
/// 3. Data ready: read lines and store them until nothing more is
///    available right now. This drains everything the OS buffered for
///    one readiness notification.
///
/// Command handling and data draining mutate disjoint state, so the
/// order they run in within one wakeup doesn't matter - except that a
/// quit stops the iteration immediately.
pub struct Tailer<C, D, W>
where
    C: Read + AsRawFd,
    D: Read + AsRawFd,
    W: Write,
{
    /// Readiness multiplexer over the two input descriptors
    poll: Poll,

    /// Buffer for events returned by the poll
    events: Events,

    /// The operator's command stream (stdin in production)
    command: C,

    /// Line assembly over the data stream (the fifo in production)
    reader: LineReader<D>,

    /// The retention window
    buffer: LineBuffer,

    /// Where dumps, the farewell, and other operator-facing text go
    /// (stderr in production - never the data channel)
    diag: W,
}

impl<C, D, W> Tailer<C, D, W>
where
    C: Read + AsRawFd,
    D: Read + AsRawFd,
    W: Write,
{
    /// Creates the loop and registers both sources with the poll.
    ///
    /// ## Errors
    ///
    /// Fails with [`TailError::Multiplex`] if the poll can't be created
    /// or a source can't be registered - fatal at startup, the loop
    /// never runs.
    pub fn new(command: C, data: D, buffer: LineBuffer, diag: W) -> TailResult<Self> {
        let poll = Poll::new().map_err(TailError::Multiplex)?;

        poll.registry()
            .register(
                &mut SourceFd(&command.as_raw_fd()),
                SourceReady::Command.to_token(),
                Interest::READABLE,
            )
            .map_err(TailError::Multiplex)?;

        poll.registry()
            .register(
                &mut SourceFd(&data.as_raw_fd()),
                SourceReady::Data.to_token(),
                Interest::READABLE,
            )
            .map_err(TailError::Multiplex)?;

        Ok(Self {
            poll,
            events: Events::with_capacity(EVENTS_CAPACITY),
            command,
            reader: LineReader::new(data),
            buffer,
            diag,
        })
    }

    /// Runs the loop until the quit command or a fatal multiplex error.
    pub fn run(&mut self) -> TailResult<()> {
        log::info!("entering ingestion loop");

        loop {
            if self.step()? == LoopState::Terminated {
                log::info!("ingestion loop terminated");
                return Ok(());
            }
        }
    }

    /// One iteration: block until a source is ready, then dispatch.
    pub fn step(&mut self) -> TailResult<LoopState> {
        if let Err(err) = self.poll.poll(&mut self.events, None) {
            if err.kind() == ErrorKind::Interrupted {
                // EINTR - retry on the next iteration.
                return Ok(LoopState::Running);
            }
            log::error!("readiness wait failed: {}", err);
            return Err(TailError::Multiplex(err));
        }

        // Collect first; dispatching needs `&mut self`.
        let ready: Vec<Token> = self.events.iter().map(|ev| ev.token()).collect();

        for token in ready {
            match SourceReady::from_token(token) {
                SourceReady::Command => {
                    if self.handle_commands() == LoopState::Terminated {
                        return Ok(LoopState::Terminated);
                    }
                }
                SourceReady::Data => self.drain_data(),
                SourceReady::Unknown => {
                    log::warn!("readiness event with unknown token {:?}", token);
                }
            }
        }

        Ok(LoopState::Running)
    }

    /// Returns the retention buffer.
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Handles the command stream becoming readable.
    ///
    /// Drains whatever bytes are available - the registration is
    /// edge-triggered, so a byte left behind would not wake us again.
    /// A full scratch buffer means more bytes are likely still queued,
    /// so the read repeats until a short read or would-block says we
    /// have caught up. Command read failures are logged and ignored;
    /// only `q` changes the loop state.
    fn handle_commands(&mut self) -> LoopState {
        let mut buf = [0u8; COMMAND_READ_BUFFER_SIZE];

        loop {
            let n = match self.command.read(&mut buf) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    return LoopState::Running;
                }
                Err(e) => {
                    log::error!("command read failed: {}", e);
                    return LoopState::Running;
                }
            };

            for &byte in &buf[..n] {
                match byte {
                    b'q' => {
                        let _ = writeln!(self.diag, "bye.");
                        return LoopState::Terminated;
                    }
                    b'p' => {
                        log::debug!("dumping {} retained lines", self.buffer.len());
                        if let Err(e) = self.buffer.dump(&mut self.diag) {
                            log::error!("dump failed: {}", e);
                        }
                    }
                    // Everything else (including the ENTER after a
                    // command) is ignored.
                    _ => {}
                }
            }

            // A short read (zero included) means the stream is drained.
            if n < buf.len() {
                return LoopState::Running;
            }
        }
    }

    /// Handles the data stream becoming readable.
    ///
    /// Stores lines until the reader reports nothing more is available.
    /// A read error ends the drain for this wakeup - reported, but the
    /// loop itself keeps running.
    fn drain_data(&mut self) {
        loop {
            match self.reader.read_line() {
                Ok(ReadOutcome::Line(line)) => self.buffer.store(line),
                Ok(ReadOutcome::NoDataNow) => break,
                Err(e) => {
                    log::error!("{}", TailError::from(e));
                    break;
                }
            }
        }
    }
}

// ============================================
// TESTS
// ============================================
