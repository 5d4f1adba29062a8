//! The ways a render can fail.  None of them are recoverable: a bad
//! configuration is rejected before any worker starts, and anything
//! that goes wrong during the gather fails the whole image.  There
//! is no partial image.

use std::io;

/// Everything that can go wrong between configuring a render and
/// handing the finished image to whoever asked for it.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The dimensions, plane bounds, iteration cap, or worker count
    /// make no sense.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// A worker's contribution didn't match the number of bytes its
    /// row assignment says it should have sent.
    #[fail(
        display = "worker {} contributed {} bytes, expected {}",
        rank, received, expected
    )]
    AssemblyMismatch {
        /// The worker that sent the contribution.
        rank: usize,
        /// What its assignment says it owes.
        expected: usize,
        /// What actually arrived.
        received: usize,
    },

    /// The same worker contributed twice.
    #[fail(display = "worker {} contributed more than once", _0)]
    DuplicateContribution(usize),

    /// A worker went away before contributing its rows.
    #[fail(display = "worker {} never reached the gather", _0)]
    WorkerUnreachable(usize),

    /// A worker's thread panicked.
    #[fail(display = "worker {} panicked", _0)]
    WorkerPanicked(usize),

    /// Writing the finished image failed.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}
