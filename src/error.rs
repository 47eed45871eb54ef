use std::io;

use thiserror::Error;

/// Faults from the terminal collaborators. Gameplay itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("input reader thread panicked")]
    InputThreadPanicked,

    #[error("interrupted by user")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, Error>;
