use std::io;

use thiserror::Error;

use crate::TermInt;

#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("terminal is {columns}x{rows}, the game needs at least {min_columns}x{min_rows}")]
    TerminalTooSmall {
        columns: TermInt,
        rows: TermInt,
        min_columns: TermInt,
        min_rows: TermInt,
    },
}

pub type SnakeResult<T> = Result<T, SnakeError>;
