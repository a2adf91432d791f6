use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("duplicate sink added")]
    DuplicateSink,

    #[error("duplicate destination added")]
    DuplicateDestination,

    #[error("close {0}: destination already closed")]
    AlreadyClosed(String),

    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("invalid sink flag: {0}")]
    InvalidFlag(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LogError>;
