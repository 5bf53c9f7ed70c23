use std::{num::ParseIntError, path::PathBuf};

use crate::{parser::Field, status::UnknownStatus};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: field {field} is not a valid number: {value:?}")]
    InvalidNumber {
        line: usize,
        field: Field,
        value: String,
        source: ParseIntError,
    },

    #[error("line {line}: {source}")]
    UnknownStatus {
        line: usize,
        source: UnknownStatus,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("cannot rank client ip {ip:?}: octets combine to {digits:?}")]
pub struct RankError {
    pub ip: String,
    pub digits: String,
    pub source: ParseIntError,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read log file {}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write report {}", path.display())]
    WriteReport {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to render csv report")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Rank(#[from] RankError),
}
