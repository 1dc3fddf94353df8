use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read simulation log {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read simulation log: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: event references undeclared device {device}")]
    UndeclaredDevice { device: u32, line: usize },

    #[error("line {line}: corrupt log, invalid {field} '{token}'")]
    CorruptLog {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("log ended before '{expected}' was seen")]
    MissingMarker { expected: &'static str },
}

impl IngestError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(line: usize, field: &'static str, token: &str) -> Self {
        Self::CorruptLog {
            line,
            field,
            token: token.escape_debug().to_string(),
        }
    }
}
