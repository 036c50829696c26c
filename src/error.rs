use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can stop a report run. None of these are retried.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to list {resource}{}: {source}", namespace_suffix(.namespace.as_deref()))]
    Cluster {
        resource: &'static str,
        namespace: Option<String>,
        #[source]
        source: BoxError,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path {} exists, but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("invalid quantity '{0}'")]
    Quantity(String),

    #[error("failed to read config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn namespace_suffix(namespace: Option<&str>) -> String {
    namespace
        .map(|ns| format!(" in namespace '{ns}'"))
        .unwrap_or_default()
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;
