use std::path::PathBuf;

/// All errors surfaced by the CLI. Parsing itself never fails (lenient
/// core policy); only the I/O layer contributes errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("error reading '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error writing '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error listing directory '{path}': {source}")]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{0}' is not a file or directory")]
    NotFound(PathBuf),

    #[error("no .txt files found in '{0}'")]
    EmptyBatch(PathBuf),
}
