use std::path::PathBuf;

/// Failure to bring up a device from its descriptor.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch descriptor {path:?}: {source}")]
    Fetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse descriptor: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("descriptor does not match the patch schema: {0}")]
    Schema(String),
    #[error("failed to instantiate processing graph: {0}")]
    Instantiate(String),
    #[error("device load aborted: {0}")]
    Aborted(String),
}

/// Failure of the host audio subsystem.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to build the output stream: {0}")]
    Build(String),
    #[error("failed to resume the output stream: {0}")]
    Resume(String),
}
