//! Manifest persistence error types.

/// Errors that can occur when loading, saving, or parsing a pack manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Failed to read the manifest file from disk.
    #[error("failed to read manifest: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the manifest file to disk.
    #[error("failed to write manifest: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse manifest: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize the manifest to RON.
    #[error("failed to serialize manifest: {0}")]
    SerializeError(#[source] ron::Error),
}
