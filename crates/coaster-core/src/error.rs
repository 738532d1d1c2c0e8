use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoasterError {
    /// A control point index or evaluation parameter with no backing point/segment.
    #[error("No such point: {0}")]
    NoSuchPoint(String),

    /// The arc-length table could not bracket a query fraction.
    #[error("Arc-length lookup failed: {0}")]
    ArcLengthLookup(String),

    #[error("Malformed track file: {0}")]
    MalformedTrack(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl CoasterError {
    /// Whether the error is a per-frame recoverable lookup miss.
    ///
    /// Animation drivers treat these as "skip this frame and reset the
    /// parameter" rather than aborting.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            CoasterError::NoSuchPoint(_) | CoasterError::ArcLengthLookup(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CoasterError>;
