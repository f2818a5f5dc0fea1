use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera is not started")]
    NotStarted,

    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to capture frame: {0}")]
    Capture(String),

    #[error("Failed to read photo '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported photo format: {0}")]
    UnsupportedFormat(String),
}
