use crate::api::ApiError;
use crate::download::DownloadError;
use crate::playback::PlaybackError;
use thiserror::Error;

/// Everything a form can show in its error line. `Display` is the user-facing text.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Please select a file!")]
    NoFileSelected,

    #[error("Invalid file type. Please upload an audio file.")]
    InvalidFileType { mime: String },

    #[error("A request is already in progress")]
    InFlight,

    #[error("{}", .0.server_message().unwrap_or("Upload failed. Please try again."))]
    Submit(#[source] ApiError),

    #[error("Processing failed. Please try again.")]
    ProcessingFailed,

    #[error("{}", .0.server_message().unwrap_or("Translation failed"))]
    Translate(#[source] ApiError),

    #[error("No processed file available to preview")]
    NothingToPreview,

    #[error("Preview failed")]
    Preview(#[source] PlaybackError),

    #[error("No processed file available to download")]
    NothingToDownload,

    #[error("Download failed")]
    Download(#[source] DownloadError),

    #[error("Request stopped before it finished")]
    TaskLost,
}
