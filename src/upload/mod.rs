mod selection;
mod types;
pub mod validation;
mod workflow;

pub use selection::FileSelection;
pub use types::{FileCandidate, FileData, ProcessedArtifact, SelectedFile};
pub use workflow::UploadWorkflow;
