use crate::error::WorkflowError;
use crate::upload::{validation, FileCandidate, FileData, SelectedFile};
use std::path::PathBuf;
use tracing::{debug, warn};

/// The file slot of a form: what is selected, the visible error line, and the
/// drop-zone hover state.
#[derive(Debug, Default)]
pub struct FileSelection {
    selected: Option<SelectedFile>,
    error: Option<String>,
    dragging: bool,
    picker_dir: Option<PathBuf>,
}

impl FileSelection {
    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: &WorkflowError) {
        self.error = Some(error.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Directory the next file dialog opens in.
    pub fn picker_dir(&self) -> Option<&PathBuf> {
        self.picker_dir.as_ref()
    }

    /// Stores `candidate` if its type is allowed. A rejected candidate leaves
    /// the current selection in place.
    pub fn select(&mut self, candidate: FileCandidate) -> Result<(), WorkflowError> {
        if !validation::is_valid_file_type(&candidate.mime) {
            warn!(
                "Rejected '{}' with unsupported type {}",
                candidate.name, candidate.mime
            );
            let error = WorkflowError::InvalidFileType {
                mime: candidate.mime,
            };
            self.set_error(&error);
            return Err(error);
        }

        if let FileData::Path(path) = &candidate.data {
            self.picker_dir = path.parent().map(|p| p.to_path_buf());
        }
        debug!("Selected '{}' ({} bytes)", candidate.name, candidate.size);
        self.selected = Some(candidate.into());
        self.error = None;
        Ok(())
    }

    /// Drop events may carry several files; only the first counts.
    pub fn select_dropped(
        &mut self,
        candidates: impl IntoIterator<Item = FileCandidate>,
    ) -> Result<(), WorkflowError> {
        self.dragging = false;
        match candidates.into_iter().next() {
            Some(first) => self.select(first),
            None => Ok(()),
        }
    }

    pub fn remove(&mut self) {
        self.selected = None;
        self.picker_dir = None;
    }

    /// The selection, if it may be submitted. Sets the error line otherwise.
    pub fn validated(&mut self) -> Result<SelectedFile, WorkflowError> {
        let result = match &self.selected {
            None => Err(WorkflowError::NoFileSelected),
            Some(file) if !validation::is_valid_file_type(&file.mime) => {
                Err(WorkflowError::InvalidFileType {
                    mime: file.mime.clone(),
                })
            }
            Some(file) => Ok(file.clone()),
        };
        if let Err(error) = &result {
            self.set_error(error);
        }
        result
    }
}
