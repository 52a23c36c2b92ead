use crate::api::{ApiClient, ApiError, UploadResponse};
use crate::error::WorkflowError;
use crate::task::{take_finished, Pending};
use crate::upload::{FileCandidate, FileSelection, ProcessedArtifact};
use derivative::Derivative;
use tokio::runtime::Handle;
use tracing::{error, info, warn};

/// Select, validate and submit one audio file to the processing endpoint.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct UploadWorkflow {
    selection: FileSelection,
    #[derivative(Debug = "ignore")]
    pending: Option<Pending<Result<UploadResponse, ApiError>>>,
}

impl UploadWorkflow {
    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut FileSelection {
        &mut self.selection
    }

    pub fn select_file(&mut self, candidate: FileCandidate) -> Result<(), WorkflowError> {
        self.selection.select(candidate)
    }

    pub fn remove_file(&mut self) {
        self.selection.remove();
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.selection.selected().is_some() && !self.is_loading()
    }

    /// Starts the upload. Fails without touching the network when nothing
    /// valid is selected or an upload is already running.
    pub fn submit(&mut self, handle: &Handle, client: &ApiClient) -> Result<(), WorkflowError> {
        if self.is_loading() {
            return Err(WorkflowError::InFlight);
        }
        let file = self.selection.validated()?;
        self.selection.clear_error();

        info!("Submitting '{}' for processing", file.name);
        let client = client.clone();
        self.pending = Some(Pending::spawn(handle, async move {
            client.upload(&file).await
        }));
        Ok(())
    }

    /// Drains a finished upload. `on_processed` runs once with the returned
    /// artifact reference; failures land in the error line.
    pub fn poll(&mut self, on_processed: impl FnOnce(ProcessedArtifact)) {
        let Some(result) = take_finished(&mut self.pending) else {
            return;
        };

        let outcome = result
            .and_then(|response| match response {
                Ok(response) => Ok(response),
                // A success status whose body carries no readable result.
                Err(ApiError::Decode(reason)) => {
                    warn!("Unreadable processing response: {}", reason);
                    Err(WorkflowError::ProcessingFailed)
                }
                Err(err) => Err(WorkflowError::Submit(err)),
            })
            .and_then(|response| {
                response
                    .processed_file
                    .ok_or(WorkflowError::ProcessingFailed)
            });

        match outcome {
            Ok(reference) => {
                info!("Processing finished: {}", reference);
                on_processed(ProcessedArtifact::new(reference));
            }
            Err(err) => {
                error!("Upload error: {:?}", err);
                self.selection.set_error(&err);
            }
        }
    }
}
