use crate::api::{ApiClient, ApiError};
use crate::error::WorkflowError;
use crate::task::{take_finished, Pending};
use crate::upload::ProcessedArtifact;
use derivative::Derivative;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{error, info};

pub const DEFAULT_FILE_NAME: &str = "processed_audio.wav";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] ApiError),

    #[error("Failed to write download: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to save download: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Suggested save name: the last path segment of the reference.
pub fn default_file_name(artifact: &ProcessedArtifact) -> String {
    artifact
        .file_name()
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string()
}

/// Fetches the artifact and saves it at `destination`. The bytes go to a
/// temporary file beside the destination first, which is removed if saving fails.
pub async fn save_artifact(
    client: &ApiClient,
    reference: &str,
    destination: &Path,
) -> Result<PathBuf, DownloadError> {
    let bytes = client.fetch_artifact(reference).await?;
    let destination = destination.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<PathBuf, DownloadError> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        temp.flush()?;
        temp.persist(&destination)?;
        Ok(destination)
    })
    .await
    .map_err(|e| DownloadError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct DownloadTask {
    #[derivative(Debug = "ignore")]
    pending: Option<Pending<Result<PathBuf, DownloadError>>>,
    saved_to: Option<PathBuf>,
    error: Option<String>,
}

impl DownloadTask {
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn saved_to(&self) -> Option<&Path> {
        self.saved_to.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn start(
        &mut self,
        handle: &Handle,
        client: &ApiClient,
        artifact: Option<&ProcessedArtifact>,
        destination: PathBuf,
    ) -> Result<(), WorkflowError> {
        if self.is_running() {
            return Err(WorkflowError::InFlight);
        }
        let Some(artifact) = artifact else {
            let err = WorkflowError::NothingToDownload;
            self.error = Some(err.to_string());
            return Err(err);
        };

        self.error = None;
        self.saved_to = None;
        let client = client.clone();
        let reference = artifact.reference.clone();
        self.pending = Some(Pending::spawn(handle, async move {
            save_artifact(&client, &reference, &destination).await
        }));
        Ok(())
    }

    pub fn poll(&mut self) {
        let Some(result) = take_finished(&mut self.pending) else {
            return;
        };

        match result.and_then(|saved| saved.map_err(WorkflowError::Download)) {
            Ok(path) => {
                info!("Saved download to {}", path.display());
                self.saved_to = Some(path);
            }
            Err(err) => {
                error!("Download failed: {:?}", err);
                self.error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{settle, FakeApi};

    #[test]
    fn default_name_falls_back() {
        assert_eq!(
            default_file_name(&ProcessedArtifact::new("/processed/out.flac")),
            "out.flac"
        );
        assert_eq!(
            default_file_name(&ProcessedArtifact::new("")),
            DEFAULT_FILE_NAME
        );
    }

    #[tokio::test]
    async fn saves_artifact_without_leftovers() {
        let api = FakeApi::start().await;
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("clean.wav");

        let saved = save_artifact(&api.client(), "/processed/clean_voice.wav", &destination)
            .await
            .unwrap();

        assert_eq!(saved, destination);
        assert_eq!(std::fs::read(&destination).unwrap(), FakeApi::ARTIFACT_BYTES);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_writes_nothing() {
        let api = FakeApi::start().await;
        let dir = tempfile::tempdir().unwrap();
        let mut task = DownloadTask::default();

        task.start(
            &Handle::current(),
            &api.client(),
            Some(&ProcessedArtifact::new("/processed/missing.wav")),
            dir.path().join("missing.wav"),
        )
        .unwrap();
        settle(|| {
            task.poll();
            !task.is_running()
        })
        .await;

        assert_eq!(task.error(), Some("Download failed"));
        assert!(task.saved_to().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn task_reports_saved_path() {
        let api = FakeApi::start().await;
        let dir = tempfile::tempdir().unwrap();
        let mut task = DownloadTask::default();
        let destination = dir.path().join("translated.mp3");

        task.start(
            &Handle::current(),
            &api.client(),
            Some(&ProcessedArtifact::new("/audio_output/translated.mp3")),
            destination.clone(),
        )
        .unwrap();
        assert!(task.is_running());
        settle(|| {
            task.poll();
            !task.is_running()
        })
        .await;

        assert_eq!(task.saved_to(), Some(destination.as_path()));
        assert!(task.error().is_none());
    }

    #[tokio::test]
    async fn nothing_to_download() {
        let api = FakeApi::start().await;
        let mut task = DownloadTask::default();
        let err = task
            .start(&Handle::current(), &api.client(), None, PathBuf::from("x.wav"))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NothingToDownload));
        assert_eq!(task.error(), Some("No processed file available to download"));
    }
}
