mod output;

pub use output::{AudioOutput, RodioOutput};

use crate::api::{ApiClient, ApiError};
use crate::error::WorkflowError;
use crate::task::{take_finished, Pending};
use crate::upload::ProcessedArtifact;
use derivative::Derivative;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Could not fetch audio: {0}")]
    Fetch(#[from] ApiError),

    #[error("Audio output unavailable: {0}")]
    Stream(#[from] rodio::StreamError),

    #[error("Could not start playback: {0}")]
    Play(#[from] rodio::PlayError),

    #[error("Unsupported audio data: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Idle,
    Loading,
    Playing,
}

/// Play/stop toggle for a processed artifact.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Preview<O> {
    #[derivative(Debug = "ignore")]
    output: O,
    state: PreviewState,
    #[derivative(Debug = "ignore")]
    cached: Option<(String, Vec<u8>)>,
    #[derivative(Debug = "ignore")]
    pending: Option<Pending<(String, Result<Vec<u8>, ApiError>)>>,
    error: Option<String>,
}

impl<O: AudioOutput> Preview<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            state: PreviewState::Idle,
            cached: None,
            pending: None,
            error: None,
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    /// Loading counts as previewing: the toggle then stops it.
    pub fn is_previewing(&self) -> bool {
        self.state != PreviewState::Idle
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle(
        &mut self,
        handle: &Handle,
        client: &ApiClient,
        artifact: Option<&ProcessedArtifact>,
    ) -> Result<(), WorkflowError> {
        let Some(artifact) = artifact else {
            let err = WorkflowError::NothingToPreview;
            self.error = Some(err.to_string());
            return Err(err);
        };

        if self.is_previewing() {
            self.stop();
            return Ok(());
        }

        self.error = None;
        if let Some((reference, audio)) = &self.cached {
            if reference == &artifact.reference {
                let audio = audio.clone();
                return self.start(audio);
            }
        }

        let client = client.clone();
        let reference = artifact.reference.clone();
        self.pending = Some(Pending::spawn(handle, async move {
            let audio = client.fetch_artifact(&reference).await;
            (reference, audio)
        }));
        self.state = PreviewState::Loading;
        Ok(())
    }

    /// Stops playback and rewinds. An outstanding fetch is abandoned.
    pub fn stop(&mut self) {
        self.output.stop();
        self.pending = None;
        if self.state == PreviewState::Playing {
            info!("Preview stopped");
        }
        self.state = PreviewState::Idle;
    }

    /// Forgets the cached clip, e.g. when a new artifact replaces the old one.
    pub fn reset(&mut self) {
        self.stop();
        self.cached = None;
        self.error = None;
    }

    pub fn poll(&mut self) {
        if let Some(result) = take_finished(&mut self.pending) {
            match result {
                Ok((reference, Ok(audio))) => {
                    self.cached = Some((reference, audio.clone()));
                    let _ = self.start(audio);
                }
                Ok((_, Err(err))) => self.fail(&WorkflowError::Preview(err.into())),
                Err(err) => self.fail(&err),
            }
        }

        if self.state == PreviewState::Playing && !self.output.is_playing() {
            // Ended on its own.
            self.state = PreviewState::Idle;
        }
    }

    fn start(&mut self, audio: Vec<u8>) -> Result<(), WorkflowError> {
        match self.output.play(audio) {
            Ok(()) => {
                info!("Preview started");
                self.state = PreviewState::Playing;
                Ok(())
            }
            Err(err) => {
                let err = WorkflowError::Preview(err);
                self.fail(&err);
                Err(err)
            }
        }
    }

    fn fail(&mut self, err: &WorkflowError) {
        error!("Preview failed: {:?}", err);
        self.error = Some(err.to_string());
        self.state = PreviewState::Idle;
    }

    #[cfg(test)]
    pub fn output(&self) -> &O {
        &self.output
    }

    #[cfg(test)]
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{settle, FakeApi};

    #[derive(Default)]
    struct FakeOutput {
        playing: bool,
        position: usize,
        clip: Vec<u8>,
        plays: usize,
    }

    impl FakeOutput {
        fn advance(&mut self, samples: usize) {
            self.position += samples;
        }

        fn finish(&mut self) {
            self.playing = false;
        }
    }

    impl AudioOutput for FakeOutput {
        fn play(&mut self, audio: Vec<u8>) -> Result<(), PlaybackError> {
            self.clip = audio;
            self.playing = true;
            self.position = 0;
            self.plays += 1;
            Ok(())
        }

        fn stop(&mut self) {
            self.playing = false;
            self.position = 0;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    fn artifact() -> ProcessedArtifact {
        ProcessedArtifact::new("/processed/clean_voice.wav")
    }

    async fn start_playing(api: &FakeApi, preview: &mut Preview<FakeOutput>) {
        preview
            .toggle(&Handle::current(), &api.client(), Some(&artifact()))
            .unwrap();
        assert_eq!(preview.state(), PreviewState::Loading);
        settle(|| {
            preview.poll();
            preview.state() != PreviewState::Loading
        })
        .await;
    }

    #[tokio::test]
    async fn toggle_twice_stops_and_rewinds() {
        let api = FakeApi::start().await;
        let mut preview = Preview::new(FakeOutput::default());

        start_playing(&api, &mut preview).await;
        assert_eq!(preview.state(), PreviewState::Playing);
        assert_eq!(preview.output().clip, FakeApi::ARTIFACT_BYTES.to_vec());
        preview.output_mut().advance(4800);

        preview
            .toggle(&Handle::current(), &api.client(), Some(&artifact()))
            .unwrap();
        assert_eq!(preview.state(), PreviewState::Idle);
        assert!(!preview.output().is_playing());
        assert_eq!(preview.output().position, 0);
    }

    #[tokio::test]
    async fn natural_end_returns_to_idle() {
        let api = FakeApi::start().await;
        let mut preview = Preview::new(FakeOutput::default());

        start_playing(&api, &mut preview).await;
        preview.output_mut().finish();
        preview.poll();

        assert_eq!(preview.state(), PreviewState::Idle);
        assert!(!preview.is_previewing());
    }

    #[tokio::test]
    async fn replay_uses_cached_clip() {
        let api = FakeApi::start().await;
        let mut preview = Preview::new(FakeOutput::default());

        start_playing(&api, &mut preview).await;
        preview.stop();
        preview
            .toggle(&Handle::current(), &api.client(), Some(&artifact()))
            .unwrap();

        assert_eq!(preview.state(), PreviewState::Playing);
        assert_eq!(preview.output().plays, 2);
    }

    #[tokio::test]
    async fn missing_artifact_reports_error() {
        let api = FakeApi::start().await;
        let mut preview = Preview::new(FakeOutput::default());

        let err = preview
            .toggle(&Handle::current(), &api.client(), None)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NothingToPreview));
        assert_eq!(
            preview.error(),
            Some("No processed file available to preview")
        );
    }

    #[tokio::test]
    async fn failed_fetch_leaves_preview_idle() {
        let api = FakeApi::start().await;
        let mut preview = Preview::new(FakeOutput::default());
        let missing = ProcessedArtifact::new("/processed/missing.wav");

        preview
            .toggle(&Handle::current(), &api.client(), Some(&missing))
            .unwrap();
        settle(|| {
            preview.poll();
            preview.state() != PreviewState::Loading
        })
        .await;

        assert_eq!(preview.state(), PreviewState::Idle);
        assert_eq!(preview.error(), Some("Preview failed"));
        assert_eq!(preview.output().plays, 0);
    }
}
