use crate::api::ApiClient;
use crate::download::DownloadTask;
use crate::error::WorkflowError;
use crate::playback::{Preview, RodioOutput};
use crate::translation::TranslationForm;
use crate::upload::{ProcessedArtifact, UploadWorkflow};
use std::path::PathBuf;
use tokio::runtime::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    TextToSpeech,
    SpeechToText,
    BackgroundNoise,
    Dubbing,
    Cloning,
    Translation,
    YoutubeUploader,
}

impl Route {
    pub const MENU: [Route; 7] = [
        Route::TextToSpeech,
        Route::SpeechToText,
        Route::BackgroundNoise,
        Route::Dubbing,
        Route::Cloning,
        Route::Translation,
        Route::YoutubeUploader,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::TextToSpeech => "Text to Speech",
            Route::SpeechToText => "Speech to Text",
            Route::BackgroundNoise => "Background Noise",
            Route::Dubbing => "Dubbing",
            Route::Cloning => "Voice Cloning",
            Route::Translation => "Audio Translation",
            Route::YoutubeUploader => "YouTube AI Uploader",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Route::Home => "🏠",
            Route::TextToSpeech => "💬",
            Route::SpeechToText => "🎤",
            Route::BackgroundNoise => "🔊",
            Route::Dubbing => "🎙",
            Route::Cloning => "🧬",
            Route::Translation => "🌐",
            Route::YoutubeUploader => "🎥",
        }
    }
}

pub const HOME_FEATURES: [(&str, &str); 9] = [
    ("Voice Cloning", "Generate a voice that sounds just like you, powered by AI."),
    ("Transcripter", "Accurately transcribe and translate your audio content."),
    ("Speech to Text", "Convert spoken audio into accurate and readable text."),
    ("Text to Speech", "Turn written content into natural-sounding spoken audio."),
    ("Background Voice Remover", "Remove unwanted voices and isolate primary speakers."),
    ("Time Stamp Generation", "Insert precise timestamps into transcribed audio content."),
    ("AI Generated Shorts/Reels", "Auto-generate video shorts and reels from your audio."),
    ("Dubbing", "Translate and dub your videos into multiple languages."),
    ("Watermark for AI Shorts", "Add secure watermarks to protect and verify AI-generated content."),
];

/// Upload, then preview and download the cleaned-up file.
pub struct NoiseRemovalPage {
    pub upload: UploadWorkflow,
    pub artifact: Option<ProcessedArtifact>,
    pub preview: Preview<RodioOutput>,
    pub download: DownloadTask,
}

impl Default for NoiseRemovalPage {
    fn default() -> Self {
        Self {
            upload: UploadWorkflow::default(),
            artifact: None,
            preview: Preview::new(RodioOutput::default()),
            download: DownloadTask::default(),
        }
    }
}

impl NoiseRemovalPage {
    pub fn set_artifact(&mut self, artifact: ProcessedArtifact) {
        self.preview.reset();
        self.artifact = Some(artifact);
    }
}

pub struct TranslationPage {
    pub form: TranslationForm,
    pub preview: Preview<RodioOutput>,
    pub download: DownloadTask,
}

impl TranslationPage {
    /// Starts a translation. The previous result's preview stops with it,
    /// since its controls disappear until the new result arrives.
    pub fn submit(&mut self, handle: &Handle, client: &ApiClient) -> Result<(), WorkflowError> {
        self.form.submit(handle, client)?;
        self.preview.stop();
        Ok(())
    }
}

impl Default for TranslationPage {
    fn default() -> Self {
        Self {
            form: TranslationForm::default(),
            preview: Preview::new(RodioOutput::default()),
            download: DownloadTask::default(),
        }
    }
}

#[derive(Debug)]
pub struct TextToSpeechForm {
    pub text: String,
    pub voice: &'static str,
    pub notice: Option<&'static str>,
}

impl Default for TextToSpeechForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice: "en",
            notice: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SpeechToTextForm {
    pub file: Option<PathBuf>,
    pub notice: Option<&'static str>,
}

#[derive(Debug)]
pub struct DubbingForm {
    pub file: Option<PathBuf>,
    pub target_lang: &'static str,
    pub notice: Option<&'static str>,
}

impl Default for DubbingForm {
    fn default() -> Self {
        Self {
            file: None,
            target_lang: "en",
            notice: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct CloningForm {
    pub sample: Option<PathBuf>,
    pub name: String,
    pub notice: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct YoutubeForm {
    pub file: Option<PathBuf>,
    pub title: String,
    pub description: String,
    pub notice: Option<&'static str>,
}

/// Forms whose backend features do not exist yet.
#[derive(Debug, Default)]
pub struct PlannedForms {
    pub text_to_speech: TextToSpeechForm,
    pub speech_to_text: SpeechToTextForm,
    pub dubbing: DubbingForm,
    pub cloning: CloningForm,
    pub youtube: YoutubeForm,
}
