use crate::api::{ApiClient, ApiError, TranslationOptions, TranslationResponse};
use crate::error::WorkflowError;
use crate::task::{take_finished, Pending};
use crate::upload::{FileSelection, ProcessedArtifact};
use derivative::Derivative;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::runtime::Handle;
use tracing::{error, info};

pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub static LANGUAGES: [Language; 8] = [
    Language { code: "hi", name: "Hindi" },
    Language { code: "mr", name: "Marathi" },
    Language { code: "pa", name: "Punjabi" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "te", name: "Telugu" },
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
];

pub static VOICE_TYPES: [(u8, &str); 4] = [
    (1, "Default Voice"),
    (2, "Female Voice"),
    (3, "Slower Speech"),
    (4, "Faster Speech"),
];

pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.name)
        .unwrap_or(code)
}

/// Target languages on offer: everything but the source.
pub fn target_languages(source: &str) -> impl Iterator<Item = &'static Language> + '_ {
    LANGUAGES.iter().filter(move |l| l.code != source)
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct TranslationForm {
    pub selection: FileSelection,
    pub options: TranslationOptions,
    result: Option<TranslationResponse>,
    #[derivative(Debug = "ignore")]
    pending: Option<Pending<Result<TranslationResponse, ApiError>>>,
}

impl Default for TranslationForm {
    fn default() -> Self {
        Self {
            selection: FileSelection::default(),
            options: TranslationOptions {
                source_lang: "en".to_string(),
                target_lang: "hi".to_string(),
                voice_type: 1,
            },
            result: None,
            pending: None,
        }
    }
}

impl TranslationForm {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.selection.selected().is_some() && !self.is_loading()
    }

    pub fn result(&self) -> Option<&TranslationResponse> {
        self.result.as_ref()
    }

    pub fn audio(&self) -> Option<ProcessedArtifact> {
        self.result
            .as_ref()
            .and_then(|r| r.audio_url.as_deref())
            .map(ProcessedArtifact::new)
    }

    /// `translation_<target>_<unix millis>.mp3`
    pub fn download_file_name(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        format!("translation_{}_{}.mp3", self.options.target_lang, millis)
    }

    /// Changing the source may leave the target equal to it; pick the first
    /// remaining language then.
    pub fn set_source(&mut self, code: &str) {
        self.options.source_lang = code.to_string();
        if self.options.target_lang == code {
            if let Some(first) = target_languages(code).next() {
                self.options.target_lang = first.code.to_string();
            }
        }
    }

    pub fn submit(&mut self, handle: &Handle, client: &ApiClient) -> Result<(), WorkflowError> {
        if self.is_loading() {
            return Err(WorkflowError::InFlight);
        }
        let file = self.selection.validated()?;
        self.selection.clear_error();
        self.result = None;

        info!(
            "Translating '{}' from {} to {}",
            file.name, self.options.source_lang, self.options.target_lang
        );
        let client = client.clone();
        let options = self.options.clone();
        self.pending = Some(Pending::spawn(handle, async move {
            client.translate(&file, &options).await
        }));
        Ok(())
    }

    /// Returns true when a new result arrived.
    pub fn poll(&mut self) -> bool {
        let Some(result) = take_finished(&mut self.pending) else {
            return false;
        };

        match result.and_then(|r| r.map_err(WorkflowError::Translate)) {
            Ok(response) => {
                info!("Translation finished");
                self.result = Some(response);
                true
            }
            Err(err) => {
                error!("Translation error: {:?}", err);
                self.selection.set_error(&err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{settle, FakeApi};
    use crate::upload::FileCandidate;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn select(form: &mut TranslationForm, name: &str) {
        form.selection
            .select(FileCandidate::from_bytes(name, Arc::from(&b"audio"[..])))
            .unwrap();
    }

    async fn finish(form: &mut TranslationForm) -> bool {
        let mut arrived = false;
        settle(|| {
            arrived |= form.poll();
            !form.is_loading()
        })
        .await;
        arrived
    }

    #[test]
    fn source_is_excluded_from_targets() {
        let codes: Vec<_> = target_languages("ta").map(|l| l.code).collect();
        assert_eq!(codes, vec!["hi", "mr", "pa", "te", "en", "es", "fr"]);
    }

    #[test]
    fn download_name_carries_target_language() {
        let form = TranslationForm::default();
        let name = form.download_file_name();
        assert!(name.starts_with("translation_hi_"), "{}", name);
        assert!(name.ends_with(".mp3"));
    }

    #[test]
    fn switching_source_to_target_moves_target() {
        let mut form = TranslationForm::default();
        form.set_source("hi");
        assert_eq!(form.options.target_lang, "mr");
        assert_eq!(language_name("mr"), "Marathi");
    }

    #[tokio::test]
    async fn successful_translation_exposes_audio() {
        let api = FakeApi::start().await;
        let mut form = TranslationForm::default();
        select(&mut form, "speech.mp3");
        form.options.voice_type = 2;

        form.submit(&Handle::current(), &api.client()).unwrap();
        assert!(finish(&mut form).await);

        let result = form.result().unwrap();
        assert_eq!(result.translated_text, "translated to hi with voice 2");
        assert_eq!(
            form.audio(),
            Some(ProcessedArtifact::new("/audio_output/translated.mp3"))
        );
        let uploads = api.uploads();
        assert_eq!(uploads[0].fields.get("source_lang").map(String::as_str), Some("en"));
    }

    #[tokio::test]
    async fn failure_shows_server_error() {
        let api = FakeApi::start().await;
        let mut form = TranslationForm::default();
        select(&mut form, FakeApi::REJECTED_NAME);

        form.submit(&Handle::current(), &api.client()).unwrap();
        assert!(!finish(&mut form).await);

        assert!(form.result().is_none());
        assert_eq!(form.selection.error(), Some("Speech recognition failed"));
    }

    #[tokio::test]
    async fn submit_enabled_only_with_file_and_idle() {
        let api = FakeApi::start().await;
        let mut form = TranslationForm::default();
        assert!(!form.can_submit());

        select(&mut form, "speech.wav");
        assert!(form.can_submit());

        form.submit(&Handle::current(), &api.client()).unwrap();
        assert!(!form.can_submit());
        finish(&mut form).await;
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn submit_without_file_is_local_error() {
        let api = FakeApi::start().await;
        let mut form = TranslationForm::default();

        assert!(form.submit(&Handle::current(), &api.client()).is_err());
        assert_eq!(form.selection.error(), Some("Please select a file!"));
        assert!(api.uploads().is_empty());
    }
}
