use super::state::{Route, HOME_FEATURES};
use super::upload_form::{file_drop_zone, pick_path, ACCENT_COLOR, ERROR_COLOR};
use super::EchoSynthApp;
use crate::api::ApiClient;
use crate::download::{default_file_name, DownloadTask};
use crate::playback::{AudioOutput, Preview};
use crate::translation::{language_name, target_languages, LANGUAGES, VOICE_TYPES};
use crate::upload::ProcessedArtifact;
use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;
use tokio::runtime::Handle;
use tracing::warn;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(0, 180, 0);

impl EchoSynthApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        if self.route != Route::Home {
            egui::SidePanel::left("navigation")
                .resizable(false)
                .default_width(200.0)
                .show(ctx, |ui| self.render_sidebar(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                match self.route {
                    Route::Home => self.render_home(ui),
                    Route::BackgroundNoise => self.render_noise_page(ui),
                    Route::Translation => self.render_translation_page(ui),
                    Route::TextToSpeech => self.render_text_to_speech(ui),
                    Route::SpeechToText => self.render_speech_to_text(ui),
                    Route::Dubbing => self.render_dubbing(ui),
                    Route::Cloning => self.render_cloning(ui),
                    Route::YoutubeUploader => self.render_youtube(ui),
                }
                ui.add_space(20.0);
            });
        });
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.heading("EchoSynth");
        ui.separator();
        ui.add_space(8.0);

        for route in Route::MENU {
            let label = format!("{}  {}", route.icon(), route.title());
            if ui.selectable_label(self.route == route, label).clicked() {
                self.navigate(route);
            }
            ui.add_space(4.0);
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
            ui.add_space(12.0);
            if ui.button(format!("{}  Home", Route::Home.icon())).clicked() {
                self.navigate(Route::Home);
            }
        });
    }

    fn render_home(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("EchoSynth").size(28.0));
            ui.add_space(10.0);
            ui.label(
                RichText::new("Bring your voice to life with AI-powered sound")
                    .size(20.0)
                    .color(ACCENT_COLOR),
            );
            ui.add_space(5.0);
            ui.label(
                RichText::new(
                    "Generate human-like voices, clean audio, and smart edits, all in one place.",
                )
                .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
            ui.add_space(15.0);
            let button = egui::Button::new("Get Started ➡").min_size(egui::vec2(160.0, 36.0));
            if ui.add(button).clicked() {
                self.navigate(Route::TextToSpeech);
            }
        });

        ui.add_space(30.0);
        egui::Grid::new("features")
            .num_columns(3)
            .spacing([16.0, 16.0])
            .show(ui, |ui| {
                for (i, (title, description)) in HOME_FEATURES.iter().enumerate() {
                    ui.group(|ui| {
                        ui.set_width(180.0);
                        ui.vertical(|ui| {
                            ui.strong(*title);
                            ui.label(RichText::new(*description).weak());
                        });
                    });
                    if i % 3 == 2 {
                        ui.end_row();
                    }
                }
            });
    }

    fn render_noise_page(&mut self, ui: &mut egui::Ui) {
        let handle = self.runtime.handle().clone();
        let client = &self.client;
        let page = &mut self.noise;

        ui.heading("🔊 Background Noise Control");
        ui.add_space(15.0);

        ui.group(|ui| {
            ui.label(RichText::new("Upload Audio").strong());
            ui.add_space(8.0);
            file_drop_zone(ui, page.upload.selection_mut());

            if page.upload.selection().selected().is_some() {
                ui.add_space(10.0);
                let loading = page.upload.is_loading();
                ui.add_enabled_ui(page.upload.can_submit(), |ui| {
                    ui.horizontal(|ui| {
                        if loading {
                            ui.spinner();
                        }
                        let label = if loading {
                            "Processing..."
                        } else {
                            "Upload & Process"
                        };
                        let button = egui::Button::new(label)
                            .min_size(egui::vec2(ui.available_width(), 36.0));
                        if ui.add(button).clicked() {
                            let _ = page.upload.submit(&handle, client);
                        }
                    });
                });
            }
        });

        ui.add_space(20.0);
        ui.group(|ui| {
            ui.label(RichText::new("Noise Control").strong());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(if page.artifact.is_some() {
                    "〰 Ready to preview"
                } else {
                    "〰 Upload a file to preview"
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    preview_button(ui, &handle, client, &mut page.preview, page.artifact.as_ref());
                });
            });
            if let Some(error) = page.preview.error() {
                ui.colored_label(ERROR_COLOR, error);
            }

            ui.add_space(12.0);
            download_button(
                ui,
                &handle,
                client,
                &mut page.download,
                page.artifact.as_ref(),
                "Download Processed File",
                default_file_name,
            );
        });
    }

    fn render_translation_page(&mut self, ui: &mut egui::Ui) {
        let handle = self.runtime.handle().clone();
        let client = &self.client;
        let page = &mut self.translation;
        let form = &mut page.form;

        ui.heading("🌐 Audio Translation");
        ui.add_space(15.0);

        ui.label(RichText::new("Upload Audio File").strong());
        ui.add_space(6.0);
        file_drop_zone(ui, &mut form.selection);
        ui.add_space(12.0);

        let mut source = form.options.source_lang.clone();
        egui::ComboBox::from_label("Source Language")
            .selected_text(language_name(&source))
            .show_ui(ui, |ui| {
                for lang in LANGUAGES.iter() {
                    ui.selectable_value(&mut source, lang.code.to_string(), lang.name);
                }
            });
        if source != form.options.source_lang {
            form.set_source(&source);
        }

        egui::ComboBox::from_label("Target Language")
            .selected_text(language_name(&form.options.target_lang))
            .show_ui(ui, |ui| {
                for lang in target_languages(&form.options.source_lang) {
                    ui.selectable_value(
                        &mut form.options.target_lang,
                        lang.code.to_string(),
                        lang.name,
                    );
                }
            });

        let voice_name = VOICE_TYPES
            .iter()
            .find(|(id, _)| *id == form.options.voice_type)
            .map(|(_, name)| *name)
            .unwrap_or_default();
        egui::ComboBox::from_label("Voice Type")
            .selected_text(voice_name)
            .show_ui(ui, |ui| {
                for (id, name) in VOICE_TYPES.iter() {
                    ui.selectable_value(&mut form.options.voice_type, *id, *name);
                }
            });

        ui.add_space(12.0);
        let mut submit_clicked = false;
        let loading = form.is_loading();
        ui.add_enabled_ui(form.can_submit(), |ui| {
            ui.horizontal(|ui| {
                if loading {
                    ui.spinner();
                }
                let label = if loading { "Processing..." } else { "Translate Audio" };
                let button =
                    egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 36.0));
                if ui.add(button).clicked() {
                    submit_clicked = true;
                }
            });
        });

        if submit_clicked {
            let _ = page.submit(&handle, client);
        }

        let form = &page.form;
        let Some(result) = form.result() else {
            return;
        };
        ui.add_space(20.0);
        ui.colored_label(SUCCESS_COLOR, "✅ Translation successful!");
        ui.add_space(10.0);
        ui.group(|ui| {
            ui.strong(format!(
                "Original Text ({})",
                language_name(&form.options.source_lang)
            ));
            ui.label(&result.original_text);
        });
        ui.group(|ui| {
            ui.strong(format!(
                "Translated Text ({})",
                language_name(&form.options.target_lang)
            ));
            ui.label(&result.translated_text);
        });

        let audio = form.audio();
        if audio.is_some() {
            let file_name = form.download_file_name();
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.strong("Audio Output");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    preview_button(ui, &handle, client, &mut page.preview, audio.as_ref());
                });
            });
            if let Some(error) = page.preview.error() {
                ui.colored_label(ERROR_COLOR, error);
            }
            download_button(
                ui,
                &handle,
                client,
                &mut page.download,
                audio.as_ref(),
                "Download",
                |_| file_name.clone(),
            );
        }
    }

    fn render_text_to_speech(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.planned.text_to_speech;
        ui.heading("🗣 Text to Speech");
        ui.add_space(15.0);

        ui.label("Enter Text");
        ui.add(
            egui::TextEdit::multiline(&mut form.text)
                .desired_rows(5)
                .desired_width(f32::INFINITY)
                .hint_text("Type your text here..."),
        );
        ui.add_space(10.0);

        let voices = [("en", "English"), ("hi", "Hindi"), ("es", "Spanish")];
        let selected = voices
            .iter()
            .find(|(code, _)| *code == form.voice)
            .map(|(_, name)| *name)
            .unwrap_or_default();
        egui::ComboBox::from_label("Select Voice/Language")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for (code, name) in voices {
                    ui.selectable_value(&mut form.voice, code, name);
                }
            });

        ui.add_space(15.0);
        if ui.button("🔊 Convert to Speech").clicked() {
            form.notice = Some("Feature not implemented yet");
        }
        planned_notice(ui, form.notice, "🎧 Output audio will appear here.");
    }

    fn render_speech_to_text(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.planned.speech_to_text;
        ui.heading("🎤 Speech to Text");
        ui.add_space(15.0);

        pick_path(ui, "Select Audio File", &mut form.file);
        ui.add_space(15.0);
        if ui.button("📝 Transcribe").clicked() {
            form.notice = Some("Transcription feature coming soon!");
        }
        planned_notice(ui, form.notice, "📄 Your transcript will appear here.");
    }

    fn render_dubbing(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.planned.dubbing;
        ui.heading("🎙 AI Dubbing");
        ui.add_space(15.0);

        pick_path(ui, "Upload Video/Audio File", &mut form.file);
        ui.add_space(10.0);

        let languages = ["en", "hi", "fr", "es"];
        egui::ComboBox::from_label("Select Target Language")
            .selected_text(language_name(form.target_lang))
            .show_ui(ui, |ui| {
                for code in languages {
                    ui.selectable_value(&mut form.target_lang, code, language_name(code));
                }
            });

        ui.add_space(15.0);
        if ui.button("🔁 Start Dubbing").clicked() {
            form.notice = Some("Dubbing feature coming soon!");
        }
        planned_notice(ui, form.notice, "🎬 Your dubbed video/audio will appear here.");
    }

    fn render_cloning(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.planned.cloning;
        ui.heading("🧬 Voice Cloning");
        ui.add_space(15.0);

        pick_path(ui, "Upload Your Voice Sample", &mut form.sample);
        ui.add_space(10.0);
        ui.label("Give it a Name");
        ui.add(egui::TextEdit::singleline(&mut form.name).hint_text("e.g. AlexClone"));

        ui.add_space(15.0);
        if ui.button("🧪 Clone Voice").clicked() {
            form.notice = Some("Voice cloning feature coming soon!");
        }
        planned_notice(ui, form.notice, "🎧 Your cloned voice preview will appear here.");
    }

    fn render_youtube(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.planned.youtube;
        ui.heading("🎥 YouTube Uploader");
        ui.add_space(15.0);

        pick_path(ui, "Select Audio/Video File", &mut form.file);
        ui.add_space(10.0);
        ui.label("Title");
        ui.add(
            egui::TextEdit::singleline(&mut form.title)
                .desired_width(f32::INFINITY)
                .hint_text("Enter video title"),
        );
        ui.label("Description");
        ui.add(
            egui::TextEdit::multiline(&mut form.description)
                .desired_rows(4)
                .desired_width(f32::INFINITY)
                .hint_text("Write something about the video..."),
        );

        ui.add_space(15.0);
        if ui.button("⬆ Upload to YouTube").clicked() {
            form.notice = Some("Upload feature coming soon!");
        }
        planned_notice(ui, form.notice, "Status: Waiting for upload...");
    }
}

fn planned_notice(ui: &mut egui::Ui, notice: Option<&str>, placeholder: &str) {
    ui.add_space(15.0);
    ui.vertical_centered(|ui| match notice {
        Some(notice) => {
            ui.colored_label(ACCENT_COLOR, notice);
        }
        None => {
            ui.label(RichText::new(placeholder).weak());
        }
    });
}

fn preview_button<O: AudioOutput>(
    ui: &mut egui::Ui,
    handle: &Handle,
    client: &ApiClient,
    preview: &mut Preview<O>,
    artifact: Option<&ProcessedArtifact>,
) {
    let label = if preview.is_previewing() {
        "⏹ Stop Preview"
    } else {
        "▶ Preview"
    };
    if ui
        .add_enabled(artifact.is_some(), egui::Button::new(label))
        .clicked()
    {
        let _ = preview.toggle(handle, client, artifact);
    }
}

fn download_button(
    ui: &mut egui::Ui,
    handle: &Handle,
    client: &ApiClient,
    download: &mut DownloadTask,
    artifact: Option<&ProcessedArtifact>,
    label: &str,
    file_name: impl FnOnce(&ProcessedArtifact) -> String,
) {
    let running = download.is_running();
    let text = if running {
        "Processing...".to_string()
    } else {
        format!("⬇ {}", label)
    };
    let button = egui::Button::new(text).min_size(egui::vec2(ui.available_width(), 36.0));

    if ui.add_enabled(artifact.is_some() && !running, button).clicked() {
        if let Some(artifact) = artifact {
            let destination = FileDialog::new()
                .set_file_name(file_name(artifact))
                .save_file();
            if let Some(destination) = destination {
                let _ = download.start(handle, client, Some(artifact), destination);
            }
        }
    }

    if let Some(error) = download.error() {
        ui.colored_label(ERROR_COLOR, error);
    }
    if let Some(path) = download.saved_to() {
        ui.horizontal(|ui| {
            ui.colored_label(SUCCESS_COLOR, format!("Saved to {}", path.display()));
            if ui.link("Show in folder").clicked() {
                if let Some(dir) = path.parent() {
                    if let Err(e) = open::that(dir) {
                        warn!("Failed to open folder: {}", e);
                    }
                }
            }
        });
    }
}
