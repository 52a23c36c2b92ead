mod state;
mod ui;
mod upload_form;

use crate::api::ApiClient;
use eframe::{egui, App};
pub use state::Route;
use state::{NoiseRemovalPage, PlannedForms, TranslationPage};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::info;

pub struct EchoSynthApp {
    runtime: Runtime,
    client: ApiClient,
    route: Route,
    noise: NoiseRemovalPage,
    translation: TranslationPage,
    planned: PlannedForms,
}

impl EchoSynthApp {
    pub fn new(runtime: Runtime, client: ApiClient) -> Self {
        info!("Initializing EchoSynth");
        Self {
            runtime,
            client,
            route: Route::default(),
            noise: NoiseRemovalPage::default(),
            translation: TranslationPage::default(),
            planned: PlannedForms::default(),
        }
    }

    pub fn navigate(&mut self, route: Route) {
        if route != self.route {
            info!("Navigating to {}", route.title());
            self.route = route;
        }
    }

    fn is_busy(&self) -> bool {
        self.noise.upload.is_loading()
            || self.noise.preview.is_previewing()
            || self.noise.download.is_running()
            || self.translation.form.is_loading()
            || self.translation.preview.is_previewing()
            || self.translation.download.is_running()
    }

    /// Drains finished background requests into page state.
    pub fn update_state(&mut self, ctx: &egui::Context) {
        let mut processed = None;
        self.noise.upload.poll(|artifact| processed = Some(artifact));
        if let Some(artifact) = processed {
            self.noise.set_artifact(artifact);
        }
        self.noise.preview.poll();
        self.noise.download.poll();

        if self.translation.form.poll() {
            self.translation.preview.reset();
        }
        self.translation.preview.poll();
        self.translation.download.poll();

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl App for EchoSynthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
