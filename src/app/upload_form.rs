use crate::upload::validation::AUDIO_EXTENSIONS;
use crate::upload::{FileCandidate, FileSelection};
use crate::utils::file_size::FileSizeUtils;
use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;
use tracing::warn;

pub const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(59, 130, 246);

/// Drop zone with the selected file's card. Clicking the empty zone opens
/// the file dialog; files dropped anywhere on the window land here.
pub fn file_drop_zone(ui: &mut egui::Ui, selection: &mut FileSelection) {
    let (hovering, dropped) = ui.ctx().input(|i| {
        (
            !i.raw.hovered_files.is_empty(),
            i.raw.dropped_files.clone(),
        )
    });
    selection.set_dragging(hovering);
    if !dropped.is_empty() {
        let first = dropped.into_iter().take(1).filter_map(candidate_from_drop);
        let _ = selection.select_dropped(first);
    }

    let stroke_color = if selection.is_dragging() {
        ACCENT_COLOR
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    let mut remove_clicked = false;
    let response = egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .inner_margin(egui::Margin::same(24.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| match selection.selected() {
                Some(file) => {
                    ui.horizontal(|ui| {
                        ui.label("🎵");
                        ui.strong(&file.name);
                        if ui.small_button("✖").on_hover_text("Remove file").clicked() {
                            remove_clicked = true;
                        }
                    });
                    ui.label(
                        RichText::new(format!(
                            "{} • {}",
                            FileSizeUtils::format_size(file.size),
                            file.type_label()
                        ))
                        .small()
                        .weak(),
                    );
                }
                None => {
                    ui.label(RichText::new("☁").size(32.0).color(ACCENT_COLOR));
                    ui.label("Drop your audio file here or click to upload");
                    ui.label(
                        RichText::new("Supports MP3, WAV, M4A, FLAC, OGG")
                            .small()
                            .weak(),
                    );
                }
            });
        })
        .response;

    let zone_clicked = response.interact(egui::Sense::click()).clicked();
    match zone_action(remove_clicked, zone_clicked) {
        Some(ZoneAction::Remove) => selection.remove(),
        Some(ZoneAction::Pick) => pick_audio_file(selection),
        None => {}
    }

    if let Some(error) = selection.error() {
        ui.add_space(8.0);
        ui.colored_label(ERROR_COLOR, error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneAction {
    Remove,
    Pick,
}

/// The remove button wins over the zone click it sits in. Any other click
/// opens the picker, replacing the current file on a successful pick.
fn zone_action(remove_clicked: bool, zone_clicked: bool) -> Option<ZoneAction> {
    if remove_clicked {
        Some(ZoneAction::Remove)
    } else if zone_clicked {
        Some(ZoneAction::Pick)
    } else {
        None
    }
}

fn pick_audio_file(selection: &mut FileSelection) {
    let mut dialog = FileDialog::new().add_filter("Audio", &AUDIO_EXTENSIONS);
    if let Some(dir) = selection.picker_dir() {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.pick_file() {
        match FileCandidate::from_path(path) {
            Ok(candidate) => {
                let _ = selection.select(candidate);
            }
            Err(e) => warn!("Could not read picked file: {}", e),
        }
    }
}

fn candidate_from_drop(file: egui::DroppedFile) -> Option<FileCandidate> {
    if let Some(bytes) = file.bytes {
        return Some(FileCandidate::from_bytes(file.name, bytes));
    }
    let path = file.path?;
    match FileCandidate::from_path(path) {
        Ok(candidate) => Some(candidate),
        Err(e) => {
            warn!("Could not read dropped file: {}", e);
            None
        }
    }
}

/// Plain picker for forms that only remember a path.
pub fn pick_path(ui: &mut egui::Ui, label: &str, slot: &mut Option<std::path::PathBuf>) {
    ui.horizontal(|ui| {
        if ui.button(format!("📁 {}", label)).clicked() {
            if let Some(path) = FileDialog::new().pick_file() {
                *slot = Some(path);
            }
        }
        if let Some(path) = slot {
            ui.label(format!("Selected: {}", path.display()));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_click_opens_picker_even_with_a_file() {
        assert_eq!(zone_action(false, true), Some(ZoneAction::Pick));
        assert_eq!(zone_action(false, false), None);
    }

    #[test]
    fn remove_button_does_not_open_picker() {
        assert_eq!(zone_action(true, true), Some(ZoneAction::Remove));
        assert_eq!(zone_action(true, false), Some(ZoneAction::Remove));
    }
}
