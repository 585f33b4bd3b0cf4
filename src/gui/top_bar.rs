use eframe::egui::{
    self,
    containers,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    dialogs,
};
use crate::core::{
    controller::ViewController,
    tasks::Operation,
    DeckScope,
    ViewState,
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        controller: &ViewController,
        backend_url: &str,
        actions: &mut ActionQueue,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    let analyzing = controller.is_loading(Operation::Analyze);
                    if ui.add_enabled(!analyzing, egui::Button::new("Open EPUB…")).clicked() {
                        if let Some(path) = dialogs::pick_document() {
                            actions.push(UiAction::SwitchView(ViewState::Reviewing));
                            actions.push(UiAction::UploadDocument(path));
                        }
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Known Words", |ui| {
                    if ui.button("Import Anki export (.txt)…").clicked() {
                        if let Some(path) = dialogs::pick_known_words() {
                            actions.push(UiAction::ImportKnownWords(path));
                        }
                    }
                    let has_known = !controller.known_words().is_empty();
                    if ui.add_enabled(has_known, egui::Button::new("Export to .txt…")).clicked() {
                        if let Some(path) = dialogs::save_known_words() {
                            actions.push(UiAction::ExportKnownWords(path));
                        }
                    }
                    ui.separator();
                    if ui.button("Reset known words…").clicked() {
                        actions.push(UiAction::RequestResetKnown);
                    }
                });

                ui.menu_button("Anki", |ui| {
                    for scope in [DeckScope::Reviewing, DeckScope::Known] {
                        let busy = controller.is_loading(Operation::GenerateDeck(scope));
                        let label = format!("Generate {}", scope.label());
                        if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                            actions.push(UiAction::GenerateDeck(scope));
                        }
                    }
                });

                ui.separator();

                let view = controller.view();
                if ui.selectable_label(view == ViewState::Reviewing, "Review").clicked()
                    && view != ViewState::Reviewing
                {
                    actions.push(UiAction::SwitchView(ViewState::Reviewing));
                }
                if ui.selectable_label(view == ViewState::KnownWords, "Known Words").clicked() {
                    actions.push(UiAction::SwitchView(ViewState::KnownWords));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_backend_status(ui, controller, backend_url, actions);
                });
            });
        });
    }

    fn show_backend_status(
        ui: &mut egui::Ui,
        controller: &ViewController,
        backend_url: &str,
        actions: &mut ActionQueue,
    ) {
        let (color, tooltip) = match controller.backend_online() {
            Some(true) => (egui::Color32::from_rgb(0, 200, 0), format!("Connected to {backend_url}")),
            Some(false) => {
                (egui::Color32::from_rgb(200, 80, 80), format!("Cannot reach {backend_url}"))
            }
            None => (egui::Color32::GRAY, format!("Checking {backend_url}")),
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            let dot = ui
                .small(egui::RichText::new("●").color(color))
                .on_hover_text(format!("{tooltip} (click to recheck)"))
                .interact(egui::Sense::click());
            if dot.clicked() {
                actions.push(UiAction::CheckBackend);
            }
            ui.small("Backend").on_hover_text(tooltip);
        });
    }
}
