use eframe::egui::{
    self,
    RichText,
    TextEdit,
    Ui,
};
use egui_extras::{
    Column,
    TableBuilder,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    dialogs,
    theme::Theme,
};
use crate::core::{
    controller::ViewController,
    tasks::Operation,
};

/// Known-words view. Keeps its own filter text; the list itself always comes
/// from the controller.
#[derive(Default)]
pub struct KnownWordsPanel {
    filter: String,
}

impl KnownWordsPanel {
    pub fn show(
        &mut self,
        ui: &mut Ui,
        theme: &Theme,
        controller: &ViewController,
        actions: &mut ActionQueue,
    ) {
        let known = controller.known_words();
        let fetching = controller.is_loading(Operation::FetchKnown);

        ui.horizontal(|ui| {
            ui.heading(theme.heading(ui.ctx(), "Known Words"));
            ui.label(
                RichText::new(format!("{} words", known.len())).color(theme.comment(ui.ctx())),
            );
            if fetching {
                ui.add(egui::Spinner::new());
            }
        });

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 12.0;
            ui.add_sized(
                [220.0, ui.spacing().interact_size.y],
                TextEdit::singleline(&mut self.filter).hint_text("Filter known words..."),
            );

            ui.separator();

            if ui.button("Import…").clicked() {
                if let Some(path) = dialogs::pick_known_words() {
                    actions.push(UiAction::ImportKnownWords(path));
                }
            }
            if ui.add_enabled(!known.is_empty(), egui::Button::new("Export…")).clicked() {
                if let Some(path) = dialogs::save_known_words() {
                    actions.push(UiAction::ExportKnownWords(path));
                }
            }
            if ui.add_enabled(!fetching, egui::Button::new("Refresh")).clicked() {
                actions.push(UiAction::SwitchView(controller.view()));
            }
            let resetting = controller.is_loading(Operation::ResetKnown);
            if ui
                .add_enabled(!known.is_empty() && !resetting, egui::Button::new("Reset all…"))
                .clicked()
            {
                actions.push(UiAction::RequestResetKnown);
            }
        });

        ui.add_space(6.0);

        let visible: Vec<&String> =
            known.iter().filter(|word| word.contains(self.filter.as_str())).collect();

        if visible.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                let message = if known.is_empty() {
                    "No known words yet. Mark words in the review list or import an Anki export."
                } else {
                    "No known words match the filter"
                };
                ui.label(RichText::new(message).color(theme.comment(ui.ctx())));
            });
            return;
        }

        let removing = controller.is_loading(Operation::ForgetKnown);
        let text_height = egui::TextStyle::Body
            .resolve(ui.style())
            .size
            .max(ui.spacing().interact_size.y);

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .body(|body| {
                body.rows(text_height + 4.0, visible.len(), |mut row| {
                    let word = visible[row.index()];
                    row.col(|ui| {
                        ui.label(theme.word(ui.ctx(), word).size(16.0));
                    });
                    row.col(|ui| {
                        if ui
                            .add_enabled(!removing, egui::Button::new("Forget").small())
                            .on_hover_text("Move back to the review list on next analysis")
                            .clicked()
                        {
                            actions.push(UiAction::ForgetKnown(word.clone()));
                        }
                    });
                });
            });
    }
}
