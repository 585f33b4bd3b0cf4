use eframe::egui;

use crate::core::controller::Confirmation;

/// Yes/no dialog for a pending [`Confirmation`]. Returns the answer on the
/// frame it is given; closing the dialog any other way counts as "no".
pub fn show(ctx: &egui::Context, confirmation: Confirmation) -> Option<bool> {
    let mut answer: Option<bool> = None;

    let modal = egui::Modal::new(egui::Id::new("confirm_modal")).show(ctx, |ui| {
        ui.set_width(400.0);
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("⚠").size(24.0).color(egui::Color32::YELLOW));
            ui.label(egui::RichText::new(confirmation.prompt()).size(14.0));
        });

        ui.add_space(15.0);

        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Reset").clicked() {
                    answer = Some(true);
                    ui.close();
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                    ui.close();
                }
            });
        });
    });

    if answer.is_none() && modal.should_close() {
        answer = Some(false);
    }

    answer
}
