use eframe::egui::{
    self,
    RichText,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::core::controller::ViewController;

/// Error slot and notifications, pinned under the top bar.
pub fn show(
    ctx: &egui::Context,
    theme: &Theme,
    controller: &ViewController,
    actions: &mut ActionQueue,
) {
    let error = controller.error();
    let notice = controller.notice();
    let loading = controller.loading_labels();

    if error.is_none() && notice.is_none() && loading.is_empty() {
        return;
    }

    egui::TopBottomPanel::top("message_banners").show(ctx, |ui| {
        ui.add_space(2.0);

        if let Some(message) = error {
            banner(ui, "⚠", theme.red(ctx), message, || actions.push(UiAction::DismissError));
        }

        if let Some(message) = notice {
            banner(ui, "ℹ", theme.green(ctx), message, || actions.push(UiAction::DismissNotice));
        }

        if !loading.is_empty() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(12.0));
                ui.label(
                    RichText::new(loading.join("  ")).small().color(theme.comment(ctx)),
                );
            });
        }

        ui.add_space(2.0);
    });
}

fn banner(
    ui: &mut egui::Ui,
    icon: &str,
    color: egui::Color32,
    message: &str,
    mut on_dismiss: impl FnMut(),
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).size(16.0).color(color));
        ui.label(RichText::new(message).color(color));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                on_dismiss();
            }
        });
    });
}
