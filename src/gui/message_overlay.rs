use eframe::egui;

use crate::gui::theme::Theme;

/// Dims the window and shows a spinner while a document is being analyzed.
pub struct MessageOverlay;

impl MessageOverlay {
    pub fn show(ctx: &egui::Context, theme: &Theme, message: &str) {
        egui::Area::new(egui::Id::new("message_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::Pos2::new(0.0, 0.0))
            .show(ctx, |ui| {
                let screen_size = ui.ctx().screen_rect().size();
                ui.allocate_space(screen_size);
                ui.painter().rect_filled(
                    ui.ctx().screen_rect(),
                    0.0,
                    egui::Color32::from_black_alpha(120),
                );
            });

        egui::Window::new("message_box")
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .fixed_size(egui::Vec2::new(240.0, 100.0))
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::new(0.0, 0.0))
            .show(ctx, |ui| {
                ui.style_mut().visuals.window_stroke =
                    egui::Stroke::new(2.0, theme.cyan(ui.ctx()));

                ui.vertical_centered(|ui| {
                    ui.add_space(12.0);
                    ui.add(egui::Spinner::new());
                    ui.label(message);
                });
            });
    }
}
