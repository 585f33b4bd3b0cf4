use eframe::egui::{
    self,
    RichText,
    Ui,
};

use super::actions::{
    ActionQueue,
    UiAction,
};
use crate::core::{
    pagination::{
        page_window,
        PageItem,
    },
    review_table::ReviewTable,
};

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [25, 50, 100, 200];

pub fn pagination_bar(ui: &mut Ui, table: &ReviewTable, actions: &mut ActionQueue) {
    let page_index = table.view().page_index();
    let page_count = table.page_count();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        if ui.add_enabled(page_index > 0, egui::Button::new("‹ Prev")).clicked() {
            actions.push(UiAction::PrevPage);
        }

        for item in page_window(page_count, page_index) {
            match item {
                PageItem::Page(page) => {
                    let label = RichText::new((page + 1).to_string());
                    if ui.selectable_label(page == page_index, label).clicked() && page != page_index
                    {
                        actions.push(UiAction::SetPage(page));
                    }
                }
                PageItem::Ellipsis => {
                    ui.label(RichText::new("…").weak());
                }
            }
        }

        if ui.add_enabled(page_index + 1 < page_count, egui::Button::new("Next ›")).clicked() {
            actions.push(UiAction::NextPage);
        }

        ui.separator();

        let page_size = table.view().page_size();
        egui::ComboBox::from_id_salt("page_size")
            .selected_text(format!("{page_size} per page"))
            .show_ui(ui, |ui| {
                for option in PAGE_SIZE_OPTIONS {
                    if ui.selectable_label(option == page_size, option.to_string()).clicked() {
                        actions.push(UiAction::SetPageSize(option));
                    }
                }
            });

        ui.label(
            RichText::new(format!("{} entries", table.filtered_count()))
                .color(ui.visuals().weak_text_color()),
        );
    });
}
