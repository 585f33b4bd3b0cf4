use eframe::egui::{
    self,
    RichText,
    Sense,
    TextEdit,
    Ui,
};
use egui_extras::{
    Column,
    TableBuilder,
    TableRow,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    dialogs,
    pagination_bar::pagination_bar,
    theme::Theme,
};
use crate::core::{
    controller::ViewController,
    review_table::{
        SortColumn,
        TablePage,
        TableViewState,
    },
    selection::SelectionSet,
    tasks::Operation,
};

const CONTEXT_PREVIEW_CHARS: usize = 120;

pub fn review_panel(
    ui: &mut Ui,
    theme: &Theme,
    controller: &ViewController,
    actions: &mut ActionQueue,
) {
    if controller.vocabulary().is_empty() {
        empty_state(ui, theme, controller, actions);
        return;
    }

    if let Some(name) = controller.source_name() {
        ui.heading(RichText::new(name).color(theme.cyan(ui.ctx())).strong());
    }

    controls_row(ui, controller, actions);
    ui.add_space(6.0);

    let page = controller.page();
    let view = controller.table().view();

    egui::TopBottomPanel::bottom("review_pagination")
        .show_separator_line(false)
        .show_inside(ui, |ui| {
            ui.add_space(4.0);
            pagination_bar(ui, controller.table(), actions);
        });

    if page.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new("No words match the filter").color(theme.comment(ui.ctx())));
        });
        return;
    }

    term_table(ui, theme, &page, view, controller.selection(), actions);
}

fn empty_state(ui: &mut Ui, theme: &Theme, controller: &ViewController, actions: &mut ActionQueue) {
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.label(RichText::new("No Book Loaded").size(32.0).color(theme.cyan(ui.ctx())));
        ui.add_space(1.0);
        ui.label(
            RichText::new("EPUBを開いて単語を確認しましょう").size(18.0).color(theme.comment(ui.ctx())),
        );
        ui.add_space(16.0);

        let analyzing = controller.is_loading(Operation::Analyze);
        if ui.add_enabled(!analyzing, egui::Button::new("Open EPUB…")).clicked() {
            if let Some(path) = dialogs::pick_document() {
                actions.push(UiAction::UploadDocument(path));
            }
        }
    });
}

fn controls_row(ui: &mut Ui, controller: &ViewController, actions: &mut ActionQueue) {
    let mut filter = controller.table().view().filter().to_string();
    let selected = controller.selection().len();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 12.0;

        let response = ui.add_sized(
            [260.0, ui.spacing().interact_size.y],
            TextEdit::singleline(&mut filter).hint_text("Filter words..."),
        );
        if response.changed() {
            actions.push(UiAction::SetFilter(filter));
        }

        if !controller.table().view().sort().is_empty()
            && ui.small_button("Clear sort").on_hover_text("Back to backend order").clicked()
        {
            actions.push(UiAction::ClearSort);
        }

        ui.separator();

        let marking = controller.is_loading(Operation::MarkKnown);
        let label = format!("Mark {selected} known");
        if ui.add_enabled(selected > 0 && !marking, egui::Button::new(label)).clicked() {
            actions.push(UiAction::MarkSelectedKnown);
        }
        if ui.add_enabled(selected > 0, egui::Button::new("Clear selection")).clicked() {
            actions.push(UiAction::ClearSelection);
        }
    });
}

fn term_table(
    ui: &mut Ui,
    theme: &Theme,
    page: &TablePage<'_>,
    view: &TableViewState,
    selection: &SelectionSet,
    actions: &mut ActionQueue,
) {
    let text_height = egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y);

    egui::ScrollArea::horizontal().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(28.0))
            .column(Column::exact(44.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder())
            .header(26.0, |mut header| {
                header.col(|ui| {
                    let mut all = selection.all_selected(page.words());
                    if ui.checkbox(&mut all, "").on_hover_text("Select this page").changed() {
                        actions.push(UiAction::SetPageSelected(all));
                    }
                });
                header.col(|ui| {
                    ui.label(RichText::new("#").color(ui.visuals().weak_text_color()));
                });
                header_cols(&mut header, theme, view, actions);
            })
            .body(|body| {
                body.rows(text_height + 6.0, page.rows.len(), |mut row| {
                    let table_row = page.rows[row.index()];
                    let entry = table_row.entry;
                    let mut checked = selection.contains(&entry.word);

                    row.set_selected(checked);
                    row.col(|ui| {
                        if ui.checkbox(&mut checked, "").changed() {
                            actions.push(UiAction::ToggleWord(entry.word.clone()));
                        }
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(table_row.display_index.to_string())
                                .color(ui.visuals().weak_text_color()),
                        );
                    });
                    row.col(|ui| {
                        let response = ui
                            .add(egui::Label::new(theme.word(ui.ctx(), &entry.word).size(18.0)).sense(Sense::click()));
                        if response.clicked() {
                            actions.push(UiAction::ToggleWord(entry.word.clone()));
                        }
                    });
                    row.col(|ui| {
                        ui.label(entry.frequency.to_string());
                    });
                    row.col(|ui| {
                        ui.label(entry.context_preview(CONTEXT_PREVIEW_CHARS))
                            .on_hover_text(&entry.context);
                    });
                });
            });
    });
}

fn header_cols(
    header: &mut TableRow<'_, '_>,
    theme: &Theme,
    view: &TableViewState,
    actions: &mut ActionQueue,
) {
    for column in [SortColumn::Word, SortColumn::Frequency, SortColumn::Context] {
        header.col(|ui| column_header(ui, theme, view, column, actions));
    }
}

fn column_header(
    ui: &mut Ui,
    theme: &Theme,
    view: &TableViewState,
    column: SortColumn,
    actions: &mut ActionQueue,
) {
    let direction = view.sort_direction(column);
    let priority = view.sort_priority(column);
    let multi = view.sort().len() > 1;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        let response = ui
            .add(egui::Label::new(theme.heading(ui.ctx(), column.title())).sense(Sense::click()))
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .on_hover_text("Click to sort, shift-click to add as secondary sort");

        if let Some(direction) = direction {
            let mut arrow = direction.arrow().to_string();
            if let (true, Some(priority)) = (multi, priority) {
                arrow.push_str(&(priority + 1).to_string());
            }
            ui.label(RichText::new(arrow).small().color(ui.visuals().strong_text_color()));
        }

        if response.clicked() {
            let additive = ui.input(|i| i.modifiers.shift);
            actions.push(UiAction::CycleSort { column, additive });
        }
    });
}
