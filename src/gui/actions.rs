use std::path::PathBuf;

use crate::core::{
    controller::ViewController,
    review_table::SortColumn,
    DeckScope,
    ViewState,
};

// UI code only records what was clicked; the app applies it after the frame is laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // View
    SwitchView(ViewState),

    // Review table
    ToggleWord(String),
    SetPageSelected(bool),
    ClearSelection,
    CycleSort { column: SortColumn, additive: bool },
    ClearSort,
    SetFilter(String),
    SetPage(usize),
    PrevPage,
    NextPage,
    SetPageSize(usize),

    // Backend
    UploadDocument(PathBuf),
    MarkSelectedKnown,
    ForgetKnown(String),
    ImportKnownWords(PathBuf),
    ExportKnownWords(PathBuf),
    RequestResetKnown,
    GenerateDeck(DeckScope),
    CheckBackend,

    // Messages
    DismissError,
    DismissNotice,
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies one queued action to the controller.
pub fn dispatch(controller: &mut ViewController, action: UiAction) {
    match action {
        UiAction::SwitchView(view) => controller.switch_view(view),

        UiAction::ToggleWord(word) => controller.toggle_word(&word),
        UiAction::SetPageSelected(selected) => controller.set_page_selected(selected),
        UiAction::ClearSelection => controller.clear_selection(),
        UiAction::CycleSort { column, additive } => {
            controller.table_mut().cycle_sort(column, additive)
        }
        UiAction::ClearSort => controller.table_mut().clear_sort(),
        UiAction::SetFilter(filter) => controller.table_mut().set_filter(filter),
        UiAction::SetPage(page) => controller.table_mut().set_page(page),
        UiAction::PrevPage => controller.table_mut().prev_page(),
        UiAction::NextPage => controller.table_mut().next_page(),
        UiAction::SetPageSize(size) => controller.table_mut().set_page_size(size),

        UiAction::UploadDocument(path) => {
            controller.upload_document(path);
        }
        UiAction::MarkSelectedKnown => {
            controller.mark_known();
        }
        UiAction::ForgetKnown(word) => {
            controller.forget_known(vec![word]);
        }
        UiAction::ImportKnownWords(path) => {
            controller.import_known_words(path);
        }
        UiAction::ExportKnownWords(path) => {
            controller.export_known_words(&path);
        }
        UiAction::RequestResetKnown => controller.request_reset_known(),
        UiAction::GenerateDeck(scope) => {
            controller.generate_deck(scope);
        }
        UiAction::CheckBackend => {
            controller.check_backend();
        }

        UiAction::DismissError => controller.clear_error(),
        UiAction::DismissNotice => controller.dismiss_notice(),
    }
    controller.refresh_table();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        tasks::SyncRequest,
        VocabularyEntry,
    };

    fn controller() -> ViewController {
        let mut controller = ViewController::new(2, None);
        controller.load_vocabulary(vec![
            VocabularyEntry::new("猫", 3, "猫がいる"),
            VocabularyEntry::new("犬", 9, "犬がいる"),
            VocabularyEntry::new("鳥", 5, "鳥がいる"),
        ]);
        controller
    }

    #[test]
    fn queue_drains_in_order() {
        let mut queue = ActionQueue::new();
        queue.push(UiAction::ToggleWord("猫".into()));
        queue.push(UiAction::MarkSelectedKnown);

        let drained: Vec<UiAction> = queue.drain().collect();
        assert_eq!(drained, vec![UiAction::ToggleWord("猫".into()), UiAction::MarkSelectedKnown]);
        assert!(queue.is_empty());
    }

    #[test]
    fn header_click_sorts_and_refreshes_page() {
        let mut controller = controller();
        dispatch(&mut controller, UiAction::CycleSort { column: SortColumn::Frequency, additive: false });

        let page = controller.page();
        assert_eq!(page.words().collect::<Vec<_>>(), vec!["犬", "鳥"]);
    }

    #[test]
    fn filter_action_resets_to_first_page() {
        let mut controller = controller();
        dispatch(&mut controller, UiAction::SetPage(1));
        assert_eq!(controller.table().view().page_index(), 1);

        dispatch(&mut controller, UiAction::SetFilter("猫".into()));
        assert_eq!(controller.table().view().page_index(), 0);
        assert_eq!(controller.page().words().collect::<Vec<_>>(), vec!["猫"]);
    }

    #[test]
    fn prev_and_next_stay_within_page_range() {
        let mut controller = controller();
        dispatch(&mut controller, UiAction::NextPage);
        dispatch(&mut controller, UiAction::NextPage);
        assert_eq!(controller.table().view().page_index(), 1);

        dispatch(&mut controller, UiAction::PrevPage);
        dispatch(&mut controller, UiAction::PrevPage);
        assert_eq!(controller.table().view().page_index(), 0);
    }

    #[test]
    fn mark_selected_queues_update_request() {
        let mut controller = controller();
        dispatch(&mut controller, UiAction::ToggleWord("犬".into()));
        dispatch(&mut controller, UiAction::MarkSelectedKnown);

        let requests = controller.drain_requests();
        assert_eq!(requests.len(), 1);
        assert!(matches!(
            &requests[0],
            SyncRequest::UpdateKnown { words, .. } if words == &vec!["犬".to_string()]
        ));
    }

    #[test]
    fn switching_to_known_view_queues_fetch() {
        let mut controller = controller();
        dispatch(&mut controller, UiAction::SwitchView(ViewState::KnownWords));
        assert_eq!(controller.drain_requests(), vec![SyncRequest::FetchKnown]);
    }
}
