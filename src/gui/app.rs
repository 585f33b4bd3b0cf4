use std::{
    fs,
    mem,
    path::Path,
    sync::Arc,
    time::Duration,
};

use eframe::egui;
use log::{
    debug,
    info,
    warn,
};

use super::{
    actions::{
        dispatch,
        ActionQueue,
        UiAction,
    },
    banners,
    confirm_modal,
    dialogs,
    known_words::KnownWordsPanel,
    message_overlay::MessageOverlay,
    review_table::review_panel,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::TopBar,
};
use crate::{
    core::{
        controller::ViewController,
        files::{
            DOCUMENT_EXTENSION,
            KNOWN_WORDS_EXTENSION,
        },
        tasks::{
            Operation,
            TaskManager,
        },
        ViewState,
    },
    persistence::{
        save_json,
        Settings,
    },
    remote::RemoteSync,
};

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// System fonts with Japanese coverage, tried in order.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

pub struct ReviewApp {
    controller: ViewController,
    task_manager: TaskManager,
    settings: Settings,

    // UI State
    theme: Theme,
    known_panel: KnownWordsPanel,
    actions: ActionQueue,
}

impl ReviewApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        remote: Arc<dyn RemoteSync>,
    ) -> Self {
        let mut controller = ViewController::new(settings.page_size, settings.analyze_limit);
        controller.check_backend();

        let app = Self {
            controller,
            task_manager: TaskManager::new(remote),
            settings,
            theme: Theme::dracula(),
            known_panel: KnownWordsPanel::default(),
            actions: ActionQueue::new(),
        };

        app.setup_fonts(cc);
        set_theme(&cc.egui_ctx, &app.theme);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = if app.settings.dark_mode {
                egui::ThemePreference::Dark
            } else {
                egui::ThemePreference::Light
            };
        });

        app
    }

    fn setup_fonts(&self, cc: &eframe::CreationContext<'_>) {
        let Some((path, bytes)) =
            CJK_FONT_CANDIDATES.iter().find_map(|path| fs::read(path).ok().map(|b| (*path, b)))
        else {
            warn!("No Japanese system font found; words may not render");
            return;
        };

        debug!("Using font {}", path);
        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("japanese".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
        fonts
            .families
            .entry(egui::FontFamily::Proportional)
            .or_default()
            .insert(0, "japanese".to_owned());
        fonts.families.entry(egui::FontFamily::Monospace).or_default().push("japanese".to_owned());

        cc.egui_ctx.set_fonts(fonts);
    }

    fn handle_task_results(&mut self) {
        for result in self.task_manager.poll_results() {
            self.controller.apply(result);
        }
    }

    fn submit_requests(&mut self) {
        if self.controller.has_requests() {
            self.task_manager.submit_all(self.controller.drain_requests());
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input_mut(|i| mem::take(&mut i.raw.dropped_files));
        for path in dropped.iter().filter_map(|file| file.path.as_deref()) {
            match action_for_dropped_file(path) {
                Some(action) => self.actions.push(action),
                None => self.controller.report_error(format!(
                    "Unsupported file: {} (expected .{} or .{})",
                    path.display(),
                    DOCUMENT_EXTENSION,
                    KNOWN_WORDS_EXTENSION
                )),
            }
        }
    }

    fn save_pending_download(&mut self) {
        let Some(artifact) = self.controller.take_download() else {
            return;
        };

        match dialogs::save_deck(&artifact.file_name) {
            Some(path) => {
                self.controller.save_deck(&artifact, &path);
            }
            None => info!("Save of {} cancelled", artifact.file_name),
        }
    }

    fn apply_actions(&mut self) {
        let actions: Vec<UiAction> = self.actions.drain().collect();
        for action in actions {
            dispatch(&mut self.controller, action);
        }
    }

    /// Persists preferences that the user can change from the window.
    fn sync_settings(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        let page_size = self.controller.table().view().page_size();

        if dark_mode != self.settings.dark_mode || page_size != self.settings.page_size {
            self.settings.dark_mode = dark_mode;
            self.settings.page_size = page_size;
            if let Err(e) = save_json(&self.settings, Settings::FILE_NAME) {
                warn!("Failed to save settings: {}", e);
            }
        }
    }
}

/// `.epub` drops start an analysis, `.txt` drops import known words.
fn action_for_dropped_file(path: &Path) -> Option<UiAction> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        DOCUMENT_EXTENSION => Some(UiAction::UploadDocument(path.to_path_buf())),
        KNOWN_WORDS_EXTENSION => Some(UiAction::ImportKnownWords(path.to_path_buf())),
        _ => None,
    }
}

impl eframe::App for ReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_task_results();
        self.save_pending_download();
        self.handle_file_drops(ctx);
        self.controller.refresh_table();

        TopBar::show(ctx, &self.controller, &self.settings.backend_url, &mut self.actions);
        banners::show(ctx, &self.theme, &self.controller, &mut self.actions);

        egui::CentralPanel::default().show(ctx, |ui| match self.controller.view() {
            ViewState::Reviewing => {
                review_panel(ui, &self.theme, &self.controller, &mut self.actions)
            }
            ViewState::KnownWords => {
                self.known_panel.show(ui, &self.theme, &self.controller, &mut self.actions)
            }
        });

        if let Some(confirmation) = self.controller.confirmation() {
            if let Some(answer) = confirm_modal::show(ctx, confirmation) {
                self.controller.confirm(answer);
            }
        }

        if self.controller.is_loading(Operation::Analyze) {
            MessageOverlay::show(ctx, &self.theme, Operation::Analyze.label());
        }

        self.apply_actions();
        self.submit_requests();
        self.sync_settings(ctx);

        if self.controller.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn dropped_files_route_by_extension() {
        assert_eq!(
            action_for_dropped_file(Path::new("/books/Kokoro.EPUB")),
            Some(UiAction::UploadDocument(PathBuf::from("/books/Kokoro.EPUB")))
        );
        assert_eq!(
            action_for_dropped_file(Path::new("deck export.txt")),
            Some(UiAction::ImportKnownWords(PathBuf::from("deck export.txt")))
        );
        assert_eq!(action_for_dropped_file(Path::new("cover.png")), None);
        assert_eq!(action_for_dropped_file(Path::new("README")), None);
    }
}
