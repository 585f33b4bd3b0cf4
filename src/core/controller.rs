use std::{
    collections::HashSet,
    mem,
    path::{
        Path,
        PathBuf,
    },
};

use log::{
    debug,
    info,
    warn,
};

use super::{
    files::{
        self,
        DOCUMENT_EXTENSION,
        KNOWN_WORDS_EXTENSION,
    },
    review_table::{
        ReviewTable,
        TablePage,
    },
    selection::SelectionSet,
    tasks::{
        Operation,
        SyncRequest,
        TaskResult,
    },
    DeckArtifact,
    DeckScope,
    KnownAction,
    ReviewError,
    VocabularyEntry,
    ViewState,
};

/// Destructive actions that wait for an explicit yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    ResetKnownWords,
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::ResetKnownWords => {
                "Remove every known word? This cannot be undone."
            }
        }
    }
}

/// Owns the review session: vocabulary list, known words, selection, the
/// review table, the single error slot and per-operation loading flags.
///
/// Remote work is never performed here. Each user operation validates its
/// input and queues a [`SyncRequest`]; the caller drains the queue, runs the
/// requests, and feeds every [`TaskResult`] back through [`apply`], which
/// updates all affected state in one step.
///
/// [`apply`]: ViewController::apply
#[derive(Debug)]
pub struct ViewController {
    view: ViewState,
    vocabulary: Vec<VocabularyEntry>,
    vocab_revision: u64,
    source_name: Option<String>,
    known_words: Vec<String>,
    selection: SelectionSet,
    table: ReviewTable,

    error: Option<String>,
    notice: Option<String>,
    confirmation: Option<Confirmation>,
    download: Option<DeckArtifact>,
    backend_online: Option<bool>,

    pending: HashSet<Operation>,
    outbox: Vec<SyncRequest>,
    known_refetch_queued: bool,
    analyze_limit: Option<usize>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(super::review_table::DEFAULT_PAGE_SIZE, None)
    }
}

impl ViewController {
    pub fn new(page_size: usize, analyze_limit: Option<usize>) -> Self {
        Self {
            view: ViewState::Reviewing,
            vocabulary: Vec::new(),
            vocab_revision: 0,
            source_name: None,
            known_words: Vec::new(),
            selection: SelectionSet::new(),
            table: ReviewTable::new(page_size),
            error: None,
            notice: None,
            confirmation: None,
            download: None,
            backend_online: None,
            pending: HashSet::new(),
            outbox: Vec::new(),
            known_refetch_queued: false,
            analyze_limit,
        }
    }

    // Read access

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn vocabulary(&self) -> &[VocabularyEntry] {
        &self.vocabulary
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn known_words(&self) -> &[String] {
        &self.known_words
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn table(&self) -> &ReviewTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ReviewTable {
        &mut self.table
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn confirmation(&self) -> Option<Confirmation> {
        self.confirmation
    }

    pub fn backend_online(&self) -> Option<bool> {
        self.backend_online
    }

    pub fn is_loading(&self, operation: Operation) -> bool {
        self.pending.contains(&operation)
    }

    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Loading messages for every operation in flight.
    pub fn loading_labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = self.pending.iter().map(|op| op.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    pub fn analyze_limit(&self) -> Option<usize> {
        self.analyze_limit
    }

    pub fn set_analyze_limit(&mut self, limit: Option<usize>) {
        self.analyze_limit = limit.filter(|&l| l > 0);
    }

    // Table

    /// Brings the table's cached order up to date with the vocabulary list.
    pub fn refresh_table(&mut self) {
        self.table.refresh(&self.vocabulary, self.vocab_revision);
    }

    /// Current page of the review table. Call [`refresh_table`] first.
    ///
    /// [`refresh_table`]: ViewController::refresh_table
    pub fn page(&self) -> TablePage<'_> {
        self.table.page(&self.vocabulary)
    }

    // Selection

    pub fn toggle_word(&mut self, word: &str) {
        if self.vocabulary.iter().any(|entry| entry.word == word) {
            self.selection.toggle(word);
        }
    }

    /// Checks or unchecks every row on the current page.
    pub fn set_page_selected(&mut self, selected: bool) {
        self.table.refresh(&self.vocabulary, self.vocab_revision);
        let page = self.table.page(&self.vocabulary);
        self.selection.set_page_selected(page.words(), selected);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // View

    /// Switches views. Entering the known-words view always refetches.
    pub fn switch_view(&mut self, view: ViewState) {
        self.view = view;
        if view == ViewState::KnownWords {
            self.queue_known_refetch();
        }
    }

    // Vocabulary

    /// Replaces the working list wholesale. Known words are left alone.
    pub fn load_vocabulary(&mut self, entries: Vec<VocabularyEntry>) {
        self.vocabulary = entries;
        self.vocab_revision += 1;
        self.selection.clear();
        self.table.reset();
        self.error = None;
        self.refresh_table();
    }

    /// Drops entries from the working list, keeping the selection a subset
    /// of what remains and the page index in range.
    pub fn retain_vocabulary(&mut self, mut keep: impl FnMut(&VocabularyEntry) -> bool) {
        let before = self.vocabulary.len();
        self.vocabulary.retain(|entry| keep(entry));
        if self.vocabulary.len() != before {
            self.vocab_revision += 1;
            let valid: HashSet<&str> = self.vocabulary.iter().map(|e| e.word.as_str()).collect();
            self.selection.prune(&valid);
            self.table.refresh(&self.vocabulary, self.vocab_revision);
        }
    }

    pub fn upload_document(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if let Err(e) = files::ensure_extension(&path, DOCUMENT_EXTENSION) {
            self.fail_validation(e);
            return false;
        }
        self.enqueue(SyncRequest::Analyze { path, limit: self.analyze_limit })
    }

    // Known words

    /// Marks every selected word known.
    pub fn mark_known(&mut self) -> bool {
        self.mark_known_words(self.selection.to_sorted_vec())
    }

    pub fn mark_known_words(&mut self, words: Vec<String>) -> bool {
        if words.is_empty() {
            self.fail_validation(ReviewError::EmptySelection);
            return false;
        }
        self.enqueue(SyncRequest::UpdateKnown { words, action: KnownAction::Add })
    }

    /// Takes words back out of the known-word set.
    pub fn forget_known(&mut self, words: Vec<String>) -> bool {
        if words.is_empty() {
            self.fail_validation(ReviewError::EmptySelection);
            return false;
        }
        self.enqueue(SyncRequest::UpdateKnown { words, action: KnownAction::Remove })
    }

    pub fn import_known_words(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if let Err(e) = files::ensure_extension(&path, KNOWN_WORDS_EXTENSION) {
            self.fail_validation(e);
            return false;
        }
        self.enqueue(SyncRequest::ImportKnown { path })
    }

    /// Asks for confirmation; nothing is sent until [`confirm`] says yes.
    ///
    /// [`confirm`]: ViewController::confirm
    pub fn request_reset_known(&mut self) {
        self.confirmation = Some(Confirmation::ResetKnownWords);
    }

    pub fn confirm(&mut self, accepted: bool) -> bool {
        match self.confirmation.take() {
            Some(Confirmation::ResetKnownWords) if accepted => self.enqueue(SyncRequest::ResetKnown),
            Some(confirmation) => {
                debug!("Declined: {:?}", confirmation);
                false
            }
            None => false,
        }
    }

    /// Writes the current known-word list to a local text file.
    pub fn export_known_words(&mut self, path: &Path) -> bool {
        match files::write_word_list(path, &self.known_words) {
            Ok(()) => {
                self.error = None;
                self.notice = Some(format!(
                    "Exported {} known words to {}",
                    self.known_words.len(),
                    path.display()
                ));
                true
            }
            Err(e) => {
                self.set_error(format!("Failed to export known words: {e}"));
                false
            }
        }
    }

    // Decks

    pub fn generate_deck(&mut self, scope: DeckScope) -> bool {
        self.enqueue(SyncRequest::GenerateDeck(scope))
    }

    /// Deck bytes waiting for the save dialog.
    pub fn take_download(&mut self) -> Option<DeckArtifact> {
        self.download.take()
    }

    /// Writes a generated deck to the path picked in the save dialog.
    pub fn save_deck(&mut self, artifact: &DeckArtifact, path: &Path) -> bool {
        match files::write_bytes(path, &artifact.bytes) {
            Ok(()) => {
                info!("Saved {} to {}", artifact.file_name, path.display());
                self.notice = Some(format!("Saved {} to {}", artifact.scope.label(), path.display()));
                true
            }
            Err(e) => {
                self.set_error(format!("Failed to save {}: {e}", artifact.file_name));
                false
            }
        }
    }

    pub fn check_backend(&mut self) -> bool {
        self.enqueue(SyncRequest::Health)
    }

    // Messages

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        self.set_error(message.into());
    }

    // Request queue

    pub fn drain_requests(&mut self) -> Vec<SyncRequest> {
        mem::take(&mut self.outbox)
    }

    pub fn has_requests(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Queues a request unless the same operation is already in flight.
    fn enqueue(&mut self, request: SyncRequest) -> bool {
        let operation = request.operation();
        if !self.pending.insert(operation) {
            debug!("Ignoring duplicate {:?} while one is in flight", operation);
            return false;
        }
        self.outbox.push(request);
        true
    }

    fn queue_known_refetch(&mut self) {
        if !self.enqueue(SyncRequest::FetchKnown) {
            self.known_refetch_queued = true;
        }
    }

    // Results

    /// Applies one finished request. Each arm is a complete state transition;
    /// failures land in the error slot and leave the rest untouched.
    pub fn apply(&mut self, result: TaskResult) {
        self.pending.remove(&result.operation());

        match result {
            TaskResult::Analyzed { source_name, result: Ok(analysis) } => {
                info!("Loaded {} vocabulary entries from {}", analysis.vocab.len(), source_name);
                self.load_vocabulary(analysis.vocab);
                self.source_name = Some(source_name);
            }

            TaskResult::KnownUpdated { words, action: KnownAction::Add, result: Ok(()) } => {
                info!("Marked {} words known", words.len());
                let marked: HashSet<&str> = words.iter().map(String::as_str).collect();
                self.retain_vocabulary(|entry| !marked.contains(entry.word.as_str()));
                self.selection.clear();
                self.append_known(&words);
                self.error = None;
            }

            TaskResult::KnownUpdated { words, action: KnownAction::Remove, result: Ok(()) } => {
                info!("Removed {} words from known words", words.len());
                let removed: HashSet<&str> = words.iter().map(String::as_str).collect();
                self.known_words.retain(|word| !removed.contains(word.as_str()));
                self.error = None;
            }

            TaskResult::KnownFetched(Ok(words)) => {
                self.known_words = words;
                self.error = None;
                if mem::take(&mut self.known_refetch_queued) {
                    self.queue_known_refetch();
                }
            }

            TaskResult::KnownImported(Ok(summary)) => {
                info!("Imported {} known words", summary.words_imported);
                self.notice = Some(summary.message());
                self.error = None;
                self.queue_known_refetch();
            }

            TaskResult::KnownReset(Ok(())) => {
                info!("Known words reset");
                self.known_words.clear();
                self.error = None;
                self.notice = Some("All known words have been cleared".to_string());
            }

            TaskResult::DeckGenerated { scope, result: Ok(bytes) } => {
                info!("Generated {} ({} bytes)", scope.label(), bytes.len());
                self.download = Some(DeckArtifact {
                    scope,
                    file_name: scope.file_name().to_string(),
                    bytes,
                });
                self.error = None;
            }

            TaskResult::Health(online) => {
                self.backend_online = Some(online);
            }

            TaskResult::Analyzed { result: Err(e), .. }
            | TaskResult::KnownUpdated { result: Err(e), .. }
            | TaskResult::KnownImported(Err(e))
            | TaskResult::KnownReset(Err(e))
            | TaskResult::DeckGenerated { result: Err(e), .. } => {
                self.set_error(e.message);
            }

            TaskResult::KnownFetched(Err(e)) => {
                self.set_error(e.message);
                if mem::take(&mut self.known_refetch_queued) {
                    self.queue_known_refetch();
                }
            }
        }
    }

    fn append_known(&mut self, words: &[String]) {
        let mut existing: HashSet<String> = self.known_words.iter().cloned().collect();
        for word in words {
            if existing.insert(word.clone()) {
                self.known_words.push(word.clone());
            }
        }
    }

    fn set_error(&mut self, message: String) {
        warn!("{message}");
        self.error = Some(message);
    }

    fn fail_validation(&mut self, error: ReviewError) {
        self.set_error(error.to_string());
    }
}
