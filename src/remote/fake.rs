use std::sync::Mutex;

use super::{
    RemoteSync,
    SyncError,
    SyncResult,
};
use crate::core::{
    AnalysisResult,
    DeckScope,
    ImportSummary,
    KnownAction,
    VocabularyEntry,
};

/// In-memory backend for tests. Keeps its own known-word store and records
/// every call; `fail_next` makes the next call of that name fail.
#[derive(Default)]
pub struct FakeRemote {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    known: Vec<String>,
    vocab: Vec<VocabularyEntry>,
    import_words: Vec<String>,
    failures: Vec<(String, String)>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocab(self, vocab: Vec<VocabularyEntry>) -> Self {
        self.state.lock().unwrap().vocab = vocab;
        self
    }

    pub fn with_known(self, known: &[&str]) -> Self {
        self.state.lock().unwrap().known = known.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn with_import(self, words: &[&str]) -> Self {
        self.state.lock().unwrap().import_words = words.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn fail_next(&self, call: &str, message: &str) {
        self.state.lock().unwrap().failures.push((call.to_string(), message.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn known(&self) -> Vec<String> {
        self.state.lock().unwrap().known.clone()
    }

    /// Adds words behind the client's back, as another session would.
    pub fn add_known_directly(&self, words: &[&str]) {
        let mut state = self.state.lock().unwrap();
        for word in words {
            if !state.known.iter().any(|w| w == word) {
                state.known.push(word.to_string());
            }
        }
    }

    fn record(&self, call: &str) -> Result<std::sync::MutexGuard<'_, FakeState>, SyncError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        if let Some(pos) = state.failures.iter().position(|(name, _)| name == call) {
            let (_, message) = state.failures.remove(pos);
            return Err(SyncError::new(message));
        }
        Ok(state)
    }
}

impl RemoteSync for FakeRemote {
    fn analyze_document(
        &self,
        _file_name: &str,
        _bytes: Vec<u8>,
        limit: Option<usize>,
    ) -> SyncResult<AnalysisResult> {
        let state = self.record("analyze")?;
        let vocab: Vec<VocabularyEntry> = state
            .vocab
            .iter()
            .filter(|entry| !state.known.contains(&entry.word))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(AnalysisResult { count: vocab.len(), vocab })
    }

    fn update_known(&self, words: &[String], action: KnownAction) -> SyncResult<()> {
        let mut state = self.record("update_known")?;
        match action {
            KnownAction::Add => {
                for word in words {
                    if !state.known.contains(word) {
                        state.known.push(word.clone());
                    }
                }
            }
            KnownAction::Remove => state.known.retain(|w| !words.contains(w)),
        }
        Ok(())
    }

    fn fetch_known(&self) -> SyncResult<Vec<String>> {
        let state = self.record("fetch_known")?;
        Ok(state.known.clone())
    }

    fn import_known(&self, _file_name: &str, _bytes: Vec<u8>) -> SyncResult<ImportSummary> {
        let mut state = self.record("import_known")?;
        let words = state.import_words.clone();
        for word in &words {
            if !state.known.contains(word) {
                state.known.push(word.clone());
            }
        }
        Ok(ImportSummary {
            words_imported: words.len(),
            total_known_words: state.known.len(),
            sample_words: words.into_iter().take(10).collect(),
        })
    }

    fn reset_known(&self) -> SyncResult<()> {
        let mut state = self.record("reset_known")?;
        state.known.clear();
        Ok(())
    }

    fn generate_deck(&self, scope: DeckScope) -> SyncResult<Vec<u8>> {
        let _state = self.record("generate_deck")?;
        Ok(scope.file_name().as_bytes().to_vec())
    }

    fn health(&self) -> SyncResult<()> {
        let _state = self.record("health")?;
        Ok(())
    }
}
