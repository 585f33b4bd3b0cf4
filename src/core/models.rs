use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,      // Unique within one analysis result
    pub frequency: u32,    // Occurrences in the source document, at least 1
    pub context: String,   // Excerpt the word was found in
}

impl VocabularyEntry {
    pub fn new(word: impl Into<String>, frequency: u32, context: impl Into<String>) -> Self {
        Self { word: word.into(), frequency, context: context.into() }
    }

    /// Context shortened to `max_chars` characters for table display.
    pub fn context_preview(&self, max_chars: usize) -> String {
        if self.context.chars().count() <= max_chars {
            return self.context.clone();
        }
        let mut preview: String = self.context.chars().take(max_chars).collect();
        preview.push('…');
        preview
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    Reviewing,
    KnownWords,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Reviewing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub vocab: Vec<VocabularyEntry>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub words_imported: usize,
    pub total_known_words: usize,
    pub sample_words: Vec<String>,
}

impl ImportSummary {
    pub fn message(&self) -> String {
        let mut message = format!(
            "Imported {} words ({} known in total)",
            self.words_imported, self.total_known_words
        );
        if !self.sample_words.is_empty() {
            message.push_str(&format!(": {}", self.sample_words.join("、")));
        }
        message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckScope {
    Reviewing,
    Known,
}

impl DeckScope {
    pub fn file_name(&self) -> &'static str {
        match self {
            DeckScope::Reviewing => "Japanese_Vocab.apkg",
            DeckScope::Known => "Known_Words.apkg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeckScope::Reviewing => "vocabulary deck",
            DeckScope::Known => "known-words deck",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckArtifact {
    pub scope: DeckScope,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownAction {
    Add,
    Remove,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_preview_truncates_by_characters() {
        let entry = VocabularyEntry::new("猫", 3, "吾輩は猫である。名前はまだ無い。");
        assert_eq!(entry.context_preview(5), "吾輩は猫で…");
        assert_eq!(entry.context_preview(100), entry.context);
    }

    #[test]
    fn import_summary_lists_samples() {
        let summary = ImportSummary {
            words_imported: 2,
            total_known_words: 10,
            sample_words: vec!["猫".into(), "犬".into()],
        };
        assert_eq!(summary.message(), "Imported 2 words (10 known in total): 猫、犬");
    }

    #[test]
    fn known_action_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&KnownAction::Add).unwrap(), "\"add\"");
        assert_eq!(serde_json::to_string(&KnownAction::Remove).unwrap(), "\"remove\"");
    }
}
