use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    AnalysisResult,
    ImportSummary,
    KnownAction,
    VocabularyEntry,
};

#[derive(Debug, Serialize)]
pub struct UpdateKnownRequest<'a> {
    pub words: &'a [String],
    pub action: KnownAction,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub vocab: Vec<VocabularyEntry>,
    #[serde(default)]
    pub count: Option<usize>,
}

impl From<AnalyzeResponse> for AnalysisResult {
    fn from(response: AnalyzeResponse) -> Self {
        let count = response.count.unwrap_or(response.vocab.len());
        AnalysisResult { vocab: response.vocab, count }
    }
}

#[derive(Debug, Deserialize)]
pub struct KnownWordsResponse {
    #[serde(default)]
    pub known_words: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub words_imported: usize,
    #[serde(default)]
    pub total_known_words: usize,
    #[serde(default)]
    pub sample_words: Vec<String>,
}

impl From<ImportResponse> for ImportSummary {
    fn from(response: ImportResponse) -> Self {
        ImportSummary {
            words_imported: response.words_imported,
            total_known_words: response.total_known_words,
            sample_words: response.sample_words,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ValidationIssue {
    #[serde(default)]
    msg: Option<String>,
}

/// Pulls the server's `detail` out of an error body. Handles both the plain
/// string form and the list-of-issues form used for request validation.
pub fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let detail = match parsed.detail? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<ValidationIssue>(item).ok())
            .filter_map(|issue| issue.msg)
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };

    let detail = detail.trim().to_string();
    if detail.is_empty() {
        None
    } else {
        Some(detail)
    }
}
