pub mod http;
mod wire;

#[cfg(test)]
pub(crate) mod fake;

use thiserror::Error;

pub use http::HttpRemote;

use crate::core::{
    AnalysisResult,
    DeckScope,
    ImportSummary,
    KnownAction,
    ReviewError,
};

/// A failed backend call, reduced to the one message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SyncError {
    pub message: String,
}

impl SyncError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<ReviewError> for SyncError {
    fn from(error: ReviewError) -> Self {
        SyncError::new(error.to_string())
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

/// Calls the vocabulary backend exposes. Implementations block; callers run
/// them off the UI thread.
pub trait RemoteSync: Send + Sync {
    fn analyze_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        limit: Option<usize>,
    ) -> SyncResult<AnalysisResult>;

    fn update_known(&self, words: &[String], action: KnownAction) -> SyncResult<()>;

    fn fetch_known(&self) -> SyncResult<Vec<String>>;

    fn import_known(&self, file_name: &str, bytes: Vec<u8>) -> SyncResult<ImportSummary>;

    fn reset_known(&self) -> SyncResult<()>;

    fn generate_deck(&self, scope: DeckScope) -> SyncResult<Vec<u8>>;

    fn health(&self) -> SyncResult<()>;
}
