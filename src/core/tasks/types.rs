use std::path::PathBuf;

use crate::{
    core::{
        files::{
            file_name,
            read_upload,
        },
        AnalysisResult,
        DeckScope,
        ImportSummary,
        KnownAction,
    },
    remote::{
        RemoteSync,
        SyncResult,
    },
};

/// Remote operations, one loading flag each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Analyze,
    MarkKnown,
    ForgetKnown,
    FetchKnown,
    ImportKnown,
    ResetKnown,
    GenerateDeck(DeckScope),
    Health,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Analyze => "Analyzing document...",
            Operation::MarkKnown => "Marking words known...",
            Operation::ForgetKnown => "Removing known words...",
            Operation::FetchKnown => "Loading known words...",
            Operation::ImportKnown => "Importing known words...",
            Operation::ResetKnown => "Resetting known words...",
            Operation::GenerateDeck(_) => "Generating deck...",
            Operation::Health => "Checking backend...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRequest {
    Analyze { path: PathBuf, limit: Option<usize> },
    UpdateKnown { words: Vec<String>, action: KnownAction },
    FetchKnown,
    ImportKnown { path: PathBuf },
    ResetKnown,
    GenerateDeck(DeckScope),
    Health,
}

impl SyncRequest {
    pub fn operation(&self) -> Operation {
        match self {
            SyncRequest::Analyze { .. } => Operation::Analyze,
            SyncRequest::UpdateKnown { action: KnownAction::Add, .. } => Operation::MarkKnown,
            SyncRequest::UpdateKnown { action: KnownAction::Remove, .. } => Operation::ForgetKnown,
            SyncRequest::FetchKnown => Operation::FetchKnown,
            SyncRequest::ImportKnown { .. } => Operation::ImportKnown,
            SyncRequest::ResetKnown => Operation::ResetKnown,
            SyncRequest::GenerateDeck(scope) => Operation::GenerateDeck(*scope),
            SyncRequest::Health => Operation::Health,
        }
    }

    /// Runs the request to completion. Never panics on backend failure; every
    /// error ends up inside the returned result.
    pub fn execute(self, remote: &dyn RemoteSync) -> TaskResult {
        match self {
            SyncRequest::Analyze { path, limit } => TaskResult::Analyzed {
                source_name: file_name(&path),
                result: read_upload(&path)
                    .map_err(Into::into)
                    .and_then(|(name, bytes)| remote.analyze_document(&name, bytes, limit)),
            },
            SyncRequest::UpdateKnown { words, action } => {
                let result = remote.update_known(&words, action);
                TaskResult::KnownUpdated { words, action, result }
            }
            SyncRequest::FetchKnown => TaskResult::KnownFetched(remote.fetch_known()),
            SyncRequest::ImportKnown { path } => TaskResult::KnownImported(
                read_upload(&path)
                    .map_err(Into::into)
                    .and_then(|(name, bytes)| remote.import_known(&name, bytes)),
            ),
            SyncRequest::ResetKnown => TaskResult::KnownReset(remote.reset_known()),
            SyncRequest::GenerateDeck(scope) => {
                TaskResult::DeckGenerated { scope, result: remote.generate_deck(scope) }
            }
            SyncRequest::Health => TaskResult::Health(remote.health().is_ok()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    Analyzed { source_name: String, result: SyncResult<AnalysisResult> },
    KnownUpdated { words: Vec<String>, action: KnownAction, result: SyncResult<()> },
    KnownFetched(SyncResult<Vec<String>>),
    KnownImported(SyncResult<ImportSummary>),
    KnownReset(SyncResult<()>),
    DeckGenerated { scope: DeckScope, result: SyncResult<Vec<u8>> },
    Health(bool),
}

impl TaskResult {
    pub fn operation(&self) -> Operation {
        match self {
            TaskResult::Analyzed { .. } => Operation::Analyze,
            TaskResult::KnownUpdated { action: KnownAction::Add, .. } => Operation::MarkKnown,
            TaskResult::KnownUpdated { action: KnownAction::Remove, .. } => Operation::ForgetKnown,
            TaskResult::KnownFetched(_) => Operation::FetchKnown,
            TaskResult::KnownImported(_) => Operation::ImportKnown,
            TaskResult::KnownReset(_) => Operation::ResetKnown,
            TaskResult::DeckGenerated { scope, .. } => Operation::GenerateDeck(*scope),
            TaskResult::Health(_) => Operation::Health,
        }
    }
}
