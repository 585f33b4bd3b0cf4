pub mod controller;
pub mod errors;
pub mod files;
pub mod models;
pub mod pagination;
pub mod review_table;
pub mod selection;
pub mod tasks;

pub use controller::{
    Confirmation,
    ViewController,
};
pub use errors::ReviewError;
pub use models::{
    AnalysisResult,
    DeckArtifact,
    DeckScope,
    ImportSummary,
    KnownAction,
    VocabularyEntry,
    ViewState,
};
pub use review_table::ReviewTable;
pub use selection::SelectionSet;
