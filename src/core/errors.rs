use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("File must be a .{expected} file: {path}")]
    InvalidFileType { path: String, expected: &'static str },

    #[error("No words selected")]
    EmptySelection,

    #[error("{0}")]
    Custom(String),
}

impl From<std::io::Error> for ReviewError {
    fn from(error: std::io::Error) -> Self {
        ReviewError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for ReviewError {
    fn from(error: reqwest::Error) -> Self {
        ReviewError::Reqwest(Box::new(error))
    }
}
