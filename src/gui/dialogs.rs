use std::path::PathBuf;

use rfd::FileDialog;

use crate::core::files::{
    DOCUMENT_EXTENSION,
    KNOWN_WORDS_EXTENSION,
};

pub fn pick_document() -> Option<PathBuf> {
    FileDialog::new().add_filter("EPUB books", &[DOCUMENT_EXTENSION]).pick_file()
}

pub fn pick_known_words() -> Option<PathBuf> {
    FileDialog::new().add_filter("Anki text export", &[KNOWN_WORDS_EXTENSION]).pick_file()
}

pub fn save_known_words() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Text files", &[KNOWN_WORDS_EXTENSION])
        .set_file_name("known_words.txt")
        .save_file()
}

pub fn save_deck(file_name: &str) -> Option<PathBuf> {
    FileDialog::new().add_filter("Anki deck", &["apkg"]).set_file_name(file_name).save_file()
}
