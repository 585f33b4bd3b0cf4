use std::{
    fs,
    path::Path,
};

use super::ReviewError;

pub const DOCUMENT_EXTENSION: &str = "epub";
pub const KNOWN_WORDS_EXTENSION: &str = "txt";

/// Rejects a path whose extension is not `expected` (case-insensitive).
pub fn ensure_extension(path: &Path, expected: &'static str) -> Result<(), ReviewError> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(expected));

    if matches {
        Ok(())
    } else {
        Err(ReviewError::InvalidFileType { path: path.display().to_string(), expected })
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name().and_then(|name| name.to_str()).unwrap_or("upload").to_string()
}

/// File name and contents for a multipart upload.
pub fn read_upload(path: &Path) -> Result<(String, Vec<u8>), ReviewError> {
    let bytes = fs::read(path)
        .map_err(|e| ReviewError::Custom(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok((file_name(path), bytes))
}

/// Writes one word per line, the format the known-word import accepts.
pub fn write_word_list(path: &Path, words: &[String]) -> Result<(), ReviewError> {
    let mut content = words.join("\n");
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ReviewError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(ensure_extension(Path::new("novel.EPUB"), DOCUMENT_EXTENSION).is_ok());
        assert!(ensure_extension(Path::new("dir/deck.txt"), KNOWN_WORDS_EXTENSION).is_ok());
    }

    #[test]
    fn wrong_or_missing_extension_is_rejected() {
        let err = ensure_extension(Path::new("novel.pdf"), DOCUMENT_EXTENSION).unwrap_err();
        assert_eq!(err.to_string(), "File must be a .epub file: novel.pdf");
        assert!(ensure_extension(Path::new("README"), KNOWN_WORDS_EXTENSION).is_err());
        assert!(ensure_extension(&PathBuf::from("archive.txt.gz"), KNOWN_WORDS_EXTENSION).is_err());
    }

    #[test]
    fn word_list_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("known.txt");
        write_word_list(&path, &["猫".to_string(), "犬".to_string()]).unwrap();

        let (name, bytes) = read_upload(&path).unwrap();
        assert_eq!(name, "known.txt");
        assert_eq!(String::from_utf8(bytes).unwrap(), "猫\n犬\n");
    }

    #[test]
    fn reading_a_missing_file_names_it() {
        let err = read_upload(Path::new("/nonexistent/book.epub")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/book.epub"));
    }
}
