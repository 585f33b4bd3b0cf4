mod settings;

use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use log::{
    debug,
    warn,
};
use serde::{
    de::DeserializeOwned,
    Serialize,
};
pub use settings::{
    Settings,
    BACKEND_URL_ENV,
};

use crate::core::ReviewError;

const APP_NAME: &str = "tangocho";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), ReviewError> {
    save_json_in(&get_app_data_dir(), data, filename)
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    load_json_or_default_in(&get_app_data_dir(), filename)
}

pub fn save_json_in<T: Serialize>(dir: &Path, data: &T, filename: &str) -> Result<(), ReviewError> {
    fs::create_dir_all(dir)?;
    let file_path = dir.join(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    debug!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json_in<T: DeserializeOwned + Default>(
    dir: &Path,
    filename: &str,
) -> Result<T, ReviewError> {
    let file_path = dir.join(filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default_in<T: DeserializeOwned + Default>(dir: &Path, filename: &str) -> T {
    match load_json_in::<T>(dir, filename) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings: Settings = load_json_or_default_in(dir.path(), "settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings { page_size: 25, dark_mode: false, ..Settings::default() };

        save_json_in(dir.path(), &settings, "settings.json").unwrap();
        let loaded: Settings = load_json_or_default_in(dir.path(), "settings.json");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

        assert!(load_json_in::<Settings>(dir.path(), "settings.json").is_err());
        let settings: Settings = load_json_or_default_in(dir.path(), "settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        save_json_in(&nested, &Settings::default(), "settings.json").unwrap();
        assert!(nested.join("settings.json").exists());
    }
}
