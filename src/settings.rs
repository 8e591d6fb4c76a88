
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Read side of the persisted settings store. The engine only ever reads
/// through this; persisting a changed value is the control surface's job.
pub trait SettingsStore {
    fn get_int(&self, key: &str, default: i64) -> i64;

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_int(key, default as i64) != 0
    }
}

/// Flat key -> integer map persisted as JSON. Booleans are stored 0/1,
/// matching what the settings provider on the device side holds.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JsonSettings {
    #[serde(flatten)]
    values: BTreeMap<String, i64>,
}

impl JsonSettings {
    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }
}

impl SettingsStore for JsonSettings {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }
}

pub fn load_or_init(path: &Path) -> JsonSettings {
    match fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str::<JsonSettings>(&s) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("CFG: failed to parse {}: {} (reset to empty)", path.display(), e);
                let def = JsonSettings::default();
                let _ = save_atomic(path, &def);
                def
            }
        },
        Err(_) => {
            let def = JsonSettings::default();
            let _ = save_atomic(path, &def);
            def
        }
    }
}

pub fn save_atomic(path: &Path, settings: &JsonSettings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    let data = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    fs::write(&tmp, data.as_bytes())?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_initializes_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let s = load_or_init(&path);
        assert_eq!(s.get("red"), None);
        assert_eq!(s.get_int("red", 256), 256);
        // An empty store file was created for the next boot.
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut s = JsonSettings::default();
        s.set_int("red", 10);
        s.set_int("fps_info", 1);
        save_atomic(&path, &s).unwrap();

        let back = load_or_init(&path);
        assert_eq!(back.get_int("red", 256), 10);
        assert!(back.get_bool("fps_info", false));
    }

    #[test]
    fn corrupt_file_resets_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let s = load_or_init(&path);
        assert_eq!(s.get("red"), None);
    }
}
