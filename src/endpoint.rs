
use std::{fs, path::Path};

use crate::error::TunedError;

/// Feature-detection probe. Never an error path: any failure (missing node,
/// permission, weird sysfs state) reads as "not available".
pub fn is_writable(path: &Path) -> bool {
    fs::OpenOptions::new().write(true).open(path).is_ok()
}

/// One stateless write of a text-encoded value. Sysfs convention is a
/// trailing newline. Nothing is cached; the node is the only state.
pub fn write_value(path: &Path, value: &str) -> Result<(), TunedError> {
    if !is_writable(path) {
        return Err(TunedError::Unwritable(path.to_path_buf()));
    }
    fs::write(path, format!("{}\n", value).as_bytes()).map_err(|e| TunedError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn read_value(path: &Path) -> Result<String, TunedError> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|_| TunedError::Unreadable(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_trims_newline() {
        let dir = tempdir().unwrap();
        let node = dir.path().join("kcal_min");
        std::fs::write(&node, "0\n").unwrap();

        write_value(&node, "35").unwrap();
        assert_eq!(std::fs::read_to_string(&node).unwrap(), "35\n");
        assert_eq!(read_value(&node).unwrap(), "35");
    }

    #[test]
    fn missing_node_is_unwritable() {
        let dir = tempdir().unwrap();
        let node = dir.path().join("nope");

        assert!(!is_writable(&node));
        assert!(matches!(
            write_value(&node, "1"),
            Err(TunedError::Unwritable(_))
        ));
        assert!(matches!(read_value(&node), Err(TunedError::Unreadable(_))));
    }
}
