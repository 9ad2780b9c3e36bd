//! Platform-specific paths for presets and configuration.
//!
//! - **User presets**: `~/.config/funky/presets/` (Linux),
//!   `~/Library/Application Support/funky/presets/` (macOS),
//!   `%APPDATA%\funky\presets\` (Windows)
//! - **User config**: the parent of the presets directory

use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_NAME: &str = "funky";

const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Find a preset file by name.
///
/// `name` may be a path to an existing file, or a preset name (with or
/// without `.toml`) looked up in the user presets directory.
///
/// # Example
///
/// ```rust,no_run
/// use funky_config::paths::find_preset;
///
/// if let Some(path) = find_preset("slow_sweep") {
///     println!("Found: {:?}", path);
/// }
/// ```
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{}.toml", name)
    };

    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// Ensure the user presets directory exists.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List all preset files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path (the file stem).
///
/// ```rust
/// use funky_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/classic_funk.toml"));
/// assert_eq!(name, Some("classic_funk".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_dirs_contain_app_name() {
        assert!(user_config_dir().to_string_lossy().contains("funky"));
        assert!(user_presets_dir().ends_with(Path::new("funky").join("presets")));
    }

    #[test]
    fn test_find_preset_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("test.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        let found = find_preset(preset_path.to_str().unwrap());
        assert_eq!(found, Some(preset_path));
    }

    #[test]
    fn test_find_preset_in_dir_adds_extension() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("quack.toml");
        fs::write(&preset_path, "name = \"Quack\"").unwrap();

        assert_eq!(find_preset_in("quack", temp_dir.path()), Some(preset_path.clone()));
        assert_eq!(find_preset_in("quack.toml", temp_dir.path()), Some(preset_path));
        assert_eq!(find_preset_in("missing", temp_dir.path()), None);
    }

    #[test]
    fn test_find_preset_not_found() {
        assert!(find_preset("nonexistent_preset_12345").is_none());
    }

    #[test]
    fn test_list_presets_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let presets = list_presets_in_dir(temp_dir.path());
        let names: Vec<_> = presets.iter().filter_map(|p| preset_name_from_path(p)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_list_presets_nonexistent_dir() {
        assert!(list_presets_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }
}
