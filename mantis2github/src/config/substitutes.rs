//! Batch user substitution file loading.

use crate::config::ConfigError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Parsed contents of a substitutes file.
///
/// ```toml
/// [substitutes]
/// 12 = "octocat"
/// ```
#[derive(Debug, Deserialize)]
struct SubstitutesFile {
    #[serde(default)]
    substitutes: BTreeMap<String, String>,
}

/// Loads a Mantis user id to GitHub login mapping from a TOML file.
///
/// Blank logins are dropped so that those users stay unsubstituted.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed, or if a key
/// is not a numeric Mantis user id.
pub fn load_substitutes(path: &Path) -> Result<HashMap<u64, String>, ConfigError> {
    debug!(path = %path.display(), "Loading user substitutes");

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let parsed: SubstitutesFile = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut substitutes = HashMap::with_capacity(parsed.substitutes.len());
    for (key, login) in parsed.substitutes {
        let id = key
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidUserId {
                path: path.display().to_string(),
                key: key.clone(),
            })?;
        let login = login.trim();
        if !login.is_empty() {
            substitutes.insert(id, login.to_string());
        }
    }

    info!(count = substitutes.len(), "Loaded user substitutes");
    Ok(substitutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn can_load_substitutes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.toml");
        fs::write(
            &path,
            r#"
[substitutes]
12 = "octocat"
"34" = " hubot "
56 = ""
"#,
        )
        .unwrap();

        let substitutes = load_substitutes(&path).unwrap();

        assert_eq!(substitutes.len(), 2);
        assert_eq!(substitutes[&12], "octocat");
        assert_eq!(substitutes[&34], "hubot");
        assert!(!substitutes.contains_key(&56));
    }

    #[test]
    fn rejects_non_numeric_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.toml");
        fs::write(&path, "[substitutes]\nadministrator = \"octocat\"\n").unwrap();

        let result = load_substitutes(&path);
        assert!(matches!(result, Err(ConfigError::InvalidUserId { key, .. }) if key == "administrator"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = load_substitutes(&temp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn malformed_file_is_toml_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.toml");
        fs::write(&path, "[substitutes\n").unwrap();

        let result = load_substitutes(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }
}
