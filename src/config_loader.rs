use crate::config::ParamOverrides;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while reading a parameter file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported parameter file extension for {path}: expected .yaml, .yml or .json")]
    UnsupportedFormat { path: PathBuf },
}

/// Load parameter overrides from a YAML or JSON file, chosen by extension
pub fn load_overrides(path: &Path) -> Result<ParamOverrides, ConfigError> {
    info!("Loading parameters from: {:?}", path);

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let is_json = match extension.as_deref() {
        Some("yaml") | Some("yml") => false,
        Some("json") => true,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // An empty YAML document means "no overrides"
    if !is_json && content.trim().is_empty() {
        return Ok(ParamOverrides::default());
    }

    if is_json {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Scene, StorageMode};
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml_overrides() {
        let file = write_temp(
            ".yaml",
            r#"
scene: education
count_cmp: 6
mng_ip_range: |
  192.168.1.1-192.168.1.40
  192.168.2.0/28
"#,
        );
        let overrides = load_overrides(file.path()).unwrap();
        assert_eq!(overrides.scene, Some(Scene::Education));
        assert_eq!(overrides.count_cmp, Some(6));
        assert!(overrides.mng_ip_range.unwrap().contains("192.168.2.0/28"));
        assert_eq!(overrides.count_mng, None);
    }

    #[test]
    fn test_load_json_overrides() {
        let file = write_temp(".json", r#"{"storage_mode": "separate", "count_storage": 4}"#);
        let overrides = load_overrides(file.path()).unwrap();
        assert_eq!(overrides.storage_mode, Some(StorageMode::Separate));
        assert_eq!(overrides.count_storage, Some(4));
    }

    #[test]
    fn test_empty_yaml_is_no_overrides() {
        let file = write_temp(".yml", "\n");
        assert_eq!(load_overrides(file.path()).unwrap(), ParamOverrides::default());
    }

    #[test]
    fn test_errors() {
        let file = write_temp(".yaml", "scene: nowhere\n");
        assert!(matches!(load_overrides(file.path()), Err(ConfigError::Yaml { .. })));

        let file = write_temp(".toml", "scene = 'standard'\n");
        assert!(matches!(
            load_overrides(file.path()),
            Err(ConfigError::UnsupportedFormat { .. })
        ));

        let missing = Path::new("/nonexistent/params.yaml");
        assert!(matches!(load_overrides(missing), Err(ConfigError::Io { .. })));
    }
}
