//! Gateway configuration.
//!
//! The configuration is a JSON document. When no path is given explicitly,
//! the first existing file among [`SEARCH_PATHS`] and the platform config
//! directory is used; if none exists the built-in defaults apply.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use floppa_core::{CollectionName, StoreUrl};

/// Config file locations tried in order: container mount, then local development layouts.
pub const SEARCH_PATHS: &[&str] = &[
    "/app/config.json",
    "config/config.json",
    "backend/config/config.json",
];

/// Endpoints that collide with fixed routes.
const RESERVED_ENDPOINTS: &[&str] = &["api", "assets", "health"];

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("failed to set up image source: {0}")]
    Source(#[from] floppa_core::Error),
}

/// Root configuration of the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the PocketBase instance.
    pub pocketbase_url: Option<StoreUrl>,

    /// Address to listen on.
    pub bind_address: String,

    /// Directory holding the built frontend (`index.html` and `assets/`).
    pub frontend_dir: PathBuf,

    /// Deadline for one image or count request, including all store calls.
    pub request_timeout_secs: u64,

    /// Deadline for the background view counter update.
    pub view_update_timeout_secs: u64,

    /// Served animals, in listing order.
    pub animals: Vec<AnimalConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            pocketbase_url: None,
            bind_address: "0.0.0.0:8080".to_string(),
            frontend_dir: PathBuf::from("./frontend/dist"),
            request_timeout_secs: 10,
            view_update_timeout_secs: 5,
            animals: default_animals(),
        }
    }
}

/// One served animal.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimalConfig {
    /// URL path segment, e.g. `macka`.
    pub endpoint: String,

    /// Display name.
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub source: SourceConfig,

    /// Expose `/{endpoint}/vim/{id}` (PocketBase sources only).
    #[serde(default)]
    pub external_id_lookup: bool,
}

/// Where an animal's images come from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Image files in a local directory.
    Local { directory: PathBuf },

    /// Records of a PocketBase collection.
    PocketBase { collection: CollectionName },
}

fn default_animals() -> Vec<AnimalConfig> {
    let collection = |name: &str| {
        CollectionName::new(name).expect("built-in collection names are valid")
    };

    vec![
        AnimalConfig {
            endpoint: "floppapi".to_string(),
            title: "Floppa Generator 3000".to_string(),
            description: "Klikni a uvidis zazrak!".to_string(),
            source: SourceConfig::Local {
                directory: PathBuf::from("./floppa"),
            },
            external_id_lookup: false,
        },
        AnimalConfig {
            endpoint: "macka".to_string(),
            title: "Macka (z epicke macka databaze)".to_string(),
            description: "Originalna macka z databazy!".to_string(),
            source: SourceConfig::PocketBase {
                collection: collection("macky"),
            },
            external_id_lookup: true,
        },
        AnimalConfig {
            endpoint: "capybara".to_string(),
            title: "Capybara".to_string(),
            description: "OK I pull up".to_string(),
            source: SourceConfig::PocketBase {
                collection: collection("capybaras"),
            },
            external_id_lookup: false,
        },
    ]
}

impl GatewayConfig {
    /// Load the configuration.
    ///
    /// With `explicit`, that file must exist. Otherwise the search locations
    /// are tried in order and defaults are used when none exists. Returns
    /// the path the configuration was read from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        match Self::candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Ok((Self::from_file(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Read a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config file locations tried by [`GatewayConfig::load`].
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = SEARCH_PATHS.iter().map(PathBuf::from).collect();
        if let Some(dirs) = ProjectDirs::from("", "", "floppa") {
            paths.push(dirs.config_dir().join("config.json"));
        }
        paths
    }

    /// Check the configuration for problems, reporting all of them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be positive".to_string());
        }
        if self.view_update_timeout_secs == 0 {
            errors.push("view_update_timeout_secs must be positive".to_string());
        }

        let mut seen = HashSet::new();
        for animal in &self.animals {
            let endpoint = animal.endpoint.as_str();

            if endpoint.is_empty() {
                errors.push("animal endpoint cannot be empty".to_string());
                continue;
            }
            if !endpoint
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                errors.push(format!(
                    "endpoint '{}' may only contain letters, digits, '-' and '_'",
                    endpoint
                ));
            }
            if RESERVED_ENDPOINTS.contains(&endpoint) {
                errors.push(format!("endpoint '{}' is reserved", endpoint));
            }
            if !seen.insert(endpoint) {
                errors.push(format!("endpoint '{}' is defined twice", endpoint));
            }

            match &animal.source {
                SourceConfig::PocketBase { .. } if self.pocketbase_url.is_none() => {
                    errors.push(format!(
                        "endpoint '{}' uses PocketBase but pocketbase_url is not set",
                        endpoint
                    ));
                }
                SourceConfig::Local { .. } if animal.external_id_lookup => {
                    errors.push(format!(
                        "endpoint '{}' enables external_id_lookup on a local source",
                        endpoint
                    ));
                }
                _ => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Request deadline as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Background view update deadline as a [`Duration`].
    pub fn view_update_timeout(&self) -> Duration {
        Duration::from_secs(self.view_update_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_store() -> GatewayConfig {
        GatewayConfig {
            pocketbase_url: Some(StoreUrl::new("http://pocketbase:8090").unwrap()),
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn defaults_list_built_in_animals() {
        let config = GatewayConfig::default();
        let endpoints: Vec<_> = config.animals.iter().map(|a| a.endpoint.as_str()).collect();
        assert_eq!(endpoints, vec!["floppapi", "macka", "capybara"]);
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.view_update_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn defaults_require_pocketbase_url() {
        let err = GatewayConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("pocketbase_url is not set"));
        assert!(with_store().validate().is_ok());
    }

    #[test]
    fn parses_minimal_config() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{"pocketbase_url": "https://pb.example.com"}"#).unwrap();
        assert_eq!(config.pocketbase_url.unwrap().host(), Some("pb.example.com"));
        assert_eq!(config.animals.len(), 3);
    }

    #[test]
    fn parses_custom_animals() {
        let config: GatewayConfig = serde_json::from_str(
            r#"{
                "pocketbase_url": "http://localhost:8090",
                "animals": [
                    {"endpoint": "dog", "title": "Dog", "source": {"type": "local", "directory": "/srv/dogs"}},
                    {"endpoint": "cat", "title": "Cat", "source": {"type": "pocketbase", "collection": "cats"}, "external_id_lookup": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.animals.len(), 2);
        assert!(matches!(config.animals[0].source, SourceConfig::Local { .. }));
        assert!(config.animals[1].external_id_lookup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_collection_name() {
        let result = serde_json::from_str::<GatewayConfig>(
            r#"{"animals": [{"endpoint": "x", "title": "X", "source": {"type": "pocketbase", "collection": "bad/name"}}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn reports_every_problem() {
        let mut config = with_store();
        config.animals[2].endpoint = "macka".to_string();
        config.animals[0].endpoint = "api".to_string();
        config.animals[0].external_id_lookup = true;

        match config.validate().unwrap_err() {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 3, "{errors:?}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unsafe_endpoint() {
        let mut config = with_store();
        config.animals[0].endpoint = "a/b".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.json");
        assert!(matches!(
            GatewayConfig::load(Some(missing.as_path())),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"pocketbase_url": "http://localhost:8090", "bind_address": "127.0.0.1:3000"}"#,
        )
        .unwrap();

        let (config, used) = GatewayConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(used.as_deref(), Some(path.as_path()));
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            GatewayConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
