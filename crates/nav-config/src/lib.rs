//! Configuration management for navigation trees.
//!
//! Parses `navigation.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. YAML (`.yaml`,
//! `.yml`) and JSON (`.json`) files are accepted when given explicitly.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## File Layout
//!
//! ```toml
//! [templates]
//! navigation_dir = "bootstrap"
//!
//! [navigation.admin]
//! label = "Admin"
//! link = "Admin:Dashboard:default"
//!
//! [navigation.admin.items.users]
//! label = "Users"
//! link = "Admin:User:default"
//! icon = "fa-user"
//! ```
//!
//! Item order follows the document.
//!
//! ## Environment Variable Expansion
//!
//! Item `link` values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use nav_tree::{ItemsFactory, NavigationConfig, NodeConfig};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the template layout directory.
    pub navigation_dir: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navigation.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template layout configuration.
    pub templates: TemplatesConfig,
    /// Navigation trees by name.
    pub navigation: NavigationConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Template layout configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory holding one template per render control.
    pub navigation_dir: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            navigation_dir: "default".to_owned(),
        }
    }
}

/// Supported configuration file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// File extension is not one of the supported formats.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`navigation.admin.link`").
        field: String,
        /// Error message from the expander.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navigation.toml` in current directory and parents.
    /// Without any file, an empty configuration is returned.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using empty configuration");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration content in the given format.
    ///
    /// Environment variables are expanded and the result validated.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let mut config: Self = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Create an items factory over the configured navigation trees.
    #[must_use]
    pub fn items_factory(&self) -> ItemsFactory {
        ItemsFactory::new(self.navigation.clone())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(navigation_dir) = &settings.navigation_dir {
            self.templates.navigation_dir.clone_from(navigation_dir);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content, format)?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            trees = config.navigation.len(),
            "Navigation configuration loaded"
        );

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that at least one tree is defined and that every item name is
    /// valid.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.templates.navigation_dir, "templates.navigation_dir")?;

        if self.navigation.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [navigation.<name>] tree must be defined".to_owned(),
            ));
        }

        for (name, tree) in self.navigation.iter() {
            validate_item_names(tree, &format!("navigation.{name}"))?;
        }

        Ok(())
    }

    /// Expand environment variable references in item links.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for (name, tree) in self.navigation.iter_mut() {
            expand_node_links(tree, &format!("navigation.{name}"))?;
        }
        Ok(())
    }
}

fn validate_item_names(node: &NodeConfig, field: &str) -> Result<(), ConfigError> {
    for (name, child) in node.items.iter() {
        let child_field = format!("{field}.items.{name}");
        nav_tree::validate_name(name)
            .map_err(|e| ConfigError::Validation(format!("{child_field}: {e}")))?;
        validate_item_names(child, &child_field)?;
    }
    Ok(())
}

fn expand_node_links(node: &mut NodeConfig, field: &str) -> Result<(), ConfigError> {
    if let Some(link) = &mut node.link {
        *link = expand::expand_env(link, &format!("{field}.link"))?;
    }
    for (name, child) in node.items.iter_mut() {
        expand_node_links(child, &format!("{field}.items.{name}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ADMIN_TOML: &str = r#"
[templates]
navigation_dir = "bootstrap"

[navigation.admin]
label = "Admin"
link = "Admin:Dashboard:default"

[navigation.admin.items.users]
label = "Users"
link = "Admin:User:default"
icon = "fa-user"

[navigation.admin.items.users.items.edit]
label = "Edit"
link = "Admin:User:edit"
linkArgs = { id = 1 }
active = false

[navigation.admin.items.settings]
label = "Settings"
link = "Admin:Settings:default"
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.templates.navigation_dir, "default");
        assert!(config.navigation.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.templates.navigation_dir, "default");
        assert!(config.navigation.is_empty());
    }

    #[test]
    fn test_parse_toml_navigation() {
        let config = Config::parse(ADMIN_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(config.templates.navigation_dir, "bootstrap");

        let mut factory = config.items_factory();
        let root = factory.create("admin").unwrap();
        assert_eq!(root.label(), "Admin");

        let edit = root.resolve("users-edit").unwrap();
        assert_eq!(edit.link(), "Admin:User:edit");
        assert_eq!(edit.link_args().get("id"), Some(&serde_json::json!(1)));
        assert!(!edit.is_active());
    }

    #[test]
    fn test_toml_keeps_document_order() {
        let config = Config::parse(ADMIN_TOML, ConfigFormat::Toml).unwrap();
        let mut factory = config.items_factory();
        let root = factory.create("admin").unwrap();
        let names: Vec<_> = root
            .get_items(false)
            .iter()
            .filter_map(|item| item.name())
            .collect();
        assert_eq!(names, vec!["users", "settings"]);
    }

    #[test]
    fn test_parse_yaml_navigation() {
        let yaml = r"
navigation:
  front:
    label: Front
    items:
      home:
        label: Home
        link: 'Homepage:default'
      blog:
        label: Blog
        link: 'Blog:default'
";
        let config = Config::parse(yaml, ConfigFormat::Yaml).unwrap();
        let mut factory = config.items_factory();
        let root = factory.create("front").unwrap();
        let labels: Vec<_> = root.get_items(false).iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["Home", "Blog"]);
    }

    #[test]
    fn test_parse_json_navigation() {
        let json = r#"{"navigation": {"side": {"label": "Side", "items": {"a": {"label": "A"}}}}}"#;
        let config = Config::parse(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.navigation.names().collect::<Vec<_>>(), vec!["side"]);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("navigation.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("nav.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("nav.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("nav.ini")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("nav")), None);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/navigation.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.toml");
        std::fs::write(&path, ADMIN_TOML).unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.config_path, Some(path));
        assert!(config.navigation.contains("admin"));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.ini");
        std::fs::write(&path, "").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), ADMIN_TOML).unwrap();
        let nested = dir.path().join("app").join("presenters");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Config::discover_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::parse(ADMIN_TOML, ConfigFormat::Toml).unwrap();
        config.apply_cli_settings(&CliSettings {
            navigation_dir: Some("tailwind".to_owned()),
        });
        assert_eq!(config.templates.navigation_dir, "tailwind");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::parse(ADMIN_TOML, ConfigFormat::Toml).unwrap();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.templates.navigation_dir, "bootstrap");
    }

    #[test]
    fn test_expand_env_vars_in_links() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAV_TEST_DOCS_URL", "https://docs.test.com");
        }

        let toml = r#"
[navigation.main.items.docs]
label = "Docs"
link = "${NAV_TEST_DOCS_URL}/guide"
"#;
        let config = Config::parse(toml, ConfigFormat::Toml).unwrap();
        let mut factory = config.items_factory();
        let docs = factory.create("main").unwrap().resolve("docs").unwrap();
        assert_eq!(docs.link(), "https://docs.test.com/guide");
        assert!(docs.is_url());

        unsafe {
            std::env::remove_var("NAV_TEST_DOCS_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_NAV_CONFIG_TEST");
        }

        let toml = r#"
[navigation.main.items.docs]
label = "Docs"
link = "${MISSING_VAR_NAV_CONFIG_TEST}"
"#;
        let err = Config::parse(toml, ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("navigation.main.items.docs.link"));
    }

    #[test]
    fn test_expand_env_vars_in_list_items() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAV_TEST_LIST_URL", "https://list.test.com");
        }

        let json = r#"{"navigation": {"main": {"items": [
            {"label": "Docs", "link": "${NAV_TEST_LIST_URL}/guide"},
            {"label": "Nested", "items": [{"label": "Deep", "link": "${NAV_TEST_LIST_URL}/deep"}]}
        ]}}}"#;
        let config = Config::parse(json, ConfigFormat::Json).unwrap();
        let mut factory = config.items_factory();
        let root = factory.create("main").unwrap();
        assert_eq!(root.resolve("0").unwrap().link(), "https://list.test.com/guide");
        assert_eq!(root.resolve("1-0").unwrap().link(), "https://list.test.com/deep");

        unsafe {
            std::env::remove_var("NAV_TEST_LIST_URL");
        }
    }

    #[test]
    fn test_literal_dollar_in_link_survives() {
        let toml = r#"
[navigation.api.items.orders]
label = "Orders"
link = "https://api.example.com/orders?$top=10"
"#;
        let config = Config::parse(toml, ConfigFormat::Toml).unwrap();
        let mut factory = config.items_factory();
        let orders = factory.create("api").unwrap().resolve("orders").unwrap();
        assert_eq!(orders.link(), "https://api.example.com/orders?$top=10");
    }

    // Validation tests

    /// Assert that parsing fails validation with expected substrings in the message.
    fn assert_validation_error(toml: &str, expected_substrings: &[&str]) {
        let result = Config::parse(toml, ConfigFormat::Toml);
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_requires_a_tree() {
        assert_validation_error("[templates]\nnavigation_dir = \"x\"\n", &["at least one"]);
    }

    #[test]
    fn test_validate_empty_navigation_dir() {
        let toml = r#"
[templates]
navigation_dir = ""

[navigation.main]
label = "Main"
"#;
        assert_validation_error(toml, &["templates.navigation_dir", "empty"]);
    }

    #[test]
    fn test_validate_invalid_item_name() {
        let toml = r#"
[navigation.main.items.users.items."edit user"]
label = "Edit"
"#;
        assert_validation_error(toml, &["navigation.main.items.users.items.edit user"]);
    }

    #[test]
    fn test_malformed_node_is_parse_error() {
        let toml = r#"
[navigation.main]
label = "Main"
items = { home = "Home" }
"#;
        let err = Config::parse(toml, ConfigFormat::Toml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Toml(_)),
            "Expected TOML error, got {err:?}"
        );
        assert!(err.to_string().contains("invalid type"));
    }
}
