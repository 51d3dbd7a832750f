//! Configuration management for the JSTColorPicker help renderer.
//!
//! Parses `jst-help.toml` with serde and auto-discovers it in the current
//! directory or its parents. Every key is optional: an absent file yields
//! defaults that reproduce the stock rendering pipeline exactly.
//!
//! CLI settings are applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.endpoint`
//! - `render.token`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "jst-help.toml";

/// Markdown rendering endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/markdown/raw";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the project root.
    pub root: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root as written in TOML (relative to the config file).
    root: Option<String>,
    /// Rendering endpoint configuration.
    pub render: RenderConfig,
    /// Page shell configuration.
    pub page: PageConfig,
    /// Help bundle layout configuration.
    pub output: OutputConfig,

    /// Resolved project root, if the file or CLI named one.
    #[serde(skip)]
    pub root_resolved: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering endpoint configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// URL that accepts raw Markdown and answers with an HTML fragment.
    pub endpoint: String,
    /// Bearer token sent as `Authorization`. Empty means anonymous.
    pub token: Option<String>,
    /// Global request timeout in seconds. `None` keeps the client default.
    pub timeout_secs: Option<u64>,
    /// Abort on non-2xx responses instead of writing the body as content.
    pub fail_on_http_error: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            token: None,
            timeout_secs: None,
            fail_on_http_error: false,
        }
    }
}

impl RenderConfig {
    /// Token to send, ignoring empty values left by `${VAR:-}`.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Page shell wrapped around every rendered fragment.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Document `<title>`.
    pub title: String,
    /// Stylesheet href, relative to the written page.
    pub stylesheet: String,
    /// Class attribute of `<body>`.
    pub body_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "JSTColorPicker".to_owned(),
            stylesheet: "../github-markdown.css".to_owned(),
            body_class: "markdown-body".to_owned(),
        }
    }
}

/// Help bundle layout.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding the `<lang>.lproj` folders, relative to the root.
    pub bundle_dir: String,
    /// File name written inside each `<lang>.lproj` folder.
    pub file_name: String,
    /// Language used when the file stem carries no `_<lang>` suffix.
    pub default_lang: String,
    /// Create missing `<lang>.lproj` folders instead of failing.
    pub create_dirs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bundle_dir: "JSTColorPicker/Help".to_owned(),
            file_name: "JSTColorPicker.html".to_owned(),
            default_lang: "en".to_owned(),
            create_dirs: false,
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
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`render.token`").
        field: String,
        /// Error message (e.g., "${`GITHUB_TOKEN`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `jst-help.toml` in the current directory and
    /// its parents, falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing,
    /// expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.root_resolved = Some(root.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.endpoint, "render.endpoint")?;
        require_http_url(&self.render.endpoint, "render.endpoint")?;
        if self.render.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "render.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        require_non_empty(&self.page.title, "page.title")?;
        require_non_empty(&self.output.bundle_dir, "output.bundle_dir")?;
        require_non_empty(&self.output.file_name, "output.file_name")?;
        require_non_empty(&self.output.default_lang, "output.default_lang")?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.render.endpoint = expand::expand_env(&self.render.endpoint, "render.endpoint")?;
        if let Some(ref token) = self.render.token {
            self.render.token = Some(expand::expand_env(token, "render.token")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.root_resolved = self.root.as_deref().map(|root| config_dir.join(root));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.endpoint, "https://api.github.com/markdown/raw");
        assert_eq!(config.render.token(), None);
        assert_eq!(config.render.timeout(), None);
        assert!(!config.render.fail_on_http_error);
        assert_eq!(config.page.title, "JSTColorPicker");
        assert_eq!(config.page.stylesheet, "../github-markdown.css");
        assert_eq!(config.page.body_class, "markdown-body");
        assert_eq!(config.output.bundle_dir, "JSTColorPicker/Help");
        assert_eq!(config.output.file_name, "JSTColorPicker.html");
        assert_eq!(config.output.default_lang, "en");
        assert!(!config.output.create_dirs);
        assert!(config.root_resolved.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.output.default_lang, "en");
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
endpoint = "https://ghe.example.com/api/v3/markdown/raw"
token = "secret"
timeout_secs = 15
fail_on_http_error = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.render.endpoint,
            "https://ghe.example.com/api/v3/markdown/raw"
        );
        assert_eq!(config.render.token(), Some("secret"));
        assert_eq!(config.render.timeout(), Some(Duration::from_secs(15)));
        assert!(config.render.fail_on_http_error);
    }

    #[test]
    fn test_empty_token_is_anonymous() {
        let config: Config = toml::from_str("[render]\ntoken = \"\"\n").unwrap();
        assert_eq!(config.render.token(), None);
    }

    #[test]
    fn test_parse_page_and_output() {
        let toml = r#"
[page]
title = "Picker Help"

[output]
bundle_dir = "App/Help"
file_name = "index.html"
default_lang = "Base"
create_dirs = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.page.title, "Picker Help");
        assert_eq!(config.page.stylesheet, "../github-markdown.css");
        assert_eq!(config.output.bundle_dir, "App/Help");
        assert_eq!(config.output.file_name, "index.html");
        assert_eq!(config.output.default_lang, "Base");
        assert!(config.output.create_dirs);
    }

    #[test]
    fn test_resolve_root_relative_to_config_dir() {
        let mut config: Config = toml::from_str("root = \"..\"\n").unwrap();
        config.resolve_paths(Path::new("/project/bin"));
        assert_eq!(config.root_resolved, Some(PathBuf::from("/project/bin/..")));
    }

    #[test]
    fn test_no_root_stays_unresolved() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert!(config.root_resolved.is_none());
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let config: Config = toml::from_str("[render]\nendpoint = \"ftp://x\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("render.endpoint"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config: Config = toml::from_str("[render]\ntimeout_secs = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_empty_default_lang() {
        let config: Config = toml::from_str("[output]\ndefault_lang = \"\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.default_lang"));
    }

    #[test]
    fn test_apply_cli_settings_root() {
        let mut config: Config = toml::from_str("root = \"docs\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            root: Some(PathBuf::from("/elsewhere")),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.root_resolved, Some(PathBuf::from("/elsewhere")));
    }

    #[test]
    fn test_apply_empty_cli_settings_keeps_root() {
        let mut config: Config = toml::from_str("root = \"docs\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.root_resolved, Some(PathBuf::from("/project/docs")));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/jst-help.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "root = \"..\"\n[output]\ncreate_dirs = true\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.root_resolved, Some(temp_dir.path().join("..")));
        assert_eq!(config.config_path, Some(path));
        assert!(config.output.create_dirs);
    }

    #[test]
    fn test_load_from_file_reports_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render\nendpoint = 1\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
