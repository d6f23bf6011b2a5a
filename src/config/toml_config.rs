use crate::config::CatalogConfig;
use crate::domain::model::GMD_NAMESPACE;
use crate::utils::error::{CswError, Result};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub url: String,
    pub metadata_namespace: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CswError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${CSW_URL})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        let mut config = CatalogConfig::new(self.catalog.url.clone()).with_ns_gmd(
            self.catalog
                .metadata_namespace
                .clone()
                .unwrap_or_else(|| GMD_NAMESPACE.to_string()),
        );
        if let Some(timeout) = self.catalog.timeout_seconds {
            config = config.with_timeout_seconds(timeout);
        }
        config
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.catalog_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[catalog]
url = "https://catalog.example.org/csw"
"#,
        )
        .unwrap();

        let catalog = config.catalog_config();
        assert_eq!(catalog.url_csw(), "https://catalog.example.org/csw");
        assert_eq!(catalog.ns_gmd(), GMD_NAMESPACE);
        assert_eq!(catalog.timeout(), Duration::from_secs(20));
        assert!(!config.verbose());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[catalog]
url = "https://catalog.example.org/csw"
metadata_namespace = "http://www.opengis.net/cat/csw/2.0.2"
timeout_seconds = 45

[logging]
verbose = true
json = true
"#,
        )
        .unwrap();

        let catalog = config.catalog_config();
        assert_eq!(catalog.ns_gmd(), "http://www.opengis.net/cat/csw/2.0.2");
        assert_eq!(catalog.timeout_seconds, 45);
        assert!(config.verbose());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CSW_INTERACTOR_TEST_URL", "http://csw.test.local/csw");

        let config = TomlConfig::from_toml_str(
            r#"
[catalog]
url = "${CSW_INTERACTOR_TEST_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog.url, "http://csw.test.local/csw");

        std::env::remove_var("CSW_INTERACTOR_TEST_URL");
    }

    #[test]
    fn test_unknown_env_var_is_kept() {
        let config = TomlConfig::from_toml_str(
            r#"
[catalog]
url = "${CSW_INTERACTOR_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog.url, "${CSW_INTERACTOR_SURELY_UNSET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_catalog_section() {
        let result = TomlConfig::from_toml_str("[logging]\nverbose = true\n");
        assert!(matches!(result, Err(CswError::TomlError(_))));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\nurl = \"http://localhost:8080/csw\"\ntimeout_seconds = 5\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog_config().timeout_seconds, 5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(CswError::IoError(_))));
    }
}
