use crate::config::LayoutConfig;
use crate::domain::ports::{ConfigProvider, InputSource};
use crate::utils::error::{LayoutError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_positive_number, validate_required_field,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub generate: Option<bool>,
    pub num_apps: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub positions_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LayoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INPUT_CSV})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn layout(&self) -> LayoutConfig {
        self.layout.clone()
    }

    fn input_source(&self) -> Result<InputSource> {
        if self.input.path.is_none() && self.input.generate.unwrap_or(false) {
            return Ok(InputSource::Synthetic {
                num_apps: self.input.num_apps.unwrap_or(200),
                seed: self.layout.seed,
            });
        }
        let path = validate_required_field("input.path", &self.input.path)?;
        Ok(InputSource::Csv(PathBuf::from(path)))
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn positions_file(&self) -> Option<&str> {
        self.output.positions_file.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match self.input_source()? {
            InputSource::Csv(path) => {
                validate_file_extension("input.path", &path.to_string_lossy(), &["csv", "tsv"])?
            }
            InputSource::Synthetic { num_apps, .. } => {
                validate_positive_number("input.num_apps", num_apps, 1)?
            }
        }
        validate_path("output.path", &self.output.path)?;
        if let Some(positions) = &self.output.positions_file {
            validate_path("output.positions_file", positions)?;
        }
        self.layout.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[layout]
water_gap = 3
collision_rate = 0.0

[input]
path = "apps.csv"

[output]
path = "./out/data.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.layout.water_gap, 3);
        assert_eq!(config.layout.connected_gap, 1);
        assert_eq!(config.layout.collision_rate, 0.0);
        assert_eq!(
            config.input_source().unwrap(),
            InputSource::Csv(PathBuf::from("apps.csv"))
        );
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layout_table_is_optional() {
        let toml_content = r#"
[input]
generate = true
num_apps = 50

[output]
path = "./data.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(
            config.input_source().unwrap(),
            InputSource::Synthetic {
                num_apps: 50,
                seed: 42
            }
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CONTINENT_LAYOUT_TEST_INPUT", "inventory.csv");

        let toml_content = r#"
[input]
path = "${CONTINENT_LAYOUT_TEST_INPUT}"

[output]
path = "${CONTINENT_LAYOUT_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.path.as_deref(), Some("inventory.csv"));
        assert_eq!(config.output.path, "${CONTINENT_LAYOUT_UNSET_VAR}");

        std::env::remove_var("CONTINENT_LAYOUT_TEST_INPUT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[layout]
water_gap = 1
connected_gap = 2

[input]
path = "apps.csv"

[output]
path = "./data.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let no_input = TomlConfig::from_toml_str("[input]\n[output]\npath = \"x.json\"\n").unwrap();
        assert!(matches!(
            no_input.validate(),
            Err(LayoutError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[input]
generate = true

[output]
path = "./data.json"
positions_file = "./previous.json"

[monitoring]
enabled = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.monitoring_enabled());
        assert_eq!(config.positions_file(), Some("./previous.json"));
    }
}
