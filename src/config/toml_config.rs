use crate::presentation::OutputFormat;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminTomlConfig {
    pub store: StoreConfig,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub default_format: Option<OutputFormat>,
    pub max_column_width: Option<usize>,
}

impl AdminTomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdminError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdminError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_ANON_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdminError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn default_format(&self) -> Option<OutputFormat> {
        self.display.as_ref().and_then(|d| d.default_format)
    }

    pub fn max_column_width(&self) -> Option<usize> {
        self.display.as_ref().and_then(|d| d.max_column_width)
    }
}

impl Validate for AdminTomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.store.base_url {
            crate::utils::validation::validate_url("store.base_url", base_url)?;
        }

        if let Some(table) = &self.store.table {
            crate::utils::validation::validate_identifier("store.table", table)?;
        }

        if let Some(timeout) = self.store.timeout_seconds {
            crate::utils::validation::validate_positive_number(
                "store.timeout_seconds",
                timeout as usize,
                1,
            )?;
        }

        if let Some(width) = self.max_column_width() {
            crate::utils::validation::validate_positive_number("display.max_column_width", width, 8)?;
        }

        Ok(())
    }
}
