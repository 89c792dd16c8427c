#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::presentation::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::fmt;
use toml_config::AdminTomlConfig;

pub const DEFAULT_TABLE: &str = "experiences";

/// 命令列或環境變數給的值，優先於設定檔
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Effective configuration after merging the TOML file and overrides.
#[derive(Clone)]
pub struct AdminSettings {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub timeout_seconds: Option<u64>,
    pub default_format: OutputFormat,
    pub max_column_width: Option<usize>,
}

impl AdminSettings {
    pub fn resolve(file: Option<AdminTomlConfig>, overrides: SettingsOverrides) -> Result<Self> {
        if let Some(file) = &file {
            file.validate()?;
        }

        let store = file.as_ref().map(|f| f.store.clone());
        let base_url = overrides
            .base_url
            .or_else(|| store.as_ref().and_then(|s| s.base_url.clone()));
        let api_key = overrides
            .api_key
            .or_else(|| store.as_ref().and_then(|s| s.api_key.clone()));
        let table = overrides
            .table
            .or_else(|| store.as_ref().and_then(|s| s.table.clone()))
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        let timeout_seconds = overrides
            .timeout_seconds
            .or_else(|| store.as_ref().and_then(|s| s.timeout_seconds));

        let settings = Self {
            base_url: validation::validate_required_field("store.base_url", &base_url)?.clone(),
            api_key: validation::validate_required_field("store.api_key", &api_key)?.clone(),
            table,
            timeout_seconds,
            default_format: file
                .as_ref()
                .and_then(|f| f.default_format())
                .unwrap_or_default(),
            max_column_width: file.as_ref().and_then(|f| f.max_column_width()),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl fmt::Debug for AdminSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("table", &self.table)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("default_format", &self.default_format)
            .field("max_column_width", &self.max_column_width)
            .finish()
    }
}

impl Validate for AdminSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("store.base_url", &self.base_url)?;
        validation::validate_non_empty_string("store.api_key", &self.api_key)?;
        validation::validate_identifier("store.table", &self.table)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("store.timeout_seconds", timeout as usize, 1)?;
        }
        Ok(())
    }
}

impl ConfigProvider for AdminSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AdminError;

    fn file_config() -> AdminTomlConfig {
        AdminTomlConfig::from_toml_str(
            r#"
[store]
base_url = "https://file.supabase.co"
api_key = "file-key"
timeout_seconds = 20

[display]
default_format = "csv"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_overrides_win_over_file() {
        let overrides = SettingsOverrides {
            api_key: Some("cli-key".to_string()),
            ..Default::default()
        };

        let settings = AdminSettings::resolve(Some(file_config()), overrides).unwrap();

        assert_eq!(settings.base_url, "https://file.supabase.co");
        assert_eq!(settings.api_key, "cli-key");
        assert_eq!(settings.table, DEFAULT_TABLE);
        assert_eq!(settings.timeout_seconds, Some(20));
        assert_eq!(settings.default_format, OutputFormat::Csv);
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let overrides = SettingsOverrides {
            base_url: Some("https://demo.supabase.co".to_string()),
            ..Default::default()
        };

        let err = AdminSettings::resolve(None, overrides).unwrap_err();
        match err {
            AdminError::MissingConfigError { field } => assert_eq!(field, "store.api_key"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let settings = AdminSettings::resolve(Some(file_config()), SettingsOverrides::default())
            .unwrap();
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("file-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
