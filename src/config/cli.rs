use crate::config::toml_config::AdminTomlConfig;
use crate::config::{AdminSettings, SettingsOverrides};
use crate::presentation::OutputFormat;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "experience-admin")]
#[command(about = "Review and manage experience applications")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, global = true, env = "EXPERIENCE_ADMIN_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(
        long,
        global = true,
        env = "EXPERIENCE_ADMIN_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub table: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List experience applications, newest first
    List {
        #[arg(long, short, default_value = "", help = "Search experiences...")]
        search: String,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Approve an application (featured=true, status=approved)
    Approve { id: String },
    /// Reject an application (featured=false, status=rejected)
    Reject { id: String },
    /// Show one application
    Show { id: String },
}

impl CliConfig {
    /// 合併設定檔與命令列參數
    pub fn settings(&self) -> Result<AdminSettings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                Some(AdminTomlConfig::from_file(path)?)
            }
            None => None,
        };

        let overrides = SettingsOverrides {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            table: self.table.clone(),
            timeout_seconds: self.timeout_seconds,
        };

        AdminSettings::resolve(file, overrides)
    }
}
