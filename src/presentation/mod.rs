//! Rendering of the provider applications screen for a terminal.

pub mod export;
pub mod table;

use serde::{Deserialize, Serialize};

pub const SCREEN_TITLE: &str = "Experience Applications";
pub const SCREEN_DESCRIPTION: &str = "Review and manage experience applications";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub use export::{render_csv, render_json};
pub use table::{render_applications, TableOptions};
