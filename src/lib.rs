pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{ConsoleNotifier, PostgrestStore};
pub use config::AdminSettings;
pub use crate::core::{
    filter::filter_applications, view::ApplicationsView, ApplicationStatus, ExperienceApplication,
};
pub use utils::error::{AdminError, Result};
