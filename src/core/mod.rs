pub mod filter;
pub mod view;

pub use crate::domain::model::{ApplicationStatus, ExperienceApplication, RowAction, StatusPatch};
pub use crate::domain::ports::{ConfigProvider, Notifier, RecordStore};
pub use crate::utils::error::Result;
