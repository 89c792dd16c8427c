use crate::domain::model::{ExperienceApplication, StatusPatch};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Hosted table of experience records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, newest `created_at` first.
    async fn fetch_all_ordered(&self) -> Result<Vec<ExperienceApplication>>;
    async fn update_status(&self, id: &str, patch: &StatusPatch) -> Result<()>;
}

/// Toast-style user feedback.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn table(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}
