use crate::core::{ConfigProvider, ExperienceApplication, RecordStore, StatusPatch};
use crate::utils::error::{AdminError, Result};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// Record store backed by a PostgREST endpoint (`<base_url>/rest/v1/<table>`),
/// the REST surface a hosted Supabase project exposes.
pub struct PostgrestStore<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> PostgrestStore<C> {
    pub fn new(config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url().trim_end_matches('/'),
            self.config.table()
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.config.api_key())
            .bearer_auth(self.config.api_key())
    }

    /// 非 2xx 回應轉成 StoreError，保留回應內容方便除錯
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::debug!("Record store error body: {}", message);
        Err(AdminError::StoreError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> RecordStore for PostgrestStore<C> {
    async fn fetch_all_ordered(&self) -> Result<Vec<ExperienceApplication>> {
        let url = self.table_url();
        tracing::debug!("Fetching experience applications from: {}", url);

        let request = self
            .client
            .get(&url)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let response = self.authorize(request).send().await?;
        tracing::debug!("Fetch response status: {}", response.status());

        let response = Self::check_status(response).await?;
        let body = response.bytes().await?;
        let applications: Vec<ExperienceApplication> = serde_json::from_slice(&body)?;
        Ok(applications)
    }

    async fn update_status(&self, id: &str, patch: &StatusPatch) -> Result<()> {
        let url = self.table_url();
        tracing::debug!("Updating experience {} at {}: {:?}", id, url, patch);

        let request = self
            .client
            .patch(&url)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(patch);
        let response = self.authorize(request).send().await?;
        tracing::debug!("Update response status: {}", response.status());

        Self::check_status(response).await?;
        Ok(())
    }
}
