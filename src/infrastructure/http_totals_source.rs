// HTTP implementation of the totals source
use crate::application::totals_source::{SourceError, TotalsSource};
use crate::domain::meter::MeterId;
use crate::domain::page::PageVariant;
use crate::domain::series::DataSet;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpTotalsSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTotalsSource {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `<base>/<meter>/<resource>`, mirroring the per-meter usage pages upstream
    fn url(&self, meter: MeterId, variant: PageVariant) -> String {
        format!("{}/{}/{}", self.base_url, meter, variant.resource())
    }
}

#[async_trait]
impl TotalsSource for HttpTotalsSource {
    async fn fetch(&self, meter: MeterId, variant: PageVariant) -> Result<DataSet, SourceError> {
        let url = self.url(meter, variant);
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned {}: {}", url, status, body);
            return Err(SourceError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(variant.decode(&body)?)
    }
}
