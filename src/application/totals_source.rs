// Port for fetching the pre-computed totals documents
use crate::domain::meter::MeterId;
use crate::domain::page::PageVariant;
use crate::domain::series::DataSet;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Status(reqwest::StatusCode),
    #[error("invalid payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait TotalsSource: Send + Sync {
    /// Fetch and decode the document backing one meter's chart page
    async fn fetch(&self, meter: MeterId, variant: PageVariant) -> Result<DataSet, SourceError>;
}
