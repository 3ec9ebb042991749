use crate::domain::model::{ExtractedData, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Creates or truncates `path` and writes `data` to it.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn cq_endpoint(&self) -> &str;
    fn wikidata_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    /// Issue both SPARQL queries at the same time instead of one after the other.
    fn concurrent_queries(&self) -> bool;
    /// Append `ORDER BY` to both queries so repeated runs produce identical files.
    fn ordered_queries(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractedData>;
    async fn transform(&self, data: ExtractedData) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
