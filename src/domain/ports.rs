use crate::domain::model::{LoadOutcome, RowTable, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    /// Human-readable location of `path`, used in log lines and run results.
    fn location(&self, path: &str) -> String;
}

/// Where rows come from: a local CSV file or a spreadsheet export.
pub trait RowSource: Send + Sync {
    fn fetch(&self) -> impl std::future::Future<Output = Result<RowTable>> + Send;
    fn describe(&self) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RowTable>;
    async fn transform(&self, table: RowTable) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<LoadOutcome>;
}
