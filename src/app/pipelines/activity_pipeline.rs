use crate::app::pipelines::{write_document, OutputOptions};
use crate::core::activity_builder::{ActivityBuilder, ActivitySchema};
use crate::core::assembler::{assemble_activities, log_summary, wrap_activities};
use crate::core::validator::RowValidator;
use crate::core::{Pipeline, RowSource, RowTable, Storage, TransformResult};
use crate::domain::model::LoadOutcome;
use crate::utils::error::Result;
use chrono::Utc;

/// Activity sheet → `{"activities": [...], "metadata": {...}}`.
pub struct ActivityPipeline<R: RowSource, S: Storage> {
    pub(crate) source: R,
    pub(crate) storage: S,
    pub(crate) schema: ActivitySchema,
    pub(crate) generated_by: String,
    pub(crate) output: OutputOptions,
}

impl<R: RowSource, S: Storage> ActivityPipeline<R, S> {
    pub fn new(
        source: R,
        storage: S,
        schema: ActivitySchema,
        generated_by: impl Into<String>,
        output: OutputOptions,
    ) -> Self {
        Self {
            source,
            storage,
            schema,
            generated_by: generated_by.into(),
            output,
        }
    }
}

#[async_trait::async_trait]
impl<R: RowSource, S: Storage> Pipeline for ActivityPipeline<R, S> {
    async fn extract(&self) -> Result<RowTable> {
        tracing::info!("Reading from {}", self.source.describe());
        self.source.fetch().await
    }

    async fn transform(&self, table: RowTable) -> Result<TransformResult> {
        let report = RowValidator::for_activities(self.schema).validate(&table)?;
        if !report.warnings.is_empty() {
            tracing::debug!("{} validation warnings", report.warnings.len());
        }

        let now = Utc::now();
        let builder = ActivityBuilder::new(self.schema, now);
        let assembly = assemble_activities(&table, &builder);
        log_summary(&assembly.records, self.schema);

        let record_count = assembly.records.len();
        let dataset = wrap_activities(assembly.records, &self.generated_by, now);

        Ok(TransformResult {
            json: serde_json::to_string_pretty(&dataset)?,
            record_count,
            failures: assembly.failures,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<LoadOutcome> {
        write_document(&self.storage, &self.output, result.json).await
    }
}
