use crate::core::Pipeline;
use crate::domain::model::LoadOutcome;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<LoadOutcome> {
        tracing::info!("Starting conversion...");

        // Extract
        let table = self.pipeline.extract().await?;
        tracing::info!("Loaded {} rows", table.len());

        // Transform
        let result = self.pipeline.transform(table).await?;
        tracing::info!("Successfully generated {} records", result.record_count);
        if !result.failures.is_empty() {
            tracing::warn!("{} rows were dropped", result.failures.len());
        }

        // Load
        let outcome = self.pipeline.load(result).await?;
        if let LoadOutcome::Written { path, .. } = &outcome {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validator::ValidationFailure;
    use crate::domain::model::{RowTable, TransformResult};
    use crate::utils::error::EtlError;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct MockPipeline {
        fail_transform: bool,
        loaded: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Pipeline for MockPipeline {
        async fn extract(&self) -> Result<RowTable> {
            let mut table = RowTable::new(vec!["name".to_string()]);
            table.push_values(&["a".to_string()]);
            Ok(table)
        }

        async fn transform(&self, table: RowTable) -> Result<TransformResult> {
            if self.fail_transform {
                return Err(EtlError::SchemaError(ValidationFailure::missing_columns(vec![
                    "category".to_string(),
                ])));
            }
            Ok(TransformResult {
                json: serde_json::json!({ "rows": table.len() }).to_string(),
                record_count: table.len(),
                failures: Vec::new(),
            })
        }

        async fn load(&self, result: TransformResult) -> Result<LoadOutcome> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok(LoadOutcome::DryRun {
                json: result.json,
            })
        }
    }

    #[tokio::test]
    async fn test_engine_runs_all_stages() {
        let engine = EtlEngine::new(MockPipeline {
            fail_transform: false,
            loaded: AtomicBool::new(false),
        });
        let outcome = engine.run().await.unwrap();
        assert_eq!(
            outcome,
            LoadOutcome::DryRun {
                json: r#"{"rows":1}"#.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_engine_stops_before_load_on_schema_error() {
        let engine = EtlEngine::new(MockPipeline {
            fail_transform: true,
            loaded: AtomicBool::new(false),
        });
        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, EtlError::SchemaError(_)));
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }
}
