use crate::app::pipelines::{write_document, OutputOptions};
use crate::core::assembler::assemble_cards;
use crate::core::card_builder::{CardBuilder, CardColumns};
use crate::core::{Pipeline, RowSource, RowTable, Storage, TransformResult};
use crate::domain::model::LoadOutcome;
use crate::utils::error::Result;
use chrono::Utc;

/// Phrase sheet → top-level JSON array of translation cards.
pub struct TranslationPipeline<R: RowSource, S: Storage> {
    pub(crate) source: R,
    pub(crate) storage: S,
    pub(crate) category_column: Option<String>,
    pub(crate) output: OutputOptions,
}

impl<R: RowSource, S: Storage> TranslationPipeline<R, S> {
    pub fn new(
        source: R,
        storage: S,
        category_column: Option<String>,
        output: OutputOptions,
    ) -> Self {
        Self {
            source,
            storage,
            category_column,
            output,
        }
    }
}

#[async_trait::async_trait]
impl<R: RowSource, S: Storage> Pipeline for TranslationPipeline<R, S> {
    async fn extract(&self) -> Result<RowTable> {
        tracing::info!("Reading from {}", self.source.describe());
        let table = self.source.fetch().await?;
        tracing::info!("Detected header: {:?}", table.headers);
        Ok(table)
    }

    async fn transform(&self, table: RowTable) -> Result<TransformResult> {
        let columns = CardColumns::resolve(&table.headers, self.category_column.as_deref())?;
        let builder = CardBuilder::new(columns, Utc::now());
        let assembly = assemble_cards(&table, &builder);

        if assembly.blank_rows > 0 {
            tracing::debug!("Ignored {} empty rows", assembly.blank_rows);
        }

        Ok(TransformResult {
            json: serde_json::to_string_pretty(&assembly.records)?,
            record_count: assembly.records.len(),
            failures: assembly.failures,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<LoadOutcome> {
        write_document(&self.storage, &self.output, result.json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MemorySource {
        csv: &'static str,
    }

    impl RowSource for MemorySource {
        async fn fetch(&self) -> Result<RowTable> {
            crate::adapters::csv_table::parse_csv(self.csv.as_bytes())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn exists(&self, path: &str) -> bool {
            self.files.lock().await.contains_key(path)
        }

        fn location(&self, path: &str) -> String {
            format!("memory://{}", path)
        }
    }

    const PHRASES_CSV: &str = "Language 1,English Phrase,Language 2,Translation\n\
        English,Hi,Spanish,Hola\n\
        \n\
        English,Bye,Spanish,Adiós\n";

    fn pipeline(storage: MockStorage) -> TranslationPipeline<MemorySource, MockStorage> {
        TranslationPipeline::new(
            MemorySource { csv: PHRASES_CSV },
            storage,
            None,
            OutputOptions {
                file_name: "cards.json".to_string(),
                dry_run: false,
                backup: true,
            },
        )
    }

    fn card_ids(json: &[u8]) -> Vec<String> {
        let cards: serde_json::Value = serde_json::from_slice(json).unwrap();
        cards
            .as_array()
            .unwrap()
            .iter()
            .map(|card| card["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_card_ids_count_empty_lines() {
        let storage = MockStorage::default();
        let pipeline = pipeline(storage.clone());

        let table = pipeline.extract().await.unwrap();
        let result = pipeline.transform(table).await.unwrap();
        assert_eq!(result.record_count, 2);
        assert!(result.failures.is_empty());

        pipeline.load(result).await.unwrap();
        let written = storage.get_file("cards.json").await.unwrap();
        assert_eq!(
            card_ids(&written),
            vec!["vegan-en-sp-hi-1", "vegan-en-sp-bye-3"]
        );
    }

    #[tokio::test]
    async fn test_existing_cards_are_backed_up() {
        let storage = MockStorage::default();
        storage.write_file("cards.json", b"[]").await.unwrap();

        let pipeline = pipeline(storage.clone());
        let table = pipeline.extract().await.unwrap();
        let result = pipeline.transform(table).await.unwrap();
        let outcome = pipeline.load(result).await.unwrap();

        let LoadOutcome::Written {
            backup: Some(backup),
            ..
        } = outcome
        else {
            panic!("expected a backup");
        };
        assert!(backup.starts_with("cards.backup."));
        assert_eq!(storage.get_file(&backup).await.unwrap(), b"[]");
        assert_eq!(card_ids(&storage.get_file("cards.json").await.unwrap()).len(), 2);
    }
}
