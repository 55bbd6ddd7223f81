use crate::adapters::csv_table::parse_csv;
use crate::core::RowSource;
use crate::domain::model::RowTable;
use crate::utils::error::{EtlError, Result};
use std::path::PathBuf;

/// Rows from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for CsvFileSource {
    async fn fetch(&self) -> Result<RowTable> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| EtlError::SourceError {
                message: format!("Error reading CSV file {}: {}", self.path.display(), e),
            })?;
        parse_csv(&data)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_local_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,category,frequency").unwrap();
        writeln!(file, "Picnic,nature,2/month").unwrap();

        let table = CsvFileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("frequency"), Some("2/month"));
    }

    #[tokio::test]
    async fn test_missing_file_is_a_source_error() {
        let err = CsvFileSource::new("/definitely/not/here.csv")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, EtlError::SourceError { .. }));
    }
}
