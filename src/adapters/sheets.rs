use crate::adapters::csv_table::parse_csv;
use crate::core::RowSource;
use crate::domain::model::{ActivityType, RowTable};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

pub const GOOGLE_DOCS_BASE_URL: &str = "https://docs.google.com";

/// One tab of a published spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTab {
    pub name: String,
    /// `None` exports the first tab.
    pub gid: Option<String>,
    /// Overrides the `type` column of every row read from this tab.
    #[serde(default)]
    pub force_type: Option<ActivityType>,
}

impl SheetTab {
    pub fn new(name: &str, gid: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            gid: gid.map(str::to_string),
            force_type: None,
        }
    }

    pub fn forcing(mut self, kind: ActivityType) -> Self {
        self.force_type = Some(kind);
        self
    }
}

/// Accepts either a bare spreadsheet id or a `.../spreadsheets/d/<id>/edit` URL.
pub fn sheet_id_from_url(value: &str) -> Result<String> {
    let value = value.trim();
    let Ok(url) = Url::parse(value) else {
        if value.is_empty() || value.contains('/') {
            return Err(EtlError::InvalidConfigValueError {
                field: "sheet_url".to_string(),
                value: value.to_string(),
                reason: "Expected a spreadsheet id or URL".to_string(),
            });
        }
        return Ok(value.to_string());
    };

    let mut segments = url.path_segments().into_iter().flatten();
    segments
        .by_ref()
        .find(|segment| *segment == "d")
        .and_then(|_| segments.next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| EtlError::InvalidConfigValueError {
            field: "sheet_url".to_string(),
            value: value.to_string(),
            reason: "URL does not contain /d/<spreadsheet id>".to_string(),
        })
}

pub fn export_url(base_url: &str, sheet_id: &str, gid: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    match gid {
        Some(gid) => format!("{base}/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}"),
        None => format!("{base}/spreadsheets/d/{sheet_id}/export?format=csv"),
    }
}

/// Rows from the CSV export of one or more spreadsheet tabs, concatenated in
/// tab order. Any failed tab aborts the fetch.
#[derive(Debug, Clone)]
pub struct SheetExportSource {
    client: Client,
    base_url: String,
    sheet_id: String,
    tabs: Vec<SheetTab>,
}

impl SheetExportSource {
    pub fn new(sheet_id: impl Into<String>, tabs: Vec<SheetTab>) -> Self {
        Self {
            client: Client::new(),
            base_url: GOOGLE_DOCS_BASE_URL.to_string(),
            sheet_id: sheet_id.into(),
            tabs,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_tab(&self, tab: &SheetTab) -> Result<RowTable> {
        let url = export_url(&self.base_url, &self.sheet_id, tab.gid.as_deref());
        tracing::debug!("Requesting tab '{}' from: {}", tab.name, url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("Export response status: {}", response.status());
        let body = response.error_for_status()?.bytes().await?;

        let mut table = parse_csv(&body)?;
        if let Some(kind) = tab.force_type {
            table.force_column("type", kind.as_str());
            tracing::info!(
                "✓ Tab '{}': {} rows (type forced to '{}')",
                tab.name,
                table.len(),
                kind.as_str()
            );
        } else {
            tracing::info!("✓ Tab '{}': {} rows", tab.name, table.len());
        }
        Ok(table)
    }
}

impl RowSource for SheetExportSource {
    async fn fetch(&self) -> Result<RowTable> {
        let mut combined: Option<RowTable> = None;

        for tab in &self.tabs {
            let table = self.fetch_tab(tab).await.map_err(|e| {
                tracing::error!("✗ Error reading tab '{}': {}", tab.name, e);
                e
            })?;
            match combined.as_mut() {
                Some(all) => all.append(table),
                None => combined = Some(table),
            }
        }

        let table = combined.ok_or_else(|| EtlError::SourceError {
            message: "No spreadsheet tabs configured".to_string(),
        })?;
        if self.tabs.len() > 1 {
            tracing::info!(
                "✓ Combined total: {} rows from {} tabs",
                table.len(),
                self.tabs.len()
            );
        }
        Ok(table)
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.tabs.iter().map(|tab| tab.name.as_str()).collect();
        format!("Google Sheet {} (tabs: {})", self.sheet_id, names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_id_from_url() {
        assert_eq!(
            sheet_id_from_url(
                "https://docs.google.com/spreadsheets/d/138_Jq0OGLWXbtP3Qz8ZRrt94VO8u75tcrEzJAz-f50Q/edit?usp=sharing"
            )
            .unwrap(),
            "138_Jq0OGLWXbtP3Qz8ZRrt94VO8u75tcrEzJAz-f50Q"
        );
        assert_eq!(sheet_id_from_url("1V-pQUWowrtvy6VU").unwrap(), "1V-pQUWowrtvy6VU");
        assert!(sheet_id_from_url("https://docs.google.com/spreadsheets/").is_err());
        assert!(sheet_id_from_url("").is_err());
    }

    #[test]
    fn test_export_url() {
        assert_eq!(
            export_url("https://docs.google.com/", "abc", Some("42")),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=42"
        );
        assert_eq!(
            export_url(GOOGLE_DOCS_BASE_URL, "abc", None),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv"
        );
    }

    #[test]
    fn test_tab_deserializes_forced_type() {
        let tab: SheetTab =
            toml::from_str("name = \"Financial\"\ngid = \"2109664992\"\nforce_type = \"financial\"")
                .unwrap();
        assert_eq!(
            tab,
            SheetTab::new("Financial", Some("2109664992")).forcing(ActivityType::Financial)
        );
    }
}
