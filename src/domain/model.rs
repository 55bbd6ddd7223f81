use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cell of a source row, keyed by its header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub column: String,
    pub value: String,
}

/// A row from the tabular source. Cells keep the column order of the header;
/// a row shorter than the header simply has fewer cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRow {
    /// 0-based position among the data rows (header excluded).
    pub index: usize,
    /// 0-based record number in the source text, counting empty lines the
    /// CSV reader drops. Same as `index` for tables built in memory.
    pub source_index: usize,
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn from_values(index: usize, headers: &[String], values: &[String]) -> Self {
        let cells = headers
            .iter()
            .zip(values)
            .map(|(column, value)| Cell {
                column: column.clone(),
                value: value.clone(),
            })
            .collect();
        Self {
            index,
            source_index: index,
            cells,
        }
    }

    /// Trimmed cell value, `None` when the column is absent or the cell is blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.column == column)
            .map(|cell| cell.value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn value_at(&self, position: usize) -> Option<&str> {
        self.cells.get(position).map(|cell| cell.value.as_str())
    }

    pub fn set(&mut self, column: &str, value: &str) {
        match self.cells.iter_mut().find(|cell| cell.column == column) {
            Some(cell) => cell.value = value.to_string(),
            None => self.cells.push(Cell {
                column: column.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.value.trim().is_empty())
    }

    /// Line number in the spreadsheet (header is line 1).
    pub fn line_number(&self) -> usize {
        self.index + 2
    }

    pub fn describe(&self) -> String {
        let pairs: Vec<String> = self
            .cells
            .iter()
            .map(|cell| format!("{}={:?}", cell.column, cell.value))
            .collect();
        format!("{{{}}}", pairs.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RowTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_values(&mut self, values: &[String]) {
        let row = RawRow::from_values(self.rows.len(), &self.headers, values);
        self.rows.push(row);
    }

    /// Like [`push_values`](Self::push_values), recording where the row sat in the source.
    pub fn push_values_at(&mut self, source_index: usize, values: &[String]) {
        let mut row = RawRow::from_values(self.rows.len(), &self.headers, values);
        row.source_index = source_index;
        self.rows.push(row);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends another table. Headers are merged in first-seen order and row
    /// indices continue from this table's rows.
    pub fn append(&mut self, other: RowTable) {
        for header in other.headers {
            if !self.has_column(&header) {
                self.headers.push(header);
            }
        }
        let offset = self.rows.len();
        let source_offset = self.rows.last().map_or(0, |row| row.source_index + 1);
        self.rows.extend(other.rows.into_iter().map(|mut row| {
            row.index += offset;
            row.source_index += source_offset;
            row
        }));
    }

    /// Sets `column` to `value` on every row, adding the column if needed.
    pub fn force_column(&mut self, column: &str, value: &str) {
        if !self.has_column(column) {
            self.headers.push(column.to_string());
        }
        for row in &mut self.rows {
            row.set(column, value);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Year,
    Month,
    Week,
    Day,
}

impl Period {
    /// How many of this period fit in a year.
    pub fn per_year(self) -> u32 {
        match self {
            Period::Year => 1,
            Period::Month => 12,
            Period::Week => 52,
            Period::Day => 365,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub times: u32,
    pub period: Period,
}

impl Frequency {
    pub const fn per_year(times: u32) -> Self {
        Self {
            times,
            period: Period::Year,
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::per_year(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub start: u32,
    pub end: Option<u32>,
    pub flexible_end: bool,
}

impl AgeRange {
    pub fn set_end(&mut self, end: u32) {
        self.end = Some(end);
        self.flexible_end = false;
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            flexible_end: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Experiential,
    Financial,
    Quote,
}

impl ActivityType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "experiential" => Some(ActivityType::Experiential),
            "financial" => Some(ActivityType::Financial),
            "quote" => Some(ActivityType::Quote),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Experiential => "experiential",
            ActivityType::Financial => "financial",
            ActivityType::Quote => "quote",
        }
    }

    pub fn display_format(self) -> DisplayFormat {
        match self {
            ActivityType::Experiential => DisplayFormat::Occurrences,
            ActivityType::Financial => DisplayFormat::Currency,
            ActivityType::Quote => DisplayFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    Occurrences,
    Currency,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayStyle {
    pub icon: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DisplayFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub user_created: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financial {
    pub amount: f64,
    pub unit: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ActivityType>,
    pub category: String,
    pub frequency: Frequency,
    pub age_range: AgeRange,
    pub display: DisplayStyle,
    pub metadata: RecordMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial: Option<Financial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
}

impl ActivityRecord {
    /// Untyped records count as experiential.
    pub fn activity_type(&self) -> ActivityType {
        self.kind.unwrap_or(ActivityType::Experiential)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub total_activities: usize,
    pub source: String,
    pub generated_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDataset {
    pub activities: Vec<ActivityRecord>,
    pub metadata: DatasetMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub title: String,
    pub content: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMetadata {
    pub created: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationCard {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub language1: String,
    pub language2: String,
    #[serde(rename = "frontContent")]
    pub front_content: CardFace,
    #[serde(rename = "backContent")]
    pub back_content: CardFace,
    pub metadata: CardMetadata,
}

/// A row that could not be turned into a record. The run continues without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailure {
    pub row: usize,
    pub message: String,
    pub raw: String,
}

/// Output of a pipeline's transform step, ready to be written.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Pretty-printed output document.
    pub json: String,
    pub record_count: usize,
    pub failures: Vec<RowFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Written {
        path: String,
        bytes: usize,
        backup: Option<String>,
    },
    DryRun {
        json: String,
    },
}
