use crate::core::defaults::{
    self, DEFAULT_CURRENCY, DEFAULT_UNIT, IS_ACTIVE_TOKENS, RECORD_SOURCE, USER_CREATED_TOKENS,
};
use crate::core::frequency::parse_frequency;
use crate::core::identifier::generate_id;
use crate::domain::model::{
    ActivityRecord, ActivityType, AgeRange, DisplayStyle, Financial, Frequency, Quote, RawRow,
    RecordMetadata,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column layout of an activity sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ActivitySchema {
    /// No `type` column; `frequency` is required on every row.
    Legacy,
    /// Experiential, financial and quote activities.
    #[default]
    Typed,
}

impl ActivitySchema {
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            ActivitySchema::Legacy => &["name", "category", "frequency"],
            ActivitySchema::Typed => &["name", "category"],
        }
    }

    pub fn optional_columns(self) -> &'static [&'static str] {
        match self {
            ActivitySchema::Legacy => &[
                "description",
                "icon",
                "age_start",
                "age_end",
                "color",
                "is_active",
                "user_created",
            ],
            ActivitySchema::Typed => &[
                "description",
                "icon",
                "age_start",
                "age_end",
                "color",
                "is_active",
                "user_created",
                "type",
                "frequency",
                "amount",
                "unit",
                "currency",
            ],
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("required field '{column}' is missing or blank")]
    MissingField { column: &'static str },
}

/// Turns one activity row into an [`ActivityRecord`].
#[derive(Debug, Clone)]
pub struct ActivityBuilder {
    schema: ActivitySchema,
    created_at: DateTime<Utc>,
}

impl ActivityBuilder {
    pub fn new(schema: ActivitySchema, created_at: DateTime<Utc>) -> Self {
        Self { schema, created_at }
    }

    pub fn schema(&self) -> ActivitySchema {
        self.schema
    }

    pub fn build(&self, row: &RawRow) -> Result<ActivityRecord, BuildError> {
        let name = required(row, "name")?.to_string();
        let category = required(row, "category")?.to_lowercase();

        let kind = match self.schema {
            ActivitySchema::Legacy => None,
            ActivitySchema::Typed => Some(resolve_type(row, &name)),
        };
        let frequency = self.resolve_frequency(row, kind)?;

        let style = defaults::category_style(&category);
        let display = DisplayStyle {
            icon: row.get("icon").unwrap_or(style.icon).to_string(),
            color: row.get("color").unwrap_or(style.color).to_string(),
            format: kind.map(ActivityType::display_format),
        };

        let description = row.get("description").map(str::to_string);
        let financial = match kind {
            Some(ActivityType::Financial) => resolve_financial(row, &name),
            _ => None,
        };
        let quote = match kind {
            Some(ActivityType::Quote) => description.as_deref().map(split_quote),
            _ => None,
        };

        Ok(ActivityRecord {
            id: generate_id(&name),
            age_range: resolve_age_range(row, &name),
            metadata: RecordMetadata {
                user_created: row
                    .get("user_created")
                    .map_or(true, |value| is_affirmative(value, USER_CREATED_TOKENS)),
                is_active: row
                    .get("is_active")
                    .map_or(true, |value| is_affirmative(value, IS_ACTIVE_TOKENS)),
                created_at: self.created_at,
                source: RECORD_SOURCE.to_string(),
            },
            name,
            kind,
            category,
            frequency,
            display,
            description,
            financial,
            quote,
        })
    }

    fn resolve_frequency(
        &self,
        row: &RawRow,
        kind: Option<ActivityType>,
    ) -> Result<Frequency, BuildError> {
        let cell = row.get("frequency");
        match (self.schema, kind, cell) {
            (ActivitySchema::Legacy, _, None) => Err(BuildError::MissingField {
                column: "frequency",
            }),
            (_, _, Some(text)) => Ok(parse_frequency(text)),
            (_, kind, None) => Ok(kind
                .and_then(defaults::default_frequency)
                .unwrap_or_default()),
        }
    }
}

fn required<'a>(row: &'a RawRow, column: &'static str) -> Result<&'a str, BuildError> {
    row.get(column).ok_or(BuildError::MissingField { column })
}

fn resolve_type(row: &RawRow, name: &str) -> ActivityType {
    match row.get("type") {
        None => ActivityType::Experiential,
        Some(value) => ActivityType::parse(value).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown type '{}' for {}, defaulting to 'experiential'",
                value,
                name
            );
            ActivityType::Experiential
        }),
    }
}

fn resolve_age_range(row: &RawRow, name: &str) -> AgeRange {
    let mut range = AgeRange::default();

    if let Some(value) = row.get("age_start") {
        match parse_age(value) {
            Some(start) => range.start = start,
            None => tracing::warn!(
                "Invalid age_start '{}' for {}, using default {}",
                value,
                name,
                range.start
            ),
        }
    }

    if let Some(value) = row.get("age_end") {
        match parse_age(value) {
            Some(end) => {
                range.set_end(end);
                tracing::debug!("Setting flexible_end=false for {} due to age_end={}", name, end);
            }
            None => tracing::warn!("Invalid age_end '{}' for {}, ignoring", value, name),
        }
    }

    range
}

/// Whole ages, tolerating spreadsheet floats such as `"5.0"`.
pub fn parse_age(value: &str) -> Option<u32> {
    if let Ok(age) = value.parse::<u32>() {
        return Some(age);
    }
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float >= 0.0 && float <= f64::from(u32::MAX) {
        Some(float.trunc() as u32)
    } else {
        None
    }
}

pub fn parse_amount(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

fn resolve_financial(row: &RawRow, name: &str) -> Option<Financial> {
    let Some(raw_amount) = row.get("amount") else {
        tracing::warn!("Financial activity '{}' missing amount data", name);
        return None;
    };

    let Some(amount) = parse_amount(raw_amount) else {
        tracing::warn!(
            "Financial activity '{}' has non-numeric amount '{}', omitting financial data",
            name,
            raw_amount
        );
        return None;
    };

    Some(Financial {
        amount,
        unit: row.get("unit").unwrap_or(DEFAULT_UNIT).to_string(),
        currency: row
            .get("currency")
            .unwrap_or(DEFAULT_CURRENCY)
            .to_uppercase(),
    })
}

/// `"Quote text - Author"` splits on the last separator.
pub fn split_quote(description: &str) -> Quote {
    match description.rsplit_once(" - ") {
        Some((text, author)) => Quote {
            text: text.trim().to_string(),
            author: Some(author.trim().to_string()),
        },
        None => Quote {
            text: description.trim().to_string(),
            author: None,
        },
    }
}

pub fn is_affirmative(value: &str, tokens: &[&str]) -> bool {
    let value = value.trim().to_lowercase();
    tokens.contains(&value.as_str())
}
