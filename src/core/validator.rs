use crate::core::activity_builder::{parse_amount, ActivitySchema};
use crate::domain::model::{ActivityType, RowTable};
use std::fmt;

/// A required cell that is missing or blank, by spreadsheet line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankField {
    pub row: usize,
    pub column: String,
}

/// The whole dataset is rejected. Nothing gets built or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub missing_columns: Vec<String>,
    pub blank_fields: Vec<BlankField>,
}

impl ValidationFailure {
    pub fn missing_columns(columns: Vec<String>) -> Self {
        Self {
            missing_columns: columns,
            blank_fields: Vec::new(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.missing_columns.is_empty() {
            return write!(
                f,
                "missing required columns: {}",
                self.missing_columns.join(", ")
            );
        }
        let details: Vec<String> = self
            .blank_fields
            .iter()
            .map(|field| format!("empty {} at row {}", field.column, field.row))
            .collect();
        write!(
            f,
            "{} empty required field(s): {}",
            self.blank_fields.len(),
            details.join("; ")
        )
    }
}

impl std::error::Error for ValidationFailure {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub row_count: usize,
    pub available_optional: Vec<String>,
    pub missing_optional: Vec<String>,
    /// Non-fatal findings, already logged.
    pub warnings: Vec<String>,
}

/// Schema gate in front of the record builders.
#[derive(Debug, Clone)]
pub struct RowValidator {
    required: Vec<String>,
    optional: Vec<String>,
    check_financial: bool,
}

impl RowValidator {
    pub fn new(required: &[&str]) -> Self {
        Self {
            required: required.iter().map(|c| c.to_string()).collect(),
            optional: Vec::new(),
            check_financial: false,
        }
    }

    pub fn for_activities(schema: ActivitySchema) -> Self {
        Self {
            optional: schema
                .optional_columns()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            check_financial: schema == ActivitySchema::Typed,
            ..Self::new(schema.required_columns())
        }
    }

    pub fn validate(&self, table: &RowTable) -> Result<ValidationReport, ValidationFailure> {
        tracing::info!("Available columns: {:?}", table.headers);

        let missing_columns: Vec<String> = self
            .required
            .iter()
            .filter(|column| !table.has_column(column))
            .cloned()
            .collect();
        if !missing_columns.is_empty() {
            tracing::error!("Missing required columns: {:?}", missing_columns);
            return Err(ValidationFailure::missing_columns(missing_columns));
        }

        let (available_optional, missing_optional): (Vec<String>, Vec<String>) = self
            .optional
            .iter()
            .cloned()
            .partition(|column| table.has_column(column));
        if !available_optional.is_empty() {
            tracing::info!("Available optional columns: {:?}", available_optional);
        }
        if !missing_optional.is_empty() {
            tracing::info!(
                "Missing optional columns (will use defaults): {:?}",
                missing_optional
            );
        }

        let mut blank_fields = Vec::new();
        let mut warnings = Vec::new();

        for row in &table.rows {
            let mut row_ok = true;
            for column in &self.required {
                if row.get(column).is_none() {
                    tracing::error!("Empty {} at row {}", column, row.line_number());
                    blank_fields.push(BlankField {
                        row: row.line_number(),
                        column: column.clone(),
                    });
                    row_ok = false;
                }
            }

            let is_financial = row
                .get("type")
                .and_then(ActivityType::parse)
                .is_some_and(|kind| kind == ActivityType::Financial);
            if row_ok && self.check_financial && is_financial {
                let name = row.get("name").unwrap_or_default();
                let line = row.line_number();
                let mut warn = |message: String| {
                    tracing::warn!("{}", message);
                    warnings.push(message);
                };

                match row.get("amount") {
                    None => warn(format!(
                        "Financial activity '{}' at row {} missing amount",
                        name, line
                    )),
                    Some(amount) if parse_amount(amount).is_none() => warn(format!(
                        "Invalid amount '{}' for '{}' at row {}",
                        amount, name, line
                    )),
                    Some(_) => {}
                }

                if let Some(currency) = row.get("currency") {
                    if currency.chars().count() != 3 {
                        warn(format!(
                            "Currency '{}' for '{}' should be a 3-letter code (e.g. USD, EUR)",
                            currency.to_uppercase(),
                            name
                        ));
                    }
                }
            }
        }

        if !blank_fields.is_empty() {
            tracing::error!(
                "Validation failed with {} errors. Please fix the issues above.",
                blank_fields.len()
            );
            return Err(ValidationFailure {
                missing_columns: Vec::new(),
                blank_fields,
            });
        }

        tracing::info!("✓ Validation passed for {} rows", table.len());
        Ok(ValidationReport {
            row_count: table.len(),
            available_optional,
            missing_optional,
            warnings,
        })
    }
}
