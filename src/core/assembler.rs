use crate::core::activity_builder::{ActivityBuilder, ActivitySchema};
use crate::core::card_builder::{CardBuilder, CardOutcome};
use crate::core::defaults::{self, DATASET_VERSION, RECORD_SOURCE};
use crate::domain::model::{
    ActivityDataset, ActivityRecord, ActivityType, DatasetMetadata, RowFailure, RowTable,
    TranslationCard,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Records built from a table, in source order, plus the rows that were dropped.
#[derive(Debug, Clone)]
pub struct Assembly<T> {
    pub records: Vec<T>,
    pub failures: Vec<RowFailure>,
    /// Rows ignored without a failure (entirely blank rows).
    pub blank_rows: usize,
}

impl<T> Default for Assembly<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
            blank_rows: 0,
        }
    }
}

pub fn assemble_activities(table: &RowTable, builder: &ActivityBuilder) -> Assembly<ActivityRecord> {
    let mut assembly = Assembly::default();

    for row in &table.rows {
        match builder.build(row) {
            Ok(record) => {
                log_progress(&record, builder.schema());
                assembly.records.push(record);
            }
            Err(e) => {
                tracing::error!("✗ Error processing row {}: {}", row.line_number(), e);
                tracing::error!("   Row data: {}", row.describe());
                assembly.failures.push(RowFailure {
                    row: row.line_number(),
                    message: e.to_string(),
                    raw: row.describe(),
                });
            }
        }
    }

    for (id, count) in duplicate_ids(&assembly.records) {
        tracing::warn!("Activity id '{}' is shared by {} records", id, count);
    }

    assembly
}

fn log_progress(record: &ActivityRecord, schema: ActivitySchema) {
    match schema {
        ActivitySchema::Typed => {
            let marker = record
                .activity_type()
                .as_str()
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('?');
            tracing::info!("✓ Processed [{}]: {}", marker, record.name);
        }
        ActivitySchema::Legacy => {
            let end = record
                .age_range
                .end
                .map_or_else(|| "life".to_string(), |end| end.to_string());
            tracing::info!(
                "✓ Processed: {} (ages {}-{}, flexible_end={}, active={}, user_created={})",
                record.name,
                record.age_range.start,
                end,
                record.age_range.flexible_end,
                record.metadata.is_active,
                record.metadata.user_created
            );
        }
    }
}

/// Ids used by more than one record, in first-seen order.
pub fn duplicate_ids(records: &[ActivityRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for record in records {
        let count = counts.entry(record.id.as_str()).or_insert(0);
        if *count == 0 {
            order.push(record.id.as_str());
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|id| {
            let count = counts[id];
            (count > 1).then(|| (id.to_string(), count))
        })
        .collect()
}

pub fn assemble_cards(table: &RowTable, builder: &CardBuilder) -> Assembly<TranslationCard> {
    let mut assembly = Assembly::default();

    for row in &table.rows {
        match builder.build(row) {
            CardOutcome::Card(card) => {
                tracing::debug!("✓ Card {}", card.id);
                assembly.records.push(card);
            }
            CardOutcome::Blank => assembly.blank_rows += 1,
            CardOutcome::Skipped(reason) => {
                tracing::warn!("Skipping row {} due to {}", row.line_number(), reason);
                assembly.failures.push(RowFailure {
                    row: row.line_number(),
                    message: reason,
                    raw: row.describe(),
                });
            }
        }
    }

    assembly
}

pub fn wrap_activities(
    activities: Vec<ActivityRecord>,
    generated_by: &str,
    now: DateTime<Utc>,
) -> ActivityDataset {
    ActivityDataset {
        metadata: DatasetMetadata {
            version: DATASET_VERSION.to_string(),
            created_at: now,
            last_updated: now,
            total_activities: activities.len(),
            source: RECORD_SOURCE.to_string(),
            generated_by: generated_by.to_string(),
        },
        activities,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitySummary {
    pub total: usize,
    pub active: usize,
    pub user_created: usize,
    pub with_age_end: usize,
    pub with_description: usize,
    pub with_custom_icon: usize,
    pub by_type: BTreeMap<&'static str, usize>,
    /// Most frequent first; ties keep first-seen order.
    pub by_category: Vec<(String, usize)>,
    pub financial_totals: BTreeMap<String, f64>,
}

impl ActivitySummary {
    pub fn from_records(records: &[ActivityRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            summary.active += usize::from(record.metadata.is_active);
            summary.user_created += usize::from(record.metadata.user_created);
            summary.with_age_end += usize::from(record.age_range.end.is_some());
            summary.with_description += usize::from(record.description.is_some());
            let default_icon = defaults::category_style(&record.category).icon;
            summary.with_custom_icon += usize::from(record.display.icon != default_icon);

            *summary
                .by_type
                .entry(record.activity_type().as_str())
                .or_insert(0) += 1;

            match summary
                .by_category
                .iter_mut()
                .find(|(category, _)| *category == record.category)
            {
                Some((_, count)) => *count += 1,
                None => summary.by_category.push((record.category.clone(), 1)),
            }

            if let Some(financial) = &record.financial {
                *summary
                    .financial_totals
                    .entry(financial.currency.clone())
                    .or_insert(0.0) += financial.amount;
            }
        }

        summary.by_category.sort_by(|a, b| b.1.cmp(&a.1));
        summary
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

/// Final tally for an activity run.
pub fn log_summary(records: &[ActivityRecord], schema: ActivitySchema) -> ActivitySummary {
    let summary = ActivitySummary::from_records(records);

    if schema == ActivitySchema::Typed {
        tracing::info!("By activity type:");
        for (kind, count) in &summary.by_type {
            tracing::info!("  {}: {} ({:.1}%)", kind, count, summary.percent(*count));
        }

        tracing::info!("By category (top 10):");
        for (category, count) in summary.by_category.iter().take(10) {
            tracing::info!("  {}: {} ({:.1}%)", category, count, summary.percent(*count));
        }

        let financial: Vec<&ActivityRecord> = records
            .iter()
            .filter(|r| r.activity_type() == ActivityType::Financial)
            .collect();
        if !financial.is_empty() {
            tracing::info!("Financial activities: {}", financial.len());
            for (currency, total) in &summary.financial_totals {
                tracing::info!("  Total {}: {:.2}", currency, total);
            }
            for record in financial.iter().take(5) {
                if let Some(f) = &record.financial {
                    tracing::info!("  - {}: {} {} per {}", record.name, f.currency, f.amount, f.unit);
                }
            }
            if financial.len() > 5 {
                tracing::info!("  ... and {} more", financial.len() - 5);
            }
        }

        let quotes: Vec<&ActivityRecord> = records
            .iter()
            .filter(|r| r.activity_type() == ActivityType::Quote)
            .collect();
        if !quotes.is_empty() {
            tracing::info!("Quote activities: {}", quotes.len());
            for record in quotes.iter().take(3) {
                if let Some(quote) = &record.quote {
                    let text: String = quote.text.chars().take(50).collect();
                    let ellipsis = if quote.text.chars().count() > 50 { "..." } else { "" };
                    tracing::info!(
                        "  - \"{}{}\" - {}",
                        text,
                        ellipsis,
                        quote.author.as_deref().unwrap_or("Unknown")
                    );
                }
            }
            if quotes.len() > 3 {
                tracing::info!("  ... and {} more", quotes.len() - 3);
            }
        }
    }

    tracing::info!("Summary:");
    tracing::info!("  - Total activities: {}", summary.total);
    tracing::info!(
        "  - Active activities: {}/{} ({:.1}%)",
        summary.active,
        summary.total,
        summary.percent(summary.active)
    );
    tracing::info!(
        "  - User created: {}/{} ({:.1}%)",
        summary.user_created,
        summary.total,
        summary.percent(summary.user_created)
    );
    tracing::info!(
        "  - With age_end (flexible_end=false): {}/{} ({:.1}%)",
        summary.with_age_end,
        summary.total,
        summary.percent(summary.with_age_end)
    );
    if schema == ActivitySchema::Typed {
        tracing::info!(
            "  - With descriptions: {}/{}, custom icons: {}/{}, categories: {}, types: {}",
            summary.with_description,
            summary.total,
            summary.with_custom_icon,
            summary.total,
            summary.by_category.len(),
            summary.by_type.len()
        );
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RowTable {
        let mut table = RowTable::new(headers.iter().map(|h| h.to_string()).collect());
        for values in rows {
            let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            table.push_values(&values);
        }
        table
    }

    fn activity_table() -> RowTable {
        table(
            &["name", "category", "type", "frequency", "amount", "age_end", "is_active"],
            &[
                &["Birthday", "celebration", "", "yearly", "", "", ""],
                &["", "food", "", "", "", "", ""],
                &["Rent", "housing", "financial", "monthly", "1200", "", "no"],
                &["Phone", "utilities", "financial", "monthly", "45.5", "80", ""],
                &["Spotify", "subscriptions", "financial", "monthly", "11", "", ""],
            ],
        )
    }

    #[test]
    fn test_assemble_preserves_order_and_collects_failures() {
        let builder = ActivityBuilder::new(ActivitySchema::Typed, Utc::now());
        let assembly = assemble_activities(&activity_table(), &builder);

        let names: Vec<&str> = assembly.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Birthday", "Rent", "Phone", "Spotify"]);
        assert_eq!(assembly.failures.len(), 1);
        assert_eq!(assembly.failures[0].row, 3);
        assert!(assembly.failures[0].message.contains("name"));
    }

    #[test]
    fn test_envelope_counts_built_records() {
        let now = Utc::now();
        let builder = ActivityBuilder::new(ActivitySchema::Typed, now);
        let table = activity_table();
        let assembly = assemble_activities(&table, &builder);
        let dataset = wrap_activities(assembly.records, "sheet-etl", now);

        assert_eq!(dataset.metadata.total_activities, table.len() - assembly.failures.len());
        assert_eq!(dataset.metadata.version, "2.0");
        assert_eq!(dataset.metadata.source, "csv_import");
        assert_eq!(dataset.metadata.generated_by, "sheet-etl");
        assert_eq!(dataset.metadata.created_at, dataset.metadata.last_updated);
    }

    #[test]
    fn test_summary_counts() {
        let builder = ActivityBuilder::new(ActivitySchema::Typed, Utc::now());
        let assembly = assemble_activities(&activity_table(), &builder);
        let summary = log_summary(&assembly.records, ActivitySchema::Typed);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.active, 3);
        assert_eq!(summary.with_age_end, 1);
        assert_eq!(summary.by_type.get("financial"), Some(&3));
        assert_eq!(summary.by_type.get("experiential"), Some(&1));
        assert_eq!(summary.financial_totals.get("USD"), Some(&1256.5));
        assert_eq!(summary.by_category.len(), 4);
    }

    #[test]
    fn test_duplicate_ids() {
        let builder = ActivityBuilder::new(ActivitySchema::Typed, Utc::now());
        let t = table(
            &["name", "category"],
            &[&["Yoga!", "exercise"], &["Run", "exercise"], &["yoga", "hobby"]],
        );
        let assembly = assemble_activities(&t, &builder);
        assert_eq!(assembly.records.len(), 3);
        assert_eq!(duplicate_ids(&assembly.records), vec![("yoga".to_string(), 2)]);
    }

    #[test]
    fn test_assemble_cards_skips_blank_and_short_rows() {
        let t = table(
            &["Language 1", "English Phrase", "Language 2", "Translation"],
            &[
                &["English", "Thank you", "German", "Danke"],
                &["", "", "", ""],
                &["English", "Hello"],
                &["English", "", "German", "Hallo"],
                &["English", "Thank you", "German", "Vielen Dank"],
            ],
        );
        let columns = crate::core::card_builder::CardColumns::resolve(&t.headers, None).unwrap();
        let builder = CardBuilder::new(columns, Utc::now());
        let assembly = assemble_cards(&t, &builder);

        let ids: Vec<&str> = assembly.records.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["vegan-en-ge-thank-you-1", "vegan-en-ge-thank-you-5"]);
        assert_eq!(assembly.blank_rows, 1);
        assert_eq!(assembly.failures.len(), 2);
    }
}
