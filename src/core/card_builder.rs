use crate::core::identifier::{language_code, slugify_phrase};
use crate::core::validator::ValidationFailure;
use crate::domain::model::{CardFace, CardMetadata, RawRow, TranslationCard};
use chrono::{DateTime, Utc};

pub const LANGUAGE_1_COLUMN: &str = "Language 1";
pub const PHRASE_COLUMN: &str = "English Phrase";
pub const LANGUAGE_2_COLUMN: &str = "Language 2";
pub const TRANSLATION_COLUMN: &str = "Translation";
pub const TAGS_COLUMN: &str = "Tags";
pub const DEFAULT_CATEGORY_COLUMN: &str = "Category";

pub const DEFAULT_CARD_CATEGORY: &str = "restaurant";
const BASE_TAG: &str = "vegan";
const CARD_TYPE: &str = "translation";

/// Header positions, resolved once per sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardColumns {
    language1: usize,
    phrase: usize,
    language2: usize,
    translation: usize,
    category: Option<usize>,
    tags: Option<usize>,
}

impl CardColumns {
    pub fn resolve(
        headers: &[String],
        category_column: Option<&str>,
    ) -> Result<Self, ValidationFailure> {
        let position = |name: &str| headers.iter().position(|header| header == name);

        let required = [
            LANGUAGE_1_COLUMN,
            PHRASE_COLUMN,
            LANGUAGE_2_COLUMN,
            TRANSLATION_COLUMN,
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|name| position(**name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationFailure::missing_columns(missing));
        }

        let columns = Self {
            language1: position(LANGUAGE_1_COLUMN).unwrap_or_default(),
            phrase: position(PHRASE_COLUMN).unwrap_or_default(),
            language2: position(LANGUAGE_2_COLUMN).unwrap_or_default(),
            translation: position(TRANSLATION_COLUMN).unwrap_or_default(),
            category: category_column.and_then(position),
            tags: position(TAGS_COLUMN),
        };

        if let Some(index) = columns.category {
            tracing::debug!("Found category column at index {}", index);
        }
        if let Some(index) = columns.tags {
            tracing::debug!("Found tags column at index {}", index);
        }

        Ok(columns)
    }

    fn max_required(&self) -> usize {
        self.language1
            .max(self.phrase)
            .max(self.language2)
            .max(self.translation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Card(TranslationCard),
    /// Every cell empty; dropped without a message.
    Blank,
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct CardBuilder {
    columns: CardColumns,
    created: String,
}

impl CardBuilder {
    pub fn new(columns: CardColumns, created_at: DateTime<Utc>) -> Self {
        Self {
            columns,
            created: created_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }

    pub fn build(&self, row: &RawRow) -> CardOutcome {
        if row.is_blank() {
            return CardOutcome::Blank;
        }

        if row.len() <= self.columns.max_required() {
            return CardOutcome::Skipped(format!("insufficient columns: {}", row.describe()));
        }

        let cell = |index: usize| row.value_at(index).unwrap_or_default().trim();
        let language1 = cell(self.columns.language1);
        let phrase = cell(self.columns.phrase);
        let language2 = cell(self.columns.language2);
        let translation = cell(self.columns.translation);

        if phrase.is_empty() || translation.is_empty() {
            return CardOutcome::Skipped("missing phrase or translation".to_string());
        }

        let category = self
            .columns
            .category
            .map(cell)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_CARD_CATEGORY.to_string());

        let custom_tags = self.columns.tags.map(cell).unwrap_or_default();
        let tags = build_tags(&category, custom_tags);

        let id = format!(
            "{}-{}-{}-{}-{}",
            BASE_TAG,
            language_code(language1),
            language_code(language2),
            slugify_phrase(phrase),
            row.source_index + 1
        );

        CardOutcome::Card(TranslationCard {
            id,
            kind: CARD_TYPE.to_string(),
            category,
            language1: language1.to_string(),
            language2: language2.to_string(),
            front_content: CardFace {
                title: language1.to_string(),
                content: phrase.to_string(),
                image_url: None,
            },
            back_content: CardFace {
                title: language2.to_string(),
                content: translation.to_string(),
                image_url: None,
            },
            metadata: CardMetadata {
                created: self.created.clone(),
                tags,
            },
        })
    }
}

/// `vegan`, the category, then comma-separated custom tags; first occurrence wins.
fn build_tags(category: &str, custom: &str) -> Vec<String> {
    let candidates = [BASE_TAG.to_string(), category.to_string()]
        .into_iter()
        .chain(
            custom
                .split(',')
                .map(|tag| tag.trim().to_lowercase())
                .filter(|tag| !tag.is_empty()),
        );

    let mut tags: Vec<String> = Vec::new();
    for tag in candidates {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: &[&str] = &[
        "Language 1",
        "English Phrase",
        "Language 2",
        "Translation",
        "Category",
        "Tags",
    ];

    fn headers() -> Vec<String> {
        HEADERS.iter().map(|h| h.to_string()).collect()
    }

    fn row(index: usize, values: &[&str]) -> RawRow {
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        RawRow::from_values(index, &headers(), &values)
    }

    fn builder() -> CardBuilder {
        let columns = CardColumns::resolve(&headers(), Some(DEFAULT_CATEGORY_COLUMN)).unwrap();
        CardBuilder::new(columns, Utc::now())
    }

    fn card(outcome: CardOutcome) -> TranslationCard {
        match outcome {
            CardOutcome::Card(card) => card,
            other => panic!("expected a card, got {:?}", other),
        }
    }

    #[test]
    fn test_build_card() {
        let card = card(builder().build(&row(
            0,
            &["English", "Is this vegan?", "Spanish", "¿Es vegano?", "Shopping", "Market, vegan, Food"],
        )));

        assert_eq!(card.id, "vegan-en-sp-is-this-vegan-1");
        assert_eq!(card.kind, "translation");
        assert_eq!(card.category, "shopping");
        assert_eq!(card.front_content.title, "English");
        assert_eq!(card.front_content.content, "Is this vegan?");
        assert_eq!(card.back_content.title, "Spanish");
        assert_eq!(card.back_content.content, "¿Es vegano?");
        assert_eq!(card.metadata.tags, vec!["vegan", "shopping", "market", "food"]);
        assert!(card.metadata.created.ends_with('Z'));
    }

    #[test]
    fn test_default_category() {
        let card = card(builder().build(&row(1, &["English", "No meat", "German", "Kein Fleisch", "", ""])));
        assert_eq!(card.category, "restaurant");
        assert_eq!(card.metadata.tags, vec!["vegan", "restaurant"]);
        assert_eq!(card.id, "vegan-en-ge-no-meat-2");
    }

    #[test]
    fn test_identical_phrases_get_distinct_ids() {
        let b = builder();
        let first = card(b.build(&row(0, &["English", "Thank you", "French", "Merci"])));
        let second = card(b.build(&row(4, &["English", "Thank you", "French", "Merci beaucoup"])));

        assert_ne!(first.id, second.id);
        assert_eq!(first.id, "vegan-en-fr-thank-you-1");
        assert_eq!(second.id, "vegan-en-fr-thank-you-5");
    }

    #[test]
    fn test_skips() {
        let b = builder();
        assert_eq!(b.build(&row(0, &["", " ", "", ""])), CardOutcome::Blank);
        assert!(matches!(
            b.build(&row(1, &["English", "Hello", "Spanish"])),
            CardOutcome::Skipped(_)
        ));
        assert!(matches!(
            b.build(&row(2, &["English", "Hello", "Spanish", "  "])),
            CardOutcome::Skipped(_)
        ));
    }

    #[test]
    fn test_missing_required_header() {
        let headers: Vec<String> = ["Language 1", "English Phrase", "Translation"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let err = CardColumns::resolve(&headers, None).unwrap_err();
        assert_eq!(err.missing_columns, vec!["Language 2".to_string()]);
    }

    #[test]
    fn test_category_column_is_optional() {
        let columns = CardColumns::resolve(&headers(), Some("Topic")).unwrap();
        let card = card(
            CardBuilder::new(columns, Utc::now())
                .build(&row(0, &["English", "Hi", "Italian", "Ciao", "Shopping", ""])),
        );
        assert_eq!(card.category, "restaurant");
    }
}
