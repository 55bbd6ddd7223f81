//! Static display defaults for activity categories and types.

use crate::domain::model::{ActivityType, Frequency};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

pub const DEFAULT_CATEGORY: &str = "default";

const CATEGORY_STYLES: &[(&str, CategoryStyle)] = &[
    ("celebration", CategoryStyle { color: "#FFD700", icon: "🎉" }),
    ("nature", CategoryStyle { color: "#FF6347", icon: "🌳" }),
    ("routine", CategoryStyle { color: "#4A90E2", icon: "☕" }),
    ("exercise", CategoryStyle { color: "#2ECC71", icon: "💪" }),
    ("social", CategoryStyle { color: "#E74C3C", icon: "👥" }),
    ("learning", CategoryStyle { color: "#9B59B6", icon: "📚" }),
    ("travel", CategoryStyle { color: "#1ABC9C", icon: "✈️" }),
    ("food", CategoryStyle { color: "#F39C12", icon: "🍽️" }),
    ("work", CategoryStyle { color: "#34495E", icon: "💼" }),
    ("hobby", CategoryStyle { color: "#16A085", icon: "🎨" }),
    ("subscriptions", CategoryStyle { color: "#7C3AED", icon: "📊" }),
    ("insurance", CategoryStyle { color: "#2563EB", icon: "🛡️" }),
    ("utilities", CategoryStyle { color: "#059669", icon: "🔌" }),
    ("housing", CategoryStyle { color: "#DC2626", icon: "🏠" }),
    ("transportation", CategoryStyle { color: "#F59E0B", icon: "🚗" }),
    ("financial", CategoryStyle { color: "#10B981", icon: "💰" }),
    ("reflection", CategoryStyle { color: "#8B5CF6", icon: "💭" }),
    (DEFAULT_CATEGORY, FALLBACK_STYLE),
];

const FALLBACK_STYLE: CategoryStyle = CategoryStyle {
    color: "#95A5A6",
    icon: "⭐",
};

fn lookup(category: &str) -> Option<CategoryStyle> {
    CATEGORY_STYLES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, style)| *style)
}

/// Style for a (lower-cased) category, or the `default` entry.
pub fn category_style(category: &str) -> CategoryStyle {
    lookup(category)
        .or_else(|| lookup(DEFAULT_CATEGORY))
        .unwrap_or(FALLBACK_STYLE)
}

pub const DEFAULT_UNIT: &str = "occurrence";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const RECORD_SOURCE: &str = "csv_import";
pub const DATASET_VERSION: &str = "2.0";

/// Quotes without a frequency cell are shown once a year.
pub const QUOTE_FREQUENCY: Frequency = Frequency::per_year(1);

pub const IS_ACTIVE_TOKENS: &[&str] = &["true", "yes", "1", "active", "on"];
pub const USER_CREATED_TOKENS: &[&str] = &["true", "yes", "1", "user", "custom"];

pub fn default_frequency(kind: ActivityType) -> Option<Frequency> {
    match kind {
        ActivityType::Quote => Some(QUOTE_FREQUENCY),
        ActivityType::Experiential | ActivityType::Financial => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_style() {
        let style = category_style("exercise");
        assert_eq!(style.color, "#2ECC71");
        assert_eq!(style.icon, "💪");
        assert_eq!(category_style("housing").icon, "🏠");
    }

    #[test]
    fn test_unknown_category_uses_fallback() {
        assert_eq!(category_style("gardening"), FALLBACK_STYLE);
        assert_eq!(category_style(DEFAULT_CATEGORY), FALLBACK_STYLE);
        assert_eq!(lookup("gardening"), None);
    }

    #[test]
    fn test_default_frequency_only_for_quotes() {
        assert_eq!(default_frequency(ActivityType::Quote), Some(Frequency::per_year(1)));
        assert_eq!(default_frequency(ActivityType::Financial), None);
    }
}
