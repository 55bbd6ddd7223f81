use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED_ID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("static regex"));
static ID_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("static regex"));
static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]").expect("static regex"));
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("static regex"));

const SLUG_MAX_CHARS: usize = 20;

/// Activity id from a display name: `"Morning Coffee!"` → `"morning_coffee"`.
///
/// Two names that differ only in punctuation produce the same id; callers that
/// need uniqueness have to check for collisions themselves.
pub fn generate_id(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stripped = DISALLOWED_ID_CHARS.replace_all(&lowered, "");
    ID_SEPARATORS.replace_all(&stripped, "_").into_owned()
}

/// Short hyphenated slug for a phrase, at most 20 characters, no edge hyphens.
pub fn slugify_phrase(phrase: &str) -> String {
    let lowered = phrase.to_lowercase();
    let hyphenated = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&hyphenated, "-");
    let truncated: String = collapsed.chars().take(SLUG_MAX_CHARS).collect();
    truncated.trim_matches('-').to_string()
}

/// First two characters of a language name, lower-cased.
pub fn language_code(language: &str) -> String {
    language.chars().take(2).collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        assert_eq!(generate_id("Morning Coffee"), "morning_coffee");
        assert_eq!(generate_id("  Visit Mom's House!  "), "visit_moms_house");
        assert_eq!(generate_id("Check-up - Dentist"), "check_up_dentist");
        assert_eq!(generate_id("Read   a\tbook"), "read_a_book");
        assert_eq!(generate_id("Birthday 🎉 party"), "birthday_party");
    }

    #[test]
    fn test_generate_id_is_idempotent() {
        let names = [
            "Morning Coffee",
            "  Visit Mom's House!  ",
            "Check-up - Dentist",
            "-leading and trailing-",
            "Año Nuevo",
            "100% Done",
        ];
        for name in names {
            let once = generate_id(name);
            assert_eq!(generate_id(&once), once, "not idempotent for {:?}", name);
        }
    }

    #[test]
    fn test_slugify_phrase() {
        assert_eq!(slugify_phrase("Is this vegan?"), "is-this-vegan");
        assert_eq!(slugify_phrase("No meat, please!"), "no-meat-please");
        assert_eq!(
            slugify_phrase("Does this contain any milk or eggs?"),
            "does-this-contain-an"
        );
        // truncation can leave a trailing hyphen that has to be trimmed
        assert_eq!(slugify_phrase("I am vegan and I do not eat"), "i-am-vegan-and-i-do");
        assert_eq!(slugify_phrase("  ¿Qué?  "), "qu");
    }

    #[test]
    fn test_language_code() {
        assert_eq!(language_code("English"), "en");
        assert_eq!(language_code("Spanish"), "sp");
        assert_eq!(language_code("Ä"), "ä");
    }
}
