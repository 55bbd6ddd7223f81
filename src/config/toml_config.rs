use crate::adapters::sheets::SheetTab;
use crate::core::activity_builder::ActivitySchema;
use crate::domain::model::ActivityType;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"));

pub const ACTIVITY_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/138_Jq0OGLWXbtP3Qz8ZRrt94VO8u75tcrEzJAz-f50Q/edit?usp=sharing";
pub const TRANSLATION_SPREADSHEET_ID: &str = "1V-pQUWowrtvy6VU-a-9cWzI6fuk_V2aTbLW7pIo-iZM";

/// Spreadsheet locations and output defaults. Every field has a built-in
/// default, so the file only needs the values that differ.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub activities: ActivitiesConfig,
    pub translations: TranslationsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitiesConfig {
    pub sheet_url: String,
    /// Relative to the project root.
    pub output_dir: String,
    pub tabs: Vec<SheetTab>,
}

impl Default for ActivitiesConfig {
    fn default() -> Self {
        Self {
            sheet_url: ACTIVITY_SHEET_URL.to_string(),
            output_dir: "src/data/activities".to_string(),
            tabs: vec![
                SheetTab::new("Experiences", Some("0")),
                SheetTab::new("Financial", Some("2109664992")).forcing(ActivityType::Financial),
            ],
        }
    }
}

impl ActivitiesConfig {
    /// The legacy layout only ever lived on the first tab.
    pub fn tabs_for(&self, schema: ActivitySchema) -> Vec<SheetTab> {
        match schema {
            ActivitySchema::Typed => self.tabs.clone(),
            ActivitySchema::Legacy => self
                .tabs
                .first()
                .map(|tab| SheetTab {
                    force_type: None,
                    ..tab.clone()
                })
                .into_iter()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationsConfig {
    pub spreadsheet_id: String,
    pub sheet_gid: String,
    pub output: String,
    pub category_column: String,
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: TRANSLATION_SPREADSHEET_ID.to_string(),
            sheet_gid: "0".to_string(),
            output: "src/data/cards/vegan-phrases.json".to_string(),
            category_column: "Category".to_string(),
        }
    }
}

impl SheetsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHEET_ID})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Uses `path` when given, the built-in defaults otherwise.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}

impl Validate for SheetsConfig {
    fn validate(&self) -> Result<()> {
        let sheet_url = &self.activities.sheet_url;
        if sheet_url.contains("://") {
            validation::validate_url("activities.sheet_url", sheet_url)?;
        } else {
            validation::validate_non_empty_string("activities.sheet_url", sheet_url)?;
        }
        validation::validate_path("activities.output_dir", &self.activities.output_dir)?;
        if self.activities.tabs.is_empty() {
            return Err(EtlError::InvalidConfigValueError {
                field: "activities.tabs".to_string(),
                value: "[]".to_string(),
                reason: "At least one tab is required".to_string(),
            });
        }

        validation::validate_non_empty_string(
            "translations.spreadsheet_id",
            &self.translations.spreadsheet_id,
        )?;
        validation::validate_json_filename("translations.output", &self.translations.output)?;
        Ok(())
    }
}
