use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Output files are always JSON documents.
pub fn validate_json_filename(field_name: &str, filename: &str) -> Result<()> {
    validate_path(field_name, filename)?;

    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str());

    match extension {
        Some("json") => Ok(()),
        _ => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: filename.to_string(),
            reason: "Output file must have a .json extension".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("sheet_url", "https://docs.google.com/spreadsheets/d/abc/edit").is_ok());
        assert!(validate_url("sheet_url", "http://localhost:8080").is_ok());
        assert!(validate_url("sheet_url", "").is_err());
        assert!(validate_url("sheet_url", "invalid-url").is_err());
        assert!(validate_url("sheet_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_json_filename() {
        assert!(validate_json_filename("filename", "imported-activities.json").is_ok());
        assert!(validate_json_filename("filename", "cards/vegan-phrases.json").is_ok());
        assert!(validate_json_filename("filename", "activities.csv").is_err());
        assert!(validate_json_filename("filename", "activities").is_err());
        assert!(validate_json_filename("filename", "").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("spreadsheet_id", "1V-pQ").is_ok());
        assert!(validate_non_empty_string("spreadsheet_id", "   ").is_err());
    }
}
