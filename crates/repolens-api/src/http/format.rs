//! The `?format=json` request flag.

use serde::Deserialize;

/// Requested response format. Defaults to rendered HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

/// Query parameters shared by the repo views.
#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_format_defaults_to_html() {
        let query: FormatQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.format, OutputFormat::Html);
    }

    #[test]
    fn format_json_is_parsed() {
        let query: FormatQuery =
            serde_json::from_value(serde_json::json!({"format": "json"})).unwrap();
        assert_eq!(query.format, OutputFormat::Json);
    }
}
