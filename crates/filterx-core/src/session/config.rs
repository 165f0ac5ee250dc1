use serde::{Deserialize, Serialize};

use crate::errors::{FilterError, Result};

/// Per-deployment settings of an edit session
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
///
/// ```toml
/// preserve_params = ["sort", "limit"]
/// ignore_params = ["_dev"]
/// cancel_label = "Abort"
/// summary_length = 80
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Parameters carried unchanged into every redirect
    pub preserve_params: Vec<String>,
    /// Parameters dropped before the query is read as a filter
    pub ignore_params: Vec<String>,
    /// Value of the `cancel` form field that abandons an edit
    pub cancel_label: String,
    /// Maximum length of a one-line filter summary
    pub summary_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preserve_params: Vec::new(),
            ignore_params: Vec::new(),
            cancel_label: "Cancel".to_string(),
            summary_length: 50,
        }
    }
}

impl SessionConfig {
    /// Load a configuration from TOML text
    ///
    /// # Errors
    /// * `InvalidConfig` - If the text is not valid TOML or names an unknown
    ///   setting
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FilterError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    pub fn with_preserve_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preserve_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignore_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    pub fn with_summary_length(mut self, length: usize) -> Self {
        self.summary_length = length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.cancel_label, "Cancel");
        assert_eq!(config.summary_length, 50);
    }

    #[test]
    fn test_partial_document() {
        let config = SessionConfig::from_toml_str(
            r#"
            preserve_params = ["sort"]
            cancel_label = "Abort"
            "#,
        )
        .unwrap();
        assert_eq!(config.preserve_params, vec!["sort".to_string()]);
        assert!(config.ignore_params.is_empty());
        assert_eq!(config.cancel_label, "Abort");
    }

    #[test]
    fn test_invalid_documents() {
        for text in ["summary_length = \"long\"", "unknown = 1", "preserve_params = ["] {
            let err = SessionConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, FilterError::InvalidConfig { .. }), "{}", text);
        }
    }
}
