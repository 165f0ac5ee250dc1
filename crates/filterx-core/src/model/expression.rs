use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FilterError;

/// Comparison sign of an [`Expression`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
}

impl Sign {
    /// All signs, in the order an edit form offers them
    pub const ALL: [Sign; 6] = [
        Sign::Eq,
        Sign::NotEq,
        Sign::Gt,
        Sign::Lt,
        Sign::Gte,
        Sign::Lte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Eq => "=",
            Sign::NotEq => "!=",
            Sign::Gt => ">",
            Sign::Lt => "<",
            Sign::Gte => ">=",
            Sign::Lte => "<=",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sign {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sign::ALL
            .into_iter()
            .find(|sign| sign.as_str() == s)
            .ok_or_else(|| FilterError::invalid_operation(format!("Unknown sign '{}'", s)))
    }
}

/// Right-hand side of a comparison
///
/// A list stands for an OR of equality tests against each item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Read a value back from its edit-form text
    ///
    /// `(a|b)` becomes a list, anything else a single value.
    pub fn from_text(text: &str) -> Self {
        match text
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
        {
            Some("") => FilterValue::List(Vec::new()),
            Some(inner) => FilterValue::List(inner.split('|').map(str::to_string).collect()),
            None => FilterValue::Single(text.to_string()),
        }
    }

    /// Edit-form text, the inverse of [`FilterValue::from_text`]
    pub fn to_text(&self) -> String {
        match self {
            FilterValue::Single(value) => value.clone(),
            FilterValue::List(values) => format!("({})", values.join("|")),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FilterValue::List(_))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Single(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Single(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::List(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        FilterValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// A single comparison: `column sign value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub column: String,
    pub sign: Sign,
    pub value: FilterValue,
}

impl Expression {
    pub fn new(column: impl Into<String>, sign: Sign, value: impl Into<FilterValue>) -> Self {
        Self {
            column: column.into(),
            sign,
            value: value.into(),
        }
    }

    /// Same comparison with a different sign
    pub fn with_sign(self, sign: Sign) -> Self {
        Self { sign, ..self }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.sign, self.value.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_parses_every_display_form() {
        for sign in Sign::ALL {
            assert_eq!(sign.as_str().parse::<Sign>().unwrap(), sign);
        }
    }

    #[test]
    fn test_unknown_sign_is_invalid_operation() {
        let err = "~".parse::<Sign>().unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperation { .. }));
    }

    #[test]
    fn test_value_text_forms() {
        assert_eq!(FilterValue::from_text("web1"), FilterValue::from("web1"));
        assert_eq!(
            FilterValue::from_text("(web1|web2)"),
            FilterValue::from(vec!["web1", "web2"])
        );
        assert_eq!(FilterValue::from_text("()"), FilterValue::List(Vec::new()));
        // Unbalanced text stays a plain value
        assert_eq!(FilterValue::from_text("(web1"), FilterValue::from("(web1"));
    }

    #[test]
    fn test_with_sign_keeps_column_and_value() {
        let expr = Expression::new("state", Sign::Eq, "2").with_sign(Sign::Gte);
        assert_eq!(expr.column, "state");
        assert_eq!(expr.sign, Sign::Gte);
        assert_eq!(expr.value, FilterValue::from("2"));
        assert_eq!(expr.to_string(), "state >= 2");
    }
}
