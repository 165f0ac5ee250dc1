pub mod apply;
pub mod handle;
pub mod show;

/// Split repeated `NAME=VALUE` arguments into form fields
pub fn parse_fields(fields: &[String]) -> Result<Vec<(String, String)>, Box<dyn std::error::Error>> {
    let mut pairs = Vec::with_capacity(fields.len());
    for field in fields {
        let (name, value) = field
            .split_once('=')
            .ok_or_else(|| format!("Field '{}' must have the form NAME=VALUE", field))?;
        pairs.push((name.to_string(), value.to_string()));
    }
    Ok(pairs)
}

/// Query text without a leading `?`
pub fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
