//! Query-string segments and control parameters

/// Request to render the editor with an insertion point
pub const ADD_FILTER: &str = "addFilter";
/// Request to remove a node
pub const REMOVE_FILTER: &str = "removeFilter";
/// Request to collapse a node into its first child
pub const STRIP_FILTER: &str = "stripFilter";
/// Flag marking the editor as open
pub const MODIFY_FILTER: &str = "modifyFilter";

/// Split a query on `&` outside parentheses
///
/// Filter groups contain `&` themselves; only top-level separators start a
/// new parameter.
pub fn split_top_level(query: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, byte) in query.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'&' if depth == 0 => {
                segments.push(&query[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&query[start..]);
    segments.retain(|segment| !segment.is_empty());
    segments
}

fn segment_name(segment: &str) -> &str {
    segment.split_once('=').map_or(segment, |(name, _)| name)
}

/// Top-level segments of a query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    segments: Vec<String>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            segments: split_top_level(query)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Take out the first segment named `name`, returning its value
    ///
    /// A bare `name` without `=` has the empty value.
    pub fn shift(&mut self, name: &str) -> Option<String> {
        let index = self
            .segments
            .iter()
            .position(|segment| segment_name(segment) == name)?;
        let segment = self.segments.remove(index);
        Some(
            segment
                .split_once('=')
                .map(|(_, value)| value.to_string())
                .unwrap_or_default(),
        )
    }

    /// Take out every segment named `name`, keeping the raw segments
    pub fn shift_all(&mut self, name: &str) -> Vec<String> {
        let (taken, kept): (Vec<String>, Vec<String>) = std::mem::take(&mut self.segments)
            .into_iter()
            .partition(|segment| segment_name(segment) == name);
        self.segments = kept;
        taken
    }

    /// Drop every segment named `name`
    pub fn remove(&mut self, name: &str) {
        self.segments.retain(|segment| segment_name(segment) != name);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.segments.join("&")
    }
}

/// Join non-empty query parts with `&`
pub fn join_query<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|part| !part.as_ref().is_empty())
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_nested_separators() {
        assert_eq!(
            split_top_level("a=1&(b=2&c=3)&modifyFilter=1"),
            vec!["a=1", "(b=2&c=3)", "modifyFilter=1"]
        );
        assert!(split_top_level("").is_empty());
    }

    #[test]
    fn test_shift_takes_first_match() {
        let mut params = QueryParams::parse("?host=web1&removeFilter=2-1&modifyFilter");
        assert_eq!(params.shift(REMOVE_FILTER).as_deref(), Some("2-1"));
        assert_eq!(params.shift(MODIFY_FILTER).as_deref(), Some(""));
        assert_eq!(params.shift(STRIP_FILTER), None);
        assert_eq!(params.to_query_string(), "host=web1");
    }

    #[test]
    fn test_shift_all_and_remove() {
        let mut params = QueryParams::parse("sort=name&a=1&sort=state&_dev=1");
        assert_eq!(params.shift_all("sort"), vec!["sort=name", "sort=state"]);
        params.remove("_dev");
        assert_eq!(params.to_query_string(), "a=1");
    }

    #[test]
    fn test_join_query_skips_empty_parts() {
        assert_eq!(join_query(["", "modifyFilter=1", "", "sort=name"]), "modifyFilter=1&sort=name");
        assert_eq!(join_query(Vec::<String>::new()), "");
    }
}
