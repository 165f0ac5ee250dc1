use super::FilterRenderer;
use crate::addressing::FilterId;
use crate::model::Node;

/// Plain-text tree: one line per node, indented by depth
///
/// ```text
/// 0 AND
///   1 host = web1
///   2 OR
///     2-1 state = 1
///     2-2 state = 2
///     + <new>
/// ```
#[derive(Debug, Clone)]
pub struct OutlineRenderer {
    indent: String,
    marker: String,
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            marker: "+ <new>".to_string(),
        }
    }
}

impl OutlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Line text marking the insertion point
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    fn line(&self, out: &mut String, depth: usize, text: &str) {
        for _ in 0..depth {
            out.push_str(&self.indent);
        }
        out.push_str(text);
        out.push('\n');
    }

    fn write_node(
        &self,
        out: &mut String,
        node: &Node,
        id: &FilterId,
        insertion_point: Option<&FilterId>,
    ) {
        let depth = id.depth();
        let head = match node {
            Node::Expression(expr) => format!("{} {}", id, expr),
            Node::Chain(chain) => format!("{} {}", id, chain.operator),
        };
        self.line(out, depth, &head);

        for (offset, child) in node.children().iter().enumerate() {
            self.write_node(out, child, &id.child(offset + 1), insertion_point);
        }

        if insertion_point == Some(id) {
            self.line(out, depth + 1, &self.marker);
        }
    }
}

impl FilterRenderer for OutlineRenderer {
    fn render(&self, root: &Node, insertion_point: Option<&FilterId>) -> String {
        let mut out = String::new();
        if root.is_empty() {
            self.line(&mut out, 0, &self.marker);
            return out;
        }
        self.write_node(&mut out, root, &FilterId::root(), insertion_point);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sign;

    fn sample() -> Node {
        Node::match_all(vec![
            Node::expression("host", Sign::Eq, "web1"),
            Node::match_any(vec![
                Node::expression("state", Sign::Eq, "1"),
                Node::expression("state", Sign::Eq, "2"),
            ]),
        ])
    }

    #[test]
    fn test_outline_with_insertion_in_group() {
        let at: FilterId = "2".parse().unwrap();
        let text = OutlineRenderer::new().render(&sample(), Some(&at));
        assert_eq!(
            text,
            "0 AND\n  1 host = web1\n  2 OR\n    2-1 state = 1\n    2-2 state = 2\n    + <new>\n"
        );
    }

    #[test]
    fn test_insertion_after_expression() {
        let at: FilterId = "1".parse().unwrap();
        let text = OutlineRenderer::new()
            .with_indent("..")
            .render(&sample(), Some(&at));
        assert!(text.starts_with("0 AND\n..1 host = web1\n....+ <new>\n..2 OR\n"));
    }

    #[test]
    fn test_empty_filter_is_placeholder() {
        let text = OutlineRenderer::new().render(&Node::empty(), None);
        assert_eq!(text, "+ <new>\n");
    }
}
