//! URL query-string grammar for filter trees
//!
//! ```text
//! filter     := "" | or
//! or         := and ("|" and)*
//! and        := item ("&" item)*
//! item       := "!(" [or] ")"
//!             | "(&" [item ("&" item)*] ")"
//!             | "(|" [item ("|" item)*] ")"
//!             | "(" or ")"
//!             | expression
//! expression := column sign value
//! sign       := "=" | "!=" | ">" | "<" | ">=" | "<="
//! value      := text | "(" [text ("|" text)*] ")"
//! ```
//!
//! AND binds tighter than OR. Serialization only emits the marker forms
//! `(&...)` and `(|...)` for groups of zero or one child, where plain
//! parentheses would lose the group.

use super::percent;
use super::FilterCodec;
use crate::errors::{FilterError, Result};
use crate::model::{Expression, FilterValue, Node, Operator, Sign};

/// Signs in matching order: two-character forms first
const SIGNS: [Sign; 6] = [
    Sign::NotEq,
    Sign::Gte,
    Sign::Lte,
    Sign::Eq,
    Sign::Gt,
    Sign::Lt,
];

/// Codec for the query-string form, e.g. `host=web1&(state=1|state=2)`
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryStringCodec;

impl QueryStringCodec {
    pub fn new() -> Self {
        Self
    }
}

impl FilterCodec for QueryStringCodec {
    fn parse(&self, input: &str) -> Result<Node> {
        if input.is_empty() {
            return Ok(Node::empty());
        }

        let mut parser = Parser { input, pos: 0 };
        let node = parser.or()?;
        match parser.peek() {
            None => Ok(node),
            Some(byte) => Err(parser.error(format!("Unexpected '{}'", byte as char))),
        }
    }

    fn serialize(&self, node: &Node) -> String {
        let mut out = String::new();
        match node {
            Node::Chain(chain) if chain.operator == Operator::And && chain.is_empty() => {}
            Node::Chain(chain) if chain.operator != Operator::Not && chain.len() > 1 => {
                join(&mut out, &chain.children, separator(chain.operator));
            }
            _ => write_item(&mut out, node),
        }
        out
    }
}

fn separator(operator: Operator) -> char {
    match operator {
        Operator::Or => '|',
        Operator::And | Operator::Not => '&',
    }
}

fn join(out: &mut String, children: &[Node], separator: char) {
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            out.push(separator);
        }
        write_item(out, child);
    }
}

fn write_item(out: &mut String, node: &Node) {
    match node {
        Node::Expression(expr) => write_expression(out, expr),
        Node::Chain(chain) => {
            match chain.operator {
                Operator::Not => out.push_str("!("),
                operator if chain.len() < 2 => {
                    out.push('(');
                    out.push(separator(operator));
                }
                _ => out.push('('),
            }
            join(out, &chain.children, separator(chain.operator));
            out.push(')');
        }
    }
}

fn write_expression(out: &mut String, expr: &Expression) {
    out.push_str(&percent::encode(&expr.column));
    out.push_str(expr.sign.as_str());
    match &expr.value {
        FilterValue::Single(value) => out.push_str(&percent::encode(value)),
        FilterValue::List(values) => {
            out.push('(');
            for (index, value) in values.iter().enumerate() {
                if index > 0 {
                    out.push('|');
                }
                out.push_str(&percent::encode(value));
            }
            out.push(')');
        }
    }
}

/// Collapse a one-element group to its element
fn group(operator: Operator, mut items: Vec<Node>) -> Node {
    if items.len() == 1 {
        if let Some(item) = items.pop() {
            return item;
        }
    }
    Node::chain(operator, items)
}

/// OR of AND-groups, each collapsed when it holds a single item
fn any_of(terms: Vec<Vec<Node>>) -> Node {
    group(
        Operator::Or,
        terms
            .into_iter()
            .map(|items| group(Operator::And, items))
            .collect(),
    )
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.eat(byte) {
            return Ok(());
        }
        Err(self.error(format!("Expected '{}'", byte as char)))
    }

    fn error(&self, reason: impl Into<String>) -> FilterError {
        FilterError::InvalidEncoding {
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn or(&mut self) -> Result<Node> {
        Ok(any_of(self.or_terms()?))
    }

    /// OR-separated terms, each a list of AND-separated items
    fn or_terms(&mut self) -> Result<Vec<Vec<Node>>> {
        let mut terms = vec![self.items(b'&')?];
        while self.eat(b'|') {
            terms.push(self.items(b'&')?);
        }
        Ok(terms)
    }

    fn items(&mut self, separator: u8) -> Result<Vec<Node>> {
        let mut items = vec![self.item()?];
        while self.eat(separator) {
            items.push(self.item()?);
        }
        Ok(items)
    }

    fn marked_group(&mut self, separator: u8) -> Result<Vec<Node>> {
        if self.eat(b')') {
            return Ok(Vec::new());
        }
        let items = self.items(separator)?;
        self.expect(b')')?;
        Ok(items)
    }

    fn item(&mut self) -> Result<Node> {
        if self.eat(b'!') {
            self.expect(b'(')?;
            if self.eat(b')') {
                return Ok(Node::not(Vec::new()));
            }
            let mut terms = self.or_terms()?;
            self.expect(b')')?;
            let children = if terms.len() == 1 {
                terms.remove(0)
            } else {
                vec![any_of(terms)]
            };
            return Ok(Node::not(children));
        }

        if self.eat(b'(') {
            if self.eat(b'&') {
                return Ok(Node::match_all(self.marked_group(b'&')?));
            }
            if self.eat(b'|') {
                return Ok(Node::match_any(self.marked_group(b'|')?));
            }
            let inner = self.or()?;
            self.expect(b')')?;
            return Ok(inner);
        }

        self.expression()
    }

    fn expression(&mut self) -> Result<Node> {
        let column_start = self.pos;
        let column = self.text(b"=!<>&|()")?;
        if column.is_empty() {
            self.pos = column_start;
            return Err(self.error("Expected a column name"));
        }

        let rest = &self.input[self.pos..];
        let sign = SIGNS
            .into_iter()
            .find(|sign| rest.starts_with(sign.as_str()))
            .ok_or_else(|| self.error("Expected a comparison sign"))?;
        self.pos += sign.as_str().len();

        let value = if self.eat(b'(') {
            let mut values = Vec::new();
            if !self.eat(b')') {
                loop {
                    values.push(self.text(b"|()")?);
                    if !self.eat(b'|') {
                        break;
                    }
                }
                self.expect(b')')?;
            }
            FilterValue::List(values)
        } else {
            FilterValue::Single(self.text(b"&|()")?)
        };

        Ok(Node::Expression(Expression::new(column, sign, value)))
    }

    /// Decoded text up to the next stop byte or the end of input
    fn text(&mut self, stops: &[u8]) -> Result<String> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if stops.contains(&byte) {
                break;
            }
            self.pos += 1;
        }
        percent::decode(&self.input[start..self.pos], start)
    }
}
