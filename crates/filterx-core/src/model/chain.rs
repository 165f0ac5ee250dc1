use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::node::Node;
use crate::errors::FilterError;

/// Boolean combinator of a [`Chain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::And, Operator::Or, Operator::Not];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FilterError::invalid_operation(format!("Unknown operator '{}'", s)))
    }
}

/// A boolean group of filters
///
/// `NOT` negates the conjunction of its children. A chain with no children
/// only exists transiently, or as the empty filter at the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub operator: Operator,
    pub children: Vec<Node>,
}

impl Chain {
    pub fn new(operator: Operator, children: Vec<Node>) -> Self {
        Self { operator, children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child at the end
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == Operator::Not {
            f.write_str("NOT ")?;
        }
        let separator = match self.operator {
            Operator::Or => " OR ",
            Operator::And | Operator::Not => " AND ",
        };
        f.write_str("(")?;
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str(")")
    }
}
