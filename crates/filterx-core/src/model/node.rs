use serde::{Deserialize, Serialize};
use std::fmt;

use super::chain::{Chain, Operator};
use super::expression::{Expression, FilterValue, Sign};
use crate::errors::{FilterError, Result};

/// A filter tree element: a single comparison or a boolean group
///
/// Nodes carry no identifier; a node's id is its position in the tree (see
/// [`crate::addressing`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Expression(Expression),
    Chain(Chain),
}

impl Node {
    pub fn expression(column: impl Into<String>, sign: Sign, value: impl Into<FilterValue>) -> Self {
        Node::Expression(Expression::new(column, sign, value))
    }

    pub fn chain(operator: Operator, children: Vec<Node>) -> Self {
        Node::Chain(Chain::new(operator, children))
    }

    /// AND group
    pub fn match_all(children: Vec<Node>) -> Self {
        Node::chain(Operator::And, children)
    }

    /// OR group
    pub fn match_any(children: Vec<Node>) -> Self {
        Node::chain(Operator::Or, children)
    }

    /// NOT group
    pub fn not(children: Vec<Node>) -> Self {
        Node::chain(Operator::Not, children)
    }

    /// The empty filter: an AND group without children
    pub fn empty() -> Self {
        Node::match_all(Vec::new())
    }

    /// True for a chain without children
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Chain(chain) if chain.is_empty())
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Node::Expression(_))
    }

    pub fn is_chain(&self) -> bool {
        matches!(self, Node::Chain(_))
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Node::Expression(expr) => Some(expr),
            Node::Chain(_) => None,
        }
    }

    pub fn as_chain(&self) -> Option<&Chain> {
        match self {
            Node::Chain(chain) => Some(chain),
            Node::Expression(_) => None,
        }
    }

    pub fn as_chain_mut(&mut self) -> Option<&mut Chain> {
        match self {
            Node::Chain(chain) => Some(chain),
            Node::Expression(_) => None,
        }
    }

    /// Children of a chain; an expression has none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Chain(chain) => &chain.children,
            Node::Expression(_) => &[],
        }
    }

    /// Operator of a chain
    pub fn operator(&self) -> Option<Operator> {
        self.as_chain().map(|chain| chain.operator)
    }

    /// Change the operator of a chain, returning the relabelled node
    ///
    /// Children keep their positions, so no identifier below the chain moves.
    ///
    /// # Errors
    /// * `InvalidOperation` - If this node is an expression
    pub fn set_operator(self, operator: Operator) -> Result<Node> {
        let chain = match self {
            Node::Chain(chain) => chain,
            Node::Expression(expr) => {
                return Err(FilterError::invalid_operation(format!(
                    "Cannot set operator {} on expression '{}'",
                    operator, expr
                )))
            }
        };

        Ok(Node::chain(operator, chain.children))
    }
}

impl From<Expression> for Node {
    fn from(expr: Expression) -> Self {
        Node::Expression(expr)
    }
}

impl From<Chain> for Node {
    fn from(chain: Chain) -> Self {
        Node::Chain(chain)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Expression(expr) => fmt::Display::fmt(expr, f),
            Node::Chain(chain) => fmt::Display::fmt(chain, f),
        }
    }
}
