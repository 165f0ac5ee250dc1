use std::cmp::Reverse;
use std::time::Instant;

use tracing::debug;

use super::fields::{AttributeSet, EditBatch, PendingInsertion};
use crate::addressing::{self, FilterId};
use crate::errors::{FilterError, Result};
use crate::model::{Expression, FilterValue, Node, Operator, Sign};
use crate::{log_op_end, log_op_error, log_op_start};

/// Apply a batch of submitted edit fields to a filter tree
///
/// Works on a private copy of `root`: on error the caller's tree is
/// untouched and nothing is partially applied.
///
/// Edits are applied in three passes:
/// 1. attribute updates of existing expressions
/// 2. operator changes, deepest node first
/// 3. the pending new expression, if any
///
/// # Errors
/// * `Conflict` - If the fields name more than one insertion point
/// * `NotFound` - If any addressed identifier does not resolve
/// * `InvalidOperation` - If an edit is structurally illegal (unknown sign
///   or operator, empty column, operator on an expression, append below an
///   expression without a combinator)
///
/// # Example
///
/// ```
/// use filterx_core::model::{Node, Sign};
/// use filterx_core::reconcile;
///
/// let root = Node::expression("host", Sign::Eq, "web1");
/// let updated = reconcile::apply(&root, [("sign_0", "!=")]).unwrap();
/// assert_eq!(updated, Node::expression("host", Sign::NotEq, "web1"));
/// ```
pub fn apply<I, K, V>(root: &Node, edits: I) -> Result<Node>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let start = Instant::now();
    log_op_start!("reconcile");

    let result = EditBatch::partition(edits).and_then(|batch| reconcile(root.clone(), batch));

    match &result {
        Ok(_) => log_op_end!("reconcile", started = start),
        Err(err) => log_op_error!("reconcile", err.clone(), started = start),
    }
    result
}

fn reconcile(mut root: Node, batch: EditBatch) -> Result<Node> {
    let mut operator_edits = Vec::new();
    let mut leaf_edits = 0usize;

    for (id, attributes) in batch.updates {
        match attributes.operator {
            Some(operator) => operator_edits.push((id, operator)),
            None => {
                leaf_edits += 1;
                root = update_expression(root, &id, attributes)?;
            }
        }
    }

    debug!(
        leaf_edits,
        operator_edits = operator_edits.len(),
        "leaf updates applied"
    );

    deepest_first(&mut operator_edits);
    for (id, operator) in operator_edits {
        root = update_operator(root, &id, &operator)?;
    }

    if let Some(pending) = batch.insertion {
        root = insert_expression(root, pending)?;
    }

    Ok(root)
}

/// Order operator edits so every node comes before its ancestors
///
/// An id is resolved against the tree as it stands when its edit runs, so
/// descendants go first and never see an ancestor's change.
fn deepest_first(edits: &mut [(FilterId, String)]) {
    edits.sort_by_key(|(id, _)| Reverse(id.clone()));
}

fn non_empty_column(column: String) -> Result<String> {
    if column.trim().is_empty() {
        return Err(FilterError::invalid_operation("Column cannot be empty"));
    }
    Ok(column)
}

fn update_expression(root: Node, id: &FilterId, attributes: AttributeSet) -> Result<Node> {
    let current = match addressing::resolve(&root, id)? {
        Node::Expression(expr) => expr,
        Node::Chain(_) => {
            debug!(filter_id = %id, "ignoring expression fields addressed at a chain");
            return Ok(root);
        }
    };

    let mut updated = current.clone();
    if let Some(column) = attributes.column {
        updated.column = non_empty_column(column)?;
    }
    if let Some(value) = attributes.value {
        updated.value = FilterValue::from_text(&value);
    }
    if let Some(sign) = attributes.sign {
        let sign: Sign = sign.parse()?;
        if sign != updated.sign {
            debug!(filter_id = %id, from = %updated.sign, to = %sign, "sign changed");
            updated = updated.with_sign(sign);
        }
    }

    if &updated == current {
        return Ok(root);
    }
    addressing::replace_by_id(root, id, Node::Expression(updated))
}

fn update_operator(root: Node, id: &FilterId, operator: &str) -> Result<Node> {
    let operator: Operator = operator.parse()?;
    let node = addressing::resolve(&root, id)?;
    if node.operator() == Some(operator) {
        return Ok(root);
    }

    debug!(filter_id = %id, to = %operator, "operator changed");
    let updated = node.clone().set_operator(operator)?;
    addressing::replace_by_id(root, id, updated)
}

fn insert_expression(mut root: Node, pending: PendingInsertion) -> Result<Node> {
    let PendingInsertion {
        insert_at,
        attributes,
    } = pending;

    let column = attributes
        .column
        .ok_or_else(|| FilterError::invalid_operation("New filter needs a column"))
        .and_then(non_empty_column)?;
    let sign = match attributes.sign {
        Some(sign) => sign.parse()?,
        None => Sign::Eq,
    };
    let value = FilterValue::from_text(attributes.value.as_deref().unwrap_or_default());
    let new_node = Node::Expression(Expression::new(column, sign, value));

    let combinator = attributes
        .operator
        .filter(|op| !op.is_empty())
        .map(|op| op.parse::<Operator>())
        .transpose()?;

    debug!(insert_at = %insert_at, combinator = ?combinator, "inserting new filter");

    if insert_at.is_root() && root.is_empty() {
        return Ok(new_node);
    }

    let parent = addressing::resolve(&root, &insert_at)?;
    if let (Some(operator), Node::Expression(_)) = (combinator, parent) {
        let parent = parent.clone();
        let grouped = match operator {
            Operator::And => Node::match_all(vec![parent, new_node]),
            Operator::Or => Node::match_any(vec![parent, new_node]),
            Operator::Not => Node::not(vec![Node::match_all(vec![parent, new_node])]),
        };
        return addressing::replace_by_id(root, &insert_at, grouped);
    }

    let child = match combinator {
        None => new_node,
        Some(operator) => Node::chain(operator, vec![new_node]),
    };
    addressing::add_child(addressing::resolve_mut(&mut root, &insert_at)?, child)?;
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(column: &str, value: &str) -> Node {
        Node::expression(column, Sign::Eq, value)
    }

    #[test]
    fn test_leaf_update_keeps_untouched_attributes() {
        let root = Node::match_all(vec![leaf("host", "web1"), leaf("state", "0")]);
        let updated = apply(&root, [("value_2", "2")]).unwrap();
        assert_eq!(
            updated,
            Node::match_all(vec![leaf("host", "web1"), leaf("state", "2")])
        );
    }

    #[test]
    fn test_value_list_text_becomes_list() {
        let root = leaf("host", "web1");
        let updated = apply(&root, [("value_0", "(web1|web2)")]).unwrap();
        assert_eq!(
            updated,
            Node::expression("host", Sign::Eq, vec!["web1", "web2"])
        );
    }

    #[test]
    fn test_expression_fields_on_chain_are_ignored() {
        let root = Node::match_all(vec![leaf("host", "web1")]);
        let updated = apply(&root, [("column_0", "state")]).unwrap();
        assert_eq!(updated, root);
    }

    #[test]
    fn test_operator_on_expression_is_invalid() {
        let root = Node::match_all(vec![leaf("host", "web1")]);
        let err = apply(&root, [("operator_1", "OR")]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperation { .. }));
    }

    #[test]
    fn test_empty_column_is_invalid() {
        let root = leaf("host", "web1");
        let err = apply(&root, [("column_0", "  ")]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperation { .. }));
    }

    #[test]
    fn test_empty_combinator_means_append() {
        let root = Node::match_any(vec![leaf("host", "web1")]);
        let updated = apply(
            &root,
            [
                ("operator_new_0", ""),
                ("column_new_0", "host"),
                ("value_new_0", "web2"),
            ],
        )
        .unwrap();
        assert_eq!(
            updated,
            Node::match_any(vec![leaf("host", "web1"), leaf("host", "web2")])
        );
    }
}
