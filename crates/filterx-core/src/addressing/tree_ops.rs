use super::filter_id::FilterId;
use crate::errors::{FilterError, Result};
use crate::model::Node;

/// Result of [`remove_by_id`]
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    /// The root was removed: the whole filter is cleared
    Cleared,
    /// A non-root node was removed; carries the updated root
    Remaining(Node),
}

/// True iff `id` is the root sentinel
pub fn is_root(id: &FilterId) -> bool {
    id.is_root()
}

/// Resolve an identifier to the node at that position
///
/// # Errors
/// * `NotFound` - If no node occupies that path
pub fn resolve<'a>(root: &'a Node, id: &FilterId) -> Result<&'a Node> {
    let mut node = root;
    for &index in id.path() {
        node = match index.checked_sub(1) {
            Some(offset) if offset < node.children().len() => &node.children()[offset],
            _ => return Err(FilterError::not_found(id)),
        };
    }
    Ok(node)
}

/// Mutable variant of [`resolve`]
///
/// # Errors
/// * `NotFound` - If no node occupies that path
pub fn resolve_mut<'a>(root: &'a mut Node, id: &FilterId) -> Result<&'a mut Node> {
    let mut node = root;
    for &index in id.path() {
        node = match (node, index.checked_sub(1)) {
            (Node::Chain(chain), Some(offset)) if offset < chain.len() => {
                &mut chain.children[offset]
            }
            _ => return Err(FilterError::not_found(id)),
        };
    }
    Ok(node)
}

/// Remove the node at `id` from its parent
///
/// Removing the root yields [`Removal::Cleared`] regardless of tree shape.
/// A parent left with a single child is not collapsed; see [`strip_by_id`].
///
/// # Errors
/// * `NotFound` - If no node occupies that path
pub fn remove_by_id(mut root: Node, id: &FilterId) -> Result<Removal> {
    let (Some(parent_id), Some(position)) = (id.parent(), id.position()) else {
        return Ok(Removal::Cleared);
    };

    let chain = resolve_mut(&mut root, &parent_id)?
        .as_chain_mut()
        .filter(|chain| (1..=chain.len()).contains(&position))
        .ok_or_else(|| FilterError::not_found(id))?;
    chain.children.remove(position - 1);

    Ok(Removal::Remaining(root))
}

/// Put `new_node` at position `id`, returning the new root
///
/// When `id` is the root the new root is `new_node` itself; otherwise the
/// slot is overwritten and the same root comes back. Callers always rebind
/// to the returned value.
///
/// # Errors
/// * `NotFound` - If no node occupies that path
pub fn replace_by_id(mut root: Node, id: &FilterId, new_node: Node) -> Result<Node> {
    if id.is_root() {
        return Ok(new_node);
    }
    *resolve_mut(&mut root, id)? = new_node;
    Ok(root)
}

/// Collapse one level of grouping: the node at `id` is replaced by its
/// first child
///
/// # Errors
/// * `NotFound` - If `id` or its first child does not exist
pub fn strip_by_id(root: Node, id: &FilterId) -> Result<Node> {
    let first_child = resolve(&root, &id.child(1))?.clone();
    replace_by_id(root, id, first_child)
}

/// Append `new_node` to the children of `parent`
///
/// # Errors
/// * `InvalidOperation` - If `parent` is an expression
pub fn add_child(parent: &mut Node, new_node: Node) -> Result<()> {
    match parent {
        Node::Chain(chain) => {
            chain.push(new_node);
            Ok(())
        }
        Node::Expression(expr) => Err(FilterError::invalid_operation(format!(
            "Cannot add a filter below expression '{}' without an operator",
            expr
        ))),
    }
}

/// All nodes with their identifiers, in pre-order
pub fn walk(root: &Node) -> Vec<(FilterId, &Node)> {
    let mut out = Vec::new();
    let mut stack = vec![(FilterId::root(), root)];
    while let Some((id, node)) = stack.pop() {
        for (offset, child) in node.children().iter().enumerate().rev() {
            stack.push((id.child(offset + 1), child));
        }
        out.push((id, node));
    }
    out
}
