use std::fmt;
use std::str::FromStr;

use crate::errors::FilterError;

/// Textual identifier of the root node
pub const ROOT_TOKEN: &str = "0";

/// Position of a node: the 1-based child indices from the root down
///
/// The root is the empty path and is written `"0"`; the root's second
/// child's first child is `"2-1"`.
///
/// Ordering compares path components numerically, so a descendant always
/// sorts after its ancestors and `"10"` sorts after `"9"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilterId(Vec<usize>);

impl FilterId {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// 1-based child indices from the root
    pub fn path(&self) -> &[usize] {
        &self.0
    }

    /// Number of steps below the root
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Identifier of this node's `index`-th child (1-based)
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    /// Identifier of the parent node, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, ancestors)| Self(ancestors.to_vec()))
    }

    /// 1-based position among siblings, `None` for the root
    pub fn position(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str(ROOT_TOKEN);
        }
        for (step, index) in self.0.iter().enumerate() {
            if step > 0 {
                f.write_str("-")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

/// Parse an identifier
///
/// A string outside the id grammar cannot denote any node, so it fails with
/// `NotFound` rather than a syntax error. Components have no leading zeros,
/// so every path has exactly one spelling.
impl FromStr for FilterId {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ROOT_TOKEN {
            return Ok(Self::root());
        }

        s.split('-')
            .map(|step| match step.parse::<usize>() {
                Ok(index)
                    if index > 0
                        && !step.starts_with('0')
                        && step.bytes().all(|b| b.is_ascii_digit()) =>
                {
                    Ok(index)
                }
                _ => Err(FilterError::not_found(s)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
