//! Edit-form field names and their grouping
//!
//! A field is named `<attribute>[_new]_<id>`, e.g. `sign_2-1` or
//! `column_new_0`. Names that do not follow this pattern take no part in
//! reconciliation.

use std::collections::BTreeMap;

use crate::addressing::FilterId;
use crate::errors::{FilterError, Result};

/// Editable attribute named by a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Column,
    Value,
    Sign,
    Operator,
}

impl Attribute {
    const ALL: [Attribute; 4] = [
        Attribute::Column,
        Attribute::Value,
        Attribute::Sign,
        Attribute::Operator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Column => "column",
            Attribute::Value => "value",
            Attribute::Sign => "sign",
            Attribute::Operator => "operator",
        }
    }
}

/// A recognized field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditField<'a> {
    pub attribute: Attribute,
    /// Belongs to the pending new expression
    pub is_new: bool,
    /// Raw identifier text: the node edited, or the insertion point
    pub id: &'a str,
}

/// Parse a field name, `None` if it is not an edit field
pub fn parse_field_name(name: &str) -> Option<EditField<'_>> {
    let (attribute, rest) = Attribute::ALL.into_iter().find_map(|attribute| {
        name.strip_prefix(attribute.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .map(|rest| (attribute, rest))
    })?;

    let (is_new, id) = match rest.strip_prefix("new_") {
        Some(id) => (true, id),
        None => (false, rest),
    };

    let well_formed = !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit() || b == b'-');
    well_formed.then_some(EditField {
        attribute,
        is_new,
        id,
    })
}

/// Submitted attribute values for one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    pub column: Option<String>,
    pub value: Option<String>,
    pub sign: Option<String>,
    pub operator: Option<String>,
}

impl AttributeSet {
    fn set(&mut self, attribute: Attribute, value: String) {
        let slot = match attribute {
            Attribute::Column => &mut self.column,
            Attribute::Value => &mut self.value,
            Attribute::Sign => &mut self.sign,
            Attribute::Operator => &mut self.operator,
        };
        *slot = Some(value);
    }
}

/// A new expression waiting to be attached at `insert_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInsertion {
    pub insert_at: FilterId,
    pub attributes: AttributeSet,
}

/// Submitted fields partitioned by target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBatch {
    /// Attribute updates for existing nodes
    pub updates: BTreeMap<FilterId, AttributeSet>,
    /// At most one new expression per batch
    pub insertion: Option<PendingInsertion>,
}

impl EditBatch {
    /// Group submitted fields by the node they address
    ///
    /// # Errors
    /// * `Conflict` - If `_new` fields name two different insertion points
    /// * `NotFound` - If a field's identifier is not a valid path
    pub fn partition<I, K, V>(edits: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut updates: BTreeMap<FilterId, AttributeSet> = BTreeMap::new();
        let mut insert_at: Option<String> = None;
        let mut pending = AttributeSet::default();

        for (name, value) in edits {
            let Some(field) = parse_field_name(name.as_ref()) else {
                continue;
            };

            if field.is_new {
                match &insert_at {
                    Some(first) if first != field.id => {
                        return Err(FilterError::Conflict {
                            first: first.clone(),
                            second: field.id.to_string(),
                        });
                    }
                    Some(_) => {}
                    None => insert_at = Some(field.id.to_string()),
                }
                pending.set(field.attribute, value.into());
            } else {
                let id: FilterId = field.id.parse()?;
                updates
                    .entry(id)
                    .or_default()
                    .set(field.attribute, value.into());
            }
        }

        let insertion = insert_at
            .map(|raw| -> Result<PendingInsertion> {
                Ok(PendingInsertion {
                    insert_at: raw.parse()?,
                    attributes: pending,
                })
            })
            .transpose()?;

        Ok(Self { updates, insertion })
    }
}
