use filterx_core::addressing::FilterId;
use filterx_core::model::{FilterValue, Node, Operator, Sign};
use proptest::prelude::*;

/// `column = value` expression
#[allow(dead_code)]
pub fn leaf(column: &str, value: &str) -> Node {
    Node::expression(column, Sign::Eq, value)
}

/// Parse an identifier that is known to be well formed
#[allow(dead_code)]
pub fn id(text: &str) -> FilterId {
    text.parse().unwrap()
}

/// Strategy for a single expression with a non-empty column
#[allow(dead_code)]
pub fn arb_expression() -> impl Strategy<Value = Node> {
    let value = prop_oneof![
        ".{0,12}".prop_map(FilterValue::Single),
        prop::collection::vec(".{1,8}", 0..4).prop_map(FilterValue::List),
    ];
    (".{1,12}", prop::sample::select(Sign::ALL.to_vec()), value)
        .prop_map(|(column, sign, value)| Node::expression(column, sign, value))
}

/// Strategy for arbitrary filter trees, including empty groups
#[allow(dead_code)]
pub fn arb_tree() -> impl Strategy<Value = Node> {
    arb_expression().prop_recursive(4, 32, 4, |inner| {
        (
            prop::sample::select(Operator::ALL.to_vec()),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(operator, children)| Node::chain(operator, children))
    })
}
