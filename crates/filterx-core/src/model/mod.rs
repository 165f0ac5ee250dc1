pub mod chain;
pub mod expression;
pub mod node;

pub use chain::{Chain, Operator};
pub use expression::{Expression, FilterValue, Sign};
pub use node::Node;
