pub mod error;
pub mod flat;
pub mod node;
pub mod operator;
