pub mod error;
pub mod pushdown;
