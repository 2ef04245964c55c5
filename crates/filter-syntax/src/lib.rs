pub mod builder;
pub mod error;
pub mod parser;
