pub mod error;
pub mod prune;
pub mod rewrite;
pub mod traverse;
