pub mod dialect;
pub mod jdbc;
