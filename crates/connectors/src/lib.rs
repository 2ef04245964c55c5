pub mod adapter;
pub mod capabilities;
pub mod catalog;
pub mod connector;
pub mod error;
pub mod file;
pub mod generic;
pub mod serializer;
pub mod sql;
