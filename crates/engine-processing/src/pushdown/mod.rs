pub mod compiler;
pub mod explain;
