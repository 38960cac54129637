// Topic distributions: the injected topic model and helpers around it.

pub mod fixed;
pub mod parse;
pub mod traits;
