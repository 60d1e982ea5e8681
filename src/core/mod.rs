//! Tree model, geometry, and the build/prune passes.

pub mod bounds;
pub mod builder;
pub mod error;
pub mod node;
pub mod prune;
