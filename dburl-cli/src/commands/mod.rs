//! CLI command implementations.

pub mod normalize;
pub mod parse;
pub mod schemes;
pub mod short;
pub mod version;
