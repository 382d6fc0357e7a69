//! CLI command implementations.

pub(crate) mod intervals;
pub(crate) mod replay;
pub(crate) mod stream;
