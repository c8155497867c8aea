//! Machine-readable output shared by all commands.

pub mod json;
