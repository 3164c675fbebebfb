//! Command implementations for Resetter CLI

pub mod completions;
pub mod list;
pub mod reset;
pub mod show;
pub mod version;
