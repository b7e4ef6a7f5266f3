//! Command implementations

pub mod build;
pub mod clean;
pub mod layouts;
pub mod list;
