//! CLI command implementations

pub mod browse;
pub mod clean;
pub mod generate;
pub mod init;
pub mod list;
pub mod new;
pub mod render;
