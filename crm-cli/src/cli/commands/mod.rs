pub mod config;
pub mod fields;
pub mod import;
pub mod preview;
