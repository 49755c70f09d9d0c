//! Core library for file-name-pattern
pub mod config;
pub mod conversions;
pub mod fs;
pub mod models;
pub mod pattern;
pub mod scanner;
pub mod util;
