//! Rendering of results for the CLI

pub mod formatter;

pub use formatter::{formatter_for, ConsoleFormatter, JsonFormatter, OutputFormatter};
