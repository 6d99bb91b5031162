//! Subcommand implementations.
//!
//! Each command is a pure function from parsed input to a serializable report, the binary only
//! handles reading input and printing output.

pub mod parse;
pub mod permission;
pub mod process;
