//! Command-line host for the todo client core.
//!
//! Supplies the pieces the core leaves to its host: a blocking HTTP
//! transport, subcommands that drive `TodoPage` and `TodosApi`, and
//! terminal output.

pub mod commands;
pub mod output;
pub mod transport;

pub use commands::{execute, Commands, Session};
pub use output::{Output, OutputFormat};
pub use transport::UreqTransport;
