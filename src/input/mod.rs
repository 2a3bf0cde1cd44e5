//! Shell input: line grammar, index validation and command execution.

pub mod interpreter;
pub mod parser;
pub mod range;

pub use interpreter::{Outcome, dispatch, execute};
pub use parser::{Command, parse_command};
pub use range::{validate_index, validate_indices, validate_range};
