//! psip library
//!
//! A PostScript-like stack interpreter: whitespace-delimited tokens, an
//! operand stack, and names resolved through a stack of dictionaries.

pub mod config;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod repl;
pub mod span;
pub mod util;

pub use config::{Config, Scoping};
pub use error::{PsError, Result};
pub use interp::{InterpError, Interpreter, Value};
pub use span::Span;
