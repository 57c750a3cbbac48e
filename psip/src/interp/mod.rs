//! Stack interpreter
//!
//! Operand stack, dictionary stack, token classifier and the evaluator that
//! ties them together.

mod builtins;
mod classify;
mod error;
mod eval;
mod journal;
mod scope;
mod stack;
mod value;

pub use builtins::{system_dict, Builtin, OperatorFn, BUILTINS};
pub use classify::classify;
pub use error::{ErrorCategory, InterpError, InterpResult, Limit, Mismatch};
pub use eval::Interpreter;
pub use scope::{DictRef, DictStack, Dictionary, Entry};
pub use stack::OperandStack;
pub use value::Value;
