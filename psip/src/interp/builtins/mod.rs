//! Built-in operators
//!
//! Every operator is a registry entry with a name, a declared minimum arity
//! and a plain function over the interpreter. [`Builtin::invoke`] checks the
//! arity before calling the function, and the functions validate operand
//! kinds and ranges before they pop anything, so a failing operator leaves
//! the operand stack as it found it.

mod arith;
mod control;
mod dict;
mod logic;
mod print;
mod stack;
mod string;

use super::error::{InterpError, InterpResult};
use super::eval::Interpreter;
use super::scope::{Dictionary, Entry};
use super::value::Value;
use std::fmt;
use std::rc::Rc;

/// Operator implementation
pub type OperatorFn = fn(&mut Interpreter) -> InterpResult<()>;

/// A built-in operator bound in the system dictionary
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    arity: usize,
    func: OperatorFn,
}

impl Builtin {
    pub const fn new(name: &'static str, arity: usize, func: OperatorFn) -> Self {
        Builtin { name, arity, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Minimum number of operands the operator consumes
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn invoke(&self, interp: &mut Interpreter) -> InterpResult<()> {
        interp.operands.require(self.name, self.arity)?;
        (self.func)(interp)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}--", self.name)
    }
}

/// All built-in operators
pub static BUILTINS: &[Builtin] = &[
    // Stack
    Builtin::new("pop", 1, stack::pop),
    Builtin::new("dup", 1, stack::dup),
    Builtin::new("exch", 2, stack::exch),
    Builtin::new("copy", 1, stack::copy),
    Builtin::new("clear", 0, stack::clear),
    Builtin::new("count", 0, stack::count),
    // Arithmetic
    Builtin::new("add", 2, arith::add),
    Builtin::new("sub", 2, arith::sub),
    Builtin::new("mul", 2, arith::mul),
    Builtin::new("div", 2, arith::div),
    Builtin::new("idiv", 2, arith::idiv),
    Builtin::new("mod", 2, arith::modulo),
    Builtin::new("neg", 1, arith::neg),
    Builtin::new("ceiling", 1, arith::ceiling),
    Builtin::new("floor", 1, arith::floor),
    Builtin::new("round", 1, arith::round),
    Builtin::new("sqrt", 1, arith::sqrt),
    // Comparison and boolean
    Builtin::new("eq", 2, logic::eq),
    Builtin::new("ne", 2, logic::ne),
    Builtin::new("ge", 2, logic::ge),
    Builtin::new("gt", 2, logic::gt),
    Builtin::new("le", 2, logic::le),
    Builtin::new("lt", 2, logic::lt),
    Builtin::new("and", 2, logic::and),
    Builtin::new("or", 2, logic::or),
    Builtin::new("not", 1, logic::not),
    Builtin::new("true", 0, logic::push_true),
    Builtin::new("false", 0, logic::push_false),
    // Strings
    Builtin::new("str_length", 1, string::length),
    Builtin::new("str_get", 2, string::get),
    Builtin::new("str_get_interval", 3, string::get_interval),
    Builtin::new("str_put_interval", 3, string::put_interval),
    // Dictionaries
    Builtin::new("dict", 1, dict::dict),
    Builtin::new("length", 1, dict::length),
    Builtin::new("maxlength", 1, dict::maxlength),
    Builtin::new("begin", 1, dict::begin),
    Builtin::new("end", 0, dict::end),
    Builtin::new("def", 2, dict::def),
    // Control flow
    Builtin::new("if", 3, control::if_),
    Builtin::new("ifelse", 3, control::ifelse),
    Builtin::new("for", 4, control::for_),
    Builtin::new("repeat", 2, control::repeat),
    // Output
    Builtin::new("=", 1, print::print),
];

/// Build the system dictionary holding every built-in
pub fn system_dict() -> Dictionary {
    let mut dict = Dictionary::new();
    for builtin in BUILTINS {
        dict.define(builtin.name.to_string(), Entry::Builtin(*builtin));
    }
    dict
}

/// Number operand, kept exact for integers
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Num {
    Int(i64),
    Real(f64),
}

impl Num {
    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Real(x) => x,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Num::Int(n) => n == 0,
            Num::Real(x) => x == 0.0,
        }
    }
}

// Operand accessors. `depth` counts from the top of the stack (0 is the top).
impl Interpreter {
    pub(crate) fn operand(&self, operator: &'static str, depth: usize) -> InterpResult<&Value> {
        self.operands
            .peek(depth)
            .ok_or_else(|| InterpError::stack_underflow(operator, depth + 1, self.operands.len()))
    }

    pub(crate) fn int_operand(&self, operator: &'static str, depth: usize) -> InterpResult<i64> {
        let value = self.operand(operator, depth)?;
        value
            .as_int()
            .ok_or_else(|| InterpError::type_check(operator, "integer", value.type_name()))
    }

    /// Non-negative integer operand
    pub(crate) fn count_operand(&self, operator: &'static str, depth: usize) -> InterpResult<usize> {
        let n = self.int_operand(operator, depth)?;
        usize::try_from(n).map_err(|_| InterpError::negative_count(operator, n))
    }

    pub(crate) fn number_operand(&self, operator: &'static str, depth: usize) -> InterpResult<Num> {
        match self.operand(operator, depth)? {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Real(x) => Ok(Num::Real(*x)),
            other => Err(InterpError::type_check(operator, "number", other.type_name())),
        }
    }

    pub(crate) fn bool_operand(&self, operator: &'static str, depth: usize) -> InterpResult<bool> {
        let value = self.operand(operator, depth)?;
        value
            .as_bool()
            .ok_or_else(|| InterpError::type_check(operator, "boolean", value.type_name()))
    }

    pub(crate) fn string_operand(&self, operator: &'static str, depth: usize) -> InterpResult<Rc<str>> {
        match self.operand(operator, depth)? {
            Value::String(s) => Ok(Rc::clone(s)),
            other => Err(InterpError::type_check(operator, "string", other.type_name())),
        }
    }

    pub(crate) fn block_operand(&self, operator: &'static str, depth: usize) -> InterpResult<Rc<[String]>> {
        match self.operand(operator, depth)? {
            Value::Block(tokens) => Ok(Rc::clone(tokens)),
            other => Err(InterpError::type_check(operator, "block", other.type_name())),
        }
    }

    /// Pop `consumed` operands and push `result`
    pub(crate) fn replace_top(&mut self, consumed: usize, result: Value) {
        self.operands.discard(consumed);
        self.operands.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_names_unique() {
        let names: HashSet<&str> = BUILTINS.iter().map(|b| b.name()).collect();
        assert_eq!(names.len(), BUILTINS.len());
    }

    #[test]
    fn test_system_dict_holds_every_builtin() {
        let dict = system_dict();
        assert_eq!(dict.len(), BUILTINS.len());
        for name in ["add", "def", "ifelse", "str_put_interval", "="] {
            assert!(matches!(dict.get(name), Some(Entry::Builtin(_))), "{name}");
        }
    }

    #[test]
    fn test_builtin_debug_shows_name() {
        let dict = system_dict();
        let Some(Entry::Builtin(add)) = dict.get("add") else {
            panic!("add should be a builtin");
        };
        assert_eq!(format!("{add:?}"), "--add--");
        assert_eq!(add.arity(), 2);
    }

    #[test]
    fn test_invoke_checks_arity_first() {
        let mut interp = Interpreter::new();
        interp.evaluate_token("1").unwrap();
        let dict = system_dict();
        let Some(Entry::Builtin(exch)) = dict.get("exch") else {
            panic!("exch should be a builtin");
        };
        let err = exch.invoke(&mut interp).unwrap_err();
        assert_eq!(err, InterpError::stack_underflow("exch", 2, 1));
        assert_eq!(interp.snapshot_operand_stack(), vec![Value::Int(1)]);
    }

    #[test]
    fn test_count_operand_rejects_negative() {
        let mut interp = Interpreter::new();
        interp.evaluate_token("-3").unwrap();
        assert_eq!(
            interp.count_operand("copy", 0).unwrap_err(),
            InterpError::negative_count("copy", -3)
        );
    }
}
