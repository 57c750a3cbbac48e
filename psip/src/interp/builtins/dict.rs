//! Dictionary and scope operators: dict length maxlength begin end def

use crate::interp::{InterpError, InterpResult, Interpreter, Value};
use std::rc::Rc;
use tracing::debug;

/// `n dict` creates an empty dictionary; the capacity hint is not enforced
pub(super) fn dict(interp: &mut Interpreter) -> InterpResult<()> {
    interp.count_operand("dict", 0)?;
    interp.replace_top(1, Value::new_dict());
    Ok(())
}

fn entry_count(interp: &mut Interpreter, operator: &'static str) -> InterpResult<()> {
    let count = match interp.operand(operator, 0)? {
        Value::Dict(dict) => dict.borrow().len(),
        Value::String(s) => s.chars().count(),
        Value::Block(tokens) => tokens.len(),
        other => {
            return Err(InterpError::type_check(
                operator,
                "dictionary, string or block",
                other.type_name(),
            ));
        }
    };
    interp.replace_top(1, Value::Int(count as i64));
    Ok(())
}

pub(super) fn length(interp: &mut Interpreter) -> InterpResult<()> {
    entry_count(interp, "length")
}

/// Capacity is not tracked, so this reports the same count as `length`
pub(super) fn maxlength(interp: &mut Interpreter) -> InterpResult<()> {
    entry_count(interp, "maxlength")
}

pub(super) fn begin(interp: &mut Interpreter) -> InterpResult<()> {
    let dict = match interp.operand("begin", 0)? {
        Value::Dict(dict) => Rc::clone(dict),
        other => return Err(InterpError::type_check("begin", "dictionary", other.type_name())),
    };
    interp.operands.discard(1);
    interp.dicts.push(dict);
    debug!(depth = interp.dicts.depth(), "begin");
    Ok(())
}

pub(super) fn end(interp: &mut Interpreter) -> InterpResult<()> {
    interp
        .dicts
        .pop()
        .ok_or_else(|| InterpError::dict_stack_underflow("end"))?;
    debug!(depth = interp.dicts.depth(), "end");
    Ok(())
}

/// `/name value def` binds `name` (slash stripped) in the current dictionary
pub(super) fn def(interp: &mut Interpreter) -> InterpResult<()> {
    let value = interp.operand("def", 0)?.clone();
    let key = match interp.operand("def", 1)? {
        Value::Name(name) => name.trim_start_matches('/').to_string(),
        other => return Err(InterpError::type_check("def", "name", other.type_name())),
    };
    interp.operands.discard(2);
    debug!(key = %key, value = %value, "def");
    interp.dicts.define(key, value);
    Ok(())
}
