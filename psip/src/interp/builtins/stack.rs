//! Stack manipulation: pop dup exch copy clear count

use crate::interp::{InterpError, InterpResult, Interpreter, Value};

pub(super) fn pop(interp: &mut Interpreter) -> InterpResult<()> {
    interp.operands.discard(1);
    Ok(())
}

pub(super) fn dup(interp: &mut Interpreter) -> InterpResult<()> {
    let top = interp.operand("dup", 0)?.clone();
    interp.operands.push(top);
    Ok(())
}

pub(super) fn exch(interp: &mut Interpreter) -> InterpResult<()> {
    let top = interp.operand("exch", 0)?.clone();
    let below = interp.operand("exch", 1)?.clone();
    interp.operands.discard(2);
    interp.operands.push(top);
    interp.operands.push(below);
    Ok(())
}

/// `any_1 .. any_n n copy` duplicates the n values under the count
pub(super) fn copy(interp: &mut Interpreter) -> InterpResult<()> {
    let n = interp.count_operand("copy", 0)?;
    let available = interp.operands.len() - 1;
    if n > available {
        return Err(InterpError::stack_underflow("copy", n + 1, interp.operands.len()));
    }
    interp.operands.discard(1);
    let copied: Vec<Value> = interp.operands.top(n).to_vec();
    for value in copied {
        interp.operands.push(value);
    }
    Ok(())
}

pub(super) fn clear(interp: &mut Interpreter) -> InterpResult<()> {
    interp.operands.clear();
    Ok(())
}

pub(super) fn count(interp: &mut Interpreter) -> InterpResult<()> {
    let depth = interp.operands.len() as i64;
    interp.operands.push(Value::Int(depth));
    Ok(())
}
