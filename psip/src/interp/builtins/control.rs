//! Control flow: if ifelse for repeat
//!
//! Branches and loops re-enter the evaluator on the captured block; there is
//! no separate jump mechanism. Operands are validated and popped before the
//! first block runs, so the block sees the stack without them. A loop charges
//! its whole iteration count to the per-token budget before it starts.

use crate::interp::{InterpError, InterpResult, Interpreter};

/// `false_block true_block condition` runs exactly one of the two blocks
fn branch(interp: &mut Interpreter, operator: &'static str) -> InterpResult<()> {
    let condition = interp.bool_operand(operator, 0)?;
    let when_true = interp.block_operand(operator, 1)?;
    let when_false = interp.block_operand(operator, 2)?;
    interp.operands.discard(3);
    let taken = if condition { when_true } else { when_false };
    interp.execute_block(&taken)
}

pub(super) fn if_(interp: &mut Interpreter) -> InterpResult<()> {
    branch(interp, "if")
}

pub(super) fn ifelse(interp: &mut Interpreter) -> InterpResult<()> {
    branch(interp, "ifelse")
}

/// Number of values in the half-open range `[start, end)` stepped by `step`
fn range_len(start: i64, step: i64, end: i64) -> u128 {
    let (start, step, end) = (i128::from(start), i128::from(step), i128::from(end));
    let span = if step > 0 { end - start } else { start - end };
    if span <= 0 {
        return 0;
    }
    let stride = step.abs();
    ((span + stride - 1) / stride) as u128
}

/// `block step start end for` runs `block` once per value in `[start, end)`.
/// The loop value is not pushed.
pub(super) fn for_(interp: &mut Interpreter) -> InterpResult<()> {
    let end = interp.int_operand("for", 0)?;
    let start = interp.int_operand("for", 1)?;
    let step = interp.int_operand("for", 2)?;
    let block = interp.block_operand("for", 3)?;
    if step == 0 {
        return Err(InterpError::zero_step("for"));
    }
    let iterations = range_len(start, step, end);
    interp.charge_iterations(iterations)?;
    interp.operands.discard(4);

    for _ in 0..iterations {
        interp.execute_block(&block)?;
    }
    Ok(())
}

/// `block count repeat`
pub(super) fn repeat(interp: &mut Interpreter) -> InterpResult<()> {
    let count = interp.count_operand("repeat", 0)?;
    let block = interp.block_operand("repeat", 1)?;
    interp.charge_iterations(count as u128)?;
    interp.operands.discard(2);

    for _ in 0..count {
        interp.execute_block(&block)?;
    }
    Ok(())
}
