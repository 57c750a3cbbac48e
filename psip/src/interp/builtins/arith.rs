//! Arithmetic: add sub mul div idiv mod neg ceiling floor round sqrt
//!
//! Binary operators compute `lower OP top`, so `3 1 sub` is 2. Integer
//! operands stay integers (wrapping on overflow); any real operand makes the
//! result real.

use super::Num;
use crate::interp::{InterpError, InterpResult, Interpreter, Value};

/// Bias added before truncating in `ceiling`
const CEILING_BIAS: f64 = 0.999999;

/// Bias added before truncating in `round`
const ROUND_BIAS: f64 = 0.5;

fn binary(
    interp: &mut Interpreter,
    operator: &'static str,
    int_op: fn(i64, i64) -> i64,
    real_op: fn(f64, f64) -> f64,
) -> InterpResult<()> {
    let rhs = interp.number_operand(operator, 0)?;
    let lhs = interp.number_operand(operator, 1)?;
    let result = match (lhs, rhs) {
        (Num::Int(a), Num::Int(b)) => Value::Int(int_op(a, b)),
        _ => Value::Real(real_op(lhs.to_f64(), rhs.to_f64())),
    };
    interp.replace_top(2, result);
    Ok(())
}

/// Like [`binary`] but rejects a zero divisor before touching the stack
fn division(
    interp: &mut Interpreter,
    operator: &'static str,
    int_op: fn(i64, i64) -> i64,
    real_op: fn(f64, f64) -> f64,
) -> InterpResult<()> {
    if interp.number_operand(operator, 0)?.is_zero() {
        interp.number_operand(operator, 1)?;
        return Err(InterpError::division_by_zero(operator));
    }
    binary(interp, operator, int_op, real_op)
}

pub(super) fn add(interp: &mut Interpreter) -> InterpResult<()> {
    binary(interp, "add", i64::wrapping_add, |a, b| a + b)
}

pub(super) fn sub(interp: &mut Interpreter) -> InterpResult<()> {
    binary(interp, "sub", i64::wrapping_sub, |a, b| a - b)
}

pub(super) fn mul(interp: &mut Interpreter) -> InterpResult<()> {
    binary(interp, "mul", i64::wrapping_mul, |a, b| a * b)
}

/// Always real: `4 2 div` is 2.0
pub(super) fn div(interp: &mut Interpreter) -> InterpResult<()> {
    let rhs = interp.number_operand("div", 0)?;
    let lhs = interp.number_operand("div", 1)?;
    if rhs.is_zero() {
        return Err(InterpError::division_by_zero("div"));
    }
    interp.replace_top(2, Value::Real(lhs.to_f64() / rhs.to_f64()));
    Ok(())
}

/// Quotient rounded toward negative infinity
pub(super) fn idiv(interp: &mut Interpreter) -> InterpResult<()> {
    division(interp, "idiv", floor_div, |a, b| (a / b).floor())
}

/// Remainder with the sign of the divisor
pub(super) fn modulo(interp: &mut Interpreter) -> InterpResult<()> {
    division(interp, "mod", floor_mod, |a, b| {
        let r = a % b;
        if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
    })
}

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        q.wrapping_sub(1)
    } else {
        q
    }
}

fn floor_mod(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        r.wrapping_add(b)
    } else {
        r
    }
}

pub(super) fn neg(interp: &mut Interpreter) -> InterpResult<()> {
    let result = match interp.number_operand("neg", 0)? {
        Num::Int(n) => Value::Int(n.wrapping_neg()),
        Num::Real(x) => Value::Real(-x),
    };
    interp.replace_top(1, result);
    Ok(())
}

/// Shared shape of ceiling/floor/round: bias, then truncate toward zero.
/// These are approximations and are kept that way on purpose; negative
/// inputs truncate toward zero as well.
fn truncate_biased(interp: &mut Interpreter, operator: &'static str, bias: f64) -> InterpResult<()> {
    let x = interp.number_operand(operator, 0)?.to_f64();
    interp.replace_top(1, Value::Int((x + bias).trunc() as i64));
    Ok(())
}

pub(super) fn ceiling(interp: &mut Interpreter) -> InterpResult<()> {
    truncate_biased(interp, "ceiling", CEILING_BIAS)
}

pub(super) fn floor(interp: &mut Interpreter) -> InterpResult<()> {
    truncate_biased(interp, "floor", 0.0)
}

pub(super) fn round(interp: &mut Interpreter) -> InterpResult<()> {
    truncate_biased(interp, "round", ROUND_BIAS)
}

pub(super) fn sqrt(interp: &mut Interpreter) -> InterpResult<()> {
    let x = interp.number_operand("sqrt", 0)?.to_f64();
    if x < 0.0 {
        return Err(InterpError::range_check("sqrt", format!("square root of negative number {x}")));
    }
    interp.replace_top(1, Value::Real(x.sqrt()));
    Ok(())
}
